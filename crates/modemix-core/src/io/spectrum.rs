use crate::domain::{ComputeResult, ModeMixError};
use std::fs;
use std::path::Path;

/// Angular power spectrum of the mask, index 0 being the monopole.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaskSpectrum {
    values: Vec<f64>,
}

impl MaskSpectrum {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn monopole(&self) -> Option<f64> {
        self.values.first().copied()
    }
}

/// First token that did not parse as a number; reading stopped there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsedToken {
    pub position: usize,
    pub token: String,
}

/// Reads whitespace-separated values in order. Parsing stops at the first
/// token that is not a number and keeps everything before it.
pub fn parse_spectrum_text(content: &str) -> (MaskSpectrum, Option<UnparsedToken>) {
    let mut values = Vec::new();
    for (position, token) in content.split_whitespace().enumerate() {
        match token.parse::<f64>() {
            Ok(value) => values.push(value),
            Err(_) => {
                let unparsed = UnparsedToken {
                    position,
                    token: token.to_string(),
                };
                return (MaskSpectrum::new(values), Some(unparsed));
            }
        }
    }
    (MaskSpectrum::new(values), None)
}

pub fn read_spectrum_file(path: &Path) -> ComputeResult<MaskSpectrum> {
    let content = fs::read_to_string(path).map_err(|source| {
        ModeMixError::io_system(
            "IO.SPECTRUM_READ",
            format!("failed to read input power spectrum '{}': {}", path.display(), source),
        )
    })?;

    let (spectrum, unparsed) = parse_spectrum_text(&content);
    if let Some(unparsed) = unparsed {
        tracing::warn!(
            path = %path.display(),
            position = unparsed.position,
            token = %unparsed.token,
            kept = spectrum.len(),
            "stopped reading spectrum at non-numeric token"
        );
    }
    Ok(spectrum)
}

#[cfg(test)]
mod tests {
    use super::{UnparsedToken, parse_spectrum_text, read_spectrum_file};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn mixed_whitespace_and_exponents_are_accepted() {
        let (spectrum, unparsed) =
            parse_spectrum_text("1.0e-1\n2.5  3\t-4.0E+02\r\n5.000000000000000000e-03\n");
        assert_eq!(spectrum.values(), &[0.1, 2.5, 3.0, -400.0, 0.005]);
        assert_eq!(spectrum.monopole(), Some(0.1));
        assert_eq!(unparsed, None);
    }

    #[test]
    fn reading_stops_at_first_non_numeric_token() {
        let (spectrum, unparsed) = parse_spectrum_text("1.0 2.0 # trailing comment 3.0");
        assert_eq!(spectrum.values(), &[1.0, 2.0]);
        assert_eq!(
            unparsed,
            Some(UnparsedToken {
                position: 2,
                token: "#".to_string(),
            })
        );
    }

    #[test]
    fn empty_input_yields_empty_spectrum() {
        let (spectrum, unparsed) = parse_spectrum_text("  \n\n");
        assert!(spectrum.is_empty());
        assert_eq!(spectrum.monopole(), None);
        assert_eq!(unparsed, None);
    }

    #[test]
    fn spectrum_file_is_read_from_disk() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("mask.cl");
        fs::write(&path, "0.25\n0.125\n0.0625\n").expect("spectrum should be written");

        let spectrum = read_spectrum_file(&path).expect("spectrum should be readable");
        assert_eq!(spectrum.values(), &[0.25, 0.125, 0.0625]);
    }

    #[test]
    fn missing_file_maps_to_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = read_spectrum_file(&temp.path().join("absent.cl"))
            .expect_err("missing file should fail");
        assert_eq!(error.placeholder(), "IO.SPECTRUM_READ");
        assert_eq!(error.exit_code(), 3);
    }
}
