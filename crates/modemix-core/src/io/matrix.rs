use crate::domain::{ComputeResult, ModeMixError};
use crate::numerics::ModeMixingMatrix;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Formats like C's `%e`: six mantissa digits, signed exponent of at least
/// two digits (`7.957747e-02`).
pub fn format_c_exponent(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let rendered = format!("{value:.6e}");
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return rendered;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return rendered;
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

/// Writes one row per line, each value followed by a space, then a blank line.
pub fn write_matrix<W: Write>(writer: &mut W, matrix: &ModeMixingMatrix) -> std::io::Result<()> {
    for row in 0..matrix.nrows() {
        for col in 0..matrix.ncols() {
            write!(writer, "{} ", format_c_exponent(matrix[(row, col)]))?;
        }
        writeln!(writer)?;
    }
    writeln!(writer)
}

pub fn write_matrix_file(path: &Path, matrix: &ModeMixingMatrix) -> ComputeResult<()> {
    let write_error = |source: std::io::Error| {
        ModeMixError::io_system(
            "IO.MATRIX_WRITE",
            format!("failed to write mode-mixing matrix '{}': {}", path.display(), source),
        )
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let file = fs::File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    write_matrix(&mut writer, matrix).map_err(write_error)?;
    writer.flush().map_err(write_error)
}
