use super::CliError;
use modemix_core::domain::SpectrumBound;
use modemix_core::numerics::TracingProgress;
use modemix_core::runner::{ModeMixRunConfig, render_human_summary, run_mode_mixing};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct ComputeArgs {
    /// Mask power spectrum, whitespace-separated values starting at l=0
    #[arg(value_name = "SPECTRUM")]
    spectrum: PathBuf,

    /// Destination of the lmax x lmax mode-mixing matrix
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Matrix dimension (multipoles 0..lmax)
    #[arg(value_name = "LMAX")]
    lmax: usize,

    /// Accept spectra with only lmax entries; missing multipoles count as zero
    #[arg(long)]
    zero_pad: bool,

    /// JSON run report output path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(long, short)]
    pub(super) quiet: bool,
}

impl ComputeArgs {
    fn into_config(self) -> ModeMixRunConfig {
        let bound = if self.zero_pad {
            SpectrumBound::ZeroPadded
        } else {
            SpectrumBound::Strict
        };

        ModeMixRunConfig {
            spectrum_path: self.spectrum,
            matrix_path: self.output,
            lmax: self.lmax,
            bound,
            report_path: self.report,
        }
    }
}

pub(super) fn run_compute_command(args: ComputeArgs) -> Result<i32, CliError> {
    let quiet = args.quiet;
    let config = args.into_config();
    let report = run_mode_mixing(&config, &mut TracingProgress).map_err(CliError::Compute)?;

    if !quiet {
        println!("{}", render_human_summary(&report));
        if let Some(report_path) = &config.report_path {
            println!("JSON report: {}", report_path.display());
        }
    }
    Ok(0)
}
