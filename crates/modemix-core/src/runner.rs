use crate::domain::{ComputeResult, ModeMixError, SpectrumBound};
use crate::io::{read_spectrum_file, write_matrix_file};
use crate::numerics::{
    LogFactorialTable, ProgressReporter, build_mode_mixing_matrix, matrix_trace, validate_inputs,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
pub struct ModeMixRunConfig {
    pub spectrum_path: PathBuf,
    pub matrix_path: PathBuf,
    pub lmax: usize,
    pub bound: SpectrumBound,
    pub report_path: Option<PathBuf>,
}

impl ModeMixRunConfig {
    pub fn new(
        spectrum_path: impl Into<PathBuf>,
        matrix_path: impl Into<PathBuf>,
        lmax: usize,
    ) -> Self {
        Self {
            spectrum_path: spectrum_path.into(),
            matrix_path: matrix_path.into(),
            lmax,
            bound: SpectrumBound::default(),
            report_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModeMixRunReport {
    pub generated_at_unix_seconds: u64,
    pub spectrum_path: String,
    pub matrix_path: String,
    pub lmax: usize,
    pub spectrum_len: usize,
    pub spectrum_monopole: Option<f64>,
    pub required_spectrum_len: usize,
    pub coupled_spectrum_len: usize,
    pub bound: SpectrumBound,
    pub factorial_table_len: usize,
    pub matrix_trace: f64,
    pub elapsed_seconds: f64,
}

/// Reads the mask spectrum, builds the coupling matrix and writes it out.
///
/// Every precondition is checked before the output file is touched, so a
/// failed run leaves no partial matrix behind.
pub fn run_mode_mixing<P>(
    config: &ModeMixRunConfig,
    progress: &mut P,
) -> ComputeResult<ModeMixRunReport>
where
    P: ProgressReporter + ?Sized,
{
    let started = Instant::now();
    let spectrum = read_spectrum_file(&config.spectrum_path)?;
    tracing::info!(
        spectrum_len = spectrum.len(),
        path = %config.spectrum_path.display(),
        "read input power spectrum"
    );
    tracing::info!(lmax = config.lmax, bound = %config.bound, "building mode-mixing matrix");

    let dimensions = validate_inputs(spectrum.values(), config.lmax, config.bound)?;
    let table = LogFactorialTable::for_lmax(config.lmax)?;
    let matrix = build_mode_mixing_matrix(
        spectrum.values(),
        config.lmax,
        &table,
        config.bound,
        progress,
    )?;
    let trace = matrix_trace(&matrix);
    if !trace.is_finite() {
        return Err(ModeMixError::computation(
            "RUN.NON_FINITE",
            format!("mode-mixing matrix has a non-finite trace ({trace})"),
        ));
    }

    write_matrix_file(&config.matrix_path, &matrix)?;
    tracing::info!(path = %config.matrix_path.display(), "wrote mode-mixing matrix");

    let report = ModeMixRunReport {
        generated_at_unix_seconds: current_unix_timestamp_seconds(),
        spectrum_path: normalize_path(&config.spectrum_path),
        matrix_path: normalize_path(&config.matrix_path),
        lmax: config.lmax,
        spectrum_len: spectrum.len(),
        spectrum_monopole: spectrum.monopole(),
        required_spectrum_len: dimensions.required_spectrum_len,
        coupled_spectrum_len: dimensions.coupled_spectrum_len,
        bound: config.bound,
        factorial_table_len: table.len(),
        matrix_trace: trace,
        elapsed_seconds: started.elapsed().as_secs_f64(),
    };

    if let Some(report_path) = &config.report_path {
        write_report(report_path, &report)?;
    }

    Ok(report)
}

pub fn render_human_summary(report: &ModeMixRunReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!("input power spectrum size = {}", report.spectrum_len));
    if let Some(monopole) = report.spectrum_monopole {
        lines.push(format!("mask monopole (mean of mask squared) = {monopole:.6e}"));
    }
    lines.push(format!("lmax = {}", report.lmax));
    lines.push(format!(
        "Spectrum bound: {} (required {}, coupled range {})",
        report.bound, report.required_spectrum_len, report.coupled_spectrum_len
    ));
    lines.push(format!(
        "Matrix: {}x{} written to {} (trace={:.6e}, {:.3}s)",
        report.lmax, report.lmax, report.matrix_path, report.matrix_trace, report.elapsed_seconds
    ));
    lines.join("\n")
}

fn write_report(path: &Path, report: &ModeMixRunReport) -> ComputeResult<()> {
    let report_error = |message: String| ModeMixError::io_system("IO.REPORT_WRITE", message);

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| {
            report_error(format!(
                "failed to create report directory '{}': {}",
                parent.display(),
                source
            ))
        })?;
    }

    let json = serde_json::to_string_pretty(report).map_err(|source| {
        ModeMixError::internal(
            "SYS.REPORT_ENCODE",
            format!("failed to encode run report: {source}"),
        )
    })?;
    fs::write(path, json).map_err(|source| {
        report_error(format!("failed to write run report '{}': {}", path.display(), source))
    })
}

fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn current_unix_timestamp_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}
