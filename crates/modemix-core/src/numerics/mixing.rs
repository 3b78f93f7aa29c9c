use super::log_factorial::{LogFactorialTable, required_table_len};
use super::wigner::wigner_3j_zero;
use crate::domain::{
    ComputeResult, ModeMixError, SpectrumBound, coupled_spectrum_len, lmax_out_of_range,
};
use faer::Mat;
use std::f64::consts::PI;

/// Dense `lmax x lmax` coupling matrix indexed `(l1, l2)`.
pub type ModeMixingMatrix = Mat<f64>;

/// Receives a notification after each matrix row is finished.
pub trait ProgressReporter {
    fn row_completed(&mut self, row: usize, total: usize);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn row_completed(&mut self, _row: usize, _total: usize) {}
}

/// Emits one `tracing` event per finished row.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn row_completed(&mut self, row: usize, total: usize) {
        tracing::info!(row, total, "mode-mixing row complete");
    }
}

impl<F> ProgressReporter for F
where
    F: FnMut(usize, usize),
{
    fn row_completed(&mut self, row: usize, total: usize) {
        self(row, total)
    }
}

/// Sizes derived from `lmax` once every precondition has been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouplingDimensions {
    pub required_spectrum_len: usize,
    pub coupled_spectrum_len: usize,
}

/// Computes the coupling matrix with the default strict spectrum bound and
/// no progress reporting.
pub fn compute_mode_mixing_matrix(
    spectrum: &[f64],
    lmax: usize,
) -> ComputeResult<ModeMixingMatrix> {
    validate_inputs(spectrum, lmax, SpectrumBound::Strict)?;
    let table = LogFactorialTable::for_lmax(lmax)?;
    build_mode_mixing_matrix(
        spectrum,
        lmax,
        &table,
        SpectrumBound::Strict,
        &mut NoProgress,
    )
}

/// Checks `lmax` and the spectrum before anything sized by `lmax` is
/// allocated.
pub fn validate_inputs(
    spectrum: &[f64],
    lmax: usize,
    bound: SpectrumBound,
) -> ComputeResult<CouplingDimensions> {
    if lmax == 0 {
        return Err(ModeMixError::input_validation(
            "INPUT.LMAX",
            "lmax must be a positive integer, got 0",
        ));
    }

    let required = bound
        .required_len(lmax)
        .ok_or_else(|| lmax_out_of_range(lmax, "required spectrum length"))?;
    if spectrum.len() < required {
        return Err(ModeMixError::input_validation(
            "INPUT.SPECTRUM_LENGTH",
            format!(
                "input power spectrum has {} entries, lmax={} needs at least {} ({} bound)",
                spectrum.len(),
                lmax,
                required,
                bound
            ),
        ));
    }

    let coupled = coupled_spectrum_len(lmax)
        .ok_or_else(|| lmax_out_of_range(lmax, "coupled spectrum length"))?;
    if required_table_len(lmax).is_none() {
        return Err(lmax_out_of_range(lmax, "log-factorial table length"));
    }

    let consumed = coupled.min(spectrum.len());
    if let Some(multipole) = spectrum[..consumed].iter().position(|value| !value.is_finite()) {
        return Err(ModeMixError::input_validation(
            "INPUT.SPECTRUM_VALUE",
            format!(
                "input power spectrum entry at l={} is not finite ({})",
                multipole, spectrum[multipole]
            ),
        ));
    }

    Ok(CouplingDimensions {
        required_spectrum_len: required,
        coupled_spectrum_len: coupled,
    })
}

/// Builds `M[l1][l2] = (2 l2 + 1) / (4 pi) * sum_l3 (2 l3 + 1) W[l3] (l1 l2 l3; 0 0 0)^2`
/// for `l1, l2` in `0..lmax`.
///
/// All preconditions are checked before the matrix is allocated. With
/// [`SpectrumBound::ZeroPadded`], multipoles past the end of `spectrum`
/// contribute nothing.
pub fn build_mode_mixing_matrix<P>(
    spectrum: &[f64],
    lmax: usize,
    table: &LogFactorialTable,
    bound: SpectrumBound,
    progress: &mut P,
) -> ComputeResult<ModeMixingMatrix>
where
    P: ProgressReporter + ?Sized,
{
    let dimensions = validate_inputs(spectrum, lmax, bound)?;
    table.ensure_covers(lmax)?;

    if spectrum.len() < dimensions.coupled_spectrum_len {
        tracing::warn!(
            spectrum_len = spectrum.len(),
            consumed = dimensions.coupled_spectrum_len,
            "spectrum shorter than coupled range; treating missing multipoles as zero"
        );
    }

    let mut matrix = ModeMixingMatrix::zeros(lmax, lmax);
    for l1 in 0..lmax {
        for l2 in 0..lmax {
            matrix[(l1, l2)] = coupling_entry(spectrum, l1, l2, table);
        }
        progress.row_completed(l1, lmax);
    }

    Ok(matrix)
}

fn coupling_entry(spectrum: &[f64], l1: usize, l2: usize, table: &LogFactorialTable) -> f64 {
    let weight = (2 * l2 + 1) as f64 / (4.0 * PI);
    let lower = l1.abs_diff(l2);
    let upper = (l1 + l2).min(spectrum.len().saturating_sub(1));

    let mut sum = 0.0;
    for l3 in lower..=upper {
        let symbol = wigner_3j_zero(l1, l2, l3, table);
        sum += (2 * l3 + 1) as f64 * spectrum[l3] * symbol * symbol;
    }
    weight * sum
}

pub fn matrix_trace(matrix: &ModeMixingMatrix) -> f64 {
    (0..matrix.nrows().min(matrix.ncols()))
        .map(|index| matrix[(index, index)])
        .sum()
}
