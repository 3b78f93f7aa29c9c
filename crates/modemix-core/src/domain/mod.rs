pub mod errors;

pub use errors::{ComputeResult, ErrorCategory, ModeMixError};

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// How many spectrum entries the matrix builder insists on.
///
/// The summation reads the mask spectrum up to multipole `2*lmax - 2`.
/// `Strict` requires all of them; `ZeroPadded` only requires `lmax` entries
/// and treats the missing tail as zero power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumBound {
    #[default]
    Strict,
    ZeroPadded,
}

impl SpectrumBound {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::ZeroPadded => "zero_padded",
        }
    }

    /// Minimum spectrum length accepted for a matrix of dimension `lmax`.
    /// `None` when the length does not fit in `usize`.
    pub fn required_len(self, lmax: usize) -> Option<usize> {
        match self {
            Self::Strict => coupled_spectrum_len(lmax),
            Self::ZeroPadded => Some(lmax),
        }
    }
}

impl Display for SpectrumBound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Number of spectrum entries the summation touches: multipoles `0..=2*lmax-2`.
pub fn coupled_spectrum_len(lmax: usize) -> Option<usize> {
    if lmax == 0 {
        return Some(0);
    }
    lmax.checked_mul(2)?.checked_sub(1)
}

/// Rejection for an `lmax` whose derived sizes overflow `usize`.
pub fn lmax_out_of_range(lmax: usize, quantity: &str) -> ModeMixError {
    ModeMixError::input_validation(
        "INPUT.LMAX",
        format!("lmax={lmax} is too large: {quantity} overflows the addressable size"),
    )
}
