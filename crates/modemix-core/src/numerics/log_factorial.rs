use crate::domain::{ComputeResult, ModeMixError, lmax_out_of_range};
use std::ops::Index;

/// Table of `ln(n!)` for `n` in `0..len`.
///
/// Built once per run and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LogFactorialTable {
    values: Vec<f64>,
}

impl LogFactorialTable {
    /// Builds `len` entries: `ln(k)` for `k >= 1`, slot 0 copied from slot 1,
    /// then a running sum turns the logs into log-factorials.
    pub fn build(len: usize) -> Self {
        let mut values = vec![0.0; len];
        for (k, value) in values.iter_mut().enumerate().skip(1) {
            *value = (k as f64).ln();
        }
        if len > 1 {
            values[0] = values[1];
        }
        for k in 1..len {
            values[k] += values[k - 1];
        }
        Self { values }
    }

    /// Builds a table large enough for a coupling matrix of dimension `lmax`.
    pub fn for_lmax(lmax: usize) -> ComputeResult<Self> {
        let len = required_table_len(lmax)
            .ok_or_else(|| lmax_out_of_range(lmax, "log-factorial table length"))?;
        Ok(Self::build(len))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn ensure_covers(&self, lmax: usize) -> ComputeResult<()> {
        let required = required_table_len(lmax)
            .ok_or_else(|| lmax_out_of_range(lmax, "log-factorial table length"))?;
        if self.values.len() < required {
            return Err(ModeMixError::input_validation(
                "INPUT.FACTORIAL_TABLE",
                format!(
                    "log-factorial table has {} entries, lmax={} needs at least {}",
                    self.values.len(),
                    lmax,
                    required
                ),
            ));
        }
        Ok(())
    }
}

impl Index<usize> for LogFactorialTable {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

/// Table length needed for every 3j symbol of a `lmax x lmax` matrix.
///
/// The largest index read is `L + 1` with `L = l1 + l2 + l3 <= 4 * (lmax - 1)`.
/// Never smaller than the classic `3 * lmax + 1` bound. `None` on overflow.
pub fn required_table_len(lmax: usize) -> Option<usize> {
    let coupled = if lmax == 0 {
        2
    } else {
        lmax.checked_mul(4)?.checked_sub(2)?
    };
    let classic = lmax.checked_mul(3)?.checked_add(1)?;
    Some(coupled.max(classic))
}
