pub mod log_factorial;
pub mod mixing;
pub mod wigner;

pub use log_factorial::{LogFactorialTable, required_table_len};
pub use mixing::{
    CouplingDimensions, ModeMixingMatrix, NoProgress, ProgressReporter, TracingProgress,
    build_mode_mixing_matrix, compute_mode_mixing_matrix, matrix_trace, validate_inputs,
};
pub use wigner::wigner_3j_zero;
