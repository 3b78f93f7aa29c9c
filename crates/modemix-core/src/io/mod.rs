pub mod matrix;
pub mod spectrum;

pub use matrix::{format_c_exponent, write_matrix, write_matrix_file};
pub use spectrum::{MaskSpectrum, UnparsedToken, parse_spectrum_text, read_spectrum_file};
