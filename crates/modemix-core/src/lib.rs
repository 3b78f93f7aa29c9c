//! Mode-mixing matrix computation for power spectra measured through a mask.
//!
//! The coupling matrix maps a true angular power spectrum onto the spectrum
//! observed on masked data. Its entries are sums of squared Wigner 3j
//! symbols weighted by the mask's own power spectrum.

pub mod domain;
pub mod io;
pub mod numerics;
pub mod runner;
