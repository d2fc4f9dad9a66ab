// src/processing/mod.rs
//! Filter design and evaluation

pub mod bilinear;
pub mod butterworth;
pub mod coefficients;
pub mod differentiators;
pub mod filter_bank;
pub mod filters;
pub mod polynomial;

pub use bilinear::{to_analog, to_analog_all, to_digital, to_digital_all};
pub use butterworth::{
    analog_poles, analog_zeros, design, find_minimum_butter, Butterworth, ButterworthDesign, FilterKind,
    Frequencies,
};
pub use coefficients::{FilterCoefficients, FilterType};
pub use differentiators::*;
pub use filter_bank::FilterBank;
pub use filters::*;
pub use polynomial::poly_coeffs_from_roots;
