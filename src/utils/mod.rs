//! Common numeric utilities for IIR-Core
//!
//! This module provides the scalar abstraction shared by every filter:
//! - The `Sample` trait bounding the real floating point types filters run on
//! - Conversion of `f64` design constants into the filter's scalar type
//! - Small frequency helpers (Nyquist frequency, pre-warping)

pub mod conversion;

pub use conversion::{constant, from_usize, nyquist, prewarp, Sample};
