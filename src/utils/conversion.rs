//! Scalar conversion utilities for IIR-Core
//!
//! Design formulas are written once against `f64` literals and converted into
//! the filter scalar with [`constant`], so the same code serves `f32` and `f64`.

use num_traits::{Float, FloatConst};
use std::fmt::{Debug, Display};

/// Real floating point scalar a filter can be instantiated with.
///
/// Blanket-implemented for every type satisfying the bounds, i.e. `f32` and `f64`.
pub trait Sample: Float + FloatConst + Debug + Display + Send + Sync + 'static {}

impl<T> Sample for T where T: Float + FloatConst + Debug + Display + Send + Sync + 'static {}

/// Convert an `f64` constant into the scalar type `F`.
///
/// Conversion into `f32`/`f64` cannot fail; a type that cannot represent the
/// value yields NaN, which the coefficient checks then reject.
#[inline]
pub fn constant<F: Sample>(value: f64) -> F {
    F::from(value).unwrap_or_else(F::nan)
}

/// Convert an index or count into the scalar type `F`.
#[inline]
pub fn from_usize<F: Sample>(value: usize) -> F {
    F::from(value).unwrap_or_else(F::nan)
}

/// Nyquist frequency `fs / 2`.
#[inline]
pub fn nyquist<F: Sample>(sampling_frequency: F) -> F {
    sampling_frequency / constant(2.0)
}

/// Continuous pre-warped frequency `(fs/π)·tan(π·f/fs)`.
///
/// Compensates the frequency compression introduced by the bilinear transform.
pub fn prewarp<F: Sample>(frequency: F, sampling_frequency: F) -> F {
    (sampling_frequency / F::PI()) * (F::PI() * frequency / sampling_frequency).tan()
}
