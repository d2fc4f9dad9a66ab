// src/processing/bilinear.rs
//! Bilinear transform between the analog (s) and digital (z) planes

use crate::utils::{constant, Sample};
use num::Complex;

/// Map an analog pole/zero to the digital plane: `z = (1 + s/2fs) / (1 - s/2fs)`.
///
/// Undefined for `s = 2·fs`; callers never produce that point for stable designs.
pub fn to_digital<F: Sample>(sampling_frequency: F, s_plane: Complex<F>) -> Complex<F> {
    let scaled = s_plane / (constant::<F>(2.0) * sampling_frequency);
    let one = Complex::new(F::one(), F::zero());
    (one + scaled) / (one - scaled)
}

/// Map a digital pole/zero back to the analog plane: `s = 2fs·(1 - 1/z) / (1 + 1/z)`.
///
/// Undefined for `z = -1`.
pub fn to_analog<F: Sample>(sampling_frequency: F, z_plane: Complex<F>) -> Complex<F> {
    let one = Complex::new(F::one(), F::zero());
    let inverse = one / z_plane;
    (one - inverse) / (one + inverse) * (constant::<F>(2.0) * sampling_frequency)
}

/// Element-wise [`to_digital`].
pub fn to_digital_all<F: Sample>(sampling_frequency: F, s_plane: &[Complex<F>]) -> Vec<Complex<F>> {
    s_plane
        .iter()
        .map(|&s| to_digital(sampling_frequency, s))
        .collect()
}

/// Element-wise [`to_analog`].
pub fn to_analog_all<F: Sample>(sampling_frequency: F, z_plane: &[Complex<F>]) -> Vec<Complex<F>> {
    z_plane
        .iter()
        .map(|&z| to_analog(sampling_frequency, z))
        .collect()
}
