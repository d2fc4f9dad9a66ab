// src/processing/filters/moving_average.rs
//! Moving average filter

use super::DigitalFilter;
use crate::error::{FilterError, FilterResult};
use crate::processing::coefficients::FilterType;
use crate::utils::{from_usize, Sample};

/// Backward moving average over `window` samples: `a = [1]`, `b = [1/w; w]`.
pub fn moving_average<F: Sample>(window: usize) -> FilterResult<DigitalFilter<F>> {
    if window == 0 {
        return Err(FilterError::BadOrderSize { order: window });
    }
    let weight = F::one() / from_usize::<F>(window);
    DigitalFilter::with_type(&[F::one()], &vec![weight; window], FilterType::Backward)
}
