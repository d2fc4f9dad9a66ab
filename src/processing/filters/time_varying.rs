// src/processing/filters/time_varying.rs
//! Recursive filter for irregularly sampled signals
//!
//! The numerator is rebuilt at every step from the timestamps of the samples in
//! the history: each tap `k` is divided by `Δt_k^p`, where `Δt_k` is the time span
//! the tap covers and `p` the derivative order. This turns a differentiation
//! stencil designed for unit spacing into one valid for arbitrary spacing.

use crate::error::{FilterError, FilterResult, FilterStatus};
use crate::processing::coefficients::{FilterCoefficients, FilterType};
use crate::utils::Sample;
use ndarray::{s, Array1, ArrayView1};
use tracing::trace;

/// Recursive filter whose numerator is rescaled by the elapsed time between samples.
#[derive(Debug, Clone)]
pub struct TimeVaryingFilter<F: Sample> {
    coefficients: FilterCoefficients<F>,
    derivative_order: i32,
    raw_history: Array1<F>,
    filtered_history: Array1<F>,
    time_history: Array1<F>,
    scaled_b: Array1<F>,
    samples_seen: usize,
}

impl<F: Sample> TimeVaryingFilter<F> {
    /// Build a time-varying filter.
    ///
    /// `b` holds the stencil weights for unit spacing, `derivative_order` the power
    /// applied to the elapsed times. Order 0 fails with `BadOrderSize`.
    pub fn new(a: &[F], b: &[F], filter_type: FilterType, derivative_order: usize) -> FilterResult<Self> {
        if derivative_order == 0 {
            return Err(FilterError::BadOrderSize { order: derivative_order });
        }
        let derivative_order = i32::try_from(derivative_order)
            .map_err(|_| FilterError::BadOrderSize { order: derivative_order })?;

        let mut filter = Self {
            coefficients: FilterCoefficients::new(),
            derivative_order,
            raw_history: Array1::zeros(0),
            filtered_history: Array1::zeros(0),
            time_history: Array1::zeros(0),
            scaled_b: Array1::zeros(0),
            samples_seen: 0,
        };
        filter.set_coefficients(a, b, filter_type)?;
        Ok(filter)
    }

    /// Replace the stencil and clear every history, timestamps included.
    pub fn set_coefficients(&mut self, a: &[F], b: &[F], filter_type: FilterType) -> FilterResult<()> {
        self.coefficients.set(a, b, filter_type)?;
        let nb = self.coefficients.b_order();
        self.raw_history = Array1::zeros(nb);
        self.time_history = Array1::zeros(nb);
        self.scaled_b = Array1::zeros(nb);
        self.filtered_history = Array1::zeros(self.coefficients.center() + self.coefficients.a_order());
        self.samples_seen = 0;
        Ok(())
    }

    /// Feed one sample taken at `time`.
    ///
    /// Timestamps must be strictly increasing; a stale timestamp fails with
    /// `NonIncreasingTime` and leaves the filter untouched. The returned value
    /// belongs to the sample taken `center` steps earlier.
    pub fn step_filter(&mut self, time: F, data: F) -> FilterResult<F> {
        self.coefficients.ensure_ready()?;
        if self.samples_seen > 0 && !(time > self.time_history[0]) {
            return Err(FilterError::NonIncreasingTime {
                previous: self.time_history[0].to_f64().unwrap_or(f64::NAN),
                current: time.to_f64().unwrap_or(f64::NAN),
            });
        }

        for i in (1..self.raw_history.len()).rev() {
            self.raw_history[i] = self.raw_history[i - 1];
            self.time_history[i] = self.time_history[i - 1];
        }
        self.raw_history[0] = data;
        self.time_history[0] = time;
        self.samples_seen = (self.samples_seen + 1).min(self.raw_history.len());

        self.rescale_numerator();

        let center = self.coefficients.center();
        for i in (1..self.filtered_history.len()).rev() {
            self.filtered_history[i] = self.filtered_history[i - 1];
        }
        self.filtered_history[center] = F::zero();

        let a = self.coefficients.a();
        let past = self.filtered_history.slice(s![center..center + a.len()]);
        let output = self.scaled_b.dot(&self.raw_history) - a.dot(&past);

        self.filtered_history[center] = output;
        Ok(output)
    }

    /// Filter paired `(time, value)` slices.
    pub fn filter(&mut self, times: &[F], data: &[F]) -> FilterResult<Vec<F>> {
        if times.len() != data.len() {
            return Err(FilterError::LengthMismatch {
                expected: data.len(),
                actual: times.len(),
            });
        }
        self.coefficients.ensure_ready()?;
        times
            .iter()
            .zip(data)
            .map(|(&t, &x)| self.step_filter(t, x))
            .collect()
    }

    fn rescale_numerator(&mut self) {
        let b = self.coefficients.b();
        let filled = self.samples_seen;
        let p = self.derivative_order;
        self.scaled_b.fill(F::zero());

        match self.coefficients.filter_type() {
            FilterType::Backward => {
                for k in 1..filled {
                    let dt = self.time_history[0] - self.time_history[k];
                    self.scaled_b[k] = b[k] / dt.powi(p);
                }
                let total = self.scaled_b.sum();
                self.scaled_b[0] = -total;
            }
            FilterType::Centered => {
                let m = self.coefficients.center();
                for k in 1..=m {
                    // the older tap of the pair is the last to be filled
                    if m + k >= filled {
                        break;
                    }
                    let dt = (self.time_history[m - k] - self.time_history[m + k]).powi(p);
                    self.scaled_b[m - k] = b[m - k] / dt;
                    self.scaled_b[m + k] = b[m + k] / dt;
                }
                let total = self.scaled_b.sum();
                self.scaled_b[m] = -total;
            }
        }
    }

    /// Zero values and timestamps, coefficients are kept.
    pub fn reset_filter(&mut self) {
        self.raw_history.fill(F::zero());
        self.filtered_history.fill(F::zero());
        self.time_history.fill(F::zero());
        self.scaled_b.fill(F::zero());
        self.samples_seen = 0;
        trace!("time-varying filter history reset");
    }

    /// Power of the elapsed time each tap is divided by
    pub fn derivative_order(&self) -> usize {
        self.derivative_order as usize
    }

    /// Denominator coefficients
    pub fn a_coefficients(&self) -> ArrayView1<'_, F> {
        self.coefficients.a()
    }

    /// Unscaled numerator coefficients
    pub fn b_coefficients(&self) -> ArrayView1<'_, F> {
        self.coefficients.b()
    }

    /// Number of denominator coefficients
    pub fn a_order(&self) -> usize {
        self.coefficients.a_order()
    }

    /// Number of numerator coefficients
    pub fn b_order(&self) -> usize {
        self.coefficients.b_order()
    }

    /// Output latency in samples
    pub fn center(&self) -> usize {
        self.coefficients.center()
    }

    /// Backward or centered
    pub fn filter_type(&self) -> FilterType {
        self.coefficients.filter_type()
    }

    /// Current status
    pub fn status(&self) -> FilterStatus {
        self.coefficients.status()
    }

    /// Whether the filter can run
    pub fn is_ready(&self) -> bool {
        self.coefficients.is_ready()
    }
}
