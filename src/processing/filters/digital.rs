// src/processing/filters/digital.rs
//! Generic recursive digital filter evaluated sample by sample

use crate::error::{FilterError, FilterResult, FilterStatus};
use crate::processing::coefficients::{FilterCoefficients, FilterType};
use crate::utils::Sample;
use ndarray::{s, Array1, ArrayView1};
use tracing::trace;

/// Recursive filter `a0·y[n] = Σ b[k]·x[n-k] − Σ(k≥1) a[k]·y[n-k]`.
///
/// Centered filters compute the same equation but the output written back into
/// the filtered history sits `center` samples in the past, so the value returned
/// by [`step_filter`](Self::step_filter) lags the newest input by `center` samples.
#[derive(Debug, Clone)]
pub struct DigitalFilter<F: Sample> {
    coefficients: FilterCoefficients<F>,
    raw_history: Array1<F>,
    filtered_history: Array1<F>,
}

impl<F: Sample> Default for DigitalFilter<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Sample> DigitalFilter<F> {
    /// Filter without coefficients, stepping it fails until coefficients are set.
    pub fn new() -> Self {
        Self {
            coefficients: FilterCoefficients::new(),
            raw_history: Array1::zeros(0),
            filtered_history: Array1::zeros(0),
        }
    }

    /// Backward filter from denominator `a` and numerator `b`.
    pub fn with_coefficients(a: &[F], b: &[F]) -> FilterResult<Self> {
        Self::with_type(a, b, FilterType::Backward)
    }

    /// Filter of the given type from denominator `a` and numerator `b`.
    pub fn with_type(a: &[F], b: &[F], filter_type: FilterType) -> FilterResult<Self> {
        let mut filter = Self::new();
        filter.set_coefficients(a, b, filter_type)?;
        Ok(filter)
    }

    /// Replace the coefficients and zero the history.
    ///
    /// When validation fails the previous coefficients and history are kept, but the
    /// filter reports the failure through [`status`](Self::status) and refuses to run.
    pub fn set_coefficients(&mut self, a: &[F], b: &[F], filter_type: FilterType) -> FilterResult<()> {
        self.coefficients.set(a, b, filter_type)?;
        let center = self.coefficients.center();
        self.raw_history = Array1::zeros(self.coefficients.b_order());
        self.filtered_history = Array1::zeros(center + self.coefficients.a_order());
        Ok(())
    }

    /// Flag the filter as unusable after a failed design.
    pub(crate) fn mark_failed(&mut self, status: FilterStatus) {
        self.coefficients.mark_failed(status);
    }

    /// Feed one sample and return the filtered value.
    pub fn step_filter(&mut self, data: F) -> FilterResult<F> {
        self.coefficients.ensure_ready()?;
        let center = self.coefficients.center();

        // Shift input history
        for i in (1..self.raw_history.len()).rev() {
            self.raw_history[i] = self.raw_history[i - 1];
        }
        self.raw_history[0] = data;

        // Shift output history
        for i in (1..self.filtered_history.len()).rev() {
            self.filtered_history[i] = self.filtered_history[i - 1];
        }
        self.filtered_history[center] = F::zero();

        let a = self.coefficients.a();
        let past = self.filtered_history.slice(s![center..center + a.len()]);
        let output = self.coefficients.b().dot(&self.raw_history) - a.dot(&past);

        self.filtered_history[center] = output;
        Ok(output)
    }

    /// Filter a whole sequence, identical to stepping each element in order.
    pub fn filter(&mut self, data: &[F]) -> FilterResult<Vec<F>> {
        self.coefficients.ensure_ready()?;
        data.iter().map(|&x| self.step_filter(x)).collect()
    }

    /// Filter `data` into a caller-provided buffer of the same length.
    pub fn filter_into(&mut self, data: &[F], results: &mut [F]) -> FilterResult<()> {
        if data.len() != results.len() {
            return Err(FilterError::LengthMismatch {
                expected: data.len(),
                actual: results.len(),
            });
        }
        self.coefficients.ensure_ready()?;
        for (out, &x) in results.iter_mut().zip(data) {
            *out = self.step_filter(x)?;
        }
        Ok(())
    }

    /// Zero both histories, coefficients are kept.
    pub fn reset_filter(&mut self) {
        self.raw_history.fill(F::zero());
        self.filtered_history.fill(F::zero());
        trace!("filter history reset");
    }

    /// Owned copies of `(a, b)`.
    pub fn coefficients(&self) -> (Vec<F>, Vec<F>) {
        (self.coefficients.a().to_vec(), self.coefficients.b().to_vec())
    }

    /// Denominator coefficients
    pub fn a_coefficients(&self) -> ArrayView1<'_, F> {
        self.coefficients.a()
    }

    /// Numerator coefficients
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
