// src/processing/coefficients.rs
//! Validated filter coefficients shared by every filter type

use crate::config::constants::coefficients::LEADING_COEFFICIENT_EPSILON;
use crate::error::{FilterError, FilterResult, FilterStatus};
use crate::utils::{constant, Sample};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Causality of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Causal, one-sided filter
    #[default]
    Backward,
    /// Acausal symmetric filter, output lags the input by `(len(b) - 1) / 2` samples
    Centered,
}

/// Numerator/denominator coefficients of one filter together with its status.
///
/// Both vectors are in decreasing polynomial order. Once set, `a[0] == 1`.
#[derive(Debug, Clone)]
pub struct FilterCoefficients<F: Sample> {
    a: Array1<F>,
    b: Array1<F>,
    filter_type: FilterType,
    center: usize,
    status: FilterStatus,
}

impl<F: Sample> Default for FilterCoefficients<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Sample> FilterCoefficients<F> {
    /// Uninitialized coefficients.
    pub fn new() -> Self {
        Self {
            a: Array1::zeros(0),
            b: Array1::zeros(0),
            filter_type: FilterType::Backward,
            center: 0,
            status: FilterStatus::Uninitialized,
        }
    }

    /// Check a coefficient set without storing it.
    pub fn validate(a: &[F], b: &[F], filter_type: FilterType) -> FilterResult<()> {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => return Err(FilterError::AllCoefficientsMissing),
            (true, false) => return Err(FilterError::ACoefficientMissing),
            (false, true) => return Err(FilterError::BCoefficientMissing),
            (false, false) => {}
        }

        let a0 = a[0];
        // NaN fails the comparison as well
        if !(a0.abs() >= constant::<F>(LEADING_COEFFICIENT_EPSILON)) {
            return Err(FilterError::BadLeadingCoefficient {
                value: a0.to_f64().unwrap_or(f64::NAN),
            });
        }

        if filter_type == FilterType::Centered && b.len() % 2 == 0 {
            return Err(FilterError::BadCenteringLength { length: b.len() });
        }

        Ok(())
    }

    /// Replace the coefficients.
    ///
    /// On success the coefficients are normalized so that `a[0] == 1` and the status
    /// becomes `Ready`. On failure the stored coefficients are kept and only the
    /// status changes to the failure tag.
    pub fn set(&mut self, a: &[F], b: &[F], filter_type: FilterType) -> FilterResult<()> {
        if let Err(err) = Self::validate(a, b, filter_type) {
            warn!(error = %err, "rejected filter coefficients");
            self.status = err.status();
            return Err(err);
        }

        let a0 = a[0];
        let mut a = Array1::from(a.to_vec());
        let mut b = Array1::from(b.to_vec());
        a.mapv_inplace(|v| v / a0);
        b.mapv_inplace(|v| v / a0);
        a[0] = F::one();

        self.center = match filter_type {
            FilterType::Backward => 0,
            FilterType::Centered => (b.len() - 1) / 2,
        };
        self.a = a;
        self.b = b;
        self.filter_type = filter_type;
        self.status = FilterStatus::Ready;

        debug!(
            a_order = self.a.len(),
            b_order = self.b.len(),
            ?filter_type,
            "installed filter coefficients"
        );
        Ok(())
    }

    /// Record a failed design without touching the stored coefficients.
    pub fn mark_failed(&mut self, status: FilterStatus) {
        self.status = status;
    }

    /// Fail with `NotReady` unless the coefficients are usable.
    pub fn ensure_ready(&self) -> FilterResult<()> {
        if self.status.is_ready() {
            Ok(())
        } else {
            Err(FilterError::NotReady { status: self.status })
        }
    }

    /// Current status
    pub fn status(&self) -> FilterStatus {
        self.status
    }

    /// Whether the coefficients are usable
    pub fn is_ready(&self) -> bool {
        self.status.is_ready()
    }

    /// Latency in samples: 0 for backward filters, `(len(b) - 1) / 2` for centered ones.
    pub fn center(&self) -> usize {
        self.center
    }

    /// Backward or centered
    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// Denominator coefficients
    pub fn a(&self) -> ArrayView1<'_, F> {
        self.a.view()
    }

    /// Numerator coefficients
    pub fn b(&self) -> ArrayView1<'_, F> {
        self.b.view()
    }

    /// Number of denominator coefficients
    pub fn a_order(&self) -> usize {
        self.a.len()
    }

    /// Number of numerator coefficients
    pub fn b_order(&self) -> usize {
        self.b.len()
    }
}
