// src/error.rs
//! Unified error handling for IIR-Core
//!
//! Every fallible operation returns [`FilterResult`]. Filters additionally keep the
//! [`FilterStatus`] of their last coefficient or design operation, so callers that
//! prefer polling a status tag can do so without matching on errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lifecycle tag of a filter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStatus {
    /// No coefficients were ever set
    Uninitialized,
    /// Coefficients are valid, the filter can run
    Ready,
    /// Order or window size is zero
    BadOrderSize,
    /// A frequency is not strictly positive
    BadFrequencyValue,
    /// Cut-off at or above the Nyquist frequency
    BadCutoffFrequency,
    /// Lower band edge not below the upper one
    BadBandFrequency,
    /// Empty denominator
    ACoefficientMissing,
    /// Empty numerator
    BCoefficientMissing,
    /// Both coefficient vectors empty
    AllCoefficientsMissing,
    /// `a[0]` too close to zero
    BadLeadingCoefficient,
    /// Centered filter with an even numerator length
    BadCenteringLength,
    /// Frequencies given do not match the filter kind
    FrequencyKindMismatch,
}

impl FilterStatus {
    /// Human readable description of the status.
    pub fn description(&self) -> &'static str {
        match self {
            FilterStatus::Uninitialized => "Filter is not initialized",
            FilterStatus::Ready => "Filter is ready to be used",
            FilterStatus::BadOrderSize => "You try to initialize the filter with an order lower or equal to 0 (or window size for moving average)",
            FilterStatus::BadFrequencyValue => "Filter frequencies must be strictly positive",
            FilterStatus::BadCutoffFrequency => "The cut-off frequency must be lower than the Nyquist frequency",
            FilterStatus::BadBandFrequency => "The lower band frequency must be strictly below the upper band frequency",
            FilterStatus::ACoefficientMissing => "The denominator coefficients are empty",
            FilterStatus::BCoefficientMissing => "The numerator coefficients are empty",
            FilterStatus::AllCoefficientsMissing => "Both numerator and denominator coefficients are empty",
            FilterStatus::BadLeadingCoefficient => "The first denominator coefficient is (almost) zero",
            FilterStatus::BadCenteringLength => "A centered filter needs an odd number of numerator coefficients",
            FilterStatus::FrequencyKindMismatch => "The frequency parameters do not match the filter kind",
        }
    }

    /// Whether a filter in this state can run
    pub fn is_ready(&self) -> bool {
        matches!(self, FilterStatus::Ready)
    }
}

impl fmt::Display for FilterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Filter design and evaluation errors.
///
/// Numeric payloads are widened to `f64` so the error type is independent of the
/// scalar the filter runs on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Order or window size below 1
    #[error("invalid filter order {order}: order (or window size) must be at least 1")]
    BadOrderSize { order: usize },

    /// Frequency not strictly positive
    #[error("invalid frequency {frequency}: frequencies must be strictly positive")]
    BadFrequencyValue { frequency: f64 },

    /// Cut-off not below Nyquist
    #[error("cut-off frequency {cutoff} must be lower than the Nyquist frequency {nyquist}")]
    BadCutoffFrequency { cutoff: f64, nyquist: f64 },

    /// Band edges out of order or too close to tell apart
    #[error("invalid band [{lower}, {upper}]: lower frequency must be below upper frequency")]
    BadBandFrequency { lower: f64, upper: f64 },

    /// Empty denominator
    #[error("denominator coefficients 'a' are empty")]
    ACoefficientMissing,

    /// Empty numerator
    #[error("numerator coefficients 'b' are empty")]
    BCoefficientMissing,

    /// Both coefficient vectors empty
    #[error("both coefficient vectors are empty")]
    AllCoefficientsMissing,

    /// Degenerate leading denominator coefficient
    #[error("leading denominator coefficient {value} is too close to zero")]
    BadLeadingCoefficient { value: f64 },

    /// Even numerator length for a centered filter
    #[error("centered filter needs an odd numerator length, got {length}")]
    BadCenteringLength { length: usize },

    /// Filter used while not in the ready state
    #[error("filter is not ready: {status}")]
    NotReady { status: FilterStatus },

    /// Cut-off given to a band kind or band edges to a low/high-pass kind
    #[error("frequency parameters do not match a {kind} filter")]
    FrequencyKindMismatch { kind: String },

    /// Timestamp not after the previous one
    #[error("timestamps must be strictly increasing (previous {previous}, current {current})")]
    NonIncreasingTime { previous: f64, current: f64 },

    /// Input and output lengths differ
    #[error("output buffer has length {actual}, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Sampling period not strictly positive
    #[error("invalid timestep {timestep}: sampling period must be strictly positive")]
    BadTimestep { timestep: f64 },

    /// Pass and stop band attenuations inconsistent
    #[error("invalid attenuations: pass band loss {pass} dB must be positive and below stop band attenuation {stop} dB")]
    BadAttenuation { pass: f64, stop: f64 },
}

impl FilterError {
    /// Status tag a filter takes after failing with this error.
    ///
    /// `NotReady` reports the status that blocked the filter. The remaining errors
    /// raised outside coefficient or design operations map to `Ready`.
    pub fn status(&self) -> FilterStatus {
        match self {
            FilterError::BadOrderSize { .. } => FilterStatus::BadOrderSize,
            FilterError::BadFrequencyValue { .. } | FilterError::BadTimestep { .. } => {
                FilterStatus::BadFrequencyValue
            }
            FilterError::BadCutoffFrequency { .. } => FilterStatus::BadCutoffFrequency,
            FilterError::BadBandFrequency { .. } => FilterStatus::BadBandFrequency,
            FilterError::ACoefficientMissing => FilterStatus::ACoefficientMissing,
            FilterError::BCoefficientMissing => FilterStatus::BCoefficientMissing,
            FilterError::AllCoefficientsMissing => FilterStatus::AllCoefficientsMissing,
            FilterError::BadLeadingCoefficient { .. } => FilterStatus::BadLeadingCoefficient,
            FilterError::BadCenteringLength { .. } => FilterStatus::BadCenteringLength,
            FilterError::FrequencyKindMismatch { .. } => FilterStatus::FrequencyKindMismatch,
            FilterError::NotReady { status } => *status,
            FilterError::NonIncreasingTime { .. }
            | FilterError::LengthMismatch { .. }
            | FilterError::BadAttenuation { .. } => FilterStatus::Ready,
        }
    }
}

/// Result type alias for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
