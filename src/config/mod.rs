// src/config/mod.rs
//! Filter configuration
//!
//! Serde structures describing a single Butterworth filter and a cascade of
//! Butterworth stages. Missing fields fall back to the defaults in [`constants`].

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::{ConfigError, ConfigLoader};

use crate::error::{FilterError, FilterResult};
use crate::processing::butterworth::{Butterworth, ButterworthDesign, FilterKind, Frequencies};
use crate::utils::{constant, Sample};
use serde::{Deserialize, Serialize};

/// Root configuration document
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Stand-alone filter
    #[serde(default)]
    pub butterworth: ButterworthConfig,

    /// Filter bank
    #[serde(default)]
    pub bank: FilterBankConfig,
}

/// One stand-alone Butterworth filter
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ButterworthConfig {
    /// Filter kind
    #[serde(default)]
    pub kind: FilterKind,

    /// Filter order
    #[serde(default = "defaults::order")]
    pub order: usize,

    /// Sampling frequency in Hz
    #[serde(default = "defaults::sampling_frequency")]
    pub sampling_frequency: f64,

    /// Cut-off for low/high-pass kinds
    #[serde(default = "defaults::cutoff", skip_serializing_if = "Option::is_none")]
    pub cutoff: Option<f64>,

    /// Lower band edge for band kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,

    /// Upper band edge for band kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

/// Cascade of Butterworth stages sharing one sampling frequency
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FilterBankConfig {
    /// Sampling frequency shared by every stage
    #[serde(default = "defaults::sampling_frequency")]
    pub sampling_frequency: f64,

    /// Stages in processing order
    #[serde(default = "defaults::stages")]
    pub stages: Vec<StageConfig>,
}

/// One stage of a [`FilterBankConfig`]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StageConfig {
    /// Stage kind
    pub kind: FilterKind,

    /// Stage order
    #[serde(default = "defaults::order")]
    pub order: usize,

    /// Cut-off for low/high-pass stages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff: Option<f64>,

    /// Lower band edge for band stages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,

    /// Upper band edge for band stages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

/// Default value providers using constants
mod defaults {
    use super::StageConfig;
    use crate::config::constants::design;
    use crate::processing::butterworth::FilterKind;

    pub fn order() -> usize { design::DEFAULT_ORDER }
    pub fn sampling_frequency() -> f64 { design::DEFAULT_SAMPLING_FREQUENCY_HZ }
    pub fn cutoff() -> Option<f64> { Some(design::DEFAULT_CUTOFF_HZ) }

    pub fn stages() -> Vec<StageConfig> {
        vec![
            StageConfig {
                kind: FilterKind::HighPass,
                order: design::DEFAULT_BANK_HIGHPASS_ORDER,
                cutoff: Some(design::DEFAULT_BANK_HIGHPASS_HZ),
                lower: None,
                upper: None,
            },
            StageConfig {
                kind: FilterKind::LowPass,
                order: design::DEFAULT_ORDER,
                cutoff: Some(design::DEFAULT_BANK_LOWPASS_HZ),
                lower: None,
                upper: None,
            },
        ]
    }
}

impl Default for ButterworthConfig {
    fn default() -> Self {
        Self {
            kind: FilterKind::default(),
            order: defaults::order(),
            sampling_frequency: defaults::sampling_frequency(),
            cutoff: defaults::cutoff(),
            lower: None,
            upper: None,
        }
    }
}

impl Default for FilterBankConfig {
    fn default() -> Self {
        Self {
            sampling_frequency: defaults::sampling_frequency(),
            stages: defaults::stages(),
        }
    }
}

/// Pick the frequencies the kind needs, ignoring the others.
fn design_from<F: Sample>(
    kind: FilterKind,
    order: usize,
    cutoff: Option<f64>,
    lower: Option<f64>,
    upper: Option<f64>,
    sampling_frequency: f64,
) -> FilterResult<ButterworthDesign<F>> {
    let frequencies = match (kind.is_band(), cutoff, lower, upper) {
        (false, Some(fc), _, _) => Frequencies::Cutoff(constant(fc)),
        (true, _, Some(lower), Some(upper)) => Frequencies::Band {
            lower: constant(lower),
            upper: constant(upper),
        },
        _ => return Err(FilterError::FrequencyKindMismatch { kind: kind.to_string() }),
    };
    Ok(ButterworthDesign {
        kind,
        order,
        frequencies,
        sampling_frequency: constant(sampling_frequency),
    })
}

impl ButterworthConfig {
    /// Design parameters described by this section.
    pub fn to_design<F: Sample>(&self) -> FilterResult<ButterworthDesign<F>> {
        design_from(self.kind, self.order, self.cutoff, self.lower, self.upper, self.sampling_frequency)
    }

    /// Build the described filter.
    pub fn build<F: Sample>(&self) -> FilterResult<Butterworth<F>> {
        Butterworth::from_design(self.to_design()?)
    }
}

impl StageConfig {
    /// Low-pass stage
    pub fn lowpass(order: usize, cutoff: f64) -> Self {
        Self { kind: FilterKind::LowPass, order, cutoff: Some(cutoff), lower: None, upper: None }
    }

    /// High-pass stage
    pub fn highpass(order: usize, cutoff: f64) -> Self {
        Self { kind: FilterKind::HighPass, order, cutoff: Some(cutoff), lower: None, upper: None }
    }

    /// Band-pass or band-reject stage
    pub fn band(kind: FilterKind, order: usize, lower: f64, upper: f64) -> Self {
        Self { kind, order, cutoff: None, lower: Some(lower), upper: Some(upper) }
    }

    /// Design parameters of this stage at `sampling_frequency`.
    pub fn to_design<F: Sample>(&self, sampling_frequency: f64) -> FilterResult<ButterworthDesign<F>> {
        design_from(self.kind, self.order, self.cutoff, self.lower, self.upper, sampling_frequency)
    }
}
