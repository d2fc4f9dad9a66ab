//! IIR-Core: Butterworth filter design and streaming recursive filters
//!
//! This library designs recursive (IIR) digital filters and runs them over
//! streaming or batch signals. It features:
//!
//! - Butterworth low-pass, high-pass, band-pass and band-reject design of any order
//! - A generic direct-form evaluator shared by every filter, causal or centered
//! - Numerical differentiators, including a time-varying variant for irregular sampling
//! - Moving average and cascaded filter banks
//! - File and environment based configuration
//!
//! Every filter is generic over the scalar type (`f32` or `f64`).
//!
//! # Quick Start
//!
//! ```rust
//! use iir_core::{Butterworth, FilterKind};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 5th order low-pass at 10 Hz for a signal sampled at 100 Hz
//!     let mut filter = Butterworth::new(5, 10.0_f64, 100.0, FilterKind::LowPass)?;
//!
//!     let data: Vec<f64> = (1..=8).map(f64::from).collect();
//!     let filtered = filter.filter(&data)?;
//!     println!("{:?}", filtered);
//!
//!     // or one sample at a time
//!     filter.reset_filter();
//!     let first = filter.step_filter(1.0)?;
//!     assert!((first - filtered[0]).abs() < 1e-12);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod processing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::config::{ButterworthConfig, ConfigError, ConfigLoader, FilterBankConfig, FilterConfig, StageConfig};
pub use crate::error::{FilterError, FilterResult, FilterStatus};
pub use crate::processing::{
    find_minimum_butter, moving_average, poly_coeffs_from_roots, Butterworth, ButterworthDesign, DigitalFilter,
    FilterBank, FilterKind, FilterType, Frequencies, TimeVaryingFilter,
};
pub use crate::utils::Sample;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Butterworth filter design and streaming recursive filters".to_string(),
        features: vec![
            "Butterworth low-pass, high-pass, band-pass and band-reject design".to_string(),
            "Causal and centered recursive filter evaluation".to_string(),
            "Fixed-rate and time-varying differentiators".to_string(),
            "Moving average and filter banks".to_string(),
            "Layered configuration".to_string(),
        ],
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// List of features
    pub features: Vec<String>,
}
