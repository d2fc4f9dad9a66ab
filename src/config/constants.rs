// src/config/constants.rs
//! Crate-wide numeric constants and configuration defaults

/// Coefficient validation constants
pub mod coefficients {
    /// Smallest accepted magnitude of the leading denominator coefficient `a[0]`
    pub const LEADING_COEFFICIENT_EPSILON: f64 = 1e-8;
}

/// Default Butterworth design values
pub mod design {
    /// Default filter order
    pub const DEFAULT_ORDER: usize = 4;
    /// Default sampling frequency
    pub const DEFAULT_SAMPLING_FREQUENCY_HZ: f64 = 1000.0;
    /// Default cut-off frequency
    pub const DEFAULT_CUTOFF_HZ: f64 = 100.0;

    /// Default filter bank: high-pass drift removal followed by a low-pass stage
    pub const DEFAULT_BANK_HIGHPASS_ORDER: usize = 2;
    /// Cut-off of the default bank's high-pass stage
    pub const DEFAULT_BANK_HIGHPASS_HZ: f64 = 20.0;
    /// Cut-off of the default bank's low-pass stage
    pub const DEFAULT_BANK_LOWPASS_HZ: f64 = 450.0;

    /// Smallest relative gap between prewarped pass and stop band edges the
    /// minimum order estimate accepts
    pub const MIN_EDGE_SEPARATION: f64 = 1e-6;
}

/// Configuration source constants
pub mod paths {
    /// System-wide configuration file
    pub const DEFAULT_CONFIG_FILE: &str = "config/iir.toml";
    /// Configuration file in the working directory
    pub const LOCAL_CONFIG_FILE: &str = "iir.toml";
    /// Prefix of environment variables overriding configuration values
    pub const ENV_PREFIX: &str = "IIR";
    /// Separator for nested keys in environment variables (`IIR_BUTTERWORTH__ORDER`)
    pub const ENV_SEPARATOR: &str = "__";
}
