// src/processing/filters/mod.rs
//! Streaming recursive filters

pub mod digital;
pub mod moving_average;
pub mod time_varying;

pub use digital::DigitalFilter;
pub use moving_average::moving_average;
pub use time_varying::TimeVaryingFilter;
