// src/processing/filter_bank.rs
//! Filter bank cascading several Butterworth stages on one stream

use crate::config::FilterBankConfig;
use crate::error::FilterResult;
use crate::processing::butterworth::Butterworth;
use crate::utils::Sample;
use tracing::debug;

/// Butterworth stages applied one after the other
#[derive(Debug, Clone)]
pub struct FilterBank<F: Sample> {
    stages: Vec<Butterworth<F>>,
    config: FilterBankConfig,
}

impl<F: Sample> FilterBank<F> {
    /// Create filter bank from configuration; the first invalid stage aborts.
    pub fn from_config(config: &FilterBankConfig) -> FilterResult<Self> {
        let stages = config
            .stages
            .iter()
            .map(|stage| Butterworth::<F>::from_design(stage.to_design(config.sampling_frequency)?))
            .collect::<FilterResult<Vec<_>>>()?;

        debug!(
            stages = stages.len(),
            sampling_frequency = config.sampling_frequency,
            "filter bank created"
        );
        Ok(Self {
            stages,
            config: config.clone(),
        })
    }

    /// Process single sample through every stage in order
    pub fn process_sample(&mut self, sample: F) -> FilterResult<F> {
        let mut output = sample;
        for stage in &mut self.stages {
            output = stage.step_filter(output)?;
        }
        Ok(output)
    }

    /// Process a block of consecutive samples
    pub fn process(&mut self, samples: &[F]) -> FilterResult<Vec<F>> {
        samples
            .iter()
            .map(|&sample| self.process_sample(sample))
            .collect()
    }

    /// Reset all filter states
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset_filter();
        }
    }

    /// Number of stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Stages in processing order
    pub fn stages(&self) -> &[Butterworth<F>] {
        &self.stages
    }

    /// Configuration the bank was built from
    pub fn config(&self) -> &FilterBankConfig {
        &self.config
    }
}
