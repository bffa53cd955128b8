//src/config.rs

use crate::best_call::CallPolicy;
use crate::error::{Result, SintaxError};

pub const DEFAULT_THRESHOLD: f64 = 0.80;

/// Settings for one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Minimum plurality share for a rank to become the best call.
    pub threshold: f64,
    pub policy: CallPolicy,
    /// Worker threads for per-ASV voting. 0 = rayon default, 1 = sequential.
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            policy: CallPolicy::default(),
            threads: 0,
        }
    }
}

impl Config {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold, ..Self::default() }
    }

    /// Rejects thresholds outside [0, 1] (and NaN).
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SintaxError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
