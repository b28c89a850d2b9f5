use crate::global_variables::{
    ADAPTIVE_CONTROL_DEFAULT, CYCLE_JITTER_SECS, EMERGENCY_DURATION_SECS,
    MAX_CYCLE_DURATION_SECS, MIN_CYCLE_DURATION_SECS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Bounds and jitter applied by the adaptive optimization pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleTiming {
    pub min_secs: u32,
    pub max_secs: u32,
    /// Half-width of the uniform perturbation, in seconds.
    pub jitter_secs: f64,
}

impl Default for CycleTiming {
    fn default() -> Self {
        Self {
            min_secs: MIN_CYCLE_DURATION_SECS,
            max_secs: MAX_CYCLE_DURATION_SECS,
            jitter_secs: CYCLE_JITTER_SECS,
        }
    }
}

/// Runtime configuration for the control center. Every field is optional in
/// the JSON file; missing fields fall back to `global_variables`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub emergency_duration_secs: u64,
    pub cycle_timing: CycleTiming,
    pub adaptive_control: bool,
    /// Fixed seed for the adaptive jitter. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            emergency_duration_secs: EMERGENCY_DURATION_SECS,
            cycle_timing: CycleTiming::default(),
            adaptive_control: ADAPTIVE_CONTROL_DEFAULT,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("emergency duration must be at least one second")]
    ZeroEmergencyDuration,
    #[error("cycle bounds are invalid: min {min}s, max {max}s")]
    InvalidCycleBounds { min: u32, max: u32 },
    #[error("cycle jitter must be a finite, non-negative number of seconds (got {0})")]
    InvalidJitter(f64),
}

impl CycleTiming {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_secs == 0 || self.min_secs > self.max_secs {
            return Err(ConfigError::InvalidCycleBounds {
                min: self.min_secs,
                max: self.max_secs,
            });
        }
        if !self.jitter_secs.is_finite() || self.jitter_secs < 0.0 {
            return Err(ConfigError::InvalidJitter(self.jitter_secs));
        }
        Ok(())
    }
}

impl ControlConfig {
    pub fn emergency_duration(&self) -> Duration {
        Duration::from_secs(self.emergency_duration_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.emergency_duration_secs == 0 {
            return Err(ConfigError::ZeroEmergencyDuration);
        }
        self.cycle_timing.validate()
    }

    pub fn from_json_str(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: ControlConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
