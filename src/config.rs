// src/config.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::constants::*;
use crate::error::PipelineError;
use crate::types::PipelineResult;

/// Raw-to-SI conversion for one deployment's sensor hardware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorScaling {
    /// Multiplier from raw accelerometer counts to m/s^2.
    pub accel_scale: f64,
    /// Multiplier from raw gyro counts to rad/s.
    pub gyro_scale: f64,
    /// Reject raw values that do not fit a signed 16-bit register.
    pub validate_raw_range: bool,
}

impl Default for SensorScaling {
    fn default() -> Self {
        Self {
            accel_scale: DEFAULT_ACCEL_SCALE,
            gyro_scale: DEFAULT_GYRO_SCALE,
            validate_raw_range: false,
        }
    }
}

/// Complementary filter tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Gyro weight in [0, 1]. Near 1 is smooth but drifts, near 0 is noisy but bias-free.
    pub alpha: f64,
    /// Fixed inter-sample interval in seconds.
    pub sample_interval_s: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_FILTER_ALPHA,
            sample_interval_s: DEFAULT_SAMPLE_INTERVAL_S,
        }
    }
}

/// How above-threshold samples turn into events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    /// One event per sample above threshold. No hysteresis.
    #[default]
    PerSample,
    /// One event per contiguous above-threshold run, at the run's first index.
    Collapsed,
}

/// Event detection thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventConfig {
    pub impact_threshold_ms2: f64,
    /// Degrees per second; converted to rad/s before comparing.
    pub torsion_threshold_dps: f64,
    pub lateral_threshold_ms2: f64,
    pub mode: DetectionMode,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            impact_threshold_ms2: DEFAULT_IMPACT_THRESHOLD_MS2,
            torsion_threshold_dps: DEFAULT_TORSION_THRESHOLD_DPS,
            lateral_threshold_ms2: DEFAULT_LATERAL_THRESHOLD_MS2,
            mode: DetectionMode::PerSample,
        }
    }
}

/// Every tunable constant of one pipeline run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub scaling: SensorScaling,
    pub filter: FilterConfig,
    pub events: EventConfig,
}

fn invalid(field: &'static str, value: f64, reason: &'static str) -> PipelineError {
    PipelineError::Configuration {
        field,
        value,
        reason,
    }
}

fn require_positive(field: &'static str, value: f64) -> PipelineResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be finite and > 0"));
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f64) -> PipelineResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, value, "must be finite and >= 0"));
    }
    Ok(())
}

impl SensorScaling {
    pub fn validate(&self) -> PipelineResult<()> {
        require_positive("scaling.accel_scale", self.accel_scale)?;
        require_positive("scaling.gyro_scale", self.gyro_scale)
    }
}

impl FilterConfig {
    pub fn validate(&self) -> PipelineResult<()> {
        // NaN fails the range check too.
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(invalid("filter.alpha", self.alpha, "must lie in [0, 1]"));
        }
        require_positive("filter.sample_interval_s", self.sample_interval_s)
    }
}

impl EventConfig {
    pub fn validate(&self) -> PipelineResult<()> {
        require_non_negative("events.impact_threshold_ms2", self.impact_threshold_ms2)?;
        require_non_negative("events.torsion_threshold_dps", self.torsion_threshold_dps)?;
        require_non_negative("events.lateral_threshold_ms2", self.lateral_threshold_ms2)
    }

    /// Torsion threshold in the unit of the converted gyro stream.
    pub fn torsion_threshold_rad_s(&self) -> f64 {
        self.torsion_threshold_dps.to_radians()
    }
}

impl PipelineConfig {
    /// Checks every constant against its domain. Run before any processing starts.
    pub fn validate(&self) -> PipelineResult<()> {
        self.scaling.validate()?;
        self.filter.validate()?;
        self.events.validate()
    }

    /// Parses a TOML document. Keys left out keep their defaults.
    pub fn from_toml_str(text: &str) -> PipelineResult<Self> {
        let config: PipelineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

/// Loads and validates a TOML config file.
pub fn load_config(path: &Path) -> PipelineResult<PipelineConfig> {
    let contents = fs::read_to_string(path)?;
    let config = PipelineConfig::from_toml_str(&contents)?;
    info!(?path, "Loaded config");
    Ok(config)
}
