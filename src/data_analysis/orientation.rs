// src/data_analysis/orientation.rs

use ndarray::Array1;

use crate::config::FilterConfig;
use crate::data_input::log_data::{Sample, SampleSequence};
use crate::types::{Channel, PipelineResult};

/// Fused tilt at one sample, in radians.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct OrientationEstimate {
    pub roll: f64,
    pub pitch: f64,
}

impl OrientationEstimate {
    /// (roll, pitch) in degrees.
    pub fn to_degrees(self) -> (f64, f64) {
        (self.roll.to_degrees(), self.pitch.to_degrees())
    }
}

/// Gravity-referenced tilt from the accelerometer alone.
///
/// `atan2` limits are kept as-is: with `ay = az = 0` roll is 0 and pitch
/// saturates to ±π/2 following the sign of `-ax`.
pub fn accel_tilt(sample: &Sample) -> OrientationEstimate {
    OrientationEstimate {
        roll: sample.ay.atan2(sample.az),
        pitch: (-sample.ax).atan2((sample.ay * sample.ay + sample.az * sample.az).sqrt()),
    }
}

/// Complementary filter over roll and pitch.
///
/// Blends the gyro-integrated angle (weight `alpha`) with the accelerometer
/// tilt (weight `1 - alpha`). Yaw is not observable without a magnetometer and
/// is not tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplementaryFilter {
    roll: f64,
    pitch: f64,
    alpha: f64,
    dt: f64,
}

impl ComplementaryFilter {
    /// Creates a filter at zero tilt. Call `seed` before the first `advance`.
    pub fn new(config: &FilterConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self {
            roll: 0.0,
            pitch: 0.0,
            alpha: config.alpha,
            dt: config.sample_interval_s,
        })
    }

    /// Initial state from the accelerometer only; there is no previous state to integrate.
    pub fn seed(&mut self, sample: &Sample) -> OrientationEstimate {
        let tilt = accel_tilt(sample);
        self.roll = tilt.roll;
        self.pitch = tilt.pitch;
        tilt
    }

    /// Advances the state by one sample interval.
    pub fn advance(&mut self, sample: &Sample) -> OrientationEstimate {
        let roll_gyro = self.roll + sample.gx * self.dt;
        let pitch_gyro = self.pitch + sample.gy * self.dt;
        let acc = accel_tilt(sample);

        self.roll = self.alpha * roll_gyro + (1.0 - self.alpha) * acc.roll;
        self.pitch = self.alpha * pitch_gyro + (1.0 - self.alpha) * acc.pitch;
        self.estimate()
    }

    pub fn estimate(&self) -> OrientationEstimate {
        OrientationEstimate {
            roll: self.roll,
            pitch: self.pitch,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }
}

/// Per-sample roll and pitch for a whole run, in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationTrajectory {
    pub roll: Channel,
    pub pitch: Channel,
}

impl OrientationTrajectory {
    pub fn len(&self) -> usize {
        self.roll.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roll.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<OrientationEstimate> {
        Some(OrientationEstimate {
            roll: *self.roll.get(index)?,
            pitch: *self.pitch.get(index)?,
        })
    }

    pub fn roll_degrees(&self) -> Channel {
        self.roll.mapv(f64::to_degrees)
    }

    pub fn pitch_degrees(&self) -> Channel {
        self.pitch.mapv(f64::to_degrees)
    }
}

/// Runs the filter over the sequence in one ordered pass.
///
/// Index 0 is the accelerometer seed; every later index depends only on the
/// previous estimate and the current sample.
pub fn estimate_orientation(samples: &SampleSequence, config: &FilterConfig) -> PipelineResult<OrientationTrajectory> {
    let mut filter = ComplementaryFilter::new(config)?;
    let mut roll = Vec::with_capacity(samples.len());
    let mut pitch = Vec::with_capacity(samples.len());

    let seed = filter.seed(samples.first());
    roll.push(seed.roll);
    pitch.push(seed.pitch);

    for sample in samples.iter().skip(1) {
        let estimate = filter.advance(sample);
        roll.push(estimate.roll);
        pitch.push(estimate.pitch);
    }

    Ok(OrientationTrajectory {
        roll: Array1::from(roll),
        pitch: Array1::from(pitch),
    })
}


// src/data_analysis/orientation.rs
