// src/data_input/log_data.rs

use ndarray::Array1;

use crate::config::SensorScaling;
use crate::error::PipelineError;
use crate::types::{Channel, PipelineResult, RawCounts};

/// One IMU reading converted to SI units.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Sample {
    pub ax: f64, // m/s^2
    pub ay: f64,
    pub az: f64,
    pub gx: f64, // rad/s
    pub gy: f64,
    pub gz: f64,
}

impl Sample {
    pub fn new(accel: [f64; 3], gyro: [f64; 3]) -> Self {
        Self {
            ax: accel[0],
            ay: accel[1],
            az: accel[2],
            gx: gyro[0],
            gy: gyro[1],
            gz: gyro[2],
        }
    }

    /// Applies the deployment's fixed scale factors to raw counts.
    pub fn from_raw(raw: &RawCounts, scaling: &SensorScaling) -> Self {
        let a = scaling.accel_scale;
        let g = scaling.gyro_scale;
        Self {
            ax: raw[0] as f64 * a,
            ay: raw[1] as f64 * a,
            az: raw[2] as f64 * a,
            gx: raw[3] as f64 * g,
            gy: raw[4] as f64 * g,
            gz: raw[5] as f64 * g,
        }
    }

    /// Euclidean norm of the acceleration vector.
    pub fn accel_magnitude(&self) -> f64 {
        (self.ax * self.ax + self.ay * self.ay + self.az * self.az).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        [self.ax, self.ay, self.az, self.gx, self.gy, self.gz]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Per-sample channels that can be pulled out of a sequence as a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleChannel {
    Ax,
    Ay,
    Az,
    Gx,
    Gy,
    Gz,
    AccelMagnitude,
}

impl SampleChannel {
    pub fn read(self, sample: &Sample) -> f64 {
        match self {
            SampleChannel::Ax => sample.ax,
            SampleChannel::Ay => sample.ay,
            SampleChannel::Az => sample.az,
            SampleChannel::Gx => sample.gx,
            SampleChannel::Gy => sample.gy,
            SampleChannel::Gz => sample.gz,
            SampleChannel::AccelMagnitude => sample.accel_magnitude(),
        }
    }

    /// This channel over a slice of samples, in order. An empty slice gives an empty column.
    pub fn column(self, samples: &[Sample]) -> Channel {
        Array1::from_iter(samples.iter().map(|s| self.read(s)))
    }
}

/// The ordered, non-empty samples of one run. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSequence {
    samples: Vec<Sample>,
}

impl SampleSequence {
    /// Wraps parsed samples. An empty vector is the `EmptyInput` failure.
    pub fn new(samples: Vec<Sample>, source_name: &str, lines_read: usize) -> PipelineResult<Self> {
        if samples.is_empty() {
            return Err(PipelineError::EmptyInput {
                source_name: source_name.to_string(),
                lines_read,
            });
        }
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    // Always false once constructed.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Copies one channel out as a column, in sample order.
    pub fn channel(&self, channel: SampleChannel) -> Channel {
        channel.column(&self.samples)
    }
}

impl<'a> IntoIterator for &'a SampleSequence {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}


// src/data_input/log_data.rs
