// src/types.rs
// Type aliases shared across the pipeline stages

use ndarray::Array1;

use crate::error::PipelineError;

pub type PipelineResult<T> = Result<T, PipelineError>;

// One value per sample, indexed like the SampleSequence it was derived from.
pub type Channel = Array1<f64>;

// Raw sensor counts in log field order: ax, ay, az, gx, gy, gz.
pub type RawCounts = [i64; crate::constants::IMU_FIELDS_PER_RECORD];
