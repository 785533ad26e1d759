// src/error.rs

use thiserror::Error;

/// Every failure the pipeline can surface to a caller.
///
/// A malformed log line is not represented here: it is skipped by the parser.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no IMU samples found in {source_name} ({lines_read} lines read, none matched `IMU: ax ay az gx gy gz`)")]
    EmptyInput {
        source_name: String,
        lines_read: usize,
    },

    #[error("invalid configuration: {field} = {value} ({reason})")]
    Configuration {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("line {line}: raw {channel} value {value} outside the sensor range {min}..={max}")]
    RawOutOfRange {
        line: usize,
        channel: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
