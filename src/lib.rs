// src/lib.rs - Library interface for internal module access

pub mod axis_names;
pub mod config;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod report;
pub mod types;

pub use config::{DetectionMode, EventConfig, FilterConfig, PipelineConfig, SensorScaling};
pub use data_analysis::event_detection::{DetectedEvents, Event, EventKind};
pub use data_analysis::orientation::{ComplementaryFilter, OrientationEstimate, OrientationTrajectory};
pub use data_analysis::run_summary::RunSummary;
pub use data_input::log_data::{Sample, SampleSequence};
pub use error::PipelineError;
pub use pipeline::{run_pipeline_file, run_pipeline_str};

// Expose crate version at compile time.
pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
