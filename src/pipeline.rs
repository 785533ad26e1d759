// src/pipeline.rs

use std::path::Path;
use tracing::info;

use crate::config::PipelineConfig;
use crate::data_analysis::event_detection::EventDetector;
use crate::data_analysis::orientation::estimate_orientation;
use crate::data_analysis::run_summary::RunSummary;
use crate::data_input::log_parser::{parse_log_file, parse_log_str, ParsedLog};
use crate::types::PipelineResult;

/// Estimation and detection over an already-parsed log.
///
/// Both stages read the same samples and ignore each other's output.
pub fn summarize(parsed: ParsedLog, source_name: &str, config: &PipelineConfig) -> PipelineResult<RunSummary> {
    let trajectory = estimate_orientation(&parsed.samples, &config.filter)?;
    let events = EventDetector::new(&config.events)?.detect(parsed.samples.as_slice());

    let summary = RunSummary::new(
        source_name.to_string(),
        config.filter.sample_interval_s,
        parsed.lines_read,
        parsed.lines_skipped,
        trajectory,
        events,
    );
    info!(
        samples = summary.sample_count(),
        impacts = summary.impact_count(),
        torsion = summary.torsion_count(),
        lateral = summary.lateral_count(),
        "Run complete"
    );
    Ok(summary)
}

/// Full pipeline over log text held in memory.
pub fn run_pipeline_str(text: &str, source_name: &str, config: &PipelineConfig) -> PipelineResult<RunSummary> {
    config.validate()?;
    let parsed = parse_log_str(text, source_name, &config.scaling)?;
    summarize(parsed, source_name, config)
}

/// Full pipeline over a log file. The file is read completely before processing.
pub fn run_pipeline_file(input_file_path: &Path, config: &PipelineConfig) -> PipelineResult<RunSummary> {
    config.validate()?;
    let parsed = parse_log_file(input_file_path, &config.scaling)?;
    summarize(parsed, &input_file_path.display().to_string(), config)
}


// src/pipeline.rs
