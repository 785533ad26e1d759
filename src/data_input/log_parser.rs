// src/data_input/log_parser.rs

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::SensorScaling;
use crate::constants::{
    IMU_FIELDS_PER_RECORD, IMU_RECORD_TAG, RAW_CHANNEL_NAMES, RAW_SAMPLE_MAX, RAW_SAMPLE_MIN,
};
use crate::data_input::log_data::{Sample, SampleSequence};
use crate::error::PipelineError;
use crate::types::{PipelineResult, RawCounts};

/// One matched `IMU:` record before unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord {
    pub line: usize, // 1-based line number in the source text
    pub counts: RawCounts,
}

/// Parser output: the samples plus how much of the input was used.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLog {
    pub samples: SampleSequence,
    pub lines_read: usize,
    pub lines_skipped: usize,
}

/// Extracts the six raw counts from a single log line.
///
/// Returns `None` for anything that is not exactly `IMU:` followed by six
/// signed integers. Text before the tag (firmware timestamps, log levels) is
/// ignored so records survive interleaved console output.
pub fn parse_line(line: &str) -> Option<RawCounts> {
    let tag_pos = line.find(IMU_RECORD_TAG)?;
    let fields = &line[tag_pos + IMU_RECORD_TAG.len()..];

    let mut counts: RawCounts = [0; IMU_FIELDS_PER_RECORD];
    let mut tokens = fields.split_whitespace();
    for slot in counts.iter_mut() {
        *slot = tokens.next()?.parse::<i64>().ok()?;
    }
    if tokens.next().is_some() {
        return None; // Trailing garbage: not a record.
    }
    Some(counts)
}

fn check_raw_range(record: &RawRecord) -> PipelineResult<()> {
    for (&channel, &value) in RAW_CHANNEL_NAMES.iter().zip(record.counts.iter()) {
        if !(RAW_SAMPLE_MIN..=RAW_SAMPLE_MAX).contains(&value) {
            return Err(PipelineError::RawOutOfRange {
                line: record.line,
                channel,
                value,
                min: RAW_SAMPLE_MIN,
                max: RAW_SAMPLE_MAX,
            });
        }
    }
    Ok(())
}

/// Collects every `IMU:` record of a text blob in file order.
pub fn scan_records(text: &str) -> (Vec<RawRecord>, usize) {
    let mut records = Vec::new();
    let mut lines_read = 0;
    for (index, line) in text.lines().enumerate() {
        lines_read += 1;
        match parse_line(line) {
            Some(counts) => records.push(RawRecord {
                line: index + 1,
                counts,
            }),
            None => debug!(line = index + 1, "Skipping non-IMU line"),
        }
    }
    (records, lines_read)
}

/// Parses a whole log held in memory into a converted, non-empty sample sequence.
///
/// `source_name` only labels diagnostics (usually the file path).
pub fn parse_log_str(text: &str, source_name: &str, scaling: &SensorScaling) -> PipelineResult<ParsedLog> {
    let (records, lines_read) = scan_records(text);

    let mut samples = Vec::with_capacity(records.len());
    let mut non_finite = 0usize;
    for record in &records {
        if scaling.validate_raw_range {
            check_raw_range(record)?;
        }
        let sample = Sample::from_raw(&record.counts, scaling);
        if !sample.is_finite() {
            non_finite += 1;
        }
        samples.push(sample);
    }
    if non_finite > 0 {
        warn!(non_finite, "Converted samples contain non-finite values");
    }

    let lines_skipped = lines_read - records.len();
    let samples = SampleSequence::new(samples, source_name, lines_read)?;
    info!(
        source = source_name,
        samples = samples.len(),
        lines_read,
        lines_skipped,
        "Parsed IMU log"
    );

    Ok(ParsedLog {
        samples,
        lines_read,
        lines_skipped,
    })
}

/// Parses raw log bytes. Invalid UTF-8 (boot garbage on a serial console) is
/// replaced with U+FFFD, so the affected line is skipped like any other noise.
pub fn parse_log_bytes(bytes: &[u8], source_name: &str, scaling: &SensorScaling) -> PipelineResult<ParsedLog> {
    let text = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = text {
        debug!(source = source_name, "Log contains invalid UTF-8, replaced before parsing");
    }
    parse_log_str(&text, source_name, scaling)
}

/// Reads the whole file into memory, then parses it.
pub fn parse_log_file(input_file_path: &Path, scaling: &SensorScaling) -> PipelineResult<ParsedLog> {
    let bytes = fs::read(input_file_path)?;
    parse_log_bytes(&bytes, &input_file_path.display().to_string(), scaling)
}


// src/data_input/log_parser.rs
