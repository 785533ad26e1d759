// src/export.rs

use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{EVENTS_CSV_SUFFIX, ORIENTATION_CSV_SUFFIX};
use crate::data_analysis::event_detection::EventKind;
use crate::data_analysis::run_summary::RunSummary;
use crate::types::PipelineResult;

const ORIENTATION_HEADER: [&str; 7] = ["sample", "time_s", "roll_deg", "pitch_deg", "impact", "torsion", "lateral"];
const EVENTS_HEADER: [&str; 4] = ["kind", "sample", "time_s", "magnitude"];

#[derive(Serialize)]
struct OrientationRow {
    sample: usize,
    time_s: f64,
    roll_deg: f64,
    pitch_deg: f64,
    impact: u8,
    torsion: u8,
    lateral: u8,
}

#[derive(Serialize)]
struct EventRow {
    kind: &'static str,
    sample: usize,
    time_s: f64,
    magnitude: f64,
}

/// Per-sample roll/pitch in degrees with 0/1 event markers, one row per sample.
pub fn write_trajectory_csv_to<W: Write>(summary: &RunSummary, writer: W) -> PipelineResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(ORIENTATION_HEADER)?;

    let roll_deg = summary.roll_degrees();
    let pitch_deg = summary.pitch_degrees();
    let events = summary.events();
    let flag = |kind: EventKind, i: usize| u8::from(events.contains(kind, i));

    for (i, (&roll, &pitch)) in roll_deg.iter().zip(pitch_deg.iter()).enumerate() {
        wtr.serialize(OrientationRow {
            sample: i,
            time_s: summary.time_of(i),
            roll_deg: roll,
            pitch_deg: pitch,
            impact: flag(EventKind::Impact, i),
            torsion: flag(EventKind::Torsion, i),
            lateral: flag(EventKind::LateralLoad, i),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Every event, grouped by kind (impact, torsion, lateral) and ascending by sample.
pub fn write_events_csv_to<W: Write>(summary: &RunSummary, writer: W) -> PipelineResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(EVENTS_HEADER)?;

    for kind in EventKind::ALL {
        for event in summary.events().of_kind(kind) {
            wtr.serialize(EventRow {
                kind: kind.name(),
                sample: event.sample_index,
                time_s: summary.time_of(event.sample_index),
                magnitude: event.magnitude,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Output paths for a run: `<dir>/<stem>_orientation.csv` and `<dir>/<stem>_events.csv`.
pub fn export_paths(output_dir: &Path, root_name: &str) -> (PathBuf, PathBuf) {
    (
        output_dir.join(format!("{}{}", root_name, ORIENTATION_CSV_SUFFIX)),
        output_dir.join(format!("{}{}", root_name, EVENTS_CSV_SUFFIX)),
    )
}

/// Writes both CSV files and returns their paths.
pub fn export_run(summary: &RunSummary, output_dir: &Path, root_name: &str) -> PipelineResult<(PathBuf, PathBuf)> {
    let (orientation_path, events_path) = export_paths(output_dir, root_name);

    write_trajectory_csv_to(summary, File::create(&orientation_path)?)?;
    info!(path = ?orientation_path, rows = summary.sample_count(), "Wrote orientation CSV");

    write_events_csv_to(summary, File::create(&events_path)?)?;
    info!(path = ?events_path, rows = summary.events().total(), "Wrote events CSV");

    Ok((orientation_path, events_path))
}


// src/export.rs
