// src/data_analysis/run_summary.rs

use ndarray_stats::QuantileExt; // .max() on Array1

use crate::data_analysis::event_detection::{DetectedEvents, Event, EventKind};
use crate::data_analysis::orientation::OrientationTrajectory;
use crate::types::Channel;

/// Everything one pipeline invocation produced. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    source_name: String,
    sample_count: usize,
    sample_interval_s: f64,
    lines_read: usize,
    lines_skipped: usize,
    trajectory: OrientationTrajectory,
    events: DetectedEvents,
}

impl RunSummary {
    pub fn new(
        source_name: String,
        sample_interval_s: f64,
        lines_read: usize,
        lines_skipped: usize,
        trajectory: OrientationTrajectory,
        events: DetectedEvents,
    ) -> Self {
        Self {
            source_name,
            sample_count: trajectory.len(),
            sample_interval_s,
            lines_read,
            lines_skipped,
            trajectory,
            events,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn sample_interval_s(&self) -> f64 {
        self.sample_interval_s
    }

    /// Run length implied by the fixed sample interval.
    pub fn duration_s(&self) -> f64 {
        self.sample_count as f64 * self.sample_interval_s
    }

    /// Time of a sample relative to the start of the run.
    pub fn time_of(&self, sample_index: usize) -> f64 {
        sample_index as f64 * self.sample_interval_s
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn lines_skipped(&self) -> usize {
        self.lines_skipped
    }

    pub fn trajectory(&self) -> &OrientationTrajectory {
        &self.trajectory
    }

    pub fn roll(&self) -> &Channel {
        &self.trajectory.roll
    }

    pub fn pitch(&self) -> &Channel {
        &self.trajectory.pitch
    }

    pub fn roll_degrees(&self) -> Channel {
        self.trajectory.roll_degrees()
    }

    pub fn pitch_degrees(&self) -> Channel {
        self.trajectory.pitch_degrees()
    }

    pub fn events(&self) -> &DetectedEvents {
        &self.events
    }

    pub fn impacts(&self) -> &[Event] {
        &self.events.impacts
    }

    pub fn torsion(&self) -> &[Event] {
        &self.events.torsion
    }

    pub fn lateral(&self) -> &[Event] {
        &self.events.lateral
    }

    pub fn impact_count(&self) -> usize {
        self.events.impacts.len()
    }

    pub fn torsion_count(&self) -> usize {
        self.events.torsion.len()
    }

    pub fn lateral_count(&self) -> usize {
        self.events.lateral.len()
    }

    pub fn event_indices(&self, kind: EventKind) -> Vec<usize> {
        self.events.indices(kind)
    }

    /// Largest |roll| over the run in degrees. `None` if the trajectory holds NaN.
    pub fn peak_abs_roll_deg(&self) -> Option<f64> {
        peak_abs(&self.trajectory.roll).map(f64::to_degrees)
    }

    /// Largest |pitch| over the run in degrees. `None` if the trajectory holds NaN.
    pub fn peak_abs_pitch_deg(&self) -> Option<f64> {
        peak_abs(&self.trajectory.pitch).map(f64::to_degrees)
    }

    /// Strongest event of a kind, if any fired.
    pub fn peak_event(&self, kind: EventKind) -> Option<&Event> {
        self.events
            .of_kind(kind)
            .iter()
            .max_by(|a, b| a.magnitude.partial_cmp(&b.magnitude).unwrap_or(std::cmp::Ordering::Equal))
    }
}

fn peak_abs(channel: &Channel) -> Option<f64> {
    channel.mapv(f64::abs).max().ok().copied()
}


// src/data_analysis/run_summary.rs
