// src/report.rs

use std::fmt::Write;

use crate::axis_names::AXIS_NAMES;
use crate::data_analysis::event_detection::EventKind;
use crate::data_analysis::run_summary::RunSummary;

// Max event indices listed per kind before eliding.
const MAX_LISTED_INDICES: usize = 10;

fn format_indices(indices: &[usize]) -> String {
    let shown: Vec<String> = indices.iter().take(MAX_LISTED_INDICES).map(|i| i.to_string()).collect();
    if indices.len() > MAX_LISTED_INDICES {
        format!("[{}, ... and {} more]", shown.join(", "), indices.len() - MAX_LISTED_INDICES)
    } else {
        format!("[{}]", shown.join(", "))
    }
}

fn kind_label(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Impact => "Impacts",
        EventKind::Torsion => "Torsion",
        EventKind::LateralLoad => "Lateral",
    }
}

/// The three event counts, one per line (`Impacts: N`, `Torsion: N`, `Lateral: N`).
pub fn format_counts(summary: &RunSummary) -> String {
    format!(
        "Impacts: {}\nTorsion: {}\nLateral: {}\n",
        summary.impact_count(),
        summary.torsion_count(),
        summary.lateral_count()
    )
}

/// Full text report for a run.
pub fn format_report(summary: &RunSummary) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "--- Run: {} ---", summary.source_name());
    let _ = writeln!(
        out,
        "Samples: {} ({:.2} s at {:.1} Hz), lines skipped: {} of {}",
        summary.sample_count(),
        summary.duration_s(),
        1.0 / summary.sample_interval_s(),
        summary.lines_skipped(),
        summary.lines_read()
    );

    let _ = writeln!(out, "\n--- Orientation ---");
    let peaks = [summary.peak_abs_roll_deg(), summary.peak_abs_pitch_deg()];
    for (name, peak) in AXIS_NAMES.iter().zip(peaks) {
        match peak {
            Some(deg) => {
                let _ = writeln!(out, "  Peak |{}|: {:.2} deg", name, deg);
            }
            None => {
                let _ = writeln!(out, "  Peak |{}|: unavailable (non-finite estimate)", name);
            }
        }
    }

    let _ = writeln!(out, "\n--- Events ---");
    out.push_str(&format_counts(summary));
    for kind in EventKind::ALL {
        let indices = summary.event_indices(kind);
        if indices.is_empty() {
            continue;
        }
        let _ = write!(out, "  {} at samples {}", kind_label(kind), format_indices(&indices));
        if let Some(peak) = summary.peak_event(kind) {
            let _ = write!(
                out,
                ", peak {:.2} {} at sample {}",
                peak.magnitude,
                kind.unit(),
                peak.sample_index
            );
        }
        out.push('\n');
    }

    out
}


// src/report.rs
