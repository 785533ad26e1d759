// src/data_analysis/event_detection.rs

use crate::config::{DetectionMode, EventConfig};
use crate::data_input::log_data::{Sample, SampleChannel};
use crate::types::{Channel, PipelineResult};

/// Physical event classes flagged on the converted sensor stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Impact,      // |a| above threshold
    Torsion,     // |gz| above threshold
    LateralLoad, // |ay| above threshold
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Impact, EventKind::Torsion, EventKind::LateralLoad];

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Impact => "impact",
            EventKind::Torsion => "torsion",
            EventKind::LateralLoad => "lateral",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            EventKind::Torsion => "rad/s",
            EventKind::Impact | EventKind::LateralLoad => "m/s^2",
        }
    }

    /// Sample channel this kind is measured on.
    pub fn channel(self) -> SampleChannel {
        match self {
            EventKind::Impact => SampleChannel::AccelMagnitude,
            EventKind::Torsion => SampleChannel::Gz,
            EventKind::LateralLoad => SampleChannel::Ay,
        }
    }

    /// The quantity this kind compares against its threshold: the absolute channel value.
    pub fn measure(self, sample: &Sample) -> f64 {
        self.channel().read(sample).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub sample_index: usize,
    pub magnitude: f64,
}

/// Events of every kind for one run, each list in ascending sample order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectedEvents {
    pub impacts: Vec<Event>,
    pub torsion: Vec<Event>,
    pub lateral: Vec<Event>,
}

impl DetectedEvents {
    pub fn of_kind(&self, kind: EventKind) -> &[Event] {
        match kind {
            EventKind::Impact => &self.impacts,
            EventKind::Torsion => &self.torsion,
            EventKind::LateralLoad => &self.lateral,
        }
    }

    pub fn indices(&self, kind: EventKind) -> Vec<usize> {
        self.of_kind(kind).iter().map(|e| e.sample_index).collect()
    }

    pub fn total(&self) -> usize {
        self.impacts.len() + self.torsion.len() + self.lateral.len()
    }

    /// True when `index` triggered `kind`. Lists are sorted, so this is a binary search.
    pub fn contains(&self, kind: EventKind, index: usize) -> bool {
        self.of_kind(kind)
            .binary_search_by_key(&index, |e| e.sample_index)
            .is_ok()
    }
}

/// Stateless threshold classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetector {
    impact_threshold_ms2: f64,
    torsion_threshold_rad_s: f64,
    lateral_threshold_ms2: f64,
    mode: DetectionMode,
}

impl EventDetector {
    pub fn new(config: &EventConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self {
            impact_threshold_ms2: config.impact_threshold_ms2,
            torsion_threshold_rad_s: config.torsion_threshold_rad_s(),
            lateral_threshold_ms2: config.lateral_threshold_ms2,
            mode: config.mode,
        })
    }

    pub fn threshold(&self, kind: EventKind) -> f64 {
        match kind {
            EventKind::Impact => self.impact_threshold_ms2,
            EventKind::Torsion => self.torsion_threshold_rad_s,
            EventKind::LateralLoad => self.lateral_threshold_ms2,
        }
    }

    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    /// Strictly greater than: a value equal to the threshold is not an event.
    pub fn exceeds(&self, kind: EventKind, sample: &Sample) -> bool {
        kind.measure(sample) > self.threshold(kind)
    }

    /// Scans every rule over the whole sequence. Empty input gives empty sets.
    pub fn detect(&self, samples: &[Sample]) -> DetectedEvents {
        DetectedEvents {
            impacts: self.detect_kind(EventKind::Impact, samples),
            torsion: self.detect_kind(EventKind::Torsion, samples),
            lateral: self.detect_kind(EventKind::LateralLoad, samples),
        }
    }

    pub fn detect_kind(&self, kind: EventKind, samples: &[Sample]) -> Vec<Event> {
        let measure: Channel = kind.channel().column(samples).mapv(f64::abs);
        let threshold = self.threshold(kind);
        match self.mode {
            DetectionMode::PerSample => flag_per_sample(kind, &measure, threshold),
            DetectionMode::Collapsed => flag_runs(kind, &measure, threshold),
        }
    }
}

fn flag_per_sample(kind: EventKind, measure: &Channel, threshold: f64) -> Vec<Event> {
    measure
        .indexed_iter()
        .filter(|(_, &value)| value > threshold)
        .map(|(sample_index, &magnitude)| Event {
            kind,
            sample_index,
            magnitude,
        })
        .collect()
}

// One event per contiguous run above threshold, at the run's first index with the run's peak.
fn flag_runs(kind: EventKind, measure: &Channel, threshold: f64) -> Vec<Event> {
    let mut events = Vec::new();
    let mut current: Option<Event> = None;

    for (sample_index, &value) in measure.indexed_iter() {
        if value > threshold {
            if let Some(run) = current.as_mut() {
                run.magnitude = run.magnitude.max(value);
            } else {
                current = Some(Event {
                    kind,
                    sample_index,
                    magnitude: value,
                });
            }
        } else if let Some(run) = current.take() {
            events.push(run);
        }
    }
    if let Some(run) = current {
        events.push(run);
    }
    events
}

/// Convenience wrapper: build a detector from config and scan.
pub fn detect_events(samples: &[Sample], config: &EventConfig) -> PipelineResult<DetectedEvents> {
    Ok(EventDetector::new(config)?.detect(samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accel(ax: f64, ay: f64, az: f64) -> Sample {
        Sample::new([ax, ay, az], [0.0; 3])
    }

    fn yaw_rate(gz: f64) -> Sample {
        Sample::new([0.0, 0.0, 9.81], [0.0, 0.0, gz])
    }

    fn detector() -> EventDetector {
        EventDetector::new(&EventConfig::default()).unwrap()
    }

    fn assert_strictly_ascending(events: &[Event]) {
        for pair in events.windows(2) {
            assert!(pair[0].sample_index < pair[1].sample_index);
        }
    }

    #[test]
    fn test_empty_input_gives_empty_sets() {
        let events = detector().detect(&[]);
        assert_eq!(events, DetectedEvents::default());
        assert_eq!(events.total(), 0);
    }

    #[test]
    fn test_measure_matches_channel_column() {
        let samples = [Sample::new([3.0, -4.0, 12.0], [0.0, 0.0, -2.5]), accel(0.0, 9.0, 0.0)];
        for kind in EventKind::ALL {
            let column = kind.channel().column(&samples);
            for (sample, value) in samples.iter().zip(column.iter()) {
                assert_eq!(kind.measure(sample), value.abs());
            }
        }
        assert_eq!(EventKind::Impact.measure(&samples[0]), 13.0);
        assert_eq!(EventKind::Torsion.measure(&samples[0]), 2.5);
        assert_eq!(EventKind::LateralLoad.measure(&samples[0]), 4.0);
    }

    #[test]
    fn test_impact_threshold_is_strict() {
        let at_threshold = accel(20.0, 0.0, 0.0);
        let above = accel(20.0001, 0.0, 0.0);
        let d = detector();
        assert!(!d.exceeds(EventKind::Impact, &at_threshold));
        assert!(d.exceeds(EventKind::Impact, &above));

        let events = d.detect(&[at_threshold, above]);
        assert_eq!(events.indices(EventKind::Impact), vec![1]);
        assert!((events.impacts[0].magnitude - 20.0001).abs() < 1e-12);
    }

    #[test]
    fn test_torsion_compares_in_rad_per_s() {
        let limit = 200.0f64.to_radians();
        let events = detector().detect(&[
            yaw_rate(limit * 0.999),
            yaw_rate(limit * 1.001),
            yaw_rate(-limit * 1.001),
            yaw_rate(199.0), // rad/s, far above 200 deg/s
        ]);
        assert_eq!(events.indices(EventKind::Torsion), vec![1, 2, 3]);
        assert!(events.torsion.iter().all(|e| e.magnitude > limit));
    }

    #[test]
    fn test_lateral_uses_absolute_ay() {
        let events = detector().detect(&[accel(0.0, 8.0, 9.81), accel(0.0, -8.5, 9.81), accel(0.0, 8.01, 0.0)]);
        assert_eq!(events.indices(EventKind::LateralLoad), vec![1, 2]);
        assert!(events.impacts.is_empty());
    }

    #[test]
    fn test_one_sample_can_trigger_every_kind() {
        let sample = Sample::new([0.0, 25.0, 0.0], [0.0, 0.0, 5.0]);
        let events = detector().detect(&[Sample::default(), sample]);
        for kind in EventKind::ALL {
            assert_eq!(events.indices(kind), vec![1], "{} not flagged", kind.name());
            assert!(events.contains(kind, 1));
            assert!(!events.contains(kind, 0));
        }
        assert_eq!(events.total(), 3);
    }

    #[test]
    fn test_sustained_reading_flags_every_sample() {
        let mut samples = vec![accel(0.0, 0.0, 9.81); 3];
        samples.extend(vec![accel(0.0, 0.0, 30.0); 5]);
        samples.push(accel(0.0, 0.0, 9.81));
        let events = detector().detect(&samples);
        assert_eq!(events.indices(EventKind::Impact), vec![3, 4, 5, 6, 7]);
        assert_strictly_ascending(&events.impacts);
    }

    #[test]
    fn test_collapsed_mode_merges_runs() {
        let config = EventConfig {
            mode: DetectionMode::Collapsed,
            ..EventConfig::default()
        };
        let d = EventDetector::new(&config).unwrap();
        let samples = vec![
            accel(0.0, 0.0, 9.81),
            accel(0.0, 0.0, 21.0),
            accel(0.0, 0.0, 35.0),
            accel(0.0, 0.0, 22.0),
            accel(0.0, 0.0, 9.81),
            accel(0.0, 0.0, 40.0), // run reaching the end of the sequence
        ];
        let events = d.detect(&samples);
        assert_eq!(events.indices(EventKind::Impact), vec![1, 5]);
        assert_eq!(events.impacts[0].magnitude, 35.0);
        assert_eq!(events.impacts[1].magnitude, 40.0);
        assert_eq!(d.mode(), DetectionMode::Collapsed);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = EventConfig {
            impact_threshold_ms2: 10.0,
            lateral_threshold_ms2: 1.0,
            ..EventConfig::default()
        };
        let events = detect_events(&[accel(0.0, 2.0, 9.81)], &config).unwrap();
        assert_eq!(events.indices(EventKind::Impact), vec![0]);
        assert_eq!(events.indices(EventKind::LateralLoad), vec![0]);
        assert!(events.torsion.is_empty());
    }
}

// src/data_analysis/event_detection.rs
