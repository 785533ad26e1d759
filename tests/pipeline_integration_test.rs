// tests/pipeline_integration_test.rs

use std::fs;
use std::path::PathBuf;

use imu_fusion_events::config::load_config;
use imu_fusion_events::export::export_run;
use imu_fusion_events::{
    run_pipeline_file, run_pipeline_str, DetectionMode, EventKind, PipelineConfig, PipelineError, RunSummary,
};

// Unique scratch directory per test under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("imu_fusion_events_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn run(text: &str) -> RunSummary {
    run_pipeline_str(text, "inline", &PipelineConfig::default()).unwrap()
}

// A few seconds of a device resting, being twisted, bumped and tipped, with console noise mixed in.
fn scripted_log() -> String {
    let mut log = String::from("*** Booting Zephyr OS ***\nMPU6050 Init ret = 0\n");
    for i in 0..300 {
        let (ax, ay, az, gz) = match i {
            100..=104 => (0, 0, 16384, 30000),     // ~229 deg/s twist
            150 => (20000, 0, 30000, 0),           // bump, ~22 m/s^2
            200..=209 => (0, 12000, 12000, 0),     // tipped sideways, ay ~7.2 m/s^2
            220..=224 => (0, 16000, 8000, 0),      // harder tip, ay ~9.6 m/s^2
            _ => (0, 0, 16384, 0),
        };
        log.push_str(&format!("[00:00:{:02}] <inf> imu: IMU: {} {} {} 0 0 {}\n", i / 100, ax, ay, az, gz));
        if i % 50 == 0 {
            log.push_str("I2C scan done\n");
        }
    }
    log
}

#[test]
fn test_static_scenario_has_no_drift_and_no_events() {
    let summary = run("IMU: 0 0 16384 0 0 0\nIMU: 0 0 16384 0 0 0");
    assert_eq!(summary.sample_count(), 2);
    assert_eq!(summary.roll().to_vec(), vec![0.0, 0.0]);
    assert_eq!(summary.pitch().to_vec(), vec![0.0, 0.0]);
    assert_eq!(summary.impact_count(), 0);
    assert_eq!(summary.torsion_count(), 0);
    assert_eq!(summary.lateral_count(), 0);
}

#[test]
fn test_single_impact_scenario() {
    // 30000 counts on X and Z: ~25.4 m/s^2 total, ay = 0, no rotation.
    let summary = run("IMU: 30000 0 30000 0 0 0");
    assert_eq!(summary.event_indices(EventKind::Impact), vec![0]);
    assert!(summary.event_indices(EventKind::Torsion).is_empty());
    assert!(summary.event_indices(EventKind::LateralLoad).is_empty());
}

#[test]
fn test_unmatched_log_is_empty_input() {
    let result = run_pipeline_str("hello\nIMU: not numbers\nACC(g): 0.0 0.0 1.0\n", "noise.log", &PipelineConfig::default());
    match result {
        Err(PipelineError::EmptyInput { source_name, lines_read }) => {
            assert_eq!(source_name, "noise.log");
            assert_eq!(lines_read, 3);
        }
        other => panic!("expected EmptyInput, got {:?}", other),
    }
}

#[test]
fn test_scripted_run() {
    let summary = run(&scripted_log());
    assert_eq!(summary.sample_count(), 300);
    assert_eq!(summary.roll().len(), 300);
    assert_eq!(summary.pitch().len(), 300);
    assert_eq!(summary.lines_skipped(), 2 + 6);

    assert_eq!(summary.event_indices(EventKind::Torsion), (100..=104).collect::<Vec<_>>());
    assert_eq!(summary.event_indices(EventKind::Impact), vec![150]);
    assert_eq!(summary.event_indices(EventKind::LateralLoad), (220..=224).collect::<Vec<_>>());

    // Tipped sideways for a while: the filter leans towards the accelerometer roll.
    let roll_deg = summary.roll_degrees();
    assert!(roll_deg[209] > 5.0, "roll at 209 was {}", roll_deg[209]);
    assert!(roll_deg[99].abs() < 1e-9);
}

#[test]
fn test_event_indices_strictly_ascending() {
    let summary = run(&scripted_log());
    for kind in EventKind::ALL {
        let indices = summary.event_indices(kind);
        assert!(indices.windows(2).all(|w| w[0] < w[1]), "{} not ascending", kind.name());
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    let log = scripted_log();
    assert_eq!(run(&log), run(&log));
}

#[test]
fn test_collapsed_mode_from_config() {
    let config = PipelineConfig::from_toml_str("[events]\nmode = \"collapsed\"\n").unwrap();
    assert_eq!(config.events.mode, DetectionMode::Collapsed);
    let summary = run_pipeline_str(&scripted_log(), "inline", &config).unwrap();
    assert_eq!(summary.event_indices(EventKind::Torsion), vec![100]);
    assert_eq!(summary.event_indices(EventKind::LateralLoad), vec![220]);
    assert_eq!(summary.event_indices(EventKind::Impact), vec![150]);
}

#[test]
fn test_file_run_with_config_and_export() {
    let dir = scratch_dir("file_run");
    let log_path = dir.join("bench_run.log");
    let config_path = dir.join("pipeline.toml");
    fs::write(&log_path, scripted_log()).unwrap();
    fs::write(
        &config_path,
        "[filter]\nalpha = 0.9\nsample_interval_s = 0.005\n\n[events]\nimpact_threshold_ms2 = 50.0\n",
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let summary = run_pipeline_file(&log_path, &config).unwrap();
    assert_eq!(summary.impact_count(), 0);
    assert!((summary.duration_s() - 1.5).abs() < 1e-9);

    let (orientation_csv, events_csv) = export_run(&summary, &dir, "bench_run").unwrap();
    let orientation = fs::read_to_string(&orientation_csv).unwrap();
    assert_eq!(orientation.lines().count(), 301);
    let events = fs::read_to_string(&events_csv).unwrap();
    assert_eq!(events.lines().count(), 1 + summary.events().total());
    assert!(events.lines().nth(1).unwrap().starts_with("torsion,100,"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_file_with_invalid_utf8_line_still_runs() {
    let dir = scratch_dir("invalid_utf8");
    let log_path = dir.join("serial.log");
    let mut bytes = b"IMU: 0 0 16384 0 0 0\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
    bytes.extend_from_slice(b"IMU: 0 0 16384 0 0 0\n");
    fs::write(&log_path, bytes).unwrap();

    let summary = run_pipeline_file(&log_path, &PipelineConfig::default()).unwrap();
    assert_eq!(summary.sample_count(), 2);
    assert_eq!(summary.lines_skipped(), 1);
    assert_eq!(summary.events().total(), 0);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_out_of_domain_config_file_is_rejected() {
    let dir = scratch_dir("bad_config");
    let config_path = dir.join("bad.toml");
    fs::write(&config_path, "[filter]\nsample_interval_s = 0.0\n").unwrap();
    assert!(matches!(
        load_config(&config_path),
        Err(PipelineError::Configuration { field: "filter.sample_interval_s", .. })
    ));
    fs::remove_dir_all(&dir).ok();
}
