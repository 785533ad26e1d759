// src/constants.rs

use std::f64::consts::PI;

// --- Sensor Scaling ---
// Accelerometer: ±2g full-scale, 16-bit. 16384 counts = 1g.
pub const ACCEL_LSB_PER_G: f64 = 16384.0;
pub const STANDARD_GRAVITY_MS2: f64 = 9.81;
// Gyroscope: 131 counts = 1 deg/s (±250 deg/s full-scale).
pub const GYRO_LSB_PER_DPS: f64 = 131.0;

pub const DEFAULT_ACCEL_SCALE: f64 = (1.0 / ACCEL_LSB_PER_G) * STANDARD_GRAVITY_MS2; // raw -> m/s^2
pub const DEFAULT_GYRO_SCALE: f64 = (1.0 / GYRO_LSB_PER_DPS) * (PI / 180.0); // raw -> rad/s

// Signed 16-bit sensor registers.
pub const RAW_SAMPLE_MIN: i64 = i16::MIN as i64;
pub const RAW_SAMPLE_MAX: i64 = i16::MAX as i64;

// --- Log Format ---
pub const IMU_RECORD_TAG: &str = "IMU:";
pub const IMU_FIELDS_PER_RECORD: usize = 6;
pub const RAW_CHANNEL_NAMES: [&str; IMU_FIELDS_PER_RECORD] = ["ax", "ay", "az", "gx", "gy", "gz"];

// --- Complementary Filter ---
pub const DEFAULT_SAMPLE_INTERVAL_S: f64 = 1.0 / 100.0; // Assumed 100 Hz, the log carries no timestamps
pub const DEFAULT_FILTER_ALPHA: f64 = 0.98; // Gyro weight

// --- Event Thresholds ---
pub const DEFAULT_IMPACT_THRESHOLD_MS2: f64 = 20.0;
pub const DEFAULT_TORSION_THRESHOLD_DPS: f64 = 200.0;
pub const DEFAULT_LATERAL_THRESHOLD_MS2: f64 = 8.0;

// --- Output ---
pub const ORIENTATION_CSV_SUFFIX: &str = "_orientation.csv";
pub const EVENTS_CSV_SUFFIX: &str = "_events.csv";
pub const DEFAULT_LOG_FILTER: &str = "imu_fusion_events=info";

// src/constants.rs
