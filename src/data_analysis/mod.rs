// src/data_analysis/mod.rs

pub mod event_detection;
pub mod orientation;
pub mod run_summary;

// src/data_analysis/mod.rs
