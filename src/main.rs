// src/main.rs

use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};

use imu_fusion_events::config::{load_config, DetectionMode, PipelineConfig};
use imu_fusion_events::constants::DEFAULT_LOG_FILTER;
use imu_fusion_events::export::export_run;
use imu_fusion_events::report::format_report;
use imu_fusion_events::{crate_version, run_pipeline_file};

fn print_usage_and_exit(program_name: &str) -> ! {
    eprintln!(
        "Usage: {} <input.log> [--config <file.toml>] [--alpha <0..1>] [--dt <seconds>] [--collapse-events] [--strict-raw-range] [--export] [--output-dir <dir>]",
        program_name
    );
    eprintln!("  <input.log>: Text log with lines of the form `IMU: ax ay az gx gy gz` (raw signed counts).");
    eprintln!("  --config <file.toml>: Optional. TOML file overriding scales, filter weight, sample interval and thresholds.");
    eprintln!("  --alpha <0..1>: Optional. Complementary filter gyro weight (default 0.98). Overrides the config file.");
    eprintln!("  --dt <seconds>: Optional. Fixed sample interval (default 0.01). Overrides the config file.");
    eprintln!("  --collapse-events: Optional. Report one event per contiguous above-threshold run instead of one per sample.");
    eprintln!("  --strict-raw-range: Optional. Reject raw values outside the signed 16-bit sensor range.");
    eprintln!("  --export: Optional. Write <stem>_orientation.csv and <stem>_events.csv.");
    eprintln!("  --output-dir <dir>: Optional. Directory for exported CSV files (default: current directory).");
    eprintln!("  --help: Show this help message and exit.");
    eprintln!("  --version: Show version information and exit.");
    eprintln!();
    eprintln!("Log verbosity follows RUST_LOG (default: {}).", DEFAULT_LOG_FILTER);
    std::process::exit(1);
}

fn parse_f64_arg(program_name: &str, flag: &str, value: Option<&String>) -> f64 {
    match value.map(|v| v.parse::<f64>()) {
        Some(Ok(parsed)) => parsed,
        Some(Err(_)) => {
            eprintln!("Error: {} expects a number, got '{}'", flag, value.map(String::as_str).unwrap_or(""));
            print_usage_and_exit(program_name);
        }
        None => {
            eprintln!("Error: {} requires a value", flag);
            print_usage_and_exit(program_name);
        }
    }
}

struct CliOptions {
    input_file: String,
    config_file: Option<PathBuf>,
    alpha: Option<f64>,
    dt: Option<f64>,
    collapse_events: bool,
    strict_raw_range: bool,
    export: bool,
    output_dir: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> CliOptions {
    let program_name = &args[0];
    if args.len() < 2 {
        print_usage_and_exit(program_name);
    }

    let mut input_file: Option<String> = None;
    let mut options = CliOptions {
        input_file: String::new(),
        config_file: None,
        alpha: None,
        dt: None,
        collapse_events: false,
        strict_raw_range: false,
        export: false,
        output_dir: None,
    };

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--help" | "-h" => print_usage_and_exit(program_name),
            "--version" | "-V" => {
                println!("{} {}", program_name, crate_version());
                std::process::exit(0);
            }
            "--config" => {
                let Some(path) = args.get(i + 1) else {
                    eprintln!("Error: --config requires a file path");
                    print_usage_and_exit(program_name);
                };
                options.config_file = Some(PathBuf::from(path));
                i += 1;
            }
            "--alpha" => {
                options.alpha = Some(parse_f64_arg(program_name, arg, args.get(i + 1)));
                i += 1;
            }
            "--dt" => {
                options.dt = Some(parse_f64_arg(program_name, arg, args.get(i + 1)));
                i += 1;
            }
            "--output-dir" => {
                let Some(dir) = args.get(i + 1) else {
                    eprintln!("Error: --output-dir requires a directory path");
                    print_usage_and_exit(program_name);
                };
                options.output_dir = Some(PathBuf::from(dir));
                i += 1;
            }
            "--collapse-events" => options.collapse_events = true,
            "--strict-raw-range" => options.strict_raw_range = true,
            "--export" => options.export = true,
            _ if arg.starts_with("--") => {
                eprintln!("Error: Unknown option '{}'", arg);
                print_usage_and_exit(program_name);
            }
            _ => {
                if input_file.is_some() {
                    eprintln!("Error: Only one input log is supported, got '{}' as well", arg);
                    print_usage_and_exit(program_name);
                }
                input_file = Some(arg.clone());
            }
        }
        i += 1;
    }

    match input_file {
        Some(file) => options.input_file = file,
        None => {
            eprintln!("Error: No input log given");
            print_usage_and_exit(program_name);
        }
    }
    options
}

fn build_config(options: &CliOptions) -> Result<PipelineConfig, Box<dyn Error>> {
    let mut config = match &options.config_file {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(alpha) = options.alpha {
        config.filter.alpha = alpha;
    }
    if let Some(dt) = options.dt {
        config.filter.sample_interval_s = dt;
    }
    if options.collapse_events {
        config.events.mode = DetectionMode::Collapsed;
    }
    if options.strict_raw_range {
        config.scaling.validate_raw_range = true;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);
    let config = build_config(&options)?;

    let input_path = Path::new(&options.input_file);
    let root_name = input_path.file_stem().unwrap_or_default().to_string_lossy();

    println!(
        "IMU fusion v{}: alpha = {}, dt = {} s, event mode = {:?}",
        crate_version(),
        config.filter.alpha,
        config.filter.sample_interval_s,
        config.events.mode
    );

    let summary = run_pipeline_file(input_path, &config)?;
    print!("\n{}", format_report(&summary));

    if options.export {
        let output_dir = options.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&output_dir)?;
        println!("\n--- Export ---");
        let (orientation_path, events_path) = export_run(&summary, &output_dir, &root_name)?;
        println!("  Orientation trajectory saved as '{}'.", orientation_path.display());
        println!("  Events saved as '{}'.", events_path.display());
    }

    Ok(())
}

// src/main.rs
