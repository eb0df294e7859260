use clap::{value_parser, Arg, Command};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use libshaker_health::config::Config;
use libshaker_health::error::{MetricsError, ProcessorError};
use libshaker_health::metrics::Analysis;
use libshaker_health::process::process;

const LOG_FILE: &str = "./shaker_health.log";

fn make_template_config(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let yaml_str = serde_yaml::to_string(&config)?;
    let mut file = File::create(path)?;
    file.write_all(yaml_str.as_bytes())?;
    Ok(())
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let term_logger = simplelog::TermLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    let file_logger = simplelog::WriteLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        File::create(LOG_FILE)?,
    );
    let loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![term_logger, file_logger];
    simplelog::CombinedLogger::init(loggers)?;
    Ok(())
}

fn print_daily_table(analysis: &Analysis) {
    log::info!(
        "{:<12}{:>17}{:>15}{:>11}{:>11}{:>9}{:>7}",
        "Date",
        "Avg Utilization",
        "Avg Flow Rate",
        "Avg SHKR3",
        "Max SHKR3",
        "Exceeds",
        "Rows"
    );
    for day in analysis.daily.iter() {
        log::info!(
            "{:<12}{:>16.2}%{:>15.1}{:>11.1}{:>11.1}{:>9}{:>7}",
            day.date.to_string(),
            day.avg_utilization,
            day.avg_flow_rate,
            day.avg_shaker_3,
            day.max_shaker_3,
            if day.exceeds_threshold { "YES" } else { "no" },
            day.row_count
        );
    }
}

fn main() {
    // Create a cli
    let matches = Command::new("shaker_health_cli")
        .about("Screen utilization and health metrics from shale shaker logs")
        .arg_required_else_help(true)
        .subcommand(Command::new("new").about("Make a template configuration yaml file"))
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .required(true)
                .help("Path to the configuration file"),
        )
        .arg(
            Arg::new("mesh")
                .short('m')
                .long("mesh")
                .help("Screen mesh type, overrides the config (API 100, API 140, API 170, API 200)"),
        )
        .arg(
            Arg::new("threshold")
                .short('t')
                .long("threshold")
                .value_parser(value_parser!(f64))
                .help("Utilization alert threshold in percent (50-100), overrides the config"),
        )
        .get_matches();

    // Initialize feedback
    if let Err(e) = init_logging() {
        eprintln!("Could not create logging: {e}");
        return;
    }

    // Parse the cli
    let config_path = match matches.get_one::<String>("path") {
        Some(p) => PathBuf::from(p),
        None => {
            log::error!("A configuration path is required");
            return;
        }
    };

    if let Some(("new", _)) = matches.subcommand() {
        log::info!(
            "Making a template config at {}...",
            config_path.to_string_lossy()
        );
        match make_template_config(&config_path) {
            Ok(()) => log::info!("Done."),
            Err(e) => log::error!("Could not write template config: {e}"),
        }
        return;
    }

    // Load our config
    log::info!("Loading config from {}...", config_path.to_string_lossy());
    let mut config = match Config::read_config_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    if let Some(mesh) = matches.get_one::<String>("mesh") {
        if let Err(e) = config.set_mesh_type(mesh) {
            log::error!("{e}");
            return;
        }
    }
    if let Some(threshold) = matches.get_one::<f64>("threshold") {
        config.utilization_alert_threshold_percent = *threshold;
    }
    if !config.is_threshold_valid() {
        log::error!(
            "Utilization threshold {} must be within 50-100%",
            config.utilization_alert_threshold_percent
        );
        return;
    }
    log::info!("Config successfully loaded.");
    log::info!("Input Path: {}", config.input_path.to_string_lossy());
    match &config.output_path {
        Some(p) => log::info!("Output Path: {}", p.to_string_lossy()),
        None => log::info!("Output Path: None"),
    }

    match process(&config) {
        Ok(analysis) => print_daily_table(&analysis),
        Err(ProcessorError::MetricsError(MetricsError::EmptyInput)) => {
            log::warn!("No data: the shaker log has a header but no data rows.");
        }
        Err(e) => log::error!("Analysis failed with error: {e}"),
    }

    log::info!("Done.");
}
