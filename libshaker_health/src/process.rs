use super::config::Config;
use super::error::ProcessorError;
use super::metrics::{Analysis, MetricDeriver};
use super::raw_table::RawTable;
use super::record::RecordSet;
use super::report::{format_timestamp, ReportWriter};
use super::validate::validate;

/// Load and validate the shaker log named by the config
pub fn load_record_set(config: &Config) -> Result<RecordSet, ProcessorError> {
    let table = RawTable::read_csv_file(&config.input_path)?;
    let records = validate(&table)?;
    if let (Some(first), Some(last)) = (records.first_timestamp(), records.last_timestamp()) {
        log::info!(
            "Log spans {} to {}.",
            format_timestamp(&first)?,
            format_timestamp(&last)?
        );
    }
    Ok(records)
}

/// The main pipeline of shaker_health.
///
/// Takes in a config, reads and validates the shaker log, derives the metrics and, if an output
/// directory is configured, writes the report files. Nothing is written unless every step before
/// it succeeded.
pub fn process(config: &Config) -> Result<Analysis, ProcessorError> {
    let deriver = MetricDeriver::from_config(config)?;
    let output_dir = config.get_output_directory()?;

    log::info!(
        "Mesh: {} (capacity {}), alert threshold: {}%, expected screen life: {} hrs",
        config.mesh_type,
        deriver.mesh_capacity(),
        deriver.utilization_alert_threshold_percent(),
        deriver.expected_screen_life_hours()
    );

    let records = load_record_set(config)?;
    if records.is_empty() {
        log::warn!("Shaker log has no data rows.");
    }
    let analysis = deriver.analyze(&records)?;

    log::info!(
        "Average screen utilization: {:.2}%",
        analysis.summary.average_utilization_percent
    );
    log::info!(
        "Estimated remaining screen life: {:.1} hrs",
        analysis.summary.remaining_screen_life_hours
    );
    log::info!("Shaker G-force health: {}", analysis.summary.health());
    for day in analysis.daily.iter().filter(|d| d.exceeds_threshold) {
        log::warn!(
            "{} averaged {:.2}% utilization, above the {}% threshold",
            day.date,
            day.avg_utilization,
            deriver.utilization_alert_threshold_percent()
        );
    }

    if let Some(dir) = output_dir {
        let writer = ReportWriter::new(&dir, &config.get_report_stem())?;
        writer.write_all(&analysis, &deriver, Some(config.mesh_type))?;
    } else {
        log::info!("No output path configured, skipping report files.");
    }

    Ok(analysis)
}
