use std::path::PathBuf;
use thiserror::Error;

use super::constants::{MAX_UTILIZATION_THRESHOLD_PERCENT, MIN_UTILIZATION_THRESHOLD_PERCENT};

#[derive(Debug, Error)]
pub enum RawTableError {
    #[error("Could not open shaker log because file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("RawTable failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("RawTable failed to read CSV data: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Shaker log is missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Could not parse field '{field}' in data row {row}: found '{value}'")]
    Parse {
        field: String,
        row: usize,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("Record set has no rows; summary metrics are undefined")]
    EmptyInput,
}

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("Unknown screen mesh type: {0}")]
    UnknownMesh(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Configured output directory {0:?} does not exist")]
    BadOutputPath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
    #[error("Config has an invalid mesh type: {0}")]
    BadMesh(#[from] MeshError),
    #[error("Utilization threshold {0} is outside of the allowed range {min}-{max}", min=MIN_UTILIZATION_THRESHOLD_PERCENT, max=MAX_UTILIZATION_THRESHOLD_PERCENT)]
    BadThreshold(f64),
    #[error("Mesh capacity {0} must be a positive number")]
    BadMeshCapacity(f64),
    #[error("Expected screen life {0} must be a non-negative number of hours")]
    BadScreenLife(f64),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Could not write report as output directory {0:?} does not exist")]
    BadOutputPath(PathBuf),
    #[error("ReportWriter failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("ReportWriter failed to write CSV: {0}")]
    CsvError(#[from] csv::Error),
    #[error("ReportWriter failed to convert to yaml: {0}")]
    ParsingError(#[from] serde_yaml::Error),
    #[error("ReportWriter failed to format a timestamp: {0}")]
    FormatError(#[from] time::error::Format),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to RawTable error: {0}")]
    RawTableError(#[from] RawTableError),
    #[error("Processor failed due to validation error: {0}")]
    ValidationError(#[from] ValidationError),
    #[error("Processor failed due to Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to metrics error: {0}")]
    MetricsError(#[from] MetricsError),
    #[error("Processor failed due to ReportWriter error: {0}")]
    ReportError(#[from] ReportError),
}
