use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::PrimitiveDateTime;

use super::constants::REPORT_FORMAT_VERSION;
use super::error::ReportError;
use super::mesh::MeshType;
use super::metrics::{Analysis, MetricDeriver};

const TIMESERIES_SUFFIX: &str = "timeseries.csv";
const DAILY_SUFFIX: &str = "daily.csv";
const DISTRIBUTION_SUFFIX: &str = "shaker3_distribution.csv";
const SUMMARY_SUFFIX: &str = "summary.yml";

// Column names mirror the dashboard tables so the exports can be charted as-is
#[derive(Debug, Serialize)]
struct TimeSeriesRow {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "SHAKER #1")]
    shaker_1: f64,
    #[serde(rename = "SHAKER #2")]
    shaker_2: f64,
    #[serde(rename = "SHAKER #3")]
    shaker_3: f64,
    #[serde(rename = "Flow Rate")]
    flow_rate: f64,
    #[serde(rename = "Solids Volume Rate")]
    solids_volume_rate: f64,
    #[serde(rename = "Screen Utilization (%)")]
    screen_utilization_percent: f64,
}

#[derive(Debug, Serialize)]
struct DailyRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Avg Utilization")]
    avg_utilization: f64,
    #[serde(rename = "Avg Flow Rate")]
    avg_flow_rate: f64,
    #[serde(rename = "Avg SHKR3")]
    avg_shaker_3: f64,
    #[serde(rename = "Max SHKR3")]
    max_shaker_3: f64,
    #[serde(rename = "Exceeds Threshold")]
    exceeds_threshold: bool,
    #[serde(rename = "Rows")]
    row_count: usize,
}

#[derive(Debug, Serialize)]
struct DistributionRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Count")]
    count: usize,
    #[serde(rename = "Min")]
    min: f64,
    #[serde(rename = "Q1")]
    q1: f64,
    #[serde(rename = "Median")]
    median: f64,
    #[serde(rename = "Q3")]
    q3: f64,
    #[serde(rename = "Max")]
    max: f64,
    #[serde(rename = "Lower Whisker")]
    lower_whisker: f64,
    #[serde(rename = "Upper Whisker")]
    upper_whisker: f64,
    #[serde(rename = "Outliers")]
    outliers: String,
}

/// Contents of the summary YAML file
#[derive(Debug, Serialize)]
struct SummaryFile {
    version: String,
    mesh_type: Option<MeshType>,
    mesh_capacity: f64,
    expected_screen_life_hours: f64,
    utilization_alert_threshold_percent: f64,
    record_count: usize,
    first_timestamp: String,
    last_timestamp: String,
    average_utilization_percent: f64,
    remaining_screen_life_hours: f64,
    drop_detected: bool,
    health: String,
    days_exceeding_threshold: usize,
}

pub(crate) fn format_timestamp(ts: &PrimitiveDateTime) -> Result<String, ReportError> {
    Ok(ts.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))?)
}

/// ReportWriter exports an Analysis as a set of files sharing a common stem.
///
/// Writes `<stem>_timeseries.csv`, `<stem>_daily.csv`, `<stem>_shaker3_distribution.csv` and
/// `<stem>_summary.yml` to the output directory.
#[derive(Debug)]
pub struct ReportWriter {
    output_dir: PathBuf,
    stem: String,
}

impl ReportWriter {
    /// Create the writer. The output directory must already exist
    pub fn new(output_dir: &Path, stem: &str) -> Result<Self, ReportError> {
        if !output_dir.is_dir() {
            return Err(ReportError::BadOutputPath(output_dir.to_path_buf()));
        }
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            stem: stem.to_string(),
        })
    }

    pub fn file_path(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{}", self.stem, suffix))
    }

    pub fn timeseries_path(&self) -> PathBuf {
        self.file_path(TIMESERIES_SUFFIX)
    }

    pub fn daily_path(&self) -> PathBuf {
        self.file_path(DAILY_SUFFIX)
    }

    pub fn distribution_path(&self) -> PathBuf {
        self.file_path(DISTRIBUTION_SUFFIX)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.file_path(SUMMARY_SUFFIX)
    }

    /// Write the per-record series behind the utilization, shaker output and flow charts
    pub fn write_timeseries(&self, analysis: &Analysis) -> Result<(), ReportError> {
        write_timeseries_file(&self.timeseries_path(), analysis)
    }

    pub fn write_daily(&self, analysis: &Analysis) -> Result<(), ReportError> {
        write_daily_file(&self.daily_path(), analysis)
    }

    pub fn write_distributions(&self, analysis: &Analysis) -> Result<(), ReportError> {
        write_distribution_file(&self.distribution_path(), analysis)
    }

    /// Write the summary scalars and the selections that produced them
    pub fn write_summary(
        &self,
        analysis: &Analysis,
        deriver: &MetricDeriver,
        mesh_type: Option<MeshType>,
    ) -> Result<(), ReportError> {
        write_summary_file(&self.summary_path(), analysis, deriver, mesh_type)
    }

    /// Write every report file.
    ///
    /// Files are first written under a `.partial` name and only renamed into place once all of
    /// them succeeded; on failure the partial files are removed.
    pub fn write_all(
        &self,
        analysis: &Analysis,
        deriver: &MetricDeriver,
        mesh_type: Option<MeshType>,
    ) -> Result<(), ReportError> {
        let targets = [
            self.timeseries_path(),
            self.daily_path(),
            self.distribution_path(),
            self.summary_path(),
        ];
        let staged: Vec<PathBuf> = targets.iter().map(|p| partial_path(p)).collect();

        let result = write_timeseries_file(&staged[0], analysis)
            .and_then(|_| write_daily_file(&staged[1], analysis))
            .and_then(|_| write_distribution_file(&staged[2], analysis))
            .and_then(|_| write_summary_file(&staged[3], analysis, deriver, mesh_type));
        if let Err(e) = result {
            for path in staged.iter().filter(|p| p.is_file()) {
                if let Err(rm) = std::fs::remove_file(path) {
                    log::warn!("Could not remove partial report {}: {rm}", path.display());
                }
            }
            return Err(e);
        }

        for (from, to) in staged.iter().zip(targets.iter()) {
            std::fs::rename(from, to)?;
        }
        log::info!(
            "Wrote report files {}_* to {}",
            self.stem,
            self.output_dir.display()
        );
        Ok(())
    }
}

/// Sibling path with a `.partial` extension appended
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

fn write_timeseries_file(path: &Path, analysis: &Analysis) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for point in analysis.series.iter() {
        writer.serialize(TimeSeriesRow {
            timestamp: format_timestamp(&point.timestamp)?,
            shaker_1: point.shaker_1,
            shaker_2: point.shaker_2,
            shaker_3: point.shaker_3,
            flow_rate: point.flow_rate,
            solids_volume_rate: point.metrics.solids_volume_rate,
            screen_utilization_percent: point.metrics.screen_utilization_percent,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_daily_file(path: &Path, analysis: &Analysis) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for day in analysis.daily.iter() {
        writer.serialize(DailyRow {
            date: day.date.to_string(),
            avg_utilization: day.avg_utilization,
            avg_flow_rate: day.avg_flow_rate,
            avg_shaker_3: day.avg_shaker_3,
            max_shaker_3: day.max_shaker_3,
            exceeds_threshold: day.exceeds_threshold,
            row_count: day.row_count,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_distribution_file(path: &Path, analysis: &Analysis) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for day in analysis.distributions.iter() {
        let outliers: Vec<String> = day.outliers.iter().map(|v| v.to_string()).collect();
        writer.serialize(DistributionRow {
            date: day.date.to_string(),
            count: day.count,
            min: day.min,
            q1: day.q1,
            median: day.median,
            q3: day.q3,
            max: day.max,
            lower_whisker: day.lower_whisker,
            upper_whisker: day.upper_whisker,
            outliers: outliers.join(";"),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_summary_file(
    path: &Path,
    analysis: &Analysis,
    deriver: &MetricDeriver,
    mesh_type: Option<MeshType>,
) -> Result<(), ReportError> {
    let (first, last) = match (analysis.series.first(), analysis.series.last()) {
        (Some(first), Some(last)) => (
            format_timestamp(&first.timestamp)?,
            format_timestamp(&last.timestamp)?,
        ),
        _ => (String::new(), String::new()),
    };
    let summary = SummaryFile {
        version: format!("{}:{}", env!("CARGO_PKG_NAME"), REPORT_FORMAT_VERSION),
        mesh_type,
        mesh_capacity: deriver.mesh_capacity(),
        expected_screen_life_hours: deriver.expected_screen_life_hours(),
        utilization_alert_threshold_percent: deriver.utilization_alert_threshold_percent(),
        record_count: analysis.series.len(),
        first_timestamp: first,
        last_timestamp: last,
        average_utilization_percent: analysis.summary.average_utilization_percent,
        remaining_screen_life_hours: analysis.summary.remaining_screen_life_hours,
        drop_detected: analysis.summary.drop_detected,
        health: analysis.summary.health().to_string(),
        days_exceeding_threshold: analysis
            .daily
            .iter()
            .filter(|d| d.exceeds_threshold)
            .count(),
    };

    let mut summary_file = std::fs::File::create(path)?;
    summary_file.write_all(serde_yaml::to_string(&summary)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::testing::minute_series;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "shaker_health_report_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_output_dir() {
        let path = PathBuf::from("./no/such/report/dir");
        assert!(matches!(
            ReportWriter::new(&path, "log"),
            Err(ReportError::BadOutputPath(_))
        ));
    }

    #[test]
    fn test_write_all() {
        let dir = scratch_dir("write_all");
        let set = minute_series(&[(50.0, 400.0, 40.0), (50.0, 400.0, 41.0)]);
        let deriver = MetricDeriver::new(MeshType::Api140.capacity(), 120.0, 80.0).unwrap();
        let analysis = deriver.analyze(&set).unwrap();
        let writer = ReportWriter::new(&dir, "rig7").unwrap();
        writer
            .write_all(&analysis, &deriver, Some(MeshType::Api140))
            .unwrap();

        let daily = std::fs::read_to_string(writer.daily_path()).unwrap();
        let mut lines = daily.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Date,Avg Utilization,Avg Flow Rate,Avg SHKR3,Max SHKR3,Exceeds Threshold,Rows"
        );
        assert_eq!(lines.next().unwrap(), "2024-03-01,100.0,400.0,40.5,41.0,true,2");

        let series = std::fs::read_to_string(writer.timeseries_path()).unwrap();
        assert_eq!(series.lines().count(), 3);
        assert!(series.contains("2024-03-01 00:01:00"));

        let summary = std::fs::read_to_string(writer.summary_path()).unwrap();
        assert!(summary.contains("mesh_type: API 140"));
        assert!(summary.contains("record_count: 2"));
        assert!(summary.contains("health: Stable"));

        assert!(writer.distribution_path().exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_failed_write_leaves_no_files() {
        let dir = scratch_dir("failed_write");
        let set = minute_series(&[(50.0, 400.0, 40.0), (50.0, 400.0, 41.0)]);
        let deriver = MetricDeriver::new(MeshType::Api140.capacity(), 120.0, 80.0).unwrap();
        let analysis = deriver.analyze(&set).unwrap();
        let writer = ReportWriter::new(&dir, "rig7").unwrap();

        // A directory in the way of the last file makes its creation fail
        let blocker = partial_path(&writer.summary_path());
        std::fs::create_dir_all(&blocker).unwrap();

        assert!(matches!(
            writer.write_all(&analysis, &deriver, Some(MeshType::Api140)),
            Err(ReportError::IOError(_))
        ));
        for path in [
            writer.timeseries_path(),
            writer.daily_path(),
            writer.distribution_path(),
            writer.summary_path(),
        ] {
            assert!(!path.exists());
        }
        assert!(!partial_path(&writer.timeseries_path()).exists());
        assert!(!partial_path(&writer.daily_path()).exists());
        assert!(!partial_path(&writer.distribution_path()).exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
