use std::fmt::Display;
use time::PrimitiveDateTime;

use super::config::Config;
use super::constants::*;
use super::daily::{daily_aggregates, DailyAggregateRow};
use super::distribution::{daily_shaker3_distribution, DailyDistribution};
use super::error::{ConfigError, MetricsError};
use super::record::{RecordSet, ShakerRecord};

/// Derived quantities of a single record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    /// WOB * flow / 100. A composite proxy for solids load, not a calibrated volume
    pub solids_volume_rate: f64,
    /// Solids proxy as a percent of mesh capacity. Not clamped; may exceed 100
    pub screen_utilization_percent: f64,
}

/// A row of the time-series output: the record's timestamp, the channels the dashboard plots,
/// and the row metrics
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub timestamp: PrimitiveDateTime,
    pub shaker_1: f64,
    pub shaker_2: f64,
    pub shaker_3: f64,
    pub flow_rate: f64,
    pub metrics: RowMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakerHealth {
    Stable,
    DropDetected,
}

impl ShakerHealth {
    pub fn from_drop(drop_detected: bool) -> Self {
        if drop_detected {
            Self::DropDetected
        } else {
            Self::Stable
        }
    }
}

impl Display for ShakerHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stable => write!(f, "Stable"),
            Self::DropDetected => write!(f, "DROP DETECTED"),
        }
    }
}

/// The per-record-set scalars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub average_utilization_percent: f64,
    pub remaining_screen_life_hours: f64,
    pub drop_detected: bool,
}

impl Summary {
    pub fn health(&self) -> ShakerHealth {
        ShakerHealth::from_drop(self.drop_detected)
    }
}

/// Everything derived from one RecordSet
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub series: Vec<TimeSeriesPoint>,
    pub summary: Summary,
    pub daily: Vec<DailyAggregateRow>,
    pub distributions: Vec<DailyDistribution>,
}

/// MetricDeriver turns a RecordSet into screen utilization, wear and drop metrics.
///
/// It holds only the operator selections (mesh capacity, screen life baseline, alert threshold)
/// and keeps no state between calls; every operation recomputes from the RecordSet it is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDeriver {
    mesh_capacity: f64,
    expected_screen_life_hours: f64,
    utilization_alert_threshold_percent: f64,
}

impl MetricDeriver {
    /// Create a deriver, checking the selections are usable
    pub fn new(
        mesh_capacity: f64,
        expected_screen_life_hours: f64,
        utilization_alert_threshold_percent: f64,
    ) -> Result<Self, ConfigError> {
        if !(mesh_capacity.is_finite() && mesh_capacity > 0.0) {
            return Err(ConfigError::BadMeshCapacity(mesh_capacity));
        }
        if !(expected_screen_life_hours.is_finite() && expected_screen_life_hours >= 0.0) {
            return Err(ConfigError::BadScreenLife(expected_screen_life_hours));
        }
        if !(MIN_UTILIZATION_THRESHOLD_PERCENT..=MAX_UTILIZATION_THRESHOLD_PERCENT)
            .contains(&utilization_alert_threshold_percent)
        {
            return Err(ConfigError::BadThreshold(
                utilization_alert_threshold_percent,
            ));
        }
        Ok(Self {
            mesh_capacity,
            expected_screen_life_hours,
            utilization_alert_threshold_percent,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            config.mesh_capacity(),
            config.expected_screen_life_hours,
            config.utilization_alert_threshold_percent,
        )
    }

    pub fn mesh_capacity(&self) -> f64 {
        self.mesh_capacity
    }

    pub fn expected_screen_life_hours(&self) -> f64 {
        self.expected_screen_life_hours
    }

    pub fn utilization_alert_threshold_percent(&self) -> f64 {
        self.utilization_alert_threshold_percent
    }

    pub fn derive_row_metrics(&self, record: &ShakerRecord) -> RowMetrics {
        let solids_volume_rate = record.weight_on_bit * record.flow_rate / SOLIDS_RATE_DIVISOR;
        RowMetrics {
            solids_volume_rate,
            screen_utilization_percent: (solids_volume_rate / self.mesh_capacity) * 100.0,
        }
    }

    /// Mean screen utilization over the set
    pub fn average_utilization(&self, records: &RecordSet) -> Result<f64, MetricsError> {
        mean(
            records
                .iter()
                .map(|r| self.derive_row_metrics(r).screen_utilization_percent),
        )
        .ok_or(MetricsError::EmptyInput)
    }

    /// Hours of screen life left, never below zero.
    ///
    /// Uses the ROP proxy (WOB * flow), which is scaled independently of the solids volume rate.
    pub fn estimate_remaining_screen_life(
        &self,
        records: &RecordSet,
        expected_life_hours: f64,
    ) -> Result<f64, MetricsError> {
        let mean_rop_proxy = mean(records.iter().map(|r| r.weight_on_bit * r.flow_rate))
            .ok_or(MetricsError::EmptyInput)?;
        let usage_factor = mean_rop_proxy / ROP_USAGE_DIVISOR;
        let estimated_life_used = usage_factor * USAGE_HOURS_PER_FACTOR;
        Ok((expected_life_hours - estimated_life_used).max(0.0))
    }

    /// True if shaker #3 output jumps without a matching change in flow between any two
    /// consecutive samples
    pub fn detect_drop(&self, records: &RecordSet) -> bool {
        records.records().windows(2).any(|pair| {
            let shaker_delta = (pair[1].shaker_3 - pair[0].shaker_3).abs();
            let flow_delta = (pair[1].flow_rate - pair[0].flow_rate).abs();
            shaker_delta > DROP_SHAKER_DELTA && flow_delta < DROP_FLOW_DELTA
        })
    }

    /// Daily aggregates flagged against this deriver's alert threshold
    pub fn daily_aggregates(&self, records: &RecordSet) -> Vec<DailyAggregateRow> {
        daily_aggregates(self, records, self.utilization_alert_threshold_percent)
    }

    pub fn summarize(&self, records: &RecordSet) -> Result<Summary, MetricsError> {
        Ok(Summary {
            average_utilization_percent: self.average_utilization(records)?,
            remaining_screen_life_hours: self
                .estimate_remaining_screen_life(records, self.expected_screen_life_hours)?,
            drop_detected: self.detect_drop(records),
        })
    }

    /// Derive everything at once. An empty set yields no partial results.
    pub fn analyze(&self, records: &RecordSet) -> Result<Analysis, MetricsError> {
        let summary = self.summarize(records)?;
        let series = records
            .iter()
            .map(|r| TimeSeriesPoint {
                timestamp: r.timestamp,
                shaker_1: r.shaker_1,
                shaker_2: r.shaker_2,
                shaker_3: r.shaker_3,
                flow_rate: r.flow_rate,
                metrics: self.derive_row_metrics(r),
            })
            .collect();
        Ok(Analysis {
            series,
            summary,
            daily: self.daily_aggregates(records),
            distributions: daily_shaker3_distribution(records),
        })
    }
}

/// Arithmetic mean; None if there are no values
pub(crate) fn mean<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshType;
    use crate::record::testing::minute_series;

    fn deriver(mesh: MeshType) -> MetricDeriver {
        MetricDeriver::new(mesh.capacity(), 120.0, 80.0).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_row_full_utilization() {
        let set = minute_series(&[(50.0, 400.0, 40.0)]);
        let der = deriver(MeshType::Api140);
        let row = der.derive_row_metrics(&set.records()[0]);
        assert!(close(row.solids_volume_rate, 200.0));
        assert!(close(row.screen_utilization_percent, 100.0));
        assert!(close(der.average_utilization(&set).unwrap(), 100.0));
    }

    #[test]
    fn test_utilization_proportional_to_load() {
        let set = minute_series(&[(12.0, 310.0, 0.0), (33.5, 95.0, 0.0), (0.0, 500.0, 0.0)]);
        for mesh in MeshType::ALL {
            let der = deriver(mesh);
            for record in set.iter() {
                let expected = record.weight_on_bit * record.flow_rate / (100.0 * mesh.capacity())
                    * 100.0;
                let got = der.derive_row_metrics(record).screen_utilization_percent;
                assert!(close(got, expected));
            }
        }
    }

    #[test]
    fn test_utilization_not_clamped() {
        let set = minute_series(&[(100.0, 600.0, 0.0)]);
        let der = deriver(MeshType::Api200);
        assert!(close(der.average_utilization(&set).unwrap(), 500.0));
    }

    #[test]
    fn test_remaining_life() {
        // mean rop proxy = 5000 -> usage factor 5 -> 50 hours used
        let set = minute_series(&[(10.0, 400.0, 0.0), (20.0, 300.0, 0.0)]);
        let der = deriver(MeshType::Api100);
        assert!(close(
            der.estimate_remaining_screen_life(&set, 120.0).unwrap(),
            70.0
        ));
    }

    #[test]
    fn test_remaining_life_floored_at_zero() {
        let set = minute_series(&[(80.0, 900.0, 0.0), (95.0, 1100.0, 0.0)]);
        let der = deriver(MeshType::Api100);
        assert_eq!(der.estimate_remaining_screen_life(&set, 120.0).unwrap(), 0.0);
        assert_eq!(der.estimate_remaining_screen_life(&set, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_drop_with_steady_flow() {
        let set = minute_series(&[(10.0, 300.0, 40.0), (10.0, 301.0, 55.0), (10.0, 301.0, 55.0)]);
        assert!(deriver(MeshType::Api100).detect_drop(&set));
    }

    #[test]
    fn test_no_drop_when_flow_changes() {
        let set = minute_series(&[(10.0, 300.0, 40.0), (10.0, 280.0, 55.0), (10.0, 280.0, 55.0)]);
        assert!(!deriver(MeshType::Api100).detect_drop(&set));
    }

    #[test]
    fn test_drop_boundaries_are_strict() {
        // exactly 10 points on shaker #3 is not a drop, exactly 2 gal/min of flow change is too much
        let der = deriver(MeshType::Api100);
        assert!(!der.detect_drop(&minute_series(&[(1.0, 300.0, 40.0), (1.0, 300.0, 50.0)])));
        assert!(!der.detect_drop(&minute_series(&[(1.0, 300.0, 40.0), (1.0, 302.0, 60.0)])));
        assert!(der.detect_drop(&minute_series(&[(1.0, 300.0, 60.0), (1.0, 300.5, 45.0)])));
    }

    #[test]
    fn test_short_sets_never_drop() {
        let der = deriver(MeshType::Api100);
        assert!(!der.detect_drop(&RecordSet::default()));
        assert!(!der.detect_drop(&minute_series(&[(1.0, 1.0, 99.0)])));
    }

    #[test]
    fn test_empty_input() {
        let der = deriver(MeshType::Api100);
        let empty = RecordSet::default();
        assert_eq!(der.average_utilization(&empty), Err(MetricsError::EmptyInput));
        assert_eq!(
            der.estimate_remaining_screen_life(&empty, 120.0),
            Err(MetricsError::EmptyInput)
        );
        assert_eq!(der.analyze(&empty), Err(MetricsError::EmptyInput));
        assert!(der.daily_aggregates(&empty).is_empty());
    }

    #[test]
    fn test_bad_selections() {
        assert!(matches!(
            MetricDeriver::new(0.0, 120.0, 80.0),
            Err(ConfigError::BadMeshCapacity(_))
        ));
        assert!(matches!(
            MetricDeriver::new(200.0, -1.0, 80.0),
            Err(ConfigError::BadScreenLife(_))
        ));
        assert!(matches!(
            MetricDeriver::new(200.0, 120.0, 40.0),
            Err(ConfigError::BadThreshold(_))
        ));
        assert!(MetricDeriver::new(200.0, 120.0, 50.0).is_ok());
        assert!(MetricDeriver::new(200.0, 120.0, 100.0).is_ok());
    }

    #[test]
    fn test_analyze() {
        let set = minute_series(&[(50.0, 400.0, 40.0), (50.0, 400.0, 55.0)]);
        let der = deriver(MeshType::Api140);
        let analysis = der.analyze(&set).unwrap();
        assert_eq!(analysis.series.len(), 2);
        assert_eq!(analysis.series[1].shaker_3, 55.0);
        assert!(close(analysis.summary.average_utilization_percent, 100.0));
        assert_eq!(analysis.summary.health(), ShakerHealth::DropDetected);
        assert_eq!(analysis.daily.len(), 1);
        assert!(analysis.daily[0].exceeds_threshold);
        assert_eq!(analysis.distributions.len(), 1);
        assert_eq!(ShakerHealth::DropDetected.to_string(), "DROP DETECTED");
    }
}
