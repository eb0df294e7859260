use time::Date;

use super::metrics::MetricDeriver;
use super::record::RecordSet;

/// One calendar day of the shaker log, aggregated
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregateRow {
    pub date: Date,
    pub avg_utilization: f64,
    pub avg_flow_rate: f64,
    pub avg_shaker_3: f64,
    pub max_shaker_3: f64,
    pub exceeds_threshold: bool,
    pub row_count: usize,
}

/// Running sums for the day currently being folded
#[derive(Debug, Clone)]
struct DayAccumulator {
    date: Date,
    utilization_sum: f64,
    flow_rate_sum: f64,
    shaker_3_sum: f64,
    shaker_3_max: f64,
    count: usize,
}

impl DayAccumulator {
    fn new(date: Date) -> Self {
        Self {
            date,
            utilization_sum: 0.0,
            flow_rate_sum: 0.0,
            shaker_3_sum: 0.0,
            shaker_3_max: f64::NEG_INFINITY,
            count: 0,
        }
    }

    fn add(&mut self, utilization: f64, flow_rate: f64, shaker_3: f64) {
        self.utilization_sum += utilization;
        self.flow_rate_sum += flow_rate;
        self.shaker_3_sum += shaker_3;
        self.shaker_3_max = self.shaker_3_max.max(shaker_3);
        self.count += 1;
    }

    fn finish(self, threshold_percent: f64) -> DailyAggregateRow {
        let n = self.count as f64;
        let avg_utilization = self.utilization_sum / n;
        DailyAggregateRow {
            date: self.date,
            avg_utilization,
            avg_flow_rate: self.flow_rate_sum / n,
            avg_shaker_3: self.shaker_3_sum / n,
            max_shaker_3: self.shaker_3_max,
            exceeds_threshold: avg_utilization > threshold_percent,
            row_count: self.count,
        }
    }
}

/// Fold a RecordSet into one row per calendar date present, in ascending date order.
///
/// Relies on the RecordSet being timestamp sorted, so each date is one contiguous run. Days with
/// no samples get no row. A day is flagged only if its mean utilization is strictly above the
/// threshold.
pub fn daily_aggregates(
    deriver: &MetricDeriver,
    records: &RecordSet,
    threshold_percent: f64,
) -> Vec<DailyAggregateRow> {
    let mut rows: Vec<DailyAggregateRow> = Vec::new();
    let mut current: Option<DayAccumulator> = None;

    for record in records {
        let date = record.date();
        let acc = match current.take() {
            Some(acc) if acc.date == date => acc,
            Some(acc) => {
                rows.push(acc.finish(threshold_percent));
                DayAccumulator::new(date)
            }
            None => DayAccumulator::new(date),
        };
        let acc = current.insert(acc);
        acc.add(
            deriver
                .derive_row_metrics(record)
                .screen_utilization_percent,
            record.flow_rate,
            record.shaker_3,
        );
    }

    if let Some(acc) = current {
        rows.push(acc.finish(threshold_percent));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::testing::sample;
    use time::macros::{date, datetime};

    fn deriver() -> MetricDeriver {
        // API 100 capacity so utilization = wob * flow / 250
        MetricDeriver::new(250.0, 120.0, 80.0).unwrap()
    }

    #[test]
    fn test_two_days() {
        let set = RecordSet::new(vec![
            // Day A: utilization 80 and 80 -> mean exactly 80
            sample(datetime!(2024-03-01 06:00:00), 50.0, 400.0, 30.0),
            sample(datetime!(2024-03-01 18:00:00), 40.0, 500.0, 50.0),
            // Day B: utilization 120
            sample(datetime!(2024-03-02 00:00:00), 60.0, 500.0, 20.0),
        ]);
        let rows = deriver().daily_aggregates(&set);
        assert_eq!(rows.len(), 2);

        let day_a = &rows[0];
        assert_eq!(day_a.date, date!(2024 - 03 - 01));
        assert!((day_a.avg_utilization - 80.0).abs() < 1e-9);
        assert!(!day_a.exceeds_threshold);
        assert_eq!(day_a.avg_flow_rate, 450.0);
        assert_eq!(day_a.avg_shaker_3, 40.0);
        assert_eq!(day_a.max_shaker_3, 50.0);
        assert_eq!(day_a.row_count, 2);

        let day_b = &rows[1];
        assert_eq!(day_b.date, date!(2024 - 03 - 02));
        assert!(day_b.exceeds_threshold);
        assert_eq!(day_b.row_count, 1);
    }

    #[test]
    fn test_gaps_not_filled_and_counts_add_up() {
        let set = RecordSet::new(vec![
            sample(datetime!(2024-03-09 12:00:00), 1.0, 1.0, 7.0),
            sample(datetime!(2024-03-01 12:00:00), 1.0, 1.0, 3.0),
            sample(datetime!(2024-03-05 12:00:00), 1.0, 1.0, 5.0),
            sample(datetime!(2024-03-05 13:00:00), 1.0, 1.0, 6.0),
        ]);
        let rows = deriver().daily_aggregates(&set);
        let dates: Vec<Date> = rows.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![
                date!(2024 - 03 - 01),
                date!(2024 - 03 - 05),
                date!(2024 - 03 - 09)
            ]
        );
        let total: usize = rows.iter().map(|r| r.row_count).sum();
        assert_eq!(total, set.len());
    }

    #[test]
    fn test_caller_threshold() {
        let set = RecordSet::new(vec![sample(
            datetime!(2024-03-01 06:00:00),
            25.0,
            600.0,
            0.0,
        )]);
        // utilization 60
        assert!(daily_aggregates(&deriver(), &set, 50.0)[0].exceeds_threshold);
        assert!(!daily_aggregates(&deriver(), &set, 60.0)[0].exceeds_threshold);
    }
}
