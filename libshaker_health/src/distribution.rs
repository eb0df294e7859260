use time::Date;

use super::constants::WHISKER_IQR_FACTOR;
use super::record::RecordSet;

/// Box plot statistics of shaker #3 output for one day
#[derive(Debug, Clone, PartialEq)]
pub struct DailyDistribution {
    pub date: Date,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    /// Values beyond the whiskers, in time order
    pub outliers: Vec<f64>,
}

impl DailyDistribution {
    fn from_values(date: Date, values: Vec<f64>) -> Self {
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let reach = WHISKER_IQR_FACTOR * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        // Whiskers end at the most extreme samples still inside the fences
        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .unwrap_or(q3);
        let outliers = values
            .into_iter()
            .filter(|v| *v < lower_whisker || *v > upper_whisker)
            .collect();

        Self {
            date,
            count: sorted.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers,
        }
    }
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty and ascending
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Per-day distribution of shaker #3 output, ascending by date, one entry per date present
pub fn daily_shaker3_distribution(records: &RecordSet) -> Vec<DailyDistribution> {
    let mut days: Vec<DailyDistribution> = Vec::new();
    let mut current: Option<(Date, Vec<f64>)> = None;

    for record in records {
        let date = record.date();
        if let Some((day, values)) = current.as_mut() {
            if *day == date {
                values.push(record.shaker_3);
                continue;
            }
        }
        if let Some((day, values)) = current.replace((date, vec![record.shaker_3])) {
            days.push(DailyDistribution::from_values(day, values));
        }
    }

    if let Some((date, values)) = current {
        days.push(DailyDistribution::from_values(date, values));
    }
    days
}
