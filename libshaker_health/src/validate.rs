use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

use super::constants::*;
use super::error::ValidationError;
use super::raw_table::RawTable;
use super::record::{RecordSet, ShakerRecord};

/// Validate a raw table into a RecordSet.
///
/// Every required column must be present (all missing names are reported together). Each row
/// must carry a parseable date, time and finite numeric values; the first bad cell fails the
/// whole table. Extra columns are ignored. The result is sorted by timestamp.
pub fn validate(table: &RawTable) -> Result<RecordSet, ValidationError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let mut records: Vec<ShakerRecord> = Vec::with_capacity(table.len());
    for (idx, row) in table.rows().iter().enumerate() {
        let cells = RowCells {
            table,
            row,
            row_number: idx + 1,
        };
        records.push(cells.to_record()?);
    }

    Ok(RecordSet::new(records))
}

/// Typed access to the cells of one data row
struct RowCells<'a> {
    table: &'a RawTable,
    row: &'a [String],
    row_number: usize,
}

impl RowCells<'_> {
    fn raw(&self, field: &str) -> Result<&str, ValidationError> {
        let idx = self
            .table
            .column_index(field)
            .ok_or_else(|| ValidationError::MissingFields(vec![field.to_string()]))?;
        Ok(self.row.get(idx).map(|s| s.trim()).unwrap_or(""))
    }

    fn parse_error(&self, field: &str, value: &str) -> ValidationError {
        ValidationError::Parse {
            field: field.to_string(),
            row: self.row_number,
            value: value.to_string(),
        }
    }

    fn number(&self, field: &str) -> Result<f64, ValidationError> {
        let value = self.raw(field)?;
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.parse_error(field, value)),
        }
    }

    fn timestamp(&self) -> Result<PrimitiveDateTime, ValidationError> {
        let date_str = self.raw(DATE_COLUMN)?;
        let date = parse_date(date_str).ok_or_else(|| self.parse_error(DATE_COLUMN, date_str))?;
        let time_str = self.raw(TIME_COLUMN)?;
        let time = parse_time(time_str).ok_or_else(|| self.parse_error(TIME_COLUMN, time_str))?;
        Ok(PrimitiveDateTime::new(date, time))
    }

    fn to_record(&self) -> Result<ShakerRecord, ValidationError> {
        Ok(ShakerRecord {
            timestamp: self.timestamp()?,
            hole_depth: self.number(HOLE_DEPTH_COLUMN)?,
            bit_depth: self.number(BIT_DEPTH_COLUMN)?,
            hook_load: self.number(HOOK_LOAD_COLUMN)?,
            total_mud_volume: self.number(TOTAL_MUD_VOLUME_COLUMN)?,
            weight_on_bit: self.number(WEIGHT_ON_BIT_COLUMN)?,
            shaker_1: self.number(SHAKER_1_COLUMN)?,
            tool_face: self.number(TOOL_FACE_COLUMN)?,
            shaker_2: self.number(SHAKER_2_COLUMN)?,
            shaker_3: self.number(SHAKER_3_COLUMN)?,
            heavy_ratio: self.number(HEAVY_RATIO_COLUMN)?,
            pvt_gain_loss: self.number(PVT_GAIN_LOSS_COLUMN)?,
            total_mud_low_warning: self.number(TOTAL_MUD_LOW_WARNING_COLUMN)?,
            flow_low_warning: self.number(FLOW_LOW_WARNING_COLUMN)?,
            flow_high_warning: self.number(FLOW_HIGH_WARNING_COLUMN)?,
            trip_mud_high_warning: self.number(TRIP_MUD_HIGH_WARNING_COLUMN)?,
            temperature: self.number(TEMPERATURE_COLUMN)?,
            flow_rate: self.number(FLOW_RATE_COLUMN)?,
            site_mud_volume: self.number(SITE_MUD_VOLUME_COLUMN)?,
            inactive_mud_volume: self.number(INACTIVE_MUD_VOLUME_COLUMN)?,
        })
    }
}

/// Dates are exported as YYYY/MM/DD; some rigs use dashes
fn parse_date(s: &str) -> Option<Date> {
    Date::parse(
        s,
        format_description!("[year]/[month padding:none]/[day padding:none]"),
    )
    .or_else(|_| {
        Date::parse(
            s,
            format_description!("[year]-[month padding:none]-[day padding:none]"),
        )
    })
    .ok()
}

fn parse_time(s: &str) -> Option<Time> {
    Time::parse(
        s,
        format_description!("[hour padding:none]:[minute]:[second]"),
    )
    .or_else(|_| {
        Time::parse(
            s,
            format_description!("[hour padding:none]:[minute]:[second].[subsecond]"),
        )
    })
    .or_else(|_| Time::parse(s, format_description!("[hour padding:none]:[minute]")))
    .ok()
}
