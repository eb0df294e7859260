use time::{Date, PrimitiveDateTime};

/// One timestamped sample from the rig data export.
///
/// Field units follow the export header (feet, klbs, barrels, gal/min, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct ShakerRecord {
    pub timestamp: PrimitiveDateTime,
    pub hole_depth: f64,
    pub bit_depth: f64,
    pub hook_load: f64,
    pub total_mud_volume: f64,
    pub weight_on_bit: f64,
    pub shaker_1: f64,
    pub tool_face: f64,
    pub shaker_2: f64,
    pub shaker_3: f64,
    pub heavy_ratio: f64,
    pub pvt_gain_loss: f64,
    pub total_mud_low_warning: f64,
    pub flow_low_warning: f64,
    pub flow_high_warning: f64,
    pub trip_mud_high_warning: f64,
    pub temperature: f64,
    pub flow_rate: f64,
    pub site_mud_volume: f64,
    pub inactive_mud_volume: f64,
}

impl ShakerRecord {
    /// Calendar date of the sample, used for daily grouping
    pub fn date(&self) -> Date {
        self.timestamp.date()
    }
}

/// An ordered set of ShakerRecords.
///
/// Records are always sorted ascending by timestamp. The sort is stable, so samples sharing a
/// timestamp keep the order they were given in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<ShakerRecord>,
}

impl RecordSet {
    pub fn new(mut records: Vec<ShakerRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self { records }
    }

    pub fn records(&self) -> &[ShakerRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShakerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<PrimitiveDateTime> {
        self.records.first().map(|r| r.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<PrimitiveDateTime> {
        self.records.last().map(|r| r.timestamp)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a ShakerRecord;
    type IntoIter = std::slice::Iter<'a, ShakerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
