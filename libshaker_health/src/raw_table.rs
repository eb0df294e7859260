use fxhash::FxHashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::RawTableError;

/// RawTable is the untyped tabular form of a shaker log: a header row and rows of string cells.
///
/// No column is interpreted here; that is the job of validation. Column lookup is by exact
/// (case-sensitive) header name. If a header name repeats, the first column carrying it wins.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    index: FxHashMap<String, usize>,
}

impl RawTable {
    /// Create a table from a header row and data rows
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut index = FxHashMap::default();
        for (idx, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(idx);
        }
        Self {
            headers,
            rows,
            index,
        }
    }

    /// Read a comma-separated table with a header row from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RawTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Fields)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();
        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in csv_reader.records() {
            rows.push(record?.iter().map(String::from).collect());
        }
        Ok(Self::new(headers, rows))
    }

    /// Open and read a CSV file
    pub fn read_csv_file(path: &Path) -> Result<Self, RawTableError> {
        if !path.exists() {
            return Err(RawTableError::BadFilePath(path.to_path_buf()));
        }
        let file = File::open(path)?;
        log::info!(
            "Reading shaker log {} ({})",
            path.display(),
            human_bytes::human_bytes(file.metadata()?.len() as f64)
        );
        let table = Self::from_reader(file)?;
        log::info!(
            "Read {} data rows with {} columns.",
            table.len(),
            table.headers().len()
        );
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of a column by its exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
