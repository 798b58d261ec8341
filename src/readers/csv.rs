use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, Reader, ReaderBuilder};

use crate::types::{RawRecord, RawTable, RawValue, Result};

use super::TableReader;

/// CSV/TSV file reader
pub struct CsvReader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvReader {
    /// Create a new CSV reader
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn create_reader(&self) -> Result<Reader<BufReader<File>>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        Ok(csv_reader)
    }
}

/// Decode a byte field; exports are not always valid UTF-8
fn decode(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

fn to_raw(field: &[u8]) -> RawValue {
    if field.is_empty() {
        RawValue::Missing
    } else {
        RawValue::Text(decode(field))
    }
}

fn normalize_header(field: &[u8]) -> String {
    decode(field).trim().trim_matches('\u{feff}').to_string()
}

impl TableReader for CsvReader {
    fn read(&mut self) -> Result<RawTable> {
        let mut reader = self.create_reader()?;

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(normalize_header)
            .collect();
        let num_cols = headers.len();

        let mut table = RawTable::new(headers);
        let mut record = ByteRecord::new();

        while reader.read_byte_record(&mut record)? {
            let values: Vec<RawValue> = record.iter().take(num_cols).map(to_raw).collect();
            table.push(RawRecord::new(values));
        }

        tracing::debug!(
            path = %self.path.display(),
            rows = table.len(),
            columns = num_cols,
            "read delimited file"
        );

        Ok(table)
    }
}
