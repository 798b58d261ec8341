use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use crate::error::Error;
use crate::types::{RawRecord, RawTable, RawValue, Result};

use super::TableReader;

/// Excel file reader (supports .xlsx, .xls, .xlsm, .xlsb)
pub struct ExcelReader {
    path: PathBuf,
    sheet: Option<String>,
}

impl ExcelReader {
    /// Read `sheet`, or the first worksheet when none is given
    pub fn new(path: &Path, sheet: Option<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            sheet,
        }
    }

    /// Convert a cell, keeping its native type
    fn data_to_raw(dt: &Data) -> RawValue {
        match dt {
            Data::Empty | Data::Error(_) => RawValue::Missing,
            Data::String(s) if s.is_empty() => RawValue::Missing,
            Data::String(s) => RawValue::Text(s.clone()),
            Data::Float(f) => RawValue::Float(*f),
            Data::Int(i) => RawValue::Integer(*i),
            Data::Bool(b) => RawValue::Bool(*b),
            Data::DateTime(d) => RawValue::Text(Self::excel_serial_to_text(d.as_f64())),
            Data::DateTimeIso(s) | Data::DurationIso(s) => RawValue::Text(s.clone()),
        }
    }

    fn header_text(dt: &Data) -> String {
        match Self::data_to_raw(dt) {
            RawValue::Missing => String::new(),
            value => value.as_text().trim().to_string(),
        }
    }

    /// Convert an Excel serial date-time to "YYYY-MM-DD HH:MM:SS"
    fn excel_serial_to_text(serial: f64) -> String {
        // Excel epoch is 1899-12-30 (with the 1900 leap year bug)
        let seconds = (serial * 86_400.0).round() as i64;
        chrono::NaiveDate::from_ymd_opt(1899, 12, 30)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .and_then(|base| base.checked_add_signed(chrono::Duration::seconds(seconds)))
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| serial.to_string())
    }
}

impl TableReader for ExcelReader {
    fn read(&mut self) -> Result<RawTable> {
        let mut workbook: Sheets<std::io::BufReader<std::fs::File>> =
            open_workbook_auto(&self.path)?;

        let sheet_name = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| Error::InvalidInput("workbook has no sheets".to_string()))?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(Error::Excel)?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(Self::header_text).collect())
            .unwrap_or_default();

        let mut table = RawTable::new(headers);
        for row in rows {
            table.push(RawRecord::new(row.iter().map(Self::data_to_raw).collect()));
        }

        tracing::debug!(
            path = %self.path.display(),
            sheet = %sheet_name,
            rows = table.len(),
            "read worksheet"
        );

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_to_raw() {
        assert_eq!(ExcelReader::data_to_raw(&Data::Empty), RawValue::Missing);
        assert_eq!(
            ExcelReader::data_to_raw(&Data::String(String::new())),
            RawValue::Missing
        );
        assert_eq!(
            ExcelReader::data_to_raw(&Data::String("CA".to_string())),
            RawValue::text("CA")
        );
        assert_eq!(ExcelReader::data_to_raw(&Data::Int(42)), RawValue::Integer(42));
        assert_eq!(ExcelReader::data_to_raw(&Data::Float(2.0)), RawValue::Float(2.0));
        assert_eq!(ExcelReader::data_to_raw(&Data::Bool(true)), RawValue::Bool(true));
    }

    #[test]
    fn test_header_text() {
        assert_eq!(
            ExcelReader::header_text(&Data::String(" price ".to_string())),
            "price"
        );
    }

    #[test]
    fn test_excel_serial_to_text() {
        // Excel serial date 44927 should be 2023-01-01
        assert_eq!(
            ExcelReader::excel_serial_to_text(44927.0),
            "2023-01-01 00:00:00"
        );
        assert_eq!(
            ExcelReader::excel_serial_to_text(44927.5),
            "2023-01-01 12:00:00"
        );
    }

    #[test]
    fn test_missing_workbook_is_an_error() {
        let mut reader = ExcelReader::new(Path::new("does-not-exist.xlsx"), None);
        assert!(reader.read().is_err());
    }
}
