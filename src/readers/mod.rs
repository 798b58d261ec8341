pub mod csv;
pub mod excel;

use std::path::Path;

use crate::types::{CleanOptions, FileFormat, RawTable, Result};

/// Common trait for tabular file readers
pub trait TableReader {
    /// Read the whole file into a raw table
    fn read(&mut self) -> Result<RawTable>;
}

/// Determine the input format from the file extension
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    FileFormat::from_extension(ext).ok_or_else(|| {
        crate::error::Error::UnsupportedFormat(format!(
            "Unsupported file extension: .{}",
            ext
        ))
    })
}

/// Create a reader for the given file path
pub fn create_reader(path: &Path, options: &CleanOptions) -> Result<Box<dyn TableReader>> {
    match detect_format(path)? {
        FileFormat::Csv => Ok(Box::new(
            csv::CsvReader::new(path).with_delimiter(options.delimiter.unwrap_or(b',')),
        )),
        FileFormat::Tsv => Ok(Box::new(
            csv::CsvReader::new(path).with_delimiter(options.delimiter.unwrap_or(b'\t')),
        )),
        FileFormat::Excel => Ok(Box::new(excel::ExcelReader::new(
            path,
            options.sheet.clone(),
        ))),
    }
}
