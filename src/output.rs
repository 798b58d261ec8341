use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::types::{CleanValue, CleanedTable, Field, OutputFormat, Result};

/// Write any serializable value as pretty JSON to a file
pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

/// Serialize to a pretty JSON string
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write pretty JSON to stdout
pub fn write_json_stdout<T: Serialize>(value: &T) -> Result<()> {
    let json = to_json_string(value)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", json)?;
    Ok(())
}

/// Render one cleaned cell for CSV output; absent cells are empty
fn csv_cell(value: Option<&CleanValue>) -> Result<String> {
    Ok(match value {
        None => String::new(),
        Some(CleanValue::Integer(i)) => i.to_string(),
        Some(CleanValue::Float(f)) => f.to_string(),
        Some(CleanValue::Bool(b)) => b.to_string(),
        Some(CleanValue::Text(s)) => s.clone(),
        Some(CleanValue::List(items)) => serde_json::to_string(items)?,
    })
}

/// Write the cleaned table as CSV with the fixed column order
pub fn write_table_csv<W: Write>(table: &CleanedTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(Field::ALL.iter().map(|f| f.name()))?;

    for record in table.records() {
        let cells = Field::ALL
            .iter()
            .map(|&field| csv_cell(record.get(field)))
            .collect::<Result<Vec<_>>>()?;
        csv_writer.write_record(&cells)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the cleaned table to a file, or stdout when no path is given
pub fn write_table(table: &CleanedTable, format: OutputFormat, path: Option<&Path>) -> Result<()> {
    match (format, path) {
        (OutputFormat::Csv, Some(path)) => {
            let file = std::fs::File::create(path)?;
            write_table_csv(table, std::io::BufWriter::new(file))
        }
        (OutputFormat::Csv, None) => write_table_csv(table, std::io::stdout().lock()),
        (OutputFormat::Json, Some(path)) => write_json_file(table, path),
        (OutputFormat::Json, None) => write_json_stdout(table),
    }
}
