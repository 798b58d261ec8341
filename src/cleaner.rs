use serde::Serialize;
use tracing::{debug, info, warn};

use crate::rejects::RejectSink;
use crate::types::{CleanOptions, CleanedTable, Field, RawTable, Result};
use crate::validators;

/// Output of one cleaning run: the table and the rejections it produced
#[derive(Debug, Clone)]
pub struct CleanRun {
    pub table: CleanedTable,
    pub rejects: RejectSink,
}

/// Per-column outcome counts; `absent` excludes rejected cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
    pub field: Field,
    pub valid: usize,
    pub absent: usize,
    pub rejected: usize,
}

impl CleanRun {
    /// Valid, absent and rejected counts for every column
    pub fn summary(&self) -> Vec<FieldSummary> {
        let counts = self.rejects.counts();
        Field::ALL
            .iter()
            .map(|&field| {
                let valid = self.table.column(field).filter(Option::is_some).count();
                let rejected = counts.get(&field).copied().unwrap_or(0);
                FieldSummary {
                    field,
                    valid,
                    absent: self.table.len() - valid - rejected,
                    rejected,
                }
            })
            .collect()
    }
}

/// Applies every field validator column by column
#[derive(Debug, Clone, Default)]
pub struct TableCleaner {
    options: CleanOptions,
}

impl TableCleaner {
    pub fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    /// Clean a whole table
    ///
    /// Fails only if a required column is missing, and then before any cell
    /// is touched. Bad cells become absent values plus reject entries.
    pub fn clean(&self, table: &RawTable) -> Result<CleanRun> {
        let columns = Field::ALL
            .iter()
            .map(|&field| table.column(field.name()).map(|cells| (field, cells)))
            .collect::<Result<Vec<_>>>()?;

        if table.is_empty() {
            warn!("input table has a header but no data rows");
        }
        info!(rows = table.len(), "cleaning table");

        let mut cleaned = CleanedTable::with_rows(table.len());
        let mut rejects = RejectSink::new();

        for (field, cells) in columns {
            let before = rejects.len();

            for (row, raw) in cells.into_iter().enumerate() {
                let value = validators::apply(field, row, raw, &self.options, &mut rejects);
                if let Some(out) = cleaned.record_mut(row) {
                    out.set(field, value);
                }
            }

            debug!(
                field = field.name(),
                rejected = rejects.len() - before,
                "column cleaned"
            );
        }

        info!(
            rows = cleaned.len(),
            rejected = rejects.len(),
            "cleaning finished"
        );

        Ok(CleanRun {
            table: cleaned,
            rejects,
        })
    }
}

/// Clean a table with default options
pub fn clean(table: &RawTable) -> Result<CleanRun> {
    TableCleaner::default().clean(table)
}
