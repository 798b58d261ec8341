use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Field, RawValue};

/// A raw cell that failed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectEntry {
    pub field: Field,
    /// 0-based row in the input table
    pub row: usize,
    pub raw: RawValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Collector of rejected cells for a single cleaning run
///
/// Append-only. A sink belongs to exactly one run: the cleaner creates it and
/// hands it back with the cleaned table, so nothing leaks between runs.
#[derive(Debug, Clone, Default)]
pub struct RejectSink {
    entries: Vec<RejectEntry>,
}

impl RejectSink {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a rejected cell
    pub fn record(&mut self, field: Field, row: usize, raw: RawValue, reason: Option<String>) {
        tracing::trace!(
            field = field.name(),
            row,
            raw = %raw,
            reason = reason.as_deref().unwrap_or(""),
            "rejected cell"
        );
        self.entries.push(RejectEntry {
            field,
            row,
            raw,
            reason,
        });
    }

    /// Rejected entries for one field, in encounter order
    pub fn bucket(&self, field: Field) -> impl Iterator<Item = &RejectEntry> + '_ {
        self.entries.iter().filter(move |e| e.field == field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rejections per field (fields without rejections are omitted)
    pub fn counts(&self) -> BTreeMap<Field, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.field).or_insert(0) += 1;
        }
        counts
    }

    /// Consume the sink into a per-field report
    pub fn into_report(self, total_rows: usize, input_hash: Option<String>) -> RejectReport {
        let total_rejected = self.entries.len();
        let mut fields: BTreeMap<Field, FieldRejects> = BTreeMap::new();

        for entry in self.entries {
            let bucket = fields.entry(entry.field).or_default();
            bucket.count += 1;
            bucket.entries.push(RejectedValue {
                row: entry.row,
                raw: entry.raw,
                reason: entry.reason,
            });
        }

        RejectReport {
            generated_at: chrono::Utc::now()
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            input_hash,
            total_rows,
            total_rejected,
            fields,
        }
    }
}

/// One rejected value inside a field bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedValue {
    pub row: usize,
    pub raw: RawValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Rejections collected for one field
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldRejects {
    pub count: usize,
    pub entries: Vec<RejectedValue>,
}

/// Diagnostics for a whole run, grouped by field
#[derive(Debug, Clone, Serialize)]
pub struct RejectReport {
    pub generated_at: String,

    /// SHA-256 of the input file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_hash: Option<String>,

    pub total_rows: usize,
    pub total_rejected: usize,
    pub fields: BTreeMap<Field, FieldRejects>,
}
