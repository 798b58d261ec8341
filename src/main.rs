mod cleaner;
mod cli;
mod error;
mod logging;
mod output;
mod pipeline;
mod readers;
mod rejects;
mod types;
mod validators;

use clap::Parser;
use cli::{Cli, Commands};
use error::Error;
use serde::Serialize;
use types::{CleanOptions, CleanValue, Field, RawValue, Result};
use validators::Verdict;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_format)?;

    match cli.command {
        Commands::Clean {
            input,
            out,
            rejects,
            format,
            delimiter,
            sheet,
            audit_pets,
            no_hash,
        } => {
            let options = CleanOptions {
                delimiter: delimiter.map(delimiter_byte).transpose()?,
                sheet,
                audit_unclassified_pets: audit_pets,
                hash_input: !no_hash,
                output_format: format,
            };

            let result = pipeline::clean_file(&input, &options)?;
            let summary = result.run.summary();
            let (table, report) = result.into_parts();

            if table.is_empty() {
                eprintln!("Input contained no data rows");
            }
            output::write_table(&table, options.output_format, out.as_deref())?;
            if let Some(out_path) = &out {
                eprintln!("Cleaned table written to: {}", out_path.display());
            }

            for entry in summary.iter().filter(|s| s.rejected > 0) {
                tracing::info!(
                    field = %entry.field,
                    rejected = entry.rejected,
                    absent = entry.absent,
                    "field rejections"
                );
            }

            if let Some(rejects_path) = rejects {
                output::write_json_file(&report, &rejects_path)?;
                eprintln!("Reject report written to: {}", rejects_path.display());
            } else {
                eprintln!(
                    "{} rows cleaned, {} values rejected",
                    report.total_rows, report.total_rejected
                );
                for (field, bucket) in &report.fields {
                    eprintln!("  {:<14} {}", field.name(), bucket.count);
                }
            }
        }
        Commands::Check { field, value } => {
            let field = Field::from_name(&field).ok_or(Error::UnknownField(field))?;
            let verdict =
                validators::validate(field, &RawValue::text(value), &CleanOptions::default());
            output::write_json_stdout(&CheckOutcome::new(field, verdict))?;
        }
    }

    Ok(())
}

fn delimiter_byte(c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(Error::InvalidInput(format!(
            "delimiter must be a single ASCII character, got '{}'",
            c
        )))
    }
}

/// JSON shape printed by `check`
#[derive(Debug, Serialize)]
struct CheckOutcome {
    field: Field,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<CleanValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl CheckOutcome {
    fn new(field: Field, verdict: Verdict) -> Self {
        match verdict {
            Verdict::Value(value) => Self {
                field,
                outcome: "valid",
                value: Some(value),
                reason: None,
            },
            Verdict::Absent => Self {
                field,
                outcome: "absent",
                value: None,
                reason: None,
            },
            Verdict::Rejected(rejection) => Self {
                field,
                outcome: "rejected",
                value: None,
                reason: rejection.reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert!(matches!(delimiter_byte('§'), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_check_outcome_json() {
        let verdict = validators::validate(
            Field::Cityname,
            &RawValue::text("St Louis"),
            &CleanOptions::default(),
        );
        let json = output::to_json_string(&CheckOutcome::new(Field::Cityname, verdict)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["field"], "cityname");
        assert_eq!(value["outcome"], "valid");
        assert_eq!(value["value"], "Saint Louis");
        assert!(value.get("reason").is_none());
    }

    #[test]
    fn test_check_outcome_rejected() {
        let verdict =
            validators::validate(Field::State, &RawValue::text("zz"), &CleanOptions::default());
        let outcome = CheckOutcome::new(Field::State, verdict);

        assert_eq!(outcome.outcome, "rejected");
        assert_eq!(outcome.reason.as_deref(), Some("not a valid state"));
    }
}
