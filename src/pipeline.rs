use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::cleaner::{CleanRun, TableCleaner};
use crate::readers::create_reader;
use crate::rejects::RejectReport;
use crate::types::{CleanOptions, Result};

/// Result of cleaning one input file
pub struct FileCleanResult {
    pub run: CleanRun,
    pub input_hash: Option<String>,
}

impl FileCleanResult {
    /// Build the reject report, consuming the run's reject sink
    pub fn into_parts(self) -> (crate::types::CleanedTable, RejectReport) {
        let rows = self.run.table.len();
        let report = self.run.rejects.into_report(rows, self.input_hash);
        (self.run.table, report)
    }
}

/// Load a data file and clean it
pub fn clean_file(path: &Path, options: &CleanOptions) -> Result<FileCleanResult> {
    let input_hash = if options.hash_input {
        Some(compute_file_hash(path)?)
    } else {
        None
    };

    let mut reader = create_reader(path, options)?;
    let table = reader.read()?;

    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers().len(),
        "loaded input table"
    );

    let run = TableCleaner::new(options.clone()).clean(&table)?;

    Ok(FileCleanResult { run, input_hash })
}

/// Compute SHA-256 hash of a file (streaming to handle large files)
fn compute_file_hash(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{CleanValue, Field};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "id;category;title;body;amenities;bathrooms;bedrooms;currency;fee;has_photo;pets_allowed;price;price_display;price_type;square_feet;address;cityname;state;latitude;longitude;source;time";

    fn write_listing_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file
    }

    fn semicolon_options() -> CleanOptions {
        CleanOptions {
            delimiter: Some(b';'),
            ..CleanOptions::default()
        }
    }

    #[test]
    fn test_compute_file_hash() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "test content").unwrap();

        let hash = compute_file_hash(file.path()).unwrap();
        assert_eq!(hash.len(), 64); // SHA-256 produces 64 hex chars
    }

    #[test]
    fn test_clean_file_end_to_end() {
        let file = write_listing_file(&[
            "5668626895;housing/rent/apartment;Studio;Nice;;1;0;USD;No;Thumbnail;;790;$790;Monthly;101;;St Louis;mo;38.6;-90.2;RentLingo;1577359415",
            "5664597177;housing/rent/apartment;2BR;Big;Pool,Gym;2;2;USD;No;Yes;Cats;1200;$900-$950;Weekly;900;4500 Elm Ave;Fulton County, GA;zz;91.0;-84.3;RentDigs.com;1577017063",
        ]);

        let result = clean_file(file.path(), &semicolon_options()).unwrap();
        assert!(result.input_hash.is_some());

        let table = &result.run.table;
        assert_eq!(table.len(), 2);

        let first = &table.records()[0];
        assert_eq!(
            first.get(Field::Cityname),
            Some(&CleanValue::Text("Saint Louis".to_string()))
        );
        assert_eq!(
            first.get(Field::State),
            Some(&CleanValue::Text("Missouri".to_string()))
        );
        // empty amenities cell reads as missing
        assert!(first.is_absent(Field::Amenities));
        assert!(first.is_absent(Field::PetsAllowed));

        let second = &table.records()[1];
        assert_eq!(
            second.get(Field::Cityname),
            Some(&CleanValue::Text("Atlanta".to_string()))
        );
        assert_eq!(second.get(Field::PriceDisplay), Some(&CleanValue::Float(925.0)));
        assert!(second.is_absent(Field::State));
        assert!(second.is_absent(Field::Latitude));

        let (_, report) = result.into_parts();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.fields[&Field::State].count, 1);
        assert_eq!(report.fields[&Field::Latitude].count, 1);
        assert!(report.fields[&Field::Latitude].entries[0]
            .reason
            .as_deref()
            .unwrap()
            .contains("out of range"));
    }

    #[test]
    fn test_clean_file_missing_column() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "id,state\n1,CA\n").unwrap();

        let result = clean_file(file.path(), &CleanOptions::default());
        assert!(matches!(result, Err(Error::MissingColumn(_))));
    }

    #[test]
    fn test_clean_file_unsupported() {
        let file = NamedTempFile::with_suffix(".xyz").unwrap();
        let options = CleanOptions {
            hash_input: false,
            ..CleanOptions::default()
        };
        assert!(matches!(
            clean_file(file.path(), &options),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
