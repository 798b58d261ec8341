use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Text used for a missing cell when it has to be rendered as a string
pub const MISSING_TEXT: &str = "nan";

/// Columns of the listings dataset, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Category,
    Title,
    Body,
    Amenities,
    Bathrooms,
    Bedrooms,
    Currency,
    Fee,
    HasPhoto,
    PetsAllowed,
    Price,
    PriceDisplay,
    PriceType,
    SquareFeet,
    Address,
    Cityname,
    State,
    Latitude,
    Longitude,
    Source,
    Time,
}

impl Field {
    pub const ALL: [Field; 22] = [
        Field::Id,
        Field::Category,
        Field::Title,
        Field::Body,
        Field::Amenities,
        Field::Bathrooms,
        Field::Bedrooms,
        Field::Currency,
        Field::Fee,
        Field::HasPhoto,
        Field::PetsAllowed,
        Field::Price,
        Field::PriceDisplay,
        Field::PriceType,
        Field::SquareFeet,
        Field::Address,
        Field::Cityname,
        Field::State,
        Field::Latitude,
        Field::Longitude,
        Field::Source,
        Field::Time,
    ];

    /// Column name as it appears in the dataset header
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Category => "category",
            Field::Title => "title",
            Field::Body => "body",
            Field::Amenities => "amenities",
            Field::Bathrooms => "bathrooms",
            Field::Bedrooms => "bedrooms",
            Field::Currency => "currency",
            Field::Fee => "fee",
            Field::HasPhoto => "has_photo",
            Field::PetsAllowed => "pets_allowed",
            Field::Price => "price",
            Field::PriceDisplay => "price_display",
            Field::PriceType => "price_type",
            Field::SquareFeet => "square_feet",
            Field::Address => "address",
            Field::Cityname => "cityname",
            Field::State => "state",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Source => "source",
            Field::Time => "time",
        }
    }

    /// Look up a field by its column name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
    }

    /// Title and body are carried through without validation
    pub fn is_passthrough(self) -> bool {
        matches!(self, Field::Title | Field::Body)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An untyped cell as read from the source file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Missing,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl RawValue {
    pub fn text(s: impl Into<String>) -> Self {
        RawValue::Text(s.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }

    /// Render the cell as text, the way the dataframe tooling that produced the
    /// dataset stringifies it: missing cells become `nan`, integral floats keep
    /// one decimal place and booleans are capitalised.
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Missing => MISSING_TEXT.to_string(),
            RawValue::Text(s) => s.clone(),
            RawValue::Integer(i) => i.to_string(),
            RawValue::Float(f) => format_float(*f),
            RawValue::Bool(true) => "True".to_string(),
            RawValue::Bool(false) => "False".to_string(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        MISSING_TEXT.to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

static MISSING_CELL: RawValue = RawValue::Missing;

/// One input row, cells in header order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    values: Vec<RawValue>,
}

impl RawRecord {
    pub fn new(values: Vec<RawValue>) -> Self {
        Self { values }
    }

    /// Cell at a column index; cells past the end of a short row are missing
    pub fn get(&self, index: usize) -> &RawValue {
        self.values.get(index).unwrap_or(&MISSING_CELL)
    }
}

/// Materialised input table: named columns, rows in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    records: Vec<RawRecord>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: RawRecord) {
        self.records.push(record);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a column, matching the header case-insensitively
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// All cells of a column in row order
    pub fn column(&self, name: &str) -> Result<Vec<&RawValue>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| crate::error::Error::MissingColumn(name.to_string()))?;
        Ok(self.records.iter().map(|r| r.get(index)).collect())
    }
}

/// A validated, typed cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CleanValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl CleanValue {
    /// Copy a raw cell into the cleaned table without interpreting it
    pub fn passthrough(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Missing => None,
            RawValue::Text(s) => Some(CleanValue::Text(s.clone())),
            RawValue::Integer(i) => Some(CleanValue::Integer(*i)),
            RawValue::Float(f) => Some(CleanValue::Float(*f)),
            RawValue::Bool(b) => Some(CleanValue::Bool(*b)),
        }
    }
}

/// One output row; every field is either a typed value or absent
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    values: Vec<Option<CleanValue>>,
}

impl CleanedRecord {
    pub fn new() -> Self {
        Self {
            values: vec![None; Field::ALL.len()],
        }
    }

    pub fn set(&mut self, field: Field, value: Option<CleanValue>) {
        self.values[field.index()] = value;
    }

    pub fn get(&self, field: Field) -> Option<&CleanValue> {
        self.values[field.index()].as_ref()
    }

    pub fn is_absent(&self, field: Field) -> bool {
        self.get(field).is_none()
    }
}

impl Default for CleanedRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for CleanedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::ALL.len()))?;
        for field in Field::ALL {
            map.serialize_entry(field.name(), &self.values[field.index()])?;
        }
        map.end()
    }
}

/// Cleaned output, row-aligned with the input table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CleanedTable {
    records: Vec<CleanedRecord>,
}

impl CleanedTable {
    pub fn with_rows(rows: usize) -> Self {
        Self {
            records: (0..rows).map(|_| CleanedRecord::new()).collect(),
        }
    }

    pub fn records(&self) -> &[CleanedRecord] {
        &self.records
    }

    pub(crate) fn record_mut(&mut self, row: usize) -> Option<&mut CleanedRecord> {
        self.records.get_mut(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of one column in row order
    pub fn column(&self, field: Field) -> impl Iterator<Item = Option<&CleanValue>> + '_ {
        self.records.iter().map(move |r| r.get(field))
    }
}

/// Output format for the cleaned table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Tsv,
    Excel,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" | "tab" => Some(FileFormat::Tsv),
            "xlsx" | "xls" | "xlsm" | "xlsb" => Some(FileFormat::Excel),
            _ => None,
        }
    }
}

/// Cleaning options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Field delimiter override for CSV input
    pub delimiter: Option<u8>,

    /// Worksheet to read from Excel input (first sheet if not set)
    pub sheet: Option<String>,

    /// Record unrecognised pets_allowed values as rejections instead of
    /// leaving them silently absent
    pub audit_unclassified_pets: bool,

    /// Whether to fingerprint the input file in the reject report
    pub hash_input: bool,

    /// Format of the cleaned table
    pub output_format: OutputFormat,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            sheet: None,
            audit_unclassified_pets: false,
            hash_input: true,
            output_format: OutputFormat::Csv,
        }
    }
}

/// Result type for the application
pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("CITYNAME"), Some(Field::Cityname));
        assert_eq!(Field::from_name("zip"), None);
    }

    #[test]
    fn test_field_order_matches_index() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_raw_value_as_text() {
        assert_eq!(RawValue::Missing.as_text(), "nan");
        assert_eq!(RawValue::Float(2.0).as_text(), "2.0");
        assert_eq!(RawValue::Float(1.5).as_text(), "1.5");
        assert_eq!(RawValue::Float(f64::NAN).as_text(), "nan");
        assert_eq!(RawValue::Integer(42).as_text(), "42");
        assert_eq!(RawValue::Bool(true).as_text(), "True");
        assert_eq!(RawValue::text(" CA ").as_text(), " CA ");
    }

    #[test]
    fn test_short_rows_read_as_missing() {
        let mut table = RawTable::new(vec!["a".to_string(), "b".to_string()]);
        table.push(RawRecord::new(vec![RawValue::text("1")]));

        let b = table.column("b").unwrap();
        assert_eq!(b, vec![&RawValue::Missing]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let table = RawTable::new(vec!["a".to_string()]);
        let err = table.column("state").unwrap_err();
        assert!(matches!(err, crate::error::Error::MissingColumn(ref c) if c == "state"));
    }

    #[test]
    fn test_cleaned_record_serializes_all_fields() {
        let mut record = CleanedRecord::new();
        record.set(Field::State, Some(CleanValue::Text("Texas".to_string())));
        record.set(Field::Bedrooms, Some(CleanValue::Integer(2)));

        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 22);
        assert_eq!(obj["state"], "Texas");
        assert_eq!(obj["bedrooms"], 2);
        assert!(obj["cityname"].is_null());
    }

    #[test]
    fn test_file_format_from_extension() {
        assert_eq!(FileFormat::from_extension("CSV"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_extension("tab"), Some(FileFormat::Tsv));
        assert_eq!(FileFormat::from_extension("xlsx"), Some(FileFormat::Excel));
        assert_eq!(FileFormat::from_extension("parquet"), None);
    }
}
