pub mod city;
pub mod listing;
pub mod location;
pub mod lookups;

use crate::rejects::RejectSink;
use crate::types::{CleanOptions, CleanValue, Field, RawValue};

pub use city::clean_city_name;
pub use listing::{
    clean_amenities, clean_bathrooms, clean_bedrooms, clean_category, clean_currency, clean_fee,
    clean_has_photo, clean_id, clean_pets_allowed, clean_price, clean_price_display,
    clean_price_type, clean_source, clean_square_feet, clean_time,
};
pub use location::{clean_address, clean_latitude, clean_longitude, clean_state};

/// A raw cell that failed its field's acceptance rule
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// The offending cell, kept as evidence
    pub raw: RawValue,
    pub reason: Option<String>,
}

impl Rejection {
    /// Rejection without a specific reason
    pub fn new(raw: &RawValue) -> Self {
        Self {
            raw: raw.clone(),
            reason: None,
        }
    }

    pub fn because(raw: &RawValue, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.clone(),
            reason: Some(reason.into()),
        }
    }
}

/// Outcome of validating a single cell
pub type Validated<T> = std::result::Result<T, Rejection>;

/// What a cell becomes in the cleaned table
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Value(CleanValue),
    /// No value, but not bad data either (blank city, unclassified pets)
    Absent,
    Rejected(Rejection),
}

impl Verdict {
    pub fn into_value(self) -> Option<CleanValue> {
        match self {
            Verdict::Value(v) => Some(v),
            Verdict::Absent | Verdict::Rejected(_) => None,
        }
    }
}

fn required<T>(result: Validated<T>, wrap: impl FnOnce(T) -> CleanValue) -> Verdict {
    match result {
        Ok(value) => Verdict::Value(wrap(value)),
        Err(rejection) => Verdict::Rejected(rejection),
    }
}

fn optional<T>(result: Validated<Option<T>>, wrap: impl FnOnce(T) -> CleanValue) -> Verdict {
    match result {
        Ok(Some(value)) => Verdict::Value(wrap(value)),
        Ok(None) => Verdict::Absent,
        Err(rejection) => Verdict::Rejected(rejection),
    }
}

/// Run the validator for `field` on one cell
pub fn validate(field: Field, raw: &RawValue, options: &CleanOptions) -> Verdict {
    match field {
        Field::Id => required(clean_id(raw), CleanValue::Integer),
        Field::Category => required(clean_category(raw), CleanValue::List),
        Field::Title | Field::Body => match CleanValue::passthrough(raw) {
            Some(value) => Verdict::Value(value),
            None => Verdict::Absent,
        },
        Field::Amenities => required(clean_amenities(raw), CleanValue::List),
        Field::Bathrooms => required(clean_bathrooms(raw), CleanValue::Integer),
        Field::Bedrooms => required(clean_bedrooms(raw), CleanValue::Integer),
        Field::Currency => required(clean_currency(raw), CleanValue::Text),
        Field::Fee => required(clean_fee(raw), CleanValue::Bool),
        Field::HasPhoto => required(clean_has_photo(raw), CleanValue::Bool),
        Field::PetsAllowed => match clean_pets_allowed(raw) {
            Ok(Some(policy)) => Verdict::Value(CleanValue::Text(policy.label().to_string())),
            Ok(None) if options.audit_unclassified_pets => Verdict::Rejected(Rejection::because(
                raw,
                "no cats, dogs or none token",
            )),
            Ok(None) => {
                tracing::debug!(raw = %raw, "pets_allowed value left unclassified");
                Verdict::Absent
            }
            Err(rejection) => Verdict::Rejected(rejection),
        },
        Field::Price => required(clean_price(raw), CleanValue::Float),
        Field::PriceDisplay => required(clean_price_display(raw), CleanValue::Float),
        Field::PriceType => required(clean_price_type(raw), |t| {
            CleanValue::Text(t.label().to_string())
        }),
        Field::SquareFeet => required(clean_square_feet(raw), CleanValue::Float),
        Field::Address => required(clean_address(raw), CleanValue::Text),
        Field::Cityname => optional(clean_city_name(raw), CleanValue::Text),
        Field::State => required(clean_state(raw), |s| CleanValue::Text(s.to_string())),
        Field::Latitude => required(clean_latitude(raw), CleanValue::Float),
        Field::Longitude => required(clean_longitude(raw), CleanValue::Float),
        Field::Source => required(clean_source(raw), CleanValue::Text),
        Field::Time => required(clean_time(raw), CleanValue::Text),
    }
}

/// Validate one cell, recording a rejection in `sink` under the field name
pub fn apply(
    field: Field,
    row: usize,
    raw: &RawValue,
    options: &CleanOptions,
    sink: &mut RejectSink,
) -> Option<CleanValue> {
    match validate(field, raw, options) {
        Verdict::Rejected(rejection) => {
            sink.record(field, row, rejection.raw, rejection.reason);
            None
        }
        verdict => verdict.into_value(),
    }
}
