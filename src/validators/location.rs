//! Validators for street address, state and coordinates.

use once_cell::sync::Lazy;
use regex::Regex;

use super::listing::parse_float;
use super::lookups::{state_name, WHITESPACE};
use super::{Rejection, Validated};
use crate::types::RawValue;

/// "40.2659 -77.4948" or "40.2659,-77.4948"
static ADDRESS_COORDINATES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\d+(\.\d+)?\s*[,\s]\s*-?\d+(\.\d+)?$").unwrap()
});

static DIGITS_AND_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d., ]+$").unwrap());

const ADDRESS_TRIM: &[char] = &[' ', ',', '.', ';', '-'];

pub fn clean_address(raw: &RawValue) -> Validated<String> {
    if raw.is_missing() {
        return Err(Rejection::because(raw, "missing value"));
    }

    let text = raw.as_text();
    let value = text.trim();
    let lower = value.to_lowercase();

    if matches!(lower.as_str(), "" | "none" | "nan") {
        return Err(Rejection::because(raw, "empty address"));
    }

    if ADDRESS_COORDINATES.is_match(value) {
        return Err(Rejection::because(raw, "coordinates instead of an address"));
    }

    if DIGITS_AND_SEPARATORS.is_match(value) || lower.contains("square") || lower.contains("sq")
    {
        return Err(Rejection::because(raw, "numeric or floor-area text"));
    }

    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_letter = value.chars().any(|c| c.is_ascii_alphabetic());
    if !(has_digit && has_letter) {
        return Err(Rejection::because(raw, "needs a street number and a name"));
    }

    Ok(WHITESPACE
        .replace_all(value, " ")
        .trim_matches(ADDRESS_TRIM)
        .to_string())
}

/// Full state name from a 2-letter abbreviation
pub fn clean_state(raw: &RawValue) -> Validated<&'static str> {
    let code = raw.as_text().trim().to_uppercase();
    state_name(&code).ok_or_else(|| Rejection::because(raw, "not a valid state"))
}

fn coordinate(raw: &RawValue, limit: f64, axis: &str) -> Validated<f64> {
    let value = parse_float(raw)?;
    if value < -limit || value > limit {
        return Err(Rejection::because(
            raw,
            format!(
                "{} is out of range. {} values must be between -{} and {} degrees.",
                raw, axis, limit, limit
            ),
        ));
    }
    Ok(value)
}

pub fn clean_latitude(raw: &RawValue) -> Validated<f64> {
    coordinate(raw, 90.0, "Latitude")
}

pub fn clean_longitude(raw: &RawValue) -> Validated<f64> {
    coordinate(raw, 180.0, "Longitude")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::text(s)
    }

    #[test]
    fn test_clean_address() {
        assert_eq!(
            clean_address(&text("  123   Main St.  ")),
            Ok("123 Main St".to_string())
        );
        assert_eq!(
            clean_address(&text("4500 Elm Avenue, Apt 2;")),
            Ok("4500 Elm Avenue, Apt 2".to_string())
        );
    }

    #[test]
    fn test_clean_address_rejections() {
        assert!(clean_address(&text("40.2659 -77.4948")).is_err());
        assert!(clean_address(&text("40.2659,-77.4948")).is_err());
        assert!(clean_address(&text("1,250")).is_err());
        assert!(clean_address(&text("950 square feet")).is_err());
        assert!(clean_address(&text("800 sq ft")).is_err());
        assert!(clean_address(&text("Main Street")).is_err());
        assert!(clean_address(&text("None")).is_err());
        assert!(clean_address(&text("   ")).is_err());
        assert!(clean_address(&RawValue::Missing).is_err());
    }

    #[test]
    fn test_clean_state() {
        assert_eq!(clean_state(&text("ca")), Ok("California"));
        assert_eq!(clean_state(&text(" TX ")), Ok("Texas"));

        let rejection = clean_state(&text("zz")).unwrap_err();
        assert_eq!(rejection.raw, text("zz"));
        assert!(clean_state(&text("DC")).is_err());
        assert!(clean_state(&RawValue::Missing).is_err());
    }

    #[test]
    fn test_clean_latitude() {
        assert_eq!(clean_latitude(&text("45.0")), Ok(45.0));
        assert_eq!(clean_latitude(&text("-90")), Ok(-90.0));
        assert_eq!(clean_latitude(&RawValue::Float(90.0)), Ok(90.0));

        let rejection = clean_latitude(&text("91.0")).unwrap_err();
        assert!(rejection.reason.unwrap().contains("out of range"));
        assert!(clean_latitude(&text("120.5")).is_err());
        assert!(clean_latitude(&text("north")).is_err());
    }

    #[test]
    fn test_clean_longitude() {
        assert_eq!(clean_longitude(&text("-122.3")), Ok(-122.3));
        assert_eq!(clean_longitude(&text("180")), Ok(180.0));

        let rejection = clean_longitude(&text("200.0")).unwrap_err();
        assert!(rejection.reason.unwrap().contains("out of range"));
        assert!(clean_longitude(&RawValue::Missing).is_err());
    }
}
