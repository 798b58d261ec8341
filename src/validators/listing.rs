//! Validators for listing attributes, pricing and provenance columns.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Rejection, Validated};
use crate::types::RawValue;

const MISSING_REASON: &str = "missing value";

/// Room-count values that are known junk from column shifts in the source data
const ROOM_COUNT_JUNK: &[&str] = &["nan", "no", "thumbnail"];

static CATEGORY_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(ousing|ing)").unwrap());

static PRICE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9.]+").unwrap());

static PLAIN_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").unwrap());

/// Pet policy derived from the pets_allowed column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetPolicy {
    CatsAndDogs,
    Cats,
    Dogs,
    NoPets,
}

impl PetPolicy {
    pub fn label(self) -> &'static str {
        match self {
            PetPolicy::CatsAndDogs => "Cats&Dogs",
            PetPolicy::Cats => "Cats",
            PetPolicy::Dogs => "Dogs",
            PetPolicy::NoPets => "X",
        }
    }
}

/// Billing period from the price_type column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceType {
    Monthly,
    Weekly,
}

impl PriceType {
    pub fn label(self) -> &'static str {
        match self {
            PriceType::Monthly => "monthly",
            PriceType::Weekly => "weekly",
        }
    }
}

/// Parse a cell as a finite float
pub(crate) fn parse_float(raw: &RawValue) -> Validated<f64> {
    let value = match raw {
        RawValue::Missing => return Err(Rejection::because(raw, MISSING_REASON)),
        RawValue::Integer(i) => *i as f64,
        RawValue::Float(f) => *f,
        RawValue::Bool(b) => f64::from(u8::from(*b)),
        RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| Rejection::new(raw))?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(Rejection::because(raw, "not a finite number"))
    }
}

pub fn clean_id(raw: &RawValue) -> Validated<i64> {
    match raw {
        RawValue::Integer(i) => Ok(*i),
        RawValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(*f as i64),
        RawValue::Text(s) => s.trim().parse::<i64>().map_err(|_| Rejection::new(raw)),
        _ => Err(Rejection::new(raw)),
    }
}

/// Lowercased `/`-separated category path, with truncated "housing" prefixes repaired
pub fn clean_category(raw: &RawValue) -> Validated<Vec<String>> {
    if raw.is_missing() {
        return Err(Rejection::because(raw, MISSING_REASON));
    }

    let lowered = raw.as_text().to_lowercase();
    let parts: Vec<String> = lowered
        .trim()
        .split('/')
        .map(|p| CATEGORY_PREFIX.replace(p.trim(), "housing").into_owned())
        .collect();

    if parts.iter().any(|p| p == "2") {
        return Err(Rejection::because(raw, "category segment '2'"));
    }

    Ok(parts)
}

pub fn clean_amenities(raw: &RawValue) -> Validated<Vec<String>> {
    let lowered = raw.as_text().to_lowercase();
    let parts: Vec<String> = lowered
        .trim()
        .split('/')
        .flat_map(|p| p.split(','))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if parts.iter().any(|p| p == "nan") {
        return Err(Rejection::because(raw, "nan"));
    }

    Ok(parts)
}

fn parse_room_count(raw: &RawValue, junk: &[&str]) -> Validated<i64> {
    let value = raw.as_text().trim().to_lowercase();

    if ROOM_COUNT_JUNK.contains(&value.as_str()) || junk.contains(&value.as_str()) {
        return Err(Rejection::new(raw));
    }

    let count = value.parse::<f64>().map_err(|_| Rejection::new(raw))?;
    if !count.is_finite() || count.abs() >= i64::MAX as f64 {
        return Err(Rejection::new(raw));
    }

    // "2.0" and "1.5" both count toward the integer part
    Ok(count.trunc() as i64)
}

pub fn clean_bathrooms(raw: &RawValue) -> Validated<i64> {
    parse_room_count(raw, &[])
}

pub fn clean_bedrooms(raw: &RawValue) -> Validated<i64> {
    parse_room_count(raw, &["cats,dogs"])
}

pub fn clean_currency(raw: &RawValue) -> Validated<String> {
    let code = raw.as_text().trim().to_uppercase();
    if code == "USD" {
        Ok(code)
    } else {
        Err(Rejection::new(raw))
    }
}

pub fn clean_fee(raw: &RawValue) -> Validated<bool> {
    match raw.as_text().trim().to_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(Rejection::new(raw)),
    }
}

pub fn clean_has_photo(raw: &RawValue) -> Validated<bool> {
    match raw.as_text().trim().to_lowercase().as_str() {
        "yes" | "thumbnail" => Ok(true),
        "no" => Ok(false),
        _ => Err(Rejection::new(raw)),
    }
}

/// Classify a pets_allowed cell
///
/// Returns `Ok(None)` when the cell has tokens but none of them name a policy.
pub fn clean_pets_allowed(raw: &RawValue) -> Validated<Option<PetPolicy>> {
    let value = raw.as_text().trim().to_lowercase();

    let numeric = !value.is_empty() && value.chars().all(char::is_numeric);
    if value == "nan" || numeric {
        return Err(Rejection::new(raw));
    }

    let tokens: Vec<&str> = value
        .split([',', '/'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let has = |name: &str| tokens.iter().any(|t| *t == name);

    let policy = match (has("cats"), has("dogs")) {
        (true, true) => Some(PetPolicy::CatsAndDogs),
        (true, false) => Some(PetPolicy::Cats),
        (false, true) => Some(PetPolicy::Dogs),
        (false, false) if has("none") => Some(PetPolicy::NoPets),
        (false, false) => None,
    };

    Ok(policy)
}

pub fn clean_price(raw: &RawValue) -> Validated<f64> {
    parse_float(raw)
}

/// Numeric price from display text; ranges like "$900-$950" average their ends
pub fn clean_price_display(raw: &RawValue) -> Validated<f64> {
    if raw.is_missing() {
        return Err(Rejection::because(raw, MISSING_REASON));
    }

    let text = raw.as_text();
    let stripped = text.trim().replace(['$', ','], "");

    let numbers = PRICE_NUMBER
        .find_iter(stripped.trim())
        .map(|m| m.as_str().parse::<f64>())
        .collect::<std::result::Result<Vec<f64>, _>>()
        .map_err(|_| Rejection::new(raw))?;

    match numbers.as_slice() {
        [] => Err(Rejection::because(raw, "no numeric value")),
        [single] => Ok(*single),
        many => Ok(many.iter().sum::<f64>() / many.len() as f64),
    }
}

pub fn clean_price_type(raw: &RawValue) -> Validated<PriceType> {
    let value = raw.as_text().trim().to_lowercase();
    if value.contains("monthly") {
        Ok(PriceType::Monthly)
    } else if value.contains("weekly") {
        Ok(PriceType::Weekly)
    } else {
        Err(Rejection::because(raw, "neither monthly nor weekly"))
    }
}

pub fn clean_square_feet(raw: &RawValue) -> Validated<f64> {
    if raw.is_missing() {
        return Err(Rejection::because(raw, MISSING_REASON));
    }

    let text = raw.as_text();
    let value = text.trim();
    if !PLAIN_DECIMAL.is_match(value) {
        return Err(Rejection::new(raw));
    }

    value.parse::<f64>().map_err(|_| Rejection::new(raw))
}

pub fn clean_source(raw: &RawValue) -> Validated<String> {
    if raw.is_missing() {
        return Err(Rejection::because(raw, MISSING_REASON));
    }
    Ok(raw.as_text().trim().to_lowercase())
}

pub fn clean_time(raw: &RawValue) -> Validated<String> {
    if raw.is_missing() {
        return Err(Rejection::because(raw, MISSING_REASON));
    }
    Ok(raw.as_text())
}
