//! City-name normalization.
//!
//! Free-text city fields mix real names with coordinates, URLs, county names
//! and bare state names. Each stage below guards against one of those, so
//! later stages can assume well-formed input:
//!
//! 1. blank guard (blank is "no city", not bad data)
//! 2. structural rejection (URL, coordinate pair, numeric-only)
//! 3. character-set gate
//! 4. lexical normalization (abbreviations, "O "/"Mc " prefixes, spacing)
//! 5. county substitution (short-circuits everything after it)
//! 6. bare state-name rejection
//! 7. capitalization

use super::lookups::{
    county_city, expand_abbreviation, is_region_name, CITY_CHARS, COORDINATE_PAIR, MC_PREFIX,
    NUMERIC_ONLY, O_PREFIX, URL_PATTERN, WHITESPACE,
};
use super::{Rejection, Validated};
use crate::types::RawValue;

const BLANK_TOKENS: &[&str] = &["nan", "none", "null", "n/a"];

const PUNCTUATION_TRIM: &[char] = &[' ', ',', '.', ';', '-'];

/// Normalize a raw city cell
///
/// `Ok(None)` means the cell is legitimately empty; `Err` means it held
/// something that is not a city.
pub fn clean_city_name(raw: &RawValue) -> Validated<Option<String>> {
    let text = raw.as_text();
    let trimmed = text.trim();

    if is_blank_city(trimmed) {
        return Ok(None);
    }

    let collapsed = collapse_whitespace(trimmed);

    if let Some(reason) = structural_problem(&collapsed) {
        return Err(Rejection::because(raw, reason));
    }

    // A known county phrase is trusted even when punctuation around it
    // ("Fulton County, GA") would fail the character gate.
    if !CITY_CHARS.is_match(&collapsed) && county_city(&collapsed.to_lowercase()).is_none() {
        return Err(Rejection::because(raw, "characters not allowed in a city name"));
    }

    let normalized = normalize_lexically(&collapsed);
    let lower = normalized.to_lowercase();

    if let Some(city) = county_city(&lower) {
        return Ok(Some(city.to_string()));
    }

    if is_region_name(&lower) {
        return Err(Rejection::because(raw, "state name instead of a city"));
    }

    let capitalized = capitalize_city(&normalized);
    if !capitalized.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(Rejection::because(raw, "no letters"));
    }

    Ok(Some(capitalized))
}

/// Stage 1: empty or a placeholder token
pub fn is_blank_city(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || BLANK_TOKENS.iter().any(|t| value.eq_ignore_ascii_case(t))
}

/// Stage 2: reason the value is structurally not a city name, if any
pub fn structural_problem(value: &str) -> Option<&'static str> {
    if URL_PATTERN.is_match(value) {
        Some("looks like a URL")
    } else if COORDINATE_PAIR.is_match(value) {
        Some("looks like a coordinate pair")
    } else if NUMERIC_ONLY.is_match(value) {
        Some("numeric only")
    } else {
        None
    }
}

/// Stage 4: expand a leading abbreviation, repair split prefixes, tidy spacing
pub fn normalize_lexically(value: &str) -> String {
    let expanded = expand_leading_abbreviation(value);
    let repaired = O_PREFIX.replace_all(&expanded, "O'$1");
    let repaired = MC_PREFIX.replace_all(&repaired, "Mc$1");
    collapse_whitespace(&repaired)
        .trim_matches(PUNCTUATION_TRIM)
        .to_string()
}

fn expand_leading_abbreviation(value: &str) -> String {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return value.to_string();
    };

    let key = first.to_lowercase();
    if let Some(full) = expand_abbreviation(key.trim_matches(|c| c == '.' || c == ',')) {
        tokens[0] = full;
    }
    tokens.join(" ")
}

/// Stage 7: capitalize each token, keeping short all-caps tokens ("NY") as is
pub fn capitalize_city(value: &str) -> String {
    value
        .split_whitespace()
        .map(|token| {
            if is_short_acronym(token) {
                token.to_string()
            } else {
                capitalize_token(token)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_short_acronym(token: &str) -> bool {
    token.chars().count() <= 3
        && token.chars().any(char::is_alphabetic)
        && !token.chars().any(char::is_lowercase)
}

/// Uppercase the first character and lowercase the rest
fn capitalize_token(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn collapse_whitespace(value: &str) -> String {
    WHITESPACE.replace_all(value, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(s: &str) -> Validated<Option<String>> {
        clean_city_name(&RawValue::text(s))
    }

    fn ok(s: &str) -> Validated<Option<String>> {
        Ok(Some(s.to_string()))
    }

    #[test]
    fn test_blank_values_are_no_city() {
        assert_eq!(city("  "), Ok(None));
        assert_eq!(city(""), Ok(None));
        assert_eq!(city("N/A"), Ok(None));
        assert_eq!(city("NULL"), Ok(None));
        assert_eq!(clean_city_name(&RawValue::Missing), Ok(None));
    }

    #[test]
    fn test_abbreviation_expansion() {
        assert_eq!(city("St Louis"), ok("Saint Louis"));
        assert_eq!(city("st. petersburg"), ok("Saint Petersburg"));
        assert_eq!(city("Ft Worth"), ok("Fort Worth"));
        assert_eq!(city("MT. Pleasant"), ok("Mount Pleasant"));
        assert_eq!(city("SLC"), ok("Salt Lake City"));
        // Only the first token is expanded
        assert_eq!(city("East St Louis"), ok("East St Louis"));
    }

    #[test]
    fn test_prefix_repair() {
        assert_eq!(normalize_lexically("O  Fallon"), "O'Fallon");
        assert_eq!(normalize_lexically("Mc Donald"), "McDonald");
        assert_eq!(normalize_lexically("Mc Kees Rocks"), "McKees Rocks");
    }

    #[test]
    fn test_county_short_circuit() {
        assert_eq!(city("Fulton County, GA"), ok("Atlanta"));
        assert_eq!(city("harris county"), ok("Houston"));
        assert_eq!(city("Prince Georges County"), ok("Upper Marlboro"));
    }

    #[test]
    fn test_bare_state_names_rejected() {
        let rejection = city("Texas").unwrap_err();
        assert_eq!(rejection.raw, RawValue::text("Texas"));
        assert!(city("new york").is_err());
        assert!(city("Washington DC").is_err());
        assert!(city("DC").is_err());
    }

    #[test]
    fn test_structural_rejections() {
        assert!(city("www.apartments.com").is_err());
        assert!(city("http://example.org/city").is_err());
        assert!(city("40.7128, -74.0060").is_err());
        assert!(city("40.7128 -74.0060").is_err());
        assert!(city("12345").is_err());
    }

    #[test]
    fn test_character_gate() {
        assert!(city("Austin, TX").is_err());
        assert!(city("Apt #4").is_err());
        assert!(city("Zürich").is_err());
    }

    #[test]
    fn test_capitalization() {
        assert_eq!(city("san FRANCISCO"), ok("San Francisco"));
        assert_eq!(city("new york NY"), ok("New York NY"));
        assert_eq!(city("winston-salem"), ok("Winston-salem"));
        assert_eq!(city("  coeur   d'alene "), ok("Coeur D'alene"));
    }

    #[test]
    fn test_capitalization_lowercases_after_first_letter() {
        // Prefix repair happens in stage 4; stage 7 still capitalizes plainly
        assert_eq!(city("O Fallon"), ok("O'fallon"));
        assert_eq!(city("Mc Donald"), ok("Mcdonald"));
        assert_eq!(city("mcallen"), ok("Mcallen"));
        assert_eq!(city("MCKINNEY"), ok("Mckinney"));
        assert_eq!(city("o'neill"), ok("O'neill"));
    }

    #[test]
    fn test_no_letters_rejected() {
        assert!(city("- . -").is_err());
        assert!(city("...").is_err());
    }

    #[test]
    fn test_stage_helpers() {
        assert!(is_blank_city(" none "));
        assert!(!is_blank_city("Nome"));
        assert_eq!(structural_problem("12.5"), Some("numeric only"));
        assert_eq!(structural_problem("Boise"), None);
        assert_eq!(capitalize_city("NYC boise"), "NYC Boise");
    }
}
