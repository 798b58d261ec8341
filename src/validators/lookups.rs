//! Static reference data used by the validators.
//!
//! Everything here is immutable and initialised once; patterns are compiled
//! lazily on first use.

use once_cell::sync::Lazy;
use regex::Regex;

/// U.S. state abbreviations and full names
const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Names that count as a state-level region but are not in the state table
const EXTRA_REGION_NAMES: &[&str] = &["district of columbia", "washington dc", "dc"];

/// County phrases that stand in for a city, checked in order
const COUNTY_TO_CITY: &[(&str, &str)] = &[
    ("fulton county", "Atlanta"),
    ("henrico county", "Henrico"),
    ("montgomery county", "Rockville"),
    ("prince george county", "Upper Marlboro"),
    ("prince georges county", "Upper Marlboro"),
    ("los angeles county", "Los Angeles"),
    ("harris county", "Houston"),
    ("cook county", "Chicago"),
    ("dallas county", "Dallas"),
    ("orange county", "Orlando"),
];

/// Leading-token abbreviations in city names
const CITY_ABBREVIATIONS: &[(&str, &str)] = &[
    ("st", "saint"),
    ("ft", "fort"),
    ("mt", "mount"),
    ("slc", "salt lake city"),
];

/// URLs and bare domains
pub static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(https?://|www\.|\.(com|net|org|edu|gov|io|co|us)\b)").unwrap()
});

/// "40.7, -73.9" or "40.7 -73.9"
pub static COORDINATE_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-?\d+(?:\.\d+)?\s*[, ]\s*-?\d+(?:\.\d+)?\s*$").unwrap()
});

pub static NUMERIC_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-?\d+(?:\.\d+)?\s*$").unwrap());

/// Characters a city name may be made of
pub static CITY_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z .'\-]+$").unwrap());

/// Standalone "O" token before a name ("O Fallon")
pub static O_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bO\s+([A-Za-z])").unwrap());

/// Standalone "Mc" token before a name ("Mc Donald")
pub static MC_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bMc\s+([A-Za-z])").unwrap());

pub static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Full state name for a 2-letter abbreviation (case-insensitive)
pub fn state_name(abbrev: &str) -> Option<&'static str> {
    let wanted = abbrev.trim();
    STATES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(wanted))
        .map(|(_, name)| *name)
}

/// 2-letter abbreviation for a full state name (case-insensitive)
pub fn state_abbreviation(name: &str) -> Option<&'static str> {
    let wanted = name.trim();
    STATES
        .iter()
        .find(|(_, full)| full.eq_ignore_ascii_case(wanted))
        .map(|(code, _)| *code)
}

/// Whether a lowercase string is exactly a state, DC or territory-level name
pub fn is_region_name(lower: &str) -> bool {
    state_abbreviation(lower).is_some() || EXTRA_REGION_NAMES.contains(&lower)
}

/// City mapped from the first known county phrase contained in `lower`
pub fn county_city(lower: &str) -> Option<&'static str> {
    COUNTY_TO_CITY
        .iter()
        .find(|(county, _)| lower.contains(county))
        .map(|(_, city)| *city)
}

/// Expansion for a lowercase city-name abbreviation
pub fn expand_abbreviation(token: &str) -> Option<&'static str> {
    CITY_ABBREVIATIONS
        .iter()
        .find(|(abbrev, _)| *abbrev == token)
        .map(|(_, full)| *full)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_lookup_both_ways() {
        assert_eq!(state_name("ca"), Some("California"));
        assert_eq!(state_name(" NY "), Some("New York"));
        assert_eq!(state_name("DC"), None);
        assert_eq!(state_abbreviation("north dakota"), Some("ND"));
        assert_eq!(state_abbreviation("Atlantis"), None);
        assert_eq!(STATES.len(), 50);
    }

    #[test]
    fn test_region_names() {
        assert!(is_region_name("texas"));
        assert!(is_region_name("washington dc"));
        assert!(is_region_name("district of columbia"));
        assert!(!is_region_name("austin"));
    }

    #[test]
    fn test_county_lookup() {
        assert_eq!(county_city("fulton county, ga"), Some("Atlanta"));
        assert_eq!(county_city("north harris county"), Some("Houston"));
        assert_eq!(county_city("prince georges county"), Some("Upper Marlboro"));
        assert_eq!(county_city("fulton"), None);
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(expand_abbreviation("st"), Some("saint"));
        assert_eq!(expand_abbreviation("slc"), Some("salt lake city"));
        assert_eq!(expand_abbreviation("saint"), None);
    }

    #[test]
    fn test_patterns() {
        assert!(URL_PATTERN.is_match("www.rentals.com"));
        assert!(URL_PATTERN.is_match("HTTP://x"));
        assert!(COORDINATE_PAIR.is_match("40.7, -73.9"));
        assert!(COORDINATE_PAIR.is_match("40.7 -73.9"));
        assert!(NUMERIC_ONLY.is_match(" -12.5 "));
        assert!(CITY_CHARS.is_match("Coeur d'Alene"));
        assert!(!CITY_CHARS.is_match("Austin, TX"));
    }
}
