//! Input validators and normalizers
//!
//! Pure parsing helpers used by the onboarding flow. Numeric parsing is
//! deliberately parse-only: any integer age and any float measurement are
//! accepted, and the re-prompt replies depend on that.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Known city spellings collapsed to a canonical display name
static CITY_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("bengaluru", "Bangalore"),
        ("bangalore", "Bangalore"),
        ("bombay", "Mumbai"),
        ("mumbai", "Mumbai"),
        ("madras", "Chennai"),
        ("chennai", "Chennai"),
        ("delhi", "Delhi"),
        ("new delhi", "Delhi"),
    ])
});

/// Relation keywords collapsed to a category
static RELATION_KEYWORDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("brother", "Sibling"),
        ("sister", "Sibling"),
        ("sibling", "Sibling"),
        ("mom", "Parent"),
        ("mother", "Parent"),
        ("mum", "Parent"),
        ("dad", "Parent"),
        ("father", "Parent"),
        ("husband", "Spouse"),
        ("wife", "Spouse"),
        ("spouse", "Spouse"),
        ("friend", "Friend"),
        ("buddy", "Friend"),
    ])
});

const CANONICAL_RELATIONS: &[&str] = &["Spouse", "Parent", "Sibling", "Friend"];

static NON_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z]").unwrap());

/// Integer parse of trimmed input. No range bound is enforced.
pub fn parse_age(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

/// Float parse of trimmed input (height/weight). No positivity check;
/// see DESIGN.md for the recorded decision.
pub fn parse_measurement(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Title-case each whitespace-separated word, lowering the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive alias lookup; unknown cities are title-cased verbatim.
pub fn normalize_city(city: &str) -> String {
    let key = city.trim().to_lowercase();
    match CITY_ALIASES.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => title_case(city.trim()),
    }
}

/// Normalize a relation word to one of Spouse/Parent/Sibling/Friend/Other.
///
/// Non-letters are stripped before the keyword lookup so "bro-in-law" style
/// punctuation does not defeat it. Input that already title-cases to a
/// canonical category is kept as-is.
pub fn normalize_relation(raw: &str) -> String {
    let key = NON_LETTERS.replace_all(raw, "").to_lowercase();
    if let Some(category) = RELATION_KEYWORDS.get(key.as_str()) {
        return (*category).to_string();
    }
    let titled = title_case(raw.trim());
    if CANONICAL_RELATIONS.contains(&titled.as_str()) {
        titled
    } else {
        "Other".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_parses_integers_only() {
        assert_eq!(parse_age(" 29 "), Some(29));
        assert_eq!(parse_age("abc"), None);
        assert_eq!(parse_age("29.5"), None);
    }

    #[test]
    fn measurement_parses_floats() {
        assert_eq!(parse_measurement("165"), Some(165.0));
        assert_eq!(parse_measurement(" 60.5 "), Some(60.5));
        assert_eq!(parse_measurement("tall"), None);
    }

    #[test]
    fn measurement_accepts_non_positive_values() {
        // No domain-range validation at the parser; BMI guards division.
        assert_eq!(parse_measurement("-5"), Some(-5.0));
        assert_eq!(parse_measurement("0"), Some(0.0));
    }

    #[test]
    fn city_aliases_collapse() {
        assert_eq!(normalize_city("Bengaluru"), "Bangalore");
        assert_eq!(normalize_city("bangalore"), "Bangalore");
        assert_eq!(normalize_city("BANGALORE"), "Bangalore");
        assert_eq!(normalize_city("bombay"), "Mumbai");
        assert_eq!(normalize_city("  new delhi "), "Delhi");
    }

    #[test]
    fn unknown_city_is_title_cased() {
        assert_eq!(normalize_city("pune"), "Pune");
        assert_eq!(normalize_city("navi mumbai east"), "Navi Mumbai East");
    }

    #[test]
    fn relation_keywords_map_to_categories() {
        assert_eq!(normalize_relation("brother"), "Sibling");
        assert_eq!(normalize_relation("Mother"), "Parent");
        assert_eq!(normalize_relation("WIFE"), "Spouse");
        assert_eq!(normalize_relation("buddy"), "Friend");
    }

    #[test]
    fn relation_strips_non_letters() {
        assert_eq!(normalize_relation(" bro ther! "), "Sibling");
        assert_eq!(normalize_relation("father."), "Parent");
    }

    #[test]
    fn canonical_relation_passes_through() {
        assert_eq!(normalize_relation("Friend"), "Friend");
        assert_eq!(normalize_relation("spouse"), "Spouse");
    }

    #[test]
    fn unrecognized_relation_is_other() {
        assert_eq!(normalize_relation("neighbour"), "Other");
        assert_eq!(normalize_relation("123"), "Other");
        assert_eq!(normalize_relation(""), "Other");
    }

    #[test]
    fn title_case_handles_mixed_input() {
        assert_eq!(title_case("alice"), "Alice");
        assert_eq!(title_case("rAJ kUMAR"), "Raj Kumar");
        assert_eq!(title_case(""), "");
    }
}
