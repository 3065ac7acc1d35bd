//! Parsers for individual free-text fields of a roster record.
//!
//! Each parser reports a [`FieldError`] instead of failing the whole record;
//! the caller collects them into the profile's insufficiency.

use crate::core::profile::FieldError;
use crate::core::seeker::RankVector;
use crate::core::types::Gender;

/// Case-insensitive texts that unambiguously indicate a male
pub const MALE_TEXTS: &[&str] = &["m", "male", "man", "men"];

/// Case-insensitive texts that unambiguously indicate a female
pub const FEMALE_TEXTS: &[&str] = &["f", "female", "woman", "women"];

/// Case-insensitive texts a preceptor uses to state no gender preference
pub const NO_PREFERENCE_TEXTS: &[&str] = &[
    "none",
    "no preference",
    "no pref",
    "no",
    "any",
    "either",
    "n/a",
];

/// Case-insensitive affirmative answers
pub const YES_TEXTS: &[&str] = &["y", "yes"];

/// Case-insensitive negative answers
pub const NO_TEXTS: &[&str] = &["n", "no"];

fn is_one_of(text: &str, candidates: &[&str]) -> bool {
    candidates.iter().any(|c| c.eq_ignore_ascii_case(text))
}

/// Parse a student's gender from an exact synonym.
///
/// # Errors
///
/// Returns `FieldError::Blank` for an empty field or
/// `FieldError::UnknownGender` when the text is not a known synonym.
pub fn parse_gender(text: &str) -> Result<Gender, FieldError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FieldError::Blank);
    }
    if is_one_of(text, FEMALE_TEXTS) {
        return Ok(Gender::Female);
    }
    if is_one_of(text, MALE_TEXTS) {
        return Ok(Gender::Male);
    }
    Err(FieldError::UnknownGender(text.to_string()))
}

/// Parse a preceptor's gender preference.
///
/// Preferences are often written as phrases ("female preferred", "prefer men"),
/// so the text is split into words and the first word naming a gender wins,
/// with female synonyms checked before male ones.
///
/// # Errors
///
/// Returns `FieldError::Blank` for an empty field or
/// `FieldError::UnknownGenderPreference` when no gender can be identified.
pub fn parse_gender_preference(text: &str) -> Result<Option<Gender>, FieldError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FieldError::Blank);
    }
    if is_one_of(text, NO_PREFERENCE_TEXTS) {
        return Ok(None);
    }

    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    if words.iter().any(|w| is_one_of(w, FEMALE_TEXTS)) {
        return Ok(Some(Gender::Female));
    }
    if words.iter().any(|w| is_one_of(w, MALE_TEXTS)) {
        return Ok(Some(Gender::Male));
    }
    Err(FieldError::UnknownGenderPreference(text.to_string()))
}

/// Parse a yes/no language field (speaks / requires Spanish).
///
/// # Errors
///
/// Returns `FieldError::Blank` for an empty field or `FieldError::NotYesNo`
/// for anything other than a yes/no synonym.
pub fn parse_language(text: &str) -> Result<bool, FieldError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FieldError::Blank);
    }
    if is_one_of(text, YES_TEXTS) {
        return Ok(true);
    }
    if is_one_of(text, NO_TEXTS) {
        return Ok(false);
    }
    Err(FieldError::NotYesNo(text.to_string()))
}

/// Parse one rank per field and verify the ranks form a permutation of `1..=N`.
///
/// # Errors
///
/// Returns `FieldError::RankNotInteger` for a field that is not an integer,
/// or `FieldError::Rank` when the values are out of range or repeated.
pub fn parse_ranks(fields: &[&str]) -> Result<RankVector, FieldError> {
    let mut ranks = Vec::with_capacity(fields.len());
    for (position, text) in fields.iter().enumerate() {
        let text = text.trim();
        let rank: i64 = text.parse().map_err(|_| FieldError::RankNotInteger {
            text: text.to_string(),
            position,
        })?;
        ranks.push(rank);
    }
    Ok(RankVector::new(&ranks)?)
}

/// A non-empty pre-match field names the counterpart to bind to
#[must_use]
pub fn parse_pre_match(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seeker::RankError;

    #[test]
    fn test_parse_gender_synonyms() {
        for text in ["F", "female", "Woman", "WOMEN"] {
            assert_eq!(parse_gender(text), Ok(Gender::Female), "{text}");
        }
        for text in ["m", "Male", "MAN", "men"] {
            assert_eq!(parse_gender(text), Ok(Gender::Male), "{text}");
        }
        assert_eq!(parse_gender(""), Err(FieldError::Blank));
        assert_eq!(
            parse_gender("other"),
            Err(FieldError::UnknownGender("other".to_string()))
        );
    }

    #[test]
    fn test_parse_gender_preference() {
        assert_eq!(parse_gender_preference("None"), Ok(None));
        assert_eq!(parse_gender_preference("no preference"), Ok(None));
        assert_eq!(
            parse_gender_preference("Female preferred"),
            Ok(Some(Gender::Female))
        );
        assert_eq!(parse_gender_preference("prefer men"), Ok(Some(Gender::Male)));
        assert_eq!(parse_gender_preference("M"), Ok(Some(Gender::Male)));
        assert_eq!(parse_gender_preference("   "), Err(FieldError::Blank));
        assert!(matches!(
            parse_gender_preference("whoever"),
            Err(FieldError::UnknownGenderPreference(_))
        ));
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(parse_language("Y"), Ok(true));
        assert_eq!(parse_language("yes"), Ok(true));
        assert_eq!(parse_language("n"), Ok(false));
        assert_eq!(parse_language("NO"), Ok(false));
        assert_eq!(parse_language(""), Err(FieldError::Blank));
        assert_eq!(
            parse_language("some"),
            Err(FieldError::NotYesNo("some".to_string()))
        );
    }

    #[test]
    fn test_parse_ranks_permutation() {
        let ranks = parse_ranks(&["2", " 1", "4 ", "3"]).unwrap();
        assert_eq!(ranks.as_slice(), &[2, 1, 4, 3]);
    }

    #[test]
    fn test_parse_ranks_failures() {
        assert_eq!(
            parse_ranks(&["1", "x", "3"]),
            Err(FieldError::RankNotInteger {
                text: "x".to_string(),
                position: 1
            })
        );
        assert!(matches!(
            parse_ranks(&["1", "", "3"]),
            Err(FieldError::RankNotInteger { position: 1, .. })
        ));
        assert_eq!(
            parse_ranks(&["1", "2", "2"]),
            Err(FieldError::Rank(RankError::Duplicate { rank: 2 }))
        );
        assert!(matches!(
            parse_ranks(&["1", "2", "5"]),
            Err(FieldError::Rank(RankError::OutOfRange { rank: 5, .. }))
        ));
    }

    #[test]
    fn test_parse_pre_match() {
        assert_eq!(parse_pre_match("  "), None);
        assert_eq!(
            parse_pre_match(" Jane Doe "),
            Some("Jane Doe".to_string())
        );
    }
}
