use thiserror::Error;

use crate::core::host::{Host, HostTraits};
use crate::core::profile::{FieldIssue, Identity, Status};
use crate::core::seeker::{Seeker, SeekerTraits};
use crate::parsing::fields::{
    parse_gender, parse_gender_preference, parse_language, parse_pre_match, parse_ranks,
};
use crate::parsing::lexicon::category_masks;
use crate::parsing::schema::{HostLayout, SchemaError, SeekerLayout};
use crate::utils::validation::ValidationError;

/// Record fields are separated by semicolons, since comments often contain commas
pub const FIELD_DELIMITER: char = ';';

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid roster content: {0}")]
    Content(#[from] ValidationError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("No lines of data in {0}")]
    Empty(String),

    #[error("Record on line {line} has {found} fields, at least {required} required:\n  {record}")]
    FieldCount {
        line: usize,
        found: usize,
        required: usize,
        record: String,
    },

    #[error("Too many records: {0} exceeds maximum allowed (100000)")]
    TooManyRecords(usize),
}

/// Split a record into trimmed fields, requiring at least `required` of them.
///
/// A short record means the file itself is malformed, so this is fatal
/// rather than a per-profile warning.
///
/// # Errors
///
/// Returns `ParseError::FieldCount` when the record has fewer than `required` fields.
pub fn split_record(record: &str, required: usize, line: usize) -> Result<Vec<&str>, ParseError> {
    let fields: Vec<&str> = record.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() < required {
        return Err(ParseError::FieldCount {
            line,
            found: fields.len(),
            required,
            record: record.to_string(),
        });
    }
    Ok(fields)
}

/// Build a student profile from split fields.
///
/// Every field is parsed independently so that all problems are reported at
/// once. The pre-match field is kept even when the profile is insufficient.
#[must_use]
pub fn parse_seeker(fields: &[&str], layout: &SeekerLayout) -> Seeker {
    let field = |i: usize| fields.get(i).copied().unwrap_or("");
    let group = |positions: &[usize]| positions.iter().map(|&i| field(i)).collect::<Vec<_>>();

    let mut issues = Vec::new();

    let gender = parse_gender(field(layout.gender))
        .map_err(|e| issues.push(FieldIssue::new("gender", e)))
        .ok();
    let speaks_language = parse_language(field(layout.language))
        .map_err(|e| issues.push(FieldIssue::new("language", e)))
        .ok();
    let practice_ranks = parse_ranks(&group(&layout.practice_ranks))
        .map_err(|e| issues.push(FieldIssue::new("practice ranks", e)))
        .ok();
    let setting_ranks = parse_ranks(&group(&layout.setting_ranks))
        .map_err(|e| issues.push(FieldIssue::new("setting ranks", e)))
        .ok();

    let traits = match (gender, speaks_language, practice_ranks, setting_ranks) {
        (Some(gender), Some(speaks_language), Some(practice_ranks), Some(setting_ranks)) => {
            Some(SeekerTraits {
                gender,
                speaks_language,
                practice_ranks,
                setting_ranks,
            })
        }
        _ => None,
    };

    Seeker {
        identity: Identity::new(field(layout.last_name), field(layout.first_name)),
        home: field(layout.home).to_string(),
        comments: field(layout.comments).to_string(),
        pre_match: parse_pre_match(field(layout.pre_match)),
        status: Status::from_parts(traits, issues),
    }
}

/// Build a preceptor profile from split fields, returning lexicon warnings alongside.
///
/// Unrecognized category text only produces warnings; gender preference and
/// language failures make the profile insufficient.
#[must_use]
pub fn parse_host(fields: &[&str], layout: &HostLayout) -> (Host, Vec<String>) {
    let field = |i: usize| fields.get(i).copied().unwrap_or("");

    let mut issues = Vec::new();

    let gender_preference = parse_gender_preference(field(layout.gender_preference))
        .map_err(|e| issues.push(FieldIssue::new("gender preference", e)))
        .ok();
    let requires_language = parse_language(field(layout.language))
        .map_err(|e| issues.push(FieldIssue::new("language", e)))
        .ok();

    let practice_type = field(layout.practice_types);
    let masks = category_masks(practice_type, field(layout.practice_region));

    let traits = match (gender_preference, requires_language) {
        (Some(gender_preference), Some(requires_language)) => Some(HostTraits {
            gender_preference,
            requires_language,
            practice_mask: masks.practice,
            setting_mask: masks.setting,
        }),
        _ => None,
    };

    let host = Host {
        identity: Identity::new(field(layout.last_name), field(layout.first_name)),
        practice_type: practice_type.to_string(),
        location: field(layout.location).to_string(),
        preferred_day: field(layout.preferred_day).to_string(),
        secondary_day: field(layout.secondary_day).to_string(),
        comments: field(layout.comments).to_string(),
        pre_match: parse_pre_match(field(layout.pre_match)),
        status: Status::from_parts(traits, issues),
    };

    (host, masks.warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{FieldError, Profile};
    use crate::core::types::{Gender, Setting};
    use crate::parsing::schema::RosterSchema;

    const STUDENT: &str =
        "Doe; Jane; F; 1; 2; 3; 4; 4; 3; 2; 1; yes; Amherst; likes kids; ";
    const PRECEPTOR: &str =
        "Smith; Alex; Pedi/FP; Northampton; Urban 20-30%; None; N; Tuesday; Friday; ; ";

    #[test]
    fn test_split_record_short_is_fatal() {
        let err = split_record("a;b;c", 5, 7).unwrap_err();
        assert!(matches!(
            err,
            ParseError::FieldCount {
                line: 7,
                found: 3,
                required: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_split_record_trims() {
        let fields = split_record(" a ; b;c ;", 3, 1).unwrap();
        assert_eq!(fields, vec!["a", "b", "c", ""]);
    }

    #[test]
    fn test_parse_seeker_complete() {
        let schema = RosterSchema::load_embedded().unwrap();
        let fields = split_record(STUDENT, schema.seeker.required_fields(), 2).unwrap();
        let seeker = parse_seeker(&fields, &schema.seeker);

        assert_eq!(seeker.name(), "Doe, Jane");
        assert_eq!(seeker.home, "Amherst");
        assert_eq!(seeker.pre_match, None);

        let traits = seeker.traits().unwrap();
        assert_eq!(traits.gender, Gender::Female);
        assert!(traits.speaks_language);
        assert_eq!(traits.practice_ranks.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(traits.setting_ranks.as_slice(), &[4, 3, 2, 1]);
    }

    #[test]
    fn test_parse_seeker_collects_every_issue() {
        let schema = RosterSchema::load_embedded().unwrap();
        let record = "Roe; Sam; ?; 1; 1; 3; 4; 4; 3; 2; 1; maybe; ; ; Smith, Alex";
        let fields = split_record(record, schema.seeker.required_fields(), 3).unwrap();
        let seeker = parse_seeker(&fields, &schema.seeker);

        assert!(!seeker.is_pairable());
        let issues = &seeker.status.insufficiency().unwrap().issues;
        let names: Vec<&str> = issues.iter().map(|i| i.field).collect();
        assert_eq!(names, vec!["gender", "language", "practice ranks"]);

        // Pre-match directive survives an insufficient profile
        assert_eq!(seeker.pre_match(), Some("Smith, Alex"));
    }

    #[test]
    fn test_parse_host_complete() {
        let schema = RosterSchema::load_embedded().unwrap();
        let fields = split_record(PRECEPTOR, schema.host.required_fields(), 2).unwrap();
        let (host, warnings) = parse_host(&fields, &schema.host);

        assert!(warnings.is_empty());
        assert_eq!(host.location, "Northampton");
        assert_eq!(host.practice_type, "Pedi/FP");
        assert_eq!(host.preferred_day, "Tuesday");

        let traits = host.traits().unwrap();
        assert_eq!(traits.gender_preference, None);
        assert!(!traits.requires_language);
        assert!((traits.practice_mask.get(0) - 0.5).abs() < 1e-9);
        assert!((traits.setting_mask.get(Setting::Urban.index()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_host_blank_preference_is_insufficient() {
        let schema = RosterSchema::load_embedded().unwrap();
        let record = "Smith; Alex; Surgery; Boston; Urban; ; Y; Mon; ; ; ";
        let fields = split_record(record, schema.host.required_fields(), 2).unwrap();
        let (host, warnings) = parse_host(&fields, &schema.host);

        assert!(!host.is_pairable());
        assert_eq!(
            host.status.insufficiency().unwrap().issues[0].error,
            FieldError::Blank
        );
        assert_eq!(warnings.len(), 1);
    }
}
