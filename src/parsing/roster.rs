//! Reading student and preceptor roster files.
//!
//! Rosters are `;`-delimited text with one header line. Files ending in
//! `.gz` are decompressed on the fly.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::{info, warn};

use crate::core::host::Host;
use crate::core::profile::Profile;
use crate::core::roster::Roster;
use crate::core::seeker::Seeker;
use crate::parsing::record::{parse_host, parse_seeker, split_record, ParseError};
use crate::parsing::schema::{HostLayout, RosterSchema, SeekerLayout};
use crate::utils::validation::{check_record_limit, validate_text_content};

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read a roster file into memory, decompressing if needed
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or decompressed, or
/// `ParseError::Content` if it does not look like UTF-8 text.
pub fn read_roster_text(path: &Path) -> Result<String, ParseError> {
    let raw = std::fs::read(path)?;
    let bytes = if is_gzipped(path) {
        let mut decoded = Vec::new();
        GzDecoder::new(raw.as_slice()).read_to_end(&mut decoded)?;
        decoded
    } else {
        raw
    };
    Ok(validate_text_content(&bytes)?.to_string())
}

/// Data lines of a roster: header skipped, blank lines dropped, 1-based line numbers kept
fn data_lines<'a>(
    text: &'a str,
    source: &str,
) -> Result<impl Iterator<Item = (usize, &'a str)>, ParseError> {
    let mut lines = text.lines().enumerate();
    if lines.next().is_none() {
        return Err(ParseError::Empty(source.to_string()));
    }
    Ok(lines
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty()))
}

/// Parse student records from roster text
///
/// # Errors
///
/// Returns `ParseError::Empty` if there is no header line,
/// `ParseError::FieldCount` for a structurally short record, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_seekers(text: &str, layout: &SeekerLayout) -> Result<Vec<Seeker>, ParseError> {
    let required = layout.required_fields();
    let mut seekers = Vec::new();

    for (line, record) in data_lines(text, "student roster")? {
        let fields = split_record(record, required, line)?;
        let seeker = parse_seeker(&fields, layout);

        if let Some(reason) = seeker.status.insufficiency() {
            warn!(
                "Unable to read complete profile from record for student {}: {}",
                seeker.name(),
                reason
            );
        }

        if check_record_limit(seekers.len()).is_some() {
            return Err(ParseError::TooManyRecords(seekers.len()));
        }
        seekers.push(seeker);
    }

    Ok(seekers)
}

/// Parse preceptor records from roster text
///
/// # Errors
///
/// Returns `ParseError::Empty` if there is no header line,
/// `ParseError::FieldCount` for a structurally short record, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_hosts(text: &str, layout: &HostLayout) -> Result<Vec<Host>, ParseError> {
    let required = layout.required_fields();
    let mut hosts = Vec::new();

    for (line, record) in data_lines(text, "preceptor roster")? {
        let fields = split_record(record, required, line)?;
        let (host, warnings) = parse_host(&fields, layout);

        for warning in &warnings {
            warn!("Preceptor {}: {}", host.name(), warning);
        }
        if let Some(reason) = host.status.insufficiency() {
            warn!(
                "Unable to read complete profile from record for preceptor {}: {}",
                host.name(),
                reason
            );
        }

        if check_record_limit(hosts.len()).is_some() {
            return Err(ParseError::TooManyRecords(hosts.len()));
        }
        hosts.push(host);
    }

    Ok(hosts)
}

/// Read both roster files into a [`Roster`]
///
/// # Errors
///
/// Returns the first `ParseError` encountered in either file.
pub fn load_roster(
    students: &Path,
    preceptors: &Path,
    schema: &RosterSchema,
) -> Result<Roster, ParseError> {
    let seekers = parse_seekers(&read_roster_text(students)?, &schema.seeker)?;
    let hosts = parse_hosts(&read_roster_text(preceptors)?, &schema.host)?;

    info!(
        "Loaded {} students ({} pairable) and {} preceptors ({} pairable)",
        seekers.len(),
        seekers.iter().filter(|s| s.is_pairable()).count(),
        hosts.len(),
        hosts.iter().filter(|h| h.is_pairable()).count(),
    );

    Ok(Roster::new(seekers, hosts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STUDENTS: &str = "\
Last;First;Gender;Pedi;FP;Int;Ger;Rural;Suburban;Urban;Underserved;Spanish;Home;Comments;PreMatch
Doe;Jane;F;1;2;3;4;4;3;2;1;yes;Amherst;;

Roe;Sam;M;1;1;3;4;4;3;2;1;no;Hadley;;
";

    const PRECEPTORS: &str = "\
Last;First;Type;Location;Region;Gender;Spanish;Day;Day2;Comments;PreMatch
Smith;Alex;FP;Northampton;Urban;none;n;Tue;;;
";

    #[test]
    fn test_parse_seekers_skips_header_and_blank_lines() {
        let schema = RosterSchema::load_embedded().unwrap();
        let seekers = parse_seekers(STUDENTS, &schema.seeker).unwrap();
        assert_eq!(seekers.len(), 2);
        assert!(seekers[0].is_pairable());
        // Duplicate rank makes the second student unpairable, not fatal
        assert!(!seekers[1].is_pairable());
    }

    #[test]
    fn test_parse_hosts() {
        let schema = RosterSchema::load_embedded().unwrap();
        let hosts = parse_hosts(PRECEPTORS, &schema.host).unwrap();
        assert_eq!(hosts.len(), 1);
        assert_eq!(hosts[0].name(), "Smith, Alex");
    }

    #[test]
    fn test_short_record_reports_line_number() {
        let schema = RosterSchema::load_embedded().unwrap();
        let text = "header\nSmith;Alex;FP\n";
        let err = parse_hosts(text, &schema.host).unwrap_err();
        assert!(matches!(err, ParseError::FieldCount { line: 2, .. }));
    }

    #[test]
    fn test_empty_text_is_fatal() {
        let schema = RosterSchema::load_embedded().unwrap();
        assert!(matches!(
            parse_seekers("", &schema.seeker),
            Err(ParseError::Empty(_))
        ));
    }

    #[test]
    fn test_header_only_roster_is_empty_pool() {
        let schema = RosterSchema::load_embedded().unwrap();
        let seekers = parse_seekers("Last;First\n", &schema.seeker).unwrap();
        assert!(seekers.is_empty());
    }

    #[test]
    fn test_read_gzipped_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preceptors.csv.gz");
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(PRECEPTORS.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let text = read_roster_text(&path).unwrap();
        assert_eq!(text, PRECEPTORS);
    }
}
