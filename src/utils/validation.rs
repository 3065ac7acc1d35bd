//! Centralized validation and helper functions.

/// Maximum number of records allowed in a single roster file
pub const MAX_RECORDS: usize = 100_000;

/// Minimum size of a roster file: at least a header line
pub const MIN_FILE_CONTENT_SIZE: usize = 1;

/// Safely convert usize to f64 for averages and fractions
#[inline]
#[must_use]
pub fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_record_limit(seekers.len()).is_some() {
///     return Err(...);
/// }
/// seekers.push(new_seeker); // Safe to add
/// ```
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Content validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File is empty")]
    EmptyFile,
    #[error("File content appears to be binary, not delimited text")]
    BinaryContent,
    #[error("File content is not valid UTF-8")]
    InvalidEncoding,
}

/// Validate that roster content looks like delimited text
///
/// - Must hold at least [`MIN_FILE_CONTENT_SIZE`] bytes
/// - At most 5% non-printable bytes (spreadsheet exports sometimes carry a few)
/// - Must be valid UTF-8
///
/// # Errors
///
/// Returns `ValidationError::EmptyFile` if the content is too small,
/// `ValidationError::BinaryContent` if it holds too many non-printable bytes, or
/// `ValidationError::InvalidEncoding` if it fails UTF-8 validation.
pub fn validate_text_content(content: &[u8]) -> Result<&str, ValidationError> {
    if content.len() < MIN_FILE_CONTENT_SIZE {
        return Err(ValidationError::EmptyFile);
    }

    let non_printable_count = content
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32) || b == 127)
        .count();

    if content.len() > 100 && non_printable_count > content.len() / 20 {
        return Err(ValidationError::BinaryContent);
    }

    std::str::from_utf8(content).map_err(|_| ValidationError::InvalidEncoding)
}
