//! Identity, pairability, and the traits shared by students and preceptors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::seeker::RankError;

/// The name of a student or preceptor.
///
/// Names are only used for display and for resolving pre-match directives;
/// they never influence a compatibility score.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub last: String,
    pub first: String,
}

impl Identity {
    pub fn new(last: impl Into<String>, first: impl Into<String>) -> Self {
        Self {
            last: last.into(),
            first: first.into(),
        }
    }

    /// Name in "Last, First" form, used in reports
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.first.is_empty() {
            return self.last.clone();
        }
        format!("{}, {}", self.last, self.first)
    }

    /// Name in "First Last" form
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.first.is_empty() {
            return self.last.clone();
        }
        format!("{} {}", self.first, self.last)
    }

    /// Does free text written by a counterpart refer to this person?
    ///
    /// Comparison ignores case, punctuation spacing, and repeated whitespace.
    /// Text containing a comma is read as "Last, First"; otherwise both
    /// "First Last" and "Last First" are accepted.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        let given = name_tokens(text);
        if given.is_empty() {
            return false;
        }

        let last = name_tokens(&self.last);
        let first = name_tokens(&self.first);
        let last_first: Vec<String> = last.iter().chain(first.iter()).cloned().collect();

        if text.contains(',') {
            return given == last_first;
        }

        let first_last: Vec<String> = first.iter().chain(last.iter()).cloned().collect();
        given == first_last || given == last_first
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn name_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Why a single field could not be used for matching
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("field is blank")]
    Blank,

    #[error("unable to parse gender: '{0}'")]
    UnknownGender(String),

    #[error("preference expected, but no identifiable gender expressed: '{0}'")]
    UnknownGenderPreference(String),

    #[error("expected yes/no, got '{0}'")]
    NotYesNo(String),

    #[error("couldn't parse rank value '{text}' at position {position}")]
    RankNotInteger { text: String, position: usize },

    #[error(transparent)]
    Rank(#[from] RankError),
}

/// A field that failed validation, named by its role in the record
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub error: FieldError,
}

impl FieldIssue {
    pub fn new(field: &'static str, error: FieldError) -> Self {
        Self { field, error }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

/// All reasons a profile cannot enter the optimization pool
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Insufficiency {
    pub issues: Vec<FieldIssue>,
}

impl std::fmt::Display for Insufficiency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Outcome of validating a profile's matching traits
#[derive(Debug, Clone, PartialEq)]
pub enum Status<T> {
    /// Every required field parsed; the traits can be scored
    Pairable(T),
    /// At least one required field failed validation
    Insufficient(Insufficiency),
}

impl<T> Status<T> {
    /// Collapse the issues gathered while parsing into an outcome
    pub fn from_parts(traits: Option<T>, issues: Vec<FieldIssue>) -> Self {
        match traits {
            Some(traits) if issues.is_empty() => Self::Pairable(traits),
            _ => Self::Insufficient(Insufficiency { issues }),
        }
    }

    #[must_use]
    pub fn is_pairable(&self) -> bool {
        matches!(self, Self::Pairable(_))
    }

    #[must_use]
    pub fn traits(&self) -> Option<&T> {
        match self {
            Self::Pairable(traits) => Some(traits),
            Self::Insufficient(_) => None,
        }
    }

    #[must_use]
    pub fn insufficiency(&self) -> Option<&Insufficiency> {
        match self {
            Self::Pairable(_) => None,
            Self::Insufficient(reason) => Some(reason),
        }
    }
}

/// Capabilities shared by both sides of the matching problem
pub trait Profile {
    fn identity(&self) -> &Identity;

    /// Name of the counterpart this profile must be bound to, if any
    fn pre_match(&self) -> Option<&str>;

    fn is_pairable(&self) -> bool;

    fn name(&self) -> String {
        self.identity().display_name()
    }
}
