use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::types::{PracticeType, Setting};

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to read roster layout: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse roster layout: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid roster layout: {0}")]
    Invalid(String),
}

/// Layout version for compatibility checking
pub const LAYOUT_VERSION: &str = "1.0.0";

/// Field positions of a student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekerLayout {
    pub last_name: usize,
    pub first_name: usize,
    pub gender: usize,
    /// One position per [`PracticeType`], in its declaration order
    pub practice_ranks: Vec<usize>,
    /// One position per [`Setting`], in its declaration order
    pub setting_ranks: Vec<usize>,
    pub language: usize,
    pub home: usize,
    pub comments: usize,
    pub pre_match: usize,
}

impl SeekerLayout {
    fn positions(&self) -> Vec<usize> {
        let mut positions = vec![
            self.last_name,
            self.first_name,
            self.gender,
            self.language,
            self.home,
            self.comments,
            self.pre_match,
        ];
        positions.extend(&self.practice_ranks);
        positions.extend(&self.setting_ranks);
        positions
    }

    /// Minimum number of fields a record must have
    #[must_use]
    pub fn required_fields(&self) -> usize {
        self.positions().into_iter().max().map_or(0, |max| max + 1)
    }
}

/// Field positions of a preceptor record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostLayout {
    pub last_name: usize,
    pub first_name: usize,
    pub practice_types: usize,
    pub location: usize,
    /// Region, optionally followed by the pediatric share (`Urban 20-30%`)
    pub practice_region: usize,
    pub gender_preference: usize,
    pub language: usize,
    pub preferred_day: usize,
    pub secondary_day: usize,
    pub comments: usize,
    pub pre_match: usize,
}

impl HostLayout {
    fn positions(&self) -> Vec<usize> {
        vec![
            self.last_name,
            self.first_name,
            self.practice_types,
            self.location,
            self.practice_region,
            self.gender_preference,
            self.language,
            self.preferred_day,
            self.secondary_day,
            self.comments,
            self.pre_match,
        ]
    }

    /// Minimum number of fields a record must have
    #[must_use]
    pub fn required_fields(&self) -> usize {
        self.positions().into_iter().max().map_or(0, |max| max + 1)
    }
}

/// Positional layouts of both roster files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSchema {
    pub version: String,
    pub seeker: SeekerLayout,
    pub host: HostLayout,
}

impl RosterSchema {
    /// Load the embedded default layout
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded layout is malformed (it is checked by `build.rs`).
    pub fn load_embedded() -> Result<Self, SchemaError> {
        // Embedded at compile time, validated by build.rs
        const EMBEDDED_LAYOUT: &str = include_str!("../../schemas/roster_layout.json");
        Self::from_json(EMBEDDED_LAYOUT)
    }

    /// Load a layout from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ReadError` if the file cannot be read, or the
    /// errors of [`RosterSchema::from_json`].
    pub fn load_from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a layout from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ParseError` for malformed JSON or
    /// `SchemaError::Invalid` when the layout fails validation.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if schema.version != LAYOUT_VERSION {
            tracing::warn!(
                "Roster layout version mismatch (expected {}, found {})",
                LAYOUT_VERSION,
                schema.version
            );
        }

        schema.validate()?;
        Ok(schema)
    }

    /// Check that rank groups have one position per attribute and that no
    /// position is used twice within a layout
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.seeker.practice_ranks.len() != PracticeType::COUNT {
            return Err(SchemaError::Invalid(format!(
                "seeker.practice_ranks must list {} positions, found {}",
                PracticeType::COUNT,
                self.seeker.practice_ranks.len()
            )));
        }
        if self.seeker.setting_ranks.len() != Setting::COUNT {
            return Err(SchemaError::Invalid(format!(
                "seeker.setting_ranks must list {} positions, found {}",
                Setting::COUNT,
                self.seeker.setting_ranks.len()
            )));
        }

        check_distinct("seeker", self.seeker.positions())?;
        check_distinct("host", self.host.positions())
    }
}

fn check_distinct(section: &str, mut positions: Vec<usize>) -> Result<(), SchemaError> {
    positions.sort_unstable();
    if let Some(pair) = positions.windows(2).find(|w| w[0] == w[1]) {
        return Err(SchemaError::Invalid(format!(
            "{section} layout uses field position {} more than once",
            pair[0]
        )));
    }
    Ok(())
}
