use serde::{Deserialize, Serialize};

/// Gender of a student, or the gender a preceptor prefers to work with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Female => write!(f, "female"),
            Self::Male => write!(f, "male"),
        }
    }
}

/// How a student ended up with (or without) a preceptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Bound by a mutual pre-match agreement, bypassing the optimizer
    Pre,
    /// Chosen by the assignment solver
    Algorithmic,
    /// No preceptor could be assigned
    Unmatched,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pre => write!(f, "pre"),
            Self::Algorithmic => write!(f, "algorithmic"),
            Self::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// Ranked practice types. The discriminant is the position in a rank vector or mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeType {
    Pediatrics = 0,
    FamilyPractice = 1,
    InternalMedicine = 2,
    Geriatrics = 3,
}

impl PracticeType {
    pub const ALL: [Self; 4] = [
        Self::Pediatrics,
        Self::FamilyPractice,
        Self::InternalMedicine,
        Self::Geriatrics,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for PracticeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pediatrics => write!(f, "pediatrics"),
            Self::FamilyPractice => write!(f, "family practice"),
            Self::InternalMedicine => write!(f, "internal medicine"),
            Self::Geriatrics => write!(f, "geriatrics"),
        }
    }
}

/// Ranked practice settings. The discriminant is the position in a rank vector or mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    Rural = 0,
    Suburban = 1,
    Urban = 2,
    Underserved = 3,
}

impl Setting {
    pub const ALL: [Self; 4] = [Self::Rural, Self::Suburban, Self::Urban, Self::Underserved];

    pub const COUNT: usize = Self::ALL.len();

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rural => write!(f, "rural"),
            Self::Suburban => write!(f, "suburban"),
            Self::Urban => write!(f, "urban"),
            Self::Underserved => write!(f, "underserved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_indexes_match_positions() {
        for (i, practice) in PracticeType::ALL.iter().enumerate() {
            assert_eq!(practice.index(), i);
        }
        for (i, setting) in Setting::ALL.iter().enumerate() {
            assert_eq!(setting.index(), i);
        }
    }

    #[test]
    fn test_match_kind_serializes_snake_case() {
        let json = serde_json::to_string(&MatchKind::Algorithmic).unwrap();
        assert_eq!(json, "\"algorithmic\"");
        assert_eq!(MatchKind::Pre.to_string(), "pre");
    }
}
