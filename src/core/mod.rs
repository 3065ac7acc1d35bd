//! Core data types for student/preceptor pairing.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Seeker`]: A student, with gender, language ability, and ranked preferences
//! - [`Host`]: A preceptor, with preferences and weighted practice attributes
//! - [`Roster`]: Both pools of profiles, addressed by index
//! - [`Status`]: Whether a profile parsed well enough to be scored
//! - [`MatchKind`], [`Gender`], [`PracticeType`], [`Setting`]: Classification types
//!
//! ## Attribute groups
//!
//! Students rank two groups of attributes and preceptors weight the same groups:
//!
//! | Group    | Positions                                           |
//! |----------|-----------------------------------------------------|
//! | Practice | pediatrics, family practice, internal, geriatrics   |
//! | Setting  | rural, suburban, urban, underserved                 |
//!
//! [`Seeker`]: seeker::Seeker
//! [`Host`]: host::Host
//! [`Roster`]: roster::Roster
//! [`Status`]: profile::Status
//! [`MatchKind`]: types::MatchKind
//! [`Gender`]: types::Gender
//! [`PracticeType`]: types::PracticeType
//! [`Setting`]: types::Setting

pub mod host;
pub mod profile;
pub mod roster;
pub mod seeker;
pub mod types;
