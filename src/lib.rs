//! # preceptor-pairer
//!
//! A library for pairing students with clinical preceptors.
//!
//! Each student ranks practice types and practice settings; each preceptor
//! describes their practice in free text and may state a gender preference or
//! a language requirement. Some pairs are agreed ahead of time by both sides.
//!
//! `preceptor-pairer` honors those agreements and assigns everyone else so
//! that the total compatibility of all pairs is as high as possible.
//!
//! ## Features
//!
//! - **Tolerant parsing**: incomplete profiles are reported and set aside instead of aborting
//! - **Category lexicon**: free-text practice descriptions mapped onto weighted attributes
//! - **Pre-match reconciliation**: agreed pairs bypass the optimizer; one-sided claims are fatal
//! - **Optimal assignment**: Hungarian algorithm over a `1 / score` cost matrix
//! - **Rectangular rosters**: more students than preceptors, or the reverse
//!
//! ## Example
//!
//! ```rust,no_run
//! use preceptor_pairer::{load_roster, PairingEngine, RosterSchema};
//! use std::path::Path;
//!
//! // Default field layout of both roster files
//! let schema = RosterSchema::load_embedded().unwrap();
//! let roster = load_roster(Path::new("students.csv"), Path::new("preceptors.csv"), &schema).unwrap();
//!
//! let outcome = PairingEngine::new(&roster).run().unwrap();
//! println!("{} pairs", outcome.pre_count() + outcome.algorithmic_count());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Profiles, validation outcomes, and the roster arena
//! - [`parsing`]: Roster files, field layouts, and the category lexicon
//! - [`matching`]: Scoring, reconciliation, cost matrix, and assignment
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::host::Host;
pub use core::roster::Roster;
pub use core::seeker::Seeker;
pub use core::types::*;
pub use matching::engine::{MatchRecord, PairingConfig, PairingEngine, PairingOutcome};
pub use parsing::roster::load_roster;
pub use parsing::schema::RosterSchema;
