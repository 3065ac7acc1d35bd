//! Parsers for student and preceptor roster files.
//!
//! This module provides:
//!
//! - **Roster files**: `;`-delimited text (optionally gzipped) with one header line
//! - **Record layouts**: positional field maps, embedded by default or loaded from JSON
//! - **Field parsers**: gender, gender preference, yes/no language, rank permutations
//! - **Category lexicon**: free-text practice types and regions mapped onto attribute masks
//!
//! ## Example
//!
//! ```rust,no_run
//! use preceptor_pairer::parsing::roster::load_roster;
//! use preceptor_pairer::parsing::schema::RosterSchema;
//! use std::path::Path;
//!
//! let schema = RosterSchema::load_embedded().unwrap();
//! let roster = load_roster(Path::new("students.csv"), Path::new("preceptors.csv"), &schema).unwrap();
//! ```
//!
//! ## Errors
//!
//! | Problem                               | Effect                                  |
//! |---------------------------------------|-----------------------------------------|
//! | Unparsable gender, language, or ranks | Profile marked insufficient, warning    |
//! | Unrecognized practice type or region  | Zero mask weight, warning               |
//! | Record with too few fields            | Fatal [`ParseError::FieldCount`]        |
//! | Unreadable, empty, or binary file     | Fatal [`ParseError`]                    |
//!
//! [`ParseError`]: record::ParseError
//! [`ParseError::FieldCount`]: record::ParseError::FieldCount

pub mod fields;
pub mod lexicon;
pub mod record;
pub mod roster;
pub mod schema;
