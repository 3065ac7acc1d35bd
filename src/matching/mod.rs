//! Compatibility scoring and optimal student/preceptor assignment.
//!
//! This module provides the pairing pipeline:
//!
//! - [`PairingEngine`]: Main entry point, runs every step below in order
//! - [`reconcile`](reconcile::reconcile): Binds mutual pre-matches and leaves the rest to the solver
//! - [`MatchScore`]: Compatibility of one student with one preceptor
//! - [`CostMatrix`]: `1 / score` for every remaining student/preceptor pair
//! - [`solve`](assignment::solve): Minimum-cost rectangular assignment (Hungarian algorithm)
//!
//! ## Scoring
//!
//! The composite score is a weighted sum of four qualities, each in `[0, 1]`:
//!
//! - **Practice**: student's practice type ranks crossed with the preceptor's practice mask
//! - **Setting**: student's setting ranks crossed with the preceptor's setting mask
//! - **Gender**: 1.0 when a stated preference is met, 0.0 when not, a partial credit when none is stated
//! - **Language**: 1.0 when a requirement is met, 0.0 when not, the same partial credit when none is stated
//!
//! Scores are floored at [`MIN_SCORE`](scoring::MIN_SCORE) so every cost is finite.
//!
//! ## Example
//!
//! ```rust,no_run
//! use preceptor_pairer::matching::engine::PairingEngine;
//! use preceptor_pairer::parsing::roster::load_roster;
//! use preceptor_pairer::parsing::schema::RosterSchema;
//! use std::path::Path;
//!
//! let schema = RosterSchema::load_embedded().unwrap();
//! let roster = load_roster(Path::new("students.csv"), Path::new("preceptors.csv"), &schema).unwrap();
//!
//! let outcome = PairingEngine::new(&roster).run().unwrap();
//! for record in &outcome.records {
//!     println!("{} {}", roster.seekers[record.seeker].identity, record.kind);
//! }
//! ```
//!
//! [`PairingEngine`]: engine::PairingEngine
//! [`MatchScore`]: scoring::MatchScore
//! [`CostMatrix`]: cost::CostMatrix

pub mod assignment;
pub mod cost;
pub mod engine;
pub mod reconcile;
pub mod scoring;

#[cfg(test)]
pub(crate) mod testing;
