use serde::Serialize;
use thiserror::Error;

use crate::core::profile::{Identity, Profile, Status};
use crate::core::types::Gender;

/// Why a sequence of ranks is not a permutation of `1..=N`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("rank {rank} at position {position} is outside 1..={max}")]
    OutOfRange {
        rank: i64,
        position: usize,
        max: usize,
    },

    #[error("rank {rank} is given more than once")]
    Duplicate { rank: u32 },
}

/// A student's ordering of a group of attributes; rank 1 is most desired.
///
/// Always holds each value of `1..=len` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankVector(Vec<u32>);

impl RankVector {
    /// Validate that `ranks` is a permutation of `1..=ranks.len()`
    ///
    /// # Errors
    ///
    /// Returns `RankError::OutOfRange` for a rank outside `1..=N` or
    /// `RankError::Duplicate` for a repeated rank. N in-range ranks with no
    /// repeats cover `1..=N`, so a gap always surfaces as one of the two.
    pub fn new(ranks: &[i64]) -> Result<Self, RankError> {
        let max = ranks.len();
        let mut seen = vec![false; max];
        let mut values = Vec::with_capacity(max);

        for (position, &rank) in ranks.iter().enumerate() {
            let in_range = usize::try_from(rank).is_ok_and(|r| (1..=max).contains(&r));
            if !in_range {
                return Err(RankError::OutOfRange {
                    rank,
                    position,
                    max,
                });
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // checked above
            let rank = rank as u32;
            let slot = &mut seen[rank as usize - 1];
            if *slot {
                return Err(RankError::Duplicate { rank });
            }
            *slot = true;
            values.push(rank);
        }

        Ok(Self(values))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Preference weight of each position: `N - rank + 1`, so rank 1 weighs `N`
    pub fn preference_weights(&self) -> impl Iterator<Item = u32> + '_ {
        #[allow(clippy::cast_possible_truncation)]
        let n = self.0.len() as u32;
        self.0.iter().map(move |&rank| n - rank + 1)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Validated matching traits of a student
#[derive(Debug, Clone, PartialEq)]
pub struct SeekerTraits {
    pub gender: Gender,

    /// Speaks the language some preceptors require (Spanish)
    pub speaks_language: bool,

    /// Ranks over [`PracticeType`](crate::core::types::PracticeType)
    pub practice_ranks: RankVector,

    /// Ranks over [`Setting`](crate::core::types::Setting)
    pub setting_ranks: RankVector,
}

/// A student looking for a preceptor
#[derive(Debug, Clone)]
pub struct Seeker {
    pub identity: Identity,

    /// Where the student lives (display only)
    pub home: String,

    pub comments: String,

    /// Preceptor this student is pre-matched with
    pub pre_match: Option<String>,

    pub status: Status<SeekerTraits>,
}

impl Seeker {
    #[must_use]
    pub fn traits(&self) -> Option<&SeekerTraits> {
        self.status.traits()
    }
}

impl Profile for Seeker {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn pre_match(&self) -> Option<&str> {
        self.pre_match.as_deref()
    }

    fn is_pairable(&self) -> bool {
        self.status.is_pairable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_vector_accepts_permutation() {
        let ranks = RankVector::new(&[3, 1, 2]).unwrap();
        assert_eq!(ranks.len(), 3);
        assert_eq!(ranks.as_slice(), &[3, 1, 2]);
        assert_eq!(ranks.preference_weights().collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[test]
    fn test_rank_vector_rejects_out_of_range() {
        assert_eq!(
            RankVector::new(&[1, 2, 4]),
            Err(RankError::OutOfRange {
                rank: 4,
                position: 2,
                max: 3
            })
        );
        assert!(matches!(
            RankVector::new(&[0, 1, 2]),
            Err(RankError::OutOfRange { rank: 0, .. })
        ));
        assert!(matches!(
            RankVector::new(&[-1, 1]),
            Err(RankError::OutOfRange { rank: -1, .. })
        ));
    }

    #[test]
    fn test_rank_vector_rejects_duplicates() {
        assert_eq!(
            RankVector::new(&[1, 1, 2]),
            Err(RankError::Duplicate { rank: 1 })
        );
    }

    #[test]
    fn test_rank_vector_empty() {
        let ranks = RankVector::new(&[]).unwrap();
        assert!(ranks.is_empty());
    }
}
