use serde::Serialize;

use crate::core::profile::{Identity, Profile, Status};
use crate::core::types::Gender;

/// Per-attribute weights in `[0, 1]` that a preceptor's practice offers.
///
/// Aligned position-for-position with a student's [`RankVector`](crate::core::seeker::RankVector).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeMask(Vec<f64>);

impl AttributeMask {
    /// A mask of `len` attributes, all weighted zero
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    /// Build a mask from raw weights, clamping each into `[0, 1]`
    #[must_use]
    pub fn from_weights(weights: &[f64]) -> Self {
        Self(weights.iter().map(|&w| clamp_weight(w)).collect())
    }

    /// Raise the weight at `position` to at least `weight`.
    ///
    /// Several category phrases may touch the same attribute; the strongest wins.
    pub fn raise(&mut self, position: usize, weight: f64) {
        if let Some(slot) = self.0.get_mut(position) {
            *slot = slot.max(clamp_weight(weight));
        }
    }

    #[must_use]
    pub fn get(&self, position: usize) -> f64 {
        self.0.get(position).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

fn clamp_weight(weight: f64) -> f64 {
    if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, 1.0)
    }
}

/// Validated matching traits of a preceptor
#[derive(Debug, Clone, PartialEq)]
pub struct HostTraits {
    /// `None` means no preference
    pub gender_preference: Option<Gender>,

    /// Needs a student who speaks the language (Spanish)
    pub requires_language: bool,

    /// Weights over [`PracticeType`](crate::core::types::PracticeType)
    pub practice_mask: AttributeMask,

    /// Weights over [`Setting`](crate::core::types::Setting)
    pub setting_mask: AttributeMask,
}

/// A preceptor offering a placement
#[derive(Debug, Clone)]
pub struct Host {
    pub identity: Identity,

    /// Raw practice category text, shown in reports
    pub practice_type: String,

    pub location: String,

    pub preferred_day: String,

    pub secondary_day: String,

    pub comments: String,

    /// Student this preceptor is pre-matched with
    pub pre_match: Option<String>,

    pub status: Status<HostTraits>,
}

impl Host {
    #[must_use]
    pub fn traits(&self) -> Option<&HostTraits> {
        self.status.traits()
    }
}

impl Profile for Host {
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
