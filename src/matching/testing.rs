//! Profile builders shared by the matching tests.

use crate::core::host::{AttributeMask, Host, HostTraits};
use crate::core::profile::{Identity, Insufficiency, Status};
use crate::core::seeker::{RankVector, Seeker, SeekerTraits};
use crate::core::types::Gender;

/// Student traits ranking practice types only; gender and language are neutral
pub fn seeker_traits(practice_ranks: &[i64]) -> SeekerTraits {
    SeekerTraits {
        gender: Gender::Female,
        speaks_language: false,
        practice_ranks: RankVector::new(practice_ranks).unwrap(),
        setting_ranks: RankVector::new(&[]).unwrap(),
    }
}

/// Preceptor traits with a practice mask and no other preferences
pub fn host_traits(practice_mask: &[f64]) -> HostTraits {
    HostTraits {
        gender_preference: None,
        requires_language: false,
        practice_mask: AttributeMask::from_weights(practice_mask),
        setting_mask: AttributeMask::zeroed(0),
    }
}

pub fn seeker(name: &str, traits: Option<SeekerTraits>, pre_match: Option<&str>) -> Seeker {
    Seeker {
        identity: Identity::new(name, ""),
        home: String::new(),
        comments: String::new(),
        pre_match: pre_match.map(str::to_string),
        status: traits.map_or_else(
            || Status::Insufficient(Insufficiency::default()),
            Status::Pairable,
        ),
    }
}

pub fn host(name: &str, traits: Option<HostTraits>, pre_match: Option<&str>) -> Host {
    Host {
        identity: Identity::new(name, ""),
        practice_type: String::new(),
        location: format!("{name} Clinic"),
        preferred_day: String::new(),
        secondary_day: String::new(),
        comments: String::new(),
        pre_match: pre_match.map(str::to_string),
        status: traits.map_or_else(
            || Status::Insufficient(Insufficiency::default()),
            Status::Pairable,
        ),
    }
}
