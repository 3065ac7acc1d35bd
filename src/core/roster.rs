use crate::core::host::Host;
use crate::core::profile::Profile;
use crate::core::seeker::Seeker;

/// Both pools of profiles, in input order.
///
/// Every other part of the pipeline refers to a profile by its index here,
/// so bindings between students and preceptors never hold references to
/// each other.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub seekers: Vec<Seeker>,
    pub hosts: Vec<Host>,
}

impl Roster {
    #[must_use]
    pub fn new(seekers: Vec<Seeker>, hosts: Vec<Host>) -> Self {
        Self { seekers, hosts }
    }

    #[must_use]
    pub fn seeker(&self, index: usize) -> Option<&Seeker> {
        self.seekers.get(index)
    }

    #[must_use]
    pub fn host(&self, index: usize) -> Option<&Host> {
        self.hosts.get(index)
    }

    /// Indexes of students whose traits can be scored
    pub fn pairable_seekers(&self) -> impl Iterator<Item = usize> + '_ {
        pairable_indexes(&self.seekers)
    }

    /// Indexes of preceptors whose traits can be scored
    pub fn pairable_hosts(&self) -> impl Iterator<Item = usize> + '_ {
        pairable_indexes(&self.hosts)
    }
}

fn pairable_indexes<P: Profile>(pool: &[P]) -> impl Iterator<Item = usize> + '_ {
    pool.iter()
        .enumerate()
        .filter(|(_, p)| p.is_pairable())
        .map(|(i, _)| i)
}
