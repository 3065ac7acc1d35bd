//! Reconciliation of externally agreed pre-matches.
//!
//! A pre-match binds a student and a preceptor before optimization. Both
//! sides must name each other; anything else means the rosters disagree
//! and the run is aborted rather than guessed at.

use thiserror::Error;
use tracing::{info, warn};

use crate::core::host::Host;
use crate::core::profile::Profile;
use crate::core::seeker::Seeker;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("{side} '{name}' is pre-matched with '{target}', who is not in the {other} roster")]
    MissingCounterpart {
        side: Side,
        other: Side,
        name: String,
        target: String,
    },

    #[error("{side} '{name}' is pre-matched with '{target}', which names {candidates} {other}s")]
    AmbiguousTarget {
        side: Side,
        other: Side,
        name: String,
        target: String,
        candidates: usize,
    },

    #[error(
        "{side} '{name}' is pre-matched with {other} '{counterpart}', but '{counterpart}' {}",
        describe_claim(.counterpart_target.as_deref())
    )]
    Asymmetric {
        side: Side,
        other: Side,
        name: String,
        counterpart: String,
        counterpart_target: Option<String>,
    },
}

fn describe_claim(target: Option<&str>) -> String {
    match target {
        Some(target) => format!("is pre-matched with '{target}'"),
        None => "names no pre-match".to_string(),
    }
}

/// Which roster a profile comes from, for error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Student,
    Preceptor,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Preceptor => write!(f, "preceptor"),
        }
    }
}

/// A mutually agreed student/preceptor pair, by roster index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreMatch {
    pub seeker: usize,
    pub host: usize,
}

/// Pre-matched pairs and the pools left for optimization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// In student input order
    pub pre_matches: Vec<PreMatch>,

    /// Unbound, pairable students in input order
    pub seeker_pool: Vec<usize>,

    /// Unbound, pairable preceptors in input order
    pub host_pool: Vec<usize>,
}

impl Reconciliation {
    /// Preceptor bound to a student by pre-match, if any
    #[must_use]
    pub fn pre_match_for(&self, seeker: usize) -> Option<usize> {
        self.pre_matches
            .iter()
            .find(|p| p.seeker == seeker)
            .map(|p| p.host)
    }
}

/// Indexes of profiles in `pool` that `target` names
fn resolve<P: Profile>(target: &str, pool: &[P]) -> Vec<usize> {
    pool.iter()
        .enumerate()
        .filter(|(_, p)| p.identity().matches(target))
        .map(|(i, _)| i)
        .collect()
}

/// Resolve `target` to exactly one profile of `pool`
fn resolve_one<P: Profile, Q: Profile>(
    profile: &P,
    side: Side,
    target: &str,
    pool: &[Q],
    other: Side,
) -> Result<usize, ReconcileError> {
    let candidates = resolve(target, pool);
    match candidates.as_slice() {
        [] => Err(ReconcileError::MissingCounterpart {
            side,
            other,
            name: profile.name(),
            target: target.to_string(),
        }),
        [index] => Ok(*index),
        _ => Err(ReconcileError::AmbiguousTarget {
            side,
            other,
            name: profile.name(),
            target: target.to_string(),
            candidates: candidates.len(),
        }),
    }
}

/// Bind every mutual pre-match and return the residual pools.
///
/// Pre-matched profiles are bound even when insufficient for scoring.
/// Unbound profiles that are insufficient are dropped from the pools with a warning.
///
/// # Errors
///
/// Returns a `ReconcileError` when a pre-match names nobody, names several
/// profiles, or is not reciprocated. No partial result is produced.
pub fn reconcile(seekers: &[Seeker], hosts: &[Host]) -> Result<Reconciliation, ReconcileError> {
    let mut seeker_bound = vec![false; seekers.len()];
    let mut host_bound = vec![false; hosts.len()];
    let mut pre_matches = Vec::new();

    // Step 1: every student directive must resolve to a preceptor naming them back
    for (si, seeker) in seekers.iter().enumerate() {
        let Some(target) = seeker.pre_match() else {
            continue;
        };

        let hi = resolve_one(seeker, Side::Student, target, hosts, Side::Preceptor)?;
        let host = &hosts[hi];

        // The preceptor's directive must name this student and nobody else
        let reciprocated = match host.pre_match() {
            Some(back) => {
                let candidates = resolve(back, seekers);
                if candidates.len() > 1 {
                    return Err(ReconcileError::AmbiguousTarget {
                        side: Side::Preceptor,
                        other: Side::Student,
                        name: host.name(),
                        target: back.to_string(),
                        candidates: candidates.len(),
                    });
                }
                candidates == [si]
            }
            None => false,
        };
        if !reciprocated || host_bound[hi] {
            return Err(ReconcileError::Asymmetric {
                side: Side::Student,
                other: Side::Preceptor,
                name: seeker.name(),
                counterpart: host.name(),
                counterpart_target: host.pre_match().map(str::to_string),
            });
        }

        seeker_bound[si] = true;
        host_bound[hi] = true;
        pre_matches.push(PreMatch { seeker: si, host: hi });
    }

    // Step 2: any preceptor directive left over was not reciprocated
    for (hi, host) in hosts.iter().enumerate() {
        let Some(target) = host.pre_match() else {
            continue;
        };
        if host_bound[hi] {
            continue;
        }

        let si = resolve_one(host, Side::Preceptor, target, seekers, Side::Student)?;
        let seeker = &seekers[si];
        return Err(ReconcileError::Asymmetric {
            side: Side::Preceptor,
            other: Side::Student,
            name: host.name(),
            counterpart: seeker.name(),
            counterpart_target: seeker.pre_match().map(str::to_string),
        });
    }

    // Step 3: residual pools of unbound, pairable profiles
    let seeker_pool = residual_pool(seekers, &seeker_bound, Side::Student);
    let host_pool = residual_pool(hosts, &host_bound, Side::Preceptor);

    info!(
        "Reconciled {} pre-matches; {} students and {} preceptors left for matching",
        pre_matches.len(),
        seeker_pool.len(),
        host_pool.len()
    );

    Ok(Reconciliation {
        pre_matches,
        seeker_pool,
        host_pool,
    })
}

fn residual_pool<P: Profile>(pool: &[P], bound: &[bool], side: Side) -> Vec<usize> {
    pool.iter()
        .enumerate()
        .filter(|&(i, profile)| {
            if bound[i] {
                return false;
            }
            if !profile.is_pairable() {
                warn!("Removing {side} from matching matrix: {}", profile.name());
                return false;
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}
