use serde::Serialize;
use tracing::{debug, info};

use crate::core::host::HostTraits;
use crate::core::profile::Profile;
use crate::core::roster::Roster;
use crate::core::seeker::SeekerTraits;
use crate::core::types::MatchKind;
use crate::matching::assignment::solve;
use crate::matching::cost::CostMatrix;
use crate::matching::reconcile::{reconcile, ReconcileError, Reconciliation};
use crate::matching::scoring::{MatchScore, ScoringWeights, DEFAULT_NO_PREFERENCE_CREDIT};

/// Configuration for the pairing engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairingConfig {
    pub weights: ScoringWeights,
    /// Gender/language quality when the preceptor states no requirement
    pub no_preference_credit: f64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            no_preference_credit: DEFAULT_NO_PREFERENCE_CREDIT,
        }
    }
}

/// The outcome for one student
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// Index into [`Roster::seekers`]
    pub seeker: usize,

    /// Index into [`Roster::hosts`]; `None` when unmatched
    pub host: Option<usize>,

    pub kind: MatchKind,

    /// Composite score; `None` when unmatched or when a pre-matched side is insufficient
    pub quality: Option<f64>,
}

/// Every student's outcome plus the preceptors nobody was paired with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairingOutcome {
    /// Pre-matches first, then every other student in input order
    pub records: Vec<MatchRecord>,

    /// Preceptors left without a student, in input order
    pub unmatched_hosts: Vec<usize>,
}

impl PairingOutcome {
    fn count(&self, kind: MatchKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }

    #[must_use]
    pub fn pre_count(&self) -> usize {
        self.count(MatchKind::Pre)
    }

    #[must_use]
    pub fn algorithmic_count(&self) -> usize {
        self.count(MatchKind::Algorithmic)
    }

    #[must_use]
    pub fn unmatched_count(&self) -> usize {
        self.count(MatchKind::Unmatched)
    }

    /// Sum of the quality of every scored pairing
    #[must_use]
    pub fn total_quality(&self) -> f64 {
        self.records.iter().filter_map(|r| r.quality).sum()
    }
}

/// Compatibility of every pairable student with every pairable preceptor
#[derive(Debug, Clone)]
pub struct ScoreTable {
    /// Row labels: student indexes
    pub seekers: Vec<usize>,
    /// Column labels: preceptor indexes
    pub hosts: Vec<usize>,
    /// Row-major, one score per student/preceptor pair
    pub scores: Vec<Vec<MatchScore>>,
}

/// Pairs the students and preceptors of a roster
pub struct PairingEngine<'a> {
    roster: &'a Roster,
    config: PairingConfig,
}

impl<'a> PairingEngine<'a> {
    /// Create a new engine with default configuration
    #[must_use]
    pub fn new(roster: &'a Roster) -> Self {
        Self::with_config(roster, PairingConfig::default())
    }

    /// Create a new engine with custom configuration
    #[must_use]
    pub fn with_config(roster: &'a Roster, config: PairingConfig) -> Self {
        Self { roster, config }
    }

    #[must_use]
    pub fn config(&self) -> &PairingConfig {
        &self.config
    }

    /// Reconcile pre-matches, then optimally pair everyone else.
    ///
    /// # Errors
    ///
    /// Returns a `ReconcileError` when the rosters' pre-match directives
    /// disagree. No records are produced in that case.
    pub fn run(&self) -> Result<PairingOutcome, ReconcileError> {
        let reconciliation = self.reconcile()?;

        let seeker_traits = self.seeker_traits(&reconciliation.seeker_pool);
        let host_traits = self.host_traits(&reconciliation.host_pool);

        let costs = CostMatrix::build(&seeker_traits, &host_traits, &self.config);
        info!(
            "Solving {}x{} assignment problem",
            costs.rows(),
            costs.cols()
        );
        let assignment = solve(&costs);

        // Roster index of the preceptor each student was assigned
        let mut assigned = vec![None; self.roster.seekers.len()];
        for (row, col) in assignment.pairs() {
            let seeker = reconciliation.seeker_pool[row];
            let host = reconciliation.host_pool[col];
            let quality = costs.get(row, col).recip();
            debug!(
                "Paired {} with {} (quality {quality:.4})",
                self.roster.seekers[seeker].name(),
                self.roster.hosts[host].name()
            );
            assigned[seeker] = Some((host, quality));
        }

        let outcome = self.assemble(&reconciliation, &assigned);
        info!(
            "{} pre-matched, {} matched algorithmically, {} unmatched students, {} unmatched preceptors",
            outcome.pre_count(),
            outcome.algorithmic_count(),
            outcome.unmatched_count(),
            outcome.unmatched_hosts.len()
        );
        Ok(outcome)
    }

    /// Reconcile pre-matches without solving
    ///
    /// # Errors
    ///
    /// Returns a `ReconcileError` when the rosters' pre-match directives disagree.
    pub fn reconcile(&self) -> Result<Reconciliation, ReconcileError> {
        reconcile(&self.roster.seekers, &self.roster.hosts)
    }

    /// Score every pairable student against every pairable preceptor
    #[must_use]
    pub fn score_table(&self) -> ScoreTable {
        let seekers: Vec<usize> = self.roster.pairable_seekers().collect();
        let hosts: Vec<usize> = self.roster.pairable_hosts().collect();

        let seeker_traits = self.seeker_traits(&seekers);
        let host_traits = self.host_traits(&hosts);

        let scores = seeker_traits
            .iter()
            .map(|seeker| {
                host_traits
                    .iter()
                    .map(|host| MatchScore::calculate_with_config(seeker, host, &self.config))
                    .collect()
            })
            .collect();

        ScoreTable {
            seekers,
            hosts,
            scores,
        }
    }

    /// Traits of a pool of students; pools only ever hold pairable profiles
    fn seeker_traits(&self, pool: &[usize]) -> Vec<&'a SeekerTraits> {
        let roster = self.roster;
        pool.iter()
            .filter_map(|&i| roster.seekers[i].traits())
            .collect()
    }

    fn host_traits(&self, pool: &[usize]) -> Vec<&'a HostTraits> {
        let roster = self.roster;
        pool.iter().filter_map(|&i| roster.hosts[i].traits()).collect()
    }

    fn pre_match_quality(&self, seeker: usize, host: usize) -> Option<f64> {
        let seeker = self.roster.seekers[seeker].traits()?;
        let host = self.roster.hosts[host].traits()?;
        Some(MatchScore::calculate_with_config(seeker, host, &self.config).composite)
    }

    fn assemble(
        &self,
        reconciliation: &Reconciliation,
        assigned: &[Option<(usize, f64)>],
    ) -> PairingOutcome {
        let mut records = Vec::with_capacity(self.roster.seekers.len());
        let mut host_taken = vec![false; self.roster.hosts.len()];

        for pre in &reconciliation.pre_matches {
            host_taken[pre.host] = true;
            records.push(MatchRecord {
                seeker: pre.seeker,
                host: Some(pre.host),
                kind: MatchKind::Pre,
                quality: self.pre_match_quality(pre.seeker, pre.host),
            });
        }

        for (seeker, slot) in assigned.iter().enumerate() {
            if reconciliation.pre_match_for(seeker).is_some() {
                continue;
            }
            let record = match *slot {
                Some((host, quality)) => {
                    host_taken[host] = true;
                    MatchRecord {
                        seeker,
                        host: Some(host),
                        kind: MatchKind::Algorithmic,
                        quality: Some(quality),
                    }
                }
                None => MatchRecord {
                    seeker,
                    host: None,
                    kind: MatchKind::Unmatched,
                    quality: None,
                },
            };
            records.push(record);
        }

        let unmatched_hosts = host_taken
            .iter()
            .enumerate()
            .filter(|(_, taken)| !**taken)
            .map(|(i, _)| i)
            .collect();

        PairingOutcome {
            records,
            unmatched_hosts,
        }
    }
}
