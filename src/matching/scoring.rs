use serde::{Deserialize, Serialize};

use crate::core::host::{AttributeMask, HostTraits};
use crate::core::seeker::{RankVector, SeekerTraits};
use crate::matching::engine::PairingConfig;
use crate::utils::validation::count_to_f64;

/// Floor for composite scores so that `1 / score` is always finite
pub const MIN_SCORE: f64 = 1e-6;

/// Credit given when a preceptor states no gender or language requirement
pub const DEFAULT_NO_PREFERENCE_CREDIT: f64 = 0.75;

/// Configurable weights for the scoring components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for practice type ranks crossed with the practice mask
    pub practice: f64,
    /// Weight for setting ranks crossed with the setting mask
    pub setting: f64,
    /// Weight for the gender preference
    pub gender: f64,
    /// Weight for the language requirement
    pub language: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            practice: 0.50, // 50%
            setting: 0.20,  // 20%
            gender: 0.15,   // 15%
            language: 0.15, // 15%
        }
    }
}

impl ScoringWeights {
    /// Normalize weights to sum to 1.0
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.practice + self.setting + self.gender + self.language;

        if !total.is_finite() || total <= 0.0 {
            return Self::default();
        }

        Self {
            practice: self.practice / total,
            setting: self.setting / total,
            gender: self.gender / total,
            language: self.language / total,
        }
    }
}

/// Compatibility between one student and one preceptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScore {
    /// Practice ranks crossed with the practice mask, in `[0, 1]`
    pub practice_quality: f64,

    /// Setting ranks crossed with the setting mask, in `[0, 1]`
    pub setting_quality: f64,

    pub gender_quality: f64,

    pub language_quality: f64,

    /// Weighted composite score, at least [`MIN_SCORE`]
    pub composite: f64,
}

impl MatchScore {
    /// Calculate the match score with default weights
    #[must_use]
    pub fn calculate(seeker: &SeekerTraits, host: &HostTraits) -> Self {
        Self::calculate_with_config(seeker, host, &PairingConfig::default())
    }

    /// Calculate the match score with custom weights and no-preference credit
    #[must_use]
    pub fn calculate_with_config(
        seeker: &SeekerTraits,
        host: &HostTraits,
        config: &PairingConfig,
    ) -> Self {
        let credit = config.no_preference_credit.clamp(0.0, 1.0);

        let practice_quality = rank_quality(&seeker.practice_ranks, &host.practice_mask);
        let setting_quality = rank_quality(&seeker.setting_ranks, &host.setting_mask);

        // No preference is a good match; a met preference is a better one
        let gender_quality = match host.gender_preference {
            Some(preferred) if preferred == seeker.gender => 1.0,
            Some(_) => 0.0,
            None => credit,
        };

        let language_quality = match (host.requires_language, seeker.speaks_language) {
            (true, true) => 1.0,
            (true, false) => 0.0,
            (false, _) => credit,
        };

        let weights = config.weights.normalized();
        let composite = weights.practice * practice_quality
            + weights.setting * setting_quality
            + weights.gender * gender_quality
            + weights.language * language_quality;

        Self {
            practice_quality,
            setting_quality,
            gender_quality,
            language_quality,
            composite: composite.max(MIN_SCORE),
        }
    }

    /// Cost of this pairing for a minimizing solver
    #[must_use]
    pub fn cost(&self) -> f64 {
        1.0 / self.composite
    }
}

/// Cross a rank vector with a mask: `Σ (N - rank + 1) × mask`, scaled by `1/N`.
///
/// A mask putting full weight on the student's first choice scores 1.0.
/// Masks whose weights sum past 1.0 are clamped. An empty group scores 0.
fn rank_quality(ranks: &RankVector, mask: &AttributeMask) -> f64 {
    if ranks.is_empty() {
        return 0.0;
    }

    let raw: f64 = ranks
        .preference_weights()
        .enumerate()
        .map(|(i, weight)| f64::from(weight) * mask.get(i))
        .sum();

    (raw / count_to_f64(ranks.len())).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Gender;

    fn seeker(practice: &[i64], gender: Gender, speaks: bool) -> SeekerTraits {
        SeekerTraits {
            gender,
            speaks_language: speaks,
            practice_ranks: RankVector::new(practice).unwrap(),
            setting_ranks: RankVector::new(&[]).unwrap(),
        }
    }

    fn host(mask: &[f64], preference: Option<Gender>, requires: bool) -> HostTraits {
        HostTraits {
            gender_preference: preference,
            requires_language: requires,
            practice_mask: AttributeMask::from_weights(mask),
            setting_mask: AttributeMask::zeroed(0),
        }
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoringWeights::default();
        assert!((w.practice + w.setting + w.gender + w.language - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_weights() {
        let w = ScoringWeights {
            practice: 2.0,
            setting: 1.0,
            gender: 1.0,
            language: 0.0,
        }
        .normalized();
        assert!((w.practice - 0.5).abs() < 1e-12);
        assert!((w.setting - 0.25).abs() < 1e-12);

        let zero = ScoringWeights {
            practice: 0.0,
            setting: 0.0,
            gender: 0.0,
            language: 0.0,
        };
        assert_eq!(zero.normalized(), ScoringWeights::default());
    }

    #[test]
    fn test_rank_quality() {
        let ranks = RankVector::new(&[1, 2, 3]).unwrap();
        // First choice fully weighted
        let q = rank_quality(&ranks, &AttributeMask::from_weights(&[1.0, 0.0, 0.0]));
        assert!((q - 1.0).abs() < 1e-12);
        // Last choice fully weighted: 1/3
        let q = rank_quality(&ranks, &AttributeMask::from_weights(&[0.0, 0.0, 1.0]));
        assert!((q - 1.0 / 3.0).abs() < 1e-12);
        // Split weight over first two choices: (3*0.5 + 2*0.5) / 3
        let q = rank_quality(&ranks, &AttributeMask::from_weights(&[0.5, 0.5, 0.0]));
        assert!((q - 2.5 / 3.0).abs() < 1e-12);
        // Overfull mask is clamped
        let q = rank_quality(&ranks, &AttributeMask::from_weights(&[1.0, 1.0, 1.0]));
        assert!((q - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gender_and_language_quality() {
        let s = seeker(&[1, 2], Gender::Female, false);

        let score = MatchScore::calculate(&s, &host(&[0.0, 0.0], Some(Gender::Female), false));
        assert!((score.gender_quality - 1.0).abs() < 1e-12);
        assert!((score.language_quality - DEFAULT_NO_PREFERENCE_CREDIT).abs() < 1e-12);

        let score = MatchScore::calculate(&s, &host(&[0.0, 0.0], Some(Gender::Male), true));
        assert!((score.gender_quality - 0.0).abs() < 1e-12);
        assert!((score.language_quality - 0.0).abs() < 1e-12);

        let score = MatchScore::calculate(&s, &host(&[0.0, 0.0], None, false));
        assert!((score.gender_quality - DEFAULT_NO_PREFERENCE_CREDIT).abs() < 1e-12);
    }

    #[test]
    fn test_composite_is_weighted_sum() {
        let s = seeker(&[1, 2], Gender::Male, true);
        let h = host(&[1.0, 0.0], Some(Gender::Male), true);
        let score = MatchScore::calculate(&s, &h);
        // practice 1.0, setting 0.0 (empty), gender 1.0, language 1.0
        assert!((score.composite - (0.50 + 0.15 + 0.15)).abs() < 1e-12);
        assert!((score.cost() - 1.0 / 0.80).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_strictly_positive() {
        // Every component zero: unmet preferences, empty masks
        let s = seeker(&[1, 2], Gender::Male, false);
        let h = host(&[0.0, 0.0], Some(Gender::Female), true);
        let score = MatchScore::calculate(&s, &h);
        assert!(score.composite > 0.0);
        assert!((score.composite - MIN_SCORE).abs() < 1e-15);
        assert!(score.cost().is_finite());
    }

    #[test]
    fn test_custom_no_preference_credit() {
        let s = seeker(&[1], Gender::Female, false);
        let h = host(&[0.0], None, false);
        let config = PairingConfig {
            no_preference_credit: 0.25,
            ..PairingConfig::default()
        };
        let score = MatchScore::calculate_with_config(&s, &h, &config);
        assert!((score.gender_quality - 0.25).abs() < 1e-12);
        assert!((score.language_quality - 0.25).abs() < 1e-12);
    }
}
