//! Lexicon mapping a preceptor's free-text practice categories onto attribute masks.
//!
//! Preceptor spreadsheets describe practices with short, loosely formatted
//! phrases. This lexicon is the canonical list of phrases that are understood:
//!
//! | Practice type text        | Mask weights                              |
//! |---------------------------|-------------------------------------------|
//! | `FP`, `Family Practice`   | family practice 1.0                       |
//! | `Internist`, `Internal`   | internal medicine 1.0                     |
//! | `Pedi`, `Pediatrics`      | pediatrics 1.0                            |
//! | `Geriatrician`            | geriatrics 1.0                            |
//! | `FP/Internist`            | family practice 0.5, internal 0.5         |
//! | `Pedi/FP`                 | pediatrics 0.5, family practice 0.5       |
//! | `Internist/Geriatrician`  | internal 0.5, geriatrics 0.5              |
//! | anything with `underserved` | underserved setting 1.0 (+ rural 0.75 if it mentions `rural`) |
//!
//! | Region text (first word)  | Mask weights                              |
//! |---------------------------|-------------------------------------------|
//! | `Urban`                   | urban 1.0                                 |
//! | `Suburban`                | suburban 1.0                              |
//! | `Rural`                   | rural 1.0                                 |
//! | `Suburban/Urban`          | suburban 0.5, urban 0.5                   |
//!
//! The region may be followed by the share of the practice that is pediatric,
//! as `x%` or `x-y%` (averaged). That share raises the pediatrics weight to
//! `percent / 100`.
//!
//! Unrecognized text contributes nothing to the mask and produces a warning;
//! it never makes the preceptor unpairable.

use crate::core::host::AttributeMask;
use crate::core::types::{PracticeType, Setting};

type Weights<T> = &'static [(T, f64)];

const PRACTICE_TERMS: &[(&str, Weights<PracticeType>)] = &[
    ("fp", &[(PracticeType::FamilyPractice, 1.0)]),
    ("family practice", &[(PracticeType::FamilyPractice, 1.0)]),
    ("internist", &[(PracticeType::InternalMedicine, 1.0)]),
    ("internal", &[(PracticeType::InternalMedicine, 1.0)]),
    ("internal medicine", &[(PracticeType::InternalMedicine, 1.0)]),
    ("pedi", &[(PracticeType::Pediatrics, 1.0)]),
    ("pediatrics", &[(PracticeType::Pediatrics, 1.0)]),
    ("geriatrician", &[(PracticeType::Geriatrics, 1.0)]),
    ("geriatrics", &[(PracticeType::Geriatrics, 1.0)]),
    (
        "fp/internist",
        &[
            (PracticeType::FamilyPractice, 0.5),
            (PracticeType::InternalMedicine, 0.5),
        ],
    ),
    (
        "pedi/fp",
        &[
            (PracticeType::Pediatrics, 0.5),
            (PracticeType::FamilyPractice, 0.5),
        ],
    ),
    (
        "internist/geriatrician",
        &[
            (PracticeType::InternalMedicine, 0.5),
            (PracticeType::Geriatrics, 0.5),
        ],
    ),
];

const REGION_TERMS: &[(&str, Weights<Setting>)] = &[
    ("urban", &[(Setting::Urban, 1.0)]),
    ("suburban", &[(Setting::Suburban, 1.0)]),
    ("rural", &[(Setting::Rural, 1.0)]),
    ("suburban/urban", &[(Setting::Suburban, 0.5), (Setting::Urban, 0.5)]),
    ("urban/suburban", &[(Setting::Suburban, 0.5), (Setting::Urban, 0.5)]),
];

/// Weight given to rural when it appears inside an underserved-care phrase
const RURAL_UNDERSERVED_WEIGHT: f64 = 0.75;

/// Masks derived from a preceptor's category fields
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMasks {
    pub practice: AttributeMask,
    pub setting: AttributeMask,

    /// Phrases that were present but not understood
    pub warnings: Vec<String>,
}

/// Build practice and setting masks from the practice type and region fields
#[must_use]
pub fn category_masks(practice_types: &str, practice_region: &str) -> CategoryMasks {
    let mut masks = CategoryMasks {
        practice: AttributeMask::zeroed(PracticeType::COUNT),
        setting: AttributeMask::zeroed(Setting::COUNT),
        warnings: Vec::new(),
    };

    apply_practice_types(&mut masks, practice_types.trim());
    apply_region(&mut masks, practice_region.trim());

    masks
}

fn apply_practice_types(masks: &mut CategoryMasks, text: &str) {
    if text.is_empty() {
        return;
    }

    let lowered = text.to_lowercase();

    // "Rural/Care of the Underserved" describes a setting, not a practice type
    if lowered.contains("underserved") {
        masks.setting.raise(Setting::Underserved.index(), 1.0);
        if lowered.contains("rural") {
            masks
                .setting
                .raise(Setting::Rural.index(), RURAL_UNDERSERVED_WEIGHT);
        }
        return;
    }

    let normalized = normalize_phrase(&lowered);
    match lookup(PRACTICE_TERMS, &normalized) {
        Some(weights) => {
            for &(practice, weight) in weights {
                masks.practice.raise(practice.index(), weight);
            }
        }
        None => masks
            .warnings
            .push(format!("Unrecognized practice type: '{text}'")),
    }
}

fn apply_region(masks: &mut CategoryMasks, text: &str) {
    // "Suburban / Urban 20%" reads as "suburban/urban 20%"
    let normalized = normalize_phrase(&text.to_lowercase());
    let mut words = normalized.split_whitespace();

    let Some(region) = words.next() else {
        return;
    };

    match lookup(REGION_TERMS, region) {
        Some(weights) => {
            for &(setting, weight) in weights {
                masks.setting.raise(setting.index(), weight);
            }
        }
        None => masks
            .warnings
            .push(format!("Unrecognized practice region: '{region}'")),
    }

    if let Some(share) = words.next() {
        match parse_percentage(share) {
            Some(percent) => masks
                .practice
                .raise(PracticeType::Pediatrics.index(), percent / 100.0),
            None => masks
                .warnings
                .push(format!("Unable to parse percentage pediatrics: '{share}'")),
        }
    }
}

fn lookup<T: Copy + 'static>(
    table: &'static [(&'static str, Weights<T>)],
    phrase: &str,
) -> Option<Weights<T>> {
    table
        .iter()
        .find(|(term, _)| *term == phrase)
        .map(|(_, weights)| *weights)
}

/// Lowercased phrase with spaces around slashes and repeated whitespace removed
fn normalize_phrase(lowered: &str) -> String {
    lowered
        .split('/')
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("/")
}

/// Parse `x%` or `x-y%` (averaged) into a percentage in `[0, 100]`
fn parse_percentage(text: &str) -> Option<f64> {
    let body = text.trim().strip_suffix('%')?;
    let value = match body.split_once('-') {
        Some((low, high)) => {
            let low: u32 = low.trim().parse().ok()?;
            let high: u32 = high.trim().parse().ok()?;
            (f64::from(low) + f64::from(high)) / 2.0
        }
        None => f64::from(body.trim().parse::<u32>().ok()?),
    };
    (value <= 100.0).then_some(value)
}
