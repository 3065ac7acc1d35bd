//! Command-line interface for preceptor-pairer.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **pair**: Pair students with preceptors and print the assignment
//! - **score**: Print the compatibility of every student with every preceptor
//! - **check**: Validate both rosters and their pre-matches without pairing
//!
//! ## Usage
//!
//! ```text
//! # Pair students with preceptors
//! preceptor-pairer pair students.csv preceptors.csv
//!
//! # Semicolon-delimited report for a spreadsheet
//! preceptor-pairer pair students.csv preceptors.csv --format csv > pairs.csv
//!
//! # Put more weight on the practice setting
//! preceptor-pairer pair students.csv preceptors.csv --weight-setting 40
//!
//! # Find problems before pairing
//! preceptor-pairer check students.csv preceptors.csv.gz --verbose
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::core::roster::Roster;
use crate::matching::engine::PairingConfig;
use crate::matching::scoring::{ScoringWeights, DEFAULT_NO_PREFERENCE_CREDIT};
use crate::parsing::roster::load_roster;
use crate::parsing::schema::RosterSchema;

pub mod check;
pub mod pair;
pub mod score;

#[derive(Parser)]
#[command(name = "preceptor-pairer")]
#[command(version)]
#[command(about = "Pair students with preceptors by preference compatibility")]
#[command(
    long_about = "preceptor-pairer assigns students to preceptors so that overall preference compatibility is as high as possible.\n\nIt reads a student roster and a preceptor roster and:\n- Honors pre-matches both sides agreed to\n- Scores every remaining student/preceptor pair\n- Finds the optimal one-to-one assignment (Hungarian algorithm)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pair students with preceptors
    Pair(pair::PairArgs),

    /// Show the compatibility of every student/preceptor pair
    Score(score::ScoreArgs),

    /// Validate rosters and pre-matches without pairing
    Check(check::CheckArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// The two roster files every command reads
#[derive(Args)]
pub struct RosterArgs {
    /// Student roster (`;`-delimited, optionally gzipped)
    #[arg(required = true)]
    pub students: PathBuf,

    /// Preceptor roster (`;`-delimited, optionally gzipped)
    #[arg(required = true)]
    pub preceptors: PathBuf,

    /// JSON file overriding the field layout of both rosters
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

impl RosterArgs {
    /// Load the layout and both rosters
    ///
    /// # Errors
    ///
    /// Returns an error if the layout or either roster cannot be read or parsed.
    pub fn load(&self, verbose: bool) -> anyhow::Result<Roster> {
        let schema = load_schema(self.schema.as_deref())?;
        let roster = load_roster(&self.students, &self.preceptors, &schema)?;

        if verbose {
            eprintln!(
                "Read {} students from {} and {} preceptors from {}",
                roster.seekers.len(),
                self.students.display(),
                roster.hosts.len(),
                self.preceptors.display()
            );
        }

        Ok(roster)
    }
}

fn load_schema(path: Option<&Path>) -> anyhow::Result<RosterSchema> {
    Ok(match path {
        Some(path) => RosterSchema::load_from_file(path)?,
        None => RosterSchema::load_embedded()?,
    })
}

/// Scoring options shared by `pair` and `score`
#[derive(Args)]
pub struct WeightArgs {
    /// Weight for practice type preferences (0-100, default 50)
    #[arg(long, default_value = "50", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub weight_practice: u32,

    /// Weight for practice setting preferences (0-100, default 20)
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub weight_setting: u32,

    /// Weight for the preceptor's gender preference (0-100, default 15)
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub weight_gender: u32,

    /// Weight for the preceptor's language requirement (0-100, default 15)
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub weight_language: u32,

    /// Gender/language credit when a preceptor states no preference (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_NO_PREFERENCE_CREDIT, value_parser = parse_credit)]
    pub no_preference_credit: f64,
}

impl WeightArgs {
    /// Build the pairing configuration; weights are normalized to sum to 1.0
    #[must_use]
    pub fn to_config(&self) -> PairingConfig {
        let weights = ScoringWeights {
            practice: f64::from(self.weight_practice) / 100.0,
            setting: f64::from(self.weight_setting) / 100.0,
            gender: f64::from(self.weight_gender) / 100.0,
            language: f64::from(self.weight_language) / 100.0,
        };

        PairingConfig {
            weights: weights.normalized(),
            no_preference_credit: self.no_preference_credit,
        }
    }
}

fn parse_credit(text: &str) -> Result<f64, String> {
    let credit: f64 = text
        .parse()
        .map_err(|_| format!("'{text}' is not a number"))?;
    if !(0.0..=1.0).contains(&credit) {
        return Err(format!("{credit} is not in 0.0-1.0"));
    }
    Ok(credit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_match_library_defaults() {
        let cli = Cli::parse_from(["preceptor-pairer", "pair", "s.csv", "p.csv"]);
        let Commands::Pair(args) = cli.command else {
            panic!("expected pair command");
        };
        let config = args.weights.to_config();
        let defaults = ScoringWeights::default();
        assert!((config.weights.practice - defaults.practice).abs() < 1e-12);
        assert!((config.weights.language - defaults.language).abs() < 1e-12);
        assert!((config.no_preference_credit - DEFAULT_NO_PREFERENCE_CREDIT).abs() < 1e-12);
    }

    #[test]
    fn test_weights_are_normalized() {
        let cli = Cli::parse_from([
            "preceptor-pairer",
            "pair",
            "s.csv",
            "p.csv",
            "--weight-practice",
            "30",
            "--weight-setting",
            "30",
            "--weight-gender",
            "0",
            "--weight-language",
            "0",
        ]);
        let Commands::Pair(args) = cli.command else {
            panic!("expected pair command");
        };
        let config = args.weights.to_config();
        assert!((config.weights.practice - 0.5).abs() < 1e-12);
        assert!((config.weights.setting - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_out_of_range_arguments() {
        assert!(Cli::try_parse_from([
            "preceptor-pairer",
            "pair",
            "s.csv",
            "p.csv",
            "--weight-gender",
            "101"
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "preceptor-pairer",
            "pair",
            "s.csv",
            "p.csv",
            "--no-preference-credit",
            "1.5"
        ])
        .is_err());
    }

    #[test]
    fn test_requires_both_rosters() {
        assert!(Cli::try_parse_from(["preceptor-pairer", "pair", "s.csv"]).is_err());
    }

    #[test]
    fn test_parse_credit() {
        assert_eq!(parse_credit("0.5"), Ok(0.5));
        assert!(parse_credit("high").is_err());
        assert!(parse_credit("-0.1").is_err());
    }
}
