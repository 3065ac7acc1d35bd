use clap::Args;

use crate::cli::{OutputFormat, RosterArgs, WeightArgs};
use crate::core::profile::Profile;
use crate::core::roster::Roster;
use crate::matching::engine::{PairingEngine, ScoreTable};

#[derive(Args)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub rosters: RosterArgs,

    #[command(flatten)]
    pub weights: WeightArgs,
}

/// Execute score subcommand
///
/// # Errors
///
/// Returns an error if either roster cannot be parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let roster = args.rosters.load(verbose)?;
    let engine = PairingEngine::with_config(&roster, args.weights.to_config());
    let table = engine.score_table();

    if table.seekers.is_empty() || table.hosts.is_empty() {
        eprintln!("No pairable students or preceptors to score.");
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_text_matrix(&roster, &table),
        OutputFormat::Json => print_json_scores(&roster, &table)?,
        OutputFormat::Csv => print_csv_scores(&roster, &table),
    }

    Ok(())
}

fn print_text_matrix(roster: &Roster, table: &ScoreTable) {
    let labels: Vec<String> = table.seekers.iter().map(|&s| roster.seekers[s].name()).collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(7);

    println!("Preceptors:");
    for (col, &h) in table.hosts.iter().enumerate() {
        println!("  [{:>2}] {}", col + 1, roster.hosts[h].name());
    }
    println!();

    let header: String = (1..=table.hosts.len()).map(|c| format!("  [{c:>2}]")).collect();
    println!("{:<label_width$}{header}", "Student");
    for (label, row) in labels.iter().zip(&table.scores) {
        let cells: String = row
            .iter()
            .map(|score| format!("{:>6.1}", score.composite * 100.0))
            .collect();
        println!("{label:<label_width$}{cells}");
    }
}

fn print_json_scores(roster: &Roster, table: &ScoreTable) -> anyhow::Result<()> {
    let mut output = Vec::new();
    for (&s, row) in table.seekers.iter().zip(&table.scores) {
        for (&h, score) in table.hosts.iter().zip(row) {
            output.push(serde_json::json!({
                "student": roster.seekers[s].name(),
                "preceptor": roster.hosts[h].name(),
                "score": score,
            }));
        }
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_csv_scores(roster: &Roster, table: &ScoreTable) {
    println!("student;preceptor;composite;practice;setting;gender;language");
    for (&s, row) in table.seekers.iter().zip(&table.scores) {
        for (&h, score) in table.hosts.iter().zip(row) {
            println!(
                "{};{};{:.4};{:.4};{:.4};{:.4};{:.4}",
                roster.seekers[s].name(),
                roster.hosts[h].name(),
                score.composite,
                score.practice_quality,
                score.setting_quality,
                score.gender_quality,
                score.language_quality
            );
        }
    }
}
