use clap::Args;

use crate::cli::{OutputFormat, RosterArgs, WeightArgs};
use crate::core::host::Host;
use crate::core::profile::Profile;
use crate::core::roster::Roster;
use crate::matching::engine::{MatchRecord, PairingConfig, PairingEngine, PairingOutcome};

#[derive(Args)]
pub struct PairArgs {
    #[command(flatten)]
    pub rosters: RosterArgs,

    #[command(flatten)]
    pub weights: WeightArgs,
}

/// Execute pair subcommand
///
/// # Errors
///
/// Returns an error if either roster cannot be parsed or the pre-matches
/// of the two rosters disagree.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PairArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let roster = args.rosters.load(verbose)?;
    let config = args.weights.to_config();

    if verbose {
        let w = &config.weights;
        eprintln!(
            "Scoring weights: {:.0}% practice, {:.0}% setting, {:.0}% gender, {:.0}% language",
            w.practice * 100.0,
            w.setting * 100.0,
            w.gender * 100.0,
            w.language * 100.0,
        );
    }

    let engine = PairingEngine::with_config(&roster, config);
    let outcome = engine.run()?;

    match format {
        OutputFormat::Text => print_text_results(&roster, &outcome, verbose),
        OutputFormat::Json => print_json_results(&roster, &outcome, engine.config())?,
        OutputFormat::Csv => print_csv_results(&roster, &outcome),
    }

    Ok(())
}

fn counterpart<'r>(roster: &'r Roster, record: &MatchRecord) -> Option<&'r Host> {
    record.host.and_then(|h| roster.host(h))
}

fn print_text_results(roster: &Roster, outcome: &PairingOutcome, verbose: bool) {
    let rows: Vec<(String, String, String, String)> = outcome
        .records
        .iter()
        .map(|record| {
            let student = roster.seekers[record.seeker].name();
            let preceptor = counterpart(roster, record).map_or_else(|| "-".to_string(), Host::name);
            let quality = record
                .quality
                .map_or_else(|| "-".to_string(), |q| format!("{:.1}%", q * 100.0));
            (student, record.kind.to_string(), preceptor, quality)
        })
        .collect();

    let name_width = rows.iter().map(|r| r.0.chars().count()).max().unwrap_or(0).max(7);
    let kind_width = 11;
    let preceptor_width = rows.iter().map(|r| r.2.chars().count()).max().unwrap_or(0).max(9);

    println!(
        "{:<name_width$}  {:<kind_width$}  {:<preceptor_width$}  Quality",
        "Student", "Match", "Preceptor"
    );
    println!("{}", "─".repeat(name_width + kind_width + preceptor_width + 13));
    for (student, kind, preceptor, quality) in &rows {
        println!("{student:<name_width$}  {kind:<kind_width$}  {preceptor:<preceptor_width$}  {quality}");
    }

    println!();
    println!(
        "{} pre-matched, {} matched, {} unmatched",
        outcome.pre_count(),
        outcome.algorithmic_count(),
        outcome.unmatched_count()
    );

    if !outcome.unmatched_hosts.is_empty() {
        println!("\nPreceptors without a student:");
        for &h in &outcome.unmatched_hosts {
            let host = &roster.hosts[h];
            if verbose {
                println!("  - {} ({})", host.name(), host.location);
            } else {
                println!("  - {}", host.name());
            }
        }
    }
}

fn print_json_results(
    roster: &Roster,
    outcome: &PairingOutcome,
    config: &PairingConfig,
) -> anyhow::Result<()> {
    let matches: Vec<serde_json::Value> = outcome
        .records
        .iter()
        .map(|record| {
            let host = counterpart(roster, record);
            serde_json::json!({
                "student": roster.seekers[record.seeker].name(),
                "match_kind": record.kind,
                "preceptor": host.map(Host::name),
                "location": host.map(|h| h.location.as_str()),
                "category": host.map(|h| h.practice_type.as_str()),
                "preferred_day": host.map(|h| h.preferred_day.as_str()),
                "quality": record.quality,
            })
        })
        .collect();

    let unmatched: Vec<serde_json::Value> = outcome
        .unmatched_hosts
        .iter()
        .map(|&h| {
            let host = &roster.hosts[h];
            serde_json::json!({
                "preceptor": host.name(),
                "location": host.location,
            })
        })
        .collect();

    let output = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "weights": config.weights,
        "no_preference_credit": config.no_preference_credit,
        "matches": matches,
        "unmatched_preceptors": unmatched,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_csv_results(roster: &Roster, outcome: &PairingOutcome) {
    println!("name;match_kind;counterpart;location;category;preferred_day");
    for record in &outcome.records {
        let student = roster.seekers[record.seeker].name();
        match counterpart(roster, record) {
            Some(host) => println!(
                "{};{};{};{};{};{}",
                csv_field(&student),
                record.kind,
                csv_field(&host.name()),
                csv_field(&host.location),
                csv_field(&host.practice_type),
                csv_field(&host.preferred_day)
            ),
            None => println!("{};{};;;;", csv_field(&student), record.kind),
        }
    }
}

/// Keep a free-text value inside its column
fn csv_field(value: &str) -> String {
    value.replace(';', ",")
}
