use clap::Args;

use crate::cli::{OutputFormat, RosterArgs};
use crate::core::profile::{Insufficiency, Profile};
use crate::core::roster::Roster;
use crate::matching::engine::PairingEngine;
use crate::matching::reconcile::Reconciliation;

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub rosters: RosterArgs,
}

/// A profile that cannot be scored
struct Problem<'r> {
    role: &'static str,
    name: String,
    reason: &'r Insufficiency,
}

/// Execute check subcommand
///
/// # Errors
///
/// Returns an error if either roster cannot be parsed or the pre-matches
/// of the two rosters disagree.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CheckArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let roster = args.rosters.load(verbose)?;
    let reconciliation = PairingEngine::new(&roster).reconcile()?;
    let problems = collect_problems(&roster);

    match format {
        OutputFormat::Text => print_text_report(&roster, &reconciliation, &problems),
        OutputFormat::Json => print_json_report(&roster, &reconciliation, &problems)?,
        OutputFormat::Csv => print_csv_report(&problems),
    }

    Ok(())
}

fn collect_problems(roster: &Roster) -> Vec<Problem<'_>> {
    let seekers = roster.seekers.iter().filter_map(|s| {
        s.status.insufficiency().map(|reason| Problem {
            role: "student",
            name: s.name(),
            reason,
        })
    });
    let hosts = roster.hosts.iter().filter_map(|h| {
        h.status.insufficiency().map(|reason| Problem {
            role: "preceptor",
            name: h.name(),
            reason,
        })
    });
    seekers.chain(hosts).collect()
}

fn print_text_report(roster: &Roster, reconciliation: &Reconciliation, problems: &[Problem<'_>]) {
    println!(
        "Students:    {} ({} pairable)",
        roster.seekers.len(),
        roster.pairable_seekers().count()
    );
    println!(
        "Preceptors:  {} ({} pairable)",
        roster.hosts.len(),
        roster.pairable_hosts().count()
    );
    println!("Pre-matches: {}", reconciliation.pre_matches.len());
    for pre in &reconciliation.pre_matches {
        println!(
            "  - {} <-> {}",
            roster.seekers[pre.seeker].name(),
            roster.hosts[pre.host].name()
        );
    }
    println!(
        "To optimize: {} students x {} preceptors",
        reconciliation.seeker_pool.len(),
        reconciliation.host_pool.len()
    );

    if problems.is_empty() {
        println!("\nAll profiles are complete.");
        return;
    }

    println!("\nIncomplete profiles:");
    for problem in problems {
        println!("  - {} {}: {}", problem.role, problem.name, problem.reason);
    }
}

fn print_json_report(
    roster: &Roster,
    reconciliation: &Reconciliation,
    problems: &[Problem<'_>],
) -> anyhow::Result<()> {
    let pre_matches: Vec<serde_json::Value> = reconciliation
        .pre_matches
        .iter()
        .map(|pre| {
            serde_json::json!({
                "student": roster.seekers[pre.seeker].name(),
                "preceptor": roster.hosts[pre.host].name(),
            })
        })
        .collect();

    let incomplete: Vec<serde_json::Value> = problems
        .iter()
        .map(|p| {
            let issues: Vec<String> = p.reason.issues.iter().map(ToString::to_string).collect();
            serde_json::json!({
                "role": p.role,
                "name": p.name,
                "issues": issues,
            })
        })
        .collect();

    let output = serde_json::json!({
        "students": roster.seekers.len(),
        "preceptors": roster.hosts.len(),
        "students_to_optimize": reconciliation.seeker_pool.len(),
        "preceptors_to_optimize": reconciliation.host_pool.len(),
        "pre_matches": pre_matches,
        "incomplete": incomplete,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_csv_report(problems: &[Problem<'_>]) {
    println!("role;name;field;issue");
    for problem in problems {
        for issue in &problem.reason.issues {
            println!(
                "{};{};{};{}",
                problem.role,
                problem.name,
                issue.field,
                issue.error.to_string().replace(';', ",")
            );
        }
    }
}
