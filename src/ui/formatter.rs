//! Pure formatting functions for UI output.
//!
//! Standard output is reserved for machine-readable results (the impact
//! report or the notes document). Everything aimed at a human goes to
//! standard error.

use console::style;

use crate::analyzer::ImpactResult;
use crate::cli::orchestration::NotesReport;

/// Render the impact report as three `key=value` lines.
///
/// Values are emitted verbatim; rule descriptions escape control characters,
/// so the detail never spans more than one line.
pub fn format_impact_report(result: &ImpactResult) -> String {
    format!(
        "impact={}\nrule_label={}\nrule_detail={}\n",
        result.impact, result.rule_label, result.rule_detail
    )
}

/// One-line summary of a notes run
pub fn format_notes_summary(report: &NotesReport) -> String {
    let from = report.previous_tag.as_deref().unwrap_or("repository root");
    match report.impact {
        Some(impact) => format!(
            "{} commits since {} ({} release) -> {}",
            report.commit_count, from, impact, report.version
        ),
        None => format!(
            "{} commits since {} -> {}",
            report.commit_count, from, report.version
        ),
    }
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a warning in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Format and print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}
