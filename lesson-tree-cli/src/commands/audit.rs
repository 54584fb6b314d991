use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lesson_tree_lib::snapshot::load_site;

use crate::CliError;

/// Run the audit command. Fails when the site is not clean.
pub(crate) fn run_audit(input: PathBuf) -> Result<(), CliError> {
    let site = load_site(&input)?;
    let report = site.audit();

    if report.is_clean() {
        log::info!(
            "{}",
            "No dangling references or empty nodes".if_supports_color(Stdout, |t| t.green()),
        );
        return Ok(());
    }

    if !report.dangling.is_empty() {
        log::warn!("{} dangling references", report.dangling.len());
        for edge in &report.dangling {
            log::warn!(
                "  {} -> {} ({})",
                edge.parent.as_deref().unwrap_or("top level"),
                edge.child,
                edge.slot,
            );
        }
    }
    if !report.empty_sections.is_empty() {
        log::warn!("{} empty sections", report.empty_sections.len());
        for id in &report.empty_sections {
            log::warn!("  {id}");
        }
    }
    if !report.empty_lessons.is_empty() {
        log::warn!("{} empty lessons", report.empty_lessons.len());
        for id in &report.empty_lessons {
            log::warn!("  {id}");
        }
    }

    Err(CliError::unresolved(format!(
        "{} problems found",
        report.dangling.len() + report.empty_sections.len() + report.empty_lessons.len()
    )))
}
