use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lesson_tree_lib::snapshot::{load_site, save_json};
use lesson_tree_lib::{PipelineOutput, Settings, run_with_progress};

use crate::CliError;
use crate::spinner::{repair_spinner, show_repair_progress};

/// Run the pipeline command.
pub(crate) fn run_pipeline(
    input: PathBuf,
    output: Option<PathBuf>,
    snapshots: Option<PathBuf>,
    convert_lessons: bool,
    offline: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let mut options = settings.pipeline_options();
    options.convert_lessons |= convert_lessons;
    if snapshots.is_some() {
        options.snapshot_dir = snapshots;
    }
    let output = output.unwrap_or_else(|| input.with_file_name("resolved.json"));

    log::info!(
        "Loading {}",
        input.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    let site = load_site(&input)?;
    log::info!(
        "{} sections, {} lessons, {} top-level",
        site.sections.len(),
        site.lessons.len(),
        site.top_level.len(),
    );

    let probe = super::build_probe(&settings, offline)?;
    let pb = repair_spinner(quiet);
    let out = run_with_progress(site, probe.as_ref(), &options, |p| {
        show_repair_progress(&pb, p)
    })?;
    pb.finish_and_clear();

    print_summary(&out);

    save_json(&output, &out.resolved)?;
    crate::log_blank();
    log::info!(
        "{} {}",
        "Wrote".if_supports_color(Stdout, |t| t.green()),
        output.display(),
    );
    if let Some(dir) = &options.snapshot_dir {
        log::info!(
            "{}",
            format!("Snapshots in {}", dir.display()).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

fn print_summary(out: &PipelineOutput) {
    crate::log_blank();
    if !out.conversions.is_empty() {
        log::info!("Converted {} sections into lessons", out.conversions.len());
    }

    let unresolved = out.report.unresolved();
    log::info!(
        "Applied {} corrections",
        out.report
            .applied_count()
            .if_supports_color(Stdout, |t| t.green()),
    );
    if !unresolved.is_empty() {
        log::warn!(
            "{} corrections need review (run `check` for details)",
            unresolved.len().if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    for edge in &out.detached {
        log::warn!(
            "  Dropped {} reference {} from {}",
            edge.slot,
            edge.child,
            edge.parent.as_deref().unwrap_or("top level"),
        );
    }

    let resolved = &out.resolved;
    let total: usize = resolved
        .top_level
        .iter()
        .filter_map(|id| resolved.sections.get(id))
        .map(|s| s.audio_count)
        .sum();
    log::info!(
        "Resolved {} sections and {} lessons holding {} audio items",
        resolved.sections.len(),
        resolved.lessons.len(),
        total.if_supports_color(Stdout, |t| t.bold()),
    );
}
