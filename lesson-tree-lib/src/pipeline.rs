//! The full normalization run: convert, repair, detach, count, resolve.

use std::path::PathBuf;

use lesson_tree_core::{Conversion, DanglingEdge, Site};
use lesson_tree_repair::{Probe, RepairOptions, RepairProgress, RepairReport, Repairer};

use crate::compactor::resolve_site;
use crate::counter::count_lessons;
use crate::error::PipelineError;
use crate::resolved::ResolvedSite;
use crate::snapshot::{SnapshotDir, Stage};

/// Options for [`run`].
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Convert sections that only wrap lessons into lessons before repair.
    pub convert_lessons: bool,
    /// Write a JSON snapshot after every stage into this directory.
    pub snapshot_dir: Option<PathBuf>,
    pub repair: RepairOptions,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The site after repair and counting.
    pub site: Site,
    pub resolved: ResolvedSite,
    pub report: RepairReport,
    pub conversions: Vec<Conversion>,
    /// References still dangling after repair, removed before counting.
    pub detached: Vec<DanglingEdge>,
}

pub fn run(
    site: Site,
    probe: &dyn Probe,
    options: &PipelineOptions,
) -> Result<PipelineOutput, PipelineError> {
    run_with_progress(site, probe, options, |_| {})
}

/// Run every stage in order, each with exclusive access to the site.
pub fn run_with_progress(
    mut site: Site,
    probe: &dyn Probe,
    options: &PipelineOptions,
    progress: impl Fn(RepairProgress),
) -> Result<PipelineOutput, PipelineError> {
    let snapshots = options.snapshot_dir.as_ref().map(SnapshotDir::new);
    let snapshots = snapshots.as_ref();

    write_snapshot(snapshots, Stage::Raw, &site)?;
    let conversions = if options.convert_lessons {
        let conversions = site.convert_disguised_lessons();
        write_snapshot(snapshots, Stage::Converted, &site)?;
        conversions
    } else {
        Vec::new()
    };

    log::info!(
        "Repairing {} sections and {} lessons",
        site.sections.len(),
        site.lessons.len()
    );
    let report = Repairer::new(probe)
        .with_options(options.repair.clone())
        .fix_site_with_progress(&mut site, progress);
    let detached = site.detach_dangling();
    write_snapshot(snapshots, Stage::Repaired, &site)?;
    write_snapshot(snapshots, Stage::Corrections, &report)?;

    count_lessons(&mut site);
    write_snapshot(snapshots, Stage::Counted, &site)?;

    let resolved = resolve_site(&site);
    write_snapshot(snapshots, Stage::Resolved, &resolved)?;

    Ok(PipelineOutput {
        site,
        resolved,
        report,
        conversions,
        detached,
    })
}

fn write_snapshot<T: serde::Serialize>(
    dir: Option<&SnapshotDir>,
    stage: Stage,
    value: &T,
) -> Result<(), PipelineError> {
    match dir {
        Some(dir) => dir.write(stage, value),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
