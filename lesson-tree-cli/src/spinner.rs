//! Spinner feedback while references are probed.

use indicatif::{ProgressBar, ProgressStyle};
use lesson_tree_lib::RepairProgress;

/// A ticking spinner, or a hidden one when `quiet`.
pub(crate) fn repair_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Progress callback body for [`lesson_tree_lib::run_with_progress`].
pub(crate) fn show_repair_progress(pb: &ProgressBar, progress: RepairProgress) {
    match progress {
        RepairProgress::Probing {
            problem,
            ref id,
            index,
            total,
        } => {
            pb.set_message(format!("[{}/{}] Probing {problem} {id}", index + 1, total));
        }
        RepairProgress::Applied {
            ref id,
            ref replacement,
        } => {
            pb.suspend(|| log::debug!("Replaced {id} with {replacement}"));
        }
        RepairProgress::Done { .. } => {
            pb.finish_and_clear();
        }
    }
}
