//! Normalization pipeline for a scraped lesson index.
//!
//! Stages run strictly in order, each with exclusive access to the site:
//! repair ([`lesson_tree_repair`]), counting ([`counter`]), and compaction
//! ([`compactor`]). [`pipeline`] strings them together and persists
//! snapshots between stages.

pub mod compactor;
pub mod counter;
pub mod error;
pub mod pipeline;
pub mod resolved;
pub mod settings;
pub mod snapshot;

pub use compactor::{Compactor, Resolution, resolve_site};
pub use counter::{LessonCounter, count_lessons};
pub use error::PipelineError;
pub use pipeline::{PipelineOptions, PipelineOutput, run, run_with_progress};
pub use resolved::{ContentReference, ResolvedSection, ResolvedSite};
pub use settings::Settings;
pub use snapshot::{SnapshotDir, Stage};

// Re-export the model and repair types so frontends need one dependency.
pub use lesson_tree_core::{
    AuditReport, Conversion, DanglingEdge, Lesson, Media, ModelError, Section, Site, Slot,
};
pub use lesson_tree_repair::{
    Correction, HttpProbe, MemoryProbe, OfflineProbe, Probe, ProbeError, ProbeOptions,
    ReferenceProblem, RepairOptions, RepairProgress, RepairReport, Repairer,
};
