//! Site data model for the lesson index.
//!
//! A [`Site`] is the raw structure produced by ingestion: sections that
//! reference sub-sections and lessons by identifier, and lessons that carry
//! audio and PDF media. Everything downstream (repair, counting, compaction)
//! operates on this model.

pub mod audit;
pub mod convert;
pub mod error;
pub mod model;

pub use audit::{AuditReport, DanglingEdge};
pub use convert::Conversion;
pub use error::ModelError;
pub use model::{Lesson, Media, Node, Section, Site, Slot, Visit, dedup_ids};
