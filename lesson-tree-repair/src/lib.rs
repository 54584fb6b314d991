//! Reference integrity repair for a scraped [`Site`](lesson_tree_core::Site).
//!
//! Broken references (targets that were never loaded) and empty ones
//! (targets with no content) are matched against live identifiers by their
//! final path segment, then confirmed over the network before being
//! rewritten.

pub mod correction;
pub mod error;
pub mod matcher;
pub mod probe;
pub mod repairer;

pub use correction::{Correction, Corrections, ReferenceProblem, RepairReport};
pub use error::ProbeError;
pub use matcher::{DEFAULT_LENGTH_TOLERANCE, MatchStrength, final_segment, match_strength};
pub use probe::{
    DEFAULT_USER_AGENT, HttpProbe, MemoryProbe, OfflineProbe, Probe, ProbeOptions, ProbeStatus,
};
pub use repairer::{RepairOptions, RepairProgress, Repairer};
