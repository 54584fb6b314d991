use std::collections::BTreeMap;

use lesson_tree_core::Slot;
use serde::{Deserialize, Serialize};

/// A possible fix for a broken or empty reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Correction {
    /// Live identifiers that may be what the reference meant, best first.
    pub guesses: Vec<String>,
    /// Sections that reference the bad identifier.
    pub parents: Vec<String>,
    /// The bad identifier answered a definitive "not found".
    pub is_404: bool,
    /// The bad identifier and the best guess serve identical content.
    pub is_confirmed: bool,
    pub applied: bool,
    /// Slot the broken reference was found in. Rewritten edges keep it.
    pub slot: Slot,
}

impl Correction {
    pub fn new(slot: Slot) -> Self {
        Self {
            guesses: Vec::new(),
            parents: Vec::new(),
            is_404: false,
            is_confirmed: false,
            applied: false,
            slot,
        }
    }

    pub fn best_guess(&self) -> Option<&str> {
        self.guesses.first().map(String::as_str)
    }

    /// A correction is applied only with a guess and some evidence that the
    /// original is really gone or really a duplicate.
    pub fn is_applicable(&self) -> bool {
        !self.guesses.is_empty() && (self.is_confirmed || self.is_404)
    }
}

/// Corrections keyed by the bad identifier.
pub type Corrections = BTreeMap<String, Correction>;

/// Why a reference needed correcting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceProblem {
    /// The target exists in neither mapping.
    MissingReference,
    /// The target exists but holds no content.
    EmptyReference,
}

impl std::fmt::Display for ReferenceProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingReference => write!(f, "missing"),
            Self::EmptyReference => write!(f, "empty"),
        }
    }
}

/// Everything a repair pass found, applied or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepairReport {
    pub missing: Corrections,
    pub empty: Corrections,
}

impl RepairReport {
    pub fn applied_count(&self) -> usize {
        self.all().filter(|(_, _, c)| c.applied).count()
    }

    /// Corrections left for manual review.
    pub fn unresolved(&self) -> Vec<(ReferenceProblem, &str, &Correction)> {
        self.all().filter(|(_, _, c)| !c.applied).collect()
    }

    fn all(&self) -> impl Iterator<Item = (ReferenceProblem, &str, &Correction)> {
        let missing = self
            .missing
            .iter()
            .map(|(id, c)| (ReferenceProblem::MissingReference, id.as_str(), c));
        let empty = self
            .empty
            .iter()
            .map(|(id, c)| (ReferenceProblem::EmptyReference, id.as_str(), c));
        missing.chain(empty)
    }
}
