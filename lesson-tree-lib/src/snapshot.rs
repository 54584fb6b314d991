//! JSON snapshots of the site between pipeline stages.

use std::path::{Path, PathBuf};

use lesson_tree_core::Site;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PipelineError;
use crate::resolved::ResolvedSite;

/// A point in the pipeline at which a snapshot is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Input as loaded.
    Raw,
    /// After lesson conversion, when enabled.
    Converted,
    Repaired,
    Counted,
    Resolved,
    /// The repair report.
    Corrections,
}

impl Stage {
    pub fn file_name(self) -> &'static str {
        match self {
            Stage::Raw => "raw.json",
            Stage::Converted => "converted.json",
            Stage::Repaired => "repaired.json",
            Stage::Counted => "counted.json",
            Stage::Resolved => "resolved.json",
            Stage::Corrections => "corrections.json",
        }
    }
}

/// Directory receiving one JSON file per [`Stage`].
#[derive(Debug, Clone)]
pub struct SnapshotDir {
    root: PathBuf,
}

impl SnapshotDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, stage: Stage) -> PathBuf {
        self.root.join(stage.file_name())
    }

    pub fn write<T: Serialize>(&self, stage: Stage, value: &T) -> Result<(), PipelineError> {
        let path = self.path(stage);
        save_json(&path, value)?;
        log::debug!("Wrote snapshot {}", path.display());
        Ok(())
    }
}

pub fn load_site(path: &Path) -> Result<Site, PipelineError> {
    load_json(path)
}

pub fn load_resolved(path: &Path) -> Result<ResolvedSite, PipelineError> {
    load_json(path)
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, PipelineError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Write pretty JSON, creating parent directories. The file is replaced
/// atomically.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/snapshot_tests.rs"]
mod tests;
