//! User settings: `~/.config/lesson-tree/settings.toml` plus environment
//! overrides.
//!
//! Priority: env vars > settings file > defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use lesson_tree_repair::{DEFAULT_LENGTH_TOLERANCE, ProbeOptions, RepairOptions};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::pipeline::PipelineOptions;

pub const ENV_USER_AGENT: &str = "LESSON_TREE_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "LESSON_TREE_TIMEOUT_SECS";
pub const ENV_SNAPSHOT_DIR: &str = "LESSON_TREE_SNAPSHOT_DIR";

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("lesson-tree").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub probe: ProbeSettings,
    pub repair: RepairSettings,
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub user_agent: String,
    /// Per-request timeout. Unset waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            user_agent: lesson_tree_repair::DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairSettings {
    pub length_tolerance: usize,
}

impl Default for RepairSettings {
    fn default() -> Self {
        Self {
            length_tolerance: DEFAULT_LENGTH_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Convert sections that only wrap lessons before repairing.
    pub convert_lessons: bool,
    pub snapshot_dir: Option<PathBuf>,
}

impl Settings {
    /// Load from the canonical path, then apply environment overrides.
    pub fn load() -> Result<Self, PipelineError> {
        let mut settings = Self::from_path(&settings_path())?;
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Read a settings file. A missing file yields the defaults.
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, PipelineError> {
        toml::from_str(contents).map_err(|e| PipelineError::settings(e.to_string()))
    }

    /// Apply overrides from `lookup`, normally the process environment.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), PipelineError> {
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            self.probe.user_agent = agent;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse().map_err(|_| {
                PipelineError::settings(format!(
                    "{ENV_TIMEOUT_SECS} must be whole seconds, got {secs:?}"
                ))
            })?;
            self.probe.timeout_secs = Some(secs);
        }
        if let Some(dir) = lookup(ENV_SNAPSHOT_DIR) {
            self.pipeline.snapshot_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            user_agent: self.probe.user_agent.clone(),
            timeout: self.probe.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn repair_options(&self) -> RepairOptions {
        RepairOptions {
            length_tolerance: self.repair.length_tolerance,
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            convert_lessons: self.pipeline.convert_lessons,
            snapshot_dir: self.pipeline.snapshot_dir.clone(),
            repair: self.repair_options(),
        }
    }

    /// Effective settings as pretty TOML, for display.
    pub fn to_toml(&self) -> Result<String, PipelineError> {
        toml::to_string_pretty(self).map_err(|e| PipelineError::settings(e.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
