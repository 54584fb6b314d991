use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::error::ProbeError;

pub const DEFAULT_USER_AGENT: &str = "lesson-tree";

/// Outcome of an existence check. Only a definitive "not found" is
/// distinguished; anything else may or may not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    NotFound,
    Reachable,
}

/// Network access used to confirm corrections. Identifiers are treated as
/// URLs.
pub trait Probe {
    /// Lightweight existence check (an HTTP HEAD for the real thing).
    fn status(&self, id: &str) -> Result<ProbeStatus, ProbeError>;

    /// Full content behind an identifier.
    fn fetch(&self, id: &str) -> Result<Vec<u8>, ProbeError>;
}

/// Options for building an [`HttpProbe`].
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub user_agent: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// Blocking HTTP probe. No retries; callers wanting resilience wrap it.
pub struct HttpProbe {
    http: reqwest::blocking::Client,
}

impl HttpProbe {
    pub fn new(options: &ProbeOptions) -> Result<Self, ProbeError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .build()?;
        Ok(Self { http })
    }
}

impl Probe for HttpProbe {
    fn status(&self, id: &str) -> Result<ProbeStatus, ProbeError> {
        let resp = self.http.head(id).send()?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(ProbeStatus::NotFound)
        } else {
            Ok(ProbeStatus::Reachable)
        }
    }

    fn fetch(&self, id: &str) -> Result<Vec<u8>, ProbeError> {
        let resp = self.http.get(id).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProbeError::Status {
                status: status.as_u16(),
                url: id.to_string(),
            });
        }
        Ok(resp.bytes()?.to_vec())
    }
}

/// Probe that never touches the network. Every identifier is reachable but
/// has no content, so nothing is ever confirmed or marked 404.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProbe;

impl Probe for OfflineProbe {
    fn status(&self, _id: &str) -> Result<ProbeStatus, ProbeError> {
        Ok(ProbeStatus::Reachable)
    }

    fn fetch(&self, id: &str) -> Result<Vec<u8>, ProbeError> {
        Err(ProbeError::unavailable(id))
    }
}

/// In-memory probe backed by fixed pages, for fixtures and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryProbe {
    pages: HashMap<String, Vec<u8>>,
    not_found: HashSet<String>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, id: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(id.into(), body.into());
        self
    }

    pub fn with_not_found(mut self, id: impl Into<String>) -> Self {
        self.not_found.insert(id.into());
        self
    }
}

impl Probe for MemoryProbe {
    fn status(&self, id: &str) -> Result<ProbeStatus, ProbeError> {
        if self.not_found.contains(id) {
            Ok(ProbeStatus::NotFound)
        } else {
            Ok(ProbeStatus::Reachable)
        }
    }

    fn fetch(&self, id: &str) -> Result<Vec<u8>, ProbeError> {
        if self.not_found.contains(id) {
            return Err(ProbeError::Status {
                status: 404,
                url: id.to_string(),
            });
        }
        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| ProbeError::unavailable(id))
    }
}
