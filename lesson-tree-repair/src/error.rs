/// Errors from network probes. These never abort a repair; a failed probe
/// simply contributes no information.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("No content available for {0}")]
    Unavailable(String),
}

impl ProbeError {
    pub fn unavailable(url: impl Into<String>) -> Self {
        Self::Unavailable(url.into())
    }
}
