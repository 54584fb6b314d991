use thiserror::Error;

/// Errors that can stop a pipeline run. Reference problems are not errors;
/// they end up in the [`RepairReport`](lesson_tree_repair::RepairReport).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl PipelineError {
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

/// A lesson reference that survived repair without a target. Repair plus
/// detaching guarantees this never happens, so continuing would silently
/// drop content.
pub(crate) fn missing_lesson(parent: &str, lesson: &str) -> ! {
    panic!("lesson {lesson} referenced by section {parent} does not exist; repair must run first")
}
