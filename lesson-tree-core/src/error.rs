use thiserror::Error;

/// Errors from local structural mutations of a [`Site`](crate::Site).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The section does not exist or has no lessons to convert.
    #[error("Section has no content to convert: {0}")]
    NoContent(String),

    /// The section is a real structural node (sub-sections, or a lesson
    /// with more than one audio item).
    #[error("Section is too complex to be a lesson: {0}")]
    ComplexLesson(String),

    /// A lesson referenced by the section is absent from the lesson map.
    #[error("Lesson {lesson} referenced by {section} does not exist")]
    MissingLesson { section: String, lesson: String },
}

impl ModelError {
    pub fn no_content(id: impl Into<String>) -> Self {
        Self::NoContent(id.into())
    }

    pub fn complex_lesson(id: impl Into<String>) -> Self {
        Self::ComplexLesson(id.into())
    }

    pub fn missing_lesson(section: impl Into<String>, lesson: impl Into<String>) -> Self {
        Self::MissingLesson {
            section: section.into(),
            lesson: lesson.into(),
        }
    }
}
