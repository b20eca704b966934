//! Error types for survey operations
//!
//! Provides unified error handling for registry mutations, persistence and
//! response collection.

use thiserror::Error;

/// Errors that can occur while editing, saving or answering a survey
#[derive(Error, Debug)]
pub enum SurveyError {
    /// Input rejected before anything was changed (blank title, no pages,
    /// missing required answers)
    #[error("{0}")]
    Validation(String),

    /// A reference to an entity that does not exist
    #[error("Unknown {entity}: {id}")]
    Reference { entity: &'static str, id: String },

    /// No free survey code was found within the attempt budget
    #[error("Could not generate a unique survey code after {attempts} attempts")]
    CodeGenerationExhausted { attempts: usize },

    /// Lookup by id or code found nothing
    #[error("Survey not found: {0}")]
    NotFound(String),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`SurveyError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Reference,
    CodeGenerationExhausted,
    NotFound,
    Storage,
}

impl SurveyError {
    pub fn validation(message: impl Into<String>) -> Self {
        SurveyError::Validation(message.into())
    }

    pub fn reference(entity: &'static str, id: impl Into<String>) -> Self {
        SurveyError::Reference {
            entity,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SurveyError::Validation(_) => ErrorKind::Validation,
            SurveyError::Reference { .. } => ErrorKind::Reference,
            SurveyError::CodeGenerationExhausted { .. } => ErrorKind::CodeGenerationExhausted,
            SurveyError::NotFound(_) => ErrorKind::NotFound,
            SurveyError::Io(_) | SurveyError::Json(_) => ErrorKind::Storage,
        }
    }
}

/// Result type alias for survey operations
pub type SurveyResult<T> = Result<T, SurveyError>;
