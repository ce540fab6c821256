//! Error handling for the resume matcher

use std::fmt;
use thiserror::Error;

/// Which of the two input documents an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    JobDescription,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Resume => write!(f, "Resume"),
            DocumentKind::JobDescription => write!(f, "Job description"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ResumeMatchError {
    #[error("{0} text is empty")]
    EmptyDocument(DocumentKind),

    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),

    #[error("Suggestion provider failed: {0}")]
    ExternalSuggestionFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeMatchError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeMatchError {
    fn from(err: anyhow::Error) -> Self {
        ResumeMatchError::Processing(err.to_string())
    }
}

/// Transport failures only ever reach callers as recovered suggestion failures
impl From<reqwest::Error> for ResumeMatchError {
    fn from(err: reqwest::Error) -> Self {
        ResumeMatchError::ExternalSuggestionFailure(err.to_string())
    }
}
