//! Resume match library
//!
//! Scores a resume against a job description the way keyword-driven applicant
//! tracking systems do, and explains the score with matched and missing terms,
//! strengths, weaknesses and suggestions.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod llm;
pub mod output;

pub use config::Config;
pub use error::{DocumentKind, Result, ResumeMatchError};
pub use processing::analyzer::{analyze, AnalysisEngine, AnalysisOptions, AnalysisResult};
pub use processing::scoring::{KeywordMatchMode, ScoringWeights};
