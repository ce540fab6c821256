//! Text processing and scoring module

pub mod text_processor;
pub mod skill_matcher;
pub mod signals;
pub mod scoring;
pub mod report_builder;
pub mod analyzer;

pub use analyzer::{analyze, AnalysisEngine, AnalysisOptions, AnalysisResult, SuggestedAnalysis, SuggestionSource};
