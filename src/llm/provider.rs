//! Suggestion provider abstraction

use crate::error::Result;
use crate::processing::analyzer::AnalysisResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Everything a provider may see about one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub match_percentage: u8,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub resume_text: String,
    pub jd_text: String,
}

impl SuggestionRequest {
    pub fn from_result(result: &AnalysisResult, resume_text: &str, jd_text: &str) -> Self {
        Self {
            match_percentage: result.match_percentage,
            matched_keywords: result.matched_keywords.clone(),
            missing_keywords: result.missing_keywords.clone(),
            matched_skills: result.matched_skills.clone(),
            missing_skills: result.missing_skills.clone(),
            resume_text: resume_text.to_string(),
            jd_text: jd_text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSuggestions {
    pub suggestions: Vec<String>,
    pub insights: String,
}

/// An external generator of natural-language suggestions.
///
/// Implementations are constructed explicitly and handed to the caller that
/// orchestrates an analysis. Any error they return is recovered by falling
/// back to the baseline report.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Short label recorded in reports, e.g. `ollama:llama3.1`
    fn name(&self) -> String;

    async fn suggest(&self, request: &SuggestionRequest) -> Result<AiSuggestions>;
}
