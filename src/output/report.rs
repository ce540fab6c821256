//! Report envelope handed to the presentation layer

use crate::processing::analyzer::{AnalysisResult, SuggestedAnalysis, SuggestionSource};
use crate::processing::scoring::ScoringWeights;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One analysis plus everything needed to present it.
///
/// Serializes with the analysis fields at the top level, so JSON consumers see
/// `matchPercentage`, `matchedKeywords`, ... directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    #[serde(flatten)]
    pub result: AnalysisResult,

    /// Short narrative from the suggestion step, absent for a plain analysis
    pub insights: Option<String>,

    pub suggestion_source: SuggestionSource,

    /// One-line verdict for the score band
    pub verdict: String,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub resume_label: String,
    pub job_label: String,
    pub processing_time_ms: u64,
    pub weights: ScoringWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,    // >= 90
    VeryGood,     // 80-89
    Good,         // 70-79
    Fair,         // 60-69
    BelowAverage, // 50-59
    Poor,         // < 50
}

impl ScoreBand {
    pub fn from_score(match_percentage: u8) -> Self {
        match match_percentage {
            90..=u8::MAX => ScoreBand::Excellent,
            80..=89 => ScoreBand::VeryGood,
            70..=79 => ScoreBand::Good,
            60..=69 => ScoreBand::Fair,
            50..=59 => ScoreBand::BelowAverage,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::VeryGood => "Very Good",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::BelowAverage => "Below Average",
            ScoreBand::Poor => "Poor",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent match - strong candidate for this role",
            ScoreBand::VeryGood => "Very good match - minor improvements could help",
            ScoreBand::Good => "Good match - some targeted improvements recommended",
            ScoreBand::Fair => "Fair match - several improvements needed",
            ScoreBand::BelowAverage => "Below average match - significant improvements required",
            ScoreBand::Poor => "Poor match - major revisions needed",
        }
    }
}

impl ReportMetadata {
    pub fn new(
        resume_label: impl Into<String>,
        job_label: impl Into<String>,
        weights: ScoringWeights,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_label: resume_label.into(),
            job_label: job_label.into(),
            processing_time_ms,
            weights,
        }
    }
}

impl MatchReport {
    /// Report for an analysis that never went through the suggestion step
    pub fn from_analysis(result: AnalysisResult, metadata: ReportMetadata) -> Self {
        let verdict = ScoreBand::from_score(result.match_percentage).verdict().to_string();

        Self {
            result,
            insights: None,
            suggestion_source: SuggestionSource::Baseline,
            verdict,
            metadata,
        }
    }

    pub fn from_suggested(outcome: SuggestedAnalysis, metadata: ReportMetadata) -> Self {
        let mut report = Self::from_analysis(outcome.result, metadata);
        report.insights = Some(outcome.insights);
        report.suggestion_source = outcome.source;
        report
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.result.match_percentage)
    }

    pub fn source_label(&self) -> String {
        match &self.suggestion_source {
            SuggestionSource::Baseline => "rule-based".to_string(),
            SuggestionSource::Provider(name) => name.clone(),
        }
    }
}
