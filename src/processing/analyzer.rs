//! Main analysis engine: validation, scoring, baseline report and optional AI suggestions

use crate::config::Config;
use crate::error::{DocumentKind, Result, ResumeMatchError};
use crate::llm::provider::{SuggestionProvider, SuggestionRequest};
use crate::processing::report_builder::{baseline_insight, ReportBuilder};
use crate::processing::scoring::{
    ComposedScores, KeywordMatchMode, ScoreComposer, ScoringWeights, SubScoreTable, SubScores,
    DEFAULT_MAX_LISTED_KEYWORDS,
};
use crate::processing::signals::{MarkerLists, SignalDetector, SignalFlags};
use crate::processing::skill_matcher::SkillVocabulary;
use crate::processing::text_processor::{TextProcessor, DEFAULT_MAX_KEYWORDS};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Outcome of scoring one resume against one job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Overall weighted match (0 to 100)
    pub match_percentage: u8,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub scores: SubScores,
    pub signals: SignalFlags,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Knobs for one engine; anything left `None` falls back to the defaults.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub vocabulary: Option<SkillVocabulary>,
    pub weights: Option<ScoringWeights>,
    pub markers: Option<MarkerLists>,
    pub sub_scores: SubScoreTable,
    pub keyword_match_mode: KeywordMatchMode,
    pub max_keywords: usize,
    pub max_listed_keywords: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            vocabulary: None,
            weights: None,
            markers: None,
            sub_scores: SubScoreTable::default(),
            keyword_match_mode: KeywordMatchMode::default(),
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_listed_keywords: DEFAULT_MAX_LISTED_KEYWORDS,
        }
    }
}

impl AnalysisOptions {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            vocabulary: Some(config.skill_vocabulary()?),
            weights: Some(config.scoring.weights),
            markers: Some(config.marker_lists()),
            sub_scores: config.scoring.sub_scores,
            keyword_match_mode: config.scoring.keyword_match_mode,
            max_keywords: config.scoring.max_keywords,
            max_listed_keywords: config.scoring.max_listed_keywords,
        })
    }
}

/// Where the suggestions of a [`SuggestedAnalysis`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Baseline,
    Provider(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAnalysis {
    pub result: AnalysisResult,
    pub insights: String,
    pub source: SuggestionSource,
}

impl SuggestedAnalysis {
    fn baseline(result: AnalysisResult) -> Self {
        let insights = baseline_insight(result.match_percentage, result.missing_keywords.len());
        Self {
            result,
            insights,
            source: SuggestionSource::Baseline,
        }
    }
}

/// Score one resume/job-description pair with default or custom options
pub fn analyze(resume_text: &str, jd_text: &str, options: Option<AnalysisOptions>) -> Result<AnalysisResult> {
    AnalysisEngine::new(options.unwrap_or_default())?.analyze(resume_text, jd_text)
}

/// Stateless after construction; one engine can serve any number of concurrent analyses.
pub struct AnalysisEngine {
    composer: ScoreComposer,
    report_builder: ReportBuilder,
    max_listed_keywords: usize,
}

impl AnalysisEngine {
    /// Build an engine, rejecting invalid weights up front
    pub fn new(options: AnalysisOptions) -> Result<Self> {
        let vocabulary = match options.vocabulary {
            Some(vocabulary) => vocabulary,
            None => SkillVocabulary::new()?,
        };
        let detector = SignalDetector::from_markers(&options.markers.unwrap_or_default())?;
        let weights = options.weights.unwrap_or_default();

        let composer = ScoreComposer::new(
            TextProcessor::with_max_keywords(options.max_keywords),
            vocabulary,
            detector,
            weights,
        )?
        .with_table(options.sub_scores)
        .with_match_mode(options.keyword_match_mode);

        Ok(Self {
            composer,
            report_builder: ReportBuilder::new(),
            max_listed_keywords: options.max_listed_keywords,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(AnalysisOptions::from_config(config)?)
    }

    /// Validate inputs and run the score composer, keeping the full keyword lists
    pub fn compose(&self, resume_text: &str, jd_text: &str) -> Result<ComposedScores> {
        if resume_text.trim().is_empty() {
            return Err(ResumeMatchError::EmptyDocument(DocumentKind::Resume));
        }
        if jd_text.trim().is_empty() {
            return Err(ResumeMatchError::EmptyDocument(DocumentKind::JobDescription));
        }

        Ok(self.composer.compose(resume_text, jd_text))
    }

    /// Deterministic analysis: no I/O, no randomness, no clock
    pub fn analyze(&self, resume_text: &str, jd_text: &str) -> Result<AnalysisResult> {
        let composed = self.compose(resume_text, jd_text)?;
        let report = self.report_builder.build(&composed);
        let (matched_keywords, missing_keywords) = composed.listed_keywords(self.max_listed_keywords);
        let (matched_skills, missing_skills) = composed.listed_skills();

        debug!(
            "Analysis complete: {}% ({} matched / {} missing keywords)",
            composed.match_percentage,
            matched_keywords.len(),
            missing_keywords.len()
        );

        Ok(AnalysisResult {
            match_percentage: composed.match_percentage,
            matched_keywords,
            missing_keywords,
            matched_skills,
            missing_skills,
            scores: composed.scores,
            signals: composed.signals,
            strengths: report.strengths,
            weaknesses: report.weaknesses,
            suggestions: report.suggestions,
        })
    }

    /// Analyze, then let `provider` replace the baseline suggestions.
    ///
    /// The provider gets at most `timeout`. A failure, a timeout or an empty
    /// answer is logged and the baseline suggestions are kept; only input
    /// errors are returned.
    pub async fn analyze_with_suggestions(
        &self,
        resume_text: &str,
        jd_text: &str,
        provider: Option<&dyn SuggestionProvider>,
        timeout: Duration,
    ) -> Result<SuggestedAnalysis> {
        let result = self.analyze(resume_text, jd_text)?;

        let Some(provider) = provider else {
            return Ok(SuggestedAnalysis::baseline(result));
        };

        let request = SuggestionRequest::from_result(&result, resume_text, jd_text);
        let start_time = Instant::now();

        match tokio::time::timeout(timeout, provider.suggest(&request)).await {
            Ok(Ok(ai)) if !ai.suggestions.is_empty() => {
                info!(
                    "Suggestions from {} received in {}ms",
                    provider.name(),
                    start_time.elapsed().as_millis()
                );
                let mut result = result;
                result.suggestions = ai.suggestions;
                Ok(SuggestedAnalysis {
                    result,
                    insights: ai.insights,
                    source: SuggestionSource::Provider(provider.name()),
                })
            }
            Ok(Ok(_)) => {
                warn!("{} returned no suggestions, using baseline suggestions", provider.name());
                Ok(SuggestedAnalysis::baseline(result))
            }
            Ok(Err(e)) => {
                warn!("{} failed, using baseline suggestions: {}", provider.name(), e);
                Ok(SuggestedAnalysis::baseline(result))
            }
            Err(_) => {
                warn!(
                    "{} timed out after {}ms, using baseline suggestions",
                    provider.name(),
                    timeout.as_millis()
                );
                Ok(SuggestedAnalysis::baseline(result))
            }
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        self.composer.weights()
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        self.composer.vocabulary()
    }
}
