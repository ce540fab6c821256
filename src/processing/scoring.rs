//! Sub-score computation and the weighted composite match percentage

use crate::error::{Result, ResumeMatchError};
use crate::processing::signals::{SignalDetector, SignalFlags};
use crate::processing::skill_matcher::{SkillSet, SkillVocabulary};
use crate::processing::text_processor::{KeywordSet, TextProcessor};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum deviation of the weight sum from 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-3;

/// Default cap on matched/missing keyword lists handed to consumers
pub const DEFAULT_MAX_LISTED_KEYWORDS: usize = 20;

/// Relative weight of each sub-score in the overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub keyword: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::ats_biased()
    }
}

impl ScoringWeights {
    pub fn new(keyword: f64, skills: f64, experience: f64, education: f64) -> Result<Self> {
        let weights = Self {
            keyword,
            skills,
            experience,
            education,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// 50/35/10/5: literal keyword presence dominates, as in real ATS filters
    pub fn ats_biased() -> Self {
        Self {
            keyword: 0.5,
            skills: 0.35,
            experience: 0.1,
            education: 0.05,
        }
    }

    /// 40/40/10/10: keywords and skills weighted equally
    pub fn balanced() -> Self {
        Self {
            keyword: 0.4,
            skills: 0.4,
            experience: 0.1,
            education: 0.1,
        }
    }

    pub fn sum(&self) -> f64 {
        self.keyword + self.skills + self.experience + self.education
    }

    pub fn validate(&self) -> Result<()> {
        let parts = [
            ("keyword", self.keyword),
            ("skills", self.skills),
            ("experience", self.experience),
            ("education", self.education),
        ];

        for (name, value) in parts {
            if !value.is_finite() || value < 0.0 {
                return Err(ResumeMatchError::InvalidWeights(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ResumeMatchError::InvalidWeights(format!(
                "weights must sum to 1.0, got {:.4}",
                sum
            )));
        }

        Ok(())
    }
}

/// Fixed sub-score values for the boolean signals and the neutral skills default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScoreTable {
    pub experience_present: u8,
    pub experience_absent: u8,
    pub education_present: u8,
    pub education_absent: u8,
    /// Skills score when the job description names no known skill
    pub skills_neutral: u8,
}

impl Default for SubScoreTable {
    fn default() -> Self {
        Self {
            experience_present: 70,
            experience_absent: 40,
            education_present: 80,
            education_absent: 50,
            skills_neutral: 50,
        }
    }
}

/// How a job-description keyword is judged present in the resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMatchMode {
    /// Substring of the whole lowercased resume text, even a single occurrence
    #[default]
    ResumeText,
    /// Member of the resume's own extracted keyword set
    ExtractedKeywords,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    pub keyword_match: u8,
    pub skills_match: u8,
    pub experience_match: u8,
    pub education_match: u8,
}

/// Everything the composer derives from one resume/job-description pair.
///
/// Keyword lists are complete here; consumers get capped copies through
/// [`ComposedScores::listed_keywords`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedScores {
    pub jd_keywords: KeywordSet,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
    pub signals: SignalFlags,
    pub scores: SubScores,
    pub match_percentage: u8,
}

impl ComposedScores {
    /// Matched and missing keywords capped to `limit`, missing never repeating a matched entry
    pub fn listed_keywords(&self, limit: usize) -> (Vec<String>, Vec<String>) {
        disjoint_lists(&self.matched_keywords, &self.missing_keywords, limit)
    }

    /// Matched and missing skills, missing never repeating a matched entry
    pub fn listed_skills(&self) -> (Vec<String>, Vec<String>) {
        disjoint_lists(
            self.matched_skills.as_slice(),
            self.missing_skills.as_slice(),
            usize::MAX,
        )
    }
}

fn disjoint_lists(matched: &[String], missing: &[String], limit: usize) -> (Vec<String>, Vec<String>) {
    let matched_lower: HashSet<String> = matched.iter().map(|m| m.to_lowercase()).collect();

    let listed_missing = missing
        .iter()
        .filter(|m| !matched_lower.contains(&m.to_lowercase()))
        .take(limit)
        .cloned()
        .collect();

    (matched.iter().take(limit).cloned().collect(), listed_missing)
}

/// Combines keyword, skill and signal evidence into sub-scores and one percentage.
pub struct ScoreComposer {
    text_processor: TextProcessor,
    vocabulary: SkillVocabulary,
    detector: SignalDetector,
    weights: ScoringWeights,
    table: SubScoreTable,
    match_mode: KeywordMatchMode,
}

impl ScoreComposer {
    pub fn new(
        text_processor: TextProcessor,
        vocabulary: SkillVocabulary,
        detector: SignalDetector,
        weights: ScoringWeights,
    ) -> Result<Self> {
        weights.validate()?;

        Ok(Self {
            text_processor,
            vocabulary,
            detector,
            weights,
            table: SubScoreTable::default(),
            match_mode: KeywordMatchMode::default(),
        })
    }

    pub fn with_table(mut self, table: SubScoreTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_match_mode(mut self, match_mode: KeywordMatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn compose(&self, resume_text: &str, jd_text: &str) -> ComposedScores {
        let jd_keywords = self.text_processor.extract_keywords(jd_text);

        let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = match self.match_mode {
            KeywordMatchMode::ResumeText => {
                let resume_lower = resume_text.to_lowercase();
                jd_keywords
                    .iter()
                    .cloned()
                    .partition(|k| resume_lower.contains(k.as_str()))
            }
            KeywordMatchMode::ExtractedKeywords => {
                let resume_keywords = self.text_processor.extract_keywords(resume_text);
                jd_keywords
                    .iter()
                    .cloned()
                    .partition(|k| resume_keywords.contains(k))
            }
        };

        let keyword_score = if jd_keywords.is_empty() {
            0.0
        } else {
            matched_keywords.len() as f64 / jd_keywords.len() as f64 * 100.0
        };

        let jd_skills = self.vocabulary.match_skills(jd_text);
        let resume_skills = self.vocabulary.match_skills(resume_text);
        let matched_skills = jd_skills.intersection(&resume_skills);
        let missing_skills = jd_skills.difference(&matched_skills);

        let skills_score = if jd_skills.is_empty() {
            f64::from(self.table.skills_neutral)
        } else {
            matched_skills.len() as f64 / jd_skills.len() as f64 * 100.0
        };

        let signals = self.detector.detect(resume_text);
        let experience_score = if signals.has_experience_markers {
            self.table.experience_present
        } else {
            self.table.experience_absent
        };
        let education_score = if signals.has_education_markers {
            self.table.education_present
        } else {
            self.table.education_absent
        };

        let weighted = keyword_score * self.weights.keyword
            + skills_score * self.weights.skills
            + f64::from(experience_score) * self.weights.experience
            + f64::from(education_score) * self.weights.education;
        let match_percentage = to_percentage(weighted);

        debug!(
            "Keywords {}/{} matched, skills {}/{} matched, signals {:?}",
            matched_keywords.len(),
            jd_keywords.len(),
            matched_skills.len(),
            jd_skills.len(),
            signals
        );
        debug!(
            "Sub-scores: keyword {:.1}, skills {:.1}, experience {}, education {} -> {}%",
            keyword_score, skills_score, experience_score, education_score, match_percentage
        );

        ComposedScores {
            jd_keywords,
            matched_keywords,
            missing_keywords,
            matched_skills,
            missing_skills,
            signals,
            scores: SubScores {
                keyword_match: to_percentage(keyword_score),
                skills_match: to_percentage(skills_score),
                experience_match: experience_score,
                education_match: education_score,
            },
            match_percentage,
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn table(&self) -> &SubScoreTable {
        &self.table
    }

    pub fn match_mode(&self) -> KeywordMatchMode {
        self.match_mode
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }
}

fn to_percentage(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
