//! Deterministic strengths, weaknesses and suggestions derived from composed scores

use crate::processing::scoring::ComposedScores;
use serde::{Deserialize, Serialize};

const STRENGTH_PLACEHOLDER: &str = "Resume submitted successfully";
const WEAKNESS_PLACEHOLDER: &str = "No major weaknesses identified";
const SUGGESTION_PLACEHOLDER: &str = "Your resume looks good!";

/// How many items a templated list mentions
const TOP_N: usize = 5;

const STRONG_SKILLS_ABOVE: usize = 3;
const GOOD_ALIGNMENT_ABOVE: u8 = 70;
const MISSING_SKILLS_ABOVE: usize = 5;
const MISSING_KEYWORDS_ABOVE: usize = 10;
const LOW_MATCH_BELOW: u8 = 50;
const TAILOR_BELOW: u8 = 70;

/// Template-filled feedback; never empty in any category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineReport {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, composed: &ComposedScores) -> BaselineReport {
        BaselineReport {
            strengths: self.strengths(composed),
            weaknesses: self.weaknesses(composed),
            suggestions: self.suggestions(composed),
        }
    }

    fn strengths(&self, composed: &ComposedScores) -> Vec<String> {
        let mut strengths = Vec::new();

        if composed.matched_skills.len() > STRONG_SKILLS_ABOVE {
            strengths.push(format!(
                "Strong technical skills match: {}",
                top(composed.matched_skills.as_slice())
            ));
        }
        if composed.match_percentage > GOOD_ALIGNMENT_ABOVE {
            strengths.push("Good overall alignment with job requirements".to_string());
        }
        if composed.signals.has_education_markers {
            strengths.push("Relevant educational background".to_string());
        }

        or_placeholder(strengths, STRENGTH_PLACEHOLDER)
    }

    fn weaknesses(&self, composed: &ComposedScores) -> Vec<String> {
        let mut weaknesses = Vec::new();

        if composed.missing_skills.len() > MISSING_SKILLS_ABOVE {
            weaknesses.push(format!(
                "Missing key technical skills: {}",
                top(composed.missing_skills.as_slice())
            ));
        }
        if composed.match_percentage < LOW_MATCH_BELOW {
            weaknesses.push("Low overall match with job requirements".to_string());
        }
        if composed.missing_keywords.len() > MISSING_KEYWORDS_ABOVE {
            weaknesses.push("Many important keywords missing from resume".to_string());
        }

        or_placeholder(weaknesses, WEAKNESS_PLACEHOLDER)
    }

    fn suggestions(&self, composed: &ComposedScores) -> Vec<String> {
        let mut suggestions = Vec::new();

        if !composed.missing_keywords.is_empty() {
            suggestions.push(format!(
                "Add these keywords to your resume: {}",
                top(&composed.missing_keywords)
            ));
        }
        if !composed.missing_skills.is_empty() {
            suggestions.push(format!(
                "Consider highlighting these skills if you have them: {}",
                top(composed.missing_skills.as_slice())
            ));
        }

        if composed.match_percentage < LOW_MATCH_BELOW {
            suggestions.push(
                "Your resume needs significant improvements to match this job description".to_string(),
            );
        } else if composed.match_percentage < TAILOR_BELOW {
            suggestions.push("Tailor your resume more closely to the job requirements".to_string());
        }

        if !composed.signals.has_experience_markers {
            suggestions.push("Add more details about your work experience and achievements".to_string());
        }

        or_placeholder(suggestions, SUGGESTION_PLACEHOLDER)
    }
}

/// One-line summary used when no suggestion provider answered
pub fn baseline_insight(match_percentage: u8, missing_keyword_count: usize) -> String {
    format!(
        "ATS Score: {}%. Add {} missing keywords to improve by up to +{}%.",
        match_percentage,
        missing_keyword_count,
        (missing_keyword_count * 3).min(30)
    )
}

fn top(items: &[String]) -> String {
    items.iter().take(TOP_N).cloned().collect::<Vec<_>>().join(", ")
}

fn or_placeholder(items: Vec<String>, placeholder: &str) -> Vec<String> {
    if items.is_empty() {
        vec![placeholder.to_string()]
    } else {
        items
    }
}
