//! Coarse experience and education presence heuristics

use crate::error::{Result, ResumeMatchError};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EXPERIENCE_MARKERS: &[&str] = &[
    "years", "experience", "led", "managed", "developed", "built", "created",
    "designed", "implemented", "architected", "launched", "delivered",
];

pub const DEFAULT_EDUCATION_MARKERS: &[&str] = &[
    "bachelor", "master", "phd", "degree", "university", "college",
    "computer science", "engineering", "certification",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalFlags {
    pub has_experience_markers: bool,
    pub has_education_markers: bool,
}

/// Marker vocabularies used as proxies for experience and education sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLists {
    pub experience: Vec<String>,
    pub education: Vec<String>,
}

impl Default for MarkerLists {
    fn default() -> Self {
        Self {
            experience: DEFAULT_EXPERIENCE_MARKERS.iter().map(|s| s.to_string()).collect(),
            education: DEFAULT_EDUCATION_MARKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Presence detector over the two marker lists.
///
/// A single occurrence anywhere in the lowercased text is enough; absence is
/// not negative evidence beyond the score table.
#[derive(Debug, Clone)]
pub struct SignalDetector {
    experience: Option<AhoCorasick>,
    education: Option<AhoCorasick>,
}

impl SignalDetector {
    pub fn new() -> Result<Self> {
        Self::from_markers(&MarkerLists::default())
    }

    pub fn from_markers(markers: &MarkerLists) -> Result<Self> {
        Ok(Self {
            experience: build_marker_matcher(&markers.experience)?,
            education: build_marker_matcher(&markers.education)?,
        })
    }

    pub fn detect_experience(&self, text: &str) -> bool {
        contains_any(self.experience.as_ref(), text)
    }

    pub fn detect_education(&self, text: &str) -> bool {
        contains_any(self.education.as_ref(), text)
    }

    pub fn detect(&self, text: &str) -> SignalFlags {
        let lower = text.to_lowercase();
        SignalFlags {
            has_experience_markers: contains_lowered(self.experience.as_ref(), &lower),
            has_education_markers: contains_lowered(self.education.as_ref(), &lower),
        }
    }
}

// An empty marker list can never fire, so it has no automaton at all
fn build_marker_matcher(markers: &[String]) -> Result<Option<AhoCorasick>> {
    let patterns: Vec<String> = markers
        .iter()
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect();

    if patterns.is_empty() {
        return Ok(None);
    }

    AhoCorasick::new(&patterns)
        .map(Some)
        .map_err(|e| ResumeMatchError::Processing(format!("Failed to build marker matcher: {}", e)))
}

fn contains_any(matcher: Option<&AhoCorasick>, text: &str) -> bool {
    contains_lowered(matcher, &text.to_lowercase())
}

fn contains_lowered(matcher: Option<&AhoCorasick>, lower: &str) -> bool {
    matcher.is_some_and(|m| m.is_match(lower))
}
