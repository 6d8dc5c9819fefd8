//! Marker tables that drive segmentation and field extraction.
//!
//! Every literal the parsers look for lives here instead of at the call
//! sites, so a caller can swap in a synthetic marker set (for tests, or for a
//! course that words its headings differently) without touching the parsers.
//!
//! # Examples
//!
//! ```
//! use courseparse::config::ParserConfig;
//!
//! let config = ParserConfig::from_json_str(r#"{"quiz": {"correct_token": "(*)"}}"#).unwrap();
//! assert_eq!(config.quiz.correct_token, "(*)");
//! // Unspecified markers keep their defaults.
//! assert_eq!(config.quiz.body, "Questions:");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default pattern for numbered question markers. Group 1 captures the index.
pub const DEFAULT_QUESTION_PATTERN: &str = r"Question\s+(\d+):";

/// Bullet prefixes stripped from answer choices.
///
/// Includes the UTF-8 bullet read back as Windows-1252 (`â€¢`) and as
/// Latin-1, both of which show up in exported course text.
pub const DEFAULT_BULLETS: &[&str] = &["•", "â€¢", "\u{e2}\u{80}\u{a2}", "-"];

/// Scenario headings recognized in assignment descriptions.
pub const DEFAULT_HEADINGS: &[&str] = &[
    "Cloud Storage",
    "Ransomware",
    "Phishing",
    "Insider Threat",
    "Data Breach",
    "Denial of Service",
    "Lost or Stolen Device",
    "Malware Outbreak",
    "Business Email Compromise",
    "Supply Chain Compromise",
];

/// Markers used by the quiz parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizMarkers {
    /// Separates quiz metadata from the question list.
    pub body: String,
    /// Regex matching one question marker; group 1 must capture the index.
    pub question_pattern: String,
    /// Line prefix carrying the point value.
    pub points: String,
    /// Line that opens the answer choice list.
    pub answer_choices: String,
    /// Token flagging a correct choice.
    pub correct_token: String,
    /// Bullet prefixes stripped from choice lines.
    pub bullets: Vec<String>,
}

impl Default for QuizMarkers {
    fn default() -> Self {
        Self {
            body: "Questions:".to_string(),
            question_pattern: DEFAULT_QUESTION_PATTERN.to_string(),
            points: "Points:".to_string(),
            answer_choices: "Answer Choices:".to_string(),
            correct_token: "[CORRECT]".to_string(),
            bullets: DEFAULT_BULLETS.iter().map(|b| b.to_string()).collect(),
        }
    }
}

/// Markers used by the assignment parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentMarkers {
    /// Separates assignment metadata from the description.
    pub body: String,
    /// Header line prefix carrying the point value.
    pub points: String,
    /// Header line prefix carrying the comma-separated submission types.
    pub submission_types: String,
    /// Closed set of scenario headings.
    pub headings: Vec<String>,
    /// Opens the scenario narrative inside a section.
    pub scenario: String,
    /// Opens the discussion prompts inside a section.
    pub discussion: String,
    /// Containment prompt heading.
    pub containment: String,
    /// Post-incident prompt heading.
    pub post_incident: String,
    /// Elevator-pitch prompt heading.
    pub elevator_pitch: String,
}

impl Default for AssignmentMarkers {
    fn default() -> Self {
        Self {
            body: "Description:".to_string(),
            points: "Points:".to_string(),
            submission_types: "Submission Types:".to_string(),
            headings: DEFAULT_HEADINGS.iter().map(|h| h.to_string()).collect(),
            scenario: "Scenario:".to_string(),
            discussion: "Items to discuss with your group:".to_string(),
            containment: "Containment".to_string(),
            post_incident: "Post-Incident Activities".to_string(),
            elevator_pitch: "Be prepared to discuss in class".to_string(),
        }
    }
}

/// Character-level cleanup applied to content before it is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Remove zero-width characters, byte order marks and bidi controls.
    pub strip_invisible: bool,
    /// Apply Unicode NFKC folding (turns non-breaking spaces into spaces).
    pub fold_compatibility: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            strip_invisible: true,
            fold_compatibility: false,
        }
    }
}

/// Complete marker configuration for both parsers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub quiz: QuizMarkers,
    pub assignment: AssignmentMarkers,
    pub text: TextOptions,
}

impl ParserConfig {
    /// Loads a configuration from JSON. Missing keys take their defaults.
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Loads a configuration from YAML. Missing keys take their defaults.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }
}
