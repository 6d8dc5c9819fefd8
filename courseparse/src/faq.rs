//! Glue between parsed records and FAQ generation.
//!
//! Parsed questions and sections are flattened into [`AnalysisChunk`]s that
//! an external model scores for difficulty. Its JSON reply is read back into
//! a [`ChunkAnalysis`]. Calling the model is the caller's business.

use serde::{Deserialize, Serialize};

use crate::{
    assignment::{ParsedAssignment, Section},
    error::{ParseError, Result},
    quiz::{ParsedQuiz, Question},
};

/// Difficulty assumed when the reply omits one.
pub const DEFAULT_DIFFICULTY: f64 = 3.0;

/// Chunks at or above this difficulty get FAQ entries.
pub const RISK_THRESHOLD: f64 = 3.0;

/// A self-contained piece of course text submitted for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisChunk {
    pub chunk_id: i64,
    pub section_title: String,
    pub text: String,
}

impl AnalysisChunk {
    /// Builds a chunk from a quiz question, listing its choices. The
    /// `Answer Choices:` header is written even when the list is empty.
    pub fn from_question(question: &Question) -> Self {
        let text = format!(
            "Question: {}\n\nAnswer Choices:\n{}",
            question.question,
            bullet_list(question.choices.iter().map(|c| c.text.as_str()))
        );

        Self {
            chunk_id: i64::from(question.index),
            section_title: format!("Quiz Question {}", question.index),
            text,
        }
    }

    /// Builds a chunk from an assignment section. `chunk_id` is the
    /// section's 1-based position.
    pub fn from_section(position: usize, section: &Section) -> Self {
        let mut parts = vec![format!("Scenario: {}", section.scenario)];

        let prompts = [
            ("Containment", &section.prompts.containment),
            ("Post-Incident Activities", &section.prompts.post_incident),
            ("Elevator Pitch", &section.prompts.elevator_pitch),
        ];
        for (label, lines) in prompts {
            if !lines.is_empty() {
                parts.push(format!(
                    "{label}:\n{}",
                    bullet_list(lines.iter().map(String::as_str))
                ));
            }
        }

        Self {
            chunk_id: i64::try_from(position + 1).unwrap_or(i64::MAX),
            section_title: section.name.clone(),
            text: parts.join("\n\n"),
        }
    }
}

fn bullet_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One chunk per question, in question order.
pub fn quiz_chunks(quiz: &ParsedQuiz) -> Vec<AnalysisChunk> {
    quiz.questions.iter().map(AnalysisChunk::from_question).collect()
}

/// One chunk per section, in section order.
pub fn assignment_chunks(assignment: &ParsedAssignment) -> Vec<AnalysisChunk> {
    assignment
        .sections
        .iter()
        .enumerate()
        .map(|(n, section)| AnalysisChunk::from_section(n, section))
        .collect()
}

/// A student question the instructor may want to answer up front.
///
/// Missing keys read as empty strings so one sloppy entry does not cost the
/// whole reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// The model's verdict on one chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkAnalysis {
    pub chunk_id: i64,
    pub section_title: String,
    pub risky: bool,
    pub difficulty: f64,
    pub faq: Vec<FaqEntry>,
}

/// Analyses of every chunk of an item, saved as `{"results": [...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub results: Vec<ChunkAnalysis>,
}

impl FromIterator<ChunkAnalysis> for AnalysisReport {
    fn from_iter<I: IntoIterator<Item = ChunkAnalysis>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FaqReply {
    #[serde(default)]
    difficulty: Option<f64>,
    #[serde(default)]
    faq: Vec<FaqEntry>,
}

impl ChunkAnalysis {
    /// Reads the model's JSON reply for `chunk`.
    ///
    /// The reply is parsed as-is first; failing that, the span from the first
    /// `{` to the last `}` is tried, which covers replies wrapped in prose or
    /// code fences. FAQ entries are dropped for chunks below the risk
    /// threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// use courseparse::faq::{AnalysisChunk, ChunkAnalysis};
    ///
    /// let chunk = AnalysisChunk { chunk_id: 1, section_title: "Quiz Question 1".into(), text: "Question: ...".into() };
    /// let reply = "```json\n{\"difficulty\": 4, \"faq\": [{\"question\": \"Why?\", \"answer\": \"Because.\"}]}\n```";
    /// let analysis = ChunkAnalysis::from_response(&chunk, reply).unwrap();
    /// assert!(analysis.risky);
    /// assert_eq!(analysis.faq.len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if neither attempt yields a valid reply.
    pub fn from_response(chunk: &AnalysisChunk, raw: &str) -> Result<Self> {
        let reply = parse_reply(raw)?;
        let difficulty = reply.difficulty.unwrap_or(DEFAULT_DIFFICULTY);
        let risky = difficulty >= RISK_THRESHOLD;

        tracing::debug!(
            chunk_id = chunk.chunk_id,
            difficulty,
            risky,
            entries = reply.faq.len(),
            "read chunk analysis"
        );

        Ok(Self {
            chunk_id: chunk.chunk_id,
            section_title: chunk.section_title.clone(),
            risky,
            difficulty,
            faq: if risky { reply.faq } else { Vec::new() },
        })
    }
}

fn parse_reply(raw: &str) -> Result<FaqReply> {
    let direct_err = match serde_json::from_str(raw.trim()) {
        Ok(reply) => return Ok(reply),
        Err(e) => e,
    };

    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            tracing::trace!("reply is not bare JSON, retrying with outermost object");
            serde_json::from_str(&raw[start..=end]).map_err(ParseError::from)
        }
        _ => Err(direct_err.into()),
    }
}
