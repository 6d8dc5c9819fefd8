//! The shared parsing capability and what callers do with its results.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    assignment::{AssignmentParser, ParsedAssignment},
    config::ParserConfig,
    error::{ParseError, Result},
    faq::{AnalysisReport, ChunkAnalysis},
    item::{ItemKind, RawItem},
    quiz::{ParsedQuiz, QuizParser},
};

/// Trait for parsers that turn one kind of raw item into a structured record.
///
/// Parsing never fails: malformed content yields a sparser record.
pub trait ItemParser: Send + Sync + std::fmt::Debug {
    /// The record this parser produces.
    type Output: StructuredRecord;

    /// Returns the name of this parser for debugging.
    fn name(&self) -> &'static str;

    /// Returns the item kind this parser is meant for.
    fn kind(&self) -> ItemKind;

    /// Parses `item` into a structured record.
    fn parse(&self, item: &RawItem) -> Self::Output;
}

/// Serialization and persistence for parse results.
pub trait StructuredRecord: Serialize {
    /// Renders the record as pretty-printed JSON.
    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Renders the record as YAML.
    #[cfg(feature = "yaml")]
    fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Writes the record as pretty-printed JSON to `path`, replacing any
    /// existing file, and returns the destination.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be created or written.
    fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ParseError::io(path, e))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| {
            if e.is_io() {
                ParseError::io(path, e.into())
            } else {
                ParseError::Json(e)
            }
        })?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .map_err(|e| ParseError::io(path, e))?;

        tracing::info!(path = %path.display(), "saved parse result");
        Ok(path.to_path_buf())
    }
}

impl StructuredRecord for ParsedQuiz {}
impl StructuredRecord for ParsedAssignment {}
impl StructuredRecord for ParsedItem {}
impl StructuredRecord for ChunkAnalysis {}
impl StructuredRecord for AnalysisReport {}

/// A parse result of either kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParsedItem {
    Quiz(ParsedQuiz),
    Assignment(ParsedAssignment),
}

impl ParsedItem {
    /// Returns the kind of item that was parsed.
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Quiz(_) => ItemKind::Quiz,
            Self::Assignment(_) => ItemKind::Assignment,
        }
    }

    /// Returns the identifier of the parsed item.
    pub const fn id(&self) -> i64 {
        match self {
            Self::Quiz(quiz) => quiz.quiz_id,
            Self::Assignment(assignment) => assignment.assignment_id,
        }
    }

    /// Returns the quiz record, if this is one.
    pub fn as_quiz(&self) -> Option<&ParsedQuiz> {
        match self {
            Self::Quiz(quiz) => Some(quiz),
            Self::Assignment(_) => None,
        }
    }

    /// Returns the assignment record, if this is one.
    pub fn as_assignment(&self) -> Option<&ParsedAssignment> {
        match self {
            Self::Assignment(assignment) => Some(assignment),
            Self::Quiz(_) => None,
        }
    }
}

/// Dispatches raw items to the parser matching their kind.
///
/// # Examples
///
/// ```
/// use courseparse::{item::{ItemKind, RawItem}, record::CourseParser};
///
/// let parser = CourseParser::new();
/// let parsed = parser.parse(&RawItem::new(ItemKind::Assignment, 3, "Lab", "Description:\n"));
/// assert_eq!(parsed.kind(), ItemKind::Assignment);
/// assert_eq!(parsed.id(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CourseParser {
    quiz: QuizParser,
    assignment: AssignmentParser,
}

impl CourseParser {
    /// Creates a dispatcher with default markers for both kinds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher from a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidConfig` if either marker table is unusable.
    pub fn with_config(config: &ParserConfig) -> Result<Self> {
        Ok(Self {
            quiz: QuizParser::with_config(config)?,
            assignment: AssignmentParser::with_config(config)?,
        })
    }

    /// Returns the quiz parser.
    pub fn quiz(&self) -> &QuizParser {
        &self.quiz
    }

    /// Returns the assignment parser.
    pub fn assignment(&self) -> &AssignmentParser {
        &self.assignment
    }

    /// Parses `item` with the parser for its kind.
    pub fn parse(&self, item: &RawItem) -> ParsedItem {
        match item.kind {
            ItemKind::Quiz => ParsedItem::Quiz(self.quiz.parse(item)),
            ItemKind::Assignment => ParsedItem::Assignment(self.assignment.parse(item)),
        }
    }

    /// Reads a raw item from JSON and parses it.
    ///
    /// # Errors
    ///
    /// Fails only when the record itself is unusable (see
    /// [`RawItem::from_json`]); no partial record is returned.
    pub fn parse_json(&self, input: &str) -> Result<ParsedItem> {
        let item = RawItem::from_json(input)?;
        Ok(self.parse(&item))
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("courseparse-{}-{name}", process::id()))
    }

    fn sample_quiz() -> ParsedQuiz {
        QuizParser::new().parse(&RawItem::new(
            ItemKind::Quiz,
            1,
            "T",
            "Quiz: T\n\nQuestions:\n\nQuestion 1:\nQ text\nPoints: 1.0\n\nAnswer Choices:\n  • A [CORRECT]\n  • B\n\n",
        ))
    }

    #[test]
    fn test_parser_names() {
        assert_eq!(QuizParser::new().name(), "quiz");
        assert_eq!(AssignmentParser::new().name(), "assignment");
        assert_eq!(QuizParser::new().kind(), ItemKind::Quiz);
        assert_eq!(AssignmentParser::new().kind(), ItemKind::Assignment);
    }

    #[test]
    fn test_json_key_order() {
        let json = sample_quiz().to_json_pretty().unwrap();
        let quiz_id = json.find("\"quiz_id\"").unwrap();
        let title = json.find("\"title\"").unwrap();
        let meta = json.find("\"meta\"").unwrap();
        let questions = json.find("\"questions\"").unwrap();
        assert!(quiz_id < title && title < meta && meta < questions);

        let index = json.find("\"index\"").unwrap();
        let points = json.find("\"points\"").unwrap();
        let choices = json.find("\"choices\"").unwrap();
        assert!(index < points && points < choices);
    }

    #[test]
    fn test_missing_points_serializes_as_null() {
        let quiz = QuizParser::new().parse(&RawItem::new(
            ItemKind::Quiz,
            1,
            "T",
            "Questions:\nQuestion 1:\nQ\n",
        ));
        let value = serde_json::to_value(&quiz).unwrap();
        assert!(value["questions"][0]["points"].is_null());
    }

    #[test]
    fn test_save_overwrites_and_reports_destination() {
        let path = temp_path("quiz.json");
        fs::write(&path, "stale contents that are longer than nothing").unwrap();

        let quiz = sample_quiz();
        let saved = quiz.save(&path).unwrap();
        assert_eq!(saved, path);

        let written = fs::read_to_string(&path).unwrap();
        let reloaded: ParsedQuiz = serde_json::from_str(&written).unwrap();
        assert_eq!(reloaded, quiz);
        assert!(!written.contains("stale"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_failure_surfaces() {
        let path = temp_path("missing-dir").join("quiz.json");
        let result = sample_quiz().save(&path);
        match result {
            Err(ParseError::Io { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_to_yaml() {
        let yaml = sample_quiz().to_yaml().unwrap();
        assert!(yaml.contains("quiz_id: 1"));
        assert!(yaml.contains("is_correct: true"));
    }

    #[test]
    fn test_dispatch_by_kind() {
        let parser = CourseParser::new();
        let quiz = parser.parse(&RawItem::new(ItemKind::Quiz, 5, "Q", "Questions:\n"));
        assert_eq!(quiz.kind(), ItemKind::Quiz);
        assert!(quiz.as_quiz().is_some());
        assert!(quiz.as_assignment().is_none());
        assert_eq!(quiz.id(), 5);
    }

    #[test]
    fn test_parsed_item_untagged_round_trip() {
        let item = ParsedItem::Quiz(sample_quiz());
        let json = item.to_json_pretty().unwrap();
        assert!(!json.contains("\"Quiz\""));
        let back: ParsedItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_parse_json_missing_id() {
        let result = CourseParser::new().parse_json(r#"{"type": "quiz", "title": "T", "content": ""}"#);
        assert!(matches!(result, Err(ParseError::MissingField { field }) if field == "id"));
    }

    #[test]
    fn test_with_config_propagates_errors() {
        let mut config = ParserConfig::default();
        config.quiz.question_pattern = "no group".to_string();
        assert!(CourseParser::with_config(&config).is_err());
    }
}
