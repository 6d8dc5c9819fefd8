//! # courseparse
//!
//! Turns loosely structured course text (quizzes and assignments exported
//! from a learning-management system and stripped of HTML) into structured
//! records.
//!
//! Both parsers work the same way:
//! - split the content into header and body on a literal marker
//! - segment the body into blocks (`Question <N>:` markers, or named
//!   scenario headings)
//! - extract typed fields from each block
//!
//! Malformed text never fails a parse. Missing markers give empty lists,
//! unreadable numbers give `None`, and reordered headings fall back to a
//! documented default. Only an unusable input record (no `id`) or a failed
//! write is an error.
//!
//! ## Quick Start
//!
//! ```rust
//! use courseparse::parse_item_json;
//!
//! let input = r#"{
//!     "type": "quiz",
//!     "id": 1,
//!     "title": "T",
//!     "content": "Quiz: T\n\nQuestions:\n\nQuestion 1:\nQ text\nPoints: 1.0\n\nAnswer Choices:\n  • A [CORRECT]\n  • B\n\n"
//! }"#;
//!
//! let parsed = parse_item_json(input).unwrap();
//! let quiz = parsed.as_quiz().unwrap();
//! assert_eq!(quiz.questions[0].question, "Q text");
//! assert_eq!(quiz.questions[0].choices[1].text, "B");
//! ```
//!
//! ## Custom markers
//!
//! ```rust
//! use courseparse::{config::ParserConfig, item::{ItemKind, RawItem}, record::CourseParser};
//!
//! let mut config = ParserConfig::default();
//! config.assignment.headings = vec!["Lost Laptop".to_string()];
//!
//! let parser = CourseParser::with_config(&config).unwrap();
//! let item = RawItem::new(ItemKind::Assignment, 2, "IR", "Description:\nLost Laptop\nScenario:\nLeft on a train.\n");
//! let parsed = parser.parse(&item);
//! assert_eq!(parsed.as_assignment().unwrap().sections[0].name, "Lost Laptop");
//! ```

pub mod assignment;
pub mod config;
pub mod error;
pub mod faq;
pub mod item;
pub mod quiz;
pub mod record;
pub mod segment;
pub mod text;

use assignment::{AssignmentParser, ParsedAssignment};
use error::Result;
use item::RawItem;
use quiz::{ParsedQuiz, QuizParser};
use record::{CourseParser, ItemParser, ParsedItem};

/// Parses a quiz item with the default markers.
pub fn parse_quiz(item: &RawItem) -> ParsedQuiz {
    QuizParser::new().parse(item)
}

/// Parses an assignment item with the default markers.
pub fn parse_assignment(item: &RawItem) -> ParsedAssignment {
    AssignmentParser::new().parse(item)
}

/// Parses an item of either kind with the default markers.
///
/// # Examples
///
/// ```
/// use courseparse::{item::{ItemKind, RawItem}, parse_item};
///
/// let item = RawItem::new(ItemKind::Quiz, 1, "T", "no markers at all");
/// let parsed = parse_item(&item);
/// assert!(parsed.as_quiz().unwrap().questions.is_empty());
/// ```
pub fn parse_item(item: &RawItem) -> ParsedItem {
    CourseParser::new().parse(item)
}

/// Reads a raw item from JSON and parses it with the default markers.
///
/// # Errors
///
/// Returns `ParseError::MissingField` if `id` or `type` is absent, and the
/// other record errors of [`RawItem::from_json`]. No partial record is
/// returned.
pub fn parse_item_json(input: &str) -> Result<ParsedItem> {
    CourseParser::new().parse_json(input)
}
