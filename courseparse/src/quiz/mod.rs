//! Quiz parsing: header split, question segmentation, question extraction.

mod question;

pub use question::{parse_question_block, Choice, Question, QuestionBody};
use serde::{Deserialize, Serialize};

use crate::{
    config::{ParserConfig, QuizMarkers},
    error::Result,
    item::{ItemKind, RawItem},
    record::ItemParser,
    segment::{split_header_body, BlockLabel, NumberedSegmenter, Segmenter},
    text::TextNormalizer,
};

/// Quiz metadata kept from the header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuizMeta {
    pub raw_header: String,
}

/// A quiz decomposed into numbered questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuiz {
    pub quiz_id: i64,
    pub title: String,
    pub meta: QuizMeta,
    pub questions: Vec<Question>,
}

/// Parser for quiz items.
///
/// # Examples
///
/// ```
/// use courseparse::{item::{ItemKind, RawItem}, quiz::QuizParser, record::ItemParser};
///
/// let content = "Quiz: T\n\nQuestions:\n\nQuestion 1:\nQ text\nPoints: 1.0\n\nAnswer Choices:\n  • A [CORRECT]\n  • B\n\n";
/// let item = RawItem::new(ItemKind::Quiz, 1, "T", content);
///
/// let quiz = QuizParser::new().parse(&item);
/// assert_eq!(quiz.questions.len(), 1);
/// assert_eq!(quiz.questions[0].question, "Q text");
/// assert_eq!(quiz.questions[0].points, Some(1.0));
/// assert!(quiz.questions[0].choices[0].is_correct);
/// ```
#[derive(Debug, Clone)]
pub struct QuizParser {
    markers: QuizMarkers,
    segmenter: NumberedSegmenter,
    normalizer: TextNormalizer,
}

impl Default for QuizParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizParser {
    /// Creates a parser with the default markers.
    pub fn new() -> Self {
        let config = ParserConfig::default();
        Self {
            markers: config.quiz,
            segmenter: NumberedSegmenter::new(),
            normalizer: TextNormalizer::new(config.text),
        }
    }

    /// Creates a parser from a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidConfig` if the question pattern is unusable.
    pub fn with_config(config: &ParserConfig) -> Result<Self> {
        Ok(Self {
            markers: config.quiz.clone(),
            segmenter: NumberedSegmenter::with_pattern(&config.quiz.question_pattern)?,
            normalizer: TextNormalizer::new(config.text),
        })
    }

    /// Returns the markers in use.
    pub fn markers(&self) -> &QuizMarkers {
        &self.markers
    }

    /// Parses the question list of a quiz body.
    pub fn parse_questions(&self, body: &str) -> Vec<Question> {
        self.segmenter
            .segment(body)
            .into_iter()
            .filter_map(|block| match block.label {
                BlockLabel::Numbered(index) => {
                    Some(parse_question_block(block.text, &self.markers).with_index(index))
                }
                BlockLabel::Heading(_) => None,
            })
            .collect()
    }
}

impl ItemParser for QuizParser {
    type Output = ParsedQuiz;

    fn name(&self) -> &'static str {
        "quiz"
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Quiz
    }

    fn parse(&self, item: &RawItem) -> ParsedQuiz {
        let content = self.normalizer.normalize(&item.content);
        let split = split_header_body(&content, &self.markers.body);

        // Without a body marker the whole content doubles as the header.
        let raw_header = if split.marker_found {
            split.header.trim()
        } else {
            content.trim()
        };

        let questions = self.parse_questions(split.body);

        tracing::debug!(
            quiz_id = item.id,
            questions = questions.len(),
            marker_found = split.marker_found,
            "parsed quiz"
        );

        ParsedQuiz {
            quiz_id: item.id,
            title: item.title.trim().to_string(),
            meta: QuizMeta {
                raw_header: raw_header.to_string(),
            },
            questions,
        }
    }
}
