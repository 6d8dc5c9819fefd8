//! Field extraction for a single question block.

use serde::{Deserialize, Serialize};

use crate::{
    config::QuizMarkers,
    text::{leading_number, strip_bullets, trimmed_lines},
};

/// One answer choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub is_correct: bool,
}

/// One numbered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Index as written in the source (`Question 3:` → 3).
    pub index: u32,
    pub question: String,
    pub points: Option<f64>,
    pub choices: Vec<Choice>,
}

/// Fields extracted from a question block, before the index is attached.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuestionBody {
    pub question: String,
    pub points: Option<f64>,
    pub choices: Vec<Choice>,
}

impl QuestionBody {
    /// Attaches the block's index.
    pub fn with_index(self, index: u32) -> Question {
        Question {
            index,
            question: self.question,
            points: self.points,
            choices: self.choices,
        }
    }
}

/// Extracts question text, point value and answer choices from a block.
///
/// The question text is every non-blank line before the first points line,
/// joined with single spaces. Choices are the non-blank lines after the
/// answer-choices line that follows the points line. A malformed point value
/// gives `None`; missing markers give empty fields.
///
/// # Examples
///
/// ```
/// use courseparse::{config::QuizMarkers, quiz::parse_question_block};
///
/// let block = "\nIs TCP/IP a protocol?\nPoints: 1.0\n\nAnswer Choices:\n  • True [CORRECT]\n  • False\n";
/// let body = parse_question_block(block, &QuizMarkers::default());
/// assert_eq!(body.question, "Is TCP/IP a protocol?");
/// assert_eq!(body.points, Some(1.0));
/// assert_eq!(body.choices.len(), 2);
/// assert!(body.choices[0].is_correct);
/// ```
pub fn parse_question_block(block: &str, markers: &QuizMarkers) -> QuestionBody {
    let lines = trimmed_lines(block);

    let points_line = lines
        .iter()
        .position(|line| line.starts_with(markers.points.as_str()));

    let (question_lines, rest, points) = match points_line {
        Some(p) => {
            let value = &lines[p][markers.points.len()..];
            let points = leading_number(value);
            if points.is_none() {
                tracing::trace!(line = lines[p], "unparseable point value");
            }
            (&lines[..p], &lines[p + 1..], points)
        }
        None => (&lines[..], &lines[lines.len()..], None),
    };

    let question = question_lines
        .iter()
        .filter(|l| !l.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let choices = match rest
        .iter()
        .position(|line| line.starts_with(markers.answer_choices.as_str()))
    {
        Some(a) => rest[a + 1..]
            .iter()
            .filter(|l| !l.is_empty())
            .filter_map(|line| parse_choice(line, markers))
            .collect(),
        None => Vec::new(),
    };

    QuestionBody {
        question,
        points,
        choices,
    }
}

/// Cleans one choice line. Returns `None` when nothing but bullets and the
/// correctness token remain.
fn parse_choice(line: &str, markers: &QuizMarkers) -> Option<Choice> {
    let cleaned = strip_bullets(line, &markers.bullets);
    let token = markers.correct_token.as_str();

    let (text, is_correct) = if !token.is_empty() && cleaned.contains(token) {
        // Removal can splice a new token together, as in `[CORR[CORRECT]ECT]`.
        let mut text = cleaned.replace(token, "");
        while text.contains(token) {
            text = text.replace(token, "");
        }
        (text.trim().to_string(), true)
    } else {
        (cleaned.to_string(), false)
    };

    if text.is_empty() {
        None
    } else {
        Some(Choice { text, is_correct })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(block: &str) -> QuestionBody {
        parse_question_block(block, &QuizMarkers::default())
    }

    fn choice(text: &str, is_correct: bool) -> Choice {
        Choice {
            text: text.to_string(),
            is_correct,
        }
    }

    #[test]
    fn test_multiline_question_text() {
        let body = parse("\nWhich of the following\n\nis a WAN?\nPoints: 2\n");
        assert_eq!(body.question, "Which of the following is a WAN?");
        assert_eq!(body.points, Some(2.0));
        assert!(body.choices.is_empty());
    }

    #[test]
    fn test_no_points_line() {
        let body = parse("\nWhat is DNS?\nAnswer Choices:\n• A\n");
        // Without a points line everything is question text and no choices
        // are looked for.
        assert_eq!(body.question, "What is DNS? Answer Choices: • A");
        assert_eq!(body.points, None);
        assert!(body.choices.is_empty());
    }

    #[test]
    fn test_malformed_points() {
        let body = parse("Q\nPoints: one\nAnswer Choices:\n• A\n");
        assert_eq!(body.points, None);
        assert_eq!(body.choices, vec![choice("A", false)]);
    }

    #[test]
    fn test_empty_points_value() {
        let body = parse("Q\nPoints:\n");
        assert_eq!(body.points, None);
        assert_eq!(body.question, "Q");
    }

    #[test]
    fn test_points_without_answer_choices() {
        let body = parse("Q\nPoints: 1.0\n• A\n• B\n");
        assert!(body.choices.is_empty());
    }

    #[test]
    fn test_correct_token_removed() {
        let body = parse("Q\nPoints: 1\n\nAnswer Choices:\n  • Firewall [CORRECT]\n  • Black hat\n");
        assert_eq!(
            body.choices,
            vec![choice("Firewall", true), choice("Black hat", false)]
        );
    }

    #[test]
    fn test_mangled_and_hyphen_bullets() {
        let body = parse("Q\nPoints: 1\nAnswer Choices:\nâ€¢ One\n- Two [CORRECT]\n\u{e2}\u{80}\u{a2} Three\n");
        assert_eq!(
            body.choices,
            vec![
                choice("One", false),
                choice("Two", true),
                choice("Three", false)
            ]
        );
    }

    #[test]
    fn test_empty_choices_dropped() {
        let body = parse("Q\nPoints: 1\nAnswer Choices:\n•\n• [CORRECT]\n• Real\n");
        assert_eq!(body.choices, vec![choice("Real", false)]);
    }

    #[test]
    fn test_token_mid_text() {
        let body = parse("Q\nPoints: 1\nAnswer Choices:\n• TCP [CORRECT] / IP\n");
        assert_eq!(body.choices[0].text, "TCP  / IP");
        assert!(body.choices[0].is_correct);
    }

    #[test]
    fn test_nested_token_fully_removed() {
        let body = parse("Q\nPoints: 1\nAnswer Choices:\n• A [CORR[CORRECT]ECT]\n• [CORR[CORRECT]ECT]\n");
        assert_eq!(body.choices, vec![choice("A", true)]);
    }

    #[test]
    fn test_custom_markers() {
        let markers = QuizMarkers {
            points: "Marks:".to_string(),
            answer_choices: "Options:".to_string(),
            correct_token: "(*)".to_string(),
            bullets: vec!["*".to_string()],
            ..QuizMarkers::default()
        };
        let body = parse_question_block("Q\nMarks: 3\nOptions:\n* a (*)\n* b\n", &markers);
        assert_eq!(body.points, Some(3.0));
        assert_eq!(body.choices, vec![choice("a", true), choice("b", false)]);
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(parse("\n\n"), QuestionBody::default());
    }
}
