//! Segmentation on numbered markers such as `Question 3:`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Block, Segmenter};
use crate::{
    config::DEFAULT_QUESTION_PATTERN,
    error::{ParseError, Result},
};

static QUESTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_QUESTION_PATTERN).expect("Invalid question marker pattern"));

/// Segmenter that splits a body on a numbered marker pattern.
///
/// Group 1 of the pattern captures the item index. A marker is accepted only
/// when its index is greater than the last accepted one; any other match
/// (repeated, decreasing or unparseable index) stays inside the preceding
/// block, so indices come out strictly increasing.
///
/// When any marker opens a line, only line-opening markers count, so a
/// marker quoted inside question text cannot swallow the real ones after it.
/// Bodies that put every marker mid-line are split on all matches.
///
/// # Examples
///
/// ```
/// use courseparse::segment::{BlockLabel, NumberedSegmenter, Segmenter};
///
/// let segmenter = NumberedSegmenter::new();
/// let blocks = segmenter.segment("Question 1:\nA\nQuestion 2:\nB\n");
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[1].label, BlockLabel::Numbered(2));
/// assert_eq!(blocks[1].text, "\nB\n");
/// ```
#[derive(Debug, Clone)]
pub struct NumberedSegmenter {
    pattern: Regex,
}

impl Default for NumberedSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberedSegmenter {
    /// Creates a segmenter for the default `Question <N>:` marker.
    pub fn new() -> Self {
        Self {
            pattern: QUESTION_MARKER.clone(),
        }
    }

    /// Creates a segmenter for a custom marker pattern.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidConfig` if the pattern does not compile or
    /// has no capture group for the index.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| ParseError::InvalidConfig(format!("question pattern: {e}")))?;

        if pattern.captures_len() < 2 {
            return Err(ParseError::InvalidConfig(format!(
                "question pattern '{}' must capture the index in group 1",
                pattern.as_str()
            )));
        }

        Ok(Self { pattern })
    }

    /// Returns the marker pattern in use.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Segmenter for NumberedSegmenter {
    fn name(&self) -> &'static str {
        "numbered"
    }

    fn segment<'a>(&self, body: &'a str) -> Vec<Block<'a>> {
        let found: Vec<_> = self.pattern.captures_iter(body).collect();
        let line_start_only = found
            .iter()
            .filter_map(|caps| caps.get(0))
            .any(|m| opens_line(body, m.start()));

        // (index, marker start, marker end)
        let mut markers: Vec<(u32, usize, usize)> = Vec::new();

        for caps in &found {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if line_start_only && !opens_line(body, whole.start()) {
                tracing::trace!(marker = whole.as_str(), "mid-line marker left inside block");
                continue;
            }
            let index = caps
                .get(1)
                .and_then(|m| m.as_str().trim().parse::<u32>().ok());

            match index {
                Some(index) if markers.last().map_or(true, |&(last, _, _)| index > last) => {
                    markers.push((index, whole.start(), whole.end()));
                }
                _ => {
                    tracing::trace!(
                        marker = whole.as_str(),
                        "out-of-order marker left inside preceding block"
                    );
                }
            }
        }

        markers
            .iter()
            .enumerate()
            .map(|(n, &(index, _, end))| {
                let stop = markers.get(n + 1).map_or(body.len(), |&(_, start, _)| start);
                Block::numbered(index, &body[end..stop])
            })
            .collect()
    }
}

/// True when only horizontal whitespace precedes `pos` on its line.
fn opens_line(body: &str, pos: usize) -> bool {
    let line_start = body[..pos].rfind('\n').map_or(0, |i| i + 1);
    body[line_start..pos].chars().all(|c| c == ' ' || c == '\t')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::BlockLabel;

    fn indices(blocks: &[Block<'_>]) -> Vec<u32> {
        blocks
            .iter()
            .map(|b| match b.label {
                BlockLabel::Numbered(i) => i,
                BlockLabel::Heading(_) => panic!("unexpected heading block"),
            })
            .collect()
    }

    #[test]
    fn test_discards_preamble() {
        let blocks = NumberedSegmenter::new().segment("intro\nQuestion 1:\nA");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "\nA");
    }

    #[test]
    fn test_no_markers() {
        let blocks = NumberedSegmenter::new().segment("Nothing numbered here");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_flexible_whitespace() {
        let blocks = NumberedSegmenter::new().segment("Question  7:\nA\nQuestion\t9:\nB");
        assert_eq!(indices(&blocks), vec![7, 9]);
    }

    #[test]
    fn test_out_of_order_marker_stays_embedded() {
        let body = "Question 1:\nSee Question 1: again\nQuestion 2:\nB";
        let blocks = NumberedSegmenter::new().segment(body);
        assert_eq!(indices(&blocks), vec![1, 2]);
        assert!(blocks[0].text.contains("See Question 1: again"));
    }

    #[test]
    fn test_quoted_higher_marker_does_not_swallow_questions() {
        let body = "Question 1:\nWhich follows? See Question 3: below\nPoints: 1\n\
Question 2:\nSecond\n  Question 3:\nThird\n";
        let blocks = NumberedSegmenter::new().segment(body);
        assert_eq!(indices(&blocks), vec![1, 2, 3]);
        assert!(blocks[0].text.contains("See Question 3: below"));
        assert_eq!(blocks[1].text, "\nSecond\n  ");
        assert_eq!(blocks[2].text, "\nThird\n");
    }

    #[test]
    fn test_overflowing_index_is_not_a_marker() {
        let body = "Question 1:\nA\nQuestion 99999999999:\nB";
        let blocks = NumberedSegmenter::new().segment(body);
        assert_eq!(indices(&blocks), vec![1]);
        assert!(blocks[0].text.contains('B'));
    }

    #[test]
    fn test_custom_pattern() {
        let segmenter = NumberedSegmenter::with_pattern(r"Q(\d+)\)").unwrap();
        let blocks = segmenter.segment("Q1) first Q2) second");
        assert_eq!(indices(&blocks), vec![1, 2]);
        assert_eq!(blocks[0].text, " first ");
    }

    #[test]
    fn test_pattern_without_group_rejected() {
        let result = NumberedSegmenter::with_pattern(r"Question \d+:");
        assert!(matches!(result, Err(ParseError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = NumberedSegmenter::with_pattern(r"Question (\d+:");
        assert!(matches!(result, Err(ParseError::InvalidConfig(_))));
    }
}
