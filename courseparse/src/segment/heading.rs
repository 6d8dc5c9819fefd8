//! Segmentation on named headings from a closed set.

use regex::Regex;

use super::{Block, Segmenter};
use crate::error::{ParseError, Result};

/// Segmenter that splits a body on standalone heading lines.
///
/// A heading matches when a whole line consists of one label from the set,
/// optionally surrounded by horizontal whitespace and followed by a single
/// colon. Lines naming anything outside the set are ordinary text and stay in
/// the block of the preceding heading.
///
/// # Examples
///
/// ```
/// use courseparse::segment::{BlockLabel, HeadingSegmenter, Segmenter};
///
/// let segmenter = HeadingSegmenter::new(&["Cloud Storage", "Ransomware"]).unwrap();
/// let blocks = segmenter.segment("intro\nCloud Storage\nleak\nRansomware:\nlocked\n");
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].label, BlockLabel::Heading("Cloud Storage".into()));
/// assert_eq!(blocks[1].text, "\nlocked\n");
/// ```
#[derive(Debug, Clone)]
pub struct HeadingSegmenter {
    /// `None` when the heading set is empty.
    pattern: Option<Regex>,
    labels: Vec<String>,
}

impl HeadingSegmenter {
    /// Creates a segmenter for the given heading labels.
    ///
    /// Blank labels are ignored and duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidConfig` if the combined pattern exceeds the
    /// regex size limit.
    pub fn new<S: AsRef<str>>(headings: &[S]) -> Result<Self> {
        let mut labels: Vec<String> = headings
            .iter()
            .map(|h| h.as_ref().trim().to_string())
            .filter(|h| !h.is_empty())
            .collect();
        // Longest first so a label never shadows a longer one sharing its prefix.
        labels.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        labels.dedup();

        if labels.is_empty() {
            return Ok(Self {
                pattern: None,
                labels,
            });
        }

        let alternation = labels
            .iter()
            .map(|l| regex::escape(l))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?m)^[^\S\n]*({alternation})[^\S\n]*:?[^\S\n]*$"))
            .map_err(|e| ParseError::InvalidConfig(format!("heading set: {e}")))?;

        Ok(Self {
            pattern: Some(pattern),
            labels,
        })
    }

    /// Returns the recognized labels, longest first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Segmenter for HeadingSegmenter {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn segment<'a>(&self, body: &'a str) -> Vec<Block<'a>> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        // (label, heading start, heading end)
        let headings: Vec<(&str, usize, usize)> = pattern
            .captures_iter(body)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let label = caps.get(1)?;
                Some((label.as_str(), whole.start(), whole.end()))
            })
            .collect();

        headings
            .iter()
            .enumerate()
            .map(|(n, &(label, _, end))| {
                let stop = headings
                    .get(n + 1)
                    .map_or(body.len(), |&(_, start, _)| start);
                Block::heading(label, &body[end..stop])
            })
            .collect()
    }
}
