//! Header/body splitting and block segmentation.
//!
//! Segmentation never fails: text without recognizable markers yields fewer
//! blocks (possibly none), and an empty result is a normal outcome.

mod heading;
mod numbered;

pub use heading::HeadingSegmenter;
pub use numbered::NumberedSegmenter;

/// Identifies which item a block belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockLabel {
    /// Index captured from a numbered marker such as `Question 3:`.
    Numbered(u32),
    /// Heading label from a closed heading set.
    Heading(String),
}

/// A contiguous span of text belonging to one structural item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub label: BlockLabel,
    pub text: &'a str,
}

impl<'a> Block<'a> {
    /// Creates a block for a numbered item.
    pub fn numbered(index: u32, text: &'a str) -> Self {
        Self {
            label: BlockLabel::Numbered(index),
            text,
        }
    }

    /// Creates a block for a named heading.
    pub fn heading(name: impl Into<String>, text: &'a str) -> Self {
        Self {
            label: BlockLabel::Heading(name.into()),
            text,
        }
    }
}

/// Trait for strategies that partition a body into per-item blocks.
pub trait Segmenter: Send + Sync + std::fmt::Debug {
    /// Returns the name of this segmenter for debugging.
    fn name(&self) -> &'static str;

    /// Partitions `body` into blocks in source order.
    ///
    /// Text before the first marker is discarded. Returns an empty vector
    /// when no marker matches.
    fn segment<'a>(&self, body: &'a str) -> Vec<Block<'a>>;
}

/// Result of splitting content on a body marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderBody<'a> {
    /// Everything before the first marker occurrence.
    pub header: &'a str,
    /// Everything after the marker, leading line breaks removed.
    pub body: &'a str,
    /// Whether the marker occurred at all.
    pub marker_found: bool,
}

/// Splits `content` at the first occurrence of `marker`.
///
/// Without the marker the whole content becomes the body and the header is
/// empty. An empty marker never matches.
///
/// # Examples
///
/// ```
/// use courseparse::segment::split_header_body;
///
/// let split = split_header_body("Quiz: T\n\nQuestions:\n\nQuestion 1:", "Questions:");
/// assert_eq!(split.header, "Quiz: T\n\n");
/// assert_eq!(split.body, "Question 1:");
///
/// let missing = split_header_body("no marker here", "Questions:");
/// assert_eq!(missing.header, "");
/// assert_eq!(missing.body, "no marker here");
/// ```
pub fn split_header_body<'a>(content: &'a str, marker: &str) -> HeaderBody<'a> {
    let split = if marker.is_empty() {
        None
    } else {
        content.split_once(marker)
    };

    match split {
        Some((header, body)) => HeaderBody {
            header,
            body: body.trim_start_matches(['\r', '\n']),
            marker_found: true,
        },
        None => {
            tracing::trace!(marker, "body marker not found, treating content as body");
            HeaderBody {
                header: "",
                body: content,
                marker_found: false,
            }
        }
    }
}
