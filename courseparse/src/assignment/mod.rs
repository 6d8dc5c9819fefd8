//! Assignment parsing: header metadata and named scenario sections.

mod header;
mod section;

pub use header::{parse_assignment_header, AssignmentMeta};
use once_cell::sync::Lazy;
pub use section::{parse_section_block, Prompts, Section};
use serde::{Deserialize, Serialize};

use crate::{
    config::{AssignmentMarkers, ParserConfig, DEFAULT_HEADINGS},
    error::Result,
    item::{ItemKind, RawItem},
    record::ItemParser,
    segment::{split_header_body, BlockLabel, HeadingSegmenter, Segmenter},
    text::TextNormalizer,
};

static DEFAULT_SEGMENTER: Lazy<HeadingSegmenter> =
    Lazy::new(|| HeadingSegmenter::new(DEFAULT_HEADINGS).expect("Invalid default heading set"));

/// An assignment decomposed into named scenario sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedAssignment {
    pub assignment_id: i64,
    pub title: String,
    pub meta: AssignmentMeta,
    pub sections: Vec<Section>,
}

/// Parser for assignment items.
///
/// # Examples
///
/// ```
/// use courseparse::{assignment::AssignmentParser, item::{ItemKind, RawItem}, record::ItemParser};
///
/// let content = "Assignment: IR Lab\n\nPoints: 10.0\n\nDescription:\nCloud Storage\nScenario:\nA bucket leaked.\n";
/// let item = RawItem::new(ItemKind::Assignment, 9, "IR Lab", content);
///
/// let parsed = AssignmentParser::new().parse(&item);
/// assert_eq!(parsed.meta.points, Some(10.0));
/// assert_eq!(parsed.sections[0].name, "Cloud Storage");
/// assert_eq!(parsed.sections[0].scenario, "A bucket leaked.");
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentParser {
    markers: AssignmentMarkers,
    segmenter: HeadingSegmenter,
    normalizer: TextNormalizer,
}

impl Default for AssignmentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentParser {
    /// Creates a parser with the default markers and heading set.
    pub fn new() -> Self {
        let config = ParserConfig::default();
        Self {
            markers: config.assignment,
            segmenter: DEFAULT_SEGMENTER.clone(),
            normalizer: TextNormalizer::new(config.text),
        }
    }

    /// Creates a parser from a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidConfig` if the heading set cannot be compiled.
    pub fn with_config(config: &ParserConfig) -> Result<Self> {
        Ok(Self {
            markers: config.assignment.clone(),
            segmenter: HeadingSegmenter::new(&config.assignment.headings)?,
            normalizer: TextNormalizer::new(config.text),
        })
    }

    /// Returns the markers in use.
    pub fn markers(&self) -> &AssignmentMarkers {
        &self.markers
    }

    /// Parses the scenario sections of an assignment body.
    pub fn parse_sections(&self, body: &str) -> Vec<Section> {
        self.segmenter
            .segment(body)
            .into_iter()
            .filter_map(|block| match block.label {
                BlockLabel::Heading(name) => {
                    Some(parse_section_block(&name, block.text, &self.markers))
                }
                BlockLabel::Numbered(_) => None,
            })
            .collect()
    }
}

impl ItemParser for AssignmentParser {
    type Output = ParsedAssignment;

    fn name(&self) -> &'static str {
        "assignment"
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Assignment
    }

    fn parse(&self, item: &RawItem) -> ParsedAssignment {
        let content = self.normalizer.normalize(&item.content);
        let split = split_header_body(&content, &self.markers.body);

        // Without a body marker the metadata lines are somewhere in the
        // content, so the whole content is scanned as header.
        let header = if split.marker_found {
            split.header
        } else {
            &*content
        };

        let meta = parse_assignment_header(header, &self.markers);
        let sections = self.parse_sections(split.body);

        tracing::debug!(
            assignment_id = item.id,
            sections = sections.len(),
            marker_found = split.marker_found,
            "parsed assignment"
        );

        ParsedAssignment {
            assignment_id: item.id,
            title: item.title.trim().to_string(),
            meta,
            sections,
        }
    }
}
