//! Assignment header metadata.

use serde::{Deserialize, Serialize};

use crate::{config::AssignmentMarkers, text::leading_number};

/// Metadata recovered from the assignment header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssignmentMeta {
    pub raw_header: String,
    pub points: Option<f64>,
    pub submission_types: Vec<String>,
}

/// Scans header lines for the point value and submission types.
///
/// The first matching line of each kind wins. Unrecognized lines are ignored.
///
/// # Examples
///
/// ```
/// use courseparse::{assignment::parse_assignment_header, config::AssignmentMarkers};
///
/// let header = "Assignment: Lab 2\n\nDue: 2024-09-04\nPoints: 10.0\nSubmission Types: online_upload, online_text_entry\n";
/// let meta = parse_assignment_header(header, &AssignmentMarkers::default());
/// assert_eq!(meta.points, Some(10.0));
/// assert_eq!(meta.submission_types, vec!["online_upload", "online_text_entry"]);
/// ```
pub fn parse_assignment_header(header: &str, markers: &AssignmentMarkers) -> AssignmentMeta {
    let mut points = None;
    let mut submission_types = None;

    for line in header.lines().map(str::trim) {
        if points.is_none() && !markers.points.is_empty() {
            if let Some(value) = line.strip_prefix(markers.points.as_str()) {
                points = Some(leading_number(value));
                continue;
            }
        }
        if submission_types.is_none() && !markers.submission_types.is_empty() {
            if let Some(value) = line.strip_prefix(markers.submission_types.as_str()) {
                submission_types = Some(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect::<Vec<_>>(),
                );
            }
        }
    }

    AssignmentMeta {
        raw_header: header.trim().to_string(),
        points: points.flatten(),
        submission_types: submission_types.unwrap_or_default(),
    }
}
