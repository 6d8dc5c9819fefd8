//! Field extraction for a single scenario section.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{config::AssignmentMarkers, text::non_blank_lines};

/// Remainder of a prompt heading line: an optional parenthetical and colon,
/// as in `Be prepared to discuss in class (Elevator Pitch style):`.
static HEADING_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\S\n]*(?:\([^)\n]*\))?[^\S\n]*:?").expect("Invalid heading tail pattern")
});

/// Discussion prompts of a section, one entry per non-blank line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Prompts {
    pub containment: Vec<String>,
    pub post_incident: Vec<String>,
    pub elevator_pitch: Vec<String>,
}

/// One named scenario of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub scenario: String,
    pub prompts: Prompts,
}

/// Extracts the scenario narrative and discussion prompts from a block.
///
/// The scenario runs from the scenario marker (or the block start when it is
/// missing) to the discussion marker. The discussion region is split into
/// containment, post-incident and elevator-pitch prompts only when all three
/// headings appear in exactly that order. Otherwise the whole region lands in
/// `containment` and the other two lists stay empty.
pub fn parse_section_block(name: &str, block: &str, markers: &AssignmentMarkers) -> Section {
    let scenario_start = locate(block, &markers.scenario)
        .map(|i| i + markers.scenario.len())
        .unwrap_or(0);
    let after_scenario = &block[scenario_start..];

    let (scenario, discussion) = match locate(after_scenario, &markers.discussion) {
        Some(i) => (
            &after_scenario[..i],
            &after_scenario[i + markers.discussion.len()..],
        ),
        None => {
            tracing::trace!(section = name, "no discussion marker");
            (after_scenario, "")
        }
    };

    Section {
        name: name.to_string(),
        scenario: scenario.trim().to_string(),
        prompts: split_prompts(name, discussion, markers),
    }
}

fn split_prompts(name: &str, region: &str, markers: &AssignmentMarkers) -> Prompts {
    let containment = locate(region, &markers.containment);
    let post_incident = locate(region, &markers.post_incident);
    let elevator_pitch = locate(region, &markers.elevator_pitch);

    match (containment, post_incident, elevator_pitch) {
        (Some(c), Some(p), Some(e))
            if c + markers.containment.len() <= p && p + markers.post_incident.len() <= e =>
        {
            Prompts {
                containment: prompt_lines(&region[c + markers.containment.len()..p]),
                post_incident: prompt_lines(&region[p + markers.post_incident.len()..e]),
                elevator_pitch: prompt_lines(&region[e + markers.elevator_pitch.len()..]),
            }
        }
        _ => {
            if !region.trim().is_empty() {
                tracing::trace!(
                    section = name,
                    "prompt headings missing or out of order, folding into containment"
                );
            }
            Prompts {
                containment: non_blank_lines(region),
                post_incident: Vec::new(),
                elevator_pitch: Vec::new(),
            }
        }
    }
}

/// Lines of a prompt span, minus what is left of its heading line.
fn prompt_lines(span: &str) -> Vec<String> {
    let tail = HEADING_TAIL.find(span).map_or(0, |m| m.end());
    non_blank_lines(&span[tail..])
}

/// Like `str::find`, but an empty marker never matches.
fn locate(haystack: &str, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        None
    } else {
        haystack.find(marker)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FULL_BLOCK: &str = "\nScenario:\nA public bucket leaked\ncustomer records.\n\n\
Items to discuss with your group:\n\
Containment\nRevoke the public ACL\nRotate keys\n\
Post-Incident Activities\nReview IAM policies\n\
Be prepared to discuss in class (Elevator Pitch style):\nSummarize the breach\n";

    fn parse(block: &str) -> Section {
        parse_section_block("Cloud Storage", block, &AssignmentMarkers::default())
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_block() {
        let section = parse(FULL_BLOCK);
        assert_eq!(section.name, "Cloud Storage");
        assert_eq!(section.scenario, "A public bucket leaked\ncustomer records.");
        assert_eq!(
            section.prompts,
            Prompts {
                containment: lines(&["Revoke the public ACL", "Rotate keys"]),
                post_incident: lines(&["Review IAM policies"]),
                elevator_pitch: lines(&["Summarize the breach"]),
            }
        );
    }

    #[test]
    fn test_heading_with_colon_keeps_inline_text() {
        let block = "Scenario: x\nItems to discuss with your group:\n\
Containment: isolate host\nPost-Incident Activities: write report\n\
Be prepared to discuss in class: pitch it\n";
        let section = parse(block);
        assert_eq!(section.scenario, "x");
        assert_eq!(section.prompts.containment, lines(&["isolate host"]));
        assert_eq!(section.prompts.post_incident, lines(&["write report"]));
        assert_eq!(section.prompts.elevator_pitch, lines(&["pitch it"]));
    }

    #[test]
    fn test_reordered_headings_fold_into_containment() {
        let block = "Scenario:\ns\nItems to discuss with your group:\n\
Post-Incident Activities\nreview\nContainment\nisolate\n\
Be prepared to discuss in class\npitch\n";
        let section = parse(block);
        assert_eq!(
            section.prompts.containment,
            lines(&[
                "Post-Incident Activities",
                "review",
                "Containment",
                "isolate",
                "Be prepared to discuss in class",
                "pitch"
            ])
        );
        assert!(section.prompts.post_incident.is_empty());
        assert!(section.prompts.elevator_pitch.is_empty());
    }

    #[test]
    fn test_missing_elevator_pitch_folds_into_containment() {
        let block = "Scenario:\ns\nItems to discuss with your group:\nContainment\na\nPost-Incident Activities\nb\n";
        let section = parse(block);
        assert_eq!(
            section.prompts.containment,
            lines(&["Containment", "a", "Post-Incident Activities", "b"])
        );
        assert!(section.prompts.post_incident.is_empty());
    }

    #[test]
    fn test_missing_discussion_marker() {
        let section = parse("Scenario:\nOnly a story.\nContainment\nnot a prompt\n");
        assert_eq!(section.scenario, "Only a story.\nContainment\nnot a prompt");
        assert_eq!(section.prompts, Prompts::default());
    }

    #[test]
    fn test_missing_scenario_marker() {
        let section = parse("\nStory first.\nItems to discuss with your group:\nthoughts\n");
        assert_eq!(section.scenario, "Story first.");
        assert_eq!(section.prompts.containment, lines(&["thoughts"]));
    }

    #[test]
    fn test_empty_block() {
        let section = parse("");
        assert_eq!(section.scenario, "");
        assert_eq!(section.prompts, Prompts::default());
    }

    #[test]
    fn test_empty_markers_never_match() {
        let markers = AssignmentMarkers {
            scenario: String::new(),
            discussion: String::new(),
            ..AssignmentMarkers::default()
        };
        let section = parse_section_block("X", "story\nContainment\n", &markers);
        assert_eq!(section.scenario, "story\nContainment");
        assert_eq!(section.prompts, Prompts::default());
    }
}
