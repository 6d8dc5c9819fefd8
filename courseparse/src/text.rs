//! Line-oriented cleanup shared by both parsers.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

use crate::config::TextOptions;

/// Characters that survive HTML stripping but carry no text.
const INVISIBLE_CHARS: [char; 11] = [
    '\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}', '\u{200E}', '\u{200F}', '\u{202A}', '\u{202B}',
    '\u{202C}', '\u{202D}', '\u{202E}',
];

/// Character-level normalizer run over content before splitting.
///
/// Returns the input unchanged (borrowed) when no option applies, so the
/// common case allocates nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    options: TextOptions,
}

impl TextNormalizer {
    /// Creates a normalizer with the given options.
    pub const fn new(options: TextOptions) -> Self {
        Self { options }
    }

    /// Normalizes `input` according to the configured options.
    pub fn normalize<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(input);

        if self.options.strip_invisible && text.contains(INVISIBLE_CHARS) {
            text = Cow::Owned(remove_invisible_chars(&text));
        }

        if self.options.fold_compatibility {
            let folded: String = (&*text).nfkc().collect();
            if folded != text {
                text = Cow::Owned(folded);
            }
        }

        text
    }
}

/// Removes zero-width characters, byte order marks and bidi controls.
pub fn remove_invisible_chars(input: &str) -> String {
    input.replace(INVISIBLE_CHARS, "")
}

/// Splits `text` into trimmed lines and drops blank lines at both ends.
///
/// Interior blank lines are kept as empty strings so callers can still see
/// paragraph breaks.
pub fn trimmed_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].to_vec(),
        _ => Vec::new(),
    }
}

/// Returns the trimmed, non-blank lines of `text` as owned strings.
pub fn non_blank_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strips any run of bullet prefixes and the whitespace around them.
///
/// Handles mixed runs such as `"- • text"`.
pub fn strip_bullets<'a, S: AsRef<str>>(line: &'a str, bullets: &[S]) -> &'a str {
    let mut rest = line.trim();
    loop {
        let stripped = bullets
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|b| !b.is_empty())
            .find_map(|b| rest.strip_prefix(b));
        match stripped {
            Some(next) => rest = next.trim_start(),
            None => return rest.trim_end(),
        }
    }
}

/// Parses the first whitespace-delimited token of `value` as a finite number.
pub fn leading_number(value: &str) -> Option<f64> {
    value
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}
