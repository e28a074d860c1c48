//! Verse formatting: ellipsis markers, verse numbers, section titles and quotes.
//!
//! Output fragments are HTML. Verse text and titles are escaped before any
//! markup is added around them.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::document::Verse;
use crate::constants::markup;

/// Regex matching any HTML tag, for plain-text rendering.
#[allow(clippy::expect_used)]
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").expect("valid regex: RE_TAG")
});

/// Regex matching a line-break tag.
#[allow(clippy::expect_used)]
static RE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>").expect("valid regex: RE_BREAK")
});

/// How a passage is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct DisplayOptions {
    /// Wrap the passage in double quotes, turning inner double quotes into `'`.
    pub quotes: bool,
    /// Prefix each verse with its number.
    pub verse_numbers: bool,
    /// Join fragments with `<br>` instead of a space.
    pub line_breaks: bool,
    /// Mark skipped verses with `[...]`.
    pub ellipsis: bool,
    /// Append the compact citation in parentheses.
    pub parentheses_citation: bool,
    /// Show section titles before the verses that carry them.
    pub section_titles: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            quotes: true,
            verse_numbers: false,
            line_breaks: false,
            ellipsis: true,
            parentheses_citation: false,
            section_titles: false,
        }
    }
}

impl DisplayOptions {
    /// Separator placed between fragments.
    pub const fn separator(&self) -> &'static str {
        if self.line_breaks {
            markup::LINE_BREAK
        } else {
            markup::SPACE
        }
    }

    /// Join fragments with this configuration's separator.
    pub fn join(&self, fragments: &[String]) -> String {
        fragments.join(self.separator())
    }
}

/// Escape text for use inside HTML element content or a quoted attribute.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Undo [`escape_markup`].
fn unescape_markup(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Flatten formatted HTML to plain text: `<br>` becomes a newline, other tags
/// are dropped and entities decoded.
pub fn to_plain_text(html: &str) -> String {
    let with_breaks = RE_BREAK.replace_all(html, "\n");
    let stripped = RE_TAG.replace_all(&with_breaks, "");
    unescape_markup(&stripped)
}

fn normalize_quotes(text: &str) -> String {
    markup::DOUBLE_QUOTES
        .iter()
        .fold(text.to_string(), |acc, quote| acc.replace(quote, markup::INNER_QUOTE))
}

/// Format the verses at `indices` (ascending) from `chapter`.
///
/// Gaps between consecutive indices produce an ellipsis marker when enabled.
/// Missing or empty verses emit nothing, but still count for gap detection:
/// `[1, 2, 3]` with an empty verse 2 shows verses 1 and 3 with no marker.
pub fn format_verses(indices: &[usize], chapter: &[Verse], options: &DisplayOptions) -> Vec<String> {
    let mut fragments = Vec::with_capacity(indices.len());
    let mut previous: Option<usize> = None;
    let mut opened = false;

    for (position, &index) in indices.iter().enumerate() {
        if options.ellipsis && previous.is_some_and(|prev| index > prev.saturating_add(1)) {
            fragments.push(markup::ELLIPSIS.to_string());
        }
        previous = Some(index);

        let Some(verse) = chapter.get(index).filter(|v| !v.is_gap()) else {
            continue;
        };

        let quoted = |text: &str| {
            let escaped = escape_markup(text);
            if options.quotes {
                normalize_quotes(&escaped)
            } else {
                escaped
            }
        };

        let mut body = quoted(&verse.text);
        if options.verse_numbers {
            body = format!("<sup>{}</sup> {body}", index + 1);
        }

        let title = match &verse.title {
            Some(title) if options.section_titles => format!(
                "<span class=\"{}\">{}</span> ",
                markup::TITLE_CLASS,
                quoted(title)
            ),
            _ => String::new(),
        };

        if options.quotes {
            if !opened {
                body.insert(0, markup::PASSAGE_QUOTE);
            }
            if position + 1 == indices.len() {
                body.push(markup::PASSAGE_QUOTE);
            }
        }
        opened = true;

        fragments.push(title + &body);
    }

    fragments
}
