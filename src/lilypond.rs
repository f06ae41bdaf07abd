//! `LilyPond` lyric export.
//!
//! Renders placed syllables as a `\lyricmode` block. `LilyPond` aligns lyric
//! syllables to notes itself, so only the order and hyphenation survive; the
//! cell indices are not written out.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::lilypond::{HYPHEN_TOKEN, INDENT, SKIP_TOKEN};
use crate::lyrics::is_continued;
use crate::types::Assignment;

/// Characters `LilyPond` would read as something other than lyric text.
#[allow(clippy::expect_used)]
static RE_NEEDS_QUOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\d\s{}"\\#$%^&_~<>|]"#).expect("valid regex: RE_NEEDS_QUOTES")
});

/// Render one syllable as `LilyPond` lyric tokens.
///
/// A continued syllable (`"hel-"`) becomes `hel --`.
pub fn syllable_tokens(syllable: &str) -> String {
    let (text, continued) = if is_continued(syllable) {
        (&syllable[..syllable.len() - 1], true)
    } else {
        (syllable, false)
    };

    let mut out = quote_if_needed(text);
    if continued {
        out.push(' ');
        out.push_str(HYPHEN_TOKEN);
    }
    out
}

/// Quote lyric text that `LilyPond` would otherwise misread.
fn quote_if_needed(text: &str) -> String {
    if text.is_empty() {
        return SKIP_TOKEN.to_string();
    }
    if !RE_NEEDS_QUOTES.is_match(text) {
        return text.to_string();
    }

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if matches!(ch, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Render assignments as a `\lyricmode { ... }` block.
pub fn to_lyricmode(assignments: &[Assignment]) -> String {
    let mut out = String::from("\\lyricmode {\n");
    if !assignments.is_empty() {
        let body = assignments
            .iter()
            .map(|a| syllable_tokens(&a.syllable))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{INDENT}{body}");
    }
    out.push_str("}\n");
    out
}
