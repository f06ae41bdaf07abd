//! Splits lyric text into syllable tokens.
//!
//! Words are separated on whitespace first, then each word is split on
//! hyphens independently, so a hyphen never joins syllables across words.

use crate::constants::lyrics::HYPHEN;

/// Parse lyrics into syllables.
///
/// Every fragment of a hyphenated word except the last keeps a trailing
/// hyphen to mark that the word continues in the next token.
///
/// # Examples
/// - `"hello world"` -> `["hello", "world"]`
/// - `"hel-lo wor-ld"` -> `["hel-", "lo", "wor-", "ld"]`
/// - `"he--llo"` -> `["he-", "-", "llo"]`
///
/// Empty fragments from doubled or boundary hyphens are kept as-is.
pub fn parse_lyrics(lyrics: &str) -> Vec<String> {
    lyrics
        .split_whitespace()
        .flat_map(split_word)
        .collect()
}

/// Split a single word on hyphens, re-attaching the hyphen to all but the last fragment.
fn split_word(word: &str) -> impl Iterator<Item = String> + '_ {
    let mut fragments = word.split(HYPHEN).peekable();
    std::iter::from_fn(move || {
        let fragment = fragments.next()?;
        if fragments.peek().is_some() {
            let mut continued = String::with_capacity(fragment.len() + 1);
            continued.push_str(fragment);
            continued.push(HYPHEN);
            Some(continued)
        } else {
            Some(fragment.to_string())
        }
    })
}

/// Whether a syllable continues into the next token of the same word.
pub fn is_continued(syllable: &str) -> bool {
    syllable.ends_with(HYPHEN)
}

/// Merge two adjacent syllables into one.
///
/// - `"syl-"` + `"la"` -> `"syl-la"` (existing hyphen kept)
/// - `"syl"` + `"la"` -> `"syl-la"` (hyphen added)
pub fn merge_syllables(first: &str, second: &str) -> String {
    if is_continued(first) {
        format!("{first}{second}")
    } else {
        format!("{first}{HYPHEN}{second}")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_parse_lyrics_simple() {
        assert_eq!(parse_lyrics("hello world"), vec!["hello", "world"]);
    }

    #[test]
    fn test_parse_lyrics_with_hyphens() {
        assert_eq!(parse_lyrics("hel-lo wor-ld"), vec!["hel-", "lo", "wor-", "ld"]);
    }

    #[test]
    fn test_parse_lyrics_double_hyphens() {
        assert_eq!(parse_lyrics("he--llo"), vec!["he-", "-", "llo"]);
    }

    #[test]
    fn test_parse_lyrics_boundary_hyphens_keep_empty_fragments() {
        assert_eq!(parse_lyrics("-ab"), vec!["-", "ab"]);
        assert_eq!(parse_lyrics("ab-"), vec!["ab-", ""]);
        assert_eq!(parse_lyrics("--"), vec!["-", "-", ""]);
    }

    #[test]
    fn test_parse_lyrics_empty() {
        assert!(parse_lyrics("").is_empty());
        assert!(parse_lyrics(" \t\n ").is_empty());
    }

    #[test]
    fn test_parse_lyrics_collapses_whitespace_runs() {
        assert_eq!(parse_lyrics("  a \t b\n\nc  "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_lyrics_multibyte() {
        assert_eq!(parse_lyrics("Ky-ri-e é-lé"), vec!["Ky-", "ri-", "e", "é-", "lé"]);
    }

    #[test]
    fn test_merge_syllables() {
        assert_eq!(merge_syllables("syl-", "la"), "syl-la");
        assert_eq!(merge_syllables("syl", "la"), "syl-la");
    }

    #[test]
    fn test_is_continued() {
        assert!(is_continued("hel-"));
        assert!(!is_continued("lo"));
        assert!(!is_continued(""));
    }
}
