//! Crate constants.
//!
//! Centralizes the marker characters shared by tokenizing and export.

/// Lyric text constants.
pub mod lyrics {
    /// Separates syllables within a word, and marks a syllable that continues.
    pub const HYPHEN: char = '-';
}

/// `LilyPond` output constants.
pub mod lilypond {
    /// Hyphen token placed between syllables of one word.
    pub const HYPHEN_TOKEN: &str = "--";

    /// Lyric skip, used for syllables with no text.
    pub const SKIP_TOKEN: &str = "_";

    /// Indentation for syllables inside a `\lyricmode` block.
    pub const INDENT: &str = "  ";
}

/// Environment variable names read by [`crate::config::Config::load`].
pub mod env {
    /// Policy for a slur that never closes (`extend`, `close`, `reject`).
    pub const UNTERMINATED: &str = "UNDERLAY_UNTERMINATED";

    /// Output format of the CLI (`json`, `lilypond`).
    pub const FORMAT: &str = "UNDERLAY_FORMAT";

    /// Default input path when none is given on the command line.
    pub const INPUT: &str = "UNDERLAY_INPUT";

    /// Log filter directive for the CLI subscriber.
    pub const LOG: &str = "UNDERLAY_LOG";
}
