use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// How text is split into words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tokenization {
    /// Split on whitespace only. Punctuation stays attached, so `"word."`
    /// is looked up as `"word."`.
    #[default]
    Whitespace,
    /// Unicode (UAX #29) word boundaries. Punctuation and whitespace are
    /// dropped and contractions such as `"don't"` stay whole.
    UnicodeWords,
}

impl fmt::Display for Tokenization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tokenization::Whitespace => "whitespace",
            Tokenization::UnicodeWords => "unicode-words",
        })
    }
}

/// A word taken from a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The word itself.
    pub surface: &'a str,
    /// Byte range in the tokenized text.
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    fn new(text: &'a str, span: Range<usize>) -> Self {
        Self {
            surface: &text[span.clone()],
            span,
        }
    }
}

/// Word tokenizer.
///
/// # Example
///
/// ```rust
/// use contextspell_text::{Tokenization, Tokenizer};
///
/// let words: Vec<_> = Tokenizer::new(Tokenization::Whitespace)
///     .tokenize("  the qick brown fox. ")
///     .into_iter()
///     .map(|t| t.surface)
///     .collect();
/// assert_eq!(words, ["the", "qick", "brown", "fox."]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    mode: Tokenization,
}

impl Tokenizer {
    /// Creates a tokenizer for the given mode.
    pub const fn new(mode: Tokenization) -> Self {
        Self { mode }
    }

    /// Returns the tokenization mode.
    pub const fn mode(&self) -> Tokenization {
        self.mode
    }

    /// Splits `text` into words, left to right.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        match self.mode {
            Tokenization::Whitespace => whitespace_tokens(text),
            Tokenization::UnicodeWords => text
                .unicode_word_indices()
                .map(|(start, word)| Token::new(text, start..start + word.len()))
                .collect(),
        }
    }
}

fn whitespace_tokens(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (idx, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                tokens.push(Token::new(text, s..idx));
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(Token::new(text, s..text.len()));
    }

    tokens
}
