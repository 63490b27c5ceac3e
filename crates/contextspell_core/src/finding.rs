//! Spellcheck findings.

use std::fmt;

/// One misspelled word occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The word as it appears in the text.
    pub word: String,
    /// 0-based line of the text node the word came from.
    pub line: u32,
    /// Corrections proposed by the oracle, best first.
    pub suggestions: Vec<String>,
}

impl Finding {
    /// Creates a new finding.
    pub fn new(word: impl Into<String>, line: u32, suggestions: Vec<String>) -> Self {
        Self {
            word: word.into(),
            line,
            suggestions,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found misspelled word: {} on line {}\nPossible corrections: {:?}",
            self.word, self.line, self.suggestions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        let finding = Finding::new("qick", 3, vec!["quick".to_string(), "quack".to_string()]);
        assert_eq!(
            finding.to_string(),
            "Found misspelled word: qick on line 3\nPossible corrections: [\"quick\", \"quack\"]"
        );
    }

    #[test]
    fn test_display_without_suggestions() {
        let finding = Finding::new("zzxq", 0, Vec::new());
        assert_eq!(
            finding.to_string(),
            "Found misspelled word: zzxq on line 0\nPossible corrections: []"
        );
    }
}
