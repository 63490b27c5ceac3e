//! Test doubles shared by the checker tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use contextspell_ast::{AstArena, NodeKind, Point, Span, SyntaxNode};

use crate::{OracleError, SpellOracle};

/// Oracle that accepts a fixed word list and returns canned suggestions.
///
/// Every query is recorded so tests can assert on call order.
#[derive(Debug, Default)]
pub struct MockOracle {
    correct: HashSet<String>,
    suggestions: HashMap<String, Vec<String>>,
    calls: RefCell<Vec<String>>,
}

impl MockOracle {
    /// Creates an oracle accepting exactly `words`.
    pub fn accepting(words: &[&str]) -> Self {
        Self {
            correct: words.iter().map(|w| w.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Sets the suggestions returned for `word`.
    pub fn suggesting(mut self, word: &str, suggestions: &[&str]) -> Self {
        self.suggestions.insert(
            word.to_string(),
            suggestions.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Returns the queries made so far, as `check:<word>` or `suggest:<word>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SpellOracle for MockOracle {
    fn is_correct(&self, word: &str) -> Result<bool, OracleError> {
        self.calls.borrow_mut().push(format!("check:{word}"));
        Ok(self.correct.contains(word))
    }

    fn suggest(&self, word: &str) -> Result<Vec<String>, OracleError> {
        self.calls.borrow_mut().push(format!("suggest:{word}"));
        Ok(self.suggestions.get(word).cloned().unwrap_or_default())
    }
}

/// Oracle whose lookups always fail.
#[derive(Debug, Default)]
pub struct FailingOracle;

impl SpellOracle for FailingOracle {
    fn is_correct(&self, _word: &str) -> Result<bool, OracleError> {
        Err(OracleError::Query("dictionary backend unavailable".to_string()))
    }

    fn suggest(&self, _word: &str) -> Result<Vec<String>, OracleError> {
        Err(OracleError::Query("dictionary backend unavailable".to_string()))
    }
}

/// Builds a flat tree: a `document` whose children are leaves of the given
/// kinds, each spanning `source[start..end]` and starting on `line`.
pub fn flat_tree<'a>(
    arena: &'a AstArena,
    leaves: &[(NodeKind, u32, u32, u32)],
) -> &'a SyntaxNode<'a> {
    let children: Vec<_> = leaves
        .iter()
        .map(|&(kind, start, end, line)| {
            SyntaxNode::new_leaf(kind, Span::new(start, end), Point::new(line, 0), Point::new(line, 0))
        })
        .collect();
    let end = leaves.iter().map(|l| l.2).max().unwrap_or(0);
    arena.alloc(SyntaxNode::new_parent(
        NodeKind::Document,
        Span::new(0, end),
        Point::new(0, 0),
        Point::new(0, 0),
        arena.alloc_slice_copy(&children),
    ))
}
