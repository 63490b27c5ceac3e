//! Spell policy: which nodes are checked and how their words are reported.

use contextspell_ast::{NodeKind, SyntaxNode, SyntaxTree};
use contextspell_text::{Tokenization, Tokenizer};
use tracing::{debug, trace};

use crate::{CheckError, Finding, Reporter, SpellOracle};

/// Options for a spellcheck run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Node kinds whose text is checked.
    /// Default: `[text]`
    pub kinds: Vec<NodeKind>,
    /// How node text is split into words.
    /// Default: whitespace
    pub tokenization: Tokenization,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            kinds: vec![NodeKind::Text],
            tokenization: Tokenization::default(),
        }
    }
}

impl CheckOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the set of checked node kinds.
    pub fn kinds(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Sets the tokenization mode.
    pub fn tokenization(mut self, tokenization: Tokenization) -> Self {
        self.tokenization = tokenization;
        self
    }
}

/// Counters for one spellcheck run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Nodes pulled from the traversal.
    pub nodes_visited: usize,
    /// Nodes whose kind was checked.
    pub nodes_checked: usize,
    /// Words looked up in the oracle.
    pub words_checked: usize,
    /// Findings reported.
    pub findings: usize,
}

/// Spellchecks the text nodes of a syntax tree.
///
/// The checker holds no state between runs: checking the same tree twice
/// with the same oracle reports the same findings in the same order.
///
/// # Example
///
/// ```rust
/// use contextspell_ast::AstArena;
/// use contextspell_core::{Finding, HunspellDictionary, SpellChecker};
/// use contextspell_parser::{ContextParser, Parser};
///
/// let oracle = HunspellDictionary::from_strings("en_US", "SET UTF-8\n", "2\nhello\nworld\n").unwrap();
/// let arena = AstArena::new();
/// let tree = ContextParser::new().parse(&arena, r"\emph{hello} wrold").unwrap();
///
/// let mut findings: Vec<Finding> = Vec::new();
/// SpellChecker::new(oracle).check_tree(&tree, &mut findings).unwrap();
///
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].word, "wrold");
/// ```
#[derive(Debug)]
pub struct SpellChecker<O> {
    oracle: O,
    options: CheckOptions,
    tokenizer: Tokenizer,
}

impl<O: SpellOracle> SpellChecker<O> {
    /// Creates a checker with default options.
    pub fn new(oracle: O) -> Self {
        Self::with_options(oracle, CheckOptions::default())
    }

    /// Creates a checker with the given options.
    pub fn with_options(oracle: O, options: CheckOptions) -> Self {
        let tokenizer = Tokenizer::new(options.tokenization);
        Self {
            oracle,
            options,
            tokenizer,
        }
    }

    /// Returns the options in use.
    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Checks every node of `tree` in document order.
    pub fn check_tree<R>(&self, tree: &SyntaxTree<'_>, reporter: &mut R) -> Result<CheckSummary, CheckError>
    where
        R: Reporter + ?Sized,
    {
        self.check_nodes(tree.source(), tree.traverse(), reporter)
    }

    /// Checks a sequence of nodes whose spans index into `source`.
    ///
    /// Nodes of an unchecked kind are skipped. Each misspelled word is
    /// reported as soon as it is found; the first error stops the run, and
    /// findings already reported stay reported.
    pub fn check_nodes<'t, I, R>(
        &self,
        source: &str,
        nodes: I,
        reporter: &mut R,
    ) -> Result<CheckSummary, CheckError>
    where
        I: IntoIterator<Item = &'t SyntaxNode<'t>>,
        R: Reporter + ?Sized,
    {
        let mut summary = CheckSummary::default();

        for node in nodes {
            summary.nodes_visited += 1;
            if !self.options.kinds.contains(&node.kind) {
                continue;
            }
            summary.nodes_checked += 1;
            self.check_node(source, node, reporter, &mut summary)?;
        }

        debug!(
            "Checked {} of {} nodes, {} words, {} findings",
            summary.nodes_checked, summary.nodes_visited, summary.words_checked, summary.findings
        );
        Ok(summary)
    }

    fn check_node<R>(
        &self,
        source: &str,
        node: &SyntaxNode<'_>,
        reporter: &mut R,
        summary: &mut CheckSummary,
    ) -> Result<(), CheckError>
    where
        R: Reporter + ?Sized,
    {
        let text = node.utf8_text(source.as_bytes())?.trim();
        let line = node.start_line();
        trace!("Checking {} on line {}: {:?}", node.kind, line, text);

        for token in self.tokenizer.tokenize(text) {
            summary.words_checked += 1;
            if self.oracle.is_correct(token.surface)? {
                continue;
            }
            let suggestions = self.oracle.suggest(token.surface)?;
            debug!("Misspelled word {:?} on line {}", token.surface, line);
            reporter.report(Finding::new(token.surface, line, suggestions))?;
            summary.findings += 1;
        }
        Ok(())
    }
}
