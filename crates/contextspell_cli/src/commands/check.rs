//! Check command implementation

use std::env;
use std::io;

use contextspell_ast::AstArena;
use contextspell_core::{
    HunspellDictionary, SpellChecker, SpellConfig, TextReporter, read_source, search_path,
};
use contextspell_parser::{ContextParser, Parser};
use miette::{IntoDiagnostic, Result};
use tracing::{debug, info};

use crate::cli::Cli;

pub fn run_check(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => SpellConfig::from_file(path).into_diagnostic()?,
        None => find_config()?,
    };
    if let Some(language) = &cli.language {
        config.set_language(language).into_diagnostic()?;
    }

    let mut dirs = cli.dictionary_dirs.clone();
    dirs.extend(config.dictionary_dirs());
    let search_dirs = search_path(&dirs);
    debug!("Dictionary search path: {:?}", search_dirs);

    let dictionary = HunspellDictionary::load(&config.language, &search_dirs)
        .into_diagnostic()?
        .with_words(config.words.iter().cloned());

    let source = read_source(&cli.input_file).into_diagnostic()?;
    let arena = AstArena::for_source(source.len());
    let tree = ContextParser::new()
        .parse(&arena, &source)
        .into_diagnostic()?;

    let stdout = io::stdout();
    let mut reporter = TextReporter::new(stdout.lock());
    if config.show_tree && !cli.no_tree {
        reporter
            .tree(&cli.input_file, &tree.to_sexp())
            .into_diagnostic()?;
    }

    let checker = SpellChecker::with_options(dictionary, config.check_options());
    let summary = checker.check_tree(&tree, &mut reporter).into_diagnostic()?;

    info!(
        "Checked {} words in {} nodes, {} misspelled",
        summary.words_checked, summary.nodes_checked, summary.findings
    );

    Ok(())
}

/// Loads the nearest configuration file above the working directory, or the
/// defaults if there is none.
pub fn find_config() -> Result<SpellConfig> {
    let cwd = env::current_dir().into_diagnostic()?;
    if let Some(path) = SpellConfig::discover(&cwd) {
        info!("Using config: {}", path.display());
        return SpellConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(SpellConfig::new())
}
