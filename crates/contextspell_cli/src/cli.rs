//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;

/// ContextSpell - spellcheck the prose of a ConTeXt document
#[derive(Parser)]
#[command(name = "contextspell")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// ConTeXt file to spellcheck
    pub input_file: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Dictionary language (e.g. en_US), overrides the configuration
    #[arg(short, long)]
    pub language: Option<String>,

    /// Additional directory to search for dictionaries (repeatable)
    #[arg(short = 'd', long = "dictionary-dir", value_name = "DIR")]
    pub dictionary_dirs: Vec<PathBuf>,

    /// Do not print the concrete syntax tree
    #[arg(long)]
    pub no_tree: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
