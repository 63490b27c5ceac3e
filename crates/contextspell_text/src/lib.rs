//! # contextspell_text
//!
//! Splits the prose of a `text` node into the words that are looked up in
//! the dictionary.

mod tokenizer;

pub use tokenizer::{Token, Tokenization, Tokenizer};
