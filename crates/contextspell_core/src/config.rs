//! Spellchecker configuration.

use std::fs;
use std::path::{Path, PathBuf};

use contextspell_ast::NodeKind;
use contextspell_text::Tokenization;
use jsonc_parser::ParseOptions;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{CheckError, CheckOptions, HunspellDictionary};

/// Configuration for a spellcheck run.
///
/// Read from `.contextspell.jsonc` or `.contextspell.json`. Comments and
/// trailing commas are allowed; unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpellConfig {
    /// Dictionary language tag, e.g. `en_US`.
    #[serde(default = "default_language")]
    pub language: String,

    /// Extra directories searched for dictionaries, before the standard ones.
    /// Relative paths are resolved against the configuration file's directory.
    #[serde(default)]
    pub dictionary_paths: Vec<PathBuf>,

    /// Words accepted in addition to the dictionary.
    #[serde(default)]
    pub words: Vec<String>,

    /// Node kinds whose text is spellchecked.
    #[serde(default = "default_check_kinds")]
    pub check_kinds: Vec<NodeKind>,

    /// How node text is split into words.
    #[serde(default)]
    pub tokenization: Tokenization,

    /// Whether to print the concrete syntax tree before the findings.
    #[serde(default = "default_show_tree")]
    pub show_tree: bool,

    /// Directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_language() -> String {
    HunspellDictionary::DEFAULT_LANGUAGE.to_string()
}

fn default_check_kinds() -> Vec<NodeKind> {
    vec![NodeKind::Text]
}

fn default_show_tree() -> bool {
    true
}

impl SpellConfig {
    /// Configuration file names, in lookup order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".contextspell.jsonc", ".contextspell.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            language: default_language(),
            dictionary_paths: Vec::new(),
            words: Vec::new(),
            check_kinds: default_check_kinds(),
            tokenization: Tokenization::default(),
            show_tree: default_show_tree(),
            base_dir: None,
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CheckError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CheckError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_json(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }
        debug!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    /// Parses configuration from a JSON or JSONC string.
    pub fn from_json(json: &str) -> Result<Self, CheckError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| CheckError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let config: Self = serde_json::from_value(value)
            .map_err(|e| CheckError::config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the configured language, rejecting anything that is not a
    /// plain language tag.
    pub fn set_language(&mut self, language: &str) -> Result<(), CheckError> {
        check_language(language)?;
        self.language = language.to_string();
        Ok(())
    }

    fn validate(&self) -> Result<(), CheckError> {
        check_language(&self.language)?;

        if self.check_kinds.is_empty() {
            warn!("check_kinds is empty; no text will be spellchecked");
        }
        for kind in self.check_kinds.iter().filter(|k| !k.is_prose()) {
            warn!("check_kinds includes '{}', which holds markup rather than prose", kind);
        }
        Ok(())
    }

    /// Looks for a configuration file in `start` and each of its ancestors.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            Self::CONFIG_FILES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Returns the configured dictionary directories, resolved against the
    /// configuration file's directory.
    pub fn dictionary_dirs(&self) -> Vec<PathBuf> {
        self.dictionary_paths
            .iter()
            .map(|path| match &self.base_dir {
                Some(base) if path.is_relative() => base.join(path),
                _ => path.clone(),
            })
            .collect()
    }

    /// Returns the checker options this configuration selects.
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions::new()
            .kinds(self.check_kinds.iter().copied())
            .tokenization(self.tokenization)
    }
}

/// Language tags name dictionary files, so only `[A-Za-z0-9_-]` is allowed.
fn check_language(language: &str) -> Result<(), CheckError> {
    let valid = !language.is_empty()
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(CheckError::config(format!(
            "Invalid language '{}': expected a tag such as en_US",
            language
        )))
    }
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = SpellConfig::new();
        assert_eq!(config.language, "en_US");
        assert!(config.dictionary_paths.is_empty());
        assert!(config.words.is_empty());
        assert_eq!(config.check_kinds, vec![NodeKind::Text]);
        assert_eq!(config.tokenization, Tokenization::Whitespace);
        assert!(config.show_tree);
        assert_eq!(config.check_options(), CheckOptions::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(SpellConfig::from_json("{}").unwrap(), SpellConfig::default());
        assert_eq!(SpellConfig::from_json("").unwrap(), SpellConfig::default());
    }

    #[test]
    fn test_config_from_jsonc() {
        let json = r#"{
            // British spelling
            "language": "en_GB",
            "dictionary_paths": ["dict"],
            "words": ["ConTeXt", "MetaFun"], /* project jargon */
            "check_kinds": ["text", "value_brace_group_text"],
            "tokenization": "unicode-words",
            "show_tree": false,
        }"#;

        let config = SpellConfig::from_json(json).unwrap();
        assert_eq!(config.language, "en_GB");
        assert_eq!(config.dictionary_paths, vec![PathBuf::from("dict")]);
        assert_eq!(config.words, vec!["ConTeXt", "MetaFun"]);
        assert_eq!(
            config.check_options(),
            CheckOptions::new()
                .kinds([NodeKind::Text, NodeKind::ValueBraceGroupText])
                .tokenization(Tokenization::UnicodeWords)
        );
        assert!(!config.show_tree);
    }

    #[rstest]
    #[case::unknown_property(r#"{ "langauge": "en_US" }"#, "unknown field")]
    #[case::type_mismatch(r#"{ "show_tree": "yes" }"#, "Invalid config")]
    #[case::unknown_node_kind(r#"{ "check_kinds": ["paragraph"] }"#, "Invalid config")]
    #[case::unknown_tokenization(r#"{ "tokenization": "words" }"#, "Invalid config")]
    #[case::path_in_language(r#"{ "language": "../en_US" }"#, "Invalid language")]
    #[case::empty_language(r#"{ "language": "" }"#, "Invalid language")]
    #[case::syntax_error(r#"{ "language": }"#, "Invalid JSON")]
    fn test_config_validation_errors(#[case] json: &str, #[case] expected_error_part: &str) {
        let result = SpellConfig::from_json(json);
        assert!(result.is_err(), "Expected error for JSON: {}", json);
        let err = result.unwrap_err();
        assert!(
            err.to_string().contains(expected_error_part),
            "Error message '{}' should contain '{}'",
            err,
            expected_error_part
        );
    }

    #[rstest]
    #[case("de_DE")]
    #[case("pt-BR")]
    fn test_set_language(#[case] language: &str) {
        let mut config = SpellConfig::new();
        config.set_language(language).unwrap();
        assert_eq!(config.language, language);
    }

    #[rstest]
    #[case("../en_US")]
    #[case("/usr/share/hunspell/en_US")]
    #[case("en US")]
    #[case("")]
    fn test_set_language_rejects_non_tags(#[case] language: &str) {
        let mut config = SpellConfig::new();
        let err = config.set_language(language).unwrap_err();

        assert!(matches!(err, CheckError::Config(_)));
        assert!(err.to_string().contains("Invalid language"), "{err}");
        assert_eq!(config.language, "en_US");
    }

    #[test]
    fn test_from_file_sets_base_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".contextspell.json");
        fs::write(&path, r#"{ "dictionary_paths": ["dict", "/abs/dict"] }"#).unwrap();

        let config = SpellConfig::from_file(&path).unwrap();

        assert_eq!(config.base_dir.as_deref(), Some(dir.path()));
        assert_eq!(
            config.dictionary_dirs(),
            vec![dir.path().join("dict"), PathBuf::from("/abs/dict")]
        );
    }

    #[test]
    fn test_from_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = SpellConfig::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CheckError::Config(_)));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("chapters/one");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".contextspell.json"), "{}").unwrap();

        assert_eq!(
            SpellConfig::discover(&nested),
            Some(dir.path().join(".contextspell.json"))
        );
    }

    #[test]
    fn test_discover_prefers_jsonc_and_nearest() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("book");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".contextspell.jsonc"), "{}").unwrap();
        fs::write(nested.join(".contextspell.json"), "{}").unwrap();
        fs::write(nested.join(".contextspell.jsonc"), "{}").unwrap();

        assert_eq!(
            SpellConfig::discover(&nested),
            Some(nested.join(".contextspell.jsonc"))
        );
    }

    #[test]
    fn test_dictionary_dirs_without_base_dir() {
        let config = SpellConfig {
            dictionary_paths: vec![PathBuf::from("dict")],
            ..SpellConfig::default()
        };
        assert_eq!(config.dictionary_dirs(), vec![PathBuf::from("dict")]);
    }
}
