//! Hunspell dictionary oracle.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use spellbook::Dictionary;
use tracing::{debug, warn};

use crate::{OracleError, SpellOracle};

/// System directories searched after the configured ones.
pub const SYSTEM_DICTIONARY_DIRS: &[&str] = &[
    "/usr/share/hunspell",
    "/usr/share/myspell",
    "/usr/local/share/hunspell",
    "/Library/Spelling",
];

/// Directory relative to the working directory searched before the system
/// directories.
pub const LOCAL_DICTIONARY_DIR: &str = "dictionaries";

/// A spell oracle backed by a Hunspell `.aff`/`.dic` pair.
///
/// Words listed in configuration are accepted in addition to the
/// dictionary's own words.
pub struct HunspellDictionary {
    language: String,
    dictionary: Dictionary,
    extra_words: HashSet<String>,
}

impl fmt::Debug for HunspellDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HunspellDictionary")
            .field("language", &self.language)
            .field("extra_words", &self.extra_words.len())
            .finish_non_exhaustive()
    }
}

impl HunspellDictionary {
    /// The language loaded when none is configured.
    pub const DEFAULT_LANGUAGE: &str = "en_US";

    /// Builds a dictionary from the contents of an `.aff` and a `.dic` file.
    pub fn from_strings(language: &str, aff: &str, dic: &str) -> Result<Self, OracleError> {
        Self::parse(language, language, aff, dic)
    }

    /// Loads `{language}.aff` and `{language}.dic` from `dir`.
    pub fn from_dir(language: &str, dir: &Path) -> Result<Self, OracleError> {
        let read = |path: PathBuf| {
            fs::read_to_string(&path).map_err(|source| OracleError::Read { path, source })
        };
        let aff = read(dir.join(format!("{language}.aff")))?;
        let dic = read(dir.join(format!("{language}.dic")))?;
        let name = dir.join(language).display().to_string();
        Self::parse(language, &name, &aff, &dic)
    }

    fn parse(language: &str, name: &str, aff: &str, dic: &str) -> Result<Self, OracleError> {
        let dictionary = Dictionary::new(aff, dic).map_err(|e| OracleError::Invalid {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            language: language.to_string(),
            dictionary,
            extra_words: HashSet::new(),
        })
    }

    /// Loads the first usable dictionary for `language` from `search_dirs`.
    ///
    /// Directories missing either file are skipped. A pair that fails to load
    /// is logged and skipped; if no directory yields a dictionary, the last
    /// load failure is returned, or [`OracleError::NotFound`] if no directory
    /// had the files at all.
    pub fn load(language: &str, search_dirs: &[PathBuf]) -> Result<Self, OracleError> {
        let mut last_error = None;

        for dir in search_dirs {
            let aff = dir.join(format!("{language}.aff"));
            let dic = dir.join(format!("{language}.dic"));
            if !aff.is_file() || !dic.is_file() {
                debug!("No {} dictionary in {}", language, dir.display());
                continue;
            }

            match Self::from_dir(language, dir) {
                Ok(dictionary) => {
                    debug!("Loaded {} dictionary from {}", language, dir.display());
                    return Ok(dictionary);
                }
                Err(e) => {
                    warn!("Skipping dictionary in {}: {}", dir.display(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| OracleError::NotFound {
            language: language.to_string(),
            searched: search_dirs.iter().map(|d| d.display().to_string()).collect(),
        }))
    }

    /// Adds words that are always accepted.
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_words.extend(words.into_iter().map(Into::into));
        self
    }

    /// Returns the language tag this dictionary was loaded for.
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl SpellOracle for HunspellDictionary {
    fn is_correct(&self, word: &str) -> Result<bool, OracleError> {
        Ok(self.extra_words.contains(word) || self.dictionary.check(word))
    }

    fn suggest(&self, word: &str) -> Result<Vec<String>, OracleError> {
        let mut suggestions = Vec::new();
        self.dictionary.suggest(word, &mut suggestions);
        Ok(suggestions)
    }
}

/// Returns the directories searched for dictionaries, in order: the
/// configured ones, the entries of `DICPATH`, `./dictionaries`, then the
/// system directories.
pub fn search_path(configured: &[PathBuf]) -> Vec<PathBuf> {
    search_path_with(configured, std::env::var_os("DICPATH").as_deref())
}

fn search_path_with(configured: &[PathBuf], dicpath: Option<&OsStr>) -> Vec<PathBuf> {
    let mut dirs = configured.to_vec();
    if let Some(dicpath) = dicpath {
        dirs.extend(std::env::split_paths(dicpath).filter(|p| !p.as_os_str().is_empty()));
    }
    dirs.push(PathBuf::from(LOCAL_DICTIONARY_DIR));
    dirs.extend(SYSTEM_DICTIONARY_DIRS.iter().map(PathBuf::from));
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    const AFF: &str = "SET UTF-8\nTRY esianrtolcdugmphbyfvkwzESIANRTOLCDUGMPHBYFVKWZ'\n";
    const DIC: &str = "4\nhello\nworld\nquick\nbrown\n";

    fn dictionary() -> HunspellDictionary {
        HunspellDictionary::from_strings("en_US", AFF, DIC).unwrap()
    }

    fn write_pair(dir: &Path, language: &str) {
        fs::write(dir.join(format!("{language}.aff")), AFF).unwrap();
        fs::write(dir.join(format!("{language}.dic")), DIC).unwrap();
    }

    #[rstest]
    #[case("hello", true)]
    #[case("world", true)]
    #[case("wrold", false)]
    fn test_is_correct(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(dictionary().is_correct(word).unwrap(), expected);
    }

    #[test]
    fn test_suggest_offers_dictionary_words() {
        let suggestions = dictionary().suggest("qick").unwrap();
        assert!(suggestions.contains(&"quick".to_string()), "{suggestions:?}");
    }

    #[test]
    fn test_extra_words_are_accepted() {
        let dictionary = dictionary().with_words(["ConTeXt", "MetaFun"]);
        assert!(dictionary.is_correct("ConTeXt").unwrap());
        assert!(dictionary.is_correct("MetaFun").unwrap());
        assert!(!dictionary.is_correct("context").unwrap());
    }

    #[test]
    fn test_load_from_first_directory_with_files() {
        let empty = TempDir::new().unwrap();
        let full = TempDir::new().unwrap();
        write_pair(full.path(), "en_GB");

        let dictionary = HunspellDictionary::load(
            "en_GB",
            &[empty.path().to_path_buf(), full.path().to_path_buf()],
        )
        .unwrap();

        assert_eq!(dictionary.language(), "en_GB");
        assert!(dictionary.is_correct("brown").unwrap());
    }

    #[test]
    fn test_load_reports_searched_directories() {
        let empty = TempDir::new().unwrap();
        let err = HunspellDictionary::load("xx_XX", &[empty.path().to_path_buf()]).unwrap_err();

        match err {
            OracleError::NotFound { language, searched } => {
                assert_eq!(language, "xx_XX");
                assert_eq!(searched, vec![empty.path().display().to_string()]);
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_from_dir_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en_US.aff"), AFF).unwrap();

        let err = HunspellDictionary::from_dir("en_US", dir.path()).unwrap_err();
        assert!(matches!(err, OracleError::Read { .. }));
    }

    #[test]
    fn test_search_path_order() {
        let configured = vec![PathBuf::from("/project/dict")];
        let dicpath = std::env::join_paths(["/opt/a", "/opt/b"]).unwrap();

        let dirs = search_path_with(&configured, Some(&dicpath));

        let expected: Vec<PathBuf> = ["/project/dict", "/opt/a", "/opt/b", LOCAL_DICTIONARY_DIR]
            .into_iter()
            .chain(SYSTEM_DICTIONARY_DIRS.iter().copied())
            .map(PathBuf::from)
            .collect();
        assert_eq!(dirs, expected);
    }

    #[test]
    fn test_search_path_without_dicpath() {
        let dirs = search_path_with(&[], None);
        assert_eq!(dirs[0], PathBuf::from(LOCAL_DICTIONARY_DIR));
        assert_eq!(dirs.len(), 1 + SYSTEM_DICTIONARY_DIRS.len());
    }
}
