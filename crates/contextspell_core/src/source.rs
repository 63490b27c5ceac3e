//! Reading input documents.

use std::fs;
use std::path::Path;

use crate::CheckError;

/// Reads a ConTeXt source file as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String, CheckError> {
    let bytes = fs::read(path)
        .map_err(|e| CheckError::file(format!("Failed to read {}: {}", path.display(), e)))?;
    String::from_utf8(bytes).map_err(|e| {
        CheckError::decode(format!(
            "{} is not valid UTF-8 (invalid byte at offset {})",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })
}
