//! Name-to-file resolution shared by the brief store and the context loader.

use std::path::{Path, PathBuf};

/// Extension used for every stored or curated document.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Returns true if `name` can be used as a file stem without leaving its directory.
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Resolves `<dir>/<name>.json`, or `None` if `name` is not a safe file stem.
pub fn document_path(dir: &Path, name: &str) -> Option<PathBuf> {
    is_safe_name(name).then(|| dir.join(format!("{name}.{DOCUMENT_EXTENSION}")))
}
