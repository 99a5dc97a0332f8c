use std::path::{Path, PathBuf};

use tower_lsp::lsp_types::Url;

/// Path key of a tracked source.
///
/// Two ids are equal only when their path strings are byte-for-byte equal;
/// no canonicalization happens here, so the same spelling must be used by
/// discovery and by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(String);

impl FileId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn from_path(path: &Path) -> Self {
        Self(path.display().to_string())
    }

    pub fn from_url(url: &Url) -> Self {
        if let Ok(path) = url.to_file_path() {
            return Self::from_path(&path);
        }
        Self(url.path().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    pub fn to_url(&self) -> Option<Url> {
        Url::from_file_path(self.as_path()).ok()
    }
}

impl std::fmt::Display for FileId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FileId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
#[path = "../../tests/src/vfs/file_id_tests.rs"]
mod tests;
