use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

use serde::Deserialize;

pub const PROJECT_CONFIG_FILENAME: &str = ".frls.toml";
pub const DEFAULT_IGNORE_FILES: &[&str] = &[".gitignore"];
pub const DEFAULT_IGNORE_DIRECTORIES: &[&str] = &[".git"];

/// File and directory names skipped by workspace discovery. Matching is by
/// final path component only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePolicy {
    files: BTreeSet<String>,
    directories: BTreeSet<String>,
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self {
            files: DEFAULT_IGNORE_FILES.iter().map(|name| (*name).to_string()).collect(),
            directories: DEFAULT_IGNORE_DIRECTORIES.iter().map(|name| (*name).to_string()).collect(),
        }
    }
}

impl IgnorePolicy {
    /// Defaults extended by the lists in a `.frls.toml` body.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let config: ProjectConfig = toml::from_str(content)?;
        let mut policy = Self::default();
        policy.files.extend(config.ignore_files.into_iter().filter(|name| !name.trim().is_empty()));
        policy.directories.extend(config.ignore_directories.into_iter().filter(|name| !name.trim().is_empty()));
        Ok(policy)
    }

    pub fn is_ignored_file(
        &self,
        path: &Path,
    ) -> bool {
        file_name(path).is_some_and(|name| self.files.contains(name))
    }

    pub fn is_ignored_dir(
        &self,
        path: &Path,
    ) -> bool {
        file_name(path).is_some_and(|name| self.directories.contains(name))
    }

    pub fn ignored_files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    pub fn ignored_directories(&self) -> impl Iterator<Item = &str> {
        self.directories.iter().map(String::as_str)
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Loads `<root>/.frls.toml`. A missing file yields the default policy.
pub fn load_ignore_policy(root: &Path) -> Result<IgnorePolicy, ProjectConfigError> {
    let path = root.join(PROJECT_CONFIG_FILENAME);
    if !path.is_file() {
        return Ok(IgnorePolicy::default());
    }
    let content = std::fs::read_to_string(&path).map_err(|err| ProjectConfigError::Read {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    IgnorePolicy::from_toml(&content).map_err(|err| ProjectConfigError::Parse {
        path,
        reason: err.to_string(),
    })
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ProjectConfig {
    ignore_files: Vec<String>,
    ignore_directories: Vec<String>,
    #[serde(flatten)]
    _extra: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectConfigError {
    Read {
        path: PathBuf,
        reason: String,
    },
    Parse {
        path: PathBuf,
        reason: String,
    },
}

impl Display for ProjectConfigError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Read {
                path,
                reason,
            } => {
                write!(f, "failed to read {}: {reason}", path.display())
            },
            Self::Parse {
                path,
                reason,
            } => {
                write!(f, "invalid {}: {reason}", path.display())
            },
        }
    }
}

impl std::error::Error for ProjectConfigError {}

#[cfg(test)]
#[path = "../../tests/src/config/project_tests.rs"]
mod tests;
