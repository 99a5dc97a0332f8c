//! Startup walk of the workspace roots for Ruby sources.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::{
    analysis::{RUBY_EXTENSION, has_ruby_extension},
    config::{IgnorePolicy, IndexingSettings, load_ignore_policy},
};

/// A Ruby file read from disk, ready for ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub text: String,
}

/// Collect every indexable Ruby file under `roots`.
///
/// Each root may carry its own `.frls.toml` ignore lists. A root that is a
/// file is taken as is, provided it passes the same filters.
pub fn discover_ruby_files(
    roots: &[PathBuf],
    settings: &IndexingSettings,
) -> Vec<DiscoveredFile> {
    let max_file_size_bytes = settings.max_file_size_bytes();
    let excluded_prefixes = build_exclude_prefixes(roots, &settings.exclude_paths);
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for root in roots {
        let policy = if root.is_dir() {
            load_ignore_policy(root).unwrap_or_else(|err| {
                warn!("{err}; using default ignore lists");
                IgnorePolicy::default()
            })
        } else {
            IgnorePolicy::default()
        };

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| should_descend(entry, &policy, &excluded_prefixes))
            .filter_map(|entry| entry.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if policy.is_ignored_file(path) {
                debug!("skipping ignored file {}", path.display());
                continue;
            }
            if !has_ruby_extension(path) {
                debug!("skipping {}: not a {RUBY_EXTENSION} file", path.display());
                continue;
            }
            if let Ok(metadata) = entry.metadata()
                && metadata.len() > max_file_size_bytes
            {
                debug!("skipping large file ({} bytes): {}", metadata.len(), path.display());
                continue;
            }
            if !seen.insert(path.to_path_buf()) {
                continue;
            }
            match std::fs::read_to_string(path) {
                Ok(text) => files.push(DiscoveredFile {
                    path: path.to_path_buf(),
                    text,
                }),
                Err(err) => warn!("failed to read {}: {err}", path.display()),
            }
        }
    }

    info!("discovered {} Ruby file(s) in {} root(s)", files.len(), roots.len());
    files
}

fn should_descend(
    entry: &DirEntry,
    policy: &IgnorePolicy,
    excluded_prefixes: &[PathBuf],
) -> bool {
    if is_path_excluded(entry.path(), excluded_prefixes) {
        return false;
    }
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    !policy.is_ignored_dir(entry.path())
}

fn build_exclude_prefixes(
    roots: &[PathBuf],
    exclude_paths: &[String],
) -> Vec<PathBuf> {
    let mut excluded_prefixes = Vec::new();
    let mut seen = HashSet::new();

    for raw_path in exclude_paths {
        let exclude_path = PathBuf::from(raw_path);
        if exclude_path.is_absolute() {
            if seen.insert(exclude_path.clone()) {
                excluded_prefixes.push(exclude_path);
            }
            continue;
        }

        for root in roots {
            let joined = root.join(&exclude_path);
            if seen.insert(joined.clone()) {
                excluded_prefixes.push(joined);
            }
        }
    }

    excluded_prefixes
}

fn is_path_excluded(
    path: &Path,
    excluded_prefixes: &[PathBuf],
) -> bool {
    excluded_prefixes.iter().any(|prefix| path.starts_with(prefix))
}

#[cfg(test)]
#[path = "../../tests/src/server/discovery_tests.rs"]
mod tests;
