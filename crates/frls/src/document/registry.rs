use std::collections::{HashMap, hash_map::Entry};

use crate::{
    document::{OpenStatus, Source},
    vfs::FileId,
};

/// Every source the server knows about, keyed by exact path string.
///
/// Entries are created by discovery or by the editor and are never removed;
/// closing a file only flips its status.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: HashMap<FileId, Source>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(
        &self,
        file: &FileId,
    ) -> Option<&Source> {
        self.sources.get(file)
    }

    pub fn lookup_mut(
        &mut self,
        file: &FileId,
    ) -> Option<&mut Source> {
        self.sources.get_mut(file)
    }

    pub fn contains(
        &self,
        file: &FileId,
    ) -> bool {
        self.sources.contains_key(file)
    }

    /// Replace the content of a tracked source, or start tracking it as
    /// opened. Status of an existing source is left alone; nothing is
    /// reparsed here.
    pub fn sync_or_create(
        &mut self,
        file: FileId,
        content: String,
    ) -> &mut Source {
        match self.sources.entry(file) {
            Entry::Occupied(entry) => {
                let source = entry.into_mut();
                source.set_content(content);
                source
            },
            Entry::Vacant(entry) => {
                let file = entry.key().clone();
                entry.insert(Source::new(file, content, OpenStatus::Opened))
            },
        }
    }

    /// Track a new source. Returns `None` without touching anything when the
    /// path is already tracked.
    pub fn insert(
        &mut self,
        file: FileId,
        content: String,
        status: OpenStatus,
    ) -> Option<&mut Source> {
        match self.sources.entry(file) {
            Entry::Occupied(_) => None,
            Entry::Vacant(entry) => {
                let file = entry.key().clone();
                Some(entry.insert(Source::new(file, content, status)))
            },
        }
    }

    /// Tracked paths, sorted.
    pub fn paths(&self) -> Vec<&FileId> {
        let mut paths: Vec<_> = self.sources.keys().collect();
        paths.sort();
        paths
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/registry_tests.rs"]
mod tests;
