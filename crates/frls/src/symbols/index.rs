use indexmap::{IndexMap, IndexSet, map::Entry};

use crate::{ide::Location, symbols::FileSymbols, vfs::FileId};

/// Flat constant name to locations table shared by every tracked file.
///
/// Names are not namespaced: `Project::Error` and a top-level `Error` land in
/// the same bucket. Locations keep the order they were first seen in and are
/// deduplicated by structural equality.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    map: IndexMap<String, IndexSet<Location>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union one file's symbols into the table. Returns how many locations
    /// were new.
    pub fn merge(
        &mut self,
        symbols: FileSymbols,
    ) -> usize {
        let mut added = 0;
        for (name, locations) in symbols.into_entries() {
            match self.map.entry(name) {
                Entry::Vacant(entry) => {
                    added += locations.len();
                    entry.insert(locations);
                },
                Entry::Occupied(mut entry) => {
                    let existing = entry.get_mut();
                    for location in locations {
                        if existing.insert(location) {
                            added += 1;
                        }
                    }
                },
            }
        }
        added
    }

    /// Drop every location that points into `file`. Names whose set becomes
    /// empty stay as keys with no locations.
    pub fn purge_file(
        &mut self,
        file: &FileId,
    ) -> usize {
        let mut removed = 0;
        for locations in self.map.values_mut() {
            let before = locations.len();
            locations.retain(|location| &location.file != file);
            removed += before - locations.len();
        }
        removed
    }

    /// Locations recorded for `name`, in insertion order.
    pub fn get(
        &self,
        name: &str,
    ) -> Vec<Location> {
        self.map.get(name).map(|locations| locations.iter().cloned().collect()).unwrap_or_default()
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.map.contains_key(name)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn location_count(&self) -> usize {
        self.map.values().map(IndexSet::len).sum()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/index_tests.rs"]
mod tests;
