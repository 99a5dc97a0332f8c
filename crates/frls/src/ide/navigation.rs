use crate::vfs::FileId;

/// Zero-based point in a document. `character` is a byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(
        line: u32,
        character: u32,
    ) -> Self {
        Self {
            line,
            character,
        }
    }
}

/// A span inside one file. Equality is structural over `(file, start, end)`,
/// which is what the symbol index deduplicates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: FileId,
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(
        file: FileId,
        start: Position,
        end: Position,
    ) -> Self {
        debug_assert!(start <= end, "location end before start");
        Self {
            file,
            start,
            end,
        }
    }
}

/// Cardinality-shaped answer to a navigation query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    Single(Location),
    Multiple(Vec<Location>),
}

impl NavigationTarget {
    pub fn from_locations(locations: Vec<Location>) -> Option<Self> {
        match locations.len() {
            0 => None,
            1 => locations.into_iter().next().map(Self::Single),
            _ => Some(Self::Multiple(locations)),
        }
    }
}
