use indexmap::{IndexMap, IndexSet};

use crate::{
    ide::{Location, Position},
    syntax::{LineCol, NodeRef, SyntaxTree, TextSpan, traverse},
    vfs::FileId,
};

/// Constants found in one file, ready to be merged into the global index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSymbols {
    file: FileId,
    entries: IndexMap<String, IndexSet<Location>>,
}

impl FileSymbols {
    pub fn new(file: FileId) -> Self {
        Self {
            file,
            entries: IndexMap::new(),
        }
    }

    pub fn file(&self) -> &FileId {
        &self.file
    }

    pub fn insert(
        &mut self,
        name: String,
        location: Location,
    ) {
        self.entries.entry(name).or_default().insert(location);
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&IndexSet<Location>> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> IndexMap<String, IndexSet<Location>> {
        self.entries
    }
}

/// Collect every constant-introducing node of `tree`, located by its name
/// token.
pub fn build_for_source(
    file: &FileId,
    tree: &SyntaxTree,
) -> FileSymbols {
    let mut symbols = FileSymbols::new(file.clone());
    traverse(
        tree.root(),
        &mut |node: NodeRef<'_>, symbols: &mut FileSymbols| {
            if !node.kind().introduces_constant() {
                return;
            }
            if let Some(constant) = node.constant() {
                let location = location_of(file, tree, constant.span);
                symbols.insert(constant.name.clone(), location);
            }
        },
        &mut symbols,
    );
    symbols
}

/// Byte span to a zero-based [`Location`].
pub fn location_of(
    file: &FileId,
    tree: &SyntaxTree,
    span: TextSpan,
) -> Location {
    let line_index = tree.line_index();
    Location::new(
        file.clone(),
        to_position(line_index.line_col(span.start)),
        to_position(line_index.line_col(span.end)),
    )
}

fn to_position(line_col: LineCol) -> Position {
    Position::new(line_col.line.saturating_sub(1), line_col.column)
}

#[cfg(test)]
#[path = "../../tests/src/symbols/builder_tests.rs"]
mod tests;
