//! Single-threaded analysis core: the source registry, the symbol index and
//! the grammar, plus the ingestion workflows that keep them in step.
//!
//! Every mutation takes `&mut self`. Rejected requests are logged and leave
//! all state untouched; nothing here returns an error to the caller.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    config::StaleLocationPolicy,
    definition,
    document::{OpenStatus, Source, SourceRegistry},
    ide::{Location, Position},
    symbols::{SymbolIndex, build_for_source},
    syntax::{Grammar, PrismGrammar},
    vfs::FileId,
};

pub const RUBY_LANGUAGE_ID: &str = "ruby";
pub const RUBY_EXTENSION: &str = ".rb";

pub struct Analysis {
    registry: SourceRegistry,
    index: SymbolIndex,
    grammar: Box<dyn Grammar>,
    stale_locations: StaleLocationPolicy,
}

impl Default for Analysis {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Analysis {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Analysis")
            .field("sources", &self.registry.len())
            .field("names", &self.index.len())
            .field("stale_locations", &self.stale_locations)
            .finish()
    }
}

impl Analysis {
    pub fn new() -> Self {
        Self::with_grammar(Box::new(PrismGrammar))
    }

    pub fn with_grammar(grammar: Box<dyn Grammar>) -> Self {
        Self {
            registry: SourceRegistry::new(),
            index: SymbolIndex::new(),
            grammar,
            stale_locations: StaleLocationPolicy::default(),
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn source(
        &self,
        file: &FileId,
    ) -> Option<&Source> {
        self.registry.lookup(file)
    }

    pub fn stale_locations(&self) -> StaleLocationPolicy {
        self.stale_locations
    }

    pub fn set_stale_locations(
        &mut self,
        policy: StaleLocationPolicy,
    ) {
        self.stale_locations = policy;
    }

    /// Store `content` for `file` (creating it as opened if new) and reindex.
    pub fn sync_or_create(
        &mut self,
        file: FileId,
        content: String,
    ) {
        info!("syncing {file}");
        self.registry.sync_or_create(file.clone(), content);
        self.reindex(&file);
    }

    /// Editor opened `file`. Only Ruby buffers are tracked.
    pub fn open(
        &mut self,
        file: FileId,
        language_id: &str,
        text: String,
    ) -> bool {
        if language_id != RUBY_LANGUAGE_ID {
            warn!("ignoring {file}: unsupported language `{language_id}`");
            return false;
        }
        if !has_ruby_extension(file.as_path()) {
            warn!("ignoring {file}: only {RUBY_EXTENSION} files are supported");
            return false;
        }

        match self.registry.lookup(&file).map(Source::status) {
            Some(OpenStatus::Opened) => {
                warn!("{file} is already open");
                false
            },
            Some(OpenStatus::Closed) => {
                self.sync_or_create(file.clone(), text);
                if let Some(source) = self.registry.lookup_mut(&file) {
                    source.set_status(OpenStatus::Opened);
                }
                info!("opened {file}");
                true
            },
            None => {
                self.sync_or_create(file.clone(), text);
                info!("opened {file}");
                true
            },
        }
    }

    /// Full-text replacement of an opened source.
    pub fn change(
        &mut self,
        file: FileId,
        text: String,
    ) -> bool {
        match self.registry.lookup(&file).map(Source::status) {
            Some(OpenStatus::Opened) => {
                self.sync_or_create(file, text);
                true
            },
            Some(OpenStatus::Closed) => {
                warn!("cannot change {file}: open it first");
                false
            },
            None => {
                warn!("cannot change {file}: not tracked");
                false
            },
        }
    }

    /// Apply several full-text replacements in order. Stops at the first
    /// rejected one and returns how many were applied.
    pub fn apply_changes(
        &mut self,
        file: &FileId,
        texts: impl IntoIterator<Item = String>,
    ) -> usize {
        let mut applied = 0;
        for text in texts {
            if !self.change(file.clone(), text) {
                break;
            }
            applied += 1;
        }
        applied
    }

    pub fn close(
        &mut self,
        file: &FileId,
    ) -> bool {
        match self.registry.lookup_mut(file) {
            Some(source) if source.is_open() => {
                source.set_status(OpenStatus::Closed);
                info!("closed {file}");
                true
            },
            Some(_) => {
                debug!("{file} is already closed");
                false
            },
            None => {
                warn!("cannot close {file}: not tracked");
                false
            },
        }
    }

    /// Startup ingestion of a file read from disk. Existing sources are left
    /// alone, so discovery never changes an open buffer.
    pub fn discover(
        &mut self,
        file: FileId,
        text: String,
    ) -> bool {
        if !has_ruby_extension(file.as_path()) {
            debug!("skipping {file}: only {RUBY_EXTENSION} files are supported");
            return false;
        }
        if self.registry.insert(file.clone(), text, OpenStatus::Closed).is_none() {
            debug!("{file} is already tracked");
            return false;
        }
        self.reindex(&file);
        true
    }

    /// Definition locations for the node under `position` in `file`.
    pub fn resolve_definition(
        &self,
        file: &FileId,
        position: Position,
    ) -> Vec<Location> {
        let Some(source) = self.registry.lookup(file) else {
            info!("definition requested for untracked {file}");
            return Vec::new();
        };
        definition::resolve_definition(source, &self.index, position)
    }

    /// Reparse the current content of `file` and merge its symbols.
    ///
    /// The old tree is released before parsing. When the grammar fails the
    /// source is left without a tree and the index is not touched.
    fn reindex(
        &mut self,
        file: &FileId,
    ) {
        let Self {
            registry,
            index,
            grammar,
            stale_locations,
        } = self;
        let Some(source) = registry.lookup_mut(file) else {
            return;
        };

        source.clear_tree();
        let tree = match grammar.parse(source.content()) {
            Ok(tree) => tree,
            Err(err) => {
                warn!("failed to parse {file}: {err}");
                return;
            },
        };
        for diagnostic in tree.diagnostics() {
            debug!("{file}:{}: {}", diagnostic.line, diagnostic.message);
        }

        let symbols = build_for_source(file, &tree);
        if *stale_locations == StaleLocationPolicy::Purge {
            let removed = index.purge_file(file);
            debug!("purged {removed} stale location(s) of {file}");
        }
        let added = index.merge(symbols);
        debug!("indexed {file}: {added} new location(s)");

        source.install_tree(tree);
    }
}

/// Whether `path` ends in [`RUBY_EXTENSION`]. The match is case-sensitive.
pub fn has_ruby_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| RUBY_EXTENSION.strip_prefix('.') == ext.to_str())
}

#[cfg(test)]
#[path = "../tests/src/analysis_tests.rs"]
mod tests;
