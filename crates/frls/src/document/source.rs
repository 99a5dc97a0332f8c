use crate::{syntax::SyntaxTree, vfs::FileId};

/// Whether the editor currently owns the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenStatus {
    Opened,
    Closed,
}

impl std::fmt::Display for OpenStatus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Opened => f.write_str("opened"),
            Self::Closed => f.write_str("closed"),
        }
    }
}

/// One tracked file: its latest full text, open status, and the tree
/// parsed from that text (absent until parsed, or after a failed parse).
#[derive(Debug)]
pub struct Source {
    file: FileId,
    content: String,
    status: OpenStatus,
    tree: Option<SyntaxTree>,
}

impl Source {
    pub fn new(
        file: FileId,
        content: String,
        status: OpenStatus,
    ) -> Self {
        Self {
            file,
            content,
            status,
            tree: None,
        }
    }

    pub fn file(&self) -> &FileId {
        &self.file
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> OpenStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == OpenStatus::Opened
    }

    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.tree.as_ref()
    }

    /// Replace the text. The tree still describes the old text until the
    /// caller reparses.
    pub fn set_content(
        &mut self,
        content: String,
    ) {
        self.content = content;
    }

    pub fn set_status(
        &mut self,
        status: OpenStatus,
    ) {
        self.status = status;
    }

    /// Release the current tree; returns whether there was one.
    pub fn clear_tree(&mut self) -> bool {
        self.tree.take().is_some()
    }

    pub fn install_tree(
        &mut self,
        tree: SyntaxTree,
    ) {
        self.tree = Some(tree);
    }
}
