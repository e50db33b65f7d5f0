//! The in-memory workspace tree and the transient shapes it is built from.

pub mod title;

use crate::types::{NotionId, ValidatedUrl};
use serde::Serialize;
use std::fmt;

/// The two kinds of object that appear in a workspace tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Page,
    Database,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Page => "page",
            NodeKind::Database => "database",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered page or database, with its children in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: NotionId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<ValidatedUrl>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a childless node. The title is expected to be normalized already.
    pub fn new(id: NotionId, title: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            url: None,
            children: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: Option<ValidatedUrl>) -> Self {
        self.url = url;
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Depth of the deepest descendant relative to this node (0 for a leaf).
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Visits this node and every descendant depth-first, parents before children.
    pub fn walk<F>(&self, depth: usize, visit: &mut F)
    where
        F: FnMut(&TreeNode, usize),
    {
        visit(self, depth);
        for child in &self.children {
            child.walk(depth + 1, visit);
        }
    }
}

/// Where an object sits in the workspace hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    Workspace,
    Page(NotionId),
    Database(NotionId),
    Block(NotionId),
    /// A parent shape this client does not model; never treated as a root.
    Unknown,
}

impl ParentRef {
    pub fn is_workspace(&self) -> bool {
        matches!(self, ParentRef::Workspace)
    }
}

/// A page or database as listed by the API, already normalized.
///
/// Produced at ingestion and consumed immediately to build a [`TreeNode`].
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteItem {
    pub id: NotionId,
    pub title: String,
    pub kind: NodeKind,
    pub parent: ParentRef,
    pub url: Option<ValidatedUrl>,
}

/// What a child block of a page turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildBlockKind {
    ChildPage,
    ChildDatabase,
    /// Paragraphs, headings, toggles and every other content block.
    Other,
}

/// One entry of a page's block-children listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildBlock {
    pub id: NotionId,
    pub kind: ChildBlockKind,
    /// Normalized title for child pages and databases; empty for other blocks.
    pub title: String,
}

impl ChildBlock {
    /// The tree kind for blocks that belong in the tree.
    pub fn node_kind(&self) -> Option<NodeKind> {
        match self.kind {
            ChildBlockKind::ChildPage => Some(NodeKind::Page),
            ChildBlockKind::ChildDatabase => Some(NodeKind::Database),
            ChildBlockKind::Other => None,
        }
    }
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

impl<T> ResultPage<T> {
    /// A page that ends the listing.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_more: false,
            next_cursor: None,
        }
    }

    /// A page followed by another one at `cursor`.
    pub fn continued(items: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            items,
            has_more: true,
            next_cursor: Some(cursor.into()),
        }
    }
}

/// A single page of a block-children listing.
pub type ChildBlockPage = ResultPage<ChildBlock>;
