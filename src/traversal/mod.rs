//! Recursive assembly of the workspace hierarchy.
//!
//! The traversal is a single sequential depth-first stream: one outstanding
//! request at a time, children expanded in the order the API lists them.
//! Only root discovery can fail the run; every other listing failure
//! degrades to an empty branch plus a [`Warning`].

pub mod context;
pub mod progress;

use futures::future::BoxFuture;

use crate::api::{collect_all_pages, WorkspaceRepository};
use crate::error::AppError;
use crate::model::{NodeKind, RemoteItem, TreeNode};
use crate::types::{NotionId, ValidatedUrl, Warning};

pub use context::TraversalContext;
pub use progress::{
    progress_prefix, ProgressEvent, ProgressReporter, QuietReporter, SpinnerReporter,
};

/// Knobs that shape a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraversalOptions {
    /// Deepest level whose children are fetched; `None` means unbounded.
    /// Depth 0 is the workspace root level.
    pub max_depth: Option<usize>,
    /// Attach canonical URLs to nodes.
    pub include_urls: bool,
}

impl TraversalOptions {
    /// Whether a node at `depth` may have its children listed.
    pub fn allows_expansion(&self, depth: usize) -> bool {
        match self.max_depth {
            Some(max) => depth < max,
            None => true,
        }
    }
}

/// The result of a completed traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalOutcome {
    /// Workspace-level nodes in discovery order, children attached.
    pub roots: Vec<TreeNode>,
    /// Branch failures that were degraded to empty children.
    pub warnings: Vec<Warning>,
    pub nodes_visited: usize,
    /// At least one node sat at the depth bound and was left unexpanded.
    pub depth_limit_reached: bool,
}

/// Builds the workspace tree from a [`WorkspaceRepository`].
pub struct TreeBuilder<'a> {
    repository: &'a dyn WorkspaceRepository,
    options: TraversalOptions,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(repository: &'a dyn WorkspaceRepository, options: TraversalOptions) -> Self {
        Self {
            repository,
            options,
        }
    }

    pub fn options(&self) -> TraversalOptions {
        self.options
    }

    /// Discovers the workspace roots and expands each of them.
    ///
    /// Fails only when root discovery fails.
    pub async fn build(
        &self,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<TraversalOutcome, AppError> {
        let mut context = TraversalContext::new(reporter);
        let frontier = self.discover_roots(&mut context).await?;
        Ok(self.expand_frontier(frontier, context).await)
    }

    /// Expands an already-known root frontier, keeping its order.
    pub async fn build_from_frontier(
        &self,
        frontier: Vec<RemoteItem>,
        reporter: &mut dyn ProgressReporter,
    ) -> TraversalOutcome {
        let context = TraversalContext::new(reporter);
        self.expand_frontier(frontier, context).await
    }

    /// Queries root pages, then root databases, keeping only items whose
    /// direct parent is the workspace.
    async fn discover_roots(
        &self,
        context: &mut TraversalContext<'_>,
    ) -> Result<Vec<RemoteItem>, AppError> {
        context.emit(ProgressEvent::DiscoveryStarted);

        let pages = self
            .repository
            .list_root_pages()
            .await
            .map_err(|source| AppError::RootDiscoveryFailed {
                object_kind: "page",
                source: Box::new(source),
            })?;
        let mut frontier: Vec<RemoteItem> = pages
            .into_iter()
            .filter(|item| item.parent.is_workspace())
            .collect();
        context.emit(ProgressEvent::RootsFound {
            count: frontier.len(),
        });

        let databases = self
            .repository
            .list_root_databases()
            .await
            .map_err(|source| AppError::RootDiscoveryFailed {
                object_kind: "database",
                source: Box::new(source),
            })?;
        frontier.extend(
            databases
                .into_iter()
                .filter(|item| item.parent.is_workspace()),
        );
        context.emit(ProgressEvent::RootsFound {
            count: frontier.len(),
        });

        log::info!("Discovered {} workspace root(s)", frontier.len());
        Ok(frontier)
    }

    async fn expand_frontier(
        &self,
        frontier: Vec<RemoteItem>,
        mut context: TraversalContext<'_>,
    ) -> TraversalOutcome {
        context.begin_roots(frontier.len());

        let mut roots = Vec::with_capacity(frontier.len());
        for (index, item) in frontier.into_iter().enumerate() {
            context.expanding_root(index + 1, &item.title);
            let node = self.seed(item);
            roots.push(self.expand(node, 0, &mut context).await);
        }

        log::info!(
            "Traversal finished: {} root(s), {} node(s) visited",
            roots.len(),
            context.nodes_visited()
        );
        context.finish(roots)
    }

    /// Turns a listed item into an unexpanded node. Listing URLs are kept
    /// only when URLs were requested.
    fn seed(&self, item: RemoteItem) -> TreeNode {
        let url = if self.options.include_urls {
            item.url
        } else {
            None
        };
        TreeNode::new(item.id, item.title, item.kind).with_url(url)
    }

    /// Attaches the children of `node`, recursively.
    fn expand<'s, 'r: 's>(
        &'s self,
        mut node: TreeNode,
        depth: usize,
        context: &'s mut TraversalContext<'r>,
    ) -> BoxFuture<'s, TreeNode> {
        Box::pin(async move {
            context.visit_node();

            if !self.options.allows_expansion(depth) {
                context.note_depth_limit();
                return node;
            }

            node.children = match node.kind {
                NodeKind::Database => self.database_children(&node, depth, context).await,
                NodeKind::Page => self.page_children(&node, depth, context).await,
            };
            node
        })
    }

    /// Rows of a database. Only the first listing page is consulted.
    async fn database_children(
        &self,
        database: &TreeNode,
        depth: usize,
        context: &mut TraversalContext<'_>,
    ) -> Vec<TreeNode> {
        let rows = match self.repository.list_database_rows(&database.id).await {
            Ok(rows) => rows,
            Err(e) => {
                context.branch_failed(database, "rows", &e);
                return Vec::new();
            }
        };

        let mut children = Vec::with_capacity(rows.len());
        for row in rows {
            let child = self.seed(row);
            children.push(self.expand(child, depth + 1, context).await);
        }
        children
    }

    /// Child pages and child databases of a page, across every listing page.
    async fn page_children(
        &self,
        page: &TreeNode,
        depth: usize,
        context: &mut TraversalContext<'_>,
    ) -> Vec<TreeNode> {
        let listing = collect_all_pages(|cursor| {
            self.repository.list_page_children(&page.id, cursor)
        })
        .await;
        let blocks = match listing {
            Ok(blocks) => blocks,
            Err(e) => {
                context.branch_failed(page, "children", &e);
                return Vec::new();
            }
        };

        let mut children = Vec::new();
        for block in blocks {
            let Some(kind) = block.node_kind() else {
                continue;
            };
            let url = if self.options.include_urls {
                self.resolve_url(&block.id, kind).await
            } else {
                None
            };
            let child = TreeNode::new(block.id, block.title, kind).with_url(url);
            children.push(self.expand(child, depth + 1, context).await);
        }
        children
    }

    /// Looks up the canonical URL of a child block. A failed lookup only
    /// drops the URL.
    async fn resolve_url(&self, id: &NotionId, kind: NodeKind) -> Option<ValidatedUrl> {
        let lookup = match kind {
            NodeKind::Page => self.repository.fetch_page_url(id).await,
            NodeKind::Database => self.repository.fetch_database_url(id).await,
        };
        match lookup {
            Ok(url) => Some(url),
            Err(e) => {
                log::debug!("No URL for {} {}: {}", kind, id, e);
                None
            }
        }
    }
}
