//! Destination tree with navigation ordering.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<Node>` with parent/children relationships
//! tracked by indices. Children are owned through the parent's index list;
//! the parent index is only ever followed upwards, to compose paths. This
//! provides:
//! - O(c) child lookup where c is the number of siblings
//! - O(d) path composition where d is the node depth
//!
//! # Lifecycle
//!
//! 1. [`NodeTree::register_page`] once per page URL, creating intermediate
//!    nodes on demand
//! 2. [`NodeTree::assign_ordinals`] once over the navigation tree
//! 3. [`NodeTree::path`] / [`NodeTree::walk`] to materialize the output

use mdkirby_source::{NavItem, PageId, Site};

use crate::node::{Node, NodeId, UnlistedPolicy};

/// Directory segment a navigation section is expected to live under.
///
/// Lower-cased with spaces replaced by `_` (`Getting Started` ->
/// `getting_started`).
#[must_use]
pub fn section_segment(title: &str) -> String {
    title.to_lowercase().replace(' ', "_")
}

/// Tree of destination directories.
#[derive(Debug)]
pub struct NodeTree {
    nodes: Vec<Node>,
    policy: UnlistedPolicy,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new(UnlistedPolicy::default())
    }
}

impl NodeTree {
    /// Create a tree holding only the root node.
    #[must_use]
    pub fn new(policy: UnlistedPolicy) -> Self {
        Self {
            nodes: vec![Node::new(String::new(), None)],
            policy,
        }
    }

    /// Root node. Its segment and path are empty.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get node by id.
    ///
    /// Ids are only minted by this tree, so every id it handed out is valid.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Naming policy for unlisted nodes.
    #[must_use]
    pub fn policy(&self) -> UnlistedPolicy {
        self.policy
    }

    /// Find a direct child by segment.
    #[must_use]
    pub fn find_child(&self, parent: NodeId, segment: &str) -> Option<NodeId> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].segment == segment)
    }

    /// Register a slash-separated URL and return its terminal node.
    ///
    /// Leading and trailing slashes are ignored; an empty URL is the root.
    /// Registering the same URL twice returns the same node.
    pub fn register(&mut self, url: &str) -> NodeId {
        let trimmed = url.trim_matches('/');
        if trimmed.is_empty() {
            return self.root();
        }
        self.register_segments(trimmed.split('/'))
    }

    /// Walk segments from the root, creating missing nodes.
    ///
    /// Segments are not validated. An empty sequence, or a single empty
    /// segment, returns the root.
    pub fn register_segments<'s>(&mut self, segments: impl IntoIterator<Item = &'s str>) -> NodeId {
        let segments: Vec<&str> = segments.into_iter().collect();
        let mut current = self.root();
        if segments == [""] {
            return current;
        }
        for segment in segments {
            current = match self.find_child(current, segment) {
                Some(existing) => {
                    tracing::trace!(segment, "Node already exists");
                    existing
                }
                None => self.add_child(current, segment),
            };
        }
        current
    }

    /// Register a page URL and attach the page to its node.
    pub fn register_page(&mut self, url: &str, page: PageId) -> NodeId {
        let id = self.register(url);
        self.set_page(id, page);
        id
    }

    /// Attach a page to a node.
    pub fn set_page(&mut self, id: NodeId, page: PageId) {
        self.nodes[id.0].page = Some(page);
    }

    fn add_child(&mut self, parent: NodeId, segment: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(Node::new(segment.to_owned(), Some(parent)));
        self.nodes[parent.0].children.push(id);
        tracing::debug!(segment, parent = %parent, "Added new node");
        id
    }

    /// Stamp ordinals on nodes from the navigation order at one level.
    ///
    /// Pages consume a position whether or not a node matches them; the
    /// matching node is `node` itself when it carries the page (a section's
    /// index page), otherwise a direct child carrying it. Sections consume no
    /// position: the child named by [`section_segment`] is entered with the
    /// section's items and a fresh counter.
    pub fn assign_ordinals(&mut self, items: &[NavItem], node: NodeId) {
        let mut ordinal = 0;

        for item in items {
            match item {
                NavItem::Page(page) => {
                    let target = if self.nodes[node.0].page == Some(*page) {
                        Some(node)
                    } else {
                        self.nodes[node.0]
                            .children
                            .iter()
                            .copied()
                            .find(|&child| self.nodes[child.0].page == Some(*page))
                    };

                    if let Some(target) = target {
                        let stamped = &mut self.nodes[target.0];
                        stamped.ordinal = Some(ordinal);
                        stamped.listed = true;
                        tracing::debug!(ordinal, page = %page, node = %target, "Assigned ordinal");
                    }
                    ordinal += 1;
                }
                NavItem::Section { title, children } => {
                    let segment = section_segment(title);
                    if let Some(child) = self.find_child(node, &segment) {
                        self.nodes[child.0].listed = true;
                        self.assign_ordinals(children, child);
                    } else {
                        tracing::debug!(section = %title, segment, "No node for section");
                    }
                }
            }
        }
    }

    /// Whether a node is named as a draft.
    ///
    /// Only under [`UnlistedPolicy::Draft`], and only for nodes the
    /// navigation walk never reached. The root is never a draft.
    #[must_use]
    pub fn is_draft(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        match self.policy {
            UnlistedPolicy::Plain => false,
            UnlistedPolicy::Draft => node.parent.is_some() && !node.listed,
        }
    }

    /// Directory name of a node: segment with its draft or ordinal prefix.
    #[must_use]
    pub fn dir_name(&self, id: NodeId) -> String {
        let node = &self.nodes[id.0];
        if self.is_draft(id) {
            format!("_{}", node.segment)
        } else if let Some(ordinal) = node.ordinal {
            format!("{ordinal}_{}", node.segment)
        } else {
            node.segment.clone()
        }
    }

    /// Destination path of a node relative to the output root.
    ///
    /// Ancestor directory names joined by `/`; empty for the root.
    #[must_use]
    pub fn path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            names.push(self.dir_name(current));
            current = parent;
        }
        names.reverse();
        names.join("/")
    }

    /// Template override from the page attached to a node.
    #[must_use]
    pub fn template<'s>(&self, id: NodeId, site: &'s Site) -> Option<&'s str> {
        self.nodes[id.0]
            .page
            .and_then(|page| site.page(page))
            .and_then(|page| page.meta.template())
    }

    /// Depth-first pre-order traversal, root first, children in
    /// registration order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![self.root()],
        }
    }
}

/// Pre-order iterator over a [`NodeTree`].
pub struct Walk<'a> {
    tree: &'a NodeTree,
    stack: Vec<NodeId>,
}

impl Iterator for Walk<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.node(id).children.iter().rev().copied());
        Some(id)
    }
}
