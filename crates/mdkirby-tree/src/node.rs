//! Node types.

use std::fmt;

use mdkirby_source::PageId;

/// Index of a node inside its [`NodeTree`](crate::NodeTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// How nodes missing from the navigation are named on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnlistedPolicy {
    /// No prefix at all, exactly like a node without an ordinal.
    #[default]
    Plain,
    /// `_` prefix, which marks the directory as a draft.
    Draft,
}

/// One level of the destination tree.
#[derive(Debug)]
pub struct Node {
    pub(crate) segment: String,
    pub(crate) children: Vec<NodeId>,
    pub(crate) page: Option<PageId>,
    pub(crate) ordinal: Option<usize>,
    pub(crate) listed: bool,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(segment: String, parent: Option<NodeId>) -> Self {
        Self {
            segment,
            children: Vec::new(),
            page: None,
            ordinal: None,
            listed: false,
            parent,
        }
    }

    /// URL path component, unique among siblings. Empty for the root.
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Children in registration order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Page attached to this node; `None` for intermediate nodes.
    #[must_use]
    pub fn page(&self) -> Option<PageId> {
        self.page
    }

    /// Position among siblings in the navigation, if the node was stamped.
    #[must_use]
    pub fn ordinal(&self) -> Option<usize> {
        self.ordinal
    }

    /// Whether the navigation walk reached this node.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.listed
    }

    /// Parent node; `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}
