//! Destination node tree for mdkirby.
//!
//! This crate provides:
//! - [`NodeTree`]: the tree of destination directories, built from page URLs
//! - Ordinal assignment from the navigation order
//! - Path resolution with ordinal (`3_guide`) and draft (`_guide`) prefixes
//!
//! # Quick Start
//!
//! ```
//! use mdkirby_source::{NavItem, PageId};
//! use mdkirby_tree::{NodeTree, UnlistedPolicy};
//!
//! let mut tree = NodeTree::new(UnlistedPolicy::Plain);
//! let guide = tree.register_page("guide/", PageId::new(0));
//! let faq = tree.register_page("faq/", PageId::new(1));
//!
//! let nav = vec![NavItem::Page(PageId::new(1)), NavItem::Page(PageId::new(0))];
//! let root = tree.root();
//! tree.assign_ordinals(&nav, root);
//!
//! assert_eq!(tree.path(faq), "0_faq");
//! assert_eq!(tree.path(guide), "1_guide");
//! ```

mod node;
mod tree;

pub use node::{Node, NodeId, UnlistedPolicy};
pub use tree::{NodeTree, Walk, section_segment};
