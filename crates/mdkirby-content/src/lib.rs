//! Kirby content generation for mdkirby.
//!
//! Two concerns live here:
//!
//! - [`ContentBlocks`]: the `Key: value` block format of Kirby content files,
//!   built either from a tree node ([`node_blocks`]) or from a page with its
//!   rewritten body ([`document_blocks`])
//! - [`rewrite`]: markdown image and link rewriting for pages that are moved
//!   into their own directory, collecting the [`Assets`] to copy alongside
//!
//! # Example
//!
//! ```
//! use mdkirby_content::ContentBlocks;
//!
//! let mut blocks = ContentBlocks::new();
//! blocks.insert("title", "Intro");
//! blocks.insert("text", "Hello");
//!
//! assert_eq!(blocks.render(), "Title: Intro\n\n----\n\nText: Hello\n\n");
//! ```

mod blocks;
mod rewrite;

pub use blocks::{ContentBlocks, document_blocks, node_blocks, render_value, title_case};
pub use rewrite::{Assets, Rewritten, fix_link, rewrite};
