//! Documentation source loading for mdkirby.
//!
//! This crate is the host side of the conversion. It provides:
//!
//! - [`Page`]: a parsed source document (title, body, front matter)
//! - [`NavItem`]: the display-ordered navigation tree
//! - [`Site`]: all pages plus the navigation, addressed by [`PageId`]
//! - [`SiteLoader`]: builds a [`Site`] from a docs directory and an optional
//!   `mkdocs.yml` navigation
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use mdkirby_source::SiteLoader;
//!
//! let site = SiteLoader::new(PathBuf::from("docs"))
//!     .with_nav_file(PathBuf::from("mkdocs.yml"))
//!     .load()?;
//! for (id, page) in site.iter() {
//!     println!("{id}: {} -> {}", page.src_path.display(), page.url);
//! }
//! ```

mod loader;
mod metadata;
mod nav;
mod page;
mod paths;
mod site;

pub use loader::{SiteLoader, SourceError};
pub use metadata::{Metadata, MetadataError, split_front_matter};
pub use nav::NavItem;
pub use page::{Page, PageId};
pub use paths::{file_path_to_url, is_external};
pub use site::Site;

// Re-export for callers inspecting metadata values
pub use serde_yaml::Value as MetaValue;
