//! Site navigation model for documentation sites.
//!
//! This crate provides:
//! - [`SiteConfig`]: validated, immutable site identity and navigation
//! - [`Walk`]: depth-first traversal over sidebar entries
//! - Round-trip serialization in the renderer's configuration shape
//!
//! Sidebar entries are classified by shape exactly once, during
//! construction: an object carrying `children` becomes a
//! [`SidebarEntry::Group`], everything else a [`SidebarEntry::Leaf`].
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), sitenav_model::ModelError> {
//! use sitenav_model::SiteConfig;
//!
//! let site = SiteConfig::builder("Firmware notes")
//!     .nav("Home", "/")
//!     .leaf("/", "Home")
//!     .group("Analysis", "/analysis/", [("/analysis/main.md", "Main")])
//!     .build()?;
//!
//! for (depth, node) in site.walk() {
//!     let _indent = "  ".repeat(depth);
//!     let _label = node.label();
//! }
//! assert_eq!(site.page_paths().count(), 3);
//! # Ok(())
//! # }
//! ```

mod error;
mod nav;
pub mod raw;
mod sidebar;
mod site;
mod walk;

pub use error::{EntryPosition, ModelError};
pub use nav::{HeadLink, LinkTarget, NavLink};
pub use raw::RawSiteConfig;
pub use sidebar::{GroupEntry, LeafEntry, SidebarEntry, SidebarNode};
pub use site::{SiteConfig, SiteConfigBuilder, ThemeConfig};
pub use walk::Walk;
