//! datahub-catalog: browse, filter and flag dataset descriptors.
//!
//! The catalog holds two fixed datasets (India & States, and IMF) and lets a
//! user narrow them through a category tree, free-text search and per-record
//! flags, then page through the result. Flags persist across runs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use datahub_catalog::api::Catalog;
//! use datahub_catalog::config::Config;
//! use datahub_catalog::model::FlagKind;
//!
//! fn main() -> datahub_catalog::Result<()> {
//!     let catalog = Catalog::open(Config::load()?)?;
//!
//!     let mut state = catalog.new_state();
//!     state.select_category("Economy");
//!     state.toggle_flag_filter(FlagKind::Bookmark);
//!
//!     let view = catalog.view(&state);
//!     println!("{} | {}", view.heading, view.showing);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`dataset`]: immutable, deduplicated datasets and their category trees
//! - [`resolver`]: category tree navigation and region/country code tables
//! - [`filter`]: selection, search and flag stages; sidebar facets
//! - [`flags`]: per-record flags with durable storage
//! - [`pagination`]: clamped page slicing
//! - [`browser`]: browsing session state and the derived page view
//! - [`auth`]: mock login gate
//! - [`api`]: high-level facade over all of the above
//! - [`cli`]: command-line interface
//! - [`config`]: configuration management
//! - [`error`]: error types and handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod auth;
pub mod browser;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod flags;
pub mod model;
pub mod pagination;
pub mod resolver;
pub mod util;

// Re-export commonly used types at the crate root
pub use error::{CatalogError, Result};
pub use model::{DataSource, DatasetRecord, FlagKind, SelectionPath};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::api::Catalog;
    pub use crate::browser::{BrowseView, BrowserState};
    pub use crate::error::{CatalogError, Result};
    pub use crate::filter::{FilterCriteria, FilterEngine};
    pub use crate::flags::{FlagSet, FlagStore};
    pub use crate::model::{DataSource, DatasetRecord, FlagKind, SelectionPath};
    pub use crate::pagination::{paginate, Page};
}
