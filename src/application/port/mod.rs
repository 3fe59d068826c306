// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters and
//! the presentation layer implement. These traits use only domain types.
//!
//! # Available Ports
//!
//! - [`catalog`]: Remote catalog access
//! - [`view`]: Element containers and address-driven screens
//!
//! # Design Notes
//!
//! - Catalog methods are `async` (via `async_trait`) and the trait is `Send + Sync`
//! - Methods return `Result` with the crate error taxonomy
//!
//! # Example
//!
//! ```ignore
//! use minori::application::port::{CatalogApi, Collection, ListFilters};
//!
//! async fn first_page(api: &dyn CatalogApi) -> minori::error::Result<usize> {
//!     let page = api.get_page(&Collection::Albums, 1, ListFilters::default()).await?;
//!     Ok(page.entries.len())
//! }
//! ```

pub mod catalog;
pub mod view;

pub use catalog::{CatalogApi, CatalogPage, Collection, ListFilters, Upload, ARCHIVE_EXTENSIONS};
pub use view::{AddressedScreen, Container};
