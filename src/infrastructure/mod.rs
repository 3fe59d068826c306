// SPDX-License-Identifier: MPL-2.0
//! Infrastructure adapters implementing application ports.
//!
//! - [`http`]: Catalog access over the service's JSON API (`reqwest`)
//! - [`memory`]: In-memory catalog for tests and demos

pub mod http;
pub mod memory;

pub use http::CatalogClient;
pub use memory::InMemoryCatalog;
