// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`query`]: Query services (CQRS read-side)
//! - [`command`]: Command services (CQRS write-side)
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services
//!
//! # Example
//!
//! ```ignore
//! use minori::application::command::OrderEngine;
//! use minori::application::query::{Navigator, Route};
//!
//! let mut engine = OrderEngine::new(&catalog, "album-1");
//! engine.move_up("image-7").await?;
//!
//! let links = Navigator::new(Route::Bookshelf, image_base).render(&descriptor);
//! ```

pub mod command;
pub mod port;
pub mod query;
