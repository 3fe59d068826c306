// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure catalog types with no I/O.
//!
//! - [`address`]: Location fragment codec
//! - [`catalog`]: Albums, images, authors and page descriptors
//! - [`ordering`]: Sparse sibling order keys

pub mod address;
pub mod catalog;
pub mod ordering;

pub use address::Address;
pub use catalog::{
    Album, AlbumFields, Author, AuthorAlias, AuthorRef, Entity, EntityKind, Image,
    PageDescriptor, Tag,
};
pub use ordering::{needs_bake, OrderKey, Orderable};
