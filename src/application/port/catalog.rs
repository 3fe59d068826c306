// SPDX-License-Identifier: MPL-2.0
//! Remote catalog port definition.
//!
//! This module defines the [`CatalogApi`] trait through which every screen and
//! command talks to the catalog service.
//!
//! Implemented by:
//! - [`CatalogClient`](crate::infrastructure::http::CatalogClient) - HTTP client for production
//! - [`InMemoryCatalog`](crate::infrastructure::memory::InMemoryCatalog) - in-memory catalog for tests and demos

use crate::domain::{Album, AlbumFields, Author, AuthorAlias, Entity, Image, OrderKey, PageDescriptor};
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

// =============================================================================
// Request Types
// =============================================================================

/// A page-indexed listing exposed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Collection {
    /// All albums (the bookshelf).
    Albums,
    Authors,
    AuthorAliases,
    /// Albums credited to one author.
    AuthorAlbums(String),
}

impl Collection {
    /// Returns `true` when the listing can include disabled albums.
    #[must_use]
    pub fn lists_albums(&self) -> bool {
        matches!(self, Collection::Albums | Collection::AuthorAlbums(_))
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Albums => write!(f, "albums"),
            Collection::Authors => write!(f, "authors"),
            Collection::AuthorAliases => write!(f, "author aliases"),
            Collection::AuthorAlbums(_) => write!(f, "author albums"),
        }
    }
}

/// Listing filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilters {
    /// Include disabled albums (maintenance mode).
    pub include_disabled: bool,
}

/// One page of a listing together with its pagination descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub entries: Vec<Entity>,
    pub pagination: PageDescriptor,
}

/// Content for an image slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Original file name, reported back as `original_filename`.
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// File extensions the catalog unpacks into one image per entry.
pub const ARCHIVE_EXTENSIONS: [&str; 2] = ["zip", "cbz"];

impl Upload {
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Returns `true` for zip and cbz archives, judged by extension.
    #[must_use]
    pub fn is_archive(&self) -> bool {
        std::path::Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ARCHIVE_EXTENSIONS
                    .iter()
                    .any(|archive| ext.eq_ignore_ascii_case(archive))
            })
    }
}

// =============================================================================
// CatalogApi Trait
// =============================================================================

/// Port for the remote catalog.
///
/// All identifiers are opaque strings. Every method is a single request: no
/// method retries, and reads after a write always hit the catalog.
///
/// # Errors
///
/// Methods fail with [`Error::NotFound`](crate::error::Error::NotFound) when
/// the addressed resource is absent, [`Error::Validation`](crate::error::Error::Validation)
/// when submitted values are rejected, and [`Error::Transport`](crate::error::Error::Transport)
/// for every other failure.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches one page of a listing.
    async fn get_page(
        &self,
        collection: &Collection,
        page: u32,
        filters: ListFilters,
    ) -> Result<CatalogPage>;

    /// Lists every album at once, naturally sorted by title, without covers.
    async fn list_all_albums(&self, filters: ListFilters) -> Result<Vec<Album>>;

    /// Creates an album. An empty or missing author credits "Unknown author".
    async fn create_album(&self, fields: &AlbumFields) -> Result<Album>;

    /// Fetches an album with its cover, tags and author alias.
    async fn get_album(&self, album_id: &str) -> Result<Album>;

    /// Updates album fields. `None` fields are left untouched.
    async fn update_album(&self, album_id: &str, fields: &AlbumFields) -> Result<Album>;

    /// Hides (`true`) or shows (`false`) an album outside maintenance mode.
    async fn set_album_hidden(&self, album_id: &str, hidden: bool) -> Result<Album>;

    async fn delete_album(&self, album_id: &str) -> Result<()>;

    /// Fetches an author with its aliases.
    async fn get_author(&self, author_id: &str) -> Result<Author>;

    async fn author_aliases(&self, author_id: &str) -> Result<Vec<AuthorAlias>>;

    /// Lists an album's images in ascending order-key order.
    async fn list_items(&self, album_id: &str) -> Result<Vec<Image>>;

    /// Writes one image's order key and returns the updated image.
    async fn set_order(&self, album_id: &str, image_id: &str, key: OrderKey) -> Result<Image>;

    /// Creates an empty image slot with an unassigned order key.
    async fn create_item(&self, album_id: &str) -> Result<Image>;

    async fn delete_item(&self, album_id: &str, image_id: &str) -> Result<()>;

    /// Uploads content into an existing image slot.
    async fn upload_content(&self, album_id: &str, image_id: &str, upload: Upload) -> Result<Image>;

    /// Uploads a zip or cbz archive. The catalog creates one image per entry,
    /// each with an unassigned order key.
    async fn upload_archive(&self, album_id: &str, upload: Upload) -> Result<Vec<Image>>;

    /// Makes an image the album's cover.
    async fn mark_cover(&self, album_id: &str, image_id: &str) -> Result<()>;

    /// Downloads the full-size image stored under `filename`.
    async fn fetch_image(&self, filename: &str) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archives_are_detected_by_extension() {
        assert!(Upload::new("trip.zip", vec![1]).is_archive());
        assert!(Upload::new("Volume 1.CBZ", vec![1]).is_archive());
        assert!(!Upload::new("cover.png", vec![1]).is_archive());
        assert!(!Upload::new("zip", vec![1]).is_archive());
    }
}
