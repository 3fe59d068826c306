// SPDX-License-Identifier: MPL-2.0
//! Address-driven screens.
//!
//! Each screen implements [`AddressedScreen`](crate::application::port::AddressedScreen)
//! and renders into its own [`MemoryContainer`](crate::ui::container::MemoryContainer).
//!
//! | Screen | Address | Content |
//! |--------|---------|---------|
//! | [`ListingScreen`] | `page` | albums, authors or aliases |
//! | [`AlbumListScreen`] | none | every album, one line each |
//! | [`AuthorScreen`] | `author:page` | author details and paged albums |
//! | [`AlbumScreen`] | `album` | album details and thumbnails |
//! | [`ViewerScreen`] | `album:image` | one image with cursor links |
//! | [`EditorScreen`] | `album` | reorder, cover, upload, hide, delete |

mod album;
mod album_list;
mod author;
mod editor;
mod listing;
mod viewer;

pub use album::AlbumScreen;
pub use album_list::AlbumListScreen;
pub use author::AuthorScreen;
pub use editor::EditorScreen;
pub use listing::ListingScreen;
pub use viewer::ViewerScreen;

use crate::domain::Address;
use crate::error::{Error, Result};

/// Returns the resource identity in component 0 or a not-found error.
fn required_identity<'a>(address: &'a Address, action: &str) -> Result<&'a str> {
    address
        .component(0)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::NotFound(format!("Failed to {action} - Nothing selected.")))
}
