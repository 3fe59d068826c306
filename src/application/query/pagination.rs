// SPDX-License-Identifier: MPL-2.0
//! Page-indexed sequences and navigation link rendering.
//!
//! [`PageSequence`] derives the five canonical targets from a catalog
//! [`PageDescriptor`]; [`Navigator`] turns page or cursor targets into
//! concrete addresses for a [`Route`].

use super::navigation::CursorSequence;
use crate::domain::address::SEPARATOR;
use crate::domain::PageDescriptor;

/// First/previous/current/next/last targets of a sequence.
///
/// Absent targets are rendered as disabled controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTargets<T> {
    pub first: Option<T>,
    pub previous: Option<T>,
    pub current: T,
    pub next: Option<T>,
    pub last: Option<T>,
    /// 1-based position of `current`.
    pub position: usize,
    pub total: usize,
}

impl<T> NavTargets<T> {
    /// Returns the `"{position} / {total}"` label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} / {}", self.position, self.total)
    }

    /// Maps every present target through `f`.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> NavTargets<U> {
        NavTargets {
            first: self.first.map(&mut f),
            previous: self.previous.map(&mut f),
            current: f(self.current),
            next: self.next.map(&mut f),
            last: self.last.map(&mut f),
            position: self.position,
            total: self.total,
        }
    }
}

/// Page-indexed sequence backed by a catalog descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSequence {
    descriptor: PageDescriptor,
}

impl PageSequence {
    #[must_use]
    pub fn new(descriptor: PageDescriptor) -> Self {
        Self { descriptor }
    }

    #[must_use]
    pub fn descriptor(&self) -> &PageDescriptor {
        &self.descriptor
    }

    /// Computes page targets.
    ///
    /// `first` and `last` are suppressed when they equal the current page;
    /// `last` is also suppressed for an empty listing (`last_page == 0`).
    #[must_use]
    pub fn targets(&self) -> NavTargets<u32> {
        let d = &self.descriptor;
        NavTargets {
            first: (d.first_page != d.current_page).then_some(d.first_page),
            previous: d.previous_page,
            current: d.current_page,
            next: d.next_page,
            last: (d.last_page != d.current_page && d.last_page >= d.first_page)
                .then_some(d.last_page),
            position: d.current_page as usize,
            total: d.last_page as usize,
        }
    }
}

/// A navigable page of the client and how its address is spelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Album listing, `/#<page>`.
    Bookshelf,
    /// Author listing, `/authors.html#<page>`.
    Authors,
    /// Alias listing, `/authoraliases.html#<page>`.
    AuthorAliases,
    /// One author's albums, `/author.html#<author>:<page>`.
    AuthorAlbums(String),
    /// Image viewer inside an album, `/view.html#<album>:<image>`.
    Viewer(String),
}

impl Route {
    /// Full URL for the address component `target` on this route.
    #[must_use]
    pub fn url(&self, target: &str) -> String {
        match self {
            Route::Bookshelf => format!("/#{target}"),
            Route::Authors => format!("/authors.html#{target}"),
            Route::AuthorAliases => format!("/authoraliases.html#{target}"),
            Route::AuthorAlbums(author) => format!("/author.html#{author}{SEPARATOR}{target}"),
            Route::Viewer(album) => format!("/view.html#{album}{SEPARATOR}{target}"),
        }
    }

    /// Target of the current-page control on listing routes.
    #[must_use]
    pub fn current_page_url(&self) -> Option<String> {
        match self {
            Route::Bookshelf => Some("/list.html".to_string()),
            _ => None,
        }
    }
}

/// Album detail URL.
#[must_use]
pub fn album_url(album_id: &str) -> String {
    format!("/album.html#{album_id}")
}

/// Album editor URL.
#[must_use]
pub fn edit_url(album_id: &str) -> String {
    format!("/edit.html#{album_id}")
}

/// Author detail URL (first page of albums).
#[must_use]
pub fn author_url(author_id: &str) -> String {
    format!("/author.html#{author_id}")
}

/// Full-size image URL under `image_base_url`.
#[must_use]
pub fn image_url(image_base_url: &str, filename: &str) -> String {
    format!("{}/images/{filename}", image_base_url.trim_end_matches('/'))
}

/// Thumbnail URL under `image_base_url`.
#[must_use]
pub fn thumbnail_url(image_base_url: &str, filename: &str) -> String {
    format!("{}/thumbs/{filename}", image_base_url.trim_end_matches('/'))
}

/// Concrete link targets ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavLinks {
    pub first: Option<String>,
    pub previous: Option<String>,
    pub current: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
    pub label: String,
}

/// Renders navigation targets as addresses for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    route: Route,
    image_base_url: String,
}

impl Navigator {
    #[must_use]
    pub fn new(route: Route, image_base_url: impl Into<String>) -> Self {
        Self {
            route,
            image_base_url: image_base_url.into(),
        }
    }

    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Maps a page descriptor to links on this navigator's route.
    #[must_use]
    pub fn render(&self, descriptor: &PageDescriptor) -> NavLinks {
        let targets = PageSequence::new(*descriptor).targets();
        let label = targets.label();
        let links = targets.map(|page| self.route.url(&page.to_string()));

        NavLinks {
            first: links.first,
            previous: links.previous,
            current: self.route.current_page_url(),
            next: links.next,
            last: links.last,
            label,
        }
    }

    /// Maps a cursor sequence to viewer links.
    ///
    /// `current_filename` is the stored file of the current image; the
    /// current link opens it directly. Returns `None` when the cursor is not
    /// part of the sequence.
    #[must_use]
    pub fn render_cursor(
        &self,
        sequence: &CursorSequence,
        current_filename: Option<&str>,
    ) -> Option<NavLinks> {
        let targets = sequence.targets()?;
        let label = targets.label();
        let links = targets.map(|identity| self.route.url(&identity));

        Some(NavLinks {
            first: links.first,
            previous: links.previous,
            current: current_filename.map(|filename| image_url(&self.image_base_url, filename)),
            next: links.next,
            last: links.last,
            label,
        })
    }
}
