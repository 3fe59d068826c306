// SPDX-License-Identifier: MPL-2.0
//! Catalog entities: albums, images, authors, aliases and page descriptors.

use super::ordering::{OrderKey, Orderable};
use chrono::{DateTime, Duration, Utc};

/// Images count as new for one hour after creation.
const IMAGE_NEW_WINDOW_HOURS: i64 = 1;

/// Albums count as new for three days after creation.
const ALBUM_NEW_WINDOW_DAYS: i64 = 3;

/// An image slot inside an album. May exist before its content is uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub id: String,
    pub filename: Option<String>,
    pub original_filename: Option<String>,
    pub uploaded: bool,
    pub created_at: DateTime<Utc>,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub order_key: OrderKey,
}

impl Image {
    #[must_use]
    pub fn is_new(&self, now: DateTime<Utc>) -> bool {
        now - Duration::hours(IMAGE_NEW_WINDOW_HOURS) < self.created_at
    }
}

impl Orderable for Image {
    fn identity(&self) -> &str {
        &self.id
    }

    fn order_key(&self) -> OrderKey {
        self.order_key
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub namespace: Option<String>,
    pub name: String,
    pub description: Option<String>,
}

/// Canonical author without its alias list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorAlias {
    pub id: String,
    pub name: String,
    /// Back-reference to the canonical author, when the catalog sends it.
    pub author: Option<AuthorRef>,
}

impl AuthorAlias {
    /// Returns `true` when the alias differs from its canonical author's name.
    #[must_use]
    pub fn is_distinct_from_author(&self) -> bool {
        self.author
            .as_ref()
            .is_some_and(|author| author.name != self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub aliases: Vec<AuthorAlias>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: String,
    pub disabled: bool,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub cover: Option<Image>,
    pub tags: Vec<Tag>,
    pub author_alias: Option<AuthorAlias>,
}

impl Album {
    #[must_use]
    pub fn state(&self) -> &'static str {
        if self.disabled {
            "disabled"
        } else {
            "active"
        }
    }

    #[must_use]
    pub fn is_new(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(ALBUM_NEW_WINDOW_DAYS) < self.created_at
    }

    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("untitled")
    }

    #[must_use]
    pub fn is_cover(&self, image_id: &str) -> bool {
        self.cover.as_ref().is_some_and(|cover| cover.id == image_id)
    }
}

/// Editable album fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

/// Pagination state of a page-indexed listing as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    pub first_page: u32,
    /// `None` on the first page.
    pub previous_page: Option<u32>,
    pub current_page: u32,
    /// `None` on the last page.
    pub next_page: Option<u32>,
    pub last_page: u32,
    pub total_records: u64,
}

impl PageDescriptor {
    /// Builds the descriptor the catalog reports for `page` of `total_records`
    /// split into pages of `page_size`.
    #[must_use]
    pub fn for_page(page: u32, page_size: u32, total_records: u64) -> Self {
        let page = page.max(1);
        let page_size = u64::from(page_size.max(1));
        let last_page = u32::try_from(total_records.div_ceil(page_size)).unwrap_or(u32::MAX);

        Self {
            first_page: 1,
            previous_page: (page > 1).then(|| page - 1),
            current_page: page,
            next_page: (page < last_page).then(|| page + 1),
            last_page,
            total_records,
        }
    }
}

/// Entity kinds the renderer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Album,
    Image,
    Author,
    AuthorAlias,
}

/// Any catalog entity, used where listings mix or abstract over kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Album(Album),
    Image(Image),
    Author(Author),
    AuthorAlias(AuthorAlias),
}

impl Entity {
    #[must_use]
    pub fn identity(&self) -> &str {
        match self {
            Entity::Album(album) => &album.id,
            Entity::Image(image) => &image.id,
            Entity::Author(author) => &author.id,
            Entity::AuthorAlias(alias) => &alias.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Album(_) => EntityKind::Album,
            Entity::Image(_) => EntityKind::Image,
            Entity::Author(_) => EntityKind::Author,
            Entity::AuthorAlias(_) => EntityKind::AuthorAlias,
        }
    }
}
