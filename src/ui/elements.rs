// SPDX-License-Identifier: MPL-2.0
//! Renderable cards for catalog entities.
//!
//! Every card renders to plain text lines. Cards share a [`RenderContext`]
//! instead of reaching for global settings.

use crate::application::query::pagination::{
    album_url, author_url, edit_url, image_url, thumbnail_url, NavLinks,
};
use crate::domain::{Album, Author, AuthorAlias, Entity, EntityKind, Image};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

pub const ALBUM_TAG: &str = "minori-album";
pub const ALBUM_LIST_TAG: &str = "minori-album-list-entry";
pub const AUTHOR_TAG: &str = "minori-author";
pub const ALIAS_TAG: &str = "minori-author-alias";
pub const IMAGE_TAG: &str = "minori-image";
pub const IMAGE_PAGE_TAG: &str = "minori-image-page";
pub const DETAILS_TAG: &str = "minori-details";
pub const PAGINATION_TAG: &str = "minori-pagination";

const PAGINATION_ID: &str = "pagination";
const ALBUM_COUNT_ID: &str = "albums-count";

/// Values shared by every card of one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub image_base_url: String,
    /// Reference time for "new" badges.
    pub now: DateTime<Utc>,
}

impl RenderContext {
    pub fn new(image_base_url: impl Into<String>) -> Self {
        Self {
            image_base_url: image_base_url.into(),
            now: Utc::now(),
        }
    }

    #[must_use]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

/// Something a [`ViewBinder`](super::binder::ViewBinder) can place in a container.
pub trait Renderable {
    /// Element tag, scoping identities inside a container.
    fn tag(&self) -> &'static str;

    fn identity(&self) -> &str;

    fn render(&self, ctx: &RenderContext) -> String;
}

/// Position hints shown on an editor card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditHints {
    pub is_first: bool,
    pub is_last: bool,
    pub is_cover: bool,
    /// Deleting is offered only in maintenance mode.
    pub delete_enabled: bool,
}

/// One card per entity kind and screen role.
#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    /// Bookshelf or author page entry.
    AlbumSummary(Album),
    /// One line of the full album list.
    AlbumListEntry(Album),
    /// Number of albums in the full list.
    AlbumCount(usize),
    AuthorSummary(Author),
    AliasSummary(AuthorAlias),
    /// Album image grid entry linking to the viewer.
    Thumbnail { album_id: String, image: Image },
    /// The viewer's single image.
    FullImage(Image),
    /// Editor grid entry with move/cover/delete controls.
    EditImage { image: Image, hints: EditHints },
    AlbumDetails(Album),
    AuthorDetails(Author),
    Pagination(NavLinks),
}

impl Card {
    /// Listing card for an entity.
    ///
    /// Images have no listing card of their own; they render as a thumbnail
    /// without album context.
    #[must_use]
    pub fn summary(entity: Entity) -> Self {
        match entity {
            Entity::Album(album) => Card::AlbumSummary(album),
            Entity::Author(author) => Card::AuthorSummary(author),
            Entity::AuthorAlias(alias) => Card::AliasSummary(alias),
            Entity::Image(image) => Card::Thumbnail {
                album_id: String::new(),
                image,
            },
        }
    }

    /// Tag used for summary cards of `kind`.
    #[must_use]
    pub fn summary_tag(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Album => ALBUM_TAG,
            EntityKind::Author => AUTHOR_TAG,
            EntityKind::AuthorAlias => ALIAS_TAG,
            EntityKind::Image => IMAGE_TAG,
        }
    }
}

impl Renderable for Card {
    fn tag(&self) -> &'static str {
        match self {
            Card::AlbumSummary(_) => ALBUM_TAG,
            Card::AlbumListEntry(_) => ALBUM_LIST_TAG,
            Card::AuthorSummary(_) => AUTHOR_TAG,
            Card::AliasSummary(_) => ALIAS_TAG,
            Card::Thumbnail { .. } => IMAGE_TAG,
            Card::FullImage(_) | Card::EditImage { .. } => IMAGE_PAGE_TAG,
            Card::AlbumDetails(_) | Card::AuthorDetails(_) | Card::AlbumCount(_) => DETAILS_TAG,
            Card::Pagination(_) => PAGINATION_TAG,
        }
    }

    fn identity(&self) -> &str {
        match self {
            Card::AlbumSummary(album) | Card::AlbumListEntry(album) | Card::AlbumDetails(album) => &album.id,
            Card::AlbumCount(_) => ALBUM_COUNT_ID,
            Card::AuthorSummary(author) | Card::AuthorDetails(author) => &author.id,
            Card::AliasSummary(alias) => &alias.id,
            Card::Thumbnail { image, .. } | Card::FullImage(image) | Card::EditImage { image, .. } => {
                &image.id
            }
            Card::Pagination(_) => PAGINATION_ID,
        }
    }

    fn render(&self, ctx: &RenderContext) -> String {
        match self {
            Card::AlbumSummary(album) => render_album_summary(album, ctx),
            Card::AlbumListEntry(album) => render_album_list_entry(album, ctx),
            Card::AlbumCount(count) => match count {
                1 => "1 album".to_string(),
                n => format!("{n} albums"),
            },
            Card::AuthorSummary(author) => {
                format!("{}  {}", author.name, author_url(&author.id))
            }
            Card::AliasSummary(alias) => render_alias(alias),
            Card::Thumbnail { album_id, image } => render_thumbnail(album_id, image, ctx),
            Card::FullImage(image) => match &image.filename {
                Some(filename) if image.uploaded => image_url(&ctx.image_base_url, filename),
                _ => "(no image)".to_string(),
            },
            Card::EditImage { image, hints } => render_edit_image(image, *hints, ctx),
            Card::AlbumDetails(album) => render_album_details(album),
            Card::AuthorDetails(author) => render_author_details(author),
            Card::Pagination(links) => render_pagination(links),
        }
    }
}

fn by_line(alias: &AuthorAlias) -> String {
    match &alias.author {
        Some(author) if alias.is_distinct_from_author() => {
            format!("by {} (a.k.a. {})", alias.name, author.name)
        }
        _ => format!("by {}", alias.name),
    }
}

fn render_album_summary(album: &Album, ctx: &RenderContext) -> String {
    let mut out = album.display_title().to_string();
    if let Some(alias) = &album.author_alias {
        let _ = write!(out, "  {}", by_line(alias));
    }
    if album.is_new(ctx.now) {
        out.push_str("  [new]");
    }
    if album.disabled {
        out.push_str("  [disabled]");
    }
    let _ = write!(out, "\n  {}", album_url(&album.id));
    if let Some(filename) = album.cover.as_ref().and_then(|c| c.filename.as_deref()) {
        let _ = write!(out, "\n  cover: {}", thumbnail_url(&ctx.image_base_url, filename));
    }
    out
}

fn render_album_list_entry(album: &Album, ctx: &RenderContext) -> String {
    let mut out = format!("{}  {}", album_url(&album.id), album.display_title());
    if let Some(alias) = &album.author_alias {
        let _ = write!(out, "  {}", by_line(alias));
    }
    if album.is_new(ctx.now) {
        out.push_str("  [new]");
    }
    if album.disabled {
        out.push_str("  [disabled]");
    }
    out
}

fn render_alias(alias: &AuthorAlias) -> String {
    match &alias.author {
        Some(author) => format!("{}  -> {}  {}", alias.name, author.name, author_url(&author.id)),
        None => alias.name.clone(),
    }
}

fn render_thumbnail(album_id: &str, image: &Image, ctx: &RenderContext) -> String {
    match &image.filename {
        Some(filename) if image.uploaded => format!(
            "{}  /view.html#{album_id}:{}",
            thumbnail_url(&ctx.image_base_url, filename),
            image.id
        ),
        _ => "(no image)".to_string(),
    }
}

fn render_edit_image(image: &Image, hints: EditHints, ctx: &RenderContext) -> String {
    let name = image.original_filename.as_deref().unwrap_or("(no image)");
    let mut out = format!("#{} {name}", image.order_key);
    if image.is_new(ctx.now) {
        out.push_str(" [new]");
    }

    let mut controls = Vec::new();
    controls.push(if hints.is_cover { "cover" } else { "make-cover" });
    if !hints.is_first {
        controls.push("up");
    }
    if !hints.is_last {
        controls.push("down");
    }
    if hints.delete_enabled {
        controls.push("delete");
    }
    let _ = write!(out, "  [{}]", controls.join(" "));
    out
}

fn render_album_details(album: &Album) -> String {
    let mut out = format!("{} ({})", album.display_title(), album.state());
    if let Some(alias) = &album.author_alias {
        let _ = write!(out, "\n{}", by_line(alias));
    }
    if let Some(description) = album.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(out, "\n{description}");
    }
    if let Some(url) = &album.url {
        let _ = write!(out, "\nsource: {url}");
    }
    if !album.tags.is_empty() {
        let tags: Vec<String> = album
            .tags
            .iter()
            .map(|tag| match &tag.namespace {
                Some(ns) => format!("{ns}:{}", tag.name),
                None => tag.name.clone(),
            })
            .collect();
        let _ = write!(out, "\ntags: {}", tags.join(", "));
    }
    let _ = write!(out, "\nedit: {}", edit_url(&album.id));
    out
}

fn render_author_details(author: &Author) -> String {
    let others: Vec<&str> = author
        .aliases
        .iter()
        .filter(|alias| alias.name != author.name)
        .map(|alias| alias.name.as_str())
        .collect();
    if others.is_empty() {
        author.name.clone()
    } else {
        format!("{}\na.k.a. {}", author.name, others.join(", "))
    }
}

fn render_pagination(links: &NavLinks) -> String {
    fn control(label: &str, target: Option<&String>) -> String {
        match target {
            Some(url) => format!("{label}({url})"),
            None => format!("{label}(-)"),
        }
    }

    [
        control("first", links.first.as_ref()),
        control("prev", links.previous.as_ref()),
        control(&links.label, links.current.as_ref()),
        control("next", links.next.as_ref()),
        control("last", links.last.as_ref()),
    ]
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorRef, OrderKey};
    use chrono::TimeZone;

    fn ctx() -> RenderContext {
        RenderContext::new("http://img").at(Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap())
    }

    fn image(id: &str, key: u32) -> Image {
        Image {
            id: id.to_string(),
            filename: Some(format!("{id}.png")),
            original_filename: Some(format!("{id}-orig.png")),
            uploaded: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            uploaded_at: None,
            order_key: OrderKey::new(key),
        }
    }

    fn album() -> Album {
        Album {
            id: "a1".into(),
            disabled: false,
            title: Some("Sketches".into()),
            description: None,
            url: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 9, 0, 0, 0).unwrap(),
            cover: Some(image("c", 1)),
            tags: Vec::new(),
            author_alias: Some(AuthorAlias {
                id: "al".into(),
                name: "Pen".into(),
                author: Some(AuthorRef {
                    id: "au".into(),
                    name: "Real".into(),
                }),
            }),
        }
    }

    #[test]
    fn album_summary_shows_alias_badge_and_cover() {
        let text = Card::AlbumSummary(album()).render(&ctx());
        assert!(text.starts_with("Sketches  by Pen (a.k.a. Real)  [new]"));
        assert!(text.contains("/album.html#a1"));
        assert!(text.contains("cover: http://img/thumbs/c.png"));
    }

    #[test]
    fn album_list_entry_is_one_line() {
        let mut hidden = album();
        hidden.disabled = true;
        let card = Card::AlbumListEntry(hidden);
        assert_eq!(
            card.render(&ctx()),
            "/album.html#a1  Sketches  by Pen (a.k.a. Real)  [new]  [disabled]"
        );
        assert_eq!(card.tag(), ALBUM_LIST_TAG);
        assert_eq!(Card::AlbumCount(1).render(&ctx()), "1 album");
    }

    #[test]
    fn edit_card_hides_unavailable_moves() {
        let card = Card::EditImage {
            image: image("i", 3),
            hints: EditHints {
                is_first: true,
                is_last: false,
                is_cover: true,
                delete_enabled: true,
            },
        };
        assert_eq!(card.render(&ctx()), "#3 i-orig.png  [cover down delete]");
        assert_eq!(card.tag(), IMAGE_PAGE_TAG);
    }

    #[test]
    fn full_image_uses_image_base() {
        let card = Card::FullImage(image("i", 1));
        assert_eq!(card.render(&ctx()), "http://img/images/i.png");
    }

    #[test]
    fn pagination_marks_absent_targets() {
        let links = NavLinks {
            first: None,
            previous: None,
            current: Some("/list.html".into()),
            next: Some("/#2".into()),
            last: Some("/#3".into()),
            label: "1 / 3".into(),
        };
        assert_eq!(
            Card::Pagination(links).render(&ctx()),
            "first(-) prev(-) 1 / 3(/list.html) next(/#2) last(/#3)"
        );
    }

    #[test]
    fn summary_matches_entity_kind() {
        let card = Card::summary(Entity::Album(album()));
        assert_eq!(card.tag(), Card::summary_tag(EntityKind::Album));
        assert_eq!(card.identity(), "a1");
    }
}
