// SPDX-License-Identifier: MPL-2.0
//! JSON bodies exchanged with the catalog service.
//!
//! Response DTOs deserialize the catalog's envelopes (`{"album": ...}`,
//! `{"albums": [...], "pagination": ...}`) and convert into domain types.

use crate::domain::{
    Album, AlbumFields, Author, AuthorAlias, AuthorRef, Image, OrderKey, PageDescriptor, Tag,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Timestamps
// =============================================================================

/// Timestamps arrive either as RFC 3339 or as naive ISO-8601 in UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}"))),
        None => Ok(None),
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// `previous_page`/`next_page` are either a page number or `false`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum PageRef {
    Page(u32),
    Absent(bool),
}

impl PageRef {
    fn page(self) -> Option<u32> {
        match self {
            PageRef::Page(page) => Some(page),
            PageRef::Absent(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PaginationDto {
    first_page: u32,
    previous_page: PageRef,
    current_page: u32,
    next_page: PageRef,
    last_page: u32,
    total_records: u64,
}

impl From<PaginationDto> for PageDescriptor {
    fn from(dto: PaginationDto) -> Self {
        PageDescriptor {
            first_page: dto.first_page,
            previous_page: dto.previous_page.page(),
            current_page: dto.current_page,
            next_page: dto.next_page.page(),
            last_page: dto.last_page,
            total_records: dto.total_records,
        }
    }
}

// =============================================================================
// Entities
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct ImageDto {
    id: String,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    original_filename: Option<String>,
    #[serde(default)]
    uploaded: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    uploaded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    album_order_key: Option<u32>,
}

impl From<ImageDto> for Image {
    fn from(dto: ImageDto) -> Self {
        Image {
            id: dto.id,
            filename: dto.filename,
            original_filename: dto.original_filename,
            uploaded: dto.uploaded,
            created_at: dto.created_at,
            uploaded_at: dto.uploaded_at,
            order_key: dto.album_order_key.map_or(OrderKey::UNASSIGNED, OrderKey::new),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TagDto {
    id: String,
    #[serde(default)]
    namespace: Option<String>,
    name: String,
    #[serde(default)]
    description: Option<String>,
}

impl From<TagDto> for Tag {
    fn from(dto: TagDto) -> Self {
        Tag {
            id: dto.id,
            namespace: dto.namespace,
            name: dto.name,
            description: dto.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorRefDto {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorAliasDto {
    id: String,
    name: String,
    #[serde(default)]
    author: Option<AuthorRefDto>,
}

impl From<AuthorAliasDto> for AuthorAlias {
    fn from(dto: AuthorAliasDto) -> Self {
        AuthorAlias {
            id: dto.id,
            name: dto.name,
            author: dto.author.map(|author| AuthorRef {
                id: author.id,
                name: author.name,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorDto {
    id: String,
    name: String,
    #[serde(default)]
    author_aliases: Vec<AuthorAliasDto>,
}

impl From<AuthorDto> for Author {
    fn from(dto: AuthorDto) -> Self {
        Author {
            id: dto.id,
            name: dto.name,
            aliases: dto.author_aliases.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AlbumDto {
    id: String,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    cover: Option<ImageDto>,
    #[serde(default)]
    tags: Vec<TagDto>,
    #[serde(default)]
    author_alias: Option<AuthorAliasDto>,
}

impl From<AlbumDto> for Album {
    fn from(dto: AlbumDto) -> Self {
        Album {
            id: dto.id,
            disabled: dto.disabled,
            title: dto.title,
            description: dto.description,
            url: dto.url,
            created_at: dto.created_at,
            cover: dto.cover.map(Into::into),
            tags: dto.tags.into_iter().map(Into::into).collect(),
            author_alias: dto.author_alias.map(Into::into),
        }
    }
}

// =============================================================================
// Envelopes
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct AlbumsPage {
    pub albums: Vec<AlbumDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorsPage {
    pub authors: Vec<AuthorDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorAliasesPage {
    pub author_aliases: Vec<AuthorAliasDto>,
    pub pagination: PaginationDto,
}

/// Unpaged `/albums/all` listing.
#[derive(Debug, Deserialize)]
pub(super) struct AlbumsEnvelope {
    pub albums: Vec<AlbumDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AlbumEnvelope {
    pub album: AlbumDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorEnvelope {
    pub author: AuthorDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorAliasesEnvelope {
    pub author_aliases: Vec<AuthorAliasDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ImageEnvelope {
    pub image: ImageDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ImagesEnvelope {
    pub images: Vec<ImageDto>,
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Serialize)]
pub(super) struct UpdateOrderRequest {
    pub order: u32,
}

/// Body of album create and update requests. Absent fields are omitted.
#[derive(Debug, Serialize)]
pub(super) struct AlbumFieldsRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
}

impl<'a> From<&'a AlbumFields> for AlbumFieldsRequest<'a> {
    fn from(fields: &'a AlbumFields) -> Self {
        Self {
            title: fields.title.as_deref(),
            author: fields.author.as_deref(),
            description: fields.description.as_deref(),
            url: fields.url.as_deref(),
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Deserialize)]
struct DetailItem {
    #[serde(default)]
    msg: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Items(Vec<DetailItem>),
}

/// Error body: `{"error": "..."}` or `{"detail": "..." | [{"msg": "..."}]}`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<Detail>,
}

impl ErrorBody {
    /// Best human-readable reason carried by the body.
    pub fn reason(&self) -> Option<&str> {
        if let Some(error) = self.error.as_deref() {
            return Some(error);
        }
        match self.detail.as_ref()? {
            Detail::Text(text) => Some(text),
            Detail::Items(items) => items.first()?.msg.as_deref(),
        }
    }
}
