// SPDX-License-Identifier: MPL-2.0
//! In-memory catalog for tests and demos.
//!
//! [`InMemoryCatalog`] implements [`CatalogApi`] over local state so screens,
//! commands and the synchronizer run the same code path as against the real
//! service. It follows the catalog's listing rules (16 records per page,
//! newest albums first, images by key then original file name) and records
//! every order write and call for assertions. Failures can be injected per
//! operation. Archives have no real decoder here: their entries are
//! registered up front with [`InMemoryCatalog::register_archive`].

use crate::application::port::{CatalogApi, CatalogPage, Collection, ListFilters, Upload};
use crate::config::CATALOG_PAGE_SIZE;
use crate::domain::{
    Album, AlbumFields, Author, AuthorAlias, AuthorRef, Entity, Image, OrderKey, PageDescriptor,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::cmp;
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::info;

/// Catalog operations, used to count calls and inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetPage,
    ListAllAlbums,
    CreateAlbum,
    GetAlbum,
    UpdateAlbum,
    ToggleAlbum,
    DeleteAlbum,
    GetAuthor,
    AuthorAliases,
    ListItems,
    SetOrder,
    CreateItem,
    DeleteItem,
    UploadContent,
    UploadArchive,
    MarkCover,
    FetchImage,
}

#[derive(Debug, Clone)]
struct AlbumRecord {
    album: Album,
    images: Vec<Image>,
}

#[derive(Debug, Default)]
struct CatalogState {
    /// Insertion order; listings show the newest first.
    albums: Vec<AlbumRecord>,
    authors: Vec<AuthorRef>,
    aliases: Vec<AuthorAlias>,
    files: HashMap<String, Vec<u8>>,
    /// Entry names of archives the catalog can unpack, by archive file name.
    archives: HashMap<String, Vec<String>>,
    order_writes: Vec<(String, OrderKey)>,
    calls: HashMap<Operation, usize>,
    failures: HashMap<Operation, Error>,
}

impl CatalogState {
    fn album(&self, album_id: &str, action: &str) -> Result<&AlbumRecord> {
        self.albums
            .iter()
            .find(|record| record.album.id == album_id)
            .ok_or_else(|| not_found(action, "Album not found."))
    }

    fn album_mut(&mut self, album_id: &str, action: &str) -> Result<&mut AlbumRecord> {
        self.albums
            .iter_mut()
            .find(|record| record.album.id == album_id)
            .ok_or_else(|| not_found(action, "Album not found."))
    }

    fn author(&self, author_id: &str, action: &str) -> Result<&AuthorRef> {
        self.authors
            .iter()
            .find(|author| author.id == author_id)
            .ok_or_else(|| not_found(action, "Author not found."))
    }

    fn aliases_of(&self, author_id: &str) -> Vec<AuthorAlias> {
        self.aliases
            .iter()
            .filter(|alias| alias.author.as_ref().is_some_and(|a| a.id == author_id))
            .cloned()
            .collect()
    }
}

impl AlbumRecord {
    fn image_mut(&mut self, image_id: &str, action: &str) -> Result<&mut Image> {
        self.images
            .iter_mut()
            .find(|image| image.id == image_id)
            .ok_or_else(|| not_found(action, "Image not found."))
    }

    fn sorted_images(&self) -> Vec<Image> {
        let mut images = self.images.clone();
        images.sort_by(|a, b| {
            a.order_key
                .cmp(&b.order_key)
                .then_with(|| a.original_filename.cmp(&b.original_filename))
        });
        images
    }
}

const UNKNOWN_AUTHOR: &str = "Unknown author";

fn not_found(action: &str, detail: &str) -> Error {
    Error::NotFound(format!("{action} - {detail}"))
}

fn digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        run.push(digit);
    }
    run
}

/// Compares digit runs by value, so "Vol 2" sorts before "Vol 10".
fn natural_cmp(left: &str, right: &str) -> cmp::Ordering {
    let mut left = left.chars().peekable();
    let mut right = right.chars().peekable();
    loop {
        let ordering = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return cmp::Ordering::Equal,
            (None, Some(_)) => return cmp::Ordering::Less,
            (Some(_), None) => return cmp::Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l = digit_run(&mut left);
                let r = digit_run(&mut right);
                let (l, r) = (l.trim_start_matches('0'), r.trim_start_matches('0'));
                l.len().cmp(&r.len()).then_with(|| l.cmp(r))
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                l.cmp(&r)
            }
        };
        if ordering.is_ne() {
            return ordering;
        }
    }
}

fn paginate<T: Clone>(items: &[T], page: u32) -> (Vec<T>, PageDescriptor) {
    let page = page.max(1);
    let descriptor = PageDescriptor::for_page(page, CATALOG_PAGE_SIZE, items.len() as u64);
    let start = (page as usize - 1).saturating_mul(CATALOG_PAGE_SIZE as usize);
    let entries = items
        .iter()
        .skip(start)
        .take(CATALOG_PAGE_SIZE as usize)
        .cloned()
        .collect();
    (entries, descriptor)
}

/// In-memory [`CatalogApi`] implementation.
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
    id_counter: AtomicU64,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        info!("[InMemoryCatalog] Creating new in-memory catalog");
        Self {
            state: RwLock::new(CatalogState::default()),
            id_counter: AtomicU64::new(1),
        }
    }

    fn generate_id(&self, prefix: &str) -> String {
        let n = self.id_counter.fetch_add(1, Ordering::SeqCst);
        format!("{prefix}-{n}")
    }

    /// Counts the call and returns an injected failure, if any.
    async fn enter(&self, operation: Operation) -> Result<()> {
        let mut state = self.state.write().await;
        *state.calls.entry(operation).or_default() += 1;
        match state.failures.remove(&operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Adds an enabled album and returns its id.
    pub async fn seed_album(&self, title: &str) -> String {
        let id = self.generate_id("album");
        let album = Album {
            id: id.clone(),
            disabled: false,
            title: Some(title.to_string()),
            description: None,
            url: None,
            created_at: Utc::now(),
            cover: None,
            tags: Vec::new(),
            author_alias: None,
        };
        self.state.write().await.albums.push(AlbumRecord {
            album,
            images: Vec::new(),
        });
        id
    }

    /// Adds an uploaded image with the given key and returns its id.
    pub async fn seed_image(&self, album_id: &str, original_filename: &str, key: OrderKey) -> String {
        let id = self.generate_id("image");
        let filename = format!("{id}-{original_filename}");
        let now = Utc::now();
        let image = Image {
            id: id.clone(),
            filename: Some(filename.clone()),
            original_filename: Some(original_filename.to_string()),
            uploaded: true,
            created_at: now,
            uploaded_at: Some(now),
            order_key: key,
        };

        let mut state = self.state.write().await;
        state.files.insert(filename, original_filename.as_bytes().to_vec());
        if let Some(record) = state.albums.iter_mut().find(|r| r.album.id == album_id) {
            record.images.push(image);
        }
        id
    }

    /// Adds an author together with its canonical alias. Returns the author id.
    pub async fn seed_author(&self, name: &str) -> String {
        let id = self.generate_id("author");
        self.state.write().await.authors.push(AuthorRef {
            id: id.clone(),
            name: name.to_string(),
        });
        self.seed_alias(&id, name).await;
        id
    }

    /// Adds an alias of `author_id`. Returns the alias id.
    pub async fn seed_alias(&self, author_id: &str, name: &str) -> String {
        let id = self.generate_id("alias");
        let mut state = self.state.write().await;
        let author = state.authors.iter().find(|a| a.id == author_id).cloned();
        state.aliases.push(AuthorAlias {
            id: id.clone(),
            name: name.to_string(),
            author,
        });
        id
    }

    /// Credits an album to an alias.
    pub async fn credit_album(&self, album_id: &str, alias_id: &str) {
        let mut state = self.state.write().await;
        let alias = state.aliases.iter().find(|a| a.id == alias_id).cloned();
        if let Some(record) = state.albums.iter_mut().find(|r| r.album.id == album_id) {
            record.album.author_alias = alias;
        }
    }

    pub async fn set_album_disabled(&self, album_id: &str, disabled: bool) {
        let mut state = self.state.write().await;
        if let Some(record) = state.albums.iter_mut().find(|r| r.album.id == album_id) {
            record.album.disabled = disabled;
        }
    }

    /// Makes an archive named `filename` unpack into `entries`, in order.
    /// Unregistered archives are rejected as invalid.
    pub async fn register_archive(&self, filename: &str, entries: &[&str]) {
        self.state.write().await.archives.insert(
            filename.to_string(),
            entries.iter().map(ToString::to_string).collect(),
        );
    }

    /// Finds the alias called `name`, creating an author and alias when none
    /// exists. An empty name stands for "Unknown author".
    async fn resolve_alias(&self, name: &str) -> Option<AuthorAlias> {
        let name = if name.is_empty() { UNKNOWN_AUTHOR } else { name };
        let existing = self
            .state
            .read()
            .await
            .aliases
            .iter()
            .find(|alias| alias.name == name)
            .cloned();
        match existing {
            Some(alias) => Some(alias),
            None => {
                let author_id = self.seed_author(name).await;
                self.state.read().await.aliases_of(&author_id).into_iter().next()
            }
        }
    }

    // =========================================================================
    // Inspection and failure injection
    // =========================================================================

    /// Makes the next call of `operation` fail with `err`.
    pub async fn fail_next(&self, operation: Operation, err: Error) {
        self.state.write().await.failures.insert(operation, err);
    }

    /// Every `set_order` write accepted so far, in order.
    pub async fn order_writes(&self) -> Vec<(String, OrderKey)> {
        self.state.read().await.order_writes.clone()
    }

    /// Number of times `operation` was called, including failed calls.
    pub async fn call_count(&self, operation: Operation) -> usize {
        self.state
            .read()
            .await
            .calls
            .get(&operation)
            .copied()
            .unwrap_or(0)
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn get_page(
        &self,
        collection: &Collection,
        page: u32,
        filters: ListFilters,
    ) -> Result<CatalogPage> {
        self.enter(Operation::GetPage).await?;
        let state = self.state.read().await;

        let visible_albums = |author_id: Option<&str>| -> Vec<Entity> {
            state
                .albums
                .iter()
                .rev()
                .filter(|record| filters.include_disabled || !record.album.disabled)
                .filter(|record| {
                    author_id.is_none_or(|author_id| {
                        record
                            .album
                            .author_alias
                            .as_ref()
                            .and_then(|alias| alias.author.as_ref())
                            .is_some_and(|author| author.id == author_id)
                    })
                })
                .map(|record| Entity::Album(record.album.clone()))
                .collect()
        };

        let entries: Vec<Entity> = match collection {
            Collection::Albums => visible_albums(None),
            Collection::AuthorAlbums(author_id) => {
                state.author(author_id, "Failed to get author albums")?;
                visible_albums(Some(author_id))
            }
            Collection::Authors => {
                let mut authors = state.authors.clone();
                authors.sort_by(|a, b| b.name.cmp(&a.name));
                authors
                    .into_iter()
                    .map(|author| {
                        Entity::Author(Author {
                            id: author.id,
                            name: author.name,
                            aliases: Vec::new(),
                        })
                    })
                    .collect()
            }
            Collection::AuthorAliases => {
                let mut aliases = state.aliases.clone();
                aliases.sort_by(|a, b| b.name.cmp(&a.name));
                aliases.into_iter().map(Entity::AuthorAlias).collect()
            }
        };

        let (entries, pagination) = paginate(&entries, page);
        Ok(CatalogPage {
            entries,
            pagination,
        })
    }

    async fn list_all_albums(&self, filters: ListFilters) -> Result<Vec<Album>> {
        self.enter(Operation::ListAllAlbums).await?;
        let state = self.state.read().await;
        let mut albums: Vec<Album> = state
            .albums
            .iter()
            .filter(|record| filters.include_disabled || !record.album.disabled)
            .map(|record| Album {
                cover: None,
                ..record.album.clone()
            })
            .collect();
        albums.sort_by(|a, b| {
            natural_cmp(
                a.title.as_deref().unwrap_or_default(),
                b.title.as_deref().unwrap_or_default(),
            )
        });
        Ok(albums)
    }

    async fn create_album(&self, fields: &AlbumFields) -> Result<Album> {
        self.enter(Operation::CreateAlbum).await?;
        let alias = self
            .resolve_alias(fields.author.as_deref().unwrap_or_default())
            .await;
        let album = Album {
            id: self.generate_id("album"),
            disabled: false,
            title: fields.title.clone(),
            description: fields.description.clone(),
            url: fields.url.clone(),
            created_at: Utc::now(),
            cover: None,
            tags: Vec::new(),
            author_alias: alias,
        };
        self.state.write().await.albums.push(AlbumRecord {
            album: album.clone(),
            images: Vec::new(),
        });
        Ok(album)
    }

    async fn get_album(&self, album_id: &str) -> Result<Album> {
        self.enter(Operation::GetAlbum).await?;
        let state = self.state.read().await;
        Ok(state.album(album_id, "Failed to get album")?.album.clone())
    }

    async fn update_album(&self, album_id: &str, fields: &AlbumFields) -> Result<Album> {
        self.enter(Operation::UpdateAlbum).await?;

        let alias = match &fields.author {
            Some(name) => self.resolve_alias(name).await,
            None => None,
        };

        let mut state = self.state.write().await;
        let record = state.album_mut(album_id, "Failed to update album")?;
        if let Some(title) = &fields.title {
            record.album.title = Some(title.clone());
        }
        if let Some(description) = &fields.description {
            record.album.description = Some(description.clone());
        }
        if let Some(url) = &fields.url {
            record.album.url = Some(url.clone());
        }
        if alias.is_some() {
            record.album.author_alias = alias;
        }
        Ok(record.album.clone())
    }

    async fn set_album_hidden(&self, album_id: &str, hidden: bool) -> Result<Album> {
        self.enter(Operation::ToggleAlbum).await?;
        let mut state = self.state.write().await;
        let record = state.album_mut(album_id, "Failed to toggle album")?;
        record.album.disabled = hidden;
        Ok(record.album.clone())
    }

    async fn delete_album(&self, album_id: &str) -> Result<()> {
        self.enter(Operation::DeleteAlbum).await?;
        let mut state = self.state.write().await;
        state.album(album_id, "Failed to delete album")?;
        state.albums.retain(|record| record.album.id != album_id);
        Ok(())
    }

    async fn get_author(&self, author_id: &str) -> Result<Author> {
        self.enter(Operation::GetAuthor).await?;
        let state = self.state.read().await;
        let author = state.author(author_id, "Failed to get author")?;
        Ok(Author {
            id: author.id.clone(),
            name: author.name.clone(),
            aliases: state.aliases_of(author_id),
        })
    }

    async fn author_aliases(&self, author_id: &str) -> Result<Vec<AuthorAlias>> {
        self.enter(Operation::AuthorAliases).await?;
        let state = self.state.read().await;
        state.author(author_id, "Failed to get author aliases")?;
        Ok(state.aliases_of(author_id))
    }

    async fn list_items(&self, album_id: &str) -> Result<Vec<Image>> {
        self.enter(Operation::ListItems).await?;
        let state = self.state.read().await;
        Ok(state.album(album_id, "Failed to get album images")?.sorted_images())
    }

    async fn set_order(&self, album_id: &str, image_id: &str, key: OrderKey) -> Result<Image> {
        const ACTION: &str = "Failed to update album image order";
        self.enter(Operation::SetOrder).await?;
        if !key.is_assigned() {
            return Err(Error::Validation(format!(
                "{ACTION} - order must be a positive integer"
            )));
        }

        let mut state = self.state.write().await;
        let image = {
            let image = state.album_mut(album_id, ACTION)?.image_mut(image_id, ACTION)?;
            image.order_key = key;
            image.clone()
        };
        state.order_writes.push((image_id.to_string(), key));
        Ok(image)
    }

    async fn create_item(&self, album_id: &str) -> Result<Image> {
        self.enter(Operation::CreateItem).await?;
        let id = self.generate_id("image");
        let mut state = self.state.write().await;
        let record = state.album_mut(album_id, "Failed to create album image")?;
        let image = Image {
            id,
            filename: None,
            original_filename: None,
            uploaded: false,
            created_at: Utc::now(),
            uploaded_at: None,
            order_key: OrderKey::UNASSIGNED,
        };
        record.images.push(image.clone());
        Ok(image)
    }

    async fn delete_item(&self, album_id: &str, image_id: &str) -> Result<()> {
        const ACTION: &str = "Failed to delete album image";
        self.enter(Operation::DeleteItem).await?;
        let mut state = self.state.write().await;
        let record = state.album_mut(album_id, ACTION)?;
        let filename = record.image_mut(image_id, ACTION)?.filename.clone();
        record.images.retain(|image| image.id != image_id);
        if record.album.is_cover(image_id) {
            record.album.cover = None;
        }
        if let Some(filename) = filename {
            state.files.remove(&filename);
        }
        Ok(())
    }

    async fn upload_content(&self, album_id: &str, image_id: &str, upload: Upload) -> Result<Image> {
        const ACTION: &str = "Failed to upload album image";
        self.enter(Operation::UploadContent).await?;
        if upload.bytes.is_empty() {
            return Err(Error::Validation(format!("{ACTION} - Empty file uploaded.")));
        }

        let mut state = self.state.write().await;
        let image = {
            let image = state.album_mut(album_id, ACTION)?.image_mut(image_id, ACTION)?;
            let filename = format!("{image_id}-{}", upload.filename);
            image.filename = Some(filename);
            image.original_filename = Some(upload.filename);
            image.uploaded = true;
            image.uploaded_at = Some(Utc::now());
            image.clone()
        };
        if let Some(filename) = &image.filename {
            state.files.insert(filename.clone(), upload.bytes);
        }
        Ok(image)
    }

    async fn upload_archive(&self, album_id: &str, upload: Upload) -> Result<Vec<Image>> {
        const ACTION: &str = "Failed to upload album image archive";
        self.enter(Operation::UploadArchive).await?;
        if upload.bytes.is_empty() {
            return Err(Error::Validation(format!("{ACTION} - Empty file uploaded.")));
        }
        if !upload.is_archive() {
            return Err(Error::Validation(format!("{ACTION} - Unsupported archive type.")));
        }

        let mut state = self.state.write().await;
        state.album(album_id, ACTION)?;
        let entries = state
            .archives
            .get(&upload.filename)
            .cloned()
            .ok_or_else(|| Error::Validation(format!("{ACTION} - Invalid archive.")))?;

        let now = Utc::now();
        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = self.generate_id("image");
            let filename = format!("{id}-{entry}");
            state.files.insert(filename.clone(), entry.as_bytes().to_vec());
            created.push(Image {
                id,
                filename: Some(filename),
                original_filename: Some(entry),
                uploaded: true,
                created_at: now,
                uploaded_at: Some(now),
                order_key: OrderKey::UNASSIGNED,
            });
        }
        state
            .album_mut(album_id, ACTION)?
            .images
            .extend(created.iter().cloned());
        Ok(created)
    }

    async fn mark_cover(&self, album_id: &str, image_id: &str) -> Result<()> {
        const ACTION: &str = "Failed to mark album image as cover";
        self.enter(Operation::MarkCover).await?;
        let mut state = self.state.write().await;
        let record = state.album_mut(album_id, ACTION)?;
        let cover = record.image_mut(image_id, ACTION)?.clone();
        record.album.cover = Some(cover);
        Ok(())
    }

    async fn fetch_image(&self, filename: &str) -> Result<Vec<u8>> {
        self.enter(Operation::FetchImage).await?;
        self.state
            .read()
            .await
            .files
            .get(filename)
            .cloned()
            .ok_or_else(|| not_found("Failed to fetch image", "Image not found."))
    }
}
