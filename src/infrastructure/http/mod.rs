// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the catalog service.
//!
//! [`CatalogClient`] implements [`CatalogApi`] over the catalog's JSON API
//! rooted at `{api_url}/api/`. Identifiers are sent as percent-encoded path
//! segments.
//!
//! # Error Mapping
//!
//! Failed responses carry `{"error": ...}` or `{"detail": ...}`. The reason is
//! prefixed with the failed action ("Failed to get album - Album not found.")
//! and the status selects the variant:
//!
//! | Status          | Variant                |
//! |-----------------|------------------------|
//! | 404             | [`Error::NotFound`]    |
//! | 400, 409, 422   | [`Error::Validation`]  |
//! | anything else   | [`Error::Transport`]   |

mod wire;

use crate::application::port::{CatalogApi, CatalogPage, Collection, ListFilters, Upload};
use crate::application::query::pagination::image_url;
use crate::config::{ApiConfig, RemoteUiConfig, REMOTE_UI_CONFIG_PATH};
use crate::domain::{Album, AlbumFields, Author, AuthorAlias, Entity, Image, OrderKey};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use wire::{
    AlbumEnvelope, AlbumFieldsRequest, AlbumsEnvelope, AlbumsPage, AuthorAliasesEnvelope,
    AuthorAliasesPage, AuthorEnvelope, AuthorsPage, ErrorBody, ImageEnvelope, ImagesEnvelope,
    UpdateOrderRequest,
};

const USER_AGENT: &str = concat!("minori/", env!("CARGO_PKG_VERSION"));

/// Maps a failed response status to the error taxonomy.
pub(crate) fn error_for_status(status: StatusCode, message: String) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            Error::Validation(message)
        }
        _ => Error::Transport(message),
    }
}

async fn error_from_response(response: Response, action: &str) -> Error {
    let status = response.status();
    let body: ErrorBody = response.json().await.unwrap_or_default();
    let reason = body.reason().unwrap_or("Unknown error");
    error_for_status(status, format!("{action} - {reason}"))
}

fn transport(action: &str, err: &reqwest::Error) -> Error {
    Error::Transport(format!("{action} - {err}"))
}

fn build_http_client(config: &ApiConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .user_agent(USER_AGENT)
        .build()
        .map_err(Error::from)
}

/// Fetches the UI document the catalog publishes at `{origin}/.ui/config.json`.
///
/// # Errors
///
/// Returns [`Error::Config`] for an unusable origin and [`Error::Transport`]
/// when the document cannot be fetched or parsed.
pub async fn fetch_remote_ui_config(config: &ApiConfig, origin: &str) -> Result<RemoteUiConfig> {
    const ACTION: &str = "Failed to load UI config";

    let url = Url::parse(origin)
        .and_then(|origin| origin.join(REMOTE_UI_CONFIG_PATH))
        .map_err(|e| Error::Config(format!("invalid origin {origin}: {e}")))?;

    let response = build_http_client(config)?
        .get(url)
        .send()
        .await
        .map_err(|e| transport(ACTION, &e))?;
    if !response.status().is_success() {
        return Err(Error::Transport(format!("{ACTION} - HTTP status: {}", response.status())));
    }

    response.json().await.map_err(|e| transport(ACTION, &e))
}

/// [`CatalogApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    api_base: Url,
    image_base_url: String,
}

impl CatalogClient {
    /// Builds a client for the catalog described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `api_url` is not an absolute URL.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api_base = Url::parse(&config.api_url)
            .map_err(|e| Error::Config(format!("invalid api_url {}: {e}", config.api_url)))?;
        if api_base.cannot_be_a_base() {
            return Err(Error::Config(format!("invalid api_url {}", config.api_url)));
        }

        Ok(Self {
            http: build_http_client(config)?,
            api_base,
            image_base_url: config.image_base_url.clone(),
        })
    }

    /// URL of `/api/<segments...>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, action: &str) -> Result<T> {
        let response = self.execute(request, action).await?;
        response.json().await.map_err(|e| transport(action, &e))
    }

    async fn execute(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| transport(action, &e))?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response, action).await)
        }
    }

    async fn album_page(
        &self,
        segments: &[&str],
        page: u32,
        filters: ListFilters,
        action: &str,
    ) -> Result<CatalogPage> {
        let request = self.http.get(self.endpoint(segments)).query(&[
            ("page", page.to_string()),
            ("include_disabled", filters.include_disabled.to_string()),
        ]);
        let body: AlbumsPage = self.send(request, action).await?;
        Ok(CatalogPage {
            entries: body
                .albums
                .into_iter()
                .map(|album| Entity::Album(album.into()))
                .collect(),
            pagination: body.pagination.into(),
        })
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn get_page(
        &self,
        collection: &Collection,
        page: u32,
        filters: ListFilters,
    ) -> Result<CatalogPage> {
        tracing::debug!(%collection, page, ?filters, "get page");
        match collection {
            Collection::Albums => {
                self.album_page(&["albums"], page, filters, "Failed to get albums")
                    .await
            }
            Collection::AuthorAlbums(author_id) => {
                self.album_page(
                    &["authors", author_id, "albums"],
                    page,
                    filters,
                    "Failed to get author albums",
                )
                .await
            }
            Collection::Authors => {
                let request = self
                    .http
                    .get(self.endpoint(&["authors"]))
                    .query(&[("page", page)]);
                let body: AuthorsPage = self.send(request, "Failed to get authors").await?;
                Ok(CatalogPage {
                    entries: body
                        .authors
                        .into_iter()
                        .map(|author| Entity::Author(author.into()))
                        .collect(),
                    pagination: body.pagination.into(),
                })
            }
            Collection::AuthorAliases => {
                let request = self
                    .http
                    .get(self.endpoint(&["authoraliases"]))
                    .query(&[("page", page)]);
                let body: AuthorAliasesPage =
                    self.send(request, "Failed to get author aliases").await?;
                Ok(CatalogPage {
                    entries: body
                        .author_aliases
                        .into_iter()
                        .map(|alias| Entity::AuthorAlias(alias.into()))
                        .collect(),
                    pagination: body.pagination.into(),
                })
            }
        }
    }

    async fn list_all_albums(&self, filters: ListFilters) -> Result<Vec<Album>> {
        let request = self
            .http
            .get(self.endpoint(&["albums", "all"]))
            .query(&[("include_disabled", filters.include_disabled)]);
        let body: AlbumsEnvelope = self.send(request, "Failed to get albums").await?;
        Ok(body.albums.into_iter().map(Into::into).collect())
    }

    async fn create_album(&self, fields: &AlbumFields) -> Result<Album> {
        let request = self
            .http
            .post(self.endpoint(&["albums", "-", "create"]))
            .json(&AlbumFieldsRequest::from(fields));
        let body: AlbumEnvelope = self.send(request, "Failed to create album").await?;
        Ok(body.album.into())
    }

    async fn get_album(&self, album_id: &str) -> Result<Album> {
        let request = self.http.get(self.endpoint(&["albums", album_id]));
        let body: AlbumEnvelope = self.send(request, "Failed to get album").await?;
        Ok(body.album.into())
    }

    async fn update_album(&self, album_id: &str, fields: &AlbumFields) -> Result<Album> {
        let request = self
            .http
            .patch(self.endpoint(&["albums", album_id]))
            .json(&AlbumFieldsRequest::from(fields));
        let body: AlbumEnvelope = self.send(request, "Failed to update album").await?;
        Ok(body.album.into())
    }

    async fn set_album_hidden(&self, album_id: &str, hidden: bool) -> Result<Album> {
        let request = self
            .http
            .post(self.endpoint(&["albums", album_id, "toggle"]))
            .query(&[("state", hidden)]);
        let body: AlbumEnvelope = self.send(request, "Failed to toggle album").await?;
        Ok(body.album.into())
    }

    async fn delete_album(&self, album_id: &str) -> Result<()> {
        let request = self.http.delete(self.endpoint(&["albums", album_id]));
        self.execute(request, "Failed to delete album").await?;
        Ok(())
    }

    async fn get_author(&self, author_id: &str) -> Result<Author> {
        let request = self.http.get(self.endpoint(&["authors", author_id]));
        let body: AuthorEnvelope = self.send(request, "Failed to get author").await?;
        Ok(body.author.into())
    }

    async fn author_aliases(&self, author_id: &str) -> Result<Vec<AuthorAlias>> {
        let request = self
            .http
            .get(self.endpoint(&["authors", author_id, "aliases"]));
        let body: AuthorAliasesEnvelope =
            self.send(request, "Failed to get author aliases").await?;
        Ok(body.author_aliases.into_iter().map(Into::into).collect())
    }

    async fn list_items(&self, album_id: &str) -> Result<Vec<Image>> {
        let request = self.http.get(self.endpoint(&["albums", album_id, "images"]));
        let body: ImagesEnvelope = self.send(request, "Failed to get album images").await?;
        Ok(body.images.into_iter().map(Into::into).collect())
    }

    async fn set_order(&self, album_id: &str, image_id: &str, key: OrderKey) -> Result<Image> {
        let request = self
            .http
            .post(self.endpoint(&["albums", album_id, "images", image_id, "order"]))
            .json(&UpdateOrderRequest { order: key.value() });
        let body: ImageEnvelope = self
            .send(request, "Failed to update album image order")
            .await?;
        Ok(body.image.into())
    }

    async fn create_item(&self, album_id: &str) -> Result<Image> {
        let request = self
            .http
            .post(self.endpoint(&["albums", album_id, "images", "-", "create"]));
        let body: ImageEnvelope = self.send(request, "Failed to create album image").await?;
        Ok(body.image.into())
    }

    async fn delete_item(&self, album_id: &str, image_id: &str) -> Result<()> {
        let request = self
            .http
            .delete(self.endpoint(&["albums", album_id, "images", image_id]));
        self.execute(request, "Failed to delete album image").await?;
        Ok(())
    }

    async fn upload_content(&self, album_id: &str, image_id: &str, upload: Upload) -> Result<Image> {
        const ACTION: &str = "Failed to upload album image";

        let part = Part::bytes(upload.bytes).file_name(upload.filename);
        let request = self
            .http
            .put(self.endpoint(&["albums", album_id, "images", image_id, "upload"]))
            .multipart(Form::new().part("file", part));
        let body: ImageEnvelope = self.send(request, ACTION).await?;
        Ok(body.image.into())
    }

    async fn upload_archive(&self, album_id: &str, upload: Upload) -> Result<Vec<Image>> {
        let part = Part::bytes(upload.bytes).file_name(upload.filename);
        let request = self
            .http
            .post(self.endpoint(&["albums", album_id, "images", "-", "bulkcreate"]))
            .multipart(Form::new().part("file", part));
        let body: ImagesEnvelope = self
            .send(request, "Failed to upload album image archive")
            .await?;
        Ok(body.images.into_iter().map(Into::into).collect())
    }

    async fn mark_cover(&self, album_id: &str, image_id: &str) -> Result<()> {
        let request = self
            .http
            .post(self.endpoint(&["albums", album_id, "images", image_id, "make-cover"]));
        self.execute(request, "Failed to mark album image as cover")
            .await?;
        Ok(())
    }

    async fn fetch_image(&self, filename: &str) -> Result<Vec<u8>> {
        use futures_util::StreamExt;
        const ACTION: &str = "Failed to fetch image";

        let request = self.http.get(image_url(&self.image_base_url, filename));
        let response = self.execute(request, ACTION).await?;

        let capacity = response
            .content_length()
            .and_then(|len| usize::try_from(len).ok())
            .unwrap_or(0);
        let mut bytes = Vec::with_capacity(capacity);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| transport(ACTION, &e))?;
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}
