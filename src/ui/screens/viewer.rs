// SPDX-License-Identifier: MPL-2.0
//! Single-image viewer stepping through an album.
//!
//! Address `album:image`. Stepping between images of the same album is a
//! cheap render: the image list fetched by the full load is reused, and the
//! neighbours of the new image are prefetched in the background. The bytes of
//! the image on display come from that prefetch cache whenever it has them.

use super::required_identity;
use crate::application::port::{AddressedScreen, CatalogApi};
use crate::application::query::{CursorSequence, Navigator, Route};
use crate::domain::{Address, Album, Image};
use crate::error::{Error, Result};
use crate::media::{spawn_prefetch, SharedPrefetchCache};
use crate::ui::binder::ViewBinder;
use crate::ui::container::MemoryContainer;
use crate::ui::elements::{Card, RenderContext, IMAGE_PAGE_TAG, PAGINATION_TAG};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

struct Prefetcher {
    cache: SharedPrefetchCache,
    count: usize,
    /// Downloads still in flight, by filename.
    pending: HashMap<String, JoinHandle<()>>,
}

pub struct ViewerScreen {
    api: Arc<dyn CatalogApi>,
    image_base_url: String,
    album: Option<Album>,
    images: Vec<Image>,
    sequence: CursorSequence,
    navigator: Option<Navigator>,
    image: ViewBinder,
    pagination: ViewBinder,
    container: MemoryContainer,
    redirect: Option<Address>,
    prefetcher: Option<Prefetcher>,
}

impl ViewerScreen {
    pub fn new(api: Arc<dyn CatalogApi>, ctx: RenderContext) -> Self {
        Self {
            api,
            image_base_url: ctx.image_base_url.clone(),
            album: None,
            images: Vec::new(),
            sequence: CursorSequence::default(),
            navigator: None,
            image: ViewBinder::new(IMAGE_PAGE_TAG, ctx.clone()),
            pagination: ViewBinder::new(PAGINATION_TAG, ctx),
            container: MemoryContainer::new(),
            redirect: None,
            prefetcher: None,
        }
    }

    /// Prefetches `count` images on each side of the current one into `cache`.
    #[must_use]
    pub fn with_prefetch(mut self, cache: SharedPrefetchCache, count: usize) -> Self {
        self.prefetcher = (count > 0).then(|| Prefetcher {
            cache,
            count,
            pending: HashMap::new(),
        });
        self
    }

    #[must_use]
    pub fn container(&self) -> &MemoryContainer {
        &self.container
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.sequence.current()
    }

    /// Address the location should be rewritten to after a load without an
    /// image component.
    pub fn take_redirect(&mut self) -> Option<Address> {
        self.redirect.take()
    }

    /// Window title, e.g. `Trip (2/5)`.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        let album = self.album.as_ref()?;
        let targets = self.sequence.targets()?;
        Some(format!("{} ({}/{})", album.display_title(), targets.position, targets.total))
    }

    /// Bytes of the image on display.
    ///
    /// A prefetched copy is served from the cache, and a prefetch of the same
    /// file still in flight is awaited instead of downloading it again.
    /// Anything else is downloaded and cached for the next visit.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] when no image is shown or it has no content
    /// - catalog errors from the download
    pub async fn current_image_bytes(&mut self) -> Result<Arc<Vec<u8>>> {
        let filename = self.current_filename()?;

        if let Some(prefetcher) = &mut self.prefetcher {
            if let Some(handle) = prefetcher.pending.remove(&filename) {
                if let Err(err) = handle.await {
                    tracing::debug!(%filename, error = %err, "prefetch task ended abnormally");
                }
            }
            if let Some(bytes) = prefetcher.cache.lock().await.get(&filename) {
                tracing::debug!(%filename, "image served from prefetch cache");
                return Ok(bytes);
            }
        }

        let bytes = self.api.fetch_image(&filename).await?;
        if let Some(prefetcher) = &self.prefetcher {
            prefetcher.cache.lock().await.insert(filename, bytes.clone());
        }
        Ok(Arc::new(bytes))
    }

    /// Waits for every prefetch started so far.
    #[cfg(test)]
    async fn settle_prefetch(&mut self) {
        let Some(prefetcher) = &mut self.prefetcher else {
            return;
        };
        for (filename, handle) in prefetcher.pending.drain() {
            if let Err(err) = handle.await {
                tracing::debug!(%filename, error = %err, "prefetch task ended abnormally");
            }
        }
    }

    fn current_filename(&self) -> Result<String> {
        let current = self
            .sequence
            .current()
            .ok_or_else(|| Error::NotFound("Failed to fetch image - No image selected.".to_string()))?;
        self.images
            .iter()
            .find(|image| image.id == current)
            .filter(|image| image.uploaded)
            .and_then(|image| image.filename.clone())
            .ok_or_else(|| Error::NotFound("Failed to fetch image - Image has no content.".to_string()))
    }

    async fn fetch_images(&mut self, album_id: &str) -> Result<()> {
        self.images = self.api.list_items(album_id).await?;
        self.sequence = CursorSequence::unpositioned(self.images.iter().map(|image| image.id.clone()));
        Ok(())
    }

    /// Shows `image_id`. The image must be part of the fetched list.
    async fn show(&mut self, image_id: &str) -> Result<()> {
        let image = self
            .images
            .iter()
            .find(|image| image.id == image_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Failed to get image - Image not found.".to_string()))?;
        self.sequence.set_current(image_id);

        self.image
            .lifecycle(&mut self.container, &Card::FullImage(image.clone()), true);
        if let Some(links) = self
            .navigator
            .as_ref()
            .and_then(|nav| nav.render_cursor(&self.sequence, image.filename.as_deref()))
        {
            self.pagination
                .display(&mut self.container, &Card::Pagination(links));
        }

        self.prefetch_neighbours().await;
        Ok(())
    }

    async fn prefetch_neighbours(&mut self) {
        let Some(prefetcher) = &mut self.prefetcher else {
            return;
        };

        let filenames: Vec<String> = self
            .sequence
            .neighbours(prefetcher.count)
            .into_iter()
            .filter_map(|id| self.images.iter().find(|image| image.id == id))
            .filter(|image| image.uploaded)
            .filter_map(|image| image.filename.clone())
            .filter(|filename| !prefetcher.pending.contains_key(filename))
            .collect();
        prefetcher.pending.retain(|_, handle| !handle.is_finished());
        if filenames.is_empty() {
            return;
        }

        let handles = spawn_prefetch(Arc::clone(&self.api), Arc::clone(&prefetcher.cache), filenames).await;
        prefetcher.pending.extend(handles);
    }
}

#[async_trait]
impl AddressedScreen for ViewerScreen {
    async fn load(&mut self, address: &Address) -> Result<()> {
        let album_id = required_identity(address, "get album")?.to_string();
        let album = self.api.get_album(&album_id).await?;
        self.fetch_images(&album_id).await?;
        self.navigator = Some(Navigator::new(Route::Viewer(album_id.clone()), self.image_base_url.clone()));
        self.album = Some(album);
        tracing::info!(album = %album_id, images = self.images.len(), "viewer loaded");

        let image_id = match address.component(1) {
            Some(image_id) => image_id.to_string(),
            None => {
                let first = self
                    .sequence
                    .first()
                    .ok_or_else(|| Error::NotFound("Failed to get image - Album has no images.".to_string()))?
                    .to_string();
                self.redirect = Some(Address::from_components([album_id.clone(), first.clone()]));
                first
            }
        };
        self.show(&image_id).await
    }

    async fn render_secondary(&mut self, address: &Address) -> Result<()> {
        let Some(album_id) = self.album.as_ref().map(|album| album.id.clone()) else {
            return self.load(address).await;
        };

        let image_id = match address.component(1) {
            Some(image_id) => image_id.to_string(),
            None => return self.load(address).await,
        };

        if !self.sequence.contains(&image_id) {
            tracing::debug!(image = %image_id, "image not in cached list, refetching");
            self.fetch_images(&album_id).await?;
        }
        self.show(&image_id).await
    }

    fn clear(&mut self) {
        self.image.clear_scope(&mut self.container);
        self.pagination.clear_scope(&mut self.container);
        self.album = None;
        self.images.clear();
        self.sequence = CursorSequence::default();
        self.navigator = None;
        self.redirect = None;
    }
}
