// SPDX-License-Identifier: MPL-2.0
//! Album page: details and a thumbnail per image.

use super::required_identity;
use crate::application::port::{AddressedScreen, CatalogApi};
use crate::domain::{Address, Album};
use crate::error::Result;
use crate::ui::binder::ViewBinder;
use crate::ui::container::MemoryContainer;
use crate::ui::elements::{Card, RenderContext, DETAILS_TAG, IMAGE_TAG};
use async_trait::async_trait;
use std::sync::Arc;

pub struct AlbumScreen {
    api: Arc<dyn CatalogApi>,
    album: Option<Album>,
    details: ViewBinder,
    thumbnails: ViewBinder,
    container: MemoryContainer,
}

impl AlbumScreen {
    pub fn new(api: Arc<dyn CatalogApi>, ctx: RenderContext) -> Self {
        Self {
            api,
            album: None,
            details: ViewBinder::new(DETAILS_TAG, ctx.clone()),
            thumbnails: ViewBinder::new(IMAGE_TAG, ctx),
            container: MemoryContainer::new(),
        }
    }

    #[must_use]
    pub fn container(&self) -> &MemoryContainer {
        &self.container
    }

    #[must_use]
    pub fn album(&self) -> Option<&Album> {
        self.album.as_ref()
    }
}

#[async_trait]
impl AddressedScreen for AlbumScreen {
    async fn load(&mut self, address: &Address) -> Result<()> {
        let album_id = required_identity(address, "get album")?;
        let album = self.api.get_album(album_id).await?;
        let images = self.api.list_items(album_id).await?;
        tracing::info!(album = album_id, images = images.len(), "album loaded");

        self.details
            .display(&mut self.container, &Card::AlbumDetails(album.clone()));
        for image in images {
            self.thumbnails.display(
                &mut self.container,
                &Card::Thumbnail {
                    album_id: album.id.clone(),
                    image,
                },
            );
        }
        self.album = Some(album);
        Ok(())
    }

    async fn render_secondary(&mut self, _address: &Address) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) {
        self.details.clear_scope(&mut self.container);
        self.thumbnails.clear_scope(&mut self.container);
        self.album = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::Container;
    use crate::domain::OrderKey;
    use crate::infrastructure::InMemoryCatalog;

    #[tokio::test]
    async fn thumbnails_link_to_viewer() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let album = catalog.seed_album("Trip").await;
        let image = catalog.seed_image(&album, "beach.png", OrderKey::new(1)).await;
        let mut screen = AlbumScreen::new(catalog, RenderContext::new("http://img"));

        screen.load(&Address::parse(&album)).await.unwrap();

        assert_eq!(screen.container().identities(IMAGE_TAG), vec![image.clone()]);
        let thumb = screen.container().content(IMAGE_TAG, &image).unwrap();
        assert!(thumb.ends_with(&format!("/view.html#{album}:{image}")));
        assert_eq!(screen.album().map(Album::display_title), Some("Trip"));
    }
}
