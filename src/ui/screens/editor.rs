// SPDX-License-Identifier: MPL-2.0
//! Album editor.
//!
//! Binds one edit card per image in display order. Every action ends with a
//! refresh from the catalog and a notification describing the outcome.

use super::required_identity;
use crate::application::command::{upload_new_item, OrderEngine};
use crate::application::port::{AddressedScreen, CatalogApi, Upload};
use crate::domain::{Address, Album, AlbumFields, Image};
use crate::error::{Direction, Error, Result};
use crate::ui::binder::ViewBinder;
use crate::ui::container::MemoryContainer;
use crate::ui::elements::{Card, EditHints, RenderContext, DETAILS_TAG, IMAGE_PAGE_TAG};
use crate::ui::notifications::{Manager, Notification};
use async_trait::async_trait;
use std::sync::Arc;

pub struct EditorScreen {
    api: Arc<dyn CatalogApi>,
    maint_mode: bool,
    album: Option<Album>,
    images: Vec<Image>,
    details: ViewBinder,
    cards: ViewBinder,
    container: MemoryContainer,
}

impl EditorScreen {
    /// `maint_mode` enables the delete actions.
    pub fn new(api: Arc<dyn CatalogApi>, ctx: RenderContext, maint_mode: bool) -> Self {
        Self {
            api,
            maint_mode,
            album: None,
            images: Vec::new(),
            details: ViewBinder::new(DETAILS_TAG, ctx.clone()),
            cards: ViewBinder::new(IMAGE_PAGE_TAG, ctx),
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

    /// Images in display order.
    #[must_use]
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub async fn move_up(&mut self, image_id: &str, notifications: &mut Manager) -> Result<()> {
        self.reorder(image_id, Direction::Up, notifications).await
    }

    pub async fn move_down(&mut self, image_id: &str, notifications: &mut Manager) -> Result<()> {
        self.reorder(image_id, Direction::Down, notifications).await
    }

    /// Assigns keys `1..=N` in the current display order.
    pub async fn bake(&mut self, notifications: &mut Manager) -> Result<()> {
        let album_id = self.album_id()?;
        let mut engine = OrderEngine::with_window(self.api.as_ref(), album_id, self.images.clone());
        let result = engine.bake().await;
        let window = engine.into_window();
        self.finish_reorder(result, window, notifications).await
    }

    pub async fn make_cover(&mut self, image_id: &str, notifications: &mut Manager) -> Result<()> {
        let album_id = self.album_id()?;
        let result = self.api.mark_cover(&album_id, image_id).await;
        self.conclude(result, "Image set as cover", notifications).await
    }

    pub async fn delete_image(&mut self, image_id: &str, notifications: &mut Manager) -> Result<()> {
        let album_id = self.album_id()?;
        let result = match self.require_maint_mode() {
            Ok(()) => self.api.delete_item(&album_id, image_id).await,
            Err(err) => Err(err),
        };
        self.conclude(result, "Image deleted", notifications).await
    }

    /// Creates a new image and uploads `upload` into it.
    pub async fn upload(&mut self, upload: Upload, notifications: &mut Manager) -> Result<Image> {
        let album_id = self.album_id()?;
        let result = upload_new_item(self.api.as_ref(), &album_id, upload).await;
        let image = result.as_ref().ok().cloned();
        self.conclude(result.map(|_| ()), "Image uploaded", notifications)
            .await?;
        image.ok_or_else(|| Error::Transport("Failed to upload image - no response".to_string()))
    }

    /// Uploads a zip or cbz archive. Its images arrive unordered, so the next
    /// move bakes the album first.
    pub async fn upload_archive(&mut self, upload: Upload, notifications: &mut Manager) -> Result<Vec<Image>> {
        let album_id = self.album_id()?;
        let (outcome, images) = match self.api.upload_archive(&album_id, upload).await {
            Ok(images) => (Ok(()), images),
            Err(err) => (Err(err), Vec::new()),
        };
        self.conclude(outcome, "Archive uploaded", notifications).await?;
        tracing::info!(album = %album_id, images = images.len(), "archive uploaded");
        Ok(images)
    }

    /// Hides the album from the listings, or shows it again.
    pub async fn set_hidden(&mut self, hidden: bool, notifications: &mut Manager) -> Result<()> {
        let album_id = self.album_id()?;
        let result = self.api.set_album_hidden(&album_id, hidden).await.map(|_| ());
        self.conclude(result, "Album updated", notifications).await
    }

    pub async fn update_details(&mut self, fields: &AlbumFields, notifications: &mut Manager) -> Result<()> {
        let album_id = self.album_id()?;
        let result = self.api.update_album(&album_id, fields).await.map(|_| ());
        self.conclude(result, "Album updated", notifications).await
    }

    /// Deletes the whole album and empties the screen.
    pub async fn delete_album(&mut self, notifications: &mut Manager) -> Result<()> {
        let album_id = self.album_id()?;
        self.require_maint_mode()
            .map_err(|err| report_failure(err, notifications))?;
        self.api
            .delete_album(&album_id)
            .await
            .map_err(|err| report_failure(err, notifications))?;

        self.clear();
        notifications.push(Notification::success("Album deleted"));
        Ok(())
    }

    fn album_id(&self) -> Result<String> {
        self.album
            .as_ref()
            .map(|album| album.id.clone())
            .ok_or_else(|| Error::NotFound("Failed to get album - No album loaded.".to_string()))
    }

    fn require_maint_mode(&self) -> Result<()> {
        if self.maint_mode {
            Ok(())
        } else {
            Err(Error::Validation("Deleting requires maintenance mode".to_string()))
        }
    }

    async fn reorder(&mut self, image_id: &str, direction: Direction, notifications: &mut Manager) -> Result<()> {
        let album_id = self.album_id()?;
        let mut engine = OrderEngine::with_window(self.api.as_ref(), album_id, self.images.clone());
        let result = match direction {
            Direction::Up => engine.move_up(image_id).await,
            Direction::Down => engine.move_down(image_id).await,
        };
        let window = engine.into_window();
        self.finish_reorder(result, window, notifications).await
    }

    /// Adopts the engine's last fetched window, or re-fetches when the engine
    /// stopped with its window invalidated.
    ///
    /// A move that bakes before hitting a boundary still leaves the baked
    /// window behind, so the window is adopted whatever the result.
    async fn finish_reorder(
        &mut self,
        result: Result<()>,
        window: Option<Vec<Image>>,
        notifications: &mut Manager,
    ) -> Result<()> {
        let Some(window) = window else {
            return self.conclude(result, "Image order updated", notifications).await;
        };

        self.images = window;
        self.render();
        match result {
            Ok(()) => {
                notifications.push(Notification::success("Image order updated"));
                Ok(())
            }
            Err(err) => Err(report_failure(err, notifications)),
        }
    }

    /// Refreshes the album and its images, then reports `result`.
    async fn conclude(&mut self, result: Result<()>, success: &str, notifications: &mut Manager) -> Result<()> {
        let boundary = matches!(result, Err(Error::OrderingBoundary(_)));
        if !boundary {
            if let Err(err) = self.refresh().await {
                tracing::warn!(error = %err, "refresh after edit failed");
                notifications.push(Notification::error(err.user_message()));
            }
        }

        match result {
            Ok(()) => {
                notifications.push(Notification::success(success));
                Ok(())
            }
            Err(err) => Err(report_failure(err, notifications)),
        }
    }

    async fn refresh(&mut self) -> Result<()> {
        let album_id = self.album_id()?;
        let album = self.api.get_album(&album_id).await?;
        self.images = self.api.list_items(&album_id).await?;
        self.album = Some(album);
        self.render();
        Ok(())
    }

    fn render(&mut self) {
        let Some(album) = &self.album else {
            return;
        };

        self.details
            .display(&mut self.container, &Card::AlbumDetails(album.clone()));
        self.cards.clear_scope(&mut self.container);
        let last = self.images.len().saturating_sub(1);
        for (index, image) in self.images.iter().enumerate() {
            let hints = EditHints {
                is_first: index == 0,
                is_last: index == last,
                is_cover: album.is_cover(&image.id),
                delete_enabled: self.maint_mode,
            };
            self.cards.display(
                &mut self.container,
                &Card::EditImage {
                    image: image.clone(),
                    hints,
                },
            );
        }
    }
}

/// Pushes the notification for a failed action and hands the error back.
///
/// Ordering boundaries are reported as information since nothing changed.
fn report_failure(err: Error, notifications: &mut Manager) -> Error {
    match &err {
        Error::OrderingBoundary(direction) => notifications.push(Notification::info(direction.to_string())),
        other => notifications.push(Notification::error(other.user_message())),
    }
    err
}

#[async_trait]
impl AddressedScreen for EditorScreen {
    async fn load(&mut self, address: &Address) -> Result<()> {
        let album_id = required_identity(address, "get album")?;
        let album = self.api.get_album(album_id).await?;
        self.images = self.api.list_items(album_id).await?;
        tracing::info!(album = album_id, images = self.images.len(), "editor loaded");
        self.album = Some(album);
        self.render();
        Ok(())
    }

    async fn render_secondary(&mut self, _address: &Address) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) {
        self.details.clear_scope(&mut self.container);
        self.cards.clear_scope(&mut self.container);
        self.album = None;
        self.images.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::Container;
    use crate::domain::OrderKey;
    use crate::infrastructure::memory::{InMemoryCatalog, Operation};
    use crate::ui::notifications::Severity;

    async fn editor(keys: &[u32], maint_mode: bool) -> (Arc<InMemoryCatalog>, EditorScreen, Vec<String>) {
        let catalog = Arc::new(InMemoryCatalog::new());
        let album = catalog.seed_album("Edit me").await;
        let mut ids = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            ids.push(
                catalog
                    .seed_image(&album, &format!("{i}.png"), OrderKey::new(*key))
                    .await,
            );
        }
        let mut screen = EditorScreen::new(catalog.clone(), RenderContext::new("http://img"), maint_mode);
        screen.load(&Address::parse(&album)).await.unwrap();
        (catalog, screen, ids)
    }

    fn order(screen: &EditorScreen) -> Vec<String> {
        screen.images().iter().map(|image| image.id.clone()).collect()
    }

    #[tokio::test]
    async fn move_down_reorders_cards_and_notifies() {
        let (_, mut screen, ids) = editor(&[1, 2, 3], false).await;
        let mut notifications = Manager::new();

        screen.move_down(&ids[0], &mut notifications).await.unwrap();

        assert_eq!(order(&screen), vec![ids[1].clone(), ids[0].clone(), ids[2].clone()]);
        assert_eq!(screen.container().identities(IMAGE_PAGE_TAG), order(&screen));
        let first_card = screen.container().content(IMAGE_PAGE_TAG, &ids[1]).unwrap();
        assert!(!first_card.contains(" up"));
        assert_eq!(
            notifications.visible().next().map(|n| n.message().to_string()),
            Some("Image order updated".to_string())
        );
    }

    #[tokio::test]
    async fn boundary_is_reported_as_info_without_writes() {
        let (catalog, mut screen, ids) = editor(&[1, 2], false).await;
        let mut notifications = Manager::new();

        let err = screen.move_up(&ids[0], &mut notifications).await.unwrap_err();

        assert_eq!(err, Error::OrderingBoundary(Direction::Up));
        assert!(catalog.order_writes().await.is_empty());
        let notice = notifications.visible().next().unwrap();
        assert_eq!(notice.severity(), Severity::Info);
        assert_eq!(notice.message(), "cannot move up: already first");
    }

    #[tokio::test]
    async fn boundary_after_bake_keeps_baked_keys() {
        let (catalog, mut screen, ids) = editor(&[0, 0], false).await;
        let mut notifications = Manager::new();

        let err = screen.move_up(&ids[0], &mut notifications).await.unwrap_err();

        assert_eq!(err, Error::OrderingBoundary(Direction::Up));
        assert_eq!(catalog.order_writes().await.len(), 2);
        let server: Vec<u32> = catalog
            .list_items(&screen.album().unwrap().id)
            .await
            .unwrap()
            .iter()
            .map(|image| image.order_key.value())
            .collect();
        let local: Vec<u32> = screen.images().iter().map(|image| image.order_key.value()).collect();
        assert_eq!(server, vec![1, 2]);
        assert_eq!(local, server);
        assert_eq!(order(&screen), ids);
        assert_eq!(
            notifications.visible().next().map(Notification::severity),
            Some(Severity::Info)
        );
    }

    #[tokio::test]
    async fn make_cover_refreshes_album() {
        let (_, mut screen, ids) = editor(&[1, 2], false).await;
        let mut notifications = Manager::new();

        screen.make_cover(&ids[1], &mut notifications).await.unwrap();

        assert!(screen.album().unwrap().is_cover(&ids[1]));
        let card = screen.container().content(IMAGE_PAGE_TAG, &ids[1]).unwrap();
        assert!(card.contains("[cover"));
    }

    #[tokio::test]
    async fn delete_requires_maint_mode() {
        let (catalog, mut screen, ids) = editor(&[1, 2], false).await;
        let mut notifications = Manager::new();

        let err = screen.delete_image(&ids[0], &mut notifications).await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(catalog.call_count(Operation::DeleteItem).await, 0);
        assert_eq!(screen.images().len(), 2);
    }

    #[tokio::test]
    async fn delete_in_maint_mode_removes_card() {
        let (_, mut screen, ids) = editor(&[1, 2], true).await;
        let mut notifications = Manager::new();

        screen.delete_image(&ids[0], &mut notifications).await.unwrap();

        assert_eq!(screen.container().identities(IMAGE_PAGE_TAG), vec![ids[1].clone()]);
    }

    #[tokio::test]
    async fn failed_upload_leaves_no_card() {
        let (catalog, mut screen, _) = editor(&[1], false).await;
        catalog
            .fail_next(Operation::UploadContent, Error::Transport("reset".into()))
            .await;
        let mut notifications = Manager::new();

        let err = screen
            .upload(Upload::new("new.png", vec![1]), &mut notifications)
            .await
            .unwrap_err();

        assert_eq!(err, Error::Transport("reset".into()));
        assert_eq!(screen.images().len(), 1);
        assert_eq!(
            notifications.visible().next().map(Notification::severity),
            Some(Severity::Error)
        );
    }

    #[tokio::test]
    async fn hide_then_show_updates_details() {
        let (catalog, mut screen, _) = editor(&[1], false).await;
        let album = screen.album().unwrap().id.clone();
        let mut notifications = Manager::new();

        screen.set_hidden(true, &mut notifications).await.unwrap();
        assert!(screen.album().unwrap().disabled);
        let details = screen.container().content(DETAILS_TAG, &album).unwrap();
        assert!(details.starts_with("Edit me (disabled)"));

        screen.set_hidden(false, &mut notifications).await.unwrap();
        assert!(!catalog.get_album(&album).await.unwrap().disabled);
        assert_eq!(catalog.call_count(Operation::ToggleAlbum).await, 2);
        assert_eq!(
            notifications.visible().next().map(|n| n.message().to_string()),
            Some("Album updated".to_string())
        );
    }

    #[tokio::test]
    async fn archive_images_are_baked_by_the_next_move() {
        let (catalog, mut screen, ids) = editor(&[1], false).await;
        catalog.register_archive("pages.zip", &["p1.png", "p2.png"]).await;
        let mut notifications = Manager::new();

        let added = screen
            .upload_archive(Upload::new("pages.zip", vec![1]), &mut notifications)
            .await
            .unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(screen.images().len(), 3);
        for image in &added {
            assert!(screen.container().contains(IMAGE_PAGE_TAG, &image.id));
        }

        screen.move_up(&ids[0], &mut notifications).await.unwrap();
        let keys: Vec<u32> = screen.images().iter().map(|image| image.order_key.value()).collect();
        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(screen.images()[1].id, ids[0]);
    }

    #[tokio::test]
    async fn rejected_archive_is_reported() {
        let (_, mut screen, _) = editor(&[1], false).await;
        let mut notifications = Manager::new();

        let err = screen
            .upload_archive(Upload::new("unknown.cbz", vec![1]), &mut notifications)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            Error::Validation("Failed to upload album image archive - Invalid archive.".into())
        );
        assert_eq!(screen.images().len(), 1);
    }

    #[tokio::test]
    async fn upload_appends_card() {
        let (_, mut screen, _) = editor(&[1], false).await;
        let mut notifications = Manager::new();

        let image = screen
            .upload(Upload::new("new.png", vec![1]), &mut notifications)
            .await
            .unwrap();

        assert!(screen.container().contains(IMAGE_PAGE_TAG, &image.id));
    }
}
