// SPDX-License-Identifier: MPL-2.0
//! Sibling reordering over an album's image window.
//!
//! The catalog owns the order keys. [`OrderEngine`] never patches its local
//! copy of the window: every write-through invalidates it and the next read
//! goes back to the catalog.
//!
//! # Protocol
//!
//! - **Bake**: when any key is the unassigned sentinel, keys `1..=N` are
//!   written in the current display order, one acknowledged write at a time.
//! - **Move**: the mover and its neighbour exchange their existing keys with
//!   two sequential writes, mover first.

use crate::application::port::CatalogApi;
use crate::domain::{needs_bake, Image, OrderKey, Orderable};
use crate::error::{Direction, Error, Result};

/// Reorders the images of one album.
///
/// Holds the album's window for the duration of one operation. Nothing else
/// may write the album's keys between a read and its write-through.
pub struct OrderEngine<'a> {
    api: &'a dyn CatalogApi,
    album_id: String,
    window: Option<Vec<Image>>,
}

impl<'a> OrderEngine<'a> {
    pub fn new(api: &'a dyn CatalogApi, album_id: impl Into<String>) -> Self {
        Self {
            api,
            album_id: album_id.into(),
            window: None,
        }
    }

    /// Seeds the engine with a window the caller already displays.
    ///
    /// The window must be in display order.
    pub fn with_window(api: &'a dyn CatalogApi, album_id: impl Into<String>, window: Vec<Image>) -> Self {
        Self {
            api,
            album_id: album_id.into(),
            window: Some(window),
        }
    }

    #[must_use]
    pub fn album_id(&self) -> &str {
        &self.album_id
    }

    /// Returns the window, fetching it when the cache is invalid.
    ///
    /// # Errors
    ///
    /// Propagates catalog errors.
    pub async fn window(&mut self) -> Result<&[Image]> {
        if self.window.is_none() {
            let items = self.api.list_items(&self.album_id).await?;
            self.window = Some(items);
        }
        Ok(self.window.as_deref().unwrap_or_default())
    }

    /// Drops the cached window and fetches it again.
    ///
    /// # Errors
    ///
    /// Propagates catalog errors.
    pub async fn refresh(&mut self) -> Result<&[Image]> {
        self.invalidate();
        self.window().await
    }

    /// Takes the last fetched window, leaving the cache invalid.
    pub fn into_window(self) -> Option<Vec<Image>> {
        self.window
    }

    /// Returns `true` when any image in the window has no assigned key.
    ///
    /// # Errors
    ///
    /// Propagates catalog errors.
    pub async fn needs_bake(&mut self) -> Result<bool> {
        Ok(needs_bake(self.window().await?))
    }

    /// Writes keys `1..=N` in current display order, then re-fetches.
    ///
    /// # Errors
    ///
    /// Stops at the first failed write and propagates it. Keys written
    /// before the failure stay written.
    pub async fn bake(&mut self) -> Result<()> {
        let order: Vec<String> = self
            .window()
            .await?
            .iter()
            .map(|image| image.identity().to_string())
            .collect();

        tracing::debug!(album = %self.album_id, count = order.len(), "baking order keys");
        for (index, image_id) in order.iter().enumerate() {
            self.write(image_id, OrderKey::from_position(index)).await?;
        }

        self.refresh().await?;
        Ok(())
    }

    /// Moves `identity` one slot towards the front.
    ///
    /// # Errors
    ///
    /// - [`Error::OrderingBoundary`] when the image is already first; no write is issued
    /// - [`Error::NotFound`] when the image is not part of the album
    /// - catalog errors from the write-throughs
    pub async fn move_up(&mut self, identity: &str) -> Result<()> {
        self.shift(identity, Direction::Up).await
    }

    /// Moves `identity` one slot towards the back.
    ///
    /// # Errors
    ///
    /// - [`Error::OrderingBoundary`] when the image is already last; no write is issued
    /// - [`Error::NotFound`] when the image is not part of the album
    /// - catalog errors from the write-throughs
    pub async fn move_down(&mut self, identity: &str) -> Result<()> {
        self.shift(identity, Direction::Down).await
    }

    async fn shift(&mut self, identity: &str, direction: Direction) -> Result<()> {
        if self.needs_bake().await? {
            self.bake().await?;
        }

        let window = self.window().await?;
        let index = window
            .iter()
            .position(|image| image.identity() == identity)
            .ok_or_else(|| Error::NotFound(format!("image {identity} is not in this album")))?;

        let neighbour_index = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|next| *next < window.len()),
        }
        .ok_or(Error::OrderingBoundary(direction))?;

        let mover_key = window[index].order_key();
        let neighbour = &window[neighbour_index];
        let neighbour_id = neighbour.identity().to_string();
        let neighbour_key = neighbour.order_key();

        tracing::debug!(
            album = %self.album_id,
            image = identity,
            neighbour = %neighbour_id,
            ?direction,
            "swapping order keys"
        );
        self.write(identity, neighbour_key).await?;
        self.write(&neighbour_id, mover_key).await?;

        self.refresh().await?;
        Ok(())
    }

    async fn write(&mut self, image_id: &str, key: OrderKey) -> Result<()> {
        self.invalidate();
        tracing::debug!(album = %self.album_id, image = image_id, %key, "set order");
        self.api.set_order(&self.album_id, image_id, key).await?;
        Ok(())
    }

    fn invalidate(&mut self) {
        self.window = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryCatalog;

    fn keys(window: &[Image]) -> Vec<(String, u32)> {
        window
            .iter()
            .map(|image| (image.id.clone(), image.order_key.value()))
            .collect()
    }

    #[tokio::test]
    async fn bake_assigns_sequential_keys_in_display_order() {
        let catalog = InMemoryCatalog::new();
        let album = catalog.seed_album("album").await;
        for name in ["c.png", "a.png", "b.png"] {
            catalog.seed_image(&album, name, OrderKey::UNASSIGNED).await;
        }

        let mut engine = OrderEngine::new(&catalog, &album);
        let before: Vec<String> = engine.window().await.unwrap().iter().map(|i| i.id.clone()).collect();
        assert!(engine.needs_bake().await.unwrap());

        engine.bake().await.unwrap();

        let after = keys(engine.window().await.unwrap());
        let expected: Vec<(String, u32)> = before
            .into_iter()
            .enumerate()
            .map(|(i, id)| (id, i as u32 + 1))
            .collect();
        assert_eq!(after, expected);
        assert!(!engine.needs_bake().await.unwrap());
    }

    #[tokio::test]
    async fn move_down_on_last_is_boundary_without_writes() {
        let catalog = InMemoryCatalog::new();
        let album = catalog.seed_album("album").await;
        catalog.seed_image(&album, "a.png", OrderKey::new(1)).await;
        let last = catalog.seed_image(&album, "b.png", OrderKey::new(2)).await;

        let mut engine = OrderEngine::new(&catalog, &album);
        let err = engine.move_down(&last).await.unwrap_err();

        assert_eq!(err, Error::OrderingBoundary(Direction::Down));
        assert!(catalog.order_writes().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_image_is_not_found() {
        let catalog = InMemoryCatalog::new();
        let album = catalog.seed_album("album").await;
        catalog.seed_image(&album, "a.png", OrderKey::new(1)).await;

        let mut engine = OrderEngine::new(&catalog, &album);
        assert!(engine.move_up("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn swap_writes_mover_first() {
        let catalog = InMemoryCatalog::new();
        let album = catalog.seed_album("album").await;
        let a = catalog.seed_image(&album, "a.png", OrderKey::new(10)).await;
        let b = catalog.seed_image(&album, "b.png", OrderKey::new(20)).await;

        let mut engine = OrderEngine::new(&catalog, &album);
        engine.move_down(&a).await.unwrap();

        let writes = catalog.order_writes().await;
        assert_eq!(
            writes,
            vec![(a.clone(), OrderKey::new(20)), (b.clone(), OrderKey::new(10))]
        );
        assert_eq!(keys(engine.window().await.unwrap()), vec![(b, 10), (a, 20)]);
    }

    #[tokio::test]
    async fn seeded_window_is_dropped_after_write() {
        let catalog = InMemoryCatalog::new();
        let album = catalog.seed_album("album").await;
        let a = catalog.seed_image(&album, "a.png", OrderKey::new(1)).await;
        let b = catalog.seed_image(&album, "b.png", OrderKey::new(2)).await;
        let stale = catalog.list_items(&album).await.unwrap();

        let mut engine = OrderEngine::with_window(&catalog, &album, stale);
        engine.move_up(&b).await.unwrap();

        let window = engine.into_window().expect("window re-fetched after move");
        assert_eq!(window[0].id, b);
        assert_eq!(window[1].id, a);
    }
}
