// SPDX-License-Identifier: MPL-2.0
//! Two-phase image creation.

use crate::application::port::{CatalogApi, Upload};
use crate::domain::Image;
use crate::error::Result;

/// Creates an image slot in `album_id` and uploads `upload` into it.
///
/// When the upload fails, the freshly created slot is deleted before the
/// upload error is returned, so no empty image is left behind. A failure of
/// that delete is logged and does not replace the upload error.
///
/// # Errors
///
/// Returns the error of `create_item` or, after compensation, of `upload_content`.
pub async fn upload_new_item(api: &dyn CatalogApi, album_id: &str, upload: Upload) -> Result<Image> {
    let created = api.create_item(album_id).await?;
    tracing::debug!(album = album_id, image = %created.id, file = %upload.filename, "created image slot");

    match api.upload_content(album_id, &created.id, upload).await {
        Ok(image) => Ok(image),
        Err(upload_err) => {
            tracing::info!(album = album_id, image = %created.id, error = %upload_err, "upload failed, removing empty slot");
            if let Err(delete_err) = api.delete_item(album_id, &created.id).await {
                tracing::warn!(
                    album = album_id,
                    image = %created.id,
                    error = %delete_err,
                    "failed to remove empty image slot"
                );
            }
            Err(upload_err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::memory::{InMemoryCatalog, Operation};

    #[tokio::test]
    async fn successful_upload_keeps_item() {
        let catalog = InMemoryCatalog::new();
        let album = catalog.seed_album("album").await;

        let image = upload_new_item(&catalog, &album, Upload::new("cat.png", vec![1, 2, 3]))
            .await
            .unwrap();

        assert!(image.uploaded);
        assert_eq!(image.original_filename.as_deref(), Some("cat.png"));
        assert_eq!(catalog.list_items(&album).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_failure_skips_upload() {
        let catalog = InMemoryCatalog::new();
        let err = upload_new_item(&catalog, "missing", Upload::new("x.png", vec![0]))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn failed_delete_still_reports_upload_error() {
        let catalog = InMemoryCatalog::new();
        let album = catalog.seed_album("album").await;
        catalog
            .fail_next(Operation::UploadContent, Error::Transport("connection reset".into()))
            .await;
        catalog
            .fail_next(Operation::DeleteItem, Error::Transport("gone away".into()))
            .await;

        let err = upload_new_item(&catalog, &album, Upload::new("x.png", vec![0]))
            .await
            .unwrap_err();

        assert_eq!(err, Error::Transport("connection reset".into()));
        assert_eq!(catalog.call_count(Operation::DeleteItem).await, 1);
    }
}
