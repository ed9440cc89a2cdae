//! Image materialization next to the documents that reference them.

use super::Crawler;
use crate::constants::IMAGE_EXTENSION;
use crate::error::AppError;
use crate::formatting::ImageTokens;
use crate::output::{sanitize_segment, BackupPath};

impl Crawler {
    /// Downloads every image into `dir` as `<token>.png`.
    ///
    /// An image whose file already exists is not requested again.
    pub(super) async fn save_images(
        &mut self,
        dir: &BackupPath,
        images: &ImageTokens,
    ) -> Result<(), AppError> {
        for token in images {
            let file_name = format!(
                "{}.{}",
                sanitize_segment(token.as_str()),
                IMAGE_EXTENSION
            );
            if self.writer.exists(dir, &file_name) {
                log::debug!("Image {} already present", token);
                self.summary.images_already_present += 1;
                continue;
            }

            log::info!("Downloading image {}", token);
            let bytes = self.source.download_media(token).await?;
            self.writer.write_bytes(dir, &file_name, &bytes)?;
            self.summary.images_downloaded += 1;
        }
        Ok(())
    }
}
