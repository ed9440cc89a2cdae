// src/crawl/drive.rs
//! Recursive walk of the drive folder tree.

use super::Crawler;
use crate::analytics::SkipReason;
use crate::error::AppError;
use crate::model::{DriveItem, DriveItemKind};
use crate::output::{markdown_file_name, BackupPath};
use crate::types::FolderToken;
use futures::future::{BoxFuture, FutureExt};

impl Crawler {
    /// Walks the drive from the user's root folder.
    pub(super) async fn crawl_drive(&mut self) -> Result<(), AppError> {
        let root = self.source.root_folder().await?;
        log::info!("Found root folder {}", root);
        self.list_folder(BackupPath::root(), root).await
    }

    /// Exports every leaf below `folder` into `dir`, depth first.
    ///
    /// The children endpoint returns the whole folder in one response.
    fn list_folder(
        &mut self,
        dir: BackupPath,
        folder: FolderToken,
    ) -> BoxFuture<'_, Result<(), AppError>> {
        async move {
            self.summary.folders_visited += 1;
            let children = self.source.folder_children(&folder).await?;
            log::debug!("Folder {} has {} item(s)", dir, children.children.len());

            for (token, item) in children.children {
                if item.kind == DriveItemKind::Folder {
                    self.list_folder(dir.join(&item.name), item.folder_token())
                        .await?;
                } else {
                    self.export_leaf(&dir, &token, &item).await?;
                }
            }
            Ok(())
        }
        .boxed()
    }

    async fn export_leaf(
        &mut self,
        dir: &BackupPath,
        token: &str,
        item: &DriveItem,
    ) -> Result<(), AppError> {
        let file_name = markdown_file_name(&item.name);

        if !self.filter.allows(token) {
            log::info!("Skipping {}/{}: token {} not matching", dir, file_name, token);
            self.summary.record_skip(SkipReason::Filtered);
            return Ok(());
        }

        match &item.kind {
            DriveItemKind::Doc => {
                log::info!("Downloading {}/{}", dir, file_name);
                let rendered = self.convert_legacy_doc(&item.document_token()).await?;
                self.store_document(dir, &file_name, &rendered).await?;
                self.summary.legacy_documents += 1;
            }
            DriveItemKind::Docx => {
                log::info!("Downloading {}/{}", dir, file_name);
                let rendered = self.convert_docx(&item.document_token()).await?;
                self.store_document(dir, &file_name, &rendered).await?;
                self.summary.docx_documents += 1;
            }
            DriveItemKind::Sheet => {
                log::info!("Downloading {}/{}", dir, file_name);
                let markdown = self.convert_spreadsheet(&item.spreadsheet_token()).await?;
                self.writer.write_text(dir, &file_name, &markdown)?;
                self.summary.spreadsheets += 1;
            }
            DriveItemKind::Folder | DriveItemKind::Other(_) => {
                log::warn!("Unsupported type {} for {}/{}", item.kind, dir, file_name);
                self.summary.record_skip(SkipReason::Unsupported);
            }
        }
        Ok(())
    }
}
