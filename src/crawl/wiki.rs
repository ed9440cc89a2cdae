//! Knowledge-base export: every space, every node.

use super::Crawler;
use crate::analytics::SkipReason;
use crate::constants::WIKI_ROOT_DIR;
use crate::error::AppError;
use crate::model::WikiNode;
use crate::output::{markdown_file_name, BackupPath};

impl Crawler {
    /// Exports all document nodes into `知识库/<space>/<title>.md`.
    pub(super) async fn crawl_wiki(&mut self) -> Result<(), AppError> {
        let spaces = self.source.wiki_spaces().await?;
        log::info!("Found {} wiki space(s)", spaces.len());

        for space in spaces {
            log::info!("Found wiki space {}", space.name);
            self.summary.wiki_spaces += 1;

            let dir = BackupPath::root().join(WIKI_ROOT_DIR).join(&space.name);
            let nodes = self.source.wiki_nodes(&space.space_id).await?;
            for node in &nodes {
                self.export_node(&dir, node).await?;
            }
        }
        Ok(())
    }

    async fn export_node(&mut self, dir: &BackupPath, node: &WikiNode) -> Result<(), AppError> {
        if !self.filter.allows(&node.obj_token) {
            log::info!(
                "Skipping {}/{}: token {} not matching",
                dir,
                node.title,
                node.obj_token
            );
            self.summary.record_skip(SkipReason::Filtered);
            return Ok(());
        }

        let rendered = match node.obj_type.as_str() {
            "doc" => self.convert_legacy_doc(&node.document_token()).await?,
            "docx" => self.convert_docx(&node.document_token()).await?,
            other => {
                log::warn!("Unsupported wiki node type {} for {}", other, node.title);
                self.summary.record_skip(SkipReason::Unsupported);
                return Ok(());
            }
        };

        // Untitled nodes fall back to the title found in the content.
        let name = [Some(node.title.trim()), rendered.title.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .unwrap_or(node.obj_token.as_str());
        let file_name = markdown_file_name(name);

        log::info!("Downloading {}/{}", dir, file_name);
        self.store_document(dir, &file_name, &rendered).await?;
        match node.obj_type.as_str() {
            "doc" => self.summary.legacy_documents += 1,
            _ => self.summary.docx_documents += 1,
        }
        Ok(())
    }
}
