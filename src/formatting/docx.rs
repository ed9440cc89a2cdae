//! Rendering of docx blocks.

use super::block_renderer::{image_link, ImageTokens, RenderBlock, RenderContext};
use crate::error::AppError;
use crate::model::{DocxBlock, TextElements};

impl TextElements {
    /// Concatenated content of all text runs; other elements are skipped.
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|element| element.text_run.as_ref())
            .map(|run| run.content.as_str())
            .collect()
    }
}

impl RenderBlock for DocxBlock {
    fn render(&self, images: &mut ImageTokens, _ctx: &RenderContext) -> Result<String, AppError> {
        let text = match self {
            DocxBlock::Page(content) => format!("# {}\n", content.text()),
            DocxBlock::Text(content) => format!("{}\n", content.text()),
            DocxBlock::Heading { level, content } => {
                format!("{} {}\n", "#".repeat(usize::from(*level)), content.text())
            }
            DocxBlock::Bullet(content) => format!("- {}\n", content.text()),
            DocxBlock::Ordered(content) => format!("1. {}\n", content.text()),
            DocxBlock::Code(content) => format!("```\n{}\n```\n", content.text()),
            DocxBlock::Image(image) => {
                images.push(image.token.clone());
                format!("{}\n", image_link(&image.token))
            }
            DocxBlock::Unsupported { block_type } => {
                log::warn!("Unhandled block type {}", block_type);
                String::new()
            }
        };
        Ok(text)
    }
}
