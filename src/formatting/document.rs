// src/formatting/document.rs
//! Whole-document composition for both schemas.

use super::block_renderer::{
    render_blocks, ImageTokens, RenderBlock, RenderContext, SheetResolver,
};
use crate::error::AppError;
use crate::model::{DocBlock, DocxBlock, LegacyDocument};

/// A document rendered to Markdown, with the images it references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedDocument {
    pub markdown: String,
    /// Title found in the content itself, if any
    pub title: Option<String>,
    pub images: ImageTokens,
}

/// Composes a legacy document: `# ` + each title element, a newline, then
/// every body block followed by a newline.
pub fn compose_legacy_markdown(
    document: &LegacyDocument,
    sheets: &dyn SheetResolver,
) -> Result<RenderedDocument, AppError> {
    let ctx = RenderContext::with_sheets(sheets);
    let mut images = ImageTokens::new();

    let mut markdown = String::new();
    for element in &document.title.elements {
        markdown.push_str("# ");
        markdown.push_str(&element.render(&mut images, &ctx)?);
    }
    markdown.push('\n');
    markdown.push_str(&render_blocks(&document.body.blocks, "\n", &mut images, &ctx)?);

    log::debug!(
        "Rendered legacy document: {} blocks, {} bytes, {} images",
        document.body.blocks.len(),
        markdown.len(),
        images.len()
    );

    Ok(RenderedDocument {
        markdown,
        title: legacy_title(document),
        images,
    })
}

/// Composes a docx document by rendering its blocks in order.
pub fn compose_docx_markdown(blocks: &[DocxBlock]) -> Result<RenderedDocument, AppError> {
    let mut images = ImageTokens::new();
    let markdown = render_blocks(blocks, "", &mut images, &RenderContext::default())?;

    log::debug!(
        "Rendered docx document: {} blocks, {} bytes, {} images",
        blocks.len(),
        markdown.len(),
        images.len()
    );

    Ok(RenderedDocument {
        markdown,
        title: docx_title(blocks),
        images,
    })
}

/// The title text, else the text of the first heading paragraph.
fn legacy_title(document: &LegacyDocument) -> Option<String> {
    let title: String = document.title.elements.iter().map(plain_text).collect();
    non_empty(title).or_else(|| {
        document.body.blocks.iter().find_map(|block| match block {
            DocBlock::Paragraph(paragraph)
                if paragraph
                    .style
                    .as_ref()
                    .is_some_and(|style| style.heading_level.is_some()) =>
            {
                non_empty(plain_text(block))
            }
            _ => None,
        })
    })
}

/// The page block's text, else the text of the first heading.
fn docx_title(blocks: &[DocxBlock]) -> Option<String> {
    let page = blocks.iter().find_map(|block| match block {
        DocxBlock::Page(content) => non_empty(content.text()),
        _ => None,
    });
    page.or_else(|| {
        blocks.iter().find_map(|block| match block {
            DocxBlock::Heading { content, .. } => non_empty(content.text()),
            _ => None,
        })
    })
}

/// Run text of a block and its descendants, without any decoration.
fn plain_text(block: &DocBlock) -> String {
    match block {
        DocBlock::TextRun(run) => run.text.clone(),
        _ => block.children().map(plain_text).collect(),
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
