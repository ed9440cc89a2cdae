// src/formatting/block_renderer.rs
//! Block rendering engine: the contract shared by both document schemas.
//!
//! Every block kind renders to a text fragment and may append image tokens
//! to a shared accumulator. Rendering is synchronous; anything that needs
//! the network (embedded sheets) is fetched beforehand and looked up through
//! a [`SheetResolver`].

use crate::constants::{BLOCK_MAX_RENDER_DEPTH, CHARS_PER_BLOCK_ESTIMATE};
use crate::error::AppError;
use crate::model::CellValue;
use crate::types::{ImageToken, SheetRef};
use std::collections::HashMap;

// --- Core Types ---

/// Something that can resolve an embedded sheet to its value grid.
pub trait SheetResolver {
    fn find_sheet(&self, sheet: &SheetRef) -> Option<&[Vec<CellValue>]>;
}

impl SheetResolver for HashMap<SheetRef, Vec<Vec<CellValue>>> {
    fn find_sheet(&self, sheet: &SheetRef) -> Option<&[Vec<CellValue>]> {
        self.get(sheet).map(Vec::as_slice)
    }
}

/// Context passed through the recursive rendering.
#[derive(Clone, Copy, Default)]
pub struct RenderContext<'a> {
    /// Pre-fetched grids of embedded sheets
    pub sheets: Option<&'a dyn SheetResolver>,
    depth: usize,
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("sheets", &self.sheets.is_some())
            .field("depth", &self.depth)
            .finish()
    }
}

impl<'a> RenderContext<'a> {
    pub fn with_sheets(sheets: &'a dyn SheetResolver) -> Self {
        Self {
            sheets: Some(sheets),
            depth: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The context for rendering the children of the current block.
    pub fn nested(&self) -> Result<Self, AppError> {
        if self.depth >= BLOCK_MAX_RENDER_DEPTH {
            return Err(AppError::RecursionLimitExceeded(BLOCK_MAX_RENDER_DEPTH));
        }
        Ok(Self {
            sheets: self.sheets,
            depth: self.depth + 1,
        })
    }
}

/// Image tokens met while rendering, in encounter order, each kept once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageTokens(Vec<ImageToken>);

impl ImageTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: ImageToken) {
        if !self.0.contains(&token) {
            self.0.push(token);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageToken> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ImageTokens {
    type Item = &'a ImageToken;
    type IntoIter = std::slice::Iter<'a, ImageToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A block that renders to Markdown.
pub trait RenderBlock {
    fn render(&self, images: &mut ImageTokens, ctx: &RenderContext) -> Result<String, AppError>;
}

// --- Public API ---

/// Renders blocks one after another, appending `separator` after each.
pub fn render_blocks<B: RenderBlock>(
    blocks: &[B],
    separator: &str,
    images: &mut ImageTokens,
    ctx: &RenderContext,
) -> Result<String, AppError> {
    let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    for block in blocks {
        output.push_str(&block.render(images, ctx)?);
        output.push_str(separator);
    }
    Ok(output)
}

/// Markdown reference to a downloaded image.
pub(crate) fn image_link(token: &ImageToken) -> String {
    format!(
        "![]({}.{})",
        token.as_str(),
        crate::constants::IMAGE_EXTENSION
    )
}
