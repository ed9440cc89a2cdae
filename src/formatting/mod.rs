// src/formatting/mod.rs
//! Renders documents, spreadsheets and events into Markdown and iCalendar.

pub mod block_renderer;
pub mod calendar;
mod doc;
mod docx;
pub mod document;
pub mod sheet;
pub mod table;

pub use self::block_renderer::{ImageTokens, RenderBlock, RenderContext, SheetResolver};
pub use self::document::{compose_docx_markdown, compose_legacy_markdown, RenderedDocument};
pub use self::sheet::compose_spreadsheet_markdown;

use crate::model::{DocBlock, LegacyDocument};
use crate::types::SheetRef;

/// Gathers every embedded sheet of a legacy document, first occurrence first.
pub fn gather_sheet_refs(document: &LegacyDocument) -> Vec<SheetRef> {
    let mut refs = Vec::new();
    for block in document
        .title
        .elements
        .iter()
        .chain(document.body.blocks.iter())
    {
        collect_sheet_refs(block, &mut refs);
    }
    log::debug!("Gathered {} embedded sheets", refs.len());
    refs
}

fn collect_sheet_refs(block: &DocBlock, refs: &mut Vec<SheetRef>) {
    if let DocBlock::Sheet(sheet) = block {
        if !refs.contains(&sheet.sheet) {
            refs.push(sheet.sheet.clone());
        }
    }

    for child in block.children() {
        collect_sheet_refs(child, refs);
    }
}
