//! Rendering of legacy document blocks.

use super::block_renderer::{image_link, ImageTokens, RenderBlock, RenderContext};
use super::table::{render_markdown_table, render_value_grid};
use crate::error::AppError;
use crate::model::doc::{DocTable, Gallery, SheetBlock};
use crate::model::{DocBlock, ListStyle, Paragraph};

impl RenderBlock for DocBlock {
    fn render(&self, images: &mut ImageTokens, ctx: &RenderContext) -> Result<String, AppError> {
        match self {
            DocBlock::Paragraph(paragraph) => render_paragraph(paragraph, images, ctx),
            DocBlock::TextRun(run) => Ok(run.text.clone()),
            DocBlock::Gallery(gallery) => Ok(render_gallery(gallery, images)),
            DocBlock::Table(table) => render_table(table, images, ctx),
            DocBlock::Sheet(sheet) => Ok(render_sheet(sheet, ctx)),
            DocBlock::Unsupported(block) => {
                log::warn!("Unhandled block type {}: {}", block.kind, block.raw);
                Ok(String::new())
            }
        }
    }
}

fn render_paragraph(
    paragraph: &Paragraph,
    images: &mut ImageTokens,
    ctx: &RenderContext,
) -> Result<String, AppError> {
    let inner = ctx.nested()?;
    let mut text = String::new();
    for element in &paragraph.elements {
        text.push_str(&element.render(images, &inner)?);
    }

    let Some(style) = &paragraph.style else {
        return Ok(text);
    };

    if let Some(list) = &style.list {
        text = match list {
            ListStyle::CheckBox => format!("- [ ] {}", text),
            ListStyle::CheckedBox => format!("- [x] {}", text),
            ListStyle::Number { number } => format!("{}. {}", number, text),
            ListStyle::Bullet => format!("- {}", text),
            ListStyle::Other => text,
        };
    }
    if let Some(level) = style.heading_level {
        text = format!("{} {}", "#".repeat(usize::from(level) + 1), text);
    }
    Ok(text)
}

fn render_gallery(gallery: &Gallery, images: &mut ImageTokens) -> String {
    gallery
        .image_list
        .iter()
        .map(|image| {
            images.push(image.file_token.clone());
            image_link(&image.file_token)
        })
        .collect()
}

/// Each cell body is rendered and flattened into a single string.
fn render_table(
    table: &DocTable,
    images: &mut ImageTokens,
    ctx: &RenderContext,
) -> Result<String, AppError> {
    let inner = ctx.nested()?;
    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut cells = Vec::with_capacity(row.cells.len());
        for cell in &row.cells {
            let mut content = String::new();
            for block in &cell.body.blocks {
                content.push_str(&block.render(images, &inner)?);
            }
            cells.push(content);
        }
        rows.push(cells);
    }
    Ok(render_markdown_table(&rows))
}

fn render_sheet(sheet: &SheetBlock, ctx: &RenderContext) -> String {
    match ctx.sheets.and_then(|sheets| sheets.find_sheet(&sheet.sheet)) {
        Some(grid) => render_value_grid(grid),
        None => {
            log::warn!("Embedded sheet {} was not fetched", sheet.sheet);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use crate::types::SheetRef;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    fn block(value: serde_json::Value) -> DocBlock {
        serde_json::from_value(value).unwrap()
    }

    fn paragraph(text: &str, style: serde_json::Value) -> DocBlock {
        block(json!({
            "type": "paragraph",
            "paragraph": {
                "elements": [{"type": "textRun", "textRun": {"text": text}}],
                "style": style
            }
        }))
    }

    fn render(block: &DocBlock) -> String {
        block
            .render(&mut ImageTokens::new(), &RenderContext::default())
            .unwrap()
    }

    #[test]
    fn heading_depth_is_level_plus_one() {
        for level in 0..=8u8 {
            let rendered = render(&paragraph("T", json!({"headingLevel": level})));
            let expected = format!("{} T", "#".repeat(usize::from(level) + 1));
            assert_eq!(rendered, expected);
        }
    }

    #[test]
    fn list_marker_is_wrapped_by_heading() {
        let rendered = render(&paragraph(
            "X",
            json!({"headingLevel": 0, "list": {"type": "bullet"}}),
        ));
        assert_eq!(rendered, "# - X");
    }

    #[test]
    fn list_markers() {
        let cases = [
            (json!({"type": "checkBox"}), "- [ ] X"),
            (json!({"type": "checkedBox"}), "- [x] X"),
            (json!({"type": "number", "number": 7}), "7. X"),
            (json!({"type": "bullet"}), "- X"),
            (json!({"type": "code"}), "X"),
        ];
        for (list, expected) in cases {
            assert_eq!(render(&paragraph("X", json!({"list": list}))), expected);
        }
    }

    #[test]
    fn gallery_collects_tokens_in_order() {
        let gallery = block(json!({
            "type": "gallery",
            "gallery": {"imageList": [{"fileToken": "img1"}, {"fileToken": "img2"}]}
        }));
        let mut images = ImageTokens::new();
        let text = gallery
            .render(&mut images, &RenderContext::default())
            .unwrap();
        assert_eq!(text, "![](img1.png)![](img2.png)");
        let tokens: Vec<_> = images.iter().map(|t| t.as_str()).collect();
        assert_eq!(tokens, ["img1", "img2"]);
    }

    #[test]
    fn table_cells_are_flattened() {
        let table = block(json!({
            "type": "table",
            "table": {"tableRows": [
                {"tableCells": [
                    {"body": {"blocks": [
                        {"type": "paragraph", "paragraph": {"elements": [
                            {"type": "textRun", "textRun": {"text": "a"}},
                            {"type": "textRun", "textRun": {"text": "b"}}
                        ]}}
                    ]}},
                    {"body": {"blocks": null}}
                ]},
                {"tableCells": [
                    {"body": {"blocks": [{"type": "textRun", "textRun": {"text": "1"}}]}},
                    {"body": {"blocks": [{"type": "textRun", "textRun": {"text": "2"}}]}}
                ]}
            ]}
        }));
        insta::assert_snapshot!(render(&table), @r"
        | ab |  |
        |-|-|
        | 1 | 2 |
        ");
    }

    #[test]
    fn embedded_sheet_uses_prefetched_grid() {
        let sheet_ref = SheetRef::parse("shtcnA_s1").unwrap();
        let mut sheets = HashMap::new();
        sheets.insert(
            sheet_ref,
            vec![vec![CellValue::from("h")], vec![CellValue::from("v")]],
        );
        let ctx = RenderContext::with_sheets(&sheets);
        let sheet = block(json!({"type": "sheet", "sheet": {"token": "shtcnA_s1"}}));

        let text = sheet.render(&mut ImageTokens::new(), &ctx).unwrap();
        assert_eq!(text, "| h |\n|-|\n| v |\n");
    }

    #[test]
    fn missing_sheet_renders_empty() {
        let sheet = block(json!({"type": "sheet", "sheet": {"token": "shtcnA_s1"}}));
        assert_eq!(render(&sheet), "");
    }

    #[test]
    fn unsupported_blocks_render_empty() {
        assert_eq!(render(&block(json!({"type": "diagram", "diagram": {}}))), "");
    }
}
