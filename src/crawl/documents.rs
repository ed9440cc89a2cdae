//! Fetch-and-render of single documents and spreadsheets.

use super::Crawler;
use crate::error::AppError;
use crate::formatting::{
    compose_docx_markdown, compose_legacy_markdown, compose_spreadsheet_markdown,
    gather_sheet_refs, RenderedDocument,
};
use crate::model::CellValue;
use crate::output::BackupPath;
use crate::types::{DocumentToken, SheetRef, SpreadsheetToken};
use std::collections::HashMap;

impl Crawler {
    /// Fetches a legacy document and its embedded sheets, then renders it.
    pub(super) async fn convert_legacy_doc(
        &self,
        document: &DocumentToken,
    ) -> Result<RenderedDocument, AppError> {
        let content = self.source.legacy_document(document).await?;

        let mut sheets: HashMap<SheetRef, Vec<Vec<CellValue>>> = HashMap::new();
        for sheet in gather_sheet_refs(&content) {
            let grid = self
                .source
                .sheet_values(&sheet.spreadsheet, &sheet.sheet)
                .await?;
            sheets.insert(sheet, grid);
        }

        compose_legacy_markdown(&content, &sheets)
    }

    pub(super) async fn convert_docx(
        &self,
        document: &DocumentToken,
    ) -> Result<RenderedDocument, AppError> {
        let blocks = self.source.docx_blocks(document).await?;
        compose_docx_markdown(&blocks)
    }

    pub(super) async fn convert_spreadsheet(
        &self,
        spreadsheet: &SpreadsheetToken,
    ) -> Result<String, AppError> {
        let meta = self.source.spreadsheet_meta(spreadsheet).await?;

        let mut sheets = Vec::with_capacity(meta.sheets.len());
        for sheet in meta.sheets {
            let grid = self.source.sheet_values(spreadsheet, &sheet.sheet_id).await?;
            sheets.push((sheet, grid));
        }

        Ok(compose_spreadsheet_markdown(&sheets))
    }

    /// Writes a rendered document, then the images it references.
    pub(super) async fn store_document(
        &mut self,
        dir: &BackupPath,
        file_name: &str,
        rendered: &RenderedDocument,
    ) -> Result<(), AppError> {
        self.writer.write_text(dir, file_name, &rendered.markdown)?;
        if let Some(title) = &rendered.title {
            log::debug!("Saved '{}' as {}{}", title, dir, file_name);
        }
        self.save_images(dir, &rendered.images).await
    }
}
