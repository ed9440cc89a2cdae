// src/api/mod.rs
//! Open platform access: the ability to read a user's office content.
//!
//! Crawlers depend on the [`OfficeSource`] trait, never on HTTP details.

pub mod auth;
pub mod client;
mod pagination;
pub mod responses;

use crate::error::AppError;
use crate::model::{
    Calendar, CellValue, DocxBlock, EventRecord, FolderChildren, LegacyDocument, SpreadsheetMeta,
    WikiNode, WikiSpace,
};
use crate::types::{
    CalendarId, DocumentToken, FolderToken, ImageToken, SheetId, SpaceId, SpreadsheetToken,
};

pub use auth::Authenticator;
pub use client::{AuthorizedClient, FeishuHttpClient};
pub use responses::Page;

/// Read access to the drive, wiki and calendar of one user.
#[async_trait::async_trait]
pub trait OfficeSource: Send + Sync {
    async fn root_folder(&self) -> Result<FolderToken, AppError>;
    async fn folder_children(&self, folder: &FolderToken) -> Result<FolderChildren, AppError>;
    async fn legacy_document(&self, document: &DocumentToken) -> Result<LegacyDocument, AppError>;
    /// All blocks of a docx document, in document order.
    async fn docx_blocks(&self, document: &DocumentToken) -> Result<Vec<DocxBlock>, AppError>;
    async fn spreadsheet_meta(
        &self,
        spreadsheet: &SpreadsheetToken,
    ) -> Result<SpreadsheetMeta, AppError>;
    /// The value grid of one sheet, dates rendered as shown in the UI.
    async fn sheet_values(
        &self,
        spreadsheet: &SpreadsheetToken,
        sheet: &SheetId,
    ) -> Result<Vec<Vec<CellValue>>, AppError>;
    async fn wiki_spaces(&self) -> Result<Vec<WikiSpace>, AppError>;
    async fn wiki_nodes(&self, space: &SpaceId) -> Result<Vec<WikiNode>, AppError>;
    async fn download_media(&self, image: &ImageToken) -> Result<Vec<u8>, AppError>;
    async fn calendars(&self) -> Result<Vec<Calendar>, AppError>;
    /// One page of a calendar's events; pass the previous page's token to continue.
    async fn events_page(
        &self,
        calendar: &CalendarId,
        page_token: Option<&str>,
    ) -> Result<Page<EventRecord>, AppError>;
}
