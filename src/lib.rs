// src/lib.rs
//! feishu-backup library: backs up Feishu drive documents, spreadsheets,
//! wiki spaces and calendar events as Markdown and iCalendar files.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ApiErrorCode`, `ValidationError`
//! - **Configuration**: `BackupConfig`, `CommandLineInput`
//! - **Domain model**: legacy doc blocks, docx blocks, drive items, sheets,
//!   wiki nodes and calendar events
//! - **API client**: `OfficeSource`, `FeishuHttpClient`, `AuthorizedClient`,
//!   `Authenticator`
//! - **Formatting**: `RenderBlock`, `RenderContext`, the `compose_*` functions
//! - **Crawling**: `Crawler`, `TokenFilter`, `BackupMode`, `ExportSummary`

pub mod analytics;
pub mod api;
pub mod callback;
pub mod config;
pub mod constants;
pub mod crawl;
pub mod error;
pub mod error_recovery;
pub mod formatting;
pub mod logging;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod types;

// --- Error Handling ---
pub use crate::error::{ApiErrorCode, AppError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{BackupConfig, CommandLineInput};

// --- Domain Model ---
pub use crate::model::{
    Calendar, CalendarEvent, DocBlock, DocxBlock, DriveItem, DriveItemKind, EventRecord,
    EventStatus, EventTime, FolderChildren, LegacyDocument, WikiNode, WikiSpace,
};

// --- Domain Types ---
pub use crate::types::{
    AppCredentials, AppTokens, CalendarId, DocumentToken, FolderToken, ImageToken, Session,
    SheetId, SheetRef, SpaceId, SpreadsheetToken,
};

// --- API Client ---
pub use crate::api::{Authenticator, AuthorizedClient, FeishuHttpClient, OfficeSource, Page};

// --- Formatting ---
pub use crate::formatting::{
    compose_docx_markdown, compose_legacy_markdown, compose_spreadsheet_markdown, ImageTokens,
    RenderBlock, RenderContext, RenderedDocument, SheetResolver,
};

// --- Crawling ---
pub use crate::analytics::ExportSummary;
pub use crate::crawl::{BackupMode, Crawler, TokenFilter};
pub use crate::output::{BackupPath, BackupWriter};
