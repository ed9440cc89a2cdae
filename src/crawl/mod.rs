// src/crawl/mod.rs
//! Crawls the drive, the wiki and the calendar, writing every supported item.
//!
//! The crawl is strictly sequential. Per-item conditions (filtered token,
//! unsupported kind, image already on disk) are counted and skipped; any
//! `Err` aborts the whole crawl.

mod calendar;
mod documents;
mod drive;
mod images;
mod wiki;

use crate::analytics::ExportSummary;
use crate::api::OfficeSource;
use crate::constants::MAX_PAGES_PER_LISTING;
use crate::error::AppError;
use crate::output::BackupWriter;
use std::collections::HashSet;
use std::sync::Arc;

/// Which leaf items to export, by token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFilter {
    only: Option<HashSet<String>>,
}

impl TokenFilter {
    /// Exports everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Exports only leaves whose token is listed.
    pub fn only<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: Some(tokens.into_iter().map(Into::into).collect()),
        }
    }

    pub fn allows(&self, token: &str) -> bool {
        self.only
            .as_ref()
            .map_or(true, |tokens| tokens.contains(token))
    }

    pub fn is_restricted(&self) -> bool {
        self.only.is_some()
    }
}

/// What a crawl walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupMode {
    /// Drive folders, then wiki spaces
    Documents,
    Calendar,
}

/// One backup run over one user's content.
pub struct Crawler {
    source: Arc<dyn OfficeSource>,
    writer: BackupWriter,
    filter: TokenFilter,
    summary: ExportSummary,
    max_event_pages: u32,
}

impl Crawler {
    pub fn new(source: Arc<dyn OfficeSource>, writer: BackupWriter, filter: TokenFilter) -> Self {
        Self {
            source,
            writer,
            filter,
            summary: ExportSummary::new(),
            max_event_pages: MAX_PAGES_PER_LISTING,
        }
    }

    /// Caps how many event pages are read per calendar.
    pub fn with_event_page_limit(mut self, max_pages: u32) -> Self {
        self.max_event_pages = max_pages;
        self
    }

    /// Totals so far; after a failed run, what was written before the failure.
    pub fn summary(&self) -> &ExportSummary {
        &self.summary
    }

    pub fn into_summary(self) -> ExportSummary {
        self.summary
    }

    /// Runs the crawl for `mode`.
    pub async fn run(&mut self, mode: BackupMode) -> Result<(), AppError> {
        log::info!(
            "Backing up {} into {}",
            match mode {
                BackupMode::Documents => "documents",
                BackupMode::Calendar => "calendar events",
            },
            self.writer.root().display()
        );
        match mode {
            BackupMode::Documents => {
                self.crawl_drive().await?;
                self.crawl_wiki().await
            }
            BackupMode::Calendar => self.crawl_calendar().await,
        }
    }
}
