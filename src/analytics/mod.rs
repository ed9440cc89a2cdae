// src/analytics/mod.rs
//! Counts of what a backup run exported, skipped and downloaded.

use std::fmt;

/// Why a leaf was not exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not in the `--only` token set
    Filtered,
    /// A kind without a converter (mind notes, bitables, files, ...)
    Unsupported,
}

/// Running totals of one backup.
///
/// Updated as the crawl goes, so a crawl that fails halfway still reports
/// what it wrote before the failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub folders_visited: usize,
    pub legacy_documents: usize,
    pub docx_documents: usize,
    pub spreadsheets: usize,
    pub wiki_spaces: usize,
    pub filtered: usize,
    pub unsupported: usize,
    pub images_downloaded: usize,
    pub images_already_present: usize,
    pub calendars: usize,
    pub events_exported: usize,
    pub events_cancelled: usize,
}

impl ExportSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Filtered => self.filtered += 1,
            SkipReason::Unsupported => self.unsupported += 1,
        }
    }

    /// Documents and spreadsheets written.
    pub fn files_exported(&self) -> usize {
        self.legacy_documents + self.docx_documents + self.spreadsheets
    }

    pub fn skipped(&self) -> usize {
        self.filtered + self.unsupported
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Exported {} file(s): {} doc, {} docx, {} sheet ({} folder(s), {} wiki space(s))",
            self.files_exported(),
            self.legacy_documents,
            self.docx_documents,
            self.spreadsheets,
            self.folders_visited,
            self.wiki_spaces
        )?;
        writeln!(
            f,
            "Skipped {} item(s): {} filtered, {} unsupported",
            self.skipped(),
            self.filtered,
            self.unsupported
        )?;
        writeln!(
            f,
            "Images: {} downloaded, {} already present",
            self.images_downloaded, self.images_already_present
        )?;
        write!(
            f,
            "Events: {} exported, {} cancelled, from {} calendar(s)",
            self.events_exported, self.events_cancelled, self.calendars
        )
    }
}
