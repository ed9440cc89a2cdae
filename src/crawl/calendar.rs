// src/crawl/calendar.rs
//! Calendar export: every event as raw JSON plus an iCalendar file.

use super::Crawler;
use crate::constants::CALENDAR_DIR;
use crate::error::AppError;
use crate::formatting::calendar::render_vcalendar;
use crate::model::{Calendar, EventRecord};
use crate::output::{sanitize_segment, BackupPath};

impl Crawler {
    pub(super) async fn crawl_calendar(&mut self) -> Result<(), AppError> {
        let dir = BackupPath::root().join(CALENDAR_DIR);
        let location = self.writer.ensure_dir(&dir)?;
        log::info!("Output files are written to {}", location.display());

        let calendars = self.source.calendars().await?;
        log::info!("Found {} calendar(s)", calendars.len());

        for calendar in &calendars {
            self.export_calendar(&dir, calendar).await?;
        }
        Ok(())
    }

    /// Walks the event pages of one calendar, writing each page as it arrives.
    async fn export_calendar(&mut self, dir: &BackupPath, calendar: &Calendar) -> Result<(), AppError> {
        log::info!(
            "Handling calendar {} {}",
            calendar.summary,
            calendar.calendar_id
        );
        self.summary.calendars += 1;

        let mut page_token: Option<String> = None;
        let mut pages_fetched = 0u32;
        loop {
            if pages_fetched >= self.max_event_pages {
                log::warn!(
                    "Stopped reading events of {} after {} pages",
                    calendar.calendar_id,
                    self.max_event_pages
                );
                break;
            }

            let page = self
                .source
                .events_page(&calendar.calendar_id, page_token.as_deref())
                .await?;
            pages_fetched += 1;
            log::info!("Found {} event(s)", page.items.len());

            for record in &page.items {
                self.save_event(dir, record)?;
            }

            match page.next_token() {
                Some(token) => page_token = Some(token.to_string()),
                None => break,
            }
        }
        Ok(())
    }

    fn save_event(&mut self, dir: &BackupPath, record: &EventRecord) -> Result<(), AppError> {
        if record.event.is_cancelled() {
            self.summary.events_cancelled += 1;
            return Ok(());
        }

        let ics = render_vcalendar(&record.event)?;
        let stem = sanitize_segment(record.event.event_id.as_str());

        let mut json = serde_json::to_string(&record.raw)?;
        json.push('\n');
        self.writer
            .write_text(dir, &format!("{}.json", stem), &json)?;
        self.writer.write_text(dir, &format!("{}.ics", stem), &ics)?;

        self.summary.events_exported += 1;
        Ok(())
    }
}
