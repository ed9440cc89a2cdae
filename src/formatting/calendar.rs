// src/formatting/calendar.rs
//! iCalendar rendering of calendar events.

use crate::constants::ICALENDAR_PRODID;
use crate::error::AppError;
use crate::model::{CalendarEvent, EventTime};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Formats the value part of a `DTSTART;`/`DTEND;` line.
///
/// Timed values are shown as local wall-clock time in the event's zone;
/// all-day values as a bare date.
pub fn format_event_time(time: &EventTime) -> Result<String, AppError> {
    match time {
        EventTime::Timed {
            timestamp,
            timezone,
        } => {
            let zone: Tz = timezone
                .parse()
                .map_err(|_| AppError::UnknownTimeZone(timezone.clone()))?;
            let local = utc_instant(*timestamp)?.with_timezone(&zone);
            Ok(format!("TZID={}:{}", timezone, local.format("%Y%m%dT%H%M%S")))
        }
        EventTime::AllDay(date) => Ok(format!("VALUE=DATE:{}", date.format("%Y%m%d"))),
    }
}

/// Renders one event as a standalone VCALENDAR.
pub fn render_vcalendar(event: &CalendarEvent) -> Result<String, AppError> {
    let created_secs = event.create_time.trim().parse::<i64>().map_err(|e| {
        AppError::MalformedResponse(format!(
            "event {} has invalid create_time '{}': {}",
            event.event_id, event.create_time, e
        ))
    })?;
    let created = utc_instant(created_secs)?
        .format("%Y%m%dT%H%M%SZ")
        .to_string();
    let start = format_event_time(&event.start_time.resolve()?)?;
    let end = format_event_time(&event.end_time.resolve()?)?;

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        format!("PRODID:{}", ICALENDAR_PRODID),
        "VERSION:2.0".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("CREATED:{}", created),
        format!("DTSTAMP:{}", created),
        format!("UID:{}", event.event_id),
        format!("ORGANIZER;CN={}", event.event_organizer.display_name),
        format!("DTSTART;{}", start),
        format!("DTEND;{}", end),
        format!("SUMMARY:{}", event.summary),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    let mut ics = lines.join("\n");
    ics.push('\n');
    Ok(ics)
}

fn utc_instant(secs: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| AppError::MalformedResponse(format!("timestamp {} is out of range", secs)))
}
