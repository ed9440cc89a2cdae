//! Calendars and events (`calendar/v4`).

use crate::error::AppError;
use crate::types::{CalendarId, EventId};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Calendar {
    pub calendar_id: CalendarId,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CalendarList {
    #[serde(default)]
    pub calendar_list: Vec<Calendar>,
}

/// Lifecycle status of an event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum EventStatus {
    Tentative,
    #[default]
    Confirmed,
    Cancelled,
    Other(String),
}

impl From<String> for EventStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "tentative" => Self::Tentative,
            "confirmed" => Self::Confirmed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(status),
        }
    }
}

/// Start or end of an event as sent on the wire.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EventTimeWire {
    #[serde(default)]
    pub date: Option<String>,
    /// Unix seconds, as a string
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Start or end of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    /// An instant, displayed in the given IANA zone
    Timed { timestamp: i64, timezone: String },
    AllDay(NaiveDate),
}

impl EventTimeWire {
    /// Interprets the wire form; a timestamp wins over a date when both exist.
    pub fn resolve(&self) -> Result<EventTime, AppError> {
        if let Some(timestamp) = &self.timestamp {
            let timestamp = timestamp.trim().parse::<i64>().map_err(|e| {
                AppError::MalformedResponse(format!("invalid event timestamp '{}': {}", timestamp, e))
            })?;
            let timezone = self.timezone.clone().unwrap_or_else(|| "UTC".to_string());
            return Ok(EventTime::Timed {
                timestamp,
                timezone,
            });
        }

        let date = self.date.as_deref().ok_or_else(|| {
            AppError::MalformedResponse("event time has neither timestamp nor date".to_string())
        })?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(EventTime::AllDay)
            .map_err(|e| AppError::MalformedResponse(format!("invalid event date '{}': {}", date, e)))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EventOrganizer {
    #[serde(default)]
    pub display_name: String,
}

/// The typed view of an event used to build the iCalendar record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarEvent {
    pub event_id: EventId,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub summary: String,
    pub start_time: EventTimeWire,
    pub end_time: EventTimeWire,
    #[serde(default)]
    pub event_organizer: EventOrganizer,
    /// Unix seconds, as a string
    pub create_time: String,
}

impl CalendarEvent {
    pub fn is_cancelled(&self) -> bool {
        self.status == EventStatus::Cancelled
    }
}

/// An event together with the exact JSON it was parsed from.
///
/// The raw form is what gets archived; the typed form only drives the
/// iCalendar rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub event: CalendarEvent,
    pub raw: Value,
}

impl<'de> Deserialize<'de> for EventRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let event = CalendarEvent::deserialize(&raw).map_err(serde::de::Error::custom)?;
        Ok(Self { event, raw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_raw_json_next_to_typed_event() {
        let raw = json!({
            "event_id": "e1",
            "status": "confirmed",
            "summary": "Standup",
            "start_time": {"timestamp": "1700000000", "timezone": "Asia/Shanghai"},
            "end_time": {"timestamp": "1700001800", "timezone": "Asia/Shanghai"},
            "event_organizer": {"display_name": "Ada"},
            "create_time": "1699990000",
            "color": -1
        });
        let record: EventRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.raw, raw);
        assert_eq!(record.event.event_id.as_str(), "e1");
        assert!(!record.event.is_cancelled());
    }

    #[test]
    fn resolves_all_day_and_timed() {
        let all_day = EventTimeWire {
            date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(
            all_day.resolve().unwrap(),
            EventTime::AllDay(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );

        let timed = EventTimeWire {
            timestamp: Some("1700000000".to_string()),
            timezone: Some("Asia/Shanghai".to_string()),
            ..Default::default()
        };
        assert_eq!(
            timed.resolve().unwrap(),
            EventTime::Timed {
                timestamp: 1_700_000_000,
                timezone: "Asia/Shanghai".to_string()
            }
        );
    }

    #[test]
    fn empty_time_is_malformed() {
        assert!(EventTimeWire::default().resolve().is_err());
    }

    #[test]
    fn unknown_status_is_kept() {
        let status: EventStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, EventStatus::Other("archived".to_string()));
    }
}
