//! Wire model of the open platform objects this tool exports.

pub mod calendar;
pub mod doc;
pub mod docx;
pub mod drive;
pub mod sheet;
pub mod wiki;

pub use calendar::{
    Calendar, CalendarEvent, CalendarList, EventOrganizer, EventRecord, EventStatus, EventTime,
    EventTimeWire,
};
pub use doc::{DocBlock, LegacyDocument, ListStyle, Paragraph, ParagraphStyle};
pub use docx::{DocxBlock, TextElements};
pub use drive::{DriveItem, DriveItemKind, FolderChildren, RootFolderMeta};
pub use sheet::{CellValue, SheetMeta, SheetValues, SpreadsheetMeta};
pub use wiki::{WikiNode, WikiSpace};
