// tests/common/mod.rs
//! In-memory office content for crawl tests.
//!
//! Every fixture is given in wire JSON, so the fake answers exactly what the
//! platform would put under `data`. Calls are recorded in order.

#![allow(dead_code)]

use feishu_backup::api::OfficeSource;
use feishu_backup::model::{
    Calendar, CellValue, DocxBlock, EventRecord, FolderChildren, LegacyDocument, SpreadsheetMeta,
    WikiNode, WikiSpace,
};
use feishu_backup::{
    ApiErrorCode, AppError, CalendarId, DocumentToken, FolderToken, ImageToken, Page, SheetId,
    SpaceId, SpreadsheetToken,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeSource {
    pub root: String,
    pub folders: HashMap<String, Value>,
    pub legacy_docs: HashMap<String, Value>,
    pub docx: HashMap<String, Value>,
    pub spreadsheets: HashMap<String, Value>,
    pub sheet_values: HashMap<String, Value>,
    pub spaces: Vec<Value>,
    pub nodes: HashMap<String, Value>,
    pub calendars: Vec<Value>,
    /// Event pages per calendar, in order
    pub events: HashMap<String, Vec<Value>>,
    pub media: HashMap<String, Vec<u8>>,
    /// Tokens whose fetch answers with a platform error
    pub failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_root(root: &str) -> Self {
        Self {
            root: root.to_string(),
            ..Self::default()
        }
    }

    pub fn folder(mut self, token: &str, children: Value) -> Self {
        self.folders
            .insert(token.to_string(), json!({ "children": children }));
        self
    }

    pub fn legacy_doc(mut self, token: &str, content: Value) -> Self {
        self.legacy_docs.insert(token.to_string(), content);
        self
    }

    pub fn docx(mut self, token: &str, blocks: Value) -> Self {
        self.docx.insert(token.to_string(), blocks);
        self
    }

    pub fn spreadsheet(mut self, token: &str, sheets: Value) -> Self {
        self.spreadsheets
            .insert(token.to_string(), json!({ "sheets": sheets }));
        self
    }

    pub fn sheet(mut self, spreadsheet: &str, sheet: &str, grid: Value) -> Self {
        self.sheet_values
            .insert(format!("{}_{}", spreadsheet, sheet), grid);
        self
    }

    pub fn space(mut self, space_id: &str, name: &str, nodes: Value) -> Self {
        self.spaces.push(json!({ "space_id": space_id, "name": name }));
        self.nodes.insert(space_id.to_string(), nodes);
        self
    }

    pub fn calendar(mut self, calendar_id: &str, pages: Vec<Value>) -> Self {
        self.calendars
            .push(json!({ "calendar_id": calendar_id, "summary": "Work" }));
        self.events.insert(calendar_id.to_string(), pages);
        self
    }

    pub fn image(mut self, token: &str, bytes: &[u8]) -> Self {
        self.media.insert(token.to_string(), bytes.to_vec());
        self
    }

    pub fn failing(mut self, token: &str) -> Self {
        self.failing.insert(token.to_string());
        self
    }

    /// Calls made so far, e.g. `"docx doxA"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, call: &str) -> bool {
        self.calls().iter().any(|c| c == call)
    }

    fn record(&self, call: &str, key: &str) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(format!("{} {}", call, key));
        if self.failing.contains(key) {
            return Err(api_error(key, 1770032));
        }
        Ok(())
    }

    fn answer<T: DeserializeOwned>(
        &self,
        call: &str,
        key: &str,
        fixtures: &HashMap<String, Value>,
    ) -> Result<T, AppError> {
        self.record(call, key)?;
        let value = fixtures
            .get(key)
            .cloned()
            .ok_or_else(|| api_error(key, 1770002))?;
        Ok(serde_json::from_value(value)?)
    }
}

pub fn api_error(key: &str, code: i64) -> AppError {
    AppError::Api {
        url: format!("fake://{}", key),
        code,
        kind: ApiErrorCode::from_code(code),
        msg: "fake failure".to_string(),
        envelope: json!({ "code": code, "msg": "fake failure" }).to_string(),
    }
}

#[async_trait::async_trait]
impl OfficeSource for FakeSource {
    async fn root_folder(&self) -> Result<FolderToken, AppError> {
        self.record("root", "")?;
        Ok(FolderToken::parse(&self.root)?)
    }

    async fn folder_children(&self, folder: &FolderToken) -> Result<FolderChildren, AppError> {
        self.answer("folder", folder.as_str(), &self.folders)
    }

    async fn legacy_document(&self, document: &DocumentToken) -> Result<LegacyDocument, AppError> {
        self.answer("doc", document.as_str(), &self.legacy_docs)
    }

    async fn docx_blocks(&self, document: &DocumentToken) -> Result<Vec<DocxBlock>, AppError> {
        self.answer("docx", document.as_str(), &self.docx)
    }

    async fn spreadsheet_meta(
        &self,
        spreadsheet: &SpreadsheetToken,
    ) -> Result<SpreadsheetMeta, AppError> {
        self.answer("metainfo", spreadsheet.as_str(), &self.spreadsheets)
    }

    async fn sheet_values(
        &self,
        spreadsheet: &SpreadsheetToken,
        sheet: &SheetId,
    ) -> Result<Vec<Vec<CellValue>>, AppError> {
        let key = format!("{}_{}", spreadsheet, sheet);
        self.answer("values", &key, &self.sheet_values)
    }

    async fn wiki_spaces(&self) -> Result<Vec<WikiSpace>, AppError> {
        self.record("spaces", "")?;
        Ok(serde_json::from_value(Value::Array(self.spaces.clone()))?)
    }

    async fn wiki_nodes(&self, space: &SpaceId) -> Result<Vec<WikiNode>, AppError> {
        self.answer("nodes", space.as_str(), &self.nodes)
    }

    async fn download_media(&self, image: &ImageToken) -> Result<Vec<u8>, AppError> {
        self.record("media", image.as_str())?;
        self.media
            .get(image.as_str())
            .cloned()
            .ok_or_else(|| api_error(image.as_str(), 1770002))
    }

    async fn calendars(&self) -> Result<Vec<Calendar>, AppError> {
        self.record("calendars", "")?;
        Ok(serde_json::from_value(Value::Array(self.calendars.clone()))?)
    }

    async fn events_page(
        &self,
        calendar: &CalendarId,
        page_token: Option<&str>,
    ) -> Result<Page<EventRecord>, AppError> {
        self.record("events", calendar.as_str())?;
        let pages = self
            .events
            .get(calendar.as_str())
            .ok_or_else(|| api_error(calendar.as_str(), 1770002))?;
        // Page tokens are the page index.
        let index: usize = page_token.map_or(Ok(0), str::parse).map_err(|_| {
            AppError::MalformedResponse(format!("bad page token {:?}", page_token))
        })?;
        let page = pages
            .get(index)
            .cloned()
            .ok_or_else(|| api_error(calendar.as_str(), 1770002))?;
        Ok(serde_json::from_value(page)?)
    }
}

pub fn text_run(text: &str) -> Value {
    json!({ "type": "textRun", "textRun": { "text": text } })
}

pub fn paragraph(text: &str) -> Value {
    json!({ "type": "paragraph", "paragraph": { "elements": [text_run(text)] } })
}

pub fn legacy_content(title: &str, blocks: Value) -> Value {
    json!({
        "title": { "elements": [text_run(title)] },
        "body": { "blocks": blocks }
    })
}

pub fn drive_item(token: &str, name: &str, kind: &str) -> Value {
    json!({ "token": token, "name": name, "type": kind })
}

pub fn event(id: &str, status: &str) -> Value {
    json!({
        "event_id": id,
        "status": status,
        "summary": format!("Event {}", id),
        "start_time": { "timestamp": "1700028800", "timezone": "Asia/Shanghai" },
        "end_time": { "timestamp": "1700032400", "timezone": "Asia/Shanghai" },
        "event_organizer": { "display_name": "Ada" },
        "create_time": "1699999200"
    })
}

/// Every file below `root`, as sorted `/`-separated relative paths.
pub fn files_under(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(&path, root, out);
            } else if let Ok(relative) = path.strip_prefix(root) {
                let parts: Vec<_> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.push(parts.join("/"));
            }
        }
    }

    let mut files = Vec::new();
    walk(root, root, &mut files);
    files.sort();
    files
}
