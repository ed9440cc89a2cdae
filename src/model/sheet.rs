//! Spreadsheet metadata and cell values (`sheets/v2`).

use crate::types::SheetId;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetMeta>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetMeta {
    pub sheet_id: SheetId,
    #[serde(default)]
    pub title: String,
}

/// Response of the value-range endpoint.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetValues {
    #[serde(default)]
    pub value_range: ValueRange,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ValueRange {
    /// Absent or null for an empty sheet.
    #[serde(default)]
    pub values: Option<Vec<Vec<CellValue>>>,
}

impl SheetValues {
    pub fn into_grid(self) -> Vec<Vec<CellValue>> {
        self.value_range.values.unwrap_or_default()
    }
}

/// One cell of a value grid.
///
/// Plain cells are scalars; rich cells are a list of segments (text,
/// mentions, links) each carrying a `text` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Runs(Vec<CellRun>),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CellRun {
    #[serde(default)]
    pub text: String,
}

impl CellValue {
    /// Flattens the cell to display text.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(number) => number.to_string(),
            CellValue::Bool(flag) => flag.to_string(),
            CellValue::Runs(runs) => runs.iter().map(|run| run.text.as_str()).collect(),
            CellValue::Other(value) => value.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cells_flatten_to_text() {
        let row: Vec<CellValue> = serde_json::from_value(json!([
            "a",
            1.5,
            null,
            true,
            [{"type": "text", "text": "x"}, {"type": "mention", "text": "@y"}]
        ]))
        .unwrap();

        let texts: Vec<String> = row.iter().map(CellValue::to_text).collect();
        assert_eq!(texts, ["a", "1.5", "", "true", "x@y"]);
    }

    #[test]
    fn empty_sheet_has_no_rows() {
        let values: SheetValues =
            serde_json::from_value(json!({"valueRange": {"range": "s1!A1:A1"}})).unwrap();
        assert!(values.into_grid().is_empty());
    }
}
