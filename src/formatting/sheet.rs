//! Spreadsheet rendering: one heading and table per sheet.

use super::table::render_value_grid;
use crate::model::{CellValue, SheetMeta};

/// Composes a spreadsheet: `# <sheet title>` followed by its table, per sheet
/// in the given order. A sheet without values renders the heading only.
pub fn compose_spreadsheet_markdown(sheets: &[(SheetMeta, Vec<Vec<CellValue>>)]) -> String {
    sheets
        .iter()
        .map(|(meta, grid)| format!("# {}\n{}", meta.title, render_value_grid(grid)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(id: &str, title: &str) -> SheetMeta {
        serde_json::from_value(json!({"sheetId": id, "title": title})).unwrap()
    }

    #[test]
    fn composes_sheets_in_order() {
        let sheets = vec![
            (
                meta("s1", "Budget"),
                vec![
                    vec![CellValue::from("item"), CellValue::from("cost")],
                    vec![
                        CellValue::from("tea"),
                        CellValue::Number(serde_json::Number::from(4)),
                    ],
                ],
            ),
            (meta("s2", "Empty"), Vec::new()),
        ];
        insta::assert_snapshot!(compose_spreadsheet_markdown(&sheets), @r"
        # Budget
        | item | cost |
        |-|-|
        | tea | 4 |
        # Empty
        ");
    }
}
