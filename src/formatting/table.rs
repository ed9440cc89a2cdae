//! Grid to pipe-delimited Markdown table.

use crate::model::CellValue;

/// Renders rows as a Markdown table.
///
/// The first row is the header; the separator has one `-|` per header cell.
/// Rows are not padded to the header width.
pub fn render_markdown_table<R, C>(rows: &[R]) -> String
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let mut text = String::new();
    for (i, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        text.push('|');
        for cell in row {
            text.push(' ');
            text.push_str(&escape_cell(cell.as_ref()));
            text.push_str(" |");
        }
        text.push('\n');

        if i == 0 {
            text.push('|');
            text.push_str(&"-|".repeat(row.len()));
            text.push('\n');
        }
    }
    text
}

/// Renders a sheet value grid as a Markdown table.
pub fn render_value_grid(grid: &[Vec<CellValue>]) -> String {
    let rows: Vec<Vec<String>> = grid
        .iter()
        .map(|row| row.iter().map(CellValue::to_text).collect())
        .collect();
    render_markdown_table(&rows)
}

/// Keeps a cell on one line and inside its column.
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "&#124;")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_header_separator_and_rows() {
        let table = render_markdown_table(&[vec!["a", "b"], vec!["1", "2"]]);
        assert_eq!(table, "| a | b |\n|-|-|\n| 1 | 2 |\n");
    }

    #[test]
    fn ragged_rows_are_kept_as_given() {
        let table = render_markdown_table(&[vec!["a"], vec!["1", "2", "3"]]);
        assert_eq!(table, "| a |\n|-|\n| 1 | 2 | 3 |\n");
    }

    #[test]
    fn cells_never_break_the_grid() {
        let table = render_markdown_table(&[vec!["x|y", "line1\nline2"]]);
        assert_eq!(table, "| x&#124;y | line1<br>line2 |\n|-|-|\n");
    }

    #[test]
    fn empty_grid_renders_nothing() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert_eq!(render_markdown_table(&rows), "");
    }

    #[test]
    fn flattens_sheet_cells() {
        let grid = vec![
            vec![CellValue::from("name"), CellValue::Empty],
            vec![
                CellValue::Number(serde_json::Number::from(3)),
                CellValue::Bool(false),
            ],
        ];
        assert_eq!(render_value_grid(&grid), "| name |  |\n|-|-|\n| 3 | false |\n");
    }
}
