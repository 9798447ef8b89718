// src/formatting/table.rs
//! Renders the rows of a table block as a pipe-delimited grid.

use super::rich_text::plain_text_of;
use crate::model::Block;

/// Renders `rows` in order, one line per `table_row` block.
///
/// Cells show their spans' plain text joined by a space. When the table
/// has a column header, a dash separator sized to each header cell
/// follows the first row. Non-row blocks are ignored.
pub fn format_table_rows(rows: &[Block], has_column_header: bool) -> String {
    let mut output = String::new();

    let cell_rows = rows.iter().filter_map(|block| match block {
        Block::TableRow(row) => Some(&row.cells),
        _ => None,
    });

    for (index, cells) in cell_rows.enumerate() {
        let texts: Vec<String> = cells.iter().map(|cell| plain_text_of(cell)).collect();

        output.push('|');
        for text in &texts {
            output.push_str(&format!(" {} |", text));
        }
        output.push('\n');

        if index == 0 && has_column_header {
            for text in &texts {
                output.push_str(&format!("| {} ", "-".repeat(text.chars().count())));
            }
            output.push_str("|\n");
        }
    }

    output
}
