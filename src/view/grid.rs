//! Text grids for the CLI surface.
//!
//! The parameter grid mirrors the editable datagrid of the original
//! widget: one row per parameter plus the trailing empty row, aligned
//! columns. The same renderer draws the listing table.

use crate::model::Parameter;

/// Render rows as an aligned text table with a header rule.
pub fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i >= widths.len() {
                widths.push(0);
            }
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

/// Render the static-parameter grid.
pub fn render_params_grid(params: &[Parameter]) -> String {
    let header = vec![
        "Name".to_string(),
        "Type".to_string(),
        "Value".to_string(),
    ];
    let rows: Vec<Vec<String>> = params
        .iter()
        .map(|p| vec![p.name.clone(), p.kind.to_string(), p.value.clone()])
        .collect();
    render_table(&header, &rows)
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut first = true;
    for (i, width) in widths.iter().enumerate() {
        if !first {
            out.push_str("  ");
        }
        first = false;
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        out.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        out.push_str(&" ".repeat(pad));
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}
