use std::fmt::Write as _;

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::error::SiftError;
use crate::extract::{collapsed_text, static_selector};

/// One parsed HTML table: ordered headers and ordered rows of cell text.
///
/// Headers come from `<th>` cells where the table has them; otherwise
/// positional names "0".."n-1" are synthesized. Header names are not
/// guaranteed unique. Ragged rows are padded to the table's width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Short human-readable summary for the selection prompt: header line,
    /// the first `max_rows` rows, and the total shape.
    pub fn preview(&self, max_rows: usize) -> String {
        let mut out = String::new();
        out.push_str(&self.headers.join(" | "));
        out.push('\n');
        for row in self.rows.iter().take(max_rows) {
            out.push_str(&row.join(" | "));
            out.push('\n');
        }
        let _ = write!(out, "...({} rows, {} cols)", self.rows.len(), self.headers.len());
        out
    }
}

/// Parse every `<table>` on the page, failing when there are none.
///
/// "No tables" is a terminal condition in tables mode, never an empty
/// success.
pub fn require_tables(html: &str) -> Result<Vec<Table>, SiftError> {
    let tables = parse_tables(html);
    if tables.is_empty() {
        return Err(SiftError::NoTablesFound);
    }
    Ok(tables)
}

/// Parse every `<table>` element into a [`Table`], in document order.
pub fn parse_tables(html: &str) -> Vec<Table> {
    let document = Html::parse_document(html);
    let selector = static_selector("table");
    let tables: Vec<Table> = document.select(&selector).map(parse_table).collect();
    debug!("parsed {} tables", tables.len());
    tables
}

fn parse_table(table: ElementRef) -> Table {
    let mut rows = collect_rows(table);

    // A leading all-<th> row is the header row.
    let mut headers = Vec::new();
    if let Some(first) = rows.first() {
        let cells = row_cells(*first);
        if !cells.is_empty() && cells.iter().all(|c| c.value().name() == "th") {
            headers = cells.iter().map(collapsed_text).collect();
            rows.remove(0);
        }
    }

    let mut body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row_cells(*row).iter().map(collapsed_text).collect())
        .collect();

    let width = headers
        .len()
        .max(body.iter().map(Vec::len).max().unwrap_or(0));
    while headers.len() < width {
        headers.push(headers.len().to_string());
    }
    for row in &mut body {
        row.resize(width, String::new());
    }

    Table { headers, rows: body }
}

/// The table's own `<tr>` elements: direct children, plus rows inside its
/// direct thead/tbody/tfoot sections. Rows of nested tables stay out.
fn collect_rows(table: ElementRef) -> Vec<ElementRef> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| el.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

fn row_cells(row: ElementRef) -> Vec<ElementRef> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "th" | "td"))
        .collect()
}
