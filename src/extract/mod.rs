use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SiftError;

pub mod choose;
pub mod tables;

/// What to pull out of the page. One handler per variant, resolved at the
/// driver's single dispatch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMode {
    Tables,
    Links,
    Paragraphs,
    CssSelector,
}

impl ExtractionMode {
    /// Resolve the menu token "1".."4". Anything else is terminal.
    pub fn from_menu_choice(input: &str) -> Result<Self, SiftError> {
        match input.trim() {
            "1" => Ok(Self::Tables),
            "2" => Ok(Self::Links),
            "3" => Ok(Self::Paragraphs),
            "4" => Ok(Self::CssSelector),
            other => Err(SiftError::InvalidModeSelection {
                input: other.to_string(),
            }),
        }
    }
}

/// The tabular payload handed to the writer: ordered columns and rows of
/// optional cell values. `None` is an absent value (anchor without href, or a
/// gap from heterogeneous table concatenation) and becomes null in JSON, an
/// empty field in CSV.
///
/// Invariant: every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Option<String>>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One JSON object per row, keys in column order.
    pub fn to_json_records(&self) -> Vec<serde_json::Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut object = serde_json::Map::new();
                for (column, cell) in self.columns.iter().zip(row) {
                    let value = match cell {
                        Some(text) => serde_json::Value::String(text.clone()),
                        None => serde_json::Value::Null,
                    };
                    object.insert(column.clone(), value);
                }
                serde_json::Value::Object(object)
            })
            .collect()
    }
}

/// One record {text, href} per anchor, in document order. No filtering of
/// empty, duplicate or fragment-only hrefs.
pub fn links(html: &str) -> ResultSet {
    let document = Html::parse_document(html);
    let anchors = static_selector("a");

    let mut result = ResultSet::new(vec!["text".to_string(), "href".to_string()]);
    for element in document.select(&anchors) {
        result.push_row(vec![
            Some(collapsed_text(&element)),
            element.value().attr("href").map(str::to_string),
        ]);
    }
    debug!("extracted {} links", result.len());
    result
}

/// One record {paragraph} per `<p>`, in document order.
pub fn paragraphs(html: &str) -> ResultSet {
    let document = Html::parse_document(html);
    let paragraphs = static_selector("p");

    let mut result = ResultSet::new(vec!["paragraph".to_string()]);
    for element in document.select(&paragraphs) {
        result.push_row(vec![Some(collapsed_text(&element))]);
    }
    debug!("extracted {} paragraphs", result.len());
    result
}

/// One record {selector, text} per element matching the user-supplied CSS
/// selector. A selector that fails to parse, or matches nothing, yields an
/// empty result set with the fixed schema - a success, not an error.
pub fn by_css(html: &str, selector: &str) -> ResultSet {
    let mut result = ResultSet::new(vec!["selector".to_string(), "text".to_string()]);

    let Ok(compiled) = Selector::parse(selector) else {
        debug!("selector {selector:?} failed to parse; returning no matches");
        return result;
    };

    let document = Html::parse_document(html);
    for element in document.select(&compiled) {
        result.push_row(vec![
            Some(selector.to_string()),
            Some(collapsed_text(&element)),
        ]);
    }
    debug!("selector {selector:?} matched {} elements", result.len());
    result
}

/// Visible text of an element with all whitespace runs collapsed to single
/// spaces and the ends trimmed.
pub(crate) fn collapsed_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a selector that is a compile-time literal.
pub(crate) fn static_selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK_PAGE: &str = r##"
        <html><body>
            <a href="/a">  First
                link  </a>
            <a>no href here</a>
            <a href="#frag"></a>
            <a href="/a">First
                link</a>
        </body></html>"##;

    #[test]
    fn mode_parses_menu_tokens() {
        assert_eq!(ExtractionMode::from_menu_choice("1").unwrap(), ExtractionMode::Tables);
        assert_eq!(ExtractionMode::from_menu_choice(" 2 ").unwrap(), ExtractionMode::Links);
        assert_eq!(ExtractionMode::from_menu_choice("3").unwrap(), ExtractionMode::Paragraphs);
        assert_eq!(ExtractionMode::from_menu_choice("4").unwrap(), ExtractionMode::CssSelector);
    }

    #[test]
    fn mode_rejects_everything_else() {
        for bad in ["0", "5", "tables", ""] {
            assert!(matches!(
                ExtractionMode::from_menu_choice(bad),
                Err(SiftError::InvalidModeSelection { .. })
            ));
        }
    }

    #[test]
    fn links_keep_schema_order_and_duplicates() {
        let result = links(LINK_PAGE);
        assert_eq!(result.columns, vec!["text", "href"]);
        assert_eq!(result.len(), 4);
        assert_eq!(result.rows[0][0].as_deref(), Some("First link"));
        assert_eq!(result.rows[0][1].as_deref(), Some("/a"));
        // Missing href stays absent rather than becoming an empty string.
        assert_eq!(result.rows[1][1], None);
        // Fragment-only and duplicate entries are not filtered.
        assert_eq!(result.rows[2][1].as_deref(), Some("#frag"));
        assert_eq!(result.rows[3], result.rows[0]);
    }

    #[test]
    fn paragraphs_collapse_internal_whitespace() {
        let html = "<p>one   two\n\tthree</p><p></p>";
        let result = paragraphs(html);
        assert_eq!(result.columns, vec!["paragraph"]);
        assert_eq!(result.rows[0][0].as_deref(), Some("one two three"));
        assert_eq!(result.rows[1][0].as_deref(), Some(""));
    }

    #[test]
    fn css_selector_repeats_selector_per_record() {
        let html = "<div class='x'>a</div><div class='x'>b</div>";
        let result = by_css(html, "div.x");
        assert_eq!(result.columns, vec!["selector", "text"]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.rows[0][0].as_deref(), Some("div.x"));
        assert_eq!(result.rows[1][0].as_deref(), Some("div.x"));
        assert_eq!(result.rows[1][1].as_deref(), Some("b"));
    }

    #[test]
    fn zero_match_selector_is_an_empty_success() {
        let result = by_css("<p>text</p>", "div.absent");
        assert!(result.is_empty());
        assert_eq!(result.columns, vec!["selector", "text"]);
    }

    #[test]
    fn invalid_selector_is_an_empty_success() {
        let result = by_css("<p>text</p>", "div[");
        assert!(result.is_empty());
        assert_eq!(result.columns, vec!["selector", "text"]);
    }

    #[test]
    fn non_latin_text_passes_through() {
        let result = paragraphs("<p>çıkarım 表データ тест</p>");
        assert_eq!(result.rows[0][0].as_deref(), Some("çıkarım 表データ тест"));
    }

    #[test]
    fn json_records_preserve_column_order() {
        let mut result = ResultSet::new(vec!["text".to_string(), "href".to_string()]);
        result.push_row(vec![Some("a".to_string()), None]);
        let records = result.to_json_records();
        let keys: Vec<&String> = records[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["text", "href"]);
        assert!(records[0]["href"].is_null());
    }
}
