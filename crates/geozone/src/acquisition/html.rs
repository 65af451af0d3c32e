//! Text extraction from raw HTML using `scraper` CSS selectors.

use crate::error::StageError;
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Result<Selector, StageError> {
    Selector::parse(css).map_err(|e| StageError::parse(format!("invalid selector {css}: {e}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Concatenated text of the first element matching `css`.
pub fn first_element_text(html: &str, css: &str) -> Result<Option<String>, StageError> {
    let sel = selector(css)?;
    let document = Html::parse_document(html);
    Ok(document.select(&sel).next().map(element_text))
}

/// Text of every `tr` row inside the first table matching `table_css`.
///
/// Returns `None` when no such table exists.
pub fn table_row_texts(html: &str, table_css: &str) -> Result<Option<Vec<String>>, StageError> {
    let table_sel = selector(table_css)?;
    let row_sel = selector("tr")?;
    let document = Html::parse_document(html);

    let Some(table) = document.select(&table_sel).next() else {
        return Ok(None);
    };
    Ok(Some(table.select(&row_sel).map(element_text).collect()))
}

/// The double-quoted value that first follows `marker` in `text`.
pub fn quoted_after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let rest = &text[text.find(marker)? + marker.len()..];
    let rest = &rest[rest.find('"')? + 1..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

/// Content of the first double-quoted token in `text`.
pub fn first_quoted(text: &str) -> Option<&str> {
    text.split('"').nth(1)
}
