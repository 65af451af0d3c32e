//! Look up the regions that share a time zone.
//!
//! The reference page is a code listing rendered as an HTML table, one
//! mapping per row, e.g. `"GB" => "Europe/London",`.

use crate::acquisition::{html, HttpClient};
use crate::error::StageError;

/// The code listing table on the reference page.
const TABLE_SELECTOR: &str = "table.js-file-line-container";

/// Fetch the reference page and collect the regions for `time_zone`.
pub async fn lookup_regions(
    client: &HttpClient,
    url: &str,
    time_zone: &str,
) -> Result<Vec<String>, StageError> {
    let body = client.get(url, &[]).await?.expect_status(200)?;
    let rows = html::table_row_texts(&body, TABLE_SELECTOR)?
        .ok_or_else(|| StageError::parse(format!("no {TABLE_SELECTOR} on reference page")))?;
    match_regions(&rows, time_zone)
}

/// Region identifiers of every row whose text contains `time_zone`.
///
/// Matching is an unanchored substring test, so a zone that is part of a
/// longer zone name also matches that row.
pub fn match_regions<S: AsRef<str>>(
    rows: &[S],
    time_zone: &str,
) -> Result<Vec<String>, StageError> {
    rows.iter()
        .map(|row| row.as_ref())
        .filter(|row| row.contains(time_zone))
        .map(|row| {
            html::first_quoted(row).map(str::to_string).ok_or_else(|| {
                StageError::parse(format!("no quoted region in row: {}", row.trim()))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_regions() {
        let rows = [
            r#"12 "EU" => "Europe/London","#,
            r#"13 "US" => "America/Denver","#,
        ];
        assert_eq!(match_regions(&rows, "Europe/London").unwrap(), vec!["EU"]);
    }

    #[test]
    fn test_match_regions_keeps_order_and_duplicates() {
        let rows = [
            r#""GB" => "Europe/London","#,
            r#""FR" => "Europe/Paris","#,
            r#""JE" => "Europe/London","#,
        ];
        assert_eq!(
            match_regions(&rows, "Europe/London").unwrap(),
            vec!["GB", "JE"]
        );
    }

    #[test]
    fn test_match_regions_unanchored() {
        let rows = [
            r#""AR" => "America/Argentina/Buenos_Aires","#,
            r#""US" => "America/Indiana/Indianapolis","#,
        ];
        assert_eq!(match_regions(&rows, "America/Indiana").unwrap(), vec!["US"]);
        assert_eq!(match_regions(&rows, "America/").unwrap(), vec!["AR", "US"]);
    }

    #[test]
    fn test_match_regions_empty() {
        let rows = [r#""US" => "America/Denver","#];
        assert!(match_regions(&rows, "Asia/Tokyo").unwrap().is_empty());
    }

    #[test]
    fn test_match_regions_unquoted_row() {
        let rows = ["Europe/London without quotes"];
        assert!(matches!(
            match_regions(&rows, "Europe/London"),
            Err(StageError::Parse(_))
        ));
    }
}
