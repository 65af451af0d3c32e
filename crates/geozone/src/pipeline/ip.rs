//! Resolve the caller's public IP address from a lookup page.

use crate::acquisition::{html, HttpClient};
use crate::error::StageError;

/// Element holding the address on the lookup page.
const IP_SELECTOR: &str = "div.ip";

/// Fetch `url` and return the caller's IP address.
pub async fn resolve_ip(client: &HttpClient, url: &str) -> Result<String, StageError> {
    let body = client.get(url, &[]).await?.expect_status(200)?;
    extract_ip(&body)
}

/// First whitespace-delimited token of the first `div.ip` element.
pub fn extract_ip(html: &str) -> Result<String, StageError> {
    let text = html::first_element_text(html, IP_SELECTOR)?
        .ok_or_else(|| StageError::parse(format!("no {IP_SELECTOR} element")))?;
    text.split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| StageError::parse(format!("{IP_SELECTOR} element is empty")))
}
