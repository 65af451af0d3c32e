//! Obtain a CSRF token and exchange it for a bearer token.

use crate::acquisition::{html, HttpClient};
use crate::config::TokenSource;
use crate::error::StageError;
use serde::Deserialize;

/// A CSRF token plus the cookie that must accompany it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken {
    pub value: String,
    pub cookie: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: Option<String>,
}

/// Obtain a CSRF token from the configured source.
pub async fn acquire_csrf_token(
    client: &HttpClient,
    source: &TokenSource,
    token_page: &str,
    marker: &str,
) -> Result<CsrfToken, StageError> {
    match source {
        TokenSource::Scrape => scrape_csrf_token(client, token_page, marker).await,
        TokenSource::Prompt => prompt_csrf_token(),
        TokenSource::Fixed { csrf_token, cookie } => Ok(CsrfToken {
            value: csrf_token.clone(),
            cookie: cookie.clone(),
        }),
    }
}

/// Fetch the token page and pull the token out of its script.
///
/// Cookies set by the page stay in the client's cookie store.
pub async fn scrape_csrf_token(
    client: &HttpClient,
    url: &str,
    marker: &str,
) -> Result<CsrfToken, StageError> {
    let body = client.get(url, &[]).await?.expect_status(200)?;
    Ok(CsrfToken {
        value: extract_csrf_token(&body, marker)?,
        cookie: None,
    })
}

/// The quoted value that follows `marker` in the page text.
pub fn extract_csrf_token(page: &str, marker: &str) -> Result<String, StageError> {
    match html::quoted_after(page, marker) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        Some(_) => Err(StageError::parse(format!("empty value after marker {marker}"))),
        None => Err(StageError::parse(format!(
            "no quoted value after marker {marker}"
        ))),
    }
}

fn prompt_csrf_token() -> Result<CsrfToken, StageError> {
    let mut rl =
        rustyline::DefaultEditor::new().map_err(|e| StageError::Prompt(e.to_string()))?;
    let mut read = |prompt: &str| {
        rl.readline(prompt)
            .map(|line| line.trim().to_string())
            .map_err(|e| StageError::Prompt(e.to_string()))
    };

    let value = read("Enter X-Csrf-Token: ")?;
    let cookie = read("Enter cookie: ")?;
    Ok(CsrfToken {
        value,
        cookie: Some(cookie).filter(|c| !c.is_empty()),
    })
}

/// POST the CSRF token and return the bearer token from a 201 response.
pub async fn exchange_token(
    client: &HttpClient,
    url: &str,
    csrf: &CsrfToken,
) -> Result<String, StageError> {
    let mut headers = vec![("X-Csrf-Token", csrf.value.as_str())];
    if let Some(cookie) = &csrf.cookie {
        headers.push(("Cookie", cookie.as_str()));
    }

    let body = client.post(url, &headers).await?.expect_status(201)?;
    let parsed: TokenResponse = serde_json::from_str(&body)?;
    parsed
        .token
        .ok_or_else(|| StageError::parse("token field missing from response"))
}
