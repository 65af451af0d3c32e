//! HTTP session wrapping reqwest.
//!
//! One client per run. It keeps a cookie store so that cookies set by the
//! token page travel with the token exchange. No retries, no backoff.

use crate::error::StageError;
use std::time::Duration;

/// Response from an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Requested URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Return the body if the status matches `expected`.
    pub fn expect_status(self, expected: u16) -> Result<String, StageError> {
        if self.status == expected {
            Ok(self.body)
        } else {
            Err(StageError::Status {
                url: self.url,
                status: self.status,
            })
        }
    }
}

/// HTTP session shared by every stage of a run.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a session with a browser user-agent.
    ///
    /// `timeout_ms` of `None` leaves requests unbounded.
    pub fn new(timeout_ms: Option<u64>) -> Result<Self, StageError> {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/131.0.0.0 Safari/537.36";

        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(ua)
            .cookie_store(true);
        if let Some(ms) = timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Perform a GET request with optional extra headers.
    pub async fn get(
        &self,
        url: &str,
        extra_headers: &[(&str, &str)],
    ) -> Result<HttpResponse, StageError> {
        let mut builder = self.client.get(url);
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }
        Self::read(url, builder).await
    }

    /// Perform a POST request with an empty body and the given headers.
    pub async fn post(
        &self,
        url: &str,
        extra_headers: &[(&str, &str)],
    ) -> Result<HttpResponse, StageError> {
        let mut builder = self.client.post(url);
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }
        Self::read(url, builder).await
    }

    async fn read(
        url: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<HttpResponse, StageError> {
        let r = builder.send().await?;
        let status = r.status().as_u16();
        tracing::debug!("{url} -> {status}");
        let body = r.text().await?;

        Ok(HttpResponse {
            url: url.to_string(),
            status,
            body,
        })
    }
}
