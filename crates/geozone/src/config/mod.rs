//! Run configuration and its defaults.

use std::path::PathBuf;

pub const DEFAULT_IP_PAGE: &str = "https://2ip.ru/";
pub const DEFAULT_TOKEN_PAGE: &str = "https://www.maxmind.com/en/geoip2-precision-demo";
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://www.maxmind.com/en/geoip2/demo/token";
pub const DEFAULT_GEO_ENDPOINT: &str = "https://geoip.maxmind.com/geoip/v2.1/city/";
pub const DEFAULT_REGIONS_PAGE: &str = "https://gist.github.com/salkar/19df1918ee2aed6669e2";

/// Substring in the token page's script that precedes the quoted CSRF token.
pub const DEFAULT_CSRF_MARKER: &str = "X_CSRF_TOKEN";

pub const DEFAULT_OUTPUT_PATH: &str = "regions.txt";
pub const DEFAULT_LOG_PATH: &str = "geozone.log";

/// Remote endpoints the pipeline talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Page whose `div.ip` element shows the caller's address.
    pub ip_page: String,
    /// Page whose script embeds the CSRF token.
    pub token_page: String,
    /// Endpoint exchanging a CSRF token for a bearer token.
    pub token_endpoint: String,
    /// Geolocation base URL; the IP is appended as the last path segment.
    pub geo_endpoint: String,
    /// Page holding the zone-to-region table.
    pub regions_page: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ip_page: DEFAULT_IP_PAGE.to_string(),
            token_page: DEFAULT_TOKEN_PAGE.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            regions_page: DEFAULT_REGIONS_PAGE.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at one base URL, keeping the default paths.
    ///
    /// Used to aim a run at a local mock server.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            ip_page: format!("{base}/"),
            token_page: format!("{base}/en/geoip2-precision-demo"),
            token_endpoint: format!("{base}/en/geoip2/demo/token"),
            geo_endpoint: format!("{base}/geoip/v2.1/city/"),
            regions_page: format!("{base}/salkar/19df1918ee2aed6669e2"),
        }
    }
}

/// Where the CSRF token comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Scrape it from the token page using the configured marker.
    Scrape,
    /// Ask the operator for the token and the cookie.
    Prompt,
    /// Values supplied up front.
    Fixed {
        csrf_token: String,
        cookie: Option<String>,
    },
}

impl TokenSource {
    /// Resolve the source from command-line values.
    ///
    /// An explicit CSRF token always selects [`TokenSource::Fixed`].
    pub fn resolve(prompt: bool, csrf_token: Option<String>, cookie: Option<String>) -> Self {
        match csrf_token {
            Some(csrf_token) => TokenSource::Fixed { csrf_token, cookie },
            None if prompt => TokenSource::Prompt,
            None => TokenSource::Scrape,
        }
    }
}

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoints: Endpoints,
    pub csrf_marker: String,
    pub token_source: TokenSource,
    pub output_path: PathBuf,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            csrf_marker: DEFAULT_CSRF_MARKER.to_string(),
            token_source: TokenSource::Scrape,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            timeout_ms: None,
        }
    }
}
