//! HTTP acquisition and HTML text extraction.

pub mod html;
pub mod http_client;

pub use http_client::{HttpClient, HttpResponse};
