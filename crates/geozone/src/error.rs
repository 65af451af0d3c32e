//! Error types for the lookup pipeline.

use std::fmt;

/// The pipeline stage a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ip,
    CsrfToken,
    Token,
    TimeZone,
    Regions,
    Write,
}

impl Stage {
    /// Short label used in log lines.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Ip => "ip",
            Stage::CsrfToken => "csrf token",
            Stage::Token => "token",
            Stage::TimeZone => "time zone",
            Stage::Regions => "regions",
            Stage::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors a single stage can produce.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL")]
    Url(#[from] url::ParseError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("input error: {0}")]
    Prompt(String),
}

impl StageError {
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        StageError::Parse(msg.into())
    }
}

/// A stage failure tagged with the stage that produced it.
#[derive(thiserror::Error, Debug)]
#[error("{stage} not received")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: StageError,
}

impl PipelineError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// This error and every cause below it, joined by `": "`.
    pub fn describe(&self) -> String {
        let mut text = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(e) = cause {
            text.push_str(": ");
            text.push_str(&e.to_string());
            cause = e.source();
        }
        text
    }
}

/// Attach a stage to a stage-level result.
pub trait StageResultExt<T> {
    fn at(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T> StageResultExt<T> for Result<T, StageError> {
    fn at(self, stage: Stage) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError { stage, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_display() {
        let err: Result<(), _> = Err(StageError::Status {
            url: "https://example.com/".to_string(),
            status: 503,
        });
        let err = err.at(Stage::Ip).unwrap_err();
        assert_eq!(err.to_string(), "ip not received");
        assert_eq!(
            err.describe(),
            "ip not received: unexpected status 503 from https://example.com/"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_cause_chain_printed_once() {
        let io = std::io::Error::other("disk full");
        let err: Result<(), _> = Err(StageError::from(io));
        let err = err.at(Stage::Write).unwrap_err();

        let expected = "write not received: IO error: disk full";
        assert_eq!(err.describe(), expected);
        assert_eq!(format!("{:#}", anyhow::Error::from(err)), expected);
    }
}
