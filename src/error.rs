use std::time::Duration;

use chromiumoxide::error::CdpError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

use crate::paper::PaperParseError;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser error: {0}")]
    Browser(#[from] CdpError),

    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("PDF generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PdfError {
    pub fn invalid_options(message: impl Into<String>) -> Self {
        PdfError::InvalidOptions(message.into())
    }

    pub fn launch(message: impl Into<String>) -> Self {
        PdfError::Launch(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            PdfError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions for the input and output.",
            ),
            PdfError::Browser(e) => {
                let message = e.to_string();
                let lower = message.to_ascii_lowercase();
                if lower.contains("page range") {
                    ErrorPayload::new(
                        ErrorCategory::Browser,
                        message,
                        "Check --page-ranges (e.g., 1-3,5) against the document's page count.",
                    )
                } else if lower.contains("content area is empty") || lower.contains("print parameters") {
                    ErrorPayload::new(
                        ErrorCategory::Browser,
                        message,
                        "Reduce margins or scale so the printable area is not empty.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Browser,
                        message,
                        "Re-run with --verbose to see the browser session steps.",
                    )
                }
            }
            PdfError::Launch(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("could not auto detect") || lower.contains("executable") {
                    ErrorPayload::new(
                        ErrorCategory::Browser,
                        msg.to_string(),
                        "Install Chrome/Chromium or point CHROME_PATH (or --chrome) at the executable.",
                    )
                } else if lower.contains("sandbox") {
                    ErrorPayload::new(
                        ErrorCategory::Browser,
                        msg.to_string(),
                        "When running as root or inside a container, pass --no-sandbox.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Browser,
                        msg.to_string(),
                        "Verify the browser starts on its own; try --no-sandbox in containers.",
                    )
                }
            }
            PdfError::Timeout(limit) => ErrorPayload::new(
                ErrorCategory::Timeout,
                format!("PDF generation timed out after {:?}", limit),
                "Increase --timeout, shorten --wait-ms, or check that --wait-for matches a visible element.",
            ),
            PdfError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify URL/format (e.g., https://example.com).",
            ),
            PdfError::InvalidOptions(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("scale") {
                    ErrorPayload::new(
                        ErrorCategory::Options,
                        msg.to_string(),
                        "Use a --scale between 0.1 and 2.0.",
                    )
                } else if lower.contains("margin") {
                    ErrorPayload::new(
                        ErrorCategory::Options,
                        msg.to_string(),
                        "Margins are in inches and must be non-negative and smaller than the paper.",
                    )
                } else if lower.contains("paper") {
                    ErrorPayload::new(
                        ErrorCategory::Options,
                        msg.to_string(),
                        "Use --paper A4|A3|Letter|Legal|Tabloid or --paper-size WIDTHxHEIGHT in inches.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Options,
                        msg.to_string(),
                        "Check render flags; run with --help for accepted values.",
                    )
                }
            }
            PdfError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check JSON/serialization inputs; run with --verbose for details.",
            ),
            PdfError::Config(msg) => ErrorPayload::new(
                ErrorCategory::Config,
                msg.to_string(),
                "Check the config file (TOML) and flags; CLI flags override config values.",
            ),
        }
    }
}

impl From<PaperParseError> for PdfError {
    fn from(err: PaperParseError) -> Self {
        PdfError::InvalidOptions(format!("Invalid paper: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Options,
    Io,
    Browser,
    Timeout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_payload_points_at_chrome_path() {
        let err = PdfError::launch("Could not auto detect a chrome executable");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Browser);
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("CHROME_PATH"),
            "expected remediation to mention CHROME_PATH, got: {remediation}"
        );
    }

    #[test]
    fn launch_payload_suggests_no_sandbox() {
        let err = PdfError::launch("Running as root without --no-sandbox is not supported");
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("--no-sandbox"),
            "expected sandbox remediation, got: {remediation}"
        );
    }

    #[test]
    fn timeout_payload_mentions_flags() {
        let err = PdfError::Timeout(Duration::from_secs(30));
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Timeout);
        assert!(payload.message.contains("30s"));
        let remediation = payload.remediation.unwrap_or_default();
        assert!(remediation.contains("--timeout"));
        assert!(remediation.contains("--wait-for"));
    }

    #[test]
    fn scale_payload_lists_range() {
        let err = PdfError::invalid_options("scale 3 is outside 0.1..=2.0");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Options);
        assert!(payload
            .remediation
            .unwrap_or_default()
            .contains("between 0.1 and 2.0"));
    }

    #[test]
    fn margin_payload_explains_units() {
        let err = PdfError::invalid_options("margins leave no printable area");
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("inches"),
            "expected margin remediation, got: {remediation}"
        );
    }

    #[test]
    fn paper_parse_error_becomes_invalid_options() {
        let err: PdfError = PaperParseError::InvalidFormat.into();
        assert!(matches!(err, PdfError::InvalidOptions(_)));
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(remediation.contains("--paper-size"));
    }

    #[test]
    fn payload_serializes_lowercase_category() {
        let payload = PdfError::Config("bad".to_string()).to_payload();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["category"], "config");
        assert_eq!(json["message"], "bad");
        assert!(json["remediation"].is_string());
    }
}
