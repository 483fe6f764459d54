use crate::error::ErrorPayload;
use crate::source::SourceKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Schema version for output payloads.
pub const CHROMEPDF_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum PdfOutput {
    Convert(ConvertOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOutput {
    pub version: String,
    pub source: SourceDescriptor,
    pub output_path: PathBuf,
    pub bytes: usize,
    /// Named format or `WIDTHxHEIGHT`; absent when the browser default applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper: Option<String>,
    pub landscape: bool,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
