//! Wire and view models shared by the client and the web UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown in place of an answer the API did not return.
pub const MISSING_ANSWER: &str = "No answer available for this question.";

// ── Wire format ───────────────────────────────────────────────────────────────

/// Body of `POST /hackrx/run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Document reference: a public URL or a `data:` URL carrying the upload.
    pub documents: String,
    pub questions: Vec<String>,
    /// SHA-256 of the uploaded bytes, only sent for uploads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl AnalysisRequest {
    pub fn for_source(source: &DocumentSource, questions: Vec<String>) -> Self {
        Self {
            documents: source.transport_reference().to_string(),
            questions,
            checksum: source.checksum().map(String::from),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub answers: Vec<String>,
}

// ── Document source ───────────────────────────────────────────────────────────

/// A file that passed validation and is ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedUpload {
    pub file_name: String,
    pub size: u64,
    /// Lowercase hex SHA-256 of the file contents.
    pub checksum: String,
    pub mime_type: String,
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Url(String),
    Upload(PreparedUpload),
}

impl DocumentSource {
    /// What the user sees: the URL or the uploaded file name.
    pub fn display_name(&self) -> &str {
        match self {
            DocumentSource::Url(url) => url,
            DocumentSource::Upload(upload) => &upload.file_name,
        }
    }

    /// What goes into the `documents` field of the request.
    pub fn transport_reference(&self) -> &str {
        match self {
            DocumentSource::Url(url) => url,
            DocumentSource::Upload(upload) => &upload.data_url,
        }
    }

    pub fn checksum(&self) -> Option<&str> {
        match self {
            DocumentSource::Url(_) => None,
            DocumentSource::Upload(upload) => Some(&upload.checksum),
        }
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, DocumentSource::Upload(_))
    }
}

// ── Result ────────────────────────────────────────────────────────────────────

/// Questions and answers are parallel arrays and may differ in length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub processing_time_ms: Option<u64>,
    pub document: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(
        questions: Vec<String>,
        answers: Vec<String>,
        processing_time_ms: u64,
        document: impl Into<String>,
    ) -> Self {
        Self {
            questions,
            answers,
            processing_time_ms: Some(processing_time_ms),
            document: Some(document.into()),
            completed_at: Utc::now(),
        }
    }

    /// Answer paired with question `index`, or the fallback text.
    pub fn answer_for(&self, index: usize) -> &str {
        match self.answers.get(index) {
            Some(answer) if !answer.is_empty() => answer,
            _ => MISSING_ANSWER,
        }
    }
}

/// Cut `text` to `max` characters and mark the cut with `...`.
pub fn truncate_display(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
