//! Client-side preparation of an uploaded document.
//!
//! A file is accepted when its extension is on the allow-list and it does not
//! exceed the size limit. Accepted files are hashed (SHA-256, shown to the user
//! as a checksum) and Base64-encoded into a `data:` URL for transport.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use docuquery_common::config::UploadConfig;
use docuquery_common::PreparedUpload;

/// What may be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    /// Lower-case, without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from(&UploadConfig::default())
    }
}

impl From<&UploadConfig> for UploadPolicy {
    fn from(cfg: &UploadConfig) -> Self {
        Self {
            max_bytes: cfg.max_bytes,
            allowed_extensions: cfg.allowed_extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }
}

impl UploadPolicy {
    /// "PDF, DOCX, DOC, EML, or MSG (Max 25MB)"
    pub fn accepted_hint(&self) -> String {
        let upper: Vec<String> = self.allowed_extensions.iter().map(|e| e.to_uppercase()).collect();
        let list = match upper.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [init @ .., last] => format!("{}, or {}", init.join(", "), last),
        };
        format!("{} (Max {})", list, self.limit_label())
    }

    /// Value for the `accept` attribute of the file input.
    pub fn accept_attribute(&self) -> String {
        self.allowed_extensions.iter().map(|e| format!(".{e}")).collect::<Vec<_>>().join(",")
    }

    pub fn limit_label(&self) -> String {
        format!("{}MB", self.max_bytes / (1024 * 1024))
    }

    fn allows(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == extension)
    }
}

/// Why a file was turned away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("Please upload a PDF, DOCX, or email file.")]
    InvalidType { extension: Option<String> },

    #[error("Please upload a file smaller than {limit}.")]
    TooLarge { size: u64, limit: String },
}

impl UploadRejection {
    /// Notification title.
    pub fn title(&self) -> &'static str {
        match self {
            UploadRejection::InvalidType { .. } => "Invalid File Type",
            UploadRejection::TooLarge { .. } => "File Too Large",
        }
    }
}

/// Icon family for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Word,
    Email,
    Other,
}

impl FileKind {
    pub fn from_name(name: &str) -> Self {
        match file_extension(name).as_deref() {
            Some("pdf") => FileKind::Pdf,
            Some("docx") | Some("doc") => FileKind::Word,
            Some("eml") | Some("msg") => FileKind::Email,
            _ => FileKind::Other,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            FileKind::Pdf => "file-pdf",
            FileKind::Word => "file-word",
            FileKind::Email => "file-email",
            FileKind::Other => "file-other",
        }
    }
}

/// Lower-cased text after the last `.`, if any.
///
/// A name without a dot (`pdf`, `README`) or ending in one has no extension,
/// so it never matches the allow-list.
pub fn file_extension(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

pub fn mime_type_for(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "eml" => "message/rfc822",
        "msg" => "application/vnd.ms-outlook",
        _ => "application/octet-stream",
    }
}

pub fn validate(name: &str, size: u64, policy: &UploadPolicy) -> Result<String, UploadRejection> {
    let extension = match file_extension(name) {
        Some(ext) if policy.allows(&ext) => ext,
        other => return Err(UploadRejection::InvalidType { extension: other }),
    };
    if size > policy.max_bytes {
        return Err(UploadRejection::TooLarge { size, limit: policy.limit_label() });
    }
    Ok(extension)
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn checksum_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Validate, hash and encode a file for submission.
pub fn prepare(name: &str, bytes: &[u8], policy: &UploadPolicy) -> Result<PreparedUpload, UploadRejection> {
    let size = bytes.len() as u64;
    let extension = validate(name, size, policy)?;
    let mime_type = mime_type_for(&extension).to_string();
    let checksum = checksum_hex(bytes);
    debug!(file = name, size, %checksum, "Prepared upload");
    Ok(PreparedUpload {
        file_name: name.to_string(),
        size,
        data_url: data_url(&mime_type, bytes),
        checksum,
        mime_type,
    })
}

/// File size in megabytes with two decimals.
pub fn size_megabytes(size: u64) -> String {
    format!("{:.2}", size as f64 / 1024.0 / 1024.0)
}
