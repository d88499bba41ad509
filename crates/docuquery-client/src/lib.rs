//! docuquery-client: HTTP wrapper around the document-analysis API
//! plus the client-side pieces that prepare a submission:
//!   - upload validation, SHA-256 checksum and Base64 transport encoding
//!   - the editable question list

pub mod api;
pub mod upload;
pub mod questions;

pub use api::{AnalysisBackend, ApiClient, ApiResponse, ANALYZE_ENDPOINT};
pub use questions::{QuestionList, SAMPLE_QUESTIONS};
pub use upload::{FileKind, UploadPolicy, UploadRejection};
