//! docuquery-common: shared types, errors and configuration for the DocuQuery crates.

pub mod error;
pub mod config;
pub mod models;

// Re-export commonly used types
pub use error::{DocuQueryError, Result};
pub use config::{Config, ApiConfig, ServerConfig, UploadConfig};
pub use models::{
    AnalysisRequest, AnalysisResponse, AnalysisResult, DocumentSource, PreparedUpload,
    truncate_display,
};
