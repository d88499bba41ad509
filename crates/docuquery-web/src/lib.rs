//! docuquery-web: web GUI for DocuQuery
//! Lets a user:
//!   - submit a document by URL or file upload
//!   - compose questions (with sample questions)
//!   - send both to the analysis API and read the answers
//! Progress and notifications are also pushed over SSE.

pub mod router;
pub mod handlers;
pub mod state;
pub mod sse;
pub mod views;
