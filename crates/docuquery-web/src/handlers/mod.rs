//! HTTP handlers for all web routes.

pub mod home;
pub mod document;
pub mod questions;
pub mod analyze;
