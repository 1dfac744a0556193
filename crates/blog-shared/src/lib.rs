//! # Blog Shared
//!
//! View models and response envelopes shared between the page layer and the HTTP server.
//! Everything here is plain serde data, ready for a template renderer.

pub mod response;
pub mod views;

pub use response::{ErrorResponse, PageResponse};
