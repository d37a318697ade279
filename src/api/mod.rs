//! API module
//!
//! This module provides the HTTP host for a materialized report.

pub mod server;

// Re-export commonly used types
pub use server::{router, serve, ApiResponse, ReportState, ServerConfig};
