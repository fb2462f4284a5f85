//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod health;
pub mod insights;
pub mod recommendations;
pub mod reports;
pub mod risk;

// Re-export all handlers for use in router
pub use health::*;
pub use insights::*;
pub use recommendations::*;
pub use reports::*;
pub use risk::*;

use serde::Deserialize;

/// Query parameters shared by analysis endpoints
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    /// Date treated as "today" (YYYY-MM-DD, defaults to the server's local date)
    pub as_of: Option<String>,
}
