//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `config` - Inspect the analysis configuration
//! - `core` - Shared setup (config loading, "today", snapshot loading)
//! - `insights` - Spending insights and category breakdown
//! - `recommend` - AI recommendations
//! - `reports` - Full wellness report
//! - `risk` - Risk profile classification
//! - `serve` - Web server command

pub mod config;
pub mod core;
pub mod insights;
pub mod recommend;
pub mod reports;
pub mod risk;
pub mod serve;

// Re-export command functions for main.rs
pub use self::core::*;
pub use config::*;
pub use insights::*;
pub use recommend::*;
pub use reports::*;
pub use risk::*;
pub use serve::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
