//! BizPub Common Library
//!
//! Shared code for the BizPub explorer including:
//! - Article dataset model and CSV loading
//! - Load-once dataset cache
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod cache;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use cache::DatasetCache;
pub use config::AppConfig;
pub use dataset::{Article, Dataset};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
