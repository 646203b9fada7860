//! Docqa Core Library
//!
//! This crate provides the foundational utilities for the docqa pipeline:
//! - Error handling (`RagError`, `RagResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{RagError, RagResult};
