//! Infrastructure layer for cross-cutting concerns.
//!
//! Provides foundational infrastructure including:
//! - Service configuration loading and validation
//! - Error handling and result types
//! - Input path resolution

pub mod config;
pub mod error;
pub mod paths;
