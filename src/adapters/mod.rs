//! Adapter layer modules for external system integration.
//!
//! Provides adapters for:
//! - The remote signing service (HTTP client and wire protocol)

pub mod remote;
