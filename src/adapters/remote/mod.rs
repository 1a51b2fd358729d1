//! Remote signing service adapter.
//!
//! Talks to the HTTP service that performs the actual Authenticode signing
//! and verification.

pub mod client;
pub mod protocol;
