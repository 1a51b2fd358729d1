//! Stateless services used by the sign and verify workflows.

pub mod decoder;

pub use decoder::ResponseDecoder;
