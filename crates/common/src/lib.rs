//! Common types, persisted field shapes, and errors shared across `medivault` crates.

pub mod error;
pub mod record;

pub use error::VaultError;
