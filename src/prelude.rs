//! Common types and utilities.

/// Client error type.
pub use crate::error::Error;

/// Client result type.
pub type Result<T> = core::result::Result<T, Error>;
