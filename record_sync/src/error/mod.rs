//! Error types produced by the propagation and diff engines.

mod constructors;
mod types;

pub use types::{CoerceError, Role, SyncError};

/// Result alias used by the engine entry points.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests;
