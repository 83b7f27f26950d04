//! Extensions for attaching context to conversion results.
//!
//! These helpers replace `.map_err(|err| err.in_field(..))` chains when a
//! nested conversion fails, and lift a field's conversion failure into a
//! [`SyncError`] at the top of a call.
//!
//! # Examples
//!
//! ```
//! use record_sync::{CoerceError, CoerceResultExt};
//!
//! let failed: Result<(), CoerceError> = Err(CoerceError::DepthExceeded { limit: 1 });
//! let err = failed.at_element(2).in_field("tags").unwrap_err();
//! assert_eq!(err.path(), "tags.2");
//! ```

use crate::error::{CoerceError, SyncError, SyncResult};

/// Context helpers for `Result<T, CoerceError>`.
pub trait CoerceResultExt<T> {
    /// Report a failure as happening inside nested field `field`.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped in [`CoerceError::Field`].
    fn in_field(self, field: &'static str) -> Result<T, CoerceError>;

    /// Report a failure as happening inside sequence element `index`.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped in [`CoerceError::Element`].
    fn at_element(self, index: usize) -> Result<T, CoerceError>;

    /// Lift a failure into a top-level field error naming both types.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Field`] carrying the original error.
    fn for_field(self, field: &'static str, from: &'static str, to: &'static str) -> SyncResult<T>;
}

impl<T> CoerceResultExt<T> for Result<T, CoerceError> {
    fn in_field(self, field: &'static str) -> Result<T, CoerceError> {
        self.map_err(|err| err.in_field(field))
    }

    fn at_element(self, index: usize) -> Result<T, CoerceError> {
        self.map_err(|err| err.at_element(index))
    }

    fn for_field(self, field: &'static str, from: &'static str, to: &'static str) -> SyncResult<T> {
        self.map_err(|err| SyncError::field(field, from, to, err))
    }
}
