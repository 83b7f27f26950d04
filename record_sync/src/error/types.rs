//! Error enums for whole calls and single value conversions.

use std::fmt;

use thiserror::Error;

/// Which side of a call an input was supplied as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The record values are read from.
    Source,
    /// The record values are written to.
    Destination,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Destination => "destination",
        })
    }
}

/// Errors returned by [`crate::propagate`] and [`crate::diff_fields`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    /// An input was not a record.
    #[error("{role} is not a record: found `{found}`")]
    NotARecord {
        /// Side of the call that received the value.
        role: Role,
        /// Type name of the value supplied.
        found: &'static str,
    },

    /// A top-level field could not be copied.
    #[error("failed to copy field '{field}' from `{from}` to `{to}`: {source}")]
    Field {
        /// Internal name of the field.
        field: &'static str,
        /// Declared type of the source field.
        from: &'static str,
        /// Declared type of the destination field.
        to: &'static str,
        /// Underlying conversion failure.
        #[source]
        source: CoerceError,
    },
}

/// Errors raised while converting one value into another.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoerceError {
    /// No conversion path exists between the two types.
    #[error("no conversion from `{from}` to `{to}`")]
    Unavailable {
        /// Concrete type of the source value.
        from: &'static str,
        /// Concrete type of the destination value.
        to: &'static str,
    },

    /// The value does not fit the destination type.
    #[error("value of `{from}` does not fit in `{to}`")]
    OutOfRange {
        /// Concrete type of the source value.
        from: &'static str,
        /// Concrete type of the destination value.
        to: &'static str,
    },

    /// Nesting went deeper than the configured limit.
    #[error("nesting exceeds the limit of {limit} levels")]
    DepthExceeded {
        /// Configured maximum depth.
        limit: usize,
    },

    /// A nested record field failed.
    #[error("field '{field}': {source}")]
    Field {
        /// Internal name of the nested field.
        field: &'static str,
        /// Failure inside the field.
        #[source]
        source: Box<CoerceError>,
    },

    /// A sequence element failed.
    #[error("element {index}: {source}")]
    Element {
        /// Position of the element.
        index: usize,
        /// Failure inside the element.
        #[source]
        source: Box<CoerceError>,
    },
}
