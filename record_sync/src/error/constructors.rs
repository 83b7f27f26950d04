//! Constructors and context helpers for the error enums.

use super::{CoerceError, Role, SyncError};
use crate::reflect::{Record, Reflect};

impl CoerceError {
    /// Wrap `self` as the failure of nested field `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use record_sync::CoerceError;
    ///
    /// let err = CoerceError::DepthExceeded { limit: 2 }.in_field("child");
    /// assert_eq!(err.to_string(), "field 'child': nesting exceeds the limit of 2 levels");
    /// ```
    #[must_use]
    pub fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    /// Wrap `self` as the failure of sequence element `index`.
    #[must_use]
    pub fn at_element(self, index: usize) -> Self {
        Self::Element {
            index,
            source: Box::new(self),
        }
    }

    /// Innermost failure, with field and element context stripped.
    #[must_use]
    pub fn innermost(&self) -> &Self {
        let mut current = self;
        while let Self::Field { source, .. } | Self::Element { source, .. } = current {
            current = &**source;
        }
        current
    }

    /// Dotted path of field names and indices leading to the failure.
    ///
    /// Empty when the failure happened at the top of the conversion.
    #[must_use]
    pub fn path(&self) -> String {
        let mut segments = Vec::new();
        let mut current = self;
        loop {
            match current {
                Self::Field { field, source } => {
                    segments.push((*field).to_owned());
                    current = &**source;
                }
                Self::Element { index, source } => {
                    segments.push(index.to_string());
                    current = &**source;
                }
                _ => break,
            }
        }
        segments.join(".")
    }
}

impl SyncError {
    /// Borrow `value` as a record, or fail naming its `role`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotARecord`] when `value` is not a record.
    pub fn require_record(value: &dyn Reflect, role: Role) -> Result<&dyn Record, Self> {
        value.as_record().ok_or_else(|| Self::NotARecord {
            role,
            found: value.type_name(),
        })
    }

    /// Attach top-level field context to a conversion failure.
    #[must_use]
    pub const fn field(
        field: &'static str,
        from: &'static str,
        to: &'static str,
        source: CoerceError,
    ) -> Self {
        Self::Field {
            field,
            from,
            to,
            source,
        }
    }

    /// Conversion failure behind a field error, if any.
    #[must_use]
    pub const fn coerce_error(&self) -> Option<&CoerceError> {
        match self {
            Self::Field { source, .. } => Some(source),
            Self::NotARecord { .. } => None,
        }
    }
}
