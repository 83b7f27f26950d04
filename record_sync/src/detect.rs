//! Default-value detection.
//!
//! A field is default when it holds the zero value for its kind. Records are
//! treated conservatively: only timestamps and the bool, integer, float, and
//! time wrappers from [`crate::nullable`] can be default, so policies built on
//! this check never skip data in a record type the detector does not
//! understand.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::catalog::{self, FieldDescriptor, Kind};
use crate::nullable::{NullBool, NullFloat, NullInt, NullTime};
use crate::reflect::{Record, Reflect, ReflectRef, Scalar};

/// Returns `true` when `field` on `record` holds its kind's zero value.
///
/// A field missing from `record` is never default.
///
/// # Examples
///
/// ```
/// use record_sync::{Record, detect};
///
/// #[derive(Clone, Default, Record)]
/// struct Flags {
///     pub enabled: bool,
///     pub label: String,
/// }
///
/// let flags = Flags { enabled: true, label: String::new() };
/// let fields = record_sync::enumerate::<Flags>();
/// let defaults: Vec<_> = fields
///     .iter()
///     .filter(|field| detect::is_default(&flags, field))
///     .map(|field| field.name())
///     .collect();
/// assert_eq!(defaults, ["label"]);
/// ```
#[must_use]
pub fn is_default(record: &dyn Record, field: &FieldDescriptor) -> bool {
    catalog::lookup(record, field.name()).is_some_and(is_default_value)
}

/// Returns `true` when `value` is the zero value for its kind.
#[must_use]
pub fn is_default_value(value: &dyn Reflect) -> bool {
    match value.reflect_ref() {
        ReflectRef::Scalar(scalar) => is_zero(scalar),
        ReflectRef::Optional(inner) => inner.is_none(),
        ReflectRef::Sequence(sequence) => sequence.is_empty(),
        ReflectRef::Record(_) | ReflectRef::Opaque if value.kind() == Kind::Record => {
            is_known_default(value)
        }
        ReflectRef::Record(_) | ReflectRef::Dynamic(_) | ReflectRef::Opaque => false,
    }
}

const fn is_zero(scalar: Scalar<'_>) -> bool {
    match scalar {
        Scalar::Bool(flag) => !flag,
        Scalar::Int(v) => v == 0,
        Scalar::Uint(v) => v == 0,
        Scalar::Float(v) => v == 0.0,
        Scalar::Str(text) => text.is_empty(),
    }
}

fn is_known_default(value: &dyn Reflect) -> bool {
    equals_default::<DateTime<Utc>>(value)
        || equals_default::<NaiveDateTime>(value)
        || equals_default::<NullBool>(value)
        || equals_default::<NullInt>(value)
        || equals_default::<NullFloat>(value)
        || equals_default::<NullTime>(value)
}

fn equals_default<T: Default + PartialEq + 'static>(value: &dyn Reflect) -> bool {
    value
        .as_any()
        .downcast_ref::<T>()
        .is_some_and(|candidate| *candidate == T::default())
}
