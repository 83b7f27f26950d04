//! Policy-gated propagation of field values between records.
//!
//! `record_sync` copies values from the fields of one record onto the
//! same-named fields of another, converting between compatible declared
//! types along the way: integers of different widths, optional and plain
//! values, nested records, sequences, and closed variant enums. A list of
//! [`SelectionPolicy`] values decides which fields take part, and
//! [`diff_fields`] reports the fields a propagation would touch.
//!
//! Record types opt in with `#[derive(Record)]`, implemented in the
//! companion `record_sync_macros` crate.
//!
//! ```
//! use record_sync::{DestinationIsDefault, Record, propagate};
//!
//! #[derive(Clone, Default, Record)]
//! struct Incoming {
//!     pub name: String,
//!     pub age: Option<i32>,
//! }
//!
//! #[derive(Clone, Default, Record)]
//! struct Stored {
//!     pub name: String,
//!     pub age: i64,
//!     pub verified: bool,
//! }
//!
//! let incoming = Incoming { name: "Ada".into(), age: Some(36) };
//! let mut stored = Stored { name: "Lovelace".into(), ..Stored::default() };
//! propagate(&incoming, &mut stored, &[&DestinationIsDefault])?;
//! assert_eq!((stored.name.as_str(), stored.age), ("Lovelace", 36));
//! # Ok::<(), record_sync::SyncError>(())
//! ```

extern crate self as record_sync;

pub use record_sync_macros::Record;

pub mod catalog;
pub mod coerce;
pub mod detect;
mod diff;
mod error;
pub mod nullable;
mod options;
pub mod policy;
mod propagate;
pub mod reflect;
mod result_ext;
mod sync;

pub use catalog::{FieldDescriptor, Kind, enumerate};
pub use coerce::coerce;
pub use diff::{diff_fields, diff_fields_dyn, diff_fields_with};
pub use error::{CoerceError, Role, SyncError, SyncResult};
pub use nullable::{Null, NullBool, NullFloat, NullInt, NullString, NullTime};
pub use options::{DEFAULT_MAX_DEPTH, DEFAULT_NAMING_KEY, SyncOptions};
pub use policy::{
    DestinationIsDefault, IgnoreFields, MatchValue, SelectionPolicy, SourceIsNotDefault,
    TargetFields, ValuesDiffer,
};
pub use propagate::{propagate, propagate_dyn, propagate_with};
pub use reflect::{
    OptionalSlot, Record, Reflect, ReflectMut, ReflectRef, Scalar, ScalarFault, ScalarSlot,
    Sequence, Variant,
};
pub use result_ext::CoerceResultExt;
pub use sync::Synchronizer;
