//! Names of the fields a propagation would touch.

use crate::catalog;
use crate::error::{Role, SyncError, SyncResult};
use crate::options::SyncOptions;
use crate::policy::{self, SelectionPolicy};
use crate::reflect::{Record, Reflect};

/// External names of the fields of `source` that every policy accepts and
/// that `destination` also declares, using default [`SyncOptions`].
///
/// Names come from the `json` alias when one is registered and fall back to
/// the internal name. Neither record is modified. Value equality plays no
/// part unless a policy such as [`crate::ValuesDiffer`] checks it.
///
/// # Examples
///
/// ```
/// use record_sync::{IgnoreFields, Record, ValuesDiffer, diff_fields};
///
/// #[derive(Clone, Default, Record)]
/// struct User {
///     pub id: i64,
///     #[record(alias(json = "user_name"))]
///     pub name: String,
///     pub age: i32,
/// }
///
/// let a = User { id: 1, name: "foo".into(), age: 1 };
/// let b = User { id: 2, name: "bar".into(), age: 1 };
/// assert_eq!(diff_fields(&a, &b, &[&IgnoreFields::new(["id"])]), ["user_name", "age"]);
/// assert_eq!(diff_fields(&a, &b, &[&IgnoreFields::new(["id"]), &ValuesDiffer]), ["user_name"]);
/// ```
#[must_use]
pub fn diff_fields<S, D>(source: &S, destination: &D, policies: &[&dyn SelectionPolicy]) -> Vec<String>
where
    S: Record,
    D: Record,
{
    diff_fields_with(&SyncOptions::default(), source, destination, policies)
}

/// [`diff_fields`] with explicit options.
#[must_use]
pub fn diff_fields_with<S, D>(
    options: &SyncOptions,
    source: &S,
    destination: &D,
    policies: &[&dyn SelectionPolicy],
) -> Vec<String>
where
    S: Record,
    D: Record,
{
    diff_records(options, source, destination, policies)
}

/// [`diff_fields`] over values whose shape is only known at run time.
///
/// # Errors
///
/// Returns [`SyncError::NotARecord`] when either value is not a record.
pub fn diff_fields_dyn(
    options: &SyncOptions,
    source: &dyn Reflect,
    destination: &dyn Reflect,
    policies: &[&dyn SelectionPolicy],
) -> SyncResult<Vec<String>> {
    let from = SyncError::require_record(source, Role::Source)?;
    let to = SyncError::require_record(destination, Role::Destination)?;
    Ok(diff_records(options, from, to, policies))
}

fn diff_records(
    options: &SyncOptions,
    source: &dyn Record,
    destination: &dyn Record,
    policies: &[&dyn SelectionPolicy],
) -> Vec<String> {
    let key = options.naming_key();
    source
        .field_descriptors()
        .iter()
        .filter(|field| policy::accepts_all(policies, source, destination, field))
        .filter(|field| catalog::find(destination, field.name()).is_some())
        .map(|field| field.external_name(key).to_owned())
        .collect()
}
