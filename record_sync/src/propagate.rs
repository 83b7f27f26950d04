//! Policy-gated propagation of field values between records.

use crate::catalog;
use crate::coerce::Walk;
use crate::error::{Role, SyncError, SyncResult};
use crate::options::SyncOptions;
use crate::policy::{self, SelectionPolicy};
use crate::reflect::{Record, Reflect};
use crate::result_ext::CoerceResultExt;

/// Copy every selected field of `source` onto the same-named field of
/// `destination`, using default [`SyncOptions`].
///
/// Fields are visited in `source` declaration order. A field is copied when
/// every policy accepts it and `destination` has a field with the same
/// internal name; everything else is skipped silently.
///
/// # Errors
///
/// Returns [`SyncError::Field`] for the first field that cannot be converted.
/// Fields visited before the failure stay written.
///
/// # Examples
///
/// ```
/// use record_sync::{IgnoreFields, Record, propagate};
///
/// #[derive(Clone, Default, Record)]
/// struct Draft {
///     pub id: u32,
///     pub title: String,
/// }
///
/// #[derive(Clone, Default, Record)]
/// struct Article {
///     pub id: u64,
///     pub title: String,
///     pub views: u64,
/// }
///
/// let draft = Draft { id: 7, title: "Hello".into() };
/// let mut article = Article { views: 3, ..Article::default() };
/// propagate(&draft, &mut article, &[&IgnoreFields::new(["id"])])?;
/// assert_eq!((article.id, article.title.as_str(), article.views), (0, "Hello", 3));
/// # Ok::<(), record_sync::SyncError>(())
/// ```
pub fn propagate<S, D>(
    source: &S,
    destination: &mut D,
    policies: &[&dyn SelectionPolicy],
) -> SyncResult<()>
where
    S: Record,
    D: Record,
{
    propagate_with(&SyncOptions::default(), source, destination, policies)
}

/// [`propagate`] with explicit options.
///
/// # Errors
///
/// Returns [`SyncError::Field`] for the first field that cannot be converted.
pub fn propagate_with<S, D>(
    options: &SyncOptions,
    source: &S,
    destination: &mut D,
    policies: &[&dyn SelectionPolicy],
) -> SyncResult<()>
where
    S: Record,
    D: Record,
{
    propagate_records(options, source, destination, policies)
}

/// [`propagate`] over values whose shape is only known at run time.
///
/// # Errors
///
/// Returns [`SyncError::NotARecord`] when either value is not a record, and
/// [`SyncError::Field`] for the first field that cannot be converted.
pub fn propagate_dyn(
    options: &SyncOptions,
    source: &dyn Reflect,
    destination: &mut dyn Reflect,
    policies: &[&dyn SelectionPolicy],
) -> SyncResult<()> {
    let from = SyncError::require_record(source, Role::Source)?;
    let found = destination.type_name();
    let to = destination
        .as_record_mut()
        .ok_or(SyncError::NotARecord {
            role: Role::Destination,
            found,
        })?;
    propagate_records(options, from, to, policies)
}

fn propagate_records(
    options: &SyncOptions,
    source: &dyn Record,
    destination: &mut dyn Record,
    policies: &[&dyn SelectionPolicy],
) -> SyncResult<()> {
    let walk = Walk::new(options);
    let mut copied = 0_usize;
    for field in source.field_descriptors() {
        if !policy::accepts_all(policies, source, destination, &field) {
            tracing::trace!(field = field.name(), "field rejected by policy");
            continue;
        }
        let Some(value) = catalog::resolve(source, field.index()) else {
            continue;
        };
        let Some(slot) = catalog::lookup_mut(destination, field.name()) else {
            tracing::trace!(field = field.name(), "destination has no matching field");
            continue;
        };
        let to = slot.type_name();
        walk.value(value, slot, 0)
            .for_field(field.name(), field.type_name(), to)
            .inspect_err(|err| tracing::debug!(error = %err, "propagation aborted"))?;
        copied += 1;
    }
    tracing::debug!(
        source = source.type_name(),
        destination = destination.type_name(),
        copied,
        "propagation finished"
    );
    Ok(())
}
