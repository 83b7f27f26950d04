//! Recursive, kind-directed value conversion.
//!
//! [`coerce`] copies one reflected value onto another whose declared type
//! may differ. The steps, in order:
//!
//! 1. An optional source contributes its inner value; `None` clears an
//!    optional destination and is otherwise a no-op.
//! 2. An optional destination is allocated when empty and written through.
//! 3. Values of the same concrete type are cloned.
//! 4. A variant source contributes its payload.
//! 5. A variant destination switches to the variant carrying the source's
//!    type.
//! 6. Scalars convert with range checks.
//! 7. Sequences are rebuilt and copied element by element.
//! 8. Records are reset and copied field by field, matched by name.
//!
//! Anything else is [`CoerceError::Unavailable`].

use crate::catalog;
use crate::error::CoerceError;
use crate::options::SyncOptions;
use crate::result_ext::CoerceResultExt;
use crate::reflect::{Record, Reflect, ReflectMut, ReflectRef, ScalarFault, Sequence};

/// Copy `source` onto `destination`, converting between compatible types.
///
/// `destination` is left partially written when an error is returned.
///
/// # Errors
///
/// Returns [`CoerceError::Unavailable`] when no conversion path exists,
/// [`CoerceError::OutOfRange`] when a scalar does not fit, and
/// [`CoerceError::DepthExceeded`] when nesting exceeds
/// [`SyncOptions::max_depth`]. Failures below the top level are wrapped in
/// [`CoerceError::Field`] or [`CoerceError::Element`] context.
///
/// # Examples
///
/// ```
/// use record_sync::{CoerceError, SyncOptions, coerce};
///
/// let mut narrow = 0_u8;
/// coerce(&Some(200_i64), &mut narrow, &SyncOptions::default())?;
/// assert_eq!(narrow, 200);
///
/// let err = coerce(&300_i64, &mut narrow, &SyncOptions::default());
/// assert!(matches!(err, Err(CoerceError::OutOfRange { .. })));
/// # Ok::<(), CoerceError>(())
/// ```
pub fn coerce(
    source: &dyn Reflect,
    destination: &mut dyn Reflect,
    options: &SyncOptions,
) -> Result<(), CoerceError> {
    Walk::new(options).value(source, destination, 0)
}

/// Recursion state shared by one top-level conversion.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Walk {
    limit: usize,
}

impl Walk {
    pub(crate) const fn new(options: &SyncOptions) -> Self {
        Self {
            limit: options.max_depth(),
        }
    }

    const fn descend(self, depth: usize) -> Result<usize, CoerceError> {
        if depth >= self.limit {
            Err(CoerceError::DepthExceeded { limit: self.limit })
        } else {
            Ok(depth + 1)
        }
    }

    pub(crate) fn value(
        self,
        source: &dyn Reflect,
        destination: &mut dyn Reflect,
        depth: usize,
    ) -> Result<(), CoerceError> {
        let from = source.type_name();
        let to = destination.type_name();

        if let ReflectRef::Optional(inner) = source.reflect_ref() {
            return match inner {
                Some(value) => self.value(value, destination, depth),
                None => {
                    if let ReflectMut::Optional(slot) = destination.reflect_mut() {
                        slot.clear();
                    }
                    Ok(())
                }
            };
        }

        if let ReflectMut::Optional(slot) = destination.reflect_mut() {
            return self.value(source, slot.get_or_insert_default(), depth);
        }

        if destination.assign_from(source) {
            return Ok(());
        }

        if let ReflectRef::Dynamic(variant) = source.reflect_ref() {
            return self.value(variant.payload(), destination, self.descend(depth)?);
        }

        if let ReflectMut::Dynamic(variant) = destination.reflect_mut() {
            let next = self.descend(depth)?;
            return match variant.select(source.as_any().type_id()) {
                Some(payload) => self.value(source, payload, next),
                None => Err(CoerceError::Unavailable { from, to }),
            };
        }

        match (source.reflect_ref(), destination.reflect_mut()) {
            (ReflectRef::Scalar(value), ReflectMut::Scalar(slot)) => {
                slot.store(value).map_err(|fault| match fault {
                    ScalarFault::Incompatible => CoerceError::Unavailable { from, to },
                    ScalarFault::OutOfRange => CoerceError::OutOfRange { from, to },
                })
            }
            (ReflectRef::Sequence(items), ReflectMut::Sequence(target)) => {
                self.sequence(items, target, self.descend(depth)?)
            }
            (ReflectRef::Record(record), ReflectMut::Record(target)) => {
                self.record(record, target, self.descend(depth)?)
            }
            _ => Err(CoerceError::Unavailable { from, to }),
        }
    }

    fn sequence(
        self,
        items: &dyn Sequence,
        target: &mut dyn Sequence,
        depth: usize,
    ) -> Result<(), CoerceError> {
        target.rebuild(items.len());
        for index in 0..items.len() {
            if let (Some(item), Some(slot)) = (items.element(index), target.element_mut(index)) {
                self.value(item, slot, depth).at_element(index)?;
            }
        }
        Ok(())
    }

    fn record(
        self,
        source: &dyn Record,
        target: &mut dyn Record,
        depth: usize,
    ) -> Result<(), CoerceError> {
        target.reset();
        for field in source.field_descriptors() {
            let Some(value) = catalog::resolve(source, field.index()) else {
                continue;
            };
            let Some(slot) = catalog::lookup_mut(target, field.name()) else {
                tracing::trace!(field = field.name(), "nested destination has no matching field");
                continue;
            };
            self.value(value, slot, depth).in_field(field.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for conversion paths that need no fixture records.

    use super::*;
    use rstest::rstest;

    fn run(source: &dyn Reflect, destination: &mut dyn Reflect) -> Result<(), CoerceError> {
        coerce(source, destination, &SyncOptions::default())
    }

    #[rstest]
    fn none_clears_optional_destination() -> Result<(), CoerceError> {
        let mut slot = Some(5_i32);
        run(&None::<i32>, &mut slot)?;
        assert_eq!(slot, None);
        Ok(())
    }

    #[rstest]
    fn none_leaves_plain_destination_alone() -> Result<(), CoerceError> {
        let mut plain = 5_i32;
        run(&None::<i32>, &mut plain)?;
        assert_eq!(plain, 5);
        Ok(())
    }

    #[rstest]
    fn some_allocates_optional_destination() -> Result<(), CoerceError> {
        let mut slot: Option<Box<i64>> = None;
        run(&Some(7_i16), &mut slot)?;
        assert_eq!(slot.as_deref(), Some(&7));
        Ok(())
    }

    #[rstest]
    fn plain_source_fills_optional_destination() -> Result<(), CoerceError> {
        let mut slot: Option<String> = None;
        run(&String::from("x"), &mut slot)?;
        assert_eq!(slot.as_deref(), Some("x"));
        Ok(())
    }

    #[rstest]
    fn sequences_convert_element_types() -> Result<(), CoerceError> {
        let mut target = vec![9_i64; 5];
        run(&vec![1_u8, 2, 3], &mut target)?;
        assert_eq!(target, vec![1, 2, 3]);
        Ok(())
    }

    #[rstest]
    fn element_errors_carry_the_index() {
        let mut target: Vec<u8> = Vec::new();
        let err = run(&vec![1_i32, 256], &mut target);
        assert_eq!(
            err,
            Err(CoerceError::OutOfRange {
                from: "i32",
                to: "u8"
            }
            .at_element(1))
        );
    }

    #[rstest]
    fn sequence_and_scalar_do_not_mix() {
        let mut target = 0_i32;
        let err = run(&vec![1_i32], &mut target);
        assert!(matches!(err, Err(CoerceError::Unavailable { .. })));
    }

    #[rstest]
    fn depth_limit_applies_to_sequences() {
        let options = SyncOptions::default().with_max_depth(1);
        let mut target: Vec<Vec<i64>> = Vec::new();
        let err = coerce(&vec![vec![1_i32]], &mut target, &options);
        assert_eq!(
            err,
            Err(CoerceError::DepthExceeded { limit: 1 }.at_element(0))
        );
    }

    #[rstest]
    fn same_type_is_cloned() -> Result<(), CoerceError> {
        let source = vec![Some(String::from("a")), None];
        let mut target: Vec<Option<String>> = Vec::new();
        run(&source, &mut target)?;
        assert_eq!(target, source);
        Ok(())
    }
}
