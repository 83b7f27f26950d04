//! Static reflection used by the propagation and diff engines.
//!
//! [`Reflect`] is the object-safe view every field value exposes. It reports
//! the value's [`Kind`], hands out a shape-specific borrow through
//! [`ReflectRef`] / [`ReflectMut`], and knows how to clone-assign from and
//! compare against another value of the same concrete type. Records add a
//! descriptor table through [`Record`]; `#[derive(Record)]` writes both
//! implementations.

use std::any::{Any, TypeId};

use crate::catalog::{FieldDescriptor, Kind};

mod containers;
mod primitives;
mod time;


/// Object-safe access to a value whose shape is known statically.
pub trait Reflect: Any {
    /// Kind of this value.
    fn kind(&self) -> Kind;

    /// Kind of the implementing type, usable without an instance.
    fn static_kind() -> Kind
    where
        Self: Sized;

    /// Concrete type name used in diagnostics.
    fn type_name(&self) -> &'static str;

    /// Upcast for downcasting and type identity checks.
    ///
    /// Transparent wrappers such as `Box<T>` return the inner value, so two
    /// values compare as the same type whenever their payloads do.
    fn as_any(&self) -> &dyn Any;

    /// Mutable counterpart of [`Reflect::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Shape-specific read access.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Shape-specific write access.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Replace `self` with a clone of `source` when both share a concrete type.
    ///
    /// Returns `false`, leaving `self` untouched, when the types differ.
    fn assign_from(&mut self, source: &dyn Reflect) -> bool;

    /// Structural equality; values of different concrete types are never equal.
    fn reflect_eq(&self, other: &dyn Reflect) -> bool;

    /// Borrow as a record when this value is one.
    fn as_record(&self) -> Option<&dyn Record> {
        match self.reflect_ref() {
            ReflectRef::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Mutably borrow as a record when this value is one.
    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        match self.reflect_mut() {
            ReflectMut::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// A struct with named fields reachable through a descriptor table.
///
/// Implementations are normally generated by `#[derive(Record)]`, which
/// requires the type to implement `Clone` and `Default`.
pub trait Record: Reflect {
    /// Ordered descriptors of the visible public fields.
    ///
    /// Flattened members appear alongside the fields they promote, with
    /// shadowed and ambiguous names resolved by [`crate::catalog::visible`].
    fn descriptors() -> Vec<FieldDescriptor>
    where
        Self: Sized;

    /// Every descriptor reachable through flattening, before names are
    /// resolved.
    fn declared_descriptors() -> Vec<FieldDescriptor>
    where
        Self: Sized,
    {
        Self::descriptors()
    }

    /// Object-safe form of [`Record::descriptors`].
    fn field_descriptors(&self) -> Vec<FieldDescriptor>;

    /// Field declared at position `index`, if it is reflected.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Mutable field declared at position `index`, if it is reflected.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Reset every field, public or not, to the type's default.
    fn reset(&mut self);
}

/// An enum acting as a closed set of payload types.
///
/// Each variant carries exactly one value; a dynamic destination accepts a
/// source value when one of its variants carries the source's concrete type.
pub trait Variant: Reflect {
    /// Name of the active variant.
    fn variant_name(&self) -> &'static str;

    /// Payload of the active variant.
    fn payload(&self) -> &dyn Reflect;

    /// Switch to the variant carrying `payload_type`, reset to its default,
    /// and return the payload for writing.
    ///
    /// Returns `None`, leaving `self` untouched, when no variant matches.
    fn select(&mut self, payload_type: TypeId) -> Option<&mut dyn Reflect>;
}

/// Homogeneous, resizable sequence of reflected elements.
pub trait Sequence {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns `true` when the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`.
    fn element(&self, index: usize) -> Option<&dyn Reflect>;

    /// Mutable element at `index`.
    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Replace the contents with `len` default elements.
    fn rebuild(&mut self, len: usize);
}

/// Write access to an optional value.
pub trait OptionalSlot {
    /// Returns `true` when no value is present.
    fn is_unset(&self) -> bool;

    /// Remove the value.
    fn clear(&mut self);

    /// Inner value, allocating a default one when absent.
    fn get_or_insert_default(&mut self) -> &mut dyn Reflect;
}

/// Write access to a scalar with checked conversion.
pub trait ScalarSlot {
    /// Convert `value` into the slot's type and store it.
    ///
    /// # Errors
    ///
    /// Returns [`ScalarFault::Incompatible`] when no conversion exists between
    /// the two kinds and [`ScalarFault::OutOfRange`] when the value does not
    /// fit the destination type.
    fn store(&mut self, value: Scalar<'_>) -> Result<(), ScalarFault>;
}

/// Why a scalar could not be stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarFault {
    /// The source kind cannot be converted to the destination kind.
    Incompatible,
    /// The value does not fit the destination type.
    OutOfRange,
}

/// Borrowed scalar value, widened to a common representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar<'a> {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating-point number.
    Float(f64),
    /// String slice.
    Str(&'a str),
}

/// Shape-specific read access returned by [`Reflect::reflect_ref`].
pub enum ReflectRef<'a> {
    /// A scalar value.
    Scalar(Scalar<'a>),
    /// An optional value, `None` when unset.
    Optional(Option<&'a dyn Reflect>),
    /// A sequence.
    Sequence(&'a dyn Sequence),
    /// A record.
    Record(&'a dyn Record),
    /// A variant enum.
    Dynamic(&'a dyn Variant),
    /// A value only copied between identical types.
    Opaque,
}

/// Shape-specific write access returned by [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    /// A scalar slot.
    Scalar(&'a mut dyn ScalarSlot),
    /// An optional slot.
    Optional(&'a mut dyn OptionalSlot),
    /// A sequence.
    Sequence(&'a mut dyn Sequence),
    /// A record.
    Record(&'a mut dyn Record),
    /// A variant enum.
    Dynamic(&'a mut dyn Variant),
    /// A value only copied between identical types.
    Opaque,
}

/// Deep structural equality between two reflected values.
///
/// Mirrors the semantics of `PartialEq` on identical types; values of
/// different concrete types are never equal, even when numerically equal.
///
/// # Examples
///
/// ```
/// use record_sync::reflect::deep_equal;
///
/// assert!(deep_equal(&vec![Some(1_i32)], &vec![Some(1_i32)]));
/// assert!(!deep_equal(&1_i32, &1_i64));
/// ```
#[must_use]
pub fn deep_equal(left: &dyn Reflect, right: &dyn Reflect) -> bool {
    left.reflect_eq(right)
}

/// `true` when both values share a concrete type.
#[must_use]
pub fn same_type(left: &dyn Reflect, right: &dyn Reflect) -> bool {
    left.as_any().type_id() == right.as_any().type_id()
}

/// Clone `source` into `target` when it has type `T`.
///
/// Building block for [`Reflect::assign_from`] implementations.
pub fn assign_same_type<T: Clone + 'static>(target: &mut T, source: &dyn Reflect) -> bool {
    let Some(value) = source.as_any().downcast_ref::<T>() else {
        return false;
    };
    target.clone_from(value);
    true
}

/// Compare `left` with `right` through `PartialEq` when `right` has type `T`.
///
/// Building block for [`Reflect::reflect_eq`] implementations.
#[must_use]
pub fn eq_same_type<T: PartialEq + 'static>(left: &T, right: &dyn Reflect) -> bool {
    right
        .as_any()
        .downcast_ref::<T>()
        .is_some_and(|candidate| left == candidate)
}

/// Implement [`Reflect`] for a type the engine should treat as an opaque
/// value: copied only onto the same type and compared with `PartialEq`.
///
/// The type must implement `Clone` and `PartialEq`. The optional second
/// argument picks the reported [`Kind`]; it defaults to [`Kind::Other`].
///
/// ```
/// #[derive(Clone, PartialEq)]
/// struct Checksum([u8; 4]);
///
/// record_sync::reflect_opaque!(Checksum);
///
/// use record_sync::{Kind, Reflect};
/// assert_eq!(Checksum([0; 4]).kind(), Kind::Other);
/// ```
#[macro_export]
macro_rules! reflect_opaque {
    ($ty:ty) => {
        $crate::reflect_opaque!($ty, $crate::Kind::Other);
    };
    ($ty:ty, $kind:expr) => {
        impl $crate::Reflect for $ty {
            fn kind(&self) -> $crate::Kind {
                $kind
            }

            fn static_kind() -> $crate::Kind {
                $kind
            }

            fn type_name(&self) -> &'static str {
                ::core::any::type_name::<Self>()
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                $crate::ReflectRef::Opaque
            }

            fn reflect_mut(&mut self) -> $crate::ReflectMut<'_> {
                $crate::ReflectMut::Opaque
            }

            fn assign_from(&mut self, source: &dyn $crate::Reflect) -> bool {
                $crate::reflect::assign_same_type(self, source)
            }

            fn reflect_eq(&self, other: &dyn $crate::Reflect) -> bool {
                $crate::reflect::eq_same_type(self, other)
            }
        }
    };
}
