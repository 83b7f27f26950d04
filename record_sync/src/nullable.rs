//! Nullable value wrappers.
//!
//! [`Null<T>`] pairs a value with a validity flag, the shape database drivers
//! use for nullable columns. The wrapper is a record with the fields `value`
//! and `valid`, so two wrappers over convertible payloads propagate field by
//! field, and its default (invalid) state counts as a default value.

use std::any::Any;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::{FieldDescriptor, Kind};
use crate::reflect::{Record, Reflect, ReflectMut, ReflectRef};

/// A value that may be absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Null<T> {
    /// Payload; meaningful only when `valid` is set.
    pub value: T,
    /// Whether `value` is present.
    pub valid: bool,
}

/// Nullable boolean.
pub type NullBool = Null<bool>;
/// Nullable 64-bit integer.
pub type NullInt = Null<i64>;
/// Nullable 64-bit float.
pub type NullFloat = Null<f64>;
/// Nullable string.
pub type NullString = Null<String>;
/// Nullable UTC timestamp.
pub type NullTime = Null<DateTime<Utc>>;

impl<T> Null<T> {
    /// Wrap `value`, marking it present when `valid` is set.
    #[must_use]
    pub const fn new(value: T, valid: bool) -> Self {
        Self { value, valid }
    }

    /// A present value.
    ///
    /// ```
    /// use record_sync::nullable::NullString;
    ///
    /// let name = NullString::from_value("Ada".to_owned());
    /// assert_eq!(name.as_option().map(String::as_str), Some("Ada"));
    /// ```
    #[must_use]
    pub const fn from_value(value: T) -> Self {
        Self::new(value, true)
    }

    /// Present value when one is set.
    #[must_use]
    pub const fn as_option(&self) -> Option<&T> {
        if self.valid { Some(&self.value) } else { None }
    }

    /// Returns `true` when a value is present.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }
}

impl<T: Default> Null<T> {
    /// Wrap an optional value; `None` becomes the invalid default.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or_else(Self::default, Self::from_value)
    }

    /// Absent value.
    #[must_use]
    pub fn null() -> Self {
        Self::default()
    }
}

impl<T: Default> From<Option<T>> for Null<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

impl<T> From<Null<T>> for Option<T> {
    fn from(value: Null<T>) -> Self {
        value.valid.then_some(value.value)
    }
}

impl<T: Serialize> Serialize for Null<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Null<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}

impl<T> Reflect for Null<T>
where
    T: Reflect + Clone + Default,
{
    fn kind(&self) -> Kind {
        Kind::Record
    }

    fn static_kind() -> Kind {
        Kind::Record
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Record(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Record(self)
    }

    fn assign_from(&mut self, source: &dyn Reflect) -> bool {
        crate::reflect::assign_same_type(self, source)
    }

    fn reflect_eq(&self, other: &dyn Reflect) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|peer| self.valid == peer.valid && self.value.reflect_eq(&peer.value))
    }
}

impl<T> Record for Null<T>
where
    T: Reflect + Clone + Default,
{
    fn descriptors() -> Vec<FieldDescriptor> {
        let owner = std::any::type_name::<Self>();
        vec![
            FieldDescriptor::new("value", T::static_kind(), std::any::type_name::<T>(), owner, 0),
            FieldDescriptor::new("valid", Kind::Bool, "bool", owner, 1),
        ]
    }

    fn field_descriptors(&self) -> Vec<FieldDescriptor> {
        Self::descriptors()
    }

    fn field_at(&self, index: usize) -> Option<&dyn Reflect> {
        match index {
            0 => Some(&self.value as &dyn Reflect),
            1 => Some(&self.valid as &dyn Reflect),
            _ => None,
        }
    }

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        match index {
            0 => Some(&mut self.value as &mut dyn Reflect),
            1 => Some(&mut self.valid as &mut dyn Reflect),
            _ => None,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
