//! Implementations for `Option<T>`, `Box<T>`, and `Vec<T>`.
//!
//! `Option<T>` is the optional kind. `Box<T>` is transparent: it reports its
//! payload's kind and type identity so `Option<Box<T>>` behaves like
//! `Option<T>`. `Vec<T>` is the sequence kind.

use std::any::Any;

use super::{OptionalSlot, Reflect, ReflectMut, ReflectRef, Sequence};
use crate::catalog::Kind;

impl<T> Reflect for Option<T>
where
    T: Reflect + Clone + Default,
{
    fn kind(&self) -> Kind {
        Kind::Optional
    }

    fn static_kind() -> Kind {
        Kind::Optional
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
        ReflectRef::Optional(self.as_ref().map(|value| value as &dyn Reflect))
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Optional(self)
    }

    fn assign_from(&mut self, source: &dyn Reflect) -> bool {
        super::assign_same_type(self, source)
    }

    fn reflect_eq(&self, other: &dyn Reflect) -> bool {
        match (self, other.as_any().downcast_ref::<Self>()) {
            (None, Some(None)) => true,
            (Some(left), Some(Some(right))) => left.reflect_eq(right),
            _ => false,
        }
    }
}

impl<T> OptionalSlot for Option<T>
where
    T: Reflect + Clone + Default,
{
    fn is_unset(&self) -> bool {
        self.is_none()
    }

    fn clear(&mut self) {
        *self = None;
    }

    fn get_or_insert_default(&mut self) -> &mut dyn Reflect {
        self.get_or_insert_with(T::default)
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn kind(&self) -> Kind {
        (**self).kind()
    }

    fn static_kind() -> Kind {
        T::static_kind()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        (**self).as_any_mut()
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        (**self).reflect_ref()
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        (**self).reflect_mut()
    }

    fn assign_from(&mut self, source: &dyn Reflect) -> bool {
        (**self).assign_from(source)
    }

    fn reflect_eq(&self, other: &dyn Reflect) -> bool {
        (**self).reflect_eq(other)
    }
}

impl<T> Reflect for Vec<T>
where
    T: Reflect + Clone + Default,
{
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn static_kind() -> Kind {
        Kind::Sequence
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
        ReflectRef::Sequence(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Sequence(self)
    }

    fn assign_from(&mut self, source: &dyn Reflect) -> bool {
        super::assign_same_type(self, source)
    }

    fn reflect_eq(&self, other: &dyn Reflect) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|peer| {
            self.len() == peer.len()
                && self
                    .iter()
                    .zip(peer)
                    .all(|(left, right)| left.reflect_eq(right))
        })
    }
}

impl<T> Sequence for Vec<T>
where
    T: Reflect + Clone + Default,
{
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|value| value as &dyn Reflect)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.get_mut(index).map(|value| value as &mut dyn Reflect)
    }

    fn rebuild(&mut self, len: usize) {
        self.clear();
        self.resize_with(len, T::default);
    }
}
