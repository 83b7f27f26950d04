//! Scalar implementations: `bool`, integers, floats, and `String`.
//!
//! Reads widen to [`Scalar`]; writes convert back with checked arithmetic.
//! Integer conversions go through `TryFrom`, floats only become integers when
//! they are finite and integral, and `f64` narrows to `f32` only when the
//! magnitude fits.

use std::any::Any;

use super::{Reflect, ReflectMut, ReflectRef, Scalar, ScalarFault, ScalarSlot};
use crate::catalog::Kind;

macro_rules! scalar_reflect {
    ($ty:ty, $kind:expr, |$value:ident| $read:expr) => {
        impl Reflect for $ty {
            fn kind(&self) -> Kind {
                $kind
            }

            fn static_kind() -> Kind {
                $kind
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
                let $value = self;
                ReflectRef::Scalar($read)
            }

            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Scalar(self)
            }

            fn assign_from(&mut self, source: &dyn Reflect) -> bool {
                super::assign_same_type(self, source)
            }

            fn reflect_eq(&self, other: &dyn Reflect) -> bool {
                super::eq_same_type(self, other)
            }
        }
    };
}

macro_rules! integer_slot {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ScalarSlot for $ty {
                fn store(&mut self, value: Scalar<'_>) -> Result<(), ScalarFault> {
                    *self = match value {
                        Scalar::Int(v) => Self::try_from(v).map_err(|_| ScalarFault::OutOfRange)?,
                        Scalar::Uint(v) => Self::try_from(v).map_err(|_| ScalarFault::OutOfRange)?,
                        Scalar::Float(v) => {
                            Self::try_from(integral(v)?).map_err(|_| ScalarFault::OutOfRange)?
                        }
                        Scalar::Bool(_) | Scalar::Str(_) => return Err(ScalarFault::Incompatible),
                    };
                    Ok(())
                }
            }
        )*
    };
}

scalar_reflect!(i8, Kind::Int, |v| Scalar::Int(i64::from(*v)));
scalar_reflect!(i16, Kind::Int, |v| Scalar::Int(i64::from(*v)));
scalar_reflect!(i32, Kind::Int, |v| Scalar::Int(i64::from(*v)));
scalar_reflect!(i64, Kind::Int, |v| Scalar::Int(*v));
scalar_reflect!(isize, Kind::Int, |v| Scalar::Int(*v as i64));
scalar_reflect!(u8, Kind::Uint, |v| Scalar::Uint(u64::from(*v)));
scalar_reflect!(u16, Kind::Uint, |v| Scalar::Uint(u64::from(*v)));
scalar_reflect!(u32, Kind::Uint, |v| Scalar::Uint(u64::from(*v)));
scalar_reflect!(u64, Kind::Uint, |v| Scalar::Uint(*v));
scalar_reflect!(usize, Kind::Uint, |v| Scalar::Uint(*v as u64));
scalar_reflect!(f32, Kind::Float, |v| Scalar::Float(f64::from(*v)));
scalar_reflect!(f64, Kind::Float, |v| Scalar::Float(*v));
scalar_reflect!(bool, Kind::Bool, |v| Scalar::Bool(*v));
scalar_reflect!(String, Kind::String, |v| Scalar::Str(v.as_str()));

integer_slot!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Whole-number value of `value`, if it has one.
///
/// The cast saturates, so magnitudes beyond `i128` fail the caller's
/// `try_from` instead of wrapping.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is integral and the cast saturates"
)]
fn integral(value: f64) -> Result<i128, ScalarFault> {
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as i128)
    } else {
        Err(ScalarFault::OutOfRange)
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integer to float conversion rounds like a numeric cast"
)]
const fn int_to_float(value: Scalar<'_>) -> Option<f64> {
    match value {
        Scalar::Int(v) => Some(v as f64),
        Scalar::Uint(v) => Some(v as f64),
        Scalar::Float(v) => Some(v),
        Scalar::Bool(_) | Scalar::Str(_) => None,
    }
}

impl ScalarSlot for f64 {
    fn store(&mut self, value: Scalar<'_>) -> Result<(), ScalarFault> {
        *self = int_to_float(value).ok_or(ScalarFault::Incompatible)?;
        Ok(())
    }
}

impl ScalarSlot for f32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "magnitude is checked against f32::MAX first"
    )]
    fn store(&mut self, value: Scalar<'_>) -> Result<(), ScalarFault> {
        let wide = int_to_float(value).ok_or(ScalarFault::Incompatible)?;
        if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
            return Err(ScalarFault::OutOfRange);
        }
        *self = wide as f32;
        Ok(())
    }
}

impl ScalarSlot for bool {
    fn store(&mut self, value: Scalar<'_>) -> Result<(), ScalarFault> {
        match value {
            Scalar::Bool(flag) => {
                *self = flag;
                Ok(())
            }
            _ => Err(ScalarFault::Incompatible),
        }
    }
}

impl ScalarSlot for String {
    fn store(&mut self, value: Scalar<'_>) -> Result<(), ScalarFault> {
        match value {
            Scalar::Str(text) => {
                text.clone_into(self);
                Ok(())
            }
            _ => Err(ScalarFault::Incompatible),
        }
    }
}
