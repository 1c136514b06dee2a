use super::Value;
use crate::map::Map;
use crate::number::NumberPolicy;

#[cfg(feature = "arbitrary_precision")]
use crate::number::Numeral;

/// A Rust type that a [`Value`] can be asked for with [`Value::is`] and
/// borrowed as with [`Value::get`].
///
/// Implemented for [`Null`], `bool`, `i64`, the number representation of
/// the policy, `String`, `Vec<Value<P>>` and `Map<String, Value<P>>`.
pub trait JsonType<P: NumberPolicy>: Sized {
    /// Name used in type mismatch panics.
    const NAME: &'static str;

    /// Whether `value` holds this type.
    fn is(value: &Value<P>) -> bool;

    /// Borrows this type out of `value`.
    fn get(value: &Value<P>) -> Option<&Self>;

    /// Mutably borrows this type out of `value`.
    fn get_mut(value: &mut Value<P>) -> Option<&mut Self>;
}

/// Stand-in type for asking whether a value is `null`: `value.is::<Null>()`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Null;

impl<P> JsonType<P> for Null
where
    P: NumberPolicy,
{
    const NAME: &'static str = "null";

    fn is(value: &Value<P>) -> bool {
        matches!(value, Value::Null)
    }

    fn get(value: &Value<P>) -> Option<&Null> {
        match value {
            Value::Null => Some(&Null),
            _ => None,
        }
    }

    fn get_mut(value: &mut Value<P>) -> Option<&mut Null> {
        match value {
            // Zero-sized, so nothing is allocated or leaked.
            Value::Null => Some(Box::leak(Box::new(Null))),
            _ => None,
        }
    }
}

impl<P> JsonType<P> for bool
where
    P: NumberPolicy,
{
    const NAME: &'static str = "bool";

    fn is(value: &Value<P>) -> bool {
        matches!(value, Value::Bool(_))
    }

    fn get(value: &Value<P>) -> Option<&bool> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn get_mut(value: &mut Value<P>) -> Option<&mut bool> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

// Only integers that have not been read as a number.
impl<P> JsonType<P> for i64
where
    P: NumberPolicy,
{
    const NAME: &'static str = "i64";

    fn is(value: &Value<P>) -> bool {
        matches!(value, Value::Integer(i) if !i.is_widened())
    }

    fn get(value: &Value<P>) -> Option<&i64> {
        match value {
            Value::Integer(i) if !i.is_widened() => Some(i.value_ref()),
            _ => None,
        }
    }

    fn get_mut(value: &mut Value<P>) -> Option<&mut i64> {
        match value {
            Value::Integer(i) if !i.is_widened() => Some(i.value_mut()),
            _ => None,
        }
    }
}

impl<P> JsonType<P> for f64
where
    P: NumberPolicy<Repr = f64>,
{
    const NAME: &'static str = "f64";

    fn is(value: &Value<P>) -> bool {
        matches!(value, Value::Number(_) | Value::Integer(_))
    }

    fn get(value: &Value<P>) -> Option<&f64> {
        value.as_number()
    }

    fn get_mut(value: &mut Value<P>) -> Option<&mut f64> {
        value.as_number_mut()
    }
}

#[cfg(feature = "arbitrary_precision")]
impl<P> JsonType<P> for Numeral
where
    P: NumberPolicy<Repr = Numeral>,
{
    const NAME: &'static str = "Numeral";

    fn is(value: &Value<P>) -> bool {
        matches!(value, Value::Number(_) | Value::Integer(_))
    }

    fn get(value: &Value<P>) -> Option<&Numeral> {
        value.as_number()
    }

    fn get_mut(value: &mut Value<P>) -> Option<&mut Numeral> {
        value.as_number_mut()
    }
}

impl<P> JsonType<P> for String
where
    P: NumberPolicy,
{
    const NAME: &'static str = "String";

    fn is(value: &Value<P>) -> bool {
        matches!(value, Value::String(_))
    }

    fn get(value: &Value<P>) -> Option<&String> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn get_mut(value: &mut Value<P>) -> Option<&mut String> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl<P> JsonType<P> for Vec<Value<P>>
where
    P: NumberPolicy,
{
    const NAME: &'static str = "array";

    fn is(value: &Value<P>) -> bool {
        matches!(value, Value::Array(_))
    }

    fn get(value: &Value<P>) -> Option<&Self> {
        value.as_array()
    }

    fn get_mut(value: &mut Value<P>) -> Option<&mut Self> {
        value.as_array_mut()
    }
}

impl<P> JsonType<P> for Map<String, Value<P>>
where
    P: NumberPolicy,
{
    const NAME: &'static str = "object";

    fn is(value: &Value<P>) -> bool {
        matches!(value, Value::Object(_))
    }

    fn get(value: &Value<P>) -> Option<&Self> {
        value.as_object()
    }

    fn get_mut(value: &mut Value<P>) -> Option<&mut Self> {
        value.as_object_mut()
    }
}
