use super::Value;
use crate::number::{Integer, NumberPolicy};
use std::borrow::Cow;

// The number form of an integer, without caching it.
fn number_of<P>(i: &Integer<P>) -> Cow<P::Repr>
where
    P: NumberPolicy,
{
    match i.widened() {
        Some(n) => Cow::Borrowed(n),
        None => Cow::Owned(P::from_i64(i.value())),
    }
}

/// Deep equality. An integer equals a number with the same numeric value;
/// comparing them never widens the integer, so `is::<i64>()` is unchanged
/// afterwards.
impl<P> PartialEq for Value<P>
where
    P: NumberPolicy,
{
    fn eq(&self, other: &Value<P>) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) if !a.is_widened() && !b.is_widened() => {
                a.value() == b.value()
            }
            (Value::Integer(a), Value::Integer(b)) => number_of(a) == number_of(b),
            (Value::Integer(a), Value::Number(b)) | (Value::Number(b), Value::Integer(a)) => {
                *number_of(a) == *b
            }
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

fn eq_i64<P>(value: &Value<P>, other: i64) -> bool
where
    P: NumberPolicy,
{
    match value {
        Value::Integer(i) => i.value() == other,
        Value::Number(n) => *n == P::from_i64(other),
        _ => false,
    }
}

fn eq_u64<P>(value: &Value<P>, other: u64) -> bool
where
    P: NumberPolicy,
{
    if let Ok(other) = i64::try_from(other) {
        return eq_i64(value, other);
    }
    match value {
        Value::Number(n) => {
            let mut buffer = itoa::Buffer::new();
            P::parse_numeral(buffer.format(other)).map_or(false, |other| *n == other)
        }
        _ => false,
    }
}

fn eq_f64<P>(value: &Value<P>, other: f64) -> bool
where
    P: NumberPolicy,
{
    let other = match P::from_f64(other) {
        Ok(other) => other,
        Err(_) => return false,
    };
    match value {
        Value::Number(n) => *n == other,
        Value::Integer(i) => *number_of(i) == other,
        _ => false,
    }
}

fn eq_bool<P>(value: &Value<P>, other: bool) -> bool
where
    P: NumberPolicy,
{
    value.as_bool().map_or(false, |b| b == other)
}

fn eq_str<P>(value: &Value<P>, other: &str) -> bool
where
    P: NumberPolicy,
{
    value.as_str().map_or(false, |s| s == other)
}

impl<P> PartialEq<str> for Value<P>
where
    P: NumberPolicy,
{
    fn eq(&self, other: &str) -> bool {
        eq_str(self, other)
    }
}

impl<'a, P> PartialEq<&'a str> for Value<P>
where
    P: NumberPolicy,
{
    fn eq(&self, other: &&str) -> bool {
        eq_str(self, other)
    }
}

impl<P> PartialEq<Value<P>> for str
where
    P: NumberPolicy,
{
    fn eq(&self, other: &Value<P>) -> bool {
        eq_str(other, self)
    }
}

impl<'a, P> PartialEq<Value<P>> for &'a str
where
    P: NumberPolicy,
{
    fn eq(&self, other: &Value<P>) -> bool {
        eq_str(other, self)
    }
}

impl<P> PartialEq<String> for Value<P>
where
    P: NumberPolicy,
{
    fn eq(&self, other: &String) -> bool {
        eq_str(self, other.as_str())
    }
}

impl<P> PartialEq<Value<P>> for String
where
    P: NumberPolicy,
{
    fn eq(&self, other: &Value<P>) -> bool {
        eq_str(other, self.as_str())
    }
}

macro_rules! partialeq_numeric {
    ($($eq:ident [$($ty:ty)*])*) => {
        $($(
            impl<P> PartialEq<$ty> for Value<P>
            where
                P: NumberPolicy,
            {
                fn eq(&self, other: &$ty) -> bool {
                    $eq(self, *other as _)
                }
            }

            impl<P> PartialEq<Value<P>> for $ty
            where
                P: NumberPolicy,
            {
                fn eq(&self, other: &Value<P>) -> bool {
                    $eq(other, *self as _)
                }
            }

            impl<'a, P> PartialEq<$ty> for &'a Value<P>
            where
                P: NumberPolicy,
            {
                fn eq(&self, other: &$ty) -> bool {
                    $eq(&**self, *other as _)
                }
            }

            impl<'a, P> PartialEq<$ty> for &'a mut Value<P>
            where
                P: NumberPolicy,
            {
                fn eq(&self, other: &$ty) -> bool {
                    $eq(&**self, *other as _)
                }
            }
        )*)*
    }
}

partialeq_numeric! {
    eq_i64[i8 i16 i32 i64 isize u8 u16 u32]
    eq_u64[u64 usize]
    eq_f64[f32 f64]
    eq_bool[bool]
}
