use super::Value;
use crate::map::Map;
use crate::number::{Integer, NumberPolicy};
use std::borrow::Cow;

macro_rules! from_integer {
    ($($ty:ident)*) => {
        $(
            impl<P> From<$ty> for Value<P>
            where
                P: NumberPolicy,
            {
                fn from(n: $ty) -> Self {
                    Value::Integer(Integer::new(n as i64))
                }
            }
        )*
    };
}

from_integer! {
    i8 i16 i32 i64 isize
    u8 u16 u32
}

macro_rules! from_unsigned_wide {
    ($($ty:ident)*) => {
        $(
            impl<P> From<$ty> for Value<P>
            where
                P: NumberPolicy,
            {
                /// Values above `i64::MAX` become a `Number`, or `Null` if the
                /// number policy cannot hold them.
                fn from(n: $ty) -> Self {
                    if let Ok(i) = i64::try_from(n) {
                        return Value::Integer(Integer::new(i));
                    }
                    let mut buffer = itoa::Buffer::new();
                    P::parse_numeral(buffer.format(n)).map_or(Value::Null, Value::Number)
                }
            }
        )*
    };
}

from_unsigned_wide! {
    u64 usize
}

impl<P> From<f32> for Value<P>
where
    P: NumberPolicy,
{
    /// Convert 32-bit floating point number to `Value::Number`.
    ///
    /// # Panics
    ///
    /// Panics on NaN and infinities. Use [`Value::from_f64`] to get an error
    /// instead.
    #[track_caller]
    fn from(f: f32) -> Self {
        From::from(f as f64)
    }
}

impl<P> From<f64> for Value<P>
where
    P: NumberPolicy,
{
    /// Convert 64-bit floating point number to `Value::Number`.
    ///
    /// # Panics
    ///
    /// Panics on NaN and infinities. Use [`Value::from_f64`] to get an error
    /// instead.
    ///
    /// ```
    /// let x: picojson::Value = 20.5.into();
    /// assert_eq!(x.to_json(false), "20.5");
    /// ```
    #[track_caller]
    fn from(f: f64) -> Self {
        match P::from_f64(f) {
            Ok(n) => Value::Number(n),
            Err(_) => panic!("{} is not a JSON number", f),
        }
    }
}

impl<P> From<bool> for Value<P>
where
    P: NumberPolicy,
{
    fn from(f: bool) -> Self {
        Value::Bool(f)
    }
}

impl<P> From<String> for Value<P>
where
    P: NumberPolicy,
{
    fn from(f: String) -> Self {
        Value::String(f)
    }
}

impl<'a, P> From<&'a str> for Value<P>
where
    P: NumberPolicy,
{
    fn from(f: &str) -> Self {
        Value::String(f.to_owned())
    }
}

impl<'a, P> From<Cow<'a, str>> for Value<P>
where
    P: NumberPolicy,
{
    fn from(f: Cow<'a, str>) -> Self {
        Value::String(f.into_owned())
    }
}

impl<P> From<Integer<P>> for Value<P>
where
    P: NumberPolicy,
{
    fn from(i: Integer<P>) -> Self {
        Value::Integer(i)
    }
}

impl<P> From<Map<String, Value<P>>> for Value<P>
where
    P: NumberPolicy,
{
    fn from(f: Map<String, Value<P>>) -> Self {
        Value::Object(f)
    }
}

impl<T, P> From<Vec<T>> for Value<P>
where
    T: Into<Value<P>>,
    P: NumberPolicy,
{
    /// ```
    /// let v: picojson::Value = vec!["lorem", "ipsum", "dolor"].into();
    /// assert_eq!(v.to_json(false), r#"["lorem","ipsum","dolor"]"#);
    /// ```
    fn from(f: Vec<T>) -> Self {
        Value::Array(f.into_iter().map(Into::into).collect())
    }
}

impl<'a, T, P> From<&'a [T]> for Value<P>
where
    T: Clone + Into<Value<P>>,
    P: NumberPolicy,
{
    fn from(f: &'a [T]) -> Self {
        Value::Array(f.iter().cloned().map(Into::into).collect())
    }
}

impl<P> From<()> for Value<P>
where
    P: NumberPolicy,
{
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl<T, P> From<Option<T>> for Value<P>
where
    T: Into<Value<P>>,
    P: NumberPolicy,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            None => Value::Null,
            Some(value) => Into::into(value),
        }
    }
}

impl<T, P> FromIterator<T> for Value<P>
where
    T: Into<Value<P>>,
    P: NumberPolicy,
{
    /// Create a `Value::Array` by collecting an iterator of array elements.
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl<K, V, P> FromIterator<(K, V)> for Value<P>
where
    K: Into<String>,
    V: Into<Value<P>>,
    P: NumberPolicy,
{
    /// Create a `Value::Object` by collecting an iterator of key-value pairs.
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
