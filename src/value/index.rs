use super::Value;
use crate::map::Map;
use crate::number::NumberPolicy;
use std::fmt::{self, Display};
use std::ops;

/// A type that can be used to index into a `picojson::Value`.
///
/// [`Value::at`] and the square-bracket indexing operator accept any type
/// that implements `Index`: `usize` for arrays and strings for objects.
///
/// This trait is sealed and cannot be implemented for types outside of
/// `picojson`.
///
/// ```
/// let data: picojson::Value = picojson::from_str(r#"{"inner": [1, 2, 3]}"#).unwrap();
///
/// let inner = &data["inner"];
/// let first = &inner[0];
/// assert_eq!(*first, 1);
///
/// // Anything that is not there is null.
/// assert!(data["outer"][7].is_null());
/// ```
pub trait Index: private::Sealed {
    /// Return None if the key is not already in the array or object.
    #[doc(hidden)]
    fn index_into<'v, P>(&self, v: &'v Value<P>) -> Option<&'v Value<P>>
    where
        P: NumberPolicy;

    /// Panic if array index out of bounds. If key is not already in the object,
    /// insert it with a value of null. Panic if Value is a type that cannot be
    /// indexed into, except if Value is null then it can be treated as an empty
    /// object.
    #[doc(hidden)]
    fn index_or_insert<'v, P>(&self, v: &'v mut Value<P>) -> &'v mut Value<P>
    where
        P: NumberPolicy;
}

impl Index for usize {
    fn index_into<'v, P>(&self, v: &'v Value<P>) -> Option<&'v Value<P>>
    where
        P: NumberPolicy,
    {
        match v {
            Value::Array(vec) => vec.get(*self),
            _ => None,
        }
    }

    fn index_or_insert<'v, P>(&self, v: &'v mut Value<P>) -> &'v mut Value<P>
    where
        P: NumberPolicy,
    {
        match v {
            Value::Array(vec) => {
                let len = vec.len();
                vec.get_mut(*self).unwrap_or_else(|| {
                    panic!(
                        "cannot access index {} of JSON array of length {}",
                        self, len
                    )
                })
            }
            _ => panic!("cannot access index {} of JSON {}", self, Type(v)),
        }
    }
}

impl Index for str {
    fn index_into<'v, P>(&self, v: &'v Value<P>) -> Option<&'v Value<P>>
    where
        P: NumberPolicy,
    {
        match v {
            Value::Object(map) => map.get(self),
            _ => None,
        }
    }

    fn index_or_insert<'v, P>(&self, v: &'v mut Value<P>) -> &'v mut Value<P>
    where
        P: NumberPolicy,
    {
        if let Value::Null = v {
            *v = Value::Object(Map::new());
        }
        match v {
            Value::Object(map) => map.entry(self.to_owned()).or_insert(Value::Null),
            _ => panic!("cannot access key {:?} in JSON {}", self, Type(v)),
        }
    }
}

impl Index for String {
    fn index_into<'v, P>(&self, v: &'v Value<P>) -> Option<&'v Value<P>>
    where
        P: NumberPolicy,
    {
        self[..].index_into(v)
    }

    fn index_or_insert<'v, P>(&self, v: &'v mut Value<P>) -> &'v mut Value<P>
    where
        P: NumberPolicy,
    {
        self[..].index_or_insert(v)
    }
}

impl<T> Index for &T
where
    T: ?Sized + Index,
{
    fn index_into<'v, P>(&self, v: &'v Value<P>) -> Option<&'v Value<P>>
    where
        P: NumberPolicy,
    {
        (**self).index_into(v)
    }

    fn index_or_insert<'v, P>(&self, v: &'v mut Value<P>) -> &'v mut Value<P>
    where
        P: NumberPolicy,
    {
        (**self).index_or_insert(v)
    }
}

// Prevent users from implementing the Index trait.
mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

/// Used in panic messages.
struct Type<'a, P: NumberPolicy>(&'a Value<P>);

impl<'a, P> Display for Type<'a, P>
where
    P: NumberPolicy,
{
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            Value::Null => formatter.write_str("null"),
            Value::Bool(_) => formatter.write_str("boolean"),
            Value::Number(_) | Value::Integer(_) => formatter.write_str("number"),
            Value::String(_) => formatter.write_str("string"),
            Value::Array(_) => formatter.write_str("array"),
            Value::Object(_) => formatter.write_str("object"),
        }
    }
}

impl<I, P> ops::Index<I> for Value<P>
where
    I: Index,
    P: NumberPolicy,
{
    type Output = Value<P>;

    /// Index into a `picojson::Value` using the syntax `value[0]` or
    /// `value["k"]`.
    ///
    /// Returns a shared null if the type of `self` does not match the type of
    /// the index, for example if the index is a string and `self` is an array
    /// or a number. Also returns null if the given key does not exist in the
    /// map or the given index is not within the bounds of the array.
    fn index(&self, index: I) -> &Value<P> {
        self.at(index)
    }
}

impl<I, P> ops::IndexMut<I> for Value<P>
where
    I: Index,
    P: NumberPolicy,
{
    /// Write into a `picojson::Value` using the syntax `value[0] = ...` or
    /// `value["k"] = ...`.
    ///
    /// If the index is a number, the value must be an array of length bigger
    /// than the index. Indexing into a value that is not an array or an array
    /// that is too small will panic.
    ///
    /// If the index is a string, the value must be an object or null which is
    /// treated like an empty object. If the key is not already present in the
    /// object, it will be inserted with a value of null. Indexing into a value
    /// that is neither an object nor null will panic.
    ///
    /// ```
    /// let mut data: picojson::Value = picojson::from_str(r#"{"x": 0}"#).unwrap();
    ///
    /// // replace an existing key
    /// data["x"] = picojson::Value::from(1);
    ///
    /// // insert a new key
    /// data["y"] = picojson::Value::from(vec![false, false, false]);
    ///
    /// // replace an array value
    /// data["y"][0] = picojson::Value::from(true);
    ///
    /// // inserted a deeply nested key
    /// data["z"]["b"]["c"]["d"] = picojson::Value::from(true);
    ///
    /// assert_eq!(data.to_json(false), r#"{"x":1,"y":[true,false,false],"z":{"b":{"c":{"d":true}}}}"#);
    /// ```
    fn index_mut(&mut self, index: I) -> &mut Value<P> {
        index.index_or_insert(self)
    }
}
