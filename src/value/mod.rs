//! The Value enum, a loosely typed way of representing any valid JSON value.
//!
//! A `Value` is built by the parser, from Rust values through `From`, or by
//! hand:
//!
//! ```
//! use picojson::{Map, Value};
//!
//! let mut object = Map::new();
//! object.insert("age".to_owned(), Value::from(43));
//! object.insert("name".to_owned(), Value::from("John Doe"));
//! let john: Value = Value::Object(object);
//!
//! assert!(john["age"].is::<i64>());
//! assert_eq!(*john["name"].get::<String>(), "John Doe");
//! assert!(john["phones"][0].is_null());
//! assert_eq!(john.to_json(false), r#"{"age":43,"name":"John Doe"}"#);
//! ```
//!
//! Lookups never fail. Indexing past the end of an array, asking an object
//! for a missing key, or indexing a scalar yields a shared `null`. Typed
//! access through [`Value::get`] on the other hand insists that the caller
//! checked [`Value::is`] first.

use crate::error::Result;
use crate::map::Map;
use crate::number::{DefaultNumber, Integer, NumberPolicy};
use std::fmt::{self, Debug, Display};
use std::io::{self, Write};
use std::mem;
use std::str;

pub use self::access::{JsonType, Null};
pub use self::index::Index;

mod access;
mod de;
mod from;
mod index;
mod partial_eq;
mod ser;

/// JSON array.
pub type Array<P = DefaultNumber> = Vec<Value<P>>;

/// JSON object.
pub type Object<P = DefaultNumber> = Map<String, Value<P>>;

/// Represents any valid JSON value.
///
/// Numbers are stored as the `Repr` of the value's [`NumberPolicy`]. Numerals
/// that parse as an exact `i64` are kept apart in the `Integer` variant,
/// which still answers to number queries; see [`Integer`] for how the two
/// interact.
pub enum Value<P: NumberPolicy = DefaultNumber> {
    /// Represents a JSON null value.
    Null,

    /// Represents a JSON boolean.
    Bool(bool),

    /// Represents a JSON number. Never NaN or infinite.
    Number(P::Repr),

    /// Represents a JSON number that is an exact 64-bit integer.
    Integer(Integer<P>),

    /// Represents a JSON string.
    String(String),

    /// Represents a JSON array.
    Array(Vec<Value<P>>),

    /// Represents a JSON object.
    Object(Map<String, Value<P>>),
}

/// The variant a [`Value`] holds, without its payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `Value::Null`
    Null,
    /// `Value::Bool`
    Boolean,
    /// `Value::Number`
    Number,
    /// `Value::Integer`
    Integer,
    /// `Value::String`
    String,
    /// `Value::Array`
    Array,
    /// `Value::Object`
    Object,
}

impl<P> Value<P>
where
    P: NumberPolicy,
{
    /// An empty or zero value of the given type.
    pub fn with_type(ty: ValueType) -> Self {
        match ty {
            ValueType::Null => Value::Null,
            ValueType::Boolean => Value::Bool(false),
            ValueType::Number => Value::Number(P::from_i64(0)),
            ValueType::Integer => Value::Integer(Integer::new(0)),
            ValueType::String => Value::String(String::new()),
            ValueType::Array => Value::Array(Vec::new()),
            ValueType::Object => Value::Object(Map::new()),
        }
    }

    /// Converts a float, failing with a number-out-of-range error for NaN
    /// and the infinities.
    ///
    /// ```
    /// # use picojson::Value;
    /// assert!(Value::<picojson::DefaultNumber>::from_f64(1.5).is_ok());
    /// assert!(Value::<picojson::DefaultNumber>::from_f64(f64::NAN).is_err());
    /// ```
    pub fn from_f64(f: f64) -> Result<Self> {
        P::from_f64(f).map(Value::Number)
    }

    /// The variant this value holds.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Boolean,
            Value::Number(_) => ValueType::Number,
            Value::Integer(_) => ValueType::Integer,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Whether the value holds a `T`.
    ///
    /// `is::<f64>()` (or the number type of another policy) is also true for
    /// an `Integer`. `is::<i64>()` is true for an `Integer` only until it is
    /// read as a number.
    ///
    /// ```
    /// let v: picojson::Value = picojson::from_str("12").unwrap();
    /// assert!(v.is::<i64>());
    /// assert!(v.is::<f64>());
    ///
    /// assert_eq!(*v.get::<f64>(), 12.0);
    /// assert!(!v.is::<i64>());
    /// ```
    pub fn is<T>(&self) -> bool
    where
        T: JsonType<P>,
    {
        T::is(self)
    }

    /// Borrows the `T` inside the value.
    ///
    /// # Panics
    ///
    /// Panics if `is::<T>()` is false.
    #[track_caller]
    pub fn get<T>(&self) -> &T
    where
        T: JsonType<P>,
    {
        match T::get(self) {
            Some(t) => t,
            None => type_mismatch::<T, P>(self.value_type()),
        }
    }

    /// Mutably borrows the `T` inside the value. Borrowing an `Integer` as a
    /// number turns it into a `Number`.
    ///
    /// # Panics
    ///
    /// Panics if `is::<T>()` is false.
    #[track_caller]
    pub fn get_mut<T>(&mut self) -> &mut T
    where
        T: JsonType<P>,
    {
        let found = self.value_type();
        match T::get_mut(self) {
            Some(t) => t,
            None => type_mismatch::<T, P>(found),
        }
    }

    /// Like [`get`](Self::get), but returns `None` instead of panicking.
    pub fn try_get<T>(&self) -> Option<&T>
    where
        T: JsonType<P>,
    {
        T::get(self)
    }

    /// Looks up an array element or object member.
    ///
    /// Returns a shared `null` if the element or member is missing, or if
    /// the index does not fit this kind of value.
    ///
    /// ```
    /// let v: picojson::Value = picojson::from_str(r#"[10, {"a": true}]"#).unwrap();
    /// assert_eq!(*v.at(1).at("a"), true);
    /// assert!(v.at(5).is_null());
    /// assert!(v.at("a").is_null());
    /// ```
    pub fn at<I>(&self, index: I) -> &Value<P>
    where
        I: Index,
    {
        match index.index_into(self) {
            Some(v) => v,
            None => &Value::Null,
        }
    }

    /// Whether [`at`](Self::at) would find something.
    pub fn contains<I>(&self, index: I) -> bool
    where
        I: Index,
    {
        index.index_into(self).is_some()
    }

    /// Returns true if the value is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// If the value is a boolean, returns it.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an `Integer`, returns the exact integer, whether or
    /// not it has been read as a number since.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(i.value()),
            _ => None,
        }
    }

    /// If the value is a number of either variant, borrows it as the
    /// policy's number type, widening an `Integer` in place.
    pub fn as_number(&self) -> Option<&P::Repr> {
        match self {
            Value::Number(n) => Some(n),
            Value::Integer(i) => Some(i.widen()),
            _ => None,
        }
    }

    /// Mutable counterpart of [`as_number`](Self::as_number). An `Integer`
    /// is turned into a `Number` first.
    pub fn as_number_mut(&mut self) -> Option<&mut P::Repr> {
        if let Value::Integer(i) = self {
            let n = mem::replace(i, Integer::new(0)).into_number();
            *self = Value::Number(n);
        }
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is a string, borrows it.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an array, borrows its elements.
    pub fn as_array(&self) -> Option<&Vec<Value<P>>> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// If the value is an array, mutably borrows its elements.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value<P>>> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// If the value is an object, borrows its members.
    pub fn as_object(&self) -> Option<&Map<String, Value<P>>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is an object, mutably borrows its members.
    pub fn as_object_mut(&mut self) -> Option<&mut Map<String, Value<P>>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Truthiness: `null` is false, booleans are themselves, numbers are
    /// true unless zero, strings unless empty, and containers are always
    /// true.
    pub fn evaluate_as_boolean(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => P::evaluate_as_boolean(n),
            Value::Integer(i) => i.value() != 0,
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// A short human readable rendering. Scalars render as their JSON text
    /// except that strings are not quoted; containers render as `array` or
    /// `object`.
    pub fn to_str(&self) -> String {
        match self {
            Value::Null => "null".to_owned(),
            Value::Bool(true) => "true".to_owned(),
            Value::Bool(false) => "false".to_owned(),
            Value::Number(n) => P::to_numeral(n),
            Value::Integer(i) => match i.widened() {
                Some(n) => P::to_numeral(n),
                None => itoa::Buffer::new().format(i.value()).to_owned(),
            },
            Value::String(s) => s.clone(),
            Value::Array(_) => "array".to_owned(),
            Value::Object(_) => "object".to_owned(),
        }
    }

    /// Serializes the value as JSON text, compact or pretty.
    pub fn to_json(&self, pretty: bool) -> String {
        if pretty {
            crate::ser::to_string_pretty(self)
        } else {
            crate::ser::to_string(self)
        }
    }

    /// Like [`to_json`](Self::to_json) but writes into `writer`.
    pub fn write_json<W>(&self, writer: W, pretty: bool) -> Result<()>
    where
        W: io::Write,
    {
        if pretty {
            crate::ser::to_writer_pretty(writer, self)
        } else {
            crate::ser::to_writer(writer, self)
        }
    }

    /// Exchanges the contents of two values.
    pub fn swap(&mut self, other: &mut Value<P>) {
        mem::swap(self, other);
    }

    /// Takes the value out of the `Value`, leaving a `Null` in its place.
    pub fn take(&mut self) -> Value<P> {
        mem::replace(self, Value::Null)
    }
}

#[cold]
#[track_caller]
fn type_mismatch<T, P>(found: ValueType) -> !
where
    T: JsonType<P>,
    P: NumberPolicy,
{
    panic!(
        "type mismatch! call is::<T>() before get::<T>() (wanted {}, found {:?})",
        T::NAME,
        found,
    )
}

impl<P> Clone for Value<P>
where
    P: NumberPolicy,
{
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(n.clone()),
            Value::Integer(i) => Value::Integer(i.clone()),
            Value::String(s) => Value::String(s.clone()),
            Value::Array(array) => Value::Array(array.clone()),
            Value::Object(map) => Value::Object(map.clone()),
        }
    }
}

impl<P> Default for Value<P>
where
    P: NumberPolicy,
{
    fn default() -> Self {
        Value::Null
    }
}

impl<P> Debug for Value<P>
where
    P: NumberPolicy,
{
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => formatter.write_str("Null"),
            Value::Bool(boolean) => write!(formatter, "Bool({})", boolean),
            Value::Number(number) => write!(formatter, "Number({:?})", number),
            Value::Integer(integer) => write!(formatter, "Integer({:?})", integer),
            Value::String(string) => write!(formatter, "String({:?})", string),
            Value::Array(vec) => {
                tri!(formatter.write_str("Array "));
                Debug::fmt(vec, formatter)
            }
            Value::Object(map) => {
                tri!(formatter.write_str("Object "));
                Debug::fmt(map, formatter)
            }
        }
    }
}

impl<P> Display for Value<P>
where
    P: NumberPolicy,
{
    /// Display a JSON value as a string.
    ///
    /// ```
    /// let value: picojson::Value = picojson::from_str(r#"{"city":"London","street":"10 Downing Street"}"#).unwrap();
    ///
    /// // Compact format:
    /// //
    /// // {"city":"London","street":"10 Downing Street"}
    /// let compact = format!("{}", value);
    /// assert_eq!(compact, r#"{"city":"London","street":"10 Downing Street"}"#);
    ///
    /// // Pretty format:
    /// //
    /// // {
    /// //   "city": "London",
    /// //   "street": "10 Downing Street"
    /// // }
    /// let pretty = format!("{:#}", value);
    /// let expected = "{\n  \"city\": \"London\",\n  \"street\": \"10 Downing Street\"\n}";
    /// assert_eq!(pretty, expected);
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut wr = WriterFormatter { inner: f };
        let alternate = wr.inner.alternate();
        let ret = if alternate {
            let mut ser =
                crate::ser::Serializer::with_formatter(&mut wr, crate::ser::PrettyFormatter::new());
            ser.write_value(self)
        } else {
            crate::ser::Serializer::new(&mut wr).write_value(self)
        };
        ret.map_err(|_| fmt::Error)
    }
}

struct WriterFormatter<'a, 'b: 'a> {
    inner: &'a mut fmt::Formatter<'b>,
}

impl<'a, 'b> Write for WriterFormatter<'a, 'b> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        fn io_error<E>(_: E) -> io::Error {
            // Error value does not matter because Display impl just maps it
            // back to fmt::Error.
            io::Error::new(io::ErrorKind::Other, "fmt error")
        }
        let s = tri!(str::from_utf8(buf).map_err(io_error));
        tri!(self.inner.write_str(s).map_err(io_error));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<P> str::FromStr for Value<P>
where
    P: NumberPolicy,
{
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Value<P>> {
        crate::de::from_str(s)
    }
}
