//! Pluggable numeric backends.
//!
//! A [`Value`](crate::Value) stores JSON numbers in whatever representation
//! its [`NumberPolicy`] chooses. The default policy stores an `f64`; with the
//! `arbitrary_precision` feature, [`ArbitraryPrecision`] keeps the numeral
//! text exactly as it appeared in the input.

use crate::error::{Error, ErrorCode, Result};
use serde_core::Serializer;
use std::fmt::{self, Debug};
use std::io;
use std::sync::OnceLock;

#[cfg(feature = "arbitrary_precision")]
use std::fmt::Display;
#[cfg(feature = "arbitrary_precision")]
use std::str::FromStr;

/// Construction, parsing, rendering and truthiness of the number
/// representation stored in a [`Value`](crate::Value).
///
/// Policies are marker types, never instantiated.
pub trait NumberPolicy: Sized + 'static {
    /// The stored representation of a JSON number.
    type Repr: Clone + Debug + PartialEq + Send + Sync;

    /// Converts a float. NaN and the infinities are not JSON numbers and fail
    /// with [`ErrorCode::NumberOutOfRange`].
    fn from_f64(f: f64) -> Result<Self::Repr>;

    /// Converts an integer. Used when an integer value is read as a number.
    fn from_i64(i: i64) -> Self::Repr;

    /// Parses a numeral as scanned from JSON text. The whole string must be
    /// consumed for the conversion to succeed.
    fn parse_numeral(numeral: &str) -> Result<Self::Repr>;

    /// Writes the JSON text of a number.
    fn write_numeral<W>(n: &Self::Repr, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write;

    /// Truthiness of a number: true unless it is zero.
    fn evaluate_as_boolean(n: &Self::Repr) -> bool;

    /// Hands a number to a serde serializer.
    fn serialize_number<S>(n: &Self::Repr, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer;

    /// The JSON text of a number as a `String`.
    fn to_numeral(n: &Self::Repr) -> String {
        let mut buf = Vec::new();
        // Writes into a Vec do not fail.
        let _ = Self::write_numeral(n, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// The default number policy, storing numbers as `f64`.
///
/// Integral values below 2<sup>53</sup> in magnitude render without a
/// fractional part (`3.0` renders as `3`); everything else renders in the
/// shortest form that parses back to the same `f64`.
pub enum DefaultNumber {}

// 2^53, the first integer at which f64 loses integer precision.
const MAX_EXACT_INTEGER: f64 = 9007199254740992.0;

impl NumberPolicy for DefaultNumber {
    type Repr = f64;

    fn from_f64(f: f64) -> Result<f64> {
        if f.is_finite() {
            Ok(f)
        } else {
            Err(Error::new(ErrorCode::NumberOutOfRange))
        }
    }

    #[inline]
    fn from_i64(i: i64) -> f64 {
        i as f64
    }

    fn parse_numeral(numeral: &str) -> Result<f64> {
        match numeral.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            Ok(_) => Err(Error::new(ErrorCode::NumberOutOfRange)),
            Err(_) => Err(Error::new(ErrorCode::InvalidNumber)),
        }
    }

    fn write_numeral<W>(n: &f64, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let n = *n;
        if n.abs() < MAX_EXACT_INTEGER && n.trunc() == n {
            if n == 0.0 && n.is_sign_negative() {
                writer.write_all(b"-0")
            } else {
                let mut buffer = itoa::Buffer::new();
                writer.write_all(buffer.format(n as i64).as_bytes())
            }
        } else {
            let mut buffer = zmij::Buffer::new();
            writer.write_all(buffer.format(n).as_bytes())
        }
    }

    #[inline]
    fn evaluate_as_boolean(n: &f64) -> bool {
        *n != 0.0
    }

    fn serialize_number<S>(n: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*n)
    }
}

//////////////////////////////////////////////////////////////////////////////

/// A JSON number that parsed as an exact `i64`.
///
/// Reading it as the policy's number type caches the converted form. From
/// then on the value reports itself as a number only: [`is_widened`] turns
/// true and `Value::is::<i64>()` turns false. The conversion is one-way.
///
/// [`is_widened`]: Integer::is_widened
pub struct Integer<P: NumberPolicy = DefaultNumber> {
    value: i64,
    widened: OnceLock<P::Repr>,
}

impl<P> Integer<P>
where
    P: NumberPolicy,
{
    /// Makes an integer that has not been read as a number yet.
    pub const fn new(value: i64) -> Self {
        Integer {
            value,
            widened: OnceLock::new(),
        }
    }

    /// The exact integer.
    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Whether this integer has been read as a number.
    #[inline]
    pub fn is_widened(&self) -> bool {
        self.widened.get().is_some()
    }

    /// The number form, converting and caching it on first use.
    pub fn widen(&self) -> &P::Repr {
        self.widened.get_or_init(|| P::from_i64(self.value))
    }

    /// The cached number form, if any, without converting.
    pub(crate) fn widened(&self) -> Option<&P::Repr> {
        self.widened.get()
    }

    pub(crate) fn value_ref(&self) -> &i64 {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut i64 {
        &mut self.value
    }

    pub(crate) fn into_number(self) -> P::Repr {
        match self.widened.into_inner() {
            Some(n) => n,
            None => P::from_i64(self.value),
        }
    }
}

impl<P> Clone for Integer<P>
where
    P: NumberPolicy,
{
    fn clone(&self) -> Self {
        Integer {
            value: self.value,
            widened: self.widened.clone(),
        }
    }
}

impl<P> Debug for Integer<P>
where
    P: NumberPolicy,
{
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self.widened.get() {
            None => Debug::fmt(&self.value, formatter),
            Some(n) => write!(formatter, "{:?} (widened)", n),
        }
    }
}

//////////////////////////////////////////////////////////////////////////////

/// Number policy storing the numeral text verbatim, so that numbers of any
/// size or precision survive a parse and serialize round trip unchanged.
#[cfg(feature = "arbitrary_precision")]
pub enum ArbitraryPrecision {}

/// A JSON numeral kept as text. Always matches the JSON number grammar.
#[cfg(feature = "arbitrary_precision")]
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Numeral {
    n: String,
}

#[cfg(feature = "arbitrary_precision")]
impl Numeral {
    /// The numeral text.
    pub fn as_str(&self) -> &str {
        &self.n
    }

    /// Returns the number represented as i64 if possible, or else None.
    pub fn as_i64(&self) -> Option<i64> {
        self.n.parse().ok()
    }

    /// Returns the nearest f64, or None if the numeral overflows it.
    pub fn as_f64(&self) -> Option<f64> {
        self.n.parse::<f64>().ok().filter(|f| f.is_finite())
    }
}

#[cfg(feature = "arbitrary_precision")]
impl Display for Numeral {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(&self.n)
    }
}

#[cfg(feature = "arbitrary_precision")]
impl FromStr for Numeral {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if is_json_numeral(s.as_bytes()) {
            Ok(Numeral { n: s.to_owned() })
        } else {
            Err(Error::new(ErrorCode::InvalidNumber))
        }
    }
}

#[cfg(feature = "arbitrary_precision")]
impl NumberPolicy for ArbitraryPrecision {
    type Repr = Numeral;

    fn from_f64(f: f64) -> Result<Numeral> {
        let f = tri!(DefaultNumber::from_f64(f));
        Ok(Numeral {
            n: DefaultNumber::to_numeral(&f),
        })
    }

    fn from_i64(i: i64) -> Numeral {
        let mut buffer = itoa::Buffer::new();
        Numeral {
            n: buffer.format(i).to_owned(),
        }
    }

    fn parse_numeral(numeral: &str) -> Result<Numeral> {
        numeral.parse()
    }

    fn write_numeral<W>(n: &Numeral, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(n.n.as_bytes())
    }

    fn evaluate_as_boolean(n: &Numeral) -> bool {
        n.n.bytes()
            .take_while(|&ch| ch != b'e' && ch != b'E')
            .any(|ch| matches!(ch, b'1'..=b'9'))
    }

    fn serialize_number<S>(n: &Numeral, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Some(i) = n.as_i64() {
            serializer.serialize_i64(i)
        } else if let Some(f) = n.as_f64() {
            serializer.serialize_f64(f)
        } else {
            serializer.serialize_str(&n.n)
        }
    }
}

/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
#[cfg(feature = "arbitrary_precision")]
fn is_json_numeral(s: &[u8]) -> bool {
    fn digits(s: &[u8], i: &mut usize) -> usize {
        let start = *i;
        while *i < s.len() && s[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    }

    let mut i = 0;
    if s.first() == Some(&b'-') {
        i += 1;
    }
    match s.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            digits(s, &mut i);
        }
        _ => return false,
    }
    if s.get(i) == Some(&b'.') {
        i += 1;
        if digits(s, &mut i) == 0 {
            return false;
        }
    }
    if let Some(b'e' | b'E') = s.get(i) {
        i += 1;
        if let Some(b'+' | b'-') = s.get(i) {
            i += 1;
        }
        if digits(s, &mut i) == 0 {
            return false;
        }
    }
    i == s.len()
}
