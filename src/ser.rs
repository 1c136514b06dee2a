//! Writing a [`Value`] as JSON text.

use crate::error::{Error, Result};
use crate::number::NumberPolicy;
use crate::value::Value;
use std::io;

/// A structure for serializing JSON values into an output sink.
pub struct Serializer<W, F = CompactFormatter> {
    writer: W,
    formatter: F,
}

impl<W> Serializer<W>
where
    W: io::Write,
{
    /// Creates a new JSON serializer producing compact output.
    #[inline]
    pub fn new(writer: W) -> Self {
        Serializer::with_formatter(writer, CompactFormatter)
    }
}

impl<'a, W> Serializer<W, PrettyFormatter<'a>>
where
    W: io::Write,
{
    /// Creates a new JSON pretty print serializer.
    #[inline]
    pub fn pretty(writer: W) -> Self {
        Serializer::with_formatter(writer, PrettyFormatter::new())
    }
}

impl<W, F> Serializer<W, F>
where
    W: io::Write,
    F: Formatter,
{
    /// Creates a new JSON visitor whose output will be written to the writer
    /// specified.
    #[inline]
    pub fn with_formatter(writer: W, formatter: F) -> Self {
        Serializer { writer, formatter }
    }

    /// Unwrap the `Writer` from the `Serializer`.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes one complete document.
    pub fn serialize<P>(&mut self, value: &Value<P>) -> Result<()>
    where
        P: NumberPolicy,
    {
        tri!(self.write_value(value).map_err(Error::io));
        self.formatter.end(&mut self.writer).map_err(Error::io)
    }

    /// Writes a value without the formatter's document end.
    pub(crate) fn write_value<P>(&mut self, value: &Value<P>) -> io::Result<()>
    where
        P: NumberPolicy,
    {
        match value {
            Value::Null => self.writer.write_all(b"null"),
            Value::Bool(true) => self.writer.write_all(b"true"),
            Value::Bool(false) => self.writer.write_all(b"false"),
            Value::Number(n) => P::write_numeral(n, &mut self.writer),
            Value::Integer(i) => match i.widened() {
                Some(n) => P::write_numeral(n, &mut self.writer),
                None => {
                    let mut buffer = itoa::Buffer::new();
                    self.writer.write_all(buffer.format(i.value()).as_bytes())
                }
            },
            Value::String(s) => format_escaped_str(&mut self.writer, s),
            Value::Array(vec) => {
                tri!(self.formatter.open(&mut self.writer, b'['));
                for (i, element) in vec.iter().enumerate() {
                    tri!(self.formatter.comma(&mut self.writer, i == 0));
                    tri!(self.write_value(element));
                }
                self.formatter.close(&mut self.writer, b']', vec.is_empty())
            }
            Value::Object(map) => {
                tri!(self.formatter.open(&mut self.writer, b'{'));
                for (i, (key, element)) in map.iter().enumerate() {
                    tri!(self.formatter.comma(&mut self.writer, i == 0));
                    tri!(format_escaped_str(&mut self.writer, key));
                    tri!(self.formatter.colon(&mut self.writer));
                    tri!(self.write_value(element));
                }
                self.formatter.close(&mut self.writer, b'}', map.is_empty())
            }
        }
    }
}

/// This trait abstracts away serializing the JSON control characters, which
/// allows the user to optionally pretty print the JSON output.
pub trait Formatter {
    /// Called when serializing a '{' or '['.
    fn open<W>(&mut self, writer: &mut W, ch: u8) -> io::Result<()>
    where
        W: ?Sized + io::Write;

    /// Called before each array element or object key.
    fn comma<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write;

    /// Called between an object key and its value.
    fn colon<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write;

    /// Called when serializing a '}' or ']'.
    fn close<W>(&mut self, writer: &mut W, ch: u8, empty: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write;

    /// Called once after the top-level value.
    #[inline]
    fn end<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let _ = writer;
        Ok(())
    }
}

/// This structure compacts a JSON value with no extra whitespace.
#[derive(Clone, Debug)]
pub struct CompactFormatter;

impl Formatter for CompactFormatter {
    #[inline]
    fn open<W>(&mut self, writer: &mut W, ch: u8) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(&[ch])
    }

    #[inline]
    fn comma<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b",")
        }
    }

    #[inline]
    fn colon<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b":")
    }

    #[inline]
    fn close<W>(&mut self, writer: &mut W, ch: u8, _empty: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(&[ch])
    }
}

/// This structure pretty prints a JSON value to make it human readable.
///
/// Every element and member goes on its own line, objects put a space after
/// the colon, empty containers stay on one line and the document ends with a
/// newline.
#[derive(Clone, Debug)]
pub struct PrettyFormatter<'a> {
    current_indent: usize,
    indent: &'a [u8],
}

impl<'a> PrettyFormatter<'a> {
    /// Construct a pretty printer formatter that defaults to using two spaces for indentation.
    pub fn new() -> Self {
        PrettyFormatter::with_indent(b"  ")
    }

    /// Construct a pretty printer formatter that uses the `indent` string for indentation.
    pub fn with_indent(indent: &'a [u8]) -> Self {
        PrettyFormatter {
            current_indent: 0,
            indent,
        }
    }
}

impl<'a> Default for PrettyFormatter<'a> {
    fn default() -> Self {
        PrettyFormatter::new()
    }
}

impl<'a> Formatter for PrettyFormatter<'a> {
    #[inline]
    fn open<W>(&mut self, writer: &mut W, ch: u8) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.current_indent += 1;
        writer.write_all(&[ch])
    }

    #[inline]
    fn comma<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        tri!(writer.write_all(if first { b"\n" } else { b",\n" }));
        indent(writer, self.current_indent, self.indent)
    }

    #[inline]
    fn colon<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    #[inline]
    fn close<W>(&mut self, writer: &mut W, ch: u8, empty: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.current_indent -= 1;
        if !empty {
            tri!(writer.write_all(b"\n"));
            tri!(indent(writer, self.current_indent, self.indent));
        }
        writer.write_all(&[ch])
    }

    #[inline]
    fn end<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"\n")
    }
}

/// Writes `value` as a quoted JSON string.
///
/// Quote, backslash and solidus get their two-character escapes, as do
/// backspace, form feed, newline, carriage return and tab. Any other byte
/// below 0x20, and DEL, is written as `\u00XX`.
pub fn format_escaped_str<W>(writer: &mut W, value: &str) -> io::Result<()>
where
    W: ?Sized + io::Write,
{
    let bytes = value.as_bytes();

    tri!(writer.write_all(b"\""));

    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let escape = ESCAPE[byte as usize];
        if escape == 0 {
            continue;
        }

        if start < i {
            tri!(writer.write_all(&bytes[start..i]));
        }

        if escape == UU {
            static HEX_DIGITS: [u8; 16] = *b"0123456789abcdef";
            tri!(writer.write_all(&[
                b'\\',
                b'u',
                b'0',
                b'0',
                HEX_DIGITS[(byte >> 4) as usize],
                HEX_DIGITS[(byte & 0xF) as usize],
            ]));
        } else {
            tri!(writer.write_all(&[b'\\', escape]));
        }

        start = i + 1;
    }

    if start != bytes.len() {
        tri!(writer.write_all(&bytes[start..]));
    }

    writer.write_all(b"\"")
}

const BB: u8 = b'b'; // \x08
const TT: u8 = b't'; // \x09
const NN: u8 = b'n'; // \x0A
const FF: u8 = b'f'; // \x0C
const RR: u8 = b'r'; // \x0D
const QU: u8 = b'"'; // \x22
const SL: u8 = b'/'; // \x2F
const BS: u8 = b'\\'; // \x5C
const UU: u8 = b'u'; // \x00...\x1F except the ones above, and \x7F
const __: u8 = 0;

// Lookup table of escape sequences. A value of b'x' at index i means that byte
// i is escaped as "\x" in JSON. A value of 0 means that byte i is not escaped.
#[rustfmt::skip]
static ESCAPE: [u8; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    UU, UU, UU, UU, UU, UU, UU, UU, BB, TT, NN, UU, FF, RR, UU, UU, // 0
    UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, // 1
    __, __, QU, __, __, __, __, __, __, __, __, __, __, __, __, SL, // 2
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
    __, __, __, __, __, __, __, __, __, __, __, __, BS, __, __, __, // 5
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, UU, // 7
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

/// Serialize the given value as compact JSON into the I/O stream.
#[inline]
pub fn to_writer<W, P>(writer: W, value: &Value<P>) -> Result<()>
where
    W: io::Write,
    P: NumberPolicy,
{
    let mut ser = Serializer::new(writer);
    ser.serialize(value)
}

/// Serialize the given value as pretty-printed JSON into the I/O stream.
#[inline]
pub fn to_writer_pretty<W, P>(writer: W, value: &Value<P>) -> Result<()>
where
    W: io::Write,
    P: NumberPolicy,
{
    let mut ser = Serializer::pretty(writer);
    ser.serialize(value)
}

/// Serialize the given value as a compact JSON byte vector.
#[inline]
pub fn to_vec<P>(value: &Value<P>) -> Vec<u8>
where
    P: NumberPolicy,
{
    let mut writer = Vec::with_capacity(128);
    // Writes into a Vec do not fail.
    let _ = to_writer(&mut writer, value);
    writer
}

/// Serialize the given value as a pretty-printed JSON byte vector.
#[inline]
pub fn to_vec_pretty<P>(value: &Value<P>) -> Vec<u8>
where
    P: NumberPolicy,
{
    let mut writer = Vec::with_capacity(128);
    // Writes into a Vec do not fail.
    let _ = to_writer_pretty(&mut writer, value);
    writer
}

/// Serialize the given value as a compact JSON string.
#[inline]
pub fn to_string<P>(value: &Value<P>) -> String
where
    P: NumberPolicy,
{
    into_string(to_vec(value))
}

/// Serialize the given value as a pretty-printed JSON string.
#[inline]
pub fn to_string_pretty<P>(value: &Value<P>) -> String
where
    P: NumberPolicy,
{
    into_string(to_vec_pretty(value))
}

// Number policies outside this crate may write arbitrary bytes.
fn into_string(vec: Vec<u8>) -> String {
    match String::from_utf8(vec) {
        Ok(string) => string,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

fn indent<W>(wr: &mut W, n: usize, s: &[u8]) -> io::Result<()>
where
    W: ?Sized + io::Write,
{
    for _ in 0..n {
        tri!(wr.write_all(s));
    }
    Ok(())
}
