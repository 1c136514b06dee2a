//! Parse JSON text.
//!
//! The parser core is a recursive descent over an [`InputCursor`] that never
//! builds anything itself. Every syntactic event is handed to a [`Context`],
//! which decides what the event means: [`DefaultContext`] materializes a
//! [`Value`], [`NullContext`] only checks syntax, [`DenyContext`] refuses
//! everything. Contexts that accept an array but hand each element to a
//! fresh context can consume arbitrarily long arrays one item at a time.

use crate::cursor::InputCursor;
use crate::error::{Error, ErrorCode, Result};
use crate::number::{DefaultNumber, Integer, NumberPolicy};
use crate::read::{self, IoRead, IterRead, Read, SliceRead};
use crate::value::Value;
use std::io;
use std::iter::FusedIterator;
use std::marker::PhantomData;

//////////////////////////////////////////////////////////////////////////////

/// Receiver of parse events.
///
/// Every method returns `Ok(())` to accept the event or an error to stop the
/// parse. Unless overridden, a method refuses its event with
/// [`Error::rejected`]; `parse_array_stop` is the exception and accepts,
/// since it is only reached after `parse_array_start` was accepted.
///
/// String, array item and object item events hand over the cursor: the
/// context is then responsible for consuming that part of the input, either
/// by reading it itself or by calling [`parse_value`] with some context.
///
/// ```
/// use picojson::{Context, DefaultContext, InputCursor, Read, Result, Value};
///
/// // Accepts a top-level array and sums its elements one at a time.
/// struct Sum(f64);
///
/// impl Context for Sum {
///     fn parse_array_start(&mut self) -> Result<()> {
///         Ok(())
///     }
///
///     fn parse_array_item<R: Read>(
///         &mut self,
///         cursor: &mut InputCursor<R>,
///         _index: usize,
///     ) -> Result<()> {
///         let mut item: Value = Value::Null;
///         picojson::parse_value(cursor, &mut DefaultContext::new(&mut item))?;
///         self.0 += item.as_number().copied().unwrap_or(0.0);
///         Ok(())
///     }
/// }
///
/// let mut sum = Sum(0.0);
/// picojson::Parser::from_str("[1, 2.5, 3]").parse_with(&mut sum).unwrap();
/// assert_eq!(sum.0, 6.5);
///
/// let err = picojson::Parser::from_str("{}").parse_with(&mut sum).unwrap_err();
/// assert_eq!(err.to_string(), "syntax error at line 1 near: }");
/// ```
pub trait Context {
    /// The literal `null`.
    fn set_null(&mut self) -> Result<()> {
        Err(Error::rejected())
    }

    /// The literal `true` or `false`.
    fn set_bool(&mut self, b: bool) -> Result<()> {
        let _ = b;
        Err(Error::rejected())
    }

    /// An integral numeral that fits in an `i64` and is written the way the
    /// integer prints, so no leading zeros and no `-0`. Forwards the decimal
    /// text of the integer to [`set_number`](Self::set_number) unless
    /// overridden.
    fn set_integer(&mut self, i: i64) -> Result<()> {
        let mut buffer = itoa::Buffer::new();
        self.set_number(buffer.format(i))
    }

    /// Any other numeral, as scanned from the input. The text only consists
    /// of digits, signs, exponent markers and the decimal point, but has not
    /// been checked against the number grammar.
    fn set_number(&mut self, numeral: &str) -> Result<()> {
        let _ = numeral;
        Err(Error::rejected())
    }

    /// The opening quote of a string has been consumed. The context must
    /// consume the rest, typically with [`InputCursor::read_string`] or
    /// [`InputCursor::skip_string`].
    fn parse_string<R>(&mut self, cursor: &mut InputCursor<R>) -> Result<()>
    where
        R: Read,
    {
        let _ = cursor;
        Err(Error::rejected())
    }

    /// A `[` has been consumed.
    fn parse_array_start(&mut self) -> Result<()> {
        Err(Error::rejected())
    }

    /// Element number `index` follows; the context must parse exactly one
    /// value from the cursor.
    fn parse_array_item<R>(&mut self, cursor: &mut InputCursor<R>, index: usize) -> Result<()>
    where
        R: Read,
    {
        let _ = (cursor, index);
        Err(Error::rejected())
    }

    /// The closing `]` has been consumed after `len` elements.
    fn parse_array_stop(&mut self, len: usize) -> Result<()> {
        let _ = len;
        Ok(())
    }

    /// A `{` has been consumed.
    fn parse_object_start(&mut self) -> Result<()> {
        Err(Error::rejected())
    }

    /// The member named `key` follows, its colon already consumed; the
    /// context must parse exactly one value from the cursor.
    fn parse_object_item<R>(&mut self, cursor: &mut InputCursor<R>, key: String) -> Result<()>
    where
        R: Read,
    {
        let _ = (cursor, key);
        Err(Error::rejected())
    }
}

/// Context that writes the parsed document into a [`Value`].
///
/// Duplicate object keys keep the last value.
pub struct DefaultContext<'a, P: NumberPolicy = DefaultNumber> {
    out: &'a mut Value<P>,
}

impl<'a, P> DefaultContext<'a, P>
where
    P: NumberPolicy,
{
    /// Parse into `out`, overwriting what it held.
    pub fn new(out: &'a mut Value<P>) -> Self {
        DefaultContext { out }
    }
}

impl<'a, P> Context for DefaultContext<'a, P>
where
    P: NumberPolicy,
{
    fn set_null(&mut self) -> Result<()> {
        *self.out = Value::Null;
        Ok(())
    }

    fn set_bool(&mut self, b: bool) -> Result<()> {
        *self.out = Value::Bool(b);
        Ok(())
    }

    fn set_integer(&mut self, i: i64) -> Result<()> {
        *self.out = Value::Integer(Integer::new(i));
        Ok(())
    }

    fn set_number(&mut self, numeral: &str) -> Result<()> {
        *self.out = Value::Number(tri!(P::parse_numeral(numeral)));
        Ok(())
    }

    fn parse_string<R>(&mut self, cursor: &mut InputCursor<R>) -> Result<()>
    where
        R: Read,
    {
        *self.out = Value::String(tri!(cursor.read_string()));
        Ok(())
    }

    fn parse_array_start(&mut self) -> Result<()> {
        *self.out = Value::Array(Vec::new());
        Ok(())
    }

    fn parse_array_item<R>(&mut self, cursor: &mut InputCursor<R>, _index: usize) -> Result<()>
    where
        R: Read,
    {
        let mut item = Value::Null;
        tri!(parse_value(cursor, &mut DefaultContext::new(&mut item)));
        if let Value::Array(array) = self.out {
            array.push(item);
        }
        Ok(())
    }

    fn parse_object_start(&mut self) -> Result<()> {
        *self.out = Value::Object(Default::default());
        Ok(())
    }

    fn parse_object_item<R>(&mut self, cursor: &mut InputCursor<R>, key: String) -> Result<()>
    where
        R: Read,
    {
        let mut item = Value::Null;
        tri!(parse_value(cursor, &mut DefaultContext::new(&mut item)));
        if let Value::Object(object) = self.out {
            object.insert(key, item);
        }
        Ok(())
    }
}

/// Context that accepts every well-formed document and keeps nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullContext;

impl Context for NullContext {
    fn set_null(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_bool(&mut self, _b: bool) -> Result<()> {
        Ok(())
    }

    fn set_integer(&mut self, _i: i64) -> Result<()> {
        Ok(())
    }

    fn set_number(&mut self, _numeral: &str) -> Result<()> {
        Ok(())
    }

    fn parse_string<R>(&mut self, cursor: &mut InputCursor<R>) -> Result<()>
    where
        R: Read,
    {
        cursor.skip_string()
    }

    fn parse_array_start(&mut self) -> Result<()> {
        Ok(())
    }

    fn parse_array_item<R>(&mut self, cursor: &mut InputCursor<R>, _index: usize) -> Result<()>
    where
        R: Read,
    {
        parse_value(cursor, self)
    }

    fn parse_object_start(&mut self) -> Result<()> {
        Ok(())
    }

    fn parse_object_item<R>(&mut self, cursor: &mut InputCursor<R>, _key: String) -> Result<()>
    where
        R: Read,
    {
        parse_value(cursor, self)
    }
}

/// Context that refuses every value.
///
/// Useful as documentation of intent in a custom context that only overrides
/// the events it expects.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenyContext;

impl Context for DenyContext {}

//////////////////////////////////////////////////////////////////////////////

/// Parses one value from the cursor, reporting it to `ctx`.
///
/// Leading whitespace is skipped; nothing after the value is consumed except
/// the byte that ended a numeral, which is pushed back. Errors raised here
/// carry no position yet: [`Parser`] attaches the line and excerpt when the
/// error reaches the top level.
pub fn parse_value<R, C>(cursor: &mut InputCursor<R>, ctx: &mut C) -> Result<()>
where
    R: Read,
    C: Context,
{
    tri!(cursor.skip_whitespace());
    match tri!(cursor.next()) {
        Some(b'n') => {
            if tri!(cursor.match_literal(b"ull")) {
                ctx.set_null()
            } else {
                Err(Error::new(ErrorCode::ExpectedSomeIdent))
            }
        }
        Some(b'f') => {
            if tri!(cursor.match_literal(b"alse")) {
                ctx.set_bool(false)
            } else {
                Err(Error::new(ErrorCode::ExpectedSomeIdent))
            }
        }
        Some(b't') => {
            if tri!(cursor.match_literal(b"rue")) {
                ctx.set_bool(true)
            } else {
                Err(Error::new(ErrorCode::ExpectedSomeIdent))
            }
        }
        Some(b'"') => ctx.parse_string(cursor),
        Some(b'[') => parse_array(cursor, ctx),
        Some(b'{') => parse_object(cursor, ctx),
        Some(b'0'..=b'9' | b'-') => {
            cursor.unget();
            let numeral = tri!(scan_numeral(cursor));
            if numeral.is_empty() {
                return Err(Error::new(ErrorCode::InvalidNumber));
            }
            match canonical_integer(&numeral) {
                Some(i) => ctx.set_integer(i),
                None => ctx.set_number(&numeral),
            }
        }
        Some(_) => {
            cursor.unget();
            Err(Error::new(ErrorCode::ExpectedSomeValue))
        }
        None => Err(Error::new(ErrorCode::EofWhileParsingValue)),
    }
}

// The integer a numeral spells, if it is written exactly the way the integer
// prints. `-0` and `007` fail this and keep their text.
fn canonical_integer(numeral: &str) -> Option<i64> {
    let i = numeral.parse::<i64>().ok()?;
    let mut buffer = itoa::Buffer::new();
    if buffer.format(i) == numeral {
        Some(i)
    } else {
        None
    }
}

// Consumes bytes while they can belong to a numeral. The byte that ends the
// run is pushed back.
fn scan_numeral<R>(cursor: &mut InputCursor<R>) -> Result<String>
where
    R: Read,
{
    let mut numeral = String::new();
    loop {
        match tri!(cursor.next()) {
            Some(ch @ (b'0'..=b'9' | b'+' | b'-' | b'e' | b'E' | b'.')) => {
                numeral.push(ch as char);
            }
            _ => {
                cursor.unget();
                return Ok(numeral);
            }
        }
    }
}

fn parse_array<R, C>(cursor: &mut InputCursor<R>, ctx: &mut C) -> Result<()>
where
    R: Read,
    C: Context,
{
    tri!(cursor.enter_nested());
    let ret = parse_array_body(cursor, ctx);
    cursor.leave_nested();
    ret
}

fn parse_array_body<R, C>(cursor: &mut InputCursor<R>, ctx: &mut C) -> Result<()>
where
    R: Read,
    C: Context,
{
    tri!(ctx.parse_array_start());
    if tri!(cursor.expect(b']')) {
        return ctx.parse_array_stop(0);
    }
    let mut index = 0;
    loop {
        tri!(ctx.parse_array_item(cursor, index));
        index += 1;
        if !tri!(cursor.expect(b',')) {
            break;
        }
    }
    if !tri!(cursor.expect(b']')) {
        return Err(eof_or(cursor, ErrorCode::EofWhileParsingList, ErrorCode::ExpectedListCommaOrEnd));
    }
    ctx.parse_array_stop(index)
}

fn parse_object<R, C>(cursor: &mut InputCursor<R>, ctx: &mut C) -> Result<()>
where
    R: Read,
    C: Context,
{
    tri!(cursor.enter_nested());
    let ret = parse_object_body(cursor, ctx);
    cursor.leave_nested();
    ret
}

fn parse_object_body<R, C>(cursor: &mut InputCursor<R>, ctx: &mut C) -> Result<()>
where
    R: Read,
    C: Context,
{
    tri!(ctx.parse_object_start());
    if tri!(cursor.expect(b'}')) {
        return Ok(());
    }
    loop {
        if !tri!(cursor.expect(b'"')) {
            return Err(eof_or(cursor, ErrorCode::EofWhileParsingObject, ErrorCode::KeyMustBeAString));
        }
        let key = tri!(cursor.read_string());
        if !tri!(cursor.expect(b':')) {
            return Err(eof_or(cursor, ErrorCode::EofWhileParsingObject, ErrorCode::ExpectedColon));
        }
        tri!(ctx.parse_object_item(cursor, key));
        if !tri!(cursor.expect(b',')) {
            break;
        }
    }
    if tri!(cursor.expect(b'}')) {
        Ok(())
    } else {
        Err(eof_or(cursor, ErrorCode::EofWhileParsingObject, ErrorCode::ExpectedObjectCommaOrEnd))
    }
}

fn eof_or<R>(cursor: &InputCursor<R>, eof: ErrorCode, otherwise: ErrorCode) -> Error
where
    R: Read,
{
    Error::new(if cursor.at_eof() { eof } else { otherwise })
}

//////////////////////////////////////////////////////////////////////////////

/// A structure that parses JSON text from a byte source.
///
/// A parser reads one value per call and leaves whatever follows in the
/// input, so several values can be taken from the same source in turn.
pub struct Parser<R> {
    cursor: InputCursor<R>,
}

impl<R> Parser<R>
where
    R: Read,
{
    /// Create a JSON parser from one of the possible picojson input sources.
    ///
    /// Typically it is more convenient to use one of these methods instead:
    ///
    ///   - Parser::from_str
    ///   - Parser::from_slice
    ///   - Parser::from_reader
    ///   - Parser::from_iter
    pub fn new(read: R) -> Self {
        Parser {
            cursor: InputCursor::new(read),
        }
    }

    /// Parses one value, reporting its events to `ctx`.
    ///
    /// Errors carry the line on which parsing stopped and the rest of that
    /// line. Reading the excerpt consumes it, so after an error the parser
    /// is positioned at the start of the next line.
    pub fn parse_with<C>(&mut self, ctx: &mut C) -> Result<()>
    where
        C: Context,
    {
        match parse_value(&mut self.cursor, ctx) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.cursor.fix_position(err)),
        }
    }

    /// Parses one value into a new [`Value`].
    pub fn parse<P>(&mut self) -> Result<Value<P>>
    where
        P: NumberPolicy,
    {
        let mut value = Value::Null;
        tri!(self.parse_with(&mut DefaultContext::new(&mut value)));
        Ok(value)
    }

    /// Checks the syntax of one value without building it.
    pub fn validate(&mut self) -> Result<()> {
        self.parse_with(&mut NullContext)
    }

    /// The `Parser::end` method should be called after a value has been fully
    /// parsed. This allows the `Parser` to validate that the input stream is
    /// at the end or that it only has trailing whitespace.
    pub fn end(&mut self) -> Result<()> {
        tri!(self.cursor.skip_whitespace());
        match tri!(self.cursor.next()) {
            None => Ok(()),
            Some(_) => {
                self.cursor.unget();
                Err(self.cursor.error(ErrorCode::TrailingCharacters))
            }
        }
    }

    /// Line the parser is on, starting at 1.
    pub fn line(&self) -> usize {
        self.cursor.line()
    }

    /// Number of bytes consumed from the source so far.
    pub fn byte_offset(&self) -> usize {
        self.cursor.byte_offset()
    }

    /// Turn a JSON parser into an iterator over the values it contains.
    pub fn into_iter<P>(self) -> StreamParser<R, P>
    where
        P: NumberPolicy,
    {
        StreamParser {
            offset: self.byte_offset(),
            parser: self,
            failed: false,
            output: PhantomData,
        }
    }

    /// Sets the maximum nesting depth of arrays and objects. A limit of `n`
    /// accepts documents nested `n - 1` levels deep. The default is 128.
    pub fn set_recursion_limit(&mut self, limit: u8) -> &mut Self {
        self.cursor.set_recursion_limit(limit);
        self
    }

    /// Unwraps the byte source.
    pub fn into_inner(self) -> R {
        self.cursor.into_inner()
    }

    /// Parse arbitrarily deep JSON structures without any consideration for
    /// overflowing the stack.
    ///
    /// You will want to provide some other way to protect against stack
    /// overflows, such as by wrapping your parser call in a thread with a
    /// large stack.
    #[cfg(feature = "unbounded_depth")]
    #[cfg_attr(docsrs, doc(cfg(feature = "unbounded_depth")))]
    pub fn disable_recursion_limit(&mut self) {
        self.cursor.disable_recursion_limit();
    }
}

impl<'a> Parser<SliceRead<'a>> {
    /// Creates a JSON parser from a `&[u8]`.
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Parser::new(SliceRead::new(bytes))
    }

    /// Creates a JSON parser from a `&str`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &'a str) -> Self {
        Parser::from_slice(s.as_bytes())
    }

    /// The input that has not been consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        let read = self.cursor.get_ref();
        &read.input()[self.cursor.byte_offset()..]
    }
}

impl<R> Parser<IoRead<R>>
where
    R: io::Read,
{
    /// Creates a JSON parser from an `io::Read`.
    ///
    /// Reader-based parsers do not support parsing borrowed strings, and
    /// read one byte at a time, so wrap unbuffered sources in an
    /// [`io::BufReader`].
    pub fn from_reader(reader: R) -> Self {
        Parser::new(IoRead::new(reader))
    }
}

impl<I> Parser<IterRead<I>>
where
    I: Iterator<Item = u8>,
{
    /// Creates a JSON parser pulling bytes from an iterator.
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Parser::new(IterRead::new(iter.into_iter()))
    }
}

//////////////////////////////////////////////////////////////////////////////

/// Iterator that parses a stream of JSON values.
///
/// A stream of JSON data can be values one after another, optionally
/// separated by whitespace. The iterator ends at the end of input, or after
/// yielding the first error.
///
/// ```
/// use picojson::{Parser, Value};
///
/// let data = r#"{"k": 3}  1 "cool" [0, 1, 2]"#;
///
/// let stream = Parser::from_str(data).into_iter::<picojson::DefaultNumber>();
/// let values = stream.collect::<picojson::Result<Vec<Value>>>().unwrap();
/// assert_eq!(values.len(), 4);
/// assert_eq!(values[2], "cool");
/// ```
pub struct StreamParser<R, P = DefaultNumber> {
    parser: Parser<R>,
    offset: usize,
    failed: bool,
    output: PhantomData<P>,
}

impl<R, P> StreamParser<R, P>
where
    R: Read,
    P: NumberPolicy,
{
    /// Returns the number of bytes so far parsed into values, including the
    /// whitespace in front of a value that failed to parse.
    ///
    /// If a stream parser returns an EOF error, new data can be joined to
    /// `old_data[stream.byte_offset()..]` to try again.
    pub fn byte_offset(&self) -> usize {
        self.offset
    }

    fn peek_end(&mut self) -> Result<bool> {
        let cursor = &mut self.parser.cursor;
        tri!(cursor.skip_whitespace());
        Ok(match tri!(cursor.next()) {
            Some(_) => {
                cursor.unget();
                false
            }
            None => true,
        })
    }
}

impl<R, P> Iterator for StreamParser<R, P>
where
    R: Read,
    P: NumberPolicy,
{
    type Item = Result<Value<P>>;

    fn next(&mut self) -> Option<Result<Value<P>>> {
        if self.failed {
            return None;
        }
        let at_end = self.peek_end();
        self.offset = self.parser.byte_offset();
        let ret = match at_end {
            Ok(true) => return None,
            Ok(false) => self.parser.parse(),
            Err(err) => Err(err),
        };
        match ret {
            Ok(_) => self.offset = self.parser.byte_offset(),
            Err(_) => self.failed = true,
        }
        Some(ret)
    }
}

impl<R, P> FusedIterator for StreamParser<R, P>
where
    R: Read,
    P: NumberPolicy,
{
}

//////////////////////////////////////////////////////////////////////////////

fn from_trait<R, P>(read: R) -> Result<Value<P>>
where
    R: Read,
    P: NumberPolicy,
{
    Parser::new(read).parse()
}

/// Parse a value from a string of JSON text.
///
/// Only the first value is read; anything after it is ignored. Use
/// [`Parser::end`] to insist on a single value.
///
/// ```
/// let value: picojson::Value = picojson::from_str(r#"{"a": [1, 2]}"#).unwrap();
/// assert_eq!(value["a"][1], 2);
///
/// let err = picojson::from_str::<picojson::DefaultNumber>("falsoa").unwrap_err();
/// assert_eq!(err.to_string(), "syntax error at line 1 near: oa");
/// ```
pub fn from_str<P>(s: &str) -> Result<Value<P>>
where
    P: NumberPolicy,
{
    from_trait(read::SliceRead::new(s.as_bytes()))
}

/// Parse a value from bytes of JSON text.
pub fn from_slice<P>(v: &[u8]) -> Result<Value<P>>
where
    P: NumberPolicy,
{
    from_trait(read::SliceRead::new(v))
}

/// Parse a value from an IO stream of JSON text.
///
/// The reader is read one byte at a time; wrap files and sockets in an
/// [`io::BufReader`].
pub fn from_reader<R, P>(rdr: R) -> Result<Value<P>>
where
    R: io::Read,
    P: NumberPolicy,
{
    from_trait(read::IoRead::new(rdr))
}

/// Parse a value from an iterator over bytes of JSON text.
pub fn from_iter<I, P>(iter: I) -> Result<Value<P>>
where
    I: IntoIterator<Item = u8>,
    P: NumberPolicy,
{
    from_trait(read::IterRead::new(iter.into_iter()))
}

/// Checks that `v` starts with a well-formed JSON value.
pub fn validate(v: &[u8]) -> Result<()> {
    Parser::from_slice(v).validate()
}

/// Parses the value at the front of `input` into `value`.
///
/// On success `input` is advanced past the value and nothing else, so a
/// sequence of concatenated documents can be consumed by calling this in a
/// loop. On failure `input` is left as it was and the contents of `value`
/// are unspecified.
///
/// ```
/// let mut input: &[u8] = b"[1] {\"a\": 2} 3";
/// let mut value: picojson::Value = picojson::Value::Null;
///
/// picojson::parse_into(&mut value, &mut input).unwrap();
/// assert_eq!(value[0], 1);
/// assert_eq!(input, b" {\"a\": 2} 3");
/// ```
pub fn parse_into<P>(value: &mut Value<P>, input: &mut &[u8]) -> Result<()>
where
    P: NumberPolicy,
{
    let mut parser = Parser::from_slice(*input);
    tri!(parser.parse_with(&mut DefaultContext::new(value)));
    *input = parser.remaining();
    Ok(())
}
