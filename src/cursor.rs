//! Character-level reading with one byte of pushback and line tracking.

use crate::error::{Error, ErrorCode, Result};
use crate::read::Read;

/// Cursor over a byte source as seen by the parser and by parse contexts.
///
/// Every byte is pulled through [`next`](Self::next). The most recent byte can
/// be pushed back once with [`unget`](Self::unget); the line counter starts
/// at 1 and advances when the byte following a `'\n'` is read.
pub struct InputCursor<R> {
    read: R,
    last_ch: Option<u8>,
    ungot: bool,
    line: usize,
    remaining_depth: u8,
    #[cfg(feature = "unbounded_depth")]
    disable_recursion_limit: bool,
}

impl<R> InputCursor<R>
where
    R: Read,
{
    /// Wraps a byte source. Nothing is read until the first call to `next`.
    pub fn new(read: R) -> Self {
        InputCursor {
            read,
            last_ch: None,
            ungot: false,
            line: 1,
            remaining_depth: 128,
            #[cfg(feature = "unbounded_depth")]
            disable_recursion_limit: false,
        }
    }

    /// Current one-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of bytes consumed so far. A pushed back byte counts as not
    /// consumed.
    pub fn byte_offset(&self) -> usize {
        self.read.byte_offset() - self.ungot as usize
    }

    /// Borrows the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.read
    }

    /// Unwraps the underlying source. A pushed back byte is lost.
    pub fn into_inner(self) -> R {
        self.read
    }

    /// Reads the next byte, or `None` at the end of input.
    pub fn next(&mut self) -> Result<Option<u8>> {
        if self.ungot {
            self.ungot = false;
            return Ok(self.last_ch);
        }
        let ch = tri!(self.read.next());
        if ch.is_some() && self.last_ch == Some(b'\n') {
            self.line += 1;
        }
        self.last_ch = ch;
        Ok(ch)
    }

    /// Pushes the most recent byte back so the next read returns it again.
    ///
    /// Does nothing after the end of input has been reached.
    ///
    /// # Panics
    ///
    /// Panics if the previous byte has already been pushed back.
    pub fn unget(&mut self) {
        if self.last_ch.is_some() {
            assert!(!self.ungot, "InputCursor::unget called twice in a row");
            self.ungot = true;
        }
    }

    /// Consumes spaces, tabs, carriage returns and newlines.
    pub fn skip_whitespace(&mut self) -> Result<()> {
        loop {
            match tri!(self.next()) {
                Some(b' ' | b'\t' | b'\n' | b'\r') => {}
                _ => {
                    self.unget();
                    return Ok(());
                }
            }
        }
    }

    /// Skips whitespace, then consumes `expected` if it is the next byte.
    pub fn expect(&mut self, expected: u8) -> Result<bool> {
        tri!(self.skip_whitespace());
        if tri!(self.next()) == Some(expected) {
            Ok(true)
        } else {
            self.unget();
            Ok(false)
        }
    }

    /// Consumes `pattern` byte by byte. On the first mismatch the offending
    /// byte is pushed back and the bytes matched so far stay consumed.
    pub fn match_literal(&mut self, pattern: &[u8]) -> Result<bool> {
        for &expected in pattern {
            if tri!(self.next()) != Some(expected) {
                self.unget();
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether the most recent read hit the end of input.
    pub(crate) fn at_eof(&self) -> bool {
        self.last_ch.is_none()
    }

    /// Reads the body of a string whose opening quote was just consumed, up to
    /// and including the closing quote, and returns it unescaped.
    ///
    /// The UTF-8 check runs on the finished string, after the closing quote.
    pub fn read_string(&mut self) -> Result<String> {
        let mut scratch = Vec::new();
        tri!(self.parse_str_into(&mut scratch));
        String::from_utf8(scratch).map_err(|_| Error::new(ErrorCode::InvalidUnicodeCodePoint))
    }

    /// Like [`read_string`](Self::read_string) but discards the contents.
    pub fn skip_string(&mut self) -> Result<()> {
        self.parse_str_into(&mut Discard)
    }

    fn parse_str_into<S>(&mut self, out: &mut S) -> Result<()>
    where
        S: Scratch,
    {
        loop {
            if !self.ungot {
                let run = self.read.plain_run();
                if let Some(&last) = run.last() {
                    if self.last_ch == Some(b'\n') {
                        self.line += 1;
                    }
                    out.extend_from_slice(run);
                    self.last_ch = Some(last);
                }
            }

            let ch = match tri!(self.next()) {
                Some(ch) if ch >= b' ' => ch,
                Some(_) => {
                    self.unget();
                    return Err(Error::new(ErrorCode::ControlCharacterWhileParsingString));
                }
                None => return Err(Error::new(ErrorCode::EofWhileParsingString)),
            };
            match ch {
                b'"' => return Ok(()),
                b'\\' => tri!(self.parse_escape(out)),
                _ => out.push(ch),
            }
        }
    }

    /// Parses a JSON escape sequence and appends it to the output. Assumes the
    /// previous byte read was a backslash.
    fn parse_escape<S>(&mut self, out: &mut S) -> Result<()>
    where
        S: Scratch,
    {
        let ch = match tri!(self.next()) {
            Some(ch) => ch,
            None => return Err(Error::new(ErrorCode::EofWhileParsingString)),
        };

        match ch {
            b'"' => out.push(b'"'),
            b'\\' => out.push(b'\\'),
            b'/' => out.push(b'/'),
            b'b' => out.push(b'\x08'),
            b'f' => out.push(b'\x0c'),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'u' => return self.parse_unicode_escape(out),
            _ => return Err(Error::new(ErrorCode::InvalidEscape)),
        }

        Ok(())
    }

    /// Parses a `\u` escape, pulling in the trailing half of a surrogate pair
    /// when needed. Assumes `\u` has just been read.
    fn parse_unicode_escape<S>(&mut self, out: &mut S) -> Result<()>
    where
        S: Scratch,
    {
        let n1 = match tri!(self.decode_hex_escape()) {
            Some(n) => n,
            None => return Err(Error::new(ErrorCode::InvalidEscape)),
        };

        let n = match n1 {
            0xDC00..=0xDFFF => return Err(Error::new(ErrorCode::LoneSurrogateInHexEscape)),
            0xD800..=0xDBFF => {
                if tri!(self.next()) != Some(b'\\') || tri!(self.next()) != Some(b'u') {
                    self.unget();
                    return Err(Error::new(ErrorCode::UnexpectedEndOfHexEscape));
                }
                let n2 = match tri!(self.decode_hex_escape()) {
                    Some(n2 @ 0xDC00..=0xDFFF) => n2,
                    _ => return Err(Error::new(ErrorCode::LoneSurrogateInHexEscape)),
                };
                // This value is in range U+10000..=U+10FFFF, which is always a
                // valid codepoint.
                ((((n1 - 0xD800) as u32) << 10) | (n2 - 0xDC00) as u32) + 0x1_0000
            }
            n => n as u32,
        };

        push_utf8_codepoint(n, out);
        Ok(())
    }

    /// Reads four hex digits. A non-hex byte is pushed back.
    fn decode_hex_escape(&mut self) -> Result<Option<u16>> {
        let mut n = 0;
        for _ in 0..4 {
            let ch = match tri!(self.next()) {
                Some(ch) => ch,
                None => return Ok(None),
            };
            let val = HEX[ch as usize];
            if val < 0 {
                self.unget();
                return Ok(None);
            }
            n = (n << 4) | val as u16;
        }
        Ok(Some(n))
    }

    /// Builds an error carrying the current line and the rest of the current
    /// input line, which is consumed in the process.
    #[cold]
    pub(crate) fn error(&mut self, code: ErrorCode) -> Error {
        let line = self.line;
        let mut near = Vec::new();
        while let Ok(Some(ch)) = self.next() {
            if ch == b'\n' {
                break;
            }
            if ch >= b' ' {
                near.push(ch);
            }
        }
        Error::at(code, line, String::from_utf8_lossy(&near).into_owned())
    }

    #[cold]
    pub(crate) fn fix_position(&mut self, err: Error) -> Error {
        err.fix_position(|code| self.error(code))
    }

    pub(crate) fn enter_nested(&mut self) -> Result<()> {
        #[cfg(feature = "unbounded_depth")]
        {
            if self.disable_recursion_limit {
                return Ok(());
            }
        }
        self.remaining_depth = match self.remaining_depth.checked_sub(1) {
            Some(0) | None => return Err(Error::new(ErrorCode::RecursionLimitExceeded)),
            Some(depth) => depth,
        };
        Ok(())
    }

    pub(crate) fn set_recursion_limit(&mut self, limit: u8) {
        self.remaining_depth = limit;
    }

    pub(crate) fn leave_nested(&mut self) {
        #[cfg(feature = "unbounded_depth")]
        {
            if self.disable_recursion_limit {
                return;
            }
        }
        self.remaining_depth += 1;
    }

    #[cfg(feature = "unbounded_depth")]
    pub(crate) fn disable_recursion_limit(&mut self) {
        self.disable_recursion_limit = true;
    }
}

/// Destination for unescaped string bytes.
trait Scratch {
    fn push(&mut self, ch: u8);
    fn extend_from_slice(&mut self, bytes: &[u8]);
}

impl Scratch for Vec<u8> {
    #[inline]
    fn push(&mut self, ch: u8) {
        Vec::push(self, ch);
    }

    #[inline]
    fn extend_from_slice(&mut self, bytes: &[u8]) {
        Vec::extend_from_slice(self, bytes);
    }
}

struct Discard;

impl Scratch for Discard {
    #[inline]
    fn push(&mut self, _ch: u8) {}

    #[inline]
    fn extend_from_slice(&mut self, _bytes: &[u8]) {}
}

fn push_utf8_codepoint<S>(n: u32, out: &mut S)
where
    S: Scratch,
{
    match n {
        0..=0x7F => out.push(n as u8),
        0x80..=0x7FF => out.extend_from_slice(&[
            ((n >> 6) & 0b0001_1111) as u8 | 0b1100_0000,
            (n & 0b0011_1111) as u8 | 0b1000_0000,
        ]),
        0x800..=0xFFFF => out.extend_from_slice(&[
            ((n >> 12) & 0b0000_1111) as u8 | 0b1110_0000,
            ((n >> 6) & 0b0011_1111) as u8 | 0b1000_0000,
            (n & 0b0011_1111) as u8 | 0b1000_0000,
        ]),
        _ => out.extend_from_slice(&[
            ((n >> 18) & 0b0000_0111) as u8 | 0b1111_0000,
            ((n >> 12) & 0b0011_1111) as u8 | 0b1000_0000,
            ((n >> 6) & 0b0011_1111) as u8 | 0b1000_0000,
            (n & 0b0011_1111) as u8 | 0b1000_0000,
        ]),
    }
}

const fn decode_hex_val(val: u8) -> i8 {
    match val {
        b'0'..=b'9' => (val - b'0') as i8,
        b'A'..=b'F' => (val - b'A' + 10) as i8,
        b'a'..=b'f' => (val - b'a' + 10) as i8,
        _ => -1,
    }
}

const fn build_hex_table() -> [i8; 256] {
    let mut table = [0; 256];
    let mut ch = 0;
    while ch < 256 {
        table[ch] = decode_hex_val(ch as u8);
        ch += 1;
    }
    table
}

static HEX: [i8; 256] = build_hex_table();
