//! When parsing JSON goes wrong.

use std::error;
use std::fmt::{self, Debug, Display};
use std::io;
use std::result;

/// This type represents all possible errors that can occur when parsing JSON
/// text or constructing a number from an unrepresentable float.
pub struct Error {
    /// This `Box` allows us to keep the size of `Error` as small as possible. A
    /// larger `Error` type was substantially slower due to all the functions
    /// that pass around `Result<T, Error>`.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `picojson::Error`.
pub type Result<T> = result::Result<T, Error>;

impl Error {
    /// One-based line number at which the error was detected.
    ///
    /// The line counter advances when the character after a newline is read,
    /// so an error triggered by a newline itself is reported on the line that
    /// the newline terminates. Errors without a position report line 0.
    pub fn line(&self) -> usize {
        self.err.line
    }

    /// The rest of the input line following the point of failure, with
    /// control characters dropped.
    pub fn near(&self) -> &str {
        &self.err.near
    }

    /// Specifies the cause of this error.
    pub fn code(&self) -> &ErrorCode {
        &self.err.code
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::Io` - failure to read bytes on an IO stream
    /// - `Category::Syntax` - input that is not syntactically valid JSON
    /// - `Category::Data` - valid JSON refused by the parse context
    /// - `Category::Eof` - unexpected end of the input data
    pub fn classify(&self) -> Category {
        match self.err.code {
            ErrorCode::Rejected => Category::Data,
            ErrorCode::Io(_) => Category::Io,
            ErrorCode::EofWhileParsingList
            | ErrorCode::EofWhileParsingObject
            | ErrorCode::EofWhileParsingString
            | ErrorCode::EofWhileParsingValue => Category::Eof,
            ErrorCode::ExpectedColon
            | ErrorCode::ExpectedListCommaOrEnd
            | ErrorCode::ExpectedObjectCommaOrEnd
            | ErrorCode::ExpectedSomeIdent
            | ErrorCode::ExpectedSomeValue
            | ErrorCode::InvalidEscape
            | ErrorCode::InvalidNumber
            | ErrorCode::NumberOutOfRange
            | ErrorCode::InvalidUnicodeCodePoint
            | ErrorCode::ControlCharacterWhileParsingString
            | ErrorCode::KeyMustBeAString
            | ErrorCode::LoneSurrogateInHexEscape
            | ErrorCode::TrailingCharacters
            | ErrorCode::UnexpectedEndOfHexEscape
            | ErrorCode::RecursionLimitExceeded => Category::Syntax,
        }
    }

    /// Returns true if this error was caused by a failure to read bytes on an
    /// IO stream.
    pub fn is_io(&self) -> bool {
        self.classify() == Category::Io
    }

    /// Returns true if this error was caused by input that was not
    /// syntactically valid JSON.
    pub fn is_syntax(&self) -> bool {
        self.classify() == Category::Syntax
    }

    /// Returns true if this error was caused by a parse context refusing an
    /// otherwise well-formed value.
    pub fn is_data(&self) -> bool {
        self.classify() == Category::Data
    }

    /// Returns true if this error was caused by prematurely reaching the end of
    /// the input data.
    ///
    /// Callers that process streaming input may be interested in retrying the
    /// parse once more data is available.
    pub fn is_eof(&self) -> bool {
        self.classify() == Category::Eof
    }
}

/// Categorizes the cause of a `picojson::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The error was caused by a failure to read bytes on an IO stream.
    Io,

    /// The error was caused by input that was not syntactically valid JSON.
    Syntax,

    /// The input was well-formed but a parse context refused one of its
    /// values.
    Data,

    /// The error was caused by prematurely reaching the end of the input data.
    Eof,
}

#[allow(clippy::fallible_impl_from)]
impl From<Error> for io::Error {
    /// Convert a `picojson::Error` into an `io::Error`.
    ///
    /// JSON syntax and data errors are turned into `InvalidData` IO errors.
    /// EOF errors are turned into `UnexpectedEof` IO errors.
    fn from(j: Error) -> Self {
        if let ErrorCode::Io(err) = j.err.code {
            err
        } else {
            match j.classify() {
                Category::Io => unreachable!(),
                Category::Syntax | Category::Data => io::Error::new(io::ErrorKind::InvalidData, j),
                Category::Eof => io::Error::new(io::ErrorKind::UnexpectedEof, j),
            }
        }
    }
}

struct ErrorImpl {
    code: ErrorCode,
    line: usize,
    near: String,
}

/// This type describes all possible errors that can occur when parsing JSON.
pub enum ErrorCode {
    /// Some IO error occurred while reading the input.
    Io(io::Error),

    /// EOF while parsing a list.
    EofWhileParsingList,

    /// EOF while parsing an object.
    EofWhileParsingObject,

    /// EOF while parsing a string.
    EofWhileParsingString,

    /// EOF while parsing a JSON value.
    EofWhileParsingValue,

    /// Expected this character to be a `':'`.
    ExpectedColon,

    /// Expected this character to be either a `','` or a `']'`.
    ExpectedListCommaOrEnd,

    /// Expected this character to be either a `','` or a `'}'`.
    ExpectedObjectCommaOrEnd,

    /// Expected to parse either a `true`, `false`, or a `null`.
    ExpectedSomeIdent,

    /// Expected this character to start a JSON value.
    ExpectedSomeValue,

    /// Invalid escape sequence in a string.
    InvalidEscape,

    /// Numeral rejected by the number policy.
    InvalidNumber,

    /// Number is not representable by the number policy, such as NaN or an
    /// infinity.
    NumberOutOfRange,

    /// String contents are not valid UTF-8. The contents are checked once
    /// the closing quote has been read, so the error excerpt starts after the
    /// string rather than at the offending byte.
    InvalidUnicodeCodePoint,

    /// Control character found while parsing a string.
    ControlCharacterWhileParsingString,

    /// Object key is not a string.
    KeyMustBeAString,

    /// Surrogate in hex escape without its matching half.
    LoneSurrogateInHexEscape,

    /// JSON has non-whitespace trailing characters after the value.
    TrailingCharacters,

    /// Unexpected end of hex escape.
    UnexpectedEndOfHexEscape,

    /// Encountered nesting of JSON maps and arrays more than 128 layers deep.
    RecursionLimitExceeded,

    /// The parse context refused the value.
    Rejected,
}

impl Debug for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorCode::Io(_) => f.write_str("Io"),
            ErrorCode::EofWhileParsingList => f.write_str("EofWhileParsingList"),
            ErrorCode::EofWhileParsingObject => f.write_str("EofWhileParsingObject"),
            ErrorCode::EofWhileParsingString => f.write_str("EofWhileParsingString"),
            ErrorCode::EofWhileParsingValue => f.write_str("EofWhileParsingValue"),
            ErrorCode::ExpectedColon => f.write_str("ExpectedColon"),
            ErrorCode::ExpectedListCommaOrEnd => f.write_str("ExpectedListCommaOrEnd"),
            ErrorCode::ExpectedObjectCommaOrEnd => f.write_str("ExpectedObjectCommaOrEnd"),
            ErrorCode::ExpectedSomeIdent => f.write_str("ExpectedSomeIdent"),
            ErrorCode::ExpectedSomeValue => f.write_str("ExpectedSomeValue"),
            ErrorCode::InvalidEscape => f.write_str("InvalidEscape"),
            ErrorCode::InvalidNumber => f.write_str("InvalidNumber"),
            ErrorCode::NumberOutOfRange => f.write_str("NumberOutOfRange"),
            ErrorCode::InvalidUnicodeCodePoint => f.write_str("InvalidUnicodeCodePoint"),
            ErrorCode::ControlCharacterWhileParsingString => {
                f.write_str("ControlCharacterWhileParsingString")
            }
            ErrorCode::KeyMustBeAString => f.write_str("KeyMustBeAString"),
            ErrorCode::LoneSurrogateInHexEscape => f.write_str("LoneSurrogateInHexEscape"),
            ErrorCode::TrailingCharacters => f.write_str("TrailingCharacters"),
            ErrorCode::UnexpectedEndOfHexEscape => f.write_str("UnexpectedEndOfHexEscape"),
            ErrorCode::RecursionLimitExceeded => f.write_str("RecursionLimitExceeded"),
            ErrorCode::Rejected => f.write_str("Rejected"),
        }
    }
}

impl PartialEq for ErrorCode {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Error {
    /// An error that has not been tied to a place in the input yet.
    ///
    /// Parse functions return these; the outermost parse call fills in the
    /// line and excerpt from the cursor once the failure has unwound. Number
    /// policies outside this crate use this to report numerals they cannot
    /// represent.
    #[cold]
    pub fn new(code: ErrorCode) -> Self {
        Error::at(code, 0, String::new())
    }

    #[cold]
    pub(crate) fn at(code: ErrorCode, line: usize, near: String) -> Self {
        Error {
            err: Box::new(ErrorImpl { code, line, near }),
        }
    }

    #[cold]
    pub(crate) fn io(error: io::Error) -> Self {
        Error::new(ErrorCode::Io(error))
    }

    /// The error a parse context returns to refuse a value.
    #[cold]
    pub fn rejected() -> Self {
        Error::new(ErrorCode::Rejected)
    }

    pub(crate) fn has_position(&self) -> bool {
        self.err.line != 0
    }

    #[cold]
    pub(crate) fn fix_position<F>(self, f: F) -> Self
    where
        F: FnOnce(ErrorCode) -> Error,
    {
        if self.has_position() {
            self
        } else {
            match self.err.code {
                ErrorCode::Io(_) => self,
                _ => f(self.err.code),
            }
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorCode::Io(err) => Display::fmt(err, f),
            ErrorCode::EofWhileParsingList => f.write_str("EOF while parsing a list"),
            ErrorCode::EofWhileParsingObject => f.write_str("EOF while parsing an object"),
            ErrorCode::EofWhileParsingString => f.write_str("EOF while parsing a string"),
            ErrorCode::EofWhileParsingValue => f.write_str("EOF while parsing a value"),
            ErrorCode::ExpectedColon => f.write_str("expected `:`"),
            ErrorCode::ExpectedListCommaOrEnd => f.write_str("expected `,` or `]`"),
            ErrorCode::ExpectedObjectCommaOrEnd => f.write_str("expected `,` or `}`"),
            ErrorCode::ExpectedSomeIdent => f.write_str("expected ident"),
            ErrorCode::ExpectedSomeValue => f.write_str("expected value"),
            ErrorCode::InvalidEscape => f.write_str("invalid escape"),
            ErrorCode::InvalidNumber => f.write_str("invalid number"),
            ErrorCode::NumberOutOfRange => f.write_str("number out of range"),
            ErrorCode::InvalidUnicodeCodePoint => f.write_str("invalid unicode code point"),
            ErrorCode::ControlCharacterWhileParsingString => {
                f.write_str("control character (\\u0000-\\u001F) found while parsing a string")
            }
            ErrorCode::KeyMustBeAString => f.write_str("key must be a string"),
            ErrorCode::LoneSurrogateInHexEscape => f.write_str("lone surrogate in hex escape"),
            ErrorCode::TrailingCharacters => f.write_str("trailing characters"),
            ErrorCode::UnexpectedEndOfHexEscape => f.write_str("unexpected end of hex escape"),
            ErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
            ErrorCode::Rejected => f.write_str("value rejected by parse context"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.err.code {
            ErrorCode::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&*self.err, f)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.line == 0 {
            Display::fmt(&self.code, f)
        } else {
            write!(f, "syntax error at line {} near: {}", self.line, self.near)
        }
    }
}

// Remove two layers of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Error({:?}, line: {}, near: {:?})",
            self.err.code.to_string(),
            self.err.line,
            self.err.near
        )
    }
}
