// Raw bytes that are not UTF-8 inside a string are rejected, in keys too.

use picojson::{DefaultNumber, ErrorCode};

#[test]
fn test() {
    let err = picojson::from_slice::<DefaultNumber>(b"[\"\xff\"]").unwrap_err();
    assert_eq!(*err.code(), ErrorCode::InvalidUnicodeCodePoint);
    // Reported once the whole string has been read.
    assert_eq!(err.near(), "]");

    let err = picojson::from_slice::<DefaultNumber>(b"{\"\xc3\": 1}").unwrap_err();
    assert_eq!(*err.code(), ErrorCode::InvalidUnicodeCodePoint);
    assert_eq!(err.near(), ": 1}");

    // Validation skips string contents.
    picojson::validate(b"[\"\xff\"]").unwrap();
}
