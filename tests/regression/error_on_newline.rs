// A newline that causes an error is reported on the line it ends, and the
// excerpt is then empty.

use picojson::{DefaultNumber, ErrorCode};

#[test]
fn test() {
    let err = picojson::from_str::<DefaultNumber>("[1,\n2,\n\"a\nb\"]").unwrap_err();
    assert_eq!(*err.code(), ErrorCode::ControlCharacterWhileParsingString);
    assert_eq!(err.line(), 3);
    assert_eq!(err.near(), "");
    assert_eq!(err.to_string(), "syntax error at line 3 near: ");
}
