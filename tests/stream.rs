use picojson::{DefaultNumber, ErrorCode, Parser};

// Rustfmt issue https://github.com/rust-lang-nursery/rustfmt/issues/2740
#[rustfmt::skip]
macro_rules! test_stream {
    ($data:expr, |$stream:ident| $test:block) => {
        {
            let parser = Parser::from_str($data);
            let mut $stream = parser.into_iter::<DefaultNumber>();
            assert_eq!($stream.byte_offset(), 0);
            $test
        }
        {
            let parser = Parser::from_slice($data.as_bytes());
            let mut $stream = parser.into_iter::<DefaultNumber>();
            assert_eq!($stream.byte_offset(), 0);
            $test
        }
        {
            let mut bytes = $data.as_bytes();
            let parser = Parser::from_reader(&mut bytes);
            let mut $stream = parser.into_iter::<DefaultNumber>();
            assert_eq!($stream.byte_offset(), 0);
            $test
        }
        {
            let parser = Parser::from_iter($data.bytes());
            let mut $stream = parser.into_iter::<DefaultNumber>();
            assert_eq!($stream.byte_offset(), 0);
            $test
        }
    };
}

#[test]
fn test_json_stream_newlines() {
    let data = "{\"x\":39} {\"x\":40}{\"x\":41}\n{\"x\":42}";

    test_stream!(data, |stream| {
        assert_eq!(stream.next().unwrap().unwrap()["x"], 39);
        assert_eq!(stream.byte_offset(), 8);

        assert_eq!(stream.next().unwrap().unwrap()["x"], 40);
        assert_eq!(stream.byte_offset(), 17);

        assert_eq!(stream.next().unwrap().unwrap()["x"], 41);
        assert_eq!(stream.byte_offset(), 25);

        assert_eq!(stream.next().unwrap().unwrap()["x"], 42);
        assert_eq!(stream.byte_offset(), 34);

        assert!(stream.next().is_none());
        assert_eq!(stream.byte_offset(), 34);
    });
}

#[test]
fn test_json_stream_trailing_whitespaces() {
    let data = "{\"x\":42} \t\n";

    test_stream!(data, |stream| {
        assert_eq!(stream.next().unwrap().unwrap()["x"], 42);
        assert_eq!(stream.byte_offset(), 8);

        assert!(stream.next().is_none());
        assert_eq!(stream.byte_offset(), 11);
    });
}

#[test]
fn test_json_stream_truncated() {
    let data = "{\"x\":40}\n{\"x\":";

    test_stream!(data, |stream| {
        assert_eq!(stream.next().unwrap().unwrap()["x"], 40);
        assert_eq!(stream.byte_offset(), 8);

        assert!(stream.next().unwrap().unwrap_err().is_eof());
        assert_eq!(stream.byte_offset(), 9);
    });
}

#[test]
fn test_json_stream_truncated_string() {
    let data = "[\"abc";

    test_stream!(data, |stream| {
        let err = stream.next().unwrap().unwrap_err();
        assert_eq!(*err.code(), ErrorCode::EofWhileParsingString);
        assert_eq!(stream.byte_offset(), 0);
    });
}

#[test]
fn test_json_stream_truncated_decimal() {
    let data = "{\"x\":4.";

    test_stream!(data, |stream| {
        let err = stream.next().unwrap().unwrap_err();
        assert_eq!(*err.code(), ErrorCode::EofWhileParsingObject);
        assert_eq!(stream.byte_offset(), 0);
    });
}

#[test]
fn test_json_stream_empty() {
    let data = "";

    test_stream!(data, |stream| {
        assert!(stream.next().is_none());
        assert_eq!(stream.byte_offset(), 0);
    });
}

#[test]
fn test_json_stream_primitive() {
    let data = "{} true{}1[]\nfalse\"hey\"2 ";

    test_stream!(data, |stream| {
        assert_eq!(stream.next().unwrap().unwrap().to_json(false), "{}");
        assert_eq!(stream.byte_offset(), 2);

        assert_eq!(stream.next().unwrap().unwrap(), true);
        assert_eq!(stream.byte_offset(), 7);

        assert_eq!(stream.next().unwrap().unwrap().to_json(false), "{}");
        assert_eq!(stream.byte_offset(), 9);

        assert_eq!(stream.next().unwrap().unwrap(), 1);
        assert_eq!(stream.byte_offset(), 10);

        assert_eq!(stream.next().unwrap().unwrap().to_json(false), "[]");
        assert_eq!(stream.byte_offset(), 12);

        assert_eq!(stream.next().unwrap().unwrap(), false);
        assert_eq!(stream.byte_offset(), 18);

        assert_eq!(stream.next().unwrap().unwrap(), "hey");
        assert_eq!(stream.byte_offset(), 23);

        assert_eq!(stream.next().unwrap().unwrap(), 2);
        assert_eq!(stream.byte_offset(), 24);

        assert!(stream.next().is_none());
        assert_eq!(stream.byte_offset(), 25);
    });
}

#[test]
fn test_json_stream_adjacent_literals() {
    // Values need no separator when one cannot run into the next.
    let data = "truefalse";

    test_stream!(data, |stream| {
        assert_eq!(stream.next().unwrap().unwrap(), true);
        assert_eq!(stream.next().unwrap().unwrap(), false);
        assert!(stream.next().is_none());
    });
}

#[test]
fn test_error() {
    let data = "true wrong false";

    test_stream!(data, |stream| {
        assert_eq!(stream.next().unwrap().unwrap(), true);
        let err = stream.next().unwrap().unwrap_err();
        assert_eq!(err.to_string(), "syntax error at line 1 near: wrong false");
        assert_eq!(stream.byte_offset(), 5);
        assert!(stream.next().is_none());
    });
}

#[test]
fn test_error_line() {
    let data = "1\n2\n[3,\n4 5]\n6";

    test_stream!(data, |stream| {
        assert_eq!(stream.next().unwrap().unwrap(), 1);
        assert_eq!(stream.next().unwrap().unwrap(), 2);
        let err = stream.next().unwrap().unwrap_err();
        assert_eq!(*err.code(), ErrorCode::ExpectedListCommaOrEnd);
        assert_eq!(err.line(), 4);
        assert_eq!(err.near(), "5]");
    });
}
