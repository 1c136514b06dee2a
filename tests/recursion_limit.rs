use picojson::{DefaultNumber, ErrorCode, Parser, Result, Value};

fn make_nested_array(depth: usize) -> String {
    let mut json = String::from("null");
    for _ in 0..depth {
        json = format!("[{}]", json);
    }
    json
}

fn make_nested_object(depth: usize) -> String {
    let mut json = String::from("null");
    for _ in 0..depth {
        json = format!(r#"{{"a":{}}}"#, json);
    }
    json
}

#[test]
fn test_default_recursion_limit_127() {
    // Default limit is 128, so depth 127 should work (limit - 1)
    let json = make_nested_array(127);
    let result: Result<Value> = picojson::from_str(&json);
    assert!(result.is_ok(), "Depth 127 should succeed with default limit 128");
}

#[test]
fn test_default_recursion_limit_exceeded() {
    let json = make_nested_array(128);
    let err = picojson::from_str::<DefaultNumber>(&json).unwrap_err();
    assert_eq!(*err.code(), ErrorCode::RecursionLimitExceeded);
    assert!(err.is_syntax());
    assert!(err.near().starts_with("null]]"), "{}", err);
}

#[test]
fn test_default_recursion_limit_objects() {
    picojson::from_str::<DefaultNumber>(&make_nested_object(127)).unwrap();

    let err = picojson::from_str::<DefaultNumber>(&make_nested_object(128)).unwrap_err();
    assert_eq!(*err.code(), ErrorCode::RecursionLimitExceeded);
}

#[test]
fn test_validate_uses_the_same_limit() {
    picojson::validate(make_nested_array(127).as_bytes()).unwrap();

    let err = picojson::validate(make_nested_array(128).as_bytes()).unwrap_err();
    assert_eq!(*err.code(), ErrorCode::RecursionLimitExceeded);
}

#[test]
fn test_set_recursion_limit_higher() {
    let json = make_nested_array(200);
    let mut parser = Parser::from_str(&json);
    parser.set_recursion_limit(255);
    let result = parser.parse::<DefaultNumber>();
    assert!(result.is_ok(), "Depth 200 should succeed with limit 255");
}

#[test]
fn test_set_recursion_limit_exact() {
    let json = make_nested_array(49);
    let mut parser = Parser::from_str(&json);
    parser.set_recursion_limit(50);
    assert!(parser.parse::<DefaultNumber>().is_ok());

    let json = make_nested_array(50);
    let mut parser = Parser::from_str(&json);
    parser.set_recursion_limit(50);
    assert!(parser.parse::<DefaultNumber>().is_err());
}

#[test]
fn test_set_recursion_limit_chains() {
    let mut parser = Parser::from_str(r#"{"a":{"b":{"c":null}}}"#);
    parser.set_recursion_limit(100).set_recursion_limit(4);
    assert!(parser.parse::<DefaultNumber>().is_ok());
}

#[test]
fn test_set_recursion_limit_zero_and_one() {
    let mut parser = Parser::from_str("null");
    parser.set_recursion_limit(1);
    assert!(parser.parse::<DefaultNumber>().is_ok());

    let mut parser = Parser::from_str("[]");
    parser.set_recursion_limit(1);
    assert!(parser.parse::<DefaultNumber>().is_err());

    let mut parser = Parser::from_str("[]");
    parser.set_recursion_limit(0);
    assert!(parser.parse::<DefaultNumber>().is_err());
}

#[test]
fn test_depth_is_restored_between_values() {
    let json = format!("{} {}", make_nested_array(127), make_nested_array(127));
    let mut parser = Parser::from_str(&json);
    parser.parse::<DefaultNumber>().unwrap();
    parser.parse::<DefaultNumber>().unwrap();
    parser.end().unwrap();
}

#[test]
fn test_large_flat_structure_not_affected() {
    let mut json = String::from("[");
    for i in 0..10000 {
        if i > 0 {
            json.push(',');
        }
        json.push_str(&i.to_string());
    }
    json.push(']');

    let mut parser = Parser::from_str(&json);
    parser.set_recursion_limit(2);
    let v = parser.parse::<DefaultNumber>().unwrap();
    assert_eq!(v.as_array().unwrap().len(), 10000);
}

#[cfg(feature = "unbounded_depth")]
#[test]
fn test_disable_recursion_limit() {
    let json = make_nested_array(500);
    let mut parser = Parser::from_str(&json);
    parser.disable_recursion_limit();
    let v = parser.parse::<DefaultNumber>().unwrap();
    assert!(v.is::<picojson::Array>());
}
