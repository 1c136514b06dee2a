#![cfg(feature = "arbitrary_precision")]

use picojson::{ArbitraryPrecision, ErrorCode, Numeral, Value};

type Exact = Value<ArbitraryPrecision>;

fn parse(json: &str) -> Exact {
    picojson::from_str(json).unwrap()
}

#[test]
fn test_numerals_survive_round_trip() {
    let json = r#"[1.000, 1e400, -0.0, 123456789012345678901234567890, 2.5E-3]"#;
    let v = parse(json);
    assert_eq!(
        v.to_json(false),
        "[1.000,1e400,-0.0,123456789012345678901234567890,2.5E-3]",
    );
    assert_eq!(v[1].get::<Numeral>().as_str(), "1e400");
    assert_eq!(v[1].get::<Numeral>().as_f64(), None);
    assert_eq!(v[3].get::<Numeral>().as_i64(), None);
}

#[test]
fn test_negative_zero_keeps_its_sign() {
    let v = parse("[-0, 0, 1.0]");
    assert_eq!(v.to_json(false), "[-0,0,1.0]");
    assert!(!v[0].is::<i64>());
    assert_eq!(v[0].get::<Numeral>().as_str(), "-0");
    assert!(v[1].is::<i64>());
}

#[test]
fn test_integers_are_still_integers() {
    let v = parse("[42, -9223372036854775808]");
    assert!(v[0].is::<i64>());
    assert_eq!(*v[1].get::<i64>(), i64::MIN);

    assert_eq!(v[0].get::<Numeral>().as_str(), "42");
    assert!(!v[0].is::<i64>());
    assert_eq!(v.to_json(false), "[42,-9223372036854775808]");
}

#[test]
fn test_invalid_numerals_rejected() {
    for json in ["1.", "1e", "-", "1-2", "--1", "1.5.2", "01", "-007", "[1, 02]"] {
        let err = picojson::from_str::<ArbitraryPrecision>(json).unwrap_err();
        assert_eq!(*err.code(), ErrorCode::InvalidNumber, "{}", json);
    }
}

#[test]
fn test_truthiness() {
    assert!(!parse("0.000").evaluate_as_boolean());
    assert!(!parse("0e10").evaluate_as_boolean());
    assert!(!parse("-0.0E+3").evaluate_as_boolean());
    assert!(parse("0.001").evaluate_as_boolean());
    assert!(parse("1e-400").evaluate_as_boolean());
}

#[test]
fn test_from_f64() {
    let v: Exact = Value::from(0.1);
    assert_eq!(v.to_json(false), "0.1");
    let v: Exact = Value::from(3.0);
    assert_eq!(v.to_json(false), "3");
    assert!(Exact::from_f64(f64::NAN).is_err());
}

#[test]
fn test_equality_is_textual() {
    assert_ne!(parse("1.0"), parse("1.00"));
    assert_eq!(parse("2.50"), parse("2.50"));
    assert_eq!(parse("7"), parse("7"));
}

#[test]
fn test_numeral_from_str() {
    let n: Numeral = "-12.5e3".parse().unwrap();
    assert_eq!(n.to_string(), "-12.5e3");
    assert_eq!(n.as_f64(), Some(-12500.0));
    assert!("1.2.3".parse::<Numeral>().is_err());
}
