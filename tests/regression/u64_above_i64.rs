// Integral numerals too large for an i64 are numbers, not integers.

use picojson::{DefaultNumber, Value};

#[test]
fn test() {
    let v: Value = picojson::from_str("18446744073709551615").unwrap();
    assert!(!v.is::<i64>());
    assert_eq!(*v.get::<f64>(), 18446744073709551615.0);

    let v: Value = picojson::from_str("9223372036854775808").unwrap();
    assert!(!v.is::<i64>());
    let back: Value = v.to_json(false).parse().unwrap();
    assert_eq!(back, v);

    let v = picojson::from_str::<DefaultNumber>("9223372036854775807").unwrap();
    assert!(v.is::<i64>());
}
