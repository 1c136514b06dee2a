// Reading one of two equal integers as a float keeps them equal, and
// comparing them does not widen either.

use picojson::Value;

#[test]
fn test() {
    let a: Value = picojson::from_str("5").unwrap();
    let b: Value = picojson::from_str("5").unwrap();
    assert_eq!(a, b);
    assert!(a.is::<i64>());
    assert!(b.is::<i64>());

    assert_eq!(*a.get::<f64>(), 5.0);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert!(b.is::<i64>());

    let c: Value = picojson::from_str("5.0").unwrap();
    assert_eq!(b, c);
    assert!(b.is::<i64>());
}
