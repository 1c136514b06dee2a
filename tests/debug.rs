use picojson::{DefaultNumber, Integer, Value};

fn parse(json: &str) -> Value {
    picojson::from_str(json).unwrap()
}

#[test]
fn integer() {
    assert_eq!(format!("{:?}", Integer::<DefaultNumber>::new(1)), "1");
    assert_eq!(format!("{:?}", Integer::<DefaultNumber>::new(-1)), "-1");

    let widened = Integer::<DefaultNumber>::new(2);
    widened.widen();
    assert_eq!(format!("{:?}", widened), "2.0 (widened)");
}

#[test]
fn value_null() {
    assert_eq!(format!("{:?}", parse("null")), "Null");
}

#[test]
fn value_bool() {
    assert_eq!(format!("{:?}", parse("true")), "Bool(true)");
    assert_eq!(format!("{:?}", parse("false")), "Bool(false)");
}

#[test]
fn value_number() {
    assert_eq!(format!("{:?}", parse("1")), "Integer(1)");
    assert_eq!(format!("{:?}", parse("-1")), "Integer(-1)");
    assert_eq!(format!("{:?}", parse("1.0")), "Number(1.0)");
    assert_eq!(format!("{:?}", parse("1e100")), "Number(1e100)");

    let v = parse("7");
    assert_eq!(*v.get::<f64>(), 7.0);
    assert_eq!(format!("{:?}", v), "Integer(7.0 (widened))");
}

#[test]
fn value_string() {
    assert_eq!(format!("{:?}", parse("\"s\"")), "String(\"s\")");
}

#[test]
fn value_array() {
    assert_eq!(format!("{:?}", parse("[]")), "Array []");
    assert_eq!(format!("{:?}", parse("[null]")), "Array [Null]");
}

#[test]
fn value_object() {
    assert_eq!(format!("{:?}", parse("{}")), "Object {}");
    assert_eq!(format!("{:?}", parse("{\"a\":true}")), "Object {\"a\": Bool(true)}");
}

#[test]
fn error() {
    let err = picojson::from_str::<DefaultNumber>("[1,\n tru]").unwrap_err();
    let expected = "Error(\"expected ident\", line: 2, near: \"]\")";
    assert_eq!(format!("{:?}", err), expected);

    let err = picojson::Error::rejected();
    let expected = "Error(\"value rejected by parse context\", line: 0, near: \"\")";
    assert_eq!(format!("{:?}", err), expected);
    assert_eq!(err.to_string(), "value rejected by parse context");
}
