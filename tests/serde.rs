#![allow(clippy::float_cmp)]

use picojson::{DefaultNumber, Map, Value};
use serde::de::value::{Error, MapDeserializer, SeqDeserializer};
use serde::de::{Deserialize, IntoDeserializer};
use serde::ser::{self, Impossible, Serialize};
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, PartialEq)]
enum Token {
    Unit,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
    Seq(Option<usize>),
    SeqEnd,
    Map(Option<usize>),
    MapEnd,
}

// Records what a value asks of its serializer.
#[derive(Default)]
struct Tokens(Vec<Token>);

fn tokens<T: Serialize>(value: &T) -> Vec<Token> {
    let mut out = Tokens::default();
    value.serialize(&mut out).unwrap();
    out.0
}

fn unsupported() -> Error {
    ser::Error::custom("unsupported")
}

impl<'a> ser::Serializer for &'a mut Tokens {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = Self;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<(), Error> {
        self.0.push(Token::Bool(v));
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<(), Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<(), Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<(), Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<(), Error> {
        self.0.push(Token::I64(v));
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<(), Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<(), Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<(), Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_u64(self, _v: u64) -> Result<(), Error> {
        Err(unsupported())
    }

    fn serialize_f32(self, v: f32) -> Result<(), Error> {
        self.serialize_f64(v.into())
    }

    fn serialize_f64(self, v: f64) -> Result<(), Error> {
        self.0.push(Token::F64(v));
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<(), Error> {
        self.serialize_str(v.encode_utf8(&mut [0; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<(), Error> {
        self.0.push(Token::Str(v.to_owned()));
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), Error> {
        Err(unsupported())
    }

    fn serialize_none(self) -> Result<(), Error> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), Error> {
        self.0.push(Token::Unit);
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), Error> {
        Err(unsupported())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), Error> {
        Err(unsupported())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        Err(unsupported())
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self, Error> {
        self.0.push(Token::Seq(len));
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Error> {
        Err(unsupported())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Error> {
        Err(unsupported())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Error> {
        Err(unsupported())
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self, Error> {
        self.0.push(Token::Map(len));
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self, Error> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Error> {
        Err(unsupported())
    }
}

impl<'a> ser::SerializeSeq for &'a mut Tokens {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), Error> {
        self.0.push(Token::SeqEnd);
        Ok(())
    }
}

impl<'a> ser::SerializeMap for &'a mut Tokens {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        key.serialize(&mut **self)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), Error> {
        self.0.push(Token::MapEnd);
        Ok(())
    }
}

impl<'a> ser::SerializeStruct for &'a mut Tokens {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.0.push(Token::Str(key.to_owned()));
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), Error> {
        self.0.push(Token::MapEnd);
        Ok(())
    }
}

fn parse(json: &str) -> Value {
    picojson::from_str(json).unwrap()
}

#[test]
fn test_serialize_scalars() {
    assert_eq!(tokens(&parse("null")), [Token::Unit]);
    assert_eq!(tokens(&parse("true")), [Token::Bool(true)]);
    assert_eq!(tokens(&parse("-7")), [Token::I64(-7)]);
    assert_eq!(tokens(&parse("2.5")), [Token::F64(2.5)]);
    assert_eq!(tokens(&parse("\"s\"")), [Token::Str("s".to_owned())]);
}

#[test]
fn test_serialize_widened_integer_stays_integer() {
    let v = parse("7");
    assert_eq!(*v.get::<f64>(), 7.0);
    assert_eq!(tokens(&v), [Token::I64(7)]);
}

#[test]
fn test_serialize_containers() {
    let v = parse(r#"{"a": [1, null], "b": {}}"#);
    assert_eq!(
        tokens(&v),
        [
            Token::Map(Some(2)),
            Token::Str("a".to_owned()),
            Token::Seq(Some(2)),
            Token::I64(1),
            Token::Unit,
            Token::SeqEnd,
            Token::Str("b".to_owned()),
            Token::Map(Some(0)),
            Token::MapEnd,
            Token::MapEnd,
        ],
    );

    let map = v.as_object().unwrap();
    assert_eq!(tokens(map), tokens(&v));
}

#[test]
fn test_serialize_derived_struct() {
    #[derive(Serialize)]
    struct Event {
        kind: &'static str,
        payload: Value,
    }

    let event = Event {
        kind: "point",
        payload: parse("[1.5]"),
    };
    assert_eq!(
        tokens(&event),
        [
            Token::Map(Some(2)),
            Token::Str("kind".to_owned()),
            Token::Str("point".to_owned()),
            Token::Str("payload".to_owned()),
            Token::Seq(Some(1)),
            Token::F64(1.5),
            Token::SeqEnd,
            Token::MapEnd,
        ],
    );
}

#[test]
fn test_deserialize_scalars() {
    let v = Value::<DefaultNumber>::deserialize(IntoDeserializer::<Error>::into_deserializer(()))
        .unwrap();
    assert!(v.is_null());

    let v = Value::<DefaultNumber>::deserialize(IntoDeserializer::<Error>::into_deserializer(
        true,
    ))
    .unwrap();
    assert_eq!(v, true);

    let v = Value::<DefaultNumber>::deserialize(IntoDeserializer::<Error>::into_deserializer(
        -3i64,
    ))
    .unwrap();
    assert!(v.is::<i64>());
    assert_eq!(v, -3);

    let v = Value::<DefaultNumber>::deserialize(IntoDeserializer::<Error>::into_deserializer(
        u64::MAX,
    ))
    .unwrap();
    assert!(!v.is::<i64>());
    assert_eq!(*v.get::<f64>(), u64::MAX as f64);

    let v = Value::<DefaultNumber>::deserialize(IntoDeserializer::<Error>::into_deserializer(
        0.25f64,
    ))
    .unwrap();
    assert_eq!(v, 0.25);

    let v = Value::<DefaultNumber>::deserialize(IntoDeserializer::<Error>::into_deserializer(
        f64::NAN,
    ))
    .unwrap();
    assert!(v.is_null());

    let v = Value::<DefaultNumber>::deserialize(IntoDeserializer::<Error>::into_deserializer(
        "text",
    ))
    .unwrap();
    assert_eq!(v, "text");
}

#[test]
fn test_deserialize_seq_and_map() {
    let seq = SeqDeserializer::<_, Error>::new(vec![1i64, 2, 3].into_iter());
    let v = Value::<DefaultNumber>::deserialize(seq).unwrap();
    assert_eq!(v.to_json(false), "[1,2,3]");

    let map = MapDeserializer::<_, Error>::new(vec![("a", "y"), ("b", "x")].into_iter());
    let v = Value::<DefaultNumber>::deserialize(map).unwrap();
    assert_eq!(v.to_json(false), r#"{"a":"y","b":"x"}"#);

    let map = MapDeserializer::<_, Error>::new(vec![("k", 1i64)].into_iter());
    let m = Map::<String, Value>::deserialize(map).unwrap();
    assert_eq!(m["k"], 1);
}

#[test]
fn test_deserialize_derived_struct() {
    #[derive(Deserialize)]
    struct Wrapper {
        payload: Value,
    }

    let map = MapDeserializer::<_, Error>::new(vec![("payload", 3i64)].into_iter());
    let w = Wrapper::deserialize(map).unwrap();
    assert!(w.payload.is::<i64>());
    assert_eq!(w.payload, 3);
}
