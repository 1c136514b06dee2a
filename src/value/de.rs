use super::Value;
use crate::map::Map;
use crate::number::{Integer, NumberPolicy};
use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;

impl<'de, P> Deserialize<'de> for Value<P>
where
    P: NumberPolicy,
{
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Value<P>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor<P>(PhantomData<P>);

        impl<'de, P> Visitor<'de> for ValueVisitor<P>
        where
            P: NumberPolicy,
        {
            type Value = Value<P>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            #[inline]
            fn visit_bool<E>(self, value: bool) -> Result<Value<P>, E> {
                Ok(Value::Bool(value))
            }

            #[inline]
            fn visit_i64<E>(self, value: i64) -> Result<Value<P>, E> {
                Ok(Value::Integer(Integer::new(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value<P>, E>
            where
                E: de::Error,
            {
                if let Ok(i) = i64::try_from(value) {
                    return Ok(Value::Integer(Integer::new(i)));
                }
                let mut buffer = itoa::Buffer::new();
                P::parse_numeral(buffer.format(value))
                    .map(Value::Number)
                    .map_err(de::Error::custom)
            }

            #[inline]
            fn visit_f64<E>(self, value: f64) -> Result<Value<P>, E> {
                Ok(P::from_f64(value).map_or(Value::Null, Value::Number))
            }

            #[inline]
            fn visit_str<E>(self, value: &str) -> Result<Value<P>, E>
            where
                E: de::Error,
            {
                self.visit_string(String::from(value))
            }

            #[inline]
            fn visit_string<E>(self, value: String) -> Result<Value<P>, E> {
                Ok(Value::String(value))
            }

            #[inline]
            fn visit_none<E>(self) -> Result<Value<P>, E> {
                Ok(Value::Null)
            }

            #[inline]
            fn visit_some<D>(self, deserializer: D) -> Result<Value<P>, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            #[inline]
            fn visit_unit<E>(self) -> Result<Value<P>, E> {
                Ok(Value::Null)
            }

            #[inline]
            fn visit_seq<V>(self, mut visitor: V) -> Result<Value<P>, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let mut vec = Vec::new();

                while let Some(elem) = tri!(visitor.next_element()) {
                    vec.push(elem);
                }

                Ok(Value::Array(vec))
            }

            fn visit_map<V>(self, mut visitor: V) -> Result<Value<P>, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut values = Map::new();

                while let Some((key, value)) = tri!(visitor.next_entry()) {
                    values.insert(key, value);
                }

                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor(PhantomData))
    }
}
