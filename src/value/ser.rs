use super::Value;
use crate::number::NumberPolicy;
use serde_core::ser::{Serialize, SerializeMap, Serializer};

impl<P> Serialize for Value<P>
where
    P: NumberPolicy,
{
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => P::serialize_number(n, serializer),
            Value::Integer(i) => serializer.serialize_i64(i.value()),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(v) => serializer.collect_seq(v),
            Value::Object(m) => {
                let mut map = tri!(serializer.serialize_map(Some(m.len())));
                for (k, v) in m {
                    tri!(map.serialize_entry(k, v));
                }
                map.end()
            }
        }
    }
}
