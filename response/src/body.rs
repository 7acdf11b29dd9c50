use crate::EncodingError;
use serde::ser::{self, Impossible, Serialize, Serializer};
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::fmt::Display;
use thiserror::Error;

/// Resolves the JSON text that goes into an envelope body.
pub(crate) fn resolve<T>(body: &T) -> Result<String, EncodingError>
where
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string(body)?;
    if text == "null" {
        // non-finite floats encode as `null` too, but are not a null body
        return Ok(if is_null(body) { String::new() } else { text });
    }
    if text.starts_with('{') {
        let fields: HashMap<String, &RawValue> = serde_json::from_str(&text)?;
        if let Some(stack) = fields.get("stack").filter(|stack| is_truthy(stack.get())) {
            tracing::trace!("encoding `stack` field in place of the response body");
            return Ok(stack.get().to_string());
        }
    }
    Ok(text)
}

// JavaScript truthiness of a compact JSON text.
fn is_truthy(json: &str) -> bool {
    match json.as_bytes().first() {
        Some(b'n') | Some(b'f') => false,
        Some(b't') | Some(b'[') | Some(b'{') => true,
        Some(b'"') => json != "\"\"",
        Some(_) => json.parse::<f64>().map_or(true, |n| n != 0.0),
        None => false,
    }
}

fn is_null<T>(value: &T) -> bool
where
    T: Serialize + ?Sized,
{
    value.serialize(NullCheck).unwrap_or(false)
}

#[derive(Debug, Error)]
#[error("{0}")]
struct NotScalar(String);

impl ser::Error for NotScalar {
    fn custom<T: Display>(msg: T) -> Self {
        NotScalar(msg.to_string())
    }
}

/// Tells whether a value serializes as unit or `None`, looking through
/// `Some` and newtype wrappers.
struct NullCheck;

impl Serializer for NullCheck {
    type Ok = bool;
    type Error = NotScalar;
    type SerializeSeq = Impossible<bool, NotScalar>;
    type SerializeTuple = Impossible<bool, NotScalar>;
    type SerializeTupleStruct = Impossible<bool, NotScalar>;
    type SerializeTupleVariant = Impossible<bool, NotScalar>;
    type SerializeMap = Impossible<bool, NotScalar>;
    type SerializeStruct = Impossible<bool, NotScalar>;
    type SerializeStructVariant = Impossible<bool, NotScalar>;

    fn serialize_bool(self, _: bool) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_i8(self, _: i8) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_i16(self, _: i16) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_i32(self, _: i32) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_i64(self, _: i64) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_i128(self, _: i128) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_u8(self, _: u8) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_u16(self, _: u16) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_u32(self, _: u32) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_u64(self, _: u64) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_u128(self, _: u128) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_f32(self, _: f32) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_f64(self, _: f64) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_char(self, _: char) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_str(self, _: &str) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_bytes(self, _: &[u8]) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_none(self) -> Result<bool, NotScalar> {
        Ok(true)
    }

    fn serialize_some<T>(self, value: &T) -> Result<bool, NotScalar>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<bool, NotScalar> {
        Ok(true)
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<bool, NotScalar> {
        Ok(true)
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
    ) -> Result<bool, NotScalar> {
        Ok(false)
    }

    fn serialize_newtype_struct<T>(self, _: &'static str, value: &T) -> Result<bool, NotScalar>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<bool, NotScalar>
    where
        T: Serialize + ?Sized,
    {
        Ok(false)
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq, NotScalar> {
        Err(NotScalar("sequence".to_string()))
    }

    fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple, NotScalar> {
        Err(NotScalar("tuple".to_string()))
    }

    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleStruct, NotScalar> {
        Err(NotScalar("tuple struct".to_string()))
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant, NotScalar> {
        Err(NotScalar("tuple variant".to_string()))
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap, NotScalar> {
        Err(NotScalar("map".to_string()))
    }

    fn serialize_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStruct, NotScalar> {
        Err(NotScalar("struct".to_string()))
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStructVariant, NotScalar> {
        Err(NotScalar("struct variant".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::{json, Value};

    #[derive(Serialize)]
    struct Nothing;

    #[derive(Serialize)]
    struct Wrapped(Option<f64>);

    #[test]
    fn null_values() {
        assert!(is_null(&()));
        assert!(is_null(&None::<u8>));
        assert!(is_null(&Some(())));
        assert!(is_null(&Nothing));
        assert!(is_null(&Value::Null));
        assert!(is_null(&Wrapped(None)));
    }

    #[test]
    fn non_finite_floats_are_not_null() {
        assert!(!is_null(&f64::NAN));
        assert!(!is_null(&f32::INFINITY));
        assert!(!is_null(&Some(f64::NEG_INFINITY)));
        assert!(!is_null(&Wrapped(Some(f64::NAN))));
        assert!(!is_null(&json!({})));
    }

    #[test]
    fn truthiness() {
        for falsy in ["null", "false", "0", "-0", "0.0", "0e10", "\"\""] {
            assert!(!is_truthy(falsy), "{} should be falsy", falsy);
        }
        for truthy in ["true", "1", "-1.5", "\" \"", "\"0\"", "[]", "{}", "340282366920938463463374607431768211455"] {
            assert!(is_truthy(truthy), "{} should be truthy", truthy);
        }
    }

    #[test]
    fn stack_of_huge_number_keeps_digits() {
        let body = json!({ "stack": "x" });
        assert_eq!(resolve(&body).unwrap(), r#""x""#);

        let mut fields = HashMap::new();
        fields.insert("stack", u128::MAX);
        assert_eq!(resolve(&fields).unwrap(), "340282366920938463463374607431768211455");
    }
}
