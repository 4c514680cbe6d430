use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Serialize, Serializer};
use serde_json::Number;

use crate::error::ResxError;

pub const BYTE_ARRAY_MIME_TYPE: &str = "application/x-microsoft.net.object.bytearray.base64";
pub const BINARY_MIME_TYPE: &str = "application/x-microsoft.net.object.binary.base64";
pub const SOAP_MIME_TYPE: &str = "application/x-microsoft.net.object.soap.base64";

/// The resolved value of a resource entry.
///
/// JSON rules:
/// - `String` is a JSON string
/// - `Number` is a JSON number. Integral values print without a fraction. Decimals that are not
///   integral go through the nearest double, so `1.10` prints as `1.1`
/// - dates, time spans and GUIDs are strings: `/Date(1577836800000)/`, `1.02:03:04` and
///   `6f9619ff-8b86-d011-b42d-00c04fc964ff`
/// - `Boolean` is `true` or `false`
/// - `Binary` is an array of byte values, eg. `[0,1,2]`
/// - `Null` is `null`
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceValue {
    String(String),
    Number(Number),
    Boolean(bool),
    Binary(Vec<u8>),
    Null,
}

impl Serialize for ResourceValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Number(n) => n.serialize(serializer),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Binary(bytes) => serializer.collect_seq(bytes),
            Self::Null => serializer.serialize_unit(),
        }
    }
}

impl From<&str> for ResourceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ResourceValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ResourceValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<u32> for ResourceValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for ResourceValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for ResourceValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Vec<u8>> for ResourceValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(value)
    }
}

/// Decodes the base64 payload of a `<data>` element carrying a `mimetype` attribute.
///
/// Serialised objects are kept as their raw serialised bytes.
pub(crate) fn decode_mime_value(
    key: &str,
    mime_type: &str,
    text: &str,
) -> Result<ResourceValue, ResxError> {
    match mime_type {
        BYTE_ARRAY_MIME_TYPE | BINARY_MIME_TYPE | SOAP_MIME_TYPE => {
            Ok(ResourceValue::Binary(decode_base64(key, text)?))
        }
        other => Err(ResxError::UnsupportedType {
            key: key.to_string(),
            type_name: other.to_string(),
        }),
    }
}

/// ResX wraps long base64 payloads over several indented lines.
pub(crate) fn decode_base64(key: &str, text: &str) -> Result<Vec<u8>, ResxError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    STANDARD
        .decode(compact)
        .map_err(|e| ResxError::invalid_value(key, "base64", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialisation_per_variant() {
        let cases = [
            (ResourceValue::from("World"), r#""World""#),
            (ResourceValue::from(5u32), "5"),
            (ResourceValue::from(-12i64), "-12"),
            (ResourceValue::from(true), "true"),
            (ResourceValue::from(vec![0u8, 1, 255]), "[0,1,255]"),
            (ResourceValue::Null, "null"),
        ];

        for (value, expected) in cases {
            assert_eq!(serde_json::to_string(&value).unwrap(), expected);
        }
    }

    #[test]
    fn decodes_wrapped_base64() {
        let text = "\n        AAEC\n        AwQ=\n    ";
        assert_eq!(decode_base64("blob", text).unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn rejects_unknown_mime_types() {
        let err = decode_mime_value("blob", "text/plain", "AAEC").unwrap_err();
        assert!(matches!(err, ResxError::UnsupportedType { .. }));

        let err = decode_mime_value("blob", BYTE_ARRAY_MIME_TYPE, "not base64!").unwrap_err();
        assert!(matches!(err, ResxError::InvalidValue { kind: "base64", .. }));
    }
}
