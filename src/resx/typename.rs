use std::path::Path;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde_json::Number;
use strum::{EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{
    error::ResxError,
    resx::{
        fileref::FileRef,
        temporal::{TimeSpan, date_literal, parse_date_time},
        value::{ResourceValue, decode_base64},
    },
};

// Doubles with an integral value up to 2^53 print without a fraction, as 5 rather than 5.0
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// The `type` attribute values that can be resolved without loading any assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum KnownType {
    #[strum(serialize = "System.String")]
    String,
    #[strum(serialize = "System.Char")]
    Char,
    #[strum(serialize = "System.Boolean")]
    Boolean,
    #[strum(serialize = "System.SByte")]
    SByte,
    #[strum(serialize = "System.Byte")]
    Byte,
    #[strum(serialize = "System.Int16")]
    Int16,
    #[strum(serialize = "System.UInt16")]
    UInt16,
    #[strum(serialize = "System.Int32")]
    Int32,
    #[strum(serialize = "System.UInt32")]
    UInt32,
    #[strum(serialize = "System.Int64")]
    Int64,
    #[strum(serialize = "System.UInt64")]
    UInt64,
    #[strum(serialize = "System.Single")]
    Single,
    #[strum(serialize = "System.Double")]
    Double,
    #[strum(serialize = "System.Decimal")]
    Decimal,
    #[strum(serialize = "System.DateTime")]
    DateTime,
    #[strum(serialize = "System.TimeSpan")]
    TimeSpan,
    #[strum(serialize = "System.Guid")]
    Guid,
    #[strum(serialize = "System.Byte[]")]
    ByteArray,
    #[strum(serialize = "System.Resources.ResXNullRef")]
    NullRef,
    #[strum(serialize = "System.Resources.ResXFileRef")]
    FileRef,
}

impl KnownType {
    /// Looks up an assembly qualified type name, eg. `System.Int32, mscorlib, Version=4.0.0.0`.
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        let name = type_name.split(',').next().unwrap_or_default().trim();

        name.parse().ok()
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Converts the `<value>` text of an entry of this type.
    ///
    /// File references are resolved relative to `base_dir`.
    pub(crate) fn convert(
        self,
        key: &str,
        text: &str,
        base_dir: &Path,
    ) -> Result<ResourceValue, ResxError> {
        let value = match self {
            Self::String => ResourceValue::String(text.to_string()),
            Self::Char => ResourceValue::String(parse_char(key, text)?.to_string()),
            Self::Boolean => ResourceValue::Boolean(parse_bool(key, text)?),
            Self::SByte => integer::<i8>(key, self, text)?,
            Self::Byte => integer::<u8>(key, self, text)?,
            Self::Int16 => integer::<i16>(key, self, text)?,
            Self::UInt16 => integer::<u16>(key, self, text)?,
            Self::Int32 => integer::<i32>(key, self, text)?,
            Self::UInt32 => integer::<u32>(key, self, text)?,
            Self::Int64 => integer::<i64>(key, self, text)?,
            Self::UInt64 => integer::<u64>(key, self, text)?,
            Self::Single => {
                // Validated as a single, emitted from the text so 0.1 stays 0.1
                text.trim()
                    .parse::<f32>()
                    .map_err(|e| ResxError::invalid_value(key, self.name(), e))?;
                float(key, self, text)?
            }
            Self::Double => float(key, self, text)?,
            Self::Decimal => decimal(key, text)?,
            Self::DateTime => match parse_date_time(text) {
                Some(millis) => ResourceValue::String(date_literal(millis)),
                None => return Err(not_a(key, self, text, "date")),
            },
            Self::TimeSpan => match TimeSpan::parse(text) {
                Some(span) => ResourceValue::String(span.to_string()),
                None => return Err(not_a(key, self, text, "time span")),
            },
            Self::Guid => ResourceValue::String(parse_guid(key, text)?.hyphenated().to_string()),
            Self::ByteArray => ResourceValue::Binary(decode_base64(key, text)?),
            Self::NullRef => ResourceValue::Null,
            Self::FileRef => FileRef::parse(text)
                .ok_or_else(|| ResxError::InvalidFileRef {
                    key: key.to_string(),
                    value: text.to_string(),
                })?
                .resolve(key, base_dir)?,
        };

        Ok(value)
    }
}

fn not_a(key: &str, ty: KnownType, text: &str, what: &str) -> ResxError {
    ResxError::invalid_value(key, ty.name(), format!("{text:?} is not a {what}"))
}

fn parse_char(key: &str, text: &str) -> Result<char, ResxError> {
    let text = if text.chars().count() > 1 {
        text.trim()
    } else {
        text
    };

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok('\0'),
        (Some(c), None) => Ok(c),
        _ => Err(ResxError::invalid_value(
            key,
            KnownType::Char.name(),
            format!("{text:?} is more than one character"),
        )),
    }
}

fn parse_bool(key: &str, text: &str) -> Result<bool, ResxError> {
    let text = text.trim();

    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ResxError::invalid_value(
            key,
            KnownType::Boolean.name(),
            format!("{text:?} is neither True nor False"),
        ))
    }
}

fn integer<T>(key: &str, ty: KnownType, text: &str) -> Result<ResourceValue, ResxError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError> + Into<Number>,
{
    text.trim()
        .parse::<T>()
        .map(|v| ResourceValue::Number(v.into()))
        .map_err(|e| ResxError::invalid_value(key, ty.name(), e))
}

fn float(key: &str, ty: KnownType, text: &str) -> Result<ResourceValue, ResxError> {
    let parsed = text
        .trim()
        .parse::<f64>()
        .map_err(|e| ResxError::invalid_value(key, ty.name(), e))?;

    if parsed.fract() == 0.0 && parsed.abs() <= MAX_EXACT_INTEGER {
        return Ok(ResourceValue::Number((parsed as i64).into()));
    }

    Number::from_f64(parsed)
        .map(ResourceValue::Number)
        .ok_or_else(|| ResxError::invalid_value(key, ty.name(), "value is not finite"))
}

/// Decimals are range checked at full precision. Integral values are emitted exactly, the
/// rest through the nearest double.
fn decimal(key: &str, text: &str) -> Result<ResourceValue, ResxError> {
    let name = KnownType::Decimal.name();

    let value = Decimal::from_str_exact(text.trim())
        .map_err(|e| ResxError::invalid_value(key, name, e))?
        .normalize();

    if value.scale() == 0 {
        if let Some(integer) = value.to_i64() {
            return Ok(ResourceValue::Number(integer.into()));
        }
        if let Some(integer) = value.to_u64() {
            return Ok(ResourceValue::Number(integer.into()));
        }
    }

    value
        .to_f64()
        .and_then(Number::from_f64)
        .map(ResourceValue::Number)
        .ok_or_else(|| ResxError::invalid_value(key, name, format!("{value} is out of range")))
}

fn parse_guid(key: &str, text: &str) -> Result<Uuid, ResxError> {
    let text = text.trim();

    // Uuid reads the plain, hyphenated and braced forms, not the parenthesised one
    let text = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text);

    Uuid::parse_str(text).map_err(|e| ResxError::invalid_value(key, KnownType::Guid.name(), e))
}
