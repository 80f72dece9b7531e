//! Serde helpers for numeric fields that providers send as strings.
//!
//! JSON-RPC uses `0x`-prefixed hex quantities while the block-explorer API
//! uses decimal strings. Both are accepted everywhere, as are bare numbers.

use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use serde_json::Value;

/// Parse U256 from hex string (with 0x prefix), decimal string or number
pub fn parse_u256(value: &Value) -> Option<U256> {
    if let Some(s) = value.as_str() {
        let s = s.trim();
        if let Some(hex_str) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            if hex_str.is_empty() {
                return Some(U256::zero());
            }
            return U256::from_str_radix(hex_str, 16).ok();
        }
        if s.is_empty() {
            return None;
        }
        return U256::from_dec_str(s).ok();
    }
    value.as_u64().map(U256::from)
}

pub fn parse_u64(value: &Value) -> Option<u64> {
    parse_u256(value).filter(|v| v.bits() <= 64).map(|v| v.as_u64())
}

pub fn u256<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_u256(&value).ok_or_else(|| D::Error::custom(format!("invalid quantity: {}", value)))
}

pub fn opt_u256<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => parse_u256(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid quantity: {}", value))),
    }
}

pub fn u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_u64(&value).ok_or_else(|| D::Error::custom(format!("invalid quantity: {}", value)))
}

pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => parse_u64(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid quantity: {}", value))),
    }
}

// U256 is exposed as a hex string on our own JSON API
pub fn serialize_u256<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("0x{:x}", value))
}

pub fn serialize_opt_u256<S>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serialize_u256(v, serializer),
        None => serializer.serialize_none(),
    }
}
