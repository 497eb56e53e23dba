//! Decoding of raw JSON values into the [`Value`] model.
//!
//! Address tokens become unresolved references, `ObjectType` tags become the
//! declared type of an object, and `SQTable` objects are wrapped in a
//! [`HashTableView`].

use super::value::{Object, Reference, Value};
use crate::utils::config::{
    ADDRESS_HEX_DIGITS, HASH_TABLE_TYPE, OBJECT_TYPE_FIELD, POINTER_PREFIX,
};
use crate::utils::error::ParseError;
use crate::view::hash_table::HashTableView;

/// Decode one raw JSON value
///
/// **Public** - used for both instruction arguments and object contents
///
/// # Arguments
/// * `raw` - Any JSON value read from the trace
///
/// # Returns
/// The decoded value, with every address token left unresolved
///
/// # Errors
/// * `ParseError::InvalidAddress` - A string carries the pointer prefix but
///   not exactly 8 hex digits after it
///
/// # Notes
/// Floats are narrowed to `f32`, the width the VM stores them with. Integers
/// outside the `i64` range are narrowed the same way. A genuine string equal
/// to an address token cannot be represented; this follows the trace format.
pub fn decode(raw: &serde_json::Value) -> Result<Value, ParseError> {
    match raw {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => Ok(decode_number(n)),
        serde_json::Value::String(s) => decode_string(s),
        serde_json::Value::Array(items) => items
            .iter()
            .map(decode)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_json::Value::Object(map) => decode_object(map),
    }
}

/// Parse an address token
///
/// **Public** - also used for the `address` field of object records
///
/// # Returns
/// * `Ok(None)` - The string is not an address token
/// * `Ok(Some(address))` - A well-formed token
///
/// # Errors
/// * `ParseError::InvalidAddress` - Pointer prefix with a malformed suffix
pub fn parse_address(token: &str) -> Result<Option<u32>, ParseError> {
    let Some(digits) = token.strip_prefix(POINTER_PREFIX) else {
        return Ok(None);
    };

    if digits.len() != ADDRESS_HEX_DIGITS || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidAddress(token.to_string()));
    }

    u32::from_str_radix(digits, 16)
        .map(Some)
        .map_err(|_| ParseError::InvalidAddress(token.to_string()))
}

/// **Private** - integer when it fits, narrowed float otherwise
fn decode_number(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else {
        Value::Float(n.as_f64().unwrap_or(f64::NAN) as f32)
    }
}

/// **Private** - address tokens become references
fn decode_string(s: &str) -> Result<Value, ParseError> {
    Ok(match parse_address(s)? {
        Some(address) => Value::Reference(Reference::new(address)),
        None => Value::Str(s.to_string()),
    })
}

/// **Private** - generic object, specialized when tagged as a hash table
fn decode_object(map: &serde_json::Map<String, serde_json::Value>) -> Result<Value, ParseError> {
    let declared_type = map.get(OBJECT_TYPE_FIELD).map(|tag| match tag {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    });

    let mut object = Object::new(declared_type);
    for (key, value) in map {
        if key == OBJECT_TYPE_FIELD {
            continue;
        }
        object.insert(decode_string(key)?, decode(value)?);
    }

    if object.declared_type() == Some(HASH_TABLE_TYPE) {
        Ok(Value::HashTable(HashTableView::new(object)))
    } else {
        Ok(Value::Object(object))
    }
}
