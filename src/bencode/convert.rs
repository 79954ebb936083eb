use std::collections::BTreeMap;

use serde_json::Value;

use super::bvalue::BValue;
use super::error::BencodeError;

/// Convert a dynamic JSON value into a `BValue` tree.
///
/// Integers, booleans (as 0/1), strings, arrays and objects all have a
/// defined mapping. Floats and nulls do not exist in bencode, so they are
/// rejected instead of being coerced into something lossy.
pub fn json_to_bvalue(value: &Value) -> Result<BValue, BencodeError> {
	match value {
		Value::Bool(b) => Ok(BValue::Integer(if *b { 1 } else { 0 })),
		Value::Number(n) => match n.as_i64() {
			Some(i) => Ok(BValue::Integer(i)),
			None => Err(BencodeError::Conversion(format!(
				"number {} has no bencode form (only signed 64-bit integers do)",
				n
			))),
		},
		Value::String(s) => Ok(BValue::ByteString(s.as_bytes().to_vec())),
		Value::Array(items) => {
			let mut list = Vec::with_capacity(items.len());
			for item in items {
				list.push(json_to_bvalue(item)?);
			}
			Ok(BValue::List(list))
		}
		Value::Object(map) => {
			let mut dict = BTreeMap::new();
			for (key, item) in map {
				dict.insert(key.as_bytes().to_vec(), json_to_bvalue(item)?);
			}
			Ok(BValue::Dict(dict))
		}
		Value::Null => Err(BencodeError::Conversion(
			"null has no bencode form".to_string(),
		)),
	}
}

impl TryFrom<&Value> for BValue {
	type Error = BencodeError;

	fn try_from(value: &Value) -> Result<Self, Self::Error> {
		json_to_bvalue(value)
	}
}
