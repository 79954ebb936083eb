
use serde_json::{Value, json};
use hex;
use super::BValue;
use super::error::BencodeError;

/// Depth allowed for the JSON conversion when the caller does not pick one.
pub const DEFAULT_JSON_DEPTH: usize = 64;

/// Encode a `BValue` into its canonical bencoded `Vec<u8>`.
///
/// Total over valid values; there is no failure path. Dictionary entries come
/// out in byte-ascending key order on every call, whatever order they were
/// inserted in, so equal content always encodes to identical bytes.
pub fn encode_bvalue(value: &BValue) -> Vec<u8> {
	let mut out: Vec<u8> = Vec::new();

	match value {
		BValue::Integer(i) => {
			// i64's Display is already canonical: no leading zeros, no -0
			out.extend_from_slice(b"i");
			out.extend_from_slice(i.to_string().as_bytes());
			out.extend_from_slice(b"e");
		}
		BValue::ByteString(bytes) => {
			out.extend_from_slice(bytes.len().to_string().as_bytes());
			out.push(b':');
			out.extend_from_slice(bytes);
		}
		BValue::List(items) => {
			out.push(b'l');
			for item in items {
				let encoded = encode_bvalue(item);
				out.extend_from_slice(&encoded);
			}
			out.push(b'e');
		}
		BValue::Dict(dict) => {
			out.push(b'd');
			// the map iterates in key order already
			for (key, val) in dict {
				out.extend_from_slice(key.len().to_string().as_bytes());
				out.push(b':');
				out.extend_from_slice(key);
				let encoded_val = encode_bvalue(val);
				out.extend_from_slice(&encoded_val);
			}
			out.push(b'e');
		}
	}
	out
}

/// Convert a `BValue` into JSON (using Serde JSON `Value`).
///
/// - `Integer(i)` => JSON number
/// - `ByteString(bytes)` => Attempt UTF-8; if invalid, store hex in `"_bytes_hex"`.
/// - `List(...)` => JSON array
/// - `Dict(...)` => JSON object
///
/// This is an inspection format, not the wire format: non-UTF-8 data does not
/// survive a trip through it unchanged.
pub fn bvalue_to_json(bv: &BValue) -> Value {
	match bv {
        BValue::Integer(i) => json!(i),

        BValue::ByteString(bytes) => {
            // Attempt to interpret as UTF-8
            match std::str::from_utf8(bytes) {
                Ok(utf8_str) => Value::String(utf8_str.to_string()),
                Err(_) => {
                    // Otherwise store as hex
                    json!({ "_bytes_hex": hex::encode(bytes) })
                }
            }
        }
		BValue::List(list_items) => {
            let json_items: Vec<Value> = list_items.iter()
                .map(|item| bvalue_to_json(item))
                .collect();
            Value::Array(json_items)
        }

        BValue::Dict(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                json_map.insert(json_key(k), bvalue_to_json(v));
            }
            Value::Object(json_map)
        }
	}
}

/// Same conversion as [`bvalue_to_json`], but refuses trees nested deeper
/// than `max_depth`. Use this on values decoded from untrusted input.
pub fn bvalue_to_json_with_limit(bv: &BValue, max_depth: usize) -> Result<Value, BencodeError> {
	if max_depth == 0 {
		return Err(BencodeError::Conversion(
			"nesting exceeds the configured depth limit".to_string(),
		));
	}

	match bv {
		BValue::List(list_items) => {
			let mut json_items = Vec::with_capacity(list_items.len());
			for item in list_items {
				json_items.push(bvalue_to_json_with_limit(item, max_depth - 1)?);
			}
			Ok(Value::Array(json_items))
		}
		BValue::Dict(map) => {
			let mut json_map = serde_json::Map::new();
			for (k, v) in map {
				json_map.insert(json_key(k), bvalue_to_json_with_limit(v, max_depth - 1)?);
			}
			Ok(Value::Object(json_map))
		}
		scalar => Ok(bvalue_to_json(scalar)),
	}
}

// JSON object keys have to be strings; non-UTF-8 key bytes show up as hex.
fn json_key(key: &[u8]) -> String {
	match std::str::from_utf8(key) {
		Ok(s) => s.to_string(),
		Err(_) => hex::encode(key),
	}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bencode::decode::decode_bencode;
    use std::collections::BTreeMap;

    #[test]
    fn test_encode_integer() {
        assert_eq!(encode_bvalue(&BValue::Integer(42)), b"i42e".to_vec());
        assert_eq!(encode_bvalue(&BValue::Integer(-5)), b"i-5e".to_vec());
        assert_eq!(encode_bvalue(&BValue::Integer(0)), b"i0e".to_vec());
    }

    #[test]
    fn test_encode_string() {
        assert_eq!(
            encode_bvalue(&BValue::ByteString(b"spam".to_vec())),
            b"4:spam".to_vec()
        );
        assert_eq!(encode_bvalue(&BValue::ByteString(Vec::new())), b"0:".to_vec());
    }

    #[test]
    fn test_encode_dict_sorts_keys() {
        // inserted foo-first, encoded baz-first
        let mut dict = BValue::Dict(BTreeMap::new());
        dict.set("foo", "bar").unwrap();
        dict.set("baz", 5i64).unwrap();
        assert_eq!(encode_bvalue(&dict), b"d3:bazi5e3:foo3:bare".to_vec());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let mut inner = BValue::Dict(BTreeMap::new());
        inner.set("k", vec![0u8, 255]).unwrap();
        let value = BValue::List(vec![
            BValue::Integer(-7),
            BValue::ByteString(b"spam".to_vec()),
            inner,
        ]);

        let encoded = encode_bvalue(&value);
        let (consumed, decoded) = decode_bencode(&encoded).unwrap();
        assert_eq!(consumed, encoded.len());
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_canonical_idempotence() {
        let input = b"d3:bazi5e3:foo3:bare";
        let (_, decoded) = decode_bencode(input).unwrap();
        assert_eq!(encode_bvalue(&decoded), input.to_vec());
    }

    #[test]
    fn test_json_non_utf8_bytes_as_hex() {
        let value = BValue::ByteString(vec![0xde, 0xad]);
        assert_eq!(bvalue_to_json(&value), json!({ "_bytes_hex": "dead" }));
    }

    #[test]
    fn test_json_depth_limit() {
        let nested = BValue::List(vec![BValue::List(vec![BValue::Integer(1)])]);
        assert!(bvalue_to_json_with_limit(&nested, 3).is_ok());
        assert!(matches!(
            bvalue_to_json_with_limit(&nested, 2),
            Err(BencodeError::Conversion(_))
        ));
    }
}
