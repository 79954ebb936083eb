// lib.rs - Library interface for the bencode codec CLI

pub mod bencode;
pub mod config;
pub mod engine;

// Re-export commonly used types for easier testing
pub use bencode::*;
pub use config::Config;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode_to_json(input: &[u8]) -> Result<serde_json::Value, BencodeError> {
        let (_, value) = decode_bencode(input)?;
        Ok(bvalue_to_json(&value))
    }

    #[test]
    fn test_decode_simple_bencode() {
        // Test simple integer
        assert_eq!(decode_to_json(b"i42e").unwrap(), json!(42));

        // Test simple string
        assert_eq!(decode_to_json(b"4:test").unwrap(), json!("test"));

        // Test simple list
        assert_eq!(decode_to_json(b"li1ei2ee").unwrap(), json!([1, 2]));

        // Test simple dictionary
        assert_eq!(decode_to_json(b"d3:fooi42ee").unwrap(), json!({"foo": 42}));
    }

    #[test]
    fn test_decode_invalid_bencode() {
        // Test incomplete dictionary
        assert!(decode_bencode(b"d").is_err());

        // Test incomplete string
        assert!(decode_bencode(b"4:ab").is_err());

        // Test invalid format
        assert!(decode_bencode(b"invalid").is_err());
    }

    #[test]
    fn test_end_to_end_canonical_encoding() {
        // {"foo": "bar", "baz": 5} encodes with its keys re-sorted,
        // and the canonical bytes re-decode to equal content
        let native = json!({"foo": "bar", "baz": 5});
        let value = json_to_bvalue(&native).unwrap();
        let encoded = encode_bvalue(&value);
        assert_eq!(encoded, b"d3:bazi5e3:foo3:bare".to_vec());

        let (_, decoded) = decode_bencode(&encoded).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(encode_bvalue(&decoded), encoded);
    }

    #[test]
    fn test_nested_list_round_trip() {
        let input = b"l4:spami42eli1ei2eee";
        let (_, value) = decode_bencode(input).unwrap();
        assert_eq!(bvalue_to_json(&value), json!(["spam", 42, [1, 2]]));
        assert_eq!(encode_bvalue(&value), input.to_vec());
    }

    #[test]
    fn test_mutation_then_encode_stays_canonical() {
        let (_, mut value) = decode_bencode(b"d3:fooi1ee").unwrap();
        value.set("bar", 2i64).unwrap();
        value.remove(b"foo");
        value.set("abc", "x").unwrap();
        assert_eq!(encode_bvalue(&value), b"d3:abc1:x3:bari2ee".to_vec());
    }
}
