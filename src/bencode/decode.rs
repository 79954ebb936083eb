use std::collections::BTreeMap;
use super::error::BencodeError;
use crate::bencode::bvalue::BValue;

/// Outcome of one decode step: a real value, or the `e` terminator of the
/// enclosing container. The terminator never escapes this module, so it can
/// not end up inside a finished value tree.
enum Token {
	Value(BValue),
	End,
}

/// Decodes the first complete value in `input`.
///
/// Returns the number of bytes consumed together with the value, so callers
/// holding a larger buffer can keep parsing after it. Trailing bytes are not
/// an error here.
pub fn decode_bencode(input: &[u8]) -> Result<(usize, BValue), BencodeError> {
    match decode_token(input, 0)? {
        (consumed, Token::Value(value)) => Ok((consumed, value)),
        // a terminator with no open container
        (_, Token::End) => Err(BencodeError::UnknownTag('e', 0)),
    }
}

fn decode_token(input: &[u8], pos: usize) -> Result<(usize, Token), BencodeError> {
    match input.get(pos) {
        None => Err(BencodeError::ExceededLength(pos)),
        Some(b'i') => decode_integer(input, pos),
        Some(b'l') => decode_list(input, pos),
        Some(b'd') => decode_dict(input, pos),
        Some(b'e') => Ok((pos + 1, Token::End)),
        Some(c) if c.is_ascii_digit() => decode_string(input, pos),
        Some(&c) => Err(BencodeError::UnknownTag(c as char, pos)),
    }
}

fn decode_integer(input: &[u8], pos: usize) -> Result<(usize, Token), BencodeError> {
	let start = pos + 1; // skip 'i'
	let end = input[start..]
		.iter()
		.position(|&b| b == b'e')
		.map(|offset| start + offset)
		.ok_or(BencodeError::ExceededLength(input.len()))?;

	let num_str = std::str::from_utf8(&input[start..end])
		.map_err(|_| BencodeError::InvalidInteger("non-ASCII bytes in integer".to_string()))?;

	// An optional '-' followed by digits; nothing else ('+' included) is wire-legal.
	let digits = num_str.strip_prefix('-').unwrap_or(num_str);
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return Err(BencodeError::InvalidInteger(format!(
			"malformed literal: {:?}",
			num_str
		)));
	}

	// i0e is the only literal allowed to start with '0'; -0 has no canonical form
	if num_str.starts_with("-0") || (num_str.starts_with('0') && num_str.len() > 1) {
		return Err(BencodeError::InvalidInteger(format!(
			"leading zeros are not allowed: {}",
			num_str
		)));
	}

	// Only overflow is left to catch here; the literal must not wrap silently.
	let parsed = num_str.parse::<i64>().map_err(|e| {
		BencodeError::InvalidInteger(format!("failed to parse integer '{}': {}", num_str, e))
	})?;

	// add 1 to account for 'e'
	Ok((end + 1, Token::Value(BValue::Integer(parsed))))
}

/// Decodes a byte string of the form `<length>:<bytes>`.
fn decode_string(input: &[u8], pos: usize) -> Result<(usize, Token), BencodeError> {
	let colon = input[pos..]
		.iter()
		.position(|&b| b == b':')
		.map(|offset| pos + offset)
		.ok_or(BencodeError::ExceededLength(input.len()))?;

	let len_str = std::str::from_utf8(&input[pos..colon])
		.map_err(|_| BencodeError::InvalidLength("non-ASCII bytes in length".to_string()))?;

	if !len_str.bytes().all(|b| b.is_ascii_digit()) {
		return Err(BencodeError::InvalidLength(format!(
			"malformed length: {:?}",
			len_str
		)));
	}
	if len_str.len() > 1 && len_str.starts_with('0') {
		return Err(BencodeError::InvalidLength(format!(
			"leading zeros are not allowed: {}",
			len_str
		)));
	}

	let length = len_str.parse::<usize>().map_err(|e| {
		BencodeError::InvalidLength(format!("failed to parse length '{}': {}", len_str, e))
	})?;

	let start_data = colon + 1;
	let available = input.len() - start_data;
	if length > available {
		return Err(BencodeError::TruncatedString {
			declared: length,
			available,
		});
	}

	let data = input[start_data..start_data + length].to_vec();
	Ok((start_data + length, Token::Value(BValue::ByteString(data))))
}

/// Decodes a list of the form `l<items>e`.
fn decode_list(input: &[u8], pos: usize) -> Result<(usize, Token), BencodeError> {
    let mut idx = pos + 1; // skip 'l'
    let mut items = Vec::new();

    loop {
        // Any decode error below aborts the whole list; no partial recovery.
        match decode_token(input, idx)? {
            (next, Token::End) => return Ok((next, Token::Value(BValue::List(items)))),
            (next, Token::Value(value)) => {
                items.push(value);
                idx = next;
            }
        }
    }
}

/// Decodes a dictionary of the form `d<key><value>...e`.
fn decode_dict(input: &[u8], pos: usize) -> Result<(usize, Token), BencodeError> {
    let mut idx = pos + 1; // skip 'd'
    let mut map = BTreeMap::new();

    loop {
        // Decode a key; it must be a byte string, and End closes the dict.
        let key_offset = idx;
        let key = match decode_token(input, idx)? {
            (next, Token::End) => return Ok((next, Token::Value(BValue::Dict(map)))),
            (next, Token::Value(BValue::ByteString(bytes))) => {
                idx = next;
                bytes
            }
            (_, Token::Value(_)) => return Err(BencodeError::KeyNotString(key_offset)),
        };

        // Decode the paired value; the dict must not end between key and value.
        let value = match decode_token(input, idx)? {
            (_, Token::End) => {
                return Err(BencodeError::MissingValue(
                    String::from_utf8_lossy(&key).into_owned(),
                ))
            }
            (next, Token::Value(value)) => {
                idx = next;
                value
            }
        };

        if map.contains_key(&key) {
            return Err(BencodeError::DuplicateKey(
                String::from_utf8_lossy(&key).into_owned(),
            ));
        }
        map.insert(key, value);
    }
}
