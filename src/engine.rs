// src/engine.rs
use std::fs;
use std::path::Path;

use anyhow::Context;
use log::{debug, warn};
use serde_json::Value;

use crate::bencode::{
    bvalue_to_json_with_limit, decode_bencode, encode_bvalue, json_to_bvalue, BValue,
};
use crate::config::Config;

/// Decodes a bencoded string argument and renders it as JSON.
pub fn decode_command(input: &str, config: &Config) -> anyhow::Result<String> {
    let (consumed, value) = decode_bencode(input.as_bytes()).context("failed to decode input")?;
    if consumed < input.len() {
        warn!("{} trailing bytes left undecoded", input.len() - consumed);
    }
    render_json(&value, config)
}

/// Parses a JSON document and produces its canonical bencoding.
pub fn encode_command(json_text: &str, _config: &Config) -> anyhow::Result<Vec<u8>> {
    let json: Value = serde_json::from_str(json_text).context("input is not valid JSON")?;
    let value = json_to_bvalue(&json).context("JSON has no bencode form")?;
    let encoded = encode_bvalue(&value);
    debug!(
        "encoded {} bytes: {}",
        encoded.len(),
        String::from_utf8_lossy(&encoded)
    );
    Ok(encoded)
}

/// Decodes a bencoded file and renders a shape summary plus JSON.
pub fn inspect_command(path: &Path, config: &Config) -> anyhow::Result<String> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!("read {} bytes from {}", raw.len(), path.display());

    let (consumed, value) =
        decode_bencode(&raw).with_context(|| format!("failed to decode {}", path.display()))?;
    if consumed < raw.len() {
        warn!("{} trailing bytes left undecoded", raw.len() - consumed);
    }

    let json = render_json(&value, config)?;
    Ok(format!("{}\n{}", describe(&value), json))
}

fn render_json(value: &BValue, config: &Config) -> anyhow::Result<String> {
    let json = bvalue_to_json_with_limit(value, config.max_json_depth)
        .context("value is nested too deeply to render")?;
    let rendered = if config.pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(rendered)
}

fn describe(value: &BValue) -> String {
    match value {
        BValue::Integer(_) => "integer".to_string(),
        BValue::ByteString(bytes) => format!("byte string of {} bytes", bytes.len()),
        BValue::List(items) => format!("list with {} items", items.len()),
        BValue::Dict(map) => format!("dictionary with {} entries", map.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_decode_command() {
        let config = Config::default();
        let output = decode_command("d3:fooi42ee", &config).unwrap();
        assert_eq!(output, r#"{"foo":42}"#);
    }

    #[test]
    fn test_decode_command_rejects_malformed_input() {
        let config = Config::default();
        assert!(decode_command("d3:foo", &config).is_err());
    }

    #[test]
    fn test_encode_command_is_canonical() {
        let config = Config::default();
        let output = encode_command(r#"{"foo": "bar", "baz": 5}"#, &config).unwrap();
        assert_eq!(output, b"d3:bazi5e3:foo3:bare".to_vec());
    }

    #[test]
    fn test_encode_command_rejects_float() {
        let config = Config::default();
        assert!(encode_command("1.5", &config).is_err());
    }

    #[test]
    fn test_inspect_command() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"d3:bazi5e3:foo3:bare").unwrap();

        let config = Config::default();
        let output = inspect_command(file.path(), &config).unwrap();
        assert_eq!(output, "dictionary with 2 entries\n{\"baz\":5,\"foo\":\"bar\"}");
    }

    #[test]
    fn test_depth_limit_applies_to_output() {
        let config = Config {
            max_json_depth: 1,
            pretty: false,
        };
        assert!(decode_command("lli1eee", &config).is_err());
        assert!(decode_command("i1e", &config).is_ok());
    }
}
