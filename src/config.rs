use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub max_json_depth: usize,
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_json_depth: crate::bencode::DEFAULT_JSON_DEPTH,
            pretty: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = "bencoder.toml";
        if Path::new(config_path).exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            let config = Self::default();
            // Save default config
            let toml = toml::to_string(&config)?;
            fs::write(config_path, toml)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config {
            max_json_depth: 16,
            pretty: true,
        };
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_default_depth_matches_library() {
        assert_eq!(
            Config::default().max_json_depth,
            crate::bencode::DEFAULT_JSON_DEPTH
        );
    }
}
