use crate::conf::error::ConfigError;
use crate::conf::relay_config::RelayConfig;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Hcl,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some("hcl") => Ok(Self::Hcl),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Parse `contents` using the format implied by `path`'s extension.
pub fn parse_config(path: &Path, contents: &str) -> Result<RelayConfig, ConfigError> {
    match ConfigFormat::from_path(path)? {
        ConfigFormat::Json => {
            serde_json::from_str(contents).map_err(|source| ConfigError::ParseJson {
                path: path.to_path_buf(),
                source,
            })
        }
        ConfigFormat::Toml => toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        }),
        ConfigFormat::Hcl => hcl::from_str(contents).map_err(|source| ConfigError::ParseHcl {
            path: path.to_path_buf(),
            source,
        }),
    }
}
