use crate::conf::error::ConfigError;
use crate::conf::parse::parse_config;
use crate::conf::relay_config::RelayConfig;
use crate::conf::validate::validate_config;
use std::fs;
use std::path::Path;

/// Read, parse and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    if path.as_os_str().is_empty() {
        return Err(ConfigError::MissingPath);
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config = parse_config(path, &contents)?;

    //--------------------------------------------------------------------------
    // Semantic validation
    //--------------------------------------------------------------------------
    validate_config(&config)?;

    Ok(config)
}
