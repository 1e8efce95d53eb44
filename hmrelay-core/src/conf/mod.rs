mod error;
mod loader;
mod parse;
mod relay_config;
mod validate;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::load_config;
pub use parse::{ConfigFormat, parse_config};
pub use relay_config::*;
pub use validate::validate_config;
