use std::collections::HashMap;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Index of the first `key=value` tag token.
const FIRST_TAG_TOKEN: usize = 4;

/// One monitoring line decoded into its metric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSample {
    pub event_name: String,
    /// Seconds since the unix epoch.
    pub timestamp: i64,
    pub value: f64,
    pub tags: HashMap<String, String>,
}

impl DecodedSample {
    /// Tag value for `key`, or `""` when the line did not carry it.
    pub fn tag(&self, key: &str) -> &str {
        self.tags.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn deployment(&self) -> &str {
        self.tag("deployment")
    }

    pub fn job(&self) -> &str {
        self.tag("job")
    }

    pub fn index(&self) -> &str {
        self.tag("index")
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("expected at least 4 tokens, found {found}")]
    TooFewTokens { found: usize },

    #[error("invalid timestamp '{token}': {source}")]
    InvalidTimestamp {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid value '{token}': {source}")]
    InvalidValue {
        token: String,
        #[source]
        source: ValueError,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error(transparent)]
    Parse(#[from] ParseFloatError),

    /// A finite literal too large to represent as an `f64`.
    #[error("value out of range")]
    OutOfRange,
}

/// Decode one line of the form
/// `<origin> <event name> <epoch seconds> <value> [key=value ...]`.
pub fn decode_line(line: &str) -> Result<DecodedSample, DecodeError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() < FIRST_TAG_TOKEN {
        return Err(DecodeError::TooFewTokens {
            found: tokens.len(),
        });
    }

    let timestamp = tokens[2]
        .parse::<i64>()
        .map_err(|source| DecodeError::InvalidTimestamp {
            token: tokens[2].to_string(),
            source,
        })?;

    let value = parse_value(tokens[3]).map_err(|source| DecodeError::InvalidValue {
        token: tokens[3].to_string(),
        source,
    })?;

    Ok(DecodedSample {
        event_name: tokens[1].to_string(),
        timestamp,
        value,
        tags: parse_tags(&tokens[FIRST_TAG_TOKEN..]),
    })
}

/// Overflowing literals such as `1e400` are rejected rather than read as
/// infinity; only an explicit `inf`/`infinity` spelling yields one.
fn parse_value(token: &str) -> Result<f64, ValueError> {
    let value = token.parse::<f64>()?;

    if value.is_infinite() && !is_infinity_literal(token) {
        return Err(ValueError::OutOfRange);
    }

    Ok(value)
}

fn is_infinity_literal(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Later duplicates overwrite earlier ones.
fn parse_tags(tokens: &[&str]) -> HashMap<String, String> {
    let mut tags = HashMap::with_capacity(tokens.len());

    for token in tokens {
        let mut parts = token.split('=');
        let key = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default();
        tags.insert(key.to_string(), value.to_string());
    }

    tags
}
