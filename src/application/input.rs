//! Parsing of level-order tree descriptions.
//!
//! Two layouts are accepted:
//! - `counted`: a node count `n` followed by exactly `n` integers
//! - `bare`: just the integers, optionally wrapped in `[` `]`
//!
//! Tokens are separated by whitespace and/or commas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("input is empty, expected a node count")]
    Empty,

    #[error("invalid token '{token}' at position {position}: expected an integer")]
    InvalidToken { position: usize, token: String },

    #[error("invalid node count '{0}'")]
    InvalidCount(String),

    #[error("expected {expected} values, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("unexpected input after {expected} values: '{token}'")]
    TrailingInput { expected: usize, token: String },
}

/// Layout of the textual input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    #[default]
    Counted,
    Bare,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Counted => write!(f, "counted"),
            InputFormat::Bare => write!(f, "bare"),
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "counted" => Ok(InputFormat::Counted),
            "bare" => Ok(InputFormat::Bare),
            other => Err(format!("unknown input format: {other} (expected counted or bare)")),
        }
    }
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

fn parse_value(position: usize, token: &str) -> Result<i32, InputError> {
    token.parse::<i32>().map_err(|_| InputError::InvalidToken {
        position,
        token: token.to_string(),
    })
}

/// Parse the level-order values out of `text`.
pub fn parse_values(text: &str, format: InputFormat) -> Result<Vec<i32>, InputError> {
    match format {
        InputFormat::Counted => parse_counted(text),
        InputFormat::Bare => parse_bare(text),
    }
}

fn parse_counted(text: &str) -> Result<Vec<i32>, InputError> {
    let mut tokens = tokens(text);
    let count_token = tokens.next().ok_or(InputError::Empty)?;
    let expected: usize = count_token
        .parse()
        .map_err(|_| InputError::InvalidCount(count_token.to_string()))?;

    let values = tokens
        .by_ref()
        .take(expected)
        .enumerate()
        .map(|(i, t)| parse_value(i + 1, t))
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() < expected {
        return Err(InputError::Truncated {
            expected,
            found: values.len(),
        });
    }
    if let Some(token) = tokens.next() {
        return Err(InputError::TrailingInput {
            expected,
            token: token.to_string(),
        });
    }
    Ok(values)
}

fn parse_bare(text: &str) -> Result<Vec<i32>, InputError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(trimmed);

    tokens(inner)
        .enumerate()
        .map(|(i, t)| parse_value(i, t))
        .collect()
}
