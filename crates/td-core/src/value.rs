use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    Scalar(String),
    List(Vec<String>),
}

impl VarValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value.as_str()),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(values) => Some(values.as_slice()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::List(_) => "list",
        }
    }
}

/// Parses the right-hand side of a `~name: value` declaration.
///
/// Text holding a bracketed list (`[red blue "light green"]`) becomes a
/// `List`; anything else is kept whole as a trimmed `Scalar`.
pub fn parse_value(text: &str) -> VarValue {
    let trimmed = text.trim();
    match bracketed_inner(trimmed) {
        Some(inner) => VarValue::List(split_choice_list(inner)),
        None => VarValue::Scalar(trimmed.to_string()),
    }
}

/// Returns the text between the first `[` and the last `]`, if both exist.
pub fn bracketed_inner(text: &str) -> Option<&str> {
    bracket_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|inner| inner.as_str())
}

/// Splits the interior of a bracketed list into tokens.
///
/// A token is either a bare run of ASCII letters or a double-quoted phrase of
/// letters and spaces. Tokenizing stops at the first residue matching neither.
pub fn split_choice_list(inner: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = inner.trim_start();

    while !rest.is_empty() {
        let caps = match word_token_regex()
            .captures(rest)
            .or_else(|| quoted_token_regex().captures(rest))
        {
            Some(caps) => caps,
            None => break,
        };
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        tokens.push(token.as_str().to_string());
        rest = rest[whole.end()..].trim_start();
    }

    tokens
}

fn bracket_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\[(.*)\]").expect("bracket regex"))
}

fn word_token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([a-zA-Z]+)").expect("word token regex"))
}

fn quoted_token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#"^"([a-zA-Z\s]+)""#).expect("quoted token regex"))
}
