//! Scalar literal values.

use std::fmt;

/// The value of a literal element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(String),
    Integer(i64),
    /// Kept as written so `1.10` survives a round trip
    Decimal(String),
    Boolean(bool),
    /// Dotted reference to another value: `libs.plugins.foo`, `kotlinVersion`
    Reference(String),
    /// String containing `$x` or `${x}`, as written between the quotes
    Interpolated(String),
    /// Expression the model does not interpret; read-only
    Raw(String),
    Null,
}

impl LiteralValue {
    /// The string content, for values that have one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Interpolated(s) | Self::Decimal(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// Names referenced from inside this value
    pub fn referenced_names(&self) -> Vec<String> {
        match self {
            Self::Reference(path) => vec![path.clone()],
            Self::Interpolated(text) => interpolated_names(text),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s)
            | Self::Decimal(s)
            | Self::Reference(s)
            | Self::Interpolated(s)
            | Self::Raw(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// `"${a.b}-$c"` gives `["a.b", "c"]`
fn interpolated_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = text;
    while let Some(dollar) = rest.find('$') {
        if dollar > 0 && rest.as_bytes()[dollar - 1] == b'\\' {
            rest = &rest[dollar + 1..];
            continue;
        }
        rest = &rest[dollar + 1..];
        if let Some(inner) = rest.strip_prefix('{') {
            let Some(close) = inner.find('}') else {
                break;
            };
            let name = inner[..close].trim();
            if !name.is_empty() {
                names.push(name.to_string());
            }
            rest = &inner[close + 1..];
        } else {
            let len = rest
                .char_indices()
                .find(|(_, c)| !(c.is_alphanumeric() || *c == '_' || *c == '.'))
                .map_or(rest.len(), |(i, _)| i);
            let name = rest[..len].trim_end_matches('.');
            if !name.is_empty() {
                names.push(name.to_string());
            }
            rest = &rest[len..];
        }
    }
    names
}
