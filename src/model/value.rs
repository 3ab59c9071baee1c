//! Values as clients see them.

use indexmap::IndexMap;

use crate::dsl::LiteralValue;

/// The value of a property, collections included
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Decimal(String),
    Boolean(bool),
    /// Unresolved reference text: `libs.versions.agp`, `rootProject.ext.sdk`
    Reference(String),
    /// String with `$x`/`${x}` parts, as written between the quotes
    Interpolated(String),
    List(Vec<PropertyValue>),
    Map(IndexMap<String, PropertyValue>),
    /// Present, but not something the model interprets (`null`, closures,
    /// arbitrary calls)
    Unknown,
    /// Not set
    #[default]
    None,
}

impl PropertyValue {
    pub fn reference(path: impl Into<String>) -> Self {
        Self::Reference(path.into())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Interpolated(s) | Self::Reference(s) | Self::Decimal(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, PropertyValue>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// The literal to store for a scalar value
    pub(crate) fn to_literal(&self) -> Option<LiteralValue> {
        let literal = match self {
            Self::String(s) => LiteralValue::String(s.clone()),
            Self::Integer(n) => LiteralValue::Integer(*n),
            Self::Decimal(s) => LiteralValue::Decimal(s.clone()),
            Self::Boolean(b) => LiteralValue::Boolean(*b),
            Self::Reference(s) => LiteralValue::Reference(s.clone()),
            Self::Interpolated(s) => LiteralValue::Interpolated(s.clone()),
            Self::List(_) | Self::Map(_) | Self::Unknown | Self::None => return None,
        };
        Some(literal)
    }
}

impl From<LiteralValue> for PropertyValue {
    fn from(value: LiteralValue) -> Self {
        match value {
            LiteralValue::String(s) => Self::String(s),
            LiteralValue::Integer(n) => Self::Integer(n),
            LiteralValue::Decimal(s) => Self::Decimal(s),
            LiteralValue::Boolean(b) => Self::Boolean(b),
            LiteralValue::Reference(s) => Self::Reference(s),
            LiteralValue::Interpolated(s) => Self::Interpolated(s),
            LiteralValue::Raw(_) | LiteralValue::Null => Self::Unknown,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
