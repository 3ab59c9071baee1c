//! Element names.

use smol_str::SmolStr;
use std::fmt;

/// The name of an element as written, possibly dotted (`android.defaultConfig`).
///
/// Map keys are single parts even when they contain dots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DslName {
    parts: Vec<SmolStr>,
}

impl DslName {
    /// A dotted name, split on `.`
    pub fn new(name: &str) -> Self {
        Self {
            parts: name
                .split('.')
                .filter(|part| !part.is_empty())
                .map(SmolStr::new)
                .collect(),
        }
    }

    /// A single-part name that is never split
    pub fn single(name: impl Into<SmolStr>) -> Self {
        let name = name.into();
        if name.is_empty() {
            return Self::empty();
        }
        Self { parts: vec![name] }
    }

    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// The name of list items and other positional elements
    pub fn empty() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn parts(&self) -> &[SmolStr] {
        &self.parts
    }

    /// Last segment: `defaultConfig` for `android.defaultConfig`
    pub fn name(&self) -> &str {
        self.parts.last().map(SmolStr::as_str).unwrap_or("")
    }

    /// Every segment joined with `.`
    pub fn full(&self) -> String {
        self.parts.join(".")
    }

    pub fn is_qualified(&self) -> bool {
        self.parts.len() > 1
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl fmt::Display for DslName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full())
    }
}

impl From<&str> for DslName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_name() {
        let name = DslName::new("android.defaultConfig");
        assert!(name.is_qualified());
        assert_eq!(name.name(), "defaultConfig");
        assert_eq!(name.to_string(), "android.defaultConfig");
    }

    #[test]
    fn test_single_keeps_dots() {
        let name = DslName::single("com.example.key");
        assert!(!name.is_qualified());
        assert_eq!(name.name(), "com.example.key");
        assert!(DslName::single("").is_empty());
    }
}
