//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (braces, brackets, parentheses)
//! - E03xx: Statement errors
//! - E04xx: Expression errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,

    // =========================================================================
    // E02xx: Structural errors (braces, brackets, parentheses)
    // =========================================================================
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[`
    E0204,
    /// Unexpected closing delimiter
    E0205,

    // =========================================================================
    // E03xx: Statement errors
    // =========================================================================
    /// Missing variable name after `def`/`val`/`var`
    E0301,
    /// Missing `=` in a variable declaration
    E0302,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Missing expression where one is expected
    E0401,
    /// Invalid argument in an argument list
    E0402,
    /// Invalid map entry
    E0403,

    // =========================================================================
    // E09xx: Generic errors
    // =========================================================================
    /// A token no statement can start with
    E0999,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0999 => "E0999",
        }
    }

    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 => "lexical error",
            Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 => "structural error",
            Self::E0301 | Self::E0302 => "statement error",
            Self::E0401 | Self::E0402 | Self::E0403 => "expression error",
            Self::E0999 => "syntax error",
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "unexpected closing delimiter",
            Self::E0301 => "missing variable name",
            Self::E0302 => "missing '=' in variable declaration",
            Self::E0401 => "expected expression",
            Self::E0402 => "invalid argument",
            Self::E0403 => "invalid map entry",
            Self::E0999 => "unexpected token at the start of a statement",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::E0202), "E0202");
        assert_eq!(ErrorCode::E0999.as_str(), "E0999");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0203.category_description(), "structural error");
        assert_eq!(ErrorCode::E0302.category_description(), "statement error");
        assert_eq!(ErrorCode::E0401.category_description(), "expression error");
        assert_eq!(ErrorCode::E0999.category_description(), "syntax error");
    }
}
