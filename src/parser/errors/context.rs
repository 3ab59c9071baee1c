//! Parse context tracking for context-aware error messages

/// Where in the source structure the parser currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// At the top level of a build file
    TopLevel,
    /// Inside a `{ ... }` configuration block
    BlockBody,
    /// Inside `( ... )` or the bare arguments of an application
    ArgumentList,
    /// Inside `[ ... ]` list literal
    ListLiteral,
    /// Inside `[k: v]` map literal
    MapLiteral,
    /// Parsing a value expression
    Expression,
}

impl ParseContext {
    /// Human-readable description for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::BlockBody => "in block body",
            Self::ArgumentList => "in argument list",
            Self::ListLiteral => "in list literal",
            Self::MapLiteral => "in map literal",
            Self::Expression => "in expression",
        }
    }

    /// What the parser expected to find here
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel | Self::BlockBody => "a statement",
            Self::ArgumentList => "an argument or ')'",
            Self::ListLiteral => "a list element or ']'",
            Self::MapLiteral => "a map entry or ']'",
            Self::Expression => "a value",
        }
    }
}
