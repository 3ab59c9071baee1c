//! Lossless parser for Gradle build scripts (Groovy and Kotlin script)
//!
//! - **logos** for lexing
//! - **rowan** for the CST, which preserves all whitespace and comments
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed statement and expression wrappers
//! ```
//!
//! One grammar covers both dialects: the statement shapes Gradle scripts use
//! (`name value`, `name = value`, `name(args)`, `name { }`, infix chains)
//! are the same in Groovy and Kotlin script. Everything else is kept as an
//! opaque statement so the text round-trips untouched.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod errors;
mod lexer;
mod syntax_kind;

pub use ast::AstNode;
pub use errors::{ErrorCode, ParseContext, RelatedInfo, Severity, SyntaxError};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, parse};
pub use syntax_kind::{GradleLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
