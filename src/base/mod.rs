//! Foundation types shared by every layer of the crate.
//!
//! - [`Dialect`] - which surface language a build file is written in
//! - [`AgpVersion`], [`VersionConstraint`] - Android Gradle Plugin version gating
//! - [`Position`] and line helpers - offset to line/column, indentation lookup
//!
//! This module has NO dependencies on other crate modules.

mod dialect;
mod position;
mod version;

pub use dialect::Dialect;
pub use position::{Position, line_end, line_indent, line_start};
pub use version::{AgpVersion, PreviewKind, VersionConstraint};

// Re-export rowan's text types so callers never need a direct dependency
pub use rowan::{TextRange, TextSize};
