//! # gradle-dsl
//!
//! Lossless model of Gradle build scripts: read properties, change them, and
//! write the changes back as minimal edits to the original text.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! file       → BuildFile: text, tree, apply/reset
//!   ↓
//! writer     → tree changes to text edits
//!   ↓
//! model      → PropertyModel, PluginModel, SettingsModel
//!   ↓
//! transform  → per-property read/write policies
//!   ↓
//! dsl        → element tree, lowering, references
//!   ↓
//! converter  → external name ↔ model property
//!   ↓
//! semantics  → property tables and block schema
//!   ↓
//! parser     → Logos lexer, recursive-descent parser, rowan CST
//!   ↓
//! base       → Dialect, AGP versions, text positions
//! ```
//!
//! ## Example
//!
//! ```
//! use gradle_dsl::{BuildFile, DslContext, Dialect};
//!
//! let text = "android {\n    namespace 'com.example.app'\n}\n";
//! let mut file = BuildFile::parse(text, DslContext::new(Dialect::Groovy));
//! let android = file.block(&["android"]).unwrap();
//! let mut namespace = file.property(android, "namespace");
//! namespace.set_value(file.tree_mut(), "com.example.demo").unwrap();
//! file.apply_changes().unwrap();
//! assert_eq!(file.text(), "android {\n    namespace 'com.example.demo'\n}\n");
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → semantics → dsl → model → file)
// ============================================================================

/// Foundation types: Dialect, AgpVersion, text positions
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Property descriptions, effects and the block schema
pub mod semantics;

/// Element tree of one build file
pub mod dsl;

/// External name ↔ model property lookups
pub mod converter;

/// Property transforms and their registry
pub mod transform;

/// Client-facing property, plugin and settings models
pub mod model;

/// Version catalogs (`libs.versions.toml`)
pub mod catalog;

/// Parse and write configuration
pub mod context;

/// Write-back of tree changes
mod writer;

/// BuildFile: parse, mutate, apply
pub mod file;

pub mod error;

// Re-export commonly needed items
pub use base::{AgpVersion, Dialect, TextRange, TextSize};
pub use catalog::VersionCatalog;
pub use context::{DslContext, ScriptKind, WriterOptions};
pub use dsl::{DslName, DslTree, ElementId, LiteralValue};
pub use error::DslError;
pub use file::BuildFile;
pub use model::{PluginModel, PropertyModel, PropertyValue, SettingsModel};
