//! The Dsl element tree: the semantic model of one build file.
//!
//! Elements live in a per-file arena ([`DslTree`]) and are addressed by
//! [`ElementId`]. Containers keep their children in an [`ElementList`] that
//! records a pending [`ElementState`] per item, so the writer can turn
//! structural mutations into text edits without re-serialising the file.

mod dependencies;
mod element;
pub(crate) mod lower;
mod name;
mod tree;
mod value;

pub use dependencies::ReferenceInjection;
pub use element::{
    CollectionKind, DslElement, ElementId, ElementItem, ElementKind, ElementList, ElementState,
    ElementType, ExternalSyntax, SyntaxHandle,
};
pub use name::DslName;
pub use tree::{Anchor, DslTree};
pub use value::LiteralValue;
