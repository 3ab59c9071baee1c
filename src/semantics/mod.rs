//! Property semantics: what a statement means for the model.
//!
//! Every block kind declares an [`ExternalToModelMap`] per dialect. Each entry
//! maps one external spelling (`minSdk`, `proguardFile`, `setProguardFiles`)
//! at one arity to a model property and the way the statement affects it.
//! Entry order is declaration order and is significant.

mod schema;

pub use schema::{BlockKind, NAMED_CONTAINER_METHODS, properties};

use crate::base::{AgpVersion, Dialect, VersionConstraint};

/// Shape of the value a model property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelPropertyType {
    Mutable,
    MutableList,
    MutableSet,
    MutableMap,
}

impl ModelPropertyType {
    pub fn is_collection(self) -> bool {
        matches!(self, Self::MutableList | Self::MutableSet | Self::MutableMap)
    }
}

/// A semantic property, independent of how it is spelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelPropertyDescription {
    pub name: &'static str,
    pub ty: ModelPropertyType,
}

impl ModelPropertyDescription {
    pub const fn new(name: &'static str, ty: ModelPropertyType) -> Self {
        Self { name, ty }
    }
}

/// How a statement acts on its property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticsDescription {
    /// `name = value`
    Var,
    /// Read-only reference to a mutable value (`manifestPlaceholders += ...`)
    Val,
    /// Assignable, but only through a setter in some dialects
    VwoProperty,
    /// `name(value)` / `name value`
    Set,
    /// `name(a, b)` adds each argument as one element
    AddAsList,
    /// `name a, b` appends to an existing list
    AugmentList,
    /// `setName([a, b])` replaces the list
    ClearAndAugmentList,
    /// `name k: v` merges entries into a map
    AugmentMap,
    /// Any other method acting on the property
    Other,
    /// Resets the property; never returned by lookups
    Reset,
    /// `name("x") { }` creates a named element
    CreateWithValue,
}

impl SemanticsDescription {
    /// Method-class semantics are written as a method call and take
    /// precedence over assignment forms.
    pub fn is_method_class(self) -> bool {
        matches!(
            self,
            Self::Set
                | Self::AddAsList
                | Self::AugmentList
                | Self::ClearAndAugmentList
                | Self::AugmentMap
                | Self::Other
        )
    }

    /// Semantics that add to a collection instead of replacing it
    pub fn is_augmenting(self) -> bool {
        matches!(self, Self::AddAsList | Self::AugmentList | Self::AugmentMap)
    }
}

/// A property together with the effect one external form has on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelEffectDescription {
    pub property: ModelPropertyDescription,
    pub semantics: SemanticsDescription,
    pub version_constraint: Option<VersionConstraint>,
}

impl ModelEffectDescription {
    pub const fn new(property: ModelPropertyDescription, semantics: SemanticsDescription) -> Self {
        Self {
            property,
            semantics,
            version_constraint: None,
        }
    }

    pub const fn since(mut self, constraint: VersionConstraint) -> Self {
        self.version_constraint = Some(constraint);
        self
    }

    pub fn is_ok_with(&self, version: Option<&AgpVersion>) -> bool {
        self.version_constraint
            .is_none_or(|constraint| constraint.is_ok_with(version))
    }
}

/// Number of arguments an external form accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Assignment forms: `name = value`, `name += value`
    Property,
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    /// `args` is `None` for an assignment and `Some(n)` for a call with `n` arguments.
    pub fn accepts(self, args: Option<usize>) -> bool {
        match (self, args) {
            (Self::Property, None) => true,
            (Self::Exactly(n), Some(count)) => n == count,
            (Self::AtLeast(n), Some(count)) => count >= n,
            _ => false,
        }
    }
}

/// One row of an external-to-model table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalToModelEntry {
    pub name: &'static str,
    pub arity: Arity,
    pub effect: ModelEffectDescription,
}

/// The external spellings a block understands for one dialect
#[derive(Debug, Clone, Copy)]
pub struct ExternalToModelMap {
    entries: &'static [ExternalToModelEntry],
    assignments_only: bool,
}

impl ExternalToModelMap {
    pub const EMPTY: Self = Self {
        entries: &[],
        assignments_only: false,
    };

    pub(crate) const fn new(entries: &'static [ExternalToModelEntry]) -> Self {
        Self {
            entries,
            assignments_only: false,
        }
    }

    /// Restrict to assignment forms, for the declarative dialect
    pub(crate) const fn assignments_only(mut self) -> Self {
        self.assignments_only = true;
        self
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &'static ExternalToModelEntry> + '_ {
        let assignments_only = self.assignments_only;
        self.entries
            .iter()
            .filter(move |entry| !assignments_only || entry.arity == Arity::Property)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn for_block(kind: BlockKind, dialect: Dialect) -> Self {
        schema::external_to_model_map(kind, dialect)
    }
}
