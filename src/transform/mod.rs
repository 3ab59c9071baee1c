//! Property transforms: one variant per way a property can be spelled.
//!
//! A property access runs `test` over the property's registry to pick a
//! transform, then `transform` to find the element holding the value, or
//! `bind` + `replace` to write one. `bind` only builds a detached element;
//! nothing in the tree changes until `replace` attaches it.

mod basic;
mod collection;
mod infix;
mod plugin;
mod registry;
mod sdk;

pub use registry::TransformRegistry;

use tracing::warn;

use crate::base::{Dialect, VersionConstraint};
use crate::converter::{external_name_for_parent, model_effect};
use crate::dsl::{DslName, DslTree, ElementId, ElementKind, ExternalSyntax, LiteralValue};
use crate::error::DslError;

/// Prefix the `kotlin("x")` plugin shorthand stands for
pub const KOTLIN_PLUGIN_PREFIX: &str = "org.jetbrains.kotlin.";

/// One syntactic equivalence policy for a property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyTransform {
    /// The element is the value
    Default,
    /// The value is the `slot` part of an infix statement (`version` in
    /// `id 'x' version '1.0'`)
    Infix { slot: &'static str },
    /// `vararg a, b` or a list; single values bind to `vararg`, lists to
    /// `setter`
    ListOrVarargs {
        vararg: &'static str,
        setter: &'static str,
    },
    /// A bare `id 'x'` that grows a `slot` part when the value is set
    LiteralToInfix { slot: &'static str },
    /// Plugin id across literal, call, map and infix forms
    PluginName,
    /// Plugin id behind `alias(libs.plugins.x)`
    PluginAlias,
    /// Integers go to `sdk`, `android-*` strings to `preview`, anything else
    /// (or an unsupported AGP version) to `generic`
    SdkOrPreview {
        generic: &'static str,
        sdk: &'static str,
        preview: &'static str,
        constraint: VersionConstraint,
    },
    /// Only active in Kotlin script files
    KtsOnly(Box<PropertyTransform>),
    /// No legal syntax sets this property here
    Inexpressible,
    /// The value is the single argument of `method(...)`, e.g. `file("x")`
    SingleArgumentMethod { method: &'static str },
}

impl PropertyTransform {
    /// Whether this transform understands `element` under `holder`
    pub fn test(&self, tree: &DslTree, element: Option<ElementId>, holder: ElementId) -> bool {
        match self {
            Self::Default | Self::Inexpressible => true,
            Self::Infix { .. } => element.is_some_and(|id| is_kind(tree, id, Shape::Infix)),
            Self::LiteralToInfix { .. } => element.is_some_and(|id| infix::is_promotable(tree, id)),
            Self::ListOrVarargs { .. } => {
                element.is_none_or(|id| is_kind(tree, id, Shape::List))
            }
            Self::PluginName => element.is_some_and(|id| plugin::name_element(tree, id).is_some()),
            Self::PluginAlias => element.is_some_and(|id| plugin::alias_literal(tree, id).is_some()),
            Self::SdkOrPreview { .. } => {
                element.is_none_or(|id| is_kind(tree, id, Shape::Literal))
            }
            Self::KtsOnly(inner) => {
                tree.dialect() == Dialect::KotlinScript && inner.test(tree, element, holder)
            }
            Self::SingleArgumentMethod { method } => {
                element.is_none_or(|id| basic::single_argument(tree, id, method).is_some())
            }
        }
    }

    /// The element holding the externally meaningful value
    pub fn transform(&self, tree: &DslTree, element: Option<ElementId>) -> Option<ElementId> {
        let element = element?;
        match self {
            Self::Default
            | Self::Inexpressible
            | Self::ListOrVarargs { .. }
            | Self::SdkOrPreview { .. } => Some(element),
            Self::Infix { slot } => tree.get_property_element(element, slot),
            Self::LiteralToInfix { .. } => None,
            Self::PluginName => plugin::name_element(tree, element),
            Self::PluginAlias => plugin::alias_target(tree, element),
            Self::KtsOnly(inner) => inner.transform(tree, Some(element)),
            Self::SingleArgumentMethod { method } => basic::single_argument(tree, element, method),
        }
    }

    /// Restore what the surface form implies but does not spell out
    pub fn decorate_value(&self, tree: &DslTree, element: ElementId, value: LiteralValue) -> LiteralValue {
        match self {
            Self::SdkOrPreview { preview, .. } => sdk::decorate(tree, element, preview, value),
            Self::PluginName => plugin::decorate(tree, element, value),
            Self::KtsOnly(inner) => inner.decorate_value(tree, element, value),
            _ => value,
        }
    }

    /// Build a detached element holding `value`; `None` if the property
    /// cannot be written this way.
    pub fn bind(
        &self,
        tree: &mut DslTree,
        holder: ElementId,
        old: Option<ElementId>,
        value: &LiteralValue,
        name: &str,
    ) -> Option<ElementId> {
        match self {
            Self::Default | Self::PluginAlias => Some(basic::bind(tree, holder, old, value, name)),
            Self::Infix { slot } | Self::LiteralToInfix { slot } => {
                Some(tree.new_literal(DslName::single(*slot), value.clone()))
            }
            Self::ListOrVarargs { vararg, .. } => Some(collection::bind(tree, holder, vararg, value)),
            Self::PluginName => Some(plugin::bind(tree, value)),
            Self::SdkOrPreview {
                generic,
                sdk,
                preview,
                constraint,
            } => Some(sdk::bind(tree, holder, [*generic, *sdk, *preview], constraint, value)),
            Self::KtsOnly(inner) => inner.bind(tree, holder, old, value, name),
            Self::Inexpressible => {
                warn!(property = name, "no syntax can express this property");
                None
            }
            Self::SingleArgumentMethod { method } => {
                Some(basic::bind_method(tree, holder, method, value, name))
            }
        }
    }

    /// Build a detached empty list for the property
    pub fn bind_list(
        &self,
        tree: &mut DslTree,
        holder: ElementId,
        old: Option<ElementId>,
        name: &str,
    ) -> Option<ElementId> {
        match self {
            Self::Inexpressible => {
                warn!(property = name, "no syntax can express this list");
                None
            }
            Self::KtsOnly(inner) => inner.bind_list(tree, holder, old, name),
            Self::ListOrVarargs { setter, .. } => Some(collection::bind_setter_list(tree, holder, setter)),
            _ => Some(collection::bind_list(tree, holder, name)),
        }
    }

    /// Build a detached empty map for the property
    pub fn bind_map(
        &self,
        tree: &mut DslTree,
        holder: ElementId,
        old: Option<ElementId>,
        name: &str,
    ) -> Option<ElementId> {
        match self {
            Self::Inexpressible => {
                warn!(property = name, "no syntax can express this map");
                None
            }
            Self::KtsOnly(inner) => inner.bind_map(tree, holder, old, name),
            _ => Some(collection::bind_map(tree, holder, name)),
        }
    }

    /// Attach `new` in place of `old`. Returns the raw element that now
    /// stands for the property: `old` when it was updated in place.
    pub fn replace(
        &self,
        tree: &mut DslTree,
        holder: ElementId,
        old: Option<ElementId>,
        new: ElementId,
        name: &str,
    ) -> Result<ElementId, DslError> {
        match self {
            Self::Default | Self::ListOrVarargs { .. } | Self::SdkOrPreview { .. } | Self::PluginAlias => {
                basic::replace(tree, holder, old, new)
            }
            Self::Infix { slot } => infix::replace_slot(tree, holder, old, new, slot),
            Self::LiteralToInfix { .. } => infix::promote(tree, holder, old, new),
            Self::PluginName => plugin::replace(tree, holder, old, new),
            Self::KtsOnly(inner) => inner.replace(tree, holder, old, new, name),
            Self::Inexpressible => {
                warn!(property = name, "refusing to write an inexpressible property");
                Err(DslError::inexpressible(name))
            }
            Self::SingleArgumentMethod { method } => basic::replace_method(tree, holder, old, new, method),
        }
    }

    /// Remove the value. Returns the raw element left behind, if any.
    pub fn delete(
        &self,
        tree: &mut DslTree,
        holder: ElementId,
        element: ElementId,
        transformed: ElementId,
    ) -> Result<Option<ElementId>, DslError> {
        match self {
            Self::Infix { .. } => {
                let parent = tree.parent(transformed).unwrap_or(element);
                tree.remove_property(parent, transformed)?;
                Ok(Some(element))
            }
            Self::KtsOnly(inner) => inner.delete(tree, holder, element, transformed),
            _ => {
                let parent = tree.parent(element).unwrap_or(holder);
                tree.remove_property(parent, element)?;
                Ok(None)
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Shape {
    Literal,
    List,
    Infix,
}

fn is_kind(tree: &DslTree, id: ElementId, shape: Shape) -> bool {
    matches!(
        (shape, tree.element(id).kind()),
        (Shape::Literal, ElementKind::Literal(_))
            | (Shape::List, ElementKind::List { .. })
            | (Shape::Infix, ElementKind::Infix { .. })
    )
}

/// A detached literal for `model_name`, named and shaped by the converter
pub(crate) fn new_property_literal(
    tree: &mut DslTree,
    holder: ElementId,
    model_name: &str,
    value: LiteralValue,
) -> ElementId {
    let info = external_name_for_parent(tree, model_name, holder);
    // Map keys are never dotted paths
    let name = if tree.element(holder).is_block() {
        DslName::new(&info.name)
    } else {
        DslName::single(info.name.clone())
    };
    let id = tree.new_literal(name, value);
    set_shape(tree, holder, id, &info.name, info.syntax);
    id
}

/// Record the syntax and the effect it has on the holder's property
pub(crate) fn set_shape(
    tree: &mut DslTree,
    holder: ElementId,
    id: ElementId,
    external: &str,
    syntax: ExternalSyntax,
) {
    let args = match syntax {
        ExternalSyntax::Method | ExternalSyntax::SetMethod => Some(1),
        _ => None,
    };
    let effect = model_effect(tree, external, args, holder);
    tree.set_external_syntax(id, syntax);
    tree.set_effect(id, effect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::BlockKind;

    fn holder(dialect: Dialect) -> (DslTree, ElementId) {
        let mut tree = DslTree::new(dialect, None);
        let config = tree.new_block(DslName::new("defaultConfig"), BlockKind::DefaultConfig);
        let root = tree.root();
        tree.add_parsed_element(root, config);
        (tree, config)
    }

    #[test]
    fn test_kts_only_defers_outside_kotlin() {
        let transform = PropertyTransform::KtsOnly(Box::new(PropertyTransform::SingleArgumentMethod {
            method: "signingConfigs.getByName",
        }));
        let (groovy, holder_id) = holder(Dialect::Groovy);
        assert!(!transform.test(&groovy, None, holder_id));
        let (kts, holder_id) = holder(Dialect::KotlinScript);
        assert!(transform.test(&kts, None, holder_id));
    }

    #[test]
    fn test_inexpressible_never_binds() {
        let (mut tree, config) = holder(Dialect::Declarative);
        let transform = PropertyTransform::Inexpressible;
        assert_eq!(
            transform.bind(&mut tree, config, None, &"x".into(), "manifestPlaceholders"),
            None
        );
        assert_eq!(transform.bind_map(&mut tree, config, None, "manifestPlaceholders"), None);
        let new = tree.new_literal(DslName::new("manifestPlaceholders"), "x".into());
        assert_eq!(
            transform.replace(&mut tree, config, None, new, "manifestPlaceholders"),
            Err(DslError::inexpressible("manifestPlaceholders"))
        );
        assert!(tree.children(config).is_empty());
        assert!(!tree.is_modified());
    }

    #[test]
    fn test_default_bind_is_detached() {
        let (mut tree, config) = holder(Dialect::KotlinScript);
        let id = PropertyTransform::Default
            .bind(&mut tree, config, None, &"com.example".into(), "applicationId")
            .unwrap();
        assert_eq!(tree.parent(id), None);
        assert_eq!(tree.element(id).external_syntax(), ExternalSyntax::Assignment);
        assert!(tree.children(config).is_empty());
    }
}
