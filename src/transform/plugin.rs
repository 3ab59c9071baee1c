//! Plugin ids across their spellings:
//!
//! ```text
//! id 'x'                      id("x")
//! kotlin("android")           id("x") version "1.0" apply false
//! apply plugin: 'x'           apply(plugin = "x")
//! alias(libs.plugins.x)       alias libs.plugins.x
//! ```

use super::{KOTLIN_PLUGIN_PREFIX, basic};
use crate::dsl::{DslName, DslTree, ElementId, ElementKind, ExternalSyntax, LiteralValue};
use crate::error::DslError;

const ID_METHODS: &[&str] = &["id", "kotlin"];
const MAP_KEYS: &[&str] = &["plugin", "id"];

/// The literal holding the plugin id, for every form but `alias`
pub(super) fn name_element(tree: &DslTree, id: ElementId) -> Option<ElementId> {
    let element = tree.element(id);
    match element.kind() {
        ElementKind::Literal(_) => (element.name().full() != "alias").then_some(id),
        ElementKind::MethodCall { method, args } if ID_METHODS.contains(&method.as_str()) => {
            args.relevant().next()
        }
        ElementKind::Map { .. } => MAP_KEYS
            .iter()
            .find_map(|key| tree.get_property_element(id, key)),
        ElementKind::Infix { items } => {
            let first = items.relevant().next()?;
            name_element(tree, first)
        }
        _ => None,
    }
}

/// The catalog reference of `alias(libs.plugins.x)`
pub(super) fn alias_literal(tree: &DslTree, id: ElementId) -> Option<ElementId> {
    let element = tree.element(id);
    match element.kind() {
        ElementKind::Literal(value) if element.name().full() == "alias" => value.is_reference().then_some(id),
        ElementKind::MethodCall { method, args } if method == "alias" => {
            let arg = args.relevant().next()?;
            tree.element(arg).literal()?.is_reference().then_some(arg)
        }
        ElementKind::Infix { items } => {
            let first = items.relevant().next()?;
            alias_literal(tree, first)
        }
        _ => None,
    }
}

/// The catalog's `id` entry, when the alias resolves to exactly one entry
pub(super) fn alias_target(tree: &DslTree, id: ElementId) -> Option<ElementId> {
    let literal = alias_literal(tree, id)?;
    let resolved: Vec<_> = tree
        .get_dependencies(literal)
        .into_iter()
        .filter_map(|dependency| dependency.target)
        .collect();
    let [target] = resolved.as_slice() else {
        return None;
    };
    match tree.element(*target).kind() {
        ElementKind::Map { .. } => tree.get_property_element(*target, "id"),
        ElementKind::Literal(_) => Some(*target),
        _ => None,
    }
}

/// Whether the request is spelled with the `kotlin(..)` shorthand
fn is_kotlin_form(tree: &DslTree, id: ElementId) -> bool {
    let element = tree.element(id);
    match element.kind() {
        ElementKind::MethodCall { method, .. } => method == "kotlin",
        ElementKind::Literal(_) => element.name().full() == "kotlin",
        ElementKind::Infix { items } => items.relevant().next().is_some_and(|first| is_kotlin_form(tree, first)),
        _ => false,
    }
}

pub(super) fn decorate(tree: &DslTree, element: ElementId, value: LiteralValue) -> LiteralValue {
    match value {
        LiteralValue::String(s) if is_kotlin_form(tree, element) => {
            LiteralValue::String(format!("{KOTLIN_PLUGIN_PREFIX}{s}"))
        }
        other => other,
    }
}

/// A fresh `id` request
pub(super) fn bind(tree: &mut DslTree, value: &LiteralValue) -> ElementId {
    let id = tree.new_literal(DslName::new("id"), value.clone());
    tree.set_external_syntax(id, ExternalSyntax::Method);
    id
}

/// Update the id where it is written. A `kotlin(..)` request that can no
/// longer spell the new id is replaced by an `id` request.
pub(super) fn replace(
    tree: &mut DslTree,
    holder: ElementId,
    old: Option<ElementId>,
    new: ElementId,
) -> Result<ElementId, DslError> {
    let Some(old) = old else {
        let end = tree.children(holder).len();
        tree.add_new_element_at(holder, end, new)?;
        return Ok(new);
    };
    let Some(value) = tree.element(new).literal().cloned() else {
        return basic::replace(tree, holder, Some(old), new);
    };
    if tree.element(old).is_bare_name() {
        return basic::replace(tree, holder, Some(old), new);
    }
    let value = if is_kotlin_form(tree, old) {
        match &value {
            LiteralValue::String(s) => match s.strip_prefix(KOTLIN_PLUGIN_PREFIX) {
                Some(short) => LiteralValue::String(short.to_string()),
                None => return basic::replace(tree, holder, Some(old), new),
            },
            _ => return basic::replace(tree, holder, Some(old), new),
        }
    } else {
        value
    };
    match name_element(tree, old) {
        Some(target) => {
            tree.set_literal_value(target, value)?;
            Ok(old)
        }
        None => basic::replace(tree, holder, Some(old), new),
    }
}
