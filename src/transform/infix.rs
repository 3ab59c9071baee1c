//! Infix statements: `id 'x' version '1.0' apply false`.

use crate::dsl::{DslTree, ElementId, ElementKind, LiteralValue};
use crate::error::DslError;

/// Plugin request methods that may grow `version`/`apply` parts
const REQUEST_METHODS: &[&str] = &["id", "kotlin", "alias"];

/// A bare request (`id 'x'`, `id("x")`, `kotlin("android")`) that can
/// become the first part of an infix statement
pub(super) fn is_promotable(tree: &DslTree, id: ElementId) -> bool {
    let element = tree.element(id);
    match element.kind() {
        ElementKind::Literal(_) => REQUEST_METHODS.contains(&element.name().full().as_str()),
        ElementKind::MethodCall { method, args } => {
            REQUEST_METHODS.contains(&method.as_str()) && args.relevant().count() == 1
        }
        _ => false,
    }
}

pub(super) fn replace_slot(
    tree: &mut DslTree,
    holder: ElementId,
    old: Option<ElementId>,
    new: ElementId,
    slot: &str,
) -> Result<ElementId, DslError> {
    let infix = match old {
        Some(infix) if matches!(tree.element(infix).kind(), ElementKind::Infix { .. }) => infix,
        _ => {
            return Err(DslError::unsupported(
                slot,
                format!("no infix statement under {}", tree.element(holder).name()),
            ));
        }
    };
    let value = tree.element(new).literal().cloned();
    match (tree.get_property_element(infix, slot), value) {
        (Some(current), Some(value)) if is_plain(tree, current) => {
            tree.set_literal_value(current, value)?;
        }
        (Some(current), _) => tree.replace_element(infix, current, new)?,
        (None, _) => tree.set_new_element(infix, new)?,
    }
    Ok(infix)
}

fn is_plain(tree: &DslTree, id: ElementId) -> bool {
    tree.element(id)
        .literal()
        .is_some_and(|value| !matches!(value, LiteralValue::Raw(_)))
}

/// Wrap `old` in an infix statement that takes over its text, then append
/// `new` as a fresh part.
pub(super) fn promote(
    tree: &mut DslTree,
    holder: ElementId,
    old: Option<ElementId>,
    new: ElementId,
) -> Result<ElementId, DslError> {
    let Some(old) = old else {
        return Err(DslError::unsupported(
            tree.element(new).name().full(),
            "no plugin request to extend",
        ));
    };
    let parent = tree.parent(old).unwrap_or(holder);
    let element = tree.element(old);
    let (name, syntax, effect, backing) = (
        element.name().clone(),
        element.external_syntax(),
        element.effect().copied(),
        element.raw_backing().copied(),
    );

    let infix = tree.new_infix(name);
    tree.element_mut(infix).backing = backing;
    tree.set_external_syntax(infix, syntax);
    tree.set_effect(infix, effect);
    tree.substitute_element(parent, old, infix)?;
    tree.add_parsed_element(infix, old);
    tree.set_new_element(infix, new)?;
    Ok(infix)
}
