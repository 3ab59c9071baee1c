//! The identity transform and single-argument method wrappers.

use super::{new_property_literal, set_shape};
use crate::converter::external_name_for_parent;
use crate::dsl::{DslName, DslTree, ElementId, ElementKind, ElementType, LiteralValue};
use crate::error::DslError;

/// A literal for the property, shaped like the element it replaces when
/// there is one.
pub(super) fn bind(
    tree: &mut DslTree,
    holder: ElementId,
    old: Option<ElementId>,
    value: &LiteralValue,
    name: &str,
) -> ElementId {
    let template = old.filter(|&id| {
        let element = tree.element(id);
        element.literal().is_some() && !element.name().is_empty()
    });
    match template {
        Some(old) => {
            let element = tree.element(old);
            let (name, syntax, effect) = (
                element.name().clone(),
                element.external_syntax(),
                element.effect().copied(),
            );
            let id = tree.new_literal(name, value.clone());
            tree.set_external_syntax(id, syntax);
            tree.set_effect(id, effect);
            id
        }
        None => new_property_literal(tree, holder, name, value.clone()),
    }
}

pub(super) fn replace(
    tree: &mut DslTree,
    holder: ElementId,
    old: Option<ElementId>,
    new: ElementId,
) -> Result<ElementId, DslError> {
    let Some(old) = old else {
        tree.set_new_element(holder, new)?;
        return Ok(new);
    };
    if old == new {
        return Ok(old);
    }
    if let Some(value) = in_place_value(tree, old, new) {
        tree.set_literal_value(old, value)?;
        return Ok(old);
    }
    let parent = tree.parent(old).unwrap_or(holder);
    tree.replace_element(parent, old, new)?;
    Ok(new)
}

/// The new value, when `old` can simply take it: both literals, same name
fn in_place_value(tree: &DslTree, old: ElementId, new: ElementId) -> Option<LiteralValue> {
    let (old, new) = (tree.element(old), tree.element(new));
    let current = old.literal()?;
    let value = new.literal()?;
    if old.name() != new.name() || matches!(current, LiteralValue::Raw(_)) {
        return None;
    }
    Some(value.clone())
}

/// The argument of `method(arg)`, matched on the method's last segment
pub(super) fn single_argument(tree: &DslTree, id: ElementId, method: &str) -> Option<ElementId> {
    let expected = method.rsplit('.').next().unwrap_or(method);
    match tree.element(id).kind() {
        ElementKind::MethodCall { method, args } if method == expected => {
            let mut relevant = args.relevant();
            let arg = relevant.next()?;
            relevant.next().is_none().then_some(arg)
        }
        _ => None,
    }
}

/// `storeFile file("x")`: a call wrapping one literal argument
pub(super) fn bind_method(
    tree: &mut DslTree,
    holder: ElementId,
    method: &str,
    value: &LiteralValue,
    name: &str,
) -> ElementId {
    let info = external_name_for_parent(tree, name, holder);
    let call = tree.new_method_call(DslName::new(&info.name), method);
    let arg = tree.new_literal(DslName::empty(), value.clone());
    tree.set_element_type(arg, ElementType::Fake);
    // A detached call owns its argument outright
    tree.add_parsed_element(call, arg);
    set_shape(tree, holder, call, &info.name, info.syntax);
    call
}

pub(super) fn replace_method(
    tree: &mut DslTree,
    holder: ElementId,
    old: Option<ElementId>,
    new: ElementId,
    method: &str,
) -> Result<ElementId, DslError> {
    let current = old.and_then(|old| single_argument(tree, old, method).map(|arg| (old, arg)));
    let value = single_argument(tree, new, method)
        .and_then(|arg| tree.element(arg).literal().cloned());
    if let (Some((old, arg)), Some(value)) = (current, value) {
        if tree.element(arg).literal().is_some() {
            tree.set_literal_value(arg, value)?;
            return Ok(old);
        }
    }
    replace(tree, holder, old, new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Dialect;
    use crate::dsl::{ElementState, ExternalSyntax};
    use crate::semantics::BlockKind;

    fn signing(dialect: Dialect) -> (DslTree, ElementId) {
        let mut tree = DslTree::new(dialect, None);
        let block = tree.new_block(DslName::new("release"), BlockKind::SigningConfig);
        let root = tree.root();
        tree.add_parsed_element(root, block);
        (tree, block)
    }

    #[test]
    fn test_bind_method_wraps_argument() {
        let (mut tree, block) = signing(Dialect::Groovy);
        let call = bind_method(&mut tree, block, "file", &"keystore.jks".into(), "storeFile");
        assert_eq!(tree.element(call).name().full(), "storeFile");
        assert_eq!(tree.element(call).external_syntax(), ExternalSyntax::Method);
        let arg = single_argument(&tree, call, "file").unwrap();
        assert_eq!(tree.element(arg).literal(), Some(&"keystore.jks".into()));
    }

    #[test]
    fn test_replace_method_updates_argument_in_place() {
        let (mut tree, block) = signing(Dialect::KotlinScript);
        let old = bind_method(&mut tree, block, "file", &"a.jks".into(), "storeFile");
        tree.add_parsed_element(block, old);
        let new = bind_method(&mut tree, block, "file", &"b.jks".into(), "storeFile");

        let holder = replace_method(&mut tree, block, Some(old), new, "file").unwrap();
        assert_eq!(holder, old);
        let arg = single_argument(&tree, old, "file").unwrap();
        assert_eq!(tree.element(arg).literal(), Some(&"b.jks".into()));
        assert_eq!(tree.items(block).unwrap().state(old), Some(ElementState::Existing));
    }

    #[test]
    fn test_replace_renamed_literal_swaps_elements() {
        let (mut tree, block) = signing(Dialect::Groovy);
        let old = tree.new_literal(DslName::new("storeFile"), "a".into());
        tree.add_parsed_element(block, old);
        let new = tree.new_literal(DslName::new("other"), "b".into());
        assert_eq!(replace(&mut tree, block, Some(old), new), Ok(new));
        assert_eq!(tree.children(block), vec![new]);
    }
}
