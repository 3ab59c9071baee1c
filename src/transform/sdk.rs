//! `compileSdk 33` / `compileSdkPreview "S"` / `compileSdkVersion 'android-S'`.

use super::set_shape;
use crate::base::VersionConstraint;
use crate::converter::model_effect;
use crate::dsl::{DslName, DslTree, ElementId, ExternalSyntax, LiteralValue};

const PREVIEW_PREFIX: &str = "android-";

pub(super) fn decorate(tree: &DslTree, element: ElementId, preview: &str, value: LiteralValue) -> LiteralValue {
    if tree.element(element).name().name() != preview {
        return value;
    }
    match value {
        LiteralValue::String(s) if !s.starts_with(PREVIEW_PREFIX) => {
            LiteralValue::String(format!("{PREVIEW_PREFIX}{s}"))
        }
        other => other,
    }
}

/// `[generic, sdk, preview]` names; the split forms exist only where
/// `constraint` holds.
pub(super) fn bind(
    tree: &mut DslTree,
    holder: ElementId,
    [generic, sdk, preview]: [&str; 3],
    constraint: &VersionConstraint,
    value: &LiteralValue,
) -> ElementId {
    let split = constraint.is_ok_with(tree.agp_version());
    let preview_value = value
        .as_str()
        .filter(|_| matches!(value, LiteralValue::String(_)))
        .and_then(|s| s.strip_prefix(PREVIEW_PREFIX));

    let (name, value, syntax) = match (value, preview_value) {
        (LiteralValue::Integer(_), _) if split => (sdk, value.clone(), ExternalSyntax::Assignment),
        (_, Some(codename)) if split => (
            preview,
            LiteralValue::String(codename.to_string()),
            ExternalSyntax::Assignment,
        ),
        _ => {
            let syntax = if model_effect(tree, generic, Some(1), holder).is_some() {
                ExternalSyntax::Method
            } else {
                ExternalSyntax::Assignment
            };
            (generic, value.clone(), syntax)
        }
    };

    let id = tree.new_literal(DslName::new(name), value);
    set_shape(tree, holder, id, name, syntax);
    id
}
