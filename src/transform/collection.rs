//! List and map construction for collection properties.

use super::set_shape;
use crate::base::Dialect;
use crate::converter::external_name_for_parent;
use crate::dsl::{CollectionKind, DslName, DslTree, ElementId, ElementType, ExternalSyntax, LiteralValue};

/// `resConfigs 'en'`: a one-item vararg call
pub(super) fn bind(tree: &mut DslTree, holder: ElementId, vararg: &str, value: &LiteralValue) -> ElementId {
    let list = tree.new_list(DslName::new(vararg), CollectionKind::Varargs);
    let item = tree.new_literal(DslName::empty(), value.clone());
    tree.set_element_type(item, ElementType::Fake);
    tree.add_parsed_element(list, item);
    set_shape(tree, holder, list, vararg, ExternalSyntax::Method);
    list
}

/// `setProguardFiles([])`: an empty list passed to a clearing setter
pub(super) fn bind_setter_list(tree: &mut DslTree, holder: ElementId, setter: &str) -> ElementId {
    let list = tree.new_list(DslName::new(setter), list_collection(tree.dialect()));
    set_shape(tree, holder, list, setter, ExternalSyntax::Method);
    list
}

fn list_collection(dialect: Dialect) -> CollectionKind {
    match dialect {
        Dialect::Groovy => CollectionKind::Bracket,
        Dialect::KotlinScript | Dialect::Declarative => CollectionKind::ListOf,
    }
}

/// An empty list written the way `name` is spelled under `holder`
pub(super) fn bind_list(tree: &mut DslTree, holder: ElementId, name: &str) -> ElementId {
    let info = external_name_for_parent(tree, name, holder);
    let list = tree.new_list(DslName::new(&info.name), list_collection(tree.dialect()));
    let syntax = match info.syntax {
        ExternalSyntax::Unknown => ExternalSyntax::Assignment,
        other => other,
    };
    set_shape(tree, holder, list, &info.name, syntax);
    list
}

/// An empty map literal written the way `name` is spelled under `holder`
pub(super) fn bind_map(tree: &mut DslTree, holder: ElementId, name: &str) -> ElementId {
    let info = external_name_for_parent(tree, name, holder);
    let map = tree.new_map(DslName::new(&info.name), true);
    let syntax = match info.syntax {
        ExternalSyntax::Unknown => ExternalSyntax::Assignment,
        other => other,
    };
    set_shape(tree, holder, map, &info.name, syntax);
    map
}
