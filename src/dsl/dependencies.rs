//! Reference injections: which elements an expression's value refers to.
//!
//! References resolve against, in order: variables declared in enclosing
//! blocks (innermost first), `ext`/`extra` properties of enclosing blocks,
//! and version catalogs (`libs.plugins.foo`). A reference that resolves to
//! its own origin, or to an element that depends back on the origin, is
//! dropped so the dependency graph stays acyclic.

use rustc_hash::FxHashSet;

use super::element::{ElementId, ElementKind};
use super::tree::DslTree;
use crate::semantics::BlockKind;

/// One textual reference from an expression to another element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceInjection {
    /// The literal that contains the reference
    pub origin: ElementId,
    /// The reference as written, `libs.plugins.foo`
    pub name: String,
    /// The element it resolves to, if any
    pub target: Option<ElementId>,
}

impl ReferenceInjection {
    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}

const SCOPE_PREFIXES: &[&str] = &["project", "rootProject"];
const EXT_NAMES: &[&str] = &["ext", "extra"];

impl DslTree {
    /// References made by `id` and its descendants, never including a
    /// self-reference or a reference that closes a cycle.
    pub fn get_dependencies(&self, id: ElementId) -> Vec<ReferenceInjection> {
        let mut references = Vec::new();
        self.collect_references(id, &mut references);

        references
            .into_iter()
            .filter_map(|(origin, name)| {
                let target = self.resolve_reference(origin, &name);
                if let Some(target) = target {
                    if self.is_ancestor(target, origin) || self.is_ancestor(origin, target) {
                        return None;
                    }
                    let mut visited = FxHashSet::default();
                    if self.reaches(target, id, &mut visited) {
                        return None;
                    }
                }
                Some(ReferenceInjection {
                    origin,
                    name,
                    target,
                })
            })
            .collect()
    }

    fn collect_references(&self, id: ElementId, out: &mut Vec<(ElementId, String)>) {
        let element = self.element(id);
        match &element.kind {
            ElementKind::Literal(value) => {
                out.extend(value.referenced_names().into_iter().map(|name| (id, name)));
            }
            kind => {
                if let Some(items) = kind.children() {
                    for child in items.relevant() {
                        self.collect_references(child, out);
                    }
                }
            }
        }
    }

    /// Whether any reference reachable from `from` resolves to `goal`
    fn reaches(&self, from: ElementId, goal: ElementId, visited: &mut FxHashSet<ElementId>) -> bool {
        if !visited.insert(from) {
            return false;
        }
        let mut references = Vec::new();
        self.collect_references(from, &mut references);
        references.into_iter().any(|(origin, name)| {
            match self.resolve_reference(origin, &name) {
                Some(target) => {
                    self.is_ancestor(goal, target)
                        || self.is_ancestor(target, goal)
                        || self.reaches(target, goal, visited)
                }
                None => false,
            }
        })
    }

    /// Resolve a dotted reference as seen from `from`
    pub fn resolve_reference(&self, from: ElementId, path: &str) -> Option<ElementId> {
        let mut segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        while segments.len() > 1 && SCOPE_PREFIXES.contains(&segments[0]) {
            segments.remove(0);
        }
        let (&first, rest) = segments.split_first()?;

        if let Some(catalog) = self.catalog(first) {
            let accessor = rest.join(".");
            return self
                .children(catalog)
                .into_iter()
                .rev()
                .find(|&id| self.element(id).name().full() == accessor);
        }

        if EXT_NAMES.contains(&first) {
            let (&name, rest) = rest.split_first()?;
            let found = self.scopes(from).find_map(|scope| self.ext_property(scope, name))?;
            return self.descend(found, rest);
        }

        let found = self.scopes(from).find_map(|scope| {
            self.get_variable_element(scope, first)
                .or_else(|| self.ext_property(scope, first))
        })?;
        self.descend(found, rest)
    }

    /// Enclosing blocks of `from`, innermost first
    fn scopes(&self, from: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let start = if self.element(from).is_block() {
            Some(from)
        } else {
            self.enclosing_block(from)
        };
        std::iter::successors(start, move |&block| self.enclosing_block(block))
    }

    fn ext_property(&self, scope: ElementId, name: &str) -> Option<ElementId> {
        if self.block_kind(scope) == Some(BlockKind::Ext) {
            return self.get_property_element(scope, name);
        }
        self.children(scope)
            .into_iter()
            .rev()
            .filter(|&id| self.block_kind(id) == Some(BlockKind::Ext))
            .find_map(|ext| self.get_property_element(ext, name))
    }

    /// Follow the remaining segments into map entries and block properties
    fn descend(&self, start: ElementId, segments: &[&str]) -> Option<ElementId> {
        segments.iter().try_fold(start, |current, segment| {
            match &self.element(current).kind {
                ElementKind::Map { .. } | ElementKind::Block { .. } => {
                    self.get_property_element(current, segment)
                }
                _ => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Dialect;
    use crate::dsl::element::ElementType;
    use crate::dsl::name::DslName;
    use crate::dsl::value::LiteralValue;

    fn variable(tree: &mut DslTree, block: ElementId, name: &str, value: LiteralValue) -> ElementId {
        let id = tree.new_literal(DslName::new(name), value);
        tree.set_element_type(id, ElementType::Variable);
        tree.add_parsed_element(block, id);
        id
    }

    #[test]
    fn test_resolves_outer_variable() {
        let mut tree = DslTree::new(Dialect::Groovy, None);
        let root = tree.root();
        let version = variable(&mut tree, root, "kotlinVersion", "1.9.0".into());
        let android = tree.new_block(DslName::new("android"), BlockKind::Android);
        tree.add_parsed_element(root, android);
        let user = tree.new_literal(
            DslName::new("x"),
            LiteralValue::Interpolated("kotlin-$kotlinVersion".into()),
        );
        tree.add_parsed_element(android, user);

        let deps = tree.get_dependencies(user);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "kotlinVersion");
        assert_eq!(deps[0].target, Some(version));
    }

    #[test]
    fn test_ext_property_through_prefix() {
        let mut tree = DslTree::new(Dialect::Groovy, None);
        let root = tree.root();
        let ext = tree.new_block(DslName::new("ext"), BlockKind::Ext);
        tree.add_parsed_element(root, ext);
        let sdk = tree.new_literal(DslName::new("sdk"), 33.into());
        tree.add_parsed_element(ext, sdk);
        let user = tree.new_literal(
            DslName::new("compileSdk"),
            LiteralValue::Reference("rootProject.ext.sdk".into()),
        );
        tree.add_parsed_element(root, user);

        assert_eq!(tree.resolve_reference(user, "rootProject.ext.sdk"), Some(sdk));
        assert_eq!(tree.resolve_reference(user, "sdk"), Some(sdk));
    }

    #[test]
    fn test_self_reference_and_cycles_are_dropped() {
        let mut tree = DslTree::new(Dialect::Groovy, None);
        let root = tree.root();
        let a = variable(&mut tree, root, "a", LiteralValue::Reference("a".into()));
        assert!(tree.get_dependencies(a).is_empty());

        let b = variable(&mut tree, root, "b", LiteralValue::Reference("c".into()));
        let c = variable(&mut tree, root, "c", LiteralValue::Reference("b".into()));
        assert!(tree.get_dependencies(b).is_empty());
        assert!(tree.get_dependencies(c).is_empty());
    }

    #[test]
    fn test_unresolved_reference_is_kept() {
        let mut tree = DslTree::new(Dialect::KotlinScript, None);
        let root = tree.root();
        let user = tree.new_literal(
            DslName::new("x"),
            LiteralValue::Reference("libs.plugins.missing".into()),
        );
        tree.add_parsed_element(root, user);
        let deps = tree.get_dependencies(user);
        assert_eq!(deps.len(), 1);
        assert!(!deps[0].is_resolved());
    }
}
