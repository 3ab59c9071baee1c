//! The Dsl element arena and its structural mutation primitives.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use super::element::{
    CollectionKind, DslElement, ElementId, ElementKind, ElementList, ElementState, ElementType,
    ExternalSyntax,
};
use super::name::DslName;
use super::value::LiteralValue;
use crate::base::{AgpVersion, Dialect};
use crate::error::DslError;
use crate::semantics::{BlockKind, ExternalToModelMap, ModelEffectDescription, SemanticsDescription};

/// Insertion point for a new or relocated element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Directly after this sibling
    After(ElementId),
    /// Before every other child of the parent
    StartOfParent,
}

/// Semantic model of one build file.
///
/// Elements live in an arena and refer to each other by [`ElementId`]. Every
/// element except the file root and catalog roots has exactly one parent.
/// Detached elements (created by `new_*`, not yet attached) have none.
#[derive(Debug, Clone)]
pub struct DslTree {
    elements: Vec<DslElement>,
    root: ElementId,
    dialect: Dialect,
    agp_version: Option<AgpVersion>,
    catalogs: IndexMap<SmolStr, ElementId>,
}

impl DslTree {
    pub fn new(dialect: Dialect, agp_version: Option<AgpVersion>) -> Self {
        let root = DslElement::new(
            DslName::empty(),
            ElementKind::Block {
                items: ElementList::new(),
                kind: BlockKind::File,
                header: None,
            },
        );
        Self {
            elements: vec![root],
            root: ElementId(0),
            dialect,
            agp_version,
            catalogs: IndexMap::new(),
        }
    }

    /// The same tree with its root read as a `kind` block
    pub fn with_root_kind(mut self, kind: BlockKind) -> Self {
        let root = self.root;
        if let ElementKind::Block { kind: current, .. } = &mut self.element_mut(root).kind {
            *current = kind;
        }
        self
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn agp_version(&self) -> Option<&AgpVersion> {
        self.agp_version.as_ref()
    }

    pub fn element(&self, id: ElementId) -> &DslElement {
        &self.elements[id.index()]
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> &mut DslElement {
        &mut self.elements[id.index()]
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).parent
    }

    /// Items of a container, removed ones included
    pub fn items(&self, id: ElementId) -> Option<&ElementList> {
        self.element(id).kind.children()
    }

    /// Relevant children of a container, in order
    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.items(id)
            .map(|items| items.relevant().collect())
            .unwrap_or_default()
    }

    pub fn block_kind(&self, id: ElementId) -> Option<BlockKind> {
        self.element(id).block_kind()
    }

    /// The property table of a holder for this tree's dialect
    pub fn external_to_model_map(&self, holder: ElementId) -> ExternalToModelMap {
        match self.block_kind(holder) {
            Some(kind) => ExternalToModelMap::for_block(kind, self.dialect),
            None => ExternalToModelMap::EMPTY,
        }
    }

    /// Whether `ancestor` is `id` or one of its parents
    pub fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Nearest enclosing block, `id` itself excluded
    pub fn enclosing_block(&self, id: ElementId) -> Option<ElementId> {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if self.element(node).is_block() {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    pub fn is_modified(&self) -> bool {
        self.element(self.root).modified
    }

    // =========================================================================
    // Detached elements
    // =========================================================================

    pub(crate) fn alloc(&mut self, element: DslElement) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(element);
        id
    }

    pub fn new_literal(&mut self, name: DslName, value: LiteralValue) -> ElementId {
        self.alloc(DslElement::new(name, ElementKind::Literal(value)))
    }

    pub fn new_list(&mut self, name: DslName, collection: CollectionKind) -> ElementId {
        self.alloc(DslElement::new(
            name,
            ElementKind::List {
                items: ElementList::new(),
                appendable: collection == CollectionKind::Varargs,
                collection,
            },
        ))
    }

    pub fn new_map(&mut self, name: DslName, literal: bool) -> ElementId {
        self.alloc(DslElement::new(
            name,
            ElementKind::Map {
                items: ElementList::new(),
                literal,
            },
        ))
    }

    pub fn new_method_call(&mut self, name: DslName, method: &str) -> ElementId {
        self.alloc(DslElement::new(
            name,
            ElementKind::MethodCall {
                method: SmolStr::new(method),
                args: ElementList::new(),
            },
        ))
    }

    pub fn new_infix(&mut self, name: DslName) -> ElementId {
        self.alloc(DslElement::new(
            name,
            ElementKind::Infix {
                items: ElementList::new(),
            },
        ))
    }

    pub fn new_block(&mut self, name: DslName, kind: BlockKind) -> ElementId {
        self.alloc(DslElement::new(
            name,
            ElementKind::Block {
                items: ElementList::new(),
                kind,
                header: None,
            },
        ))
    }

    pub(crate) fn set_external_syntax(&mut self, id: ElementId, syntax: ExternalSyntax) {
        self.element_mut(id).external_syntax = syntax;
    }

    pub(crate) fn set_effect(&mut self, id: ElementId, effect: Option<ModelEffectDescription>) {
        self.element_mut(id).effect = effect;
    }

    pub(crate) fn set_element_type(&mut self, id: ElementId, element_type: ElementType) {
        self.element_mut(id).element_type = element_type;
    }

    pub(crate) fn register_catalog(&mut self, name: &str, root: ElementId) {
        self.catalogs.insert(SmolStr::new(name), root);
    }

    /// Root of the derived subtree lowered from a version catalog
    pub fn catalog(&self, name: &str) -> Option<ElementId> {
        self.catalogs.get(name).copied()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// The current element for a property: the last relevant match wins.
    /// Variables and reset effects are never returned.
    pub fn get_property_element(&self, container: ElementId, name: &str) -> Option<ElementId> {
        let items = self.items(container)?;
        let relevant: Vec<_> = items.relevant().collect();
        relevant.into_iter().rev().find(|&id| {
            let element = self.element(id);
            element.element_type != ElementType::Variable
                && !is_reset(element.effect.as_ref())
                && element.lookup_name() == name
        })
    }

    /// Every relevant element for a property, in source order
    pub fn get_property_elements_by_name(&self, container: ElementId, name: &str) -> Vec<ElementId> {
        self.children(container)
            .into_iter()
            .filter(|&id| {
                let element = self.element(id);
                element.element_type != ElementType::Variable
                    && !is_reset(element.effect.as_ref())
                    && element.lookup_name() == name
            })
            .collect()
    }

    /// A `def`/`val` declared directly in `container`
    pub fn get_variable_element(&self, container: ElementId, name: &str) -> Option<ElementId> {
        let children = self.children(container);
        children.into_iter().rev().find(|&id| {
            let element = self.element(id);
            element.element_type == ElementType::Variable && element.name.full() == name
        })
    }

    /// A child block called `name`
    pub fn get_block(&self, container: ElementId, name: &str) -> Option<ElementId> {
        let children = self.children(container);
        children.into_iter().rev().find(|&id| {
            let element = self.element(id);
            element.is_block() && element.name.full() == name
        })
    }

    /// Walk block names from the file root
    pub fn find_block(&self, path: &[&str]) -> Option<ElementId> {
        path.iter()
            .try_fold(self.root, |block, name| self.get_block(block, name))
    }

    // =========================================================================
    // Structural mutation
    // =========================================================================

    fn items_mut(&mut self, container: ElementId) -> Result<&mut ElementList, DslError> {
        let name = self.element(container).name.full();
        self.element_mut(container)
            .kind
            .children_mut()
            .ok_or(DslError::NotAContainer(name))
    }

    fn attach(&mut self, container: ElementId, id: ElementId) {
        self.element_mut(id).parent = Some(container);
    }

    /// Attach an element lowered from existing text
    pub(crate) fn add_parsed_element(&mut self, container: ElementId, id: ElementId) {
        if let Ok(items) = self.items_mut(container) {
            items.push(id, ElementState::Existing);
            self.attach(container, id);
        }
    }

    /// Attach a new element after every other child. A current element with
    /// the same name is replaced in its slot.
    pub fn set_new_element(&mut self, container: ElementId, id: ElementId) -> Result<(), DslError> {
        let name = self.element(id).lookup_name();
        let existing = if name.is_empty() || self.element(id).element_type == ElementType::Variable {
            None
        } else {
            self.get_property_element(container, &name)
        };
        if let Some(existing) = existing {
            return self.replace_element(container, existing, id);
        }
        self.items_mut(container)?.push(id, ElementState::ToBeAdded);
        self.attach(container, id);
        self.set_modified(container);
        trace!(element = %name, "set new element");
        Ok(())
    }

    /// Attach a new element at `index` among the relevant children
    pub fn add_new_element_at(
        &mut self,
        container: ElementId,
        index: usize,
        id: ElementId,
    ) -> Result<(), DslError> {
        let items = self.items_mut(container)?;
        let physical = items.physical_index(index);
        items.insert(physical, id, ElementState::ToBeAdded);
        self.attach(container, id);
        self.set_modified(container);
        Ok(())
    }

    /// Remove `old` and attach `new` in its place; the old text is deleted
    /// and the new text written where it was.
    pub fn replace_element(
        &mut self,
        container: ElementId,
        old: ElementId,
        new: ElementId,
    ) -> Result<(), DslError> {
        let items = self.items_mut(container)?;
        let Some(position) = items.position(old) else {
            return Err(DslError::UnknownElement(format!("{old:?}")));
        };
        if items.state(old) == Some(ElementState::ToBeAdded) {
            items.replace_id(old, new, ElementState::ToBeAdded);
        } else {
            items.set_state(old, ElementState::ToBeRemoved);
            items.insert(position + 1, new, ElementState::ToBeAdded);
        }
        self.attach(container, new);
        self.set_modified(container);
        Ok(())
    }

    /// Swap `new` into `old`'s slot without touching old text. The slot stays
    /// existing when `new` carries backing text, otherwise it is added.
    pub fn substitute_element(
        &mut self,
        container: ElementId,
        old: ElementId,
        new: ElementId,
    ) -> Result<(), DslError> {
        let state = if self.element(new).backing.is_some() {
            ElementState::Existing
        } else {
            ElementState::ToBeAdded
        };
        let items = self.items_mut(container)?;
        if !items.replace_id(old, new, state) {
            return Err(DslError::UnknownElement(format!("{old:?}")));
        }
        self.element_mut(old).parent = None;
        self.attach(container, new);
        self.set_modified(new);
        Ok(())
    }

    /// Mark an element for deletion; elements never written are dropped
    pub fn remove_property(&mut self, container: ElementId, id: ElementId) -> Result<(), DslError> {
        let items = self.items_mut(container)?;
        match items.state(id) {
            None => return Err(DslError::UnknownElement(format!("{id:?}"))),
            Some(ElementState::ToBeAdded) => {
                items.remove(id);
                self.element_mut(id).parent = None;
            }
            Some(_) => {
                items.set_state(id, ElementState::ToBeRemoved);
            }
        }
        self.set_modified(container);
        Ok(())
    }

    /// Remove every current element for a property; returns how many
    pub fn remove_property_by_name(&mut self, container: ElementId, name: &str) -> usize {
        let ids = self.get_property_elements_by_name(container, name);
        ids.iter()
            .filter(|&&id| self.remove_property(container, id).is_ok())
            .count()
    }

    /// Relocate a child to `index` among the relevant children. Its old text
    /// is copied there on write, and its backing is stale until reparse.
    pub fn move_element_to(
        &mut self,
        container: ElementId,
        id: ElementId,
        index: usize,
    ) -> Result<(), DslError> {
        let has_backing = self.element(id).backing.is_some();
        let items = self.items_mut(container)?;
        let Some(item) = items.remove(id) else {
            return Err(DslError::UnknownElement(format!("{id:?}")));
        };
        let state = match item.state {
            ElementState::ToBeAdded => ElementState::ToBeAdded,
            _ if has_backing => ElementState::Moved,
            other => other,
        };
        let physical = items.physical_index(index);
        items.insert(physical, id, state);
        if let Some(handle) = self.element_mut(id).backing.as_mut() {
            handle.stale = true;
        }
        self.set_modified(container);
        Ok(())
    }

    /// The sibling a new or moved element should follow: the last previous
    /// item of its parent in physical order.
    pub fn request_anchor(&self, id: ElementId) -> Anchor {
        let Some(parent) = self.parent(id) else {
            return Anchor::StartOfParent;
        };
        let Some(items) = self.items(parent) else {
            return Anchor::StartOfParent;
        };
        match items.position(id) {
            Some(position) if position > 0 => items
                .get(position - 1)
                .map_or(Anchor::StartOfParent, |item| Anchor::After(item.id)),
            _ => Anchor::StartOfParent,
        }
    }

    /// Change a literal's value in place
    pub fn set_literal_value(&mut self, id: ElementId, value: LiteralValue) -> Result<(), DslError> {
        let element = self.element_mut(id);
        match &mut element.kind {
            ElementKind::Literal(current) => {
                if *current != value {
                    *current = value;
                    self.set_modified(id);
                }
                Ok(())
            }
            other => Err(DslError::unsupported(
                element.name.full(),
                format!("cannot set a literal value on a {}", other.describe()),
            )),
        }
    }

    /// Flag an element and all its ancestors as modified
    pub fn set_modified(&mut self, id: ElementId) {
        let mut current = Some(id);
        while let Some(node) = current {
            let element = self.element_mut(node);
            element.modified = true;
            current = element.parent;
        }
    }

    /// Whether the element or any descendant has pending changes
    pub fn has_pending_changes(&self, id: ElementId) -> bool {
        self.element(id).modified
            || self.items(id).is_some_and(|items| {
                items
                    .iter()
                    .any(|item| item.state != ElementState::Existing)
            })
    }
}

fn is_reset(effect: Option<&ModelEffectDescription>) -> bool {
    effect.is_some_and(|e| e.semantics == SemanticsDescription::Reset)
}
