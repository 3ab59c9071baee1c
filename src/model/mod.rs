//! Property models: read and write one named property of a block through
//! its transforms.
//!
//! A model remembers the raw element currently standing for its property.
//! Reads go through the selected transform's `transform`; writes build a
//! detached element with `bind` and attach it with `replace`.

mod plugins;
mod settings;
mod value;

pub use plugins::PluginModel;
pub use settings::SettingsModel;
pub use value::PropertyValue;

use smol_str::SmolStr;
use tracing::debug;

use crate::dsl::{
    DslName, DslTree, ElementId, ElementKind, ElementType, ExternalSyntax, LiteralValue,
    ReferenceInjection,
};
use crate::error::DslError;
use crate::semantics::SemanticsDescription;
use crate::transform::{PropertyTransform, TransformRegistry};

/// One named property of one holder (a block, map or infix statement)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyModel {
    holder: ElementId,
    name: SmolStr,
    element: Option<ElementId>,
    transforms: TransformRegistry,
}

impl PropertyModel {
    /// The model for `name` under `holder`, bound to its current element
    pub fn new(tree: &DslTree, holder: ElementId, name: &str) -> Self {
        Self {
            holder,
            name: SmolStr::new(name),
            element: tree.get_property_element(holder, name),
            transforms: TransformRegistry::for_property(name, tree.dialect()),
        }
    }

    /// A model over an element found some other way (plugin requests)
    pub fn with_transforms(
        holder: ElementId,
        name: &str,
        element: Option<ElementId>,
        transforms: TransformRegistry,
    ) -> Self {
        Self {
            holder,
            name: SmolStr::new(name),
            element,
            transforms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn holder(&self) -> ElementId {
        self.holder
    }

    /// The element standing for the property, before any transform
    pub fn raw_element(&self) -> Option<ElementId> {
        self.element
    }

    /// The element holding the value
    pub fn element(&self, tree: &DslTree) -> Option<ElementId> {
        self.transform(tree).transform(tree, self.element)
    }

    fn transform<'a>(&'a self, tree: &DslTree) -> &'a PropertyTransform {
        self.transforms.select(tree, self.element, self.holder)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn value(&self, tree: &DslTree) -> PropertyValue {
        let Some(raw) = self.element else {
            return PropertyValue::None;
        };
        let transform = self.transform(tree);
        match transform.transform(tree, Some(raw)) {
            Some(id) => read(tree, id, |value| transform.decorate_value(tree, raw, value)),
            None => PropertyValue::None,
        }
    }

    /// The value with references followed to the values they name
    pub fn resolved_value(&self, tree: &DslTree) -> PropertyValue {
        let Some(id) = self.element(tree) else {
            return PropertyValue::None;
        };
        match self.value(tree) {
            PropertyValue::Reference(path) => {
                let dependencies = tree.get_dependencies(id);
                match dependencies.as_slice() {
                    [ReferenceInjection {
                        target: Some(target),
                        ..
                    }] => read_plain(tree, *target),
                    _ => PropertyValue::Reference(path),
                }
            }
            other => other,
        }
    }

    pub fn dependencies(&self, tree: &DslTree) -> Vec<ReferenceInjection> {
        self.element(tree)
            .map(|id| tree.get_dependencies(id))
            .unwrap_or_default()
    }

    pub fn is_modified(&self, tree: &DslTree) -> bool {
        self.element.is_some_and(|id| tree.has_pending_changes(id))
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Set a scalar, list or map value. `PropertyValue::None` deletes.
    pub fn set_value(&mut self, tree: &mut DslTree, value: impl Into<PropertyValue>) -> Result<(), DslError> {
        match value.into() {
            PropertyValue::None => self.delete(tree),
            PropertyValue::List(items) => {
                self.convert_to_empty_list(tree)?;
                items
                    .into_iter()
                    .try_for_each(|item| self.add_list_value(tree, item))
            }
            PropertyValue::Map(entries) => {
                self.convert_to_empty_map(tree)?;
                entries
                    .into_iter()
                    .try_for_each(|(key, value)| self.set_map_value(tree, &key, value))
            }
            other => {
                let literal = other
                    .to_literal()
                    .ok_or_else(|| DslError::unsupported(self.name.as_str(), "value has no literal form"))?;
                let transform = self.transform(tree).clone();
                let new = transform
                    .bind(tree, self.holder, self.element, &literal, &self.name)
                    .ok_or_else(|| DslError::inexpressible(self.name.as_str()))?;
                self.bind_to_new_element(tree, &transform, new)
            }
        }
    }

    /// Replace the value with an empty list
    pub fn convert_to_empty_list(&mut self, tree: &mut DslTree) -> Result<(), DslError> {
        let transform = self.transform(tree).clone();
        let new = transform
            .bind_list(tree, self.holder, self.element, &self.name)
            .ok_or_else(|| DslError::inexpressible(self.name.as_str()))?;
        self.bind_to_new_element(tree, &transform, new)
    }

    /// Append to the list value, creating the list if the property is unset
    pub fn add_list_value(&mut self, tree: &mut DslTree, value: impl Into<PropertyValue>) -> Result<(), DslError> {
        let value = value.into();
        let literal = value
            .to_literal()
            .ok_or_else(|| DslError::unsupported(self.name.as_str(), "list items must be scalars"))?;

        let list = match self.current(tree, Shape::List) {
            Some(list) => list,
            None if self.element.is_some() => {
                return Err(DslError::unsupported(self.name.as_str(), "the current value is not a list"));
            }
            // `proguardFiles 'a'` rather than `setProguardFiles(['a'])`
            None if matches!(self.transform(tree), PropertyTransform::ListOrVarargs { .. }) => {
                return self.set_value(tree, value);
            }
            None => {
                self.convert_to_empty_list(tree)?;
                self.current(tree, Shape::List)
                    .ok_or_else(|| DslError::inexpressible(self.name.as_str()))?
            }
        };

        let item = tree.new_literal(DslName::empty(), literal);
        tree.set_element_type(item, ElementType::Fake);
        let end = tree.children(list).len();
        tree.add_new_element_at(list, end, item)
    }

    /// Replace the value with an empty map
    pub fn convert_to_empty_map(&mut self, tree: &mut DslTree) -> Result<(), DslError> {
        let transform = self.transform(tree).clone();
        let new = transform
            .bind_map(tree, self.holder, self.element, &self.name)
            .ok_or_else(|| DslError::inexpressible(self.name.as_str()))?;
        self.bind_to_new_element(tree, &transform, new)
    }

    /// Set one key of the map value, creating the map if the property is
    /// unset. `PropertyValue::None` removes the key.
    pub fn set_map_value(
        &mut self,
        tree: &mut DslTree,
        key: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), DslError> {
        if matches!(self.transform(tree), PropertyTransform::Inexpressible) {
            return Err(DslError::inexpressible(self.name.as_str()));
        }
        let value = value.into();
        if value.is_none() {
            return self.remove_map_value(tree, key);
        }
        let literal = value
            .to_literal()
            .ok_or_else(|| DslError::unsupported(self.name.as_str(), "map values must be scalars"))?;

        let map = match self.current(tree, Shape::Map) {
            Some(map) => map,
            None if self.element.is_some() => {
                return Err(DslError::unsupported(self.name.as_str(), "the current value is not a map"));
            }
            None => {
                self.convert_to_empty_map(tree)?;
                self.current(tree, Shape::Map)
                    .ok_or_else(|| DslError::inexpressible(self.name.as_str()))?
            }
        };

        let mut entry = PropertyModel::with_transforms(
            map,
            key,
            tree.get_property_element(map, key),
            TransformRegistry::default(),
        );
        entry.set_value(tree, PropertyValue::from(literal))
    }

    /// Remove the first list item equal to `value`; a value the list does
    /// not hold is not an error
    pub fn remove_list_value(&mut self, tree: &mut DslTree, value: impl Into<PropertyValue>) -> Result<(), DslError> {
        let value = value.into();
        let Some(literal) = value.to_literal() else {
            return Err(DslError::unsupported(self.name.as_str(), "list items must be scalars"));
        };
        let Some(list) = self.current(tree, Shape::List) else {
            return Ok(());
        };
        let item = tree
            .children(list)
            .into_iter()
            .find(|&id| tree.element(id).literal() == Some(&literal));
        match item {
            Some(item) => {
                tree.remove_property(list, item)?;
                debug!(property = %self.name, "removed list item");
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Remove one key of the map value
    fn remove_map_value(&mut self, tree: &mut DslTree, key: &str) -> Result<(), DslError> {
        let Some(map) = self.current(tree, Shape::Map) else {
            return Ok(());
        };
        match tree.get_property_element(map, key) {
            Some(entry) => {
                tree.remove_property(map, entry)?;
                debug!(property = %self.name, key, "removed map entry");
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Remove the property's text
    pub fn delete(&mut self, tree: &mut DslTree) -> Result<(), DslError> {
        let Some(raw) = self.element else {
            return Ok(());
        };
        let transform = self.transform(tree).clone();
        let Some(transformed) = transform.transform(tree, Some(raw)) else {
            return Ok(());
        };
        self.element = transform.delete(tree, self.holder, raw, transformed)?;
        debug!(property = %self.name, "deleted");
        Ok(())
    }

    /// Make `new` the property's element, keeping the old element's
    /// spelling when the transform did not choose one.
    fn bind_to_new_element(
        &mut self,
        tree: &mut DslTree,
        transform: &PropertyTransform,
        new: ElementId,
    ) -> Result<(), DslError> {
        if self.element == Some(new) {
            return Ok(());
        }
        let old = self.element;
        let raw = transform.replace(tree, self.holder, old, new, &self.name)?;

        if let (Some(old), true) = (old, raw == new) {
            let element = tree.element(old);
            let (syntax, effect) = (element.external_syntax(), element.effect().copied());
            if tree.element(new).external_syntax() == ExternalSyntax::Unknown {
                tree.set_external_syntax(new, syntax);
            }
            let creates = effect.is_some_and(|e| e.semantics == SemanticsDescription::CreateWithValue);
            if tree.element(new).effect().is_none() && !creates {
                tree.set_effect(new, effect);
            }
        }
        tree.set_modified(raw);
        self.element = Some(raw);
        Ok(())
    }

    fn current(&self, tree: &DslTree, shape: Shape) -> Option<ElementId> {
        let id = self.element(tree)?;
        let matches = match (shape, tree.element(id).kind()) {
            (Shape::List, ElementKind::List { .. }) | (Shape::Map, ElementKind::Map { .. }) => true,
            _ => false,
        };
        matches.then_some(id)
    }
}

#[derive(Clone, Copy)]
enum Shape {
    List,
    Map,
}

/// Read an element's value; `decorate` applies to a top-level scalar
fn read(tree: &DslTree, id: ElementId, decorate: impl FnOnce(LiteralValue) -> LiteralValue) -> PropertyValue {
    match tree.element(id).kind() {
        ElementKind::Literal(value) => decorate(value.clone()).into(),
        _ => read_plain(tree, id),
    }
}

fn read_plain(tree: &DslTree, id: ElementId) -> PropertyValue {
    match tree.element(id).kind() {
        ElementKind::Literal(value) => value.clone().into(),
        ElementKind::List { .. } => PropertyValue::List(
            tree.children(id)
                .into_iter()
                .map(|item| read_plain(tree, item))
                .collect(),
        ),
        ElementKind::Map { .. } => PropertyValue::Map(
            tree.children(id)
                .into_iter()
                .map(|entry| (tree.element(entry).name().full(), read_plain(tree, entry)))
                .collect(),
        ),
        ElementKind::MethodCall { .. } | ElementKind::Infix { .. } | ElementKind::Block { .. } => {
            PropertyValue::Unknown
        }
    }
}
