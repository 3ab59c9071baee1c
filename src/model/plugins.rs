//! Plugin requests in `plugins { }` and `apply plugin:` statements.

use super::{PropertyModel, PropertyValue};
use crate::dsl::{DslTree, ElementId, ElementKind, ElementType, LiteralValue};
use crate::error::DslError;
use crate::semantics::BlockKind;
use crate::transform::{PropertyTransform, TransformRegistry};

const REQUEST_NAMES: &[&str] = &["id", "kotlin", "alias"];

/// One plugin request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginModel {
    holder: ElementId,
    element: ElementId,
}

impl PluginModel {
    /// Every request of the file, `plugins { }` first, in source order.
    /// The `plugins { }` of a settings script's `pluginManagement { }`
    /// counts too.
    pub fn collect(tree: &DslTree) -> Vec<Self> {
        let root = tree.root();
        let mut plugins = Vec::new();
        for block in tree.children(root) {
            let blocks = match tree.block_kind(block) {
                Some(BlockKind::Plugins) => vec![block],
                Some(BlockKind::PluginManagement) => tree
                    .children(block)
                    .into_iter()
                    .filter(|&inner| tree.block_kind(inner) == Some(BlockKind::Plugins))
                    .collect(),
                _ => continue,
            };
            for block in blocks {
                plugins.extend(
                    tree.children(block)
                        .into_iter()
                        .filter(|&id| is_request(tree, id))
                        .map(|element| Self { holder: block, element }),
                );
            }
        }
        plugins.extend(
            tree.children(root)
                .into_iter()
                .filter(|&id| is_apply_map(tree, id))
                .map(|element| Self { holder: root, element }),
        );
        plugins
    }

    /// Append `id 'x'` to a plugins block
    pub fn add(tree: &mut DslTree, plugins: ElementId, id: &str) -> Result<Self, DslError> {
        let transform = PropertyTransform::PluginName;
        let value = LiteralValue::from(id);
        let Some(new) = transform.bind(tree, plugins, None, &value, "id") else {
            return Err(DslError::inexpressible("id"));
        };
        let element = transform.replace(tree, plugins, None, new, "id")?;
        tree.set_modified(element);
        Ok(Self {
            holder: plugins,
            element,
        })
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn name(&self) -> PropertyModel {
        PropertyModel::with_transforms(self.holder, "id", Some(self.element), TransformRegistry::plugin_name())
    }

    pub fn version(&self) -> PropertyModel {
        self.part("version")
    }

    pub fn apply(&self) -> PropertyModel {
        self.part("apply")
    }

    fn part(&self, slot: &'static str) -> PropertyModel {
        PropertyModel::with_transforms(self.holder, slot, Some(self.element), TransformRegistry::plugin_part(slot))
    }

    /// The plugin id, `None` when it cannot be determined
    pub fn id(&self, tree: &DslTree) -> Option<String> {
        match self.name().value(tree) {
            PropertyValue::String(id) => Some(id),
            _ => None,
        }
    }

    /// The version written on the request, else the catalog version an
    /// alias points to
    pub fn resolved_version(&self, tree: &DslTree) -> PropertyValue {
        let written = self.version().value(tree);
        if !written.is_none() {
            return written;
        }
        let catalog_entry = self
            .name()
            .element(tree)
            .and_then(|id| tree.parent(id))
            .filter(|&map| tree.element(map).element_type() == ElementType::Derived);
        match catalog_entry.and_then(|map| tree.get_property_element(map, "version")) {
            Some(version) => tree
                .element(version)
                .literal()
                .cloned()
                .map_or(PropertyValue::Unknown, PropertyValue::from),
            None => PropertyValue::None,
        }
    }

    pub fn set_id(&mut self, tree: &mut DslTree, id: &str) -> Result<(), DslError> {
        let mut model = self.name();
        model.set_value(tree, id)?;
        self.follow(&model);
        Ok(())
    }

    pub fn set_version(&mut self, tree: &mut DslTree, version: &str) -> Result<(), DslError> {
        let mut model = self.version();
        model.set_value(tree, version)?;
        self.follow(&model);
        Ok(())
    }

    pub fn set_apply(&mut self, tree: &mut DslTree, apply: bool) -> Result<(), DslError> {
        let mut model = self.apply();
        model.set_value(tree, apply)?;
        self.follow(&model);
        Ok(())
    }

    /// Remove the whole request
    pub fn delete(self, tree: &mut DslTree) -> Result<(), DslError> {
        let parent = tree.parent(self.element).unwrap_or(self.holder);
        tree.remove_property(parent, self.element)
    }

    fn follow(&mut self, model: &PropertyModel) {
        if let Some(element) = model.raw_element() {
            self.element = element;
        }
    }
}

fn is_request(tree: &DslTree, id: ElementId) -> bool {
    let element = tree.element(id);
    match element.kind() {
        ElementKind::Literal(_) => {
            element.is_bare_name() || REQUEST_NAMES.contains(&element.name().full().as_str())
        }
        ElementKind::MethodCall { method, .. } => REQUEST_NAMES.contains(&method.as_str()),
        ElementKind::Infix { .. } => true,
        _ => false,
    }
}

fn is_apply_map(tree: &DslTree, id: ElementId) -> bool {
    let element = tree.element(id);
    matches!(element.kind(), ElementKind::Map { literal: false, .. })
        && element.name().full() == "apply"
        && tree.get_property_element(id, "plugin").is_some()
}
