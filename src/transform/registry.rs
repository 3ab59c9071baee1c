//! Ordered transform lists per property.

use super::PropertyTransform;
use crate::base::{Dialect, VersionConstraint};
use crate::dsl::{DslTree, ElementId};
use crate::semantics::properties;

static DEFAULT: PropertyTransform = PropertyTransform::Default;

const SPLIT_SDK_SINCE: VersionConstraint = VersionConstraint::agp_min(7, 0, 0);

/// Transforms a property can be seen through, most specific first. The
/// first one whose `test` passes is used; [`PropertyTransform::Default`]
/// when none does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformRegistry {
    transforms: Vec<PropertyTransform>,
}

impl TransformRegistry {
    pub fn new(transforms: Vec<PropertyTransform>) -> Self {
        Self { transforms }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyTransform> + '_ {
        self.transforms.iter()
    }

    pub fn select(&self, tree: &DslTree, element: Option<ElementId>, holder: ElementId) -> &PropertyTransform {
        self.transforms
            .iter()
            .find(|transform| transform.test(tree, element, holder))
            .unwrap_or(&DEFAULT)
    }

    /// The registry for a block property in `dialect`
    pub fn for_property(name: &str, dialect: Dialect) -> Self {
        let split_sdk = |generic, sdk, preview| PropertyTransform::SdkOrPreview {
            generic,
            sdk,
            preview,
            constraint: SPLIT_SDK_SINCE,
        };
        let map_property =
            name == properties::MANIFEST_PLACEHOLDERS.name || name == properties::TEST_INSTRUMENTATION_RUNNER_ARGUMENTS.name;
        let transforms = match name {
            _ if map_property && dialect == Dialect::Declarative => vec![PropertyTransform::Inexpressible],
            "compileSdkVersion" => vec![split_sdk("compileSdkVersion", "compileSdk", "compileSdkPreview")],
            "minSdkVersion" => vec![split_sdk("minSdkVersion", "minSdk", "minSdkPreview")],
            "targetSdkVersion" => vec![split_sdk("targetSdkVersion", "targetSdk", "targetSdkPreview")],
            "proguardFiles" => vec![PropertyTransform::ListOrVarargs {
                vararg: "proguardFiles",
                setter: "setProguardFiles",
            }],
            "consumerProguardFiles" => vec![PropertyTransform::ListOrVarargs {
                vararg: "consumerProguardFiles",
                setter: "setConsumerProguardFiles",
            }],
            "resConfigs" => vec![PropertyTransform::ListOrVarargs {
                vararg: "resConfigs",
                setter: "resConfigs",
            }],
            "signingConfig" => vec![PropertyTransform::KtsOnly(Box::new(
                PropertyTransform::SingleArgumentMethod {
                    method: "signingConfigs.getByName",
                },
            ))],
            "storeFile" | "projectDir" if dialect != Dialect::Declarative => {
                vec![PropertyTransform::SingleArgumentMethod { method: "file" }]
            }
            "include" => vec![PropertyTransform::ListOrVarargs {
                vararg: "include",
                setter: "include",
            }],
            _ => Vec::new(),
        };
        Self::new(transforms)
    }

    pub fn plugin_name() -> Self {
        Self::new(vec![PropertyTransform::PluginAlias, PropertyTransform::PluginName])
    }

    /// `version` or `apply` part of a plugin request
    pub fn plugin_part(slot: &'static str) -> Self {
        Self::new(vec![
            PropertyTransform::Infix { slot },
            PropertyTransform::LiteralToInfix { slot },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::DslName;
    use crate::semantics::BlockKind;

    #[test]
    fn test_falls_back_to_default() {
        let mut tree = DslTree::new(Dialect::Groovy, None);
        let block = tree.new_block(DslName::new("android"), BlockKind::Android);
        let root = tree.root();
        tree.add_parsed_element(root, block);
        let literal = tree.new_literal(DslName::new("namespace"), "x".into());
        tree.add_parsed_element(block, literal);

        let registry = TransformRegistry::for_property("namespace", Dialect::Groovy);
        assert_eq!(registry.select(&tree, Some(literal), block), &PropertyTransform::Default);

        let registry = TransformRegistry::for_property("proguardFiles", Dialect::Groovy);
        assert_eq!(registry.select(&tree, Some(literal), block), &PropertyTransform::Default);
        assert!(matches!(
            registry.select(&tree, None, block),
            PropertyTransform::ListOrVarargs { .. }
        ));
    }

    #[test]
    fn test_declarative_maps_are_inexpressible() {
        let registry = TransformRegistry::for_property("manifestPlaceholders", Dialect::Declarative);
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec![&PropertyTransform::Inexpressible]);
        let registry = TransformRegistry::for_property("manifestPlaceholders", Dialect::KotlinScript);
        assert_eq!(registry.iter().count(), 0);
    }
}
