//! Mapping between model property names and the names and statement shapes
//! used to write them.
//!
//! Forward lookup (`external_name_for_parent`) picks how a property should be
//! written under a holder block; reverse lookup (`model_effect`) tells the
//! lowering pass which property a statement acts on.

use smol_str::SmolStr;

use crate::dsl::{DslTree, ElementId, ExternalSyntax};
use crate::semantics::{ModelEffectDescription, ModelPropertyDescription, SemanticsDescription};

/// The name and statement shape chosen for one property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalNameInfo {
    pub name: SmolStr,
    pub syntax: ExternalSyntax,
}

impl ExternalNameInfo {
    pub fn new(name: impl Into<SmolStr>, syntax: ExternalSyntax) -> Self {
        Self {
            name: name.into(),
            syntax,
        }
    }
}

/// How `model_name` should be written under `holder`.
///
/// Entries are scanned in declaration order. The first method-class entry
/// wins outright; otherwise the last assignment-class entry does. Entries
/// rejected by the active AGP version are skipped.
pub fn external_name_for_parent(tree: &DslTree, model_name: &str, holder: ElementId) -> ExternalNameInfo {
    let map = tree.external_to_model_map(holder);
    let version = tree.agp_version();
    let mut candidate = None;

    for entry in map.iter() {
        let effect = &entry.effect;
        if effect.property.name != model_name || !effect.is_ok_with(version) {
            continue;
        }
        if effect.semantics.is_method_class() {
            return ExternalNameInfo::new(entry.name, ExternalSyntax::Method);
        }
        match effect.semantics {
            SemanticsDescription::Val if effect.property.ty.is_collection() => {
                candidate = Some(ExternalNameInfo::new(
                    entry.name,
                    ExternalSyntax::AugmentedAssignment,
                ));
            }
            SemanticsDescription::Var | SemanticsDescription::VwoProperty => {
                candidate = Some(ExternalNameInfo::new(entry.name, ExternalSyntax::Assignment));
            }
            _ => {}
        }
    }

    candidate.unwrap_or_else(|| ExternalNameInfo::new(model_name, ExternalSyntax::Unknown))
}

/// The property an external name refers to under `holder`, any arity
pub fn model_description_for_parent(
    tree: &DslTree,
    external_name: &str,
    holder: ElementId,
) -> Option<ModelPropertyDescription> {
    tree.external_to_model_map(holder)
        .iter()
        .find(|entry| entry.name == external_name)
        .map(|entry| entry.effect.property)
}

/// The effect of writing `external_name` with `args` arguments (`None` for
/// an assignment) under `holder`. Version constraints are not applied: text
/// that exists is always understood.
pub fn model_effect(
    tree: &DslTree,
    external_name: &str,
    args: Option<usize>,
    holder: ElementId,
) -> Option<ModelEffectDescription> {
    tree.external_to_model_map(holder)
        .iter()
        .find(|entry| entry.name == external_name && entry.arity.accepts(args))
        .map(|entry| entry.effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{AgpVersion, Dialect};
    use crate::dsl::DslName;
    use crate::semantics::BlockKind;
    use rstest::rstest;

    fn holder(dialect: Dialect, kind: BlockKind, agp: Option<AgpVersion>) -> (DslTree, ElementId) {
        let mut tree = DslTree::new(dialect, agp);
        let block = tree.new_block(DslName::new("block"), kind);
        let root = tree.root();
        tree.add_parsed_element(root, block);
        (tree, block)
    }

    #[rstest]
    #[case(Dialect::Groovy, "minSdkVersion", "minSdkVersion", ExternalSyntax::Method)]
    #[case(Dialect::KotlinScript, "minSdkVersion", "minSdkVersion", ExternalSyntax::Method)]
    #[case(Dialect::KotlinScript, "applicationId", "applicationId", ExternalSyntax::Assignment)]
    #[case(
        Dialect::KotlinScript,
        "manifestPlaceholders",
        "manifestPlaceholders",
        ExternalSyntax::AugmentedAssignment
    )]
    #[case(Dialect::Groovy, "proguardFiles", "proguardFiles", ExternalSyntax::Method)]
    #[case(Dialect::Declarative, "versionCode", "versionCode", ExternalSyntax::Assignment)]
    #[case(Dialect::Groovy, "unknownThing", "unknownThing", ExternalSyntax::Unknown)]
    fn test_external_name(
        #[case] dialect: Dialect,
        #[case] model: &str,
        #[case] expected: &str,
        #[case] syntax: ExternalSyntax,
    ) {
        let (tree, block) = holder(dialect, BlockKind::DefaultConfig, None);
        let info = external_name_for_parent(&tree, model, block);
        assert_eq!(info, ExternalNameInfo::new(expected, syntax));
    }

    #[test]
    fn test_version_constraint_filters_entries() {
        let (tree, block) = holder(Dialect::KotlinScript, BlockKind::Android, Some(AgpVersion::new(4, 2, 0)));
        let info = external_name_for_parent(&tree, "compileSdkVersion", block);
        assert_eq!(info.name, "compileSdkVersion");
    }

    #[test]
    fn test_declarative_never_uses_methods() {
        let (tree, block) = holder(Dialect::Declarative, BlockKind::DefaultConfig, None);
        let info = external_name_for_parent(&tree, "minSdkVersion", block);
        assert_eq!(info.syntax, ExternalSyntax::Assignment);
    }

    #[test]
    fn test_reverse_lookup() {
        let (tree, block) = holder(Dialect::Groovy, BlockKind::DefaultConfig, None);
        let effect = model_effect(&tree, "proguardFile", Some(1), block).unwrap();
        assert_eq!(effect.property.name, "proguardFiles");
        assert_eq!(effect.semantics, SemanticsDescription::AugmentList);
        assert!(model_effect(&tree, "proguardFile", None, block).is_none());
        assert_eq!(
            model_description_for_parent(&tree, "setProguardFiles", block).map(|p| p.name),
            Some("proguardFiles")
        );
    }
}
