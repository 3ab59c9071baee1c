//! Version catalogs (`gradle/libs.versions.toml`).
//!
//! Only the parts build scripts reach through plugin aliases are read:
//! `[versions]` and `[plugins]`. A catalog is lowered into a detached,
//! derived subtree of the element tree so that `libs.plugins.foo` resolves
//! like any other reference:
//!
//! ```text
//! libs                       (derived block)
//!   plugins.android.app      (derived map)
//!     id      = "com.android.application"
//!     version = "8.1.0"
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use smol_str::SmolStr;
use tracing::debug;

use crate::dsl::{DslName, DslTree, ElementId, ElementType, LiteralValue};
use crate::error::DslError;
use crate::semantics::BlockKind;

/// Characters that separate accessor segments in an alias
const ALIAS_SEPARATORS: &[char] = &['-', '_', '.'];

// ============================================================================
// TOML SCHEMA
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    versions: IndexMap<String, VersionEntry>,
    #[serde(default)]
    plugins: IndexMap<String, PluginEntry>,
}

/// `agp = "8.1.0"` or `agp = { strictly = "8.1.0" }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VersionEntry {
    Plain(String),
    Rich(RichVersion),
}

#[derive(Debug, Deserialize)]
struct RichVersion {
    #[serde(default)]
    strictly: Option<String>,
    #[serde(default)]
    require: Option<String>,
    #[serde(default)]
    prefer: Option<String>,
}

impl RichVersion {
    fn preferred(&self) -> Option<&str> {
        self.strictly
            .as_deref()
            .or(self.require.as_deref())
            .or(self.prefer.as_deref())
    }
}

/// `"id:version"` or `{ id = "..", version = ".." | version.ref = ".." }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PluginEntry {
    Notation(String),
    Table {
        id: String,
        #[serde(default)]
        version: Option<PluginVersion>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PluginVersion {
    Literal(String),
    Ref {
        #[serde(rename = "ref")]
        reference: String,
    },
    Rich(RichVersion),
}

// ============================================================================
// CATALOG
// ============================================================================

/// A plugin declared in a catalog, its version resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPlugin {
    pub alias: SmolStr,
    pub id: String,
    pub version: Option<String>,
}

/// A parsed version catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCatalog {
    name: SmolStr,
    versions: IndexMap<SmolStr, String>,
    plugins: IndexMap<SmolStr, CatalogPlugin>,
}

impl VersionCatalog {
    /// Parse a catalog that build scripts reach as `name` (usually `libs`)
    pub fn from_toml_str(name: &str, text: &str) -> Result<Self, DslError> {
        let file: CatalogFile = toml::from_str(text)?;

        let mut versions = IndexMap::new();
        for (alias, entry) in file.versions {
            let version = match entry {
                VersionEntry::Plain(version) => version,
                VersionEntry::Rich(rich) => match rich.preferred() {
                    Some(version) => version.to_string(),
                    None => continue,
                },
            };
            versions.insert(SmolStr::new(alias), version);
        }

        let mut plugins = IndexMap::new();
        for (alias, entry) in file.plugins {
            let (id, version) = match entry {
                PluginEntry::Notation(notation) => match notation.split_once(':') {
                    Some((id, version)) => (id.to_string(), Some(version.to_string())),
                    None => {
                        return Err(DslError::InvalidCatalog(format!(
                            "plugin '{alias}' must be written as 'id:version', found '{notation}'"
                        )));
                    }
                },
                PluginEntry::Table { id, version } => {
                    let version = match version {
                        None => None,
                        Some(PluginVersion::Literal(version)) => Some(version),
                        Some(PluginVersion::Rich(rich)) => rich.preferred().map(str::to_string),
                        Some(PluginVersion::Ref { reference }) => match versions.get(reference.as_str()) {
                            Some(version) => Some(version.clone()),
                            None => {
                                return Err(DslError::InvalidCatalog(format!(
                                    "plugin '{alias}' refers to unknown version '{reference}'"
                                )));
                            }
                        },
                    };
                    (id, version)
                }
            };
            let alias = SmolStr::new(alias);
            plugins.insert(
                alias.clone(),
                CatalogPlugin { alias, id, version },
            );
        }

        debug!(catalog = name, versions = versions.len(), plugins = plugins.len(), "parsed version catalog");
        Ok(Self {
            name: SmolStr::new(name),
            versions,
            plugins,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    /// A plugin by alias; `kotlin-android`, `kotlin_android` and
    /// `kotlin.android` name the same plugin
    pub fn plugin(&self, alias: &str) -> Option<&CatalogPlugin> {
        let wanted = accessor(alias);
        self.plugins.values().find(|plugin| accessor(&plugin.alias) == wanted)
    }

    pub fn plugins(&self) -> impl Iterator<Item = &CatalogPlugin> + '_ {
        self.plugins.values()
    }

    /// Lower into `tree` as a detached derived subtree and register it under
    /// the catalog's name. Returns the subtree root.
    pub fn lower_into(&self, tree: &mut DslTree) -> ElementId {
        let root = tree.new_block(DslName::single(self.name.clone()), BlockKind::Generic);
        tree.set_element_type(root, ElementType::Derived);

        for plugin in self.plugins.values() {
            let path = std::iter::once(SmolStr::new_static("plugins")).chain(accessor(&plugin.alias));
            let map = tree.new_map(DslName::from_parts(path), false);
            tree.set_element_type(map, ElementType::Derived);

            let id = tree.new_literal(DslName::single("id"), LiteralValue::from(plugin.id.as_str()));
            tree.set_element_type(id, ElementType::Derived);
            tree.add_parsed_element(map, id);

            if let Some(version) = &plugin.version {
                let version = tree.new_literal(DslName::single("version"), LiteralValue::from(version.as_str()));
                tree.set_element_type(version, ElementType::Derived);
                tree.add_parsed_element(map, version);
            }
            tree.add_parsed_element(root, map);
        }

        tree.register_catalog(&self.name, root);
        root
    }
}

/// Accessor segments of an alias: `android-application` → `android`, `application`
fn accessor(alias: &str) -> Vec<SmolStr> {
    alias
        .split(ALIAS_SEPARATORS)
        .filter(|segment| !segment.is_empty())
        .map(SmolStr::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Dialect;

    const CATALOG: &str = r#"
[versions]
agp = "8.1.0"
kotlin = { strictly = "1.9.0" }

[libraries]
junit = "junit:junit:4.13.2"

[plugins]
android-application = { id = "com.android.application", version.ref = "agp" }
kotlin_android = { id = "org.jetbrains.kotlin.android", version.ref = "kotlin" }
detekt = "io.gitlab.arturbosch.detekt:1.23.0"
local = { id = "com.example.local" }
"#;

    #[test]
    fn test_plugin_forms() {
        let catalog = VersionCatalog::from_toml_str("libs", CATALOG).unwrap();
        let app = catalog.plugin("android.application").unwrap();
        assert_eq!(app.id, "com.android.application");
        assert_eq!(app.version.as_deref(), Some("8.1.0"));

        assert_eq!(catalog.plugin("kotlin-android").unwrap().version.as_deref(), Some("1.9.0"));
        assert_eq!(catalog.plugin("detekt").unwrap().id, "io.gitlab.arturbosch.detekt");
        assert_eq!(catalog.plugin("local").unwrap().version, None);
        assert_eq!(catalog.version("agp"), Some("8.1.0"));
        assert!(catalog.plugin("missing").is_none());
    }

    #[test]
    fn test_unknown_version_ref() {
        let text = "[plugins]\nfoo = { id = \"foo\", version.ref = \"nope\" }\n";
        assert!(matches!(
            VersionCatalog::from_toml_str("libs", text),
            Err(DslError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            VersionCatalog::from_toml_str("libs", "[plugins\n"),
            Err(DslError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_lowered_aliases_resolve() {
        let catalog = VersionCatalog::from_toml_str("libs", CATALOG).unwrap();
        let mut tree = DslTree::new(Dialect::KotlinScript, None);
        let root = catalog.lower_into(&mut tree);
        assert_eq!(tree.catalog("libs"), Some(root));

        let entry = tree
            .resolve_reference(tree.root(), "libs.plugins.android.application")
            .unwrap();
        assert_eq!(tree.element(entry).element_type(), ElementType::Derived);
        let id = tree.get_property_element(entry, "id").unwrap();
        assert_eq!(
            tree.element(id).literal(),
            Some(&LiteralValue::from("com.android.application"))
        );
        assert!(tree.resolve_reference(tree.root(), "libs.plugins.kotlin.android").is_some());
        assert!(tree.resolve_reference(tree.root(), "libs.plugins.kotlin").is_none());
    }
}
