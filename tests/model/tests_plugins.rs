use gradle_dsl::{Dialect, DslContext, PluginModel, PropertyValue, VersionCatalog};
use rstest::rstest;

use crate::helpers::build_helpers::*;
use crate::helpers::source_fixtures::*;

#[rstest]
#[case(Dialect::Groovy, "apply plugin: 'foo'\n")]
#[case(Dialect::Groovy, "plugins {\n    id 'foo'\n}\n")]
#[case(Dialect::Groovy, "plugins {\n    id('foo')\n}\n")]
#[case(Dialect::KotlinScript, "plugins {\n    id(\"foo\")\n}\n")]
#[case(Dialect::KotlinScript, "apply(plugin = \"foo\")\n")]
#[case(Dialect::KotlinScript, "plugins {\n    `foo`\n}\n")]
fn test_plugin_forms_read_alike(#[case] dialect: Dialect, #[case] text: &str) {
    let file = build_file(text, DslContext::new(dialect));
    let plugins = file.plugins();
    assert_eq!(plugins.len(), 1, "{text}");
    assert_eq!(plugins[0].id(file.tree()).as_deref(), Some("foo"));
}

#[test]
fn test_catalog_alias_resolves_id_and_version() {
    let catalog = VersionCatalog::from_toml_str("libs", CATALOG).unwrap();
    let context = DslContext::new(Dialect::KotlinScript).with_catalog(catalog);
    let file = build_file(
        "plugins {\n    alias(libs.plugins.foo)\n    alias(libs.plugins.android.application)\n}\n",
        context,
    );
    let plugins = file.plugins();
    let ids: Vec<_> = plugins.iter().map(|p| p.id(file.tree())).collect();
    assert_eq!(
        ids,
        [Some("foo".to_string()), Some("com.android.application".to_string())]
    );
    assert_eq!(plugins[0].resolved_version(file.tree()), "3.0".into());
    assert_eq!(plugins[1].resolved_version(file.tree()), "8.1.0".into());
}

#[test]
fn test_infix_parts() {
    let file = groovy("plugins {\n    id 'foo' version '1.0' apply false\n}\n");
    let plugin = file.plugins()[0];
    assert_eq!(plugin.id(file.tree()).as_deref(), Some("foo"));
    assert_eq!(plugin.version().value(file.tree()), "1.0".into());
    assert_eq!(plugin.apply().value(file.tree()), PropertyValue::Boolean(false));
}

#[test]
fn test_set_version_on_infix() {
    let mut file = groovy("plugins {\n    id 'foo' version '1.0'\n}\n");
    let mut plugin = file.plugins()[0];
    plugin.set_version(file.tree_mut(), "2.0").unwrap();
    assert_eq!(applied(&mut file), "plugins {\n    id 'foo' version '2.0'\n}\n");
}

#[test]
fn test_add_and_delete_plugins() {
    let mut file = groovy("plugins {\n    id 'com.android.application'\n}\n");
    let block = file.block(&["plugins"]).unwrap();
    PluginModel::add(file.tree_mut(), block, "bar").unwrap();
    applied(&mut file);
    let ids: Vec<_> = file.plugins().iter().filter_map(|p| p.id(file.tree())).collect();
    assert_eq!(ids, ["com.android.application", "bar"]);

    let first = file.plugins()[0];
    first.delete(file.tree_mut()).unwrap();
    let text = applied(&mut file);
    let ids: Vec<_> = file.plugins().iter().filter_map(|p| p.id(file.tree())).collect();
    assert_eq!(ids, ["bar"], "{text}");
}

#[test]
fn test_bare_kts_requests() {
    let mut file = kts("plugins {\n    `java-library`\n    java\n}\n");
    let ids: Vec<_> = file.plugins().iter().filter_map(|p| p.id(file.tree())).collect();
    assert_eq!(ids, ["java-library", "java"]);

    let mut first = file.plugins()[0];
    first.set_id(file.tree_mut(), "bar").unwrap();
    let text = applied(&mut file);
    let ids: Vec<_> = file.plugins().iter().filter_map(|p| p.id(file.tree())).collect();
    assert_eq!(ids, ["bar", "java"], "{text}");
}
