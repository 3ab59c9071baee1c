use gradle_dsl::{Dialect, DslContext, DslError, PropertyValue};
use rstest::rstest;

use crate::helpers::build_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_map_collects_every_spelling_in_order() {
    let file = groovy(RUNNER_ARGUMENTS);
    let value = value_at(&file, &["android", "defaultConfig"], "testInstrumentationRunnerArguments");
    let map = value.as_map().expect("arguments should read as a map");
    let keys: Vec<_> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["key1", "key2", "key3", "key4", "key5", "key6", "key7"]);
    assert_eq!(map["key3"], "value3".into());
    assert_eq!(map["key7"], "value7".into());
}

#[rstest]
#[case(Dialect::Groovy, "manifestPlaceholders([a: 'b'])")]
#[case(Dialect::Groovy, "manifestPlaceholders = [a: 'b']")]
#[case(Dialect::KotlinScript, "manifestPlaceholders += mapOf(\"a\" to \"b\")")]
#[case(Dialect::KotlinScript, "manifestPlaceholders[\"a\"] = \"b\"")]
fn test_map_spellings_read_alike(#[case] dialect: Dialect, #[case] statement: &str) {
    let text = format!("android {{\n    defaultConfig {{\n        {statement}\n    }}\n}}\n");
    let file = build_file(&text, DslContext::new(dialect));
    let expected: PropertyValue = [("a", "b")].into_iter().collect();
    assert_eq!(
        value_at(&file, &["android", "defaultConfig"], "manifestPlaceholders"),
        expected
    );
}

#[test]
fn test_kts_indexed_entry_gets_a_sibling_line() {
    let text = "android {\n    defaultConfig {\n        manifestPlaceholders[\"a\"] = \"1\"\n    }\n}\n";
    let mut file = kts(text);
    let config = file.block(&["android", "defaultConfig"]).unwrap();
    let mut model = file.property(config, "manifestPlaceholders");
    model.set_map_value(file.tree_mut(), "b", "2").unwrap();
    assert_eq!(
        applied(&mut file),
        "android {\n    defaultConfig {\n        manifestPlaceholders[\"a\"] = \"1\"\n        manifestPlaceholders[\"b\"] = \"2\"\n    }\n}\n"
    );
}

#[test]
fn test_groovy_map_entry_update_and_insert() {
    let text = "android {\n    defaultConfig {\n        manifestPlaceholders = [a: '1']\n    }\n}\n";
    let mut file = groovy(text);
    let config = file.block(&["android", "defaultConfig"]).unwrap();
    let mut model = file.property(config, "manifestPlaceholders");
    model.set_map_value(file.tree_mut(), "a", "2").unwrap();
    model.set_map_value(file.tree_mut(), "b", "3").unwrap();
    let text = applied(&mut file);

    let expected: PropertyValue = [("a", "2"), ("b", "3")].into_iter().collect();
    let value = value_at(&file, &["android", "defaultConfig"], "manifestPlaceholders");
    assert_eq!(value, expected, "{text}");
    let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["a", "b"]);
}

#[test]
fn test_declarative_maps_are_inexpressible() {
    let text = "android {\n    defaultConfig {\n    }\n}\n";
    let mut file = build_file(text, DslContext::new(Dialect::Declarative));
    let config = file.block(&["android", "defaultConfig"]).unwrap();
    let mut model = file.property(config, "manifestPlaceholders");
    assert!(matches!(
        model.set_map_value(file.tree_mut(), "a", "b"),
        Err(DslError::Inexpressible { .. })
    ));
    assert!(!file.is_modified());
    assert_eq!(applied(&mut file), text);
}

#[rstest]
#[case(Dialect::Groovy)]
#[case(Dialect::KotlinScript)]
fn test_written_map_reads_back(#[case] dialect: Dialect) {
    let mut file = build_file("android {\n    defaultConfig {\n    }\n}\n", DslContext::new(dialect));
    let config = file.block(&["android", "defaultConfig"]).unwrap();
    let mut model = file.property(config, "manifestPlaceholders");
    model.set_map_value(file.tree_mut(), "a", "b").unwrap();
    let text = applied(&mut file);

    let reparsed = build_file(&text, DslContext::new(dialect));
    let expected: PropertyValue = [("a", "b")].into_iter().collect();
    assert_eq!(
        value_at(&reparsed, &["android", "defaultConfig"], "manifestPlaceholders"),
        expected,
        "{text}"
    );
}

#[test]
fn test_setting_none_removes_one_entry() {
    let text = "android {\n    defaultConfig {\n        manifestPlaceholders = [a: '1', b: '2']\n    }\n}\n";
    let mut file = groovy(text);
    let config = file.block(&["android", "defaultConfig"]).unwrap();
    let mut model = file.property(config, "manifestPlaceholders");
    model.set_map_value(file.tree_mut(), "a", PropertyValue::None).unwrap();
    model.set_map_value(file.tree_mut(), "missing", PropertyValue::None).unwrap();
    assert_eq!(applied(&mut file), text.replace("[a: '1', b: '2']", "[b: '2']"));

    let expected: PropertyValue = [("b", "2")].into_iter().collect();
    assert_eq!(
        value_at(&file, &["android", "defaultConfig"], "manifestPlaceholders"),
        expected
    );
}
