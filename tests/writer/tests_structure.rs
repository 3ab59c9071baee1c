use gradle_dsl::semantics::BlockKind;
use gradle_dsl::{Dialect, DslName, WriterOptions};

use crate::helpers::build_helpers::*;

#[test]
fn test_groovy_blocks_are_materialized() {
    let text = "plugins {\n    id 'com.android.application'\n}\n";
    let mut file = groovy(text);
    set_at(&mut file, &["android", "defaultConfig"], "applicationId", "com.example");
    assert_eq!(
        applied(&mut file),
        "plugins {\n    id 'com.android.application'\n}\nandroid {\n    defaultConfig {\n        applicationId 'com.example'\n    }\n}\n"
    );
}

#[test]
fn test_kts_named_build_type_is_created() {
    let mut file = kts("android {\n}\n");
    set_at(&mut file, &["android", "buildTypes", "staging"], "applicationIdSuffix", ".staging");
    assert_eq!(
        applied(&mut file),
        "android {\n    buildTypes {\n        create(\"staging\") {\n            applicationIdSuffix = \".staging\"\n        }\n    }\n}\n"
    );
    assert_eq!(
        value_at(&file, &["android", "buildTypes", "staging"], "applicationIdSuffix"),
        ".staging".into()
    );
}

#[test]
fn test_new_block_follows_leading_comments() {
    let text = "// header\n\napply plugin: 'x'\n";
    let mut file = groovy(text);
    let root = file.root();
    let tree = file.tree_mut();
    let android = tree.new_block(DslName::new("android"), BlockKind::Android);
    tree.add_new_element_at(root, 0, android).unwrap();
    let mut namespace = file.property(android, "namespace");
    namespace.set_value(file.tree_mut(), "a").unwrap();
    assert_eq!(
        applied(&mut file),
        "// header\n\nandroid {\n    namespace 'a'\n}\napply plugin: 'x'\n"
    );
}

#[test]
fn test_closing_brace_leaves_new_statement_line() {
    let mut file = with_agp("android{namespace 'a'}\n", Dialect::Groovy, "4.2.0");
    set_at(&mut file, &["android"], "compileSdkVersion", 33);
    assert_eq!(
        applied(&mut file),
        "android{namespace 'a'\n    compileSdkVersion 33\n}\n"
    );
    assert_eq!(value_at(&file, &["android"], "namespace"), "a".into());
}

#[test]
fn test_dotted_statements_get_dotted_siblings() {
    let mut file = with_agp("android.defaultConfig.minSdkVersion 21\n", Dialect::Groovy, "4.2.0");
    set_at(&mut file, &["android", "defaultConfig"], "targetSdkVersion", 33);
    assert_eq!(
        applied(&mut file),
        "android.defaultConfig.minSdkVersion 21\nandroid.defaultConfig.targetSdkVersion 33\n"
    );
}

#[test]
fn test_move_swaps_statements() {
    let mut file = groovy("android {\n    namespace 'a'\n    compileSdkVersion 33\n}\n");
    let android = file.block(&["android"]).unwrap();
    let namespace = file.property(android, "namespace").raw_element().unwrap();
    file.tree_mut().move_element_to(android, namespace, 1).unwrap();
    assert!(file.tree().element(namespace).backing().is_none());
    assert_eq!(
        applied(&mut file),
        "android {\n    compileSdkVersion 33\n    namespace 'a'\n}\n"
    );
}

#[test]
fn test_tab_indentation_option() {
    let options = WriterOptions {
        insert_spaces: false,
        ..WriterOptions::default()
    };
    let mut file = kts("android {\n}\n").with_writer_options(options);
    set_at(&mut file, &["android"], "namespace", "a");
    assert_eq!(applied(&mut file), "android {\n\tnamespace = \"a\"\n}\n");
}
