use gradle_dsl::{Dialect, PropertyValue};
use rstest::rstest;

use crate::helpers::build_helpers::*;
use crate::helpers::source_fixtures::*;

// ============================================================================
// Reads
// ============================================================================

#[rstest]
#[case(Dialect::Groovy, GROOVY_APP)]
#[case(Dialect::KotlinScript, KTS_APP)]
fn test_reads_app_properties(#[case] dialect: Dialect, #[case] text: &str) {
    let file = build_file(text, gradle_dsl::DslContext::new(dialect));
    assert_eq!(value_at(&file, &["android"], "namespace"), "com.example.app".into());
    assert_eq!(value_at(&file, &["android"], "compileSdkVersion"), 33.into());
    let config = ["android", "defaultConfig"];
    assert_eq!(value_at(&file, &config, "applicationId"), "com.example.app".into());
    assert_eq!(value_at(&file, &config, "versionCode"), 1.into());
    assert_eq!(value_at(&file, &config, "versionName"), "1.0".into());
    assert!(value_at(&file, &config, "minSdkVersion").is_none());
}

#[test]
fn test_reference_resolves_to_variable_value() {
    let file = groovy("def sdk = 33\nandroid {\n    compileSdkVersion sdk\n}\n");
    let android = file.block(&["android"]).unwrap();
    let model = file.property(android, "compileSdkVersion");
    assert_eq!(model.value(file.tree()), PropertyValue::reference("sdk"));
    assert_eq!(model.resolved_value(file.tree()), 33.into());
}

#[test]
fn test_reference_resolves_to_extra_delegate() {
    let file = kts("val sdk by extra(33)\nandroid {\n    compileSdk = sdk\n}\n");
    let android = file.block(&["android"]).unwrap();
    let model = file.property(android, "compileSdkVersion");
    assert_eq!(model.value(file.tree()), PropertyValue::reference("sdk"));
    assert_eq!(model.resolved_value(file.tree()), 33.into());
}

#[rstest]
#[case("proguardFiles 'a.pro', 'b.pro'")]
#[case("proguardFiles = ['a.pro', 'b.pro']")]
#[case("setProguardFiles(['a.pro', 'b.pro'])")]
fn test_groovy_list_spellings_read_alike(#[case] statement: &str) {
    let text = format!("android {{\n    buildTypes {{\n        release {{\n            {statement}\n        }}\n    }}\n}}\n");
    let file = groovy(&text);
    assert_eq!(
        value_at(&file, &["android", "buildTypes", "release"], "proguardFiles"),
        vec!["a.pro", "b.pro"].into()
    );
}

#[test]
fn test_kts_varargs_read_as_list() {
    let file = kts("android {\n    buildTypes {\n        getByName(\"release\") {\n            proguardFiles(\"a.pro\", \"b.pro\")\n        }\n    }\n}\n");
    assert_eq!(
        value_at(&file, &["android", "buildTypes", "release"], "proguardFiles"),
        vec!["a.pro", "b.pro"].into()
    );
}

// ============================================================================
// Writes
// ============================================================================

#[test]
fn test_single_change_touches_only_the_value() {
    let mut file = groovy(GROOVY_APP);
    set_at(&mut file, &["android", "defaultConfig"], "versionName", "1.1");
    assert!(file.is_modified());
    assert_eq!(applied(&mut file), GROOVY_APP.replace("'1.0'", "'1.1'"));
}

#[test]
fn test_kts_change_keeps_quotes_and_spacing() {
    let mut file = kts(KTS_APP);
    set_at(&mut file, &["android"], "namespace", "com.example.other");
    assert_eq!(
        applied(&mut file),
        KTS_APP.replace("namespace = \"com.example.app\"", "namespace = \"com.example.other\"")
    );
}

#[rstest]
#[case("8.1.0", "compileSdk = 33", "compileSdkVersion")]
#[case("4.2.0", "compileSdkVersion 33", "compileSdk =")]
fn test_sdk_spelling_follows_agp(#[case] agp: &str, #[case] written: &str, #[case] absent: &str) {
    let mut file = with_agp("android {\n    compileSdkVersion 30\n}\n", Dialect::Groovy, agp);
    set_at(&mut file, &["android"], "compileSdkVersion", 33);
    let text = applied(&mut file);
    assert!(text.contains(written), "expected '{written}' in:\n{text}");
    assert!(!text.contains(absent), "unexpected '{absent}' in:\n{text}");
    assert_eq!(value_at(&file, &["android"], "compileSdkVersion"), 33.into());
}

#[test]
fn test_preview_sdk_is_written_by_codename() {
    let mut file = with_agp("android {\n    compileSdkVersion 30\n}\n", Dialect::Groovy, "8.1.0");
    set_at(&mut file, &["android"], "compileSdkVersion", "android-T");
    let text = applied(&mut file);
    assert!(text.contains("compileSdkPreview = 'T'"), "{text}");
    assert_eq!(value_at(&file, &["android"], "compileSdkVersion"), "android-T".into());
}

#[test]
fn test_add_list_value_extends_varargs() {
    let text = "android {\n    buildTypes {\n        release {\n            proguardFiles 'a.pro', 'b.pro'\n        }\n    }\n}\n";
    let mut file = groovy(text);
    let release = file.block(&["android", "buildTypes", "release"]).unwrap();
    let mut model = file.property(release, "proguardFiles");
    model.add_list_value(file.tree_mut(), "c.pro").unwrap();
    assert_eq!(
        applied(&mut file),
        text.replace("'b.pro'", "'b.pro', 'c.pro'")
    );
    assert_eq!(
        value_at(&file, &["android", "buildTypes", "release"], "proguardFiles"),
        vec!["a.pro", "b.pro", "c.pro"].into()
    );
}

#[rstest]
#[case(
    "proguardFiles 'a.pro'\n            proguardFile 'b.pro'",
    "proguardFiles 'a.pro'\n            proguardFile 'b.pro'\n            proguardFile 'c.pro'"
)]
#[case(
    "proguardFile 'a.pro'\n            proguardFiles 'b.pro'",
    "proguardFile 'a.pro'\n            proguardFiles 'b.pro', 'c.pro'"
)]
fn test_add_list_value_after_merged_statements(#[case] statements: &str, #[case] expected: &str) {
    let wrap = |body: &str| {
        format!("android {{\n    buildTypes {{\n        release {{\n            {body}\n        }}\n    }}\n}}\n")
    };
    let mut file = groovy(&wrap(statements));
    let release = ["android", "buildTypes", "release"];
    assert_eq!(value_at(&file, &release, "proguardFiles"), vec!["a.pro", "b.pro"].into());

    let block = file.block(&release).unwrap();
    let mut model = file.property(block, "proguardFiles");
    model.add_list_value(file.tree_mut(), "c.pro").unwrap();
    assert_eq!(applied(&mut file), wrap(expected));
    assert_eq!(
        value_at(&file, &release, "proguardFiles"),
        vec!["a.pro", "b.pro", "c.pro"].into()
    );
}

#[test]
fn test_remove_list_value() {
    let text = "android {\n    defaultConfig {\n        resConfigs 'en', 'fr'\n    }\n}\n";
    let mut file = groovy(text);
    let config = file.block(&["android", "defaultConfig"]).unwrap();
    let mut model = file.property(config, "resConfigs");
    model.remove_list_value(file.tree_mut(), "de").unwrap();
    assert!(!file.is_modified());

    model.remove_list_value(file.tree_mut(), "en").unwrap();
    assert_eq!(applied(&mut file), text.replace("'en', 'fr'", "'fr'"));
    assert_eq!(
        value_at(&file, &["android", "defaultConfig"], "resConfigs"),
        vec!["fr"].into()
    );
}

#[test]
fn test_delete_last_property_removes_block() {
    let text = "plugins {\n    id 'com.android.application'\n}\nandroid {\n    namespace 'a'\n    defaultConfig {\n        applicationId 'com.example'\n    }\n}\n";
    let mut file = groovy(text);
    let config = file.block(&["android", "defaultConfig"]).unwrap();
    let mut model = file.property(config, "applicationId");
    model.delete(file.tree_mut()).unwrap();
    assert_eq!(
        applied(&mut file),
        "plugins {\n    id 'com.android.application'\n}\nandroid {\n    namespace 'a'\n}\n"
    );
    assert!(file.block(&["android", "defaultConfig"]).is_none());
}

#[test]
fn test_setting_none_deletes() {
    let mut file = groovy("android {\n    namespace 'a'\n    compileSdkVersion 33\n}\n");
    set_at(&mut file, &["android"], "namespace", PropertyValue::None);
    assert_eq!(applied(&mut file), "android {\n    compileSdkVersion 33\n}\n");
}

#[rstest]
#[case(Dialect::Groovy)]
#[case(Dialect::KotlinScript)]
fn test_written_values_read_back(#[case] dialect: Dialect) {
    let mut file = build_file("android {\n}\n", gradle_dsl::DslContext::new(dialect));
    let config = ["android", "defaultConfig"];
    set_at(&mut file, &config, "applicationId", "com.example.app");
    set_at(&mut file, &config, "versionCode", 7);
    let release = ["android", "buildTypes", "release"];
    set_at(&mut file, &release, "proguardFiles", vec!["a.pro", "b.pro"]);
    let text = applied(&mut file);

    let file = build_file(&text, gradle_dsl::DslContext::new(dialect));
    assert_eq!(value_at(&file, &config, "applicationId"), "com.example.app".into(), "{text}");
    assert_eq!(value_at(&file, &config, "versionCode"), 7.into(), "{text}");
    assert_eq!(
        value_at(&file, &release, "proguardFiles"),
        vec!["a.pro", "b.pro"].into(),
        "{text}"
    );
}
