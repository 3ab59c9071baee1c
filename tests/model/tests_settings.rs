use std::path::{Path, PathBuf};

use gradle_dsl::semantics::BlockKind;
use gradle_dsl::{BuildFile, Dialect, SettingsModel};
use rstest::rstest;

use crate::helpers::build_helpers::*;

const MODULE_DIRECTORIES: &str = "\
include ':app', ':libs', ':libs:mylibrary', ':olibs', ':olibs:mylibrary', ':notamodule:deepmodule'
project(':libs:mylibrary').projectDir = file('xyz/mylibrary')
project(':olibs').projectDir = file('otherlibs')
";

fn model(file: &BuildFile) -> SettingsModel {
    file.settings().expect("settings script should have a settings model")
}

fn paths(file: &BuildFile) -> Vec<String> {
    model(file).module_paths(file.tree())
}

// ============================================================================
// Module paths
// ============================================================================

#[rstest]
#[case(Dialect::Groovy, "include ':app', ':lib'\ninclude 'lib:subLib'\n")]
#[case(Dialect::KotlinScript, "include(\":app\", \":lib\")\ninclude(\"lib:subLib\")\n")]
fn test_included_module_paths(#[case] dialect: Dialect, #[case] text: &str) {
    let file = settings_file(text, dialect);
    assert_eq!(paths(&file), [":", ":app", ":lib", ":lib:subLib"]);
    assert!(model(&file).contains(file.tree(), "lib:subLib"));
}

#[test]
fn test_build_script_has_no_settings_model() {
    assert!(groovy("include ':app'\n").settings().is_none());
}

#[rstest]
#[case(Dialect::Groovy, "include ':app', ':lib'\n", "include ':app', ':lib', ':lib1'\n")]
#[case(Dialect::KotlinScript, "include(\":app\", \":lib\")\n", "include(\":app\", \":lib\", \":lib1\")\n")]
fn test_add_and_apply_module_path(#[case] dialect: Dialect, #[case] text: &str, #[case] expected: &str) {
    let mut file = settings_file(text, dialect);
    let settings = model(&file);
    settings.add_module_path(file.tree_mut(), "lib1").unwrap();
    assert_eq!(paths(&file), [":", ":app", ":lib", ":lib1"]);
    assert_eq!(applied(&mut file), expected);
    assert_eq!(paths(&file), [":", ":app", ":lib", ":lib1"]);
}

#[rstest]
#[case(Dialect::Groovy, "include ':app'\n")]
#[case(Dialect::KotlinScript, "include(\":app\")\n")]
fn test_add_first_module_path(#[case] dialect: Dialect, #[case] expected: &str) {
    let mut file = settings_file("", dialect);
    let settings = model(&file);
    settings.add_module_path(file.tree_mut(), "app").unwrap();
    assert_eq!(applied(&mut file), expected);
    assert_eq!(paths(&file), [":", ":app"]);
}

#[test]
fn test_adding_included_path_changes_nothing() {
    let mut file = settings_file("include ':app'\n", Dialect::Groovy);
    let settings = model(&file);
    settings.add_module_path(file.tree_mut(), ":app").unwrap();
    assert!(!file.is_modified());
}

#[test]
fn test_remove_module_paths() {
    let text = "include ':app', ':lib'\ninclude ':lib1'\n";
    let mut file = settings_file(text, Dialect::Groovy);
    let settings = model(&file);
    settings.remove_module_path(file.tree_mut(), ":app").unwrap();
    assert_eq!(paths(&file), [":", ":lib", ":lib1"]);

    file.reset();
    assert_eq!(paths(&file), [":", ":app", ":lib", ":lib1"]);

    let settings = model(&file);
    for path in [":app", "lib", ":lib1"] {
        settings.remove_module_path(file.tree_mut(), path).unwrap();
    }
    assert_eq!(paths(&file), [":"]);
    let text = applied(&mut file);
    assert!(!text.contains("include"), "{text}");
    assert_eq!(paths(&file), [":"]);
}

#[test]
fn test_remove_one_of_several() {
    let mut file = settings_file("include ':app', ':lib'\n", Dialect::Groovy);
    let settings = model(&file);
    settings.remove_module_path(file.tree_mut(), "app").unwrap();
    assert_eq!(applied(&mut file), "include ':lib'\n");
}

#[test]
fn test_replace_keeps_spelling() {
    let text = "include ':app', ':lib'\ninclude 'lib:subLib'\n";
    let mut file = settings_file(text, Dialect::Groovy);
    let settings = model(&file);
    settings.replace_module_path(file.tree_mut(), "lib", "lib1").unwrap();
    settings.replace_module_path(file.tree_mut(), ":lib:subLib", ":lib:other").unwrap();
    assert_eq!(paths(&file), [":", ":app", ":lib1", ":lib:other"]);
    assert_eq!(applied(&mut file), "include ':app', ':lib1'\ninclude 'lib:other'\n");
}

// ============================================================================
// Module directories
// ============================================================================

#[test]
fn test_module_directories() {
    let file = settings_file(MODULE_DIRECTORIES, Dialect::Groovy);
    let settings = model(&file);
    let tree = file.tree();
    assert_eq!(
        paths(&file),
        [":", ":app", ":libs", ":libs:mylibrary", ":olibs", ":olibs:mylibrary", ":notamodule:deepmodule"]
    );
    let dir = |path: &str| settings.module_directory(tree, path);
    assert_eq!(dir(":"), Some(PathBuf::new()));
    assert_eq!(dir("app"), Some(PathBuf::from("app")));
    assert_eq!(dir(":libs"), Some(PathBuf::from("libs")));
    assert_eq!(dir(":libs:mylibrary"), Some(PathBuf::from("xyz/mylibrary")));
    assert_eq!(dir("olibs"), Some(PathBuf::from("otherlibs")));
    assert_eq!(dir(":olibs:mylibrary"), Some(PathBuf::from("otherlibs/mylibrary")));
    assert_eq!(dir(":notamodule:deepmodule"), Some(PathBuf::from("notamodule/deepmodule")));
    assert_eq!(dir(":missing"), None);

    let module = |dir: &str| settings.module_with_directory(tree, Path::new(dir));
    assert_eq!(module("").as_deref(), Some(":"));
    assert_eq!(module("xyz/mylibrary").as_deref(), Some(":libs:mylibrary"));
    assert_eq!(module("otherlibs/mylibrary").as_deref(), Some(":olibs:mylibrary"));
    assert_eq!(module("elsewhere"), None);
}

#[test]
fn test_parent_modules() {
    let file = settings_file(MODULE_DIRECTORIES, Dialect::Groovy);
    let settings = model(&file);
    let parent = |path: &str| settings.parent_module(file.tree(), path);
    assert_eq!(parent("app").as_deref(), Some(":"));
    assert_eq!(parent(":libs").as_deref(), Some(":"));
    assert_eq!(parent("libs:mylibrary").as_deref(), Some(":libs"));
    assert_eq!(parent(":olibs:mylibrary").as_deref(), Some(":olibs"));
    assert_eq!(parent(":notamodule:deepmodule").as_deref(), Some(":"));
    assert_eq!(parent(":"), None);
}

#[rstest]
#[case(
    Dialect::Groovy,
    "include ':app'\n",
    "include ':app'\nproject(':app').projectDir = file('newAppLocation')\n"
)]
#[case(
    Dialect::KotlinScript,
    "include(\":app\")\n",
    "include(\":app\")\nproject(\":app\").projectDir = file(\"newAppLocation\")\n"
)]
fn test_set_module_directory(#[case] dialect: Dialect, #[case] text: &str, #[case] expected: &str) {
    let mut file = settings_file(text, dialect);
    let settings = model(&file);
    settings.set_module_directory(file.tree_mut(), ":app", "newAppLocation").unwrap();
    assert_eq!(applied(&mut file), expected);
    let settings = model(&file);
    assert_eq!(
        settings.module_directory(file.tree(), ":app"),
        Some(PathBuf::from("newAppLocation"))
    );
}

#[test]
fn test_set_existing_module_directory() {
    let text = "include ':app', ':lib'\nproject(':lib').projectDir = file('old')\n";
    let mut file = settings_file(text, Dialect::Groovy);
    let settings = model(&file);
    settings.set_module_directory(file.tree_mut(), "lib", "libLocation").unwrap();
    assert_eq!(
        applied(&mut file),
        "include ':app', ':lib'\nproject(':lib').projectDir = file('libLocation')\n"
    );
    let settings = model(&file);
    assert_eq!(
        settings.module_directory(file.tree(), ":lib"),
        Some(PathBuf::from("libLocation"))
    );
}

// ============================================================================
// Management blocks
// ============================================================================

#[test]
fn test_management_blocks() {
    let text = "\
pluginManagement {
    repositories {
        google()
    }
    plugins {
        id 'com.android.application' version '4.2.0'
        id 'org.jetbrains.kotlin.android' version '1.4.10'
    }
}
dependencyResolutionManagement {
    repositories {
        mavenCentral()
    }
}
plugins {
    id 'com.android.settings' version '7.4.0'
}
";
    let file = settings_file(text, Dialect::Groovy);
    let settings = model(&file);
    let tree = file.tree();

    let management = settings.plugin_management(tree).unwrap();
    assert_eq!(tree.block_kind(management), Some(BlockKind::PluginManagement));
    let resolution = settings.dependency_resolution_management(tree).unwrap();
    assert_eq!(tree.block_kind(resolution), Some(BlockKind::DependencyResolutionManagement));
    let repositories = file.block(&["dependencyResolutionManagement", "repositories"]).unwrap();
    assert_eq!(tree.block_kind(repositories), Some(BlockKind::Repositories));

    let plugins = file.plugins();
    let ids: Vec<_> = plugins.iter().filter_map(|p| p.id(tree)).collect();
    assert_eq!(
        ids,
        ["com.android.application", "org.jetbrains.kotlin.android", "com.android.settings"]
    );
    assert_eq!(plugins[0].version().value(tree), "4.2.0".into());
    assert_eq!(plugins[2].version().value(tree), "7.4.0".into());
}
