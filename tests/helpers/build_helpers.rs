//! Helpers for parsing build files and reading properties by block path.

use gradle_dsl::{AgpVersion, BuildFile, Dialect, DslContext, PropertyValue, ScriptKind};

/// Parses a Groovy build file, asserting it has no syntax errors.
pub fn groovy(text: &str) -> BuildFile {
    build_file(text, DslContext::new(Dialect::Groovy))
}

/// Parses a Kotlin script build file, asserting it has no syntax errors.
pub fn kts(text: &str) -> BuildFile {
    build_file(text, DslContext::new(Dialect::KotlinScript))
}

/// Parses a build file read against an Android Gradle Plugin version.
pub fn with_agp(text: &str, dialect: Dialect, version: &str) -> BuildFile {
    let version = AgpVersion::parse(version).expect("test AGP version should parse");
    build_file(text, DslContext::new(dialect).with_agp_version(version))
}

/// Parses a settings script, asserting it has no syntax errors.
pub fn settings_file(text: &str, dialect: Dialect) -> BuildFile {
    build_file(text, DslContext::new(dialect).with_script(ScriptKind::Settings))
}

pub fn build_file(text: &str, context: DslContext) -> BuildFile {
    let file = BuildFile::parse(text, context);
    assert!(
        file.errors().is_empty(),
        "Parse errors in build file: {:?}",
        file.errors()
    );
    file
}

/// Reads `name` from the block at `path`.
pub fn value_at(file: &BuildFile, path: &[&str], name: &str) -> PropertyValue {
    let block = file
        .block(path)
        .unwrap_or_else(|| panic!("block {path:?} should exist"));
    file.property(block, name).value(file.tree())
}

/// Sets `name` in the block at `path`, creating the blocks if needed.
pub fn set_at(file: &mut BuildFile, path: &[&str], name: &str, value: impl Into<PropertyValue>) {
    let block = file.ensure_block(path).expect("blocks should be creatable");
    let mut property = file.property(block, name);
    property
        .set_value(file.tree_mut(), value)
        .unwrap_or_else(|e| panic!("setting {name} failed: {e}"));
}

/// Applies pending changes and returns the new text.
pub fn applied(file: &mut BuildFile) -> String {
    file.apply_changes().expect("apply should succeed");
    assert!(!file.is_modified(), "apply should leave nothing pending");
    file.text().to_string()
}
