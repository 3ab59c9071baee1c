use gradle_dsl::{Dialect, DslContext};
use rstest::rstest;

use crate::helpers::build_helpers::*;
use crate::helpers::source_fixtures::*;

#[rstest]
#[case(Dialect::Groovy, GROOVY_APP)]
#[case(Dialect::KotlinScript, KTS_APP)]
#[case(Dialect::Groovy, RUNNER_ARGUMENTS)]
#[case(Dialect::Groovy, "// header\n\n/* block\n comment */\nandroid   {\n\tcompileSdkVersion   30 // trailing\n}\n")]
#[case(Dialect::KotlinScript, "android {\n    defaultConfig { minSdk = 21 }\n}")]
#[case(Dialect::Groovy, "")]
fn test_apply_without_changes_is_identity(#[case] dialect: Dialect, #[case] text: &str) {
    let mut file = build_file(text, DslContext::new(dialect));
    assert!(!file.is_modified());
    assert_eq!(applied(&mut file), text);
}

#[test]
fn test_change_then_revert_restores_text() {
    let mut file = groovy(GROOVY_APP);
    set_at(&mut file, &["android"], "namespace", "com.example.other");
    applied(&mut file);
    set_at(&mut file, &["android"], "namespace", "com.example.app");
    assert_eq!(applied(&mut file), GROOVY_APP);
}

#[test]
fn test_comments_around_changes_survive() {
    let text = "android {\n    // the namespace\n    namespace 'a' // trailing\n}\n";
    let mut file = groovy(text);
    set_at(&mut file, &["android"], "namespace", "b");
    assert_eq!(
        applied(&mut file),
        "android {\n    // the namespace\n    namespace 'b' // trailing\n}\n"
    );
}
