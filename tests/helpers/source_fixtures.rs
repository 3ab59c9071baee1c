//! Common build-file fixtures for tests.

pub const GROOVY_APP: &str = r#"plugins {
    id 'com.android.application'
}

android {
    namespace 'com.example.app'
    compileSdkVersion 33

    defaultConfig {
        applicationId 'com.example.app'
        versionCode 1
        versionName '1.0'
    }
}
"#;

pub const KTS_APP: &str = r#"plugins {
    id("com.android.application")
}

android {
    namespace = "com.example.app"
    compileSdk = 33

    defaultConfig {
        applicationId = "com.example.app"
        versionCode = 1
        versionName = "1.0"
    }
}
"#;

/// One map property written seven different ways
pub const RUNNER_ARGUMENTS: &str = r#"android {
    defaultConfig {
        testInstrumentationRunnerArguments = [key1: 'value1', key2: 'value2']
        testInstrumentationRunnerArgument 'key3', 'value3'
        testInstrumentationRunnerArguments key4: 'value4', key5: 'value5'
    }
    defaultConfig.testInstrumentationRunnerArguments.key6 = 'value6'
}
android.defaultConfig.testInstrumentationRunnerArguments.key7 = 'value7'
"#;

pub const CATALOG: &str = r#"[versions]
agp = "8.1.0"

[plugins]
android-application = { id = "com.android.application", version.ref = "agp" }
foo = "foo:3.0"
"#;
