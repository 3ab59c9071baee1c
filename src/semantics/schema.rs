//! Block kinds and the property tables each block declares.

use super::{
    Arity, ExternalToModelEntry, ExternalToModelMap, ModelEffectDescription,
    ModelPropertyDescription, SemanticsDescription,
};
use crate::base::{Dialect, VersionConstraint};

use Arity::{AtLeast, Exactly, Property};
use SemanticsDescription::{
    AugmentList, AugmentMap, ClearAndAugmentList, Set, Val, Var, VwoProperty,
};

/// Methods that name an element of a named container in Kotlin script:
/// `create("staging") { }`, `getByName("release") { }`
pub const NAMED_CONTAINER_METHODS: &[&str] =
    &["create", "getByName", "named", "register", "maybeCreate"];

/// Model properties known to the block tables
pub mod properties {
    use crate::semantics::{ModelPropertyDescription, ModelPropertyType};

    use ModelPropertyType::{Mutable, MutableList, MutableMap, MutableSet};

    const fn scalar(name: &'static str) -> ModelPropertyDescription {
        ModelPropertyDescription::new(name, Mutable)
    }

    // android
    pub const COMPILE_SDK_VERSION: ModelPropertyDescription = scalar("compileSdkVersion");
    pub const BUILD_TOOLS_VERSION: ModelPropertyDescription = scalar("buildToolsVersion");
    pub const NAMESPACE: ModelPropertyDescription = scalar("namespace");
    pub const FLAVOR_DIMENSIONS: ModelPropertyDescription =
        ModelPropertyDescription::new("flavorDimensions", MutableList);

    // defaultConfig and product flavors
    pub const APPLICATION_ID: ModelPropertyDescription = scalar("applicationId");
    pub const MIN_SDK_VERSION: ModelPropertyDescription = scalar("minSdkVersion");
    pub const TARGET_SDK_VERSION: ModelPropertyDescription = scalar("targetSdkVersion");
    pub const VERSION_CODE: ModelPropertyDescription = scalar("versionCode");
    pub const VERSION_NAME: ModelPropertyDescription = scalar("versionName");
    pub const DIMENSION: ModelPropertyDescription = scalar("dimension");
    pub const MULTI_DEX_ENABLED: ModelPropertyDescription = scalar("multiDexEnabled");
    pub const TEST_INSTRUMENTATION_RUNNER: ModelPropertyDescription =
        scalar("testInstrumentationRunner");
    pub const TEST_INSTRUMENTATION_RUNNER_ARGUMENTS: ModelPropertyDescription =
        ModelPropertyDescription::new("testInstrumentationRunnerArguments", MutableMap);
    pub const RES_CONFIGS: ModelPropertyDescription =
        ModelPropertyDescription::new("resConfigs", MutableSet);

    // shared by flavors and build types
    pub const PROGUARD_FILES: ModelPropertyDescription =
        ModelPropertyDescription::new("proguardFiles", MutableList);
    pub const CONSUMER_PROGUARD_FILES: ModelPropertyDescription =
        ModelPropertyDescription::new("consumerProguardFiles", MutableList);
    pub const MANIFEST_PLACEHOLDERS: ModelPropertyDescription =
        ModelPropertyDescription::new("manifestPlaceholders", MutableMap);
    pub const SIGNING_CONFIG: ModelPropertyDescription = scalar("signingConfig");

    // build types
    pub const APPLICATION_ID_SUFFIX: ModelPropertyDescription = scalar("applicationIdSuffix");
    pub const VERSION_NAME_SUFFIX: ModelPropertyDescription = scalar("versionNameSuffix");
    pub const MINIFY_ENABLED: ModelPropertyDescription = scalar("minifyEnabled");
    pub const DEBUGGABLE: ModelPropertyDescription = scalar("debuggable");
    pub const SHRINK_RESOURCES: ModelPropertyDescription = scalar("shrinkResources");

    // signing configs
    pub const STORE_FILE: ModelPropertyDescription = scalar("storeFile");
    pub const STORE_PASSWORD: ModelPropertyDescription = scalar("storePassword");
    pub const KEY_ALIAS: ModelPropertyDescription = scalar("keyAlias");
    pub const KEY_PASSWORD: ModelPropertyDescription = scalar("keyPassword");

    // compileOptions
    pub const SOURCE_COMPATIBILITY: ModelPropertyDescription = scalar("sourceCompatibility");
    pub const TARGET_COMPATIBILITY: ModelPropertyDescription = scalar("targetCompatibility");
    pub const ENCODING: ModelPropertyDescription = scalar("encoding");

    // settings
    pub const INCLUDE: ModelPropertyDescription = ModelPropertyDescription::new("include", MutableList);
    pub const PROJECT_DIR: ModelPropertyDescription = scalar("projectDir");
}

use properties::*;

/// The kinds of properties block the model understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    File,
    Buildscript,
    Plugins,
    Android,
    DefaultConfig,
    ProductFlavors,
    ProductFlavor,
    BuildTypes,
    BuildType,
    SigningConfigs,
    SigningConfig,
    CompileOptions,
    Dependencies,
    Repositories,
    /// `ext { }` in Groovy, `extra` in Kotlin script
    Ext,
    /// Root of a settings script
    Settings,
    PluginManagement,
    DependencyResolutionManagement,
    /// `project(':lib')` in `project(':lib').projectDir = ...`
    Projects,
    Project,
    /// Any block without a table
    Generic,
}

impl BlockKind {
    /// Kind of a child block called `name`, if this block declares one
    pub fn known_child_block(self, name: &str, dialect: Dialect) -> Option<BlockKind> {
        let kind = match (self, name) {
            (Self::ProductFlavors, _) => Self::ProductFlavor,
            (Self::BuildTypes, _) => Self::BuildType,
            (Self::SigningConfigs, _) => Self::SigningConfig,
            (Self::Projects, _) => Self::Project,
            (Self::Settings, "pluginManagement") => Self::PluginManagement,
            (Self::Settings, "dependencyResolutionManagement") => Self::DependencyResolutionManagement,
            (Self::Settings, "project") => Self::Projects,
            (Self::Settings | Self::PluginManagement, "plugins") => Self::Plugins,
            (Self::Settings, "buildscript") => Self::Buildscript,
            (Self::PluginManagement | Self::DependencyResolutionManagement, "repositories") => {
                Self::Repositories
            }
            (Self::File, "buildscript") => Self::Buildscript,
            (Self::File, "plugins") => Self::Plugins,
            (Self::File, "android") => Self::Android,
            (Self::File | Self::Buildscript, "dependencies") => Self::Dependencies,
            (Self::File | Self::Buildscript, "repositories") => Self::Repositories,
            (Self::File | Self::Buildscript, "ext") if dialect == Dialect::Groovy => Self::Ext,
            (Self::File | Self::Buildscript, "extra") if dialect.is_kotlin_like() => Self::Ext,
            (Self::Android, "defaultConfig") => Self::DefaultConfig,
            (Self::Android, "productFlavors") => Self::ProductFlavors,
            (Self::Android, "buildTypes") => Self::BuildTypes,
            (Self::Android, "signingConfigs") => Self::SigningConfigs,
            (Self::Android, "compileOptions") => Self::CompileOptions,
            _ => return None,
        };
        Some(kind)
    }

    /// Kind of a child block called `name`; undeclared blocks are [`BlockKind::Generic`]
    pub fn child_block(self, name: &str, dialect: Dialect) -> BlockKind {
        self.known_child_block(name, dialect)
            .unwrap_or(Self::Generic)
    }

    /// Containers whose children are named by the user (`buildTypes { release { } }`)
    pub fn is_named_container(self) -> bool {
        matches!(
            self,
            Self::ProductFlavors | Self::BuildTypes | Self::SigningConfigs | Self::Projects
        )
    }

    /// Blocks whose properties act as variables for reference resolution
    pub fn declares_variables(self) -> bool {
        self == Self::Ext
    }

    /// Method used to open a new named child in Kotlin script
    pub fn named_child_method(self, name: &str) -> &'static str {
        match (self, name) {
            (Self::BuildTypes, "release" | "debug") => "getByName",
            _ => "create",
        }
    }
}

const fn entry(
    name: &'static str,
    arity: Arity,
    property: ModelPropertyDescription,
    semantics: SemanticsDescription,
) -> ExternalToModelEntry {
    ExternalToModelEntry {
        name,
        arity,
        effect: ModelEffectDescription::new(property, semantics),
    }
}

const fn since_7(mut entry: ExternalToModelEntry) -> ExternalToModelEntry {
    entry.effect = entry.effect.since(VersionConstraint::agp_min(7, 0, 0));
    entry
}

// ============================================================================
// android { }
// ============================================================================

static ANDROID_GROOVY: &[ExternalToModelEntry] = &[
    entry("buildToolsVersion", Property, BUILD_TOOLS_VERSION, Var),
    entry("buildToolsVersion", Exactly(1), BUILD_TOOLS_VERSION, Set),
    entry("compileSdkVersion", Property, COMPILE_SDK_VERSION, Var),
    entry("compileSdkVersion", Exactly(1), COMPILE_SDK_VERSION, Set),
    since_7(entry("compileSdk", Property, COMPILE_SDK_VERSION, Var)),
    since_7(entry("compileSdk", Exactly(1), COMPILE_SDK_VERSION, Set)),
    since_7(entry("compileSdkPreview", Property, COMPILE_SDK_VERSION, Var)),
    since_7(entry("compileSdkPreview", Exactly(1), COMPILE_SDK_VERSION, Set)),
    entry("flavorDimensions", Property, FLAVOR_DIMENSIONS, Var),
    entry("flavorDimensions", AtLeast(0), FLAVOR_DIMENSIONS, AugmentList),
    entry("namespace", Property, NAMESPACE, Var),
    entry("namespace", Exactly(1), NAMESPACE, Set),
];

static ANDROID_KTS: &[ExternalToModelEntry] = &[
    entry("buildToolsVersion", Property, BUILD_TOOLS_VERSION, Var),
    entry("buildToolsVersion", Exactly(1), BUILD_TOOLS_VERSION, Set),
    entry("compileSdkVersion", Property, COMPILE_SDK_VERSION, VwoProperty),
    entry("compileSdkVersion", Exactly(1), COMPILE_SDK_VERSION, Set),
    since_7(entry("compileSdk", Property, COMPILE_SDK_VERSION, Var)),
    since_7(entry("compileSdkPreview", Property, COMPILE_SDK_VERSION, Var)),
    entry("flavorDimensions", Property, FLAVOR_DIMENSIONS, Val),
    entry("namespace", Property, NAMESPACE, Var),
];

// ============================================================================
// defaultConfig { } and productFlavors { name { } }
// ============================================================================

static FLAVOR_GROOVY: &[ExternalToModelEntry] = &[
    entry("applicationId", Property, APPLICATION_ID, Var),
    entry("applicationId", Exactly(1), APPLICATION_ID, Set),
    entry("consumerProguardFiles", AtLeast(0), CONSUMER_PROGUARD_FILES, AugmentList),
    entry("consumerProguardFile", Exactly(1), CONSUMER_PROGUARD_FILES, AugmentList),
    entry("setConsumerProguardFiles", Exactly(1), CONSUMER_PROGUARD_FILES, ClearAndAugmentList),
    entry("dimension", Property, DIMENSION, Var),
    entry("dimension", Exactly(1), DIMENSION, Set),
    entry("manifestPlaceholders", Property, MANIFEST_PLACEHOLDERS, Var),
    entry("manifestPlaceholders", Exactly(1), MANIFEST_PLACEHOLDERS, AugmentMap),
    entry("setManifestPlaceholders", Exactly(1), MANIFEST_PLACEHOLDERS, Set),
    entry("minSdkVersion", Property, MIN_SDK_VERSION, Var),
    entry("minSdkVersion", Exactly(1), MIN_SDK_VERSION, Set),
    since_7(entry("minSdk", Property, MIN_SDK_VERSION, Var)),
    since_7(entry("minSdk", Exactly(1), MIN_SDK_VERSION, Set)),
    since_7(entry("minSdkPreview", Property, MIN_SDK_VERSION, Var)),
    since_7(entry("minSdkPreview", Exactly(1), MIN_SDK_VERSION, Set)),
    entry("multiDexEnabled", Property, MULTI_DEX_ENABLED, Var),
    entry("multiDexEnabled", Exactly(1), MULTI_DEX_ENABLED, Set),
    entry("proguardFiles", AtLeast(0), PROGUARD_FILES, AugmentList),
    entry("proguardFile", Exactly(1), PROGUARD_FILES, AugmentList),
    entry("setProguardFiles", Exactly(1), PROGUARD_FILES, ClearAndAugmentList),
    entry("resConfigs", AtLeast(0), RES_CONFIGS, AugmentList),
    entry("resConfig", Exactly(1), RES_CONFIGS, AugmentList),
    entry("signingConfig", Property, SIGNING_CONFIG, Var),
    entry("signingConfig", Exactly(1), SIGNING_CONFIG, Set),
    entry("targetSdkVersion", Property, TARGET_SDK_VERSION, Var),
    entry("targetSdkVersion", Exactly(1), TARGET_SDK_VERSION, Set),
    since_7(entry("targetSdk", Property, TARGET_SDK_VERSION, Var)),
    since_7(entry("targetSdk", Exactly(1), TARGET_SDK_VERSION, Set)),
    since_7(entry("targetSdkPreview", Property, TARGET_SDK_VERSION, Var)),
    since_7(entry("targetSdkPreview", Exactly(1), TARGET_SDK_VERSION, Set)),
    entry("testInstrumentationRunner", Property, TEST_INSTRUMENTATION_RUNNER, Var),
    entry("testInstrumentationRunner", Exactly(1), TEST_INSTRUMENTATION_RUNNER, Set),
    entry("testInstrumentationRunnerArguments", Property, TEST_INSTRUMENTATION_RUNNER_ARGUMENTS, Var),
    entry("testInstrumentationRunnerArguments", Exactly(1), TEST_INSTRUMENTATION_RUNNER_ARGUMENTS, AugmentMap),
    entry("testInstrumentationRunnerArgument", Exactly(2), TEST_INSTRUMENTATION_RUNNER_ARGUMENTS, AugmentMap),
    entry("versionCode", Property, VERSION_CODE, Var),
    entry("versionCode", Exactly(1), VERSION_CODE, Set),
    entry("versionName", Property, VERSION_NAME, Var),
    entry("versionName", Exactly(1), VERSION_NAME, Set),
];

static FLAVOR_KTS: &[ExternalToModelEntry] = &[
    entry("applicationId", Property, APPLICATION_ID, Var),
    entry("consumerProguardFiles", AtLeast(0), CONSUMER_PROGUARD_FILES, AugmentList),
    entry("consumerProguardFile", Exactly(1), CONSUMER_PROGUARD_FILES, AugmentList),
    entry("setConsumerProguardFiles", Exactly(1), CONSUMER_PROGUARD_FILES, ClearAndAugmentList),
    entry("dimension", Property, DIMENSION, Var),
    entry("manifestPlaceholders", Property, MANIFEST_PLACEHOLDERS, Val),
    entry("minSdkVersion", Exactly(1), MIN_SDK_VERSION, Set),
    entry("minSdkVersion", Property, MIN_SDK_VERSION, VwoProperty),
    since_7(entry("minSdk", Property, MIN_SDK_VERSION, Var)),
    since_7(entry("minSdkPreview", Property, MIN_SDK_VERSION, Var)),
    entry("isMultiDexEnabled", Property, MULTI_DEX_ENABLED, Var),
    entry("multiDexEnabled", Property, MULTI_DEX_ENABLED, Var),
    entry("proguardFiles", AtLeast(0), PROGUARD_FILES, AugmentList),
    entry("proguardFile", Exactly(1), PROGUARD_FILES, AugmentList),
    entry("setProguardFiles", Exactly(1), PROGUARD_FILES, ClearAndAugmentList),
    entry("resConfigs", AtLeast(0), RES_CONFIGS, AugmentList),
    entry("resConfig", Exactly(1), RES_CONFIGS, AugmentList),
    entry("signingConfig", Property, SIGNING_CONFIG, Var),
    entry("targetSdkVersion", Exactly(1), TARGET_SDK_VERSION, Set),
    entry("targetSdkVersion", Property, TARGET_SDK_VERSION, VwoProperty),
    since_7(entry("targetSdk", Property, TARGET_SDK_VERSION, Var)),
    since_7(entry("targetSdkPreview", Property, TARGET_SDK_VERSION, Var)),
    entry("testInstrumentationRunner", Property, TEST_INSTRUMENTATION_RUNNER, Var),
    entry("testInstrumentationRunnerArguments", Property, TEST_INSTRUMENTATION_RUNNER_ARGUMENTS, Val),
    entry("versionCode", Property, VERSION_CODE, Var),
    entry("versionName", Property, VERSION_NAME, Var),
];

// ============================================================================
// buildTypes { name { } }
// ============================================================================

static BUILD_TYPE_GROOVY: &[ExternalToModelEntry] = &[
    entry("applicationIdSuffix", Property, APPLICATION_ID_SUFFIX, Var),
    entry("applicationIdSuffix", Exactly(1), APPLICATION_ID_SUFFIX, Set),
    entry("consumerProguardFiles", AtLeast(0), CONSUMER_PROGUARD_FILES, AugmentList),
    entry("consumerProguardFile", Exactly(1), CONSUMER_PROGUARD_FILES, AugmentList),
    entry("setConsumerProguardFiles", Exactly(1), CONSUMER_PROGUARD_FILES, ClearAndAugmentList),
    entry("debuggable", Property, DEBUGGABLE, Var),
    entry("debuggable", Exactly(1), DEBUGGABLE, Set),
    entry("manifestPlaceholders", Property, MANIFEST_PLACEHOLDERS, Var),
    entry("manifestPlaceholders", Exactly(1), MANIFEST_PLACEHOLDERS, AugmentMap),
    entry("setManifestPlaceholders", Exactly(1), MANIFEST_PLACEHOLDERS, Set),
    entry("minifyEnabled", Property, MINIFY_ENABLED, Var),
    entry("minifyEnabled", Exactly(1), MINIFY_ENABLED, Set),
    entry("proguardFiles", AtLeast(0), PROGUARD_FILES, AugmentList),
    entry("proguardFile", Exactly(1), PROGUARD_FILES, AugmentList),
    entry("setProguardFiles", Exactly(1), PROGUARD_FILES, ClearAndAugmentList),
    entry("shrinkResources", Property, SHRINK_RESOURCES, Var),
    entry("shrinkResources", Exactly(1), SHRINK_RESOURCES, Set),
    entry("signingConfig", Property, SIGNING_CONFIG, Var),
    entry("signingConfig", Exactly(1), SIGNING_CONFIG, Set),
    entry("versionNameSuffix", Property, VERSION_NAME_SUFFIX, Var),
    entry("versionNameSuffix", Exactly(1), VERSION_NAME_SUFFIX, Set),
];

static BUILD_TYPE_KTS: &[ExternalToModelEntry] = &[
    entry("applicationIdSuffix", Property, APPLICATION_ID_SUFFIX, Var),
    entry("consumerProguardFiles", AtLeast(0), CONSUMER_PROGUARD_FILES, AugmentList),
    entry("consumerProguardFile", Exactly(1), CONSUMER_PROGUARD_FILES, AugmentList),
    entry("setConsumerProguardFiles", Exactly(1), CONSUMER_PROGUARD_FILES, ClearAndAugmentList),
    entry("isDebuggable", Property, DEBUGGABLE, Var),
    entry("manifestPlaceholders", Property, MANIFEST_PLACEHOLDERS, Val),
    entry("isMinifyEnabled", Property, MINIFY_ENABLED, Var),
    entry("proguardFiles", AtLeast(0), PROGUARD_FILES, AugmentList),
    entry("proguardFile", Exactly(1), PROGUARD_FILES, AugmentList),
    entry("setProguardFiles", Exactly(1), PROGUARD_FILES, ClearAndAugmentList),
    entry("isShrinkResources", Property, SHRINK_RESOURCES, Var),
    entry("signingConfig", Property, SIGNING_CONFIG, Var),
    entry("versionNameSuffix", Property, VERSION_NAME_SUFFIX, Var),
];

// ============================================================================
// signingConfigs { name { } } and compileOptions { }
// ============================================================================

static SIGNING_CONFIG_GROOVY: &[ExternalToModelEntry] = &[
    entry("keyAlias", Property, KEY_ALIAS, Var),
    entry("keyAlias", Exactly(1), KEY_ALIAS, Set),
    entry("keyPassword", Property, KEY_PASSWORD, Var),
    entry("keyPassword", Exactly(1), KEY_PASSWORD, Set),
    entry("storeFile", Property, STORE_FILE, Var),
    entry("storeFile", Exactly(1), STORE_FILE, Set),
    entry("storePassword", Property, STORE_PASSWORD, Var),
    entry("storePassword", Exactly(1), STORE_PASSWORD, Set),
];

static SIGNING_CONFIG_KTS: &[ExternalToModelEntry] = &[
    entry("keyAlias", Property, KEY_ALIAS, Var),
    entry("keyPassword", Property, KEY_PASSWORD, Var),
    entry("storeFile", Property, STORE_FILE, Var),
    entry("storePassword", Property, STORE_PASSWORD, Var),
];

static COMPILE_OPTIONS_GROOVY: &[ExternalToModelEntry] = &[
    entry("encoding", Property, ENCODING, Var),
    entry("encoding", Exactly(1), ENCODING, Set),
    entry("sourceCompatibility", Property, SOURCE_COMPATIBILITY, Var),
    entry("sourceCompatibility", Exactly(1), SOURCE_COMPATIBILITY, Set),
    entry("targetCompatibility", Property, TARGET_COMPATIBILITY, Var),
    entry("targetCompatibility", Exactly(1), TARGET_COMPATIBILITY, Set),
];

static COMPILE_OPTIONS_KTS: &[ExternalToModelEntry] = &[
    entry("encoding", Property, ENCODING, Var),
    entry("sourceCompatibility", Property, SOURCE_COMPATIBILITY, Var),
    entry("targetCompatibility", Property, TARGET_COMPATIBILITY, Var),
];

// ============================================================================
// settings scripts
// ============================================================================

static SETTINGS: &[ExternalToModelEntry] = &[entry("include", AtLeast(0), INCLUDE, AugmentList)];

static PROJECT: &[ExternalToModelEntry] = &[entry("projectDir", Property, PROJECT_DIR, Var)];

pub(super) fn external_to_model_map(kind: BlockKind, dialect: Dialect) -> ExternalToModelMap {
    let kotlin = dialect.is_kotlin_like();
    let entries = match kind {
        BlockKind::Android if kotlin => ANDROID_KTS,
        BlockKind::Android => ANDROID_GROOVY,
        BlockKind::DefaultConfig | BlockKind::ProductFlavor if kotlin => FLAVOR_KTS,
        BlockKind::DefaultConfig | BlockKind::ProductFlavor => FLAVOR_GROOVY,
        BlockKind::BuildType if kotlin => BUILD_TYPE_KTS,
        BlockKind::BuildType => BUILD_TYPE_GROOVY,
        BlockKind::SigningConfig if kotlin => SIGNING_CONFIG_KTS,
        BlockKind::SigningConfig => SIGNING_CONFIG_GROOVY,
        BlockKind::CompileOptions if kotlin => COMPILE_OPTIONS_KTS,
        BlockKind::CompileOptions => COMPILE_OPTIONS_GROOVY,
        BlockKind::Settings => SETTINGS,
        BlockKind::Project => PROJECT,
        _ => return ExternalToModelMap::EMPTY,
    };
    let map = ExternalToModelMap::new(entries);
    if dialect == Dialect::Declarative {
        map.assignments_only()
    } else {
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_blocks() {
        assert_eq!(
            BlockKind::File.known_child_block("android", Dialect::Groovy),
            Some(BlockKind::Android)
        );
        assert_eq!(
            BlockKind::BuildTypes.child_block("staging", Dialect::Groovy),
            BlockKind::BuildType
        );
        assert_eq!(
            BlockKind::File.known_child_block("extra", Dialect::KotlinScript),
            Some(BlockKind::Ext)
        );
        assert_eq!(BlockKind::File.known_child_block("extra", Dialect::Groovy), None);
        assert_eq!(
            BlockKind::Android.child_block("lint", Dialect::Groovy),
            BlockKind::Generic
        );
    }

    #[test]
    fn test_tables_have_no_duplicate_rows() {
        for table in [ANDROID_GROOVY, ANDROID_KTS, FLAVOR_GROOVY, FLAVOR_KTS, BUILD_TYPE_GROOVY] {
            for (i, a) in table.iter().enumerate() {
                for b in &table[i + 1..] {
                    assert!(
                        !(a.name == b.name && a.arity == b.arity),
                        "duplicate row for {} {:?}",
                        a.name,
                        a.arity
                    );
                }
            }
        }
    }

    #[test]
    fn test_settings_blocks() {
        let management = BlockKind::Settings.child_block("pluginManagement", Dialect::Groovy);
        assert_eq!(management, BlockKind::PluginManagement);
        assert_eq!(management.known_child_block("plugins", Dialect::Groovy), Some(BlockKind::Plugins));
        assert_eq!(
            BlockKind::Settings
                .child_block("dependencyResolutionManagement", Dialect::KotlinScript)
                .known_child_block("repositories", Dialect::KotlinScript),
            Some(BlockKind::Repositories)
        );
        assert_eq!(BlockKind::Projects.child_block(":lib", Dialect::Groovy), BlockKind::Project);
        assert_eq!(BlockKind::File.known_child_block("pluginManagement", Dialect::Groovy), None);
    }

    #[test]
    fn test_named_child_method() {
        assert_eq!(BlockKind::BuildTypes.named_child_method("release"), "getByName");
        assert_eq!(BlockKind::BuildTypes.named_child_method("staging"), "create");
        assert_eq!(BlockKind::ProductFlavors.named_child_method("free"), "create");
    }
}
