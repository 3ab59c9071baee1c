//! Parse and write configuration for a build file

use crate::base::{AgpVersion, Dialect};
use crate::catalog::VersionCatalog;
use crate::semantics::BlockKind;

/// Which script a file is: a module build script or the settings script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptKind {
    #[default]
    Build,
    Settings,
}

impl ScriptKind {
    pub fn from_file_name(name: &str) -> Self {
        let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
        if file_name.starts_with("settings.gradle") {
            Self::Settings
        } else {
            Self::Build
        }
    }

    /// The kind of the file's root block
    pub fn root_block(self) -> BlockKind {
        match self {
            Self::Build => BlockKind::File,
            Self::Settings => BlockKind::Settings,
        }
    }
}

/// What a build file is read against: its dialect, the Android Gradle
/// Plugin version that gates version-dependent properties, and the version
/// catalogs its aliases refer to.
#[derive(Debug, Clone, Default)]
pub struct DslContext {
    pub dialect: Dialect,
    pub agp_version: Option<AgpVersion>,
    pub catalogs: Vec<VersionCatalog>,
    pub script: ScriptKind,
}

impl DslContext {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Context for a file name such as `build.gradle.kts`; unknown names
    /// read as Groovy
    pub fn for_file_name(name: &str) -> Self {
        Self::new(Dialect::from_file_name(name).unwrap_or_default()).with_script(ScriptKind::from_file_name(name))
    }

    pub fn with_script(mut self, script: ScriptKind) -> Self {
        self.script = script;
        self
    }

    pub fn with_agp_version(mut self, version: AgpVersion) -> Self {
        self.agp_version = Some(version);
        self
    }

    pub fn with_catalog(mut self, catalog: VersionCatalog) -> Self {
        self.catalogs.push(catalog);
        self
    }
}

/// Formatting of text the writer generates
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Number of spaces per indentation level
    pub tab_size: usize,
    /// Use spaces for indentation (false = use tabs)
    pub insert_spaces: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            insert_spaces: true,
        }
    }
}

impl WriterOptions {
    /// Indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size * level)
        } else {
            "\t".repeat(level)
        }
    }

    pub fn indent_unit(&self) -> String {
        self.indent(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent() {
        let options = WriterOptions::default();
        assert_eq!(options.indent(2), "        ");

        let tabs = WriterOptions {
            insert_spaces: false,
            ..WriterOptions::default()
        };
        assert_eq!(tabs.indent_unit(), "\t");
    }

    #[test]
    fn test_context_from_file_name() {
        assert_eq!(DslContext::for_file_name("build.gradle.kts").dialect, Dialect::KotlinScript);
        assert_eq!(DslContext::for_file_name("build.gradle").dialect, Dialect::Groovy);
        let settings = DslContext::for_file_name("project/settings.gradle.kts");
        assert_eq!(settings.dialect, Dialect::KotlinScript);
        assert_eq!(settings.script, ScriptKind::Settings);
        assert_eq!(DslContext::for_file_name("app/build.gradle").script, ScriptKind::Build);
    }
}
