/// Surface language of a build file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// `build.gradle`
    #[default]
    Groovy,
    /// `build.gradle.kts`
    KotlinScript,
    /// `build.gradle.dcl`: assignment-only, no method application
    Declarative,
}

impl Dialect {
    /// Guess the dialect from a file name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.ends_with(".gradle.kts") {
            Some(Self::KotlinScript)
        } else if name.ends_with(".gradle.dcl") {
            Some(Self::Declarative)
        } else if name.ends_with(".gradle") {
            Some(Self::Groovy)
        } else {
            None
        }
    }

    /// Kotlin-flavoured syntax: double-quoted strings, `listOf`, `mapOf`, `val`.
    pub fn is_kotlin_like(self) -> bool {
        matches!(self, Self::KotlinScript | Self::Declarative)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Groovy => "groovy",
            Self::KotlinScript => "kts",
            Self::Declarative => "declarative",
        }
    }
}
