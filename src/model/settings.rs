//! The settings script: included module paths, module directories, and the
//! `pluginManagement { }` and `dependencyResolutionManagement { }` blocks.
//!
//! ```text
//! include ':app', ':lib'                    include(":app", ":lib")
//! project(':lib').projectDir = file('x')    project(":lib").projectDir = file("x")
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{PropertyModel, PropertyValue};
use crate::base::Dialect;
use crate::dsl::{DslName, DslTree, ElementId, ExternalSyntax, LiteralValue};
use crate::error::DslError;
use crate::semantics::BlockKind;

/// Path of the root module
const ROOT_MODULE: &str = ":";

const INCLUDE: &str = "include";
const PROJECT_DIR: &str = "projectDir";

/// Modules of a settings script, named by Gradle paths such as `:lib:sub`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingsModel {
    root: ElementId,
}

impl SettingsModel {
    /// The model of a tree lowered from a settings script
    pub fn new(tree: &DslTree) -> Option<Self> {
        let root = tree.root();
        (tree.block_kind(root) == Some(BlockKind::Settings)).then_some(Self { root })
    }

    fn includes(&self, tree: &DslTree) -> PropertyModel {
        PropertyModel::new(tree, self.root, INCLUDE)
    }

    /// Included items with the paths they name
    fn included(&self, tree: &DslTree) -> Vec<(ElementId, String)> {
        let Some(list) = self.includes(tree).element(tree) else {
            return Vec::new();
        };
        tree.children(list)
            .into_iter()
            .filter_map(|item| {
                let path = tree.element(item).literal()?.as_str()?;
                Some((item, normalize(path)))
            })
            .collect()
    }

    /// `:` and every included path in source order, each once
    pub fn module_paths(&self, tree: &DslTree) -> Vec<String> {
        let mut paths = vec![ROOT_MODULE.to_string()];
        for (_, path) in self.included(tree) {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }

    pub fn contains(&self, tree: &DslTree, path: &str) -> bool {
        let path = normalize(path);
        self.module_paths(tree).contains(&path)
    }

    /// Include `path`, with or without its leading `:`
    pub fn add_module_path(&self, tree: &mut DslTree, path: &str) -> Result<(), DslError> {
        let path = normalize(path);
        if self.module_paths(tree).contains(&path) {
            return Ok(());
        }
        debug!(%path, "include module");
        let mut includes = self.includes(tree);
        includes.add_list_value(tree, path.as_str())
    }

    /// Drop every include of `path`. A statement left with nothing to
    /// include goes with it.
    pub fn remove_module_path(&self, tree: &mut DslTree, path: &str) -> Result<(), DslError> {
        let path = normalize(path);
        let Some(list) = self.includes(tree).element(tree) else {
            return Ok(());
        };
        for (item, _) in self.included(tree).into_iter().filter(|(_, p)| *p == path) {
            tree.remove_property(list, item)?;
            debug!(%path, "removed module");
        }
        Ok(())
    }

    /// Rename an included path where it is written. The new path keeps the
    /// old spelling's leading `:` or lack of one.
    pub fn replace_module_path(&self, tree: &mut DslTree, old: &str, new: &str) -> Result<(), DslError> {
        let (old, new) = (normalize(old), normalize(new));
        for (item, _) in self.included(tree).into_iter().filter(|(_, p)| *p == old) {
            let written = tree.element(item).literal().and_then(LiteralValue::as_str).unwrap_or_default();
            let spelled = if written.starts_with(':') {
                new.clone()
            } else {
                new.trim_start_matches(':').to_string()
            };
            tree.set_literal_value(item, LiteralValue::String(spelled))?;
            debug!(%old, %new, "renamed module");
        }
        Ok(())
    }

    /// The nearest included module above `path`, else the root. `None` for
    /// the root and for paths the script does not include.
    pub fn parent_module(&self, tree: &DslTree, path: &str) -> Option<String> {
        let path = normalize(path);
        let paths = self.module_paths(tree);
        if path == ROOT_MODULE || !paths.contains(&path) {
            return None;
        }
        let mut current = path.as_str();
        while let Some((prefix, _)) = current.rsplit_once(':') {
            if prefix.is_empty() {
                break;
            }
            if paths.iter().any(|p| p == prefix) {
                return Some(prefix.to_string());
            }
            current = prefix;
        }
        Some(ROOT_MODULE.to_string())
    }

    /// Directory of a module relative to the settings script: its
    /// `projectDir` when set, else its parent's directory followed by the
    /// rest of its path
    pub fn module_directory(&self, tree: &DslTree, path: &str) -> Option<PathBuf> {
        let path = normalize(path);
        if path == ROOT_MODULE {
            return Some(PathBuf::new());
        }
        if !self.module_paths(tree).contains(&path) {
            return None;
        }
        if let Some(dir) = self.explicit_directory(tree, &path) {
            return Some(dir);
        }
        let parent = self.parent_module(tree, &path)?;
        let base = self.module_directory(tree, &parent)?;
        let rest = path.strip_prefix(parent.as_str()).unwrap_or(&path);
        Some(
            rest.split(':')
                .filter(|segment| !segment.is_empty())
                .fold(base, |dir, segment| dir.join(segment)),
        )
    }

    /// The module whose directory is `dir`
    pub fn module_with_directory(&self, tree: &DslTree, dir: &Path) -> Option<String> {
        self.module_paths(tree)
            .into_iter()
            .find(|path| self.module_directory(tree, path).as_deref() == Some(dir))
    }

    /// Point `path` at `dir`: the existing `projectDir` statement is edited,
    /// otherwise `project(':x').projectDir = file('dir')` is appended
    pub fn set_module_directory(&self, tree: &mut DslTree, path: &str, dir: &str) -> Result<(), DslError> {
        let path = normalize(path);
        if path == ROOT_MODULE {
            return Err(DslError::unsupported(PROJECT_DIR, "the root module directory is fixed"));
        }
        let dialect = tree.dialect();
        let call = format!("file({})", quote(dialect, dir));
        let current = self.project_dir(tree, &path).and_then(|model| model.element(tree));
        match current {
            Some(element) if matches!(tree.element(element).literal(), Some(LiteralValue::String(_))) => {
                tree.set_literal_value(element, LiteralValue::String(dir.to_string()))
            }
            Some(element) => tree.set_literal_value(element, LiteralValue::Raw(call)),
            None => {
                let name = format!("project({}).{PROJECT_DIR}", quote(dialect, &path));
                let statement = tree.new_literal(DslName::single(name), LiteralValue::Raw(call));
                tree.set_external_syntax(statement, ExternalSyntax::Assignment);
                let end = tree.children(self.root).len();
                tree.add_new_element_at(self.root, end, statement)?;
                tree.set_modified(statement);
                debug!(%path, dir, "set module directory");
                Ok(())
            }
        }
    }

    fn project_dir(&self, tree: &DslTree, path: &str) -> Option<PropertyModel> {
        let project = tree.find_block(&["project", path])?;
        let model = PropertyModel::new(tree, project, PROJECT_DIR);
        model.raw_element().is_some().then_some(model)
    }

    fn explicit_directory(&self, tree: &DslTree, path: &str) -> Option<PathBuf> {
        match self.project_dir(tree, path)?.value(tree) {
            PropertyValue::String(dir) => Some(PathBuf::from(dir)),
            _ => None,
        }
    }

    pub fn plugin_management(&self, tree: &DslTree) -> Option<ElementId> {
        tree.get_block(self.root, "pluginManagement")
    }

    pub fn dependency_resolution_management(&self, tree: &DslTree) -> Option<ElementId> {
        tree.get_block(self.root, "dependencyResolutionManagement")
    }
}

/// `lib:sub` and `:lib:sub` name the same module
fn normalize(path: &str) -> String {
    let path = path.trim();
    if path.starts_with(':') {
        path.to_string()
    } else {
        format!(":{path}")
    }
}

fn quote(dialect: Dialect, text: &str) -> String {
    let kotlin = dialect.is_kotlin_like();
    let mark = if kotlin { '"' } else { '\'' };
    let mut out = String::with_capacity(text.len() + 2);
    out.push(mark);
    for c in text.chars() {
        if c == '\\' || c == mark || (kotlin && c == '$') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(mark);
    out
}
