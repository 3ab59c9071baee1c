//! A build file: its text, the element tree lowered from it, and the
//! commit cycle that writes tree changes back.

use tracing::{debug, warn};

use crate::base::Dialect;
use crate::context::{DslContext, WriterOptions};
use crate::dsl::{DslName, DslTree, ElementId, ElementType, lower::lower_file};
use crate::error::DslError;
use crate::model::{PluginModel, PropertyModel, SettingsModel};
use crate::parser::{SyntaxError, parse};
use crate::semantics::BlockKind;
use crate::writer;

/// One parsed build script.
///
/// Changes made through the tree or property models stay pending until
/// [`BuildFile::apply_changes`] writes them into the text and reparses it.
/// Element ids do not survive a commit or a reset.
#[derive(Debug, Clone)]
pub struct BuildFile {
    text: String,
    context: DslContext,
    options: WriterOptions,
    errors: Vec<SyntaxError>,
    tree: DslTree,
}

impl BuildFile {
    /// Parse `text` and lower it into a fresh element tree
    pub fn parse(text: impl Into<String>, context: DslContext) -> Self {
        let text = text.into();
        let (tree, errors) = load(&text, &context);
        Self {
            text,
            context,
            options: WriterOptions::default(),
            errors,
            tree,
        }
    }

    pub fn with_writer_options(mut self, options: WriterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dialect(&self) -> Dialect {
        self.context.dialect
    }

    pub fn context(&self) -> &DslContext {
        &self.context
    }

    /// Syntax errors of the last parse. Statements that failed to parse are
    /// kept as text and never modelled.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn tree(&self) -> &DslTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DslTree {
        &mut self.tree
    }

    pub fn root(&self) -> ElementId {
        self.tree.root()
    }

    /// Whether any change is waiting for [`BuildFile::apply_changes`]
    pub fn is_modified(&self) -> bool {
        self.tree.is_modified() || self.tree.has_pending_changes(self.tree.root())
    }

    /// The block at `path` from the file root, if the file has it
    pub fn block(&self, path: &[&str]) -> Option<ElementId> {
        self.tree.find_block(path)
    }

    /// The block at `path`, creating missing blocks along the way. Created
    /// blocks produce no text until something is added to them.
    pub fn ensure_block(&mut self, path: &[&str]) -> Result<ElementId, DslError> {
        let dialect = self.tree.dialect();
        let mut holder = self.tree.root();
        for &name in path {
            if let Some(block) = self.tree.get_block(holder, name) {
                holder = block;
                continue;
            }
            if self.tree.get_property_element(holder, name).is_some() {
                return Err(DslError::NotAContainer(name.to_string()));
            }
            let kind = self.tree.block_kind(holder).unwrap_or(BlockKind::Generic);
            let block = self.tree.new_block(DslName::single(name), kind.child_block(name, dialect));
            self.tree.set_element_type(block, ElementType::Derived);
            self.tree.add_parsed_element(holder, block);
            holder = block;
        }
        Ok(holder)
    }

    /// A property of `holder`, read and written through its transforms
    pub fn property(&self, holder: ElementId, name: &str) -> PropertyModel {
        PropertyModel::new(&self.tree, holder, name)
    }

    /// Every plugin request of the file
    pub fn plugins(&self) -> Vec<PluginModel> {
        PluginModel::collect(&self.tree)
    }

    /// The settings model, for a file parsed as a settings script
    pub fn settings(&self) -> Option<SettingsModel> {
        SettingsModel::new(&self.tree)
    }

    /// Write pending changes into the text and rebuild the tree from it.
    ///
    /// On error the text and the pending changes are left as they were.
    pub fn apply_changes(&mut self) -> Result<(), DslError> {
        if !self.is_modified() {
            return Ok(());
        }
        let text = writer::write(&self.text, &self.tree, &self.options)?;
        debug!(
            dialect = self.context.dialect.as_str(),
            before = self.text.len(),
            after = text.len(),
            "applied changes"
        );
        self.text = text;
        self.reset();
        Ok(())
    }

    /// Drop pending changes by lowering the current text again
    pub fn reset(&mut self) {
        let (tree, errors) = load(&self.text, &self.context);
        self.tree = tree;
        self.errors = errors;
    }
}

fn load(text: &str, context: &DslContext) -> (DslTree, Vec<SyntaxError>) {
    let mut tree = DslTree::new(context.dialect, context.agp_version).with_root_kind(context.script.root_block());
    for catalog in &context.catalogs {
        catalog.lower_into(&mut tree);
    }
    let parse = parse(text);
    for error in &parse.errors {
        warn!(error = %error.format(), "syntax error");
    }
    lower_file(&mut tree, &parse);
    (tree, parse.errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_without_changes_keeps_text() {
        let text = "android {\n    compileSdkVersion 30 // sdk\n}\n";
        let mut file = BuildFile::parse(text, DslContext::new(Dialect::Groovy));
        assert!(!file.is_modified());
        file.apply_changes().unwrap();
        assert_eq!(file.text(), text);
    }

    #[test]
    fn test_ensure_block_is_silent_until_used() {
        let text = "plugins {\n    id 'com.android.application'\n}\n";
        let mut file = BuildFile::parse(text, DslContext::new(Dialect::Groovy));
        let config = file.ensure_block(&["android", "defaultConfig"]).unwrap();
        assert_eq!(file.block(&["android", "defaultConfig"]), Some(config));
        file.apply_changes().unwrap();
        assert_eq!(file.text(), text);
    }

    #[test]
    fn test_ensure_block_over_property_fails() {
        let text = "android = 1\n";
        let mut file = BuildFile::parse(text, DslContext::new(Dialect::KotlinScript));
        assert!(matches!(file.ensure_block(&["android"]), Err(DslError::NotAContainer(_))));
    }

    #[test]
    fn test_reset_drops_changes() {
        let text = "android {\n    namespace 'a'\n}\n";
        let mut file = BuildFile::parse(text, DslContext::new(Dialect::Groovy));
        let android = file.block(&["android"]).unwrap();
        let mut namespace = file.property(android, "namespace");
        namespace.set_value(file.tree_mut(), "b").unwrap();
        assert!(file.is_modified());
        file.reset();
        assert!(!file.is_modified());
        let android = file.block(&["android"]).unwrap();
        assert_eq!(file.property(android, "namespace").value(file.tree()), "a".into());
    }
}
