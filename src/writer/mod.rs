//! Write-back: turn pending tree mutations into minimal text edits.
//!
//! The writer walks the tree from the root and only visits containers with
//! pending changes. Every edit targets the text the tree was lowered from:
//!
//! - a changed literal rewrites its value range
//! - a removed statement loses its whole line; removed items inside a
//!   statement go together with their separators
//! - a new element is rendered and inserted after the nearest previous
//!   sibling that has text, or at the start of its parent
//! - a moved element's text is copied to its new slot and deleted from the
//!   old one
//! - a block without `{ }` of its own (implied by dotted names) is written
//!   as `name { ... }` the first time it receives new content
//!
//! Blocks whose every child is removed are removed with them. Edits are
//! spliced back to front; overlapping edits are a [`DslError::WriteConflict`].

mod edit;
mod emit;

use rowan::{TextRange, TextSize};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::base::{line_end, line_indent, line_start};
use crate::context::WriterOptions;
use crate::converter::model_effect;
use crate::dsl::{
    CollectionKind, DslTree, ElementId, ElementItem, ElementKind, ElementState, SyntaxHandle,
};
use crate::error::DslError;
use edit::TextEdit;
use emit::Emitter;

/// Apply the pending changes of `tree` to `text`, the text it was lowered
/// from.
pub(crate) fn write(text: &str, tree: &DslTree, options: &WriterOptions) -> Result<String, DslError> {
    if !tree.has_pending_changes(tree.root()) {
        return Ok(text.to_string());
    }
    let mut writer = Writer::new(text, tree, options);
    writer.write_block(tree.root());
    trace!(edits = writer.edits.len(), "applying edits");
    edit::apply(text, writer.edits)
}

/// How a new statement joins the surrounding text
#[derive(Debug, Clone, PartialEq, Eq)]
enum Placement {
    /// On a line of its own starting at the offset
    Line,
    /// On a new line after the text ending at the offset
    After,
    /// Right after an opening brace followed by other code
    Open,
    /// Into a one-line empty body `{ }`
    Collapse { interior: TextRange, outer: String },
    /// After the last statement of a body closed on the same line, the
    /// `}` moving to a line of its own
    Close { outer: String },
}

#[derive(Debug, Clone)]
struct Insertion {
    offset: TextSize,
    placement: Placement,
    indent: String,
}

enum Body {
    File,
    Braces(TextRange),
    None,
}

struct Writer<'a> {
    text: &'a str,
    tree: &'a DslTree,
    emit: Emitter<'a>,
    edits: Vec<TextEdit>,
    deleted: Vec<TextRange>,
    collapsed: FxHashSet<TextRange>,
    seq: u32,
}

impl<'a> Writer<'a> {
    fn new(text: &'a str, tree: &'a DslTree, options: &WriterOptions) -> Self {
        Self {
            text,
            tree,
            emit: Emitter::new(tree, options.indent_unit()),
            edits: Vec::new(),
            deleted: Vec::new(),
            collapsed: FxHashSet::default(),
            seq: 0,
        }
    }

    // =========================================================================
    // Edits
    // =========================================================================

    fn push(&mut self, range: TextRange, text: String) {
        self.seq += 1;
        self.edits.push(TextEdit {
            range,
            text,
            seq: self.seq,
        });
    }

    fn insert(&mut self, offset: TextSize, text: String) {
        self.push(TextRange::empty(offset), text);
    }

    fn delete_statement(&mut self, statement: TextRange) {
        if self.deleted.iter().any(|done| done.contains_range(statement)) {
            return;
        }
        trace!(?statement, "delete statement");
        self.deleted.push(statement);
        let range = edit::statement_deletion(self.text, statement);
        self.push(range, String::new());
    }

    fn slice(&self, range: TextRange) -> &'a str {
        &self.text[std::ops::Range::<usize>::from(range)]
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    fn write_block(&mut self, block: ElementId) {
        let Some(items) = self.tree.items(block) else {
            return;
        };
        let items: Vec<ElementItem> = items.iter().copied().collect();
        let has_body = !matches!(self.body(block), Body::None);

        for (index, item) in items.iter().enumerate() {
            match item.state {
                ElementState::ToBeRemoved => self.delete_element(item.id),
                ElementState::ToBeAdded => {
                    let statement = |writer: &Self, indent: &str| writer.emit.statement(item.id, indent);
                    self.place_statement(block, index, statement);
                }
                ElementState::Moved => {
                    if let Some(handle) = self.tree.element(item.id).raw_backing().copied() {
                        let copy = self.slice(handle.statement);
                        self.delete_statement(handle.statement);
                        self.place_statement(block, index, |_, _| copy.to_string());
                    }
                }
                ElementState::Existing => {
                    if !self.tree.has_pending_changes(item.id) {
                        continue;
                    }
                    let element = self.tree.element(item.id);
                    if !element.is_block() {
                        self.write_element(item.id);
                        continue;
                    }
                    match element.backing() {
                        Some(handle) if self.is_emptied(item.id) => self.delete_statement(handle.statement),
                        Some(_) => self.write_block(item.id),
                        None => {
                            self.write_block(item.id);
                            if has_body && !self.shell_items(item.id).is_empty() {
                                let child = item.id;
                                self.place_statement(block, index, |writer, indent| writer.render_shell(child, indent));
                            }
                        }
                    }
                }
            }
        }
    }

    /// Insert the statement of `block`'s item at `index`. A block without
    /// braces only takes statements next to a sibling written with a
    /// dotted name; the rest waits for an ancestor to write the block out.
    fn place_statement(
        &mut self,
        block: ElementId,
        index: usize,
        render: impl FnOnce(&Self, &str) -> String,
    ) {
        if let Body::None = self.body(block) {
            if let Some((anchor, prefix)) = self.qualified_anchor(block, index) {
                let indent = line_indent(self.text, anchor.statement.start()).to_string();
                let (offset, placement) = self.after(anchor.statement.end());
                let statement = format!("{prefix}{}", render(self, &indent));
                self.push_statement(Insertion { offset, placement, indent }, &statement);
            }
            return;
        }
        let insertion = self.block_insertion(block, index);
        let statement = render(self, &insertion.indent);
        self.push_statement(insertion, &statement);
    }

    fn push_statement(&mut self, insertion: Insertion, statement: &str) {
        let Insertion {
            offset,
            placement,
            indent,
        } = insertion;
        trace!(?offset, ?placement, "insert statement");
        let text = match placement {
            Placement::Line => {
                let lead = if offset > TextSize::new(0) && !self.text[..usize::from(offset)].ends_with('\n') {
                    "\n"
                } else {
                    ""
                };
                format!("{lead}{indent}{statement}\n")
            }
            Placement::After => format!("\n{indent}{statement}"),
            Placement::Open => format!("\n{indent}{statement}\n{indent}"),
            Placement::Collapse { interior, outer } => {
                if self.collapsed.insert(interior) {
                    self.push(interior, String::new());
                    self.edits.push(TextEdit {
                        range: TextRange::empty(interior.end()),
                        text: format!("\n{outer}"),
                        seq: u32::MAX,
                    });
                }
                format!("\n{indent}{statement}")
            }
            Placement::Close { outer } => {
                if self.collapsed.insert(TextRange::empty(offset)) {
                    self.edits.push(TextEdit {
                        range: TextRange::empty(offset),
                        text: format!("\n{outer}"),
                        seq: u32::MAX,
                    });
                }
                format!("\n{indent}{statement}")
            }
        };
        self.insert(offset, text);
    }

    fn body(&self, block: ElementId) -> Body {
        if block == self.tree.root() {
            return Body::File;
        }
        match self.tree.element(block).backing().and_then(|handle| handle.body) {
            Some(body) => Body::Braces(body),
            None => Body::None,
        }
    }

    /// Where a new statement at `index` of `block` goes
    fn block_insertion(&self, block: ElementId, index: usize) -> Insertion {
        let indent = self.child_indent(block);
        if let Some(end) = self.block_anchor(block, index) {
            let (offset, placement) = self.after(end);
            return Insertion {
                offset,
                placement,
                indent,
            };
        }
        match self.body(block) {
            Body::Braces(body) => {
                let open = body.start() + TextSize::of('{');
                let close = body.end() - TextSize::of('}');
                let line_end = line_end(self.text, open);
                let (offset, placement) = if line_end < close && edit::is_trivia(self.slice(TextRange::new(open, line_end))) {
                    (edit::next_line_start(self.text, open), Placement::Line)
                } else if open <= close && self.slice(TextRange::new(open, close)).trim().is_empty() {
                    let outer = self.outer_indent(block);
                    (
                        close,
                        Placement::Collapse {
                            interior: TextRange::new(open, close),
                            outer,
                        },
                    )
                } else {
                    (open, Placement::Open)
                };
                Insertion {
                    offset,
                    placement,
                    indent,
                }
            }
            Body::File | Body::None => Insertion {
                offset: edit::file_start(self.text),
                placement: Placement::Line,
                indent,
            },
        }
    }

    /// Insert after text ending at `end`: on the next line when the rest of
    /// the line is trivia, otherwise right there.
    fn after(&self, end: TextSize) -> (TextSize, Placement) {
        let line_end = line_end(self.text, end);
        let rest = self.slice(TextRange::new(end, line_end));
        if edit::is_trivia(rest) {
            (edit::next_line_start(self.text, end), Placement::Line)
        } else if rest.trim_start().starts_with('}') {
            let outer = line_indent(self.text, end).to_string();
            (end, Placement::Close { outer })
        } else {
            (end, Placement::After)
        }
    }

    /// End of the nearest previous sibling that has text in the block body
    fn block_anchor(&self, block: ElementId, index: usize) -> Option<TextSize> {
        let items = self.tree.items(block)?;
        (0..index).rev().filter_map(|i| items.get(i)).find_map(|item| match item.state {
            ElementState::ToBeAdded | ElementState::Moved => None,
            ElementState::Existing | ElementState::ToBeRemoved => self.text_end(item.id),
        })
    }

    /// The previous sibling written with a dotted name, and that name's
    /// prefix (`android.defaultConfig.`)
    fn qualified_anchor(&self, block: ElementId, index: usize) -> Option<(SyntaxHandle, String)> {
        let items = self.tree.items(block)?;
        let handle = (0..index).rev().filter_map(|i| items.get(i)).find_map(|item| {
            self.tree
                .element(item.id)
                .backing()
                .filter(|handle| handle.qualified && handle.is_statement())
                .copied()
        })?;
        let text = self.slice(handle.statement);
        let head_len = text
            .find(|c: char| !(c == '.' || c == '_' || c.is_alphanumeric()))
            .unwrap_or(text.len());
        let prefix = &text[..head_len];
        let dot = prefix.rfind('.')?;
        Some((handle, prefix[..=dot].to_string()))
    }

    /// Where an element's text ends, for elements written inside their
    /// parent's body. Elements implied by their children end with them.
    fn text_end(&self, id: ElementId) -> Option<TextSize> {
        let element = self.tree.element(id);
        match (element.backing(), element.raw_backing()) {
            (Some(handle), _) if handle.qualified => None,
            (Some(handle), _) => Some(handle.statement.end()),
            (None, Some(_)) => None,
            (None, None) => element
                .kind()
                .children()?
                .iter()
                .filter(|item| matches!(item.state, ElementState::Existing | ElementState::ToBeRemoved))
                .filter_map(|item| self.text_end(item.id))
                .max(),
        }
    }

    fn outer_indent(&self, block: ElementId) -> String {
        self.tree
            .element(block)
            .backing()
            .map_or("", |handle| line_indent(self.text, handle.statement.start()))
            .to_string()
    }

    /// Indentation of `block`'s statements: that of an existing child on a
    /// line of its own, else one level deeper than the block
    fn child_indent(&self, block: ElementId) -> String {
        if block == self.tree.root() {
            return String::new();
        }
        let existing = self.tree.children(block).into_iter().find_map(|child| {
            let handle = self.tree.element(child).backing()?;
            if handle.qualified || !handle.is_statement() {
                return None;
            }
            let start = handle.statement.start();
            let ls = line_start(self.text, start);
            let before = self.slice(TextRange::new(ls, start));
            edit::is_blank(before).then(|| before.to_string())
        });
        existing.unwrap_or_else(|| format!("{}{}", self.outer_indent(block), self.emit.unit()))
    }

    /// Whether every child of a block was removed, directly or by removing
    /// all of a child block's children
    fn is_emptied(&self, id: ElementId) -> bool {
        if id == self.tree.root() || !self.tree.element(id).is_block() {
            return false;
        }
        let Some(items) = self.tree.items(id) else {
            return false;
        };
        !items.is_empty()
            && items.iter().all(|item| match item.state {
                ElementState::ToBeRemoved => true,
                ElementState::Existing => self.is_emptied(item.id),
                ElementState::ToBeAdded | ElementState::Moved => false,
            })
    }

    /// New content of a block without braces that no dotted sibling can
    /// take: new statements and child blocks that have such content
    fn shell_items(&self, block: ElementId) -> Vec<ElementId> {
        let Some(items) = self.tree.items(block) else {
            return Vec::new();
        };
        items
            .iter()
            .enumerate()
            .filter(|(index, item)| match item.state {
                ElementState::ToBeAdded | ElementState::Moved => self.qualified_anchor(block, *index).is_none(),
                ElementState::Existing => {
                    let element = self.tree.element(item.id);
                    element.is_block() && element.backing().is_none() && !self.shell_items(item.id).is_empty()
                }
                ElementState::ToBeRemoved => false,
            })
            .map(|(_, item)| item.id)
            .collect()
    }

    /// `name { ... }` holding a brace-less block's new content
    fn render_shell(&self, block: ElementId, indent: &str) -> String {
        let inner = format!("{indent}{}", self.emit.unit());
        let lines: Vec<String> = self
            .shell_items(block)
            .into_iter()
            .map(|child| {
                let element = self.tree.element(child);
                let body = if element.is_block() && element.backing().is_none() && element.raw_backing().is_none() {
                    match self.tree.items(block).and_then(|items| items.state(child)) {
                        Some(ElementState::Existing) => self.render_shell(child, &inner),
                        _ => self.emit.statement(child, &inner),
                    }
                } else {
                    self.emit.statement(child, &inner)
                };
                format!("{inner}{body}")
            })
            .collect();
        self.emit.wrap_block(block, &lines, indent)
    }

    // =========================================================================
    // Elements
    // =========================================================================

    /// Delete the text of a removed element; elements implied by their
    /// children lose every child's text.
    fn delete_element(&mut self, id: ElementId) {
        let element = self.tree.element(id);
        match element.raw_backing().copied() {
            Some(handle) if handle.is_statement() => self.delete_statement(handle.statement),
            Some(handle) => {
                let range = handle.range;
                if !self.deleted.iter().any(|done| done.contains_range(range)) {
                    self.deleted.push(range);
                    self.push(range, String::new());
                }
            }
            None => {
                let children: Vec<ElementItem> = element
                    .kind()
                    .children()
                    .map(|items| items.iter().copied().collect())
                    .unwrap_or_default();
                for child in children {
                    if child.state != ElementState::ToBeAdded {
                        self.delete_element(child.id);
                    }
                }
            }
        }
    }

    fn write_element(&mut self, id: ElementId) {
        match self.tree.element(id).kind() {
            ElementKind::Literal(_) => self.rewrite_literal(id),
            ElementKind::Block { .. } => self.write_block(id),
            _ => self.write_items(id),
        }
    }

    fn rewrite_literal(&mut self, id: ElementId) {
        let element = self.tree.element(id);
        if !element.is_modified() {
            return;
        }
        let Some(handle) = element.backing().copied() else {
            return;
        };
        match handle.value {
            Some(value) => {
                let text = self.emit.value(id);
                self.push(value, text);
            }
            None if handle.is_statement() => {
                let indent = line_indent(self.text, handle.statement.start()).to_string();
                let text = self.emit.statement(id, &indent);
                self.push(handle.statement, text);
            }
            None => {}
        }
    }

    /// Items of a list, map, call or infix statement
    fn write_items(&mut self, container: ElementId) {
        let element = self.tree.element(container);
        let own = element.backing().copied();
        let Some(items) = element.kind().children() else {
            return;
        };
        let items: Vec<ElementItem> = items.iter().copied().collect();

        // `[]`, `mapOf()`: nothing of the old text survives, so write it anew
        if let Some(own) = own.filter(|handle| handle.body.is_some()) {
            let survivors = items
                .iter()
                .any(|item| item.state == ElementState::Existing && self.member(item.id, own.statement).is_some());
            if !survivors && items.iter().any(|item| item.state != ElementState::Existing) {
                let text = self.emit.value(container);
                self.push(own.value.unwrap_or(own.range), text);
                return;
            }
        }

        for item in &items {
            if item.state == ElementState::Existing && self.tree.has_pending_changes(item.id) {
                self.write_element(item.id);
            }
        }
        self.delete_items(container, own, &items);
        for index in 0..items.len() {
            if matches!(items[index].state, ElementState::ToBeAdded | ElementState::Moved) {
                self.insert_item(container, own, &items, index);
            }
        }
    }

    /// The range of an item written inside `statement`
    fn member(&self, id: ElementId, statement: TextRange) -> Option<TextRange> {
        self.tree
            .element(id)
            .raw_backing()
            .filter(|handle| handle.statement == statement)
            .map(|handle| handle.range)
    }

    fn delete_items(&mut self, container: ElementId, own: Option<SyntaxHandle>, items: &[ElementItem]) {
        let gone = |state: ElementState| matches!(state, ElementState::ToBeRemoved | ElementState::Moved);
        let mut statements = Vec::new();
        for item in items.iter().filter(|item| gone(item.state)) {
            match self.tree.element(item.id).raw_backing() {
                Some(handle) if !statements.contains(&handle.statement) => statements.push(handle.statement),
                Some(_) => {}
                None if item.state == ElementState::ToBeRemoved => self.delete_element(item.id),
                None => {}
            }
        }

        for statement in statements {
            let mut members: Vec<(TextRange, bool)> = items
                .iter()
                .filter_map(|item| self.member(item.id, statement).map(|range| (range, gone(item.state))))
                .collect();
            members.sort_by_key(|(range, _)| range.start());

            let enclosed = own.is_some_and(|own| own.statement == statement && own.body.is_some());
            if !enclosed && members.iter().all(|(_, gone)| *gone) {
                self.delete_statement(statement);
                continue;
            }
            trace!(container = ?container, ?statement, "delete items");

            let mut start = 0;
            while start < members.len() {
                if !members[start].1 {
                    start += 1;
                    continue;
                }
                let mut end = start;
                while end + 1 < members.len() && members[end + 1].1 {
                    end += 1;
                }
                let range = match (start.checked_sub(1), members.get(end + 1)) {
                    (_, Some((next, _))) => TextRange::new(members[start].0.start(), next.start()),
                    (Some(prev), None) => TextRange::new(members[prev].0.end(), members[end].0.end()),
                    (None, None) => TextRange::new(members[start].0.start(), members[end].0.end()),
                };
                self.push(range, String::new());
                start = end + 1;
            }
        }
    }

    /// The statement new items of `container` are written into, if they
    /// can join it rather than needing statements of their own
    fn item_statement(&self, container: ElementId, own: Option<SyntaxHandle>) -> Option<TextRange> {
        let own = own?;
        let element = self.tree.element(container);
        let joins = match element.kind() {
            ElementKind::Infix { .. } => true,
            _ if own.body.is_some() => true,
            ElementKind::Map { literal: false, .. } | ElementKind::MethodCall { .. } => own.is_statement(),
            ElementKind::List {
                collection: CollectionKind::Varargs,
                ..
            } => {
                let holder = self.tree.enclosing_block(container).unwrap_or(self.tree.root());
                own.is_statement()
                    && model_effect(self.tree, &element.name().full(), Some(2), holder).is_some()
            }
            _ => false,
        };
        joins.then_some(own.statement)
    }

    fn insert_item(&mut self, container: ElementId, own: Option<SyntaxHandle>, items: &[ElementItem], index: usize) {
        let id = items[index].id;

        // Lists merged from several statements grow after the statement of
        // the item before the new one
        let is_list = matches!(self.tree.element(container).kind(), ElementKind::List { .. });
        let previous = items[..index]
            .iter()
            .rev()
            .filter(|item| is_list && item.state == ElementState::Existing)
            .find_map(|item| self.tree.element(item.id).raw_backing().copied());
        if let Some(previous) = previous.filter(|handle| own.is_none_or(|own| own.statement != handle.statement)) {
            self.insert_after_item(container, id, previous);
            return;
        }

        if let Some(statement) = self.item_statement(container, own) {
            let separator = if matches!(self.tree.element(container).kind(), ElementKind::Infix { .. }) {
                " "
            } else {
                ", "
            };
            let kept: Vec<(usize, TextRange)> = items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.state == ElementState::Existing)
                .filter_map(|(i, item)| self.member(item.id, statement).map(|range| (i, range)))
                .collect();
            let text = self.emit.item(container, id);
            match (
                kept.iter().rev().find(|(i, _)| *i < index),
                kept.iter().find(|(i, _)| *i > index),
            ) {
                (Some((_, before)), _) => self.insert(before.end(), format!("{separator}{text}")),
                (None, Some((_, after))) => self.insert(after.start(), format!("{text}{separator}")),
                (None, None) => self.insert(statement.end(), format!("{separator}{text}")),
            }
            return;
        }

        // A statement of its own, next to the item before it
        let Some(holder) = self.tree.enclosing_block(container) else {
            return;
        };
        let statement = self.emit.item_statement(container, id);
        let anchor = (0..index)
            .rev()
            .find_map(|i| {
                let item = items[i];
                match item.state {
                    ElementState::Existing | ElementState::ToBeRemoved => self
                        .tree
                        .element(item.id)
                        .raw_backing()
                        .map(|handle| handle.statement),
                    ElementState::ToBeAdded | ElementState::Moved => None,
                }
            })
            .or_else(|| own.map(|handle| handle.statement));
        match anchor {
            Some(anchor) => {
                let indent = line_indent(self.text, anchor.start()).to_string();
                let (offset, placement) = self.after(anchor.end());
                self.push_statement(
                    Insertion {
                        offset,
                        placement,
                        indent,
                    },
                    &statement,
                );
            }
            None => {
                let position = self
                    .tree
                    .items(holder)
                    .and_then(|items| items.position(container))
                    .unwrap_or(0);
                self.place_statement(holder, position, |_, _| statement);
            }
        }
    }

    /// Add `id` right after `previous`, an item written in a statement the
    /// container does not own. The item joins that statement when it takes
    /// more arguments, else gets a statement of the same name below it.
    fn insert_after_item(&mut self, container: ElementId, id: ElementId, previous: SyntaxHandle) {
        let name = leading_name(self.slice(previous.statement));
        let holder = self.tree.enclosing_block(container).unwrap_or(self.tree.root());
        let method = name.rsplit('.').next().unwrap_or(name);
        let joins = previous.enclosed || model_effect(self.tree, method, Some(2), holder).is_some();
        trace!(container = ?container, name, joins, "append after merged statement");

        if joins {
            let text = self.emit.item(container, id);
            self.insert(previous.range.end(), format!(", {text}"));
            return;
        }
        let statement = self.emit.call_statement(name, id);
        let indent = line_indent(self.text, previous.statement.start()).to_string();
        let (offset, placement) = self.after(previous.statement.end());
        self.push_statement(
            Insertion {
                offset,
                placement,
                indent,
            },
            &statement,
        );
    }
}

/// The dotted name a statement starts with: `proguardFile` of
/// `proguardFile 'a.pro'`
fn leading_name(statement: &str) -> &str {
    let end = statement
        .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '.' | '$')))
        .unwrap_or(statement.len());
    &statement[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Dialect;
    use crate::dsl::{DslName, ExternalSyntax, LiteralValue, lower::lower_file};
    use crate::parser::parse;
    use crate::semantics::BlockKind;

    fn lower(text: &str, dialect: Dialect) -> DslTree {
        let mut tree = DslTree::new(dialect, None);
        lower_file(&mut tree, &parse(text));
        tree
    }

    fn written(text: &str, tree: &DslTree) -> String {
        write(text, tree, &WriterOptions::default()).unwrap()
    }

    #[test]
    fn test_unchanged_tree_is_identity() {
        let text = "android {\n  compileSdk 30 // keep\n}\n";
        let tree = lower(text, Dialect::Groovy);
        assert_eq!(written(text, &tree), text);
    }

    #[test]
    fn test_literal_value_rewrite() {
        let text = "android {\n    compileSdkVersion 30\n    namespace 'a'\n}\n";
        let mut tree = lower(text, Dialect::Groovy);
        let android = tree.find_block(&["android"]).unwrap();
        let namespace = tree.get_property_element(android, "namespace").unwrap();
        tree.set_literal_value(namespace, "b".into()).unwrap();
        assert_eq!(
            written(text, &tree),
            "android {\n    compileSdkVersion 30\n    namespace 'b'\n}\n"
        );
    }

    #[test]
    fn test_insert_after_sibling_uses_its_indent() {
        let text = "android {\n  namespace 'a'\n}\n";
        let mut tree = lower(text, Dialect::Groovy);
        let android = tree.find_block(&["android"]).unwrap();
        let sdk = tree.new_literal(DslName::new("compileSdk"), 33.into());
        tree.set_external_syntax(sdk, ExternalSyntax::Assignment);
        tree.set_new_element(android, sdk).unwrap();
        assert_eq!(written(text, &tree), "android {\n  namespace 'a'\n  compileSdk = 33\n}\n");
    }

    #[test]
    fn test_removed_last_child_removes_block() {
        let text = "plugins {\n}\nandroid {\n    defaultConfig {\n        minSdkVersion 21\n    }\n}\n";
        let mut tree = lower(text, Dialect::Groovy);
        let config = tree.find_block(&["android", "defaultConfig"]).unwrap();
        assert_eq!(tree.remove_property_by_name(config, "minSdkVersion"), 1);
        assert_eq!(written(text, &tree), "plugins {\n}\n");
    }

    #[test]
    fn test_empty_body_is_opened() {
        let text = "android { }\n";
        let mut tree = lower(text, Dialect::KotlinScript);
        let android = tree.find_block(&["android"]).unwrap();
        let namespace = tree.new_literal(DslName::new("namespace"), "a".into());
        tree.set_external_syntax(namespace, ExternalSyntax::Assignment);
        tree.set_new_element(android, namespace).unwrap();
        assert_eq!(written(text, &tree), "android {\n    namespace = \"a\"\n}\n");
    }

    #[test]
    fn test_dotted_statement_gets_dotted_sibling() {
        let text = "android.defaultConfig.minSdkVersion 21\n";
        let mut tree = lower(text, Dialect::Groovy);
        let config = tree.find_block(&["android", "defaultConfig"]).unwrap();
        let target = tree.new_literal(DslName::new("targetSdkVersion"), 33.into());
        tree.set_external_syntax(target, ExternalSyntax::Method);
        tree.set_new_element(config, target).unwrap();
        assert_eq!(
            written(text, &tree),
            "android.defaultConfig.minSdkVersion 21\nandroid.defaultConfig.targetSdkVersion 33\n"
        );
    }

    #[test]
    fn test_missing_blocks_are_written_out() {
        let text = "// header\n\napply plugin: 'x'\n";
        let mut tree = lower(text, Dialect::Groovy);
        let root = tree.root();
        let android = tree.new_block(DslName::new("android"), BlockKind::Android);
        tree.add_new_element_at(root, 0, android).unwrap();
        let namespace = tree.new_literal(DslName::new("namespace"), "a".into());
        tree.set_external_syntax(namespace, ExternalSyntax::Method);
        tree.set_new_element(android, namespace).unwrap();
        assert_eq!(
            written(text, &tree),
            "// header\n\nandroid {\n    namespace 'a'\n}\napply plugin: 'x'\n"
        );
    }

    #[test]
    fn test_list_items() {
        let text = "android { defaultConfig {\n    resConfigs 'en', 'fr'\n} }\n";
        let mut tree = lower(text, Dialect::Groovy);
        let config = tree.find_block(&["android", "defaultConfig"]).unwrap();
        let list = tree.get_property_element(config, "resConfigs").unwrap();
        let en = tree.children(list)[0];
        tree.remove_property(list, en).unwrap();
        let de = tree.new_literal(DslName::empty(), LiteralValue::from("de"));
        tree.add_new_element_at(list, 1, de).unwrap();
        assert_eq!(
            written(text, &tree),
            "android { defaultConfig {\n    resConfigs 'fr', 'de'\n} }\n"
        );
    }
}
