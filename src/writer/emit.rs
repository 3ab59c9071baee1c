//! Rendering elements as source text, per dialect.

use crate::base::Dialect;
use crate::dsl::{
    CollectionKind, DslTree, ElementId, ElementKind, ElementType, ExternalSyntax, LiteralValue,
};

/// Infix parts written as a call in Kotlin script: `id("x") version "1"`
const CALL_PARTS: &[&str] = &["id", "kotlin", "alias"];

pub(super) struct Emitter<'a> {
    tree: &'a DslTree,
    dialect: Dialect,
    unit: String,
}

impl<'a> Emitter<'a> {
    pub fn new(tree: &'a DslTree, unit: String) -> Self {
        Self {
            tree,
            dialect: tree.dialect(),
            unit,
        }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    fn kotlin(&self) -> bool {
        self.dialect.is_kotlin_like()
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// A whole statement. Lines after the first are indented relative to
    /// `indent`; the first line is not indented.
    pub fn statement(&self, id: ElementId, indent: &str) -> String {
        let element = self.tree.element(id);
        let name = element.name().full();

        if element.element_type() == ElementType::Variable {
            let keyword = if self.kotlin() { "val" } else { "def" };
            return format!("{keyword} {name} = {}", self.value(id));
        }

        match element.kind() {
            ElementKind::Block { .. } => self.block(id, indent),
            ElementKind::Infix { .. } => self.infix(id),
            ElementKind::MethodCall { method, .. } if name.is_empty() || name == method.as_str() => self.value(id),
            ElementKind::MethodCall { .. } if self.kotlin() => format!("{name} = {}", self.value(id)),
            ElementKind::MethodCall { .. } => format!("{name} {}", self.value(id)),
            ElementKind::Map { literal: false, .. } if self.kotlin() => format!("{name}({})", self.value(id)),
            ElementKind::Map { literal: false, .. } => format!("{name} {}", self.value(id)),
            ElementKind::List {
                collection: CollectionKind::Varargs,
                ..
            } if self.kotlin() => format!("{name}({})", self.value(id)),
            ElementKind::List {
                collection: CollectionKind::Varargs,
                ..
            } => format!("{name} {}", self.value(id)),
            ElementKind::Literal(_) | ElementKind::List { .. } | ElementKind::Map { .. } => {
                self.shaped(id, &name)
            }
        }
    }

    /// A literal or collection written the way its external syntax says
    fn shaped(&self, id: ElementId, name: &str) -> String {
        let value = self.value(id);
        let collection = !matches!(self.tree.element(id).kind(), ElementKind::Literal(_));
        match self.tree.element(id).external_syntax() {
            ExternalSyntax::AugmentedAssignment => format!("{name} += {value}"),
            ExternalSyntax::SetMethod => format!("{name}({value})"),
            ExternalSyntax::Method if self.kotlin() || collection => format!("{name}({value})"),
            ExternalSyntax::Method => format!("{name} {value}"),
            ExternalSyntax::Unknown if !self.kotlin() && !collection => format!("{name} {value}"),
            ExternalSyntax::Assignment | ExternalSyntax::Unknown => format!("{name} = {value}"),
        }
    }

    fn block(&self, id: ElementId, indent: &str) -> String {
        let inner = format!("{indent}{}", self.unit);
        let lines: Vec<String> = self
            .tree
            .children(id)
            .into_iter()
            .map(|child| format!("{inner}{}", self.statement(child, &inner)))
            .collect();
        self.wrap_block(id, &lines, indent)
    }

    /// `header {` + lines + `}`
    pub fn wrap_block(&self, id: ElementId, lines: &[String], indent: &str) -> String {
        let header = self.block_header(id);
        if lines.is_empty() {
            return format!("{header} {{\n{indent}}}");
        }
        format!("{header} {{\n{}\n{indent}}}", lines.join("\n"))
    }

    /// `release` in Groovy, `getByName("release")` for a named child in
    /// Kotlin script
    fn block_header(&self, id: ElementId) -> String {
        let element = self.tree.element(id);
        let name = element.name().full();
        if !self.kotlin() {
            return name;
        }
        let container = self
            .tree
            .parent(id)
            .and_then(|parent| self.tree.block_kind(parent))
            .filter(|kind| kind.is_named_container());
        match (container, element.kind()) {
            (Some(_), ElementKind::Block { header: Some(method), .. }) => format!("{method}(\"{name}\")"),
            (Some(kind), _) => format!("{}(\"{name}\")", kind.named_child_method(&name)),
            (None, _) => name,
        }
    }

    fn infix(&self, id: ElementId) -> String {
        self.tree
            .children(id)
            .into_iter()
            .map(|part| self.part(part))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One part of an infix statement
    fn part(&self, id: ElementId) -> String {
        let element = self.tree.element(id);
        let name = element.name().full();
        match element.kind() {
            ElementKind::MethodCall { .. } => self.value(id),
            _ if self.kotlin() && CALL_PARTS.contains(&name.as_str()) => format!("{name}({})", self.value(id)),
            _ => format!("{name} {}", self.value(id)),
        }
    }

    /// One item of `container` as written inside it
    pub fn item(&self, container: ElementId, id: ElementId) -> String {
        match self.tree.element(container).kind() {
            ElementKind::Infix { .. } => self.part(id),
            ElementKind::Map { literal, .. } => self.entry(id, *literal),
            ElementKind::MethodCall { .. } => self.argument(id),
            _ => self.value(id),
        }
    }

    /// A statement adding one item to a collection assembled from several
    /// statements: `manifestPlaceholders key: 'v'`, `proguardFile 'a.pro'`
    pub fn item_statement(&self, container: ElementId, id: ElementId) -> String {
        let name = self.tree.element(container).name().full();
        match self.tree.element(container).kind() {
            ElementKind::Map { .. } if self.kotlin() => {
                let key = self.tree.element(id).name().full();
                format!("{name}[{}] = {}", self.string(&key), self.value(id))
            }
            ElementKind::Map { .. } => format!("{name} {}", self.entry(id, false)),
            ElementKind::List { .. } => self.call_statement(&name, id),
            _ => self.statement(id, ""),
        }
    }

    /// `name 'x'` or `name("x")`
    pub fn call_statement(&self, name: &str, id: ElementId) -> String {
        if self.kotlin() {
            format!("{name}({})", self.value(id))
        } else {
            format!("{name} {}", self.value(id))
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// The expression text of an element
    pub fn value(&self, id: ElementId) -> String {
        let element = self.tree.element(id);
        match element.kind() {
            ElementKind::Literal(value) => self.literal(value),
            ElementKind::List { collection, .. } => {
                let items = self.joined(id, |item| self.value(item));
                match (collection, collection.function()) {
                    (CollectionKind::Varargs, _) => items,
                    (_, Some(function)) => format!("{function}({items})"),
                    (_, None) if self.kotlin() => format!("listOf({items})"),
                    (_, None) => format!("[{items}]"),
                }
            }
            ElementKind::Map { literal: true, .. } => {
                let entries = self.joined(id, |entry| self.entry(entry, true));
                match (self.kotlin(), entries.is_empty()) {
                    (true, _) => format!("mapOf({entries})"),
                    (false, true) => "[:]".to_string(),
                    (false, false) => format!("[{entries}]"),
                }
            }
            ElementKind::Map { literal: false, .. } => self.joined(id, |entry| self.entry(entry, false)),
            ElementKind::MethodCall { method, .. } => {
                format!("{method}({})", self.joined(id, |arg| self.argument(arg)))
            }
            ElementKind::Infix { .. } => self.infix(id),
            ElementKind::Block { .. } => element.name().full(),
        }
    }

    fn joined(&self, id: ElementId, render: impl Fn(ElementId) -> String) -> String {
        self.tree
            .children(id)
            .into_iter()
            .map(render)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// A map entry: `k: v`, `"k" to v` or the named argument `k = v`
    fn entry(&self, id: ElementId, literal: bool) -> String {
        let key = self.tree.element(id).name().full();
        let value = self.value(id);
        match (self.kotlin(), literal) {
            (true, true) => format!("{} to {value}", self.string(&key)),
            (true, false) => format!("{key} = {value}"),
            (false, _) if is_identifier(&key) => format!("{key}: {value}"),
            (false, _) => format!("{}: {value}", self.string(&key)),
        }
    }

    fn argument(&self, id: ElementId) -> String {
        if self.tree.element(id).name().is_empty() {
            self.value(id)
        } else {
            self.entry(id, false)
        }
    }

    pub fn literal(&self, value: &LiteralValue) -> String {
        match value {
            LiteralValue::String(s) => self.string(s),
            LiteralValue::Interpolated(s) => format!("\"{s}\""),
            LiteralValue::Integer(n) => n.to_string(),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::Decimal(s) | LiteralValue::Reference(s) | LiteralValue::Raw(s) => s.clone(),
            LiteralValue::Null => "null".to_string(),
        }
    }

    /// A quoted string: single quotes in Groovy, double quotes with `$`
    /// escaped in Kotlin script
    fn string(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        let quote = if self.kotlin() { '"' } else { '\'' };
        out.push(quote);
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '$' if self.kotlin() => out.push_str("\\$"),
                c if c == quote => {
                    out.push('\\');
                    out.push(c);
                }
                c => out.push(c),
            }
        }
        out.push(quote);
        out
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || unicode_ident::is_xid_start(c))
        && chars.all(unicode_ident::is_xid_continue)
}
