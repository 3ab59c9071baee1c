//! Elements of the Dsl tree and their container bookkeeping.

use rowan::TextRange;
use smol_str::SmolStr;

use super::name::DslName;
use super::value::LiteralValue;
use crate::parser::SyntaxKind;
use crate::semantics::{BlockKind, ModelEffectDescription};

/// Index of an element in its [`DslTree`](super::DslTree) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Pending state of a container item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementState {
    /// Backed by text that is still current
    #[default]
    Existing,
    /// Added by a mutation, not yet written
    ToBeAdded,
    /// Removed by a mutation, text not yet deleted
    ToBeRemoved,
    /// Relocated; its old text is copied to the new position on write
    Moved,
}

impl ElementState {
    /// Whether the item is part of the semantic model
    pub fn is_relevant(self) -> bool {
        !matches!(self, Self::ToBeRemoved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementType {
    #[default]
    Regular,
    /// `def x = ...`, `val x = ...`
    Variable,
    /// Implied by its parent; no text of its own
    Derived,
    /// Positional item of a list or argument list
    Fake,
}

/// How an element is spelled in source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExternalSyntax {
    #[default]
    Unknown,
    Assignment,
    AugmentedAssignment,
    Method,
    SetMethod,
}

/// KTS collection constructor a list was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollectionKind {
    /// `[a, b]`
    #[default]
    Bracket,
    ListOf,
    MutableListOf,
    SetOf,
    MutableSetOf,
    ArrayOf,
    /// Bare arguments: `resConfigs 'en', 'fr'`
    Varargs,
}

impl CollectionKind {
    pub fn from_function(name: &str) -> Option<Self> {
        match name {
            "listOf" | "listOfNotNull" => Some(Self::ListOf),
            "mutableListOf" | "arrayListOf" => Some(Self::MutableListOf),
            "setOf" => Some(Self::SetOf),
            "mutableSetOf" | "hashSetOf" => Some(Self::MutableSetOf),
            "arrayOf" => Some(Self::ArrayOf),
            _ => None,
        }
    }

    pub fn function(self) -> Option<&'static str> {
        match self {
            Self::ListOf => Some("listOf"),
            Self::MutableListOf => Some("mutableListOf"),
            Self::SetOf => Some("setOf"),
            Self::MutableSetOf => Some("mutableSetOf"),
            Self::ArrayOf => Some("arrayOf"),
            Self::Bracket | Self::Varargs => None,
        }
    }
}

/// One child slot of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementItem {
    pub id: ElementId,
    pub state: ElementState,
}

/// Ordered children of a container, removed items included until written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementList {
    items: Vec<ElementItem>,
}

impl ElementList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every slot in physical order
    pub fn iter(&self) -> impl Iterator<Item = &ElementItem> + '_ {
        self.items.iter()
    }

    /// Ids of items that are part of the model, in order
    pub fn relevant(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.items
            .iter()
            .filter(|item| item.state.is_relevant())
            .map(|item| item.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn state(&self, id: ElementId) -> Option<ElementState> {
        self.items.iter().find(|item| item.id == id).map(|item| item.state)
    }

    pub fn get(&self, index: usize) -> Option<&ElementItem> {
        self.items.get(index)
    }

    pub(crate) fn push(&mut self, id: ElementId, state: ElementState) {
        self.items.push(ElementItem { id, state });
    }

    pub(crate) fn insert(&mut self, index: usize, id: ElementId, state: ElementState) {
        let index = index.min(self.items.len());
        self.items.insert(index, ElementItem { id, state });
    }

    /// Physical index of the `relevant`-th relevant item, or the end
    pub(crate) fn physical_index(&self, relevant: usize) -> usize {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.state.is_relevant())
            .nth(relevant)
            .map_or(self.items.len(), |(i, _)| i)
    }

    pub(crate) fn set_state(&mut self, id: ElementId, state: ElementState) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.state = state;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: ElementId) -> Option<ElementItem> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    pub(crate) fn replace_id(&mut self, old: ElementId, new: ElementId, state: ElementState) -> bool {
        match self.items.iter_mut().find(|item| item.id == old) {
            Some(item) => {
                item.id = new;
                item.state = state;
                true
            }
            None => false,
        }
    }
}

/// Weak link from an element to the text it was lowered from.
///
/// Ranges index the text the tree was built from. A handle is invalidated by
/// moving its element and never survives a reparse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyntaxHandle {
    /// Kind of the node at `range`
    pub kind: SyntaxKind,
    /// The element's own text: a whole statement, or one item inside it
    pub range: TextRange,
    /// The statement the element belongs to
    pub statement: TextRange,
    /// Text replaced when the element's value changes
    pub value: Option<TextRange>,
    /// `{ }` of a block, or the brackets of a literal collection
    pub body: Option<TextRange>,
    /// Item written inside a bracketed literal (`[a, b]`, `listOf(a)`)
    pub enclosed: bool,
    /// Statement written with a dotted name outside its parent's body
    pub qualified: bool,
    pub(crate) stale: bool,
}

impl SyntaxHandle {
    pub fn for_statement(kind: SyntaxKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            statement: range,
            value: None,
            body: None,
            enclosed: false,
            qualified: false,
            stale: false,
        }
    }

    pub fn for_item(kind: SyntaxKind, range: TextRange, statement: TextRange) -> Self {
        Self {
            statement,
            ..Self::for_statement(kind, range)
        }
    }

    pub fn with_value(mut self, value: TextRange) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_body(mut self, body: TextRange) -> Self {
        self.body = Some(body);
        self
    }

    /// Whether this handle covers a whole statement rather than an item
    pub fn is_statement(&self) -> bool {
        self.range == self.statement
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }
}

/// Structural variant of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Literal(LiteralValue),
    /// Ordered values; `appendable` when written as bare varargs
    List {
        items: ElementList,
        appendable: bool,
        collection: CollectionKind,
    },
    /// Keyed values in insertion order; `literal` for `[k: v]`/`mapOf(..)`,
    /// otherwise named arguments (`apply plugin: 'x'`)
    Map { items: ElementList, literal: bool },
    MethodCall {
        method: SmolStr,
        args: ElementList,
    },
    /// `id 'x' version '1.0'`: one named slot per part
    Infix { items: ElementList },
    /// A properties block; `header` is the method of `create("x") { }`
    Block {
        items: ElementList,
        kind: BlockKind,
        header: Option<SmolStr>,
    },
}

impl ElementKind {
    pub fn children(&self) -> Option<&ElementList> {
        match self {
            Self::Literal(_) => None,
            Self::List { items, .. }
            | Self::Map { items, .. }
            | Self::Infix { items }
            | Self::Block { items, .. } => Some(items),
            Self::MethodCall { args, .. } => Some(args),
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut ElementList> {
        match self {
            Self::Literal(_) => None,
            Self::List { items, .. }
            | Self::Map { items, .. }
            | Self::Infix { items }
            | Self::Block { items, .. } => Some(items),
            Self::MethodCall { args, .. } => Some(args),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::List { .. } => "list",
            Self::Map { .. } => "map",
            Self::MethodCall { .. } => "method call",
            Self::Infix { .. } => "infix expression",
            Self::Block { .. } => "block",
        }
    }
}

/// A node of the semantic model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DslElement {
    pub(crate) name: DslName,
    pub(crate) kind: ElementKind,
    pub(crate) element_type: ElementType,
    pub(crate) parent: Option<ElementId>,
    pub(crate) external_syntax: ExternalSyntax,
    pub(crate) effect: Option<ModelEffectDescription>,
    pub(crate) backing: Option<SyntaxHandle>,
    pub(crate) modified: bool,
}

impl DslElement {
    pub(crate) fn new(name: DslName, kind: ElementKind) -> Self {
        Self {
            name,
            kind,
            element_type: ElementType::Regular,
            parent: None,
            external_syntax: ExternalSyntax::Unknown,
            effect: None,
            backing: None,
            modified: false,
        }
    }

    pub fn name(&self) -> &DslName {
        &self.name
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn external_syntax(&self) -> ExternalSyntax {
        self.external_syntax
    }

    pub fn effect(&self) -> Option<&ModelEffectDescription> {
        self.effect.as_ref()
    }

    /// Backing text, unless the element was moved since it was lowered
    pub fn backing(&self) -> Option<&SyntaxHandle> {
        self.backing.as_ref().filter(|handle| !handle.stale)
    }

    pub(crate) fn raw_backing(&self) -> Option<&SyntaxHandle> {
        self.backing.as_ref()
    }

    /// Lowered from a statement that is only a name, such as `` `java-library` ``
    pub(crate) fn is_bare_name(&self) -> bool {
        self.backing.as_ref().is_some_and(|handle| handle.kind == SyntaxKind::NAME_STMT)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Name used for lookups: the model property when the element has one
    pub fn lookup_name(&self) -> String {
        match &self.effect {
            Some(effect) => effect.property.name.to_string(),
            None => self.name.full(),
        }
    }

    pub fn literal(&self) -> Option<&LiteralValue> {
        match &self.kind {
            ElementKind::Literal(value) => Some(value),
            _ => None,
        }
    }

    pub fn block_kind(&self) -> Option<BlockKind> {
        match &self.kind {
            ElementKind::Block { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, ElementKind::Block { .. })
    }
}
