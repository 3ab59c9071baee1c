//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Accessors never fail on malformed input; they return `None` or skip.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use rowan::TextRange;

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    fn range(&self) -> TextRange {
        self.syntax().text_range()
    }
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast)
}

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

// ============================================================================
// Root and bodies
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);
ast_node!(BlockBody, BLOCK_BODY);

impl SourceFile {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        self.0.children().filter_map(Statement::cast)
    }
}

impl BlockBody {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        self.0.children().filter_map(Statement::cast)
    }

    /// Whether the closing brace is present
    pub fn is_closed(&self) -> bool {
        self.0
            .last_token()
            .is_some_and(|t| t.kind() == SyntaxKind::R_BRACE)
    }
}

// ============================================================================
// Statements
// ============================================================================

ast_node!(BlockStmt, BLOCK_STMT);
ast_node!(Assignment, ASSIGNMENT);
ast_node!(AugmentedAssignment, AUGMENTED_ASSIGNMENT);
ast_node!(Application, APPLICATION);
ast_node!(CallStmt, CALL_STMT);
ast_node!(InfixStmt, INFIX_STMT);
ast_node!(InfixPart, INFIX_PART);
ast_node!(VariableDecl, VARIABLE_DECL);
ast_node!(NameStmt, NAME_STMT);
ast_node!(UnknownStmt, UNKNOWN_STMT);

/// Any statement directly inside a file or block body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Block(BlockStmt),
    Assignment(Assignment),
    AugmentedAssignment(AugmentedAssignment),
    Application(Application),
    Call(CallStmt),
    Infix(InfixStmt),
    VariableDecl(VariableDecl),
    Name(NameStmt),
    Unknown(UnknownStmt),
}

impl AstNode for Statement {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_statement()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::BLOCK_STMT => Some(Self::Block(BlockStmt(node))),
            SyntaxKind::ASSIGNMENT => Some(Self::Assignment(Assignment(node))),
            SyntaxKind::AUGMENTED_ASSIGNMENT => {
                Some(Self::AugmentedAssignment(AugmentedAssignment(node)))
            }
            SyntaxKind::APPLICATION => Some(Self::Application(Application(node))),
            SyntaxKind::CALL_STMT => Some(Self::Call(CallStmt(node))),
            SyntaxKind::INFIX_STMT => Some(Self::Infix(InfixStmt(node))),
            SyntaxKind::VARIABLE_DECL => Some(Self::VariableDecl(VariableDecl(node))),
            SyntaxKind::NAME_STMT => Some(Self::Name(NameStmt(node))),
            SyntaxKind::UNKNOWN_STMT => Some(Self::Unknown(UnknownStmt(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Block(n) => n.syntax(),
            Self::Assignment(n) => n.syntax(),
            Self::AugmentedAssignment(n) => n.syntax(),
            Self::Application(n) => n.syntax(),
            Self::Call(n) => n.syntax(),
            Self::Infix(n) => n.syntax(),
            Self::VariableDecl(n) => n.syntax(),
            Self::Name(n) => n.syntax(),
            Self::Unknown(n) => n.syntax(),
        }
    }
}

impl BlockStmt {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    /// `("release")` in `getByName("release") { }`
    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<BlockBody> {
        child(&self.0)
    }
}

impl Assignment {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl AugmentedAssignment {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl Application {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }
}

impl CallStmt {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }
}

impl InfixStmt {
    pub fn parts(&self) -> impl Iterator<Item = InfixPart> + '_ {
        self.0.children().filter_map(InfixPart::cast)
    }
}

impl InfixPart {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    /// The single value of this part, whether bare or parenthesised
    pub fn value(&self) -> Option<Expr> {
        if let Some(args) = child::<ArgList>(&self.0) {
            return args.args().find_map(|arg| match arg {
                Arg::Positional(expr) => Some(expr),
                Arg::Named(_) => None,
            });
        }
        child(&self.0)
    }
}

impl VariableDecl {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }

    /// `val x by extra(1)`
    pub fn is_delegated(&self) -> bool {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .any(|t| t.kind() == SyntaxKind::IDENT && t.text() == "by")
    }
}

impl NameStmt {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }
}

// ============================================================================
// Names
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    /// Segments with backticks and index quotes removed:
    /// `a.b["c"]` gives `["a", "b", "c"]`
    pub fn segments(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter_map(|t| match t.kind() {
                SyntaxKind::IDENT => Some(unquote_ident(t.text()).to_string()),
                kind if kind.is_string() => Some(unquote_string(t.text())),
                _ => None,
            })
            .collect()
    }

    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

/// Strip the backticks of a Kotlin escaped identifier
pub fn unquote_ident(text: &str) -> &str {
    text.strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .unwrap_or(text)
}

/// Decode the contents of a string token of any quote style
pub fn unquote_string(text: &str) -> String {
    let inner = ["'''", "\"\"\"", "'", "\""]
        .iter()
        .find_map(|q| {
            text.strip_prefix(q)
                .and_then(|t| t.strip_suffix(q))
                .filter(|_| text.len() >= 2 * q.len())
        })
        .unwrap_or(text);

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}

// ============================================================================
// Arguments
// ============================================================================

ast_node!(ArgList, ARG_LIST);
ast_node!(NamedArg, NAMED_ARG);

/// One argument of a call or application
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arg {
    Named(NamedArg),
    Positional(Expr),
}

impl Arg {
    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Named(n) => n.syntax(),
            Self::Positional(e) => e.syntax(),
        }
    }
}

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Arg> + '_ {
        self.0.children().filter_map(|node| {
            if let Some(named) = NamedArg::cast(node.clone()) {
                Some(Arg::Named(named))
            } else {
                Expr::cast(node).map(Arg::Positional)
            }
        })
    }

    pub fn has_parens(&self) -> bool {
        self.0
            .first_token()
            .is_some_and(|t| t.kind() == SyntaxKind::L_PAREN)
    }
}

impl NamedArg {
    pub fn key(&self) -> Option<String> {
        let token = self.0.first_token()?;
        match token.kind() {
            SyntaxKind::IDENT => Some(unquote_ident(token.text()).to_string()),
            kind if kind.is_string() => Some(unquote_string(token.text())),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

// ============================================================================
// Expressions
// ============================================================================

ast_node!(Literal, LITERAL);
ast_node!(Reference, REFERENCE);
ast_node!(ListExpr, LIST_EXPR);
ast_node!(MapExpr, MAP_EXPR);
ast_node!(MapEntry, MAP_ENTRY);
ast_node!(CallExpr, CALL_EXPR);
ast_node!(PairExpr, PAIR_EXPR);
ast_node!(IndexExpr, INDEX_EXPR);
ast_node!(ClosureExpr, CLOSURE_EXPR);
ast_node!(ParenExpr, PAREN_EXPR);
ast_node!(BinaryExpr, BINARY_EXPR);

/// Any value expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Literal(Literal),
    Reference(Reference),
    List(ListExpr),
    Map(MapExpr),
    Call(CallExpr),
    Pair(PairExpr),
    Index(IndexExpr),
    Closure(ClosureExpr),
    Paren(ParenExpr),
    Binary(BinaryExpr),
}

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::LITERAL
                | SyntaxKind::REFERENCE
                | SyntaxKind::LIST_EXPR
                | SyntaxKind::MAP_EXPR
                | SyntaxKind::CALL_EXPR
                | SyntaxKind::PAIR_EXPR
                | SyntaxKind::INDEX_EXPR
                | SyntaxKind::CLOSURE_EXPR
                | SyntaxKind::PAREN_EXPR
                | SyntaxKind::BINARY_EXPR
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::LITERAL => Some(Self::Literal(Literal(node))),
            SyntaxKind::REFERENCE => Some(Self::Reference(Reference(node))),
            SyntaxKind::LIST_EXPR => Some(Self::List(ListExpr(node))),
            SyntaxKind::MAP_EXPR => Some(Self::Map(MapExpr(node))),
            SyntaxKind::CALL_EXPR => Some(Self::Call(CallExpr(node))),
            SyntaxKind::PAIR_EXPR => Some(Self::Pair(PairExpr(node))),
            SyntaxKind::INDEX_EXPR => Some(Self::Index(IndexExpr(node))),
            SyntaxKind::CLOSURE_EXPR => Some(Self::Closure(ClosureExpr(node))),
            SyntaxKind::PAREN_EXPR => Some(Self::Paren(ParenExpr(node))),
            SyntaxKind::BINARY_EXPR => Some(Self::Binary(BinaryExpr(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Literal(n) => n.syntax(),
            Self::Reference(n) => n.syntax(),
            Self::List(n) => n.syntax(),
            Self::Map(n) => n.syntax(),
            Self::Call(n) => n.syntax(),
            Self::Pair(n) => n.syntax(),
            Self::Index(n) => n.syntax(),
            Self::Closure(n) => n.syntax(),
            Self::Paren(n) => n.syntax(),
            Self::Binary(n) => n.syntax(),
        }
    }
}

impl Expr {
    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }
}

impl Literal {
    /// The value token (the number for `-1`)
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() != SyntaxKind::MINUS)
    }

    pub fn is_negative(&self) -> bool {
        first_token(&self.0, SyntaxKind::MINUS).is_some()
    }
}

impl Reference {
    /// Dotted path with safe-call dots normalised: `a?.b` gives `a.b`
    pub fn path(&self) -> String {
        self.0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_any_trivia())
            .map(|t| match t.kind() {
                SyntaxKind::SAFE_DOT => ".".to_string(),
                SyntaxKind::IDENT => unquote_ident(t.text()).to_string(),
                _ => t.text().to_string(),
            })
            .collect()
    }

    /// Whether this is a plain dotted path (no calls or indexing inside)
    pub fn is_simple(&self) -> bool {
        self.0.children().next().is_none()
    }
}

impl ListExpr {
    pub fn items(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl MapExpr {
    pub fn entries(&self) -> impl Iterator<Item = MapEntry> + '_ {
        self.0.children().filter_map(MapEntry::cast)
    }
}

impl MapEntry {
    pub fn key(&self) -> Option<String> {
        let token = self.0.first_token()?;
        match token.kind() {
            SyntaxKind::IDENT => Some(unquote_ident(token.text()).to_string()),
            kind if kind.is_string() => Some(unquote_string(token.text())),
            SyntaxKind::INTEGER => Some(token.text().to_string()),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl CallExpr {
    /// Callee path, `rootProject.file` in `rootProject.file("x")`
    pub fn callee(&self) -> Option<String> {
        match child::<Expr>(&self.0)? {
            Expr::Reference(reference) => Some(reference.path()),
            _ => None,
        }
    }

    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }
}

impl PairExpr {
    pub fn first(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).next()
    }

    pub fn second(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

impl IndexExpr {
    pub fn base(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).next()
    }

    pub fn index(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn statements(input: &str) -> Vec<Statement> {
        let file = SourceFile::cast(parse(input).syntax()).unwrap();
        file.statements().collect()
    }

    #[test]
    fn test_name_segments() {
        let stmts = statements("android.defaultConfig.manifestPlaceholders[\"key\"] = 'v'");
        let Statement::Assignment(assignment) = &stmts[0] else {
            panic!("expected assignment");
        };
        assert_eq!(
            assignment.name().unwrap().segments(),
            vec!["android", "defaultConfig", "manifestPlaceholders", "key"]
        );
    }

    #[test]
    fn test_application_args() {
        let stmts = statements("manifestPlaceholders activityLabel1: 'a', 'activity-2': \"b\"");
        let Statement::Application(app) = &stmts[0] else {
            panic!("expected application");
        };
        let args: Vec<_> = app.args().unwrap().args().collect();
        assert_eq!(args.len(), 2);
        let Arg::Named(second) = &args[1] else {
            panic!("expected named arg");
        };
        assert_eq!(second.key().as_deref(), Some("activity-2"));
        assert!(!app.args().unwrap().has_parens());
    }

    #[test]
    fn test_infix_parts() {
        let stmts = statements("id 'com.foo' version '1.0' apply false");
        let Statement::Infix(infix) = &stmts[0] else {
            panic!("expected infix");
        };
        let parts: Vec<_> = infix.parts().collect();
        let names: Vec<_> = parts
            .iter()
            .map(|p| p.name().unwrap().segments().join("."))
            .collect();
        assert_eq!(names, vec!["id", "version", "apply"]);
        assert_eq!(parts[1].value().unwrap().text(), "'1.0'");
    }

    #[test]
    fn test_call_callee_and_reference_path() {
        let stmts = statements("x = rootProject.file(\"a\")\ny = libs?.plugins.foo");
        let Statement::Assignment(first) = &stmts[0] else {
            panic!();
        };
        let Some(Expr::Call(call)) = first.value() else {
            panic!("expected call");
        };
        assert_eq!(call.callee().as_deref(), Some("rootProject.file"));

        let Statement::Assignment(second) = &stmts[1] else {
            panic!();
        };
        let Some(Expr::Reference(reference)) = second.value() else {
            panic!("expected reference");
        };
        assert_eq!(reference.path(), "libs.plugins.foo");
        assert!(reference.is_simple());
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote_string("'it\\'s'"), "it's");
        assert_eq!(unquote_string("\"a\\nb\""), "a\nb");
        assert_eq!(unquote_string("'''x'''"), "x");
        assert_eq!(unquote_string("''"), "");
        assert_eq!(unquote_ident("`java-library`"), "java-library");
    }
}
