//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! One set of kinds covers both Groovy and Kotlin-script build files.

/// All syntax kinds (tokens and nodes) in a Gradle build script
///
/// Tokens are leaf nodes (identifiers, literals, punctuation).
/// Nodes are composite (statements, expressions, argument lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // foo, `java-library`
    INTEGER,            // 42, 42L
    DECIMAL,            // 3.14
    STRING,             // 'hello'
    GSTRING,            // "hello $name"
    TRIPLE_STRING,      // '''...''' or """..."""

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    DEF_KW,
    VAL_KW,
    VAR_KW,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,            // {
    R_BRACE,            // }
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_PAREN,            // (
    R_PAREN,            // )
    SEMICOLON,          // ;
    COLON,              // :
    DOT,                // .
    SAFE_DOT,           // ?.
    COMMA,              // ,
    EQ,                 // =
    EQ_EQ,              // ==
    BANG_EQ,            // !=
    PLUS_EQ,            // +=
    MINUS_EQ,           // -=
    ARROW,              // ->
    ELVIS,              // ?:
    LT,                 // <
    GT,                 // >
    AT,                 // @
    STAR,               // *
    PLUS,               // +
    MINUS,              // -
    SLASH,              // /
    PERCENT,            // %
    QUESTION,           // ?
    BANG,               // !
    AMP_AMP,            // &&
    PIPE_PIPE,          // ||
    DOLLAR,             // $

    // =========================================================================
    // NODES - Root and statements
    // =========================================================================
    SOURCE_FILE,
    BLOCK_BODY,           // { statements }
    BLOCK_STMT,           // name(args)? { ... }
    ASSIGNMENT,           // name = expr
    AUGMENTED_ASSIGNMENT, // name += expr
    APPLICATION,          // name arg, arg
    CALL_STMT,            // name(args)
    INFIX_STMT,           // id 'x' version '1' apply false
    INFIX_PART,           // one `name value` pair of an infix statement
    VARIABLE_DECL,        // def x = e / val x = e
    NAME_STMT,            // a bare name on its own line
    UNKNOWN_STMT,         // anything else, kept verbatim

    // =========================================================================
    // NODES - Names and expressions
    // =========================================================================
    NAME,                 // a.b["c"]
    TYPE_ANNOTATION,      // : String
    LITERAL,
    REFERENCE,            // a.b.c
    LIST_EXPR,            // [a, b]
    MAP_EXPR,             // [k: v] or [:]
    MAP_ENTRY,            // k: v inside a map literal
    CALL_EXPR,            // f(args)
    ARG_LIST,             // (a, b) or the bare arguments of an application
    NAMED_ARG,            // k: v or k = v
    PAIR_EXPR,            // k to v
    INDEX_EXPR,           // a["k"]
    CLOSURE_EXPR,         // { ... } used as a value
    PAREN_EXPR,           // ( expr )
    BINARY_EXPR,          // a + b

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token that never ends a statement
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Trivia including line breaks
    pub fn is_any_trivia(self) -> bool {
        self.is_trivia() || self == Self::NEWLINE
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::TRUE_KW as u16) && (self as u16) <= (Self::VAR_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::DOLLAR as u16)
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER
                | Self::DECIMAL
                | Self::STRING
                | Self::GSTRING
                | Self::TRIPLE_STRING
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }

    /// String literal tokens of either quote style
    pub fn is_string(self) -> bool {
        matches!(self, Self::STRING | Self::GSTRING | Self::TRIPLE_STRING)
    }

    /// Binary operators accepted between operands of a value expression
    pub fn is_binary_op(self) -> bool {
        matches!(
            self,
            Self::PLUS
                | Self::MINUS
                | Self::STAR
                | Self::SLASH
                | Self::PERCENT
                | Self::ELVIS
                | Self::EQ_EQ
                | Self::BANG_EQ
                | Self::AMP_AMP
                | Self::PIPE_PIPE
                | Self::LT
                | Self::GT
        )
    }

    /// Statement kinds produced directly under a file or block body
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::BLOCK_STMT
                | Self::ASSIGNMENT
                | Self::AUGMENTED_ASSIGNMENT
                | Self::APPLICATION
                | Self::CALL_STMT
                | Self::INFIX_STMT
                | Self::VARIABLE_DECL
                | Self::NAME_STMT
                | Self::UNKNOWN_STMT
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GradleLanguage {}

impl rowan::Language for GradleLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<GradleLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<GradleLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<GradleLanguage>;
