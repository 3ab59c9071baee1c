//! Logos-based lexer for Groovy and Kotlin-script build files
//!
//! Fast tokenization using the logos crate. Every byte of the input ends up
//! in exactly one token so the CST can reproduce the text losslessly.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn end(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\x0C\r]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    #[regex(r"`[^`\r\n]+`")]
    Ident,

    #[regex(r"[0-9][0-9_]*[lL]?")]
    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    Decimal,

    #[regex(r"'([^'\\\r\n]|\\.)*'")]
    String,

    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    GString,

    #[regex(r"'''([^']|'[^']|''[^'])*'''")]
    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#)]
    TripleString,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("null")]
    NullKw,
    #[token("def")]
    DefKw,
    #[token("val")]
    ValKw,
    #[token("var")]
    VarKw,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("?.")]
    SafeDot,
    #[token("?:")]
    Elvis,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("->")]
    Arrow,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("@")]
    At,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("$")]
    Dollar,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            Newline => SyntaxKind::NEWLINE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,
            Ident => SyntaxKind::IDENT,
            Integer => SyntaxKind::INTEGER,
            Decimal => SyntaxKind::DECIMAL,
            String => SyntaxKind::STRING,
            GString => SyntaxKind::GSTRING,
            TripleString => SyntaxKind::TRIPLE_STRING,
            TrueKw => SyntaxKind::TRUE_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            NullKw => SyntaxKind::NULL_KW,
            DefKw => SyntaxKind::DEF_KW,
            ValKw => SyntaxKind::VAL_KW,
            VarKw => SyntaxKind::VAR_KW,
            SafeDot => SyntaxKind::SAFE_DOT,
            Elvis => SyntaxKind::ELVIS,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            Arrow => SyntaxKind::ARROW,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Dot => SyntaxKind::DOT,
            Comma => SyntaxKind::COMMA,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            At => SyntaxKind::AT,
            Star => SyntaxKind::STAR,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Question => SyntaxKind::QUESTION,
            Bang => SyntaxKind::BANG,
            Dollar => SyntaxKind::DOLLAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_application() {
        let tokens: Vec<_> = Lexer::new("applicationId 'com.example'").collect();
        assert_eq!(tokens.len(), 3); // ident, whitespace, string
        assert_eq!(tokens[0].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::STRING);
        assert_eq!(tokens[2].offset, TextSize::new(14));
    }

    #[test]
    fn test_lex_kotlin_assignment() {
        assert_eq!(
            kinds("compileSdk = 31\n"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::EQ,
                SyntaxKind::WHITESPACE,
                SyntaxKind::INTEGER,
                SyntaxKind::NEWLINE,
            ]
        );
    }

    #[test]
    fn test_lex_keywords_and_idents() {
        assert_eq!(
            kinds("val trueish = true"),
            vec![
                SyntaxKind::VAL_KW,
                SyntaxKind::WHITESPACE,
                SyntaxKind::IDENT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::EQ,
                SyntaxKind::WHITESPACE,
                SyntaxKind::TRUE_KW,
            ]
        );
    }

    #[test]
    fn test_lex_comments() {
        let tokens = tokenize("// header\n/* a ** b */x");
        assert_eq!(tokens[0].kind, SyntaxKind::LINE_COMMENT);
        assert_eq!(tokens[1].kind, SyntaxKind::NEWLINE);
        assert_eq!(tokens[2].kind, SyntaxKind::BLOCK_COMMENT);
        assert_eq!(tokens[2].text, "/* a ** b */");
        assert_eq!(tokens[3].kind, SyntaxKind::IDENT);
    }

    #[test]
    fn test_lex_strings() {
        assert_eq!(kinds(r#""a $b \" c""#), vec![SyntaxKind::GSTRING]);
        assert_eq!(kinds(r"'it\'s'"), vec![SyntaxKind::STRING]);
        assert_eq!(kinds("'''multi\nline'''"), vec![SyntaxKind::TRIPLE_STRING]);
    }

    #[test]
    fn test_lex_backtick_ident() {
        let tokens = tokenize("`java-library`");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::IDENT);
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(kinds("42L"), vec![SyntaxKind::INTEGER]);
        assert_eq!(kinds("1.8"), vec![SyntaxKind::DECIMAL]);
        assert_eq!(kinds("0x1F"), vec![SyntaxKind::INTEGER]);
    }

    #[test]
    fn test_lex_is_lossless() {
        let input = "android {\r\n  defaultConfig { minSdk = 21 } // x\r\n}\n#";
        let rebuilt: String = Lexer::new(input).map(|t| t.text).collect();
        assert_eq!(rebuilt, input);
        assert_eq!(kinds("#"), vec![SyntaxKind::ERROR]);
    }
}
