//! Recursive descent parser for Gradle build scripts
//!
//! Builds a rowan GreenNode tree from tokens. Supports error recovery and
//! produces a lossless CST: the text of the root node is always the input.
//!
//! Statements end at a line break or `;`. Arguments may continue onto the
//! next line after a comma or inside brackets. Anything outside the
//! Gradle-relevant subset of Groovy/Kotlin is kept as `UNKNOWN_STMT`.

use super::errors::{ErrorCode, ParseContext, RelatedInfo, SyntaxError};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a build script (either dialect) into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Names that introduce control flow or declarations we do not model
const OPAQUE_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "when", "try", "catch", "finally", "return", "import",
    "package", "fun", "class", "object", "throw",
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn current_text(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn current_range(&self) -> TextRange {
        self.current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(self.end_offset()))
    }

    fn end_offset(&self) -> TextSize {
        self.tokens.last().map(|t| t.end()).unwrap_or_default()
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Kind of the token `n` positions ahead, trivia included
    fn raw_nth(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    /// Look ahead on the current line only, skipping whitespace and comments.
    /// Returns `None` once a line break or the end of input is reached.
    fn nth_same_line(&self, n: usize) -> Option<SyntaxKind> {
        self.nth_same_line_token(n).map(|t| t.kind)
    }

    fn nth_same_line_token(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .take_while(|token| token.kind != SyntaxKind::NEWLINE)
            .filter(|token| !token.kind.is_trivia())
            .nth(n)
    }

    fn peek(&self) -> Option<SyntaxKind> {
        self.nth_same_line(0)
    }

    /// Look ahead across lines, skipping all trivia
    fn nth_any(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_any_trivia())
            .nth(n)
            .map(|t| t.kind)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        let tokens = self.tokens;
        if let Some(token) = tokens.get(self.pos) {
            if token.kind == SyntaxKind::ERROR {
                let range = TextRange::at(token.offset, TextSize::of(token.text));
                let error = if token.text.starts_with(['\'', '"']) {
                    SyntaxError::new(ErrorCode::E0102.default_message(), range, ErrorCode::E0102)
                } else {
                    SyntaxError::new(
                        format!("invalid character '{}'", token.text),
                        range,
                        ErrorCode::E0101,
                    )
                };
                self.errors.push(error);
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume whitespace and comments, stopping at a line break
    fn skip_ws(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    /// Consume whitespace, comments and line breaks
    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_any_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    /// Consume trivia and statement separators between statements
    fn skip_separators(&mut self) {
        while self
            .current()
            .map(|t| t.kind.is_any_trivia() || t.kind == SyntaxKind::SEMICOLON)
            .unwrap_or(false)
        {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>, code: ErrorCode) {
        let range = self.current_range();
        self.errors.push(SyntaxError::new(message, range, code));
    }

    fn error_unclosed(&mut self, code: ErrorCode, open: TextRange, what: &str) {
        let error = SyntaxError::at_offset(code.default_message(), self.end_offset(), code)
            .with_hint(format!("add '{what}' to close it"))
            .with_related(RelatedInfo::new("opened here", open));
        self.errors.push(error);
    }

    /// Report and wrap exactly one token in an ERROR node
    fn error_bump(&mut self, error: SyntaxError) {
        self.errors.push(error);
        self.builder.start_node(SyntaxKind::ERROR.into());
        self.bump();
        self.builder.finish_node();
    }

    /// Report and wrap tokens up to (not including) a recovery point in an ERROR node
    fn error_recover(&mut self, error: SyntaxError, recovery: &[SyntaxKind]) {
        self.errors.push(error);
        self.builder.start_node(SyntaxKind::ERROR.into());
        let mut consumed = false;
        while !self.at_eof() && !recovery.contains(&self.current_kind()) {
            self.bump();
            consumed = true;
        }
        // Always make progress
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn wrap(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// SourceFile = Statement*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.parse_statements(ParseContext::TopLevel);
        self.finish_node();
    }

    fn parse_statements(&mut self, context: ParseContext) {
        loop {
            self.skip_separators();
            if self.at_eof() {
                break;
            }
            if self.at(SyntaxKind::R_BRACE) {
                if context == ParseContext::BlockBody {
                    break;
                }
                let error = SyntaxError::in_context(
                    "'}'",
                    context,
                    self.current_range(),
                    ErrorCode::E0205,
                );
                self.error_bump(error);
                continue;
            }
            self.parse_statement();
        }
    }

    /// BlockBody = '{' Statement* '}'
    fn parse_block_body(&mut self) {
        self.start_node(SyntaxKind::BLOCK_BODY);
        let open = self.current_range();
        self.bump(); // {
        self.parse_statements(ParseContext::BlockBody);
        if !self.eat(SyntaxKind::R_BRACE) {
            self.error_unclosed(ErrorCode::E0202, open, "}");
        }
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        match self.current_kind() {
            SyntaxKind::DEF_KW | SyntaxKind::VAL_KW | SyntaxKind::VAR_KW if self.declaration_follows() => {
                self.parse_variable_decl()
            }
            SyntaxKind::IDENT if !OPAQUE_KEYWORDS.contains(&self.current_text()) => {
                self.parse_name_statement()
            }
            kind => {
                if !kind.is_keyword() && !matches!(kind, SyntaxKind::IDENT | SyntaxKind::AT | SyntaxKind::ERROR) {
                    let message = format!("unexpected {} at the start of a statement", self.current_text());
                    self.error(message, ErrorCode::E0999);
                }
                let checkpoint = self.builder.checkpoint();
                self.parse_unknown_rest(checkpoint);
            }
        }
    }

    /// `val x = 1`, `def x: Int = 1`, `val x by extra(1)`, and `val = 1`
    /// missing its name
    fn declaration_follows(&self) -> bool {
        match (self.nth_same_line(1), self.nth_same_line_token(2)) {
            (Some(SyntaxKind::EQ), _) => true,
            (Some(SyntaxKind::IDENT), Some(next)) => {
                matches!(next.kind, SyntaxKind::EQ | SyntaxKind::COLON)
                    || (next.kind == SyntaxKind::IDENT && next.text == "by")
            }
            _ => false,
        }
    }

    /// VariableDecl = ('def' | 'val' | 'var') Name TypeAnnotation? ('=' | 'by') Expr
    fn parse_variable_decl(&mut self) {
        self.start_node(SyntaxKind::VARIABLE_DECL);
        self.bump(); // keyword
        self.skip_ws();

        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
        } else {
            self.error(ErrorCode::E0301.default_message(), ErrorCode::E0301);
        }

        if self.peek() == Some(SyntaxKind::COLON) {
            self.skip_ws();
            self.start_node(SyntaxKind::TYPE_ANNOTATION);
            self.bump(); // :
            while !self.at_eof()
                && !self.at(SyntaxKind::EQ)
                && !self.at(SyntaxKind::NEWLINE)
                && !(self.at(SyntaxKind::IDENT) && self.current_text() == "by")
            {
                self.bump();
            }
            self.finish_node();
        }

        let delegated = self
            .nth_same_line_token(0)
            .is_some_and(|t| t.kind == SyntaxKind::IDENT && t.text == "by");
        if self.peek() == Some(SyntaxKind::EQ) || delegated {
            self.skip_ws();
            self.bump(); // = or by
            self.skip_ws();
            self.parse_expr();
        } else {
            self.error(ErrorCode::E0302.default_message(), ErrorCode::E0302);
        }
        self.finish_node();
    }

    /// Every statement that starts with a name:
    /// assignment, augmented assignment, call, block, application, infix.
    fn parse_name_statement(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_name();

        match self.peek() {
            Some(SyntaxKind::EQ) => {
                self.skip_ws();
                self.start_node_at(checkpoint, SyntaxKind::ASSIGNMENT);
                self.bump(); // =
                self.skip_ws();
                self.parse_expr();
                self.finish_node();
            }
            Some(SyntaxKind::PLUS_EQ) => {
                self.skip_ws();
                self.start_node_at(checkpoint, SyntaxKind::AUGMENTED_ASSIGNMENT);
                self.bump(); // +=
                self.skip_ws();
                self.parse_expr();
                self.finish_node();
            }
            Some(SyntaxKind::L_PAREN) => {
                self.skip_ws();
                self.parse_paren_args();
                self.parse_after_call(checkpoint);
            }
            Some(SyntaxKind::L_BRACE) => {
                self.skip_ws();
                self.start_node_at(checkpoint, SyntaxKind::BLOCK_STMT);
                self.parse_block_body();
                self.finish_node();
            }
            None | Some(SyntaxKind::SEMICOLON) | Some(SyntaxKind::R_BRACE) => {
                self.wrap(checkpoint, SyntaxKind::NAME_STMT);
            }
            Some(kind) if can_start_expr(kind) => {
                self.skip_ws();
                self.parse_application(checkpoint);
            }
            Some(_) => self.parse_unknown_rest(checkpoint),
        }
    }

    /// After `name(args)`: a block, an infix chain, or a plain call
    fn parse_after_call(&mut self, checkpoint: Checkpoint) {
        if self.peek() == Some(SyntaxKind::L_BRACE) {
            self.skip_ws();
            self.start_node_at(checkpoint, SyntaxKind::BLOCK_STMT);
            self.parse_block_body();
            self.finish_node();
        } else if self.infix_follows() || self.chained_call_follows() {
            self.parse_infix_rest(checkpoint);
        } else {
            self.wrap(checkpoint, SyntaxKind::CALL_STMT);
        }
    }

    /// Application = Name Arg (',' Arg)* Closure?
    fn parse_application(&mut self, checkpoint: Checkpoint) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.parse_argument(false);

        if self.infix_follows() {
            self.finish_node(); // ARG_LIST
            self.parse_infix_rest(checkpoint);
            return;
        }

        while self.peek() == Some(SyntaxKind::COMMA) {
            self.skip_ws();
            self.bump(); // ,
            self.skip_trivia();
            if self.at_eof() || !can_start_expr(self.current_kind()) {
                self.error(ErrorCode::E0402.default_message(), ErrorCode::E0402);
                break;
            }
            self.parse_argument(false);
        }

        if self.peek() == Some(SyntaxKind::L_BRACE) {
            self.skip_ws();
            self.parse_closure();
        }
        self.finish_node(); // ARG_LIST
        self.wrap(checkpoint, SyntaxKind::APPLICATION);
    }

    /// `version '1.0'` after the first part of an infix statement
    fn infix_follows(&self) -> bool {
        self.nth_same_line(0) == Some(SyntaxKind::IDENT)
            && self
                .nth_same_line(1)
                .is_some_and(|kind| kind.is_literal() || kind == SyntaxKind::IDENT)
    }

    /// `.version("1.0")` directly after a call
    fn chained_call_follows(&self) -> bool {
        self.at(SyntaxKind::DOT)
            && self.raw_nth(1) == Some(SyntaxKind::IDENT)
            && self.raw_nth(2) == Some(SyntaxKind::L_PAREN)
    }

    /// InfixStmt = InfixPart+ where the first part is already consumed
    fn parse_infix_rest(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::INFIX_STMT);
        self.wrap(checkpoint, SyntaxKind::INFIX_PART);

        loop {
            if self.infix_follows() {
                self.skip_ws();
                self.start_node(SyntaxKind::INFIX_PART);
                self.start_node(SyntaxKind::NAME);
                self.bump();
                self.finish_node();
                self.skip_ws();
                self.parse_expr();
                self.finish_node();
            } else if self.chained_call_follows() {
                self.start_node(SyntaxKind::INFIX_PART);
                self.bump(); // .
                self.start_node(SyntaxKind::NAME);
                self.bump();
                self.finish_node();
                self.parse_paren_args();
                self.finish_node();
            } else {
                break;
            }
        }
        self.finish_node();
    }

    /// Consume the rest of an unrecognised statement, balancing delimiters
    fn parse_unknown_rest(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::UNKNOWN_STMT);
        let mut depth = 0usize;
        let mut consumed = false;
        while !self.at_eof() {
            let kind = self.current_kind();
            match kind {
                SyntaxKind::NEWLINE | SyntaxKind::SEMICOLON if depth == 0 => break,
                SyntaxKind::R_BRACE if depth == 0 => break,
                SyntaxKind::L_BRACE | SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => depth += 1,
                SyntaxKind::R_BRACE | SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                    if depth == 0 {
                        self.error("unbalanced closing delimiter", ErrorCode::E0205);
                    } else {
                        depth -= 1;
                    }
                }
                _ => {}
            }
            self.bump();
            consumed = true;
        }
        if depth > 0 {
            self.errors.push(SyntaxError::at_offset(
                "unclosed delimiter in statement",
                self.end_offset(),
                ErrorCode::E0202,
            ));
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Names and arguments
    // =========================================================================

    /// Name = Ident ('.' Ident | '[' String ']')*
    fn parse_name(&mut self) {
        self.start_node(SyntaxKind::NAME);
        self.bump(); // IDENT
        loop {
            if self.at(SyntaxKind::DOT) && self.raw_nth(1) == Some(SyntaxKind::IDENT) {
                self.bump();
                self.bump();
            } else if self.at(SyntaxKind::L_BRACKET)
                && self.raw_nth(1).is_some_and(SyntaxKind::is_string)
                && self.raw_nth(2) == Some(SyntaxKind::R_BRACKET)
            {
                self.bump();
                self.bump();
                self.bump();
            } else if self.project_property_follows() {
                self.bump();
                self.bump();
                self.bump();
            } else {
                break;
            }
        }
        self.finish_node();
    }

    /// `(':lib').projectDir =`: a call segment of an assigned name
    fn project_property_follows(&self) -> bool {
        self.at(SyntaxKind::L_PAREN)
            && self.raw_nth(1).is_some_and(SyntaxKind::is_string)
            && self.raw_nth(2) == Some(SyntaxKind::R_PAREN)
            && self.raw_nth(3) == Some(SyntaxKind::DOT)
            && self.raw_nth(4) == Some(SyntaxKind::IDENT)
            && self.nth_same_line(5) == Some(SyntaxKind::EQ)
    }

    /// ArgList = '(' (Arg (',' Arg)* ','?)? ')'
    fn parse_paren_args(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        let open = self.current_range();
        self.bump(); // (
        loop {
            self.skip_trivia();
            if self.at_eof() {
                self.error_unclosed(ErrorCode::E0203, open, ")");
                break;
            }
            if self.eat(SyntaxKind::R_PAREN) {
                break;
            }
            if !can_start_expr(self.current_kind()) {
                let error = SyntaxError::in_context(
                    &format!("'{}'", self.current_text()),
                    ParseContext::ArgumentList,
                    self.current_range(),
                    ErrorCode::E0402,
                );
                self.error_recover(
                    error,
                    &[SyntaxKind::COMMA, SyntaxKind::R_PAREN, SyntaxKind::R_BRACE],
                );
                if self.at(SyntaxKind::R_BRACE) {
                    self.error_unclosed(ErrorCode::E0203, open, ")");
                    break;
                }
                self.eat(SyntaxKind::COMMA);
                continue;
            }
            self.parse_argument(true);
            self.skip_trivia();
            if !self.eat(SyntaxKind::COMMA) && !self.at(SyntaxKind::R_PAREN) && !self.at_eof() {
                let error = SyntaxError::in_context(
                    &format!("'{}'", self.current_text()),
                    ParseContext::ArgumentList,
                    self.current_range(),
                    ErrorCode::E0402,
                );
                self.error_recover(
                    error,
                    &[SyntaxKind::COMMA, SyntaxKind::R_PAREN, SyntaxKind::R_BRACE],
                );
                if self.at(SyntaxKind::R_BRACE) {
                    self.error_unclosed(ErrorCode::E0203, open, ")");
                    break;
                }
                self.eat(SyntaxKind::COMMA);
            }
        }
        self.finish_node();
    }

    /// Arg = NamedArg | Expr ('to' Expr)?
    fn parse_argument(&mut self, in_parens: bool) {
        let key_like = matches!(
            self.current_kind(),
            SyntaxKind::IDENT | SyntaxKind::STRING | SyntaxKind::GSTRING
        );
        let groovy_named = key_like && self.nth_same_line(1) == Some(SyntaxKind::COLON);
        let kotlin_named = in_parens
            && self.at(SyntaxKind::IDENT)
            && self.nth_same_line(1) == Some(SyntaxKind::EQ);

        if groovy_named || kotlin_named {
            self.start_node(SyntaxKind::NAMED_ARG);
            self.bump(); // key
            self.skip_ws();
            self.bump(); // : or =
            self.skip_trivia();
            self.parse_expr();
            self.finish_node();
            return;
        }

        let checkpoint = self.builder.checkpoint();
        self.parse_expr();
        if self.peek() == Some(SyntaxKind::IDENT) && self.nth_text_same_line(0) == Some("to") {
            self.skip_ws();
            self.start_node_at(checkpoint, SyntaxKind::PAIR_EXPR);
            self.bump(); // to
            self.skip_ws();
            self.parse_expr();
            self.finish_node();
        }
    }

    fn nth_text_same_line(&self, n: usize) -> Option<&'a str> {
        let mut count = 0;
        for token in &self.tokens[self.pos.min(self.tokens.len())..] {
            if token.kind == SyntaxKind::NEWLINE {
                return None;
            }
            if !token.kind.is_trivia() {
                if count == n {
                    return Some(token.text);
                }
                count += 1;
            }
        }
        None
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Expr = Primary (BinaryOp Primary)*
    fn parse_expr(&mut self) {
        let checkpoint = self.builder.checkpoint();
        if !self.parse_primary() {
            return;
        }
        while self.peek().is_some_and(SyntaxKind::is_binary_op) {
            self.skip_ws();
            self.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
            self.bump(); // operator
            self.skip_trivia();
            self.parse_primary();
            self.finish_node();
        }
    }

    fn parse_primary(&mut self) -> bool {
        if self.at_eof() {
            self.errors.push(SyntaxError::at_offset(
                ErrorCode::E0401.default_message(),
                self.end_offset(),
                ErrorCode::E0401,
            ));
            return false;
        }
        match self.current_kind() {
            kind if kind.is_literal() => {
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::MINUS
                if matches!(
                    self.raw_nth(1),
                    Some(SyntaxKind::INTEGER) | Some(SyntaxKind::DECIMAL)
                ) =>
            {
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.bump();
                self.finish_node();
            }
            SyntaxKind::MINUS | SyntaxKind::BANG => {
                self.start_node(SyntaxKind::BINARY_EXPR);
                self.bump();
                self.parse_primary();
                self.finish_node();
            }
            SyntaxKind::L_BRACKET => self.parse_list_or_map(),
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_EXPR);
                let open = self.current_range();
                self.bump();
                self.skip_trivia();
                self.parse_expr();
                self.skip_trivia();
                if !self.eat(SyntaxKind::R_PAREN) {
                    self.error_unclosed(ErrorCode::E0203, open, ")");
                }
                self.finish_node();
            }
            SyntaxKind::L_BRACE => self.parse_closure(),
            SyntaxKind::IDENT => self.parse_reference_or_call(),
            _ => {
                let error = SyntaxError::in_context(
                    &format!("'{}'", self.current_text()),
                    ParseContext::Expression,
                    self.current_range(),
                    ErrorCode::E0401,
                );
                self.errors.push(error);
                return false;
            }
        }
        true
    }

    /// Reference = Ident ('.' Ident)* with call, index and member postfixes
    fn parse_reference_or_call(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.bump(); // IDENT
        self.eat_member_chain();
        self.wrap(checkpoint, SyntaxKind::REFERENCE);

        loop {
            if self.at(SyntaxKind::L_PAREN) {
                self.parse_paren_args();
                self.wrap(checkpoint, SyntaxKind::CALL_EXPR);
            } else if self.at(SyntaxKind::L_BRACKET) {
                let open = self.current_range();
                self.start_node_at(checkpoint, SyntaxKind::INDEX_EXPR);
                self.bump(); // [
                self.skip_trivia();
                self.parse_expr();
                self.skip_trivia();
                if !self.eat(SyntaxKind::R_BRACKET) {
                    self.error_unclosed(ErrorCode::E0204, open, "]");
                }
                self.finish_node();
            } else if self.at_member_access() {
                self.start_node_at(checkpoint, SyntaxKind::REFERENCE);
                self.eat_member_chain();
                self.finish_node();
            } else {
                break;
            }
        }
    }

    fn at_member_access(&self) -> bool {
        (self.at(SyntaxKind::DOT) || self.at(SyntaxKind::SAFE_DOT))
            && self.raw_nth(1) == Some(SyntaxKind::IDENT)
    }

    fn eat_member_chain(&mut self) {
        while self.at_member_access() {
            self.bump();
            self.bump();
        }
    }

    /// ListExpr = '[' (Expr (',' Expr)*)? ']' ; MapExpr = '[' ':' ']' | '[' MapEntry (',' MapEntry)* ']'
    fn parse_list_or_map(&mut self) {
        let checkpoint = self.builder.checkpoint();
        let open = self.current_range();
        self.bump(); // [
        self.skip_trivia();

        if self.at(SyntaxKind::COLON) && self.nth_any(1) == Some(SyntaxKind::R_BRACKET) {
            self.bump();
            self.skip_trivia();
            self.bump();
            self.wrap(checkpoint, SyntaxKind::MAP_EXPR);
            return;
        }

        let is_map = self.at_map_entry();
        let (context, item_code) = if is_map {
            (ParseContext::MapLiteral, ErrorCode::E0403)
        } else {
            (ParseContext::ListLiteral, ErrorCode::E0401)
        };

        loop {
            self.skip_trivia();
            if self.at_eof() {
                self.error_unclosed(ErrorCode::E0204, open, "]");
                break;
            }
            if self.eat(SyntaxKind::R_BRACKET) {
                break;
            }
            let valid_start = if is_map {
                self.at_map_entry()
            } else {
                can_start_expr(self.current_kind())
            };
            if !valid_start {
                let error = SyntaxError::in_context(
                    &format!("'{}'", self.current_text()),
                    context,
                    self.current_range(),
                    item_code,
                );
                self.error_recover(
                    error,
                    &[SyntaxKind::COMMA, SyntaxKind::R_BRACKET, SyntaxKind::R_BRACE],
                );
                if self.at(SyntaxKind::R_BRACE) {
                    self.error_unclosed(ErrorCode::E0204, open, "]");
                    break;
                }
                self.eat(SyntaxKind::COMMA);
                continue;
            }
            if is_map {
                self.start_node(SyntaxKind::MAP_ENTRY);
                self.bump(); // key
                self.skip_ws();
                self.bump(); // :
                self.skip_trivia();
                self.parse_expr();
                self.finish_node();
            } else {
                self.parse_expr();
            }
            self.skip_trivia();
            self.eat(SyntaxKind::COMMA);
        }

        let kind = if is_map {
            SyntaxKind::MAP_EXPR
        } else {
            SyntaxKind::LIST_EXPR
        };
        self.wrap(checkpoint, kind);
    }

    fn at_map_entry(&self) -> bool {
        matches!(
            self.current_kind(),
            SyntaxKind::IDENT | SyntaxKind::STRING | SyntaxKind::GSTRING | SyntaxKind::INTEGER
        ) && !self.at_eof()
            && self.nth_same_line(1) == Some(SyntaxKind::COLON)
    }

    /// Closure = '{' balanced tokens '}'
    fn parse_closure(&mut self) {
        self.start_node(SyntaxKind::CLOSURE_EXPR);
        let open = self.current_range();
        self.bump(); // {
        let mut depth = 1usize;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACE => {
                    depth -= 1;
                    if depth == 0 {
                        self.bump();
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }
        if depth > 0 {
            self.error_unclosed(ErrorCode::E0202, open, "}");
        }
        self.finish_node();
    }
}

fn can_start_expr(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || matches!(
            kind,
            SyntaxKind::IDENT
                | SyntaxKind::L_BRACKET
                | SyntaxKind::L_PAREN
                | SyntaxKind::L_BRACE
                | SyntaxKind::MINUS
                | SyntaxKind::BANG
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SyntaxNode;

    fn statement_kinds(input: &str) -> Vec<SyntaxKind> {
        let parse = parse(input);
        parse.syntax().children().map(|n| n.kind()).collect()
    }

    fn first_statement(input: &str) -> SyntaxNode {
        parse(input).syntax().first_child().unwrap()
    }

    #[test]
    fn test_lossless() {
        let input = "// header\nandroid {\n  compileSdk = 31 ;\n  defaultConfig { minSdk 21 }\n}\n)))\n";
        let parse = parse(input);
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn test_statement_kinds() {
        let input = "\
apply plugin: 'com.android.application'
compileSdkVersion 30
compileSdk = 31
flavorDimensions += listOf(\"a\")
implementation(\"a:b:1.0\")
android { }
def x = 1
java
id 'foo' version '1.0' apply false
if (x) { y() }
";
        assert_eq!(
            statement_kinds(input),
            vec![
                SyntaxKind::APPLICATION,
                SyntaxKind::APPLICATION,
                SyntaxKind::ASSIGNMENT,
                SyntaxKind::AUGMENTED_ASSIGNMENT,
                SyntaxKind::CALL_STMT,
                SyntaxKind::BLOCK_STMT,
                SyntaxKind::VARIABLE_DECL,
                SyntaxKind::NAME_STMT,
                SyntaxKind::INFIX_STMT,
                SyntaxKind::UNKNOWN_STMT,
            ]
        );
    }

    #[test]
    fn test_statement_stops_at_line_end() {
        let stmt = first_statement("minSdkVersion 21   \ntargetSdkVersion 30");
        assert_eq!(stmt.kind(), SyntaxKind::APPLICATION);
        assert_eq!(stmt.text().to_string(), "minSdkVersion 21");
    }

    #[test]
    fn test_arguments_continue_after_comma() {
        let stmt = first_statement("resConfigs 'en',\n    'fr'\nfoo 1");
        assert_eq!(stmt.kind(), SyntaxKind::APPLICATION);
        assert_eq!(stmt.text().to_string(), "resConfigs 'en',\n    'fr'");
    }

    #[test]
    fn test_kotlin_infix_and_chain() {
        let stmt = first_statement("id(\"com.foo\") version \"1.0\" apply false");
        assert_eq!(stmt.kind(), SyntaxKind::INFIX_STMT);
        assert_eq!(stmt.children().filter(|n| n.kind() == SyntaxKind::INFIX_PART).count(), 3);

        let stmt = first_statement("id(\"com.foo\").version(\"1.0\")");
        assert_eq!(stmt.kind(), SyntaxKind::INFIX_STMT);
    }

    #[test]
    fn test_block_with_arguments() {
        let stmt = first_statement("getByName(\"release\") {\n  isMinifyEnabled = true\n}");
        assert_eq!(stmt.kind(), SyntaxKind::BLOCK_STMT);
        assert!(stmt.children().any(|n| n.kind() == SyntaxKind::ARG_LIST));
        assert!(stmt.children().any(|n| n.kind() == SyntaxKind::BLOCK_BODY));
    }

    #[test]
    fn test_map_and_list_literals() {
        let stmt = first_statement("x = [a: 1, 'b-c': \"2\"]");
        assert!(stmt.descendants().any(|n| n.kind() == SyntaxKind::MAP_EXPR));
        assert_eq!(
            stmt.descendants().filter(|n| n.kind() == SyntaxKind::MAP_ENTRY).count(),
            2
        );

        let stmt = first_statement("x = [:]");
        assert!(stmt.descendants().any(|n| n.kind() == SyntaxKind::MAP_EXPR));

        let stmt = first_statement("x = ['a', 'b']");
        assert!(stmt.descendants().any(|n| n.kind() == SyntaxKind::LIST_EXPR));
    }

    #[test]
    fn test_kotlin_pairs_and_named_args() {
        let stmt = first_statement("x = mapOf(\"a\" to \"b\")");
        assert!(stmt.descendants().any(|n| n.kind() == SyntaxKind::PAIR_EXPR));
        let stmt = first_statement("apply(plugin = \"foo\")");
        assert_eq!(stmt.kind(), SyntaxKind::CALL_STMT);
        assert!(stmt.descendants().any(|n| n.kind() == SyntaxKind::NAMED_ARG));
    }

    #[test]
    fn test_indexed_name() {
        let stmt = first_statement("extra[\"kotlin\"] = \"1.9\"");
        assert_eq!(stmt.kind(), SyntaxKind::ASSIGNMENT);
        let name = stmt.first_child().unwrap();
        assert_eq!(name.kind(), SyntaxKind::NAME);
        assert_eq!(name.text().to_string(), "extra[\"kotlin\"]");
    }

    #[rstest::rstest]
    #[case("android {\n  compileSdk 30\n", ErrorCode::E0202)]
    #[case("foo('a', 'b'", ErrorCode::E0203)]
    #[case("x = ['a', 'b'", ErrorCode::E0204)]
    #[case("}", ErrorCode::E0205)]
    #[case("x = #", ErrorCode::E0101)]
    #[case("val = 1", ErrorCode::E0301)]
    #[case("val x: Int\n", ErrorCode::E0302)]
    #[case("android {\n    = 30\n}\n", ErrorCode::E0999)]
    fn test_errors_are_collected(#[case] input: &str, #[case] code: ErrorCode) {
        let parse = parse(input);
        assert!(
            parse.errors.iter().any(|e| e.code == code),
            "expected {code} in {:?}",
            parse.errors
        );
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn test_project_property_is_one_name() {
        let stmt = first_statement("project(':lib').projectDir = file('libs/lib')\n");
        assert_eq!(stmt.kind(), SyntaxKind::ASSIGNMENT);
        let name = stmt.children().find(|n| n.kind() == SyntaxKind::NAME).unwrap();
        assert_eq!(name.text().to_string(), "project(':lib').projectDir");

        let stmt = first_statement("id(\"foo\").version(\"1.0\")\n");
        assert_eq!(stmt.kind(), SyntaxKind::INFIX_STMT);
    }

    #[test]
    fn test_delegated_declaration() {
        let stmt = first_statement("val sdk by extra(33)\nfoo 1");
        assert_eq!(stmt.kind(), SyntaxKind::VARIABLE_DECL);
        assert_eq!(stmt.text().to_string(), "val sdk by extra(33)");
        assert!(parse("val sdk by extra(33)\n").ok());
    }

    #[test]
    fn test_unexpected_statement_start() {
        let parse = parse("(1)\nfoo()\n");
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].code, ErrorCode::E0999);
        assert_eq!(parse.errors[0].message, "unexpected ( at the start of a statement");
        let kinds: Vec<_> = parse.syntax().children().map(|n| n.kind()).collect();
        assert_eq!(kinds, [SyntaxKind::UNKNOWN_STMT, SyntaxKind::CALL_STMT]);

        assert!(super::parse("if (x) { foo 1 }\n").ok());
    }

    #[test]
    fn test_clean_file_has_no_errors() {
        let input = "plugins {\n    id 'com.android.application'\n}\nandroid {\n    defaultConfig {\n        applicationId 'com.example'\n    }\n}\n";
        assert!(parse(input).ok());
    }
}
