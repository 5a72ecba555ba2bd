//! QSS Parser
//!
//! Groups tokens into `Stylesheet → Rule → SelectorList + Declaration*`.
//! Parsing never fails: malformed input yields a best-effort tree plus
//! diagnostics, and every step advances the cursor so the parse terminates on
//! any input.

use log::{debug, trace};

use crate::error::{Diagnostic, Span, SyntaxError};
use crate::tokenizer::{tokenize, Token, TokenKind, Tokenizer};
use crate::tree::{Declaration, PropertyValues, Rule, SelectorList, Stylesheet};

/// How the parser treats a selector that is not followed by `{`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Report "Expected '{' after selector"
    #[default]
    Strict,
    /// Drop the rule without a diagnostic
    Lenient,
}

/// Parser configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    pub strictness: Strictness,
}

impl ParserConfig {
    pub fn lenient() -> Self {
        Self { strictness: Strictness::Lenient }
    }
}

/// Tree plus the syntax diagnostics found while building it
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    pub stylesheet: Stylesheet,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenize and parse `text` with the default configuration
pub fn parse(text: &str) -> ParseOutput {
    parse_with(text, &ParserConfig::default())
}

/// Tokenize and parse `text`
pub fn parse_with(text: &str, config: &ParserConfig) -> ParseOutput {
    parse_tokens(&tokenize(text), config)
}

/// Parse an already tokenized stylesheet
pub fn parse_tokens(tokens: &[Token], config: &ParserConfig) -> ParseOutput {
    QssParser::new(tokens, *config).parse_stylesheet()
}

/// Significant tokens inspected after a selector candidate before giving up
const SELECTOR_LOOKAHEAD: usize = 64;

/// Guess whether `tokens[index]` starts a new top-level rule
///
/// Used inside a declaration block to stop a rule whose `}` is missing from
/// swallowing the next one. Fires when the token is a class (`.x`), an id
/// (`#x`) or a capitalised name (`QLabel`), and a `{` follows before any `;`,
/// `}` or declaration colon. A `:` directly followed by `!` (`:!hover`) does
/// not count as a declaration colon. Lookahead is bounded.
pub fn looks_like_new_selector_start(tokens: &[Token], index: usize) -> bool {
    let Some(token) = tokens.get(index) else {
        return false;
    };
    if !matches!(token.kind, TokenKind::Dot | TokenKind::Hash | TokenKind::WidgetClass) {
        return false;
    }

    let mut significant = tokens[index + 1..].iter().filter(|t| !t.kind.is_trivia()).peekable();
    let mut seen = 0;
    while let Some(next) = significant.next() {
        seen += 1;
        if seen > SELECTOR_LOOKAHEAD {
            return false;
        }
        match next.kind {
            TokenKind::LeftBrace => return true,
            TokenKind::Semicolon | TokenKind::RightBrace => return false,
            TokenKind::Colon => {
                if significant.peek().map(|t| t.kind) != Some(TokenKind::Bang) {
                    return false;
                }
            }
            _ => {}
        }
    }
    false
}

/// Split every `color:red` style declaration in one pass
///
/// `color:red` lexes as `color` + `:red`. Inside a block, a pseudo-state that
/// follows a property name becomes a colon plus its re-lexed text, unless the
/// name starts a new selector. A directly following parenthesised group is
/// re-lexed with it, so `:url(a.png)` yields a url token.
fn split_compact_declarations(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut depth = 0usize;
    let mut property = None;
    let mut i = 0;

    while let Some(token) = tokens.get(i) {
        match token.kind {
            TokenKind::LeftBrace => depth += 1,
            TokenKind::RightBrace => depth = depth.saturating_sub(1),
            TokenKind::PseudoState
                if depth > 0 && property.is_some_and(|p| !looks_like_new_selector_start(tokens, p)) =>
            {
                let end = compact_value_end(tokens, i);
                split_pseudo_state(&tokens[i..end], &mut out);
                property = None;
                i = end;
                continue;
            }
            _ => {}
        }
        if !token.kind.is_trivia() {
            property = token.kind.is_property_name().then_some(i);
        }
        out.push(token.clone());
        i += 1;
    }
    out
}

/// End of the tokens re-lexed with the pseudo-state at `index`
fn compact_value_end(tokens: &[Token], index: usize) -> usize {
    let mut end = index + 1;
    if !tokens.get(end).is_some_and(|t| t.is(TokenKind::LeftParen)) {
        return end;
    }

    let mut depth = 0usize;
    while let Some(token) = tokens.get(end) {
        match token.kind {
            TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::LeftBrace => break,
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return end + 1;
                }
            }
            _ => {}
        }
        end += 1;
    }
    end
}

/// Push a colon for `tokens[0]` and re-lex the text after it
fn split_pseudo_state(tokens: &[Token], out: &mut Vec<Token>) {
    let start = tokens[0].span.start;
    let text: String = tokens.iter().map(|t| t.text.as_str()).collect();
    let base = start + 1;

    trace!("Splitting '{}' at {} into ':' and a value", tokens[0].text, start);
    out.push(Token::new(TokenKind::Colon, Span::new(start, base), ":"));
    out.extend(Tokenizer::new(&text[1..]).map(|mut token| {
        token.span = Span::new(token.span.start + base, token.span.end + base);
        token
    }));
}

/// Tokens that may appear in a selector outside brackets
fn is_selector_constituent(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Whitespace
            | TokenKind::Comment
            | TokenKind::Identifier
            | TokenKind::WidgetClass
            | TokenKind::Keyword
            | TokenKind::Hash
            | TokenKind::HexColor
            | TokenKind::Dot
            | TokenKind::Asterisk
            | TokenKind::PseudoState
            | TokenKind::PseudoElement
            | TokenKind::Comma
            | TokenKind::Greater
            | TokenKind::Bang
    )
}

/// QSS Parser
///
/// Owns a copy of the token stream with `color:red` style declarations
/// already split.
pub struct QssParser {
    tokens: Vec<Token>,
    pos: usize,
    config: ParserConfig,
    diagnostics: Vec<Diagnostic>,
}

impl QssParser {
    pub fn new(tokens: &[Token], config: ParserConfig) -> Self {
        Self {
            tokens: split_compact_declarations(tokens),
            pos: 0,
            config,
            diagnostics: Vec::new(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn skip_trivia(&mut self) {
        while self.peek_kind().is_some_and(|k| k.is_trivia()) {
            self.pos += 1;
        }
    }

    fn error(&mut self, error: SyntaxError, span: Span) {
        trace!("Syntax error at {}: {}", span, error);
        self.diagnostics.push(error.into_diagnostic(span));
    }

    /// Offset just past the last token
    fn end_offset(&self) -> usize {
        self.tokens.last().map(|t| t.span.end).unwrap_or(0)
    }

    /// End of the last non-trivia token before the cursor
    fn last_significant_end(&self, floor: usize) -> usize {
        self.tokens[..self.pos]
            .iter()
            .rev()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.span.end)
            .unwrap_or(floor)
            .max(floor)
    }

    /// Parse a complete stylesheet
    pub fn parse_stylesheet(mut self) -> ParseOutput {
        let mut rules = Vec::new();

        while !self.at_end() {
            let before = self.pos;
            if let Some(rule) = self.parse_rule() {
                rules.push(rule);
            }
            if self.pos == before {
                self.pos += 1;
            }
        }

        let span = match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => Span::default(),
        };
        debug!("Parsed {} rules with {} syntax diagnostics", rules.len(), self.diagnostics.len());

        ParseOutput {
            stylesheet: Stylesheet { rules, span },
            diagnostics: self.diagnostics,
        }
    }

    /// Parse `selectors { declarations }`
    fn parse_rule(&mut self) -> Option<Rule> {
        self.skip_trivia();
        let start = self.pos;
        let mut has_content = false;
        let mut bracket_depth = 0usize;

        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::LeftBrace | TokenKind::RightBrace | TokenKind::Semicolon => break,
                TokenKind::LeftBracket => {
                    bracket_depth += 1;
                    has_content = true;
                }
                TokenKind::RightBracket if bracket_depth > 0 => bracket_depth -= 1,
                // `[text="a:b"]` and the like
                _ if bracket_depth > 0 => {}
                TokenKind::Colon => {
                    if !has_content {
                        trace!("Stray ':' at offset {} outside any rule", self.tokens[self.pos].span.start);
                        self.pos += 1;
                        return None;
                    }
                    let negation = self.tokens.get(self.pos + 1).is_some_and(|t| t.is(TokenKind::Bang));
                    if !negation {
                        break;
                    }
                }
                _ if is_selector_constituent(kind) => {
                    has_content |= !kind.is_trivia() && kind != TokenKind::Comma;
                }
                _ => break,
            }
            self.pos += 1;
        }

        if !has_content {
            self.pos = (start + 1).min(self.tokens.len());
            return None;
        }

        let selectors = SelectorList::new(self.tokens[start..self.pos].to_vec());

        if self.peek_kind() != Some(TokenKind::LeftBrace) {
            match self.config.strictness {
                Strictness::Strict => {
                    let span = self.peek().map(|t| t.span).unwrap_or(Span::at(selectors.span.end));
                    self.error(SyntaxError::ExpectedOpenBrace, span);
                }
                Strictness::Lenient => trace!("Dropping selector without block at {}", selectors.span),
            }
            self.skip_statement();
            return None;
        }
        self.pos += 1; // consume '{'

        let mut declarations = Vec::new();
        let mut closed = false;

        loop {
            while self
                .peek_kind()
                .is_some_and(|k| k.is_trivia() || k == TokenKind::Semicolon)
            {
                self.pos += 1;
            }

            let Some(token) = self.peek() else {
                self.error(SyntaxError::ExpectedCloseBrace, Span::at(self.end_offset()));
                break;
            };

            if token.is(TokenKind::RightBrace) {
                self.pos += 1;
                closed = true;
                break;
            }

            if looks_like_new_selector_start(&self.tokens, self.pos) {
                let span = token.span;
                trace!("'{}' at {} looks like a new selector, closing rule", token.text, span);
                self.error(SyntaxError::MissingCloseBrace, span);
                break;
            }

            let before = self.pos;
            if let Some(declaration) = self.parse_declaration() {
                declarations.push(declaration);
            }
            if self.pos == before {
                self.pos += 1;
            }
        }

        let end = self.last_significant_end(selectors.span.end);
        Some(Rule {
            span: Span::new(selectors.span.start, end),
            selectors,
            declarations,
            closed,
        })
    }

    /// Skip past a statement that has no usable block
    fn skip_statement(&mut self) {
        let mut depth = 0usize;
        while let Some(kind) = self.peek_kind() {
            self.pos += 1;
            match kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => {
                    if depth <= 1 {
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::Semicolon if depth == 0 => return,
                _ => {}
            }
        }
    }

    /// Skip to the next `;` (consumed), `}` or new selector (not consumed)
    fn skip_to_boundary(&mut self) {
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::Semicolon => {
                    self.pos += 1;
                    return;
                }
                TokenKind::RightBrace => return,
                _ if looks_like_new_selector_start(&self.tokens, self.pos) => return,
                _ => self.pos += 1,
            }
        }
    }

    /// Parse `property: values;`
    fn parse_declaration(&mut self) -> Option<Declaration> {
        let property = self.peek()?.clone();
        if !property.kind.is_property_name() {
            self.error(SyntaxError::UnexpectedToken(property.text.clone()), property.span);
            self.pos += 1;
            self.skip_to_boundary();
            return None;
        }
        self.pos += 1;
        self.skip_trivia();

        let colon = match self.peek() {
            Some(token) if token.is(TokenKind::Colon) => token.span,
            _ => {
                self.error(SyntaxError::ExpectedColon, property.span);
                self.skip_to_boundary();
                return None;
            }
        };
        self.pos += 1;

        let value_start = self.pos;
        let mut depth = 0usize;
        let mut runaway = false;

        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::LeftBrace => break,
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth = depth.saturating_sub(1),
                TokenKind::Colon | TokenKind::PseudoState if depth == 0 => {
                    if let Some(next_property) = self.runaway_property(value_start) {
                        self.pos = next_property;
                        runaway = true;
                        break;
                    }
                }
                _ if depth == 0 && looks_like_new_selector_start(&self.tokens, self.pos) => break,
                _ => {}
            }
            self.pos += 1;
        }

        let value = PropertyValues::new(self.tokens[value_start..self.pos].to_vec(), Span::at(colon.end));

        if runaway {
            let span = self.tokens[self.pos].span;
            self.error(SyntaxError::ExpectedSemicolon, span);
        }

        let mut end = value.span.end.max(colon.end);
        let terminated = match self.peek() {
            Some(token) if token.is(TokenKind::Semicolon) => {
                end = token.span.end;
                self.pos += 1;
                true
            }
            _ => false,
        };

        Some(Declaration {
            span: Span::new(property.span.start, end),
            property,
            colon,
            value,
            terminated,
        })
    }

    /// Index of a property name that begins a second declaration run into the
    /// current value, as in `color: red background: blue`
    fn runaway_property(&self, value_start: usize) -> Option<usize> {
        let mut idx = self.pos.checked_sub(1)?;
        if self.tokens[self.pos].is(TokenKind::Colon) {
            while idx > value_start && self.tokens[idx].kind.is_trivia() {
                idx -= 1;
            }
        }
        if idx <= value_start || !self.tokens[idx].kind.is_property_name() {
            return None;
        }
        // `color: red:hover` has no value before `red` to end the first declaration
        if self.tokens[value_start..idx].iter().all(|t| t.kind.is_trivia()) {
            return None;
        }
        self.tokens[idx - 1].kind.is_trivia().then_some(idx)
    }
}
