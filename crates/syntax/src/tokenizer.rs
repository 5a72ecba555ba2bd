//! QSS Tokenizer
//!
//! Splits stylesheet text into a flat run of tokens. The tokens partition the
//! scanned range exactly: concatenating their texts in order gives back the
//! input. Anything the tokenizer cannot classify becomes a one-character
//! [`TokenKind::BadCharacter`], so tokenizing never fails.

use std::ops::Range;
use std::sync::LazyLock;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::error::Span;

/// QSS token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Run of whitespace
    Whitespace,
    /// `/* ... */` or `// ...` (line comment includes its newline)
    Comment,
    /// Lowercase-initial identifier: property names and generic values
    Identifier,
    /// Capitalised identifier, usually a widget class such as `QPushButton`
    WidgetClass,
    /// Predefined value keyword (`solid`, `bold`, `none`, ...)
    Keyword,
    /// Quoted string, quotes included
    String,
    /// Number with optional unit or `%`
    Number,
    /// `#` followed by exactly 3, 6 or 8 hex digits
    HexColor,
    /// `#name` id selector (or a bare `#`)
    Hash,
    /// `.name` class selector (or a bare `.`)
    Dot,
    /// `*`
    Asterisk,
    /// `:name`
    PseudoState,
    /// `::name`
    PseudoElement,
    /// `:` or a dangling `::`
    Colon,
    Semicolon,
    Comma,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Equals,
    /// `>` child combinator
    Greater,
    /// `!` negation
    Bang,
    Slash,
    /// `url(...)` scanned as one span
    Url,
    /// `rgb(...)` / `rgba(...)` scanned as one span
    ColorFunction,
    /// `q*gradient(...)` scanned as one span
    Gradient,
    /// `{{ NAME }}` placeholder
    TemplateTag,
    /// Any single character nothing else accepts
    BadCharacter,
}

impl TokenKind {
    /// Whitespace and comments
    pub fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }

    /// Tokens that may name a property in a declaration
    pub fn is_property_name(&self) -> bool {
        matches!(self, Self::Identifier | Self::WidgetClass | Self::Keyword)
    }
}

/// A token with its absolute span and raw lexeme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self { kind, span, text: text.into() }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Value keywords recognised at lexing time
static KEYWORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        // Border styles
        "none", "solid", "dashed", "dotted", "double", "groove", "ridge", "inset", "outset",
        // Named colors commonly typed by hand
        "transparent", "white", "black", "red", "green", "blue", "yellow", "cyan", "magenta",
        "gray", "grey", "darkred", "darkgreen", "darkblue", "darkcyan", "darkmagenta", "darkyellow",
        "lightgray", "lightgrey",
        // Font weights and styles
        "normal", "bold", "bolder", "lighter", "italic", "oblique",
        // Text decoration
        "underline", "overline", "line-through",
        // Alignment
        "left", "right", "center", "top", "bottom", "middle",
        // Display
        "block", "inline", "inline-block",
        // Boolean-ish
        "true", "false", "on", "off", "yes", "no",
        // Repeat
        "repeat", "repeat-x", "repeat-y", "no-repeat",
        // Positioning and sizing
        "stretch", "fixed", "auto",
    ]
    .into_iter()
    .collect()
});

/// Check whether `word` (already lowercased) is a lexer keyword
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}

/// QSS Tokenizer
///
/// Scans `text[range]` lazily; every produced span is an absolute offset into
/// `text`.
pub struct Tokenizer<'a> {
    text: &'a str,
    position: usize,
    end: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over the whole text
    pub fn new(text: &'a str) -> Self {
        Self { text, position: 0, end: text.len() }
    }

    /// Create a tokenizer over a sub-range of a larger document
    ///
    /// The range is clamped to the text and snapped back to char boundaries.
    pub fn with_range(text: &'a str, range: Range<usize>) -> Self {
        let mut end = range.end.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let mut start = range.start.min(end);
        while !text.is_char_boundary(start) {
            start -= 1;
        }
        Self { text, position: start, end }
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.position
    }

    fn rest(&self) -> &'a str {
        &self.text[self.position..self.end]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.position += c.len_utf8();
        }
    }

    /// Produce the next token, or `None` at the end of the range
    pub fn next_token(&mut self) -> Option<Token> {
        let start = self.position;
        let c = self.peek()?;

        let kind = match c {
            _ if c.is_whitespace() => {
                self.bump_while(char::is_whitespace);
                TokenKind::Whitespace
            }
            '{' if self.peek_nth(1) == Some('{') => self.consume_template_tag(),
            ':' if self.peek_nth(1) == Some(':') => {
                self.position += 2;
                if self.peek().is_some_and(is_ident_start) {
                    self.bump_while(is_ident_char);
                    TokenKind::PseudoElement
                } else {
                    TokenKind::Colon
                }
            }
            ':' => {
                self.bump();
                if self.peek().is_some_and(is_ident_start) {
                    self.bump_while(is_ident_char);
                    TokenKind::PseudoState
                } else {
                    TokenKind::Colon
                }
            }
            '/' if matches!(self.peek_nth(1), Some('/') | Some('*')) => self.consume_comment(),
            '{' | '}' | '(' | ')' | '[' | ']' | ';' | ',' | '=' | '>' | '!' | '/' => {
                self.bump();
                punctuation_kind(c)
            }
            '#' => self.consume_hash(),
            '*' => {
                self.bump();
                TokenKind::Asterisk
            }
            '.' => {
                self.bump();
                self.bump_while(is_ident_char);
                TokenKind::Dot
            }
            '"' | '\'' => self.consume_string(),
            '-' if self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => self.consume_number(),
            '0'..='9' => self.consume_number(),
            '-' if self.peek_nth(1).is_some_and(is_ident_start) => self.consume_ident_like(),
            _ if is_ident_start(c) => self.consume_ident_like(),
            _ => {
                self.bump();
                TokenKind::BadCharacter
            }
        };

        let span = Span::new(start, self.position);
        Some(Token::new(kind, span, &self.text[start..self.position]))
    }

    /// Consume `{{ ... }}`; an unclosed tag runs to the end of input
    fn consume_template_tag(&mut self) -> TokenKind {
        self.position += 2;
        match self.rest().find("}}") {
            Some(idx) => self.position += idx + 2,
            None => self.position = self.end,
        }
        TokenKind::TemplateTag
    }

    /// Consume a line or block comment; an unterminated block runs to the end
    fn consume_comment(&mut self) -> TokenKind {
        self.bump();
        if self.bump() == Some('/') {
            match self.rest().find('\n') {
                Some(idx) => self.position += idx + 1,
                None => self.position = self.end,
            }
        } else {
            match self.rest().find("*/") {
                Some(idx) => self.position += idx + 2,
                None => self.position = self.end,
            }
        }
        TokenKind::Comment
    }

    /// Consume a hex color or an id selector
    fn consume_hash(&mut self) -> TokenKind {
        self.bump(); // consume '#'
        let digits_start = self.position;
        self.bump_while(|c| c.is_ascii_hexdigit());
        let digits = self.position - digits_start;

        // `#bad-name` is an id, not the color `#bad` followed by junk
        let continues = self.peek().is_some_and(is_ident_char);
        if matches!(digits, 3 | 6 | 8) && !continues {
            return TokenKind::HexColor;
        }

        self.bump_while(is_ident_char);
        TokenKind::Hash
    }

    /// Consume a quoted string; a backslash always takes the next char literally
    fn consume_string(&mut self) -> TokenKind {
        let quote = self.bump();
        while let Some(c) = self.bump() {
            if c == '\\' {
                self.bump();
            } else if Some(c) == quote {
                break;
            }
        }
        TokenKind::String
    }

    /// Consume `-?digits(.digits)?` plus `%` or a unit suffix
    fn consume_number(&mut self) -> TokenKind {
        if self.peek() == Some('-') {
            self.bump();
        }
        self.bump_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            self.bump_while(|c| c.is_ascii_digit());
        }

        if self.peek() == Some('%') {
            self.bump();
        } else if self.peek().is_some_and(is_ident_start) {
            self.bump_while(char::is_alphanumeric);
        }

        TokenKind::Number
    }

    /// Consume an identifier and classify it
    fn consume_ident_like(&mut self) -> TokenKind {
        let start = self.position;
        if self.peek() == Some('-') {
            self.bump();
        }
        self.bump_while(is_ident_char);
        let word = &self.text[start..self.position];
        let lower = word.to_ascii_lowercase();

        if self.peek() == Some('(') {
            if lower == "url" {
                self.consume_balanced_parens();
                return TokenKind::Url;
            }
            if lower == "rgb" || lower == "rgba" {
                self.consume_balanced_parens();
                return TokenKind::ColorFunction;
            }
            if lower.starts_with('q') && lower.ends_with("gradient") {
                self.consume_balanced_parens();
                return TokenKind::Gradient;
            }
        }

        classify_word(word, &lower)
    }

    /// Consume from `(` to its matching `)`, or to the end of input
    fn consume_balanced_parens(&mut self) {
        let mut depth = 0usize;
        while let Some(c) = self.bump() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                '"' | '\'' => {
                    // A ')' inside a quoted path does not close the call
                    while let Some(inner) = self.bump() {
                        if inner == '\\' {
                            self.bump();
                        } else if inner == c {
                            break;
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Tokenize the whole text
pub fn tokenize(text: &str) -> Vec<Token> {
    let tokens: Vec<Token> = Tokenizer::new(text).collect();
    log::debug!("Tokenized {} bytes into {} tokens", text.len(), tokens.len());
    tokens
}

/// Classify a plain word the way the tokenizer would
fn classify_word(word: &str, lower: &str) -> TokenKind {
    if is_keyword(lower) {
        TokenKind::Keyword
    } else if word.chars().next().is_some_and(char::is_uppercase) {
        TokenKind::WidgetClass
    } else {
        TokenKind::Identifier
    }
}

fn punctuation_kind(c: char) -> TokenKind {
    match c {
        '{' => TokenKind::LeftBrace,
        '}' => TokenKind::RightBrace,
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        '[' => TokenKind::LeftBracket,
        ']' => TokenKind::RightBracket,
        ';' => TokenKind::Semicolon,
        ',' => TokenKind::Comma,
        '=' => TokenKind::Equals,
        '>' => TokenKind::Greater,
        '!' => TokenKind::Bang,
        _ => TokenKind::Slash,
    }
}

/// Check if character can start an identifier
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Check if character can be part of an identifier
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}
