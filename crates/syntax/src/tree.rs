//! Parse tree
//!
//! `Stylesheet → Rule → SelectorList + Declaration* → PropertyValues`.
//! Nodes own copies of their tokens; no node is shared between rules.

use smallvec::SmallVec;

use crate::error::Span;
use crate::selector::{self, Selector};
use crate::tokenizer::{Token, TokenKind};

/// Root of the tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    /// Rules in source order
    pub rules: Vec<Rule>,
    pub span: Span,
}

/// `selectors { declarations }`
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
    pub span: Span,
    /// Whether the block ended with its own `}`
    pub closed: bool,
}

/// Raw selector tokens before `{`, trivia trimmed from both ends
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub tokens: Vec<Token>,
    pub span: Span,
}

/// `property: values;`
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: Token,
    pub colon: Span,
    pub value: PropertyValues,
    pub span: Span,
    /// Whether a `;` followed the value
    pub terminated: bool,
}

/// Tokens after the colon, trivia trimmed from both ends
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValues {
    pub tokens: Vec<Token>,
    pub span: Span,
}

/// One whitespace-separated chunk of a value
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub span: Span,
    pub kinds: SmallVec<[TokenKind; 4]>,
}

impl Word {
    /// The token kind when the word is exactly one token
    pub fn single_kind(&self) -> Option<TokenKind> {
        match self.kinds.as_slice() {
            [kind] => Some(*kind),
            _ => None,
        }
    }
}

impl SelectorList {
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = trim_trivia(tokens);
        let span = covering_span(&tokens).unwrap_or_default();
        Self { tokens, span }
    }

    /// Raw selector text, comments included
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Text used to compare selectors: comments dropped, whitespace runs
    /// collapsed to one space, trimmed
    pub fn normalized(&self) -> String {
        let mut out = String::new();
        let mut pending_space = false;
        for token in &self.tokens {
            match token.kind {
                TokenKind::Whitespace | TokenKind::Comment => pending_space = true,
                _ => {
                    if pending_space && !out.is_empty() {
                        out.push(' ');
                    }
                    pending_space = false;
                    out.push_str(&token.text);
                }
            }
        }
        out
    }

    /// Comma-separated selectors, decomposed
    pub fn selectors(&self) -> Vec<Selector> {
        selector::decompose(&self.tokens)
    }
}

impl Declaration {
    /// Property name exactly as written
    pub fn property_name(&self) -> &str {
        &self.property.text
    }
}

impl PropertyValues {
    pub fn new(tokens: Vec<Token>, fallback: Span) -> Self {
        let tokens = trim_trivia(tokens);
        let span = covering_span(&tokens).unwrap_or(fallback);
        Self { tokens, span }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Value text without comments
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Comment)
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Whether a `{{...}}` placeholder appears anywhere in the value
    pub fn has_template_tag(&self) -> bool {
        self.tokens.iter().any(|t| t.kind == TokenKind::TemplateTag)
    }

    /// Split into whitespace-separated words
    ///
    /// Whitespace inside parentheses does not split, so `hsv(0, 0, 0)` stays
    /// one word. Comments separate words and are dropped.
    pub fn words(&self) -> Vec<Word> {
        let mut words = Vec::new();
        let mut current: Option<Word> = None;
        let mut depth = 0usize;

        for token in &self.tokens {
            let separator = match token.kind {
                TokenKind::Comment => true,
                TokenKind::Whitespace => depth == 0,
                _ => false,
            };
            if separator {
                words.extend(current.take());
                continue;
            }

            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth = depth.saturating_sub(1),
                _ => {}
            }

            match current.as_mut() {
                Some(word) => {
                    word.text.push_str(&token.text);
                    word.span = word.span.cover(token.span);
                    word.kinds.push(token.kind);
                }
                None => {
                    current = Some(Word {
                        text: token.text.clone(),
                        span: token.span,
                        kinds: SmallVec::from_elem(token.kind, 1),
                    });
                }
            }
        }

        words.extend(current);
        words
    }
}

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Stylesheet,
    Rule,
    SelectorList,
    Declaration,
    PropertyValues,
}

/// Borrowed view of any tree node
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Stylesheet(&'a Stylesheet),
    Rule(&'a Rule),
    SelectorList(&'a SelectorList),
    Declaration(&'a Declaration),
    PropertyValues(&'a PropertyValues),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Stylesheet(_) => NodeKind::Stylesheet,
            Node::Rule(_) => NodeKind::Rule,
            Node::SelectorList(_) => NodeKind::SelectorList,
            Node::Declaration(_) => NodeKind::Declaration,
            Node::PropertyValues(_) => NodeKind::PropertyValues,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Stylesheet(n) => n.span,
            Node::Rule(n) => n.span,
            Node::SelectorList(n) => n.span,
            Node::Declaration(n) => n.span,
            Node::PropertyValues(n) => n.span,
        }
    }

    pub fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Node::Stylesheet(sheet) => sheet.rules.iter().map(Node::Rule).collect(),
            Node::Rule(rule) => std::iter::once(Node::SelectorList(&rule.selectors))
                .chain(rule.declarations.iter().map(Node::Declaration))
                .collect(),
            Node::Declaration(decl) => vec![Node::PropertyValues(&decl.value)],
            Node::SelectorList(_) | Node::PropertyValues(_) => Vec::new(),
        }
    }

    /// Visit this node and its descendants depth-first, parents before children
    pub fn walk(&self, visit: &mut impl FnMut(Node<'a>)) {
        visit(*self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

impl Stylesheet {
    pub fn node(&self) -> Node<'_> {
        Node::Stylesheet(self)
    }
}

fn trim_trivia(mut tokens: Vec<Token>) -> Vec<Token> {
    while tokens.last().is_some_and(|t| t.kind.is_trivia()) {
        tokens.pop();
    }
    let leading = tokens.iter().take_while(|t| t.kind.is_trivia()).count();
    tokens.drain(..leading);
    tokens
}

fn covering_span(tokens: &[Token]) -> Option<Span> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(Span::new(first.span.start, last.span.end))
}
