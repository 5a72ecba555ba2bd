//! QSS Selector decomposition
//!
//! Selectors stay a raw token span in the tree; this module breaks that span
//! into the parts the validator cares about. It does not compute specificity
//! or match widgets.

use smallvec::SmallVec;

use crate::error::Span;
use crate::tokenizer::{Token, TokenKind};

/// A name together with where it was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub text: String,
    pub span: Span,
}

impl Name {
    fn new(text: impl Into<String>, span: Span) -> Self {
        Self { text: text.into(), span }
    }
}

/// Selector combinators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace)
    Descendant,
    /// Child combinator (>)
    Child,
}

/// A part of a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPart {
    /// Type selector (e.g. `QPushButton`)
    Widget(Name),
    /// Class selector (e.g. `.primary`), name without the dot
    Class(Name),
    /// ID selector (e.g. `#okButton`), name without the hash
    Id(Name),
    /// Universal selector (`*`)
    Universal(Span),
    /// `:hover` or negated `:!hover`, name without the colon
    PseudoState { name: Name, negated: bool },
    /// `::handle`, name without the colons
    SubControl(Name),
    /// `[flat="true"]` or `[flat]`
    Attribute {
        name: Name,
        value: Option<String>,
        span: Span,
    },
    /// Combinator between compound selectors
    Combinator(Combinator, Span),
}

impl SelectorPart {
    pub fn span(&self) -> Span {
        match self {
            Self::Widget(name) | Self::Class(name) | Self::Id(name) | Self::SubControl(name) => name.span,
            Self::PseudoState { name, .. } => name.span,
            Self::Universal(span) | Self::Attribute { span, .. } | Self::Combinator(_, span) => *span,
        }
    }
}

/// One selector of a comma-separated list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub parts: Vec<SelectorPart>,
    pub span: Span,
}

impl Selector {
    /// Compound selectors between combinators, combinators excluded
    pub fn compounds(&self) -> Vec<&[SelectorPart]> {
        self.parts
            .split(|part| matches!(part, SelectorPart::Combinator(..)))
            .filter(|compound| !compound.is_empty())
            .collect()
    }
}

/// Break selector tokens into comma-separated selectors
pub fn decompose(tokens: &[Token]) -> Vec<Selector> {
    let mut selectors = Vec::new();
    let mut builder = SelectorBuilder::default();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Comma => {
                selectors.extend(builder.finish());
                builder = SelectorBuilder::default();
            }
            TokenKind::Whitespace | TokenKind::Comment => builder.saw_space = true,
            TokenKind::Greater => builder.combinator(Combinator::Child, token.span),
            TokenKind::WidgetClass | TokenKind::Identifier | TokenKind::Keyword => {
                builder.push(SelectorPart::Widget(Name::new(&token.text, token.span)));
            }
            TokenKind::Dot => builder.push(SelectorPart::Class(Name::new(&token.text[1..], token.span))),
            TokenKind::Hash | TokenKind::HexColor => {
                builder.push(SelectorPart::Id(Name::new(&token.text[1..], token.span)));
            }
            TokenKind::Asterisk => builder.push(SelectorPart::Universal(token.span)),
            TokenKind::PseudoState => builder.push(SelectorPart::PseudoState {
                name: Name::new(&token.text[1..], token.span),
                negated: false,
            }),
            TokenKind::PseudoElement => {
                builder.push(SelectorPart::SubControl(Name::new(&token.text[2..], token.span)));
            }
            TokenKind::Colon => {
                // `:!state`
                let bang = tokens.get(i + 1).filter(|t| t.kind == TokenKind::Bang);
                let state = tokens.get(i + 2).filter(|t| t.kind.is_property_name());
                if let (Some(_), Some(state)) = (bang, state) {
                    builder.push(SelectorPart::PseudoState {
                        name: Name::new(&state.text, Span::new(token.span.start, state.span.end)),
                        negated: true,
                    });
                    i += 2;
                }
            }
            TokenKind::LeftBracket => {
                let consumed = attribute(&tokens[i..]);
                if let Some(part) = consumed.part {
                    builder.push(part);
                }
                i += consumed.len - 1;
            }
            _ => {}
        }
        i += 1;
    }

    selectors.extend(builder.finish());
    selectors
}

#[derive(Default)]
struct SelectorBuilder {
    parts: Vec<SelectorPart>,
    span: Option<Span>,
    saw_space: bool,
}

impl SelectorBuilder {
    fn push(&mut self, part: SelectorPart) {
        let ends_in_combinator = matches!(self.parts.last(), Some(SelectorPart::Combinator(..)));
        if self.saw_space && !self.parts.is_empty() && !ends_in_combinator {
            let gap = Span::at(part.span().start);
            self.parts.push(SelectorPart::Combinator(Combinator::Descendant, gap));
        }
        self.saw_space = false;
        self.extend_span(part.span());
        self.parts.push(part);
    }

    fn combinator(&mut self, combinator: Combinator, span: Span) {
        self.saw_space = false;
        if let Some(SelectorPart::Combinator(..)) = self.parts.last() {
            // `A > > B`: the later combinator wins
            self.parts.pop();
        }
        if !self.parts.is_empty() {
            self.extend_span(span);
            self.parts.push(SelectorPart::Combinator(combinator, span));
        }
    }

    fn extend_span(&mut self, span: Span) {
        self.span = Some(match self.span {
            Some(current) => current.cover(span),
            None => span,
        });
    }

    fn finish(mut self) -> Option<Selector> {
        while let Some(SelectorPart::Combinator(..)) = self.parts.last() {
            self.parts.pop();
        }
        let span = self.span?;
        if self.parts.is_empty() {
            return None;
        }
        Some(Selector { parts: self.parts, span })
    }
}

struct Consumed {
    part: Option<SelectorPart>,
    len: usize,
}

/// Parse `[name]` or `[name=value]` starting at a `[` token
fn attribute(tokens: &[Token]) -> Consumed {
    let close = tokens
        .iter()
        .position(|t| t.kind == TokenKind::RightBracket)
        .map(|idx| idx + 1)
        .unwrap_or(tokens.len());
    let inner: SmallVec<[&Token; 8]> = tokens[1..close.max(1)]
        .iter()
        .filter(|t| !t.kind.is_trivia() && t.kind != TokenKind::RightBracket)
        .collect();

    let part = inner.first().filter(|t| t.kind.is_property_name()).map(|name| {
        let value = match inner.get(1) {
            Some(eq) if eq.kind == TokenKind::Equals => inner.get(2).map(|v| unquote(&v.text)),
            _ => None,
        };
        let end = tokens[close - 1].span.end;
        SelectorPart::Attribute {
            name: Name::new(&name.text, name.span),
            value,
            span: Span::new(tokens[0].span.start, end),
        }
    });

    Consumed { part, len: close }
}

fn unquote(text: &str) -> String {
    let trimmed = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')));
    trimmed.unwrap_or(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn parse(input: &str) -> Vec<Selector> {
        decompose(&tokenize(input))
    }

    #[test]
    fn test_widget_with_sub_control_and_state() {
        let selectors = parse("QScrollBar::handle:vertical");
        assert_eq!(selectors.len(), 1);
        let parts = &selectors[0].parts;
        assert!(matches!(&parts[0], SelectorPart::Widget(n) if n.text == "QScrollBar"));
        assert!(matches!(&parts[1], SelectorPart::SubControl(n) if n.text == "handle"));
        assert!(matches!(&parts[2], SelectorPart::PseudoState { name, negated: false } if name.text == "vertical"));
    }

    #[test]
    fn test_negated_state() {
        let selectors = parse("QPushButton:!hover");
        let parts = &selectors[0].parts;
        assert_eq!(parts.len(), 2);
        match &parts[1] {
            SelectorPart::PseudoState { name, negated } => {
                assert_eq!(name.text, "hover");
                assert!(*negated);
                assert_eq!(name.span, Span::new(11, 18));
            }
            other => panic!("Expected pseudo-state, got {:?}", other),
        }
    }

    #[test]
    fn test_class_id_universal() {
        let selectors = parse("*.primary#ok");
        let parts = &selectors[0].parts;
        assert!(matches!(parts[0], SelectorPart::Universal(_)));
        assert!(matches!(&parts[1], SelectorPart::Class(n) if n.text == "primary"));
        assert!(matches!(&parts[2], SelectorPart::Id(n) if n.text == "ok"));
    }

    #[test]
    fn test_hex_looking_id() {
        let selectors = parse("#add");
        assert!(matches!(&selectors[0].parts[0], SelectorPart::Id(n) if n.text == "add"));
    }

    #[test]
    fn test_comma_list() {
        let selectors = parse("QLabel, QPushButton:hover ,QFrame");
        assert_eq!(selectors.len(), 3);
        assert_eq!(selectors[1].span, Span::new(8, 25));
        assert_eq!(selectors[2].parts.len(), 1);
    }

    #[test]
    fn test_combinators() {
        let selectors = parse("QDialog QFrame > QLabel");
        let parts = &selectors[0].parts;
        assert_eq!(parts.len(), 5);
        assert!(matches!(parts[1], SelectorPart::Combinator(Combinator::Descendant, _)));
        assert!(matches!(parts[3], SelectorPart::Combinator(Combinator::Child, _)));
        let compounds = selectors[0].compounds();
        assert_eq!(compounds.len(), 3);
    }

    #[test]
    fn test_compound_grouping() {
        let selectors = parse("QTabWidget QTabBar::tab:selected");
        let compounds = selectors[0].compounds();
        assert_eq!(compounds.len(), 2);
        assert_eq!(compounds[1].len(), 3);
        assert!(matches!(&compounds[1][0], SelectorPart::Widget(n) if n.text == "QTabBar"));
    }

    #[test]
    fn test_attribute_selector() {
        let selectors = parse("QPushButton[flat=\"true\"], QLabel[readOnly]");
        match &selectors[0].parts[1] {
            SelectorPart::Attribute { name, value, span } => {
                assert_eq!(name.text, "flat");
                assert_eq!(value.as_deref(), Some("true"));
                assert_eq!(*span, Span::new(11, 24));
            }
            other => panic!("Expected attribute, got {:?}", other),
        }
        assert!(matches!(&selectors[1].parts[1], SelectorPart::Attribute { value: None, .. }));
    }

    #[test]
    fn test_unclosed_attribute() {
        let selectors = parse("QLabel[text=");
        assert_eq!(selectors.len(), 1);
        assert!(matches!(&selectors[0].parts[1], SelectorPart::Attribute { value: None, .. }));
    }

    #[test]
    fn test_empty_and_dangling() {
        assert!(parse("").is_empty());
        assert!(parse(" , ").is_empty());
        let selectors = parse("QLabel >");
        assert_eq!(selectors[0].parts.len(), 1);
    }
}
