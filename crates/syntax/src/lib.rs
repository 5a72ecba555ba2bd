//! QssKit Syntax
//!
//! QSS tokenizer, recovering parser and parse tree.

pub mod error;
pub mod parser;
pub mod selector;
pub mod tokenizer;
pub mod tree;

pub use error::{Diagnostic, Fix, LineIndex, Severity, SourceLocation, Span, SyntaxError};
pub use parser::{
    looks_like_new_selector_start, parse, parse_tokens, parse_with, ParseOutput, ParserConfig, QssParser,
    Strictness,
};
pub use selector::{Combinator, Name, Selector, SelectorPart};
pub use tokenizer::{is_keyword, tokenize, Token, TokenKind, Tokenizer};
pub use tree::{Declaration, Node, NodeKind, PropertyValues, Rule, SelectorList, Stylesheet, Word};
