//! QssKit Lint
//!
//! Knowledge base, semantic validator and the one-call analysis pipeline.

pub mod config;
pub mod issue;
pub mod knowledge;
pub mod validator;
pub mod values;

use log::debug;
use qsskit_syntax::{parse_tokens, tokenize, Diagnostic, ParseOutput, Stylesheet, Token};

pub use config::{Checks, LintConfig};
pub use issue::LintIssue;
pub use knowledge::PropertyType;
pub use qsskit_syntax::{Fix, Severity, Span};
pub use validator::{validate, validate_with, Validator};

/// Everything produced by one pass over a document
#[derive(Debug, Clone)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub stylesheet: Stylesheet,
    /// Parser and validator diagnostics, ordered by position
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }
}

/// Tokenize, parse and validate `text`
pub fn analyze(text: &str, config: &LintConfig) -> Analysis {
    let tokens = tokenize(text);
    let ParseOutput {
        stylesheet,
        mut diagnostics,
    } = parse_tokens(&tokens, &config.parser);
    diagnostics.extend(validate_with(&stylesheet, &config.checks));

    diagnostics.retain(|d| d.severity >= config.min_severity);
    // Stable: at equal positions syntax diagnostics stay ahead
    diagnostics.sort_by_key(|d| (d.span.start, d.span.end));

    debug!(
        "analyzed {} bytes: {} tokens, {} rules, {} diagnostics",
        text.len(),
        tokens.len(),
        stylesheet.rules.len(),
        diagnostics.len()
    );

    Analysis {
        tokens,
        stylesheet,
        diagnostics,
    }
}
