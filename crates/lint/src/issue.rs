//! Semantic findings reported by the validator

use qsskit_syntax::{Diagnostic, Severity, Span};
use thiserror::Error;

/// A problem found in an otherwise well-formed stylesheet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintIssue {
    #[error("Selector '{0}' is already defined; its rules will be merged")]
    DuplicateSelector(String),

    #[error("'::{sub_control}' is not a valid sub-control for {widget}")]
    InvalidSubControl { widget: &'static str, sub_control: String },

    #[error("'::{0}' may not be supported")]
    UnsupportedSubControl(String),

    #[error("Invalid casing '{found}', did you mean '{expected}'?")]
    WidgetCasing { found: String, expected: &'static str },

    #[error("Unknown pseudo-state ':{0}'")]
    UnknownPseudoState(String),

    #[error("Unknown property '{0}'")]
    UnknownProperty(String),

    #[error("Property '{found}' should be written in lowercase as '{expected}'")]
    PropertyCasing { found: String, expected: String },

    #[error("Missing value for '{0}'")]
    MissingValue(String),

    #[error("Invalid measurement '{value}' for '{property}', did you mean '{value}px'?")]
    MissingUnit { property: String, value: String },

    #[error("Invalid measurement '{value}' for '{property}'")]
    InvalidMeasurement { property: String, value: String },

    #[error("'{property}' takes at most {max} value(s), found {found}")]
    TooManyValues { property: String, max: usize, found: usize },

    #[error("Invalid color '{value}' for '{property}'")]
    InvalidColor { property: String, value: String },

    #[error("Malformed color function '{0}'")]
    MalformedColorFunction(String),

    #[error("Invalid number '{value}' for '{property}'")]
    InvalidNumber { property: String, value: String },

    #[error("Opacity '{0}' is outside [0, 1] and will be clamped")]
    OpacityOutOfRange(String),

    #[error("Expected url(...) for '{property}', found '{value}'")]
    ExpectedUrl { property: String, value: String },

    #[error("Empty url()")]
    EmptyUrl,

    #[error("Unclosed url(...): missing ')'")]
    UnclosedUrl,

    #[error("Unexpected '{value}' after url for '{property}'")]
    UnexpectedValue { property: String, value: String },

    #[error("'{property}: {style}' sets only a style; use a width, style and color such as '1px {style} black'")]
    IncompleteBorder { property: String, style: String },
}

impl LintIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::DuplicateSelector(_) | Self::PropertyCasing { .. } => Severity::WeakWarning,
            Self::UnsupportedSubControl(_)
            | Self::UnknownPseudoState(_)
            | Self::UnknownProperty(_)
            | Self::OpacityOutOfRange(_)
            | Self::IncompleteBorder { .. } => Severity::Warning,
            Self::InvalidSubControl { .. }
            | Self::WidgetCasing { .. }
            | Self::MissingValue(_)
            | Self::MissingUnit { .. }
            | Self::InvalidMeasurement { .. }
            | Self::TooManyValues { .. }
            | Self::InvalidColor { .. }
            | Self::MalformedColorFunction(_)
            | Self::InvalidNumber { .. }
            | Self::ExpectedUrl { .. }
            | Self::EmptyUrl
            | Self::UnclosedUrl
            | Self::UnexpectedValue { .. } => Severity::Error,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateSelector(_) => "duplicate-selector",
            Self::InvalidSubControl { .. } => "invalid-sub-control",
            Self::UnsupportedSubControl(_) => "unsupported-sub-control",
            Self::WidgetCasing { .. } => "widget-casing",
            Self::UnknownPseudoState(_) => "unknown-pseudo-state",
            Self::UnknownProperty(_) => "unknown-property",
            Self::PropertyCasing { .. } => "property-casing",
            Self::MissingValue(_) => "missing-value",
            Self::MissingUnit { .. } => "missing-unit",
            Self::InvalidMeasurement { .. } => "invalid-measurement",
            Self::TooManyValues { .. } => "too-many-values",
            Self::InvalidColor { .. } => "invalid-color",
            Self::MalformedColorFunction(_) => "malformed-color-function",
            Self::InvalidNumber { .. } => "invalid-number",
            Self::OpacityOutOfRange(_) => "opacity-out-of-range",
            Self::ExpectedUrl { .. } => "expected-url",
            Self::EmptyUrl => "empty-url",
            Self::UnclosedUrl => "unclosed-url",
            Self::UnexpectedValue { .. } => "unexpected-value",
            Self::IncompleteBorder { .. } => "incomplete-border",
        }
    }

    pub fn into_diagnostic(self, span: Span) -> Diagnostic {
        Diagnostic::new(self.severity(), self.code(), self.to_string(), span)
    }
}
