//! Lint configuration

use qsskit_syntax::{ParserConfig, Severity};

/// Which validator checks run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checks {
    pub duplicate_selectors: bool,
    pub sub_controls: bool,
    pub widget_casing: bool,
    pub pseudo_states: bool,
    pub unknown_properties: bool,
    pub property_casing: bool,
    /// Typed value validation, including missing values
    pub values: bool,
}

impl Checks {
    /// Every check disabled
    pub fn none() -> Self {
        Self {
            duplicate_selectors: false,
            sub_controls: false,
            widget_casing: false,
            pseudo_states: false,
            unknown_properties: false,
            property_casing: false,
            values: false,
        }
    }
}

impl Default for Checks {
    fn default() -> Self {
        Self {
            duplicate_selectors: true,
            sub_controls: true,
            widget_casing: true,
            pseudo_states: true,
            unknown_properties: true,
            property_casing: true,
            values: true,
        }
    }
}

/// Configuration for a whole analysis run
#[derive(Debug, Clone, Copy)]
pub struct LintConfig {
    pub parser: ParserConfig,
    pub checks: Checks,
    /// Diagnostics below this severity are dropped
    pub min_severity: Severity,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            checks: Checks::default(),
            min_severity: Severity::Info,
        }
    }
}
