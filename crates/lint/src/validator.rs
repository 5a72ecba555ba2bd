//! Semantic validation over the parse tree
//!
//! The validator walks the tree once and never mutates it. Checks are
//! independent of each other and can be switched off through [`Checks`].

use log::{debug, trace};
use qsskit_syntax::{Declaration, Diagnostic, Fix, Name, Node, Rule, SelectorPart, Span, Stylesheet};
use rustc_hash::FxHashSet;

use crate::config::Checks;
use crate::issue::LintIssue;
use crate::knowledge;
use crate::values;

/// Validate with every check enabled
pub fn validate(stylesheet: &Stylesheet) -> Vec<Diagnostic> {
    validate_with(stylesheet, &Checks::default())
}

pub fn validate_with(stylesheet: &Stylesheet, checks: &Checks) -> Vec<Diagnostic> {
    let mut validator = Validator::new(checks);
    stylesheet.node().walk(&mut |node| validator.visit(node));
    let diagnostics = validator.finish();
    debug!(
        "validated {} rules: {} diagnostics",
        stylesheet.rules.len(),
        diagnostics.len()
    );
    diagnostics
}

/// Tree visitor accumulating semantic diagnostics
pub struct Validator<'c> {
    checks: &'c Checks,
    /// Normalized selector texts seen so far
    seen_selectors: FxHashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'c> Validator<'c> {
    pub fn new(checks: &'c Checks) -> Self {
        Self {
            checks,
            seen_selectors: FxHashSet::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Check a single node; children are not visited
    pub fn visit(&mut self, node: Node<'_>) {
        match node {
            Node::Rule(rule) => self.check_rule(rule),
            Node::Declaration(decl) => self.check_declaration(decl),
            Node::Stylesheet(_) | Node::SelectorList(_) | Node::PropertyValues(_) => {}
        }
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn report(&mut self, issue: LintIssue, span: Span) {
        self.diagnostics.push(issue.into_diagnostic(span));
    }

    fn report_with_fix(&mut self, issue: LintIssue, span: Span, fix: Fix) {
        self.diagnostics.push(issue.into_diagnostic(span).with_fix(fix));
    }

    fn check_rule(&mut self, rule: &Rule) {
        if rule.selectors.tokens.is_empty() {
            return;
        }

        if self.checks.duplicate_selectors {
            let key = rule.selectors.normalized();
            if self.seen_selectors.contains(&key) {
                trace!("duplicate selector {:?} at {}", key, rule.selectors.span);
                self.report(LintIssue::DuplicateSelector(key), rule.selectors.span);
            } else {
                self.seen_selectors.insert(key);
            }
        }

        for selector in rule.selectors.selectors() {
            for compound in selector.compounds() {
                self.check_compound(compound);
            }
        }
    }

    /// Check the parts of one compound selector against its own widget
    fn check_compound(&mut self, compound: &[SelectorPart]) {
        let widget = compound.iter().find_map(|part| match part {
            SelectorPart::Widget(name) => Some(name),
            _ => None,
        });
        let canonical = widget.and_then(|name| knowledge::canonical_widget(&name.text));

        if self.checks.widget_casing {
            if let (Some(name), Some(expected)) = (widget, canonical) {
                if name.text != expected {
                    let issue = LintIssue::WidgetCasing {
                        found: name.text.clone(),
                        expected,
                    };
                    self.report_with_fix(issue, name.span, Fix::new(name.span, expected));
                }
            }
        }

        for part in compound {
            match part {
                SelectorPart::SubControl(name) if self.checks.sub_controls => {
                    self.check_sub_control(name, canonical);
                }
                SelectorPart::PseudoState { name, .. } if self.checks.pseudo_states => {
                    if !knowledge::is_pseudo_state(&name.text) {
                        self.report(LintIssue::UnknownPseudoState(name.text.clone()), name.span);
                    }
                }
                _ => {}
            }
        }
    }

    fn check_sub_control(&mut self, name: &Name, widget: Option<&'static str>) {
        let sub_control = name.text.to_ascii_lowercase();
        match widget {
            Some(widget) => {
                let allowed = knowledge::sub_controls(widget).unwrap_or_default();
                if !allowed.contains(&sub_control.as_str()) {
                    let issue = LintIssue::InvalidSubControl {
                        widget,
                        sub_control: name.text.clone(),
                    };
                    self.report(issue, name.span);
                }
            }
            None => {
                if !knowledge::common_sub_controls().contains(&sub_control.as_str()) {
                    self.report(LintIssue::UnsupportedSubControl(name.text.clone()), name.span);
                }
            }
        }
    }

    fn check_declaration(&mut self, decl: &Declaration) {
        let written = decl.property_name();
        let property = written.to_ascii_lowercase();
        let span = decl.property.span;

        if !knowledge::is_known_property(&property) {
            if self.checks.unknown_properties {
                let issue = LintIssue::UnknownProperty(written.to_string());
                match knowledge::closest_property(&property) {
                    Some(suggestion) => self.report_with_fix(issue, span, Fix::new(span, suggestion)),
                    None => self.report(issue, span),
                }
            }
            return;
        }

        if self.checks.property_casing && written != property {
            let issue = LintIssue::PropertyCasing {
                found: written.to_string(),
                expected: property.clone(),
            };
            self.report_with_fix(issue, span, Fix::new(span, property.as_str()));
        }

        if self.checks.values {
            values::check_value(&property, &decl.value, &mut self.diagnostics);
        }
    }
}
