//! Typed value checks
//!
//! Each [`PropertyType`] has its own check over the whitespace-separated
//! words of a value. Findings point at the offending word, never the whole
//! declaration.

use qsskit_color::{is_named_color, parse_color};
use qsskit_syntax::{Diagnostic, Fix, PropertyValues, Span, TokenKind, Word};

use crate::issue::LintIssue;
use crate::knowledge::{self, PropertyType};

/// Check `value` against the type of `property`, which must be known and lowercase
pub fn check_value(property: &str, value: &PropertyValues, out: &mut Vec<Diagnostic>) {
    if value.is_empty() {
        out.push(LintIssue::MissingValue(property.to_string()).into_diagnostic(value.span));
        return;
    }
    if value.has_template_tag() {
        return;
    }
    let Some(kind) = knowledge::property_type(property) else {
        return;
    };

    let mut words = value.words();
    strip_important(&mut words);
    if words.is_empty() {
        out.push(LintIssue::MissingValue(property.to_string()).into_diagnostic(value.span));
        return;
    }

    let mut checker = ValueChecker { property, out };
    match kind {
        PropertyType::Measurement => checker.measurement(&words),
        PropertyType::Color => checker.color(&words),
        PropertyType::Number => checker.number(&words),
        PropertyType::Url => checker.url(&words),
        PropertyType::Border => checker.border(&words),
        PropertyType::String => {}
    }
}

/// Drop a trailing `!important`, written joined or spaced
fn strip_important(words: &mut Vec<Word>) {
    let Some(last) = words.last() else {
        return;
    };
    if last.text.eq_ignore_ascii_case("!important") {
        words.pop();
    } else if last.text.eq_ignore_ascii_case("important")
        && words.len() >= 2
        && words[words.len() - 2].text == "!"
    {
        words.truncate(words.len() - 2);
    }
}

struct ValueChecker<'a> {
    property: &'a str,
    out: &'a mut Vec<Diagnostic>,
}

impl ValueChecker<'_> {
    fn report(&mut self, issue: LintIssue, span: Span) {
        self.out.push(issue.into_diagnostic(span));
    }

    fn report_with_fix(&mut self, issue: LintIssue, span: Span, replacement: String) {
        self.out
            .push(issue.into_diagnostic(span).with_fix(Fix::new(span, replacement)));
    }

    /// Flag words past the first `max`
    fn check_count(&mut self, words: &[Word], max: usize) {
        if let (Some(first_extra), Some(last)) = (words.get(max), words.last()) {
            let issue = LintIssue::TooManyValues {
                property: self.property.to_string(),
                max,
                found: words.len(),
            };
            self.report(issue, first_extra.span.cover(last.span));
        }
    }

    fn measurement(&mut self, words: &[Word]) {
        if let [word] = words {
            let lower = word.text.to_ascii_lowercase();
            if lower == "auto" || lower == "none" {
                return;
            }
        }
        for word in words {
            match classify_measurement(&word.text) {
                Measurement::Valid | Measurement::Zero => {}
                Measurement::BareNumber => self.missing_unit(word),
                Measurement::Invalid => {
                    let issue = LintIssue::InvalidMeasurement {
                        property: self.property.to_string(),
                        value: word.text.clone(),
                    };
                    self.report(issue, word.span);
                }
            }
        }
        let max = if knowledge::is_shorthand(self.property) { 4 } else { 1 };
        self.check_count(words, max);
    }

    fn missing_unit(&mut self, word: &Word) {
        let issue = LintIssue::MissingUnit {
            property: self.property.to_string(),
            value: word.text.clone(),
        };
        self.report_with_fix(issue, word.span, format!("{}px", word.text));
    }

    fn color(&mut self, words: &[Word]) {
        for word in words {
            match classify_color(word) {
                ColorCheck::Valid => {}
                ColorCheck::Malformed => {
                    self.report(LintIssue::MalformedColorFunction(word.text.clone()), word.span);
                }
                ColorCheck::Invalid => {
                    let issue = LintIssue::InvalidColor {
                        property: self.property.to_string(),
                        value: word.text.clone(),
                    };
                    self.report(issue, word.span);
                }
            }
        }
        let max = if knowledge::is_shorthand(self.property) { 4 } else { 1 };
        self.check_count(words, max);
    }

    fn number(&mut self, words: &[Word]) {
        let word = &words[0];
        let lower = word.text.to_ascii_lowercase();
        if lower != "true" && lower != "false" {
            match parse_numeral(&word.text) {
                Some(value) => {
                    if self.property == "opacity" && !(0.0..=1.0).contains(&value) {
                        self.report(LintIssue::OpacityOutOfRange(word.text.clone()), word.span);
                    }
                }
                None => {
                    let issue = LintIssue::InvalidNumber {
                        property: self.property.to_string(),
                        value: word.text.clone(),
                    };
                    self.report(issue, word.span);
                }
            }
        }
        self.check_count(words, 1);
    }

    fn url(&mut self, words: &[Word]) {
        let first = &words[0];
        if first.single_kind() == Some(TokenKind::Url) {
            self.url_argument(first);
        } else if !first.text.eq_ignore_ascii_case("none") {
            let issue = LintIssue::ExpectedUrl {
                property: self.property.to_string(),
                value: first.text.clone(),
            };
            self.report(issue, first.span);
            return;
        }

        // border-image carries slices and repeat modes after the url
        if self.property == "border-image" {
            return;
        }
        if let (Some(extra), Some(last)) = (words.get(1), words.last()) {
            let span = extra.span.cover(last.span);
            let value = words[1..]
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let issue = LintIssue::UnexpectedValue {
                property: self.property.to_string(),
                value,
            };
            self.report(issue, span);
        }
    }

    /// An unclosed `url(` runs to the end of input, so it hides any empty check
    fn url_argument(&mut self, word: &Word) {
        if !word.text.ends_with(')') {
            self.report(LintIssue::UnclosedUrl, word.span);
        } else if is_empty_url(&word.text) {
            self.report(LintIssue::EmptyUrl, word.span);
        }
    }

    fn border(&mut self, words: &[Word]) {
        if let [word] = words {
            let lower = word.text.to_ascii_lowercase();
            if lower != "none" && knowledge::border_styles().contains(&lower.as_str()) {
                let issue = LintIssue::IncompleteBorder {
                    property: self.property.to_string(),
                    style: word.text.clone(),
                };
                self.report(issue, word.span);
            }
        }

        let edge = self.property.starts_with("border") || self.property.starts_with("outline");
        for word in words {
            match word.single_kind() {
                Some(TokenKind::Url) => self.url_argument(word),
                Some(TokenKind::ColorFunction) if parse_color(&word.text).is_none() => {
                    self.report(LintIssue::MalformedColorFunction(word.text.clone()), word.span);
                }
                _ => {
                    if edge && classify_measurement(&word.text) == Measurement::BareNumber {
                        self.missing_unit(word);
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measurement {
    /// Number followed by a known unit
    Valid,
    /// Unitless zero
    Zero,
    /// Unitless non-zero number
    BareNumber,
    Invalid,
}

/// Classify against `-?\d+(\.\d+)?(px|pt|em|ex|%)`
fn classify_measurement(text: &str) -> Measurement {
    let Some(end) = numeric_prefix(text) else {
        return Measurement::Invalid;
    };
    let unit = &text[end..];
    if unit.is_empty() {
        match text.parse::<f64>() {
            Ok(value) if value == 0.0 => Measurement::Zero,
            Ok(_) => Measurement::BareNumber,
            Err(_) => Measurement::Invalid,
        }
    } else if knowledge::units().contains(&unit) {
        Measurement::Valid
    } else {
        Measurement::Invalid
    }
}

/// Byte length of a leading `-?\d+(\.\d+)?`
fn numeric_prefix(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let integer = digits_from(end);
    if integer == 0 {
        return None;
    }
    end += integer;

    if bytes.get(end) == Some(&b'.') {
        let fraction = digits_from(end + 1);
        if fraction > 0 {
            end += 1 + fraction;
        }
    }
    Some(end)
}

/// A whole word that is a plain numeral
fn parse_numeral(text: &str) -> Option<f64> {
    if numeric_prefix(text)? != text.len() {
        return None;
    }
    text.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCheck {
    Valid,
    /// `rgb()`/`rgba()` that does not decode
    Malformed,
    Invalid,
}

fn classify_color(word: &Word) -> ColorCheck {
    match word.single_kind() {
        Some(TokenKind::HexColor) => return ColorCheck::Valid,
        Some(TokenKind::ColorFunction) => {
            return if parse_color(&word.text).is_some() {
                ColorCheck::Valid
            } else {
                ColorCheck::Malformed
            };
        }
        _ => {}
    }

    let lower = word.text.to_ascii_lowercase();
    if matches!(lower.as_str(), "palette" | "transparent" | "none") || is_named_color(&lower) {
        return ColorCheck::Valid;
    }

    match lower.split_once('(') {
        Some((name, _)) if lower.ends_with(')') => {
            let known = name == "palette"
                || knowledge::color_functions().contains(&name)
                || knowledge::gradient_functions().contains(&name);
            if known {
                ColorCheck::Valid
            } else {
                ColorCheck::Invalid
            }
        }
        _ => ColorCheck::Invalid,
    }
}

/// `url()`, `url("")`, `url('')` and whitespace-only variants
fn is_empty_url(text: &str) -> bool {
    let inner = text.get(4..).unwrap_or_default();
    let inner = inner.strip_suffix(')').unwrap_or(inner).trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|&q| inner.strip_prefix(q).and_then(|s| s.strip_suffix(q)))
        .unwrap_or(inner);
    unquoted.trim().is_empty()
}
