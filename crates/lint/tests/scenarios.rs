//! End-to-end behaviour of tokenizer, parser and validator together

use qsskit_color::{contrast_text_color, format, parse_color, Color, Notation, TextColor};
use qsskit_lint::{analyze, LintConfig, Severity, Span};
use qsskit_syntax::{parse, tokenize, LineIndex, SelectorPart, TokenKind};

const CORPUS: &[&str] = &[
    "",
    "{",
    "}",
    ";;;",
    "::",
    ":!",
    "QLabel",
    "QLabel {",
    "QLabel { color",
    "QLabel { color:",
    "QLabel { color: red",
    "{ color: red; }",
    "} QLabel { }",
    "QLabel { { } }",
    "a { b: c } d { e: f",
    "QPushButton:!hover { color:red; background:blue }",
    "/* unterminated",
    "\"unterminated",
    "{{ unterminated",
    "url(",
    "rgb(1, 2",
    "qlineargradient(stop:0 red",
    "[attr=",
    "@#$%^&*",
    "QLabel { @ : ; } QFrame { : ; }",
    "QWidget { width: 1px ) ] } ",
    ".a .b #c > * { margin: 0 }\n.a .b #c > * { margin: 0 }",
    "#abcd { color: #abcd; }",
    "QLabel {\n  color: red\n  background: blue\n}\n.x { }",
    "é { ü: ß; }",
];

#[test]
fn test_tokens_partition_the_input() {
    for text in CORPUS {
        let tokens = tokenize(text);
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(&joined, text);

        let mut offset = 0;
        for token in &tokens {
            assert_eq!(token.span.start, offset, "{:?}", text);
            assert!(!token.span.is_empty(), "{:?}", text);
            offset = token.span.end;
        }
        assert_eq!(offset, text.len());
    }
}

#[test]
fn test_analysis_terminates_on_adversarial_input() {
    for text in CORPUS {
        let analysis = analyze(text, &LintConfig::default());
        for diag in &analysis.diagnostics {
            assert!(diag.span.end <= text.len(), "{:?}: {:?}", text, diag);
        }
        assert!(analysis
            .diagnostics
            .windows(2)
            .all(|pair| pair[0].span.start <= pair[1].span.start));
    }
}

#[test]
fn test_scenario_clean_rule() {
    let text = "QPushButton { background-color: #FF0000; }";
    let output = parse(text);
    assert!(output.diagnostics.is_empty());
    assert_eq!(output.stylesheet.rules.len(), 1);

    let rule = &output.stylesheet.rules[0];
    let selectors = rule.selectors.selectors();
    assert!(matches!(
        selectors[0].parts.as_slice(),
        [SelectorPart::Widget(name)] if name.text == "QPushButton"
    ));
    assert_eq!(rule.declarations.len(), 1);
    assert_eq!(rule.declarations[0].property_name(), "background-color");
    assert_eq!(rule.declarations[0].value.text(), "#FF0000");

    assert!(analyze(text, &LintConfig::default()).diagnostics.is_empty());
}

#[test]
fn test_scenario_unknown_property() {
    let analysis = analyze("QPushButton { colr: red; }", &LintConfig::default());
    let rule = &analysis.stylesheet.rules[0];
    assert_eq!(rule.declarations.len(), 1);
    assert_eq!(rule.declarations[0].property_name(), "colr");

    assert_eq!(analysis.diagnostics.len(), 1);
    let diag = &analysis.diagnostics[0];
    assert_eq!(diag.severity, Severity::Warning);
    assert!(diag.message.to_lowercase().contains("unknown property 'colr'"));
}

#[test]
fn test_scenario_valid_sub_control() {
    let analysis = analyze("QScrollBar::handle:vertical { }", &LintConfig::default());
    assert!(analysis.diagnostics.is_empty());

    let selectors = analysis.stylesheet.rules[0].selectors.selectors();
    let parts = &selectors[0].parts;
    assert!(matches!(&parts[0], SelectorPart::Widget(name) if name.text == "QScrollBar"));
    assert!(matches!(&parts[1], SelectorPart::SubControl(name) if name.text == "handle"));
    assert!(matches!(
        &parts[2],
        SelectorPart::PseudoState { name, negated: false } if name.text == "vertical"
    ));
}

#[test]
fn test_scenario_invalid_sub_control() {
    let analysis = analyze("QLabel::bogus { }", &LintConfig::default());
    assert_eq!(analysis.diagnostics.len(), 1);
    let diag = &analysis.diagnostics[0];
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.message, "'::bogus' is not a valid sub-control for QLabel");
}

#[test]
fn test_scenario_missing_unit() {
    let analysis = analyze(".foo { border-radius: 5; }", &LintConfig::default());
    assert_eq!(analysis.diagnostics.len(), 1);
    let diag = &analysis.diagnostics[0];
    assert_eq!(diag.severity, Severity::Error);
    assert!(diag.message.starts_with("Invalid measurement"));
    assert!(diag.message.ends_with("did you mean '5px'?"));
    let fix = diag.fix.as_ref().map(|f| (f.span, f.replacement.as_str()));
    assert_eq!(fix, Some((Span::new(22, 23), "5px")));
}

#[test]
fn test_scenario_missing_close_brace() {
    let text = "A { color: red } B { color: blue";
    let analysis = analyze(text, &LintConfig::default());
    let rules = &analysis.stylesheet.rules;
    assert_eq!(rules.len(), 2);
    assert!(rules[0].closed);
    assert_eq!(rules[0].declarations.len(), 1);
    assert_eq!(rules[1].selectors.normalized(), "B");
    assert_eq!(rules[1].declarations.len(), 1);
    assert!(!rules[1].closed);

    assert_eq!(analysis.diagnostics.len(), 1);
    assert_eq!(analysis.diagnostics[0].code, "unclosed-block");
    assert_eq!(analysis.diagnostics[0].span, Span::at(text.len()));
}

#[test]
fn test_scenario_missing_close_brace_before_next_rule() {
    let text = "QLabel { color: red;\nQFrame { color: blue; }";
    let analysis = analyze(text, &LintConfig::default());
    let rules = &analysis.stylesheet.rules;
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].declarations.len(), 1);
    assert_eq!(rules[1].selectors.normalized(), "QFrame");
    assert_eq!(rules[1].declarations.len(), 1);

    assert_eq!(analysis.diagnostics.len(), 1);
    let diag = &analysis.diagnostics[0];
    assert_eq!(diag.message, "Missing '}'");
    let location = LineIndex::new(text).location(diag.span.start);
    assert_eq!((location.line, location.column), (2, 1));
}

#[test]
fn test_compact_declarations_are_validated() {
    let analysis = analyze("QLabel{color:reed;width:5}", &LintConfig::default());
    let codes: Vec<&str> = analysis.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec!["invalid-color", "missing-unit"]);
}

#[test]
fn test_unclosed_url_is_reported() {
    let text = "QLabel { image: url(a.png; } QFrame { color: red; }";
    let analysis = analyze(text, &LintConfig::default());
    let found: Vec<(&str, Span)> = analysis.diagnostics.iter().map(|d| (d.code, d.span)).collect();
    assert_eq!(
        found,
        vec![("unclosed-url", Span::new(16, text.len())), ("unclosed-block", Span::at(text.len()))]
    );
    assert_eq!(analysis.diagnostics[0].severity, Severity::Error);

    let analysis = analyze("QFrame { border-image: url(a.png; }", &LintConfig::default());
    let codes: Vec<&str> = analysis.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec!["unclosed-url", "unclosed-block"]);

    let analysis = analyze("QLabel{image:url(a.png;color:red}", &LintConfig::default());
    let codes: Vec<&str> = analysis.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec!["unclosed-url"]);
}

#[test]
fn test_pseudo_state_in_value_is_one_finding() {
    let analysis = analyze("QLabel { color: red:hover; }", &LintConfig::default());
    let codes: Vec<&str> = analysis.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec!["invalid-color"]);
}

#[test]
fn test_minified_stylesheet() {
    let text = format!("QLabel{{{}}}", "color:red;width:5px;".repeat(4000));
    let analysis = analyze(&text, &LintConfig::default());
    assert!(analysis.diagnostics.is_empty());
    assert_eq!(analysis.stylesheet.rules[0].declarations.len(), 8000);
}

#[test]
fn test_template_tags_are_opaque() {
    let text = "QPushButton { color: {{ACCENT}}; border: 1 solid {{BORDER}}; }";
    let analysis = analyze(text, &LintConfig::default());
    assert!(analysis.diagnostics.is_empty());
    assert!(analysis.tokens.iter().any(|t| t.kind == TokenKind::TemplateTag));
}

#[test]
fn test_lenient_parsing_drops_unbraced_selector() {
    let text = "QLabel color; QFrame { }";
    let strict = analyze(text, &LintConfig::default());
    assert_eq!(strict.diagnostics.len(), 1);
    assert_eq!(strict.diagnostics[0].code, "expected-open-brace");

    let config = LintConfig {
        parser: qsskit_syntax::ParserConfig::lenient(),
        ..LintConfig::default()
    };
    let lenient = analyze(text, &config);
    assert!(lenient.diagnostics.is_empty());
    assert_eq!(lenient.stylesheet.rules.len(), 1);
}

#[test]
fn test_color_values_round_trip_through_formatting() {
    let analysis = analyze(
        "QWidget { color: #ABC; background-color: rgba(10, 20, 30, 0.5); }",
        &LintConfig::default(),
    );
    assert!(analysis.diagnostics.is_empty());

    for decl in &analysis.stylesheet.rules[0].declarations {
        let literal = decl.value.text();
        let color = parse_color(&literal).expect(&literal);
        let formatted = format(&color, color.notation);
        assert_eq!(parse_color(&formatted), Some(color), "{}", literal);
    }

    let translucent = parse_color("rgba(10, 20, 30, 0.5)").expect("rgba");
    assert_eq!(format(&translucent, Notation::Hex6), "rgba(10, 20, 30, 0.50)");
    assert_eq!(contrast_text_color(&Color::rgb(250, 250, 250)), TextColor::Dark);
}
