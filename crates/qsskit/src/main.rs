//! QssKit - Qt style sheet linter
//!
//! Usage: qsskit [lint|tokens|tree|color] [OPTIONS] <FILE>...

mod args;
mod error;

use std::env;
use std::fs;
use std::process::ExitCode;

use log::debug;
use serde::Serialize;

use qsskit_color::{contrast_text_color, format, named_color, Color, TextColor};
use qsskit_lint::{analyze, Analysis, LintConfig};
use qsskit_syntax::{parse_with, tokenize, Diagnostic, LineIndex, ParserConfig, Stylesheet};

use crate::args::{parse_args, Command, Options};
use crate::error::CliError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("qsskit");

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try '{} --help' for more information.", program);
            return ExitCode::from(2);
        }
    };

    match run(&options, program) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options, program: &str) -> Result<ExitCode, CliError> {
    match options.command {
        Command::Help => {
            print_usage(program);
            Ok(ExitCode::SUCCESS)
        }
        Command::Version => {
            println!("QssKit {}", VERSION);
            Ok(ExitCode::SUCCESS)
        }
        Command::Lint => run_lint(options),
        Command::Tokens => run_tokens(options),
        Command::Tree => run_tree(options),
        Command::Color => run_color(options),
    }
}

fn print_usage(program: &str) {
    println!(
        r#"QssKit {} - Qt style sheet linter

USAGE:
    {} [lint] [OPTIONS] <FILE>...
    {} tokens <FILE>
    {} tree <FILE>
    {} color <LITERAL>

OPTIONS:
    -h, --help                Print this help message
    -V, --version             Print version information
    --json                    Emit JSON instead of text
    --lenient                 Drop selectors without a block silently
    --min-severity <LEVEL>    Hide diagnostics below error, warning, weak or info

EXAMPLES:
    {} theme.qss
    {} --min-severity warning --json theme.qss
    {} color "rgba(255, 0, 0, 0.5)"
"#,
        VERSION, program, program, program, program, program, program, program
    );
}

fn read(path: &str) -> Result<String, CliError> {
    debug!("Reading {}", path);
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

fn parser_config(options: &Options) -> ParserConfig {
    if options.lenient {
        ParserConfig::lenient()
    } else {
        ParserConfig::default()
    }
}

/// Diagnostic with its resolved position, as emitted by `--json`
#[derive(Serialize)]
struct Located<'a> {
    path: &'a str,
    line: usize,
    column: usize,
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
}

fn run_lint(options: &Options) -> Result<ExitCode, CliError> {
    let config = LintConfig {
        parser: parser_config(options),
        min_severity: options.min_severity,
        ..LintConfig::default()
    };

    let mut failed = false;
    let mut located = Vec::new();

    for path in &options.inputs {
        let text = read(path)?;
        let analysis = analyze(&text, &config);
        failed |= analysis.has_errors();

        let index = LineIndex::new(&text);
        if options.json {
            located.extend(analysis.diagnostics.into_iter().map(|d| {
                let location = index.location(d.span.start);
                (path.as_str(), location.line, location.column, d)
            }));
        } else {
            print_diagnostics(path, &index, &analysis);
        }
    }

    if options.json {
        let entries: Vec<Located<'_>> = located
            .iter()
            .map(|(path, line, column, diagnostic)| Located {
                path: *path,
                line: *line,
                column: *column,
                diagnostic,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn print_diagnostics(path: &str, index: &LineIndex<'_>, analysis: &Analysis) {
    for diag in &analysis.diagnostics {
        let location = index.location(diag.span.start);
        println!(
            "{}:{}: {}[{}]: {}",
            path, location, diag.severity, diag.code, diag.message
        );
        if let Some(fix) = &diag.fix {
            println!("    fix: replace {} with '{}'", fix.span, fix.replacement);
        }
    }
}

fn run_tokens(options: &Options) -> Result<ExitCode, CliError> {
    for path in &options.inputs {
        let text = read(path)?;
        let tokens = tokenize(&text);
        if options.json {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
            continue;
        }
        for token in &tokens {
            println!("{:>6}..{:<6} {:?} {:?}", token.span.start, token.span.end, token.kind, token.text);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_tree(options: &Options) -> Result<ExitCode, CliError> {
    let config = parser_config(options);
    for path in &options.inputs {
        let text = read(path)?;
        let output = parse_with(&text, &config);
        print_outline(&LineIndex::new(&text), &output.stylesheet);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_outline(index: &LineIndex<'_>, stylesheet: &Stylesheet) {
    for rule in &stylesheet.rules {
        let unclosed = if rule.closed { "" } else { " (unclosed)" };
        println!(
            "{} {}{}",
            index.location(rule.span.start),
            rule.selectors.normalized(),
            unclosed
        );
        for decl in &rule.declarations {
            println!(
                "  {} {}: {}",
                index.location(decl.span.start),
                decl.property_name(),
                decl.value.text()
            );
        }
    }
}

#[derive(Serialize)]
struct ColorReport {
    color: Color,
    formatted: String,
    hex: String,
    text: TextColor,
}

fn run_color(options: &Options) -> Result<ExitCode, CliError> {
    let literal = options.inputs.join(" ");
    let color = match literal.parse::<Color>() {
        Ok(color) => color,
        Err(e) => named_color(&literal).ok_or(e)?,
    };

    let report = ColorReport {
        color,
        formatted: format(&color, color.notation),
        hex: color.to_hex(),
        text: contrast_text_color(&color),
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.formatted);
        println!("hex:  {}", report.hex);
        println!("text: {}", report.text.as_str());
    }
    Ok(ExitCode::SUCCESS)
}
