//! Command-line arguments

use qsskit_lint::Severity;

use crate::error::CliError;

/// Subcommand to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Lint,
    Tokens,
    Tree,
    Color,
    Help,
    Version,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub command: Command,
    pub json: bool,
    pub lenient: bool,
    pub min_severity: Severity,
    /// Files, or the color literal for `color`
    pub inputs: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            command: Command::Lint,
            json: false,
            lenient: false,
            min_severity: Severity::Info,
            inputs: Vec::new(),
        }
    }
}

/// Parse arguments, program name excluded
pub fn parse_args(args: &[String]) -> Result<Options, CliError> {
    let mut options = Options::default();
    let mut rest = args.iter();

    let mut first = true;
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-h" | "--help" => options.command = Command::Help,
            "-V" | "--version" => options.command = Command::Version,
            "--json" => options.json = true,
            "--lenient" => options.lenient = true,
            "--min-severity" => {
                let value = rest
                    .next()
                    .ok_or_else(|| CliError::Usage("--min-severity needs a value".into()))?;
                options.min_severity = parse_severity(value)?;
            }
            "lint" if first => options.command = Command::Lint,
            "tokens" if first => options.command = Command::Tokens,
            "tree" if first => options.command = Command::Tree,
            "color" if first => options.command = Command::Color,
            flag if flag.starts_with("--") => return Err(CliError::Usage(format!("unknown option '{}'", flag))),
            input => options.inputs.push(input.to_string()),
        }
        first = false;
    }

    let needs_input = !matches!(options.command, Command::Help | Command::Version);
    if needs_input && options.inputs.is_empty() {
        return Err(CliError::Usage("no input given".into()));
    }
    if options.command == Command::Color && options.inputs.len() > 1 {
        // `rgb(1, 2, 3)` arrives split when unquoted
        options.inputs = vec![options.inputs.join(" ")];
    }

    Ok(options)
}

fn parse_severity(value: &str) -> Result<Severity, CliError> {
    match value {
        "error" => Ok(Severity::Error),
        "warning" => Ok(Severity::Warning),
        "weak" | "weak-warning" => Ok(Severity::WeakWarning),
        "info" => Ok(Severity::Info),
        other => Err(CliError::InvalidSeverity(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_command_is_lint() {
        let options = parse_args(&args(&["style.qss", "other.qss"])).unwrap();
        assert_eq!(options.command, Command::Lint);
        assert_eq!(options.inputs, vec!["style.qss", "other.qss"]);
    }

    #[test]
    fn test_flags() {
        let options = parse_args(&args(&["lint", "--json", "--lenient", "--min-severity", "warning", "a.qss"])).unwrap();
        assert!(options.json);
        assert!(options.lenient);
        assert_eq!(options.min_severity, Severity::Warning);
        assert_eq!(options.inputs, vec!["a.qss"]);
    }

    #[test]
    fn test_subcommands() {
        assert_eq!(parse_args(&args(&["tokens", "a.qss"])).unwrap().command, Command::Tokens);
        assert_eq!(parse_args(&args(&["tree", "a.qss"])).unwrap().command, Command::Tree);
        assert_eq!(parse_args(&args(&["-V"])).unwrap().command, Command::Version);
        assert_eq!(parse_args(&args(&["--help"])).unwrap().command, Command::Help);
    }

    #[test]
    fn test_color_literal_is_joined() {
        let options = parse_args(&args(&["color", "rgb(1,", "2,", "3)"])).unwrap();
        assert_eq!(options.command, Command::Color);
        assert_eq!(options.inputs, vec!["rgb(1, 2, 3)"]);
    }

    #[test]
    fn test_subcommand_name_later_is_a_file() {
        let options = parse_args(&args(&["lint", "tree"])).unwrap();
        assert_eq!(options.command, Command::Lint);
        assert_eq!(options.inputs, vec!["tree"]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_args(&args(&[])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(&args(&["--bogus", "a.qss"])), Err(CliError::Usage(_))));
        assert!(matches!(
            parse_args(&args(&["--min-severity", "loud", "a.qss"])),
            Err(CliError::InvalidSeverity(_))
        ));
        assert!(matches!(parse_args(&args(&["a.qss", "--min-severity"])), Err(CliError::Usage(_))));
    }
}
