use clap::builder::styling::{AnsiColor, Effects, Style, Styles};

#[derive(clap::Parser, Debug, Clone, Default)]
#[clap(styles = CARGO_STYLING)]
pub struct Cli {
    /// Expression to evaluate; starts a REPL when absent
    pub expr: Option<String>,

    /// Do not print warnings or trace notes
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Read a single line from stdin
    #[arg(long, default_value_t = false, conflicts_with = "expr")]
    pub stdin: bool,

    /// Print every reduction step
    #[arg(short, long, default_value_t = false)]
    pub trace: bool,

    /// Maximum amount of lexical warnings to report
    #[arg(long, value_name = "max-warnings", default_value_t = 4)]
    pub max_warnings: usize,

    /// Use vi key bindings in the REPL
    #[arg(long, default_value_t = false)]
    pub vi: bool,
}

const HEADER: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
const USAGE: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
const LITERAL: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
const PLACEHOLDER: Style = AnsiColor::Cyan.on_default();
const ERROR: Style = AnsiColor::Red.on_default().effects(Effects::BOLD);
const VALID: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
const INVALID: Style = AnsiColor::Yellow.on_default().effects(Effects::BOLD);

/// Cargo's color style
/// [source](https://github.com/crate-ci/clap-cargo/blob/master/src/style.rs)
const CARGO_STYLING: Styles = Styles::styled()
    .header(HEADER)
    .usage(USAGE)
    .literal(LITERAL)
    .placeholder(PLACEHOLDER)
    .error(ERROR)
    .valid(VALID)
    .invalid(INVALID);

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["tally"]).unwrap();
        assert_eq!(cli.expr, None);
        assert!(!cli.stdin && !cli.quiet && !cli.trace && !cli.vi);
        assert_eq!(cli.max_warnings, 4);
    }

    #[test]
    fn expression_and_flags() {
        let cli = Cli::try_parse_from(["tally", "-t", "--max-warnings", "1", "(1+2)*3"]).unwrap();
        assert_eq!(cli.expr.as_deref(), Some("(1+2)*3"));
        assert!(cli.trace);
        assert_eq!(cli.max_warnings, 1);
    }

    #[test]
    fn stdin_excludes_expression() {
        assert!(Cli::try_parse_from(["tally", "--stdin", "1+1"]).is_err());
    }
}
