use std::io::BufRead;
use std::process::ExitCode;

use codespan_reporting::files::SimpleFile;
use tallyc::lexer::{LexWarning, Lexed, Lexer};
use tallyc::resolve::Resolver;
use tallyc::token::Token;
use tallyc::validate::validate;
use tallyc::{EvalError, EvalResult};

use crate::cli::Cli;
use crate::editor::{Editor, EditorRead};
use crate::report::{Report, SimpleReport};

type Line<'a> = SimpleFile<&'a str, &'a str>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Expr(String),
    Stdin,
    Repl,
}

pub struct Driver {
    source:       Source,
    max_warnings: usize,
    quiet:        bool,
    trace:        bool,
    vi:           bool,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(<Cli as clap::Parser>::parse())
    }

    /// Reads up to the first newline; the rest of `reader` is left unread.
    fn read_line(mut reader: impl BufRead) -> std::io::Result<String> {
        let mut input = String::new();
        reader.read_line(&mut input)?;
        let len = input.trim_end_matches(['\n', '\r']).len();
        input.truncate(len);
        Ok(input)
    }

    #[must_use]
    fn from_config(cfg: Cli) -> Self {
        let source = match cfg.expr {
            Some(expr) => Source::Expr(expr),
            None if cfg.stdin => Source::Stdin,
            None => Source::Repl,
        };
        Self {
            source,
            max_warnings: cfg.max_warnings,
            quiet: cfg.quiet,
            trace: cfg.trace,
            vi: cfg.vi,
        }
    }

    pub fn run(self) -> ExitCode {
        match &self.source {
            Source::Expr(input) => self.run_once("<expr>", input),
            Source::Stdin => match Self::read_line(std::io::stdin().lock()) {
                Ok(input) => self.run_once("<stdin>", &input),
                Err(err) => {
                    let file = SimpleFile::new("<stdin>", "");
                    SimpleReport::error(format!("could not read stdin: {err}")).report(&file);
                    ExitCode::FAILURE
                }
            },
            Source::Repl => match self.repl() {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    let file = SimpleFile::new("<repl>", "");
                    SimpleReport::error(format!("could not read input: {err}")).report(&file);
                    ExitCode::FAILURE
                }
            },
        }
    }

    fn run_once(&self, name: &str, input: &str) -> ExitCode {
        if self.eval_line(name, input).is_some() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    fn report_warnings(&self, warnings: &[LexWarning], file: &Line<'_>) {
        if self.quiet || warnings.is_empty() {
            return;
        }

        let displayed = warnings.len().min(self.max_warnings);
        for warning in &warnings[..displayed] {
            warning.report(file);
        }

        if displayed < warnings.len() {
            let message = format!(
                "ignored {} unrecognized {} ({} emitted)",
                warnings.len(),
                if warnings.len() > 1 {
                    "characters"
                } else {
                    "character"
                },
                displayed
            );
            SimpleReport::warning(message).report(file);
        }
    }

    fn reduce(&self, tokens: &[Token], file: &Line<'_>) -> EvalResult<i64> {
        validate(tokens)?;

        let mut resolver = if self.trace {
            Resolver::traced()
        } else {
            Resolver::new()
        };
        let result = resolver.reduce(tokens);

        if !self.quiet {
            for step in resolver.steps() {
                step.report(file);
            }
        }

        result.map_err(EvalError::from)
    }

    /// Evaluates one line, printing its result or its diagnostics.
    fn eval_line(&self, name: &str, input: &str) -> Option<i64> {
        let file = SimpleFile::new(name, input);

        let Lexed { tokens, warnings } = Lexer::new(input).lex_all();
        self.report_warnings(&warnings, &file);

        match self.reduce(&tokens, &file) {
            Ok(value) => {
                println!("{value}");
                Some(value)
            }
            Err(err) => {
                err.report(&file);
                None
            }
        }
    }

    fn repl(&self) -> std::io::Result<()> {
        let mut editor = Editor::new(self.vi);
        loop {
            let signal = editor.read()?;
            let input = match signal {
                EditorRead::Read(input) => input,
                EditorRead::Break => break,
                EditorRead::Continue => continue,
            };

            self.eval_line("<repl>", &input);
        }

        Ok(())
    }
}
