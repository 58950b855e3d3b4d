use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use codespan_reporting::files::Files;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tallyc::EvalError;
use tallyc::lexer::LexWarning;
use tallyc::resolve::Step;
use tallyc::token::Listing;

pub trait Report {
    fn diagnose(&self) -> Diagnostic<()>;

    fn report<'a, F>(&self, file: &'a F)
    where
        F: Files<'a, FileId = ()>,
    {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();

        let report = self.diagnose();
        let mut writer = writer.lock();
        let _ = term::emit(&mut writer, &config, file, &report);
    }
}

pub struct SimpleReport {
    severity: Severity,
    message:  String,
}

impl SimpleReport {
    #[must_use]
    pub const fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }

    #[must_use]
    pub const fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }
}

impl Report for SimpleReport {
    fn diagnose(&self) -> Diagnostic<()> {
        Diagnostic::new(self.severity).with_message(&self.message)
    }
}

impl Report for LexWarning {
    fn diagnose(&self) -> Diagnostic<()> {
        Diagnostic::warning()
            .with_message(self.kind())
            .with_label(Label::primary((), self.span))
    }
}

impl Report for EvalError {
    fn diagnose(&self) -> Diagnostic<()> {
        let (message, label) = match self {
            Self::Validation(err) => (
                "validation failed",
                Label::primary((), err.span).with_message(err.kind().to_string()),
            ),
            Self::Reduce(err) => (
                "reduction failed",
                Label::primary((), err.span).with_message(err.kind().to_string()),
            ),
        };
        Diagnostic::error().with_message(message).with_label(label)
    }
}

impl Report for Step {
    fn diagnose(&self) -> Diagnostic<()> {
        match self {
            Self::Split { open, close } => Diagnostic::note()
                .with_message("reducing brackets")
                .with_label(Label::primary((), *open))
                .with_label(Label::secondary((), *close).with_message("closed here")),
            Self::Splice { value, span } => Diagnostic::note()
                .with_message(format!("brackets reduced to {value}"))
                .with_label(Label::primary((), *span)),
            Self::Products { tokens } => {
                let note =
                    Diagnostic::note().with_message(format!("products: {}", Listing(tokens)));
                match (tokens.first(), tokens.last()) {
                    (Some(first), Some(last)) => {
                        note.with_label(Label::primary((), first.span.join(last.span)))
                    }
                    _ => note,
                }
            }
            Self::Sum { value, span } => Diagnostic::note()
                .with_message(format!("sum: {value}"))
                .with_label(Label::primary((), *span)),
        }
    }
}

#[cfg(test)]
mod test {
    use codespan_reporting::diagnostic::LabelStyle;
    use tallyc::eval;
    use tallyc::lexer::Lexer;
    use tallyc::resolve::Resolver;

    use super::*;

    #[test]
    fn warning_points_at_char() {
        let lexed = Lexer::new("1 + ?2").lex_all();
        let diagnostic = lexed.warnings[0].diagnose();
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.labels.len(), 1);
        assert_eq!(diagnostic.labels[0].range, 4..5);
    }

    #[test]
    fn validation_error() {
        let err = eval("1+)").unwrap_err();
        let diagnostic = err.diagnose();
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.message, "validation failed");
        assert_eq!(diagnostic.labels[0].range, 2..3);
        assert_eq!(diagnostic.labels[0].message, "unmatched closing bracket");
    }

    #[test]
    fn division_error() {
        let err = eval("6/(1-1)").unwrap_err();
        let diagnostic = err.diagnose();
        assert_eq!(diagnostic.message, "reduction failed");
        assert_eq!(diagnostic.labels[0].message, "division by zero");
        assert_eq!(diagnostic.labels[0].range, 2..7);
    }

    #[test]
    fn trace_notes() {
        let tokens = Lexer::new("(1+1)*3").lex_all().tokens;
        let mut resolver = Resolver::traced();
        assert_eq!(resolver.reduce(&tokens), Ok(6));

        let notes: Vec<_> = resolver.steps().iter().map(Report::diagnose).collect();
        assert!(notes.iter().all(|d| d.severity == Severity::Note));
        assert_eq!(notes[0].message, "products: [1, +, 1]");
        assert_eq!(notes[1].message, "sum: 2");
        assert_eq!(notes[2].labels[1].style, LabelStyle::Secondary);
        assert_eq!(notes[3].message, "brackets reduced to 2");
        assert_eq!(notes[4].message, "products: [6]");
        assert_eq!(notes[5].message, "sum: 6");
    }

    #[test]
    fn simple_report_severity() {
        let diagnostic = SimpleReport::warning("careful".to_string()).diagnose();
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert!(diagnostic.labels.is_empty());
    }
}
