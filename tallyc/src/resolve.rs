use tallyspan::Span;

use crate::fold::{ReduceError, ReduceErrorKind, ReduceResult, reduce_products, reduce_sum};
use crate::token::{Kind, Token, TokenKind};

/// One recorded action of a traced [`Resolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A bracket pair was closed; its interior has just been folded.
    Split { open: Span, close: Span },
    /// The pair's interior reduced to `value`, which replaced the pair.
    Splice { value: i64, span: Span },
    /// Result of the product pass over a flat sequence.
    Products { tokens: Vec<Token> },
    /// Result of the sum pass over a flat sequence.
    Sum { value: i64, span: Span },
}

/// Reduces bracketed sequences innermost-first down to a single value.
///
/// Open brackets are kept on an explicit stack, so nesting depth costs heap
/// and never native stack.
#[derive(Debug, Default)]
pub struct Resolver {
    steps: Option<Vec<Step>>,
}

/// Flat tokens collected since an unclosed `(`.
struct Frame {
    open:   Span,
    tokens: Vec<Token>,
}

fn cover(tokens: &[Token]) -> Span {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => first.span.join(last.span),
        _ => Span::default(),
    }
}

fn top<'a>(root: &'a mut Vec<Token>, frames: &'a mut [Frame]) -> &'a mut Vec<Token> {
    match frames.last_mut() {
        Some(frame) => &mut frame.tokens,
        None => root,
    }
}

impl Resolver {
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: None }
    }

    /// A resolver that records every [`Step`] it takes.
    #[must_use]
    pub const fn traced() -> Self {
        Self {
            steps: Some(Vec::new()),
        }
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        self.steps.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn into_steps(self) -> Vec<Step> {
        self.steps.unwrap_or_default()
    }

    fn record(&mut self, step: impl FnOnce() -> Step) {
        if let Some(steps) = &mut self.steps {
            steps.push(step());
        }
    }

    pub fn reduce(&mut self, tokens: &[Token]) -> ReduceResult<i64> {
        let mut root = Vec::new();
        let mut frames: Vec<Frame> = Vec::new();

        for tk in tokens {
            match tk.kind {
                TokenKind::LeftBracket => frames.push(Frame {
                    open:   tk.span,
                    tokens: Vec::new(),
                }),
                TokenKind::RightBracket => match frames.pop() {
                    Some(frame) => {
                        let value = self.fold(&frame.tokens)?;
                        let span = frame.open.join(tk.span);
                        self.record(|| Step::Split {
                            open:  frame.open,
                            close: tk.span,
                        });
                        self.record(|| Step::Splice { value, span });
                        let value = Token::new(TokenKind::Value(value), span);
                        top(&mut root, &mut frames).push(value);
                    }
                    // stray `)`, left for the fold to reject
                    None => root.push(*tk),
                },
                _ => top(&mut root, &mut frames).push(*tk),
            }
        }

        if !frames.is_empty() {
            let span = tokens.last().map(|tk| tk.span.end()).unwrap_or_default();
            return Err(ReduceError::new(
                ReduceErrorKind::TypeMismatch {
                    expected: Kind::RightBracket,
                    found:    Kind::Empty,
                },
                span,
            ));
        }

        self.fold(&root)
    }

    fn fold(&mut self, tokens: &[Token]) -> ReduceResult<i64> {
        let partial = reduce_products(tokens)?;
        self.record(|| Step::Products {
            tokens: partial.clone(),
        });

        let value = reduce_sum(&partial)?;
        self.record(|| Step::Sum {
            value,
            span: cover(tokens),
        });
        Ok(value)
    }
}

/// Reduces `tokens` without tracing.
pub fn reduce(tokens: &[Token]) -> ReduceResult<i64> {
    Resolver::new().reduce(tokens)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::Lexer;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::new(input).lex_all().tokens
    }

    fn eval(input: &str) -> ReduceResult<i64> {
        reduce(&lex(input))
    }

    #[test]
    fn flat() {
        assert_eq!(eval("2+3*4"), Ok(14));
        assert_eq!(eval("7"), Ok(7));
    }

    #[test]
    fn brackets() {
        assert_eq!(eval("(2+3)*4"), Ok(20));
        assert_eq!(eval("((1+2))"), Ok(3));
        assert_eq!(eval("2*(3+4)*5"), Ok(70));
        assert_eq!(eval("(1+2)*(3+4)"), Ok(21));
        assert_eq!(eval("10-(2-(3-(4-5)))"), Ok(6));
        assert_eq!(eval("100/((2+3)*(1+1))"), Ok(10));
    }

    #[test]
    fn many_groups() {
        let input = vec!["(1)"; 5000].join("+");
        assert_eq!(eval(&input), Ok(5000));
    }

    #[test]
    fn deep_nesting() {
        let depth = 100_000;
        let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(eval(&input), Ok(1));

        let input = format!("{}2*3{}-1", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(crate::eval(&input), Ok(5));
    }

    #[test]
    fn inner_groups_fold_first() {
        let mut resolver = Resolver::traced();
        assert_eq!(resolver.reduce(&lex("((1)+(2))")), Ok(3));

        let splices: Vec<_> = resolver
            .steps()
            .iter()
            .filter_map(|step| match step {
                Step::Splice { value, .. } => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(splices, vec![1, 2, 3]);
    }

    #[test]
    fn division_by_zero_inside_brackets() {
        let err = eval("1+(2/(3-3))").unwrap_err();
        assert_eq!(err.kind, ReduceErrorKind::DivisionByZero);
        assert_eq!(err.span, Span::new(5, 10));
    }

    #[test]
    fn unclosed_without_validation() {
        let err = eval("(1+2").unwrap_err();
        assert_eq!(
            err.kind,
            ReduceErrorKind::TypeMismatch {
                expected: Kind::RightBracket,
                found:    Kind::Empty,
            }
        );
        assert_eq!(err.span, Span::point(4));
    }

    #[test]
    fn stray_close_without_validation() {
        let err = eval("1)").unwrap_err();
        assert_eq!(
            err.kind,
            ReduceErrorKind::TypeMismatch {
                expected: Kind::Operation,
                found:    Kind::RightBracket,
            }
        );
    }

    #[test]
    fn untraced_records_nothing() {
        let mut resolver = Resolver::new();
        assert_eq!(resolver.reduce(&lex("(1+1)*2")), Ok(4));
        assert!(resolver.steps().is_empty());
    }

    #[test]
    fn trace() {
        let tokens = lex("(2+3)*4");
        let mut resolver = Resolver::traced();
        assert_eq!(resolver.reduce(&tokens), Ok(20));

        let steps = resolver.into_steps();
        assert_eq!(steps.len(), 6);
        assert_eq!(
            steps[0],
            Step::Products {
                tokens: tokens[1..4].to_vec(),
            }
        );
        assert_eq!(
            steps[1],
            Step::Sum {
                value: 5,
                span:  Span::new(1, 4),
            }
        );
        assert_eq!(
            steps[2],
            Step::Split {
                open:  Span::new(0, 1),
                close: Span::new(4, 5),
            }
        );
        assert_eq!(
            steps[3],
            Step::Splice {
                value: 5,
                span:  Span::new(0, 5),
            }
        );
        assert!(
            matches!(&steps[4], Step::Products { tokens } if tokens.len() == 1
                && tokens[0].kind == TokenKind::Value(20)
                && tokens[0].span == Span::new(0, 7))
        );
        assert_eq!(
            steps[5],
            Step::Sum {
                value: 20,
                span:  Span::new(0, 7),
            }
        );
    }

    #[test]
    fn input_is_untouched() {
        let tokens = lex("(1+2)*3");
        let copy = tokens.clone();
        assert_eq!(reduce(&tokens), Ok(9));
        assert_eq!(tokens, copy);
    }
}
