use std::fmt::Display;

use tallyspan::Spand;

use crate::arith::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Value(i64),
    LeftBracket,
    RightBracket,
    Operation(Operator),
}

pub type Token = Spand<TokenKind>;

/// Payload-free tag of a token. `Empty` stands for a slot with no token in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Value,
    LeftBracket,
    RightBracket,
    Operation,
    Empty,
}

impl TokenKind {
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Value(_) => Kind::Value,
            Self::LeftBracket => Kind::LeftBracket,
            Self::RightBracket => Kind::RightBracket,
            Self::Operation(_) => Kind::Operation,
        }
    }

    #[must_use]
    pub const fn symbol(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::LeftBracket),
            ')' => Some(Self::RightBracket),
            _ => match Operator::from_char(c) {
                Some(op) => Some(Self::Operation(op)),
                None => None,
            },
        }
    }
}

impl Kind {
    #[must_use]
    pub fn of(token: Option<&Token>) -> Self {
        token.map_or(Self::Empty, |tk| tk.kind.kind())
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(x) => write!(f, "{x}"),
            Self::LeftBracket => write!(f, "("),
            Self::RightBracket => write!(f, ")"),
            Self::Operation(op) => write!(f, "{op}"),
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::LeftBracket => write!(f, "'('"),
            Self::RightBracket => write!(f, "')'"),
            Self::Operation => write!(f, "operation"),
            Self::Empty => write!(f, "nothing"),
        }
    }
}

/// Renders tokens as `[2, +, 12]`.
pub struct Listing<'a>(pub &'a [Token]);

impl Display for Listing<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, tk) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{tk}")?;
        }
        write!(f, "]")
    }
}
