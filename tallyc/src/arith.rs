use std::fmt::Display;

use crate::fold::ReduceErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

/// Precedence tier; `Multiplicative` binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Additive,
    Multiplicative,
}

impl Operator {
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    #[must_use]
    pub const fn tier(self) -> Tier {
        match self {
            Self::Add | Self::Sub => Tier::Additive,
            Self::Mul | Self::Div => Tier::Multiplicative,
        }
    }

    /// Integer arithmetic wraps on overflow and division truncates toward zero.
    pub const fn apply(self, lhs: i64, rhs: i64) -> Result<i64, ReduceErrorKind> {
        match self {
            Self::Add => Ok(lhs.wrapping_add(rhs)),
            Self::Sub => Ok(lhs.wrapping_sub(rhs)),
            Self::Mul => Ok(lhs.wrapping_mul(rhs)),
            Self::Div if rhs == 0 => Err(ReduceErrorKind::DivisionByZero),
            // i64::MIN / -1 wraps back to i64::MIN
            Self::Div => Ok(lhs.wrapping_div(rhs)),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
