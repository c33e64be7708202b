use super::{Expr, OpClass};
use crate::primitive::is_zero;

/// The five primitive operations the solver tries on every pair of operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `left + right`.
    Add,

    /// `left - right`, or `right - left` if `right` is larger.
    Sub,

    /// `left × right`.
    Mul,

    /// `left ÷ right`.
    Div,

    /// `right ÷ left`.
    RevDiv,
}

impl Symbol {
    /// Every symbol, in the order the solver tries them.
    pub const ALL: [Symbol; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::RevDiv];

    /// Returns the operator class the symbol belongs to.
    pub fn class(self) -> OpClass {
        match self {
            Self::Add | Self::Sub => OpClass::Additive,
            Self::Mul | Self::Div | Self::RevDiv => OpClass::Multiplicative,
        }
    }

    /// Returns true if the right-hand operand is subtracted or divided by.
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::Sub | Self::Div | Self::RevDiv)
    }
}

/// Combines two expressions with the given symbol into a canonical expression.
///
/// Subtraction always subtracts the smaller side from the larger, and [`Symbol::RevDiv`] divides
/// `right` by `left`. Returns [`None`] if the result has no value, i.e. the operation divides by
/// zero, or either side already has no value.
pub fn combine(left: Expr, symbol: Symbol, right: Expr) -> Option<Expr> {
    let (left, right) = match symbol {
        Symbol::Sub if left.value()? < right.value()? => (right, left),
        Symbol::RevDiv => (right, left),
        _ => (left, right),
    };

    if symbol.class() == OpClass::Multiplicative && symbol.is_reverse() && is_zero(right.value()?) {
        return None;
    }

    let expr = left.join(symbol.class(), right, symbol.is_reverse());
    expr.value()?;
    Some(expr)
}
