//! A canonical representation of arithmetic expressions over exact rational numbers.
//!
//! An expression is either an atomic [`Number`], or a [`Compound`] expression that applies one
//! **operator class** to two or more operands. There are only two operator classes:
//!
//! - [`OpClass::Additive`] covers both `+` and `-`.
//! - [`OpClass::Multiplicative`] covers both `×` and `÷`.
//!
//! Subtraction and division are represented by a **reverse flag** on the operand
//! ([`Operand::reverse`]): `a - b` is the additive expression `a + (reversed b)`, and `a ÷ b` is
//! the multiplicative expression `a × (reversed b)`. With the flag in place, every compound
//! expression is an n-ary sum or product, which lets nested expressions of the same class be
//! **flattened** into their parent. `a + (b - c)` and `(a + b) - c` are both stored as a single
//! additive node with the operands `a`, `b`, and reversed `c`.
//!
//! # Canonical form
//!
//! The operands of a [`Compound`] are always kept sorted by the total order defined on [`Expr`]:
//!
//! - Every [`Number`] sorts before every [`Compound`]. Numbers are ordered by value.
//! - Compounds are ordered by operator class (multiplicative first), then by the number of
//! operands, then by their sorted operands.
//! - Operands that are not reversed sort before operands that are, so the first operand of a
//! compound is never reversed.
//!
//! Two additional rules remove the last ambiguities: `x ÷ 1` is stored as `x × 1`, and `x - 0` as
//! `x + 0`, since reversing an identity element does not change the value.
//!
//! Together, these rules guarantee that two expressions that only differ by the order of
//! commutative operands or by the grouping of associative ones have the **same** representation.
//! The [`PartialEq`], [`Eq`], and [`Hash`] implementations of [`Expr`] compare this
//! representation, so `3 + 5` is equal to `5 + 3`, but `(3 + 5) × 2` is not equal to
//! `3 × 2 + 5 × 2`.

mod combine;
mod iter;

use crate::{fmt::FormatOptions, primitive::{is_one, is_zero, rational}};
use iter::Leaves;
use rug::Rational;
use std::{cmp::Ordering, hash::{Hash, Hasher}};

pub use combine::{combine, Symbol};

/// An atomic operand, wrapping one exact value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Number {
    value: Rational,
}

impl Number {
    /// Creates a new number with the given value.
    pub fn new(value: impl Into<Rational>) -> Self {
        Self { value: value.into() }
    }

    /// Returns the value of the number.
    pub fn value(&self) -> &Rational {
        &self.value
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The operator class of a [`Compound`] expression.
///
/// The declaration order is significant: it is the order used to sort compound expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpClass {
    /// Multiplication (`×`), and division (`÷`) through reversed operands.
    Multiplicative,

    /// Addition (`+`), and subtraction (`-`) through reversed operands.
    Additive,
}

impl OpClass {
    /// Returns true if the value is the identity element of this operator class, i.e. `0` for
    /// addition and `1` for multiplication.
    pub fn is_identity(self, value: &Rational) -> bool {
        match self {
            Self::Additive => is_zero(value),
            Self::Multiplicative => is_one(value),
        }
    }
}

/// An operand of a [`Compound`] expression, with its direction.
///
/// The field order is significant: the derived [`Ord`] places operands that are not reversed
/// before operands that are, and breaks ties by comparing the expressions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Operand {
    /// If true, the operand is subtracted (additive class) or divided by (multiplicative class)
    /// instead of added or multiplied.
    pub reverse: bool,

    /// The operand itself.
    pub expr: Expr,
}

/// An n-ary sum or product.
///
/// The operands are always sorted, and the value of the expression is recomputed every time an
/// operand is added. See the [module-level documentation](self) for the invariants.
#[derive(Debug, Clone)]
pub struct Compound {
    class: OpClass,
    operands: Vec<Operand>,
    value: Option<Rational>,
}

impl Compound {
    /// Creates the compound expression `lhs + rhs` or `lhs × rhs`, or `lhs - rhs` or `lhs ÷ rhs`
    /// if `reverse` is true.
    ///
    /// Operands that are compound expressions of the same class are spliced in, so the result
    /// always has at least two operands.
    pub fn new(class: OpClass, lhs: Expr, rhs: Expr, reverse: bool) -> Self {
        let mut compound = Self {
            class,
            operands: Vec::new(),
            value: None,
        };
        compound.push(lhs, false);
        compound.push(rhs, reverse);
        compound
    }

    /// Returns the operator class of the expression.
    pub fn class(&self) -> OpClass {
        self.class
    }

    /// Returns the operands of the expression, in canonical order.
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Returns the value of the expression, or [`None`] if the expression divides by zero.
    pub fn value(&self) -> Option<&Rational> {
        self.value.as_ref()
    }

    /// Adds an operand to the expression, subtracting or dividing by it if `reverse` is true.
    ///
    /// If `expr` is a compound expression of the same class, its operands are spliced in instead,
    /// with their reverse flags inverted if `reverse` is true. An operand equal to the identity
    /// element of the class is never stored reversed.
    pub fn push(&mut self, expr: Expr, reverse: bool) {
        match expr {
            Expr::Compound(inner) if inner.class == self.class => {
                for operand in inner.operands {
                    self.push_operand(operand.expr, operand.reverse != reverse);
                }
            },
            expr => self.push_operand(expr, reverse),
        }

        self.operands.sort();
        self.value = self.evaluate();
    }

    /// Adds a single operand without flattening.
    fn push_operand(&mut self, expr: Expr, reverse: bool) {
        let class = self.class;
        let reverse = reverse && !expr.value().is_some_and(|value| class.is_identity(value));
        self.operands.push(Operand { reverse, expr });
    }

    /// Folds the sorted operands into the value of the expression.
    fn evaluate(&self) -> Option<Rational> {
        let mut operands = self.operands.iter();
        let first = operands.next()?;
        debug_assert!(!first.reverse, "first operand of a compound expression must not be reversed");

        let mut value = first.expr.value()?.clone();
        for operand in operands {
            let rhs = operand.expr.value()?;
            match (self.class, operand.reverse) {
                (OpClass::Additive, false) => value += rhs,
                (OpClass::Additive, true) => value -= rhs,
                (OpClass::Multiplicative, false) => value *= rhs,
                (OpClass::Multiplicative, true) => {
                    if is_zero(rhs) {
                        return None;
                    }
                    value /= rhs;
                },
            }
        }

        Some(value)
    }

    /// Returns the innermost compound expression reached by repeatedly descending into the first
    /// compound operand. Its operands are all numbers.
    fn first_step(&self) -> &Compound {
        self.operands
            .iter()
            .find_map(|operand| operand.expr.as_compound())
            .map_or(self, Compound::first_step)
    }
}

impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.operands == other.operands
    }
}

impl Eq for Compound {}

/// The cached value is derived from the operands, so it takes no part in hashing or ordering.
impl Hash for Compound {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class.hash(state);
        self.operands.hash(state);
    }
}

impl PartialOrd for Compound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Compound {
    fn cmp(&self, other: &Self) -> Ordering {
        self.class.cmp(&other.class)
            .then_with(|| self.operands.len().cmp(&other.operands.len()))
            .then_with(|| self.operands.cmp(&other.operands))
    }
}

/// An arithmetic expression in canonical form.
///
/// The variant order is significant: the derived [`Ord`] sorts every [`Expr::Number`] before
/// every [`Expr::Compound`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expr {
    /// A single number.
    Number(Number),

    /// A sum or product of two or more operands.
    Compound(Compound),
}

impl Expr {
    /// Creates an atomic expression with the given value.
    pub fn number(value: impl Into<Rational>) -> Self {
        Self::Number(Number::new(value))
    }

    /// Returns the value of the expression, or [`None`] if the expression divides by zero.
    pub fn value(&self) -> Option<&Rational> {
        match self {
            Self::Number(number) => Some(number.value()),
            Self::Compound(compound) => compound.value(),
        }
    }

    /// Returns true if the expression is a single [`Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// If the expression is a [`Compound`], returns a reference to it.
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(compound) => Some(compound),
            Self::Number(_) => None,
        }
    }

    /// Applies the operator class to this expression and `rhs`, subtracting or dividing by `rhs`
    /// if `reverse` is true.
    ///
    /// The operator is taken literally; unlike [`combine`], the operands are never swapped. If
    /// this expression is already a compound expression of the same class, `rhs` is added to it
    /// directly.
    pub fn join(self, class: OpClass, rhs: Expr, reverse: bool) -> Self {
        match self {
            Self::Compound(mut compound) if compound.class == class => {
                compound.push(rhs, reverse);
                Self::Compound(compound)
            },
            lhs => Self::Compound(Compound::new(class, lhs, rhs, reverse)),
        }
    }

    /// Returns an iterator over the numbers this expression is made of, from left to right in
    /// canonical order.
    pub fn leaves(&self) -> Leaves {
        Leaves::new(self)
    }

    /// Returns the values of the numbers this expression is made of, from left to right in
    /// canonical order.
    pub fn leaf_values(&self) -> Vec<Rational> {
        self.leaves().map(|number| number.value().clone()).collect()
    }

    /// Returns true if the expression is made of exactly the given values, in any order.
    pub fn uses_exactly(&self, values: &[u64]) -> bool {
        let mut leaves = self.leaf_values();
        let mut values = values.iter().map(|&value| rational(value)).collect::<Vec<_>>();
        leaves.sort();
        values.sort();
        leaves == values
    }

    /// Returns a single reduction step of the expression, such as `8 ÷ 3`, to be used as a hint.
    ///
    /// The step is found by descending into the first compound operand until reaching an
    /// expression made only of numbers, then rendering its first two operands.
    pub fn hint_string(&self) -> String {
        self.hint_string_with(FormatOptions::default())
    }

    /// Same as [`Expr::hint_string`], with the given formatting options.
    pub fn hint_string_with(&self, options: FormatOptions) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Compound(compound) => {
                let step = compound.first_step();
                let (lhs, rhs) = (&step.operands[0], &step.operands[1]);
                format!(
                    "{} {} {}",
                    lhs.expr.fmt_with(options),
                    options.glyphs.symbol(step.class, rhs.reverse),
                    rhs.expr.fmt_with(options),
                )
            },
        }
    }
}

impl From<Number> for Expr {
    fn from(number: Number) -> Self {
        Self::Number(number)
    }
}
