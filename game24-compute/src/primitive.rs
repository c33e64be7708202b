//! Functions to construct and inspect [`Integer`]s and [`Rational`]s.

use rug::{integer::ParseIntegerError, Integer, Rational};
use std::cmp::Ordering;

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates an [`Integer`] from a string slice of decimal digits, such as the lexeme of an integer
/// literal.
pub fn int_from_str(s: &str) -> Result<Integer, ParseIntegerError> {
    Integer::from_str_radix(s, 10)
}

/// Returns true if the value is zero.
pub fn is_zero(value: &Rational) -> bool {
    value.cmp0() == Ordering::Equal
}

/// Returns true if the value is one.
pub fn is_one(value: &Rational) -> bool {
    *value == 1
}
