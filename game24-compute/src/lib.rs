//! Exact expression algebra and exhaustive solver for the 24 game.
//!
//! The [`solve`] function searches every way of combining a hand of numbers with `+`, `-`, `×`
//! and `÷` for the expressions that evaluate to a target. Every expression it returns is in
//! canonical form (see [`expr`]), so two solutions that only differ by the order of commutative
//! operands or by the grouping of associative ones are reported once.

pub mod expr;
pub mod fmt;
pub mod primitive;
pub mod solve;

pub use expr::{combine, Compound, Expr, Number, OpClass, Operand, Symbol};
pub use solve::{solve, DEFAULT_TARGET};
