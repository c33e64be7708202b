//! Parser for 24 game solutions, such as `(10 × 10 - 4) ÷ 4`.
//!
//! The parser does not produce a syntax tree. It builds the same canonical
//! [`Expr`](game24_compute::Expr) that the solver produces, so a solution typed in by a user can be
//! compared directly against the solutions found by [`game24_compute::solve`].

pub mod parser;
pub mod tokenizer;

pub use parser::{parse, Parser};
