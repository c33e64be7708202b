use super::{Expr, Number};

/// An iterator over the [`Number`]s of an expression, visited depth-first from left to right.
///
/// This iterator is created by [`Expr::leaves`].
pub struct Leaves<'a> {
    stack: Vec<&'a Expr>,
}

impl<'a> Leaves<'a> {
    /// Creates a new iterator over the numbers of the given expression.
    pub fn new(expr: &'a Expr) -> Self {
        Self { stack: vec![expr] }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Number;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Expr::Number(number) => return Some(number),
                Expr::Compound(compound) => {
                    for operand in compound.operands().iter().rev() {
                        self.stack.push(&operand.expr);
                    }
                },
            }
        }
    }
}
