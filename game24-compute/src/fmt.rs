//! Formatting options for expressions.

use crate::expr::{Expr, OpClass};
use std::fmt::{Display, Formatter};

/// Formatting options for expressions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FormatOptions {
    /// Which symbols to use for the operators.
    pub glyphs: Glyphs,
}

/// The set of symbols used to print multiplication and division.
///
/// Addition and subtraction are always printed as `+` and `-`. Both sets of symbols are accepted
/// by the parser.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Glyphs {
    /// Prints multiplication as `×` and division as `÷`.
    ///
    /// This is the default option.
    #[default]
    Unicode,

    /// Prints multiplication as `*` and division as `/`, which is easier to type back in.
    Ascii,
}

impl Glyphs {
    /// Returns the operator symbol that introduces an operand of the given class and direction.
    pub fn symbol(self, class: OpClass, reverse: bool) -> &'static str {
        match (self, class, reverse) {
            (_, OpClass::Additive, false) => "+",
            (_, OpClass::Additive, true) => "-",
            (Self::Unicode, OpClass::Multiplicative, false) => "×",
            (Self::Unicode, OpClass::Multiplicative, true) => "÷",
            (Self::Ascii, OpClass::Multiplicative, false) => "*",
            (Self::Ascii, OpClass::Multiplicative, true) => "/",
        }
    }
}

/// Helper struct to build a [`FormatOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FormatOptionsBuilder(FormatOptions);

impl FormatOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operator glyphs. See [`Glyphs`] for more information.
    pub fn glyphs(mut self, glyphs: Glyphs) -> Self {
        self.0.glyphs = glyphs;
        self
    }

    /// Builds the [`FormatOptions`] struct.
    pub fn build(self) -> FormatOptions {
        self.0
    }
}

/// Formatter for an [`Expr`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprFormatter<'a> {
    /// The expression to format.
    pub expr: &'a Expr,

    /// The options to use when formatting.
    pub options: FormatOptions,
}

impl Display for ExprFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let compound = match self.expr {
            Expr::Number(number) => return write!(f, "{}", number),
            Expr::Compound(compound) => compound,
        };

        for (i, operand) in compound.operands().iter().enumerate() {
            if i != 0 {
                write!(f, " {} ", self.options.glyphs.symbol(compound.class(), operand.reverse))?;
            }

            let inner = operand.expr.fmt_with(self.options);

            // a sum inside a product is the only nesting that can occur and needs parentheses;
            // a product inside a sum binds tighter already
            if compound.class() == OpClass::Multiplicative && !operand.expr.is_number() {
                write!(f, "({})", inner)?;
            } else {
                write!(f, "{}", inner)?;
            }
        }

        Ok(())
    }
}

impl Expr {
    /// Returns a formatter that prints the expression with the given options.
    pub fn fmt_with(&self, options: FormatOptions) -> ExprFormatter<'_> {
        ExprFormatter { expr: self, options }
    }
}

/// Prints the expression with the default [`FormatOptions`].
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_with(FormatOptions::default()).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::expr::{combine, Symbol};
    use super::*;

    /// `(10 × 10 - 4) ÷ 4`
    fn sample() -> Expr {
        let product = combine(Expr::number(10), Symbol::Mul, Expr::number(10)).unwrap();
        let diff = combine(product, Symbol::Sub, Expr::number(4)).unwrap();
        combine(diff, Symbol::Div, Expr::number(4)).unwrap()
    }

    #[test]
    fn unicode_by_default() {
        assert_eq!(sample().to_string(), "(10 × 10 - 4) ÷ 4");
    }

    #[test]
    fn ascii_glyphs() {
        let options = FormatOptionsBuilder::new().glyphs(Glyphs::Ascii).build();
        assert_eq!(sample().fmt_with(options).to_string(), "(10 * 10 - 4) / 4");
        assert_eq!(sample().hint_string_with(options), "10 * 10");
    }

    #[test]
    fn numbers_print_bare() {
        assert_eq!(Expr::number(24).to_string(), "24");
    }
}
