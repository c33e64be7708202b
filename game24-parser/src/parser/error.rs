use ariadne::Fmt;
use game24_attrs::ErrorKind;
use game24_error::{ErrorKind, EXPR};

/// A character that cannot start any token was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid character `{}`", character),
    labels = ["this character"],
    help = format!("only whole numbers, parentheses and the operators {} are allowed", "+ - × * ÷ /".fg(EXPR)),
)]
pub struct InvalidCharacter {
    /// The offending character.
    pub character: char,

    /// The input from the offending character onwards.
    pub remainder: String,
}

/// An operator or the end of the input was found where a number or parenthesized expression
/// was expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operand",
    labels = [format!("I expected to see a {} here", "number".fg(EXPR))],
    help = if remainder.is_empty() {
        String::from("the expression ended too early")
    } else {
        format!("could not continue from `{}`", remainder)
    },
)]
pub struct MissingOperand {
    /// The unconsumed input at the point of the error.
    pub remainder: String,
}

/// Two operands appeared next to each other with no operator between them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operator",
    labels = [format!("add an {} before this", "operator".fg(EXPR))],
    help = "numbers cannot be placed next to each other; write `2 × 3`, not `2 3`",
)]
pub struct MissingOperator {
    /// The unconsumed input at the point of the error.
    pub remainder: String,
}

/// A parenthesis has no partner.
///
/// `opening` is true when a `(` was never closed, and false when a `)` appeared with no `(` to
/// close.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = [if *opening {
        "this parenthesis is never closed"
    } else {
        "this parenthesis has no opening partner"
    }],
    help = if *opening {
        format!("add a closing `{}`", ")".fg(EXPR))
    } else {
        format!("remove it, or add an opening `{}` before it", "(".fg(EXPR))
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the unmatched parenthesis is an opening one.
    pub opening: bool,

    /// The unconsumed input at the point of the error.
    pub remainder: String,
}

/// A pair of parentheses with nothing inside.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty parentheses",
    labels = ["nothing in here"],
    help = format!("put an {} between the parentheses, or remove them", "expression".fg(EXPR)),
)]
pub struct EmptyParenthesis {
    /// The unconsumed input at the point of the error.
    pub remainder: String,
}

/// The expression divides by something equal to zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this is equal to zero"],
)]
pub struct DivisionByZero {
    /// The unconsumed input, starting at the divisor.
    pub remainder: String,
}
