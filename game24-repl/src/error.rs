use ariadne::Fmt;
use game24_attrs::ErrorKind;
use game24_error::{ErrorKind, EXPR};

/// The first word of the line is not a known command or a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", name),
    labels = ["this word"],
    help = format!("type {} to see the available commands", "help".fg(EXPR)),
)]
pub struct UnknownCommand {
    /// The word that was not recognized.
    pub name: String,
}

/// A word that should be an integer could not be read as one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid integer: {}", lexeme),
    labels = ["this is not an integer"],
)]
pub struct InvalidInteger {
    /// The word that was found.
    pub lexeme: String,
}

/// A command that needs numbers was given none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` needs at least one number", command),
    labels = [format!("add some {} here", "numbers".fg(EXPR))],
)]
pub struct MissingNumbers {
    /// The command that was given.
    pub command: &'static str,
}

/// The `check` command was given without the `:` that separates the numbers from the solution.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing `:` before the solution",
    labels = ["after these numbers"],
    help = format!("write the command as {}", "check 4 4 10 10 : (10 × 10 - 4) ÷ 4".fg(EXPR)),
)]
pub struct MissingSeparator;

/// A command was given more words than it takes.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes exactly one number", command),
    labels = ["remove this"],
)]
pub struct ExtraArguments {
    /// The command that was given.
    pub command: &'static str,
}

/// A command that only makes sense during a game was given outside of one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` can only be used during a game", name),
    labels = ["this command"],
    help = format!("type {} to start a game", "play".fg(EXPR)),
)]
pub struct NotPlaying {
    /// The command that was given.
    pub name: String,
}
