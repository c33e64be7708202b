use crate::error::{
    ExtraArguments,
    InvalidInteger,
    MissingNumbers,
    MissingSeparator,
    NotPlaying,
    UnknownCommand,
};
use game24_error::Error;
use std::{ops::Range, str::FromStr};

/// A line of input to the REPL.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    /// Print every solution for the numbers.
    Solve(Vec<u64>),

    /// Print a hint for the numbers. Repeating the command for the same numbers steps through the
    /// solutions.
    Hint(Vec<u64>),

    /// Check a solution for the numbers.
    Check {
        /// The numbers the solution must use.
        values: Vec<u64>,

        /// The solution, as typed.
        solution: &'a str,

        /// The byte offset of the solution in the line.
        offset: usize,
    },

    /// Change the target.
    Target(i64),

    /// Start dealing hands, or show the current hand if a game is on.
    Play,

    /// Skip the current hand.
    Next,

    /// Claim that the current hand has no solution.
    NoSolutions,

    /// Give up on the current hand and show its solutions.
    Show,

    /// Print a hint for the current hand.
    HintHand,

    /// Answer the current hand.
    Answer {
        /// The solution, as typed.
        solution: &'a str,

        /// The byte offset of the solution in the line.
        offset: usize,
    },

    /// End the game and show the results.
    Stop,

    /// Print the available commands.
    Help,

    /// Leave the REPL.
    Quit,
}

/// Splits the input into words, along with the span of each word in the line. `base` is the
/// offset of `input` in the line.
fn words(input: &str, base: usize) -> impl Iterator<Item = (Range<usize>, &str)> {
    input.split_whitespace().map(move |word| {
        let start = base + (word.as_ptr() as usize - input.as_ptr() as usize);
        (start..start + word.len(), word)
    })
}

/// Reads a word as an integer.
fn integer<T: FromStr>(span: Range<usize>, word: &str) -> Result<T, Error> {
    word.parse::<T>().map_err(|_| Error::new(vec![span], InvalidInteger {
        lexeme: word.to_owned(),
    }))
}

/// Reads every word as a non-negative integer.
fn integers<'a>(words: impl Iterator<Item = (Range<usize>, &'a str)>) -> Result<Vec<u64>, Error> {
    words.map(|(span, word)| integer(span, word)).collect()
}

/// Reads one or more integers following a command.
fn hand(
    command: &'static str,
    command_span: Range<usize>,
    input: &str,
    base: usize,
) -> Result<Vec<u64>, Error> {
    let values = integers(words(input, base))?;
    if values.is_empty() {
        return Err(Error::new(vec![command_span], MissingNumbers { command }));
    }
    Ok(values)
}

impl<'a> Command<'a> {
    /// Reads a command from a line of input. Returns [`None`] if the line is blank.
    ///
    /// During a game, `hint` without numbers asks about the current hand, and a line that is not a
    /// command is an answer to it.
    pub fn parse(line: &'a str, playing: bool) -> Result<Option<Self>, Error> {
        let Some((span, first)) = words(line, 0).next() else {
            return Ok(None);
        };
        let rest = &line[span.end..];
        let alone = rest.trim().is_empty();

        let command = match first {
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "play" if alone => Self::Play,
            "next" | "none" | "show" | "stop" if alone && !playing => {
                return Err(Error::new(vec![span], NotPlaying { name: first.to_owned() }));
            },
            "next" if alone => Self::Next,
            "none" if alone => Self::NoSolutions,
            "show" if alone => Self::Show,
            "stop" if alone => Self::Stop,
            "hint" if alone && playing => Self::HintHand,
            "hint" => Self::Hint(hand("hint", span.clone(), rest, span.end)?),
            "check" => {
                let Some(colon) = rest.find(':') else {
                    return Err(Error::new(vec![span.start..line.trim_end().len()], MissingSeparator));
                };
                let values = hand("check", span.clone(), &rest[..colon], span.end)?;
                let offset = span.end + colon + 1;
                Self::Check {
                    values,
                    solution: &line[offset..],
                    offset,
                }
            },
            "target" => {
                let mut args = words(rest, span.end);
                let Some((target_span, target)) = args.next() else {
                    return Err(Error::new(vec![span], MissingNumbers { command: "target" }));
                };
                if let Some((extra, _)) = args.next() {
                    return Err(Error::new(vec![extra], ExtraArguments { command: "target" }));
                }
                Self::Target(integer(target_span, target)?)
            },
            _ if playing => Self::Answer { solution: line, offset: 0 },
            // a negative first number is still meant as a hand, and is rejected as one
            word if word.parse::<i64>().is_ok() => Self::Solve(integers(words(line, 0))?),
            word => return Err(Error::new(vec![span], UnknownCommand { name: word.to_owned() })),
        };

        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn blank_line() {
        assert_eq!(Command::parse("   ", false).unwrap(), None);
    }

    #[test]
    fn solve_and_hint() {
        assert_eq!(Command::parse("4 4 10 10", false).unwrap(), Some(Command::Solve(vec![4, 4, 10, 10])));
        assert_eq!(Command::parse(" hint 1 5 5 5 ", false).unwrap(), Some(Command::Hint(vec![1, 5, 5, 5])));
    }

    #[test]
    fn check() {
        let line = "check 3 3 8 8 : 8 ÷ (3 - 8 ÷ 3)";
        let Some(Command::Check { values, solution, offset }) = Command::parse(line, false).unwrap() else {
            panic!("expected a check command");
        };
        assert_eq!(values, vec![3, 3, 8, 8]);
        assert_eq!(solution, " 8 ÷ (3 - 8 ÷ 3)");
        assert_eq!(&line[offset..], solution);
    }

    #[test]
    fn target() {
        assert_eq!(Command::parse("target 36", false).unwrap(), Some(Command::Target(36)));

        let err = Command::parse("target 36 48", false).unwrap_err();
        assert_eq!(err.spans, vec![10..12]);
        assert!(err.is::<ExtraArguments>());

        assert!(Command::parse("target", false).unwrap_err().is::<MissingNumbers>());
    }

    #[test]
    fn invalid_integer_span() {
        let err = Command::parse("hint 1 two 3", false).unwrap_err();
        assert_eq!(err.spans, vec![7..10]);
        assert_eq!(
            err.downcast_ref::<InvalidInteger>(),
            Some(&InvalidInteger { lexeme: String::from("two") }),
        );
    }

    #[test]
    fn missing_parts() {
        assert!(Command::parse("hint", false).unwrap_err().is::<MissingNumbers>());
        assert!(Command::parse("check 1 2 3 4 1 + 2", false).unwrap_err().is::<MissingSeparator>());
        assert!(Command::parse("check : 1 + 2", false).unwrap_err().is::<MissingNumbers>());
    }

    #[test]
    fn hands_are_not_negative() {
        let err = Command::parse("-3 27", false).unwrap_err();
        assert_eq!(err.spans, vec![0..2]);
        assert_eq!(
            err.downcast_ref::<InvalidInteger>(),
            Some(&InvalidInteger { lexeme: String::from("-3") }),
        );

        let err = Command::parse("check 3 -8 : 3 × -8", false).unwrap_err();
        assert_eq!(err.spans, vec![8..10]);

        // targets may be negative
        assert_eq!(Command::parse("target -24", false).unwrap(), Some(Command::Target(-24)));
    }

    #[test]
    fn game_commands() {
        assert_eq!(Command::parse("play", false).unwrap(), Some(Command::Play));
        assert_eq!(Command::parse(" none ", true).unwrap(), Some(Command::NoSolutions));
        assert_eq!(Command::parse("next", true).unwrap(), Some(Command::Next));
        assert_eq!(Command::parse("show", true).unwrap(), Some(Command::Show));
        assert_eq!(Command::parse("stop", true).unwrap(), Some(Command::Stop));
        assert_eq!(Command::parse("hint", true).unwrap(), Some(Command::HintHand));
        assert_eq!(Command::parse("hint 1 2", true).unwrap(), Some(Command::Hint(vec![1, 2])));

        let err = Command::parse("show", false).unwrap_err();
        assert_eq!(err.spans, vec![0..4]);
        assert_eq!(
            err.downcast_ref::<NotPlaying>(),
            Some(&NotPlaying { name: String::from("show") }),
        );
    }

    #[test]
    fn answers_while_playing() {
        let line = "8 ÷ (3 - 8 ÷ 3)";
        assert_eq!(
            Command::parse(line, true).unwrap(),
            Some(Command::Answer { solution: line, offset: 0 }),
        );
        assert_eq!(
            Command::parse("show me", true).unwrap(),
            Some(Command::Answer { solution: "show me", offset: 0 }),
        );
        assert!(Command::parse("8 ÷ (3 - 8 ÷ 3)", false).unwrap_err().is::<InvalidInteger>());
    }

    #[test]
    fn unknown_command() {
        let err = Command::parse("solve 1 2 3 4", false).unwrap_err();
        assert_eq!(err.spans, vec![0..5]);
        assert!(err.is::<UnknownCommand>());
    }
}
