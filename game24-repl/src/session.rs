use crate::{
    command::Command,
    game::{Game, PlayOptions},
};
use game24_compute::{fmt::FormatOptions, solve, Expr, DEFAULT_TARGET};
use game24_error::Error;
use game24_parser::parse;
use log::debug;
use rand::{rngs::StdRng, SeedableRng};

const HELP: &str = "\
Commands:
  a b c d                  show every solution for the numbers
  hint a b c d             show one step of a solution; repeat for the next solution
  check a b c d : <expr>   check your solution, e.g. `check 4 4 10 10 : (10 × 10 - 4) ÷ 4`
  target N                 change the target (24 by default)
  play                     deal hands from a shuffled deck
  help                     show this message
  quit                     leave

During a game:
  <expr>                   answer the current hand
  none                     definitely no solutions for the current hand
  hint                     show one step of a solution for the current hand
  show                     give up and show every solution
  next                     skip the current hand
  stop                     end the game and show your results";

const NO_SOLUTIONS: &str = "Seems no solutions";
const WRONG: &str = "Sorry! It's not correct!";
const RIGHT: &str = "Good job!";
const UNEXPECTED: &str = "Great job! That is a valid solution the solver did not find.";
const NO_GAME: &str = "Type `play` to start a game";

/// The outcome of one line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Text to print.
    Text(String),

    /// Nothing to print.
    Silent,

    /// The user asked to leave.
    Quit,
}

/// The solutions of the hand the user last asked a hint for.
#[derive(Debug)]
struct Hints {
    /// The hand, sorted.
    hand: Vec<u64>,

    /// The target the solutions reach.
    target: i64,

    /// The solutions.
    answers: Vec<Expr>,

    /// The index of the solution to give the next hint for.
    next: usize,
}

/// Checks that `expr` uses exactly the numbers of the hand and reaches the target. Returns the
/// reply for the user if it does not.
fn verify(expr: &Expr, values: &[u64], target: i64) -> Result<(), String> {
    if !expr.uses_exactly(values) {
        let mut values = values.to_vec();
        values.sort_unstable();
        let values = values.iter().map(ToString::to_string).collect::<Vec<_>>();
        return Err(format!("Sorry! A solution must use exactly the numbers {}", values.join(" ")));
    }

    match expr.value() {
        Some(value) if *value == target => Ok(()),
        Some(value) => Err(format!("{} That is equal to {}", WRONG, value)),
        None => Err(WRONG.to_owned()),
    }
}

/// The state of the REPL between lines.
#[derive(Debug)]
pub struct Session {
    /// The value that solutions must reach.
    target: i64,

    /// How expressions are printed.
    options: FormatOptions,

    /// The hand the user is getting hints for.
    hints: Option<Hints>,

    /// How hands are dealt in a game.
    play_options: PlayOptions,

    /// The game being played, if any.
    game: Option<Game>,

    /// Shuffles the deck.
    rng: StdRng,
}

impl Session {
    /// Creates a session with the default target.
    pub fn new(options: FormatOptions) -> Self {
        Self {
            target: DEFAULT_TARGET,
            options,
            hints: None,
            play_options: PlayOptions::default(),
            game: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Sets how hands are dealt when a game starts.
    pub fn with_play_options(mut self, play: PlayOptions) -> Self {
        self.play_options = play;
        self
    }

    /// Sets the value that solutions must reach.
    pub fn with_target(mut self, target: i64) -> Self {
        self.target = target;
        self
    }

    /// Executes one line of input.
    pub fn execute(&mut self, line: &str) -> Result<Reply, Error> {
        let Some(command) = Command::parse(line, self.game.is_some())? else {
            return Ok(Reply::Silent);
        };
        debug!("executing {:?}", command);

        let text = match command {
            Command::Solve(values) => self.answers(&values),
            Command::Hint(values) => self.hint(values),
            Command::Check { values, solution, offset } => self.check(&values, solution)
                .map_err(|err| shift(err, offset))?,
            Command::Target(target) => {
                self.target = target;
                format!("Target is now {}", target)
            },
            Command::Play => self.play(),
            Command::Next => self.deal(),
            Command::NoSolutions => self.no_solutions(),
            Command::Show => self.show(),
            Command::HintHand => self.hint_hand(),
            Command::Answer { solution, offset } => self.answer(solution)
                .map_err(|err| shift(err, offset))?,
            Command::Stop => self.stop(),
            Command::Help => HELP.to_owned(),
            Command::Quit => return Ok(Reply::Quit),
        };

        Ok(Reply::Text(text))
    }

    /// Prints the solutions, one per line.
    fn list(&self, answers: &[Expr]) -> String {
        if answers.is_empty() {
            return NO_SOLUTIONS.to_owned();
        }

        answers
            .iter()
            .map(|expr| expr.fmt_with(self.options).to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Lists every solution for the numbers, one per line.
    fn answers(&self, values: &[u64]) -> String {
        self.list(&solve(values, self.target))
    }

    /// Gives a hint for the next solution of the numbers.
    fn hint(&mut self, mut values: Vec<u64>) -> String {
        values.sort_unstable();
        let target = self.target;
        let hints = match &mut self.hints {
            Some(hints) if hints.hand == values && hints.target == target => hints,
            hints => hints.insert(Hints {
                answers: solve(&values, target),
                hand: values,
                target,
                next: 0,
            }),
        };

        if hints.answers.is_empty() {
            return NO_SOLUTIONS.to_owned();
        }

        let answer = &hints.answers[hints.next % hints.answers.len()];
        hints.next += 1;
        format!("Hint: {}", answer.hint_string_with(self.options))
    }

    /// Checks a solution typed by the user.
    fn check(&self, values: &[u64], solution: &str) -> Result<String, Error> {
        let expr = parse(solution)?;
        if let Err(reply) = verify(&expr, values, self.target) {
            return Ok(reply);
        }

        if solve(values, self.target).contains(&expr) {
            Ok(RIGHT.to_owned())
        } else {
            Ok(UNEXPECTED.to_owned())
        }
    }

    /// Starts a game, or shows the current hand again.
    fn play(&mut self) -> String {
        let current = self.game.as_ref().and_then(|game| {
            let hand = game.hands().last()?;
            Some(format!("Hand {}: {}", game.hands().len(), hand.describe(game.options().show_cards)))
        });
        if let Some(current) = current {
            return current;
        }

        if self.game.is_none() {
            self.game = Some(Game::new(self.play_options));
        }
        self.deal()
    }

    /// Deals the next hand. When the deck runs out, the results of the set are shown and a new set
    /// begins.
    fn deal(&mut self) -> String {
        let Some(game) = &mut self.game else {
            return NO_GAME.to_owned();
        };

        let mut text = String::new();
        if game.is_set_end() {
            text.push_str(&format!("Set end, your result\n{}\n\n", game.summary()));
            game.reset();
        }
        if game.hands().is_empty() {
            text.push_str(&format!("Set {}\n", game.set()));
        }

        let show_cards = game.options().show_cards;
        if let Some(hand) = game.deal(&mut self.rng, self.target) {
            debug!("dealt {:?}", hand.values());
            let hand = hand.describe(show_cards);
            text.push_str(&format!("Hand {}: {}", game.hands().len(), hand));
        }
        text
    }

    /// Ends the hand with the given reply and deals the next one.
    fn then_deal(&mut self, reply: &str) -> String {
        format!("{}\n\n{}", reply, self.deal())
    }

    /// Claims that the current hand has no solution.
    fn no_solutions(&mut self) -> String {
        let Some(hand) = self.game.as_mut().and_then(Game::current_mut) else {
            return self.deal();
        };

        if !hand.answers().is_empty() {
            return WRONG.to_owned();
        }
        hand.solved();
        self.then_deal(RIGHT)
    }

    /// Gives a hint for the current hand. A hand without solutions ends there.
    fn hint_hand(&mut self) -> String {
        let options = self.options;
        let Some(hand) = self.game.as_mut().and_then(Game::current_mut) else {
            return self.deal();
        };

        match hand.hint().map(|answer| answer.hint_string_with(options)) {
            Some(hint) => format!("Hint: {}", hint),
            None => self.then_deal(NO_SOLUTIONS),
        }
    }

    /// Shows every solution of the current hand and moves on.
    fn show(&mut self) -> String {
        let answers = match self.game.as_ref().and_then(|game| game.hands().last()) {
            Some(hand) => self.list(hand.answers()),
            None => return self.deal(),
        };
        self.then_deal(&answers)
    }

    /// Checks an answer to the current hand. A correct answer moves on to the next hand.
    fn answer(&mut self, solution: &str) -> Result<String, Error> {
        let expr = parse(solution)?;
        let Some(hand) = self.game.as_mut().and_then(Game::current_mut) else {
            return Ok(self.deal());
        };

        if let Err(reply) = verify(&expr, hand.values(), hand.target()) {
            return Ok(reply);
        }

        hand.solved();
        let reply = if hand.answers().contains(&expr) { RIGHT } else { UNEXPECTED };
        Ok(self.then_deal(reply))
    }

    /// Ends the game and shows the results of the set so far.
    fn stop(&mut self) -> String {
        match self.game.take() {
            Some(game) => format!("Your result\n{}", game.summary()),
            None => NO_GAME.to_owned(),
        }
    }
}

/// Moves the spans of an error in part of a line so they point into the whole line.
fn shift(mut err: Error, offset: usize) -> Error {
    err.spans.iter_mut().for_each(|span| *span = span.start + offset..span.end + offset);
    err
}

#[cfg(test)]
mod tests {
    use crate::{error::{NotPlaying, UnknownCommand}, game::{Hand, HandResult}};
    use game24_compute::fmt::{FormatOptionsBuilder, Glyphs};
    use game24_parser::parser::error::MissingOperator;
    use pretty_assertions::assert_eq;
    use super::*;

    fn text(session: &mut Session, line: &str) -> String {
        match session.execute(line).unwrap() {
            Reply::Text(text) => text,
            reply => panic!("expected text for `{}`, got {:?}", line, reply),
        }
    }

    #[test]
    fn solutions() {
        let mut session = Session::new(FormatOptions::default());
        assert_eq!(text(&mut session, "4 4 10 10"), "(10 × 10 - 4) ÷ 4");
        assert_eq!(text(&mut session, "1 1 1 1"), "Seems no solutions");
    }

    #[test]
    fn ascii_solutions() {
        let mut session = Session::new(FormatOptionsBuilder::new().glyphs(Glyphs::Ascii).build());
        assert_eq!(text(&mut session, "10 4 10 4"), "(10 * 10 - 4) / 4");
        assert_eq!(text(&mut session, "hint 4 4 10 10"), "Hint: 10 * 10");
    }

    #[test]
    fn hints_cycle() {
        let mut session = Session::new(FormatOptions::default());
        let answers = solve(&[1, 2, 3, 4], 24);
        assert!(answers.len() > 1);

        let hints = (0..=answers.len())
            .map(|_| text(&mut session, "hint 4 3 2 1"))
            .collect::<Vec<_>>();
        assert_eq!(hints[0], format!("Hint: {}", answers[0].hint_string()));
        assert_eq!(hints[1], format!("Hint: {}", answers[1].hint_string()));
        assert_eq!(hints[answers.len()], hints[0]);
    }

    #[test]
    fn hints_restart_for_new_target() {
        let mut session = Session::new(FormatOptions::default());
        assert_eq!(text(&mut session, "hint 2 5"), "Seems no solutions");
        text(&mut session, "target 10");
        assert_eq!(text(&mut session, "hint 2 5"), "Hint: 2 × 5");
    }

    #[test]
    fn check_solutions() {
        let mut session = Session::new(FormatOptions::default());
        assert_eq!(text(&mut session, "check 4 4 10 10 : (10 * 10 - 4) / 4"), "Good job!");
        assert_eq!(
            text(&mut session, "check 4 4 10 10 : 10 + 10 + 4 + 4"),
            "Sorry! It's not correct! That is equal to 28",
        );
        assert_eq!(
            text(&mut session, "check 4 4 10 10 : 4 × 6"),
            "Sorry! A solution must use exactly the numbers 4 4 10 10",
        );
    }

    #[test]
    fn check_negative_intermediate() {
        // the solver never subtracts a larger value from a smaller one
        let mut session = Session::new(FormatOptions::default());
        assert_eq!(text(&mut session, "check 1 2 5 9 : (5 - 2) × (9 - 1)"), "Good job!");
        assert_eq!(
            text(&mut session, "check 1 2 5 9 : (2 - 5) × (1 - 9)"),
            "Great job! That is a valid solution the solver did not find.",
        );
    }

    #[test]
    fn check_errors_point_into_line() {
        let mut session = Session::new(FormatOptions::default());
        let err = session.execute("check 3 3 : 3 3").unwrap_err();
        assert!(err.is::<MissingOperator>());
        assert_eq!(err.spans, vec![14..15]);
    }

    #[test]
    fn other_commands() {
        let mut session = Session::new(FormatOptions::default());
        assert_eq!(session.execute("").unwrap(), Reply::Silent);
        assert_eq!(session.execute("quit").unwrap(), Reply::Quit);
        assert!(text(&mut session, "help").contains("check a b c d"));
        assert!(session.execute("solve 1 2").unwrap_err().is::<UnknownCommand>());
        assert!(session.execute("next").unwrap_err().is::<NotPlaying>());
    }

    fn seeded(play: PlayOptions) -> Session {
        Session {
            rng: StdRng::seed_from_u64(24),
            ..Session::new(FormatOptions::default()).with_play_options(play)
        }
    }

    fn current(session: &Session) -> &Hand {
        session.game.as_ref().and_then(|game| game.hands().last()).unwrap()
    }

    #[test]
    fn play_a_full_set() {
        let mut session = seeded(PlayOptions::default());
        let first = text(&mut session, "play");
        assert!(first.starts_with("Set 1\nHand 1: "), "{}", first);
        assert!(first.ends_with(&current(&session).describe(false)));
        assert_eq!(text(&mut session, "play"), &first["Set 1\n".len()..]);

        let mut reply = String::new();
        for number in 1..=13 {
            assert_eq!(session.game.as_ref().unwrap().hands().len(), number);
            let line = match current(&session).answers().first() {
                Some(answer) => answer.to_string(),
                None => String::from("none"),
            };
            reply = text(&mut session, &line);
            assert!(reply.starts_with("Good job!\n\n"), "{}: {}", line, reply);
        }

        assert!(reply.contains("\
Set end, your result
Total 13 hands solved
Total 0 hands solved with hint
Total 0 hands failed to solve

Set 2
Hand 1: "), "{}", reply);
    }

    #[test]
    fn hand_results() {
        let mut session = seeded(PlayOptions::default());
        text(&mut session, "play");
        while current(&session).answers().is_empty() {
            text(&mut session, "next");
        }
        let skipped = session.game.as_ref().unwrap().hands().len() - 1;

        assert_eq!(text(&mut session, "none"), WRONG);
        assert!(text(&mut session, "1 + 1").starts_with("Sorry! A solution must use exactly the numbers"));
        assert!(text(&mut session, "hint").starts_with("Hint: "));
        assert_eq!(current(&session).result(), HandResult::Failed);

        let answer = current(&session).answers()[0].to_string();
        assert!(text(&mut session, &answer).starts_with("Good job!"));
        let solved = session.game.as_ref().unwrap().hands().len() - 2;
        assert_eq!(session.game.as_ref().unwrap().hands()[solved].result(), HandResult::Hinted);

        let expected = session.list(current(&session).answers());
        assert!(text(&mut session, "show").starts_with(&expected));

        assert_eq!(text(&mut session, "stop"), format!("\
Your result
Total 0 hands solved
Total 1 hands solved with hint
Total {} hands failed to solve", skipped + 2));
        assert!(session.execute("none").unwrap_err().is::<NotPlaying>());
    }

    #[test]
    fn answer_errors_point_into_line() {
        let mut session = seeded(PlayOptions::default());
        text(&mut session, "play");
        let err = session.execute("(1 + 2").unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn play_with_cards() {
        let mut session = seeded(PlayOptions { count: 3, face_to_ten: true, show_cards: true });
        let reply = text(&mut session, "play");
        let hand = &reply["Set 1\nHand 1: ".len()..];
        assert_eq!(hand.split("  ").count(), 3);
        assert!(!hand.chars().any(|c| c.is_ascii_digit()));
        assert!(current(&session).values().iter().all(|&value| (1..=10).contains(&value)));
    }
}
