mod command;
mod error;
mod game;
mod session;

use game::{PlayOptions, DECK_SIZE};
use game24_compute::{fmt::{FormatOptionsBuilder, Glyphs}, DEFAULT_TARGET};
use rustyline::{error::ReadlineError, DefaultEditor};
use session::{Reply, Session};
use std::io::{self, BufRead, IsTerminal};

/// Executes one line of input, printing the reply or the error. Returns false if the user asked
/// to leave.
fn run_line(session: &mut Session, input: &str) -> bool {
    match session.execute(input) {
        Ok(Reply::Text(text)) => println!("{}", text),
        Ok(Reply::Silent) => (),
        Ok(Reply::Quit) => return false,
        Err(err) => {
            if let Err(io_err) = err.report_to_stderr("input", input) {
                log::error!("could not print error report: {}", io_err);
            }
        },
    }
    true
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut glyphs = Glyphs::Unicode;
    let mut play = PlayOptions::default();
    let mut target = DEFAULT_TARGET;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ascii" => glyphs = Glyphs::Ascii,
            "--cards" => play.show_cards = true,
            "--face-to-ten" => play.face_to_ten = true,
            "--count" => {
                play.count = args.next()
                    .and_then(|count| count.parse().ok())
                    .filter(|count| (1..=DECK_SIZE).contains(count))
                    .ok_or_else(|| format!("`--count` takes a number from 1 to {}", DECK_SIZE))?;
            },
            "--target" => {
                target = args.next()
                    .and_then(|target| target.parse().ok())
                    .ok_or("`--target` takes an integer")?;
            },
            other => return Err(format!("unknown option `{}`", other).into()),
        }
    }
    log::debug!("dealing with {:?}", play);

    let mut session = Session::new(FormatOptionsBuilder::new().glyphs(glyphs).build())
        .with_play_options(play)
        .with_target(target);

    if !io::stdin().is_terminal() {
        // read commands from stdin
        for line in io::stdin().lock().lines() {
            if !run_line(&mut session, &line?) {
                break;
            }
        }
    } else {
        // run the repl / interactive mode
        let mut rl = DefaultEditor::new()?;
        println!("Type `help` to see the available commands.");

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<bool, ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(true);
            }

            rl.add_history_entry(&input)?;

            Ok(run_line(session, &input))
        }

        loop {
            match process_line(&mut rl, &mut session) {
                Ok(true) => (),
                Ok(false) => break,
                Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}
