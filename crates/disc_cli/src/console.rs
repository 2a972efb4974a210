//! Terminal collaborators: menu answers from stdin and live match output.

use std::io::{BufRead, Write};

use disc_core::engine::{HumanInput, MatchEvent, MatchObserver, MatchSnapshot};
use disc_core::error::{MatchError, Result};

use crate::report::Names;

/// Reads numeric menu answers line by line, re-prompting until one of the
/// offered options is typed. End of input is [`MatchError::InputClosed`].
pub struct ConsoleInput<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text)
            .and_then(|()| self.writer.flush())
            .map_err(|_| MatchError::InputClosed)
    }
}

impl<R: BufRead, W: Write> HumanInput for ConsoleInput<R, W> {
    fn choose(&mut self, prompt: &str, options: &[usize]) -> Result<usize> {
        let listed: Vec<String> = options.iter().map(usize::to_string).collect();
        loop {
            self.say(&format!("{} [{}]", prompt, listed.join("/")))?;
            let mut line = String::new();
            let read = self.reader.read_line(&mut line).map_err(|_| MatchError::InputClosed)?;
            if read == 0 {
                return Err(MatchError::InputClosed);
            }
            match line.trim().parse::<usize>() {
                Ok(answer) if options.contains(&answer) => return Ok(answer),
                _ => self.say(&format!("'{}' is not an option", line.trim()))?,
            }
        }
    }

    fn notify(&mut self, message: &str) {
        if self.say(message).is_err() {
            log::warn!("console output closed");
        }
    }
}

/// Prints headline events; with `show_field`, every play and the field
/// after each turn.
pub struct ConsoleObserver {
    names: Names,
    show_field: bool,
}

impl ConsoleObserver {
    pub fn new(names: Names, show_field: bool) -> Self {
        Self { names, show_field }
    }
}

impl MatchObserver for ConsoleObserver {
    fn on_event(&mut self, event: &MatchEvent) {
        let headline = matches!(
            event,
            MatchEvent::SetStarted { .. } | MatchEvent::Touchdown { .. } | MatchEvent::Substitution { .. }
        );
        if headline || self.show_field {
            println!("{}", self.names.describe(event));
        }
    }

    fn on_turn(&mut self, snapshot: &MatchSnapshot) {
        if !self.show_field {
            return;
        }
        println!(
            "set {} phase {} turn {}   {} : {}",
            snapshot.set, snapshot.phase, snapshot.turn, snapshot.left_score, snapshot.right_score
        );
        println!("{}", snapshot.board.render());
    }
}
