//! Interactive console game against the automated opponent.
//!
//! Reads one command per line:
//!
//! - a vertex such as `E5`, or `row col` with zero-based indices from the top left
//! - `pass`, `undo`, `ai` (toggle the opponent), `new`, `board`, `help`, `quit`

use std::io::{BufRead, Write};
use std::thread;

use crate::board::{Color, Point, parse_vertex, vertex_str};
use crate::game::PassOutcome;
use crate::session::{AiAction, Session};

const HELP: &str = "\
commands:
  E5 | 4 4   place a stone (vertex, or zero-based row and column)
  pass       pass your turn
  undo       take back the last move
  ai         toggle the automated opponent
  new        start a new game
  board      show the board
  quit       leave";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Play(Point),
    Pass,
    Undo,
    ToggleAi,
    New,
    Board,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let command = match line.to_lowercase().as_str() {
        "pass" => Command::Pass,
        "undo" => Command::Undo,
        "ai" => Command::ToggleAi,
        "new" => Command::New,
        "board" => Command::Board,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => {
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                [vertex] => Command::Play(parse_vertex(vertex)?),
                [row, col] => Command::Play((row.parse().ok()?, col.parse().ok()?)),
                _ => return None,
            }
        }
    };
    Some(command)
}

/// Text front end that owns the session for the lifetime of the program.
pub struct Console<R, W> {
    session: Session,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(session: Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "nine-go: 9x9 Go, type `help` for commands\n")?;
        self.show()?;
        self.opponent_moves()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let Some(command) = parse_command(&line) else {
                writeln!(self.output, "unrecognized input, type `help` for commands")?;
                continue;
            };
            if command == Command::Quit {
                break;
            }
            self.handle(command)?;
            self.opponent_moves()?;
        }
        Ok(())
    }

    fn handle(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Play(pt) => match self.session.human_move(pt) {
                Ok(outcome) => {
                    if !outcome.captured.is_empty() {
                        writeln!(self.output, "captured {} stone(s)", outcome.captured.len())?;
                    }
                    self.show()?;
                }
                Err(e) => writeln!(self.output, "{e}")?,
            },
            Command::Pass => match self.session.human_pass() {
                Ok(outcome) => self.report_pass(outcome)?,
                Err(e) => writeln!(self.output, "{e}")?,
            },
            Command::Undo => {
                // Undo with no history is a no-op.
                if self.session.undo().is_ok() {
                    self.show()?;
                }
            }
            Command::ToggleAi => {
                let on = self.session.toggle_ai();
                writeln!(self.output, "AI: {}", if on { "on" } else { "off" })?;
            }
            Command::New => {
                self.session.new_game();
                self.show()?;
            }
            Command::Board => self.show()?,
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Let the opponent play for as long as it owns the turn.
    fn opponent_moves(&mut self) -> anyhow::Result<()> {
        while self.session.ai_due() {
            let delay = self.session.ai().think_delay;
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            match self.session.ai_turn() {
                Some(AiAction::Played(outcome)) => {
                    writeln!(
                        self.output,
                        "{} plays {}",
                        outcome.color,
                        vertex_str(outcome.point)
                    )?;
                    self.show()?;
                }
                Some(AiAction::Passed(outcome)) => {
                    writeln!(self.output, "{} passes", self.session.ai().color)?;
                    self.report_pass(outcome)?;
                }
                None => break,
            }
        }
        Ok(())
    }

    fn report_pass(&mut self, outcome: PassOutcome) -> anyhow::Result<()> {
        match outcome {
            PassOutcome::Ended(result) => {
                self.show()?;
                writeln!(self.output, "{result}")?;
            }
            PassOutcome::Continue(_) => self.show()?,
        }
        Ok(())
    }

    fn show(&mut self) -> anyhow::Result<()> {
        let game = self.session.game();
        let board = game.board();
        write!(self.output, "{}", board.render(game.last_move()))?;
        let status = if game.is_over() {
            "game over".to_string()
        } else {
            format!("{} to move", game.to_move())
        };
        writeln!(
            self.output,
            "{status} | black {} white {} | passes {}\n",
            board.count(Color::Black),
            board.count(Color::White),
            game.consecutive_passes()
        )?;
        Ok(())
    }
}
