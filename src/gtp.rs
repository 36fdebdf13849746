//! Go Text Protocol (GTP) front end.
//!
//! Implements the subset of GTP version 2 needed to drive the engine from a
//! graphical client such as Sabaki or GoGui.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - only 9 is accepted
//! - `clear_board`
//! - `komi <value>`
//! - `play <color> <vertex>` - vertex may be `pass`
//! - `genmove <color>` - random legal move for the given color
//! - `undo`
//! - `showboard`
//! - `final_score`

use std::io::{self, BufRead, Write};

use crate::ai::{AiMove, Policy, select_move};
use crate::board::{Color, parse_vertex, vertex_str};
use crate::constants::N;
use crate::game::{Game, Rules, parse_komi};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    game: Game,
    rules: Rules,
    policy: Policy,
    rng: fastrand::Rng,
}

impl GtpEngine {
    pub fn new(rules: Rules, policy: Policy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            game: Game::with_rules(rules),
            rules,
            policy,
            rng,
        }
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            tracing::debug!("gtp <- {command_line}");
            let (success, message) = self.execute(&command, args);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(stdout, "{prefix}{id_str} {message}\n\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());

        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn parse_color(arg: &str) -> Option<Color> {
        match arg.to_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if size == N => (true, String::new()),
                    Ok(_) => (false, "unacceptable size".to_string()),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                let komi = self.game.rules().komi;
                self.game = Game::with_rules(Rules { komi, ..self.rules });
                (true, String::new())
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match parse_komi(arg) {
                    Ok(komi) => {
                        self.game.set_komi(komi);
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(color) = Self::parse_color(args[0]) else {
                    return (false, "invalid color".to_string());
                };

                // Controllers may keep sending moves after two passes.
                self.game.resume();
                let result = if args[1].eq_ignore_ascii_case("pass") {
                    self.game.pass_as(color).map(|_| ())
                } else {
                    let Some(pt) = parse_vertex(args[1]) else {
                        return (false, "invalid vertex".to_string());
                    };
                    self.game.play(pt, color).map(|_| ())
                };
                match result {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|a| Self::parse_color(a)) else {
                    return (false, "invalid color".to_string());
                };
                self.game.resume();

                match select_move(&self.game, color, self.policy, &mut self.rng) {
                    AiMove::Play(pt) => match self.game.play(pt, color) {
                        Ok(_) => (true, vertex_str(pt)),
                        Err(e) => (false, e.to_string()),
                    },
                    AiMove::Pass => match self.game.pass_as(color) {
                        Ok(_) => (true, "pass".to_string()),
                        Err(e) => (false, e.to_string()),
                    },
                }
            }

            "undo" => match self.game.undo() {
                Ok(()) => (true, String::new()),
                Err(_) => (false, "cannot undo".to_string()),
            },

            "showboard" => (
                true,
                format!("\n{}", self.game.board().render(self.game.last_move())),
            ),

            "final_score" => (true, self.game.result().gtp_score()),

            _ => (false, "unknown command".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GtpEngine {
        GtpEngine::new(Rules::default(), Policy::Random, Some(11))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_and_protocol() {
        let mut engine = engine();
        assert_eq!(engine.execute("name", &[]), (true, "nine-go".to_string()));
        assert_eq!(engine.execute("protocol_version", &[]), (true, "2".to_string()));
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();
        assert_eq!(engine.execute("known_command", &["undo"]), (true, "true".to_string()));
        assert_eq!(
            engine.execute("known_command", &["unknown_cmd"]),
            (true, "false".to_string())
        );
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();
        assert!(engine.execute("boardsize", &["9"]).0);
        assert!(!engine.execute("boardsize", &["19"]).0);
    }

    #[test]
    fn test_play_undo_and_clear() {
        let mut engine = engine();
        assert!(engine.execute("play", &["black", "E5"]).0);
        assert_eq!(engine.game.board().get((4, 4)), Some(Color::Black));

        let (ok, msg) = engine.execute("play", &["white", "E5"]);
        assert!(!ok);
        assert_eq!(msg, "illegal move: point not empty");

        assert!(engine.execute("undo", &[]).0);
        assert_eq!(engine.game.board().get((4, 4)), None);
        assert!(!engine.execute("undo", &[]).0);

        assert!(engine.execute("play", &["b", "A1"]).0);
        assert!(engine.execute("clear_board", &[]).0);
        assert_eq!(engine.game.history_len(), 0);
    }

    #[test]
    fn test_genmove_plays_for_color() {
        let mut engine = engine();
        let (ok, vertex) = engine.execute("genmove", &["w"]);
        assert!(ok);
        let pt = parse_vertex(&vertex).expect("genmove should return a vertex");
        assert_eq!(engine.game.board().get(pt), Some(Color::White));
    }

    #[test]
    fn test_two_passes_and_final_score() {
        let mut engine = engine();
        assert!(engine.execute("play", &["b", "pass"]).0);
        assert!(engine.execute("play", &["w", "pass"]).0);
        assert!(engine.game.is_over());
        assert_eq!(engine.execute("final_score", &[]), (true, "W+3.75".to_string()));
    }

    #[test]
    fn test_komi_survives_clear_board() {
        let mut engine = engine();
        assert!(engine.execute("komi", &["6.5"]).0);
        assert!(engine.execute("clear_board", &[]).0);
        assert_eq!(engine.execute("final_score", &[]), (true, "W+6.5".to_string()));
    }

    #[test]
    fn test_komi_rejects_nan_and_infinity() {
        let mut engine = engine();
        assert_eq!(engine.execute("komi", &["nan"]), (false, "invalid komi".to_string()));
        assert_eq!(engine.execute("komi", &["inf"]), (false, "invalid komi".to_string()));
        assert_eq!(engine.execute("final_score", &[]), (true, "W+3.75".to_string()));
    }

    #[test]
    fn test_play_continues_after_two_passes() {
        let mut engine = engine();
        assert!(engine.execute("play", &["b", "pass"]).0);
        assert!(engine.execute("play", &["w", "pass"]).0);
        assert!(engine.game.is_over());

        assert_eq!(engine.execute("play", &["b", "E5"]), (true, String::new()));
        assert!(!engine.game.is_over());
        assert_eq!(engine.execute("final_score", &[]), (true, "W+2.75".to_string()));

        let (ok, vertex) = engine.execute("genmove", &["w"]);
        assert!(ok);
        assert_ne!(vertex, "pass");
    }
}
