//! nine-go: a 9x9 Go rule engine with a random-move opponent.
//!
//! The engine enforces capture, ko and suicide rules and tracks passes and
//! undo history. Two text front ends drive it: an interactive console game
//! and a GTP server for graphical clients.
//!
//! ## Modules
//!
//! - [`constants`] - Board size, komi and opponent defaults
//! - [`board`] - Board model and group/liberty flood fill
//! - [`game`] - Move legality, captures, ko, passes, undo and scoring
//! - [`ai`] - Random move selection
//! - [`session`] - Human-vs-opponent turn handling
//! - [`console`] - Interactive terminal game
//! - [`gtp`] - Go Text Protocol server
//!
//! ## Example
//!
//! ```
//! use nine_go::board::Color;
//! use nine_go::game::Game;
//!
//! let mut game = Game::new();
//! game.attempt_move((4, 4)).unwrap();
//!
//! assert_eq!(game.board().count(Color::Black), 1);
//! assert_eq!(game.to_move(), Color::White);
//! ```

pub mod ai;
pub mod board;
pub mod console;
pub mod constants;
pub mod error;
pub mod game;
pub mod gtp;
pub mod session;
