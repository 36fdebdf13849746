//! Go rule engine: move legality, captures, ko, passes, undo and scoring.
//!
//! All mutations are computed on a scratch copy of the board and committed
//! only once the move is known to be legal, so a rejected move never changes
//! the game. Undo is driven by a log of per-move diffs (placed stone, captured
//! stones, and the ko/pass/last-move state before the move) rather than full
//! board snapshots.

use std::fmt;

use crate::board::{Board, Color, Point, vertex_str};
use crate::constants::{KOMI, PASSES_TO_END};
use crate::error::MoveError;

/// How the final position is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringRule {
    /// Count stones on the board only. Empty points are never awarded.
    #[default]
    StoneCount,
    /// Stones plus empty regions bordered by a single color.
    Area,
}

/// Rule settings fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub komi: f32,
    pub scoring: ScoringRule,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            komi: KOMI,
            scoring: ScoringRule::default(),
        }
    }
}

/// Parse a komi value, rejecting NaN and infinities.
pub fn parse_komi(s: &str) -> Result<f32, String> {
    match s.trim().parse::<f32>() {
        Ok(komi) if komi.is_finite() => Ok(komi),
        Ok(_) => Err(format!("komi must be a finite number, got `{s}`")),
        Err(e) => Err(format!("invalid komi `{s}`: {e}")),
    }
}

/// Final (or provisional) count of a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameResult {
    pub black: u32,
    pub white: u32,
    pub komi: f32,
    /// `black - (white + komi)`; positive favors Black.
    pub margin: f32,
}

impl GameResult {
    pub fn winner(&self) -> Option<Color> {
        if self.margin > 0.0 {
            Some(Color::Black)
        } else if self.margin < 0.0 {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Score in GTP `final_score` form, e.g. `B+2.25`, `W+3.75` or `0`.
    pub fn gtp_score(&self) -> String {
        match self.winner() {
            Some(Color::Black) => format!("B+{}", self.margin),
            Some(Color::White) => format!("W+{}", -self.margin),
            None => "0".to_string(),
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Game over! Black: {}, White: {}+{}",
            self.black, self.white, self.komi
        )?;
        match self.winner() {
            Some(color) => write!(f, "{color} wins by {}", self.margin.abs()),
            None => write!(f, "Draw"),
        }
    }
}

/// A successfully played stone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub point: Point,
    pub color: Color,
    pub captured: Vec<Point>,
}

/// What a pass led to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassOutcome {
    /// Play continues with the given color to move.
    Continue(Color),
    /// Consecutive passes ended the game.
    Ended(GameResult),
}

#[derive(Debug, Clone)]
enum Action {
    Play {
        point: Point,
        captured: Vec<Point>,
    },
    Pass,
}

/// A point the given color may not play on its next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ko {
    point: Point,
    forbidden: Color,
}

/// State needed to revert one move exactly.
#[derive(Debug, Clone)]
struct UndoEntry {
    action: Action,
    to_move: Color,
    ko: Option<Ko>,
    passes: u32,
    last_move: Option<Point>,
}

/// A game of 9x9 Go.
///
/// This is the single session object: front ends hold one `Game` and route
/// every move, pass and undo through it.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Color,
    ko: Option<Ko>,
    passes: u32,
    game_over: bool,
    last_move: Option<Point>,
    undo_log: Vec<UndoEntry>,
    rules: Rules,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    pub fn with_rules(rules: Rules) -> Self {
        Game {
            board: Board::new(),
            to_move: Color::Black,
            ko: None,
            passes: 0,
            game_over: false,
            last_move: None,
            undo_log: Vec::new(),
            rules,
        }
    }

    /// Start from an arbitrary position with `to_move` to play.
    pub fn from_board(board: Board, to_move: Color, rules: Rules) -> Self {
        Game {
            board,
            to_move,
            ..Self::with_rules(rules)
        }
    }

    // -- Accessors --

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn ko_point(&self) -> Option<Point> {
        self.ko.map(|ko| ko.point)
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.passes
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn last_move(&self) -> Option<Point> {
        self.last_move
    }

    pub fn history_len(&self) -> usize {
        self.undo_log.len()
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn set_komi(&mut self, komi: f32) {
        self.rules.komi = komi;
    }

    /// Reopen a game ended by consecutive passes so play can go on.
    ///
    /// The pass counter is left as is; the next stone resets it.
    pub fn resume(&mut self) {
        if self.game_over {
            tracing::debug!("resuming finished game");
            self.game_over = false;
        }
    }

    // -- Moves --

    /// Play a stone for the player to move.
    pub fn attempt_move(&mut self, point: Point) -> Result<MoveOutcome, MoveError> {
        self.play(point, self.to_move)
    }

    /// Play a stone of an explicit color. The turn passes to the other color.
    pub fn play(&mut self, point: Point, color: Color) -> Result<MoveOutcome, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        let (next, captured) = match self.place(point, color) {
            Ok(placed) => placed,
            Err(e) => {
                tracing::debug!("{color} {point:?} rejected: {e}");
                return Err(e);
            }
        };

        self.undo_log.push(UndoEntry {
            action: Action::Play {
                point,
                captured: captured.clone(),
            },
            to_move: self.to_move,
            ko: self.ko,
            passes: self.passes,
            last_move: self.last_move,
        });

        self.board = next;
        self.ko = match captured.as_slice() {
            [single] => Some(Ko {
                point: *single,
                forbidden: color.opp(),
            }),
            _ => None,
        };
        self.passes = 0;
        self.last_move = Some(point);
        self.to_move = color.opp();

        tracing::debug!(
            "{color} plays {} capturing {} (ko: {:?})",
            vertex_str(point),
            captured.len(),
            self.ko_point()
        );

        Ok(MoveOutcome {
            point,
            color,
            captured,
        })
    }

    /// Resolve a placement on a scratch board.
    ///
    /// Returns the resulting board and the captured points, or the reason the
    /// placement is illegal. `self` is never modified.
    fn place(&self, point: Point, color: Color) -> Result<(Board, Vec<Point>), MoveError> {
        if !Board::in_bounds(point) {
            return Err(MoveError::OutOfBounds);
        }
        if self.board.get(point).is_some() {
            return Err(MoveError::OccupiedCell);
        }
        if self.ko == Some(Ko { point, forbidden: color }) {
            return Err(MoveError::KoViolation);
        }

        let mut next = self.board;
        next.set(point, Some(color));

        let opp = color.opp();
        let mut captured = Vec::new();
        for n in next.neighbors(point) {
            if next.get(n) == Some(opp) && !next.group_liberties(n) {
                captured.extend(next.remove_group(n));
            }
        }

        if captured.is_empty() && !next.group_liberties(point) {
            return Err(MoveError::SuicideMove);
        }
        Ok((next, captured))
    }

    /// Whether `color` may legally play at `point` on the current board.
    ///
    /// Does not consider whether the game has ended.
    pub fn is_legal_move(&self, point: Point, color: Color) -> bool {
        self.place(point, color).is_ok()
    }

    /// Stones `color` would capture at `point`, or `None` if the move is illegal.
    pub fn captures_if_played(&self, point: Point, color: Color) -> Option<usize> {
        self.place(point, color)
            .ok()
            .map(|(_, captured)| captured.len())
    }

    /// All points where `color` may legally play, in row-major order.
    pub fn legal_moves(&self, color: Color) -> Vec<Point> {
        self.board
            .empty_points()
            .filter(|&pt| self.is_legal_move(pt, color))
            .collect()
    }

    /// Pass for the player to move.
    pub fn pass(&mut self) -> Result<PassOutcome, MoveError> {
        self.pass_as(self.to_move)
    }

    /// Pass for an explicit color. Clears the ko point.
    pub fn pass_as(&mut self, color: Color) -> Result<PassOutcome, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        self.undo_log.push(UndoEntry {
            action: Action::Pass,
            to_move: self.to_move,
            ko: self.ko,
            passes: self.passes,
            last_move: self.last_move,
        });

        self.passes += 1;
        self.ko = None;
        tracing::debug!("{color} passes ({} in a row)", self.passes);

        if self.passes >= PASSES_TO_END {
            self.game_over = true;
            let result = self.result();
            tracing::info!("game over: {}", result.gtp_score());
            return Ok(PassOutcome::Ended(result));
        }
        self.to_move = color.opp();
        Ok(PassOutcome::Continue(self.to_move))
    }

    /// Revert the most recent move or pass.
    pub fn undo(&mut self) -> Result<(), MoveError> {
        let entry = self.undo_log.pop().ok_or(MoveError::NoHistory)?;

        if let Action::Play { point, captured } = entry.action {
            let color = self.board.get(point);
            self.board.set(point, None);
            let restored = color.map(Color::opp);
            for pt in captured {
                self.board.set(pt, restored);
            }
        }
        self.to_move = entry.to_move;
        self.ko = entry.ko;
        self.passes = entry.passes;
        self.last_move = entry.last_move;
        self.game_over = false;

        tracing::debug!("undo, {} to move", self.to_move);
        Ok(())
    }

    /// Count the current position under the game's scoring rule.
    pub fn result(&self) -> GameResult {
        let (black, white) = match self.rules.scoring {
            ScoringRule::StoneCount => (
                self.board.count(Color::Black),
                self.board.count(Color::White),
            ),
            ScoringRule::Area => (
                self.board.area(Color::Black),
                self.board.area(Color::White),
            ),
        };
        let komi = self.rules.komi;
        GameResult {
            black,
            white,
            komi,
            margin: black as f32 - (white as f32 + komi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.to_move(), Color::Black);
        assert_eq!(game.ko_point(), None);
        assert_eq!(game.consecutive_passes(), 0);
        assert!(!game.is_over());
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn test_first_move_in_center() {
        let mut game = Game::new();
        let outcome = game.attempt_move((4, 4)).unwrap();
        assert!(outcome.captured.is_empty());
        assert_eq!(game.board().count(Color::Black), 1);
        assert_eq!(game.board().get((4, 4)), Some(Color::Black));
        assert_eq!(game.ko_point(), None);
        assert_eq!(game.to_move(), Color::White);
        assert_eq!(game.last_move(), Some((4, 4)));
    }

    #[test]
    fn test_occupied_and_out_of_bounds() {
        let mut game = Game::new();
        game.attempt_move((0, 0)).unwrap();
        assert_eq!(game.attempt_move((0, 0)), Err(MoveError::OccupiedCell));
        assert_eq!(game.attempt_move((9, 0)), Err(MoveError::OutOfBounds));
        assert_eq!(game.to_move(), Color::White);
    }

    #[test]
    fn test_pass_resets_after_move() {
        let mut game = Game::new();
        game.pass().unwrap();
        assert_eq!(game.consecutive_passes(), 1);
        game.attempt_move((2, 2)).unwrap();
        assert_eq!(game.consecutive_passes(), 0);
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut game = Game::new();
        assert_eq!(game.undo(), Err(MoveError::NoHistory));
    }

    #[test]
    fn test_result_display() {
        let result = GameResult {
            black: 10,
            white: 5,
            komi: 3.75,
            margin: 1.25,
        };
        assert_eq!(
            result.to_string(),
            "Game over! Black: 10, White: 5+3.75\nBlack wins by 1.25"
        );
        assert_eq!(result.gtp_score(), "B+1.25");
    }

    #[test]
    fn test_parse_komi_rejects_non_finite() {
        assert_eq!(parse_komi("6.5"), Ok(6.5));
        assert_eq!(parse_komi(" -2 "), Ok(-2.0));
        assert!(parse_komi("nan").is_err());
        assert!(parse_komi("inf").is_err());
        assert!(parse_komi("-infinity").is_err());
        assert!(parse_komi("seven").is_err());
    }

    #[test]
    fn test_resume_after_two_passes() {
        let mut game = Game::new();
        game.pass().unwrap();
        game.pass().unwrap();
        assert_eq!(game.attempt_move((0, 0)), Err(MoveError::GameOver));

        game.resume();
        assert!(!game.is_over());
        game.attempt_move((0, 0)).unwrap();
        assert_eq!(game.consecutive_passes(), 0);
    }

    #[test]
    fn test_white_wins_on_empty_board() {
        let result = Game::new().result();
        assert_eq!(result.margin, -3.75);
        assert_eq!(result.winner(), Some(Color::White));
        assert_eq!(result.gtp_score(), "W+3.75");
    }
}
