//! Automated opponent.
//!
//! The opponent does no reading: it picks uniformly at random among legal
//! moves, optionally restricted to moves that capture something.

use crate::board::{Color, Point};
use crate::game::Game;

/// Move selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Any legal move, uniformly.
    #[default]
    Random,
    /// A capturing move when one exists, otherwise any legal move.
    CaptureFirst,
}

/// The opponent's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMove {
    Play(Point),
    Pass,
}

/// Choose a move for `color` on the current board.
///
/// Passes when `color` has no legal move.
pub fn select_move(game: &Game, color: Color, policy: Policy, rng: &mut fastrand::Rng) -> AiMove {
    let candidates = match policy {
        Policy::Random => game.legal_moves(color),
        Policy::CaptureFirst => {
            let mut capturing = Vec::new();
            let mut quiet = Vec::new();
            for pt in game.board().empty_points() {
                match game.captures_if_played(pt, color) {
                    Some(0) => quiet.push(pt),
                    Some(_) => capturing.push(pt),
                    None => {}
                }
            }
            if capturing.is_empty() { quiet } else { capturing }
        }
    };

    if candidates.is_empty() {
        return AiMove::Pass;
    }
    AiMove::Play(candidates[rng.usize(..candidates.len())])
}
