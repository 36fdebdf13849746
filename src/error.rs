use std::fmt;

/// Reasons a move, pass or undo is rejected.
///
/// Every rejection leaves the game exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Point is off the 9x9 board
    OutOfBounds,
    /// Point already holds a stone
    OccupiedCell,
    /// Point is the active ko point
    KoViolation,
    /// Move captures nothing and leaves its own group without liberties
    SuicideMove,
    /// Game has ended after consecutive passes
    GameOver,
    /// Undo requested with nothing to undo
    NoHistory,
    /// The automated opponent owns this turn
    NotYourTurn,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfBounds => write!(f, "illegal move: point is off the board"),
            MoveError::OccupiedCell => write!(f, "illegal move: point not empty"),
            MoveError::KoViolation => write!(f, "illegal move: retakes ko, play elsewhere first"),
            MoveError::SuicideMove => write!(f, "illegal move: suicide"),
            MoveError::GameOver => write!(f, "game is over"),
            MoveError::NoHistory => write!(f, "nothing to undo"),
            MoveError::NotYourTurn => write!(f, "not your turn"),
        }
    }
}

impl std::error::Error for MoveError {}
