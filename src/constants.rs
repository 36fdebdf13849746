//! Constants for board geometry, scoring, and opponent defaults.

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). The engine only plays 9x9.
pub const N: usize = 9;

/// Offsets to the orthogonal neighbors as (row, col) deltas.
/// Order: North, East, South, West
pub const DELTA: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Column letters used in vertex notation ('I' is skipped by convention).
pub const COLUMN_LETTERS: &[u8; N] = b"ABCDEFGHJ";

// =============================================================================
// Game Rules
// =============================================================================

/// Compensation added to White's count at the end of the game.
pub const KOMI: f32 = 3.75;

/// Number of consecutive passes that ends the game.
pub const PASSES_TO_END: u32 = 2;

// =============================================================================
// Opponent
// =============================================================================

/// Pause before the automated opponent answers a move.
pub const AI_THINK_DELAY: Duration = Duration::from_millis(500);
