//! A human-vs-opponent session wrapped around a [`Game`].
//!
//! The session is the only long-lived handle a front end keeps. It gates
//! human input while the automated opponent owns the turn, so moves never
//! overlap; front ends call [`Session::ai_turn`] (after the think delay)
//! whenever [`Session::ai_due`] reports that the opponent should play.

use std::time::Duration;

use crate::ai::{AiMove, Policy, select_move};
use crate::board::{Color, Point};
use crate::constants::AI_THINK_DELAY;
use crate::error::MoveError;
use crate::game::{Game, MoveOutcome, PassOutcome, Rules};

/// Settings for the automated opponent.
#[derive(Debug, Clone)]
pub struct AiSettings {
    pub enabled: bool,
    pub color: Color,
    pub policy: Policy,
    pub think_delay: Duration,
    pub seed: Option<u64>,
}

impl Default for AiSettings {
    fn default() -> Self {
        AiSettings {
            enabled: true,
            color: Color::White,
            policy: Policy::default(),
            think_delay: AI_THINK_DELAY,
            seed: None,
        }
    }
}

/// What the opponent did on its turn.
#[derive(Debug, Clone, PartialEq)]
pub enum AiAction {
    Played(MoveOutcome),
    Passed(PassOutcome),
}

pub struct Session {
    game: Game,
    rules: Rules,
    ai: AiSettings,
    rng: fastrand::Rng,
}

impl Session {
    pub fn new(rules: Rules, ai: AiSettings) -> Self {
        let rng = match ai.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Session {
            game: Game::with_rules(rules),
            rules,
            ai,
            rng,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn ai(&self) -> &AiSettings {
        &self.ai
    }

    /// Whether the human may act right now.
    fn human_turn(&self) -> Result<(), MoveError> {
        if self.game.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.ai.enabled && self.game.to_move() == self.ai.color {
            return Err(MoveError::NotYourTurn);
        }
        Ok(())
    }

    pub fn human_move(&mut self, point: Point) -> Result<MoveOutcome, MoveError> {
        self.human_turn()?;
        self.game.attempt_move(point)
    }

    pub fn human_pass(&mut self) -> Result<PassOutcome, MoveError> {
        self.human_turn()?;
        self.game.pass()
    }

    /// Take back the last move.
    ///
    /// When the opponent is enabled and the human is to move again, its reply
    /// is taken back as well so the human gets their own move back.
    pub fn undo(&mut self) -> Result<(), MoveError> {
        self.game.undo()?;
        let opponent_to_move = self.ai.enabled && self.game.to_move() == self.ai.color;
        if opponent_to_move && self.game.history_len() > 0 {
            self.game.undo()?;
        }
        Ok(())
    }

    /// Flip the opponent on or off. Returns the new state.
    pub fn toggle_ai(&mut self) -> bool {
        self.ai.enabled = !self.ai.enabled;
        tracing::info!("opponent {}", if self.ai.enabled { "on" } else { "off" });
        self.ai.enabled
    }

    /// Discard the current game and start a fresh one with the same rules.
    pub fn new_game(&mut self) {
        self.game = Game::with_rules(self.rules);
        tracing::info!("new game");
    }

    /// The opponent is enabled, the game is running, and it is its turn.
    pub fn ai_due(&self) -> bool {
        self.ai.enabled && !self.game.is_over() && self.game.to_move() == self.ai.color
    }

    /// Let the opponent move if it is due. Returns `None` otherwise.
    pub fn ai_turn(&mut self) -> Option<AiAction> {
        if !self.ai_due() {
            return None;
        }
        let color = self.ai.color;
        match select_move(&self.game, color, self.ai.policy, &mut self.rng) {
            AiMove::Play(pt) => match self.game.play(pt, color) {
                Ok(outcome) => Some(AiAction::Played(outcome)),
                Err(e) => {
                    // Candidates are filtered for legality, so this is unreachable in practice.
                    tracing::warn!("opponent chose an illegal move: {e}");
                    self.game.pass_as(color).ok().map(AiAction::Passed)
                }
            },
            AiMove::Pass => self.game.pass_as(color).ok().map(AiAction::Passed),
        }
    }
}
