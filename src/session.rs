#![cfg(feature = "std")]

//! Attacker side: sends shots to a remote defender and tracks the results.

use std::sync::MutexGuard;

use rand::Rng;

use crate::core::{AttackTracker, Position, PositionError, ResponseCode};
use crate::protocol::{AttackReply, DefenseApi, Rejection};
use crate::registry::{lock, TrackerHandle};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] PositionError),
    #[error("position {0} was already attacked")]
    AlreadyAttempted(Position),
    #[error("no untried positions left")]
    Exhausted,
    #[error("defender refused the attack: {0}")]
    Rejected(Rejection),
    #[error("transport failure: {0}")]
    Transport(#[from] anyhow::Error),
}

/// One attacker against one opposing game, feeding a tracker taken from an
/// [`AttackRegistry`](crate::registry::AttackRegistry). Only tokens actually
/// received from the defender are recorded; failed calls and refusals leave
/// the tracker untouched.
pub struct AttackSession<A: DefenseApi> {
    api: A,
    enemy_game_id: String,
    tracker: TrackerHandle,
}

impl<A: DefenseApi> AttackSession<A> {
    pub fn new(api: A, enemy_game_id: impl Into<String>, tracker: TrackerHandle) -> Self {
        Self {
            api,
            enemy_game_id: enemy_game_id.into(),
            tracker,
        }
    }

    pub fn enemy_game_id(&self) -> &str {
        &self.enemy_game_id
    }

    /// Lock the tracker. Do not hold the guard across a call to the defender.
    pub fn tracker(&self) -> MutexGuard<'_, AttackTracker> {
        lock(&self.tracker)
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    pub fn is_won(&self) -> bool {
        self.tracker().is_victory()
    }

    /// Check the defender is reachable.
    pub async fn connect(&mut self) -> Result<(), SessionError> {
        self.api.health().await?;
        log::info!("defender reachable, targeting game {:?}", self.enemy_game_id);
        Ok(())
    }

    /// Validate `token` locally, send it, and record the answer.
    pub async fn fire(&mut self, token: &str) -> Result<(Position, ResponseCode), SessionError> {
        let pos = Position::parse(token)?;
        let attempted = self.tracker().has_attempted(pos);
        if attempted {
            return Err(SessionError::AlreadyAttempted(pos));
        }
        let reply = self
            .api
            .attack(&self.enemy_game_id, &pos.to_string())
            .await?;
        match reply {
            AttackReply::Resolved { code, .. } => {
                self.tracker().record(pos, code);
                log::info!("attack at {} -> {}", pos, code);
                Ok((pos, code))
            }
            AttackReply::Rejected(reason) => {
                log::warn!("attack at {} refused: {}", pos, reason);
                Err(SessionError::Rejected(reason))
            }
        }
    }

    /// Fire at a random untried cell.
    pub async fn fire_random<R: Rng + Send + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(Position, ResponseCode), SessionError> {
        let target = self.tracker().random_target(rng);
        let pos = target.ok_or(SessionError::Exhausted)?;
        self.fire(&pos.to_string()).await
    }
}
