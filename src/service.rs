#![cfg(feature = "std")]

use std::sync::Arc;

use crate::core::{DefenseStatus, Fleet, FleetPlan, Outcome, ResponseCode};
use crate::protocol::{AttackReply, DefenseApi, Rejection};
use crate::registry::{AttackError, GameRegistry, RegistryError};

/// In-process defense endpoint over a shared registry. Cloning is cheap;
/// every connection handler gets its own clone.
#[derive(Debug, Clone, Default)]
pub struct DefenseService {
    registry: Arc<GameRegistry>,
}

impl DefenseService {
    pub fn new(registry: Arc<GameRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<GameRegistry> {
        &self.registry
    }

    /// Resolve synchronously and map the result to the wire vocabulary.
    pub fn handle_attack(&self, game_id: &str, position: &str) -> AttackReply {
        match self.registry.resolve(game_id, position) {
            Ok(outcome) => {
                let code = ResponseCode::from(outcome);
                log::info!("game {:?}: attack at {:?} -> {}", game_id, position, code);
                if outcome == Outcome::FleetDestroyed {
                    log::info!("game {:?}: whole fleet destroyed, game over", game_id);
                }
                AttackReply::Resolved {
                    position: position.to_string(),
                    code,
                }
            }
            Err(AttackError::NotFound { game_id }) => {
                log::warn!("attack for unknown game {:?}", game_id);
                AttackReply::Rejected(Rejection::NotFound { game_id })
            }
            Err(AttackError::GameOver(over)) => {
                log::warn!("attack on finished game {:?}", over.game_id);
                AttackReply::Rejected(Rejection::GameOver {
                    game_id: over.game_id,
                })
            }
        }
    }

    /// Validate `plan` and register it. Nothing is registered on failure.
    pub fn handle_setup(&self, game_id: &str, plan: &FleetPlan) -> Result<(), Rejection> {
        let fleet = Fleet::from_plan(plan).map_err(|e| Rejection::InvalidSetup {
            reason: e.to_string(),
        })?;
        self.registry
            .create(game_id, fleet)
            .map_err(|RegistryError::AlreadyExists { game_id }| Rejection::AlreadyExists {
                game_id,
            })?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl DefenseApi for DefenseService {
    async fn attack(&mut self, game_id: &str, position: &str) -> anyhow::Result<AttackReply> {
        Ok(self.handle_attack(game_id, position))
    }

    async fn setup(&mut self, game_id: &str, plan: FleetPlan) -> anyhow::Result<()> {
        self.handle_setup(game_id, &plan)?;
        Ok(())
    }

    async fn status(&mut self, game_id: &str) -> anyhow::Result<DefenseStatus> {
        let status = self
            .registry
            .status(game_id)
            .ok_or_else(|| Rejection::NotFound {
                game_id: game_id.to_string(),
            })?;
        Ok(status)
    }

    async fn health(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
