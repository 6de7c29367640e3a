#![cfg(feature = "std")]

//! Wire messages and the request interface every defense endpoint offers.

use serde::{Deserialize, Serialize};

use crate::core::{DefenseStatus, FleetPlan, ResponseCode};

/// Bumped whenever `Message` changes shape.
pub const PROTOCOL_VERSION: u16 = 1;

/// Frames exchanged between an attacker and a defense server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Message {
    /// Opens a session.
    Hello { version: u16 },
    HelloAck { version: u16 },
    /// Fire at `position` in the defender's game `game_id`.
    Attack {
        seq: u64,
        game_id: String,
        position: String,
    },
    /// `token` is one of the four legacy response codes, verbatim.
    AttackResp {
        seq: u64,
        position: String,
        token: String,
    },
    /// Register a fleet under `game_id`.
    Setup {
        seq: u64,
        game_id: String,
        plan: FleetPlan,
    },
    StatusReq { seq: u64, game_id: String },
    StatusResp { seq: u64, status: DefenseStatus },
    Health { seq: u64 },
    HealthOk { seq: u64 },
    Ack { seq: u64 },
    /// The request was refused; the session stays open.
    Rejected { seq: u64, reason: Rejection },
}

/// Request-level refusals. These are never game outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Rejection {
    #[error("Game ID '{game_id}' not found")]
    NotFound { game_id: String },
    #[error("Game already over")]
    GameOver { game_id: String },
    #[error("Game ID '{game_id}' already registered")]
    AlreadyExists { game_id: String },
    #[error("invalid fleet: {reason}")]
    InvalidSetup { reason: String },
    #[error("request not supported by this endpoint")]
    Unsupported,
}

/// What a defender answered to one attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackReply {
    Resolved { position: String, code: ResponseCode },
    Rejected(Rejection),
}

impl AttackReply {
    pub fn code(&self) -> Option<ResponseCode> {
        match self {
            AttackReply::Resolved { code, .. } => Some(*code),
            AttackReply::Rejected(_) => None,
        }
    }
}

/// Operations a defense endpoint exposes, whatever carries them.
///
/// Implemented directly over a registry, by the binary stub and by the
/// legacy text-socket client. Transport failures surface as `Err`;
/// refusals as [`Rejection`] (inside [`AttackReply`] for attacks, as the
/// error value for the other requests).
#[async_trait::async_trait]
pub trait DefenseApi: Send {
    async fn attack(&mut self, game_id: &str, position: &str) -> anyhow::Result<AttackReply>;
    async fn setup(&mut self, game_id: &str, plan: FleetPlan) -> anyhow::Result<()>;
    async fn status(&mut self, game_id: &str) -> anyhow::Result<DefenseStatus>;
    async fn health(&mut self) -> anyhow::Result<()>;
}
