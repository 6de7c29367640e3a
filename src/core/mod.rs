//! Core naval battle rules (no_std compatible)
//!
//! Ships, fleets, the per-game resolution state machine and the attacker's
//! tracker. Nothing in here performs I/O or blocks.

pub mod battle;
pub mod bitboard;
pub mod common;
pub mod config;
pub mod fleet;
pub mod position;
pub mod ship;
pub mod tracker;

pub use battle::{BattleStateMachine, DefenseStatus, ShipStatus};
pub use bitboard::{BitBoard, BitBoardError, Grid};
pub use common::{BattleState, GameOver, Outcome, ResponseCode, Symbol, UnknownToken};
pub use config::*;
pub use fleet::{Fleet, FleetPlan, SetupError};
pub use position::{Position, PositionError};
pub use ship::Ship;
pub use tracker::{AttackStats, AttackTracker};
