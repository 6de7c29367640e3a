//! Commonly used types and utilities for ease of import.

pub use crate::core::{
    AttackTracker, BattleState, BattleStateMachine, Fleet, FleetPlan, Outcome, Position,
    ResponseCode,
};
pub use crate::protocol::{AttackReply, DefenseApi, Rejection};
pub use crate::registry::{AttackRegistry, GameRegistry, Registries};
pub use crate::service::DefenseService;
pub use crate::session::AttackSession;
pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
