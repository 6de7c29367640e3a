#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod prelude;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod registry;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod service;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use crate::core::*;

#[cfg(feature = "std")]
pub use config::{NetConfig, DEFAULT_GAME_ID};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use protocol::{AttackReply, DefenseApi, Message, Rejection, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use registry::{
    AttackError, AttackRegistry, GameHandle, GameIds, GameRegistry, Registries, RegistryError,
    TrackerHandle,
};
#[cfg(feature = "std")]
pub use server::{serve, Wire};
#[cfg(feature = "std")]
pub use service::DefenseService;
#[cfg(feature = "std")]
pub use session::{AttackSession, SessionError};
#[cfg(feature = "std")]
pub use skeleton::Skeleton;
#[cfg(feature = "std")]
pub use stub::Stub;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, legacy::LegacyClient, tcp::TcpTransport, Transport};
