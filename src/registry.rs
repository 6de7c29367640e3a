#![cfg(feature = "std")]

//! Per-process game stores: defending games keyed by their id, and
//! attacker-side trackers keyed by the initiating game id. The two keyspaces
//! are independent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use serde::Serialize;

use crate::core::{
    AttackStats, AttackTracker, BattleStateMachine, DefenseStatus, Fleet, GameOver, Outcome,
    Symbol, GRID_SIZE,
};

/// Shared, individually locked game.
pub type GameHandle = Arc<Mutex<BattleStateMachine>>;
/// Shared, individually locked attack tracker.
pub type TrackerHandle = Arc<Mutex<AttackTracker>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("game {game_id:?} is already registered")]
    AlreadyExists { game_id: String },
}

/// Failure to resolve an attack for reasons outside the game itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error("game {game_id:?} not found")]
    NotFound { game_id: String },
    #[error(transparent)]
    GameOver(#[from] GameOver),
}

/// Owns every defending game of a process. The map is guarded by one lock;
/// each game has its own mutex so different games resolve in parallel while
/// attacks on the same game are serialized.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: RwLock<HashMap<String, GameHandle>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validated fleet under `game_id`. Re-registering an id is an
    /// error so a running game is never silently replaced.
    pub fn create(&self, game_id: &str, fleet: Fleet) -> Result<GameHandle, RegistryError> {
        let mut games = self.games.write().unwrap_or_else(PoisonError::into_inner);
        if games.contains_key(game_id) {
            return Err(RegistryError::AlreadyExists {
                game_id: game_id.to_string(),
            });
        }
        let handle = Arc::new(Mutex::new(BattleStateMachine::new(game_id, fleet)));
        games.insert(game_id.to_string(), Arc::clone(&handle));
        log::info!("game {:?} registered", game_id);
        Ok(handle)
    }

    pub fn get(&self, game_id: &str) -> Option<GameHandle> {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(game_id)
            .cloned()
    }

    /// Look up `game_id` and resolve `position` while holding that game's lock.
    pub fn resolve(&self, game_id: &str, position: &str) -> Result<Outcome, AttackError> {
        let handle = self.get(game_id).ok_or_else(|| AttackError::NotFound {
            game_id: game_id.to_string(),
        })?;
        let outcome = lock(&handle).resolve(position)?;
        Ok(outcome)
    }

    pub fn status(&self, game_id: &str) -> Option<DefenseStatus> {
        self.get(game_id).map(|handle| lock(&handle).status())
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.games.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once at least one game exists and every game is destroyed.
    pub fn all_destroyed(&self) -> bool {
        let handles: Vec<GameHandle> = self
            .games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        !handles.is_empty() && handles.iter().all(|h| lock(h).is_game_over())
    }
}

/// Attacker-side trackers, one per initiating game id.
#[derive(Debug, Default)]
pub struct AttackRegistry {
    trackers: RwLock<HashMap<String, TrackerHandle>>,
}

impl AttackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking attacks made by `game_id`. An id already in use is an
    /// error so a running tally is never reset.
    pub fn init(&self, game_id: &str) -> Result<TrackerHandle, RegistryError> {
        let mut trackers = self.trackers.write().unwrap_or_else(PoisonError::into_inner);
        if trackers.contains_key(game_id) {
            return Err(RegistryError::AlreadyExists {
                game_id: game_id.to_string(),
            });
        }
        let handle = Arc::new(Mutex::new(AttackTracker::new()));
        trackers.insert(game_id.to_string(), Arc::clone(&handle));
        log::info!("attack game {:?} initialized", game_id);
        Ok(handle)
    }

    pub fn get(&self, game_id: &str) -> Option<TrackerHandle> {
        self.trackers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(game_id)
            .cloned()
    }

    pub fn stats(&self, game_id: &str) -> Option<AttackStats> {
        self.get(game_id).map(|handle| lock(&handle).stats())
    }

    pub fn overlay(&self, game_id: &str) -> Option<[[Symbol; GRID_SIZE]; GRID_SIZE]> {
        self.get(game_id).map(|handle| *lock(&handle).overlay())
    }

    /// Initialized ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .trackers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.trackers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Both stores of one process.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub defense: Arc<GameRegistry>,
    pub attack: Arc<AttackRegistry>,
}

/// Ids in each keyspace, for debugging listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameIds {
    pub defense_games: Vec<String>,
    pub attack_games: Vec<String>,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> GameIds {
        GameIds {
            defense_games: self.defense.ids(),
            attack_games: self.attack.ids(),
        }
    }
}

/// Lock a game or tracker. Neither panics midway through an update, so a
/// poisoned lock still guards consistent state.
pub fn lock<T>(handle: &Mutex<T>) -> MutexGuard<'_, T> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}
