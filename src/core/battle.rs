//! The per-game attack resolution state machine.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::bitboard::Grid;
use super::common::{BattleState, GameOver, Outcome, Symbol};
use super::config::GRID_SIZE;
use super::fleet::Fleet;
use super::position::Position;

/// Owns one defender's fleet and is the single authority on what an
/// incoming attack did to it.
#[derive(Debug, Clone)]
pub struct BattleStateMachine {
    game_id: String,
    fleet: Fleet,
    history: Grid,
    state: BattleState,
}

impl BattleStateMachine {
    pub fn new(game_id: impl Into<String>, fleet: Fleet) -> Self {
        Self {
            game_id: game_id.into(),
            fleet,
            history: Grid::new(),
            state: BattleState::Intact,
        }
    }

    /// Resolve a raw position token. Malformed tokens are classified as
    /// [`Outcome::Invalid`] and leave the history untouched.
    pub fn resolve(&mut self, token: &str) -> Result<Outcome, GameOver> {
        self.ensure_running()?;
        match Position::parse(token) {
            Ok(pos) => self.resolve_at(pos),
            Err(_) => Ok(Outcome::Invalid),
        }
    }

    /// Resolve an attack on an already validated position.
    pub fn resolve_at(&mut self, pos: Position) -> Result<Outcome, GameOver> {
        self.ensure_running()?;
        if !self.history.insert(pos) {
            return Ok(Outcome::Invalid);
        }
        let Some(ship) = self.fleet.find_target_mut(pos) else {
            return Ok(Outcome::Miss);
        };
        // The history check above guarantees this cell was never hit.
        let registered = ship.register_hit(pos);
        debug_assert!(registered, "{pos} was hit twice");
        let sunk = ship.is_sunk();
        self.advance();

        Ok(match (sunk, self.state) {
            (true, BattleState::Destroyed) => Outcome::FleetDestroyed,
            (true, _) => Outcome::ShipSunk,
            (false, _) => Outcome::Hit,
        })
    }

    fn ensure_running(&self) -> Result<(), GameOver> {
        if self.is_game_over() {
            return Err(GameOver {
                game_id: self.game_id.clone(),
            });
        }
        Ok(())
    }

    /// Recompute the state from the fleet. Sinking only accumulates, so the
    /// result never moves backwards.
    fn advance(&mut self) {
        let next = if self.fleet.all_sunk() {
            BattleState::Destroyed
        } else if self.fleet.sunk_count() > 0 {
            BattleState::PartiallySunk
        } else if self.fleet.damaged_afloat_count() > 0 {
            BattleState::Damaged
        } else {
            BattleState::Intact
        };
        debug_assert!(next >= self.state, "{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn is_game_over(&self) -> bool {
        self.state == BattleState::Destroyed
    }

    pub fn was_attacked(&self, pos: Position) -> bool {
        self.history.contains(pos)
    }

    /// Every resolved position, in row-major order.
    pub fn attack_history(&self) -> impl Iterator<Item = Position> + '_ {
        self.history.positions()
    }

    pub fn total_attacks(&self) -> usize {
        self.history.count_ones()
    }

    /// What an observer may see of cell `pos`.
    pub fn symbol_at(&self, pos: Position) -> Symbol {
        if !self.was_attacked(pos) {
            return Symbol::Unknown;
        }
        match self.fleet.find_target(pos) {
            Some(ship) if ship.is_sunk() => Symbol::Sunk,
            Some(_) => Symbol::Hit,
            None => Symbol::Miss,
        }
    }

    /// Read-only snapshot for status displays.
    pub fn status(&self) -> DefenseStatus {
        let ships = self
            .fleet
            .ships()
            .iter()
            .map(|ship| ShipStatus {
                name: ship.name().to_string(),
                positions: ship.footprint().positions().collect(),
                hits: ship.damaged_cells().positions().collect(),
                hit_count: ship.hit_count(),
                total_positions: ship.size(),
                is_sunk: ship.is_sunk(),
            })
            .collect();
        let mut grid = [[Symbol::Unknown; GRID_SIZE]; GRID_SIZE];
        for pos in Position::all() {
            grid[pos.row()][pos.col()] = self.symbol_at(pos);
        }
        DefenseStatus {
            game_id: self.game_id.clone(),
            state: self.state,
            state_code: self.state.code().to_string(),
            ships,
            total_attacks: self.total_attacks(),
            attack_history: self.attack_history().collect(),
            is_game_over: self.is_game_over(),
            grid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipStatus {
    pub name: String,
    pub positions: Vec<Position>,
    pub hits: Vec<Position>,
    pub hit_count: usize,
    pub total_positions: usize,
    pub is_sunk: bool,
}

/// Snapshot of a defending game, safe to hand to displays or the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DefenseStatus {
    pub game_id: String,
    pub state: BattleState,
    pub state_code: String,
    pub ships: Vec<ShipStatus>,
    pub total_attacks: usize,
    /// Sorted row-major.
    pub attack_history: Vec<Position>,
    pub is_game_over: bool,
    pub grid: [[Symbol; GRID_SIZE]; GRID_SIZE],
}
