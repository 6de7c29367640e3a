//! Attacker-side bookkeeping of outcomes reported by a remote defender.

use rand::Rng;

use super::bitboard::Grid;
use super::common::{ResponseCode, Symbol};
use super::config::{CELL_COUNT, GRID_SIZE};
use super::position::Position;

/// Running statistics of one attack session.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackStats {
    pub total_attacks: usize,
    pub hits: usize,
    pub misses: usize,
    pub sunk_ships: usize,
    /// Fraction in `[0, 1]`.
    pub accuracy: f64,
    pub victory: bool,
}

/// Local mirror of what we know about an opponent's grid. It only
/// consumes response codes; resolution happens on the defender's side.
#[derive(Debug, Clone)]
pub struct AttackTracker {
    overlay: [[Symbol; GRID_SIZE]; GRID_SIZE],
    attempted: Grid,
    total_attacks: usize,
    hits: usize,
    misses: usize,
    sunk_ships: usize,
    victory: bool,
}

impl AttackTracker {
    pub fn new() -> Self {
        Self {
            overlay: [[Symbol::Unknown; GRID_SIZE]; GRID_SIZE],
            attempted: Grid::new(),
            total_attacks: 0,
            hits: 0,
            misses: 0,
            sunk_ships: 0,
            victory: false,
        }
    }

    /// Record the code the defender returned for `pos`. Duplicates are not
    /// rejected here; callers check [`AttackTracker::has_attempted`] first.
    pub fn record(&mut self, pos: Position, code: ResponseCode) {
        self.attempted.insert(pos);
        self.overlay[pos.row()][pos.col()] = Symbol::from(code);
        self.total_attacks += 1;
        match code {
            ResponseCode::Failed => self.misses += 1,
            ResponseCode::Shocked => self.hits += 1,
            ResponseCode::Sunken => {
                self.hits += 1;
                self.sunk_ships += 1;
            }
            ResponseCode::FleetSunken => {
                self.hits += 1;
                self.sunk_ships += 1;
                self.victory = true;
            }
        }
    }

    /// `hits / total_attacks`, or 0 before the first attack.
    pub fn accuracy(&self) -> f64 {
        if self.total_attacks == 0 {
            return 0.0;
        }
        self.hits as f64 / self.total_attacks as f64
    }

    pub fn has_attempted(&self, pos: Position) -> bool {
        self.attempted.contains(pos)
    }

    pub fn symbol_at(&self, pos: Position) -> Symbol {
        self.overlay[pos.row()][pos.col()]
    }

    pub fn overlay(&self) -> &[[Symbol; GRID_SIZE]; GRID_SIZE] {
        &self.overlay
    }

    pub fn total_attacks(&self) -> usize {
        self.total_attacks
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn sunk_ships(&self) -> usize {
        self.sunk_ships
    }

    pub fn is_victory(&self) -> bool {
        self.victory
    }

    pub fn stats(&self) -> AttackStats {
        AttackStats {
            total_attacks: self.total_attacks,
            hits: self.hits,
            misses: self.misses,
            sunk_ships: self.sunk_ships,
            accuracy: self.accuracy(),
            victory: self.victory,
        }
    }

    /// Pick a cell not yet attempted, uniformly. `None` once all 25 are used.
    pub fn random_target<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        let remaining = CELL_COUNT - self.attempted.count_ones();
        if remaining == 0 {
            return None;
        }
        let pick = rng.random_range(0..remaining);
        Position::all()
            .filter(|&pos| !self.has_attempted(pos))
            .nth(pick)
    }
}

impl Default for AttackTracker {
    fn default() -> Self {
        Self::new()
    }
}
