//! A single vessel: its footprint on the grid and the cells already hit.

use super::bitboard::Grid;
use super::config::ShipClass;
use super::position::Position;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    class: ShipClass,
    footprint: Grid,
    damaged: Grid,
}

impl Ship {
    /// Float a new, undamaged ship. Footprint validation is done by
    /// [`Fleet`](super::fleet::Fleet) before any ship is built.
    pub(crate) fn new(class: ShipClass, footprint: Grid) -> Self {
        Self {
            class,
            footprint,
            damaged: Grid::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.class.name()
    }

    /// Whether `pos` is part of this ship.
    pub fn contains(&self, pos: Position) -> bool {
        self.footprint.contains(pos)
    }

    /// Whether `pos` is part of this ship and has already been hit.
    pub fn already_hit(&self, pos: Position) -> bool {
        self.damaged.contains(pos)
    }

    /// Record a hit at `pos`. Returns `false` when `pos` is not on this
    /// ship or was hit before; state is untouched in both cases.
    pub fn register_hit(&mut self, pos: Position) -> bool {
        if !self.contains(pos) || self.already_hit(pos) {
            return false;
        }
        self.damaged.insert(pos)
    }

    pub fn is_sunk(&self) -> bool {
        self.damaged == self.footprint
    }

    pub fn is_damaged(&self) -> bool {
        !self.damaged.is_empty()
    }

    pub fn footprint(&self) -> Grid {
        self.footprint
    }

    pub fn damaged_cells(&self) -> Grid {
        self.damaged
    }

    pub fn size(&self) -> usize {
        self.footprint.count_ones()
    }

    pub fn hit_count(&self) -> usize {
        self.damaged.count_ones()
    }
}

impl core::fmt::Debug for Ship {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", hits: {}/{}, sunk: {} }}",
            self.name(),
            self.hit_count(),
            self.size(),
            self.is_sunk(),
        )
    }
}
