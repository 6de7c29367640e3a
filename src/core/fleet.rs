//! Fleet setup, validation and target lookup.

use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;

use super::bitboard::Grid;
use super::config::{ShipClass, FLEET_CLASSES, GRID_SIZE, NUM_SHIPS};
use super::position::{Position, PositionError};
use super::ship::Ship;

/// Reasons a fleet cannot be built. Nothing is registered when any occurs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("{ship} needs exactly {expected} positions, got {found}")]
    WrongSize {
        ship: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{ship} has an invalid position: {source}")]
    InvalidPosition {
        ship: &'static str,
        #[source]
        source: PositionError,
    },
    #[error("position {position} is used more than once")]
    Overlap { position: Position },
    #[error("unable to place {ship} at random")]
    UnableToPlace { ship: &'static str },
}

/// Raw position groups as typed by a player or sent in a setup request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetPlan {
    pub battleship: Vec<String>,
    pub submarine: Vec<String>,
    pub destroyer: Vec<String>,
}

impl FleetPlan {
    /// Build a plan from whitespace-separated groups, e.g. `"E3 E4 E5"`.
    pub fn from_lines(battleship: &str, submarine: &str, destroyer: &str) -> Self {
        let split = |line: &str| line.split_whitespace().map(String::from).collect();
        Self {
            battleship: split(battleship),
            submarine: split(submarine),
            destroyer: split(destroyer),
        }
    }

    /// Groups in [`FLEET_CLASSES`] order.
    pub fn groups(&self) -> [&[String]; NUM_SHIPS] {
        [&self.battleship, &self.submarine, &self.destroyer]
    }
}

/// One defender's ships, in setup order. Footprints never overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    ships: [Ship; NUM_SHIPS],
}

impl Fleet {
    /// Validate and build a fleet from position groups ordered as
    /// [`FLEET_CLASSES`] (3, 2 and 1 cells).
    pub fn from_groups(groups: [&[Position]; NUM_SHIPS]) -> Result<Self, SetupError> {
        let mut occupied = Grid::new();
        let mut footprints = [Grid::new(); NUM_SHIPS];
        for (i, (class, cells)) in FLEET_CLASSES.iter().zip(groups).enumerate() {
            check_size(*class, cells.len())?;
            for &pos in cells {
                if !occupied.insert(pos) {
                    return Err(SetupError::Overlap { position: pos });
                }
                footprints[i].insert(pos);
            }
        }
        Ok(Self::assemble(footprints))
    }

    /// Parse every token of a plan, then validate as [`Fleet::from_groups`].
    pub fn from_plan(plan: &FleetPlan) -> Result<Self, SetupError> {
        let mut parsed: [Vec<Position>; NUM_SHIPS] = Default::default();
        for (i, (class, tokens)) in FLEET_CLASSES.iter().zip(plan.groups()).enumerate() {
            check_size(*class, tokens.len())?;
            parsed[i] = tokens
                .iter()
                .map(|t| Position::parse(t))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| SetupError::InvalidPosition {
                    ship: class.name(),
                    source,
                })?;
        }
        let [b, s, d] = &parsed;
        Self::from_groups([b.as_slice(), s.as_slice(), d.as_slice()])
    }

    /// Place every ship as a straight horizontal or vertical line at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, SetupError> {
        let mut occupied = Grid::new();
        let mut footprints = [Grid::new(); NUM_SHIPS];
        for (i, class) in FLEET_CLASSES.iter().enumerate() {
            let len = class.size();
            let mut placed = false;
            for _ in 0..100 {
                let horizontal: bool = rng.random();
                let (max_r, max_c) = if horizontal {
                    (GRID_SIZE - 1, GRID_SIZE - len)
                } else {
                    (GRID_SIZE - len, GRID_SIZE - 1)
                };
                let r = rng.random_range(0..=max_r);
                let c = rng.random_range(0..=max_c);
                let cells = (0..len).map(|k| if horizontal { (r, c + k) } else { (r + k, c) });
                let Ok(candidate) = Grid::from_cells(cells) else {
                    continue;
                };
                if candidate.is_disjoint(&occupied) {
                    occupied |= candidate;
                    footprints[i] = candidate;
                    placed = true;
                    break;
                }
            }
            if !placed {
                return Err(SetupError::UnableToPlace { ship: class.name() });
            }
        }
        Ok(Self::assemble(footprints))
    }

    fn assemble(footprints: [Grid; NUM_SHIPS]) -> Self {
        Self {
            ships: core::array::from_fn(|i| Ship::new(FLEET_CLASSES[i], footprints[i])),
        }
    }

    /// The ship whose footprint contains `pos`, if any.
    pub fn find_target(&self, pos: Position) -> Option<&Ship> {
        self.ships.iter().find(|s| s.contains(pos))
    }

    pub fn find_target_mut(&mut self, pos: Position) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.contains(pos))
    }

    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    pub fn sunk_count(&self) -> usize {
        self.ships.iter().filter(|s| s.is_sunk()).count()
    }

    /// Ships that carry damage but are still afloat.
    pub fn damaged_afloat_count(&self) -> usize {
        self.ships
            .iter()
            .filter(|s| s.is_damaged() && !s.is_sunk())
            .count()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Union of all footprints.
    pub fn occupied(&self) -> Grid {
        self.ships
            .iter()
            .fold(Grid::new(), |acc, s| acc | s.footprint())
    }
}

fn check_size(class: ShipClass, found: usize) -> Result<(), SetupError> {
    if found != class.size() {
        return Err(SetupError::WrongSize {
            ship: class.name(),
            expected: class.size(),
            found,
        });
    }
    Ok(())
}
