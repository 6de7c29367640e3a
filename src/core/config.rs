/// Rows and columns on the square playing grid.
pub const GRID_SIZE: usize = 5;
/// Number of legal cells.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;
/// Row labels, top to bottom.
pub const ROW_LABELS: [char; GRID_SIZE] = ['A', 'B', 'C', 'D', 'E'];
/// Column labels, left to right.
pub const COL_LABELS: [char; GRID_SIZE] = ['1', '2', '3', '4', '5'];

pub const NUM_SHIPS: usize = 3;

/// The fixed ship classes of a fleet, in setup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipClass {
    Battleship,
    Submarine,
    Destroyer,
}

impl ShipClass {
    pub const fn name(self) -> &'static str {
        match self {
            ShipClass::Battleship => "Battleship",
            ShipClass::Submarine => "Submarine",
            ShipClass::Destroyer => "Destroyer",
        }
    }

    /// Number of cells in the footprint.
    pub const fn size(self) -> usize {
        match self {
            ShipClass::Battleship => 3,
            ShipClass::Submarine => 2,
            ShipClass::Destroyer => 1,
        }
    }
}

pub const FLEET_CLASSES: [ShipClass; NUM_SHIPS] = [
    ShipClass::Battleship,
    ShipClass::Submarine,
    ShipClass::Destroyer,
];
