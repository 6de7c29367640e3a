//! Outcomes, wire tokens and state labels shared by defender and attacker.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Classified result of resolving one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Valid, never-tried position holding only water.
    Miss,
    /// Malformed or repeated position. Indistinguishable from a miss on the wire.
    Invalid,
    /// A ship was damaged and is still afloat.
    Hit,
    /// A ship sank while others remain.
    ShipSunk,
    /// The last floating ship sank.
    FleetDestroyed,
}

impl Outcome {
    /// Legacy wire token for this outcome.
    pub fn token(self) -> &'static str {
        ResponseCode::from(self).token()
    }
}

/// The four legacy response codes. Every transport carries these verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseCode {
    /// `404-failed`: water, malformed or repeat attack.
    Failed,
    /// `202-shocked`: ship damaged, still afloat.
    Shocked,
    /// `200-sunken`: one ship destroyed, others remain.
    Sunken,
    /// `500-sunken`: last ship destroyed, game over.
    FleetSunken,
}

impl ResponseCode {
    pub const ALL: [ResponseCode; 4] = [
        ResponseCode::Failed,
        ResponseCode::Shocked,
        ResponseCode::Sunken,
        ResponseCode::FleetSunken,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ResponseCode::Failed => "404-failed",
            ResponseCode::Shocked => "202-shocked",
            ResponseCode::Sunken => "200-sunken",
            ResponseCode::FleetSunken => "500-sunken",
        }
    }

    /// Human-readable description of the code.
    pub fn message(self) -> &'static str {
        match self {
            ResponseCode::Failed => "Miss - Water!",
            ResponseCode::Shocked => "Hit!",
            ResponseCode::Sunken => "Ship Sunk!",
            ResponseCode::FleetSunken => "Last Ship Sunk - Fleet Destroyed!",
        }
    }

    pub fn is_hit(self) -> bool {
        !matches!(self, ResponseCode::Failed)
    }

    pub fn is_sunk(self) -> bool {
        matches!(self, ResponseCode::Sunken | ResponseCode::FleetSunken)
    }

    pub fn is_game_over(self) -> bool {
        matches!(self, ResponseCode::FleetSunken)
    }
}

impl From<Outcome> for ResponseCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Miss | Outcome::Invalid => ResponseCode::Failed,
            Outcome::Hit => ResponseCode::Shocked,
            Outcome::ShipSunk => ResponseCode::Sunken,
            Outcome::FleetDestroyed => ResponseCode::FleetSunken,
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A token that is not one of the four legacy codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown response token {0:?}")]
pub struct UnknownToken(pub String);

impl FromStr for ResponseCode {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        ResponseCode::ALL
            .into_iter()
            .find(|code| code.token() == token)
            .ok_or_else(|| UnknownToken(token.to_string()))
    }
}

/// Lifecycle of a defending fleet. Ordering follows the only legal
/// direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleState {
    /// No ship has ever been hit.
    Intact,
    /// At least one ship damaged, none sunk.
    Damaged,
    /// At least one ship sunk, at least one afloat.
    PartiallySunk,
    /// Every ship sunk. Terminal.
    Destroyed,
}

impl BattleState {
    /// Short state code used in status reports.
    pub fn code(self) -> &'static str {
        match self {
            BattleState::Intact => "q1",
            BattleState::Damaged => "q2",
            BattleState::PartiallySunk => "q3",
            BattleState::Destroyed => "q4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BattleState::Intact => "intact",
            BattleState::Damaged => "damaged",
            BattleState::PartiallySunk => "ships-sunk",
            BattleState::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for BattleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.code())
    }
}

/// Display symbol for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    #[default]
    Unknown,
    Miss,
    Hit,
    Sunk,
}

impl Symbol {
    pub fn glyph(self) -> char {
        match self {
            Symbol::Unknown => '~',
            Symbol::Miss => 'O',
            Symbol::Hit => 'X',
            Symbol::Sunk => '#',
        }
    }
}

impl From<ResponseCode> for Symbol {
    fn from(code: ResponseCode) -> Self {
        match code {
            ResponseCode::Failed => Symbol::Miss,
            ResponseCode::Shocked => Symbol::Hit,
            ResponseCode::Sunken | ResponseCode::FleetSunken => Symbol::Sunk,
        }
    }
}

/// Returned when attacking a fleet that is already destroyed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("game {game_id:?} is already over")]
pub struct GameOver {
    pub game_id: String,
}
