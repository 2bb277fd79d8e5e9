//! Error types shared by the board, placement generator, engine and simulator.

use crate::ship::{Position, ShipVariant};

/// Why a single ship placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// At least one cell falls outside the board.
    OutOfBounds,
    /// At least one cell is already occupied by another ship.
    Overlaps,
    /// The ship comes closer to another ship than the spacing rule allows.
    TooClose,
}

impl core::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "ship placement is out of bounds"),
            PlacementError::Overlaps => write!(f, "ship placement overlaps another ship"),
            PlacementError::TooClose => write!(f, "ship placement is too close to another ship"),
        }
    }
}

/// Errors returned by battle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    /// A ship could not be placed where requested.
    InvalidPlacement(PlacementError),
    /// The generator ran out of attempts for one ship.
    PlacementExhausted {
        ship_index: usize,
        variant: ShipVariant,
        attempts: u32,
    },
    /// The position was already fired upon on this board.
    DuplicateShot(Position),
    /// The position lies outside the target board.
    ShotOutOfBounds(Position),
    /// A winner already exists; no further shots are accepted.
    GameOver,
    /// Caller supplied an argument the operation cannot work with.
    InvalidArgument(&'static str),
    /// A restored snapshot violates a board invariant.
    InvalidSnapshot(&'static str),
}

impl From<PlacementError> for BattleError {
    fn from(err: PlacementError) -> Self {
        BattleError::InvalidPlacement(err)
    }
}

impl core::fmt::Display for BattleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BattleError::InvalidPlacement(e) => write!(f, "Invalid placement: {}", e),
            BattleError::PlacementExhausted {
                ship_index,
                variant,
                attempts,
            } => write!(
                f,
                "Unable to place ship #{} ({}) after {} attempts",
                ship_index,
                variant.name(),
                attempts
            ),
            BattleError::DuplicateShot(p) => write!(f, "Position {} was already fired upon", p),
            BattleError::ShotOutOfBounds(p) => write!(f, "Position {} is outside the board", p),
            BattleError::GameOver => write!(f, "The battle is already over"),
            BattleError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            BattleError::InvalidSnapshot(msg) => write!(f, "Invalid snapshot: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}

#[cfg(feature = "std")]
impl std::error::Error for BattleError {}
