//! Commonly used types and utilities for ease of import.

pub use crate::{
    generate_fleet, run_battle, BattleConfig, BattleEngine, BattleError, BattleResult,
    BattleSimulator, FleetGenerator, FleetManifest, GameTurn, Instruction, Orientation,
    PlacementOptions, Position, SeededRng, ShipPlacement, ShipVariant, Side, TurnPolicy,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, ui::render_battle, ui::render_summary};
