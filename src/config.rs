use crate::ship::ShipVariant;

pub const DEFAULT_BOARD_SIZE: usize = 10;
/// Upper bound on `width * height` for a single board.
pub const MAX_BOARD_CELLS: usize = 1 << 20;

/// Fleet used when a battle config does not name one: four small, three
/// medium, two large and one xlarge ship.
pub const STANDARD_FLEET: [(ShipVariant, usize); 4] = [
    (ShipVariant::Small, 4),
    (ShipVariant::Medium, 3),
    (ShipVariant::Large, 2),
    (ShipVariant::XLarge, 1),
];

/// Attempts per ship when a whole fleet is generated in one pass.
pub const FLEET_ATTEMPTS_PER_SHIP: u32 = 1000;
/// Attempts per ship when placing next to an already fixed fleet.
pub const INCREMENTAL_ATTEMPTS_PER_SHIP: u32 = 200;

pub const DEFAULT_MIN_DISTANCE: usize = 2;
pub const DEFAULT_QUADRANT_BIAS: f64 = 0.7;

pub const DEFAULT_MAX_TURNS: usize = 500;

// Numerical Recipes LCG parameters.
pub const LCG_MULTIPLIER: u64 = 1_664_525;
pub const LCG_INCREMENT: u64 = 1_013_904_223;
pub const LCG_MODULUS: u64 = 1 << 32;
