//! Randomized fleet placement.
//!
//! Each ship is placed by drawing an orientation and an in-bounds anchor from
//! the shared [`SeededRng`] and validating the candidate against a scratch
//! [`Board`], so placement uses exactly the same checks as the engine. Draw
//! order per attempt is fixed: orientation, bias roll (only when biased),
//! then x and y.

use alloc::vec::Vec;
use log::debug;

use crate::board::Board;
use crate::common::BattleError;
use crate::config::{
    DEFAULT_BOARD_SIZE, FLEET_ATTEMPTS_PER_SHIP, INCREMENTAL_ATTEMPTS_PER_SHIP, STANDARD_FLEET,
};
use crate::rng::SeededRng;
use crate::ship::{Orientation, Position, ShipPlacement, ShipVariant};

/// How many ships of each class to place, in placement order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct FleetManifest {
    entries: Vec<(ShipVariant, usize)>,
}

impl FleetManifest {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Four small, three medium, two large and one xlarge ship.
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_FLEET.to_vec(),
        }
    }

    pub fn with(mut self, variant: ShipVariant, count: usize) -> Self {
        self.entries.push((variant, count));
        self
    }

    pub fn entries(&self) -> &[(ShipVariant, usize)] {
        &self.entries
    }

    pub fn ship_count(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Total number of cells the fleet covers.
    pub fn footprint(&self) -> usize {
        self.entries.iter().map(|(v, n)| v.size() * n).sum()
    }

    /// Expand into one variant per ship, in placement order.
    pub fn ships(&self) -> Vec<ShipVariant> {
        let mut ships = Vec::with_capacity(self.ship_count());
        for &(variant, count) in self.entries.iter() {
            for _ in 0..count {
                ships.push(variant);
            }
        }
        ships
    }
}

impl Default for FleetManifest {
    fn default() -> Self {
        Self::standard()
    }
}

/// Tuning for the placement search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default, rename_all = "camelCase"))]
pub struct PlacementOptions {
    /// Attempts per ship before the search gives up (per pass).
    pub max_attempts: u32,
    /// Minimum Chebyshev distance between ships. `None` only forbids overlap.
    pub min_distance: Option<usize>,
    /// When the spacing rule exhausts its attempts, retry the ship with the
    /// overlap-only check before failing.
    pub relax_spacing: bool,
    /// Probability of sampling the anchor inside the ship's assigned
    /// quadrant. `None` samples uniformly.
    pub quadrant_bias: Option<f64>,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            max_attempts: FLEET_ATTEMPTS_PER_SHIP,
            min_distance: None,
            relax_spacing: true,
            quadrant_bias: None,
        }
    }
}

/// Board quadrant a ship's anchor is steered towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Quadrant assigned to the `index`-th ship of a fleet.
    pub fn for_ship(index: usize) -> Self {
        match index % 4 {
            0 => Quadrant::TopLeft,
            1 => Quadrant::TopRight,
            2 => Quadrant::BottomLeft,
            _ => Quadrant::BottomRight,
        }
    }

    /// Inclusive `(x_min, x_max, y_min, y_max)` of the quadrant.
    fn bounds(self, width: usize, height: usize) -> (usize, usize, usize, usize) {
        let mid_x = width / 2;
        let mid_y = height / 2;
        let (x0, x1) = match self {
            Quadrant::TopLeft | Quadrant::BottomLeft => (0, mid_x.saturating_sub(1)),
            Quadrant::TopRight | Quadrant::BottomRight => (mid_x, width - 1),
        };
        let (y0, y1) = match self {
            Quadrant::TopLeft | Quadrant::TopRight => (0, mid_y.saturating_sub(1)),
            Quadrant::BottomLeft | Quadrant::BottomRight => (mid_y, height - 1),
        };
        (x0, x1, y0, y1)
    }
}

/// Generates fleets for a board of fixed dimensions.
#[derive(Debug, Clone, Copy)]
pub struct FleetGenerator {
    width: usize,
    height: usize,
    options: PlacementOptions,
}

impl FleetGenerator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            options: PlacementOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PlacementOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PlacementOptions {
        &self.options
    }

    /// Place every ship of `manifest`, in manifest order.
    pub fn generate(
        &self,
        manifest: &FleetManifest,
        rng: &mut SeededRng,
    ) -> Result<Vec<ShipPlacement>, BattleError> {
        let mut scratch = Board::new(self.width, self.height)?;
        let mut fleet = Vec::with_capacity(manifest.ship_count());
        for (index, variant) in manifest.ships().into_iter().enumerate() {
            let placement = self.place_ship(&scratch, index, variant, self.options.max_attempts, rng)?;
            scratch.add_ship(placement)?;
            fleet.push(placement);
        }
        debug!(
            "generated fleet of {} ships on {}x{} board",
            fleet.len(),
            self.width,
            self.height
        );
        Ok(fleet)
    }

    /// Place one more ship next to an already fixed fleet. Uses the smaller
    /// incremental attempt budget.
    pub fn place_additional(
        &self,
        existing: &[ShipPlacement],
        variant: ShipVariant,
        rng: &mut SeededRng,
    ) -> Result<ShipPlacement, BattleError> {
        let mut scratch = Board::new(self.width, self.height)?;
        for placement in existing {
            scratch.add_ship(*placement)?;
        }
        let attempts = self.options.max_attempts.min(INCREMENTAL_ATTEMPTS_PER_SHIP);
        self.place_ship(&scratch, existing.len(), variant, attempts, rng)
    }

    fn place_ship(
        &self,
        board: &Board,
        index: usize,
        variant: ShipVariant,
        attempts: u32,
        rng: &mut SeededRng,
    ) -> Result<ShipPlacement, BattleError> {
        if let Some(min_distance) = self.options.min_distance {
            if let Some(p) = self.search(board, index, variant, attempts, min_distance, rng) {
                return Ok(p);
            }
            if !self.options.relax_spacing {
                return Err(BattleError::PlacementExhausted {
                    ship_index: index,
                    variant,
                    attempts,
                });
            }
            debug!(
                "ship #{} ({}) exhausted spacing {}, relaxing to overlap-only",
                index,
                variant.name(),
                min_distance
            );
        }
        self.search(board, index, variant, attempts, 0, rng)
            .ok_or(BattleError::PlacementExhausted {
                ship_index: index,
                variant,
                attempts,
            })
    }

    fn search(
        &self,
        board: &Board,
        index: usize,
        variant: ShipVariant,
        attempts: u32,
        min_distance: usize,
        rng: &mut SeededRng,
    ) -> Option<ShipPlacement> {
        for _ in 0..attempts {
            let Some(candidate) = self.candidate(index, variant, rng) else {
                continue;
            };
            if board.check_spacing(&candidate, min_distance).is_ok() {
                return Some(candidate);
            }
        }
        None
    }

    /// Draw one in-bounds candidate, or `None` if the ship does not fit the
    /// drawn orientation at all.
    fn candidate(
        &self,
        index: usize,
        variant: ShipVariant,
        rng: &mut SeededRng,
    ) -> Option<ShipPlacement> {
        let size = variant.size();
        let orientation = if rng.next_bool() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_x, max_y) = match orientation {
            Orientation::Horizontal => (self.width.checked_sub(size)?, self.height - 1),
            Orientation::Vertical => (self.width - 1, self.height.checked_sub(size)?),
        };
        let (mut x0, mut x1, mut y0, mut y1) = (0, max_x, 0, max_y);
        if let Some(bias) = self.options.quadrant_bias {
            if rng.next_chance(bias) {
                let (qx0, qx1, qy0, qy1) = Quadrant::for_ship(index).bounds(self.width, self.height);
                let (bx0, bx1) = (qx0, qx1.min(max_x));
                let (by0, by1) = (qy0, qy1.min(max_y));
                // an empty intersection keeps the uniform range
                if bx0 <= bx1 && by0 <= by1 {
                    (x0, x1, y0, y1) = (bx0, bx1, by0, by1);
                }
            }
        }
        let x = rng.next_int(x0, x1);
        let y = rng.next_int(y0, y1);
        Some(ShipPlacement::new(Position::new(x, y), variant, orientation))
    }
}

impl Default for FleetGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE)
    }
}

/// Generate a fleet with the default options: overlap-only checks, uniform
/// sampling and the full per-ship attempt budget.
pub fn generate_fleet(
    width: usize,
    height: usize,
    manifest: &FleetManifest,
    rng: &mut SeededRng,
) -> Result<Vec<ShipPlacement>, BattleError> {
    FleetGenerator::new(width, height).generate(manifest, rng)
}
