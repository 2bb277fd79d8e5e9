//! One side's board: ship placements, the occupancy grid and the shot log.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{BattleError, PlacementError};
use crate::config::MAX_BOARD_CELLS;
use crate::ship::{Position, Ship, ShipPlacement};

/// A resolved shot. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct Shot {
    pub position: Position,
    pub hit: bool,
    pub ship_id: Option<usize>,
}

/// Serializable board state for syncing or saving a battle in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub width: usize,
    pub height: usize,
    pub ships: Vec<Ship>,
    pub shots: Vec<Shot>,
}

pub struct Board {
    width: usize,
    height: usize,
    ships: Vec<Ship>,
    shots: Vec<Shot>,
    // ship id per cell, row-major
    occupancy: Vec<Option<usize>>,
    fired: Vec<bool>,
}

impl Board {
    /// Create an empty `width` x `height` board.
    pub fn new(width: usize, height: usize) -> Result<Self, BattleError> {
        if width == 0 || height == 0 {
            return Err(BattleError::InvalidArgument(
                "board dimensions must be at least 1x1",
            ));
        }
        let cells = width
            .checked_mul(height)
            .filter(|&n| n <= MAX_BOARD_CELLS)
            .ok_or(BattleError::InvalidArgument("board dimensions are too large"))?;
        Ok(Board {
            width,
            height,
            ships: Vec::new(),
            shots: Vec::new(),
            occupancy: vec![None; cells],
            fired: vec![false; cells],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Ships in id order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: usize) -> Option<&Ship> {
        self.ships.get(id)
    }

    /// Shots in the order they were fired.
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn placements(&self) -> Vec<ShipPlacement> {
        self.ships.iter().map(Ship::placement).collect()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> usize {
        pos.y * self.width + pos.x
    }

    /// Id of the ship covering `pos`, if any.
    pub fn ship_at(&self, pos: Position) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.occupancy[self.index(pos)]
    }

    /// Whether `pos` has already been fired upon.
    pub fn is_shot(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.fired[self.index(pos)]
    }

    /// Check bounds and overlap for `placement` without placing it.
    pub fn check_placement(&self, placement: &ShipPlacement) -> Result<(), PlacementError> {
        if !crate::ship::fits(
            placement.position,
            placement.size(),
            placement.orientation,
            self.width,
            self.height,
        ) {
            return Err(PlacementError::OutOfBounds);
        }
        if placement
            .cells()
            .into_iter()
            .any(|cell| self.occupancy[self.index(cell)].is_some())
        {
            return Err(PlacementError::Overlaps);
        }
        Ok(())
    }

    /// Like [`Board::check_placement`], and additionally require every cell
    /// of the new ship to be at Chebyshev distance `>= min_distance` from
    /// every occupied cell.
    pub fn check_spacing(
        &self,
        placement: &ShipPlacement,
        min_distance: usize,
    ) -> Result<(), PlacementError> {
        self.check_placement(placement)?;
        if min_distance <= 1 {
            return Ok(());
        }
        let reach = min_distance - 1;
        for cell in placement.cells() {
            let x0 = cell.x.saturating_sub(reach);
            let y0 = cell.y.saturating_sub(reach);
            let x1 = (cell.x + reach).min(self.width - 1);
            let y1 = (cell.y + reach).min(self.height - 1);
            for y in y0..=y1 {
                for x in x0..=x1 {
                    if self.occupancy[y * self.width + x].is_some() {
                        return Err(PlacementError::TooClose);
                    }
                }
            }
        }
        Ok(())
    }

    /// Place a ship, assigning it the next sequential id. A refused
    /// placement leaves the board untouched.
    pub fn add_ship(&mut self, placement: ShipPlacement) -> Result<usize, PlacementError> {
        self.check_placement(&placement)?;
        let id = self.ships.len();
        for cell in placement.cells() {
            let idx = self.index(cell);
            self.occupancy[idx] = Some(id);
        }
        self.ships.push(Ship::new(id, placement));
        Ok(id)
    }

    /// Resolve a shot at `pos` and append it to the shot log.
    pub fn fire_shot(&mut self, pos: Position) -> Result<Shot, BattleError> {
        if !self.in_bounds(pos) {
            return Err(BattleError::ShotOutOfBounds(pos));
        }
        let idx = self.index(pos);
        if self.fired[idx] {
            return Err(BattleError::DuplicateShot(pos));
        }
        let mut shot = Shot {
            position: pos,
            hit: false,
            ship_id: None,
        };
        if let Some(id) = self.occupancy[idx] {
            self.ships[id].register_hit(pos);
            shot.hit = true;
            shot.ship_id = Some(id);
        }
        self.fired[idx] = true;
        self.shots.push(shot);
        Ok(shot)
    }

    /// `false` for an unknown id.
    pub fn is_ship_destroyed(&self, id: usize) -> bool {
        self.ships.get(id).map(Ship::is_destroyed).unwrap_or(false)
    }

    /// At least one ship, and every ship destroyed.
    pub fn all_destroyed(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_destroyed)
    }

    pub fn ships_remaining(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_destroyed()).count()
    }

    pub fn hit_count(&self) -> usize {
        self.shots.iter().filter(|s| s.hit).count()
    }

    /// Cells not yet fired upon, row by row.
    pub fn available_targets(&self) -> Vec<Position> {
        let mut cells = Vec::with_capacity(self.fired.len() - self.shots.len());
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.fired[y * self.width + x] {
                    cells.push(Position::new(x, y));
                }
            }
        }
        cells
    }

    pub fn state(&self) -> BoardState {
        BoardState::from(self)
    }

    /// Rebuild a board by re-placing the ships and replaying the shot log.
    /// The replayed outcome must match the snapshot exactly.
    pub fn from_state(state: BoardState) -> Result<Self, BattleError> {
        let mut board = Board::new(state.width, state.height)?;
        for (i, ship) in state.ships.iter().enumerate() {
            if ship.id() != i {
                return Err(BattleError::InvalidSnapshot("ship ids are not sequential"));
            }
            board
                .add_ship(ship.placement())
                .map_err(|_| BattleError::InvalidSnapshot("ship placements conflict"))?;
        }
        for shot in state.shots.iter() {
            let replayed = board
                .fire_shot(shot.position)
                .map_err(|_| BattleError::InvalidSnapshot("shot log is not replayable"))?;
            if replayed != *shot {
                return Err(BattleError::InvalidSnapshot("shot outcome does not match"));
            }
        }
        if board.ships != state.ships {
            return Err(BattleError::InvalidSnapshot("ship hits do not match shot log"));
        }
        Ok(board)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {}x{},\n  ships: {:?},\n  shots: {}\n}}",
            self.width,
            self.height,
            self.ships,
            self.shots.len()
        )
    }
}

impl From<&Board> for BoardState {
    fn from(b: &Board) -> Self {
        BoardState {
            width: b.width,
            height: b.height,
            ships: b.ships.clone(),
            shots: b.shots.clone(),
        }
    }
}
