//! Ship definitions and the cell geometry shared by placement and shot
//! resolution.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;

/// A cell on a board. `x` runs along the width, `y` along the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// `max(|dx|, |dy|)` between two cells.
    pub fn chebyshev(&self, other: &Position) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Ship class. The length of each class is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum ShipVariant {
    Small,
    Medium,
    Large,
    XLarge,
}

impl ShipVariant {
    pub const ALL: [ShipVariant; 4] = [
        ShipVariant::Small,
        ShipVariant::Medium,
        ShipVariant::Large,
        ShipVariant::XLarge,
    ];

    /// Number of cells a ship of this class occupies.
    pub const fn size(self) -> usize {
        match self {
            ShipVariant::Small => 2,
            ShipVariant::Medium => 3,
            ShipVariant::Large => 4,
            ShipVariant::XLarge => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipVariant::Small => "small",
            ShipVariant::Medium => "medium",
            ShipVariant::Large => "large",
            ShipVariant::XLarge => "xlarge",
        }
    }
}

/// Free-function form of [`ShipVariant::size`].
pub const fn size_of(variant: ShipVariant) -> usize {
    variant.size()
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Cells covered by a ship of `size` anchored at `position`. Horizontal ships
/// extend along x, vertical ones along y. Nothing wraps around.
pub fn ship_cells(position: Position, size: usize, orientation: Orientation) -> Vec<Position> {
    (0..size)
        .map(|i| match orientation {
            Orientation::Horizontal => Position::new(position.x + i, position.y),
            Orientation::Vertical => Position::new(position.x, position.y + i),
        })
        .collect()
}

/// Whether a ship of `size` anchored at `position` lies inside a
/// `width` x `height` board.
pub fn fits(
    position: Position,
    size: usize,
    orientation: Orientation,
    width: usize,
    height: usize,
) -> bool {
    if size == 0 || position.x >= width || position.y >= height {
        return false;
    }
    match orientation {
        Orientation::Horizontal => position.x + size <= width,
        Orientation::Vertical => position.y + size <= height,
    }
}

/// Where and how a ship sits, without any battle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    pub position: Position,
    pub variant: ShipVariant,
    pub orientation: Orientation,
}

impl ShipPlacement {
    pub const fn new(position: Position, variant: ShipVariant, orientation: Orientation) -> Self {
        Self {
            position,
            variant,
            orientation,
        }
    }

    pub fn size(&self) -> usize {
        self.variant.size()
    }

    pub fn cells(&self) -> Vec<Position> {
        ship_cells(self.position, self.size(), self.orientation)
    }
}

/// A ship placed on a board, with the distinct cells struck so far.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: usize,
    position: Position,
    variant: ShipVariant,
    orientation: Orientation,
    hits: BTreeSet<Position>,
}

impl Ship {
    pub fn new(id: usize, placement: ShipPlacement) -> Self {
        Self {
            id,
            position: placement.position,
            variant: placement.variant,
            orientation: placement.orientation,
            hits: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Anchor cell.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn variant(&self) -> ShipVariant {
        self.variant
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn size(&self) -> usize {
        self.variant.size()
    }

    pub fn placement(&self) -> ShipPlacement {
        ShipPlacement::new(self.position, self.variant, self.orientation)
    }

    pub fn cells(&self) -> Vec<Position> {
        ship_cells(self.position, self.size(), self.orientation)
    }

    /// Whether `pos` is one of this ship's cells.
    pub fn contains(&self, pos: Position) -> bool {
        self.cells().contains(&pos)
    }

    /// Register a strike at `pos`. Returns `true` if `pos` belongs to the
    /// ship; repeated strikes on the same cell are counted once.
    pub fn register_hit(&mut self, pos: Position) -> bool {
        if self.contains(pos) {
            self.hits.insert(pos);
            true
        } else {
            false
        }
    }

    pub fn hits(&self) -> &BTreeSet<Position> {
        &self.hits
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// Every cell has been struck.
    pub fn is_destroyed(&self) -> bool {
        self.hits.len() == self.size()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, variant: \"{}\", anchor: {}, orientation: {:?}, hits: {}/{} }}",
            self.id,
            self.variant.name(),
            self.position,
            self.orientation,
            self.hits.len(),
            self.size(),
        )
    }
}
