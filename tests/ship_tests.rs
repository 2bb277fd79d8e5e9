use battlesim::{
    fits, ship_cells, size_of, Orientation, Position, Ship, ShipPlacement, ShipVariant,
};

#[test]
fn test_variant_sizes() {
    assert_eq!(size_of(ShipVariant::Small), 2);
    assert_eq!(size_of(ShipVariant::Medium), 3);
    assert_eq!(size_of(ShipVariant::Large), 4);
    assert_eq!(size_of(ShipVariant::XLarge), 5);
    for v in ShipVariant::ALL {
        assert_eq!(v.size(), size_of(v));
    }
}

#[test]
fn test_cells_along_axis() {
    let h = ship_cells(Position::new(2, 1), 3, Orientation::Horizontal);
    assert_eq!(
        h,
        vec![Position::new(2, 1), Position::new(3, 1), Position::new(4, 1)]
    );
    let v = ship_cells(Position::new(0, 0), 4, Orientation::Vertical);
    assert_eq!(
        v,
        vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(0, 2),
            Position::new(0, 3)
        ]
    );
}

#[test]
fn test_fits_edges() {
    // exactly touching the right edge
    assert!(fits(Position::new(5, 0), 5, Orientation::Horizontal, 10, 10));
    assert!(!fits(Position::new(6, 0), 5, Orientation::Horizontal, 10, 10));
    assert!(fits(Position::new(9, 8), 2, Orientation::Vertical, 10, 10));
    assert!(!fits(Position::new(9, 9), 2, Orientation::Vertical, 10, 10));
    // anchor itself off the board
    assert!(!fits(Position::new(0, 10), 2, Orientation::Horizontal, 10, 10));
}

#[test]
fn test_contains_matches_cells() {
    let placement = ShipPlacement::new(Position::new(3, 4), ShipVariant::Large, Orientation::Vertical);
    let ship = Ship::new(0, placement);
    for cell in placement.cells() {
        assert!(ship.contains(cell));
    }
    assert!(!ship.contains(Position::new(3, 3)));
    assert!(!ship.contains(Position::new(3, 8)));
    assert!(!ship.contains(Position::new(4, 4)));
}

#[test]
fn test_register_hit_and_destroyed() {
    let placement = ShipPlacement::new(Position::new(1, 1), ShipVariant::Small, Orientation::Horizontal);
    let mut ship = Ship::new(3, placement);
    assert_eq!(ship.id(), 3);
    assert!(!ship.is_destroyed());
    assert!(ship.register_hit(Position::new(1, 1)));
    // same cell again is not double-counted
    assert!(ship.register_hit(Position::new(1, 1)));
    assert_eq!(ship.hit_count(), 1);
    assert!(!ship.is_destroyed());
    // miss
    assert!(!ship.register_hit(Position::new(0, 0)));
    assert!(ship.register_hit(Position::new(2, 1)));
    assert!(ship.is_destroyed());
    assert_eq!(ship.placement(), placement);
}

#[test]
fn test_chebyshev() {
    let a = Position::new(2, 2);
    assert_eq!(a.chebyshev(&Position::new(2, 2)), 0);
    assert_eq!(a.chebyshev(&Position::new(3, 3)), 1);
    assert_eq!(a.chebyshev(&Position::new(0, 5)), 3);
}
