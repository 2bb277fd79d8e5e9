use battlesim::{
    BattleEngine, BattleError, GameTurn, Orientation, Position, SeededRng, Shot, ShipPlacement,
    ShipVariant, Side, TurnPolicy,
};

fn small(x: usize, y: usize, o: Orientation) -> ShipPlacement {
    ShipPlacement::new(Position::new(x, y), ShipVariant::Small, o)
}

/// Player small ship at (0,0) horizontal, enemy small ship at (0,0) vertical.
fn duel() -> BattleEngine {
    let mut engine = BattleEngine::new(10, 10, GameTurn::PlayerTurn).unwrap();
    assert!(engine.add_ship(Side::Player, small(0, 0, Orientation::Horizontal)));
    assert!(engine.add_ship(Side::Enemy, small(0, 0, Orientation::Vertical)));
    engine
}

#[test]
fn test_add_ship_rejects_without_side_effect() {
    let mut engine = duel();
    assert!(!engine.add_ship(Side::Player, small(1, 0, Orientation::Vertical)));
    assert!(!engine.add_ship(Side::Player, small(9, 9, Orientation::Horizontal)));
    assert_eq!(engine.board(Side::Player).ships().len(), 1);
    // the other board is independent
    assert!(engine.add_ship(Side::Enemy, small(1, 0, Orientation::Vertical)));
    assert_eq!(engine.board(Side::Enemy).ships()[1].id(), 1);
}

#[test]
fn test_player_destroys_enemy() -> Result<(), BattleError> {
    let mut engine = duel();
    let first = engine.fire_shot(Side::Enemy, Position::new(0, 0))?;
    assert_eq!(
        first,
        Shot {
            position: Position::new(0, 0),
            hit: true,
            ship_id: Some(0)
        }
    );
    assert!(!engine.is_ship_destroyed(Side::Enemy, 0));
    assert!(!engine.is_game_over());
    assert_eq!(engine.winner(), None);

    engine.fire_shot(Side::Enemy, Position::new(0, 1))?;
    assert!(engine.is_ship_destroyed(Side::Enemy, 0));
    assert!(engine.is_game_over());
    assert_eq!(engine.winner(), Some(Side::Player));
    Ok(())
}

#[test]
fn test_winner_stable_after_game_over() -> Result<(), BattleError> {
    let mut engine = duel();
    engine.fire_shot(Side::Enemy, Position::new(0, 0))?;
    engine.fire_shot(Side::Enemy, Position::new(0, 1))?;
    assert_eq!(
        engine.fire_shot(Side::Player, Position::new(0, 0)),
        Err(BattleError::GameOver)
    );
    assert_eq!(engine.fire(Position::new(5, 5)), Err(BattleError::GameOver));
    assert_eq!(engine.winner(), Some(Side::Player));
    assert!(engine.board(Side::Player).shots().is_empty());
    Ok(())
}

#[test]
fn test_duplicate_shot_leaves_log() -> Result<(), BattleError> {
    let mut engine = duel();
    engine.fire_shot(Side::Player, Position::new(4, 4))?;
    assert_eq!(
        engine.fire_shot(Side::Player, Position::new(4, 4)),
        Err(BattleError::DuplicateShot(Position::new(4, 4)))
    );
    assert_eq!(engine.board(Side::Player).shots().len(), 1);
    Ok(())
}

#[test]
fn test_empty_fleets_never_end() -> Result<(), BattleError> {
    let mut engine = BattleEngine::new(2, 2, GameTurn::PlayerTurn)?;
    engine.fire_shot(Side::Enemy, Position::new(0, 0))?;
    assert!(!engine.is_game_over());
    assert_eq!(engine.winner(), None);
    Ok(())
}

#[test]
fn test_unknown_ship_not_destroyed() {
    let engine = duel();
    assert!(!engine.is_ship_destroyed(Side::Player, 5));
}

#[test]
fn test_fire_alternates_turns() -> Result<(), BattleError> {
    let mut engine = duel();
    assert_eq!(engine.defender(), Side::Enemy);
    let outcome = engine.fire(Position::new(0, 0))?;
    assert_eq!(outcome.shooter, Side::Player);
    assert!(outcome.shot.hit);
    assert!(!outcome.ship_destroyed);
    // a hit does not grant another shot
    assert_eq!(engine.current_turn(), GameTurn::EnemyTurn);
    let outcome = engine.fire(Position::new(9, 9))?;
    assert_eq!(outcome.shooter, Side::Enemy);
    assert_eq!(engine.board(Side::Player).shots().len(), 1);
    assert_eq!(engine.current_turn(), GameTurn::PlayerTurn);
    Ok(())
}

#[test]
fn test_hit_continues_policy() -> Result<(), BattleError> {
    let mut engine = BattleEngine::new(10, 10, GameTurn::PlayerTurn)?
        .with_turn_policy(TurnPolicy::HitContinues);
    assert!(engine.add_ship(Side::Player, small(5, 5, Orientation::Horizontal)));
    assert!(engine.add_ship(
        Side::Enemy,
        ShipPlacement::new(Position::new(0, 0), ShipVariant::Medium, Orientation::Vertical)
    ));
    assert!(engine.add_ship(Side::Enemy, small(5, 5, Orientation::Vertical)));

    engine.fire(Position::new(0, 0))?;
    assert_eq!(engine.current_turn(), GameTurn::PlayerTurn);
    engine.fire(Position::new(0, 1))?;
    assert_eq!(engine.current_turn(), GameTurn::PlayerTurn);
    // destroying hit passes the turn
    let outcome = engine.fire(Position::new(0, 2))?;
    assert!(outcome.ship_destroyed);
    assert_eq!(engine.current_turn(), GameTurn::EnemyTurn);
    // miss passes it back
    engine.fire(Position::new(0, 0))?;
    assert_eq!(engine.current_turn(), GameTurn::PlayerTurn);
    Ok(())
}

#[test]
fn test_turn_controls() {
    let mut engine = duel();
    engine.toggle_turn();
    assert_eq!(engine.current_turn(), GameTurn::EnemyTurn);
    assert_eq!(engine.defender(), Side::Player);
    engine.set_turn(GameTurn::PlayerTurn);
    assert_eq!(engine.current_turn(), GameTurn::PlayerTurn);

    // seed 42 opens with 0.25..., which is below one half
    let mut rng = SeededRng::new(42);
    engine.set_turn(GameTurn::EnemyTurn);
    engine.set_random_turn(&mut rng);
    assert_eq!(engine.current_turn(), GameTurn::PlayerTurn);
}

#[test]
fn test_engine_state_roundtrip() -> Result<(), BattleError> {
    let mut engine = duel().with_turn_policy(TurnPolicy::HitContinues);
    engine.fire(Position::new(0, 0))?;
    engine.fire(Position::new(3, 3))?;
    let state = engine.state();
    let restored = BattleEngine::from_state(state.clone())?;
    assert_eq!(restored.state(), state);
    assert_eq!(restored.current_turn(), engine.current_turn());
    assert_eq!(restored.turn_policy(), TurnPolicy::HitContinues);
    Ok(())
}

#[test]
fn test_turn_helpers() {
    assert_eq!(GameTurn::PlayerTurn.defender(), Side::Enemy);
    assert_eq!(GameTurn::EnemyTurn.shooter(), Side::Enemy);
    assert_eq!(GameTurn::of(Side::Enemy).toggled(), GameTurn::PlayerTurn);
    assert_eq!(Side::Player.opponent(), Side::Enemy);
}
