//! Two-board battle engine: turn order, shot resolution and the winner.

use log::{debug, info, trace};

use crate::{
    board::{Board, BoardState, Shot},
    common::BattleError,
    rng::SeededRng,
    ship::{Position, ShipPlacement},
};

/// Owner of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Enemy => "enemy",
        }
    }
}

/// Whose turn it is to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum GameTurn {
    PlayerTurn,
    EnemyTurn,
}

impl GameTurn {
    /// Turn in which `side` fires.
    pub fn of(side: Side) -> Self {
        match side {
            Side::Player => GameTurn::PlayerTurn,
            Side::Enemy => GameTurn::EnemyTurn,
        }
    }

    pub fn shooter(self) -> Side {
        match self {
            GameTurn::PlayerTurn => Side::Player,
            GameTurn::EnemyTurn => Side::Enemy,
        }
    }

    /// Side whose board is fired upon during this turn.
    pub fn defender(self) -> Side {
        self.shooter().opponent()
    }

    pub fn toggled(self) -> Self {
        GameTurn::of(self.defender())
    }
}

/// Rule deciding who fires next after a resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub enum TurnPolicy {
    /// The turn passes after every shot.
    #[default]
    Alternate,
    /// A hit that leaves its ship afloat keeps the turn; a miss or a
    /// destroying hit passes it.
    HitContinues,
}

impl TurnPolicy {
    pub fn next_turn(self, current: GameTurn, shot: &Shot, destroyed: bool) -> GameTurn {
        match self {
            TurnPolicy::Alternate => current.toggled(),
            TurnPolicy::HitContinues if shot.hit && !destroyed => current,
            TurnPolicy::HitContinues => current.toggled(),
        }
    }
}

/// Result of [`BattleEngine::fire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotOutcome {
    pub shooter: Side,
    pub shot: Shot,
    /// The shot sank the ship it hit.
    pub ship_destroyed: bool,
}

/// Serializable engine state for mirroring or saving a battle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct EngineState {
    pub player: BoardState,
    pub enemy: BoardState,
    pub current_turn: GameTurn,
    pub turn_policy: TurnPolicy,
}

/// Two boards, the turn and the rules that tie them together. One engine
/// serves exactly one battle.
pub struct BattleEngine {
    player: Board,
    enemy: Board,
    current_turn: GameTurn,
    turn_policy: TurnPolicy,
}

impl BattleEngine {
    /// Create an engine with two empty `width` x `height` boards.
    pub fn new(width: usize, height: usize, first_turn: GameTurn) -> Result<Self, BattleError> {
        Ok(Self {
            player: Board::new(width, height)?,
            enemy: Board::new(width, height)?,
            current_turn: first_turn,
            turn_policy: TurnPolicy::default(),
        })
    }

    pub fn with_turn_policy(mut self, policy: TurnPolicy) -> Self {
        self.turn_policy = policy;
        self
    }

    pub fn turn_policy(&self) -> TurnPolicy {
        self.turn_policy
    }

    /// Immutable view of one side's board.
    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn board_mut(&mut self, side: Side) -> &mut Board {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Place a ship on `side`'s board. Returns whether it was accepted; a
    /// refused ship leaves the board untouched.
    pub fn add_ship(&mut self, side: Side, placement: ShipPlacement) -> bool {
        match self.board_mut(side).add_ship(placement) {
            Ok(id) => {
                debug!(
                    "{} ship #{} ({}) placed at {} {:?}",
                    side.name(),
                    id,
                    placement.variant.name(),
                    placement.position,
                    placement.orientation
                );
                true
            }
            Err(e) => {
                debug!("{} ship rejected at {}: {}", side.name(), placement.position, e);
                false
            }
        }
    }

    /// Resolve a shot against `side`'s board without touching the turn.
    pub fn fire_shot(&mut self, side: Side, pos: Position) -> Result<Shot, BattleError> {
        if self.is_game_over() {
            return Err(BattleError::GameOver);
        }
        let shot = self.board_mut(side).fire_shot(pos)?;
        trace!(
            "shot at {} board {}: {}",
            side.name(),
            pos,
            if shot.hit { "hit" } else { "miss" }
        );
        if self.is_game_over() {
            info!("battle over, winner: {:?}", self.winner());
        }
        Ok(shot)
    }

    /// Fire at the current defender and advance the turn per the policy.
    pub fn fire(&mut self, pos: Position) -> Result<ShotOutcome, BattleError> {
        let shooter = self.current_turn.shooter();
        let defender = shooter.opponent();
        let shot = self.fire_shot(defender, pos)?;
        let ship_destroyed = shot
            .ship_id
            .map(|id| self.is_ship_destroyed(defender, id))
            .unwrap_or(false);
        self.current_turn = self
            .turn_policy
            .next_turn(self.current_turn, &shot, ship_destroyed);
        Ok(ShotOutcome {
            shooter,
            shot,
            ship_destroyed,
        })
    }

    pub fn is_ship_destroyed(&self, side: Side, ship_id: usize) -> bool {
        self.board(side).is_ship_destroyed(ship_id)
    }

    pub fn is_game_over(&self) -> bool {
        self.player.all_destroyed() || self.enemy.all_destroyed()
    }

    /// The side whose fleet survived. `None` while the battle is running, or
    /// if both fleets went down together.
    pub fn winner(&self) -> Option<Side> {
        match (self.player.all_destroyed(), self.enemy.all_destroyed()) {
            (false, true) => Some(Side::Player),
            (true, false) => Some(Side::Enemy),
            _ => None,
        }
    }

    pub fn current_turn(&self) -> GameTurn {
        self.current_turn
    }

    /// Side whose board the next shot from [`BattleEngine::fire`] targets.
    pub fn defender(&self) -> Side {
        self.current_turn.defender()
    }

    pub fn toggle_turn(&mut self) {
        self.current_turn = self.current_turn.toggled();
    }

    pub fn set_turn(&mut self, turn: GameTurn) {
        self.current_turn = turn;
    }

    /// Pick the turn with a single boolean draw.
    pub fn set_random_turn(&mut self, rng: &mut SeededRng) {
        self.current_turn = if rng.next_bool() {
            GameTurn::PlayerTurn
        } else {
            GameTurn::EnemyTurn
        };
    }

    /// Generate a serializable snapshot of the current state.
    pub fn state(&self) -> EngineState {
        EngineState {
            player: self.player.state(),
            enemy: self.enemy.state(),
            current_turn: self.current_turn,
            turn_policy: self.turn_policy,
        }
    }

    /// Restore an engine from a previously saved state.
    pub fn from_state(state: EngineState) -> Result<Self, BattleError> {
        Ok(Self {
            player: Board::from_state(state.player)?,
            enemy: Board::from_state(state.enemy)?,
            current_turn: state.current_turn,
            turn_policy: state.turn_policy,
        })
    }
}
