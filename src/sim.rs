//! Deterministic battle harness: fleet setup, scripted replay and autoplay.
//!
//! A simulator owns one engine and one generator for one battle. Given the
//! same [`BattleConfig`] and the same calls, two simulators produce the same
//! placements, shot history and winner.

use alloc::vec::Vec;
use log::{debug, info, warn};

use crate::{
    common::BattleError,
    config::DEFAULT_BOARD_SIZE,
    game::{BattleEngine, GameTurn, Side, TurnPolicy},
    placement::{FleetGenerator, FleetManifest, PlacementOptions},
    rng::SeededRng,
    ship::{Position, ShipPlacement},
};

/// Everything needed to set up a battle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default, rename_all = "camelCase"))]
pub struct BattleConfig {
    pub seed: u64,
    pub board_width: usize,
    pub board_height: usize,
    /// Used verbatim when present; otherwise the fleet is generated.
    pub player_ships: Option<Vec<ShipPlacement>>,
    pub enemy_ships: Option<Vec<ShipPlacement>>,
    pub manifest: FleetManifest,
    pub placement: PlacementOptions,
    pub turn_policy: TurnPolicy,
    /// Skip the random draw for who fires first.
    pub first_turn: Option<GameTurn>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            board_width: DEFAULT_BOARD_SIZE,
            board_height: DEFAULT_BOARD_SIZE,
            player_ships: None,
            enemy_ships: None,
            manifest: FleetManifest::standard(),
            placement: PlacementOptions::default(),
            turn_policy: TurnPolicy::default(),
            first_turn: None,
        }
    }
}

impl BattleConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    pub fn with_player_ships(mut self, ships: Vec<ShipPlacement>) -> Self {
        self.player_ships = Some(ships);
        self
    }

    pub fn with_enemy_ships(mut self, ships: Vec<ShipPlacement>) -> Self {
        self.enemy_ships = Some(ships);
        self
    }

    pub fn with_manifest(mut self, manifest: FleetManifest) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_placement(mut self, options: PlacementOptions) -> Self {
        self.placement = options;
        self
    }

    pub fn with_turn_policy(mut self, policy: TurnPolicy) -> Self {
        self.turn_policy = policy;
        self
    }

    pub fn with_first_turn(mut self, turn: GameTurn) -> Self {
        self.first_turn = Some(turn);
        self
    }
}

/// One step of a scripted battle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "std",
    serde(tag = "type", content = "data", rename_all = "snake_case")
)]
pub enum Instruction {
    PlaceShip {
        side: Side,
        placement: ShipPlacement,
    },
    FireShot {
        position: Position,
        /// Hand the turn to this side before firing.
        #[cfg_attr(feature = "std", serde(default))]
        shooter: Option<Side>,
    },
}

/// One entry of the shot history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct ShotRecord {
    /// 1-based shot number within the battle.
    pub turn: usize,
    pub shooter: Side,
    pub position: Position,
    pub hit: bool,
    pub ship_id: Option<usize>,
    pub ship_destroyed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetPlacements {
    pub player: Vec<ShipPlacement>,
    pub enemy: Vec<ShipPlacement>,
}

/// Final or intermediate outcome of a battle. A plain snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct BattleResult {
    pub winner: Option<Side>,
    pub total_turns: usize,
    pub player_shots: usize,
    pub enemy_shots: usize,
    pub player_hits: usize,
    pub enemy_hits: usize,
    pub ship_placements: FleetPlacements,
    pub shot_history: Vec<ShotRecord>,
}

/// Per-side aggregates. `shots` and `hits` count what this side fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct SideSummary {
    pub shots: usize,
    pub hits: usize,
    pub ships_remaining: usize,
    pub ships_total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct GameState {
    pub current_turn: GameTurn,
    pub game_over: bool,
    pub winner: Option<Side>,
    pub turn_count: usize,
    pub player: SideSummary,
    pub enemy: SideSummary,
}

pub struct BattleSimulator {
    engine: BattleEngine,
    rng: SeededRng,
    turn_count: usize,
    history: Vec<ShotRecord>,
}

impl BattleSimulator {
    /// Set up both fleets and the opening turn from `config`.
    pub fn new(config: &BattleConfig) -> Result<Self, BattleError> {
        let mut rng = SeededRng::new(config.seed);
        let mut engine = BattleEngine::new(
            config.board_width,
            config.board_height,
            GameTurn::PlayerTurn,
        )?
        .with_turn_policy(config.turn_policy);
        let generator = FleetGenerator::new(config.board_width, config.board_height)
            .with_options(config.placement);

        for side in [Side::Player, Side::Enemy] {
            let supplied = match side {
                Side::Player => config.player_ships.as_ref(),
                Side::Enemy => config.enemy_ships.as_ref(),
            };
            match supplied {
                Some(ships) => {
                    for placement in ships {
                        if !engine.add_ship(side, *placement) {
                            warn!(
                                "supplied {} ship at {} was rejected",
                                side.name(),
                                placement.position
                            );
                        }
                    }
                }
                None => {
                    for placement in generator.generate(&config.manifest, &mut rng)? {
                        let accepted = engine.add_ship(side, placement);
                        debug_assert!(accepted, "generated fleet must be valid");
                    }
                }
            }
        }

        match config.first_turn {
            Some(turn) => engine.set_turn(turn),
            None => engine.set_random_turn(&mut rng),
        }
        info!(
            "battle ready: seed {}, {}x{}, {} vs {} ships, {:?} opens",
            config.seed,
            config.board_width,
            config.board_height,
            engine.board(Side::Player).ships().len(),
            engine.board(Side::Enemy).ships().len(),
            engine.current_turn()
        );

        Ok(Self {
            engine,
            rng,
            turn_count: 0,
            history: Vec::new(),
        })
    }

    /// Read-only access to the engine.
    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    pub fn history(&self) -> &[ShotRecord] {
        &self.history
    }

    fn fire(&mut self, pos: Position) -> Result<ShotRecord, BattleError> {
        let outcome = self.engine.fire(pos)?;
        self.turn_count += 1;
        let record = ShotRecord {
            turn: self.turn_count,
            shooter: outcome.shooter,
            position: outcome.shot.position,
            hit: outcome.shot.hit,
            ship_id: outcome.shot.ship_id,
            ship_destroyed: outcome.ship_destroyed,
        };
        self.history.push(record);
        Ok(record)
    }

    /// Replay a fixed script. Shots after the battle ends are skipped; a
    /// duplicate shot aborts the script with [`BattleError::DuplicateShot`].
    pub fn execute_instructions(
        &mut self,
        instructions: &[Instruction],
    ) -> Result<BattleResult, BattleError> {
        for (i, instruction) in instructions.iter().enumerate() {
            match *instruction {
                Instruction::PlaceShip { side, placement } => {
                    if !self.engine.add_ship(side, placement) {
                        warn!("instruction {}: {} ship rejected", i, side.name());
                    }
                }
                Instruction::FireShot { position, shooter } => {
                    if self.engine.is_game_over() {
                        debug!("instruction {}: battle over, shot skipped", i);
                        continue;
                    }
                    if let Some(side) = shooter {
                        self.engine.set_turn(GameTurn::of(side));
                    }
                    self.fire(position)?;
                }
            }
        }
        Ok(self.result())
    }

    /// Autoplay: each turn fires at a uniformly chosen untouched cell of the
    /// defender's board until the battle ends, `max_turns` shots have been
    /// fired, or the defender has no cells left.
    pub fn simulate_random_battle(&mut self, max_turns: usize) -> Result<BattleResult, BattleError> {
        while !self.engine.is_game_over() && self.turn_count < max_turns {
            let targets = self
                .engine
                .board(self.engine.defender())
                .available_targets();
            if targets.is_empty() {
                debug!("no targets left on {} board", self.engine.defender().name());
                break;
            }
            let pos = *self.rng.next_choice(&targets)?;
            self.fire(pos)?;
        }
        let result = self.result();
        info!(
            "battle finished after {} turns, winner: {:?}",
            result.total_turns, result.winner
        );
        Ok(result)
    }

    fn summary(&self, side: Side) -> SideSummary {
        let own = self.engine.board(side);
        let target = self.engine.board(side.opponent());
        SideSummary {
            shots: target.shots().len(),
            hits: target.hit_count(),
            ships_remaining: own.ships_remaining(),
            ships_total: own.ships().len(),
        }
    }

    pub fn current_game_state(&self) -> GameState {
        GameState {
            current_turn: self.engine.current_turn(),
            game_over: self.engine.is_game_over(),
            winner: self.engine.winner(),
            turn_count: self.turn_count,
            player: self.summary(Side::Player),
            enemy: self.summary(Side::Enemy),
        }
    }

    pub fn result(&self) -> BattleResult {
        let player = self.summary(Side::Player);
        let enemy = self.summary(Side::Enemy);
        BattleResult {
            winner: self.engine.winner(),
            total_turns: self.turn_count,
            player_shots: player.shots,
            enemy_shots: enemy.shots,
            player_hits: player.hits,
            enemy_hits: enemy.hits,
            ship_placements: FleetPlacements {
                player: self.engine.board(Side::Player).placements(),
                enemy: self.engine.board(Side::Enemy).placements(),
            },
            shot_history: self.history.clone(),
        }
    }
}

/// Set up a battle from `config` and autoplay it.
pub fn run_battle(config: &BattleConfig, max_turns: usize) -> Result<BattleResult, BattleError> {
    BattleSimulator::new(config)?.simulate_random_battle(max_turns)
}
