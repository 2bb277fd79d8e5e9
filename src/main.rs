#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battlesim::{
    init_logging, run_battle, ui, BattleConfig, BattleResult, BattleSimulator, Board,
    FleetGenerator, FleetManifest, Instruction, PlacementOptions, SeededRng, Side, TurnPolicy,
    DEFAULT_BOARD_SIZE, DEFAULT_MAX_TURNS,
};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::Rng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum PolicyArg {
    Alternate,
    HitContinues,
}

#[cfg(feature = "std")]
impl From<PolicyArg> for TurnPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Alternate => TurnPolicy::Alternate,
            PolicyArg::HitContinues => TurnPolicy::HitContinues,
        }
    }
}

#[derive(clap::Args, Clone, Debug)]
#[cfg(feature = "std")]
struct BoardArgs {
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    width: usize,
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    height: usize,
    /// Keep ships this far apart (Chebyshev distance); relaxed if the board is too crowded.
    #[arg(long, num_args = 0..=1, default_missing_value = "2")]
    min_distance: Option<usize>,
    /// Probability of steering each ship into its own quadrant.
    #[arg(long, num_args = 0..=1, default_missing_value = "0.7")]
    quadrant_bias: Option<f64>,
}

#[cfg(feature = "std")]
impl BoardArgs {
    fn placement(&self) -> PlacementOptions {
        PlacementOptions {
            min_distance: self.min_distance,
            quadrant_bias: self.quadrant_bias,
            ..PlacementOptions::default()
        }
    }
}

#[derive(clap::Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Autoplay one battle between two uniform-random shooters.
    Simulate {
        #[arg(long, help = "Fix RNG seed for reproducible battles (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
        max_turns: usize,
        #[arg(long, value_enum, default_value_t = PolicyArg::Alternate)]
        policy: PolicyArg,
        #[command(flatten)]
        board: BoardArgs,
        /// Print the full result as JSON instead of the boards.
        #[arg(long)]
        json: bool,
    },
    /// Replay a JSON script of the form {"config": {...}, "instructions": [...]}.
    Replay { script: std::path::PathBuf },
    /// Generate and show a single fleet.
    Fleet {
        #[arg(long, help = "Fix RNG seed for reproducible fleets (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[command(flatten)]
        board: BoardArgs,
    },
    /// Run many independent battles in parallel and report win rates.
    Batch {
        #[arg(long, default_value_t = 1000)]
        runs: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
        max_turns: usize,
        #[arg(long, value_enum, default_value_t = PolicyArg::Alternate)]
        policy: PolicyArg,
        #[command(flatten)]
        board: BoardArgs,
    },
}

#[derive(serde::Deserialize)]
#[cfg(feature = "std")]
struct ReplayScript {
    #[serde(default)]
    config: BattleConfig,
    instructions: Vec<Instruction>,
}

#[cfg(feature = "std")]
fn seed_or_random(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().random())
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            seed,
            max_turns,
            policy,
            board,
            json,
        } => {
            let seed = seed_or_random(seed);
            let config = BattleConfig::new(seed)
                .with_board(board.width, board.height)
                .with_placement(board.placement())
                .with_turn_policy(policy.into());
            let mut sim = BattleSimulator::new(&config)?;
            let result = sim.simulate_random_battle(max_turns)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Seed: {} (pass --seed {} to replay)", seed, seed);
                print!("{}", ui::render_battle(sim.engine(), true));
                print!("{}", ui::render_summary(&result));
            }
        }
        Commands::Replay { script } => {
            let text = std::fs::read_to_string(&script)?;
            let script: ReplayScript = serde_json::from_str(&text)?;
            let mut sim = BattleSimulator::new(&script.config)?;
            let result = sim.execute_instructions(&script.instructions)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Fleet { seed, board } => {
            let seed = seed_or_random(seed);
            let mut rng = SeededRng::new(seed);
            let fleet = FleetGenerator::new(board.width, board.height)
                .with_options(board.placement())
                .generate(&FleetManifest::standard(), &mut rng)?;
            let mut grid = Board::new(board.width, board.height)?;
            for placement in fleet.iter() {
                let id = grid.add_ship(*placement)?;
                println!(
                    "#{:<2} {:<6} at {} {:?}",
                    id,
                    placement.variant.name(),
                    placement.position,
                    placement.orientation
                );
            }
            print!("{}", ui::render_board(&grid, true));
        }
        Commands::Batch {
            runs,
            seed,
            max_turns,
            policy,
            board,
        } => {
            let stats = run_batch(runs, seed, max_turns, policy.into(), &board).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

#[derive(serde::Serialize, Default)]
#[serde(rename_all = "camelCase")]
#[cfg(feature = "std")]
struct BatchStats {
    runs: usize,
    player_wins: usize,
    enemy_wins: usize,
    unfinished: usize,
    average_turns: f64,
}

#[cfg(feature = "std")]
async fn run_batch(
    runs: usize,
    seed: u64,
    max_turns: usize,
    policy: TurnPolicy,
    board: &BoardArgs,
) -> anyhow::Result<BatchStats> {
    let base = BattleConfig::default()
        .with_board(board.width, board.height)
        .with_placement(board.placement())
        .with_turn_policy(policy);

    // every battle owns its own simulator, so runs need no coordination
    let mut handles = Vec::with_capacity(runs);
    for i in 0..runs {
        let mut config = base.clone();
        config.seed = seed.wrapping_add(i as u64);
        handles.push(tokio::task::spawn_blocking(move || {
            run_battle(&config, max_turns)
        }));
    }

    let mut stats = BatchStats {
        runs,
        ..BatchStats::default()
    };
    let mut total_turns = 0usize;
    for handle in handles {
        let result: BattleResult = handle.await??;
        total_turns += result.total_turns;
        match result.winner {
            Some(Side::Player) => stats.player_wins += 1,
            Some(Side::Enemy) => stats.enemy_wins += 1,
            None => stats.unfinished += 1,
        }
    }
    if runs > 0 {
        stats.average_turns = total_turns as f64 / runs as f64;
    }
    Ok(stats)
}

#[cfg(all(feature = "std", test))]
mod tests {
    use super::*;
    use battlesim::{DEFAULT_MIN_DISTANCE, DEFAULT_QUADRANT_BIAS};

    #[test]
    fn cli_parses_simulate_flags() {
        let cli = Cli::parse_from([
            "battlesim",
            "simulate",
            "--seed",
            "7",
            "--policy",
            "hit-continues",
            "--min-distance",
            "--json",
        ]);
        match cli.command {
            Commands::Simulate {
                seed,
                policy,
                board,
                json,
                ..
            } => {
                assert_eq!(seed, Some(7));
                assert!(matches!(policy, PolicyArg::HitContinues));
                assert_eq!(board.min_distance, Some(DEFAULT_MIN_DISTANCE));
                assert_eq!(board.quadrant_bias, None);
                assert!(json);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn default_bias_matches_config() {
        let cli = Cli::parse_from(["battlesim", "fleet", "--quadrant-bias"]);
        match cli.command {
            Commands::Fleet { board, .. } => {
                assert_eq!(board.quadrant_bias, Some(DEFAULT_QUADRANT_BIAS));
            }
            _ => panic!("expected fleet"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn batch_counts_every_run() -> anyhow::Result<()> {
        let board = BoardArgs {
            width: 10,
            height: 10,
            min_distance: None,
            quadrant_bias: None,
        };
        let stats = run_batch(8, 3, DEFAULT_MAX_TURNS, TurnPolicy::Alternate, &board).await?;
        assert_eq!(stats.runs, 8);
        assert_eq!(stats.player_wins + stats.enemy_wins + stats.unfinished, 8);
        assert!(stats.average_turns > 0.0);
        Ok(())
    }
}
