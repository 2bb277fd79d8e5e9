use battlesim::{init_logging, run_battle, BattleConfig, DEFAULT_MAX_TURNS};

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [max_turns]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let max_turns: usize = match args.get(2) {
        Some(n) => n.parse()?,
        None => DEFAULT_MAX_TURNS,
    };

    let result = run_battle(&BattleConfig::new(seed), max_turns)?;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
