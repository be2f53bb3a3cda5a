use clap::Parser;
use std::path::PathBuf;

use qwirkle::simulation::stats::{bucket_label, score_distribution};
use qwirkle::{
    compute_stats, estimate_win_probability, run_batch, GameState, Policy, PolicyKind,
    SimulationConfig,
};

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
enum Mode {
    /// Self-play batch with aggregate statistics
    Batch,
    /// Win probability after a few opening turns
    WinProb,
}

#[derive(Parser, Debug)]
#[command(name = "qwirkle", version, about = "Qwirkle self-play and win-probability reports")]
struct Args {
    #[arg(long, value_enum, default_value = "batch")]
    mode: Mode,

    /// Number of games to simulate
    #[arg(short = 'g', long, default_value_t = 100)]
    num_games: usize,

    /// Policy for player 1 (greedy, random, weighted[:T], epsilon:E[:base])
    #[arg(long, default_value = "greedy")]
    policy0: PolicyKind,

    /// Policy for player 2
    #[arg(long, default_value = "greedy")]
    policy1: PolicyKind,

    /// Base random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Playouts per estimate
    #[arg(short = 's', long, default_value_t = 200)]
    num_simulations: usize,

    /// Greedy turns played before estimating
    #[arg(long, default_value_t = 6)]
    opening_turns: u32,

    /// JSON file with simulation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the worker count from the config
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Print results as JSON instead of a report
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write rotating log files here instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let _logger = qwirkle::logging::setup_logging("info", args.log_dir.as_deref())?;

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    config.validate()?;
    log::info!("⚙️ {}", config.to_config_string());

    match args.mode {
        Mode::Batch => run_batch_report(&args, &config)?,
        Mode::WinProb => run_win_prob_report(&args, &config)?,
    }

    Ok(())
}

fn run_batch_report(args: &Args, config: &SimulationConfig) -> Result<(), Box<dyn std::error::Error>> {
    let results = run_batch(
        args.num_games,
        [args.policy0.clone(), args.policy1.clone()],
        args.seed,
        config,
    )?;
    let stats = compute_stats(&results);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{} vs {}", args.policy0, args.policy1);
    println!();
    print!("{}", stats);
    println!();
    println!("Score Distribution:");
    for (player, buckets) in score_distribution(&results).iter().enumerate() {
        let line: Vec<String> = buckets
            .iter()
            .map(|(start, count)| format!("{}: {}", bucket_label(*start), count))
            .collect();
        println!("  Player {}: {}", player + 1, line.join(", "));
    }
    Ok(())
}

fn run_win_prob_report(args: &Args, config: &SimulationConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = GameState::new_game(Some(args.seed));
    let mut opener = Policy::Greedy;
    for _ in 0..args.opening_turns {
        match opener.choose_move(&state) {
            Some(mv) => {
                state.apply_move(&mv.placements)?;
            }
            None => break,
        }
        if state.is_over() {
            break;
        }
    }
    log::info!(
        "Position after {} turns: {} - {}",
        state.turn_number() - 1,
        state.score(0),
        state.score(1)
    );

    let viewer = state.current_player();
    let estimate = estimate_win_probability(
        &state,
        viewer,
        args.num_simulations,
        &args.policy0,
        args.seed,
        config,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!("{}", estimate.format_for(viewer));
    }
    Ok(())
}
