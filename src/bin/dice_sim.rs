//! Elimination dice simulator.
//!
//! Plays seeded games with every player rolling and ending their turn, then
//! prints turn counts, eliminations and the rolled-face distribution.
//!
//! ## Usage
//! ```bash
//! cargo run --release --bin dice-sim -- --players 5 --dice 5 --games 1000
//! RUST_LOG=parlor=debug cargo run --bin dice-sim -- --seed 7
//! ```

use clap::Parser;
use parlor::games::dice::DieFace;
use parlor::sim::{self, SimConfig};
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "dice-sim", about = "Simulate elimination dice games")]
struct Args {
    /// Players at the table
    #[arg(short, long, default_value_t = 5)]
    players: usize,

    /// Dice each player starts with
    #[arg(short, long, default_value_t = 5)]
    dice: u32,

    /// Seed of the first game; later games use the following seeds
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    games: u32,

    /// Abandon a game after this many turns
    #[arg(long, default_value_t = 10_000)]
    max_turns: u32,

    /// Print every report as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = SimConfig {
        players: args.players,
        starting_dice: args.dice,
        max_turns: args.max_turns,
    };

    let (reports, summary) = match sim::run(&config, args.seed, args.games) {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "simulation failed");
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if let [report] = reports.as_slice() {
        println!("Seed {}", report.seed);
        println!("Total turns: {}", report.turns);
        for player in sim::seat_names(config.players) {
            let turns = report.turns_per_player.get(&player).copied().unwrap_or(0);
            println!("  {player}: {turns} turns");
        }
        let order: Vec<String> = report.eliminations.iter().map(ToString::to_string).collect();
        println!("Eliminated: {}", order.join(", "));
        match &report.winner {
            Some(winner) => println!("Winner: {winner}"),
            None if report.outcome.is_some() => println!("No survivors"),
            None => println!("Unfinished after {} turns", report.turns),
        }
    } else {
        println!("Games: {} ({} unfinished)", summary.games, summary.unfinished);
        println!("Mean turns: {:.1}, longest: {}", summary.mean_turns(), summary.longest);
        for player in sim::seat_names(config.players) {
            let wins = summary.wins.get(&player).copied().unwrap_or(0);
            println!("  {player}: {wins} wins");
        }
    }

    let faces = if let [report] = reports.as_slice() {
        &report.faces
    } else {
        &summary.faces
    };
    let rolled: u64 = faces.values().sum();
    println!("Face distribution ({rolled} dice):");
    for face in DieFace::ALL {
        let count = faces.get(&face).copied().unwrap_or(0);
        let share = if rolled == 0 {
            0.0
        } else {
            100.0 * count as f64 / rolled as f64
        };
        println!("  {face:?}: {count} ({share:.1}%)");
    }

    Ok(())
}
