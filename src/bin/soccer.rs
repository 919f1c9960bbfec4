//! Grid soccer CLI - multi-agent Q-learning experiments
//!
//! This CLI provides a unified interface for:
//! - Training Q-learning, Friend-Q, Foe-Q and Correlated-Q on grid soccer
//! - Inspecting collision resolution of the transition model
//! - Checking the equilibrium solvers on a stage game

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "soccer")]
#[command(version, about = "Multi-agent Q-learning on grid soccer", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a learner and record benchmark convergence
    Train(grid_soccer::cli::commands::train::TrainArgs),

    /// Show candidate successor states for a state
    Transitions(grid_soccer::cli::commands::transitions::TransitionsArgs),

    /// Solve minimax and correlated equilibrium of a stage game
    Solve(grid_soccer::cli::commands::solve::SolveArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Train(args) => grid_soccer::cli::commands::train::execute(args),
        Commands::Transitions(args) => grid_soccer::cli::commands::transitions::execute(args),
        Commands::Solve(args) => grid_soccer::cli::commands::solve::execute(args),
    }
}
