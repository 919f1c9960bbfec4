//! Solve command - Equilibria of a uniform stage game

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_matrix, print_section, print_subsection},
    equilibrium::{correlated_equilibrium, minimax, transpose},
    q_learning::JointValues,
    soccer::State,
};

#[derive(Parser, Debug)]
#[command(about = "Solve minimax and correlated equilibrium at a state")]
pub struct SolveArgs {
    /// State as `a,b,possessor`, e.g. `2,1,B`
    #[arg(long, short = 's', default_value = "2,1,B")]
    pub state: State,

    /// Value of every untouched table entry
    #[arg(long, default_value_t = 1.0)]
    pub default_value: f64,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let table = JointValues::new(args.default_value);
    let payoff_a = table.matrix(&args.state);
    let payoff_b = table.matrix(&args.state);

    print_section(&format!("Stage game at {}", args.state));
    print_matrix(&payoff_a);

    let security_a = minimax(&payoff_a).ok_or_else(|| anyhow!("minimax LP did not solve"))?;
    let security_b =
        minimax(&transpose(&payoff_b)).ok_or_else(|| anyhow!("minimax LP did not solve"))?;
    print_subsection("Minimax");
    print_kv("Value (A)", &format!("{:.6}", security_a.value));
    print_kv("Value (B)", &format!("{:.6}", security_b.value));
    print_kv(
        "Policy (A)",
        &security_a
            .policy
            .iter()
            .map(|p| format!("{p:.3}"))
            .collect::<Vec<_>>()
            .join(" "),
    );

    let correlated = correlated_equilibrium(&payoff_a, &payoff_b)
        .ok_or_else(|| anyhow!("correlated equilibrium LP did not solve"))?;
    print_subsection("Correlated equilibrium");
    print_kv("Value (A)", &format!("{:.6}", correlated.values.0));
    print_kv("Value (B)", &format!("{:.6}", correlated.values.1));
    print_kv(
        "Max violation",
        &format!("{:.2e}", correlated.max_violation(&payoff_a, &payoff_b)),
    );
    println!();
    print_matrix(&correlated.distribution);

    Ok(())
}
