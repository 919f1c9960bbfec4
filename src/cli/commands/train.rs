//! Train command - Run one learner and record benchmark convergence

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, RunConfig},
    cli::output::{format_number, print_kv, print_section, print_subsection},
    export::ConvergenceCsvObserver,
    pipeline::{LoggingObserver, ProgressObserver, TrainingResult},
    q_learning::Algorithm,
    soccer::State,
};

#[derive(Parser, Debug)]
#[command(about = "Train a learner on grid soccer", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Update rule to train
    #[arg(value_enum)]
    pub algorithm: Algorithm,

    /// Total number of environment steps
    #[arg(long, short = 'n')]
    pub steps: Option<u64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// CSV file receiving one `step,difference` row per benchmark update
    #[arg(long, short = 'o', default_value = "output.csv")]
    pub output: PathBuf,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// JSON run configuration; explicit flags override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Initial learning rate α₀
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Learning rate decay coefficient
    #[arg(long)]
    pub decay: Option<f64>,

    /// Lower bound on the learning rate
    #[arg(long)]
    pub alpha_floor: Option<f64>,

    /// Discount factor γ
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Episode start state as `a,b,possessor`, e.g. `2,1,B`
    #[arg(long)]
    pub start_state: Option<State>,

    /// Hide the progress bar and log periodic progress instead
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl TrainArgs {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn run_config(&self) -> Result<RunConfig> {
        let mut run = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(steps) = self.steps {
            run.training.steps = steps;
        }
        if let Some(seed) = self.seed {
            run.training.seed = Some(seed);
        }
        if let Some(state) = self.start_state {
            run.training.start_state = state;
        }

        let mut learner = run.learner_for(self.algorithm);
        if let Some(alpha) = self.alpha {
            learner = learner.with_initial_alpha(alpha);
        }
        if let Some(decay) = self.decay {
            learner = learner.with_decay(decay);
        }
        if let Some(floor) = self.alpha_floor {
            learner = learner.with_alpha_floor(floor);
        }
        if let Some(gamma) = self.gamma {
            learner = learner.with_gamma(gamma);
        }
        run.learner = Some(learner);

        Ok(run)
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let run = args.run_config()?;
    let app = App::new();
    let (mut learner, pipeline) = app
        .create_run(args.algorithm, &run)
        .context("invalid training configuration")?;

    let csv = ConvergenceCsvObserver::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut pipeline = pipeline.with_observer(Box::new(csv));
    pipeline = if args.no_progress {
        pipeline.with_observer(Box::new(LoggingObserver::new(run.training.log_interval)))
    } else {
        pipeline.with_observer(Box::new(ProgressObserver::new()))
    };

    let result = pipeline
        .run(learner.as_mut())
        .with_context(|| format!("{} training failed", args.algorithm))?;

    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
    }

    print_report(&result);
    print_kv("Convergence CSV", &args.output.display().to_string());
    if let Some(path) = &args.summary {
        print_kv("Summary JSON", &path.display().to_string());
    }

    Ok(())
}

fn print_report(result: &TrainingResult) {
    print_section(&format!("{} training", result.algorithm));
    print_kv("Seed", &result.seed.to_string());
    print_kv("Steps", &format_number(result.steps));
    print_kv("Episodes", &format_number(result.episodes));
    print_kv(
        "Goals (A / B)",
        &format!(
            "{} / {}",
            format_number(result.goals_a),
            format_number(result.goals_b)
        ),
    );
    print_kv("Final benchmark Q", &format!("{:.6}", result.final_benchmark_value));
    print_kv("Final α", &format!("{:.6}", result.final_learning_rate));
    print_kv("Table entries", &result.table_size.to_string());

    let summary = &result.summary;
    print_subsection("Benchmark convergence");
    print_kv("Updates", &format_number(summary.count as u64));
    print_kv("Max difference", &format!("{:.6}", summary.max));
    print_kv("Mean difference", &format!("{:.6}", summary.mean));
    print_kv(
        &format!("First {} mean", summary.window),
        &format!("{:.6}", summary.first_window_mean),
    );
    print_kv(
        &format!("Last {} mean", summary.window),
        &format!("{:.6}", summary.last_window_mean),
    );
    print_kv(
        "Converging",
        if summary.is_converging() { "yes" } else { "no" },
    );
}
