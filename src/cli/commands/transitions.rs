//! Transitions command - Show how collisions resolve from a state

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section},
    soccer::{JointAction, Rewards, State, resolve},
};

#[derive(Parser, Debug)]
#[command(about = "List candidate successor states")]
pub struct TransitionsArgs {
    /// State as `a,b,possessor`, e.g. `2,1,B`
    #[arg(long, short = 's', default_value = "2,1,B")]
    pub state: State,

    /// Single joint action as `actor,opponent`; all 25 when omitted
    #[arg(long, short = 'j')]
    pub joint: Option<JointAction>,
}

pub fn execute(args: TransitionsArgs) -> Result<()> {
    let rewards = Rewards::default();
    let joints = match args.joint {
        Some(joint) => vec![joint],
        None => JointAction::all(),
    };

    print_section(&format!("Transitions from {}", args.state));
    for joint in joints {
        let resolution = resolve(&args.state, joint);
        let outcomes: Vec<String> = resolution
            .outcomes
            .iter()
            .map(|next| {
                let reward = rewards.reward_for_a(next);
                if reward == 0.0 {
                    next.to_string()
                } else {
                    format!("{next} (r_A={reward:+})")
                }
            })
            .collect();
        print_kv(
            &joint.to_string(),
            &format!("{:?}: {}", resolution.kind, outcomes.join(" | ")),
        );
    }

    Ok(())
}
