//! Q-value tables for grid soccer
//!
//! Four update rules share the same backup shape
//!
//! ```text
//! Q(s, x) <- (1 - α) Q(s, x) + α [r + γ V(s')]
//! ```
//!
//! and differ in what `x` is and how the successor value `V(s')` is derived.
//!
//! | Table | Keyed on | V(s') |
//! |-------|----------|-------|
//! | [`QTable`] | own action | max over own actions |
//! | [`FriendQTable`] | joint action | max over joint actions |
//! | [`FoeQTable`] | joint action | A's maximin value |
//! | [`CorrelatedQTable`] | joint action, one table per player | utilitarian CE values |
//!
//! Every table owns a [`LearningRate`] that advances once per update.
//!
//! ```no_run
//! use grid_soccer::q_learning::{DecayKind, FoeQTable, LearningRate};
//!
//! let table = FoeQTable::new(
//!     0.9, // discount_factor
//!     1.0, // q_init
//!     LearningRate::new(0.2, 1e-5, 0.001, DecayKind::Hyperbolic),
//!     1.0, // fallback_value
//! );
//! ```

pub mod correlated;
pub mod default_map;
pub mod foe;
pub mod friend;
pub mod joint_values;
pub mod q_table;
pub mod schedule;

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use correlated::CorrelatedQTable;
pub use default_map::DefaultMap;
pub use foe::FoeQTable;
pub use friend::FriendQTable;
pub use joint_values::JointValues;
pub use q_table::QTable;
pub use schedule::{DecayKind, LearningRate};

use crate::Error;

/// Which update rule a learner implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    QLearning,
    FriendQ,
    FoeQ,
    CorrelatedQ,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::QLearning,
        Algorithm::FriendQ,
        Algorithm::FoeQ,
        Algorithm::CorrelatedQ,
    ];

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::QLearning => "Q-learning",
            Algorithm::FriendQ => "Friend-Q",
            Algorithm::FoeQ => "Foe-Q",
            Algorithm::CorrelatedQ => "Correlated-Q",
        }
    }

    /// Command-line identifier
    pub fn key(&self) -> &'static str {
        match self {
            Algorithm::QLearning => "q-learning",
            Algorithm::FriendQ => "friend-q",
            Algorithm::FoeQ => "foe-q",
            Algorithm::CorrelatedQ => "correlated-q",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| {
                algorithm.key() == normalized || algorithm.label().to_ascii_lowercase() == normalized
            })
            .ok_or_else(|| Error::ParseAlgorithm {
                input: s.to_string(),
                expected: Algorithm::ALL.map(|a| a.key()).join(", "),
            })
    }
}
