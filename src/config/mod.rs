/*!
Configuration of a context, and of a solver.

All configuration for a context is contained within a [Config].
Some structures (the databases, the bit-blaster) clone the part of the configuration relevant to them when created.

Each value is a [ConfigOption], which records bounds on the value and the latest [state](crate::context::ContextState) at which the value may be revised.
At present every option is fixed once a context has been created, and so options are set on a config before calling [from_config](crate::context::Context::from_config).

```rust
# use otter_bv::config::Config;
# use otter_bv::context::Context;
let mut config = Config::default();
config.restart.value = false;
assert!(config.polarity_lean.set(0.5));
assert!(!config.polarity_lean.set(2.0));

let context = Context::from_config(config);
```
*/

mod config_option;
pub use config_option::ConfigOption;

pub mod blast;
pub mod dbs;
pub mod vsids;

mod scheduler;
pub use scheduler::Scheduler;

use crate::{
    context::ContextState,
    generic::luby::LubyRepresentation,
};
use blast::BlastConfig;
use dbs::{AtomDBConfig, ClauseDBConfig};
use vsids::VSIDS;

/// Representation for the activity of atoms and clauses.
pub type Activity = f64;

/// Literal block distance, a.k.a 'glue'.
///
/// See [On the Glucose SAT Solver](https://dx.doi.org/10.1142/S0218213018400018) for an overview of LBD.
pub type LBD = u8;

/// Representation for the probability of choosing `true`
pub type PolarityLean = f64;

/// Representation for the probability of making a random decision
pub type RandomDecisionBias = f64;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// Configuration of the atom database.
    pub atom_db: AtomDBConfig,

    /// Configuration of the clause database.
    pub clause_db: ClauseDBConfig,

    /// Configuration of the bit-blaster.
    pub blast: BlastConfig,

    /// The `u` value to multiply the luby sequence by when determining whether to perform a restart.
    pub luby_u: ConfigOption<LubyRepresentation>,

    /// The probability of assigning positive polarity to an atom when freely choosing an atom (without phase saving).
    pub polarity_lean: ConfigOption<PolarityLean>,

    /// The probability of choosing a random atom, rather than the most active atom, when making a decision.
    pub random_decision_bias: ConfigOption<RandomDecisionBias>,

    /// A scheduler for reductions of the clause database.
    pub scheduler: Scheduler,

    /// Default to the last set value of an atom when choosing a value for the atom.
    pub phase_saving: ConfigOption<bool>,

    /// Permit (scheduled) restarts.
    pub restart: ConfigOption<bool>,

    /// The time limit for a solve, with zero read as no limit.
    pub time_limit: ConfigOption<std::time::Duration>,

    /// Which VSIDS variant to use during resolution based analysis.
    pub vsids_variant: ConfigOption<VSIDS>,
}

impl Default for Config {
    /// The default context is (roughly) configured to provide quick, deterministic, results on a library of tests.
    fn default() -> Self {
        Config {
            atom_db: AtomDBConfig::default(),
            clause_db: ClauseDBConfig::default(),
            blast: BlastConfig::default(),

            luby_u: ConfigOption {
                name: "luby",
                min: LubyRepresentation::MIN,
                max: LubyRepresentation::MAX,
                max_state: ContextState::Configuration,
                value: 128,
            },

            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                max_state: ContextState::Configuration,
                value: 0.0,
            },

            random_decision_bias: ConfigOption {
                name: "random_decision_bias",
                min: 0.0,
                max: 1.0,
                max_state: ContextState::Configuration,
                value: 0.0,
            },

            scheduler: Scheduler {
                luby: Some(2),
                conflict: Some(50_000),
            },

            phase_saving: ConfigOption {
                name: "phase_saving",
                min: false,
                max: true,
                max_state: ContextState::Configuration,
                value: true,
            },

            restart: ConfigOption {
                name: "restart",
                min: false,
                max: true,
                max_state: ContextState::Configuration,
                value: true,
            },

            time_limit: ConfigOption {
                name: "time_limit",
                min: std::time::Duration::from_secs(0),
                max: std::time::Duration::MAX,
                max_state: ContextState::Configuration,
                value: std::time::Duration::from_secs(0),
            },

            vsids_variant: ConfigOption {
                name: "vsids",
                min: VSIDS::MIN,
                max: VSIDS::MAX,
                max_state: ContextState::Configuration,
                value: VSIDS::MiniSAT,
            },
        }
    }
}
