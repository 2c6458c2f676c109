/*!
The context: a formula as clauses, a valuation, registered modules, and the state of the most recent solve.

A [GenericContext] is generic over its source of randomness, and a [Context] fixes the source to [MinimalPCG32](crate::generic::random::MinimalPCG32) with a fixed seed.
So, [from_config](Context::from_config) is available on a context without supplying a source of randomness.

A context works over atoms and clauses only.
Bit-vector terms are handled by a [Solver](crate::solver::Solver), which holds a context.

# Example
```rust
# use otter_bv::context::Context;
# use otter_bv::config::Config;
# use otter_bv::reports::Report;
# use otter_bv::structures::literal::{CLiteral, Literal};
let mut the_context = Context::from_config(Config::default());

let p = the_context.fresh_or_max_atom();
let q = the_context.fresh_or_max_atom();

let p_q_clause = vec![CLiteral::new(p, true), CLiteral::new(q, true)];
assert!(the_context.add_clause(p_q_clause).is_ok());

let not_p = CLiteral::new(p, false);

assert!(the_context.add_clause(vec![not_p]).is_ok());
assert_eq!(the_context.solve(), Ok(Report::Satisfiable));

assert_eq!(the_context.atom_db.value_of(p), Some(false));
assert_eq!(the_context.atom_db.value_of(q), Some(true));
```
*/

pub mod callbacks;
mod counters;
pub use counters::Counters;
mod generic;
pub use generic::GenericContext;
mod specific;
pub use specific::Context;

use crate::db::ClauseKey;

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// The context allows for configuration.
    Configuration,

    /// The context allows input.
    Input,

    /// The consistency of the database is unknown.
    Solving,

    /// The database is known to be consistent, e.g. with a complete valuation.
    Satisfiable,

    /// The database is known to be inconsistent, e.g. with an unsatisfiable clause identified.
    Unsatisfiable(ClauseKey),

    /// The database is inconsistent with the assumptions of the last solve.
    /// Unlike [Unsatisfiable](ContextState::Unsatisfiable), a further solve may succeed.
    UnsatisfiableAssumptions,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Input => write!(f, "Input"),
            Self::Solving => write!(f, "Solving"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable(_) => write!(f, "Unsatisfiable"),
            Self::UnsatisfiableAssumptions => write!(f, "Unsatisfiable (assumptions)"),
        }
    }
}
