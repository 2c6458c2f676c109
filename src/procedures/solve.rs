//! Determines the satisfiability of the formula in a context.
//!
//! # Overview
//!
//! A solve alternates between extending the formula and extending the valuation.
//!
//! [apply_consequences](GenericContext::apply_consequences) propagates every clause, and then every enabled [module](crate::modules), until either:
//! - Nothing more follows from the valuation, and so a decision is required (or, if the valuation is complete, the formula is satisfiable).
//! - Some clause is false on the valuation, in which case the conflict is analysed, a clause is learnt, and a [backjump](crate::procedures::backjump) is made to the lowest level on which the learnt clause asserts a literal.
//!   If the conflict does not depend on any decision, the formula is unsatisfiable.
//!
//! A conflict found by a module is analysed in the same way as a conflict found through a clause, as the conflict is first stored as a clause.
//!
//! ```none
//!      +------------------------------------------------+
//!      |                                                |
//!      ⌄                                                |
//!   propagate clauses  <-----+                          |
//!      |                     | on progress              |
//!      ⌄                     |                          |
//!   module round  -----------+                          |
//!      |         \                                      |
//!      | quiet    +--> conflict: analyse, backjump -----+
//!      ⌄                 (unsatisfiable at level zero)  |
//!   make assumptions, or decide  ------------------------+
//!      |
//!      +--> satisfiable, when every atom has a value
//! ```
//!
//! # Assumptions
//!
//! Assumptions [added](GenericContext::add_assumption) to the context are made before the first decision of a solve, and are cleared when the solve ends.
//! If unsatisfiability relies on the assumptions, the context reports unsatisfiable though remains usable for further solves.
//!
//! # Limits
//!
//! At the top of each iteration the configured time limit and the [terminate callback](crate::context::callbacks) are checked, and the solve ends as [Unknown](Report::Unknown) if either fires.
//!
//! # Example
//!
//! ```rust
//! # use otter_bv::config::Config;
//! # use otter_bv::context::Context;
//! # use otter_bv::reports::Report;
//! let mut the_context = Context::from_config(Config::default());
//!
//! let p = the_context.fresh_or_max_literal();
//! let q = the_context.fresh_or_max_literal();
//!
//! assert!(the_context.add_clause(vec![-p, q]).is_ok());
//! assert!(the_context.add_clause(vec![p, -q]).is_ok());
//! assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
//! assert_eq!(the_context.value_of(p), the_context.value_of(q));
//!
//! assert!(the_context.add_assumption(p).is_ok());
//! assert!(the_context.add_assumption(-q).is_ok());
//! assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
//!
//! // Assumptions last a single solve.
//! assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
//!
//! assert!(the_context.add_clause(vec![p]).is_ok());
//! assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
//! assert_eq!(the_context.value_of(q), Some(true));
//! ```

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets::{self},
    procedures::{
        apply_consequences::ApplyConsequencesOk,
        assumptions::AssumptionOk,
        decision::DecisionOk,
    },
    reports::Report,
    structures::consequence::AssignmentSource,
    types::err::ErrorKind,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Determines the satisfiability of the context, together with any assumptions added.
    ///
    /// For documentation, see [procedures::solve](crate::procedures::solve).
    ///
    /// Unsatisfiability is a report, and never an error.
    /// An error is returned only on misuse, e.g. a module breaking the module contract, in which case the context returns to the input state.
    pub fn solve(&mut self) -> Result<Report, ErrorKind> {
        let total_time = std::time::Instant::now();

        let result = self.solve_given(total_time);

        self.counters.time = total_time.elapsed();
        self.clear_assumptions();
        if result.is_err() {
            self.state = ContextState::Input;
        }
        log::info!("Solve: {result:?} in {:?}", self.counters.time);
        result
    }

    fn solve_given(&mut self, total_time: std::time::Instant) -> Result<Report, ErrorKind> {
        if let ContextState::Unsatisfiable(_) = self.state {
            return Ok(Report::Unsatisfiable);
        }

        self.backjump(0);
        self.state = ContextState::Solving;

        'solve_loop: loop {
            self.counters.total_iterations += 1;
            log::trace!("Iteration {}", self.counters.total_iterations);

            let time_limit = self.config.time_limit.value;
            if !time_limit.is_zero() && total_time.elapsed() > time_limit {
                log::debug!("Time limit reached");
                self.state = ContextState::Input;
                return Ok(Report::Unknown);
            }
            if self.check_callback_terminate() {
                log::debug!("Terminated by callback");
                self.state = ContextState::Input;
                return Ok(Report::Unknown);
            }

            match self.apply_consequences()? {
                ApplyConsequencesOk::Fundamental(key) => {
                    self.state = ContextState::Unsatisfiable(key);
                    break 'solve_loop;
                }

                ApplyConsequencesOk::FailedAssumptions => {
                    self.state = ContextState::UnsatisfiableAssumptions;
                    break 'solve_loop;
                }

                ApplyConsequencesOk::ConflictResolved => self.conflict_housekeeping(),

                ApplyConsequencesOk::Exhausted => {
                    if !self.assumptions.is_empty() && !self.trail.assumption_is_made() {
                        match self.make_assumptions() {
                            AssumptionOk::Made => continue 'solve_loop,

                            AssumptionOk::Failed(literal) => {
                                log::debug!(target: targets::ASSUMPTIONS, "Unsatisfiable with {literal}");
                                self.state = ContextState::UnsatisfiableAssumptions;
                                break 'solve_loop;
                            }
                        }
                    }

                    match self.make_decision()? {
                        DecisionOk::Literal(decision) => {
                            self.trail.push_level();
                            self.assign(decision, AssignmentSource::Decision);
                        }

                        DecisionOk::Exhausted => {
                            self.state = ContextState::Satisfiable;
                            break 'solve_loop;
                        }
                    }
                }
            }
        }

        Ok(self.report())
    }
}
