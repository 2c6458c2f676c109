//! Assumptions
//!
//! # Overview
//!
//! Assumptions are *added* to a context through the [add_assumption](GenericContext::add_assumption) method. \
//! Assumptions are *made* during a solve through the [make_assumptions](GenericContext::make_assumptions) method.
//!
//! Assumptions hold for a single solve only, and are [cleared](GenericContext::clear_assumptions) once the solve ends (whatever the result).
//!
//! All assumptions are made flat, on a single level directly above level zero, and propagation is delayed until every assumption has been made.
//! Levels at or below the level of assumptions are never the target of a restart, and a conflict at or below the level of assumptions shows the assumptions are unsatisfiable together with the formula.
//!
//! If a backjump clears the level of assumptions (e.g. as some unit clause was learnt), the assumptions are made again before the next decision.

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::{
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    types::err::ErrorKind,
};

/// Possible 'Ok' results from making assumptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssumptionOk {
    /// Every assumption is true on the valuation, though consequences of the assumptions may not have been propagated.
    Made,

    /// Some assumption was false on the valuation before the assumption was made.
    Failed(CLiteral),
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Adds an assumption for the next solve.
    ///
    /// The atom of the assumption is added to the context, if not already present.
    pub fn add_assumption(&mut self, assumption: CLiteral) -> Result<(), ErrorKind> {
        self.ensure_atom(assumption.atom())?;
        log::trace!(target: targets::ASSUMPTIONS, "Added {assumption}");
        self.assumptions.push(assumption);
        Ok(())
    }

    /// Makes every added assumption, on a fresh level.
    ///
    /// # Soundness
    /// No decision should have been made, as the level of assumptions is the lowest decision level.
    pub fn make_assumptions(&mut self) -> AssumptionOk {
        self.trail.push_level();
        self.trail.initial_decision_level = self.trail.level();

        for index in 0..self.assumptions.len() {
            let assumption = self.assumptions[index];
            match self.atom_db.value_of_literal(assumption) {
                Some(true) => {}

                Some(false) => {
                    log::debug!(target: targets::ASSUMPTIONS, "Failed {assumption}");
                    return AssumptionOk::Failed(assumption);
                }

                None => {
                    self.assign(assumption, AssignmentSource::Assumption);
                }
            }
        }

        log::trace!(target: targets::ASSUMPTIONS, "Made {} assumptions", self.assumptions.len());
        AssumptionOk::Made
    }

    /// Clears every added assumption.
    ///
    /// The valuation is kept, and so any level of assumptions remains on the trail until the next backjump to level zero.
    pub fn clear_assumptions(&mut self) {
        self.assumptions.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::Config, context::Context};

    use super::AssumptionOk;

    #[test]
    fn failed_on_contradiction() {
        let mut the_context = Context::from_config(Config::default());
        let p = the_context.fresh_or_max_literal();

        assert!(the_context.add_assumption(p).is_ok());
        assert!(the_context.add_assumption(-p).is_ok());

        assert_eq!(the_context.make_assumptions(), AssumptionOk::Failed(-p));

        the_context.clear_assumptions();
        assert!(the_context.assumptions.is_empty());

        the_context.backjump(0);
        assert!(!the_context.trail.assumption_is_made());
        assert_eq!(the_context.trail.level(), 0);
        assert_eq!(the_context.value_of(p), None);
    }
}
