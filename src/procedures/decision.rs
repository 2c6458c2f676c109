/*!
Choosing a literal to decide on.

A decision values some atom *a* with *v*, and is represented as the literal on *a* with polarity *v*.

The source of a decision is, in order:
1. The first enabled [module](crate::modules) (in order of registration) to return a literal without a value.
   A literal on an atom the module did not declare breaks the module contract, and ends the solve.
2. Otherwise, an atom without a value, taken at random with probability [random_decision_bias](crate::config::Config::random_decision_bias) and otherwise the most active atom on the activity heap of the [atom database](crate::db::atom).

The heap holds *at least* every atom without a value, and so popping from the heap may pass over atoms with a value before some atom is found.

With [phase saving](crate::config::Config::phase_saving) the polarity of a heuristic decision is the last value of the atom, and otherwise polarity is chosen at random with [polarity_lean](crate::config::Config::polarity_lean).
Every atom has a previous value from creation, and so phase saving never needs a fallback.
*/

use rand::{seq::IteratorRandom, Rng};

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets::{self},
    modules::ModuleHandle,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        valuation::Valuation,
    },
    types::err::{self, ErrorKind},
};

/// Possible 'Ok' results from choosing a literal to decide on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionOk {
    /// A decision on the literal, which has no value.
    Literal(CLiteral),

    /// Every atom has a value, and so the valuation is complete.
    Exhausted,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Chooses a literal to decide on.
    ///
    /// The literal is not assigned, and so the caller opens a level and assigns the literal.
    ///
    /// ```rust, ignore
    /// match self.make_decision()? {
    ///     DecisionOk::Literal(literal) => {
    ///         self.trail.push_level();
    ///         self.assign(literal, AssignmentSource::Decision);
    ///     }
    ///     DecisionOk::Exhausted => break,
    /// }
    /// ```
    pub fn make_decision(&mut self) -> Result<DecisionOk, ErrorKind> {
        if let Some(literal) = self.module_decision()? {
            self.counters.total_decisions += 1;
            log::trace!(target: targets::MODULE, "Module decision {literal}");
            return Ok(DecisionOk::Literal(literal));
        }

        match self.heuristic_decision() {
            Some(literal) => {
                self.counters.total_decisions += 1;
                log::trace!("Decision {literal}");
                Ok(DecisionOk::Literal(literal))
            }
            None => {
                self.state = ContextState::Satisfiable;
                Ok(DecisionOk::Exhausted)
            }
        }
    }

    fn module_decision(&mut self) -> Result<Option<CLiteral>, ErrorKind> {
        for index in 0..self.module_db.count() {
            let Some(record) = self.module_db.record_mut(index) else {
                continue;
            };
            if self.atom_db.value_of_literal(record.enable) != Some(true) {
                continue;
            }

            let handle = ModuleHandle::new(&self.atom_db, record.enable);
            let Some(literal) = record.module.decide(&handle) else {
                continue;
            };
            if !record.permits(literal) {
                log::error!(target: targets::MODULE, "Module {index} decided on undeclared {literal}");
                return Err(err::ModuleError::UndeclaredDecision(literal).into());
            }
            if self.atom_db.value_of(literal.atom()).is_none() {
                return Ok(Some(literal));
            }
        }
        Ok(None)
    }

    fn heuristic_decision(&mut self) -> Option<CLiteral> {
        // The rng is taken for the duration of the search, as the search borrows the context.
        let mut rng = std::mem::take(&mut self.rng);
        let atom = self.atom_without_value(&mut rng);
        self.rng = rng;

        let atom = atom?;
        let polarity = match self.config.phase_saving.value {
            true => self.atom_db.previous_value_of(atom),
            false => self.rng.random_bool(self.config.polarity_lean.value),
        };
        Some(CLiteral::new(atom, polarity))
    }

    /// Some atom without a value, if any, chosen at random or by activity.
    pub fn atom_without_value(&mut self, rng: &mut impl Rng) -> Option<Atom> {
        if rng.random_bool(self.config.random_decision_bias.value) {
            return self.atom_db.valuation().unvalued_atoms().choose(rng);
        }
        while let Some(atom) = self.atom_db.heap_pop_most_active() {
            if self.atom_db.value_of(atom).is_none() {
                return Some(atom);
            }
        }
        self.atom_db.valuation().unvalued_atoms().next()
    }

    /// Clears every decision (and consequence of a decision), keeping any assumptions made.
    pub fn clear_decisions(&mut self) {
        self.state = ContextState::Input;
        self.backjump(self.trail.lowest_decision_level());
    }
}
