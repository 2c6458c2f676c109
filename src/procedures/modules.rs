/*!
A round of module propagation.

Once boolean constraint propagation reaches a fixpoint, each enabled [module](crate::modules) is asked to [propagate](crate::modules::Module::propagate), in order of registration.

# Inferences

An inference of *l* from reasons *r₁, …, rₙ* by a module enabled by *e* is recorded as the clause *l ∨ ¬r₁ ∨ … ∨ ¬rₙ ∨ ¬e*, which is stored with the inferred literal at position 0 and is the reason for the value of *l*.
- If *l* is already true, the inference is skipped.
- If *l* is false, the clause is a conflict.
- Otherwise, if every reason was valued below the current level, a backjump is made to the highest level of any reason (the inference was 'late'), and then *l* is assigned.

A backjump ends the round immediately, as later inferences may rely on values cleared by the backjump.
Otherwise, the round ends after the first module to make an assignment, so that boolean propagation can be applied before the next module.

# Conflicts

A conflict is stored as a clause, ordered by level with literals of highest level first, and analysed as any other conflict.

# Contract

Each of the following is a [violation](crate::types::err::ModuleError) of the module contract, and ends the solve:
- A conflict clause without the negation of the enable literal, or with some literal which is not false.
- An inference with some reason which is not true.
- An inference or conflict involving an atom which was not declared.
*/

use std::cmp::Reverse;

use crate::{
    context::GenericContext,
    db::ClauseKey,
    misc::log::targets::{self},
    modules::{Inference, ModuleHandle},
    structures::{
        clause::{CClause, ClauseSource},
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

/// Possible 'Ok' results from a round of module propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModuleRoundOk {
    /// No module made an inference which changed the valuation.
    Quiet,

    /// Some literal was assigned, and so boolean propagation should be applied.
    Progress,

    /// A conflict was found, and stored as the clause of the key.
    Conflict(ClauseKey),
}

/// The result of applying a single inference.
enum InferenceOk {
    Skipped,
    Assigned,
    Backjumped,
    Conflict(ClauseKey),
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Asks each enabled module to propagate, and applies any inference made.
    ///
    /// For documentation, see [procedures::modules](crate::procedures::modules).
    pub fn module_round(&mut self) -> Result<ModuleRoundOk, ErrorKind> {
        for index in 0..self.module_db.count() {
            let Some(record) = self.module_db.record_mut(index) else {
                continue;
            };
            let enable = record.enable;
            if self.atom_db.value_of_literal(enable) != Some(true) {
                continue;
            }

            let mut handle = ModuleHandle::new(&self.atom_db, enable);
            let conflict = record.module.propagate(&mut handle);
            let inferences = handle.into_inferences();

            if let Some(conflict) = conflict {
                log::debug!(target: targets::MODULE, "Conflict from module {index}");
                let key = self.store_module_conflict(index, conflict.into_clause())?;
                return Ok(ModuleRoundOk::Conflict(key));
            }

            let mut progress = false;
            for inference in inferences {
                match self.apply_inference(index, inference)? {
                    InferenceOk::Skipped => {}
                    InferenceOk::Assigned => progress = true,
                    InferenceOk::Backjumped => return Ok(ModuleRoundOk::Progress),
                    InferenceOk::Conflict(key) => return Ok(ModuleRoundOk::Conflict(key)),
                }
            }

            if progress {
                return Ok(ModuleRoundOk::Progress);
            }
        }

        Ok(ModuleRoundOk::Quiet)
    }

    /// Checks the conflict clause of the module at `index`, and stores the clause.
    fn store_module_conflict(
        &mut self,
        index: usize,
        mut clause: CClause,
    ) -> Result<ClauseKey, ErrorKind> {
        let record = self.module_db.record(index).ok_or(ErrorKind::InvalidState)?;

        if !clause.contains(&record.enable.negate()) {
            log::error!(target: targets::MODULE, "Module {index} conflict without enable");
            return Err(err::ModuleError::MissingEnable.into());
        }
        for literal in &clause {
            if !record.permits(*literal) {
                return Err(err::ModuleError::UndeclaredConflict(*literal).into());
            }
            if self.atom_db.value_of_literal(*literal) != Some(false) {
                return Err(err::ModuleError::UnfalsifiedConflict(*literal).into());
            }
        }

        clause.sort_unstable();
        clause.dedup();

        let level_of = |literal: &CLiteral| self.atom_db.level_of(literal.atom()).unwrap_or(0);
        if clause.iter().any(|literal| level_of(literal) > 0) {
            clause.retain(|literal| level_of(literal) > 0);
        }
        clause.sort_by_key(|literal| Reverse(level_of(literal)));

        self.counters.module_conflicts += 1;
        let key = self
            .clause_db
            .store(clause, ClauseSource::Module, &self.atom_db, &mut self.watches)?;
        Ok(key)
    }

    /// Checks and applies an inference of the module at `index`.
    fn apply_inference(&mut self, index: usize, inference: Inference) -> Result<InferenceOk, ErrorKind> {
        let Inference { literal, reasons } = inference;
        let record = self.module_db.record(index).ok_or(ErrorKind::InvalidState)?;
        let enable = record.enable;

        if !record.permits(literal) {
            return Err(err::ModuleError::UndeclaredInference(literal).into());
        }
        for reason in &reasons {
            if !record.permits(*reason) {
                return Err(err::ModuleError::UndeclaredInference(*reason).into());
            }
            if self.atom_db.value_of_literal(*reason) != Some(true) {
                return Err(err::ModuleError::UnsupportedInference(*reason).into());
            }
        }

        let value = self.atom_db.value_of_literal(literal);
        if value == Some(true) {
            return Ok(InferenceOk::Skipped);
        }

        let mut others = reasons.iter().map(|reason| reason.negate()).collect::<CClause>();
        others.push(enable.negate());
        others.sort_unstable();
        others.dedup();
        others.retain(|other| *other != literal);
        if others
            .windows(2)
            .any(|pair| pair[0].atom() == pair[1].atom())
            || others.contains(&literal.negate())
        {
            return Err(err::ModuleError::UnsupportedInference(literal).into());
        }

        let level_of = |literal: &CLiteral| self.atom_db.level_of(literal.atom()).unwrap_or(0);
        others.retain(|other| level_of(other) > 0);
        others.sort_by_key(|other| Reverse(level_of(other)));
        let highest = others.first().map(level_of).unwrap_or(0);

        let mut clause = Vec::with_capacity(others.len() + 1);
        clause.push(literal);
        clause.extend(others);

        self.counters.module_inferences += 1;

        match value {
            Some(false) => {
                log::trace!(target: targets::MODULE, "Module {index} inferred false {literal}");
                clause.sort_by_key(|literal| Reverse(level_of(literal)));
                self.counters.module_conflicts += 1;
                let key = self
                    .clause_db
                    .store(clause, ClauseSource::Module, &self.atom_db, &mut self.watches)?;
                Ok(InferenceOk::Conflict(key))
            }

            _ => {
                let late = highest < self.trail.level();
                if late {
                    self.backjump(highest);
                }

                let key = self
                    .clause_db
                    .store(clause, ClauseSource::Module, &self.atom_db, &mut self.watches)?;
                log::trace!(target: targets::MODULE, "Module {index} inferred {literal} by {key}");
                self.assign(literal, AssignmentSource::Module(key));

                match late {
                    true => Ok(InferenceOk::Backjumped),
                    false => Ok(InferenceOk::Assigned),
                }
            }
        }
    }
}
