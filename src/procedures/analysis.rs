/*!
Analysis of an unsatisfiable clause.

Takes a key to a clause which is unsatisfiable on the current valuation, and either:
- Notes the clause shows the formula is unsatisfiable, as every literal of the clause is false at level zero.
- Notes the clause shows the assumptions of the solve are unsatisfiable, as every literal of the clause is false at or below the level of assumptions.
- Backjumps to a valuation on which some clause is asserting, and assigns the asserted literal.

If exactly one literal of the clause has the highest level, the clause itself is asserting after a backjump (the consequence was 'missed', e.g. as a module reported the conflict late).
Otherwise, resolution is applied using the clauses used to (eventually) make the observation of a conflict given decisions made, and the derived clause is added to the clause database.

For details on resolution, see the [resolution buffer](crate::resolution_buffer).

For the method, see: [resolve_conflict](GenericContext::resolve_conflict).

# Example

```rust, ignore
match self.resolve_conflict(key)? {
    ConflictOk::Resolved => continue,
    ConflictOk::Fundamental(key) => return Ok(Fundamental(key)),
    ConflictOk::FailedAssumptions => return Ok(FailedAssumptions),
}
```
*/

use crate::{
    config::vsids::VSIDS,
    context::GenericContext,
    db::{ClauseKey, LevelIndex},
    misc::log::targets::{self},
    structures::{
        clause::ClauseSource,
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

/// Possible 'Ok' results from resolving a conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictOk {
    /// Some clause was asserting after a backjump, and the asserted literal has been assigned.
    Resolved,

    /// The conflict is at level zero, and so the formula is unsatisfiable.
    Fundamental(ClauseKey),

    /// The conflict is at or below the level of assumptions, and so the formula together with the assumptions is unsatisfiable.
    FailedAssumptions,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Resolves the conflict observed with the clause of `key`.
    ///
    /// For documentation, see [procedures::analysis](crate::procedures::analysis).
    pub fn resolve_conflict(&mut self, key: ClauseKey) -> Result<ConflictOk, ErrorKind> {
        self.counters.total_conflicts += 1;
        self.counters.fresh_conflicts += 1;
        self.counters.conflicts_since_reduction += 1;

        let conflict = self.clause_db.literals_of(&key)?;
        let top = self.top_level_of(&conflict);
        log::trace!(target: targets::ANALYSIS, "Conflict {key} at level {top}");

        if top == 0 {
            log::debug!(target: targets::ANALYSIS, "Fundamental conflict: {key}");
            return Ok(ConflictOk::Fundamental(key));
        }
        if top <= self.trail.lowest_decision_level() {
            log::debug!(target: targets::ANALYSIS, "Conflict on assumptions: {key}");
            return Ok(ConflictOk::FailedAssumptions);
        }

        if top < self.trail.level() {
            self.backjump(top);
        }

        self.clause_db.bump_activity(&key);

        let at_top = conflict
            .iter()
            .filter(|literal| self.atom_db.level_of(literal.atom()) == Some(top))
            .copied()
            .collect::<Vec<_>>();

        match at_top.as_slice() {
            [asserted] => self.assert_missed(key, &conflict, *asserted),

            _ => self.assert_learnt(&conflict, top),
        }
    }

    /// The highest level of any literal of `clause`, with literals lacking a value read as level zero.
    fn top_level_of(&self, clause: &[CLiteral]) -> LevelIndex {
        clause
            .iter()
            .filter_map(|literal| self.atom_db.level_of(literal.atom()))
            .max()
            .unwrap_or(0)
    }

    /// Backjumps to the level at which the clause of `key` asserts `asserted`, and assigns `asserted`.
    fn assert_missed(
        &mut self,
        key: ClauseKey,
        conflict: &[CLiteral],
        asserted: CLiteral,
    ) -> Result<ConflictOk, ErrorKind> {
        let target = self.backjump_level(&conflict);

        let watcher = conflict
            .iter()
            .filter(|literal| **literal != asserted)
            .max_by_key(|literal| self.atom_db.level_of(literal.atom()).unwrap_or(0))
            .copied();

        if let (Some(watcher), ClauseKey::Original(_) | ClauseKey::Addition(_, _)) = (watcher, key) {
            self.rewatch(key, asserted, watcher)?;
        }

        log::trace!(target: targets::ANALYSIS, "Missed assertion of {asserted} at {target} by {key}");
        self.backjump(target);
        self.assign(asserted, AssignmentSource::BCP(key));
        Ok(ConflictOk::Resolved)
    }

    /// Places `asserted` and `watcher` at positions 0 and 1 of the (long) clause of `key`, and watches either if not watched before.
    ///
    /// Watches of literals moved from positions 0 and 1 are dropped lazily, during BCP.
    fn rewatch(
        &mut self,
        key: ClauseKey,
        asserted: CLiteral,
        watcher: CLiteral,
    ) -> Result<(), ErrorKind> {
        let clause = self.clause_db.get_mut(&key)?;
        let previous = [clause[0], clause[1]];

        if let Some(position) = clause.iter().position(|literal| *literal == asserted) {
            clause.swap(0, position);
        }
        if let Some(position) = clause.iter().skip(1).position(|literal| *literal == watcher) {
            clause.swap(1, position + 1);
        }

        for literal in [clause[0], clause[1]] {
            if !previous.contains(&literal) {
                self.watches.watch_long(literal, key);
            }
        }
        Ok(())
    }

    /// Derives an asserting clause by resolution, stores the clause, backjumps, and assigns the asserted literal.
    fn assert_learnt(&mut self, conflict: &[CLiteral], top: LevelIndex) -> Result<ConflictOk, ErrorKind> {
        let mut learnt = self.resolution_buffer.resolve_to_uip(
            conflict,
            top,
            &self.atom_db,
            &self.trail,
            &self.clause_db,
        )?;

        match self.config.vsids_variant.value {
            VSIDS::MiniSAT => self
                .atom_db
                .bump_relative(self.resolution_buffer.touched_atoms().iter().copied()),

            VSIDS::Chaff => self
                .atom_db
                .bump_relative(learnt.iter().map(|literal| literal.atom())),
        }

        for premise in self.resolution_buffer.premises() {
            self.clause_db.bump_activity(premise);
        }
        self.clause_db.decay_activity();

        // The literal of highest level (after the asserted literal) is watched.
        let watcher = learnt
            .iter()
            .enumerate()
            .skip(1)
            .max_by_key(|(_, literal)| self.atom_db.level_of(literal.atom()).unwrap_or(0))
            .map(|(position, _)| position);
        if let Some(position) = watcher {
            learnt.swap(1, position);
        }

        let target = self.backjump_level(&learnt);
        let asserted = match learnt.first() {
            Some(literal) => *literal,
            None => return Err(err::AnalysisError::EmptyResolution.into()),
        };

        // Stored prior to the backjump, so the LBD of the clause is taken from the conflict valuation.
        let key = self.clause_db.store(
            learnt,
            ClauseSource::Resolution,
            &self.atom_db,
            &mut self.watches,
        )?;

        log::trace!(target: targets::ANALYSIS, "Learnt {key}, asserting {asserted} at {target}");
        self.backjump(target);
        self.assign(asserted, AssignmentSource::BCP(key));
        Ok(ConflictOk::Resolved)
    }
}
