/*!
A buffer for resolution, used to derive an asserting clause from a conflict.

Resolution follows the trail backwards from a clause which is unsatisfiable on the current valuation, resolving on each literal of the conflict level until exactly one literal of the conflict level remains.
That literal is the (first) unique implication point, and the clause derived asserts the negation of the literal once every level above the second highest level of the clause has been cleared.

Rather than storing intermediate clauses, the buffer marks atoms as *seen*:
- A seen atom valued at the conflict level is pending resolution, and is counted.
- A seen atom valued below the conflict level (and above zero) is part of the derived clause.
- Atoms valued at level zero are dropped, as their values are fixed.

As the trail is followed backwards, the next seen atom on the trail is always the next atom to resolve on.

```rust, ignore
let clause = self.resolution_buffer.resolve_to_uip(&conflict, level, &self.atom_db, &self.trail, &self.clause_db)?;
```
*/

use crate::{
    db::{atom::AtomDB, clause::ClauseDB, trail::Trail, ClauseKey, LevelIndex},
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

/// A buffer for use when applying resolution to a sequence of clauses.
#[derive(Default)]
pub struct ResolutionBuffer {
    /// Seen atoms, indexed by atom.
    seen: Vec<bool>,

    /// Every atom seen during the last resolution, in order of sight.
    touched: Vec<Atom>,

    /// The keys of clauses used during the last resolution, excluding the conflict clause.
    premises: Vec<ClauseKey>,
}

impl ResolutionBuffer {
    /// Every atom seen during the last resolution, including those resolved on.
    pub fn touched_atoms(&self) -> &[Atom] {
        &self.touched
    }

    /// The keys of clauses used as premises during the last resolution.
    pub fn premises(&self) -> &[ClauseKey] {
        &self.premises
    }

    /// Resolves `conflict` to the first unique implication point of `level`.
    ///
    /// The derived clause is returned with the asserted literal (the negation of the implication point) at position 0.
    /// The order of the remaining literals is unspecified.
    ///
    /// # Soundness
    /// `conflict` must be unsatisfiable on the current valuation, with at least two literals valued at `level`, and `level` must be the top level of the trail.
    pub fn resolve_to_uip(
        &mut self,
        conflict: &[CLiteral],
        level: LevelIndex,
        atom_db: &AtomDB,
        trail: &Trail,
        clause_db: &ClauseDB,
    ) -> Result<CClause, ErrorKind> {
        self.touched.clear();
        self.premises.clear();
        if self.seen.len() < atom_db.count() {
            self.seen.resize(atom_db.count(), false);
        }

        // Position 0 is reserved for the asserted literal.
        let mut derived: CClause = vec![CLiteral::bottom()];
        let mut pending: usize = 0;
        let mut premise: CClause = conflict.to_vec();
        let mut resolved: Option<Atom> = None;
        let mut trail_index = trail.assignments.len();

        let result = loop {
            for literal in premise.literals() {
                let atom = literal.atom();
                if Some(atom) == resolved || self.seen[atom as usize] {
                    continue;
                }
                match atom_db.level_of(atom) {
                    None | Some(0) => {}
                    Some(literal_level) => {
                        self.seen[atom as usize] = true;
                        self.touched.push(atom);
                        if literal_level >= level {
                            pending += 1;
                        } else {
                            derived.push(*literal);
                        }
                    }
                }
            }

            let pivot = loop {
                match trail_index.checked_sub(1) {
                    Some(index) => {
                        trail_index = index;
                        let candidate = trail.assignments[index];
                        if self.seen[candidate.atom() as usize] {
                            break Some(candidate);
                        }
                    }
                    None => break None,
                }
            };

            let Some(pivot) = pivot else {
                break Err(err::AnalysisError::EmptyResolution.into());
            };

            self.seen[pivot.atom() as usize] = false;
            pending = pending.saturating_sub(1);

            if pending == 0 {
                derived[0] = pivot.negate();
                break Ok(derived);
            }

            let key = match atom_db.source_of(pivot.atom()).and_then(|source| source.reason()) {
                Some(key) => key,
                None => break Err(err::AnalysisError::NoReason(pivot).into()),
            };

            log::trace!(target: targets::ANALYSIS, "Resolve on {pivot} with {key}");
            self.premises.push(key);
            resolved = Some(pivot.atom());
            premise = match clause_db.literals_of(&key) {
                Ok(literals) => literals,
                Err(e) => break Err(e.into()),
            };
        };

        for atom in &self.touched {
            self.seen[*atom as usize] = false;
        }

        result
    }
}
