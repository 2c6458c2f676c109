/*!
Applies queued consequences.

For an overview of [apply_consequences](GenericContext::apply_consequences) within a solve, see the documentation of the [solve procedure](crate::procedures::solve).

Roughly, apply_consequences implements an instance of the operator which:

- Returns *unsatisfiable*, if it is not possible to apply the consequence relation.
- Returns the same formula, if there are no further consequences to apply (and so a decision is required).
- Backjumps to a different valuation, if the formula entails some formula with an additional clause.

- A return of *unsatisfiable* is represented as [Fundamental](ApplyConsequencesOk::Fundamental), or [FailedAssumptions](ApplyConsequencesOk::FailedAssumptions) if unsatisfiability relies on the assumptions of the solve.
- A return of a new clause is represented as [ConflictResolved](ApplyConsequencesOk::ConflictResolved), with the asserted literal of the clause assigned.
- No change is represented by a return of [Exhausted](ApplyConsequencesOk::Exhausted).
  + It is up to a caller of apply_consequences to note whether the background valuation is complete.

The following invariant is upheld:
<div class="warning">
apply_consequences returns the same formula only if there are no further consequences to apply, from either the clause database or an enabled module.
</div>

# Overview

At a high level [apply_consequences](GenericContext::apply_consequences) sequences a handful of more basic procedures in a loop:
- Take a queued consequence.
- Apply boolean constraint propagation with respect to the consequence.
- If no conflict is found, continue.
- Otherwise, resolve the conflict and return.
- Once the queue is empty, ask enabled modules to propagate, and continue if some module assigned a literal.

```rust,ignore
loop {
    while let Some(literal) = self.trail.next_in_queue() {
        if let Err(err::BCPError::Conflict(key)) = self.bcp(literal) {
            return self.resolve_conflict(key);
        }
    }

    match self.module_round()? {
        ModuleRoundOk::Quiet => return Ok(Exhausted),
        ModuleRoundOk::Progress => continue,
        ModuleRoundOk::Conflict(key) => return self.resolve_conflict(key),
    }
}
```

# Missed propagations

In some situations the opportunity to propagate a consequence may be 'missed' --- a module may infer a literal, or report a conflict, some levels after the reasons were valued.
In this case, analysis [backjumps](crate::procedures::backjump) to the level at which the clause would have been asserting, and applies the assertion there.
So, missed propagations are returned to and their consequences applied before any further decision.
*/

use crate::{
    context::GenericContext,
    db::ClauseKey,
    procedures::{analysis::ConflictOk, modules::ModuleRoundOk},
    types::err::{self, ErrorKind},
};

/// Ok results of [apply_consequences](GenericContext::apply_consequences).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyConsequencesOk {
    /// There were no (further) consequences to apply.
    Exhausted,

    /// A conflict was found and resolved, and the literal asserted as a result has been assigned (though not propagated).
    ConflictResolved,

    /// A conflict was found at level zero, and so the formula is unsatisfiable.
    Fundamental(ClauseKey),

    /// A conflict was found at or below the level of assumptions.
    FailedAssumptions,
}

impl From<ConflictOk> for ApplyConsequencesOk {
    fn from(value: ConflictOk) -> Self {
        match value {
            ConflictOk::Resolved => Self::ConflictResolved,
            ConflictOk::Fundamental(key) => Self::Fundamental(key),
            ConflictOk::FailedAssumptions => Self::FailedAssumptions,
        }
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Applies queued consequences.
    /// See [procedures::apply_consequences](crate::procedures::apply_consequences) for details.
    ///
    /// apply_consequences applies BCP to queued assignments, and then a round of module propagation, until either a conflict is found or no further consequence follows.
    pub fn apply_consequences(&mut self) -> Result<ApplyConsequencesOk, ErrorKind> {
        loop {
            while let Some(literal) = self.trail.next_in_queue() {
                match self.bcp(literal) {
                    Ok(()) => {}

                    Err(err::BCPError::Conflict(key)) => {
                        return Ok(self.resolve_conflict(key)?.into());
                    }

                    Err(non_conflict_bcp_error) => return Err(non_conflict_bcp_error.into()),
                }
            }

            match self.module_round()? {
                ModuleRoundOk::Quiet => return Ok(ApplyConsequencesOk::Exhausted),

                ModuleRoundOk::Progress => continue,

                ModuleRoundOk::Conflict(key) => return Ok(self.resolve_conflict(key)?.into()),
            }
        }
    }
}
