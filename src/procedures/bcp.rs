/*!
A context method to aid boolean constraint propagation

See [GenericContext::bcp] for the relevant context method.

# Overview
Propagates an atom being assigned some value, given as a literal.

This is done by examining clauses watching the atom with the opposite polarity and updating the watches of the clause, if possible, assigning the consequence of an asserting clause, or identifying that the clause conflicts with the current valuation.

# Complications

The long watch list of interest is [taken](crate::db::watches::Watches::take_long) from the watch database for the duration of propagation, and [restored](crate::db::watches::Watches::restore_long) after.
This avoids a mutable borrow of the watch list conflicting with a mutable borrow of the watch database when a clause is watched by some other literal.

Watches are revised lazily, so a key on the list may be:
- Stale, as the clause has been removed during a reduction.
- Of a clause whose literals at positions 0 and 1 no longer include the negation of the assigned literal.

In either case the watch is dropped from the list.

# Heuristics

Propagation happens in two steps, distinguished by clauses length:
- First, with respect to binary clauses.
- Second, with respect to long clauses.

Binary clauses do not require accessing the clause database, and the other literal of the clause is stored with the watch.

# Example

bcp is a mutating method, and a typical application will match against the result of the mutation.

```rust,ignore
while let Some(literal) = self.trail.next_in_queue() {
    match self.bcp(literal) {
        Ok(()) => {}
        Err(err::BCPError::Conflict(key)) => match self.resolve_conflict(key)? { ... },
        Err(e) => return Err(e.into()),
    }
}
```
*/

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::{
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// For documentation see [procedures::bcp](crate::procedures::bcp).
    ///
    /// # Soundness
    /// The implementation of BCP requires the literals at positions 0 and 1 of a long clause are the watched literals of the clause.
    pub fn bcp(&mut self, literal: CLiteral) -> Result<(), err::BCPError> {
        let falsified = literal.negate();

        // Binary clauses.
        let binary_count = self.watches.binary_count(literal);
        for index in 0..binary_count {
            let Some(watch) = self.watches.binary_at(literal, index) else {
                return Err(err::BCPError::CorruptWatch);
            };

            match self.atom_db.value_of_literal(watch.literal) {
                Some(true) => {}

                None => {
                    self.assign(watch.literal, AssignmentSource::BCP(watch.key));
                }

                Some(false) => {
                    log::trace!(target: targets::PROPAGATION, "Binary conflict on {literal} with {}", watch.key);
                    return Err(err::BCPError::Conflict(watch.key));
                }
            }
        }

        // Long clauses.
        let mut list = self.watches.take_long(literal);
        let mut index = 0;
        let mut keep = 0;

        while index < list.len() {
            let key = list[index];
            index += 1;

            let Ok(clause) = self.clause_db.get_mut(&key) else {
                continue;
            };

            if clause[0] == falsified {
                clause.swap(0, 1);
            } else if clause[1] != falsified {
                continue;
            }

            let first = clause[0];
            if self.atom_db.value_of_literal(first) == Some(true) {
                list[keep] = key;
                keep += 1;
                continue;
            }

            let replacement = (2..clause.len())
                .find(|position| self.atom_db.value_of_literal(clause[*position]) != Some(false));

            if let Some(position) = replacement {
                clause.swap(1, position);
                let watcher = clause[1];
                self.watches.watch_long(watcher, key);
                continue;
            }

            list[keep] = key;
            keep += 1;

            match self.atom_db.value_of_literal(first) {
                None => {
                    self.assign(first, AssignmentSource::BCP(key));
                }

                _ => {
                    log::trace!(target: targets::PROPAGATION, "Long conflict on {literal} with {key}");
                    while index < list.len() {
                        list[keep] = list[index];
                        keep += 1;
                        index += 1;
                    }
                    list.truncate(keep);
                    self.watches.restore_long(literal, list);
                    return Err(err::BCPError::Conflict(key));
                }
            }
        }

        list.truncate(keep);
        self.watches.restore_long(literal, list);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        context::Context,
        structures::{consequence::AssignmentSource, literal::CLiteral},
        types::err,
    };

    #[test]
    fn long_clause_asserts() {
        let mut the_context = Context::from_config(Config::default());
        let literals = the_context.fresh_or_max_literals(3);
        let (p, q, r) = (literals[0], literals[1], literals[2]);
        assert!(the_context.add_clause(vec![p, q, r]).is_ok());

        the_context.trail.push_level();
        the_context.assign(-p, AssignmentSource::Decision);
        the_context.trail.push_level();
        the_context.assign(-q, AssignmentSource::Decision);

        while let Some(literal) = the_context.trail.next_in_queue() {
            assert!(the_context.bcp(literal).is_ok());
        }
        assert_eq!(the_context.value_of(r), Some(true));
    }

    #[test]
    fn binary_conflict() {
        let mut the_context = Context::from_config(Config::default());
        let p = the_context.fresh_or_max_literal();
        let q = the_context.fresh_or_max_literal();
        assert!(the_context.add_clause(vec![p, q]).is_ok());

        the_context.trail.push_level();
        the_context.assign(-p, AssignmentSource::Decision);
        the_context.assign(-q, AssignmentSource::Decision);

        let literal: CLiteral = the_context.trail.assignments[0];
        assert!(matches!(
            the_context.bcp(literal),
            Err(err::BCPError::Conflict(_))
        ));
    }
}
