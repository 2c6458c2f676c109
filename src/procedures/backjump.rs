//! Recovery from a conflict.
//!
//! # Overview
//!
//! A backjump is a 'jump' from some (higher) level to some previous (lower) level.
//!
//! Typically, a backjump is made from level *l* to level *l - i* because a conflict was found at level *l* and analysis produced a clause which asserts some literal at level *l - i*.
//! In this case, all decisions and all consequences of those decisions from level *l* down to level *l - i* are undone, and any queued consequences of the decision are removed from the queue.
//!
//! Every atom which loses a value is returned to the activity heap, keeps the value as the previous value (for phase saving), and any module declaring the atom is [notified](crate::modules::Change::Unassigned).
//!
//! # Methods
//!
//! # [backjump](GenericContext::backjump) --- Backjump to a target level
//!
//! Performs a backjump to some level.
//!
//! For sound application the target level must be equal to or lower than the current level.
//! Still, passing a target level greater than the current level is safe --- nothing will happen.
//!
//! # [backjump_level](GenericContext::backjump_level) --- The backjump level of a(n unsatisfiable) clause
//!
//! The backjump level of a clause is the highest level for which the clause is asserting on the corresponding valuation.
//!
//! - Soundness
//!   + With respect to implementation, the backjump level of a clause is the second highest level from the given literals, if two or more levels are present, and 0 (zero) otherwise. \
//!     In this respect the implementation of backjump_level is only sound to use when applied to a clause unsatisfiable on the current valuation.
//!
//! # Example
//!
//! ```rust,ignore
//! let index = self.backjump_level(&learnt_clause);
//! self.backjump(index);
//! ```
//!
//! # Literature
//!
//! See [Chronological Backtracking](https://doi.org/10.1007/978-3-319-94144-8_7) for a discussion of chronological and non-chronological backjumping --- and a follow-up: [Backing Backtracking](https://www.doi.org/10.1007/978-3-030-24258-9_18).

use crate::{
    context::GenericContext,
    db::LevelIndex,
    misc::log::targets::{self},
    structures::{clause::Clause, literal::Literal},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Backjumps to the given target level.
    ///
    /// For documentation, see [procedures::backjump](crate::procedures::backjump).
    pub fn backjump(&mut self, target: LevelIndex) {
        if target >= self.trail.level() {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {target}", self.trail.level());

        let cleared = self.trail.clear_assignments_above(target);
        for literal in cleared.into_iter().rev() {
            self.atom_db.drop_value(literal.atom());
            self.module_db.notify_unassigned(literal);
        }
    }

    /// The backjump level of a clause unsatisfiable on the current valuation.
    ///
    /// That is, the second highest level among the literals of the clause, with the highest level counted once.
    pub fn backjump_level(&self, clause: &impl Clause) -> LevelIndex {
        let mut top: Option<LevelIndex> = None;
        let mut second: LevelIndex = 0;

        for literal in clause.literals() {
            let level = self.atom_db.level_of(literal.atom()).unwrap_or(0);
            match top {
                None => top = Some(level),
                Some(highest) if level > highest => {
                    second = highest;
                    top = Some(level);
                }
                Some(highest) if level < highest && level > second => second = level,
                Some(_) => {}
            }
        }

        second
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        context::Context,
        structures::consequence::AssignmentSource,
    };

    #[test]
    fn levels_are_cleared() {
        let mut the_context = Context::from_config(Config::default());
        let literals = the_context.fresh_or_max_literals(3);

        for literal in &literals {
            the_context.trail.push_level();
            the_context.assign(-*literal, AssignmentSource::Decision);
        }
        assert_eq!(the_context.trail.level(), 3);
        assert_eq!(the_context.backjump_level(&literals), 2);

        the_context.backjump(1);
        assert_eq!(the_context.trail.level(), 1);
        assert_eq!(the_context.value_of(literals[0]), Some(false));
        assert_eq!(the_context.value_of(literals[1]), None);
        assert_eq!(the_context.value_of(literals[2]), None);
    }
}
