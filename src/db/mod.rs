//! Databases for holding information relevant to a solve.
//!
//!   - [The clause database](crate::db::clause)
//!     + A collection of clauses, each indexed by a clause key. \
//!       From an external perspective there are two important kinds of clause:
//!       * Original clauses \
//!         Original clauses are added to the context, e.g. directly, from a DIMACS file, or by the bit-blaster. \
//!         The collection of original clauses is the CNF formula 𝐅 whose satisfiability may be determined.
//!       * Added clauses \
//!         Clauses added to the context by some procedure (resolution, or the inference of a module).
//!         Every added clause is a consequence of the original clauses together with the constraints of enabled modules.
//!
//!   - [The atom database](crate::db::atom)
//!     + Properties of atoms.
//!       * Valuation, and the level and source of each value
//!       * Activity
//!   - [The trail](crate::db::trail)
//!     + Every assignment, in order, grouped by level.
//!   - [Watches](crate::db::watches)
//!     + Watch lists for each literal.

pub mod atom;
pub mod clause;
mod keys;
pub use keys::*;
pub mod trail;
pub mod watches;

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::{
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
};

/// The index of a level on the [trail](crate::db::trail).
pub type LevelIndex = u32;

/// The canonical method to record an assignment to the context.
impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Values the atom of `literal` at the current level, places the literal on the trail, and notifies any module watching the atom.
    ///
    /// ```rust, ignore
    /// self.assign(literal, AssignmentSource::BCP(key));
    /// ```
    ///
    /// If the atom already has a value, nothing happens, and the existing value is returned.
    pub fn assign(&mut self, literal: CLiteral, source: AssignmentSource) -> Option<bool> {
        let level = self.trail.level();
        match self.atom_db.set_value(literal, level, source) {
            None => {
                log::trace!(target: targets::VALUATION, "{literal} at {level} from {source}");
                self.trail.assignments.push(literal);
                self.module_db.notify_assigned(literal);
                None
            }
            Some(value) => {
                log::trace!(target: targets::VALUATION, "{} already valued {value}", literal.atom());
                Some(value)
            }
        }
    }
}
