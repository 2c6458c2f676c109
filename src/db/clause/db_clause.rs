//! A struct holding a [clause](Clause) and associated metadata.
//!
//! A [DBClause] contains:
//! - A [key](ClauseKey) used to access the [DBClause]/[clause](Clause).
//! - A [clause](Clause), represented as a [CClause].
//! - The [source](ClauseSource) of the clause.
//! - For additions, the activity and [LBD] of the clause, used to choose which clauses to remove on reduction.
//!
//! # Watched literals
//!
//! The literals at positions 0 and 1 of a clause with two or more literals are watched.
//! The order of literals in the clause is mutated during [BCP](crate::procedures::bcp) to preserve this.

use std::ops::Deref;

use crate::{
    config::{Activity, LBD},
    db::{atom::AtomDB, keys::ClauseKey},
    structures::{
        clause::{CClause, Clause, ClauseSource},
        literal::{CLiteral, Literal},
    },
};

/// A clause together with some metadata.
pub struct DBClause {
    key: ClauseKey,

    clause: CClause,

    source: ClauseSource,

    lbd: LBD,

    /// The activity of the clause, bumped on use in analysis.
    pub activity: Activity,
}

impl DBClause {
    /// Bundles a [ClauseKey] and [Clause] into a [DBClause].
    ///
    /// The [LBD] of the clause is calculated with respect to the levels noted in `atom_db`.
    pub fn new(key: ClauseKey, clause: CClause, source: ClauseSource, atom_db: &AtomDB) -> Self {
        let lbd = Self::calculate_lbd(&clause, atom_db);
        DBClause {
            key,
            clause,
            source,
            lbd,
            activity: 1.0,
        }
    }

    /// The literal block distance of `clause`: the count of distinct levels above zero among valued atoms of the clause.
    pub fn calculate_lbd(clause: &impl Clause, atom_db: &AtomDB) -> LBD {
        let mut levels = clause
            .literals()
            .filter_map(|literal| atom_db.level_of(literal.atom()))
            .filter(|level| *level > 0)
            .collect::<Vec<_>>();
        levels.sort_unstable();
        levels.dedup();
        levels.len().try_into().unwrap_or(LBD::MAX)
    }

    /// The key used to access the [DBClause].
    pub const fn key(&self) -> ClauseKey {
        self.key
    }

    /// The source of the clause.
    pub const fn source(&self) -> ClauseSource {
        self.source
    }

    /// The literal block distance of the clause, when stored.
    pub const fn lbd(&self) -> LBD {
        self.lbd
    }

    /// The clause, in canonical form.
    pub fn clause(&self) -> &CClause {
        &self.clause
    }

    /// Swaps the literals at positions `a` and `b` of the clause.
    ///
    /// # Soundness
    /// If either position is 0 or 1, watches are not revised.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.clause.swap(a, b);
    }
}

impl std::fmt::Display for DBClause {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.clause.as_dimacs(false))
    }
}

impl Deref for DBClause {
    type Target = [CLiteral];

    fn deref(&self) -> &Self::Target {
        &self.clause
    }
}
