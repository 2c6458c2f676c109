/*!
A database of clause related things.

Clauses are stored by size and by whether the clause is original (given to the context) or an addition (derived during a solve, by resolution or from a module).
- Unit clauses are stored as literals, as they are never watched.
- Binary clauses are never removed.
- Long additions may be removed on a [reduction](ClauseDB::reduce_by), and the slot of a removed clause may be reused under a fresh [token](crate::db::FormulaToken).

Fields of the database are private to ensure the use of methods which may be needed to uphold invariants.
*/

pub mod db_clause;
mod store;

use std::cmp::Ordering;

use db_clause::DBClause;

use crate::{
    config::{dbs::ClauseDBConfig, Activity, Config},
    db::{atom::AtomDB, keys::ClauseKey},
    misc::log::targets::{self},
    structures::{
        clause::CClause,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

/// A database of clause related things.
pub struct ClauseDB {
    /// Clause database specific configuration parameters.
    config: ClauseDBConfig,

    /// A count of long addition clauses.
    // This can't be inferred from the addition vec, as indices may be reused.
    addition_count: usize,

    /// A stack of keys for long additions whose indices are empty.
    empty_keys: Vec<ClauseKey>,

    unit_original: Vec<CLiteral>,

    unit_addition: Vec<CLiteral>,

    binary_original: Vec<DBClause>,

    binary_addition: Vec<DBClause>,

    original: Vec<DBClause>,

    addition: Vec<Option<DBClause>>,
}

impl ClauseDB {
    /// A new [ClauseDB] with local configuration options derived from `config`.
    pub fn new(config: &Config) -> Self {
        ClauseDB {
            config: config.clause_db.clone(),

            addition_count: 0,
            empty_keys: Vec::default(),

            unit_original: Vec::default(),
            unit_addition: Vec::default(),

            binary_original: Vec::default(),
            binary_addition: Vec::default(),

            original: Vec::default(),
            addition: Vec::default(),
        }
    }

    /// The clause with key `key`, if the key is to a binary or long clause and the clause has not been removed.
    pub fn get(&self, key: &ClauseKey) -> Result<&DBClause, err::ClauseDBError> {
        let found = match key {
            ClauseKey::OriginalUnit(_) | ClauseKey::AdditionUnit(_) => {
                return Err(err::ClauseDBError::GetUnitKey)
            }
            ClauseKey::OriginalBinary(index) => self.binary_original.get(*index as usize),
            ClauseKey::AdditionBinary(index) => self.binary_addition.get(*index as usize),
            ClauseKey::Original(index) => self.original.get(*index as usize),
            ClauseKey::Addition(index, _) => self
                .addition
                .get(*index as usize)
                .and_then(|slot| slot.as_ref()),
        };
        match found {
            Some(clause) if clause.key() == *key => Ok(clause),
            _ => Err(err::ClauseDBError::Missing),
        }
    }

    /// The clause with key `key`, mutably.
    pub fn get_mut(&mut self, key: &ClauseKey) -> Result<&mut DBClause, err::ClauseDBError> {
        let found = match key {
            ClauseKey::OriginalUnit(_) | ClauseKey::AdditionUnit(_) => {
                return Err(err::ClauseDBError::GetUnitKey)
            }
            ClauseKey::OriginalBinary(index) => self.binary_original.get_mut(*index as usize),
            ClauseKey::AdditionBinary(index) => self.binary_addition.get_mut(*index as usize),
            ClauseKey::Original(index) => self.original.get_mut(*index as usize),
            ClauseKey::Addition(index, _) => self
                .addition
                .get_mut(*index as usize)
                .and_then(|slot| slot.as_mut()),
        };
        match found {
            Some(clause) if clause.key() == *key => Ok(clause),
            _ => Err(err::ClauseDBError::Missing),
        }
    }

    /// The literals of the clause with key `key`, for any key.
    pub fn literals_of(&self, key: &ClauseKey) -> Result<CClause, err::ClauseDBError> {
        match key {
            ClauseKey::OriginalUnit(literal) | ClauseKey::AdditionUnit(literal) => {
                Ok(vec![*literal])
            }
            _ => Ok(self.get(key)?.clause().clone()),
        }
    }

    /// A count of every original clause.
    pub fn original_count(&self) -> usize {
        self.unit_original.len() + self.binary_original.len() + self.original.len()
    }

    /// A count of every addition clause which has not been removed.
    pub fn addition_count(&self) -> usize {
        self.unit_addition.len() + self.binary_addition.len() + self.addition_count
    }

    /// A count of long addition clauses, which may be removed on a reduction.
    pub fn long_addition_count(&self) -> usize {
        self.addition_count
    }

    /// An iterator over every original clause, as slices of literals.
    pub fn original_clauses(&self) -> impl Iterator<Item = &[CLiteral]> {
        self.unit_original
            .iter()
            .map(std::slice::from_ref)
            .chain(self.binary_original.iter().map(|clause| clause.clause().as_slice()))
            .chain(self.original.iter().map(|clause| clause.clause().as_slice()))
    }
}

impl ClauseDB {
    /// Bumps the activity of the clause with key `key`, if the clause is a long addition.
    pub fn bump_activity(&mut self, key: &ClauseKey) {
        if !matches!(key, ClauseKey::Addition(_, _)) {
            return;
        }
        let bump = self.config.bump.value;
        let max = self.config.bump.max;
        let exceeds = match self.get_mut(key) {
            Ok(clause) => {
                clause.activity += bump;
                clause.activity > max
            }
            Err(_) => false,
        };
        if exceeds {
            self.rescore_activity();
        }
    }

    /// Increases the bump applied to clause activity by a factor.
    pub fn decay_activity(&mut self) {
        let factor = 1.0 / (1.0 - self.config.decay.value);
        self.config.bump.value *= factor;
        if self.config.bump.value > self.config.bump.max {
            self.rescore_activity();
        }
    }

    /// Rescales the activity of every long addition, and the bump.
    fn rescore_activity(&mut self) {
        let max = self
            .addition
            .iter()
            .flatten()
            .map(|clause| clause.activity)
            .fold(self.config.bump.value, Activity::max);
        let factor = 1.0 / max;
        for clause in self.addition.iter_mut().flatten() {
            clause.activity *= factor;
        }
        self.config.bump.value *= factor;
    }

    /// Removes up to `limit` long additions, beginning with clauses of greatest LBD and least activity.
    ///
    /// Clauses with LBD within the configured bound are kept, as are clauses which are the reason for some assignment.
    /// Returns a count of the clauses removed.
    pub fn reduce_by(&mut self, limit: usize, atom_db: &AtomDB) -> usize {
        let lbd_bound = self.config.lbd_bound.value;

        let mut candidates = self
            .addition
            .iter()
            .flatten()
            .filter(|clause| clause.lbd() > lbd_bound && !Self::is_reason(clause, atom_db))
            .map(|clause| (clause.lbd(), clause.activity, clause.key()))
            .collect::<Vec<_>>();

        candidates.sort_unstable_by(|a, b| {
            b.0.cmp(&a.0)
                .then(a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        });

        let mut removed = 0;
        for (_, _, key) in candidates.into_iter().take(limit) {
            if let ClauseKey::Addition(index, _) = key {
                if let Some(slot) = self.addition.get_mut(index as usize) {
                    if slot.take().is_some() {
                        log::trace!(target: targets::REDUCTION, "Removed: {key}");
                        self.empty_keys.push(key);
                        self.addition_count -= 1;
                        removed += 1;
                    }
                }
            }
        }
        removed
    }

    /// True if `clause` is the reason for the value of one of its watched literals.
    fn is_reason(clause: &DBClause, atom_db: &AtomDB) -> bool {
        clause.iter().take(2).any(|literal| {
            atom_db
                .source_of(literal.atom())
                .and_then(|source| source.reason())
                == Some(clause.key())
        })
    }
}
