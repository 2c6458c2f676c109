use crate::{
    db::{
        atom::AtomDB,
        clause::db_clause::DBClause,
        watches::{BinaryWatch, Watches},
        ClauseKey, FormulaIndex,
    },
    misc::log::targets,
    structures::clause::{CClause, Clause, ClauseSource},
    types::err,
};

use super::ClauseDB;

/// Methods for storing clauses.
///
/// As key generation is local, the methods are not exported.
/// Though, note, as keys use a [index](FormulaIndex) which may be smaller than [usize] a check is made to ensure it will be possible to generate the key.
impl ClauseDB {
    /// Stores a clause, watching the literals at positions 0 and 1 if the clause has two or more literals.
    ///
    /// ```rust, ignore
    /// let key = self.clause_db.store(clause, ClauseSource::Resolution, &self.atom_db, &mut self.watches)?;
    /// ```
    ///
    /// The order of literals is kept, so callers are responsible for placing suitable literals at positions 0 and 1.
    /// Any instance of storing a clause should directly or indirectly use this method, as it maintains watched literals, etc.
    pub fn store(
        &mut self,
        clause: CClause,
        source: ClauseSource,
        atom_db: &AtomDB,
        watches: &mut Watches,
    ) -> Result<ClauseKey, err::ClauseDBError> {
        log::trace!(target: targets::CLAUSE_DB, "Store ({source:?}): {}", clause.as_dimacs(false));

        match clause.len() {
            0 => Err(err::ClauseDBError::EmptyClause),

            1 => {
                let literal = clause[0];
                match source {
                    ClauseSource::Original => {
                        self.unit_original.push(literal);
                        Ok(ClauseKey::OriginalUnit(literal))
                    }
                    ClauseSource::Resolution | ClauseSource::Module => {
                        self.unit_addition.push(literal);
                        Ok(ClauseKey::AdditionUnit(literal))
                    }
                }
            }

            2 => {
                let (a, b) = (clause[0], clause[1]);
                let key = match source {
                    ClauseSource::Original => {
                        ClauseKey::OriginalBinary(Self::fresh_index(self.binary_original.len())?)
                    }
                    ClauseSource::Resolution | ClauseSource::Module => {
                        ClauseKey::AdditionBinary(Self::fresh_index(self.binary_addition.len())?)
                    }
                };

                watches.watch_binary(a, BinaryWatch { literal: b, key });
                watches.watch_binary(b, BinaryWatch { literal: a, key });

                let db_clause = DBClause::new(key, clause, source, atom_db);
                match source {
                    ClauseSource::Original => self.binary_original.push(db_clause),
                    ClauseSource::Resolution | ClauseSource::Module => {
                        self.binary_addition.push(db_clause)
                    }
                }
                Ok(key)
            }

            _ => {
                let (a, b) = (clause[0], clause[1]);
                let key = match source {
                    ClauseSource::Original => {
                        ClauseKey::Original(Self::fresh_index(self.original.len())?)
                    }
                    ClauseSource::Resolution | ClauseSource::Module => match self.empty_keys.pop() {
                        Some(key) => key.retoken()?,
                        None => ClauseKey::Addition(Self::fresh_index(self.addition.len())?, 0),
                    },
                };

                watches.watch_long(a, key);
                watches.watch_long(b, key);

                let db_clause = DBClause::new(key, clause, source, atom_db);
                match key {
                    ClauseKey::Addition(index, _) => {
                        self.addition_count += 1;
                        match self.addition.get_mut(index as usize) {
                            Some(slot) => *slot = Some(db_clause),
                            None => self.addition.push(Some(db_clause)),
                        }
                    }
                    _ => self.original.push(db_clause),
                }
                Ok(key)
            }
        }
    }

    fn fresh_index(length: usize) -> Result<FormulaIndex, err::ClauseDBError> {
        FormulaIndex::try_from(length).map_err(|_| err::ClauseDBError::StorageExhausted)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        structures::literal::{CLiteral, Literal},
    };

    use super::*;

    fn clause(ints: &[i32]) -> CClause {
        ints.iter().map(|i| CLiteral::from(*i)).collect()
    }

    #[test]
    fn keys_by_size_and_source() {
        let config = Config::default();
        let atom_db = AtomDB::new(&config);
        let mut watches = Watches::default();
        let mut clause_db = ClauseDB::new(&config);

        let unit = clause_db.store(clause(&[-1]), ClauseSource::Original, &atom_db, &mut watches);
        assert_eq!(unit, Ok(ClauseKey::OriginalUnit(CLiteral::new(1, false))));

        let binary = clause_db.store(clause(&[1, 2]), ClauseSource::Module, &atom_db, &mut watches);
        assert_eq!(binary, Ok(ClauseKey::AdditionBinary(0)));

        let long = clause_db.store(clause(&[1, 2, 3]), ClauseSource::Resolution, &atom_db, &mut watches);
        assert_eq!(long, Ok(ClauseKey::Addition(0, 0)));

        assert_eq!(
            clause_db.store(CClause::default(), ClauseSource::Original, &atom_db, &mut watches),
            Err(err::ClauseDBError::EmptyClause)
        );

        assert_eq!(clause_db.original_count(), 1);
        assert_eq!(clause_db.addition_count(), 2);
    }

    #[test]
    fn reduction_keeps_low_lbd() {
        let mut config = Config::default();
        config.clause_db.lbd_bound.value = 0;
        let atom_db = AtomDB::new(&config);
        let mut watches = Watches::default();
        let mut clause_db = ClauseDB::new(&config);

        let first = clause_db
            .store(clause(&[1, 2, 3]), ClauseSource::Resolution, &atom_db, &mut watches)
            .expect("stored");

        // Without levels the LBD is zero, and so the clause is within the bound.
        assert_eq!(clause_db.reduce_by(1, &atom_db), 0);
        assert!(clause_db.get(&first).is_ok());
        assert_eq!(clause_db.long_addition_count(), 1);
    }
}
