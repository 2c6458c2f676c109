/*!
Watch lists, for each literal.

Every binary clause is watched by both of its literals, and a binary watch stores the other literal of the clause, so propagation of a binary clause never requires a lookup in the clause database.

Every long clause is watched by the literals at positions 0 and 1 of the clause, and a long watch stores only the key to the clause.
Long watches are revised lazily: a watch is dropped when next seen if the key is stale (the clause was removed) or if the watching literal is no longer at position 0 or 1 of the clause.

Watches are indexed by the literal *in the clause*.
So, on assignment of a literal *l* the watches of interest are those of ¬*l*, and the methods taking an assigned literal negate the literal.
*/

use crate::{
    db::ClauseKey,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// A watch on a binary clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinaryWatch {
    /// The other literal of the clause.
    pub literal: CLiteral,

    /// The key to the clause.
    pub key: ClauseKey,
}

/// The watches of an atom, split by polarity.
#[derive(Default)]
pub struct WatchDB {
    positive_binary: Vec<BinaryWatch>,
    negative_binary: Vec<BinaryWatch>,

    positive_long: Vec<ClauseKey>,
    negative_long: Vec<ClauseKey>,
}

/// Watch databases, indexed by atom.
#[derive(Default)]
pub struct Watches {
    dbs: Vec<WatchDB>,
}

impl Watches {
    /// Ensures a watch database exists for every atom up to and including `atom`.
    pub fn ensure(&mut self, atom: Atom) {
        let required = atom as usize + 1;
        if self.dbs.len() < required {
            self.dbs.resize_with(required, WatchDB::default);
        }
    }

    fn db_mut(&mut self, atom: Atom) -> &mut WatchDB {
        self.ensure(atom);
        &mut self.dbs[atom as usize]
    }

    /// Watches the binary clause noted in `watch` from `literal`.
    pub fn watch_binary(&mut self, literal: CLiteral, watch: BinaryWatch) {
        let db = self.db_mut(literal.atom());
        match literal.polarity() {
            true => db.positive_binary.push(watch),
            false => db.negative_binary.push(watch),
        }
    }

    /// Watches the long clause with key `key` from `literal`.
    pub fn watch_long(&mut self, literal: CLiteral, key: ClauseKey) {
        let db = self.db_mut(literal.atom());
        match literal.polarity() {
            true => db.positive_long.push(key),
            false => db.negative_long.push(key),
        }
    }

    /// A count of the binary watches affected by the assignment of `assigned`.
    pub fn binary_count(&self, assigned: CLiteral) -> usize {
        match self.dbs.get(assigned.atom() as usize) {
            Some(db) => match assigned.polarity() {
                true => db.negative_binary.len(),
                false => db.positive_binary.len(),
            },
            None => 0,
        }
    }

    /// The binary watch at `index` of those affected by the assignment of `assigned`.
    pub fn binary_at(&self, assigned: CLiteral, index: usize) -> Option<BinaryWatch> {
        let db = self.dbs.get(assigned.atom() as usize)?;
        match assigned.polarity() {
            true => db.negative_binary.get(index).copied(),
            false => db.positive_binary.get(index).copied(),
        }
    }

    /// Takes the long watches affected by the assignment of `assigned`, leaving an empty list until [restore_long](Watches::restore_long) is called.
    pub fn take_long(&mut self, assigned: CLiteral) -> Vec<ClauseKey> {
        match self.dbs.get_mut(assigned.atom() as usize) {
            Some(db) => match assigned.polarity() {
                true => std::mem::take(&mut db.negative_long),
                false => std::mem::take(&mut db.positive_long),
            },
            None => Vec::default(),
        }
    }

    /// Restores the long watches affected by the assignment of `assigned`.
    ///
    /// Any watch added to the list while taken is kept.
    pub fn restore_long(&mut self, assigned: CLiteral, mut watches: Vec<ClauseKey>) {
        let db = self.db_mut(assigned.atom());
        let list = match assigned.polarity() {
            true => &mut db.negative_long,
            false => &mut db.positive_long,
        };
        watches.append(list);
        *list = watches;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watches_of_the_negation() {
        let mut watches = Watches::default();
        let p = CLiteral::new(1, true);
        let q = CLiteral::new(2, false);

        watches.watch_binary(
            p,
            BinaryWatch {
                literal: q,
                key: ClauseKey::OriginalBinary(0),
            },
        );
        watches.watch_long(-p, ClauseKey::Original(0));

        // Assigning ¬p affects clauses containing p.
        assert_eq!(watches.binary_count(-p), 1);
        assert_eq!(watches.binary_count(p), 0);
        assert_eq!(watches.binary_at(-p, 0).map(|w| w.literal), Some(q));

        let long = watches.take_long(p);
        assert_eq!(long, vec![ClauseKey::Original(0)]);
        assert!(watches.take_long(p).is_empty());

        watches.watch_long(-p, ClauseKey::Original(1));
        watches.restore_long(p, long);
        assert_eq!(
            watches.take_long(p),
            vec![ClauseKey::Original(0), ClauseKey::Original(1)]
        );
    }
}
