//! Clauses, aka. a collection of literals, interpreted as the disjunction of those literals.
//!
//! The canonical representation of a clause is as a vector of literals.
//!
//! ```rust
//! # use otter_bv::structures::literal::{CLiteral, Literal};
//! # use otter_bv::structures::clause::Clause;
//! let clause = vec![CLiteral::new(23, true),
//!                   CLiteral::new(41, false),
//!                   CLiteral::new(3,  false)];
//!
//! assert_eq!(clause.size(), 3);
//!
//! let mut valuation = vec![Some(true); 42];
//! valuation[23] = Some(false);
//! assert_eq!(clause.asserts(&valuation), None);
//!
//! valuation[41] = None;
//! assert_eq!(clause.asserts(&valuation), Some(CLiteral::new(41, false)));
//! ```
//!
//! - The empty clause is always false (never true).
//! - Single literals are identified with the clause containing that literal (aka. a 'unit' clause --- where the 'unit' is the literal).

use crate::structures::{
    atom::Atom,
    literal::{CLiteral, Literal},
    valuation::Valuation,
};

/// The clause trait.
pub trait Clause {
    /// An iterator over all literals in the clause, in clause order.
    fn literals(&self) -> impl Iterator<Item = &CLiteral>;

    /// The number of literals in the clause.
    fn size(&self) -> usize;

    /// The clause in its canonical form.
    fn canonical(self) -> CClause;

    /// An iterator over all atoms in the clause.
    fn atoms(&self) -> impl Iterator<Item = Atom> {
        self.literals().map(|literal| literal.atom())
    }

    /// The literal asserted by the clause on the given valuation, if one such literal exists. \
    /// In detail, returns:
    /// - Some(*l*), if *l* has no value on the given valuation and for every other literal *l'* in the clause the polarity of *l'* conflicts with the value of the atom of *l'*.
    /// - None, otherwise.
    fn asserts(&self, valuation: &impl Valuation) -> Option<CLiteral> {
        let mut candidate = None;
        for literal in self.literals() {
            match valuation.value_of(literal.atom()) {
                Some(value) if value == literal.polarity() => return None,
                Some(_) => {}
                None => match candidate {
                    None => candidate = Some(*literal),
                    Some(_) => return None,
                },
            }
        }
        candidate
    }

    /// Whether every literal of the clause conflicts with the given valuation.
    fn unsatisfiable_on(&self, valuation: &impl Valuation) -> bool {
        self.literals().all(|literal| {
            valuation
                .value_of(literal.atom())
                .is_some_and(|value| value != literal.polarity())
        })
    }

    /// A string of the clause in DIMACS form, with the terminating `0` as optional.
    fn as_dimacs(&self, zero: bool) -> String {
        let mut dimacs = String::default();
        for literal in self.literals() {
            dimacs.push_str(&format!("{} ", literal.as_int()));
        }
        if zero {
            dimacs.push('0');
        } else {
            dimacs.pop();
        }
        dimacs
    }
}

/// The canonical implementation of a clause.
pub type CClause = Vec<CLiteral>;

impl Clause for CClause {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn canonical(self) -> CClause {
        self
    }
}

impl Clause for &[CLiteral] {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn canonical(self) -> CClause {
        self.to_vec()
    }
}

impl Clause for CLiteral {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        std::iter::once(self)
    }

    fn size(&self) -> usize {
        1
    }

    fn canonical(self) -> CClause {
        vec![self]
    }
}

/// The source of a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseSource {
    /// A clause added to the context, e.g. from a bit-blasted term or an assertion.
    Original,

    /// A clause derived via resolution during analysis.
    Resolution,

    /// A clause given by a module, either as the reason for an inference or as a conflict.
    Module,
}
