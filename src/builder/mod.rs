/*!
Tools for building a context.

# Basic methods

The library has two basic methods for building a context:
- [fresh_atom](crate::context::GenericContext::fresh_atom), to obtain a fresh atom.
- [add_clause](crate::context::GenericContext::add_clause), to add a clause.

A formula may be added to a context by interweaving these two methods, together with relevant strucutre initialisers.
In rough strokes, the pattern is to:
- Obtain a collection of atoms to represent a clause.
- Create [CLiteral]s from the atoms.
- Bundle the literals into a [CClause].
- Add the clause to the context.

The [bit-blaster](crate::blast) follows this pattern for each gate of a term.

# Examples

A clause built using basic methods.

```rust
# use otter_bv::context::Context;
# use otter_bv::config::Config;
# use otter_bv::reports::Report;
# use otter_bv::structures::{clause::CClause, literal::{CLiteral, Literal}};
#
let mut the_context = Context::from_config(Config::default());
let p = the_context.fresh_or_max_atom();
let q = the_context.fresh_or_max_atom();

let clause_a = CClause::from([CLiteral::new(p, true), CLiteral::new(q, false)]);
let clause_b = CClause::from([CLiteral::new(p, false), CLiteral::new(q, true)]);

assert!(the_context.add_clause(clause_a).is_ok());
assert!(the_context.add_clause(clause_b).is_ok());
assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
```

A simplified build, using canonical structures.

```rust
# use otter_bv::context::Context;
# use otter_bv::config::Config;
# use otter_bv::reports::Report;
# use otter_bv::builder::ClauseOk;
#
let mut the_context = Context::from_config(Config::default());
let p = the_context.fresh_or_max_literal();
let q = the_context.fresh_or_max_literal();

assert_eq!(the_context.add_clause(vec![p, -q]), Ok(ClauseOk::Added));
assert_eq!(the_context.add_clause(vec![-p, q]), Ok(ClauseOk::Added));
assert_eq!(the_context.add_clause(vec![p, -p]), Ok(ClauseOk::Tautology));
assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
```
*/

mod dimacs;

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets::{self},
    modules::{Change, Module},
    structures::{
        atom::{Atom, ATOM_MAX},
        clause::{CClause, Clause, ClauseSource},
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

/// Ok results when adding a clause to the context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added to the context.
    Added,

    /// The clause was a tautology (and so was not added to the context).
    Tautology,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// A fresh atom, with `previous_value` as the value used on a first decision when phase saving.
    pub fn fresh_atom(&mut self, previous_value: bool) -> Result<Atom, ErrorKind> {
        let atom = self.atom_db.fresh_atom(previous_value)?;
        self.watches.ensure(atom);
        Ok(atom)
    }

    /// A fresh atom, or [ATOM_MAX] if no fresh atom is available.
    ///
    /// The previous value of the atom is chosen with the configured polarity lean.
    pub fn fresh_or_max_atom(&mut self) -> Atom {
        let previous_value = self.rng.random_bool(self.config.polarity_lean.value);
        self.fresh_atom(previous_value).unwrap_or(ATOM_MAX)
    }

    /// A fresh literal (of positive polarity), or a literal on [ATOM_MAX] if no fresh atom is available.
    pub fn fresh_or_max_literal(&mut self) -> CLiteral {
        CLiteral::new(self.fresh_or_max_atom(), true)
    }

    /// A fresh literal, of positive polarity.
    ///
    /// Unlike [fresh_or_max_literal](GenericContext::fresh_or_max_literal), exhaustion of atoms is an error.
    pub fn fresh_literal(&mut self) -> Result<CLiteral, ErrorKind> {
        Ok(CLiteral::new(self.fresh_or_max_atom_checked()?, true))
    }

    /// `count` fresh literals, of positive polarity.
    pub fn fresh_or_max_literals(&mut self, count: usize) -> Vec<CLiteral> {
        (0..count).map(|_| self.fresh_or_max_literal()).collect()
    }

    /// Ensures `atom` is an atom of the context, creating fresh atoms as needed.
    pub fn ensure_atom(&mut self, atom: Atom) -> Result<(), ErrorKind> {
        while self.atom_db.count() <= atom as usize {
            self.fresh_or_max_atom_checked()?;
        }
        Ok(())
    }

    fn fresh_or_max_atom_checked(&mut self) -> Result<Atom, ErrorKind> {
        let previous_value = self.rng.random_bool(self.config.polarity_lean.value);
        self.fresh_atom(previous_value)
    }

    /// Adds a clause to the context.
    ///
    /// Any decisions (and assumptions) are cleared, so the valuation holds only values fixed at level zero.
    /// Then:
    /// - Duplicate literals are removed, and a tautology is not added.
    /// - A clause which is unit on the valuation has the unit assigned.
    /// - A clause which is false on the valuation makes the context unsatisfiable.
    ///
    /// Atoms of the clause which are not yet atoms of the context are added.
    pub fn add_clause(&mut self, clause: impl Clause) -> Result<ClauseOk, ErrorKind> {
        let mut clause: CClause = clause.canonical();
        if clause.is_empty() {
            return Err(err::ClauseDBError::EmptyClause.into());
        }

        clause.sort_unstable();
        clause.dedup();
        if clause
            .windows(2)
            .any(|pair| pair[0].atom() == pair[1].atom())
        {
            log::trace!(target: targets::CLAUSE_DB, "Tautology: {}", clause.as_dimacs(false));
            return Ok(ClauseOk::Tautology);
        }

        for literal in &clause {
            self.ensure_atom(literal.atom())?;
        }

        self.backjump(0);
        if !matches!(self.state, ContextState::Unsatisfiable(_)) {
            self.state = ContextState::Input;
        }

        // Watch candidates first: true literals, then literals without a value.
        clause.sort_by_key(|literal| match self.atom_db.value_of_literal(*literal) {
            Some(true) => 0,
            None => 1,
            Some(false) => 2,
        });

        let first = clause[0];
        let second = clause.get(1).copied();

        let key = self
            .clause_db
            .store(clause, ClauseSource::Original, &self.atom_db, &mut self.watches)?;

        let second_value = second.and_then(|literal| self.atom_db.value_of_literal(literal));
        match (self.atom_db.value_of_literal(first), second, second_value) {
            (Some(false), _, _) => {
                log::info!(target: targets::CLAUSE_DB, "Unsatisfiable on addition: {key}");
                self.state = ContextState::Unsatisfiable(key);
            }

            (None, None, _) | (None, Some(_), Some(false)) => {
                self.assign(first, AssignmentSource::BCP(key));
            }

            _ => {}
        }

        Ok(ClauseOk::Added)
    }

    /// Registers `module` with the context, enabled whenever `enable` is true, and returns the index of the module.
    ///
    /// Atoms declared by the module (and the atom of `enable`) are added to the context, if not already present.
    /// Any decisions are cleared, and the module is notified of each declared atom valued at level zero.
    ///
    /// For an always enabled module, use [top](CLiteral::top) as the enable literal.
    pub fn add_module(&mut self, module: Box<dyn Module>, enable: CLiteral) -> Result<usize, ErrorKind> {
        let atoms = module
            .variables()
            .iter()
            .map(|literal| literal.atom())
            .collect::<Vec<_>>();

        self.ensure_atom(enable.atom())?;
        for atom in &atoms {
            self.ensure_atom(*atom)?;
        }

        self.backjump(0);
        if !matches!(self.state, ContextState::Unsatisfiable(_)) {
            self.state = ContextState::Input;
        }

        let index = self.module_db.register(module, enable);
        if let Some(record) = self.module_db.record_mut(index) {
            for atom in atoms {
                if let Some(value) = self.atom_db.value_of(atom) {
                    record.module.notify(Change::Assigned(CLiteral::new(atom, value)));
                }
            }
        }

        Ok(index)
    }
}
