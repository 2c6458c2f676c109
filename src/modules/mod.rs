/*!
Modules: external reasoners which take part in a solve over the same atoms as the clause database.

A module declares the literals it reasons over through [variables](Module::variables), and is then consulted throughout a solve:
- Before the context makes a decision, each enabled module is asked (in order of registration) for a literal to [decide](Module::decide) on.
- After boolean propagation reaches a fixpoint, each enabled module may [propagate](Module::propagate), inferring literals or returning a conflict.
- Every change to the value of a declared atom is passed to the module through [notify](Module::notify).

Each module is registered with an *enable* literal.
The module is enabled exactly when the enable literal is true, and an inert module is never asked to decide or propagate.
Every clause derived from a module (an inference, or a conflict) contains the negation of the enable literal.
So, the constraint of a module may be tied to an assumption, and any clause learnt from the module is satisfied whenever the module is disabled.

Modules see the valuation only through a [ModuleHandle], and never mutate the context directly.

# Example

A module which prevents two literals from both being true.

```rust
# use otter_bv::modules::{Module, ModuleConflict, ModuleHandle};
# use otter_bv::structures::literal::CLiteral;
struct AtMostOne {
    literals: Vec<CLiteral>,
}

impl Module for AtMostOne {
    fn variables(&self) -> &[CLiteral] {
        &self.literals
    }

    fn propagate(&mut self, handle: &mut ModuleHandle) -> Option<ModuleConflict> {
        let true_literals = self
            .literals
            .iter()
            .copied()
            .filter(|literal| handle.value_of(*literal) == Some(true))
            .collect::<Vec<_>>();

        match true_literals.as_slice() {
            [] => None,
            [single] => {
                for literal in &self.literals {
                    if handle.is_free(*literal) {
                        handle.infer_literal(-*literal, &[*single]);
                    }
                }
                None
            }
            _ => Some(handle.make_conflict(&true_literals)),
        }
    }
}
```
*/

pub mod cardinality;
pub use cardinality::CardinalityLessThan;
mod handle;
pub use handle::{Inference, ModuleHandle};

use std::collections::HashSet;

use crate::{
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::CClause,
        literal::{CLiteral, Literal},
    },
};

/// A change to the value of a declared atom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// The literal was made true.
    Assigned(CLiteral),

    /// The literal, previously true, lost its value.
    Unassigned(CLiteral),
}

/// A conflict found by a module.
///
/// The clause of a conflict must be false on the current valuation, and must contain the negation of the enable literal of the module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleConflict {
    clause: CClause,
}

impl ModuleConflict {
    /// A conflict from a clause as given.
    ///
    /// Typically, [make_conflict](ModuleHandle::make_conflict) is preferable, as the enable literal is added automatically.
    pub fn from_clause(clause: CClause) -> Self {
        ModuleConflict { clause }
    }

    /// The clause of the conflict.
    pub fn clause(&self) -> &CClause {
        &self.clause
    }

    /// The clause of the conflict, owned.
    pub fn into_clause(self) -> CClause {
        self.clause
    }
}

/// A reasoner, consulted throughout a solve.
///
/// Only [variables](Module::variables) is required.
/// By default, a module has no preference on decisions, infers nothing, and ignores changes.
pub trait Module {
    /// The literals the module reasons over.
    ///
    /// Read once, when the module is registered.
    fn variables(&self) -> &[CLiteral];

    /// A literal to decide on, if the module has some preference.
    ///
    /// The atom of the literal must be declared.
    /// A literal which already has a value is read as no preference.
    fn decide(&mut self, handle: &ModuleHandle) -> Option<CLiteral> {
        let _ = handle;
        None
    }

    /// Inspects the valuation, inferring literals through [infer_literal](ModuleHandle::infer_literal) or returning a conflict.
    ///
    /// Called repeatedly, until no module infers a (fresh) literal.
    fn propagate(&mut self, handle: &mut ModuleHandle) -> Option<ModuleConflict> {
        let _ = handle;
        None
    }

    /// Receives a change to the value of a declared atom.
    fn notify(&mut self, change: Change) {
        let _ = change;
    }
}

/// A registered module, together with the enable literal and the declared atoms of the module.
pub struct ModuleRecord {
    /// The module.
    pub module: Box<dyn Module>,

    /// The literal which enables the module, when true.
    pub enable: CLiteral,

    /// The atoms of the literals declared by the module.
    pub declared: HashSet<Atom>,
}

impl ModuleRecord {
    /// True if the atom of `literal` is declared, or is the atom of the enable literal.
    pub fn permits(&self, literal: CLiteral) -> bool {
        self.declared.contains(&literal.atom()) || literal.atom() == self.enable.atom()
    }
}

/// Registered modules, and for each atom the modules which declare the atom.
#[derive(Default)]
pub struct ModuleDB {
    records: Vec<ModuleRecord>,

    watchers: Vec<Vec<usize>>,
}

impl ModuleDB {
    /// Registers `module` with enable literal `enable`, and returns the index of the module.
    pub fn register(&mut self, module: Box<dyn Module>, enable: CLiteral) -> usize {
        let index = self.records.len();
        let declared = module
            .variables()
            .iter()
            .map(|literal| literal.atom())
            .collect::<HashSet<_>>();

        for atom in &declared {
            let required = *atom as usize + 1;
            if self.watchers.len() < required {
                self.watchers.resize_with(required, Vec::default);
            }
            self.watchers[*atom as usize].push(index);
        }

        log::debug!(target: targets::MODULE, "Module {index} enabled by {enable} over {} atoms", declared.len());

        self.records.push(ModuleRecord {
            module,
            enable,
            declared,
        });
        index
    }

    /// A count of registered modules.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// True if no module has been registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record of the module at `index`.
    pub fn record(&self, index: usize) -> Option<&ModuleRecord> {
        self.records.get(index)
    }

    /// The record of the module at `index`, mutably.
    pub fn record_mut(&mut self, index: usize) -> Option<&mut ModuleRecord> {
        self.records.get_mut(index)
    }

    /// Passes `change` to each module which declares the atom of the changed literal.
    pub fn notify(&mut self, change: Change) {
        let literal = match change {
            Change::Assigned(literal) | Change::Unassigned(literal) => literal,
        };
        if let Some(watchers) = self.watchers.get(literal.atom() as usize) {
            for index in watchers {
                if let Some(record) = self.records.get_mut(*index) {
                    record.module.notify(change);
                }
            }
        }
    }

    /// Notifies watching modules that `literal` is now true.
    pub fn notify_assigned(&mut self, literal: CLiteral) {
        self.notify(Change::Assigned(literal));
    }

    /// Notifies watching modules that `literal` is no longer true.
    pub fn notify_unassigned(&mut self, literal: CLiteral) {
        self.notify(Change::Unassigned(literal));
    }
}
