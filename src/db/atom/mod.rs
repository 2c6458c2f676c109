/*!
A database of 'atom related' things, accessed via fields on an [AtomDB] struct.

Things include:
- A current (often partial) [valuation](Valuation) and the previous value of each atom, for phase saving.
- The level at which each valued atom was valued, and the [source](AssignmentSource) of the value.
- An [IndexHeap] recording the activty of atoms, where any atom without a value is 'active' on the heap.

The atom database does not know about the trail.
Values are set and cleared by the context, which keeps the valuation and the [trail](crate::db::trail) in step.
*/

#[doc(hidden)]
pub mod activity;

use crate::{
    config::{dbs::AtomDBConfig, Activity, Config},
    db::LevelIndex,
    generic::index_heap::IndexHeap,
    misc::log::targets::{self},
    structures::{
        atom::{Atom, ATOM_MAX, TOP_ATOM},
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
        valuation::{CValuation, Valuation},
    },
    types::err::AtomDBError,
};

/// The atom database.
pub struct AtomDB {
    /// A current (often partial) [valuation](Valuation).
    valuation: CValuation,

    /// The value each atom last held, or the value given on creation.
    previous_valuation: Vec<bool>,

    /// An [IndexHeap] recording the activty of atoms, where any atom without a value is 'active' on the heap.
    activity_heap: IndexHeap<Activity>,

    /// The level at which each atom was valued, if valued.
    levels: Vec<Option<LevelIndex>>,

    /// The source of the value of each atom, if valued.
    sources: Vec<Option<AssignmentSource>>,

    /// A local configuration, typically derived from the configuration of a context.
    pub config: AtomDBConfig,
}

impl AtomDB {
    /// A new [AtomDB] with local configuration options derived from `config`.
    ///
    /// The database contains [TOP_ATOM], valued true at level zero.
    pub fn new(config: &Config) -> Self {
        AtomDB {
            valuation: vec![Some(true)],
            previous_valuation: vec![true],
            activity_heap: {
                let mut heap = IndexHeap::default();
                heap.add(TOP_ATOM as usize, 0.0);
                heap
            },
            levels: vec![Some(0)],
            sources: vec![None],

            config: config.atom_db.clone(),
        }
    }

    /// A count of atoms in the [AtomDB], including [TOP_ATOM].
    pub fn count(&self) -> usize {
        self.valuation.len()
    }

    /// The current valuation, as some struction which implements the valuation trait.
    pub fn valuation(&self) -> &impl Valuation {
        &self.valuation
    }

    /// The current valuation, as a canonical [CValuation].
    pub fn valuation_canonical(&self) -> &CValuation {
        &self.valuation
    }

    /// A fresh atom, active on the activity heap.
    ///
    /// `previous_value` is used as the value of the atom on the first decision, if phase saving is enabled.
    pub fn fresh_atom(&mut self, previous_value: bool) -> Result<Atom, AtomDBError> {
        let atom: Atom = match self.valuation.len().try_into() {
            Ok(atom) if atom <= ATOM_MAX => atom,
            _ => return Err(AtomDBError::AtomsExhausted),
        };

        self.valuation.push(None);
        self.previous_valuation.push(previous_value);
        self.levels.push(None);
        self.sources.push(None);

        self.activity_heap.add(atom as usize, 1.0);
        self.activity_heap.activate(atom as usize);

        Ok(atom)
    }

    /// The value of `atom`, if valued.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation.value_of(atom)
    }

    /// The value of `literal`: Some(true) if the atom is valued with the polarity of the literal, etc.
    pub fn value_of_literal(&self, literal: CLiteral) -> Option<bool> {
        self.value_of(literal.atom())
            .map(|value| value == literal.polarity())
    }

    /// The value last held by `atom`.
    pub fn previous_value_of(&self, atom: Atom) -> bool {
        self.previous_valuation
            .get(atom as usize)
            .copied()
            .unwrap_or(false)
    }

    /// The level at which `atom` was valued, if valued.
    pub fn level_of(&self, atom: Atom) -> Option<LevelIndex> {
        self.levels.get(atom as usize).copied().flatten()
    }

    /// The source of the value of `atom`, if valued.
    pub fn source_of(&self, atom: Atom) -> Option<AssignmentSource> {
        self.sources.get(atom as usize).copied().flatten()
    }

    /// Values the atom of `literal` with the polarity of `literal`, noting the level and source of the value.
    ///
    /// Returns the value of the atom prior to the call.
    /// If the atom already had a value, nothing is changed.
    pub fn set_value(
        &mut self,
        literal: CLiteral,
        level: LevelIndex,
        source: AssignmentSource,
    ) -> Option<bool> {
        let atom = literal.atom() as usize;
        match self.valuation.get(atom).copied().flatten() {
            None if atom < self.valuation.len() => {
                self.valuation[atom] = Some(literal.polarity());
                self.levels[atom] = Some(level);
                self.sources[atom] = Some(source);
                None
            }
            value => value,
        }
    }

    /// Clears the value of an atom, and places the atom on the activity heap.
    ///
    /// The cleared value is kept as the previous value of the atom.
    pub fn drop_value(&mut self, atom: Atom) {
        if atom == TOP_ATOM {
            return;
        }
        log::trace!(target: targets::VALUATION, "Cleared atom: {atom}");
        let index = atom as usize;
        if let Some(value) = self.valuation.get_mut(index).and_then(Option::take) {
            self.previous_valuation[index] = value;
        }
        if let Some(level) = self.levels.get_mut(index) {
            *level = None;
        }
        if let Some(source) = self.sources.get_mut(index) {
            *source = None;
        }
        self.activity_heap.activate(index);
    }
}
