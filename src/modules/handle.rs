use crate::{
    db::atom::AtomDB,
    structures::literal::{CLiteral, Literal},
};

use super::ModuleConflict;

/// A literal inferred by a module, together with the (true) literals which justify the inference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inference {
    /// The inferred literal.
    pub literal: CLiteral,

    /// Literals, each true, which together with the module constraint imply the inferred literal.
    pub reasons: Vec<CLiteral>,
}

/// The view a module has of a context during a call to [decide](super::Module::decide) or [propagate](super::Module::propagate).
///
/// Inferences are buffered by the handle, and applied by the context after the call returns.
pub struct ModuleHandle<'a> {
    atom_db: &'a AtomDB,

    enable: CLiteral,

    inferences: Vec<Inference>,
}

impl<'a> ModuleHandle<'a> {
    /// A handle over the valuation of `atom_db`, for a module enabled by `enable`.
    pub fn new(atom_db: &'a AtomDB, enable: CLiteral) -> Self {
        ModuleHandle {
            atom_db,
            enable,
            inferences: Vec::default(),
        }
    }

    /// The value of `literal`: Some(true) if the literal is true, Some(false) if false, and None otherwise.
    pub fn value_of(&self, literal: CLiteral) -> Option<bool> {
        self.atom_db.value_of_literal(literal)
    }

    /// True if the atom of `literal` has no value.
    pub fn is_free(&self, literal: CLiteral) -> bool {
        self.value_of(literal).is_none()
    }

    /// True if the atom of `literal` has some value.
    pub fn is_set(&self, literal: CLiteral) -> bool {
        self.value_of(literal).is_some()
    }

    /// True if the enable literal of the module is true.
    pub fn is_enabled(&self) -> bool {
        self.value_of(self.enable) == Some(true)
    }

    /// The enable literal of the module.
    pub fn enable_literal(&self) -> CLiteral {
        self.enable
    }

    /// Infers `literal`, as a consequence of `reasons`.
    ///
    /// Each reason should be true.
    /// The inference is applied after the module returns, with the clause `literal ∨ ¬reasons ∨ ¬enable` as the reason for the value of `literal`.
    pub fn infer_literal(&mut self, literal: CLiteral, reasons: &[CLiteral]) {
        self.inferences.push(Inference {
            literal,
            reasons: reasons.to_vec(),
        });
    }

    /// A conflict from a set of true literals which (together with the module constraint) cannot all be true.
    ///
    /// The clause of the conflict is the negation of each literal, together with the negation of the enable literal.
    pub fn make_conflict(&self, true_literals: &[CLiteral]) -> ModuleConflict {
        let mut clause = true_literals
            .iter()
            .map(|literal| literal.negate())
            .collect::<Vec<_>>();
        clause.push(self.enable.negate());
        ModuleConflict::from_clause(clause)
    }

    /// The inferences made through the handle, in order.
    pub fn into_inferences(self) -> Vec<Inference> {
        self.inferences
    }
}
