//! A cardinality constraint: strictly fewer than some number of literals may be true.

use crate::structures::literal::CLiteral;

use super::{Module, ModuleConflict, ModuleHandle};

/// At most `max_ones - 1` of `literals` are true.
///
/// - Decisions prefer to make the first free literal false.
/// - If `max_ones` literals are true, the true literals conflict.
/// - If `max_ones - 1` literals are true, every free literal is inferred false.
///
/// So, with `max_ones` of zero the constraint is unsatisfiable whenever enabled.
pub struct CardinalityLessThan {
    literals: Vec<CLiteral>,
    max_ones: usize,
}

impl CardinalityLessThan {
    /// A constraint that fewer than `max_ones` of `literals` are true.
    pub fn new(literals: Vec<CLiteral>, max_ones: usize) -> Self {
        CardinalityLessThan { literals, max_ones }
    }

    /// The bound of the constraint.
    pub fn max_ones(&self) -> usize {
        self.max_ones
    }
}

impl Module for CardinalityLessThan {
    fn variables(&self) -> &[CLiteral] {
        &self.literals
    }

    fn decide(&mut self, handle: &ModuleHandle) -> Option<CLiteral> {
        self.literals
            .iter()
            .find(|literal| handle.is_free(**literal))
            .map(|literal| -*literal)
    }

    fn propagate(&mut self, handle: &mut ModuleHandle) -> Option<ModuleConflict> {
        let true_literals = self
            .literals
            .iter()
            .copied()
            .filter(|literal| handle.value_of(*literal) == Some(true))
            .collect::<Vec<_>>();

        if true_literals.len() >= self.max_ones {
            return Some(handle.make_conflict(&true_literals));
        }

        if true_literals.len() + 1 == self.max_ones {
            for literal in &self.literals {
                if handle.is_free(*literal) {
                    handle.infer_literal(-*literal, &true_literals);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        db::atom::AtomDB,
        structures::{consequence::AssignmentSource, literal::Literal},
    };

    fn setup(count: usize) -> (AtomDB, Vec<CLiteral>, CLiteral) {
        let mut atom_db = AtomDB::new(&Config::default());
        let literals = (0..count)
            .map(|_| CLiteral::new(atom_db.fresh_atom(false).expect("atom"), true))
            .collect::<Vec<_>>();
        let enable = CLiteral::new(atom_db.fresh_atom(false).expect("atom"), true);
        atom_db.set_value(enable, 0, AssignmentSource::Assumption);
        (atom_db, literals, enable)
    }

    #[test]
    fn decides_false() {
        let (mut atom_db, literals, enable) = setup(3);
        atom_db.set_value(literals[0], 1, AssignmentSource::Decision);

        let mut module = CardinalityLessThan::new(literals.clone(), 2);
        let handle = ModuleHandle::new(&atom_db, enable);
        assert_eq!(module.decide(&handle), Some(-literals[1]));
    }

    #[test]
    fn infers_at_bound() {
        let (mut atom_db, literals, enable) = setup(3);
        atom_db.set_value(literals[1], 1, AssignmentSource::Decision);

        let mut module = CardinalityLessThan::new(literals.clone(), 2);
        let mut handle = ModuleHandle::new(&atom_db, enable);
        assert!(module.propagate(&mut handle).is_none());

        let inferred = handle
            .into_inferences()
            .into_iter()
            .map(|inference| inference.literal)
            .collect::<Vec<_>>();
        assert_eq!(inferred, vec![-literals[0], -literals[2]]);
    }

    #[test]
    fn conflicts_over_bound() {
        let (mut atom_db, literals, enable) = setup(3);
        atom_db.set_value(literals[0], 1, AssignmentSource::Decision);
        atom_db.set_value(literals[2], 2, AssignmentSource::Decision);

        let mut module = CardinalityLessThan::new(literals.clone(), 2);
        let mut handle = ModuleHandle::new(&atom_db, enable);
        let conflict = module.propagate(&mut handle).expect("conflict");
        assert_eq!(
            conflict.clause(),
            &vec![-literals[0], -literals[2], -enable]
        );
    }

    #[test]
    fn handle_view() {
        let (mut atom_db, literals, enable) = setup(2);
        atom_db.set_value(-literals[0], 1, AssignmentSource::Decision);

        let handle = ModuleHandle::new(&atom_db, enable);
        assert!(handle.is_enabled());
        assert_eq!(handle.enable_literal(), enable);
        assert!(handle.is_set(literals[0]));
        assert_eq!(handle.value_of(literals[0]), Some(false));
        assert!(handle.is_free(literals[1]));

        let disabled = ModuleHandle::new(&atom_db, -enable);
        assert!(!disabled.is_enabled());
    }
}
