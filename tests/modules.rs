use std::{cell::RefCell, rc::Rc};

use otter_bv::{
    modules::{CardinalityLessThan, Change, Module, ModuleConflict, ModuleHandle},
    reports::Report,
    solver::Solver,
    structures::literal::CLiteral,
    terms::{constant, Opcode},
    types::err::{ErrorKind, ModuleError},
};

mod cardinality {
    use super::*;

    #[test]
    fn every_model() {
        let mut solver = Solver::new();
        let x = solver.add_variable(4, "x").unwrap();
        let x_bits = solver.term_literals(x).unwrap();
        solver
            .add_and_assert_module(Box::new(CardinalityLessThan::new(x_bits, 2)))
            .unwrap();

        let mut models = vec![];
        while solver.solve() == Ok(true) {
            let value = constant::to_u64(&solver.evaluate(x).unwrap()).unwrap();
            models.push(value);

            let found = solver.add_constant(4, value).unwrap();
            let other = solver.add_operator(Opcode::NEQUAL, &[x, found]).unwrap();
            solver.add_assertion(other, true).unwrap();
        }

        models.sort_unstable();
        assert_eq!(models, vec![0, 1, 2, 4, 8]);
    }

    #[test]
    fn with_arithmetic() {
        let mut solver = Solver::new();
        let x = solver.add_variable(8, "x").unwrap();
        let y = solver.add_variable(8, "y").unwrap();
        let sum = solver.add_operator(Opcode::ADD, &[x, y]).unwrap();
        let target = solver.add_constant(8, 255).unwrap();
        let equal = solver.add_operator(Opcode::EQUAL, &[sum, target]).unwrap();
        solver.add_assertion(equal, true).unwrap();

        let x_bits = solver.term_literals(x).unwrap();
        solver
            .add_and_assert_module(Box::new(CardinalityLessThan::new(x_bits, 3)))
            .unwrap();

        assert_eq!(solver.solve(), Ok(true));
        let x_value = solver.get_variable_assignment(x).unwrap();
        assert!(x_value.iter().filter(|bit| **bit == 1).count() < 3);

        // The sum of x and y is all ones, and so y holds the remaining bits.
        let y_value = solver.get_variable_assignment(y).unwrap();
        assert!(y_value.iter().filter(|bit| **bit == 1).count() > 5);
    }

    #[test]
    fn enabled_by_assumption() {
        let mut solver = Solver::new();
        let x = solver.add_variable(4, "x").unwrap();
        let three = solver.add_constant(4, 3).unwrap();
        let equal = solver.add_operator(Opcode::EQUAL, &[x, three]).unwrap();
        solver.add_assertion(equal, true).unwrap();

        let x_bits = solver.term_literals(x).unwrap();
        let enable = solver
            .add_module(Box::new(CardinalityLessThan::new(x_bits, 2)))
            .unwrap();

        assert_eq!(solver.solve(), Ok(true));
        assert_eq!(solver.evaluate(enable).unwrap(), vec![false]);

        solver.add_assumption(enable, true).unwrap();
        assert_eq!(solver.solve(), Ok(false));

        solver.add_assumption(enable, false).unwrap();
        assert_eq!(solver.solve(), Ok(true));
    }

    #[test]
    fn conflicting_modules() {
        let mut solver = Solver::new();
        let x = solver.add_variable(4, "x").unwrap();
        let x_bits = solver.term_literals(x).unwrap();

        // At most one bit set, and at most one bit clear.
        let inverted = x_bits.iter().map(|literal| -*literal).collect::<Vec<_>>();
        solver
            .add_and_assert_module(Box::new(CardinalityLessThan::new(x_bits, 2)))
            .unwrap();
        solver
            .add_and_assert_module(Box::new(CardinalityLessThan::new(inverted, 2)))
            .unwrap();

        assert_eq!(solver.solve(), Ok(false));
    }

    #[test]
    fn unsatisfiable_again_without_changes() {
        let mut solver = Solver::new();
        let x = solver.add_variable(4, "x").unwrap();
        let seven = solver.add_constant(4, 7).unwrap();
        let equal = solver.add_operator(Opcode::EQUAL, &[x, seven]).unwrap();
        solver.add_assertion(equal, true).unwrap();

        let x_bits = solver.term_literals(x).unwrap();
        solver
            .add_and_assert_module(Box::new(CardinalityLessThan::new(x_bits, 3)))
            .unwrap();

        let first = solver.solve();
        let second = solver.solve();
        assert_eq!(first, Ok(false));
        assert_eq!(first, second);
        assert_eq!(solver.report(), Report::Unsatisfiable);
    }
}

/// Infers `consequent` from `antecedent`, though only once every literal of `delay` has a value.
///
/// Decides on `antecedent` and then each literal of `delay`, so the inference is made levels above the level of its reason.
struct Procrastinator {
    antecedent: CLiteral,
    consequent: CLiteral,
    delay: Vec<CLiteral>,
    declared: Vec<CLiteral>,
    changes: Rc<RefCell<Vec<Change>>>,
}

impl Procrastinator {
    fn new(antecedent: CLiteral, consequent: CLiteral, delay: Vec<CLiteral>) -> Self {
        let mut declared = vec![antecedent, consequent];
        declared.extend(delay.iter().copied());
        Procrastinator {
            antecedent,
            consequent,
            delay,
            declared,
            changes: Rc::default(),
        }
    }
}

impl Module for Procrastinator {
    fn variables(&self) -> &[CLiteral] {
        &self.declared
    }

    fn decide(&mut self, handle: &ModuleHandle) -> Option<CLiteral> {
        std::iter::once(self.antecedent)
            .chain(self.delay.iter().copied())
            .find(|literal| handle.is_free(*literal))
    }

    fn propagate(&mut self, handle: &mut ModuleHandle) -> Option<ModuleConflict> {
        let waiting = self.delay.iter().any(|literal| handle.is_free(*literal));
        if !waiting
            && handle.value_of(self.antecedent) == Some(true)
            && handle.is_free(self.consequent)
        {
            handle.infer_literal(self.consequent, &[self.antecedent]);
        }
        None
    }

    fn notify(&mut self, change: Change) {
        self.changes.borrow_mut().push(change);
    }
}

mod late_inference {
    use super::*;

    #[test]
    fn backjumps_to_the_reason() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut solver = Solver::new();
        let a = solver.add_variable(1, "a").unwrap();
        let b = solver.add_variable(1, "b").unwrap();
        let c = solver.add_variable(1, "c").unwrap();
        let u = solver.add_variable(3, "u").unwrap();

        // b implies c, so the inference of b is followed by propagation.
        let implies = solver.add_operator(Opcode::IMPLIES, &[b, c]).unwrap();
        solver.add_assertion(implies, true).unwrap();

        let antecedent = solver.term_literals(a).unwrap()[0];
        let consequent = solver.term_literals(b).unwrap()[0];
        let delay = solver.term_literals(u).unwrap();
        let module = Procrastinator::new(antecedent, consequent, delay.clone());
        let changes = module.changes.clone();
        solver.add_and_assert_module(Box::new(module)).unwrap();

        assert_eq!(solver.solve(), Ok(true));
        assert!(solver.counters().module_inferences > 0);

        assert_eq!(solver.get_variable_assignment(a).unwrap(), vec![1]);
        assert_eq!(solver.get_variable_assignment(b).unwrap(), vec![1]);
        assert_eq!(solver.get_variable_assignment(c).unwrap(), vec![1]);

        // Some delaying literal lost its value before the inferred literal was assigned.
        let changes = changes.borrow();
        let inferred = changes
            .iter()
            .position(|change| *change == Change::Assigned(consequent))
            .unwrap();
        assert!(changes[..inferred].iter().any(|change| match change {
            Change::Unassigned(literal) => delay.contains(literal) || delay.contains(&-*literal),
            Change::Assigned(_) => false,
        }));
    }
}

/// Passes any declared literal which is true to a conflict, as the clause given.
struct NoEnable {
    literals: Vec<CLiteral>,
}

impl Module for NoEnable {
    fn variables(&self) -> &[CLiteral] {
        &self.literals
    }

    fn propagate(&mut self, handle: &mut ModuleHandle) -> Option<ModuleConflict> {
        self.literals
            .iter()
            .find(|literal| handle.value_of(**literal) == Some(true))
            .map(|literal| ModuleConflict::from_clause(vec![-*literal]))
    }
}

/// Decides on some literal it never declared.
struct Wanderer {
    declared: Vec<CLiteral>,
    elsewhere: CLiteral,
}

impl Module for Wanderer {
    fn variables(&self) -> &[CLiteral] {
        &self.declared
    }

    fn decide(&mut self, _: &ModuleHandle) -> Option<CLiteral> {
        Some(self.elsewhere)
    }
}

/// Records every change passed to the module.
struct Observer {
    literals: Vec<CLiteral>,
    changes: Rc<RefCell<Vec<Change>>>,
}

impl Module for Observer {
    fn variables(&self) -> &[CLiteral] {
        &self.literals
    }

    fn notify(&mut self, change: Change) {
        self.changes.borrow_mut().push(change);
    }
}

mod contract {
    use super::*;

    #[test]
    fn conflict_without_enable() {
        let mut solver = Solver::new();
        let b = solver.add_variable(1, "b").unwrap();
        let b_bits = solver.term_literals(b).unwrap();
        solver.add_assertion(b, true).unwrap();

        solver
            .add_and_assert_module(Box::new(NoEnable { literals: b_bits }))
            .unwrap();

        assert_eq!(solver.solve(), Err(ErrorKind::Module(ModuleError::MissingEnable)));
    }

    #[test]
    fn undeclared_decision() {
        let mut solver = Solver::new();
        let a = solver.add_variable(1, "a").unwrap();
        let b = solver.add_variable(1, "b").unwrap();
        let declared = solver.term_literals(a).unwrap();
        let elsewhere = solver.term_literals(b).unwrap()[0];

        solver
            .add_and_assert_module(Box::new(Wanderer { declared, elsewhere }))
            .unwrap();

        assert_eq!(
            solver.solve(),
            Err(ErrorKind::Module(ModuleError::UndeclaredDecision(elsewhere)))
        );
    }

    #[test]
    fn notifications_balance() {
        let mut solver = Solver::new();
        let x = solver.add_variable(6, "x").unwrap();
        let y = solver.add_variable(6, "y").unwrap();
        let product = solver.add_operator(Opcode::MUL, &[x, y]).unwrap();
        let target = solver.add_constant(6, 36).unwrap();
        let equal = solver.add_operator(Opcode::EQUAL, &[product, target]).unwrap();
        solver.add_assertion(equal, true).unwrap();

        let literals = solver.term_literals(x).unwrap();
        let changes = Rc::new(RefCell::new(vec![]));
        solver
            .add_and_assert_module(Box::new(Observer {
                literals: literals.clone(),
                changes: changes.clone(),
            }))
            .unwrap();

        assert_eq!(solver.solve(), Ok(true));

        let values = solver.get_variable_assignment(x).unwrap();
        for (literal, value) in literals.iter().zip(values) {
            let mut balance = 0;
            let mut last = None;
            for change in changes.borrow().iter() {
                match change {
                    Change::Assigned(changed) if changed == literal || *changed == -*literal => {
                        balance += 1;
                        last = Some(*changed == *literal);
                    }
                    Change::Unassigned(changed) if changed == literal || *changed == -*literal => {
                        balance -= 1;
                    }
                    _ => {}
                }
            }
            assert_eq!(balance, 1);
            assert_eq!(last, Some(value == 1));
        }
    }
}
