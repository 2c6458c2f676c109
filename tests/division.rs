use otter_bv::{
    solver::{BitValue, Solver},
    terms::{constant, eval, Opcode, Term},
};

fn fix(solver: &mut Solver, term: Term, value: u64) {
    let width = solver.width(term).unwrap();
    let constant = solver.add_constant(width, value).unwrap();
    let equal = solver.add_operator(Opcode::EQUAL, &[term, constant]).unwrap();
    solver.add_assertion(equal, true).unwrap();
}

mod concrete {
    use super::*;

    const DIVISIONS: [Opcode; 5] = [Opcode::UDIV, Opcode::UREM, Opcode::SDIV, Opcode::SREM, Opcode::SMOD];

    #[test]
    fn sampled_pairs() {
        let dividends = [0, 1, 5, 7, 8, 9, 15];
        let divisors = [0, 1, 2, 3, 7, 8, 15];

        for a in dividends {
            for b in divisors {
                let mut solver = Solver::new();
                let x = solver.add_variable(4, "x").unwrap();
                let y = solver.add_variable(4, "y").unwrap();
                fix(&mut solver, x, a);
                fix(&mut solver, y, b);

                let terms = DIVISIONS.map(|opcode| {
                    let term = solver.add_operator(opcode, &[x, y]).unwrap();
                    solver.term_literals(term).unwrap();
                    (opcode, term)
                });

                assert_eq!(solver.solve(), Ok(true));

                let inputs = [
                    constant::from_u64(4, a).unwrap(),
                    constant::from_u64(4, b).unwrap(),
                ];
                for (opcode, term) in terms {
                    let model = solver
                        .assignment(term)
                        .unwrap()
                        .into_iter()
                        .map(|bit| bit == BitValue::True)
                        .collect::<Vec<_>>();
                    assert_eq!(
                        model,
                        eval::evaluate(opcode, &[], &inputs),
                        "{opcode:?} on {a} and {b}"
                    );
                }
            }
        }
    }

    #[test]
    fn signs() {
        let mut solver = Solver::new();
        let minus_seven = solver.add_constant_str(8, "-7").unwrap();
        let two = solver.add_constant(8, 2).unwrap();
        let minus_two = solver.add_constant_str(8, "-2").unwrap();

        let expected = [
            (Opcode::SDIV, minus_seven, two, -3),
            (Opcode::SREM, minus_seven, two, -1),
            (Opcode::SMOD, minus_seven, two, 1),
            (Opcode::SDIV, two, minus_two, -1),
            (Opcode::SMOD, minus_seven, minus_two, -1),
        ];

        let mut checks = vec![];
        for (opcode, a, b, value) in expected {
            let term = solver.add_operator(opcode, &[a, b]).unwrap();
            solver.term_literals(term).unwrap();
            checks.push((term, value));
        }

        assert_eq!(solver.solve(), Ok(true));
        for (term, value) in checks {
            assert_eq!(constant::to_i64(&solver.evaluate(term).unwrap()), Some(value));
            let model = solver
                .assignment(term)
                .unwrap()
                .into_iter()
                .map(|bit| bit == BitValue::True)
                .collect::<Vec<_>>();
            assert_eq!(constant::to_i64(&model), Some(value));
        }
    }
}

mod symbolic {
    use super::*;

    #[test]
    fn division_by_zero() {
        let mut solver = Solver::new();
        let x = solver.add_variable(4, "x").unwrap();
        let zero = solver.add_constant(4, 0).unwrap();
        let ones = solver.add_constant(4, 15).unwrap();

        let quotient = solver.add_operator(Opcode::UDIV, &[x, zero]).unwrap();
        let all_ones = solver.add_operator(Opcode::EQUAL, &[quotient, ones]).unwrap();
        solver.add_assumption(all_ones, false).unwrap();
        assert_eq!(solver.solve(), Ok(false));

        let remainder = solver.add_operator(Opcode::UREM, &[x, zero]).unwrap();
        let dividend = solver.add_operator(Opcode::EQUAL, &[remainder, x]).unwrap();
        solver.add_assumption(dividend, false).unwrap();
        assert_eq!(solver.solve(), Ok(false));

        assert_eq!(solver.solve(), Ok(true));
    }

    #[test]
    fn quotient_and_remainder_recompose() {
        let mut solver = Solver::new();
        let x = solver.add_variable(4, "x").unwrap();
        let y = solver.add_variable(4, "y").unwrap();
        let zero = solver.add_constant(4, 0).unwrap();

        let quotient = solver.add_operator(Opcode::UDIV, &[x, y]).unwrap();
        let remainder = solver.add_operator(Opcode::UREM, &[x, y]).unwrap();
        let product = solver.add_operator(Opcode::MUL, &[quotient, y]).unwrap();
        let recomposed = solver.add_operator(Opcode::ADD, &[product, remainder]).unwrap();

        let nonzero = solver.add_operator(Opcode::NEQUAL, &[y, zero]).unwrap();
        let equal = solver.add_operator(Opcode::EQUAL, &[recomposed, x]).unwrap();
        let smaller = solver.add_operator(Opcode::ULT, &[remainder, y]).unwrap();

        solver.add_assertion(nonzero, true).unwrap();

        solver.add_assumption(equal, false).unwrap();
        assert_eq!(solver.solve(), Ok(false));

        solver.add_assumption(smaller, false).unwrap();
        assert_eq!(solver.solve(), Ok(false));

        assert_eq!(solver.solve(), Ok(true));
    }
}
