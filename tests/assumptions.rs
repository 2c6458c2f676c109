use otter_bv::{config::Config, context::Context, reports::Report};

mod context_assumptions {
    use super::*;

    #[test]
    fn satisfiable_under_assumption() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_or_max_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        assert!(ctx.add_assumption(-p).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.value_of(p), Some(false));
        assert_eq!(ctx.value_of(q), Some(true));
    }

    #[test]
    fn assumptions_hold_for_one_solve() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_or_max_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        assert!(ctx.add_assumption(-p).is_ok());
        assert!(ctx.add_assumption(-q).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.assumptions.is_empty());

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
    }

    #[test]
    fn small_chain() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r, s, t] = *ctx.fresh_or_max_literals(5).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![-p, q]).is_ok());
        assert!(ctx.add_clause(vec![-q, r]).is_ok());
        assert!(ctx.add_clause(vec![-r, s]).is_ok());
        assert!(ctx.add_clause(vec![-s, t]).is_ok());
        assert!(ctx.add_clause(-t).is_ok());

        assert!(ctx.add_assumption(p).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));

        assert!(ctx.add_assumption(-p).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.value_of(p), Some(false));
    }

    #[test]
    fn assumption_on_fresh_atom() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_or_max_literal();
        assert!(ctx.add_clause(p).is_ok());

        let later = otter_bv::structures::literal::CLiteral::from(4);
        assert!(ctx.add_assumption(later).is_ok());
        assert_eq!(ctx.atom_db.count(), 5);

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.value_of(later), Some(true));
    }
}

mod solver_assumptions {
    use otter_bv::{
        solver::Solver,
        terms::Opcode,
        types::err::{ErrorKind, QueryError},
    };

    #[test]
    fn conflicting_assumption() {
        let mut solver = Solver::new();
        let x = solver.add_variable(4, "x").unwrap();
        let five = solver.add_constant(4, 5).unwrap();
        let equal = solver.add_operator(Opcode::EQUAL, &[x, five]).unwrap();

        solver.add_assertion(equal, false).unwrap();
        solver.add_assumption(equal, true).unwrap();

        assert_eq!(solver.solve(), Ok(false));
        assert_eq!(
            solver.assignment(x),
            Err(ErrorKind::Query(QueryError::Unsatisfiable))
        );

        assert_eq!(solver.solve(), Ok(true));
        assert_ne!(solver.evaluate(x).unwrap(), solver.evaluate(five).unwrap());
    }

    #[test]
    fn assumed_value() {
        let mut solver = Solver::new();
        let x = solver.add_variable(8, "x").unwrap();
        let y = solver.add_variable(8, "y").unwrap();
        let sum = solver.add_operator(Opcode::ADD, &[x, y]).unwrap();
        let zero = solver.add_constant(8, 0).unwrap();
        let wraps = solver.add_operator(Opcode::EQUAL, &[sum, zero]).unwrap();
        solver.add_assertion(wraps, true).unwrap();

        let three = solver.add_constant(8, 3).unwrap();
        let is_three = solver.add_operator(Opcode::EQUAL, &[x, three]).unwrap();
        solver.add_assumption(is_three, true).unwrap();

        assert_eq!(solver.solve(), Ok(true));
        assert_eq!(solver.get_variable_assignment(y).unwrap(), vec![1, 0, 1, 1, 1, 1, 1, 1]);
    }
}
