use otter_bv::{
    solver::Solver,
    terms::Opcode,
    types::err::{ArityError, ErrorKind, QueryError, TypeError},
};

mod construction {
    use super::*;

    #[test]
    fn sharing() {
        let mut solver = Solver::new();
        let x = solver.add_variable(8, "x").unwrap();
        let y = solver.add_variable(8, "y").unwrap();

        let x_y = solver.add_operator(Opcode::ADD, &[x, y]).unwrap();
        let y_x = solver.add_operator(Opcode::ADD, &[y, x]).unwrap();
        assert_eq!(x_y, y_x);

        let x_less_y = solver.add_operator(Opcode::ULT, &[x, y]).unwrap();
        let y_less_x = solver.add_operator(Opcode::ULT, &[y, x]).unwrap();
        assert_ne!(x_less_y, y_less_x);

        assert_eq!(
            solver.add_constant(8, 18).unwrap(),
            solver.add_bin_constant("00010010").unwrap()
        );
        assert_eq!(
            solver.add_constant(8, 18).unwrap(),
            solver.add_hex_constant("12").unwrap()
        );

        // Variables are never shared, even with equal names.
        assert_ne!(x, solver.add_variable(8, "x").unwrap());

        // Structural operators which change nothing are the operand itself.
        assert_eq!(solver.add_extract(x, 0, 8), Ok(x));
        assert_eq!(solver.add_rotate_left(x, 16), Ok(x));
        assert_eq!(solver.add_zero_extend(x, 0), Ok(x));
        assert_eq!(solver.add_repeat(x, 1), Ok(x));
    }

    #[test]
    fn widths() {
        let mut solver = Solver::new();
        let x = solver.add_variable(8, "x").unwrap();
        let b = solver.add_variable(1, "b").unwrap();
        let wide = solver.add_variable(16, "wide").unwrap();

        let concat = solver.add_operator(Opcode::CONCAT, &[x, b, wide]).unwrap();
        assert_eq!(solver.width(concat), Ok(25));

        let extract = solver.add_extract(wide, 3, 7).unwrap();
        assert_eq!(solver.width(extract), Ok(4));

        let repeat = solver.add_repeat(x, 3).unwrap();
        assert_eq!(solver.width(repeat), Ok(24));

        let extended = solver.add_sign_extend(x, 8).unwrap();
        assert_eq!(solver.width(extended), Ok(16));

        let ite = solver.add_operator(Opcode::ITE, &[b, x, x]).unwrap();
        assert_eq!(solver.width(ite), Ok(8));

        let predicate = solver.add_operator(Opcode::DISTINCT, &[x, x, x]).unwrap();
        assert_eq!(solver.width(predicate), Ok(1));

        let reduced = solver.add_operator(Opcode::RED_AND, &[wide]).unwrap();
        assert_eq!(solver.width(reduced), Ok(1));
    }

    #[test]
    fn type_errors() {
        let mut solver = Solver::new();
        let x = solver.add_variable(8, "x").unwrap();
        let y = solver.add_variable(4, "y").unwrap();

        assert_eq!(
            solver.add_operator(Opcode::ADD, &[x, y]),
            Err(ErrorKind::Type(TypeError::WidthMismatch {
                opcode: Opcode::ADD,
                expected: 8,
                found: 4,
            }))
        );

        assert_eq!(
            solver.add_extract(x, 4, 9),
            Err(ErrorKind::Type(TypeError::ExtractRange {
                low: 4,
                high: 9,
                width: 8,
            }))
        );

        assert_eq!(
            solver.add_operator(Opcode::ITE, &[x, x, x]),
            Err(ErrorKind::Type(TypeError::NotBoolean { width: 8 }))
        );

        assert_eq!(
            solver.add_operator(Opcode::EXTRACT, &[x]),
            Err(ErrorKind::Type(TypeError::Parameterised(Opcode::EXTRACT)))
        );

        assert_eq!(solver.add_variable(0, "z"), Err(ErrorKind::Type(TypeError::ZeroWidth)));
        assert_eq!(
            solver.add_constant(4, 16),
            Err(ErrorKind::Type(TypeError::ConstantOverflow { width: 4 }))
        );
        assert!(matches!(
            solver.add_hex_constant("1g"),
            Err(ErrorKind::Type(TypeError::InvalidConstant(_)))
        ));

        assert!(matches!(
            solver.add_operator(Opcode::SELECT, &[x, y]),
            Err(ErrorKind::Type(TypeError::AddressSpace { .. }))
        ));
    }

    #[test]
    fn arity_errors() {
        let mut solver = Solver::new();
        let x = solver.add_variable(8, "x").unwrap();

        assert_eq!(
            solver.add_operator(Opcode::ADD, &[x]),
            Err(ErrorKind::Arity(ArityError::TooFew {
                opcode: Opcode::ADD,
                minimum: 2,
                found: 1,
            }))
        );

        assert_eq!(
            solver.add_operator(Opcode::NOT, &[x, x]),
            Err(ErrorKind::Arity(ArityError::TooMany {
                opcode: Opcode::NOT,
                maximum: 1,
                found: 2,
            }))
        );

        assert!(solver.add_operator(Opcode::AND, &[x, x, x, x]).is_ok());
    }

    #[test]
    fn constants() {
        let mut solver = Solver::new();
        let minus_one = solver.add_constant_str(8, "-1").unwrap();
        assert_eq!(minus_one, solver.add_constant(8, 255).unwrap());
        assert_eq!(minus_one, solver.add_hex_constant("ff").unwrap());

        let minimum = solver.add_constant_str(8, "-128").unwrap();
        assert_eq!(minimum, solver.add_bin_constant("10000000").unwrap());
        assert_eq!(
            solver.add_constant_str(8, "-129"),
            Err(ErrorKind::Type(TypeError::ConstantOverflow { width: 8 }))
        );
        assert_eq!(
            solver.add_constant_str(8, "256"),
            Err(ErrorKind::Type(TypeError::ConstantOverflow { width: 8 }))
        );

        let padded = solver.add_bin_constant_width(8, "101").unwrap();
        assert_eq!(padded, solver.add_constant(8, 5).unwrap());
        let hex = solver.add_hex_constant_width(12, "a").unwrap();
        assert_eq!(hex, solver.add_constant(12, 10).unwrap());

        assert_eq!(solver.display(padded).unwrap(), "#b00000101");
    }

    #[test]
    fn display() {
        let mut solver = Solver::new();
        let x = solver.add_variable(4, "x").unwrap();
        let one = solver.add_constant(4, 1).unwrap();
        let shifted = solver.add_operator(Opcode::LSHL, &[x, one]).unwrap();
        let top = solver.add_extract(shifted, 2, 4).unwrap();

        assert_eq!(solver.display(top).unwrap(), "(extract 2 4 (<< x #b0001))");
    }
}

mod queries {
    use otter_bv::reports::Report;

    use super::*;

    #[test]
    fn not_boolean() {
        let mut solver = Solver::new();
        let x = solver.add_variable(8, "x").unwrap();
        assert_eq!(
            solver.add_assertion(x, true),
            Err(ErrorKind::Type(TypeError::NotBoolean { width: 8 }))
        );
        assert_eq!(
            solver.add_assumption(x, false),
            Err(ErrorKind::Type(TypeError::NotBoolean { width: 8 }))
        );
    }

    #[test]
    fn before_a_solve() {
        let mut solver = Solver::new();
        let x = solver.add_variable(8, "x").unwrap();
        assert_eq!(solver.report(), Report::Unknown);
        assert_eq!(solver.assignment(x), Err(ErrorKind::Query(QueryError::NotSolved)));
    }

    #[test]
    fn after_unsatisfiable() {
        let mut solver = Solver::new();
        let x = solver.add_variable(8, "x").unwrap();
        let never = solver.add_operator(Opcode::NEQUAL, &[x, x]).unwrap();
        solver.add_assertion(never, true).unwrap();

        assert_eq!(solver.solve(), Ok(false));
        assert_eq!(solver.report(), Report::Unsatisfiable);
        assert_eq!(solver.evaluate(x), Err(ErrorKind::Query(QueryError::Unsatisfiable)));
    }

    #[test]
    fn foreign_terms() {
        let mut solver = Solver::new();
        let mut other = Solver::new();

        let x = solver.add_variable(8, "x").unwrap();
        let y = other.add_variable(8, "y").unwrap();
        let odd = other.add_extract(y, 0, 1).unwrap();
        other.add_assertion(odd, true).unwrap();

        assert_eq!(
            other.add_operator(Opcode::NOT, &[x]),
            Err(ErrorKind::Type(TypeError::ForeignTerm))
        );

        assert_eq!(other.solve(), Ok(true));
        assert_eq!(other.assignment(x), Err(ErrorKind::Query(QueryError::ForeignTerm)));
        assert_eq!(other.get_variable_assignment(y).unwrap()[0], 1);
    }

    #[test]
    fn terminated() {
        let mut solver = Solver::new();
        let x = solver.add_variable(8, "x").unwrap();
        let zero = solver.add_constant(8, 0).unwrap();
        let nonzero = solver.add_operator(Opcode::NEQUAL, &[x, zero]).unwrap();
        solver.add_assertion(nonzero, true).unwrap();

        solver.set_terminate_callback(Box::new(|| true));

        assert_eq!(solver.solve(), Ok(false));
        assert_eq!(solver.report(), Report::Unknown);
        assert_eq!(solver.assignment(x), Err(ErrorKind::Query(QueryError::Unknown)));

        solver.set_terminate_callback(Box::new(|| false));
        assert_eq!(solver.solve(), Ok(true));
        assert_ne!(solver.evaluate(x).unwrap(), vec![false; 8]);
    }
}

mod recording {
    use super::*;

    #[test]
    fn replay_log() {
        let path = std::env::temp_dir().join(format!("otter_bv_record_{}.txt", std::process::id()));

        let mut solver = Solver::new();
        solver.record_to(&path).unwrap();

        let x = solver.add_variable(8, "x").unwrap();
        let y = solver.add_variable(8, "y").unwrap();
        let product = solver.add_operator(Opcode::MUL, &[x, y]).unwrap();
        let eighteen = solver.add_constant(8, 18).unwrap();
        let equation = solver.add_operator(Opcode::EQUAL, &[product, eighteen]).unwrap();
        solver.add_assertion(equation, true).unwrap();
        assert_eq!(solver.solve(), Ok(true));

        let log = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(
            log.lines().collect::<Vec<_>>(),
            vec![
                "t0 = variable 8 x",
                "t1 = variable 8 y",
                "t2 = operator * t0 t1",
                "t3 = constant 8 00010010",
                "t4 = operator = t2 t3",
                "assert t4 true",
                "solve Satisfiable",
            ]
        );
    }
}
