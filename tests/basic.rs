use otter_bv::{builder::ClauseOk, config::Config, context::Context, reports::Report};

mod basic {
    use otter_bv::{
        structures::{
            clause::{CClause, Clause},
            literal::CLiteral,
        },
        types::err::{self, ErrorKind},
    };

    use super::*;

    #[test]
    fn one_literal() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_or_max_literal();

        assert_eq!(Ok(ClauseOk::Added), ctx.add_clause(p));

        assert!(ctx.solve().is_ok());

        assert_eq!(ctx.report(), Report::Satisfiable);
        assert_eq!(ctx.value_of(p), Some(true));
    }

    #[test]
    fn conflict() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_or_max_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        assert!(ctx.add_clause(vec![-p, -q]).is_ok());
        assert!(ctx.add_clause(vec![p, -q]).is_ok());
        assert!(ctx.add_clause(vec![-p, q]).is_ok());

        assert!(ctx.solve().is_ok());
        assert_eq!(ctx.report(), Report::Unsatisfiable);

        // Unsatisfiability without assumptions is permanent.
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn unit_conjunct() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_or_max_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert_eq!(Ok(ClauseOk::Added), ctx.add_clause(vec![p, q]));
        assert!(ctx.add_clause(-p).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        assert_eq!(ctx.value_of(p), Some(false));
        assert_eq!(ctx.value_of(q), Some(true));
    }

    #[test]
    fn tautology_and_duplicates() {
        let mut ctx = Context::from_config(Config::default());
        let [p, q] = *ctx.fresh_or_max_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert_eq!(ctx.add_clause(vec![p, q, -p]), Ok(ClauseOk::Tautology));
        assert_eq!(ctx.add_clause(vec![q, q, q]), Ok(ClauseOk::Added));
        assert_eq!(
            ctx.add_clause(CClause::default()),
            Err(ErrorKind::ClauseDB(err::ClauseDBError::EmptyClause))
        );

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.value_of(q), Some(true));
    }

    #[test]
    fn fresh_atoms_through_clauses() {
        let mut ctx = Context::from_config(Config::default());
        assert!(ctx.add_clause(vec![CLiteral::from(7), CLiteral::from(-3)]).is_ok());
        assert_eq!(ctx.atom_db.count(), 8);
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
    }

    #[test]
    fn every_valuation() {
        let mut ctx = Context::from_config(Config::default());
        let literals = ctx.fresh_or_max_literals(4);

        let mut count = 0;
        while ctx.solve() == Ok(Report::Satisfiable) {
            count += 1;
            let blocking = literals
                .iter()
                .map(|literal| match ctx.value_of(*literal) {
                    Some(true) => -*literal,
                    _ => *literal,
                })
                .collect::<CClause>();
            assert!(ctx.add_clause(blocking).is_ok());
        }

        assert_eq!(count, 16);
    }

    #[test]
    fn model_satisfies_formula() {
        let mut ctx = Context::from_config(Config::default());
        let dimacs = b"
p cnf 5 6
 1  2 -3 0
-1  4    0
-2 -4  5 0
 3 -5    0
-1 -2    0
 2  3  4 0
";
        assert!(ctx.read_dimacs(dimacs.as_slice()).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        let valuation = ctx.atom_db.valuation_canonical().clone();
        for clause in ctx.clause_db.original_clauses() {
            assert!(!clause.unsatisfiable_on(&valuation), "{}", clause.as_dimacs(true));
        }
    }
}

mod state {
    use super::*;

    #[test]
    fn unsatisfiable_clause_is_kept() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_or_max_literal();

        assert!(ctx.add_clause(p).is_ok());
        assert!(ctx.unsatisfiable_clause().is_err());

        assert!(ctx.add_clause(-p).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.unsatisfiable_clause().is_ok());
    }

    #[test]
    fn clear_decisions() {
        let mut ctx = Context::from_config(Config::default());
        let [p, q, r] = *ctx.fresh_or_max_literals(3).as_slice() else {
            panic!("Insufficient literals");
        };
        assert!(ctx.add_clause(vec![p, q, r]).is_ok());
        assert!(ctx.add_clause(-r).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(ctx.value_of(p).is_some());

        ctx.clear_decisions();
        assert_eq!(ctx.trail.level(), 0);
        assert_eq!(ctx.value_of(p), None);
        assert_eq!(ctx.value_of(r), Some(false));
    }
}

mod dimacs {
    use otter_bv::types::err::{ErrorKind, ParseError};

    use super::*;

    #[test]
    fn pigeonhole_three_two() {
        let mut ctx = Context::from_config(Config::default());
        let dimacs = b"
c Three pigeons, two holes.
p cnf 6 9
1 2 0
3 4 0
5 6 0
-1 -3 0
-1 -5 0
-3 -5 0
-2 -4 0
-2 -6 0
-4 -6 0
";
        let atoms = ctx.read_dimacs(dimacs.as_slice());
        assert!(atoms.is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn bad_literal() {
        let mut ctx = Context::from_config(Config::default());
        let dimacs = b"1 2 0\n1 x 0\n";
        assert_eq!(
            ctx.read_dimacs(dimacs.as_slice()),
            Err(ErrorKind::Parse(ParseError::Literal(2)))
        );
    }

    #[test]
    fn trailing_clause() {
        let mut ctx = Context::from_config(Config::default());
        let dimacs = b"-1 0\n1 2";
        assert!(ctx.read_dimacs(dimacs.as_slice()).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.atom_db.value_of(1), Some(false));
    }
}
