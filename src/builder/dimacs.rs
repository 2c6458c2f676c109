use std::{collections::HashMap, io::BufRead};

use crate::{
    context::GenericContext,
    structures::{
        atom::Atom,
        clause::CClause,
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Reads a formula in DIMACS form, and returns a map from the integers of the formula to atoms of the context.
    ///
    /// - Lines beginning with `c` are comments, and a line beginning with `%` ends the formula.
    /// - A problem line (`p cnf <atoms> <clauses>`) is optional, though if present must be well formed.
    ///   The counts of the problem line are not checked against the formula.
    /// - Clauses end with `0`, and may span lines. A final clause without `0` is added.
    ///
    /// Each integer is given a fresh atom, and so the formula may be read into a context with existing atoms.
    ///
    /// ```rust
    /// # use otter_bv::context::Context;
    /// # use otter_bv::config::Config;
    /// # use otter_bv::reports::Report;
    /// let mut the_context = Context::from_config(Config::default());
    ///
    /// let dimacs = b"
    /// c An unsatisfiable formula.
    /// p cnf 4 7
    ///  1  2       0
    ///  1 -2       0
    /// -1  2       0
    /// -1 -2       0
    ///  1  2  3    0
    /// -1  2 -3    0
    ///        3 -4 0
    /// ";
    ///
    /// let atoms = the_context.read_dimacs(dimacs.as_slice()).unwrap();
    /// assert_eq!(atoms.len(), 4);
    /// assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
    /// ```
    pub fn read_dimacs(&mut self, reader: impl BufRead) -> Result<HashMap<i64, Atom>, ErrorKind> {
        let mut atom_map = HashMap::<i64, Atom>::default();
        let mut clause: CClause = Vec::default();
        let mut formula_started = false;

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|_| ErrorKind::from(err::ParseError::Line(line_number)))?;

            match line.trim_start().chars().next() {
                None | Some('c') => continue,
                Some('%') => break,
                Some('p') if !formula_started => {
                    check_problem_line(&line)?;
                    formula_started = true;
                    continue;
                }
                _ => formula_started = true,
            }

            for item in line.split_whitespace() {
                let integer = item
                    .parse::<i64>()
                    .map_err(|_| ErrorKind::from(err::ParseError::Literal(line_number)))?;

                if integer == 0 {
                    self.add_clause(std::mem::take(&mut clause))?;
                    continue;
                }

                let atom = match atom_map.get(&integer.abs()) {
                    Some(atom) => *atom,
                    None => {
                        let fresh = self.fresh_atom(false)?;
                        atom_map.insert(integer.abs(), fresh);
                        fresh
                    }
                };
                clause.push(CLiteral::new(atom, integer.is_positive()));
            }
        }

        if !clause.is_empty() {
            self.add_clause(clause)?;
        }

        Ok(atom_map)
    }
}

/// Checks a problem line has the form `p cnf <atoms> <clauses>`.
fn check_problem_line(line: &str) -> Result<(), ErrorKind> {
    let mut parts = line.split_whitespace().skip(1);
    let format = parts.next();
    let counts = (parts.next(), parts.next());
    match (format, counts) {
        (Some("cnf"), (Some(atoms), Some(clauses)))
            if atoms.parse::<usize>().is_ok() && clauses.parse::<usize>().is_ok() =>
        {
            Ok(())
        }
        _ => Err(err::ParseError::ProblemSpecification.into()),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        context::Context,
        types::err::{ErrorKind, ParseError},
    };

    #[test]
    fn malformed_problem_line() {
        let mut the_context = Context::from_config(Config::default());
        let dimacs = b"p cnf four 2\n1 0\n";
        assert_eq!(
            the_context.read_dimacs(dimacs.as_slice()),
            Err(ErrorKind::Parse(ParseError::ProblemSpecification))
        );
    }

    #[test]
    fn clause_across_lines() {
        let mut the_context = Context::from_config(Config::default());
        let dimacs = b"c comment\n1 -2\n3 0\n% end\n4 5 0\n";
        let atoms = the_context.read_dimacs(dimacs.as_slice()).expect("read");
        assert_eq!(atoms.len(), 3);
        assert_eq!(the_context.clause_db.original_count(), 1);
    }
}
