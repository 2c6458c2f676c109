//! Boolean gates, as Tseitin definitions.
//!
//! Each gate is a fresh literal defined (by original clauses) to be equivalent to some function of its inputs.
//! Before a gate is built its inputs are simplified, and a gate with a constant or trivial output is never built.
//! So, for example, the conjunction of a literal with [top](CLiteral::top) is the literal itself.
//!
//! With gate sharing, gates are kept in a table keyed by kind and (normalised) inputs, and each distinct gate is built once.

use std::collections::HashMap;

use crate::{
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
    types::err::ErrorKind,
};

use super::Circuit;

/// The kind and inputs of a gate, after normalisation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Conjunction of two or more distinct literals, sorted.
    And(Vec<CLiteral>),

    /// Exclusive or of two distinct atoms, each of positive polarity and sorted.
    Xor(CLiteral, CLiteral),

    /// If-then-else, with a condition of positive polarity.
    Ite(CLiteral, CLiteral, CLiteral),
}

/// Gates built, and the results of unsigned divisions, for reuse.
#[derive(Default)]
pub struct GateTable {
    pub(super) sharing: bool,

    gates: HashMap<Gate, CLiteral>,

    /// Quotient and remainder of a dividend and divisor.
    pub(super) divisions: HashMap<(Vec<CLiteral>, Vec<CLiteral>), (Vec<CLiteral>, Vec<CLiteral>)>,

    gate_count: usize,
}

impl GateTable {
    /// A table, sharing gates if `sharing` is true.
    pub fn new(sharing: bool) -> Self {
        GateTable {
            sharing,
            ..Default::default()
        }
    }

    /// A count of gates built.
    pub fn gate_count(&self) -> usize {
        self.gate_count
    }
}

impl<R: rand::Rng + std::default::Default> Circuit<'_, R> {
    /// Adds `literals` as a clause, after removing constants.
    ///
    /// A clause containing [top](CLiteral::top) is skipped, and a clause of only [bottom](CLiteral::bottom) makes the context unsatisfiable.
    pub fn clause(&mut self, literals: &[CLiteral]) -> Result<(), ErrorKind> {
        let mut clause = Vec::with_capacity(literals.len());
        for literal in literals {
            match literal.constant_value() {
                Some(true) => return Ok(()),
                Some(false) => {}
                None => clause.push(*literal),
            }
        }
        if clause.is_empty() {
            clause.push(CLiteral::bottom());
        }
        self.context.add_clause(clause)?;
        Ok(())
    }

    /// The gate for `gate`, built with `define` if the gate is not shared.
    fn gate(
        &mut self,
        gate: Gate,
        define: impl FnOnce(CLiteral) -> Vec<Vec<CLiteral>>,
    ) -> Result<CLiteral, ErrorKind> {
        if self.table.sharing {
            if let Some(output) = self.table.gates.get(&gate) {
                return Ok(*output);
            }
        }

        let output = self.context.fresh_literal()?;
        log::trace!(target: targets::BLAST, "{output} := {gate:?}");
        for clause in define(output) {
            self.clause(&clause)?;
        }
        self.table.gate_count += 1;

        if self.table.sharing {
            self.table.gates.insert(gate, output);
        }
        Ok(output)
    }

    /// The conjunction of `literals`.
    pub fn and(&mut self, literals: &[CLiteral]) -> Result<CLiteral, ErrorKind> {
        let mut inputs = Vec::with_capacity(literals.len());
        for literal in literals {
            match literal.constant_value() {
                Some(true) => {}
                Some(false) => return Ok(CLiteral::bottom()),
                None => inputs.push(*literal),
            }
        }
        inputs.sort_unstable();
        inputs.dedup();
        if inputs.windows(2).any(|pair| pair[0].atom() == pair[1].atom()) {
            return Ok(CLiteral::bottom());
        }

        match inputs.as_slice() {
            [] => Ok(CLiteral::top()),
            [single] => Ok(*single),
            _ => {
                let gate = Gate::And(inputs.clone());
                self.gate(gate, |output| {
                    let mut clauses = inputs
                        .iter()
                        .map(|input| vec![-output, *input])
                        .collect::<Vec<_>>();
                    let mut long = inputs.iter().map(|input| -*input).collect::<Vec<_>>();
                    long.push(output);
                    clauses.push(long);
                    clauses
                })
            }
        }
    }

    /// The disjunction of `literals`.
    pub fn or(&mut self, literals: &[CLiteral]) -> Result<CLiteral, ErrorKind> {
        let negated = literals.iter().map(|literal| -*literal).collect::<Vec<_>>();
        Ok(-self.and(&negated)?)
    }

    /// The exclusive or of `a` and `b`.
    pub fn xor(&mut self, a: CLiteral, b: CLiteral) -> Result<CLiteral, ErrorKind> {
        if let Some(value) = a.constant_value() {
            return Ok(if value { -b } else { b });
        }
        if let Some(value) = b.constant_value() {
            return Ok(if value { -a } else { a });
        }
        if a == b {
            return Ok(CLiteral::bottom());
        }
        if a == -b {
            return Ok(CLiteral::top());
        }

        // x ⊕ y = ¬(¬x ⊕ y), so inputs are normalised to positive polarity with the flip applied to the output.
        let flip = a.polarity() != b.polarity();
        let (x, y) = match a.atom() < b.atom() {
            true => (CLiteral::new(a.atom(), true), CLiteral::new(b.atom(), true)),
            false => (CLiteral::new(b.atom(), true), CLiteral::new(a.atom(), true)),
        };

        let output = self.gate(Gate::Xor(x, y), |o| {
            vec![
                vec![-o, x, y],
                vec![-o, -x, -y],
                vec![o, -x, y],
                vec![o, x, -y],
            ]
        })?;
        Ok(if flip { -output } else { output })
    }

    /// The equivalence of `a` and `b`.
    pub fn iff(&mut self, a: CLiteral, b: CLiteral) -> Result<CLiteral, ErrorKind> {
        Ok(-self.xor(a, b)?)
    }

    /// `then` if `condition` is true, and `otherwise` otherwise.
    pub fn ite(&mut self, condition: CLiteral, then: CLiteral, otherwise: CLiteral) -> Result<CLiteral, ErrorKind> {
        if let Some(value) = condition.constant_value() {
            return Ok(if value { then } else { otherwise });
        }
        if then == otherwise {
            return Ok(then);
        }
        if then == -otherwise {
            return self.iff(condition, then);
        }
        if !condition.polarity() {
            return self.ite(-condition, otherwise, then);
        }

        match (then.constant_value(), otherwise.constant_value()) {
            (Some(true), _) => return self.or(&[condition, otherwise]),
            (Some(false), _) => return self.and(&[-condition, otherwise]),
            (_, Some(true)) => return self.or(&[-condition, then]),
            (_, Some(false)) => return self.and(&[condition, then]),
            _ => {}
        }

        if then.atom() == condition.atom() {
            return match then == condition {
                true => self.or(&[condition, otherwise]),
                false => self.and(&[-condition, otherwise]),
            };
        }
        if otherwise.atom() == condition.atom() {
            return match otherwise == condition {
                true => self.and(&[condition, then]),
                false => self.or(&[-condition, then]),
            };
        }

        self.gate(Gate::Ite(condition, then, otherwise), |o| {
            vec![
                vec![-o, -condition, then],
                vec![-o, condition, otherwise],
                vec![o, -condition, -then],
                vec![o, condition, -otherwise],
                vec![-o, then, otherwise],
                vec![o, -then, -otherwise],
            ]
        })
    }

    /// `then` if `condition` is true, and `otherwise` otherwise, bitwise.
    pub fn ite_bits(
        &mut self,
        condition: CLiteral,
        then: &[CLiteral],
        otherwise: &[CLiteral],
    ) -> Result<Vec<CLiteral>, ErrorKind> {
        then.iter()
            .zip(otherwise)
            .map(|(t, e)| self.ite(condition, *t, *e))
            .collect()
    }

    /// Adds the clause `¬condition ∨ literal`.
    pub fn implies(&mut self, condition: CLiteral, literal: CLiteral) -> Result<(), ErrorKind> {
        self.clause(&[-condition, literal])
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        blast::{Circuit, GateTable},
        config::Config,
        context::Context,
        structures::literal::CLiteral,
    };

    #[test]
    fn folding() {
        let mut context = Context::from_config(Config::default());
        let mut table = GateTable::new(true);
        let mut circuit = Circuit::new(&mut table, &mut context);

        let p = circuit.context.fresh_literal().unwrap();
        let q = circuit.context.fresh_literal().unwrap();

        assert_eq!(circuit.and(&[p, CLiteral::top()]).unwrap(), p);
        assert_eq!(circuit.and(&[p, -p]).unwrap(), CLiteral::bottom());
        assert_eq!(circuit.or(&[q, CLiteral::top()]).unwrap(), CLiteral::top());
        assert_eq!(circuit.xor(p, CLiteral::top()).unwrap(), -p);
        assert_eq!(circuit.ite(p, q, q).unwrap(), q);
        assert_eq!(circuit.ite(CLiteral::bottom(), p, q).unwrap(), q);
        assert_eq!(table.gate_count(), 0);
    }

    #[test]
    fn sharing() {
        let mut context = Context::from_config(Config::default());
        let mut table = GateTable::new(true);
        let mut circuit = Circuit::new(&mut table, &mut context);

        let p = circuit.context.fresh_literal().unwrap();
        let q = circuit.context.fresh_literal().unwrap();

        let a = circuit.and(&[p, q]).unwrap();
        assert_eq!(circuit.and(&[q, p]).unwrap(), a);

        let x = circuit.xor(p, q).unwrap();
        assert_eq!(circuit.xor(-q, p).unwrap(), -x);
        assert_eq!(circuit.iff(p, q).unwrap(), -x);
        assert_eq!(table.gate_count(), 2);
    }
}
