/*!
The bit-blaster: from bit-vector terms to clauses.

Each term is blasted to a vector of literals, one per bit (least significant first), together with original clauses which define the literals in terms of the literals of the operands of the term.
- A variable is blasted to fresh literals.
- A constant is blasted to [top](CLiteral::top) and [bottom](CLiteral::bottom), and so requires no atoms.
- An operator is blasted to the output of a circuit over the literals of its operands.

Blasting is memoised per term, and so a term is never blasted twice, regardless of how often the term is referenced.
Terms are blasted in post-order, iteratively, so deep terms do not exhaust the stack.

Circuits are built from a handful of [gates](gates), and more complex circuits are built from those gates:
- [Arithmetic](arithmetic): ripple-carry adders, and shift-and-add multiplication.
- [Comparison](compare): equality, and comparator chains for the ordering predicates.
- [Division](division): fresh quotient and remainder literals, constrained by the division identity.
- [Shifts](shift): barrel shifters for variable amounts, and reindexing otherwise.
- [Arrays](array): multiplexer trees for select, and guarded rewrites for store.

Extract, concat, repeat, rotations, and extensions are reindexing (or padding) of literals, and build no gates.

```rust
# use otter_bv::blast::Blaster;
# use otter_bv::config::Config;
# use otter_bv::context::Context;
# use otter_bv::reports::Report;
# use otter_bv::terms::{Opcode, TermDB};
let config = Config::default();
let mut context = Context::from_config(config.clone());
let mut terms = TermDB::new(&config);
let mut blaster = Blaster::new(&config);

let x = terms.add_variable(4, "x").unwrap();
let three = terms.add_constant(4, 3).unwrap();
let sum = terms.add_operator(Opcode::ADD, &[x, three]).unwrap();
let one = terms.add_constant(4, 1).unwrap();
let equation = terms.add_operator(Opcode::EQUAL, &[sum, one]).unwrap();

let literals = blaster.blast(&mut context, &terms, equation).unwrap();
assert!(context.add_clause(literals[0]).is_ok());
assert_eq!(context.solve(), Ok(Report::Satisfiable));

let x_bits = blaster.literals_of(x).unwrap();
let x_value = x_bits
    .iter()
    .enumerate()
    .filter(|(_, literal)| context.value_of(**literal) == Some(true))
    .map(|(index, _)| 1 << index)
    .sum::<u32>();
assert_eq!(x_value, 14);
```
*/

pub mod arithmetic;
pub mod array;
pub mod compare;
pub mod division;
pub mod gates;
pub mod shift;

use std::collections::HashMap;

pub use gates::GateTable;
use shift::Direction;

use crate::{
    config::{blast::BlastConfig, Config},
    context::GenericContext,
    misc::log::targets::{self},
    structures::literal::CLiteral,
    terms::{Opcode, Term, TermDB, TermKind},
    types::err::ErrorKind,
};

/// A circuit under construction: gates over the atoms of a context, with clauses added to the context.
pub struct Circuit<'a, R: rand::Rng + std::default::Default> {
    pub(crate) table: &'a mut GateTable,

    pub(crate) context: &'a mut GenericContext<R>,
}

impl<'a, R: rand::Rng + std::default::Default> Circuit<'a, R> {
    /// A circuit with gates from `table` and clauses added to `context`.
    pub fn new(table: &'a mut GateTable, context: &'a mut GenericContext<R>) -> Self {
        Circuit { table, context }
    }
}

/// The bit-blaster, holding the literals of each blasted term and a table of gates.
pub struct Blaster {
    config: BlastConfig,

    /// The literals of each blasted term.
    blasted: HashMap<Term, Vec<CLiteral>>,

    table: GateTable,
}

impl Blaster {
    /// A fresh blaster, configured by `config`.
    pub fn new(config: &Config) -> Self {
        Blaster {
            config: config.blast.clone(),
            blasted: HashMap::default(),
            table: GateTable::new(config.blast.gate_sharing.value),
        }
    }

    /// The literals of `term`, if `term` has been blasted.
    pub fn literals_of(&self, term: Term) -> Option<&[CLiteral]> {
        self.blasted.get(&term).map(|literals| literals.as_slice())
    }

    /// A count of terms blasted.
    pub fn blasted_count(&self) -> usize {
        self.blasted.len()
    }

    /// A count of gates built.
    pub fn gate_count(&self) -> usize {
        self.table.gate_count()
    }

    /// The configuration of the blaster.
    pub fn config(&self) -> &BlastConfig {
        &self.config
    }

    /// Blasts `term`, and any unblasted subterm, returning the literals of `term`.
    pub fn blast<R: rand::Rng + std::default::Default>(
        &mut self,
        context: &mut GenericContext<R>,
        terms: &TermDB,
        term: Term,
    ) -> Result<Vec<CLiteral>, ErrorKind> {
        if let Some(literals) = self.blasted.get(&term) {
            return Ok(literals.clone());
        }

        let mut stack = vec![(term, false)];
        while let Some((current, expanded)) = stack.pop() {
            if self.blasted.contains_key(&current) {
                continue;
            }

            let literals = match terms.kind(current)? {
                TermKind::Variable { .. } => {
                    let width = terms.width(current)? as usize;
                    (0..width)
                        .map(|_| context.fresh_literal())
                        .collect::<Result<Vec<_>, _>>()?
                }

                TermKind::Constant { bits } => bits.iter().map(|bit| CLiteral::constant(*bit)).collect(),

                TermKind::Operator {
                    opcode,
                    operands,
                    parameters,
                } => match expanded {
                    false => {
                        stack.push((current, true));
                        stack.extend(operands.iter().map(|operand| (*operand, false)));
                        continue;
                    }
                    true => {
                        let inputs = operands
                            .iter()
                            .map(|operand| self.blasted.get(operand).cloned().unwrap_or_default())
                            .collect::<Vec<_>>();
                        let mut circuit = Circuit::new(&mut self.table, context);
                        circuit.operator(*opcode, parameters, &inputs)?
                    }
                },
            };

            log::trace!(target: targets::BLAST, "{current}: {} literals", literals.len());
            self.blasted.insert(current, literals);
        }

        self.blasted
            .get(&term)
            .cloned()
            .ok_or_else(|| ErrorKind::InvalidState)
    }
}

impl<R: rand::Rng + std::default::Default> Circuit<'_, R> {
    /// The literals of `opcode` with `parameters` applied to operands with literals `inputs`.
    pub fn operator(
        &mut self,
        opcode: Opcode,
        parameters: &[u32],
        inputs: &[Vec<CLiteral>],
    ) -> Result<Vec<CLiteral>, ErrorKind> {
        let empty = Vec::default();
        let a = inputs.first().unwrap_or(&empty);
        let b = inputs.get(1).unwrap_or(&empty);
        let c = inputs.get(2).unwrap_or(&empty);
        let parameter = |index: usize| parameters.get(index).copied().unwrap_or(0) as usize;
        let sign = a.last().copied().unwrap_or(CLiteral::bottom());

        let bits = match opcode {
            Opcode::EQUAL => vec![self.equal(a, b)?],
            Opcode::NEQUAL => vec![-self.equal(a, b)?],
            Opcode::DISTINCT => vec![self.distinct(inputs)?],
            Opcode::IMPLIES => vec![self.or(&[-a[0], b[0]])?],

            Opcode::ULT => vec![self.less_than(a, b, false)?],
            Opcode::ULE => vec![self.less_or_equal(a, b, false)?],
            Opcode::UGT => vec![self.less_than(b, a, false)?],
            Opcode::UGE => vec![self.less_or_equal(b, a, false)?],
            Opcode::SLT => vec![self.less_than(a, b, true)?],
            Opcode::SLE => vec![self.less_or_equal(a, b, true)?],
            Opcode::SGT => vec![self.less_than(b, a, true)?],
            Opcode::SGE => vec![self.less_or_equal(b, a, true)?],

            Opcode::NOT => a.iter().map(|bit| -*bit).collect(),
            Opcode::NEG => self.negate(a)?,
            Opcode::ITE => self.ite_bits(a[0], b, c)?,

            Opcode::ADD => self.fold(inputs, |circuit, x, y| circuit.add(x, y))?,
            Opcode::SUB => self.sub(a, b)?,
            Opcode::MUL => self.fold(inputs, |circuit, x, y| circuit.multiply(x, y))?,

            Opcode::UDIV => self.divide(a, b)?.0,
            Opcode::UREM => self.divide(a, b)?.1,
            Opcode::SDIV => self.signed_divide(a, b)?,
            Opcode::SREM => self.signed_remainder(a, b)?,
            Opcode::SMOD => self.signed_modulo(a, b)?,

            Opcode::AND => self.bitwise_and(inputs)?,
            Opcode::NAND => invert(self.bitwise_and(inputs)?),
            Opcode::OR => self.bitwise_or(inputs)?,
            Opcode::NOR => invert(self.bitwise_or(inputs)?),
            Opcode::XOR => self.bitwise_xor(inputs)?,
            Opcode::XNOR => invert(self.bitwise_xor(inputs)?),

            Opcode::LSHL => self.barrel_shift(a, b, Direction::Left, CLiteral::bottom())?,
            Opcode::LSHR => self.barrel_shift(a, b, Direction::Right, CLiteral::bottom())?,
            Opcode::ASHR => self.barrel_shift(a, b, Direction::Right, sign)?,

            Opcode::RED_OR => vec![self.or(a)?],
            Opcode::RED_AND => vec![self.and(a)?],

            Opcode::CONCAT => inputs.iter().rev().flatten().copied().collect(),
            Opcode::EXTRACT => a[parameter(0)..parameter(1)].to_vec(),
            Opcode::REPEAT => a.repeat(parameter(0)),
            Opcode::ROTATE_LEFT => {
                let mut rotated = a.clone();
                rotated.rotate_right(parameter(0) % a.len().max(1));
                rotated
            }
            Opcode::ROTATE_RIGHT => {
                let mut rotated = a.clone();
                rotated.rotate_left(parameter(0) % a.len().max(1));
                rotated
            }
            Opcode::ZERO_EXTEND => {
                let mut extended = a.clone();
                extended.resize(a.len() + parameter(0), CLiteral::bottom());
                extended
            }
            Opcode::SIGN_EXTEND => {
                let mut extended = a.clone();
                extended.resize(a.len() + parameter(0), sign);
                extended
            }

            Opcode::SELECT => self.select(a, b)?,
            Opcode::STORE => self.store(a, b, c)?,
        };
        Ok(bits)
    }

    /// `f` applied from the left over `inputs`.
    fn fold(
        &mut self,
        inputs: &[Vec<CLiteral>],
        f: impl Fn(&mut Self, &[CLiteral], &[CLiteral]) -> Result<Vec<CLiteral>, ErrorKind>,
    ) -> Result<Vec<CLiteral>, ErrorKind> {
        let mut accumulated = inputs.first().cloned().unwrap_or_default();
        for input in inputs.iter().skip(1) {
            accumulated = f(self, &accumulated, input)?;
        }
        Ok(accumulated)
    }

    fn column(inputs: &[Vec<CLiteral>], index: usize) -> Vec<CLiteral> {
        inputs.iter().filter_map(|input| input.get(index).copied()).collect()
    }

    fn bitwise_and(&mut self, inputs: &[Vec<CLiteral>]) -> Result<Vec<CLiteral>, ErrorKind> {
        let width = inputs.first().map(|input| input.len()).unwrap_or(0);
        (0..width)
            .map(|index| self.and(&Self::column(inputs, index)))
            .collect()
    }

    fn bitwise_or(&mut self, inputs: &[Vec<CLiteral>]) -> Result<Vec<CLiteral>, ErrorKind> {
        let width = inputs.first().map(|input| input.len()).unwrap_or(0);
        (0..width)
            .map(|index| self.or(&Self::column(inputs, index)))
            .collect()
    }

    fn bitwise_xor(&mut self, inputs: &[Vec<CLiteral>]) -> Result<Vec<CLiteral>, ErrorKind> {
        self.fold(inputs, |circuit, x, y| {
            x.iter().zip(y).map(|(p, q)| circuit.xor(*p, *q)).collect()
        })
    }
}

fn invert(bits: Vec<CLiteral>) -> Vec<CLiteral> {
    bits.into_iter().map(|bit| -bit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::Context,
        reports::Report,
        terms::{constant, eval},
    };

    /// Asserts `opcode` over constants blasts to the constant given by evaluation, with no gates.
    fn folds_to_evaluation(opcode: Opcode, width: u32, values: &[u64]) {
        let config = Config::default();
        let mut context = Context::from_config(config.clone());
        let mut terms = TermDB::new(&config);
        let mut blaster = Blaster::new(&config);

        let bits = values
            .iter()
            .map(|value| constant::from_u64(width, *value).unwrap())
            .collect::<Vec<_>>();
        let operands = bits
            .iter()
            .map(|bits| terms.add_constant_bits(bits.clone()).unwrap())
            .collect::<Vec<_>>();
        let term = terms.add_operator(opcode, &operands).unwrap();

        let literals = blaster.blast(&mut context, &terms, term).unwrap();
        let expected = eval::evaluate(opcode, &[], &bits);
        let found = literals
            .iter()
            .map(|literal| literal.constant_value())
            .collect::<Option<Vec<_>>>();
        assert_eq!(found, Some(expected), "{opcode}");
        assert_eq!(blaster.gate_count(), 0);
    }

    #[test]
    fn constant_folding() {
        folds_to_evaluation(Opcode::ADD, 8, &[200, 100]);
        folds_to_evaluation(Opcode::MUL, 8, &[3, 6, 7]);
        folds_to_evaluation(Opcode::SUB, 8, &[3, 6]);
        folds_to_evaluation(Opcode::ULT, 8, &[3, 6]);
        folds_to_evaluation(Opcode::SLT, 8, &[200, 6]);
        folds_to_evaluation(Opcode::XNOR, 4, &[3, 5, 9]);
        folds_to_evaluation(Opcode::LSHL, 8, &[3, 2]);
        folds_to_evaluation(Opcode::ASHR, 8, &[128, 9]);
        folds_to_evaluation(Opcode::DISTINCT, 4, &[1, 2, 3]);
    }

    #[test]
    fn memoised() {
        let config = Config::default();
        let mut context = Context::from_config(config.clone());
        let mut terms = TermDB::new(&config);
        let mut blaster = Blaster::new(&config);

        let x = terms.add_variable(8, "x").unwrap();
        let y = terms.add_variable(8, "y").unwrap();
        let product = terms.add_operator(Opcode::MUL, &[x, y]).unwrap();

        let first = blaster.blast(&mut context, &terms, product).unwrap();
        let atoms = context.atom_db.count();
        let gates = blaster.gate_count();

        let also = terms.add_operator(Opcode::MUL, &[y, x]).unwrap();
        assert_eq!(blaster.blast(&mut context, &terms, also).unwrap(), first);
        assert_eq!(context.atom_db.count(), atoms);
        assert_eq!(blaster.gate_count(), gates);
        assert_eq!(blaster.blasted_count(), 3);
    }

    #[test]
    fn division_by_variable() {
        let config = Config::default();
        let mut context = Context::from_config(config.clone());
        let mut terms = TermDB::new(&config);
        let mut blaster = Blaster::new(&config);

        let x = terms.add_variable(4, "x").unwrap();
        let three = terms.add_constant(4, 3).unwrap();
        let quotient = terms.add_operator(Opcode::UDIV, &[three, x]).unwrap();
        let fifteen = terms.add_constant(4, 15).unwrap();
        let eq = terms.add_operator(Opcode::EQUAL, &[quotient, fifteen]).unwrap();

        let literals = blaster.blast(&mut context, &terms, eq).unwrap();
        assert!(context.add_clause(literals[0]).is_ok());
        assert_eq!(context.solve(), Ok(Report::Satisfiable));

        // Only division by zero gives a quotient of fifteen.
        let x_literals = blaster.literals_of(x).unwrap().to_vec();
        assert!(x_literals
            .iter()
            .all(|literal| context.value_of(*literal) == Some(false)));
    }
}
