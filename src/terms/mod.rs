/*!
A database of bit-vector terms.

Terms form a directed acyclic graph, stored in an arena and accessed through [Term] handles.
A term is one of:
- A variable, with a width and a name.
- A constant, with a width given by its [bits](constant::Bits).
- An operator, with an [Opcode], operands, and (for structural operators) numeric parameters.

Terms are immutable, and constants and operators are *hash-consed*: building the same constant, or the same operator over the same operands and parameters, returns the same handle.
So, the [bit-blaster](crate::blast) encodes each distinct subterm once, regardless of how often the subterm is referenced.
Variables are never shared, as two variables with the same name and width are distinct.

Operands of [commutative](Opcode::is_commutative) opcodes are placed in a canonical order before a term is looked up, so `a + b` and `b + a` share a handle.

# Typing

Each operator fixes the count of its operands (see [arity](Opcode::arity)) and a relation between the widths of its operands and its own width.
A violation is raised as a [TypeError] or an [ArityError](err::ArityError) when the term is built, and is never deferred to a solve.

```rust
# use otter_bv::config::Config;
# use otter_bv::terms::{Opcode, TermDB};
# use otter_bv::types::err::{ErrorKind, TypeError};
let mut terms = TermDB::new(&Config::default());

let x = terms.add_variable(8, "x").unwrap();
let y = terms.add_variable(8, "y").unwrap();
let z = terms.add_variable(4, "z").unwrap();

let sum = terms.add_operator(Opcode::ADD, &[x, y]).unwrap();
assert_eq!(terms.add_operator(Opcode::ADD, &[y, x]), Ok(sum));
assert_eq!(terms.width(sum), Ok(8));

assert!(matches!(
    terms.add_operator(Opcode::ADD, &[x, z]),
    Err(ErrorKind::Type(TypeError::WidthMismatch { .. }))
));
assert!(terms.add_extract(x, 4, 9).is_err());
assert_eq!(terms.display(sum).unwrap(), "(+ x y)");
```

# Ownership

Each database has a distinct identifier, carried by every handle from the database.
A handle from some other database is a [ForeignTerm](TypeError::ForeignTerm), rather than an index to some arbitrary term.
*/

pub mod constant;
pub mod eval;
mod opcode;
pub use opcode::Opcode;

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU32, Ordering},
};

use constant::Bits;

use crate::{
    config::Config,
    misc::log::targets::{self},
    types::err::{self, ErrorKind, TypeError},
};

/// The greatest width of a term.
pub const WIDTH_MAX: u32 = 1 << 24;

/// Identifiers for term databases, so handles from distinct databases are distinguished.
static NEXT_OWNER: AtomicU32 = AtomicU32::new(0);

/// A handle to a term of some [TermDB].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    index: u32,
    owner: u32,
}

impl Term {
    /// The index of the term in its database.
    ///
    /// Indices are assigned in order of construction, from zero.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.index)
    }
}

/// The kind of a term.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// A variable, with a (not necessarily unique) name.
    Variable { name: String },

    /// A constant, least significant bit first.
    Constant { bits: Bits },

    /// An operator applied to some operands, with parameters for structural operators.
    Operator {
        opcode: Opcode,
        operands: Vec<Term>,
        parameters: Vec<u32>,
    },
}

struct TermNode {
    kind: TermKind,
    width: u32,
}

/// The term database.
pub struct TermDB {
    owner: u32,

    nodes: Vec<TermNode>,

    /// Constants and operators, for hash-consing.
    shared: HashMap<TermKind, Term>,

    /// The greatest index width of an array access.
    array_index_limit: u32,
}

impl TermDB {
    /// A fresh database, with array bounds from `config`.
    pub fn new(config: &Config) -> Self {
        TermDB {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::default(),
            shared: HashMap::default(),
            array_index_limit: config.blast.array_index_limit.value,
        }
    }

    /// A count of terms in the database.
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    /// True if `term` is a term of the database.
    pub fn contains(&self, term: Term) -> bool {
        term.owner == self.owner && (term.index as usize) < self.nodes.len()
    }

    fn node(&self, term: Term) -> Result<&TermNode, TypeError> {
        match term.owner == self.owner {
            true => self
                .nodes
                .get(term.index as usize)
                .ok_or(TypeError::ForeignTerm),
            false => Err(TypeError::ForeignTerm),
        }
    }

    /// The width of `term`.
    pub fn width(&self, term: Term) -> Result<u32, TypeError> {
        Ok(self.node(term)?.width)
    }

    /// The kind of `term`.
    pub fn kind(&self, term: Term) -> Result<&TermKind, TypeError> {
        Ok(&self.node(term)?.kind)
    }

    /// Pushes a fresh node, without any check for sharing.
    fn push(&mut self, kind: TermKind, width: u32) -> Result<Term, TypeError> {
        let index = u32::try_from(self.nodes.len()).map_err(|_| TypeError::WidthOverflow)?;
        let term = Term {
            index,
            owner: self.owner,
        };
        self.nodes.push(TermNode { kind, width });
        Ok(term)
    }

    /// The shared term of `kind`, built if required.
    fn share(&mut self, kind: TermKind, width: u32) -> Result<Term, TypeError> {
        if let Some(term) = self.shared.get(&kind) {
            return Ok(*term);
        }
        let term = self.push(kind.clone(), width)?;
        log::trace!(target: targets::TERMS, "{term}: {kind:?} at width {width}");
        self.shared.insert(kind, term);
        Ok(term)
    }
}

/// Constructors for leaves.
impl TermDB {
    /// A fresh variable of width `width`.
    pub fn add_variable(&mut self, width: u32, name: &str) -> Result<Term, TypeError> {
        check_width(width as u64)?;
        let term = self.push(
            TermKind::Variable {
                name: name.to_owned(),
            },
            width,
        )?;
        log::debug!(target: targets::TERMS, "{term}: variable {name} of width {width}");
        Ok(term)
    }

    /// The constant with bits `bits`, least significant first.
    pub fn add_constant_bits(&mut self, bits: Bits) -> Result<Term, TypeError> {
        let width = check_width(bits.len() as u64)?;
        self.share(TermKind::Constant { bits }, width)
    }

    /// The constant `value` of width `width`.
    pub fn add_constant(&mut self, width: u32, value: u64) -> Result<Term, TypeError> {
        check_width(width as u64)?;
        self.add_constant_bits(constant::from_u64(width, value)?)
    }

    /// The constant of width `width` given by decimal text, possibly negative.
    pub fn add_constant_str(&mut self, width: u32, text: &str) -> Result<Term, TypeError> {
        check_width(width as u64)?;
        self.add_constant_bits(constant::from_decimal(width, text)?)
    }

    /// The constant given by binary text, most significant bit first.
    pub fn add_bin_constant(&mut self, width: Option<u32>, text: &str) -> Result<Term, TypeError> {
        if let Some(width) = width {
            check_width(width as u64)?;
        }
        self.add_constant_bits(constant::from_binary(width, text)?)
    }

    /// The constant given by hexadecimal text, most significant digit first.
    pub fn add_hex_constant(&mut self, width: Option<u32>, text: &str) -> Result<Term, TypeError> {
        if let Some(width) = width {
            check_width(width as u64)?;
        }
        self.add_constant_bits(constant::from_hex(width, text)?)
    }
}

/// Constructors for operators.
impl TermDB {
    /// The term `opcode` applied to `operands`.
    ///
    /// Structural opcodes require parameters, and have dedicated constructors: [add_extract](TermDB::add_extract), etc.
    pub fn add_operator(&mut self, opcode: Opcode, operands: &[Term]) -> Result<Term, ErrorKind> {
        if opcode.is_parameterised() {
            return Err(TypeError::Parameterised(opcode).into());
        }
        self.make(opcode, operands.to_vec(), Vec::default())
    }

    /// Bits `low` (inclusive) to `high` (exclusive) of `term`.
    pub fn add_extract(&mut self, term: Term, low: u32, high: u32) -> Result<Term, ErrorKind> {
        let width = self.width(term)?;
        if low >= high || high > width {
            return Err(TypeError::ExtractRange { low, high, width }.into());
        }
        if low == 0 && high == width {
            return Ok(term);
        }
        self.make(Opcode::EXTRACT, vec![term], vec![low, high])
    }

    /// `term` repeated `count` times.
    pub fn add_repeat(&mut self, term: Term, count: u32) -> Result<Term, ErrorKind> {
        self.width(term)?;
        match count {
            0 => Err(TypeError::ZeroWidth.into()),
            1 => Ok(term),
            _ => self.make(Opcode::REPEAT, vec![term], vec![count]),
        }
    }

    /// `term` rotated towards the most significant bit by `amount`.
    pub fn add_rotate_left(&mut self, term: Term, amount: u32) -> Result<Term, ErrorKind> {
        self.rotate(Opcode::ROTATE_LEFT, term, amount)
    }

    /// `term` rotated towards the least significant bit by `amount`.
    pub fn add_rotate_right(&mut self, term: Term, amount: u32) -> Result<Term, ErrorKind> {
        self.rotate(Opcode::ROTATE_RIGHT, term, amount)
    }

    fn rotate(&mut self, opcode: Opcode, term: Term, amount: u32) -> Result<Term, ErrorKind> {
        let amount = amount % self.width(term)?;
        match amount {
            0 => Ok(term),
            _ => self.make(opcode, vec![term], vec![amount]),
        }
    }

    /// `term` extended by `count` leading zeros.
    pub fn add_zero_extend(&mut self, term: Term, count: u32) -> Result<Term, ErrorKind> {
        self.extend(Opcode::ZERO_EXTEND, term, count)
    }

    /// `term` extended by `count` copies of its sign bit.
    pub fn add_sign_extend(&mut self, term: Term, count: u32) -> Result<Term, ErrorKind> {
        self.extend(Opcode::SIGN_EXTEND, term, count)
    }

    fn extend(&mut self, opcode: Opcode, term: Term, count: u32) -> Result<Term, ErrorKind> {
        self.width(term)?;
        match count {
            0 => Ok(term),
            _ => self.make(opcode, vec![term], vec![count]),
        }
    }

    /// Checks arity and typing, and returns the shared term.
    fn make(&mut self, opcode: Opcode, mut operands: Vec<Term>, parameters: Vec<u32>) -> Result<Term, ErrorKind> {
        let (minimum, maximum) = opcode.arity();
        if operands.len() < minimum {
            return Err(err::ArityError::TooFew {
                opcode,
                minimum,
                found: operands.len(),
            }
            .into());
        }
        if let Some(maximum) = maximum {
            if operands.len() > maximum {
                return Err(err::ArityError::TooMany {
                    opcode,
                    maximum,
                    found: operands.len(),
                }
                .into());
            }
        }

        let widths = operands
            .iter()
            .map(|operand| self.width(*operand))
            .collect::<Result<Vec<_>, _>>()?;

        let width = self.result_width(opcode, &widths, &parameters)?;

        if opcode.is_commutative() {
            operands.sort_unstable();
        }

        Ok(self.share(
            TermKind::Operator {
                opcode,
                operands,
                parameters,
            },
            width,
        )?)
    }

    /// The width of `opcode` applied to operands of `widths`, if the widths fit the opcode.
    fn result_width(&self, opcode: Opcode, widths: &[u32], parameters: &[u32]) -> Result<u32, TypeError> {
        let first = widths.first().copied().unwrap_or(0);
        let parameter = |index: usize| parameters.get(index).copied().unwrap_or(0) as u64;

        let same = |expected: u32, rest: &[u32]| -> Result<(), TypeError> {
            match rest.iter().find(|width| **width != expected) {
                Some(found) => Err(TypeError::WidthMismatch {
                    opcode,
                    expected,
                    found: *found,
                }),
                None => Ok(()),
            }
        };

        match opcode {
            Opcode::EQUAL
            | Opcode::NEQUAL
            | Opcode::DISTINCT
            | Opcode::SLT
            | Opcode::SLE
            | Opcode::ULT
            | Opcode::ULE
            | Opcode::SGT
            | Opcode::SGE
            | Opcode::UGT
            | Opcode::UGE => {
                same(first, widths)?;
                Ok(1)
            }

            Opcode::IMPLIES => {
                same(1, widths)?;
                Ok(1)
            }

            Opcode::RED_OR | Opcode::RED_AND => Ok(1),

            Opcode::NOT | Opcode::NEG => Ok(first),

            Opcode::ITE => {
                if first != 1 {
                    return Err(TypeError::NotBoolean { width: first });
                }
                same(widths[1], &widths[2..])?;
                Ok(widths[1])
            }

            Opcode::AND
            | Opcode::NAND
            | Opcode::OR
            | Opcode::NOR
            | Opcode::XOR
            | Opcode::XNOR
            | Opcode::ADD
            | Opcode::MUL
            | Opcode::SUB
            | Opcode::SDIV
            | Opcode::SREM
            | Opcode::SMOD
            | Opcode::UDIV
            | Opcode::UREM
            | Opcode::LSHL
            | Opcode::LSHR
            | Opcode::ASHR => {
                same(first, widths)?;
                Ok(first)
            }

            Opcode::CONCAT => check_width(widths.iter().map(|width| *width as u64).sum()),

            Opcode::EXTRACT => check_width(parameter(1) - parameter(0)),

            Opcode::REPEAT => check_width(first as u64 * parameter(0)),

            Opcode::ROTATE_LEFT | Opcode::ROTATE_RIGHT => Ok(first),

            Opcode::ZERO_EXTEND | Opcode::SIGN_EXTEND => check_width(first as u64 + parameter(0)),

            Opcode::SELECT => {
                let element = self.element_width(first, widths[1])?;
                Ok(element)
            }

            Opcode::STORE => {
                let element = self.element_width(first, widths[1])?;
                same(element, &widths[2..])?;
                Ok(first)
            }
        }
    }

    /// The width of an element of an array of width `array_width` with an index of width `index_width`.
    fn element_width(&self, array_width: u32, index_width: u32) -> Result<u32, TypeError> {
        let error = TypeError::AddressSpace {
            array_width,
            index_width,
        };
        if index_width > self.array_index_limit || index_width >= u32::BITS {
            return Err(error);
        }
        let elements = 1_u32 << index_width;
        match array_width % elements {
            0 if array_width >= elements => Ok(array_width / elements),
            _ => Err(error),
        }
    }
}

fn check_width(width: u64) -> Result<u32, TypeError> {
    match width {
        0 => Err(TypeError::ZeroWidth),
        w if w > WIDTH_MAX as u64 => Err(TypeError::WidthOverflow),
        w => Ok(w as u32),
    }
}

/// Reading terms.
impl TermDB {
    /// The term as an s-expression, with variables by name and constants in binary.
    pub fn display(&self, term: Term) -> Result<String, TypeError> {
        let mut out = String::default();
        self.display_into(term, &mut out)?;
        Ok(out)
    }

    fn display_into(&self, term: Term, out: &mut String) -> Result<(), TypeError> {
        match self.kind(term)? {
            TermKind::Variable { name } if name.is_empty() => out.push_str(&term.to_string()),
            TermKind::Variable { name } => out.push_str(name),
            TermKind::Constant { bits } => {
                out.push_str("#b");
                out.push_str(&constant::as_binary(bits));
            }
            TermKind::Operator {
                opcode,
                operands,
                parameters,
            } => {
                out.push('(');
                out.push_str(opcode.symbol());
                for parameter in parameters {
                    out.push_str(&format!(" {parameter}"));
                }
                for operand in operands {
                    out.push(' ');
                    self.display_into(*operand, out)?;
                }
                out.push(')');
            }
        }
        Ok(())
    }

    /// The value of `term`, with the value of each variable given by `variable_value`.
    ///
    /// The value of each subterm is computed once, and `variable_value` must return bits of the width of the variable.
    pub fn evaluate(&self, term: Term, variable_value: &mut impl FnMut(Term) -> Bits) -> Result<Bits, TypeError> {
        let mut values: HashMap<Term, Bits> = HashMap::default();
        let mut stack = vec![(term, false)];

        while let Some((current, expanded)) = stack.pop() {
            if values.contains_key(&current) {
                continue;
            }
            match self.kind(current)? {
                TermKind::Variable { .. } => {
                    values.insert(current, variable_value(current));
                }
                TermKind::Constant { bits } => {
                    values.insert(current, bits.clone());
                }
                TermKind::Operator {
                    opcode,
                    operands,
                    parameters,
                } => match expanded {
                    false => {
                        stack.push((current, true));
                        stack.extend(operands.iter().map(|operand| (*operand, false)));
                    }
                    true => {
                        let inputs = operands
                            .iter()
                            .map(|operand| values.get(operand).cloned().unwrap_or_default())
                            .collect::<Vec<_>>();
                        values.insert(current, eval::evaluate(*opcode, parameters, &inputs));
                    }
                },
            }
        }

        values.remove(&term).ok_or(TypeError::ForeignTerm)
    }
}
