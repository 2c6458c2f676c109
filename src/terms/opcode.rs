//! Operators of the term DAG.

/// The kind of an operator term.
///
/// Operators are listed in the order of the original interface: predicates first, then functions, then structural operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(clippy::upper_case_acronyms)]
#[allow(non_camel_case_types)]
pub enum Opcode {
    /// Equality of two terms.
    EQUAL,
    /// Inequality of two terms.
    NEQUAL,
    /// Pairwise inequality of two or more terms.
    DISTINCT,
    /// Implication between two terms of width one.
    IMPLIES,
    SLT,
    SLE,
    ULT,
    ULE,
    SGT,
    SGE,
    UGT,
    UGE,
    /// Bitwise negation.
    NOT,

    /// If-then-else, on a condition of width one.
    ITE,
    /// Two's complement negation.
    NEG,
    ADD,
    SUB,
    MUL,
    /// Signed division, rounding towards zero.
    SDIV,
    /// Signed remainder, with the sign of the dividend.
    SREM,
    /// Signed remainder, with the sign of the divisor.
    SMOD,
    UDIV,
    UREM,
    AND,
    NAND,
    OR,
    NOR,
    XOR,
    XNOR,

    /// Logical shift left.
    LSHL,
    /// Logical shift right.
    LSHR,
    /// Arithmetic shift right.
    ASHR,

    /// One, if some bit is one.
    RED_OR,
    /// One, if every bit is one.
    RED_AND,

    /// Concatenation, with the first operand most significant.
    CONCAT,
    EXTRACT,
    REPEAT,
    ROTATE_LEFT,
    ROTATE_RIGHT,
    /// Array read.
    SELECT,
    /// Array write.
    STORE,
    SIGN_EXTEND,
    ZERO_EXTEND,
}

impl Opcode {
    /// Every opcode, in order.
    pub const ALL: [Opcode; 43] = [
        Opcode::EQUAL,
        Opcode::NEQUAL,
        Opcode::DISTINCT,
        Opcode::IMPLIES,
        Opcode::SLT,
        Opcode::SLE,
        Opcode::ULT,
        Opcode::ULE,
        Opcode::SGT,
        Opcode::SGE,
        Opcode::UGT,
        Opcode::UGE,
        Opcode::NOT,
        Opcode::ITE,
        Opcode::NEG,
        Opcode::ADD,
        Opcode::SUB,
        Opcode::MUL,
        Opcode::SDIV,
        Opcode::SREM,
        Opcode::SMOD,
        Opcode::UDIV,
        Opcode::UREM,
        Opcode::AND,
        Opcode::NAND,
        Opcode::OR,
        Opcode::NOR,
        Opcode::XOR,
        Opcode::XNOR,
        Opcode::LSHL,
        Opcode::LSHR,
        Opcode::ASHR,
        Opcode::RED_OR,
        Opcode::RED_AND,
        Opcode::CONCAT,
        Opcode::EXTRACT,
        Opcode::REPEAT,
        Opcode::ROTATE_LEFT,
        Opcode::ROTATE_RIGHT,
        Opcode::SELECT,
        Opcode::STORE,
        Opcode::SIGN_EXTEND,
        Opcode::ZERO_EXTEND,
    ];

    /// True if the order of operands does not matter.
    pub fn is_commutative(&self) -> bool {
        matches!(
            self,
            Self::AND
                | Self::NAND
                | Self::OR
                | Self::NOR
                | Self::XOR
                | Self::XNOR
                | Self::EQUAL
                | Self::NEQUAL
                | Self::DISTINCT
                | Self::ADD
                | Self::MUL
        )
    }

    /// True if the opcode requires numeric parameters, and so has a dedicated constructor.
    pub fn is_parameterised(&self) -> bool {
        matches!(
            self,
            Self::EXTRACT
                | Self::REPEAT
                | Self::ROTATE_LEFT
                | Self::ROTATE_RIGHT
                | Self::SIGN_EXTEND
                | Self::ZERO_EXTEND
        )
    }

    /// True if the result of the opcode has width one, regardless of the width of the operands.
    pub fn is_predicate(&self) -> bool {
        matches!(
            self,
            Self::EQUAL
                | Self::NEQUAL
                | Self::DISTINCT
                | Self::IMPLIES
                | Self::SLT
                | Self::SLE
                | Self::ULT
                | Self::ULE
                | Self::SGT
                | Self::SGE
                | Self::UGT
                | Self::UGE
                | Self::RED_OR
                | Self::RED_AND
        )
    }

    /// The least and (if bounded) the greatest count of operands.
    pub fn arity(&self) -> (usize, Option<usize>) {
        match self {
            Self::NOT | Self::NEG | Self::RED_OR | Self::RED_AND => (1, Some(1)),

            Self::EXTRACT
            | Self::REPEAT
            | Self::ROTATE_LEFT
            | Self::ROTATE_RIGHT
            | Self::SIGN_EXTEND
            | Self::ZERO_EXTEND => (1, Some(1)),

            Self::ITE | Self::STORE => (3, Some(3)),

            Self::DISTINCT
            | Self::AND
            | Self::NAND
            | Self::OR
            | Self::NOR
            | Self::XOR
            | Self::XNOR
            | Self::ADD
            | Self::MUL
            | Self::CONCAT => (2, None),

            _ => (2, Some(2)),
        }
    }

    /// A short symbol for the opcode, as used when displaying a term.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::EQUAL => "=",
            Self::NEQUAL => "!=",
            Self::DISTINCT => "distinct",
            Self::IMPLIES => "=>",
            Self::SGT => ">s",
            Self::UGT => ">u",
            Self::SLT => "<s",
            Self::ULT => "<u",
            Self::SGE => ">=s",
            Self::UGE => ">=u",
            Self::SLE => "<=s",
            Self::ULE => "<=u",
            Self::NOT => "not",
            Self::NEG => "neg",
            Self::ITE => "ite",
            Self::AND => "and",
            Self::NAND => "nand",
            Self::OR => "or",
            Self::NOR => "nor",
            Self::XOR => "xor",
            Self::XNOR => "xnor",
            Self::ADD => "+",
            Self::SUB => "-",
            Self::MUL => "*",
            Self::SDIV => "/s",
            Self::UDIV => "/u",
            Self::SMOD => "%",
            Self::SREM => "rem_s",
            Self::UREM => "rem_u",
            Self::LSHL => "<<",
            Self::LSHR => ">>",
            Self::ASHR => ">>a",
            Self::RED_OR => "red_or",
            Self::RED_AND => "red_and",
            Self::CONCAT => "++",
            Self::EXTRACT => "extract",
            Self::REPEAT => "rep",
            Self::ROTATE_LEFT => "rot_l",
            Self::ROTATE_RIGHT => "rot_r",
            Self::SELECT => "select",
            Self::STORE => "store",
            Self::SIGN_EXTEND => "sgn_ext",
            Self::ZERO_EXTEND => "zero_ext",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_opcode_once() {
        let mut all = Opcode::ALL.to_vec();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 43);
        assert_eq!(Opcode::ALL.first(), Some(&Opcode::EQUAL));
        assert_eq!(Opcode::ALL.last(), Some(&Opcode::ZERO_EXTEND));
    }

    #[test]
    fn parameterised_are_unary() {
        for opcode in Opcode::ALL.iter().filter(|opcode| opcode.is_parameterised()) {
            assert_eq!(opcode.arity(), (1, Some(1)));
        }
    }
}
