//! Comparator chains.

use crate::{structures::literal::CLiteral, types::err::ErrorKind};

use super::Circuit;

impl<R: rand::Rng + std::default::Default> Circuit<'_, R> {
    /// True exactly when `a` and `b` agree on every bit.
    pub fn equal(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<CLiteral, ErrorKind> {
        let agreements = a
            .iter()
            .zip(b)
            .map(|(x, y)| self.iff(*x, *y))
            .collect::<Result<Vec<_>, _>>()?;
        self.and(&agreements)
    }

    /// True exactly when `a` is less than `b`.
    ///
    /// The chain runs from the least significant bit: at each bit, if `a` and `b` differ the bit of `b` decides, and otherwise the decision below stands.
    /// If `signed`, the most significant bit is the sign, and so the bit of `a` decides.
    pub fn less_than(&mut self, a: &[CLiteral], b: &[CLiteral], signed: bool) -> Result<CLiteral, ErrorKind> {
        let top = a.len().saturating_sub(1);
        let mut less = CLiteral::bottom();
        for (index, (x, y)) in a.iter().zip(b).enumerate() {
            let differ = self.xor(*x, *y)?;
            let decider = match signed && index == top {
                true => *x,
                false => *y,
            };
            less = self.ite(differ, decider, less)?;
        }
        Ok(less)
    }

    /// True exactly when `a` is at most `b`.
    pub fn less_or_equal(&mut self, a: &[CLiteral], b: &[CLiteral], signed: bool) -> Result<CLiteral, ErrorKind> {
        Ok(-self.less_than(b, a, signed)?)
    }

    /// True exactly when every pair of `operands` differs.
    pub fn distinct(&mut self, operands: &[Vec<CLiteral>]) -> Result<CLiteral, ErrorKind> {
        let mut differences = Vec::default();
        for (index, a) in operands.iter().enumerate() {
            for b in &operands[index + 1..] {
                differences.push(-self.equal(a, b)?);
            }
        }
        self.and(&differences)
    }

    /// True exactly when some bit of `a` is true.
    pub fn is_nonzero(&mut self, a: &[CLiteral]) -> Result<CLiteral, ErrorKind> {
        self.or(a)
    }
}
