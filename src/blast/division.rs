/*!
Division and remainder.

Unsigned division introduces a fresh quotient *q* and remainder *r* for a dividend *a* and divisor *b*, constrained by:
- If *b* is non-zero: *a = q·b + r* (without overflow, as the product is taken at twice the width) and *r < b*.
- If *b* is zero: *q* is all ones and *r* is *a*.

Signed operations are built from unsigned division on absolute values:
- `sdiv` negates the quotient when the signs of *a* and *b* differ.
- `srem` takes the sign of the dividend.
- `smod` takes the sign of the divisor, and is zero when the remainder is zero.

So, `sdiv(a, 0)` is −1 for non-negative *a* and 1 otherwise, and `srem(a, 0) = smod(a, 0) = a`.

The quotient and remainder of a pair of operands are kept, and `udiv` and `urem` over the same operands share one encoding.
*/

use crate::{
    misc::log::targets::{self},
    structures::literal::CLiteral,
    types::err::ErrorKind,
};

use super::Circuit;

impl<R: rand::Rng + std::default::Default> Circuit<'_, R> {
    /// The unsigned quotient and remainder of `a` by `b`.
    pub fn divide(
        &mut self,
        a: &[CLiteral],
        b: &[CLiteral],
    ) -> Result<(Vec<CLiteral>, Vec<CLiteral>), ErrorKind> {
        let key = (a.to_vec(), b.to_vec());
        if let Some(division) = self.table.divisions.get(&key) {
            return Ok(division.clone());
        }

        let width = a.len();
        let quotient = self.fresh_bits(width)?;
        let remainder = self.fresh_bits(width)?;
        log::trace!(target: targets::BLAST, "Division of width {width}");

        let nonzero = self.is_nonzero(b)?;

        // a = q·b + r, at double width.
        let double = 2 * width;
        let product = self.multiply_to(&quotient, b, double)?;
        let mut wide_remainder = remainder.clone();
        wide_remainder.resize(double, CLiteral::bottom());
        let sum = self.add(&product, &wide_remainder)?;
        for (index, bit) in sum.iter().enumerate() {
            let expected = a.get(index).copied().unwrap_or(CLiteral::bottom());
            let agrees = self.iff(*bit, expected)?;
            self.implies(nonzero, agrees)?;
        }

        let below = self.less_than(&remainder, b, false)?;
        self.implies(nonzero, below)?;

        for (q, (r, x)) in quotient.iter().zip(remainder.iter().zip(a)) {
            self.implies(-nonzero, *q)?;
            let agrees = self.iff(*r, *x)?;
            self.implies(-nonzero, agrees)?;
        }

        let division = (quotient, remainder);
        self.table.divisions.insert(key, division.clone());
        Ok(division)
    }

    fn fresh_bits(&mut self, width: usize) -> Result<Vec<CLiteral>, ErrorKind> {
        (0..width).map(|_| self.context.fresh_literal()).collect()
    }

    /// The absolute value of `a`, read as two's complement, together with the sign of `a`.
    fn absolute(&mut self, a: &[CLiteral]) -> Result<(Vec<CLiteral>, CLiteral), ErrorKind> {
        let sign = a.last().copied().unwrap_or(CLiteral::bottom());
        let negated = self.negate(a)?;
        Ok((self.ite_bits(sign, &negated, a)?, sign))
    }

    /// Signed division, rounding towards zero.
    pub fn signed_divide(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<Vec<CLiteral>, ErrorKind> {
        let (absolute_a, sign_a) = self.absolute(a)?;
        let (absolute_b, sign_b) = self.absolute(b)?;
        let (quotient, _) = self.divide(&absolute_a, &absolute_b)?;
        let negated = self.negate(&quotient)?;
        let differ = self.xor(sign_a, sign_b)?;
        self.ite_bits(differ, &negated, &quotient)
    }

    /// Signed remainder, with the sign of the dividend.
    pub fn signed_remainder(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<Vec<CLiteral>, ErrorKind> {
        let (absolute_a, sign_a) = self.absolute(a)?;
        let (absolute_b, _) = self.absolute(b)?;
        let (_, remainder) = self.divide(&absolute_a, &absolute_b)?;
        let negated = self.negate(&remainder)?;
        self.ite_bits(sign_a, &negated, &remainder)
    }

    /// Signed remainder, with the sign of the divisor.
    pub fn signed_modulo(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<Vec<CLiteral>, ErrorKind> {
        let (absolute_a, sign_a) = self.absolute(a)?;
        let (absolute_b, sign_b) = self.absolute(b)?;
        let (_, remainder) = self.divide(&absolute_a, &absolute_b)?;

        let negated = self.negate(&remainder)?;
        let with_sign_a = self.ite_bits(sign_a, &negated, &remainder)?;
        let adjusted = self.add(&with_sign_a, b)?;
        let differ = self.xor(sign_a, sign_b)?;
        let nonzero_result = self.ite_bits(differ, &adjusted, &with_sign_a)?;

        let nonzero = self.is_nonzero(&remainder)?;
        self.ite_bits(nonzero, &nonzero_result, &remainder)
    }
}
