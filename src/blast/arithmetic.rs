//! Adders and multipliers.
//!
//! Bits are least significant first, and results are truncated to the width of the (first) operand, as with machine arithmetic.

use crate::{structures::literal::CLiteral, types::err::ErrorKind};

use super::Circuit;

impl<R: rand::Rng + std::default::Default> Circuit<'_, R> {
    /// The sum and carry of `a`, `b`, and `carry`.
    pub fn full_adder(
        &mut self,
        a: CLiteral,
        b: CLiteral,
        carry: CLiteral,
    ) -> Result<(CLiteral, CLiteral), ErrorKind> {
        let half = self.xor(a, b)?;
        let sum = self.xor(half, carry)?;
        let both = self.and(&[a, b])?;
        let propagated = self.and(&[half, carry])?;
        let carry_out = self.or(&[both, propagated])?;
        Ok((sum, carry_out))
    }

    /// A ripple-carry sum of `a` and `b` with an initial carry, together with the final carry.
    pub fn adder(
        &mut self,
        a: &[CLiteral],
        b: &[CLiteral],
        carry: CLiteral,
    ) -> Result<(Vec<CLiteral>, CLiteral), ErrorKind> {
        let mut carry = carry;
        let mut sum = Vec::with_capacity(a.len());
        for (x, y) in a.iter().zip(b) {
            let (bit, carry_out) = self.full_adder(*x, *y, carry)?;
            sum.push(bit);
            carry = carry_out;
        }
        Ok((sum, carry))
    }

    /// `a + b`.
    pub fn add(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<Vec<CLiteral>, ErrorKind> {
        Ok(self.adder(a, b, CLiteral::bottom())?.0)
    }

    /// `a - b`, as `a + ¬b + 1`.
    pub fn sub(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<Vec<CLiteral>, ErrorKind> {
        let inverted = b.iter().map(|bit| -*bit).collect::<Vec<_>>();
        Ok(self.adder(a, &inverted, CLiteral::top())?.0)
    }

    /// `-a`, as `¬a + 1`.
    pub fn negate(&mut self, a: &[CLiteral]) -> Result<Vec<CLiteral>, ErrorKind> {
        let zero = vec![CLiteral::bottom(); a.len()];
        self.sub(&zero, a)
    }

    /// `a * b`, by shifting and adding partial products.
    pub fn multiply(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<Vec<CLiteral>, ErrorKind> {
        self.multiply_to(a, b, a.len())
    }

    /// `a * b` at `width` bits, with `a` and `b` read as unsigned.
    ///
    /// With `width` the sum of the widths of `a` and `b` the product never overflows.
    pub fn multiply_to(
        &mut self,
        a: &[CLiteral],
        b: &[CLiteral],
        width: usize,
    ) -> Result<Vec<CLiteral>, ErrorKind> {
        let mut product = vec![CLiteral::bottom(); width];
        for (shift, b_bit) in b.iter().enumerate().take(width) {
            if *b_bit == CLiteral::bottom() {
                continue;
            }

            // Bits below the shift are unchanged, as the partial product is zero there.
            let mut partial = Vec::with_capacity(width - shift);
            for index in shift..width {
                let bit = match a.get(index - shift) {
                    Some(a_bit) => self.and(&[*a_bit, *b_bit])?,
                    None => CLiteral::bottom(),
                };
                partial.push(bit);
            }

            let (upper, _) = self.adder(&product[shift..], &partial, CLiteral::bottom())?;
            product.truncate(shift);
            product.extend(upper);
        }
        Ok(product)
    }
}
