//! Shifts by a variable amount, as a barrel shifter.
//!
//! Stage *k* of the shifter shifts by 2^*k* when bit *k* of the amount is set, and so a shift over a width of *w* takes ⌈log₂ *w*⌉ stages of multiplexers.
//! Bits of the amount at or above 2^*k* ≥ *w* shift every bit out, and so select the fill directly.
//!
//! Shifts by a constant amount, rotations, and extensions require no gates, as they are a reindexing of bits.

use crate::{structures::literal::CLiteral, types::err::ErrorKind};

use super::Circuit;

/// The direction of a shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards the most significant bit.
    Left,

    /// Towards the least significant bit.
    Right,
}

/// `bits` shifted by `amount` in `direction`, with vacated bits set to `fill`.
pub fn shifted(bits: &[CLiteral], amount: usize, direction: Direction, fill: CLiteral) -> Vec<CLiteral> {
    let width = bits.len();
    (0..width)
        .map(|index| {
            let source = match direction {
                Direction::Left => index.checked_sub(amount),
                Direction::Right => index.checked_add(amount).filter(|source| *source < width),
            };
            source.map(|source| bits[source]).unwrap_or(fill)
        })
        .collect()
}

impl<R: rand::Rng + std::default::Default> Circuit<'_, R> {
    /// `a` shifted by the value of `amount` in `direction`, with vacated bits set to `fill`.
    pub fn barrel_shift(
        &mut self,
        a: &[CLiteral],
        amount: &[CLiteral],
        direction: Direction,
        fill: CLiteral,
    ) -> Result<Vec<CLiteral>, ErrorKind> {
        let width = a.len();
        let mut current = a.to_vec();
        let mut overflow = Vec::default();

        for (stage, bit) in amount.iter().enumerate() {
            let distance = match stage < usize::BITS as usize - 1 {
                true => 1_usize << stage,
                false => usize::MAX,
            };
            if distance >= width {
                overflow.push(*bit);
                continue;
            }
            let moved = shifted(&current, distance, direction, fill);
            current = self.ite_bits(*bit, &moved, &current)?;
        }

        let overflow = self.or(&overflow)?;
        let filled = vec![fill; width];
        self.ite_bits(overflow, &filled, &current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::CLiteral;

    #[test]
    fn reindexing() {
        let bits = (1..=4).map(CLiteral::from).collect::<Vec<_>>();
        let bottom = CLiteral::bottom();
        assert_eq!(
            shifted(&bits, 1, Direction::Left, bottom),
            vec![bottom, bits[0], bits[1], bits[2]]
        );
        assert_eq!(
            shifted(&bits, 3, Direction::Right, bits[3]),
            vec![bits[3], bits[3], bits[3], bits[3]]
        );
        assert_eq!(shifted(&bits, 9, Direction::Left, bottom), vec![bottom; 4]);
    }
}
