//! Arrays as bit-vectors.
//!
//! An array with an index of width *i* is a bit-vector of 2^*i* elements of equal width, with element *k* at bits *k·e* to *(k + 1)·e*.
//! Every element is encoded explicitly, and so arrays are the costliest terms to blast, and the index width is bounded by configuration.

use crate::{structures::literal::CLiteral, types::err::ErrorKind};

use super::Circuit;

impl<R: rand::Rng + std::default::Default> Circuit<'_, R> {
    /// The element of `array` at `index`, as a tree of multiplexers over the bits of the index.
    pub fn select(&mut self, array: &[CLiteral], index: &[CLiteral]) -> Result<Vec<CLiteral>, ErrorKind> {
        let element_width = array.len() >> index.len();
        let mut elements = array
            .chunks(element_width)
            .map(|chunk| chunk.to_vec())
            .collect::<Vec<_>>();

        // Each layer halves the candidates, on the next bit of the index from the least significant.
        for bit in index {
            let mut layer = Vec::with_capacity(elements.len() / 2);
            for pair in elements.chunks(2) {
                match pair {
                    [even, odd] => layer.push(self.ite_bits(*bit, odd, even)?),
                    [single] => layer.push(single.clone()),
                    _ => {}
                }
            }
            elements = layer;
        }

        Ok(elements.into_iter().next().unwrap_or_default())
    }

    /// `array` with the element at `index` replaced by `value`.
    pub fn store(
        &mut self,
        array: &[CLiteral],
        index: &[CLiteral],
        value: &[CLiteral],
    ) -> Result<Vec<CLiteral>, ErrorKind> {
        let element_width = value.len();
        let mut stored = Vec::with_capacity(array.len());

        for (position, element) in array.chunks(element_width).enumerate() {
            let matches = index
                .iter()
                .enumerate()
                .map(|(bit, literal)| match (position >> bit) & 1 {
                    1 => *literal,
                    _ => -*literal,
                })
                .collect::<Vec<_>>();
            let guard = self.and(&matches)?;
            stored.extend(self.ite_bits(guard, value, element)?);
        }

        Ok(stored)
    }
}
