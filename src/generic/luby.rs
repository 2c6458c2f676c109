/*!
An iterator over the Luby sequence, used to schedule restarts.

See <https://oeis.org/A182105> for details on the sequence.

The *i*th element (counting from 1) is 2^(k-1) if *i* = 2^k - 1, and otherwise the (*i* - 2^(k-1) + 1)th element, for 2^(k-1) ≤ *i* < 2^k - 1.
Elements are computed directly from their position by unwinding this recursion.
*/

/// Representation used for numbers in a luby sequence.
pub type LubyRepresentation = u32;

/// The position reached in the sequence, and the element at that position.
pub struct Luby {
    index: LubyRepresentation,
    current: LubyRepresentation,
}

impl Default for Luby {
    /// A fresh sequence, positioned on the first element.
    fn default() -> Self {
        let mut luby = Luby {
            index: 0,
            current: 0,
        };
        luby.next();
        luby
    }
}

impl Luby {
    /// The element at (one-based) position `index`.
    pub fn element(mut index: LubyRepresentation) -> LubyRepresentation {
        loop {
            // The smallest k with index ≤ 2^k - 1.
            let k = LubyRepresentation::BITS - index.leading_zeros();
            if index == (1 << k) - 1 {
                return 1 << (k - 1);
            }
            index -= (1 << (k - 1)) - 1;
        }
    }

    /// The current element of the sequence.
    pub fn current(&self) -> LubyRepresentation {
        self.current
    }
}

impl Iterator for Luby {
    type Item = LubyRepresentation;

    fn next(&mut self) -> Option<Self::Item> {
        // Positions past 2^31 - 1 would overflow the shift in `element`.
        if self.index >= LubyRepresentation::MAX >> 1 {
            return None;
        }
        self.index += 1;
        self.current = Luby::element(self.index);
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://oeis.org/A182105
    const LUBY_SLICE: &[LubyRepresentation] = &[
        1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
        16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4,
        8, 16, 32, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1,
        2, 4, 8, 16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
    ];

    #[test]
    fn luby() {
        let mut luby = Luby {
            index: 0,
            current: 0,
        };
        for known_value in LUBY_SLICE {
            assert_eq!(luby.next(), Some(*known_value))
        }
    }

    #[test]
    fn default_is_first_element() {
        let mut luby = Luby::default();
        assert_eq!(luby.current(), 1);
        assert_eq!(luby.next(), Some(1));
        assert_eq!(luby.next(), Some(2));
    }
}
