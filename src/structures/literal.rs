//! Literals are atoms paired with a (boolean) polarity.
//!
//! Or, rather, anything which has methods for returning an atom and a polarity (and a few other useful things).
//!
//! The 'canonical' implementation of the literal trait is the [ABLiteral] structure, made of an atom (the 'a') and a boolean (the 'b').
//!
//! ```rust
//! # use otter_bv::structures::literal::{CLiteral, Literal};
//! let literal = CLiteral::new(79, true);
//!
//! assert!(literal.polarity());
//! assert_eq!(literal.atom(), 79);
//! assert!(!literal.negate().polarity());
//! assert_eq!(-literal, literal.negate());
//! assert_eq!(literal.negate().as_int(), -79);
//! ```
//!
//! Literals are ordered by atom and then polarity, with false (strictly) less than true.
//! And, literals are hashable, as they are often used as the keys of maps.

use crate::structures::atom::{Atom, TOP_ATOM};

/// Something which has methods for returning an atom and a polarity, etc.
pub trait Literal: std::cmp::Ord + std::hash::Hash {
    /// A fresh literal, specified by pairing an atom with a boolean.
    fn new(atom: Atom, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;

    /// The literal in it's 'canonical' form of an atom paired with a boolean.
    fn canonical(&self) -> CLiteral;

    /// The literal in it's integer form, with sign indicating polarity.
    fn as_int(&self) -> i64;
}

/// The representation of a literal as an atom paired with a boolean.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ABLiteral {
    /// The atom of a literal.
    atom: Atom,

    /// The polarity of a literal.
    polarity: bool,
}

/// The canonical implementation of a literal.
pub type CLiteral = ABLiteral;

impl Literal for ABLiteral {
    fn new(atom: Atom, polarity: bool) -> Self {
        Self { atom, polarity }
    }

    fn negate(&self) -> Self {
        Self {
            atom: self.atom,
            polarity: !self.polarity,
        }
    }

    fn atom(&self) -> Atom {
        self.atom
    }

    fn polarity(&self) -> bool {
        self.polarity
    }

    fn canonical(&self) -> CLiteral {
        *self
    }

    fn as_int(&self) -> i64 {
        match self.polarity {
            true => self.atom as i64,
            false => -(self.atom as i64),
        }
    }
}

impl ABLiteral {
    /// The literal which is always true.
    pub const fn top() -> Self {
        Self {
            atom: TOP_ATOM,
            polarity: true,
        }
    }

    /// The literal which is always false.
    pub const fn bottom() -> Self {
        Self {
            atom: TOP_ATOM,
            polarity: false,
        }
    }

    /// Some constant truth value, if the literal is [top](ABLiteral::top) or [bottom](ABLiteral::bottom).
    pub fn constant_value(&self) -> Option<bool> {
        match self.atom {
            TOP_ATOM => Some(self.polarity),
            _ => None,
        }
    }

    /// The constant literal for `value`.
    pub const fn constant(value: bool) -> Self {
        Self {
            atom: TOP_ATOM,
            polarity: value,
        }
    }
}

impl std::ops::Neg for ABLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for ABLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.polarity {
            true => write!(f, "{}", self.atom),
            false => write!(f, "-{}", self.atom),
        }
    }
}

impl From<i32> for ABLiteral {
    /// The literal whose integer form is `value`.
    ///
    /// Note, as 0 is TOP the integer 0 is read as TOP.
    fn from(value: i32) -> Self {
        Self {
            atom: value.unsigned_abs(),
            polarity: !value.is_negative(),
        }
    }
}
