/*!
(The internal representation of) an atom (aka. a 'variable').

Each atom is a u32 *u* such that either *u* is 0, or *u - 1* is an atom.
So, the atoms of a context are [0..*m*) for some *m*, and atoms may be used directly as the indicies of a structure.

The atom 0 is [TOP_ATOM], fixed with the value true at level zero when a context is created.
The bit-blaster uses TOP (and its negation) for every constant bit, so constants never require a fresh atom.

```rust
# use otter_bv::structures::atom::{Atom, TOP_ATOM};
let atoms = (0..97).collect::<Vec<Atom>>();
assert_eq!(atoms[0], TOP_ATOM);
```

# Notes
In the SAT literature these are often called 'variables' while in the logic literature these are often called 'atoms'.
'Variable' is reserved for bit-vector variables in this library, and so atoms are always 'atoms'.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The atom `0` is fixed internally with a value of true.
pub const TOP_ATOM: Atom = 0;

/// The maximum instance of an atom.
///
/// Limited so that every atom has an integer representation of either polarity.
pub const ATOM_MAX: Atom = i32::MAX.unsigned_abs();
