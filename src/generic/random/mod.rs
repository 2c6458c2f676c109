//! Sources of randomness.
//!
//! A context is generic over its source of randomness, though only [MinimalPCG32] is supplied.

mod minimal_pcg;

pub use minimal_pcg::MinimalPCG32;
