//! Key structures, such as literals and clauses.
//!
//! Most structures are made of a trait to capture the key features of the structure and a 'canonical' implementation of the trait.
//! Use of a trait or it's canonical implementation within the library is situational.
//!
//! ## Formulas
//!
//! A formula 𝐅 is set of [clauses](clause), interpreted as the conjunction of those clauses.
//! The formula of a context is the conjunction of clauses in the [clause database](crate::db::clause), and is always entailed by the clauses given to the context (as the clause database may also contain learnt clauses).
//!
//! ## Bit-vectors
//!
//! Bit-vector terms are not structures in this sense, and live in the [term database](crate::terms).
//! A term reaches the structures here only after [bit-blasting](crate::blast), as a vector of literals (one per bit).

pub mod atom;
pub mod clause;
pub mod consequence;
pub mod literal;
pub mod valuation;
