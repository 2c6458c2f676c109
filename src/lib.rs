//! A library for determining the satisfiability of bit-vector formulas.
//!
//! otter_bv builds formulas from fixed-width bit-vector terms (variables, constants, and arithmetic, bitwise, relational, and structural operators), encodes the formulas as clauses through a bit-blaster, and determines satisfiability with a conflict-driven clause-learning core.
//! The core may be extended with modules: external reasoners which take part in decisions, propagation, and conflicts over the same atoms as the clauses of a formula.
//!
//! # Orientation
//!
//! The library is layered:
//! - A [term database](crate::terms) holds hash-consed terms, and checks the widths of operands as terms are built.
//! - The [bit-blaster](crate::blast) encodes each term as one literal per bit, defined by clauses over the literals of the operands of the term.
//! - A [context] holds a formula (as clauses), a valuation, and [modules], and determines satisfiability through a handful of [procedures].
//! - A [solver](crate::solver) bundles the three, and is the intended entry point for bit-vector formulas.
//!
//! Within a context, and at a high-level, a solve is viewed in terms of manipulation of, and relationships between, a handful of databases:
//! - A formula is stored in a [clause database](crate::db::clause).
//! - A valuation is stored in an [atom database](crate::db::atom).
//! - The order of assignments is stored on a [trail](crate::db::trail).
//!
//! So, some places to start reading:
//! - The [solver](crate::solver) for building and solving bit-vector formulas.
//! - The [solve procedure](crate::procedures::solve), for the loop of decisions, propagation, and conflicts.
//! - The [modules] for the protocol by which external reasoners take part in a solve.
//! - The [configuration](crate::config), for the options of the core and of the bit-blaster.
//!
//! # Examples
//!
//! + Find a factorisation of 18, with at most three bits set in one factor.
//!
//! ```rust
//! # use otter_bv::modules::CardinalityLessThan;
//! # use otter_bv::solver::Solver;
//! # use otter_bv::terms::Opcode;
//! let mut solver = Solver::new();
//!
//! let x = solver.add_variable(8, "x").unwrap();
//! let y = solver.add_variable(8, "y").unwrap();
//! let product = solver.add_operator(Opcode::MUL, &[x, y]).unwrap();
//! let eighteen = solver.add_constant(8, 18).unwrap();
//! let equation = solver.add_operator(Opcode::EQUAL, &[product, eighteen]).unwrap();
//! solver.add_assertion(equation, true).unwrap();
//!
//! let x_bits = solver.term_literals(x).unwrap();
//! let cardinality = CardinalityLessThan::new(x_bits, 4);
//! solver.add_and_assert_module(Box::new(cardinality)).unwrap();
//!
//! assert_eq!(solver.solve(), Ok(true));
//!
//! let x_value = solver.get_variable_assignment(x).unwrap();
//! assert!(x_value.iter().filter(|bit| **bit == 1).count() < 4);
//! ```
//!
//! + Parse and solve a DIMACS formula, directly with a context.
//!
//! ```rust
//! # use otter_bv::context::Context;
//! # use otter_bv::config::Config;
//! # use otter_bv::reports::Report;
//! let mut the_context = Context::from_config(Config::default());
//!
//! let dimacs = b"
//!  1  2 0
//! -1  2 0
//! -1 -2 0
//!  1 -2 0
//! ";
//!
//! assert!(the_context.read_dimacs(dimacs.as_slice()).is_ok());
//! assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
//! ```
//!
//! # Design
//!
//! Each layer sees the layer below only through a small interface:
//! - The bit-blaster adds clauses and requests fresh atoms as any other caller would, and so the core has no knowledge of terms.
//! - Modules read the valuation through a [handle](modules::ModuleHandle), and the core applies whatever a module infers after checking the inference against the [module contract](types::err::ModuleError).
//! - Clauses are held in a [clause database](db::clause) and referred to by [keys](db::ClauseKey), with units, binary clauses, and long clauses stored apart.
//!
//! Solves are deterministic under the default configuration, as the source of randomness has a fixed seed and no time limit is set.
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, each with a target from [misc::log].
//! No logger is installed by the library, and so logs cost nothing unless a logger is installed by the caller.
//!
//! With [env_logger](https://docs.rs/env_logger/latest/env_logger/), for example:
//! - `RUST_LOG=clause_db=trace …` shows each clause stored, or
//! - `RUST_LOG=blast=trace …` shows the gates built for each term.

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

#[doc(hidden)]
pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod reports;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;

pub mod misc;
pub mod resolution_buffer;

pub mod modules;

pub mod blast;
pub mod solver;
pub mod terms;
