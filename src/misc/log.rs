/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library, each with one of the targets below.
So, output may be narrowed to a part of the library, e.g. with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
- `RUST_LOG=blast=trace …` for the encoding of terms, or
- `RUST_LOG=module=debug …` for the interaction of modules with a solve.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [BCP](crate::procedures::bcp)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [analysis](crate::procedures::analysis)
    pub const ANALYSIS: &str = "analysis";

    /// Logs related to clause deletion
    pub const REDUCTION: &str = "reduction";

    /// Logs related to the [clause database](crate::db::clause)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to a valuation
    pub const VALUATION: &str = "valuation";

    /// Logs related to [backjumping](crate::procedures::backjump)
    pub const BACKJUMP: &str = "backjump";

    /// Logs related to [assumptions](crate::procedures::assumptions)
    pub const ASSUMPTIONS: &str = "assumptions";

    /// Logs related to [modules](crate::modules)
    pub const MODULE: &str = "module";

    /// Logs related to the [bit-blaster](crate::blast)
    pub const BLAST: &str = "blast";

    /// Logs related to the [term database](crate::terms)
    pub const TERMS: &str = "terms";

    /// Logs related to the [replay log](crate::solver::record)
    pub const RECORD: &str = "record";
}
