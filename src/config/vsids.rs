/*!
Ways to apply VSIDS (variable state independent decay sum) during resolution-based analysis.

See [Understanding VSIDS branching heuristics in conflict-driven clause-learning sat solvers](https://arxiv.org/abs/1506.08905) for an overview of VSIDS.
*/

/// Supported VSIDS variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(clippy::upper_case_acronyms)]
pub enum VSIDS {
    /// Every atom occurring in the learnt clause is bumped, following [Chaff](https://dl.acm.org/doi/10.1145/378239.379017).
    Chaff,

    /// Every atom occurring in some clause used during resolution (including the learnt clause) is bumped, following [MiniSAT](https://link.springer.com/chapter/10.1007/978-3-540-24605-3_37).
    MiniSAT,
}

impl VSIDS {
    pub const MIN: VSIDS = VSIDS::Chaff;
    pub const MAX: VSIDS = VSIDS::MiniSAT;
}

impl std::fmt::Display for VSIDS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chaff => write!(f, "Chaff"),
            Self::MiniSAT => write!(f, "MiniSAT"),
        }
    }
}
