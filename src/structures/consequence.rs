//! The reason an atom holds its value.

use crate::db::ClauseKey;

/// The source of an assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum AssignmentSource {
    /// A free decision, made during a solve.
    Decision,

    /// An assumption, valid for a single solve.
    Assumption,

    /// A consequence of boolean constraint propagation on the clause with the given key.
    BCP(ClauseKey),

    /// An inference of a module, with the clause recording the reason of the inference.
    Module(ClauseKey),
}

impl AssignmentSource {
    /// The key to the clause which forced the assignment, if the assignment was forced.
    pub fn reason(&self) -> Option<ClauseKey> {
        match self {
            Self::Decision | Self::Assumption => None,
            Self::BCP(key) | Self::Module(key) => Some(*key),
        }
    }
}

impl std::fmt::Display for AssignmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decision => write!(f, "decision"),
            Self::Assumption => write!(f, "assumption"),
            Self::BCP(key) => write!(f, "bcp({key})"),
            Self::Module(key) => write!(f, "module({key})"),
        }
    }
}
