use crate::{
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
    types::err::{self},
};

/// The index to a clause within one of the stores of the clause database.
pub type FormulaIndex = u32;

/// A token distinguishing successive uses of the same addition index.
pub type FormulaToken = u16;

/// A key to access a clause stored in the clause database.
///
/// Clauses are split by size (unit, binary, long) and by whether they are original or an addition.
/// Long additions may be removed, and the slot of a removed addition reused, so keys to long additions carry a token which is revised on each reuse.
/// A watch holding a key with an outdated token is stale, and is dropped when next seen.
///
/// Keys to unit clauses contain the unit itself, as unit clauses are never watched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClauseKey {
    /// An original unit clause.
    OriginalUnit(CLiteral),

    /// A unit clause derived during a solve.
    AdditionUnit(CLiteral),

    /// An original binary clause.
    OriginalBinary(FormulaIndex),

    /// A binary clause derived during a solve.
    AdditionBinary(FormulaIndex),

    /// An original clause of three or more literals.
    Original(FormulaIndex),

    /// A derived clause of three or more literals.
    Addition(FormulaIndex, FormulaToken),
}

impl ClauseKey {
    /// The index of the key, or the atom of the literal if the key is to a unit clause.
    pub fn index(&self) -> usize {
        match self {
            Self::OriginalUnit(literal) | Self::AdditionUnit(literal) => literal.atom() as usize,
            Self::OriginalBinary(index) | Self::AdditionBinary(index) | Self::Original(index) => {
                *index as usize
            }
            Self::Addition(index, _) => *index as usize,
        }
    }

    /// The key with a revised token, for reuse of an index.
    ///
    /// Only keys to long additions have tokens.
    pub fn retoken(&self) -> Result<Self, err::ClauseDBError> {
        match self {
            Self::Addition(index, token) => match token.checked_add(1) {
                Some(token) => Ok(Self::Addition(*index, token)),
                None => Err(err::ClauseDBError::StorageExhausted),
            },

            _ => {
                log::error!(target: targets::CLAUSE_DB, "Retoken of a key without a token: {self}");
                Err(err::ClauseDBError::InvalidKeyToken)
            }
        }
    }
}

impl std::fmt::Display for ClauseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OriginalUnit(literal) => write!(f, "OriginalUnit({literal})"),
            Self::AdditionUnit(literal) => write!(f, "AdditionUnit({literal})"),
            Self::OriginalBinary(index) => write!(f, "OriginalBinary({index})"),
            Self::AdditionBinary(index) => write!(f, "AdditionBinary({index})"),
            Self::Original(index) => write!(f, "Original({index})"),
            Self::Addition(index, token) => write!(f, "Addition({index}, {token})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retoken_addition() {
        let key = ClauseKey::Addition(7, 0);
        assert_eq!(key.retoken(), Ok(ClauseKey::Addition(7, 1)));
        assert_eq!(
            ClauseKey::Addition(7, FormulaToken::MAX).retoken(),
            Err(err::ClauseDBError::StorageExhausted)
        );
    }

    #[test]
    fn retoken_other() {
        assert!(ClauseKey::Original(3).retoken().is_err());
        assert!(ClauseKey::OriginalUnit(CLiteral::new(2, true))
            .retoken()
            .is_err());
    }
}
