//! Reading terms from the model of a satisfiable solve.
//!
//! Bits are always least significant first, so index 0 is bit 0 and the last entry is the sign bit.

use crate::{
    reports::Report,
    structures::{literal::Literal, valuation::Valuation},
    terms::{constant::Bits, Term},
    types::err::{ErrorKind, QueryError},
};

use super::Solver;

/// The value of a bit in a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitValue {
    False,
    True,

    /// The bit was never encoded, and so any value is consistent with the model.
    DontCare,
}

impl BitValue {
    /// The value as an integer: 1 for true, 0 for false, and -1 for don't care.
    pub fn as_int(&self) -> i32 {
        match self {
            Self::False => 0,
            Self::True => 1,
            Self::DontCare => -1,
        }
    }
}

impl From<bool> for BitValue {
    fn from(value: bool) -> Self {
        match value {
            true => Self::True,
            false => Self::False,
        }
    }
}

impl Solver {
    /// Checks the most recent solve was satisfiable, and that `term` belongs to the solver.
    fn check_query(&self, term: Term) -> Result<(), ErrorKind> {
        match self.last_report {
            None => return Err(QueryError::NotSolved.into()),
            Some(Report::Unsatisfiable) => return Err(QueryError::Unsatisfiable.into()),
            Some(Report::Unknown) => return Err(QueryError::Unknown.into()),
            Some(Report::Satisfiable) => {}
        }
        match self.terms.contains(term) {
            true => Ok(()),
            false => Err(QueryError::ForeignTerm.into()),
        }
    }

    /// The value of each bit of `term` in the model of the most recent solve.
    ///
    /// Bits of a term which was never blasted are [DontCare](BitValue::DontCare).
    pub fn assignment(&self, term: Term) -> Result<Vec<BitValue>, ErrorKind> {
        self.check_query(term)?;
        let width = self.terms.width(term)? as usize;

        let (Some(literals), Some(model)) = (self.blaster.literals_of(term), &self.model) else {
            return Ok(vec![BitValue::DontCare; width]);
        };

        Ok(literals
            .iter()
            .map(|literal| match literal.constant_value() {
                Some(value) => BitValue::from(value),
                None => match model.value_of(literal.atom()) {
                    Some(value) => BitValue::from(value == literal.polarity()),
                    None => BitValue::DontCare,
                },
            })
            .collect())
    }

    /// The value of each bit of `term` as an integer: 1 for true, 0 for false, and -1 for don't care.
    pub fn get_variable_assignment(&self, term: Term) -> Result<Vec<i32>, ErrorKind> {
        Ok(self
            .assignment(term)?
            .iter()
            .map(|value| value.as_int())
            .collect())
    }

    /// The value of `term` in the model of the most recent solve.
    ///
    /// Variables are read from the model, with don't care bits read as false, and operators are evaluated from their operands.
    pub fn evaluate(&self, term: Term) -> Result<Bits, ErrorKind> {
        self.check_query(term)?;
        let mut variable_value = |variable: Term| -> Bits {
            self.assignment(variable)
                .unwrap_or_default()
                .into_iter()
                .map(|value| value == BitValue::True)
                .collect()
        };
        Ok(self.terms.evaluate(term, &mut variable_value)?)
    }
}
