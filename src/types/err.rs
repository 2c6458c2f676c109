//! Error types used in the library.
//!
//! - Some of these are internally expected --- e.g. BCP errors are used to control the flow of a solve.
//! - Some are external and describe misuse of the interface --- e.g. a [TypeError] when the widths of operands do not fit an opcode, or a [QueryError] when an assignment is requested without a model.
//! - Most of the remainder are very unlikely to occur during use, and note some broken internal invariant.
//!
//! Unsatisfiability is never an error: it is a valid outcome of a solve, reported as such.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::{db::ClauseKey, structures::literal::CLiteral, terms::Opcode};

/// The error type returned by the library, wrapping the more specific error enums.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Analysis(AnalysisError),
    AtomDB(AtomDBError),
    BCP(BCPError),
    ClauseDB(ClauseDBError),
    Parse(ParseError),
    ResolutionBuffer(ResolutionBufferError),

    /// Operand widths (or parameters) do not fit an opcode.
    Type(TypeError),

    /// The wrong number of operands for an opcode.
    Arity(ArityError),

    /// A query was made without a (relevant) model.
    Query(QueryError),

    /// A module broke the module contract (a 'ModuleContractViolation').
    Module(ModuleError),

    Backjump,
    InvalidState,

    /// The replay log could not be written.
    Record(std::io::ErrorKind),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type(e) => write!(f, "type error: {e:?}"),
            Self::Arity(e) => write!(f, "arity error: {e:?}"),
            Self::Query(e) => write!(f, "query error: {e:?}"),
            Self::Module(e) => write!(f, "module contract violation: {e:?}"),
            Self::Record(e) => write!(f, "replay log error: {e}"),
            other => write!(f, "internal error: {other:?}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Noted errors during conflict analysis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// Somehow resolution resolved to an empty clause.
    EmptyResolution,

    /// Resolution reached a literal without a reason before a unique implication point.
    NoReason(CLiteral),
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

/// Errors in the atom database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and a learning opportunity.
    Conflict(ClauseKey),

    /// Some corruption in the watched literals of a clause.
    /// This is unexpected.
    CorruptWatch,
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// Unit clauses are identified with their literal, and are not stored as clauses.
    GetUnitKey,

    /// A clause is missing, e.g. removed during a reduction.
    Missing,

    /// An invalid key token, i.e. the clause of the key was removed and the slot reused.
    InvalidKeyToken,

    /// An invalid key index.
    InvalidKeyIndex,

    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// All possible keys have been used for some clause type (binary/long etc).
    StorageExhausted,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors during parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Some issue with the problem specification in a DIMACS input.
    ProblemSpecification,

    /// Some unspecific problem at a specific line.
    Line(usize),

    /// A token which is not an integer, at a specific line.
    Literal(usize),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors during resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionBufferError {
    /// A clause could not be found.
    LostClause,

    /// The conflict given for analysis is satisfied on the current valuation.
    SatisfiedClause,
}

impl From<ResolutionBufferError> for ErrorKind {
    fn from(e: ResolutionBufferError) -> Self {
        ErrorKind::ResolutionBuffer(e)
    }
}

/// Operand widths or parameters which do not fit an opcode.
///
/// Raised when a term is constructed, and never deferred to a solve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeError {
    /// An operand width differs from the width required by the opcode.
    WidthMismatch {
        opcode: Opcode,
        expected: u32,
        found: u32,
    },

    /// A width of one was required, e.g. for a condition, an assertion, or an assumption.
    NotBoolean { width: u32 },

    /// The range of an extract does not lie within the width of the operand.
    ExtractRange { low: u32, high: u32, width: u32 },

    /// A term of width zero was requested.
    ZeroWidth,

    /// A width beyond the supported maximum was requested.
    WidthOverflow,

    /// A constant value does not fit the requested width.
    ConstantOverflow { width: u32 },

    /// The text of a constant could not be read in the relevant base.
    InvalidConstant(String),

    /// A parameterised opcode was given to a constructor without parameters.
    Parameterised(Opcode),

    /// The index width of an array access is beyond the configured limit, or the array width does not divide into elements.
    AddressSpace { array_width: u32, index_width: u32 },

    /// A term from some other solver instance, or otherwise unknown.
    ForeignTerm,
}

impl From<TypeError> for ErrorKind {
    fn from(e: TypeError) -> Self {
        ErrorKind::Type(e)
    }
}

/// The wrong number of operands for an opcode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArityError {
    /// Fewer operands than required.
    TooFew {
        opcode: Opcode,
        minimum: usize,
        found: usize,
    },

    /// More operands than permitted.
    TooMany {
        opcode: Opcode,
        maximum: usize,
        found: usize,
    },
}

impl From<ArityError> for ErrorKind {
    fn from(e: ArityError) -> Self {
        ErrorKind::Arity(e)
    }
}

/// A query without a relevant model.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryError {
    /// No solve has taken place.
    NotSolved,

    /// The most recent solve was unsatisfiable.
    Unsatisfiable,

    /// The most recent solve ended without a result (e.g. due to a time limit).
    Unknown,

    /// The term does not belong to the solver.
    ForeignTerm,
}

impl From<QueryError> for ErrorKind {
    fn from(e: QueryError) -> Self {
        ErrorKind::Query(e)
    }
}

/// Violations of the module contract.
///
/// Each of these is fatal for the solve in which it is detected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModuleError {
    /// A decision on an atom outside the declared variables of the module.
    UndeclaredDecision(CLiteral),

    /// An inference on, or with a reason containing, an atom outside the declared variables of the module.
    UndeclaredInference(CLiteral),

    /// A conflict clause containing an atom outside the declared variables of the module.
    UndeclaredConflict(CLiteral),

    /// A conflict clause without the negation of the enable literal of the module.
    MissingEnable,

    /// A conflict clause with some literal not false on the current valuation.
    UnfalsifiedConflict(CLiteral),

    /// A reason for an inference which is not true on the current valuation.
    UnsupportedInference(CLiteral),
}

impl From<ModuleError> for ErrorKind {
    fn from(e: ModuleError) -> Self {
        ErrorKind::Module(e)
    }
}
