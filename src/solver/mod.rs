/*!
A solver for bit-vector formulas.

A [Solver] bundles a [term database](crate::terms), a [bit-blaster](crate::blast), and a [context](crate::context).
Terms are built through the solver, and are blasted when first used in an assertion, an assumption, or a module.

- Assertions are permanent, and hold for every later solve.
- Assumptions hold for the next solve only, and are cleared after the solve regardless of the result.
- Modules are registered with a fresh enable term of width one, and the constraint of a module holds exactly when the enable term is true.
  So, a module may be asserted permanently, or enabled through an assumption for a single solve.

After a satisfiable solve the value of any term may be read from the model, until the next solve.

# Example

```rust
# use otter_bv::solver::Solver;
# use otter_bv::terms::Opcode;
# use otter_bv::terms::constant;
let mut solver = Solver::new();

let x = solver.add_variable(8, "x").unwrap();
let y = solver.add_variable(8, "y").unwrap();
let product = solver.add_operator(Opcode::MUL, &[x, y]).unwrap();
let eighteen = solver.add_constant(8, 18).unwrap();
let equation = solver.add_operator(Opcode::EQUAL, &[product, eighteen]).unwrap();

solver.add_assertion(equation, true).unwrap();
assert_eq!(solver.solve(), Ok(true));

let x_value = solver.evaluate(x).unwrap();
let y_value = solver.evaluate(y).unwrap();
let product = constant::to_u64(&x_value).unwrap() * constant::to_u64(&y_value).unwrap();
assert_eq!(product % 256, 18);

// An assumption holds for a single solve.
let zero = solver.add_constant(8, 0).unwrap();
let x_zero = solver.add_operator(Opcode::EQUAL, &[x, zero]).unwrap();
solver.add_assumption(x_zero, true).unwrap();
assert_eq!(solver.solve(), Ok(false));
assert_eq!(solver.solve(), Ok(true));
```
*/

mod assignment;
pub use assignment::BitValue;
pub mod record;

use std::path::Path;

use record::Recorder;

use crate::{
    blast::Blaster,
    config::Config,
    context::{callbacks::CallbackTerminate, Context, Counters},
    misc::log::targets::{self},
    modules::Module,
    reports::Report,
    structures::{
        literal::{CLiteral, Literal},
        valuation::CValuation,
    },
    terms::{constant, Opcode, Term, TermDB},
    types::err::{ErrorKind, TypeError},
};

/// A solver for bit-vector formulas.
pub struct Solver {
    context: Context,

    terms: TermDB,

    blaster: Blaster,

    /// The report of the most recent solve, if any.
    last_report: Option<Report>,

    /// The valuation of the most recent satisfiable solve.
    model: Option<CValuation>,

    /// A count of modules, for naming enable terms.
    module_count: usize,

    recorder: Option<Recorder>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// A solver with the default configuration.
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    /// A solver configured by `config`.
    pub fn from_config(config: Config) -> Self {
        Solver {
            terms: TermDB::new(&config),
            blaster: Blaster::new(&config),
            context: Context::from_config(config),
            last_report: None,
            model: None,
            module_count: 0,
            recorder: None,
        }
    }

    /// The term database of the solver.
    pub fn terms(&self) -> &TermDB {
        &self.terms
    }

    /// The context of the solver.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Counters of the context, e.g. of conflicts and decisions.
    pub fn counters(&self) -> &Counters {
        &self.context.counters
    }

    /// The width of `term`.
    pub fn width(&self, term: Term) -> Result<u32, ErrorKind> {
        Ok(self.terms.width(term)?)
    }

    /// Appends a line to the replay log, if recording.
    fn record(&mut self, line: impl FnOnce() -> String) -> Result<(), ErrorKind> {
        match &mut self.recorder {
            Some(recorder) => recorder.line(&line()),
            None => Ok(()),
        }
    }

    /// Records each later call to a replay log at `path`.
    pub fn record_to(&mut self, path: impl AsRef<Path>) -> Result<(), ErrorKind> {
        self.recorder = Some(Recorder::create(path.as_ref())?);
        Ok(())
    }

    /// Sets a callback, checked throughout a solve, which ends the solve as [Unknown](Report::Unknown) when it returns true.
    pub fn set_terminate_callback(&mut self, callback: Box<CallbackTerminate>) {
        self.context.set_callback_terminate(callback);
    }
}

/// Term constructors.
impl Solver {
    /// A fresh variable of width `width`.
    pub fn add_variable(&mut self, width: u32, name: &str) -> Result<Term, ErrorKind> {
        let term = self.terms.add_variable(width, name)?;
        self.record(|| format!("{term} = variable {width} {name}"))?;
        Ok(term)
    }

    fn record_constant(&mut self, term: Term) -> Result<Term, ErrorKind> {
        if self.recorder.is_some() {
            let bits = match self.terms.kind(term)? {
                crate::terms::TermKind::Constant { bits } => constant::as_binary(bits),
                _ => String::default(),
            };
            let width = self.terms.width(term)?;
            self.record(|| format!("{term} = constant {width} {bits}"))?;
        }
        Ok(term)
    }

    /// The constant `value` of width `width`.
    pub fn add_constant(&mut self, width: u32, value: u64) -> Result<Term, ErrorKind> {
        let term = self.terms.add_constant(width, value)?;
        self.record_constant(term)
    }

    /// The constant of width `width` given by decimal text, possibly negative.
    pub fn add_constant_str(&mut self, width: u32, text: &str) -> Result<Term, ErrorKind> {
        let term = self.terms.add_constant_str(width, text)?;
        self.record_constant(term)
    }

    /// The constant given by binary text, most significant bit first, with width the length of the text.
    pub fn add_bin_constant(&mut self, text: &str) -> Result<Term, ErrorKind> {
        let term = self.terms.add_bin_constant(None, text)?;
        self.record_constant(term)
    }

    /// The constant of width `width` given by binary text, most significant bit first.
    pub fn add_bin_constant_width(&mut self, width: u32, text: &str) -> Result<Term, ErrorKind> {
        let term = self.terms.add_bin_constant(Some(width), text)?;
        self.record_constant(term)
    }

    /// The constant given by hexadecimal text, with width four times the length of the text.
    pub fn add_hex_constant(&mut self, text: &str) -> Result<Term, ErrorKind> {
        let term = self.terms.add_hex_constant(None, text)?;
        self.record_constant(term)
    }

    /// The constant of width `width` given by hexadecimal text.
    pub fn add_hex_constant_width(&mut self, width: u32, text: &str) -> Result<Term, ErrorKind> {
        let term = self.terms.add_hex_constant(Some(width), text)?;
        self.record_constant(term)
    }

    /// The term `opcode` applied to `operands`.
    pub fn add_operator(&mut self, opcode: Opcode, operands: &[Term]) -> Result<Term, ErrorKind> {
        let term = self.terms.add_operator(opcode, operands)?;
        self.record(|| {
            let operands = operands.iter().map(|operand| operand.to_string()).collect::<Vec<_>>();
            format!("{term} = operator {} {}", opcode.symbol(), operands.join(" "))
        })?;
        Ok(term)
    }

    fn record_structural(&mut self, term: Term, opcode: Opcode, operand: Term, parameters: &[u32]) -> Result<Term, ErrorKind> {
        self.record(|| {
            let parameters = parameters.iter().map(|p| p.to_string()).collect::<Vec<_>>();
            format!("{term} = operator {} {operand} {}", opcode.symbol(), parameters.join(" "))
        })?;
        Ok(term)
    }

    /// Bits `low` (inclusive) to `high` (exclusive) of `term`.
    pub fn add_extract(&mut self, term: Term, low: u32, high: u32) -> Result<Term, ErrorKind> {
        let extract = self.terms.add_extract(term, low, high)?;
        self.record_structural(extract, Opcode::EXTRACT, term, &[low, high])
    }

    /// `term` repeated `count` times.
    pub fn add_repeat(&mut self, term: Term, count: u32) -> Result<Term, ErrorKind> {
        let repeat = self.terms.add_repeat(term, count)?;
        self.record_structural(repeat, Opcode::REPEAT, term, &[count])
    }

    /// `term` rotated towards the most significant bit by `amount`.
    pub fn add_rotate_left(&mut self, term: Term, amount: u32) -> Result<Term, ErrorKind> {
        let rotated = self.terms.add_rotate_left(term, amount)?;
        self.record_structural(rotated, Opcode::ROTATE_LEFT, term, &[amount])
    }

    /// `term` rotated towards the least significant bit by `amount`.
    pub fn add_rotate_right(&mut self, term: Term, amount: u32) -> Result<Term, ErrorKind> {
        let rotated = self.terms.add_rotate_right(term, amount)?;
        self.record_structural(rotated, Opcode::ROTATE_RIGHT, term, &[amount])
    }

    /// `term` extended by `count` leading zeros.
    pub fn add_zero_extend(&mut self, term: Term, count: u32) -> Result<Term, ErrorKind> {
        let extended = self.terms.add_zero_extend(term, count)?;
        self.record_structural(extended, Opcode::ZERO_EXTEND, term, &[count])
    }

    /// `term` extended by `count` copies of its sign bit.
    pub fn add_sign_extend(&mut self, term: Term, count: u32) -> Result<Term, ErrorKind> {
        let extended = self.terms.add_sign_extend(term, count)?;
        self.record_structural(extended, Opcode::SIGN_EXTEND, term, &[count])
    }

    /// The term as an s-expression.
    pub fn display(&self, term: Term) -> Result<String, ErrorKind> {
        Ok(self.terms.display(term)?)
    }
}

/// Constraints and modules.
impl Solver {
    /// The literals of `term`, one per bit and least significant first, blasting `term` if required.
    ///
    /// Useful for declaring the variables of a module.
    pub fn term_literals(&mut self, term: Term) -> Result<Vec<CLiteral>, ErrorKind> {
        self.blaster.blast(&mut self.context, &self.terms, term)
    }

    /// The literal of a term of width one, with `polarity`.
    fn boolean_literal(&mut self, term: Term, polarity: bool) -> Result<CLiteral, ErrorKind> {
        let width = self.terms.width(term)?;
        if width != 1 {
            return Err(TypeError::NotBoolean { width }.into());
        }
        let literal = self.term_literals(term)?[0];
        Ok(match polarity {
            true => literal,
            false => literal.negate(),
        })
    }

    /// Asserts `term` (of width one) is `polarity`, for every later solve.
    pub fn add_assertion(&mut self, term: Term, polarity: bool) -> Result<(), ErrorKind> {
        let literal = self.boolean_literal(term, polarity)?;
        self.record(|| format!("assert {term} {polarity}"))?;
        log::debug!(target: targets::BLAST, "Assert {term} as {literal}");
        self.context.add_clause(literal)?;
        Ok(())
    }

    /// Assumes `term` (of width one) is `polarity`, for the next solve only.
    pub fn add_assumption(&mut self, term: Term, polarity: bool) -> Result<(), ErrorKind> {
        let literal = self.boolean_literal(term, polarity)?;
        self.record(|| format!("assume {term} {polarity}"))?;
        self.context.add_assumption(literal)
    }

    /// Registers `module`, and returns the term (of width one) which enables the module.
    ///
    /// The enable term is not asserted.
    pub fn add_module(&mut self, module: Box<dyn Module>) -> Result<Term, ErrorKind> {
        let name = format!("enable_{}", self.module_count);
        let enable = self.terms.add_variable(1, &name)?;
        let literal = self.term_literals(enable)?[0];
        self.context.add_module(module, literal)?;
        self.module_count += 1;
        self.record(|| format!("{enable} = module"))?;
        Ok(enable)
    }

    /// Registers `module`, and asserts the enable term of the module.
    pub fn add_and_assert_module(&mut self, module: Box<dyn Module>) -> Result<Term, ErrorKind> {
        let enable = self.add_module(module)?;
        self.add_assertion(enable, true)?;
        Ok(enable)
    }
}

/// Solving.
impl Solver {
    /// Determines whether the assertions (together with any assumptions) are satisfiable.
    ///
    /// Returns false for an unsatisfiable solve, and also for a solve which ends without a result (see [report](Solver::report)).
    /// Assumptions are cleared, whatever the result.
    pub fn solve(&mut self) -> Result<bool, ErrorKind> {
        self.model = None;
        self.last_report = None;

        let report = self.context.solve()?;
        log::info!(target: targets::BLAST, "Solve: {report}");

        if report == Report::Satisfiable {
            self.model = Some(self.context.atom_db.valuation_canonical().clone());
        }
        self.last_report = Some(report);

        self.record(|| format!("solve {report}"))?;
        if let Some(recorder) = &mut self.recorder {
            recorder.flush()?;
        }

        Ok(report == Report::Satisfiable)
    }

    /// The report of the most recent solve, or [Unknown](Report::Unknown) if no solve has taken place.
    pub fn report(&self) -> Report {
        self.last_report.unwrap_or(Report::Unknown)
    }
}
