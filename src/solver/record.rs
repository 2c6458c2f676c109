/*!
A replay log of calls to a solver.

Once [record_to](super::Solver::record_to) is called, each later call which builds a term, adds a constraint, or solves is appended to the log as a line of text.
Terms are named by index, as `t<index>`, and so a log may be read back against a fresh solver which makes the same calls in the same order.

```text
t0 = variable 8 x
t1 = variable 8 y
t2 = operator * t0 t1
t3 = constant 8 00010010
t4 = operator = t2 t3
assert t4 true
solve Satisfiable
```

Lines are buffered, and flushed after each solve.
*/

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{misc::log::targets::{self}, types::err::ErrorKind};

/// A sink for the replay log.
pub struct Recorder {
    writer: BufWriter<File>,
}

impl Recorder {
    /// A recorder writing to a fresh file at `path`, replacing any existing file.
    pub fn create(path: &Path) -> Result<Self, ErrorKind> {
        let file = File::create(path).map_err(|e| ErrorKind::Record(e.kind()))?;
        log::info!(target: targets::RECORD, "Recording to {}", path.display());
        Ok(Recorder {
            writer: BufWriter::new(file),
        })
    }

    /// Appends `line` to the log.
    pub fn line(&mut self, line: &str) -> Result<(), ErrorKind> {
        log::trace!(target: targets::RECORD, "{line}");
        writeln!(self.writer, "{line}").map_err(|e| ErrorKind::Record(e.kind()))
    }

    /// Writes any buffered lines.
    pub fn flush(&mut self) -> Result<(), ErrorKind> {
        self.writer.flush().map_err(|e| ErrorKind::Record(e.kind()))
    }
}
