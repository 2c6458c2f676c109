/// Schedulers for reduction of the clause database.
///
/// Reductions only take place at a restart, when no clause above the assumption level is the reason for an assignment.
/// If two scheduled reductions coincide, only one reduction takes place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduler {
    /// Reduce the clause database every `luby` restarts.
    pub luby: Option<u32>,

    /// Reduce the clause database (at the next restart) once `conflict` conflicts have been seen since the last reduction.
    pub conflict: Option<u32>,
}
