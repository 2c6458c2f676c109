/*!
Schedulers, used to interrupt a solve for some task.

The interrupts return true if an interrupt is due, and false otherwise.

After each resolved conflict [housekeeping](GenericContext::conflict_housekeeping) is performed:
- A restart is made once fresh conflicts (conflicts since the last restart) reach the current element of the luby sequence multiplied by the configured `u` value.
- At a restart, the clause database is reduced if either the [Scheduler](crate::config::Scheduler) counts enough restarts, or enough conflicts since the last reduction.

A restart backjumps to the lowest decision level, and so keeps any assumptions made.
*/

use crate::{context::GenericContext, misc::log::targets::{self}};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Returns whether it is time for a interrupt based on whether fresh conflicts have reached the current luby element (scaled).
    pub fn luby_fresh_conflict_interrupt(&self) -> bool {
        let limit = self
            .config
            .luby_u
            .value
            .saturating_mul(self.counters.luby.current());
        self.counters.fresh_conflicts >= limit
    }

    /// Returns whether it is time for a interrupt based on conflicts since the last reduction.
    pub fn conflict_total_interrupt(&self) -> bool {
        self.config
            .scheduler
            .conflict
            .is_some_and(|interval| self.counters.conflicts_since_reduction >= interval)
    }

    /// Returns whether it is time for a interrupt based on whether total restarts is multiple of the configured interval.
    pub fn restart_interrupt(&self) -> bool {
        self.config
            .scheduler
            .luby
            .is_some_and(|interval| interval > 0 && self.counters.restarts % interval as usize == 0)
    }

    /// Restarts, and reduces the clause database, if scheduled.
    pub fn conflict_housekeeping(&mut self) {
        if !self.config.restart.value || !self.luby_fresh_conflict_interrupt() {
            return;
        }

        self.counters.luby.next();
        self.counters.restarts += 1;
        self.counters.fresh_conflicts = 0;
        self.backjump(self.trail.lowest_decision_level());

        if self.restart_interrupt() || self.conflict_total_interrupt() {
            let limit = self.clause_db.long_addition_count() / 2;
            let removed = self.clause_db.reduce_by(limit, &self.atom_db);
            log::debug!(target: targets::REDUCTION, "Reduction {} removed {removed}", self.counters.reductions);

            self.counters.reductions += 1;
            self.counters.conflicts_since_reduction = 0;
        }
    }
}
