/*!
The trail: every assignment of a solve, in the order the assignments were made.

Assignments are grouped into levels.
Level zero holds assignments which follow from the clause database alone, and each further level begins with a decision (or, if assumptions are made, the first level holds every assumption).
So, the assignments of level *i* (for *i* > 0) begin at `level_indicies[i - 1]`.

The trail also holds the propagation queue: assignments from `q_head` onwards have not yet been propagated.
*/

use crate::structures::literal::CLiteral;

use super::LevelIndex;

/// The trail.
#[derive(Default)]
pub struct Trail {
    /// Every assignment, in order.
    pub assignments: Vec<CLiteral>,

    /// The index of the first assignment of each level above zero.
    pub level_indicies: Vec<usize>,

    /// The index of the first assignment yet to be propagated.
    pub q_head: usize,

    /// Levels at or below this index hold assumptions.
    pub initial_decision_level: LevelIndex,
}

impl Trail {
    /// True if some assumption has been made, false otherwise.
    pub fn assumption_is_made(&self) -> bool {
        self.initial_decision_level > 0
    }

    /// The lowest level at which a decision may be made.
    /// Zero, if no assumptions has been made, otherwise some higher level.
    pub fn lowest_decision_level(&self) -> LevelIndex {
        self.initial_decision_level
    }

    /// The current level.
    pub fn level(&self) -> LevelIndex {
        self.level_indicies.len() as LevelIndex
    }

    /// Opens a fresh level, to begin with the next assignment.
    pub fn push_level(&mut self) {
        self.level_indicies.push(self.assignments.len());
    }

    /// A count of the levels which contain decisions (as opposed to assumptions).
    pub fn decision_count(&self) -> LevelIndex {
        self.level().saturating_sub(self.initial_decision_level)
    }

    /// The assignments made at the (current) top level, in order of assignment.
    pub fn top_level_assignments(&self) -> &[CLiteral] {
        match self.level_indicies.last() {
            Some(&level_start) => &self.assignments[level_start..],
            None => &self.assignments,
        }
    }

    /// The next assignment to propagate, if any, advancing the queue.
    pub fn next_in_queue(&mut self) -> Option<CLiteral> {
        let literal = self.assignments.get(self.q_head).copied()?;
        self.q_head += 1;
        Some(literal)
    }

    /// Removes every level above `level`, and returns the assignments of those levels.
    ///
    /// # Soundness
    /// Does not clear the *valuation* of any atom.
    pub fn clear_assignments_above(&mut self, level: LevelIndex) -> Vec<CLiteral> {
        // level_indicies[level] is the first assignment of level + 1.
        match self.level_indicies.get(level as usize) {
            Some(&level_start) => {
                self.level_indicies.truncate(level as usize);
                let cleared = self.assignments.split_off(level_start);
                self.q_head = std::cmp::min(self.q_head, self.assignments.len());
                if level < self.initial_decision_level {
                    self.initial_decision_level = level;
                }
                cleared
            }
            None => Vec::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::Literal;

    #[test]
    fn levels_and_clearing() {
        let mut trail = Trail::default();
        trail.assignments.push(CLiteral::new(1, true));

        trail.push_level();
        trail.initial_decision_level = 1;
        trail.assignments.push(CLiteral::new(2, false));

        trail.push_level();
        trail.assignments.push(CLiteral::new(3, true));
        trail.assignments.push(CLiteral::new(4, true));
        trail.q_head = 4;

        assert_eq!(trail.level(), 2);
        assert_eq!(trail.decision_count(), 1);
        assert_eq!(trail.top_level_assignments().len(), 2);

        let cleared = trail.clear_assignments_above(1);
        assert_eq!(cleared, vec![CLiteral::new(3, true), CLiteral::new(4, true)]);
        assert_eq!(trail.q_head, 2);
        assert!(trail.assumption_is_made());

        let cleared = trail.clear_assignments_above(0);
        assert_eq!(cleared, vec![CLiteral::new(2, false)]);
        assert!(!trail.assumption_is_made());
        assert_eq!(trail.level(), 0);
        assert!(trail.clear_assignments_above(0).is_empty());
    }
}
