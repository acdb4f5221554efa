use super::{prefix, StepEngine, StepError, StepResult};
use crate::sequence::{IndexSet, Sequence, Value};
use tracing::trace;

/// A key lifted out of the sequence and not yet placed.
///
/// `hole` is the slot the key would land in if placed now; the element
/// being compared against is at `hole - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingInsert {
    pub key: Value,
    pub hole: usize,
}

/// Insertion sort cursor. `pending` is `None` between outer iterations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionState {
    len: usize,
    outer: usize,
    pending: Option<PendingInsert>,
}

impl InsertionState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            outer: 0,
            pending: None,
        }
    }

    pub fn outer(&self) -> usize {
        self.outer
    }

    pub fn pending(&self) -> Option<PendingInsert> {
        self.pending
    }
}

impl StepEngine for InsertionState {
    fn step(&mut self, seq: &mut Sequence) -> Result<StepResult, StepError> {
        self.check_len(seq)?;

        if self.outer >= self.len {
            return Ok(StepResult::finished(self.len));
        }

        let outer = self.outer;
        let pending = *self.pending.get_or_insert_with(|| PendingInsert {
            key: seq.get(outer),
            hole: outer,
        });

        if pending.hole > 0 && seq.get(pending.hole - 1) > pending.key {
            let from = pending.hole - 1;
            seq.set(pending.hole, seq.get(from));
            trace!(target: "engine", "insertion shift {} -> {}", from, pending.hole);

            self.pending = Some(PendingInsert {
                hole: from,
                ..pending
            });
            return Ok(StepResult::in_progress(
                IndexSet::from([from, from + 1]),
                prefix(self.outer),
            ));
        }

        seq.set(pending.hole, pending.key);
        self.pending = None;
        self.outer += 1;
        trace!(target: "engine", "insertion placed {} at {}", pending.key, pending.hole);

        if self.outer >= self.len {
            let mut result = StepResult::finished(self.len);
            result.active.insert(self.outer - 1);
            return Ok(result);
        }
        Ok(StepResult::in_progress(
            IndexSet::from([self.outer - 1]),
            prefix(self.outer),
        ))
    }

    fn is_complete(&self) -> bool {
        self.outer >= self.len
    }

    fn expected_len(&self) -> usize {
        self.len
    }
}
