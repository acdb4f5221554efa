use super::{StepEngine, StepError, StepResult};
use crate::sequence::{IndexSet, Sequence};
use tracing::trace;

/// Bubble sort cursor.
///
/// `outer` counts finished passes, which is also how many trailing
/// positions are final. `inner` is the left element of the next pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BubbleState {
    len: usize,
    outer: usize,
    inner: usize,
}

impl BubbleState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            outer: 0,
            inner: 0,
        }
    }

    pub fn outer(&self) -> usize {
        self.outer
    }

    pub fn inner(&self) -> usize {
        self.inner
    }

    /// The last `outer` positions
    fn settled_tail(&self) -> IndexSet {
        (self.len - self.outer..self.len).collect()
    }
}

impl StepEngine for BubbleState {
    fn step(&mut self, seq: &mut Sequence) -> Result<StepResult, StepError> {
        self.check_len(seq)?;

        if self.outer >= self.len {
            return Ok(StepResult::finished(self.len));
        }

        if self.inner + self.outer + 1 < self.len {
            let j = self.inner;
            let swapped = seq.get(j) > seq.get(j + 1);
            if swapped {
                seq.swap(j, j + 1);
            }
            trace!(target: "engine", "bubble compare {} {} swapped={}", j, j + 1, swapped);

            let result = StepResult::in_progress(IndexSet::from([j, j + 1]), self.settled_tail());
            self.inner += 1;
            return Ok(result);
        }

        // Pass finished, one more trailing element is final
        self.inner = 0;
        self.outer += 1;
        trace!(target: "engine", "bubble pass {} done", self.outer);

        if self.outer >= self.len {
            return Ok(StepResult::finished(self.len));
        }
        Ok(StepResult::in_progress(IndexSet::new(), self.settled_tail()))
    }

    fn is_complete(&self) -> bool {
        self.outer >= self.len
    }

    fn expected_len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(indices: &[usize]) -> IndexSet {
        indices.iter().copied().collect()
    }

    #[test]
    fn test_first_pass_of_four() {
        let mut seq = Sequence::from(vec![5, 3, 8, 1]);
        let mut state = BubbleState::new(4);

        let r = state.step(&mut seq).unwrap();
        assert_eq!(seq.values(), &[3, 5, 8, 1]);
        assert_eq!(r.active, set(&[0, 1]));
        assert!(r.sorted.is_empty());

        let r = state.step(&mut seq).unwrap();
        assert_eq!(seq.values(), &[3, 5, 8, 1]);
        assert_eq!(r.active, set(&[1, 2]));

        let r = state.step(&mut seq).unwrap();
        assert_eq!(seq.values(), &[3, 5, 1, 8]);
        assert_eq!(r.active, set(&[2, 3]));
        assert!(r.sorted.is_empty());

        // End of pass
        let r = state.step(&mut seq).unwrap();
        assert!(r.active.is_empty());
        assert_eq!(r.sorted, set(&[3]));
        assert!(!r.complete);
        assert_eq!((state.outer(), state.inner()), (1, 0));
    }

    #[test]
    fn test_second_pass_reports_trailing_sorted() {
        let mut seq = Sequence::from(vec![5, 3, 8, 1]);
        let mut state = BubbleState::new(4);
        for _ in 0..4 {
            state.step(&mut seq).unwrap();
        }

        let r = state.step(&mut seq).unwrap();
        assert_eq!(r.active, set(&[0, 1]));
        assert_eq!(r.sorted, set(&[3]));
    }

    #[test]
    fn test_runs_to_sorted_and_completes() {
        let mut seq = Sequence::from(vec![5, 3, 8, 1]);
        let mut state = BubbleState::new(4);

        let mut last = StepResult::default();
        let mut steps = 0;
        while !last.complete {
            last = state.step(&mut seq).unwrap();
            steps += 1;
            assert!(steps < 100);
        }

        assert_eq!(seq.values(), &[1, 3, 5, 8]);
        assert_eq!(last.sorted, set(&[0, 1, 2, 3]));
        assert!(last.active.is_empty());
        // 3 + 2 + 1 + 0 compares, plus one boundary step per pass
        assert_eq!(steps, 10);
    }

    #[test]
    fn test_step_after_complete_is_noop() {
        let mut seq = Sequence::from(vec![2, 1]);
        let mut state = BubbleState::new(2);
        while !state.step(&mut seq).unwrap().complete {}

        let before = seq.clone();
        let r = state.step(&mut seq).unwrap();
        assert!(r.complete);
        assert_eq!(r.sorted, set(&[0, 1]));
        assert_eq!(seq, before);
    }

    #[test]
    fn test_trivial_lengths_complete_immediately() {
        let mut empty = Sequence::default();
        let r = BubbleState::new(0).step(&mut empty).unwrap();
        assert!(r.complete);
        assert!(r.sorted.is_empty());

        let mut single = Sequence::from(vec![42]);
        let r = BubbleState::new(1).step(&mut single).unwrap();
        assert!(r.complete);
        assert_eq!(r.sorted, set(&[0]));
    }
}
