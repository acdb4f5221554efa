use super::{prefix, StepEngine, StepError, StepResult};
use crate::sequence::{IndexSet, Sequence};
use tracing::trace;

/// Progress of the minimum search within one outer pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scan {
    pub inner: usize,
    pub min_index: usize,
}

/// Selection sort cursor. `scan` is `None` until a pass has started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    len: usize,
    outer: usize,
    scan: Option<Scan>,
}

impl SelectionState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            outer: 0,
            scan: None,
        }
    }

    pub fn outer(&self) -> usize {
        self.outer
    }

    pub fn scan(&self) -> Option<Scan> {
        self.scan
    }
}

impl StepEngine for SelectionState {
    fn step(&mut self, seq: &mut Sequence) -> Result<StepResult, StepError> {
        self.check_len(seq)?;

        if self.outer >= self.len {
            return Ok(StepResult::finished(self.len));
        }

        let outer = self.outer;
        let scan = self.scan.get_or_insert(Scan {
            inner: outer + 1,
            min_index: outer,
        });

        if scan.inner < self.len {
            let inner = scan.inner;
            if seq.get(inner) < seq.get(scan.min_index) {
                scan.min_index = inner;
            }
            let min_index = scan.min_index;
            scan.inner += 1;
            trace!(target: "engine", "selection scan {} min={}", inner, min_index);

            return Ok(StepResult::in_progress(
                IndexSet::from([inner, min_index]),
                prefix(outer),
            ));
        }

        let min_index = scan.min_index;
        seq.swap(outer, min_index);
        self.scan = None;
        self.outer += 1;
        trace!(target: "engine", "selection swap {} {}", outer, min_index);

        if self.outer >= self.len {
            let mut result = StepResult::finished(self.len);
            result.active.extend([outer, min_index]);
            return Ok(result);
        }
        Ok(StepResult::in_progress(
            IndexSet::from([outer, min_index]),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn set(indices: &[usize]) -> IndexSet {
        indices.iter().copied().collect()
    }

    #[test]
    fn test_three_element_walkthrough() {
        let mut seq = Sequence::from(vec![4, 2, 9]);
        let mut state = SelectionState::new(3);

        // outer 0: scan 1 (new minimum), scan 2, swap 0 <-> 1
        let r = state.step(&mut seq).unwrap();
        assert_eq!(r.active, set(&[1]));
        assert!(r.sorted.is_empty());
        assert_eq!(state.scan().map(|s| s.min_index), Some(1));

        let r = state.step(&mut seq).unwrap();
        assert_eq!(r.active, set(&[1, 2]));

        let r = state.step(&mut seq).unwrap();
        assert_eq!(seq.values(), &[2, 4, 9]);
        assert_eq!(r.active, set(&[0, 1]));
        assert_eq!(r.sorted, set(&[0]));
        assert!(state.scan().is_none());

        // outer 1: scan 2, swap 1 <-> 1
        let r = state.step(&mut seq).unwrap();
        assert_eq!(r.active, set(&[1, 2]));
        assert_eq!(r.sorted, set(&[0]));

        let r = state.step(&mut seq).unwrap();
        assert_eq!(seq.values(), &[2, 4, 9]);
        assert_eq!(r.active, set(&[1]));
        assert_eq!(r.sorted, set(&[0, 1]));
        assert!(!r.complete);

        // outer 2: nothing to scan, the self-swap finishes the run
        let r = state.step(&mut seq).unwrap();
        assert!(r.complete);
        assert_eq!(r.sorted, set(&[0, 1, 2]));
        assert_eq!(state.outer(), 3);
    }

    #[test]
    fn test_step_after_complete_is_noop() {
        let mut seq = Sequence::from(vec![2, 1]);
        let mut state = SelectionState::new(2);
        while !state.step(&mut seq).unwrap().complete {}
        assert_eq!(seq.values(), &[1, 2]);

        for _ in 0..3 {
            let r = state.step(&mut seq).unwrap();
            assert!(r.complete);
            assert!(r.active.is_empty());
            assert_eq!(r.sorted, set(&[0, 1]));
        }
        assert_eq!(seq.values(), &[1, 2]);
    }

    #[test]
    fn test_trivial_lengths_complete_immediately() {
        let mut empty = Sequence::default();
        assert!(SelectionState::new(0).step(&mut empty).unwrap().complete);

        let mut single = Sequence::from(vec![7]);
        let r = SelectionState::new(1).step(&mut single).unwrap();
        assert!(r.complete);
        assert_eq!(r.sorted, set(&[0]));
        assert_eq!(single.values(), &[7]);
    }
}
