//! Step engines
//!
//! Each sorting algorithm is encoded as a resumable state machine that
//! advances by exactly one comparison, swap or shift per call. The state
//! struct for an algorithm is owned by that algorithm alone; switching
//! algorithms always builds a fresh state.

pub mod bubble;
pub mod insertion;
pub mod selection;

use crate::sequence::{IndexSet, Sequence};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use bubble::BubbleState;
pub use insertion::{InsertionState, PendingInsert};
pub use selection::{Scan, SelectionState};

/// Supported algorithms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Insertion,
    Selection,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bubble, Algorithm::Insertion, Algorithm::Selection];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Selection => "selection",
        }
    }

    /// Next algorithm in display order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Algorithm::Bubble => Algorithm::Insertion,
            Algorithm::Insertion => Algorithm::Selection,
            Algorithm::Selection => Algorithm::Bubble,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bubble" => Ok(Algorithm::Bubble),
            "insertion" => Ok(Algorithm::Insertion),
            "selection" => Ok(Algorithm::Selection),
            other => Err(format!(
                "unknown algorithm '{}' (expected bubble, insertion or selection)",
                other
            )),
        }
    }
}

/// Outcome of a single step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepResult {
    /// Positions compared or moved by this step (0, 1 or 2 entries)
    pub active: IndexSet,
    /// Positions the algorithm guarantees are final at this point
    pub sorted: IndexSet,
    /// The run has finished; further steps are no-ops
    pub complete: bool,
}

impl StepResult {
    pub fn in_progress(active: IndexSet, sorted: IndexSet) -> Self {
        Self {
            active,
            sorted,
            complete: false,
        }
    }

    /// Result for a finished run: nothing active, everything sorted
    pub fn finished(len: usize) -> Self {
        Self {
            active: IndexSet::new(),
            sorted: (0..len).collect(),
            complete: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The sequence was resized outside the engine's control
    #[error("state mismatch: state expects {expected} elements, sequence has {actual}")]
    StateMismatch { expected: usize, actual: usize },
}

/// A resumable, single-step-advanceable sort
pub trait StepEngine {
    /// Advance by one unit of work, mutating `seq` in place
    fn step(&mut self, seq: &mut Sequence) -> Result<StepResult, StepError>;

    /// True once the outer cursor has reached the end
    fn is_complete(&self) -> bool;

    /// Length the state was built for
    fn expected_len(&self) -> usize;

    fn check_len(&self, seq: &Sequence) -> Result<(), StepError> {
        if seq.len() != self.expected_len() {
            return Err(StepError::StateMismatch {
                expected: self.expected_len(),
                actual: seq.len(),
            });
        }
        Ok(())
    }
}

/// Cursor data for whichever algorithm is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmState {
    Bubble(BubbleState),
    Insertion(InsertionState),
    Selection(SelectionState),
}

impl AlgorithmState {
    pub fn new(algorithm: Algorithm, len: usize) -> Self {
        match algorithm {
            Algorithm::Bubble => AlgorithmState::Bubble(BubbleState::new(len)),
            Algorithm::Insertion => AlgorithmState::Insertion(InsertionState::new(len)),
            Algorithm::Selection => AlgorithmState::Selection(SelectionState::new(len)),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            AlgorithmState::Bubble(_) => Algorithm::Bubble,
            AlgorithmState::Insertion(_) => Algorithm::Insertion,
            AlgorithmState::Selection(_) => Algorithm::Selection,
        }
    }

    fn engine(&self) -> &dyn StepEngine {
        match self {
            AlgorithmState::Bubble(s) => s,
            AlgorithmState::Insertion(s) => s,
            AlgorithmState::Selection(s) => s,
        }
    }
}

impl StepEngine for AlgorithmState {
    fn step(&mut self, seq: &mut Sequence) -> Result<StepResult, StepError> {
        match self {
            AlgorithmState::Bubble(s) => s.step(seq),
            AlgorithmState::Insertion(s) => s.step(seq),
            AlgorithmState::Selection(s) => s.step(seq),
        }
    }

    fn is_complete(&self) -> bool {
        self.engine().is_complete()
    }

    fn expected_len(&self) -> usize {
        self.engine().expected_len()
    }
}

/// `0..end` as an index set
pub(crate) fn prefix(end: usize) -> IndexSet {
    (0..end).collect()
}

/// Run an engine to completion, returning how many steps it took.
///
/// Bounded by `len^2 + 2 * len + 1` steps, more than any of the three
/// algorithms needs.
pub fn run_to_completion(
    state: &mut AlgorithmState,
    seq: &mut Sequence,
) -> Result<usize, StepError> {
    let limit = seq.len() * seq.len() + 2 * seq.len() + 1;
    let mut steps = 0;
    while steps < limit {
        steps += 1;
        if state.step(seq)?.complete {
            break;
        }
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_parse_and_display() {
        for algorithm in Algorithm::ALL {
            let parsed: Algorithm = algorithm.to_string().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
        assert_eq!(" Selection ".parse::<Algorithm>(), Ok(Algorithm::Selection));
        assert!("quick".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_algorithm_cycle() {
        let mut algorithm = Algorithm::Bubble;
        for _ in 0..3 {
            algorithm = algorithm.next();
        }
        assert_eq!(algorithm, Algorithm::Bubble);
    }

    #[test]
    fn test_state_matches_algorithm() {
        for algorithm in Algorithm::ALL {
            let state = AlgorithmState::new(algorithm, 4);
            assert_eq!(state.algorithm(), algorithm);
            assert_eq!(state.expected_len(), 4);
            assert!(!state.is_complete());
        }
    }

    #[test]
    fn test_mismatch_is_reported_before_indexing() {
        for algorithm in Algorithm::ALL {
            let mut state = AlgorithmState::new(algorithm, 5);
            let mut seq = Sequence::from(vec![3, 1]);
            let err = state.step(&mut seq).unwrap_err();
            assert_eq!(
                err,
                StepError::StateMismatch {
                    expected: 5,
                    actual: 2
                }
            );
            assert_eq!(seq.values(), &[3, 1]);
        }
    }

    #[test]
    fn test_run_to_completion_sorts() {
        for algorithm in Algorithm::ALL {
            let mut seq = Sequence::from(vec![9, 4, 7, 1, 4, 0]);
            let mut state = AlgorithmState::new(algorithm, seq.len());
            run_to_completion(&mut state, &mut seq).unwrap();
            assert!(state.is_complete(), "{} did not complete", algorithm);
            assert_eq!(seq.values(), &[0, 1, 4, 4, 7, 9]);
        }
    }
}
