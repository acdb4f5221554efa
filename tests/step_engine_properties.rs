//! Property tests for the step engines.
//!
//! **Sorted**: stepping until complete leaves the sequence non-decreasing
//! **Permutation**: the multiset of values never changes, at any step
//! **Idempotent**: steps after completion change nothing and report all sorted
//! **Bounded**: every step's indices stay inside the sequence

use proptest::prelude::*;
use sort_stepper::engine::{Algorithm, AlgorithmState, StepEngine};
use sort_stepper::sequence::Sequence;

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Bubble),
        Just(Algorithm::Insertion),
        Just(Algorithm::Selection),
    ]
}

fn sorted_copy(values: &[i64]) -> Vec<i64> {
    let mut copy = values.to_vec();
    copy.sort_unstable();
    copy
}

proptest! {
    #[test]
    fn stepping_to_completion_sorts(algorithm in algorithm(), values in prop::collection::vec(-50i64..50, 0..24)) {
        let mut seq = Sequence::from(values.clone());
        let mut state = AlgorithmState::new(algorithm, seq.len());
        let limit = values.len() * values.len() + 2 * values.len() + 1;

        let mut steps = 0;
        loop {
            let result = state.step(&mut seq).unwrap();
            steps += 1;
            prop_assert!(result.active.iter().all(|&i| i < values.len()));
            prop_assert!(result.sorted.iter().all(|&i| i < values.len()));
            prop_assert!(result.active.len() <= 2);
            if result.complete {
                prop_assert_eq!(result.sorted.len(), values.len());
                break;
            }
            prop_assert!(steps <= limit, "no completion after {} steps", steps);
        }

        let expected = sorted_copy(&values);
        prop_assert!(seq.is_sorted());
        prop_assert_eq!(seq.values(), expected.as_slice());
    }

    #[test]
    fn multiset_is_preserved_between_steps(algorithm in algorithm(), values in prop::collection::vec(0i64..10, 1..16), steps in 0usize..60) {
        let mut seq = Sequence::from(values.clone());
        let mut state = AlgorithmState::new(algorithm, seq.len());
        let expected = sorted_copy(&values);

        for _ in 0..steps {
            let result = state.step(&mut seq).unwrap();
            // Mid-shift, Insertion's hole holds a duplicate and the key lives outside
            let mut observed = seq.values().to_vec();
            if let AlgorithmState::Insertion(s) = &state {
                if let Some(pending) = s.pending() {
                    observed[pending.hole] = pending.key;
                }
            }
            prop_assert_eq!(sorted_copy(&observed), expected.clone());
            if result.complete {
                break;
            }
        }
    }

    #[test]
    fn steps_after_completion_are_noops(algorithm in algorithm(), values in prop::collection::vec(any::<i64>(), 0..12), extra in 1usize..5) {
        let mut seq = Sequence::from(values.clone());
        let mut state = AlgorithmState::new(algorithm, seq.len());
        while !state.step(&mut seq).unwrap().complete {}

        let finished = seq.clone();
        for _ in 0..extra {
            let result = state.step(&mut seq).unwrap();
            prop_assert!(result.complete);
            prop_assert!(result.active.is_empty());
            prop_assert_eq!(result.sorted.len(), values.len());
            prop_assert_eq!(&seq, &finished);
        }
    }

    #[test]
    fn bubble_sorted_set_is_a_suffix(values in prop::collection::vec(0i64..100, 2..12)) {
        let mut seq = Sequence::from(values.clone());
        let mut state = AlgorithmState::new(Algorithm::Bubble, seq.len());
        loop {
            let result = state.step(&mut seq).unwrap();
            if let Some(&first) = result.sorted.iter().next() {
                prop_assert_eq!(*result.sorted.iter().last().unwrap(), values.len() - 1);
                prop_assert_eq!(result.sorted.len(), values.len() - first);
                // Positions already final hold the largest values
                for i in first..values.len() {
                    prop_assert_eq!(seq.get(i), sorted_copy(&values)[i]);
                }
            }
            if result.complete {
                break;
            }
        }
    }

    #[test]
    fn selection_sorted_set_is_a_prefix(values in prop::collection::vec(0i64..100, 2..12)) {
        let mut seq = Sequence::from(values.clone());
        let mut state = AlgorithmState::new(Algorithm::Selection, seq.len());
        let expected = sorted_copy(&values);
        loop {
            let result = state.step(&mut seq).unwrap();
            prop_assert!(result.sorted.iter().copied().eq(0..result.sorted.len()));
            for &i in &result.sorted {
                prop_assert_eq!(seq.get(i), expected[i]);
            }
            if result.complete {
                break;
            }
        }
    }
}

#[test]
fn trivial_lengths_complete_on_first_step() {
    for algorithm in Algorithm::ALL {
        for values in [vec![], vec![17]] {
            let mut seq = Sequence::from(values.clone());
            let mut state = AlgorithmState::new(algorithm, seq.len());
            let result = state.step(&mut seq).unwrap();
            assert!(result.complete, "{} on {:?}", algorithm, values);
            assert_eq!(result.sorted.len(), values.len());
            assert_eq!(seq.values(), values.as_slice());
        }
    }
}
