//! Driver
//!
//! Owns the sequence, the active algorithm's state and the auto-advance
//! timer. Every trigger, manual or timed, goes through `manual_step`, which
//! enforces that at most one step is in flight.

pub mod auto_advance;

use crate::engine::{Algorithm, AlgorithmState, StepEngine, StepError, StepResult};
use crate::sequence::{IndexSet, Sequence, Value};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub use auto_advance::AutoAdvance;

/// Receives the sequence and highlight metadata after every change
pub trait Presenter {
    fn render(&mut self, values: &[Value], active: &IndexSet, sorted: &IndexSet);
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn render(&mut self, values: &[Value], active: &IndexSet, sorted: &IndexSet) {
        (**self).render(values, active, sorted)
    }
}

/// In-flight marker shared between trigger sources.
///
/// Single-threaded: clones observe the same flag. A trigger that finds the
/// flag set is dropped, not queued.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Rc<Cell<bool>>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Mark a step in flight; `None` if one already is
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        if self.0.replace(true) {
            return None;
        }
        Some(BusyGuard(self.0.clone()))
    }
}

/// Clears the busy flag when dropped
#[derive(Debug)]
pub struct BusyGuard(Rc<Cell<bool>>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct Driver<P: Presenter> {
    sequence: Sequence,
    algorithm: Algorithm,
    state: AlgorithmState,
    busy: BusyFlag,
    auto: Option<AutoAdvance>,
    presenter: P,
    steps_taken: usize,
    last_result: Option<StepResult>,
    mismatch_count: usize,
}

impl<P: Presenter> Driver<P> {
    /// Start a run and render the initial sequence
    pub fn new(sequence: Sequence, algorithm: Algorithm, presenter: P) -> Self {
        let state = AlgorithmState::new(algorithm, sequence.len());
        let mut driver = Self {
            sequence,
            algorithm,
            state,
            busy: BusyFlag::new(),
            auto: None,
            presenter,
            steps_taken: 0,
            last_result: None,
            mismatch_count: 0,
        };
        driver.render_plain();
        driver
    }

    /// Switch algorithm, keeping the current sequence
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        info!(target: "driver", "Selecting algorithm {} (was {})", algorithm, self.algorithm);
        self.algorithm = algorithm;
        self.restart_run();
    }

    /// Reinitialize the current algorithm's state without a new sequence
    pub fn reset(&mut self) {
        info!(target: "driver", "Resetting {} run", self.algorithm);
        self.restart_run();
    }

    /// Replace the sequence with freshly generated values
    pub fn regenerate(&mut self, size: usize, min: Value, max: Value) {
        self.replace_sequence(Sequence::generate(size, min, max));
    }

    pub fn replace_sequence(&mut self, sequence: Sequence) {
        info!(target: "driver", "New sequence of {} values", sequence.len());
        self.sequence = sequence;
        self.restart_run();
    }

    /// Advance the active engine by one step.
    ///
    /// Returns `None` when the trigger was dropped because a step is already
    /// in flight, or when a state mismatch forced a reset.
    pub fn manual_step(&mut self) -> Option<StepResult> {
        let outcome = {
            let Some(_guard) = self.busy.try_acquire() else {
                debug!(target: "driver", "Step dropped, another step is in flight");
                return None;
            };
            self.state.step(&mut self.sequence)
        };

        match outcome {
            Ok(result) => {
                self.steps_taken += 1;
                self.presenter
                    .render(self.sequence.values(), &result.active, &result.sorted);
                if result.complete && self.last_result.as_ref().map_or(true, |r| !r.complete) {
                    info!(
                        target: "driver",
                        "{} finished after {} steps",
                        self.algorithm, self.steps_taken
                    );
                }
                self.last_result = Some(result.clone());
                Some(result)
            }
            Err(err) => {
                self.recover(err);
                None
            }
        }
    }

    /// Start auto-advance; no-op if a timer is already running
    pub fn start_auto(&mut self, interval: Duration) -> bool {
        self.start_auto_at(interval, Instant::now())
    }

    pub fn start_auto_at(&mut self, interval: Duration, now: Instant) -> bool {
        if self.auto.is_some() {
            debug!(target: "driver", "Auto-advance already running");
            return false;
        }
        info!(target: "driver", "Auto-advance every {:?}", interval);
        self.auto = Some(AutoAdvance::start(interval, now));
        true
    }

    /// Cancel auto-advance; no-op if none is running
    pub fn stop_auto(&mut self) -> bool {
        match self.auto.take() {
            Some(_) => {
                info!(target: "driver", "Auto-advance stopped");
                true
            }
            None => false,
        }
    }

    /// Change the interval of a running timer, restarting its period at `now`
    pub fn set_auto_interval(&mut self, interval: Duration, now: Instant) {
        if let Some(timer) = self.auto.as_mut() {
            *timer = AutoAdvance::start(interval, now);
        }
    }

    /// Scheduler entry point. Steps when the timer is due and cancels the
    /// timer once the run reports completion.
    pub fn tick(&mut self, now: Instant) -> Option<StepResult> {
        let due = self.auto.as_mut().is_some_and(|timer| timer.poll_due(now));
        if !due {
            return None;
        }

        let result = self.manual_step();
        if result.as_ref().is_some_and(|r| r.complete) && self.auto.take().is_some() {
            info!(target: "driver", "Auto-advance finished");
        }
        result
    }

    /// Time until the next timer tick, `None` when auto-advance is off
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.auto.as_ref().map(|timer| timer.time_remaining(now))
    }

    pub fn is_auto_running(&self) -> bool {
        self.auto.is_some()
    }

    pub fn auto_interval(&self) -> Option<Duration> {
        self.auto.as_ref().map(AutoAdvance::interval)
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Direct access to the sequence. Changing its length without a reset
    /// is detected on the next step and recovered from.
    pub fn sequence_mut(&mut self) -> &mut Sequence {
        &mut self.sequence
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn state(&self) -> &AlgorithmState {
        &self.state
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn last_result(&self) -> Option<&StepResult> {
        self.last_result.as_ref()
    }

    pub fn mismatch_count(&self) -> usize {
        self.mismatch_count
    }

    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn restart_run(&mut self) {
        self.stop_auto();
        self.state = AlgorithmState::new(self.algorithm, self.sequence.len());
        self.steps_taken = 0;
        self.last_result = None;
        self.render_plain();
    }

    fn recover(&mut self, err: StepError) {
        self.mismatch_count += 1;
        warn!(target: "driver", "{}; resetting {} run", err, self.algorithm);
        self.restart_run();
    }

    fn render_plain(&mut self) {
        let none = IndexSet::new();
        self.presenter.render(self.sequence.values(), &none, &none);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Vec<Value>, IndexSet, IndexSet)>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, values: &[Value], active: &IndexSet, sorted: &IndexSet) {
            self.frames
                .push((values.to_vec(), active.clone(), sorted.clone()));
        }
    }

    fn driver(values: Vec<Value>, algorithm: Algorithm) -> Driver<Recorder> {
        Driver::new(Sequence::from(values), algorithm, Recorder::default())
    }

    #[test]
    fn test_new_renders_plain_sequence() {
        let d = driver(vec![3, 1, 2], Algorithm::Bubble);
        assert_eq!(d.presenter().frames.len(), 1);
        let (values, active, sorted) = &d.presenter().frames[0];
        assert_eq!(values, &vec![3, 1, 2]);
        assert!(active.is_empty() && sorted.is_empty());
    }

    #[test]
    fn test_manual_step_forwards_to_presenter() {
        let mut d = driver(vec![5, 3, 8, 1], Algorithm::Bubble);
        let result = d.manual_step().unwrap();

        assert_eq!(result.active, IndexSet::from([0, 1]));
        let (values, active, _) = d.presenter().frames.last().unwrap();
        assert_eq!(values, &vec![3, 5, 8, 1]);
        assert_eq!(active, &result.active);
        assert_eq!(d.steps_taken(), 1);
        assert!(!d.busy_flag().is_set());
    }

    #[test]
    fn test_step_dropped_while_busy() {
        let mut d = driver(vec![2, 1], Algorithm::Bubble);
        let flag = d.busy_flag();
        let guard = flag.try_acquire().unwrap();

        assert!(d.manual_step().is_none());
        assert_eq!(d.sequence().values(), &[2, 1]);
        assert_eq!(d.presenter().frames.len(), 1);

        drop(guard);
        assert!(d.manual_step().is_some());
        assert_eq!(d.sequence().values(), &[1, 2]);
    }

    #[test]
    fn test_select_algorithm_discards_state_keeps_sequence() {
        let mut d = driver(vec![4, 2, 9], Algorithm::Selection);
        d.manual_step();
        d.manual_step();
        d.manual_step();
        assert_eq!(d.sequence().values(), &[2, 4, 9]);

        d.select_algorithm(Algorithm::Insertion);
        assert_eq!(d.algorithm(), Algorithm::Insertion);
        assert_eq!(d.state(), &AlgorithmState::new(Algorithm::Insertion, 3));
        assert_eq!(d.sequence().values(), &[2, 4, 9]);
        assert_eq!(d.steps_taken(), 0);
    }

    #[test]
    fn test_reset_restarts_same_algorithm() {
        let mut d = driver(vec![3, 2, 1], Algorithm::Bubble);
        d.manual_step();
        d.start_auto(Duration::from_millis(10));

        d.reset();
        assert_eq!(d.state(), &AlgorithmState::new(Algorithm::Bubble, 3));
        assert!(!d.is_auto_running());
        assert_eq!(d.sequence().values(), &[2, 3, 1]);
    }

    #[test]
    fn test_start_and_stop_auto_are_idempotent() {
        let mut d = driver(vec![1, 2], Algorithm::Bubble);
        assert!(d.start_auto(Duration::from_millis(200)));
        assert!(!d.start_auto(Duration::from_millis(50)));
        assert_eq!(d.auto_interval(), Some(Duration::from_millis(200)));

        assert!(d.stop_auto());
        assert!(!d.stop_auto());
        assert!(d.time_until_tick(Instant::now()).is_none());
    }

    #[test]
    fn test_tick_without_timer_does_nothing() {
        let mut d = driver(vec![2, 1], Algorithm::Bubble);
        assert!(d.tick(Instant::now() + Duration::from_secs(10)).is_none());
        assert_eq!(d.steps_taken(), 0);
    }

    #[test]
    fn test_mismatch_resets_instead_of_panicking() {
        let mut d = driver(vec![3, 1, 2], Algorithm::Insertion);
        d.manual_step();
        d.start_auto(Duration::from_millis(10));
        d.sequence_mut().push(0);

        assert!(d.manual_step().is_none());
        assert_eq!(d.mismatch_count(), 1);
        assert!(!d.is_auto_running());
        assert_eq!(d.state().expected_len(), 4);

        // The rebuilt state works against the resized sequence
        while !d.manual_step().unwrap().complete {}
        assert!(d.sequence().is_sorted());
    }
}
