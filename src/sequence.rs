use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;

/// Numeric value held by a sequence
pub type Value = i64;

/// Ordered set of positions, used for highlight metadata
pub type IndexSet = BTreeSet<usize>;

/// The mutable sequence being sorted.
///
/// Length never changes through the sort primitives; only `swap` and `set`
/// mutate it. Indices are caller-guaranteed valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sequence {
    values: Vec<Value>,
}

impl Sequence {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Generate `size` values sampled uniformly from `[min, max]`
    pub fn generate(size: usize, min: Value, max: Value) -> Self {
        Self::generate_with(&mut rand::thread_rng(), size, min, max)
    }

    /// Generate from a caller-supplied RNG (seeded runs, tests)
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, size: usize, min: Value, max: Value) -> Self {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        let values = (0..size).map(|_| rng.gen_range(low..=high)).collect();
        Self { values }
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
    }

    /// Overwrite a single slot (insertion shift/place)
    pub fn set(&mut self, index: usize, value: Value) {
        self.values[index] = value;
    }

    pub fn get(&self, index: usize) -> Value {
        self.values[index]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Non-decreasing check
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    /// Append a value. Changes the length, so engine state built for the
    /// old length reports a mismatch on its next step.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}
