use std::collections::VecDeque;

use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// "Pick one of N". Mock generation goes through this so tests can pin the outcome.
pub trait SamplePicker: Send + Sync {
    /// Returns an index in `0..n`. `n` is never zero.
    fn pick(&self, n: usize) -> usize;
    fn name(&self) -> &'static str;
}

/// Uniform pick from the thread RNG. Repeats are possible.
pub struct UniformPicker;

impl SamplePicker for UniformPicker {
    fn pick(&self, n: usize) -> usize {
        rand::rng().random_range(0..n)
    }

    fn name(&self) -> &'static str { "uniform" }
}

/// Uniform, but reproducible for a given seed.
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl SamplePicker for SeededPicker {
    fn pick(&self, n: usize) -> usize {
        self.rng.lock().random_range(0..n)
    }

    fn name(&self) -> &'static str { "seeded" }
}

/// Replays a fixed sequence of indices, then starts over.
pub struct ScriptedPicker {
    script: Vec<usize>,
    queue: Mutex<VecDeque<usize>>,
}

impl ScriptedPicker {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        let script: Vec<usize> = script.into_iter().collect();
        Self { queue: Mutex::new(script.iter().copied().collect()), script }
    }
}

impl SamplePicker for ScriptedPicker {
    fn pick(&self, n: usize) -> usize {
        let mut queue = self.queue.lock();
        if queue.is_empty() {
            queue.extend(self.script.iter().copied());
        }
        queue.pop_front().unwrap_or(0) % n
    }

    fn name(&self) -> &'static str { "scripted" }
}
