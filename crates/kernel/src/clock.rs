use serde::{Deserialize, Serialize};

/// Simulated session time. Advanced only by the frame step, so every timer
/// (cooldowns, reload, lifetimes, spawn interval) is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    now: f64,
    max_delta: f32,
}

impl SimClock {
    pub fn new(max_delta: f32) -> Self {
        Self { now: 0.0, max_delta }
    }

    /// Seconds since session start.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Advance by `delta` seconds, capped to `max_delta` so a long pause does
    /// not turn into one huge step. Negative or NaN deltas advance nothing.
    /// Returns the delta actually applied.
    pub fn advance(&mut self, delta: f32) -> f32 {
        let applied = if delta.is_nan() {
            0.0
        } else {
            delta.clamp(0.0, self.max_delta)
        };
        self.now += applied as f64;
        applied
    }

    pub fn reset(&mut self) {
        self.now = 0.0;
    }
}

/// Seeded splitmix64 stream for spawn placement. Same seed, same arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform index in `[0, n)`. `n` must be non-zero.
    pub fn next_index(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}
