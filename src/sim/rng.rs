//! Injectable randomness
//!
//! The only random decision either game makes is the direction a ball is
//! served in, so the capability is a coin that yields a sign.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of random velocity signs
pub trait SignSource {
    /// Returns `1.0` or `-1.0`
    fn next_sign(&mut self) -> f32;
}

/// Seeded PCG coin, reproducible for a given seed
#[derive(Debug, Clone)]
pub struct SeededSigns {
    seed: u64,
    rng: Pcg32,
}

impl SeededSigns {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The seed this source started from
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl SignSource for SeededSigns {
    fn next_sign(&mut self) -> f32 {
        if self.rng.random_bool(0.5) { 1.0 } else { -1.0 }
    }
}

/// Replays a fixed list of signs, then keeps returning `fallback`
#[derive(Debug, Clone)]
pub struct ScriptedSigns {
    script: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedSigns {
    pub fn new(script: impl IntoIterator<Item = f32>) -> Self {
        Self {
            script: script.into_iter().map(f32::signum).collect(),
            fallback: 1.0,
        }
    }

    /// Always returns the same sign
    pub fn constant(sign: f32) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: sign.signum(),
        }
    }
}

impl SignSource for ScriptedSigns {
    fn next_sign(&mut self) -> f32 {
        self.script.pop_front().unwrap_or(self.fallback)
    }
}
