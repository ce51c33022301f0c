use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of every random decision taken during a session.
///
/// All stochastic checks go through one source so that a fixed seed
/// (or a scripted sequence) reproduces a whole weekend exactly.
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn int_inclusive(&mut self, low: u32, high: u32) -> u32;

    /// Unbiased coin flip.
    fn coin_flip(&mut self) -> bool;
}

/// Adapter turning any `rand` generator into a [`RandomSource`].
pub struct RngSource<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source, the same seed gives the same race.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..=high)
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

/// Replays a fixed list of decisions.
///
/// Integers are clamped into the requested range. Once the queue runs dry the
/// fallback value is used (or the low bound if there is none); coin flips
/// default to `false`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    ints: VecDeque<u32>,
    coins: VecDeque<bool>,
    fallback: Option<u32>,
}

impl ScriptedSource {
    pub fn new(ints: impl IntoIterator<Item = u32>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Every draw returns `value` (clamped into the requested range).
    pub fn constant(value: u32) -> Self {
        Self {
            fallback: Some(value),
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, value: u32) -> Self {
        self.fallback = Some(value);
        self
    }

    pub fn with_coins(mut self, coins: impl IntoIterator<Item = bool>) -> Self {
        self.coins = coins.into_iter().collect();
        self
    }

    /// Number of scripted integers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.ints.len()
    }
}

impl RandomSource for ScriptedSource {
    fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        let value = self.ints.pop_front().or(self.fallback).unwrap_or(low);
        value.clamp(low, high)
    }

    fn coin_flip(&mut self) -> bool {
        self.coins.pop_front().unwrap_or(false)
    }
}
