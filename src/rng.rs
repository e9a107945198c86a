//! Deterministic hashing based on splitmix64/32, plus the seed sources used by the panel.

use rand::Rng as _;

/// Seeds handed out by the panel are drawn from `0..SEED_RANGE`.
pub const SEED_RANGE: i32 = 1_000_000;

#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[inline]
pub fn splitmix32(mut x: u32) -> u32 {
    x = x.wrapping_add(0x9E3779B9);
    let mut z = x;
    z = (z ^ (z >> 16)).wrapping_mul(0x7FEB352D);
    z = (z ^ (z >> 15)).wrapping_mul(0x846CA68B);
    z ^ (z >> 16)
}

#[inline]
pub fn seed_u32(seed: u64, salt: u64) -> u32 {
    splitmix64(seed ^ salt) as u32
}

#[inline]
pub fn hash2(ix: i32, iy: i32, seed: u32) -> u32 {
    let x = ix as u32;
    let y = iy as u32;
    let mut h = seed ^ 0x9E3779B9;
    h = splitmix32(h ^ x.wrapping_mul(0x85EBCA6B));
    h = splitmix32(h ^ y.wrapping_mul(0xC2B2AE35));
    h
}

/// Simple sequential RNG.
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = splitmix64(self.state);
        self.state
    }

    pub fn range_usize(&mut self, max: usize) -> usize {
        (self.next_u64() % max as u64) as usize
    }
}

/// Supplies a fresh terrain seed in `0..SEED_RANGE`.
pub trait SeedSource {
    fn next_seed(&mut self) -> i32;
}

/// Seeds from the thread-local OS-seeded RNG. Used by the interactive front ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntropySeeds;

impl SeedSource for EntropySeeds {
    fn next_seed(&mut self) -> i32 {
        rand::thread_rng().gen_range(0..SEED_RANGE)
    }
}

/// Reproducible seed stream.
pub struct SplitMixSeeds {
    rng: Rng,
}

impl SplitMixSeeds {
    pub fn new(seed: u64) -> Self {
        Self { rng: Rng::new(seed) }
    }
}

impl SeedSource for SplitMixSeeds {
    fn next_seed(&mut self) -> i32 {
        self.rng.range_usize(SEED_RANGE as usize) as i32
    }
}
