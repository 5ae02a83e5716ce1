//! Deterministic per-character RNG wrapper.
//!
//! # Determinism strategy
//!
//! Each character gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (character_key * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive keys uniformly across the seed space.  This
//! means:
//!
//! - Characters never share RNG state, so the order in which entities are
//!   updated does not change what any one of them rolls.
//! - Adding a roaming entity to a map does not disturb the seeds of the
//!   existing ones — replays stay reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{CharacterRef, Direction};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-character deterministic RNG.
///
/// Drives random steps, random turns and the roaming cadence rolls.
#[derive(Clone, Debug)]
pub struct CharacterRng(SmallRng);

impl CharacterRng {
    /// Seed deterministically from the run's global seed and a character.
    pub fn new(global_seed: u64, who: CharacterRef) -> Self {
        let seed = global_seed ^ who.seed_key().wrapping_mul(MIXING_CONSTANT);
        CharacterRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform integer in `0..n`; `0` when `n == 0`.
    #[inline]
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 { 0 } else { self.0.gen_range(0..n) }
    }

    /// One of the four cardinal directions, uniformly.
    pub fn cardinal(&mut self) -> Direction {
        Direction::CARDINALS[self.below(4) as usize]
    }
}
