//! RNG oracle for deterministic random number generation.
//!
//! Crit rolls, invisibility redirects, monster target picks, and saboteur
//! detection all consume randomness through this trait. Implementations must
//! be deterministic: given the same seed they must produce the same value, so
//! a round replayed from the same game seed and nonce resolves identically.
//! This is what keeps hidden-role accounting auditable after the fact.

/// RNG oracle for deterministic random number generation.
///
/// All rolls are derived from an explicit seed; the oracle itself is
/// stateless. Seeds come from [`compute_seed`] so that every random event in
/// a round draws from a distinct, reproducible stream.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Probability check: returns true with probability `chance` (0.0..=1.0).
    ///
    /// Used for critical hits and saboteur detection.
    fn percent_check(&self, seed: u64, chance: f64) -> bool {
        if chance <= 0.0 {
            return false;
        }
        if chance >= 1.0 {
            return true;
        }
        let roll = self.next_u32(seed) % 10_000;
        (roll as f64) < chance * 10_000.0
    }

    /// Pick a uniformly random index into a collection of `len` elements.
    ///
    /// Used for invisibility redirects and monster target selection.
    /// `len` must be non-zero; callers check for empty candidate sets first.
    fn pick(&self, seed: u64, len: usize) -> usize {
        (self.next_u32(seed) as usize) % len.max(1)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output permuted from 64-bit LCG state. Small, fast,
/// branch-free, and statistically solid, which is all the engine needs for
/// combat rolls.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the LCG state by one step.
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift the high bits, then rotate by the
    /// top five bits of state.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Context tags for the independent rolls the engine makes. Two rolls with
/// the same (nonce, actor) pair must never share a tag.
pub mod seed_ctx {
    /// Critical hit check.
    pub const CRIT: u32 = 0;
    /// Invisibility redirect pick.
    pub const REDIRECT: u32 = 1;
    /// Saboteur detection roll on a regeneration tick.
    pub const DETECTION: u32 = 2;
    /// Monster target pick.
    pub const MONSTER_TARGET: u32 = 3;
    /// On-hit status proc (e.g. a freezing attack's stun chance).
    pub const STATUS_PROC: u32 = 4;
    /// Racial insight roll.
    pub const INSIGHT: u32 = 5;
}

/// Compute a deterministic seed from round-state components.
///
/// Combines the room's base seed with the action nonce, the acting entity,
/// and a call-site context tag ([`seed_ctx`]) so that independent rolls
/// inside one action never share a seed.
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64/FxHash-style mixing constants.
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step.
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_value() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn percent_check_extremes() {
        let rng = PcgRng;
        assert!(!rng.percent_check(7, 0.0));
        assert!(rng.percent_check(7, 1.0));
    }

    #[test]
    fn pick_stays_in_bounds() {
        let rng = PcgRng;
        for seed in 0..64 {
            assert!(rng.pick(seed, 3) < 3);
        }
    }

    #[test]
    fn seeds_differ_per_context() {
        let a = compute_seed(1, 2, 3, 0);
        let b = compute_seed(1, 2, 3, 1);
        assert_ne!(a, b);
        assert_eq!(a, compute_seed(1, 2, 3, 0));
    }
}
