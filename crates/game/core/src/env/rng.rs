//! Injectable random source for battle resolution.
//!
//! Every entry point that consumes randomness (opponent choice, dodge rolls,
//! status proc rolls) takes a [`BattleRng`]. Given the same seed, a battle
//! replays identically.

/// Random source producing uniform floats in `[0, 1)`.
pub trait BattleRng {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick from an empty range");
        let index = (self.next_f64() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }

    /// Percentage roll: true with probability `pct / 100`.
    fn chance(&mut self, pct: u32) -> bool {
        if pct == 0 {
            return false;
        }
        self.next_f64() * 100.0 < f64::from(pct)
    }
}

impl<R: BattleRng + ?Sized> BattleRng for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64-bit LCG state, 32-bit permuted output.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same sequence
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed.
    ///
    /// The seed is run through a SplitMix64-style avalanche so that nearby
    /// seeds (0, 1, 2, ...) start from unrelated states.
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut hash = seed ^ 0x9e3779b97f4a7c15;
        hash ^= hash >> 33;
        hash = hash.wrapping_mul(0xff51afd7ed558ccd);
        hash ^= hash >> 33;
        Self { state: hash }
    }

    /// Advance the PCG state by one step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

impl BattleRng for PcgRng {
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Adapter exposing any [`rand::RngCore`] as a [`BattleRng`].
#[derive(Clone, Debug)]
pub struct RandRng<R>(pub R);

impl<R: rand::RngCore> BattleRng for RandRng<R> {
    fn next_f64(&mut self) -> f64 {
        // 53 random mantissa bits
        (self.0.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Useful for scripting exact dodge/proc outcomes.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    /// `values` must be non-empty; each value is clamped into `[0, 1)`.
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.0] } else { values };
        Self { values, cursor: 0 }
    }
}

impl BattleRng for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 0.999_999_999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic_per_seed() {
        let mut a = PcgRng::seed_from_u64(42);
        let mut b = PcgRng::seed_from_u64(42);
        let mut c = PcgRng::seed_from_u64(43);
        let seq_a: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let seq_b: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        let seq_c: Vec<u32> = (0..8).map(|_| c.next_u32()).collect();
        assert_eq!(seq_a, seq_b);
        assert_ne!(seq_a, seq_c);
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut rng = PcgRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn pick_and_chance_bounds() {
        let mut rng = SequenceRng::new(vec![0.0, 0.999, 0.5]);
        assert_eq!(rng.pick(3), 0);
        assert_eq!(rng.pick(3), 2);
        assert_eq!(rng.pick(3), 1);

        let mut rng = SequenceRng::new(vec![0.25]);
        assert!(rng.chance(30));
        assert!(!rng.chance(25));
        assert!(!rng.chance(0));
    }

    #[test]
    fn rand_adapter_produces_unit_floats() {
        struct Counter(u64);
        impl rand::RngCore for Counter {
            fn next_u32(&mut self) -> u32 {
                self.next_u64() as u32
            }
            fn next_u64(&mut self) -> u64 {
                self.0 = self.0.wrapping_add(0x9e3779b97f4a7c15);
                self.0
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                for byte in dest {
                    *byte = self.next_u64() as u8;
                }
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }

        let mut rng = RandRng(Counter(0));
        for _ in 0..100 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }
}
