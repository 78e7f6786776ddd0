//! Push-key generator
//!
//! Owns the wall clock and the entropy source behind
//! `sos_core::push_id::PushKeyState`. This is the handler layer, so reading
//! `SystemTime` and seeding an RNG here is expected.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sos_core::push_id::{PushKeyState, RandomPart};
use std::time::{SystemTime, UNIX_EPOCH};

/// Thread-safe generator of chronological push keys
#[derive(Debug)]
pub struct PushKeyGenerator {
    inner: Mutex<GeneratorState>,
}

#[derive(Debug)]
struct GeneratorState {
    keys: PushKeyState,
    rng: StdRng,
}

impl Default for PushKeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PushKeyGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic generator for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            inner: Mutex::new(GeneratorState {
                keys: PushKeyState::new(),
                rng,
            }),
        }
    }

    /// Next key stamped with the current wall-clock time
    pub fn generate(&self) -> String {
        self.generate_at(now_ms())
    }

    /// Next key stamped with `timestamp_ms`
    pub fn generate_at(&self, timestamp_ms: u64) -> String {
        let mut guard = self.inner.lock();
        let GeneratorState { keys, rng } = &mut *guard;
        keys.next_key(timestamp_ms, || {
            let mut random: RandomPart = [0; 12];
            for index in &mut random {
                *index = rng.gen_range(0..64);
            }
            random
        })
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sos_core::push_id::{decode_timestamp, is_push_key};

    #[test]
    fn test_keys_carry_timestamp_and_sort() {
        let generator = PushKeyGenerator::with_seed(7);
        let a = generator.generate_at(1_700_000_000_000);
        let b = generator.generate_at(1_700_000_000_000);
        let c = generator.generate_at(1_700_000_000_001);

        assert!(is_push_key(&a));
        assert_eq!(decode_timestamp(&a), Some(1_700_000_000_000));
        assert!(a < b && b < c);
    }

    #[test]
    fn test_seeded_generators_agree() {
        let first = PushKeyGenerator::with_seed(99).generate_at(42);
        let second = PushKeyGenerator::with_seed(99).generate_at(42);
        assert_eq!(first, second);
    }

    #[test]
    fn test_wall_clock_keys_are_valid() {
        let key = PushKeyGenerator::new().generate();
        assert!(is_push_key(&key));
        assert!(decode_timestamp(&key).unwrap_or(0) > 1_600_000_000_000);
    }
}
