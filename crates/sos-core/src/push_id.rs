//! Chronological push keys
//!
//! A push key is 20 characters from a 64-symbol, ASCII-ordered alphabet:
//! 8 characters of millisecond timestamp (most significant first) followed by
//! 12 random characters. Keys generated in the same millisecond reuse the
//! previous random part incremented by one, so one generator's keys always
//! sort in creation order.
//!
//! This module is pure. The clock and the entropy source are supplied by the
//! caller (see `sos_effects::PushKeyGenerator`).

/// Key alphabet, in ASCII order
pub const PUSH_CHARS: &[u8; 64] =
    b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Total key length
pub const PUSH_KEY_LEN: usize = 20;

const TIMESTAMP_CHARS: usize = 8;
const RANDOM_CHARS: usize = PUSH_KEY_LEN - TIMESTAMP_CHARS;

/// Random part of a key, as alphabet indices
pub type RandomPart = [u8; RANDOM_CHARS];

/// Encode a key from a timestamp and a random part.
///
/// Random bytes are reduced modulo 64. Timestamps wider than 48 bits keep only
/// their low 48 bits.
pub fn encode_push_key(timestamp_ms: u64, random: &RandomPart) -> String {
    let mut out = [0u8; PUSH_KEY_LEN];
    let mut ts = timestamp_ms;
    for slot in out[..TIMESTAMP_CHARS].iter_mut().rev() {
        *slot = PUSH_CHARS[(ts % 64) as usize];
        ts /= 64;
    }
    for (slot, index) in out[TIMESTAMP_CHARS..].iter_mut().zip(random) {
        *slot = PUSH_CHARS[(index % 64) as usize];
    }
    out.iter().map(|&b| b as char).collect()
}

/// Recover the timestamp encoded in a key, if the key is well formed
pub fn decode_timestamp(key: &str) -> Option<u64> {
    if key.len() != PUSH_KEY_LEN {
        return None;
    }
    key.bytes().take(TIMESTAMP_CHARS).try_fold(0u64, |acc, b| {
        let index = PUSH_CHARS.iter().position(|&c| c == b)?;
        Some(acc * 64 + index as u64)
    })
}

/// Whether `key` looks like a push key
pub fn is_push_key(key: &str) -> bool {
    key.len() == PUSH_KEY_LEN && key.bytes().all(|b| PUSH_CHARS.contains(&b))
}

/// Generator state carried between keys
#[derive(Debug, Clone, Default)]
pub struct PushKeyState {
    last_timestamp_ms: Option<u64>,
    last_random: RandomPart,
}

impl PushKeyState {
    /// Fresh state
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next key for `timestamp_ms`.
    ///
    /// `fresh_random` is only called when the timestamp differs from the
    /// previous key's.
    pub fn next_key(
        &mut self,
        timestamp_ms: u64,
        fresh_random: impl FnOnce() -> RandomPart,
    ) -> String {
        if self.last_timestamp_ms == Some(timestamp_ms) {
            increment(&mut self.last_random);
        } else {
            let mut random = fresh_random();
            for index in &mut random {
                *index %= 64;
            }
            self.last_random = random;
            self.last_timestamp_ms = Some(timestamp_ms);
        }
        encode_push_key(timestamp_ms, &self.last_random)
    }
}

fn increment(random: &mut RandomPart) {
    for index in random.iter_mut().rev() {
        if *index == 63 {
            *index = 0;
        } else {
            *index += 1;
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_alphabet_is_sorted() {
        assert!(PUSH_CHARS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_known_encoding() {
        let key = encode_push_key(0, &[0; 12]);
        assert_eq!(key, "--------------------");

        let key = encode_push_key(63, &[63; 12]);
        assert_eq!(&key[..8], "-------z");
        assert_eq!(&key[8..], "zzzzzzzzzzzz");
    }

    #[test]
    fn test_timestamp_round_trips() {
        let ts = 1_700_000_000_123;
        let key = encode_push_key(ts, &[7; 12]);
        assert!(is_push_key(&key));
        assert_eq!(decode_timestamp(&key), Some(ts));
        assert_eq!(decode_timestamp("short"), None);
    }

    #[test]
    fn test_same_millisecond_increments_with_carry() {
        let mut state = PushKeyState::new();
        let mut random = [0u8; 12];
        random[11] = 63;
        let first = state.next_key(1000, || random);
        let second = state.next_key(1000, || unreachable!("same timestamp reuses random part"));
        assert!(second > first);
        assert!(second.ends_with("0-"));
    }

    proptest! {
        #[test]
        fn prop_keys_strictly_increase(
            start in 1_600_000_000_000u64..1_900_000_000_000u64,
            steps in proptest::collection::vec((0u64..3, any::<[u8; 12]>()), 1..64),
        ) {
            let mut state = PushKeyState::new();
            let mut ts = start;
            let mut previous = state.next_key(ts, || [0; 12]);
            for (delta, random) in steps {
                ts += delta;
                let key = state.next_key(ts, || random);
                prop_assert!(is_push_key(&key));
                prop_assert!(key > previous, "{} <= {}", key, previous);
                previous = key;
            }
        }
    }
}
