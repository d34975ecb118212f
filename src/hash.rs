//! Key hashing.
//!
//! A key path is flattened by concatenating its segments with no separator and
//! hashed with HighwayHash under a fixed, process-wide key. Concatenation means
//! `["data", "1"]` and `["data1"]` hash identically; fixtures that care must
//! pick segments that cannot alias.

use highway::{HighwayHash, HighwayHasher, Key};

/// Key for every derivation.
const HASH_KEY: [u8; 32] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
    27, 28, 29, 30, 31, 32,
];

/// Key for secondary hashes that must be independent of the primary one.
const SECONDARY_HASH_KEY: [u8; 32] = [
    32, 31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9,
    8, 7, 6, 5, 4, 3, 2, 1,
];

fn highway_key(bytes: &[u8; 32]) -> Key {
    let mut words = [0u64; 4];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *word = u64::from_le_bytes(buf);
    }
    Key(words)
}

/// Concatenate key segments in order.
pub fn join_keys<S: AsRef<str>>(keys: &[S]) -> Vec<u8> {
    let size = keys.iter().map(|k| k.as_ref().len()).sum();
    let mut joined = Vec::with_capacity(size);
    for k in keys {
        joined.extend_from_slice(k.as_ref().as_bytes());
    }
    joined
}

/// 64-bit hash of a key path, used by every numeric derivation.
pub fn hash64<S: AsRef<str>>(keys: &[S]) -> u64 {
    HighwayHasher::new(highway_key(&HASH_KEY)).hash64(&join_keys(keys))
}

/// 64-bit hash of a key path under the secondary key.
pub fn secondary_hash64<S: AsRef<str>>(keys: &[S]) -> u64 {
    HighwayHasher::new(highway_key(&SECONDARY_HASH_KEY)).hash64(&join_keys(keys))
}

/// 256-bit hash of a key path, serialized as four little-endian words.
pub fn hash256<S: AsRef<str>>(keys: &[S]) -> [u8; 32] {
    let words = HighwayHasher::new(highway_key(&HASH_KEY)).hash256(&join_keys(keys));
    let mut out = [0u8; 32];
    for (chunk, word) in out.chunks_exact_mut(8).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}
