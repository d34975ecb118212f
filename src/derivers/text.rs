//! String deriver.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::hash::hash256;

/// Bytes of the 256-bit hash that are encoded. 30 bytes is 240 bits, a whole
/// number of base64 sextets, so the output never carries padding.
const STRING_BYTES: usize = 30;

/// Length of every derived string.
pub const STRING_LEN: usize = STRING_BYTES / 3 * 4;

/// URL-safe base64 token derived from the key path.
pub fn string<S: AsRef<str>>(keys: &[S]) -> String {
    let hash = hash256(keys);
    URL_SAFE_NO_PAD.encode(&hash[..STRING_BYTES])
}
