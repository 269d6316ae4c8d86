//! Content hashing via xxh3.

use xxhash_rust::xxh3::xxh3_64;

/// xxh3 64-bit hash of file content, as 16 lowercase hex digits.
#[inline]
pub fn hash_content(content: &[u8]) -> String {
    format!("{:016x}", xxh3_64(content))
}
