use base64::{Engine, prelude::BASE64_STANDARD};
use sha2::{Digest, Sha512};

/// A base64 (standard alphabet, padded) encoded SHA-512 digest.
///
/// Always [`ENCODED_DIGEST_LEN`] characters long.
pub type EncodedDigest = String;

/// Length in bytes of a raw SHA-512 digest.
pub const DIGEST_SIZE: usize = 64;

/// Length of an [`EncodedDigest`]: `4 * ceil(64 / 3)`.
pub const ENCODED_DIGEST_LEN: usize = DIGEST_SIZE.div_ceil(3) * 4;

/// Hashes `input` with SHA-512 and encodes the result as standard base64.
///
/// Deterministic and infallible for every input, including the empty string.
///
/// # Example
/// ```
/// let encoded = hashkeep::digest("angryMonkey");
/// assert_eq!(
///     encoded,
///     "ZEHhWB65gUlzdVwtDQArEyx+KVLzp/aTaRaPlBzYRIFj6vjFdqEb0Q5B8zVKCZ0vKbZPZklJz0Fd7su2A+gf7Q=="
/// );
/// ```
pub fn digest(input: &str) -> EncodedDigest {
    digest_bytes(input.as_bytes())
}

/// Byte-level variant of [`digest`].
pub fn digest_bytes(input: &[u8]) -> EncodedDigest {
    let hash = Sha512::digest(input);
    BASE64_STANDARD.encode(hash)
}
