//! Path Encoder
//!
//! Maps a socket path onto a 128-bit address inside the Discard Prefix.
//!
//! ```text
//! ┌──────────────── 64 bits ───────────────┬──────────────── 64 bits ───────────────┐
//! │        0100:0000:0000:0000 (prefix)    │   first 8 bytes of blake3(path bytes)  │
//! └────────────────────────────────────────┴────────────────────────────────────────┘
//! ```
//!
//! The digest only sees the raw bytes of the path, so the same path maps to
//! the same address in every process. Distinct paths may collide; callers
//! must keep the path as the identity and treat the address as a hint.

use std::net::Ipv6Addr;
use std::path::Path;

use crate::error::AddressError;
use crate::reserved::{DISCARD_PREFIX_BITS, PREFIX_MASK};

/// Sentinel port paired with every derived address
///
/// Domain sockets have no port. A single constant keeps comparisons between
/// converted `SocketAddr` values consistent.
pub const DOMAIN_SOCKET_PORT: u16 = 1;

/// Derive the reserved-block address for a socket path
///
/// # Errors
///
/// Returns [`AddressError::InvalidArgument`] if `path` is empty.
pub fn derive_address(path: impl AsRef<Path>) -> Result<Ipv6Addr, AddressError> {
    let path = path.as_ref();
    let bytes = path.as_os_str().as_encoded_bytes();
    if bytes.is_empty() {
        return Err(AddressError::invalid("path must not be empty"));
    }

    Ok(Ipv6Addr::from(encode_bytes(bytes)))
}

fn encode_bytes(bytes: &[u8]) -> u128 {
    let digest = blake3::hash(bytes);
    let mut low = [0u8; 8];
    low.copy_from_slice(&digest.as_bytes()[..8]);

    let bits = DISCARD_PREFIX_BITS | u128::from(u64::from_be_bytes(low));
    // Re-apply the prefix so the result stays in the block whatever the digest yields.
    (bits & !PREFIX_MASK) | DISCARD_PREFIX_BITS
}
