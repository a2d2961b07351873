//! Reserved-Block Detection
//!
//! Derived addresses live in the IPv6 Discard Prefix `100::/64`
//! ([RFC 6666](https://datatracker.ietf.org/doc/rfc6666/)), a block that is
//! never globally routed. Any address whose high 64 bits match the prefix is
//! treated as a domain socket marker, whether or not this crate produced it.

use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use crate::error::AddressError;

/// Length of an IPv6 address in bytes
pub const ADDRESS_LEN: usize = 16;

/// High 64 bits of the IPv6 Discard Prefix (`100::/64`)
pub const DISCARD_PREFIX: u64 = 0x0100_0000_0000_0000;

/// Mask selecting the prefix bits of a 128-bit address
pub const PREFIX_MASK: u128 = 0xFFFF_FFFF_FFFF_FFFF_0000_0000_0000_0000;

/// The Discard Prefix as a 128-bit value with all host bits cleared
pub const DISCARD_PREFIX_BITS: u128 = (DISCARD_PREFIX as u128) << 64;

/// Check whether a raw 16-byte address falls inside the Discard Prefix
///
/// # Errors
///
/// Returns [`AddressError::InvalidArgument`] when `bytes` is not exactly
/// [`ADDRESS_LEN`] bytes long.
pub fn is_reserved_block_address(bytes: &[u8]) -> Result<bool, AddressError> {
    let octets: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
        tracing::debug!(len = bytes.len(), "Rejected address bytes");
        AddressError::invalid(format!(
            "address must be {} bytes, got {}",
            ADDRESS_LEN,
            bytes.len()
        ))
    })?;

    Ok(is_reserved_bits(u128::from_be_bytes(octets)))
}

/// Check whether an IPv6 address falls inside the Discard Prefix
pub fn is_reserved_ipv6(addr: &Ipv6Addr) -> bool {
    is_reserved_bits(u128::from(*addr))
}

/// Check whether an IP address is a domain socket marker
///
/// IPv4 addresses are never markers.
pub fn is_domain_socket_ip(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(_) => false,
        IpAddr::V6(v6) => is_reserved_ipv6(v6),
    }
}

/// Check whether a socket address carries a domain socket marker
pub fn is_domain_socket_socket_addr(addr: &SocketAddr) -> bool {
    is_domain_socket_ip(&addr.ip())
}

#[inline]
pub(crate) const fn is_reserved_bits(bits: u128) -> bool {
    bits & PREFIX_MASK == DISCARD_PREFIX_BITS
}
