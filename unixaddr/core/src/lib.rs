//! unixaddr Core - Unix Domain Socket Addresses as IP Socket Addresses
//!
//! Networking code is usually written against IP socket addresses. This crate
//! lets a Unix domain socket travel through that code unchanged: each socket
//! path is mapped onto a synthetic IPv6 address in the Discard Prefix
//! (`100::/64`, RFC 6666), a block that is never routed, paired with a fixed
//! sentinel port.
//!
//! # Architecture
//!
//! ```text
//!          "/var/run/server.sock"
//!                    │
//!        ┌───────────┴───────────┐
//!        │     Path Encoder      │  blake3(path) → low 64 bits
//!        └───────────┬───────────┘
//!                    │ 100::xxxx:xxxx:xxxx:xxxx
//!        ┌───────────┴───────────────────────────────────────────┐
//!        │                DomainSocketAddress                    │
//!        │  path ─┬─► authority()        "unix:/var/run/..."    │
//!        │        ├─► to_native_handle() std Unix SocketAddr    │
//!        │        └─► to_endpoint()      Endpoint               │
//!        └───────────────────────────────────────────────────────┘
//!
//!        Reserved-Block Detector: any 128-bit address → bool
//! ```
//!
//! # Key Types
//!
//! - [`DomainSocketAddress`]: path plus derived address and cached views
//! - [`Endpoint`]: host identity for routing and load balancing
//! - [`AddressError`]: `InvalidArgument` / `Unsupported`
//!
//! # Quick Start
//!
//! ```
//! use unixaddr_core::{is_reserved_block_address, DomainSocketAddress};
//!
//! let addr = DomainSocketAddress::of("/var/run/server.sock").unwrap();
//! assert_eq!(addr.authority(), "unix:/var/run/server.sock");
//! assert_eq!(addr.to_string(), "/var/run/server.sock");
//! assert!(is_reserved_block_address(&addr.ip().octets()).unwrap());
//! ```
//!
//! # Module Overview
//!
//! - [`address`]: the composite address value
//! - [`encoder`]: path to reserved-block address derivation
//! - [`reserved`]: reserved-block membership checks
//! - [`endpoint`]: endpoint values and authority parsing
//! - [`error`]: error types

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod address;
pub mod encoder;
pub mod endpoint;
pub mod error;
pub mod reserved;

// Re-exports for convenience
pub use address::{DomainSocketAddress, AUTHORITY_SCHEME};
pub use encoder::{derive_address, DOMAIN_SOCKET_PORT};
pub use endpoint::{Endpoint, DEFAULT_WEIGHT};
pub use error::AddressError;
pub use reserved::{
    is_domain_socket_ip, is_domain_socket_socket_addr, is_reserved_block_address,
    is_reserved_ipv6, DISCARD_PREFIX,
};
