//! Domain Socket Address Value
//!
//! [`DomainSocketAddress`] couples a socket path with a synthetic IPv6
//! address from the Discard Prefix, so code that expects an IP socket address
//! can carry a Unix domain socket without special cases.
//!
//! # Derived Views
//!
//! | View                  | Form                      | Computed    |
//! |-----------------------|---------------------------|-------------|
//! | [`ip`]                | `100::xxxx:xxxx:xxxx:xxxx`| eagerly     |
//! | [`authority`]         | `unix:<path>`             | on first use|
//! | [`to_native_handle`]  | `std` Unix socket address | on first use|
//! | [`to_endpoint`]       | [`Endpoint`]              | on first use|
//!
//! Lazy views live in [`OnceLock`] cells. Each is a pure function of the
//! path, so a racing first access can only ever store a value-equal result.
//!
//! # Equality
//!
//! Equality, hashing and ordering are keyed on the exact path bytes, the same
//! bytes every derived view is computed from. `/tmp/a.sock` and
//! `/tmp//a.sock` are different values, even though `Path` would treat them
//! as equal. The derived address is a 64-bit digest and may collide; two
//! values with different paths are never equal, even when their derived
//! addresses are. Converting to
//! [`SocketAddr`] gives up that guarantee, because `SocketAddr` compares bytes.
//!
//! [`ip`]: DomainSocketAddress::ip
//! [`authority`]: DomainSocketAddress::authority
//! [`to_native_handle`]: DomainSocketAddress::to_native_handle
//! [`to_endpoint`]: DomainSocketAddress::to_endpoint

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{Ipv6Addr, SocketAddr, SocketAddrV6, ToSocketAddrs};
#[cfg(unix)]
use std::os::unix::net::SocketAddr as UnixSocketAddr;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encoder::{derive_address, DOMAIN_SOCKET_PORT};
use crate::endpoint::Endpoint;
use crate::error::AddressError;

/// Scheme prefix of the authority form
pub const AUTHORITY_SCHEME: &str = "unix:";

/// A Unix domain socket address that behaves like an IP socket address
#[derive(Clone)]
pub struct DomainSocketAddress {
    /// Socket path; the identity of this value
    path: PathBuf,
    /// Derived address inside the Discard Prefix
    ip: Ipv6Addr,
    /// Cached `unix:<path>` form
    authority: OnceLock<String>,
    /// Cached native transport address
    #[cfg(unix)]
    native: OnceLock<UnixSocketAddr>,
    /// Cached endpoint view
    endpoint: OnceLock<Endpoint>,
}

impl DomainSocketAddress {
    /// Create an address for the socket at `path`
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::InvalidArgument`] if `path` is empty.
    pub fn of(path: impl Into<PathBuf>) -> Result<Self, AddressError> {
        let path = path.into();
        let ip = derive_address(&path)?;

        Ok(Self {
            path,
            ip,
            authority: OnceLock::new(),
            #[cfg(unix)]
            native: OnceLock::new(),
            endpoint: OnceLock::new(),
        })
    }

    /// Create an address from a native Unix socket address
    ///
    /// The handle is kept as the cached native view.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Unsupported`] if the handle is unnamed or lives
    /// in the abstract namespace.
    #[cfg(unix)]
    pub fn from_native(handle: &UnixSocketAddr) -> Result<Self, AddressError> {
        let path = handle.as_pathname().ok_or_else(|| {
            tracing::debug!(handle = ?handle, "Native address has no path");
            AddressError::unsupported(format!("{:?} does not refer to a path", handle))
        })?;

        let mut addr = Self::of(path)?;
        addr.native = OnceLock::from(handle.clone());
        Ok(addr)
    }

    /// Create an address from a tokio Unix socket address
    ///
    /// Useful with `UnixListener::local_addr` and `UnixStream::peer_addr`.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Unsupported`] if the address has no path.
    #[cfg(unix)]
    pub fn from_tokio(handle: &tokio::net::unix::SocketAddr) -> Result<Self, AddressError> {
        let path = handle.as_pathname().ok_or_else(|| {
            tracing::debug!(handle = ?handle, "Tokio address has no path");
            AddressError::unsupported(format!("{:?} does not refer to a path", handle))
        })?;
        Self::of(path)
    }

    /// Create an address from its `unix:<path>` authority form
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Unsupported`] if the scheme is not `unix:`,
    /// and [`AddressError::InvalidArgument`] if the path is empty.
    pub fn from_authority(authority: &str) -> Result<Self, AddressError> {
        let path = authority.strip_prefix(AUTHORITY_SCHEME).ok_or_else(|| {
            AddressError::unsupported(format!(
                "{:?} is not a domain socket authority",
                authority
            ))
        })?;
        Self::of(path)
    }

    /// The socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The derived address inside the Discard Prefix
    pub fn ip(&self) -> Ipv6Addr {
        self.ip
    }

    /// The sentinel port, always [`DOMAIN_SOCKET_PORT`]
    pub fn port(&self) -> u16 {
        DOMAIN_SOCKET_PORT
    }

    /// The derived address and sentinel port as a generic socket address
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V6(SocketAddrV6::new(self.ip, DOMAIN_SOCKET_PORT, 0, 0))
    }

    /// The authority form, `unix:<path>`
    ///
    /// Non-UTF-8 path bytes are replaced with U+FFFD.
    pub fn authority(&self) -> &str {
        self.authority.get_or_init(|| {
            tracing::trace!(path = ?self.path, "Computing authority");
            format!("{}{}", AUTHORITY_SCHEME, self.path.to_string_lossy())
        })
    }

    /// The native Unix socket address for the transport layer
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::InvalidArgument`] if the platform cannot
    /// represent the path, e.g. it exceeds `sun_path` or contains a NUL byte.
    /// Failures are not cached.
    #[cfg(unix)]
    pub fn to_native_handle(&self) -> Result<&UnixSocketAddr, AddressError> {
        if let Some(handle) = self.native.get() {
            return Ok(handle);
        }

        let handle = UnixSocketAddr::from_pathname(&self.path).map_err(|e| {
            tracing::debug!(path = ?self.path, error = %e, "Native address rejected path");
            AddressError::invalid(format!(
                "cannot build native address for {:?}: {}",
                self.path, e
            ))
        })?;

        tracing::trace!(path = ?self.path, "Computed native address");
        Ok(self.native.get_or_init(|| handle))
    }

    /// The endpoint view, whose host is [`authority`](Self::authority)
    pub fn to_endpoint(&self) -> &Endpoint {
        self.endpoint.get_or_init(|| {
            tracing::trace!(path = ?self.path, "Computing endpoint");
            Endpoint::of(self.authority())
        })
    }
}

impl fmt::Display for DomainSocketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl fmt::Debug for DomainSocketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainSocketAddress")
            .field("path", &self.path)
            .field("ip", &self.ip)
            .finish_non_exhaustive()
    }
}

impl PartialEq for DomainSocketAddress {
    fn eq(&self, other: &Self) -> bool {
        self.path.as_os_str() == other.path.as_os_str()
    }
}

impl Eq for DomainSocketAddress {}

impl Hash for DomainSocketAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.as_os_str().hash(state);
    }
}

impl PartialOrd for DomainSocketAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DomainSocketAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.as_os_str().cmp(other.path.as_os_str())
    }
}

impl From<&DomainSocketAddress> for SocketAddr {
    fn from(addr: &DomainSocketAddress) -> Self {
        addr.socket_addr()
    }
}

impl From<DomainSocketAddress> for SocketAddr {
    fn from(addr: DomainSocketAddress) -> Self {
        addr.socket_addr()
    }
}

impl ToSocketAddrs for DomainSocketAddress {
    type Iter = std::option::IntoIter<SocketAddr>;

    fn to_socket_addrs(&self) -> std::io::Result<Self::Iter> {
        Ok(Some(self.socket_addr()).into_iter())
    }
}

impl TryFrom<&Path> for DomainSocketAddress {
    type Error = AddressError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        Self::of(path)
    }
}

impl TryFrom<PathBuf> for DomainSocketAddress {
    type Error = AddressError;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        Self::of(path)
    }
}

impl Serialize for DomainSocketAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.path.to_str() {
            Some(path) => serializer.serialize_str(path),
            None => Err(serde::ser::Error::custom(format!(
                "socket path {:?} is not valid UTF-8",
                self.path
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for DomainSocketAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let path = PathBuf::deserialize(deserializer)?;
        Self::of(path).map_err(serde::de::Error::custom)
    }
}
