//! Service Endpoints
//!
//! An [`Endpoint`] is the host identity routing and load-balancing code works
//! with. Regular endpoints carry a host name or IP literal and an optional
//! port. Domain socket endpoints carry the `unix:<path>` authority as their
//! host and always report [`DOMAIN_SOCKET_PORT`].

use std::fmt;
use std::net::Ipv6Addr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::address::{DomainSocketAddress, AUTHORITY_SCHEME};
use crate::encoder::DOMAIN_SOCKET_PORT;
use crate::error::AddressError;

/// Weight assigned to endpoints unless overridden
pub const DEFAULT_WEIGHT: u32 = 1000;

/// A host identity used for routing and load balancing
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Host name, IP literal (IPv6 without brackets), or `unix:<path>`
    host: String,
    /// Explicit port; always `None` for domain socket endpoints
    port: Option<u16>,
    /// Relative load-balancing weight
    weight: u32,
}

impl Endpoint {
    /// Create an endpoint without a port
    pub fn of(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Create an endpoint with a port
    ///
    /// The port is dropped for domain socket hosts, which only ever report
    /// the sentinel port.
    pub fn of_port(host: impl Into<String>, port: u16) -> Self {
        let mut endpoint = Self::of(host);
        if !endpoint.is_domain_socket() {
            endpoint.port = Some(port);
        }
        endpoint
    }

    /// Parse an authority string
    ///
    /// Accepted forms: `unix:<path>`, `host`, `host:port`, `[v6]`,
    /// `[v6]:port`, and a bare IPv6 literal. The input is not trimmed; a
    /// `unix:` path keeps every byte after the scheme.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::InvalidArgument`] for empty input, an empty
    /// domain socket path, an unterminated IPv6 literal, or a bad port.
    pub fn parse(authority: &str) -> Result<Self, AddressError> {
        if authority.is_empty() {
            return Err(AddressError::invalid("authority must not be empty"));
        }

        if let Some(path) = authority.strip_prefix(AUTHORITY_SCHEME) {
            if path.is_empty() {
                return Err(AddressError::invalid(format!(
                    "domain socket authority has no path: {:?}",
                    authority
                )));
            }
            return Ok(Self::of(authority));
        }

        if let Some(rest) = authority.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(|| {
                AddressError::invalid(format!("unterminated IPv6 literal: {:?}", authority))
            })?;
            host.parse::<Ipv6Addr>().map_err(|e| {
                AddressError::invalid(format!("bad IPv6 literal {:?}: {}", host, e))
            })?;
            return match tail {
                "" => Ok(Self::of(host)),
                _ => {
                    let port = tail.strip_prefix(':').ok_or_else(|| {
                        AddressError::invalid(format!(
                            "unexpected characters after IPv6 literal: {:?}",
                            authority
                        ))
                    })?;
                    Ok(Self::of_port(host, parse_port(port)?))
                }
            };
        }

        match authority.matches(':').count() {
            0 => Ok(Self::of(authority)),
            1 => {
                let (host, port) = authority
                    .split_once(':')
                    .ok_or_else(|| AddressError::invalid("missing port separator"))?;
                if host.is_empty() {
                    return Err(AddressError::invalid(format!(
                        "authority has no host: {:?}",
                        authority
                    )));
                }
                Ok(Self::of_port(host, parse_port(port)?))
            }
            _ => {
                authority.parse::<Ipv6Addr>().map_err(|e| {
                    AddressError::invalid(format!("bad authority {:?}: {}", authority, e))
                })?;
                Ok(Self::of(authority))
            }
        }
    }

    /// Return a copy of this endpoint with a different weight
    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// The host part
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port, if any
    ///
    /// Domain socket endpoints always return [`DOMAIN_SOCKET_PORT`].
    pub fn port(&self) -> Option<u16> {
        if self.is_domain_socket() {
            Some(DOMAIN_SOCKET_PORT)
        } else {
            self.port
        }
    }

    /// The port, falling back to `default_port`
    pub fn port_or(&self, default_port: u16) -> u16 {
        self.port().unwrap_or(default_port)
    }

    /// The load-balancing weight
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Whether the host uses the `unix:` scheme
    pub fn is_domain_socket(&self) -> bool {
        self.host.starts_with(AUTHORITY_SCHEME)
    }

    /// The authority form of this endpoint
    ///
    /// Domain socket endpoints render their host only. IPv6 hosts are
    /// bracketed.
    pub fn authority(&self) -> String {
        if self.is_domain_socket() {
            return self.host.clone();
        }

        let host = if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };

        match self.port {
            Some(port) => format!("{}:{}", host, port),
            None => host,
        }
    }

    /// Convert back to a [`DomainSocketAddress`]
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Unsupported`] if the host does not use the
    /// `unix:` scheme.
    pub fn to_domain_socket_address(&self) -> Result<DomainSocketAddress, AddressError> {
        DomainSocketAddress::from_authority(&self.host)
    }
}

fn parse_port(text: &str) -> Result<u16, AddressError> {
    text.parse()
        .map_err(|e| AddressError::invalid(format!("bad port {:?}: {}", text, e)))
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.authority())
    }
}

impl std::str::FromStr for Endpoint {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Weight is not part of the wire form; it is a local routing preference.
impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.authority())
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
