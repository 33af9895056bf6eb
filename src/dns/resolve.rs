//! Core DNS resolution types and traits.
//!
//! This module defines the `Lookup` trait and supporting types that form
//! the foundation of the DNS abstraction layer.

use crate::base::neterror::NetError;
use std::{
    fmt,
    future::Future,
    net::{IpAddr, SocketAddr},
    pin::Pin,
    sync::Arc,
};
use thiserror::Error;

/// A domain name to resolve into IP addresses.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass domain names to lookups.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// IP address family: IPv4 (4) or IPv6 (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// The numeric family tag, `4` or `6`.
    pub fn as_u8(self) -> u8 {
        match self {
            Family::V4 => 4,
            Family::V6 => 6,
        }
    }

    /// The family of an already parsed address.
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }
}

impl TryFrom<u8> for Family {
    type Error = NetError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Family::V4),
            6 => Ok(Family::V6),
            other => Err(NetError::InvalidFamily(other)),
        }
    }
}

impl From<Family> for u8 {
    fn from(family: Family) -> Self {
        family.as_u8()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => f.write_str("IPv4"),
            Family::V6 => f.write_str("IPv6"),
        }
    }
}

/// A single resolved address tagged with its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRecord {
    pub address: IpAddr,
    pub family: Family,
}

impl AddressRecord {
    pub fn new(address: IpAddr, family: Family) -> Self {
        Self { address, family }
    }
}

impl From<IpAddr> for AddressRecord {
    fn from(address: IpAddr) -> Self {
        Self {
            address,
            family: Family::of(&address),
        }
    }
}

/// Final answer of a resolve call.
///
/// The shape follows the `all` option: a single preferred address, or every
/// record in IPv4-then-IPv6 order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    One {
        address: Option<IpAddr>,
        family: Option<Family>,
    },
    All(Vec<AddressRecord>),
}

impl Resolved {
    /// The empty answer for the given shape.
    pub fn empty(all: bool, family: Option<Family>) -> Self {
        if all {
            Resolved::All(Vec::new())
        } else {
            Resolved::One {
                address: None,
                family,
            }
        }
    }

    /// The single address, or the first record when all were requested.
    pub fn address(&self) -> Option<IpAddr> {
        match self {
            Resolved::One { address, .. } => *address,
            Resolved::All(records) => records.first().map(|r| r.address),
        }
    }

    pub fn family(&self) -> Option<Family> {
        match self {
            Resolved::One { family, .. } => *family,
            Resolved::All(records) => records.first().map(|r| r.family),
        }
    }

    pub fn records(&self) -> &[AddressRecord] {
        match self {
            Resolved::One { .. } => &[],
            Resolved::All(records) => records,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Resolved::One { address, .. } => address.is_none(),
            Resolved::All(records) => records.is_empty(),
        }
    }
}

/// Why a single-family lookup produced no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupErrorKind {
    /// The server reported SERVFAIL.
    ServerFailure,
    /// The domain does not exist (NXDOMAIN).
    NotFound,
    /// The domain exists but has no records of the requested type.
    NoData,
    /// The query was aborted before it settled.
    Cancelled,
    /// The server did not answer in time.
    TimedOut,
    /// Anything else: malformed responses, socket errors, refused queries.
    Other,
}

impl LookupErrorKind {
    /// Soft failures mean "no usable answer" and never fail a whole resolve.
    pub fn is_soft(self) -> bool {
        !matches!(self, LookupErrorKind::Other)
    }
}

impl fmt::Display for LookupErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LookupErrorKind::ServerFailure => "server failure",
            LookupErrorKind::NotFound => "domain not found",
            LookupErrorKind::NoData => "no data",
            LookupErrorKind::Cancelled => "cancelled",
            LookupErrorKind::TimedOut => "timed out",
            LookupErrorKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// Error produced by a [`Lookup`] primitive for one family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct LookupError {
    kind: LookupErrorKind,
    message: String,
}

impl LookupError {
    pub fn new(kind: LookupErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(LookupErrorKind::Cancelled, "lookup cancelled")
    }

    pub fn kind(&self) -> LookupErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_soft(&self) -> bool {
        self.kind.is_soft()
    }
}

/// Alias for the `Future` type returned by a single-family lookup.
pub type Looking = Pin<Box<dyn Future<Output = Result<Vec<IpAddr>, LookupError>> + Send>>;

/// Single-family lookup primitive (A or AAAA).
///
/// This is the collaborator the [`FastResolver`](super::FastResolver)
/// orchestrates. Implementations must be thread-safe.
///
/// # Design Notes
///
/// - Dropping a [`Looking`] future aborts the query; that is how callers
///   cancel outstanding lookups.
/// - The server list is shared state: `set_servers` affects every lookup
///   issued after it returns.
pub trait Lookup: Send + Sync {
    /// Queries A (`Family::V4`) or AAAA (`Family::V6`) records for `name`.
    fn lookup(&self, name: Name, family: Family) -> Looking;

    /// Replaces the DNS servers used by subsequent lookups.
    fn set_servers(&self, servers: &[SocketAddr]) -> Result<(), NetError>;
}

/// Blanket implementation for Arc-wrapped lookups.
impl<L: Lookup + ?Sized> Lookup for Arc<L> {
    fn lookup(&self, name: Name, family: Family) -> Looking {
        (**self).lookup(name, family)
    }

    fn set_servers(&self, servers: &[SocketAddr]) -> Result<(), NetError> {
        (**self).set_servers(servers)
    }
}
