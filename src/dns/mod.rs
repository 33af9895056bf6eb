//! DNS Resolution Module
//!
//! Resolves hostnames with concurrent A and AAAA lookups under a deadline,
//! merging their answers IPv4-first.
//!
//! - [`FastResolver`]: the orchestrator (deadline, cancellation, merging)
//! - [`Lookup`]: the single-family lookup primitive it drives
//! - [`HickoryLookup`]: `Lookup` backed by hickory-dns
//! - [`static_ip_resolver`]: pass-through for IP literals
//!
//! # Example
//!
//! ```rust,ignore
//! use fastresolve::dns::{FastResolver, ResolveOptions};
//!
//! let resolver = FastResolver::new();
//! let all = resolver
//!     .resolve(Some("example.com"), &ResolveOptions::new().all(true))
//!     .await?;
//! for record in all.records() {
//!     println!("{} (IPv{})", record.address, record.family.as_u8());
//! }
//! ```

mod fast;
mod hickory;
mod options;
mod resolve;
mod static_ip;

pub use fast::{fast_resolver, merge, FastResolver, LookupOutcome, LookupSession};
pub use hickory::HickoryLookup;
pub use options::{
    parse_server, parse_servers, FastResolverConfig, ResolveOptions, DEFAULT_RESOLVER_TIMEOUT,
    DNS_PORT,
};
pub use resolve::{
    AddressRecord, Family, Looking, Lookup, LookupError, LookupErrorKind, Name, Resolved,
};
pub use static_ip::{is_ip, static_ip_resolver};
