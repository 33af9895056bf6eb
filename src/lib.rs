//! # fastresolve
//!
//! Hostname resolution that never hangs.
//!
//! `fastresolve` queries A and AAAA records concurrently, bounds every call
//! with a deadline, and reconciles both answers into a single result with an
//! IPv4-first preference.
//!
//! ## Features
//!
//! - **Concurrent lookups**: A and AAAA are dispatched together and joined
//! - **Deadlines**: a call completes within its timeout even when the DNS
//!   servers are unreachable
//! - **Cancellation**: [`FastResolver::cancel`] settles in-flight calls
//!   with an empty answer
//! - **Soft failures**: NXDOMAIN, NODATA, SERVFAIL and timeouts mean "no
//!   records", not errors
//! - **Literal IPs**: addresses resolve to themselves without any lookup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fastresolve::{FastResolver, ResolveOptions};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let resolver = FastResolver::new();
//!     let resolved = resolver
//!         .resolve(
//!             Some("example.com"),
//!             &ResolveOptions::new().timeout(Duration::from_secs(1)),
//!         )
//!         .await
//!         .unwrap();
//!     println!("{:?}", resolved.address());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`dns`] - Lookup primitives, the resolution orchestrator and its options

pub mod base;
pub mod dns;

pub use base::neterror::NetError;
pub use dns::{
    fast_resolver, static_ip_resolver, AddressRecord, Family, FastResolver, FastResolverConfig,
    ResolveOptions, Resolved,
};
