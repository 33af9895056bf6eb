//! Single-family lookups backed by hickory-dns.
//!
//! [`HickoryLookup`] is the production [`Lookup`] primitive: it issues one
//! A or AAAA query per call and classifies hickory's errors into soft and
//! hard failures. The server list can be replaced at runtime; lookups
//! already in flight keep the resolver they started with.

use super::{Family, Looking, Lookup, LookupError, LookupErrorKind, Name};
use crate::base::neterror::NetError;
use hickory_resolver::{
    config::{NameServerConfig, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::{op::ResponseCode, xfer::Protocol, ProtoErrorKind},
    ResolveError, ResolveErrorKind, TokioResolver,
};
use std::{
    fmt,
    net::{IpAddr, SocketAddr},
    sync::{PoisonError, RwLock},
    time::Duration,
};

/// Async A/AAAA lookups backed by a hickory `TokioResolver`.
///
/// # Example
///
/// ```rust,ignore
/// use fastresolve::dns::{Family, HickoryLookup, Lookup, Name};
///
/// let lookup = HickoryLookup::with_servers(&["8.8.8.8:53".parse()?], Duration::from_secs(2))?;
/// let addrs = lookup.lookup(Name::new("example.com"), Family::V4).await?;
/// ```
pub struct HickoryLookup {
    resolver: RwLock<TokioResolver>,
    options: ResolverOpts,
}

impl HickoryLookup {
    /// Creates a lookup using the system's DNS configuration.
    ///
    /// If the system configuration cannot be read, hickory's default
    /// upstream servers are used instead.
    pub fn new(timeout: Duration) -> Self {
        let options = Self::options(timeout);
        let resolver = match TokioResolver::builder_tokio() {
            Ok(mut builder) => {
                tracing::debug!("Using system DNS configuration");
                *builder.options_mut() = options.clone();
                builder.build()
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to read system DNS config, using defaults"
                );
                Self::build(ResolverConfig::default(), options.clone())
            }
        };

        Self {
            resolver: RwLock::new(resolver),
            options,
        }
    }

    /// Creates a lookup that queries exactly `servers` over UDP.
    pub fn with_servers(servers: &[SocketAddr], timeout: Duration) -> Result<Self, NetError> {
        let options = Self::options(timeout);
        let resolver = Self::build(Self::config(servers)?, options.clone());
        Ok(Self {
            resolver: RwLock::new(resolver),
            options,
        })
    }

    fn options(timeout: Duration) -> ResolverOpts {
        let mut options = ResolverOpts::default();
        options.timeout = timeout;
        options
    }

    fn config(servers: &[SocketAddr]) -> Result<ResolverConfig, NetError> {
        if servers.is_empty() {
            return Err(NetError::InvalidConfig("DNS server list is empty".into()));
        }

        let mut config = ResolverConfig::new();
        for server in servers {
            config.add_name_server(NameServerConfig::new(*server, Protocol::Udp));
        }
        Ok(config)
    }

    fn build(config: ResolverConfig, options: ResolverOpts) -> TokioResolver {
        TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(options)
            .build()
    }

    fn current(&self) -> TokioResolver {
        self.resolver
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Lookup for HickoryLookup {
    fn lookup(&self, name: Name, family: Family) -> Looking {
        let resolver = self.current();
        Box::pin(async move {
            let domain = name.as_str();
            tracing::debug!(domain = %domain, %family, "querying via hickory-dns");

            let result: Result<Vec<IpAddr>, ResolveError> = match family {
                Family::V4 => resolver
                    .ipv4_lookup(domain)
                    .await
                    .map(|lookup| lookup.into_iter().map(|a| IpAddr::V4(a.into())).collect()),
                Family::V6 => resolver
                    .ipv6_lookup(domain)
                    .await
                    .map(|lookup| lookup.into_iter().map(|aaaa| IpAddr::V6(aaaa.into())).collect()),
            };

            result.map_err(|e| {
                let kind = classify(&e);
                tracing::debug!(domain = %domain, %family, %kind, error = %e, "hickory-dns lookup failed");
                LookupError::new(kind, e.to_string())
            })
        })
    }

    fn set_servers(&self, servers: &[SocketAddr]) -> Result<(), NetError> {
        let resolver = Self::build(Self::config(servers)?, self.options.clone());
        *self.resolver.write().unwrap_or_else(PoisonError::into_inner) = resolver;
        tracing::debug!(count = servers.len(), "replaced DNS servers");
        Ok(())
    }
}

impl fmt::Debug for HickoryLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HickoryLookup")
            .field("timeout", &self.options.timeout)
            .finish_non_exhaustive()
    }
}

/// Maps a hickory error onto the soft/hard failure taxonomy.
fn classify(err: &ResolveError) -> LookupErrorKind {
    let ResolveErrorKind::Proto(proto) = err.kind() else {
        return LookupErrorKind::Other;
    };

    match proto.kind() {
        ProtoErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::NXDomain => LookupErrorKind::NotFound,
            ResponseCode::ServFail => LookupErrorKind::ServerFailure,
            ResponseCode::NoError => LookupErrorKind::NoData,
            _ => LookupErrorKind::Other,
        },
        ProtoErrorKind::Timeout => LookupErrorKind::TimedOut,
        _ => LookupErrorKind::Other,
    }
}
