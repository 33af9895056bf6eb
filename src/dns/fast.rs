//! Resolution orchestrator.
//!
//! [`FastResolver`] turns a hostname into one address (or all of them) by
//! querying A and AAAA records concurrently under a deadline:
//!
//! 1. Empty hostnames and IP literals return without any lookup.
//! 2. One or two lookups are dispatched on a per-call [`LookupSession`].
//! 3. When the deadline fires, or [`FastResolver::cancel`] is called, the
//!    session is cancelled and outstanding lookups settle with no records.
//! 4. Both answers are merged IPv4-first and `0.0.0.0` is dropped.
//!
//! Lookup failures that only mean "no answer" (SERVFAIL, NXDOMAIN, NODATA,
//! cancelled, timed out) are absorbed into an empty record set. Any other
//! failure aborts the call.

use super::{
    static_ip, AddressRecord, Family, FastResolverConfig, HickoryLookup, Lookup, LookupError,
    LookupErrorKind, Name, ResolveOptions, Resolved,
};
use crate::base::neterror::NetError;
use futures::future::try_join;
use std::{
    fmt,
    net::{IpAddr, Ipv4Addr},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio_util::sync::CancellationToken;

/// Names shorter than this are never sent to a DNS server.
const MIN_DOMAIN_LENGTH: usize = 3;

/// Block pages and sinkholes answer with this; it is never a usable address.
const SENTINEL_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Settled result of one per-family lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The lookup answered, possibly with an empty record set.
    Records(Vec<AddressRecord>),
    /// No usable answer; merges as an empty record set.
    SoftFail(LookupErrorKind),
    /// Aborts the whole resolve call.
    HardFail(NetError),
}

impl LookupOutcome {
    fn settle(name: &Name, family: Family, result: Result<Vec<IpAddr>, LookupError>) -> Self {
        match result {
            Ok(addrs) => LookupOutcome::Records(
                addrs
                    .into_iter()
                    .map(|address| AddressRecord::new(address, family))
                    .collect(),
            ),
            Err(e) if e.is_soft() => {
                tracing::debug!(domain = %name, %family, error = %e, "lookup yielded no answer");
                LookupOutcome::SoftFail(e.kind())
            }
            Err(e) => LookupOutcome::HardFail(NetError::lookup_failed(
                name.as_str(),
                family,
                e.kind(),
                e.message(),
            )),
        }
    }

    /// Collapses soft failures into an empty record set.
    pub fn into_records(self) -> Result<Vec<AddressRecord>, NetError> {
        match self {
            LookupOutcome::Records(records) => Ok(records),
            LookupOutcome::SoftFail(_) => Ok(Vec::new()),
            LookupOutcome::HardFail(e) => Err(e),
        }
    }
}

/// Cancellable state owned by exactly one resolve call.
///
/// The session's token is cancelled by the deadline, by
/// [`FastResolver::cancel`], and when the session is dropped, so no lookup
/// outlives the call that issued it.
pub struct LookupSession {
    lookup: Arc<dyn Lookup>,
    token: CancellationToken,
    timeout: Duration,
}

impl LookupSession {
    pub fn new(lookup: Arc<dyn Lookup>, token: CancellationToken, timeout: Duration) -> Self {
        Self {
            lookup,
            token,
            timeout,
        }
    }

    /// Cancels every lookup of this session. Calling it again is a no-op.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs one lookup until it settles or the session is cancelled.
    pub async fn query(&self, name: &Name, family: Family) -> LookupOutcome {
        let result = tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(LookupError::cancelled()),
            result = self.lookup.lookup(name.clone(), family) => result,
        };
        LookupOutcome::settle(name, family, result)
    }

    /// Dispatches the lookups `family` asks for and waits for all of them.
    ///
    /// Returns the IPv4 and IPv6 record sets. A family that wasn't queried
    /// yields an empty set. A hard failure returns immediately and drops the
    /// other lookup.
    pub async fn run(
        &self,
        name: &Name,
        family: Option<Family>,
    ) -> Result<(Vec<AddressRecord>, Vec<AddressRecord>), NetError> {
        let v4 = self.query_if(name, Family::V4, family != Some(Family::V6));
        let v6 = self.query_if(name, Family::V6, family != Some(Family::V4));

        let lookups = try_join(v4, v6);
        tokio::pin!(lookups);

        tokio::select! {
            result = &mut lookups => return result,
            _ = tokio::time::sleep(self.timeout) => {
                tracing::debug!(domain = %name, timeout = ?self.timeout, "deadline reached, cancelling lookups");
                self.cancel();
            }
        }

        lookups.await
    }

    async fn query_if(
        &self,
        name: &Name,
        family: Family,
        wanted: bool,
    ) -> Result<Vec<AddressRecord>, NetError> {
        if wanted {
            self.query(name, family).await.into_records()
        } else {
            Ok(Vec::new())
        }
    }
}

impl Drop for LookupSession {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl fmt::Debug for LookupSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupSession")
            .field("timeout", &self.timeout)
            .field("cancelled", &self.token.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Merges per-family record sets into the final answer.
///
/// With `all`, every IPv4 record is followed by every IPv6 record.
/// Otherwise the IPv4 set wins whenever it is non-empty and its first
/// usable record is returned. `0.0.0.0` is dropped after the set is chosen,
/// so an IPv4 answer made only of sentinels yields no address.
pub fn merge(
    v4: Vec<AddressRecord>,
    v6: Vec<AddressRecord>,
    options: &ResolveOptions,
) -> Resolved {
    let usable = |record: &AddressRecord| record.address != SENTINEL_ADDRESS;

    if options.all {
        return Resolved::All(v4.into_iter().chain(v6).filter(usable).collect());
    }

    let preferred = if v4.is_empty() { v6 } else { v4 };
    let record = preferred.into_iter().find(usable);
    Resolved::One {
        address: record.map(|r| r.address),
        family: record.map(|r| r.family).or(options.family),
    }
}

/// Concurrent A/AAAA resolver with a per-call deadline.
///
/// Long-lived configuration (servers, default timeout) lives here; all
/// cancellable state lives in the [`LookupSession`] each call creates, so
/// concurrent calls on one resolver don't interfere.
///
/// # Example
///
/// ```rust,ignore
/// use fastresolve::{FastResolver, ResolveOptions};
///
/// let resolver = FastResolver::new();
/// let resolved = resolver.resolve(Some("example.com"), &ResolveOptions::new()).await?;
/// println!("{:?} ({:?})", resolved.address(), resolved.family());
/// ```
pub struct FastResolver {
    lookup: Arc<dyn Lookup>,
    timeout: Duration,
    root: Mutex<CancellationToken>,
}

impl FastResolver {
    /// Creates a resolver using the system DNS configuration and a 4s deadline.
    pub fn new() -> Self {
        let config = FastResolverConfig::default();
        Self::from_parts(Arc::new(HickoryLookup::new(config.timeout)), config.timeout)
    }

    /// Creates a hickory-backed resolver from `config`.
    pub fn with_config(config: FastResolverConfig) -> Result<Self, NetError> {
        let lookup = if config.servers.is_empty() {
            HickoryLookup::new(config.timeout)
        } else {
            HickoryLookup::with_servers(&config.servers, config.timeout)?
        };
        Ok(Self::from_parts(Arc::new(lookup), config.timeout))
    }

    /// Creates a resolver over a custom lookup primitive.
    ///
    /// Servers from `config` are installed on `lookup` when non-empty.
    pub fn with_lookup(
        lookup: Arc<dyn Lookup>,
        config: FastResolverConfig,
    ) -> Result<Self, NetError> {
        if !config.servers.is_empty() {
            lookup.set_servers(&config.servers)?;
        }
        Ok(Self::from_parts(lookup, config.timeout))
    }

    fn from_parts(lookup: Arc<dyn Lookup>, timeout: Duration) -> Self {
        Self {
            lookup,
            timeout,
            root: Mutex::new(CancellationToken::new()),
        }
    }

    /// Default deadline for calls that don't set their own.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Aborts every resolve call currently in flight.
    ///
    /// Aborted calls complete successfully with an empty answer. Calls
    /// started afterwards are unaffected, and cancelling with nothing in
    /// flight does nothing.
    pub fn cancel(&self) {
        let previous = {
            let mut root = self.root.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *root, CancellationToken::new())
        };
        previous.cancel();
    }

    fn session(&self, timeout: Duration) -> LookupSession {
        let token = self
            .root
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .child_token();
        LookupSession::new(self.lookup.clone(), token, timeout)
    }

    /// Resolves `hostname` to one address, or to all of them with
    /// `options.all`.
    ///
    /// An absent or empty hostname resolves to an empty answer tagged with
    /// `options.family` (IPv4 when unset). Names shorter than three
    /// characters do the same. IP literals resolve to themselves, tagged
    /// with `options.family` when set and their own family otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if `options.servers` cannot be installed or if a
    /// lookup fails for a reason other than "no answer". Running out of
    /// time is not an error: the call returns whatever settled.
    pub async fn resolve(
        &self,
        hostname: Option<&str>,
        options: &ResolveOptions,
    ) -> Result<Resolved, NetError> {
        let Some(hostname) = hostname.filter(|h| !h.is_empty()) else {
            tokio::task::yield_now().await;
            return Ok(Resolved::empty(options.all, Some(options.default_family())));
        };
        let hostname = hostname.trim();

        if !options.servers.is_empty() {
            self.lookup.set_servers(&options.servers)?;
        }

        if let Some(literal) = static_ip::literal(hostname) {
            let record =
                AddressRecord::new(literal.address, options.family.unwrap_or(literal.family));
            tracing::debug!(host = %hostname, family = %record.family, "hostname is an IP literal");
            return Ok(merge(vec![record], Vec::new(), options));
        }

        if hostname.chars().count() < MIN_DOMAIN_LENGTH {
            return Ok(Resolved::empty(options.all, Some(options.default_family())));
        }

        let name = Name::new(hostname);
        let timeout = options.timeout.unwrap_or(self.timeout);
        let session = self.session(timeout);

        tracing::debug!(domain = %name, family = ?options.family, ?timeout, "dispatching lookups");
        let (v4, v6) = session.run(&name, options.family).await.map_err(|e| {
            tracing::warn!(domain = %name, error = %e, "resolve failed");
            e
        })?;

        let resolved = merge(v4, v6, options);
        tracing::debug!(
            domain = %name,
            cancelled = session.is_cancelled(),
            empty = resolved.is_empty(),
            "resolve complete"
        );
        Ok(resolved)
    }
}

impl Default for FastResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FastResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastResolver")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Resolves `hostname` with a fresh default [`FastResolver`].
pub async fn fast_resolver(
    hostname: Option<&str>,
    options: &ResolveOptions,
) -> Result<Resolved, NetError> {
    FastResolver::new().resolve(hostname, options).await
}
