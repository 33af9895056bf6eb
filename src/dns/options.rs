//! Resolver configuration and per-call options.
//!
//! [`FastResolverConfig`] is fixed at construction; [`ResolveOptions`] is
//! passed to every `resolve` call. Configuration can also be loaded from
//! JSON:
//!
//! ```json
//! { "servers": ["8.8.8.8", "[2001:4860:4860::8888]:53"], "timeout_ms": 2000 }
//! ```

use super::Family;
use crate::base::neterror::NetError;
use serde::Deserialize;
use std::{
    fs,
    net::{IpAddr, SocketAddr},
    path::Path,
    time::Duration,
};

/// Default deadline for one `resolve` call.
pub const DEFAULT_RESOLVER_TIMEOUT: Duration = Duration::from_millis(4000);

/// Port used for server addresses given without one.
pub const DNS_PORT: u16 = 53;

/// Parses a DNS server address.
///
/// Accepts `"8.8.8.8"`, `"8.8.8.8:5353"`, `"2001:4860::8888"` and
/// `"[2001:4860::8888]:53"`. Addresses without a port use port 53.
pub fn parse_server(server: &str) -> Result<SocketAddr, NetError> {
    let server = server.trim();
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    server
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|_| NetError::InvalidServerAddress(server.to_string()))
}

/// Parses every entry of `servers`, failing on the first invalid one.
pub fn parse_servers<S: AsRef<str>>(servers: &[S]) -> Result<Vec<SocketAddr>, NetError> {
    servers.iter().map(|s| parse_server(s.as_ref())).collect()
}

/// Construction-time configuration for a [`FastResolver`](super::FastResolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastResolverConfig {
    /// DNS servers to query. Empty means the system configuration.
    pub servers: Vec<SocketAddr>,

    /// Deadline applied to calls that don't set their own.
    pub timeout: Duration,
}

impl Default for FastResolverConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            timeout: DEFAULT_RESOLVER_TIMEOUT,
        }
    }
}

/// On-disk representation of [`FastResolverConfig`].
#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
struct PersistentConfig {
    servers: Vec<String>,
    timeout_ms: Option<u64>,
}

impl FastResolverConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, NetError> {
        let persistent: PersistentConfig =
            serde_json::from_str(json).map_err(|e| NetError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            servers: parse_servers(&persistent.servers)?,
            timeout: persistent
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_RESOLVER_TIMEOUT),
        })
    }

    /// Loads a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, NetError> {
        let json = fs::read_to_string(path)
            .map_err(|e| NetError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn with_servers(mut self, servers: Vec<SocketAddr>) -> Self {
        self.servers = servers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Options for a single `resolve` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Restrict the lookup to one family; `None` queries both.
    pub family: Option<Family>,

    /// Return every record instead of the single preferred address.
    pub all: bool,

    /// Deadline for this call; `None` uses the resolver's default.
    pub timeout: Option<Duration>,

    /// Replaces the resolver's DNS servers when non-empty.
    pub servers: Vec<SocketAddr>,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(mut self, family: Family) -> Self {
        self.family = Some(family);
        self
    }

    /// Sets the family from its numeric tag, rejecting anything but 4 or 6.
    pub fn family_number(mut self, family: u8) -> Result<Self, NetError> {
        self.family = Some(Family::try_from(family)?);
        Ok(self)
    }

    pub fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn servers(mut self, servers: Vec<SocketAddr>) -> Self {
        self.servers = servers;
        self
    }

    /// Family reported when there is no address to derive one from.
    pub(crate) fn default_family(&self) -> Family {
        self.family.unwrap_or(Family::V4)
    }
}

impl From<Family> for ResolveOptions {
    fn from(family: Family) -> Self {
        Self::new().family(family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_server_without_port() {
        assert_eq!(parse_server("4.4.4.4").unwrap(), "4.4.4.4:53".parse().unwrap());
        assert_eq!(
            parse_server("2001:4860:4860::8888").unwrap(),
            "[2001:4860:4860::8888]:53".parse().unwrap()
        );
        assert_eq!(parse_server("[::1]").unwrap(), "[::1]:53".parse().unwrap());
    }

    #[test]
    fn test_parse_server_with_port() {
        assert_eq!(parse_server("1.1.1.1:5353").unwrap(), "1.1.1.1:5353".parse().unwrap());
        assert_eq!(parse_server(" [::1]:8053 ").unwrap(), "[::1]:8053".parse().unwrap());
    }

    #[test]
    fn test_parse_server_rejects_hostname() {
        assert_eq!(
            parse_server("dns.google"),
            Err(NetError::InvalidServerAddress("dns.google".into()))
        );
        assert!(parse_servers(&["8.8.8.8", "nope"][..]).is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = FastResolverConfig::default();
        assert!(config.servers.is_empty());
        assert_eq!(config.timeout, Duration::from_millis(4000));
    }

    #[test]
    fn test_config_from_json() {
        let config =
            FastResolverConfig::from_json(r#"{"servers": ["8.8.8.8", "[::1]:5353"], "timeout_ms": 250}"#)
                .unwrap();
        assert_eq!(
            config.servers,
            vec!["8.8.8.8:53".parse().unwrap(), "[::1]:5353".parse().unwrap()]
        );
        assert_eq!(config.timeout, Duration::from_millis(250));

        let empty = FastResolverConfig::from_json("{}").unwrap();
        assert_eq!(empty, FastResolverConfig::default());
    }

    #[test]
    fn test_config_from_json_rejects_garbage() {
        assert!(matches!(
            FastResolverConfig::from_json(r#"{"timeout": 5}"#),
            Err(NetError::InvalidConfig(_))
        ));
        assert!(matches!(
            FastResolverConfig::from_json(r#"{"servers": ["not-an-ip"]}"#),
            Err(NetError::InvalidServerAddress(_))
        ));
    }

    #[test]
    fn test_config_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"servers": ["9.9.9.9"], "timeout_ms": 1000}}"#).unwrap();

        let config = FastResolverConfig::load(file.path()).unwrap();
        assert_eq!(config.servers, vec!["9.9.9.9:53".parse().unwrap()]);
        assert_eq!(config.timeout, Duration::from_secs(1));

        let missing = FastResolverConfig::load(Path::new("/nonexistent/fastresolve.json"));
        assert!(matches!(missing, Err(NetError::InvalidConfig(_))));
    }

    #[test]
    fn test_options_builder() {
        let options = ResolveOptions::new()
            .family(Family::V6)
            .all(true)
            .timeout(Duration::from_millis(100));
        assert_eq!(options.family, Some(Family::V6));
        assert!(options.all);
        assert_eq!(options.timeout, Some(Duration::from_millis(100)));
        assert_eq!(options.default_family(), Family::V6);
        assert_eq!(ResolveOptions::new().default_family(), Family::V4);
    }

    #[test]
    fn test_options_family_number() {
        assert_eq!(ResolveOptions::new().family_number(4).unwrap().family, Some(Family::V4));
        assert_eq!(
            ResolveOptions::new().family_number(5),
            Err(NetError::InvalidFamily(5))
        );
    }
}
