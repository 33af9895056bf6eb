//! Pass-through resolution for hostnames that are already IP addresses.
//!
//! Bypasses DNS entirely: a literal IPv4 or IPv6 address resolves to
//! itself, tagged with its detected family.

use super::{AddressRecord, Family, ResolveOptions, Resolved};
use std::net::IpAddr;

/// Attempts to parse a host string as an IP address.
///
/// Returns `Some` if the host is a valid IPv4 or IPv6 address,
/// `None` if it's a hostname that requires DNS resolution.
pub fn literal(host: &str) -> Option<AddressRecord> {
    host.parse::<IpAddr>().ok().map(AddressRecord::from)
}

/// Classifies `host` as an IPv4 literal, an IPv6 literal, or neither.
///
/// Returns `None` for anything that would need name resolution.
pub fn is_ip(host: &str) -> Option<Family> {
    literal(host).map(|record| record.family)
}

/// Resolves `ip` without touching the network.
///
/// Returns the address itself when `ip` is an IPv4 or IPv6 literal.
/// Anything else yields an empty answer (`All([])` when `options.all` is
/// set, otherwise no address and no family). Only `options.all` is
/// consulted.
pub fn static_ip_resolver(ip: &str, options: &ResolveOptions) -> Resolved {
    let record = literal(ip);
    if options.all {
        Resolved::All(record.into_iter().collect())
    } else {
        Resolved::One {
            address: record.map(|r| r.address),
            family: record.map(|r| r.family),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_literal_ipv4() {
        let record = literal("127.0.0.1").unwrap();
        assert_eq!(record.address, IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)));
        assert_eq!(record.family, Family::V4);
    }

    #[test]
    fn test_literal_ipv6() {
        let record = literal("::1").unwrap();
        assert_eq!(record.address, IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert_eq!(record.family, Family::V6);
    }

    #[test]
    fn test_literal_hostname() {
        assert!(literal("example.com").is_none());
        assert!(literal("").is_none());
    }

    #[test]
    fn test_is_ip() {
        assert_eq!(is_ip("172.217.1.174"), Some(Family::V4));
        assert_eq!(is_ip("::1"), Some(Family::V6));
        assert_eq!(is_ip("2001:db8::8a2e:370:7334"), Some(Family::V6));
        assert_eq!(is_ip("google.com"), None);
        assert_eq!(is_ip("10.121.254"), None);
        assert_eq!(is_ip(""), None);
    }

    #[test]
    fn test_static_ip_resolver_single() {
        let resolved = static_ip_resolver("172.217.1.174", &ResolveOptions::new());
        assert_eq!(
            resolved,
            Resolved::One {
                address: Some(IpAddr::V4(Ipv4Addr::new(172, 217, 1, 174))),
                family: Some(Family::V4),
            }
        );
    }

    #[test]
    fn test_static_ip_resolver_all() {
        let resolved = static_ip_resolver("2001:db8::1", &ResolveOptions::new().all(true));
        assert_eq!(resolved.records().len(), 1);
        assert_eq!(resolved.records()[0].family, Family::V6);

        let empty = static_ip_resolver("google.com", &ResolveOptions::new().all(true));
        assert_eq!(empty, Resolved::All(vec![]));
    }

    #[test]
    fn test_static_ip_resolver_hostname() {
        let resolved = static_ip_resolver("google.com", &ResolveOptions::new());
        assert_eq!(
            resolved,
            Resolved::One {
                address: None,
                family: None,
            }
        );
    }
}
