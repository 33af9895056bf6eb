use crate::base::neterror::{NetError, DNS_SERVER_FAILED, DNS_TIMED_OUT};
use crate::dns::{Family, LookupErrorKind};

#[test]
fn test_usage_errors_use_custom_range() {
    let usage = [
        NetError::InvalidFamily(5),
        NetError::InvalidServerAddress("nope".into()),
        NetError::InvalidConfig("bad".into()),
    ];
    for err in usage {
        assert!(err.as_i32() <= -10000, "{err:?} collides with a Chromium code");
    }
}

#[test]
fn test_lookup_failed_code_follows_kind() {
    let refused = NetError::lookup_failed("example.com", Family::V4, LookupErrorKind::Other, "refused");
    assert_eq!(refused.as_i32(), DNS_SERVER_FAILED);

    let timed_out =
        NetError::lookup_failed("example.com", Family::V6, LookupErrorKind::TimedOut, "slow");
    assert_eq!(timed_out.as_i32(), DNS_TIMED_OUT);

    let cancelled =
        NetError::lookup_failed("example.com", Family::V4, LookupErrorKind::Cancelled, "aborted");
    assert_eq!(cancelled.as_i32(), -803);

    let servfail =
        NetError::lookup_failed("example.com", Family::V4, LookupErrorKind::ServerFailure, "x");
    assert_eq!(servfail.as_i32(), -802);
}

#[test]
fn test_lookup_failed_display() {
    let err = NetError::lookup_failed("example.com", Family::V6, LookupErrorKind::Other, "refused");
    assert_eq!(
        err.to_string(),
        "DNS lookup of IPv6 records for example.com failed (other): refused"
    );
}

#[test]
fn test_invalid_family_display() {
    assert_eq!(
        NetError::InvalidFamily(5).to_string(),
        "invalid family 5, must be one of the {4, 6}"
    );
}
