//! # Subnet Validation — Routability Policy
//!
//! Parses the subnet field of a record (bare address or CIDR prefix, IPv4 or
//! IPv6) and enforces the routability policy: a feed may only describe
//! address space that is globally routable. Anything in an IANA
//! special-purpose range (private, loopback, link-local, multicast,
//! documentation, benchmarking, shared address space, reserved) is rejected.
//!
//! The policy is reject-unless-proven-global. It is deliberately stricter
//! than a bare "not private" test: documentation and benchmarking prefixes,
//! for example, are not private but must never appear in a published feed.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::IpNet;

use crate::report::{FeedReport, LineContext, Violation};

/// Check the subnet field of a record.
///
/// A string containing `/` is parsed as a CIDR prefix; anything else as a
/// single address. Parse failures record [`Violation::InvalidAddress`] with
/// the parser's own diagnostic; a non-global result records
/// [`Violation::NotGlobal`]. At most one of the two fires per line.
pub fn check_subnet(field: &str, line: LineContext<'_>, report: &mut FeedReport) {
    if field.contains('/') {
        match field.parse::<IpNet>() {
            Ok(net) => {
                if !is_global(net.network()) {
                    report.record(line, Violation::NotGlobal);
                }
            }
            Err(e) => report.record(line, Violation::InvalidAddress(e.to_string())),
        }
    } else {
        match field.parse::<IpAddr>() {
            Ok(addr) => {
                if !is_global(addr) {
                    report.record(line, Violation::NotGlobal);
                }
            }
            Err(e) => report.record(line, Violation::InvalidAddress(e.to_string())),
        }
    }
}

/// True if the address is globally routable.
pub fn is_global(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => is_global_v4(v4),
        IpAddr::V6(v6) => is_global_v6(v6),
    }
}

/// IPv4 global routability per the IANA special-purpose address registry.
fn is_global_v4(addr: Ipv4Addr) -> bool {
    let o = addr.octets();
    !(addr.is_unspecified()
        || addr.is_private()
        || addr.is_loopback()
        || addr.is_link_local()
        || addr.is_broadcast()
        || addr.is_documentation()
        || addr.is_multicast()
        // Shared address space, 100.64.0.0/10 (RFC 6598).
        || (o[0] == 100 && (o[1] & 0b1100_0000) == 0b0100_0000)
        // IETF protocol assignments, 192.0.0.0/24 (RFC 6890).
        || (o[0] == 192 && o[1] == 0 && o[2] == 0)
        // Benchmarking, 198.18.0.0/15 (RFC 2544).
        || (o[0] == 198 && (o[1] & 0b1111_1110) == 18)
        // Reserved, 240.0.0.0/4 (RFC 1112).
        || (o[0] & 0b1111_0000) == 0b1111_0000)
}

/// IPv6 global routability per the IANA special-purpose address registry.
fn is_global_v6(addr: Ipv6Addr) -> bool {
    let s = addr.segments();
    !(addr.is_unspecified()
        || addr.is_loopback()
        || addr.is_multicast()
        // Unique local, fc00::/7 (RFC 4193).
        || (s[0] & 0xfe00) == 0xfc00
        // Link-local unicast, fe80::/10 (RFC 4291).
        || (s[0] & 0xffc0) == 0xfe80
        // Documentation, 2001:db8::/32 (RFC 3849) and 3fff::/20 (RFC 9637).
        || (s[0] == 0x2001 && s[1] == 0xdb8)
        || (s[0] == 0x3fff && (s[1] & 0xf000) == 0)
        // Benchmarking, 2001:2::/48 (RFC 5180).
        || (s[0] == 0x2001 && s[1] == 0x2 && s[2] == 0)
        // IPv4-mapped, ::ffff:0:0/96; routability is decided by the
        // embedded IPv4 address.
        || matches!(addr.to_ipv4_mapped(), Some(v4) if !is_global_v4(v4)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Finding;

    fn run(field: &str) -> Vec<Finding> {
        let mut report = FeedReport::new();
        let line = LineContext { number: 1, raw: field };
        check_subnet(field, line, &mut report);
        report.findings().to_vec()
    }

    #[test]
    fn global_ipv4_prefix_is_clean() {
        assert!(run("1.2.3.0/24").is_empty());
        assert!(run("8.8.8.8").is_empty());
    }

    #[test]
    fn global_ipv6_prefix_is_clean() {
        assert!(run("2a0e:7d44:f000::/40").is_empty());
        assert!(run("2607:f8b0::1").is_empty());
    }

    #[test]
    fn private_ipv4_is_not_global() {
        for field in ["10.0.0.0/8", "172.16.0.0/12", "192.168.1.0/24", "10.1.2.3"] {
            let findings = run(field);
            assert_eq!(findings.len(), 1, "{field}");
            assert_eq!(findings[0].violation, Violation::NotGlobal, "{field}");
        }
    }

    #[test]
    fn special_purpose_ipv4_is_not_global() {
        for field in [
            "127.0.0.1",
            "169.254.0.0/16",
            "0.0.0.0",
            "100.64.0.0/10",
            "192.0.2.0/24",
            "198.18.0.0/15",
            "224.0.0.1",
            "240.0.0.0/4",
            "255.255.255.255",
        ] {
            let findings = run(field);
            assert_eq!(findings.len(), 1, "{field}");
            assert_eq!(findings[0].violation, Violation::NotGlobal, "{field}");
        }
    }

    #[test]
    fn special_purpose_ipv6_is_not_global() {
        for field in [
            "::",
            "::1",
            "fe80::1",
            "fc00::/7",
            "fd12:3456::/32",
            "ff02::1",
            "2001:db8::/32",
            "2001:2::/48",
            "::ffff:10.0.0.1",
        ] {
            let findings = run(field);
            assert_eq!(findings.len(), 1, "{field}");
            assert_eq!(findings[0].violation, Violation::NotGlobal, "{field}");
        }
    }

    #[test]
    fn malformed_subnet_reports_invalid_address() {
        for field in ["not-an-ip", "1.2.3.4/33", "1.2.3/24", "2001:db8::/129", "/24"] {
            let findings = run(field);
            assert_eq!(findings.len(), 1, "{field}");
            assert!(
                matches!(findings[0].violation, Violation::InvalidAddress(_)),
                "{field}: {:?}",
                findings[0].violation
            );
        }
    }

    #[test]
    fn invalid_and_not_global_never_both_fire() {
        for field in ["10.0.0.0/8", "garbage", "8.8.8.0/24"] {
            assert!(run(field).len() <= 1, "{field}");
        }
    }
}
