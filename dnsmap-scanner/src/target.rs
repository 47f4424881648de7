//! Target classification: a target is either a domain name or an IP address,
//! distinguished structurally.

use crate::discovery::DiscoveryKind;
use std::net::IpAddr;
use std::str::FromStr;

/// Returns true if the value parses as an IPv4 or IPv6 address.
pub fn is_valid_ip(value: &str) -> bool {
    IpAddr::from_str(value).is_ok()
}

/// Returns true if the value looks like a valid domain name: at most 253
/// characters, at least two labels, each label non-empty, at most 63
/// characters and starting with an alphanumeric character. IP addresses are
/// never domains, even though dotted quads pass the label rules.
pub fn is_valid_domain(value: &str) -> bool {
    if value.is_empty() || value.len() > 253 || is_valid_ip(value) {
        return false;
    }

    let trimmed = value.trim_end_matches('.');
    let labels: Vec<&str> = trimmed.split('.').collect();

    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && label
                    .chars()
                    .next()
                    .map(|c| c.is_ascii_alphanumeric())
                    .unwrap_or(false)
        })
}

/// Classifies a raw target string. IP parsing wins over domain rules, so a
/// value like "1.2.3.4" is always an IP.
pub fn classify(value: &str) -> Option<DiscoveryKind> {
    if is_valid_ip(value) {
        Some(DiscoveryKind::Ip)
    } else if is_valid_domain(value) {
        Some(DiscoveryKind::Domain)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ipv4() {
        assert!(is_valid_ip("192.168.1.1"));
        assert!(is_valid_ip("8.8.8.8"));
        assert!(is_valid_ip("255.255.255.255"));
    }

    #[test]
    fn test_valid_ipv6() {
        assert!(is_valid_ip("2001:db8::1"));
        assert!(is_valid_ip("::1"));
    }

    #[test]
    fn test_invalid_ip() {
        assert!(!is_valid_ip("256.1.1.1"));
        assert!(!is_valid_ip("example.com"));
        assert!(!is_valid_ip(""));
    }

    #[test]
    fn test_valid_domain() {
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("a.b.c.gouv.fr"));
        assert!(is_valid_domain("example.com."));
        assert!(is_valid_domain("xn--bcher-kva.example"));
    }

    #[test]
    fn test_invalid_domain() {
        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain("localhost"));
        assert!(!is_valid_domain("1.2.3.4"));
        assert!(!is_valid_domain("-bad.example.com"));
        assert!(!is_valid_domain("a..com"));

        let too_long = format!("{}.com", "a".repeat(252));
        assert!(!is_valid_domain(&too_long));

        let long_label = format!("{}.com", "a".repeat(64));
        assert!(!is_valid_domain(&long_label));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("1.2.3.4"), Some(DiscoveryKind::Ip));
        assert_eq!(classify("example.com"), Some(DiscoveryKind::Domain));
        assert_eq!(classify("not a target"), None);
    }
}
