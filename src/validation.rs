//! Field validators applied before a request is built

use std::net::Ipv4Addr;

/// Non-empty string
pub fn valid_string(value: &str) -> bool {
    !value.is_empty()
}

/// Optional string that, when present, is non-empty
pub fn valid_optional_string(value: Option<&str>) -> bool {
    value.map_or(false, valid_string)
}

/// Resource identifier: one or more of `[A-Za-z0-9-._]`
pub fn valid_string_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
}

/// IPv4 address or IPv4 CIDR block (`10.0.0.0/8`)
pub fn valid_ipv4_or_cidr(value: &str) -> bool {
    match value.split_once('/') {
        Some((addr, prefix)) => {
            addr.parse::<Ipv4Addr>().is_ok()
                && !prefix.is_empty()
                && prefix.chars().all(|c| c.is_ascii_digit())
                && prefix.parse::<u8>().map_or(false, |p| p <= 32)
        }
        None => value.parse::<Ipv4Addr>().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_string() {
        assert!(valid_string("a"));
        assert!(!valid_string(""));
        assert!(valid_optional_string(Some("x")));
        assert!(!valid_optional_string(Some("")));
        assert!(!valid_optional_string(None));
    }

    #[test]
    fn test_valid_string_id() {
        assert!(valid_string_id("ws-abc123"));
        assert!(valid_string_id("env_1.prod"));
        assert!(!valid_string_id(""));
        assert!(!valid_string_id("ws/../etc"));
        assert!(!valid_string_id("has space"));
        assert!(!valid_string_id("q?x=1"));
    }

    #[test]
    fn test_valid_ipv4_or_cidr() {
        assert!(valid_ipv4_or_cidr("192.168.0.1"));
        assert!(valid_ipv4_or_cidr("10.0.0.0/8"));
        assert!(valid_ipv4_or_cidr("0.0.0.0/0"));
        assert!(!valid_ipv4_or_cidr("10.0.0.0/33"));
        assert!(!valid_ipv4_or_cidr("10.0.0.0/"));
        assert!(!valid_ipv4_or_cidr("10.0.0/8"));
        assert!(!valid_ipv4_or_cidr("::1"));
        assert!(!valid_ipv4_or_cidr("example.com"));
    }
}
