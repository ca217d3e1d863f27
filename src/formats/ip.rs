//! IP address formats. The standard library parsers implement the strict
//! grammar already: no leading zeros, no CIDR suffixes, no zone identifiers.
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

pub(crate) fn is_valid_ipv4(value: &str) -> bool {
    Ipv4Addr::from_str(value).is_ok()
}

pub(crate) fn is_valid_ipv6(value: &str) -> bool {
    Ipv6Addr::from_str(value).is_ok()
}
