//! Address classification and netmask conversions.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::AddressFamily;

/// Returns true if the address is reserved for non-globally-routable use.
///
/// IPv4: `10.0.0.0/8`, `172.16.0.0/12`, `192.168.0.0/16` (RFC 1918).
/// IPv6: `fc00::/7` unique local addresses (RFC 4193). IPv4-mapped IPv6
/// addresses (`::ffff:a.b.c.d`) are judged by their IPv4 part.
#[must_use]
pub const fn is_private(address: IpAddr) -> bool {
    match address.to_canonical() {
        IpAddr::V4(v4) => v4.is_private(),
        IpAddr::V6(v6) => (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}

/// Parses operator input as an IPv4 or IPv6 address.
///
/// Surrounding whitespace is ignored.
#[must_use]
pub fn parse_address(text: &str) -> Option<IpAddr> {
    text.trim().parse().ok()
}

/// Builds the address-shaped netmask for a prefix length.
///
/// Returns `None` if the prefix is longer than the family allows.
#[must_use]
pub fn mask_from_prefix(family: AddressFamily, prefix: u8) -> Option<IpAddr> {
    match family {
        AddressFamily::Inet if prefix <= 32 => {
            let bits = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
            Some(IpAddr::V4(Ipv4Addr::from(bits)))
        }
        AddressFamily::Inet6 if prefix <= 128 => {
            let bits = u128::MAX.checked_shl(128 - u32::from(prefix)).unwrap_or(0);
            Some(IpAddr::V6(Ipv6Addr::from(bits)))
        }
        _ => None,
    }
}

/// Returns the prefix length of a contiguous netmask.
///
/// Returns `None` if the mask has holes (e.g., `255.0.255.0`).
#[must_use]
#[allow(clippy::cast_possible_truncation)] // at most 128
pub const fn prefix_len(mask: IpAddr) -> Option<u8> {
    let (ones, zeros, width) = match mask {
        IpAddr::V4(v4) => {
            let bits = v4.to_bits();
            (bits.leading_ones(), bits.trailing_zeros(), 32)
        }
        IpAddr::V6(v6) => {
            let bits = v6.to_bits();
            (bits.leading_ones(), bits.trailing_zeros(), 128)
        }
    };
    if ones + zeros == width {
        Some(ones as u8)
    } else {
        None
    }
}
