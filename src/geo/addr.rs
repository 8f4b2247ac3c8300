use std::net::Ipv4Addr;

use super::GeoError;

/// 点分十进制 IPv4 → 32 位整数（大端，(o1<<24)|(o2<<16)|(o3<<8)|o4）
pub fn ip_to_u32(s: &str) -> Result<u32, GeoError> {
    let addr: Ipv4Addr = s
        .trim()
        .parse()
        .map_err(|_| GeoError::InvalidAddress(s.to_string()))?;
    Ok(u32::from(addr))
}

/// 32 位整数 → 规范点分十进制
pub fn u32_to_ip(n: u32) -> String {
    Ipv4Addr::from(n).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_big_endian() {
        assert_eq!(ip_to_u32("0.0.0.0").unwrap(), 0);
        assert_eq!(ip_to_u32("1.0.0.0").unwrap(), 1 << 24);
        assert_eq!(ip_to_u32("1.2.3.4").unwrap(), (1 << 24) | (2 << 16) | (3 << 8) | 4);
        assert_eq!(ip_to_u32("255.255.255.255").unwrap(), u32::MAX);
    }

    #[test]
    fn round_trips_canonical_quads() {
        for s in ["0.0.0.0", "1.0.0.128", "10.20.30.40", "203.0.113.7", "255.255.255.255"] {
            assert_eq!(u32_to_ip(ip_to_u32(s).unwrap()), s);
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for s in [
            "",
            "1.2.3",
            "1.2.3.4.5",
            "256.0.0.1",
            "1.2.3.-4",
            "a.b.c.d",
            "01.2.3.4",
            "1.2.3.4 extra",
            "::1",
        ] {
            assert!(matches!(ip_to_u32(s), Err(GeoError::InvalidAddress(_))), "accepted: {s:?}");
        }
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(ip_to_u32(" 1.2.3.4 ").unwrap(), ip_to_u32("1.2.3.4").unwrap());
    }
}
