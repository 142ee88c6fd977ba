//! Scalar parsing, formatting, and random-instance helpers.

use num_bigint::BigUint;
use rand_core::{OsRng, RngCore};

/// Parses a hex scalar, tolerating an optional `0x` prefix.
pub fn parse_scalar_hex(text: &str) -> Option<BigUint> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), 16)
}

/// Fixed-width 64-digit hex, the external reporting format for private keys.
pub fn scalar_to_hex(scalar: &BigUint) -> String {
    format!("{:064x}", scalar)
}

/// Big-endian 32-byte encoding, left-padded with zeros. The caller keeps
/// scalars below the group order, so they always fit.
pub fn scalar_to_32_bytes(scalar: &BigUint) -> [u8; 32] {
    let be = scalar.to_bytes_be();
    debug_assert!(be.len() <= 32);
    let mut out = [0u8; 32];
    out[32 - be.len()..].copy_from_slice(&be);
    out
}

/// Scalar drawn uniformly from `[0, limit)`. The 64 bits of slack over a
/// 256-bit limit make the modulo bias negligible for tests and benches.
pub fn random_scalar_below(limit: &BigUint) -> BigUint {
    let mut buf = [0u8; 40];
    OsRng.fill_bytes(&mut buf);
    BigUint::from_bytes_be(&buf) % limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        assert_eq!(parse_scalar_hex("ff"), Some(BigUint::from(255u32)));
        assert_eq!(parse_scalar_hex("0xff"), Some(BigUint::from(255u32)));
        assert_eq!(parse_scalar_hex("80000"), Some(BigUint::from(0x80000u32)));
        assert_eq!(parse_scalar_hex(""), None);
        assert_eq!(parse_scalar_hex("xyz"), None);
    }

    #[test]
    fn formats_to_sixty_four_digits() {
        let formatted = scalar_to_hex(&BigUint::from(0x9abcdu32));
        assert_eq!(formatted.len(), 64);
        assert!(formatted.ends_with("9abcd"));
        assert!(formatted.starts_with("000"));
    }

    #[test]
    fn hex_round_trips_through_bytes() {
        let scalar = BigUint::from(0xd2c55u32);
        let bytes = scalar_to_32_bytes(&scalar);
        assert_eq!(BigUint::from_bytes_be(&bytes), scalar);
        assert_eq!(hex::encode(bytes), scalar_to_hex(&scalar));
    }

    #[test]
    fn random_scalars_respect_the_limit() {
        let limit = BigUint::from(1u32) << 20;
        for _ in 0..100 {
            assert!(random_scalar_below(&limit) < limit);
        }
    }
}
