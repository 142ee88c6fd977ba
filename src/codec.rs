//! Compressed public-key encoding: 1-byte parity prefix (`02` even y,
//! `03` odd y) followed by the 32-byte big-endian x coordinate, hex-encoded.

use crate::curve::{CurveGroup, CurvePoint};
use crate::error::{DlogError, Result};
use num_bigint::BigUint;
use num_traits::Zero;

const COMPRESSED_HEX_LEN: usize = 66;

/// Reconstructs the full affine point from its compressed encoding.
///
/// Fails with `MalformedKey` on a bad length, prefix, or non-hex input, and
/// with `InvalidPoint` when the x coordinate has no matching y on the curve.
pub fn decompress_public_key(group: &CurveGroup, encoded: &str) -> Result<CurvePoint> {
    if encoded.len() != COMPRESSED_HEX_LEN {
        return Err(DlogError::MalformedKey(format!(
            "expected {} hex characters, got {}",
            COMPRESSED_HEX_LEN,
            encoded.len()
        )));
    }
    let bytes = hex::decode(encoded)
        .map_err(|_| DlogError::MalformedKey("not valid hex".to_string()))?;
    let prefix = bytes[0];
    if prefix != 0x02 && prefix != 0x03 {
        return Err(DlogError::MalformedKey(format!(
            "invalid parity prefix {:02x}",
            prefix
        )));
    }

    let x = BigUint::from_bytes_be(&bytes[1..]);
    if x >= group.p {
        return Err(DlogError::InvalidPoint(
            "x coordinate is not a field element".to_string(),
        ));
    }

    let y_squared = (&x * &x * &x + &group.a * &x + &group.b) % &group.p;
    let root = group.mod_sqrt(&y_squared).ok_or_else(|| {
        DlogError::InvalidPoint(format!("{:x} has no point on the curve", x))
    })?;

    let want_odd = prefix == 0x03;
    if root.is_zero() && want_odd {
        // y = 0 has a single, even representation
        return Err(DlogError::InvalidPoint(format!(
            "{:x} has no odd-parity point",
            x
        )));
    }
    let y = if root.bit(0) == want_odd {
        root
    } else {
        &group.p - &root
    };
    Ok(CurvePoint::Affine { x, y })
}

/// The 33-byte compressed encoding of an affine point.
pub fn compressed_key_bytes(point: &CurvePoint) -> Result<[u8; 33]> {
    match point {
        CurvePoint::Infinity => Err(DlogError::InvalidPoint(
            "the point at infinity has no compressed encoding".to_string(),
        )),
        CurvePoint::Affine { x, y } => {
            let mut out = [0u8; 33];
            out[0] = if y.bit(0) { 0x03 } else { 0x02 };
            let be = x.to_bytes_be();
            out[33 - be.len()..].copy_from_slice(&be);
            Ok(out)
        }
    }
}

/// Hex form of [`compressed_key_bytes`], the inverse of
/// [`decompress_public_key`].
pub fn compress_public_key(point: &CurvePoint) -> Result<String> {
    Ok(hex::encode(compressed_key_bytes(point)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils;

    const GENERATOR_COMPRESSED: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const TWO_G_COMPRESSED: &str =
        "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";

    #[test]
    fn decompresses_the_generator() {
        let group = CurveGroup::secp256k1();
        let point = decompress_public_key(&group, GENERATOR_COMPRESSED).unwrap();
        assert_eq!(point, group.g);
    }

    #[test]
    fn odd_prefix_selects_the_reflected_root() {
        let group = CurveGroup::secp256k1();
        let flipped = format!("03{}", &GENERATOR_COMPRESSED[2..]);
        let point = decompress_public_key(&group, &flipped).unwrap();
        assert_eq!(point, group.negate(&group.g));
        assert!(group.is_on_curve(&point));
    }

    #[test]
    fn decompresses_two_g() {
        let group = CurveGroup::secp256k1();
        let point = decompress_public_key(&group, TWO_G_COMPRESSED).unwrap();
        assert_eq!(point, group.scalar_mul(&group.g, &BigUint::from(2u32)));
    }

    #[test]
    fn compress_then_decompress_round_trips() {
        let group = CurveGroup::secp256k1();
        for k in 1u32..=20 {
            let point = group.scalar_mul(&group.g, &BigUint::from(k));
            let encoded = compress_public_key(&point).unwrap();
            assert_eq!(encoded.len(), COMPRESSED_HEX_LEN);
            let decoded = decompress_public_key(&group, &encoded).unwrap();
            assert_eq!(decoded, point, "round trip failed for k={}", k);
        }
    }

    #[test]
    fn rejects_invalid_prefix() {
        let group = CurveGroup::secp256k1();
        let encoded = format!("01{}", "0".repeat(64));
        let err = decompress_public_key(&group, &encoded).unwrap_err();
        assert!(matches!(err, DlogError::MalformedKey(_)), "got {err}");
    }

    #[test]
    fn rejects_bad_length_and_non_hex() {
        let group = CurveGroup::secp256k1();
        assert!(matches!(
            decompress_public_key(&group, "02abcd").unwrap_err(),
            DlogError::MalformedKey(_)
        ));
        let non_hex = format!("02{}", "zz".repeat(32));
        assert!(matches!(
            decompress_public_key(&group, &non_hex).unwrap_err(),
            DlogError::MalformedKey(_)
        ));
    }

    #[test]
    fn rejects_x_beyond_the_field() {
        let group = CurveGroup::secp256k1();
        let encoded = format!("02{}", "f".repeat(64));
        assert!(matches!(
            decompress_public_key(&group, &encoded).unwrap_err(),
            DlogError::InvalidPoint(_)
        ));
    }

    // Roughly half of all x values are non-residues; over sixty samples both
    // outcomes show up with overwhelming probability.
    #[test]
    fn non_residue_x_fails_and_residue_x_lands_on_curve() {
        let group = CurveGroup::secp256k1();
        let mut on_curve = 0;
        let mut rejected = 0;
        for x in 1u32..=60 {
            let encoded = format!("02{}", utils::scalar_to_hex(&BigUint::from(x)));
            match decompress_public_key(&group, &encoded) {
                Ok(point) => {
                    assert!(group.is_on_curve(&point));
                    on_curve += 1;
                }
                Err(DlogError::InvalidPoint(_)) => rejected += 1,
                Err(other) => panic!("unexpected error kind: {other}"),
            }
        }
        assert!(on_curve > 0);
        assert!(rejected > 0);
    }
}
