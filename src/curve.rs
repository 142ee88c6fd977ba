//! Affine point arithmetic for short-Weierstrass curves over a prime field.
//!
//! The group context (field prime, coefficients, generator, order) is an
//! explicit immutable value passed by reference into every consumer, so tests
//! can substitute a small toy curve for the real secp256k1 parameters.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// A point on the curve: the group identity, or an affine pair with both
/// coordinates reduced modulo the field prime. Affine coordinates are
/// canonical, so the derived `Eq`/`Hash` make points usable as table keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CurvePoint {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl CurvePoint {
    pub fn affine(x: BigUint, y: BigUint) -> Self {
        CurvePoint::Affine { x, y }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, CurvePoint::Infinity)
    }
}

/// Immutable curve parameters: `y² = x³ + a·x + b` over `F_p`, with generator
/// `g` of order `n`.
#[derive(Clone, Debug)]
pub struct CurveGroup {
    pub p: BigUint,
    pub a: BigUint,
    pub b: BigUint,
    pub g: CurvePoint,
    pub n: BigUint,
}

fn hex_constant(digits: &str) -> BigUint {
    BigUint::parse_bytes(digits.as_bytes(), 16).expect("curve constant is valid hex")
}

impl CurveGroup {
    /// Builds a group context from raw parameters; the generator is given in
    /// affine coordinates and must lie on the curve.
    pub fn new(p: BigUint, a: BigUint, b: BigUint, gx: BigUint, gy: BigUint, n: BigUint) -> Self {
        let group = CurveGroup {
            p,
            a,
            b,
            g: CurvePoint::Affine { x: gx, y: gy },
            n,
        };
        debug_assert!(group.is_on_curve(&group.g));
        group
    }

    /// The secp256k1 context: `y² = x³ + 7` over `F_p`.
    pub fn secp256k1() -> Self {
        Self::new(
            hex_constant("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
            BigUint::zero(),
            BigUint::from(7u32),
            hex_constant("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
            hex_constant("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
            hex_constant("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
        )
    }

    pub fn is_on_curve(&self, point: &CurvePoint) -> bool {
        match point {
            CurvePoint::Infinity => true,
            CurvePoint::Affine { x, y } => {
                let lhs = (y * y) % &self.p;
                let rhs = (x * x * x + &self.a * x + &self.b) % &self.p;
                lhs == rhs
            }
        }
    }

    pub fn negate(&self, point: &CurvePoint) -> CurvePoint {
        match point {
            CurvePoint::Infinity => CurvePoint::Infinity,
            CurvePoint::Affine { x, y } => {
                let neg_y = if y.is_zero() { y.clone() } else { &self.p - y };
                CurvePoint::Affine {
                    x: x.clone(),
                    y: neg_y,
                }
            }
        }
    }

    /// Chord-and-tangent addition. Adding a point to its own negation yields
    /// the point at infinity.
    pub fn add(&self, lhs: &CurvePoint, rhs: &CurvePoint) -> CurvePoint {
        let (x1, y1) = match lhs {
            CurvePoint::Infinity => return rhs.clone(),
            CurvePoint::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match rhs {
            CurvePoint::Infinity => return lhs.clone(),
            CurvePoint::Affine { x, y } => (x, y),
        };
        if x1 == x2 {
            // same point (tangent case) or mirrored points summing to O
            if y1 == y2 {
                return self.double(lhs);
            }
            return CurvePoint::Infinity;
        }
        let slope =
            self.mod_sub(y2, y1) * mod_inverse(&self.mod_sub(x2, x1), &self.p) % &self.p;
        let x3 = self.mod_sub(&((&slope * &slope) % &self.p), &((x1 + x2) % &self.p));
        let y3 = self.mod_sub(&((&slope * self.mod_sub(x1, &x3)) % &self.p), y1);
        CurvePoint::Affine { x: x3, y: y3 }
    }

    pub fn double(&self, point: &CurvePoint) -> CurvePoint {
        let (x, y) = match point {
            CurvePoint::Infinity => return CurvePoint::Infinity,
            CurvePoint::Affine { x, y } => (x, y),
        };
        if y.is_zero() {
            // vertical tangent at a two-torsion point
            return CurvePoint::Infinity;
        }
        let tangent = (x * x * 3u32 + &self.a) % &self.p
            * mod_inverse(&((y * 2u32) % &self.p), &self.p)
            % &self.p;
        let x3 = self.mod_sub(&((&tangent * &tangent) % &self.p), &((x * 2u32) % &self.p));
        let y3 = self.mod_sub(&((&tangent * self.mod_sub(x, &x3)) % &self.p), y);
        CurvePoint::Affine { x: x3, y: y3 }
    }

    /// Double-and-add multiplication by a non-negative scalar.
    pub fn scalar_mul(&self, point: &CurvePoint, k: &BigUint) -> CurvePoint {
        let mut acc = CurvePoint::Infinity;
        if k.is_zero() {
            return acc;
        }
        for i in (0..k.bits()).rev() {
            acc = self.double(&acc);
            if k.bit(i) {
                acc = self.add(&acc, point);
            }
        }
        acc
    }

    /// Signed multiplication: a negative scalar negates the forward product,
    /// keeping the group-theoretic meaning explicit rather than leaning on
    /// integer sign semantics.
    pub fn mul_signed(&self, point: &CurvePoint, k: &BigInt) -> CurvePoint {
        let unsigned = self.scalar_mul(point, k.magnitude());
        if k.sign() == Sign::Minus {
            self.negate(&unsigned)
        } else {
            unsigned
        }
    }

    /// Square root modulo `p` via the `(p+1)/4` exponent shortcut; requires
    /// `p ≡ 3 (mod 4)`, which holds for secp256k1. Returns `None` when the
    /// value is a non-residue.
    pub(crate) fn mod_sqrt(&self, value: &BigUint) -> Option<BigUint> {
        let exponent = (&self.p + 1u32) / 4u32;
        let root = value.modpow(&exponent, &self.p);
        if (&root * &root) % &self.p == value % &self.p {
            Some(root)
        } else {
            None
        }
    }

    // operands already reduced below p
    fn mod_sub(&self, lhs: &BigUint, rhs: &BigUint) -> BigUint {
        ((&self.p + lhs) - rhs) % &self.p
    }
}

/// Modular inverse by the extended Euclidean algorithm. The caller only ever
/// inverts nonzero residues modulo a prime, so the gcd is 1.
fn mod_inverse(value: &BigUint, modulus: &BigUint) -> BigUint {
    let mut r0 = BigInt::from_biguint(Sign::Plus, modulus.clone());
    let mut r1 = BigInt::from_biguint(Sign::Plus, value % modulus);
    let mut t0 = BigInt::zero();
    let mut t1 = BigInt::one();
    while !r1.is_zero() {
        let q = &r0 / &r1;
        let r2 = &r0 - &q * &r1;
        r0 = r1;
        r1 = r2;
        let t2 = &t0 - &q * &t1;
        t0 = t1;
        t1 = t2;
    }
    let modulus_int = BigInt::from_biguint(Sign::Plus, modulus.clone());
    let reduced = ((t0 % &modulus_int) + &modulus_int) % &modulus_int;
    reduced
        .to_biguint()
        .expect("residue is non-negative after reduction")
}

#[cfg(test)]
mod tests {
    use super::*;

    // y² = x³ + 2x + 2 over F_17, generator (5, 1) of order 19
    fn toy_curve() -> CurveGroup {
        CurveGroup::new(
            BigUint::from(17u32),
            BigUint::from(2u32),
            BigUint::from(2u32),
            BigUint::from(5u32),
            BigUint::from(1u32),
            BigUint::from(19u32),
        )
    }

    #[test]
    fn generators_are_on_curve() {
        let toy = toy_curve();
        assert!(toy.is_on_curve(&toy.g));
        let secp = CurveGroup::secp256k1();
        assert!(secp.is_on_curve(&secp.g));
    }

    #[test]
    fn toy_doubling_matches_hand_computation() {
        let toy = toy_curve();
        let doubled = toy.add(&toy.g, &toy.g);
        assert_eq!(
            doubled,
            CurvePoint::affine(BigUint::from(6u32), BigUint::from(3u32))
        );
        assert_eq!(doubled, toy.double(&toy.g));
    }

    #[test]
    fn toy_generator_has_order_nineteen() {
        let toy = toy_curve();
        assert_eq!(toy.scalar_mul(&toy.g, &toy.n), CurvePoint::Infinity);
        // 20·G wraps around to G
        assert_eq!(toy.scalar_mul(&toy.g, &BigUint::from(20u32)), toy.g);
    }

    #[test]
    fn scalar_mul_matches_repeated_addition() {
        let toy = toy_curve();
        let mut expected = CurvePoint::Infinity;
        for k in 0u32..=19 {
            assert_eq!(toy.scalar_mul(&toy.g, &BigUint::from(k)), expected);
            assert!(toy.is_on_curve(&expected));
            expected = toy.add(&expected, &toy.g);
        }
    }

    #[test]
    fn addition_commutes() {
        let toy = toy_curve();
        let p = toy.scalar_mul(&toy.g, &BigUint::from(3u32));
        let q = toy.scalar_mul(&toy.g, &BigUint::from(7u32));
        assert_eq!(toy.add(&p, &q), toy.add(&q, &p));
    }

    #[test]
    fn point_plus_negation_is_infinity() {
        let toy = toy_curve();
        let p = toy.scalar_mul(&toy.g, &BigUint::from(5u32));
        assert_eq!(toy.add(&p, &toy.negate(&p)), CurvePoint::Infinity);

        let secp = CurveGroup::secp256k1();
        assert_eq!(
            secp.add(&secp.g, &secp.negate(&secp.g)),
            CurvePoint::Infinity
        );
    }

    #[test]
    fn infinity_is_the_identity() {
        let toy = toy_curve();
        assert_eq!(toy.add(&CurvePoint::Infinity, &toy.g), toy.g);
        assert_eq!(toy.add(&toy.g, &CurvePoint::Infinity), toy.g);
        assert!(toy
            .scalar_mul(&toy.g, &BigUint::zero())
            .is_infinity());
    }

    #[test]
    fn negative_scalar_negates_the_product() {
        let secp = CurveGroup::secp256k1();
        let forward = secp.scalar_mul(&secp.g, &BigUint::from(3u32));
        let backward = secp.mul_signed(&secp.g, &BigInt::from(-3));
        assert_eq!(backward, secp.negate(&forward));
        assert_eq!(secp.add(&forward, &backward), CurvePoint::Infinity);
    }

    #[test]
    fn secp256k1_double_of_generator_matches_known_vector() {
        let secp = CurveGroup::secp256k1();
        let doubled = secp.scalar_mul(&secp.g, &BigUint::from(2u32));
        assert_eq!(doubled, secp.add(&secp.g, &secp.g));
        assert!(secp.is_on_curve(&doubled));
        match &doubled {
            CurvePoint::Affine { x, .. } => assert_eq!(
                format!("{:x}", x),
                "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
            ),
            CurvePoint::Infinity => panic!("2G must be affine"),
        }
    }

    #[test]
    fn mod_sqrt_round_trips_residues() {
        let secp = CurveGroup::secp256k1();
        for k in 1u32..=10 {
            let square = (BigUint::from(k) * BigUint::from(k)) % &secp.p;
            let root = secp.mod_sqrt(&square).expect("perfect square has a root");
            assert_eq!((&root * &root) % &secp.p, square);
        }
    }
}
