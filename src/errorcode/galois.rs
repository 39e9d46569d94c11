//! This module contains the implementation of the GF(256) arithmetic used by
//! the Reed-Solomon codes in QR code symbols.
//!
//! An element of GF(256) is represented by an u8. Its bits correspond to the
//! coefficients of a degree 7 polynomial with the least significant bit being
//! the coefficient for 1. For example:
//!
//! > 29 = 0b00011101 = x^4 + x^3 + x^2 + 1.
//!
//! Addition is done coefficient by coefficient, which for coefficients in
//! GF(2) is just XOR.
//!
//! Multiplication is defined modulo a fixed polynomial. QR codes use the
//! polynomial 285 (0x11D), `x^8 + x^4 + x^3 + x^2 + 1`. With this choice x is a
//! generator, the powers 1, x, x^2, ..., x^254 run through all non-zero
//! elements and x^255 = 1 again.
//!
//! So any non-zero element can be identified with a power i of x, and
//! a * b = x^i * x^j = x^(i + j). The two lookup tables doing this
//! translation are called EXP and LOG in this module. They are computed
//! at compile time and therefore shared read-only by every caller.
use std::ops::{Add, Mul};

/// The irreducible polynomial used to reduce products.
const PRIMITIVE: u16 = 0x11D;

/// Compute the two lookup tables for GF(256).
const fn compute_exp_log() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut p: u16 = 1; // polynomial representation
    let mut i = 0; // power
    while i < 255 {
        exp[i] = p as u8;
        log[p as usize] = i as u8;

        // multiply by x, reduce if the top bit was set before the shift
        p <<= 1;
        if p & 0x100 != 0 {
            p ^= PRIMITIVE;
        }

        i += 1;
    }
    // x^255 = x^0, simplifies lookups of sums of two logs
    exp[255] = exp[0];
    (exp, log)
}

/// Lookup table to convert a power i of the generator x to the
/// polynomial representation.
const EXP: [u8; 256] = compute_exp_log().0;

/// Lookup table to convert an element in polynomial representation to
/// its power i of the generator x. `LOG[0]` is meaningless.
const LOG: [u8; 256] = compute_exp_log().1;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct GF(pub(crate) u8);

impl GF {
    /// Return x^i.
    pub(crate) fn primitive_power(i: usize) -> Self {
        GF(EXP[i % 255])
    }
}

impl std::fmt::Debug for GF {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{}₂₅₆", self.0))
    }
}

impl Add<GF> for GF {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self {
        GF(self.0 ^ rhs.0)
    }
}

impl Mul<GF> for GF {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return GF(0);
        }
        let ia = LOG[self.0 as usize] as usize;
        let ib = LOG[rhs.0 as usize] as usize;
        GF(EXP[(ia + ib) % 255])
    }
}

impl From<GF> for u8 {
    fn from(a: GF) -> u8 {
        a.0
    }
}

#[test]
fn sanity_check_tables() {
    use std::collections::HashSet;

    let exp: HashSet<u8> = EXP[..255].iter().cloned().collect();
    assert_eq!(exp.len(), 255);
    assert!(!exp.contains(&0));
    assert_eq!(EXP[255], EXP[0]);

    for i in 0..255 {
        assert_eq!(i, LOG[EXP[i] as usize] as usize);
        assert_eq!(i + 1, EXP[LOG[i + 1] as usize] as usize);
    }
}

#[test]
fn first_powers() {
    // x^8 = x^4 + x^3 + x^2 + 1 modulo 0x11D
    assert_eq!(&EXP[..10], &[1u8, 2, 4, 8, 16, 32, 64, 128, 29, 58]);
    assert_eq!(EXP[254], 142);
}

#[test]
fn gf256_mul() {
    assert_eq!(GF(123) * GF(1), GF(123));
    assert_eq!(GF(234) * GF(0), GF(0));
    assert_eq!(GF(0) * GF(23), GF(0));
    assert_eq!(GF(2) * GF(128), GF(29));
    assert_eq!(GF(2) * GF(4) * GF(8) * GF(16) * GF(32), GF::primitive_power(15));
}

#[test]
fn gf256_mul_laws() {
    for a in 0..=255u8 {
        assert_eq!(GF(a) * GF(0), GF(0));
        assert_eq!(GF(0) * GF(a), GF(0));
        assert_eq!(GF(a) * GF(1), GF(a));
        for b in 0..=255u8 {
            assert_eq!(GF(a) * GF(b), GF(b) * GF(a), "{} * {}", a, b);
        }
    }
}

#[test]
fn gf256_distributive() {
    for a in (0..=255u8).step_by(7) {
        for b in (0..=255u8).step_by(5) {
            for c in (0..=255u8).step_by(11) {
                assert_eq!(GF(a) * (GF(b) + GF(c)), GF(a) * GF(b) + GF(a) * GF(c));
            }
        }
    }
}

#[test]
fn test_power_wraps_around() {
    let mut a = GF(1);
    for i in 0..600 {
        assert_eq!(GF::primitive_power(i), a);
        a = a * GF(2);
    }
}
