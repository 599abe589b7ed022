//! Montgomery and Barrett modular reduction for the Kyber field (q = 3329).
//!
//! Every routine here is branch-free: conditional corrections are applied
//! through sign masks so timing does not depend on coefficient values.

use crate::Q;

/// q^{-1} mod 2^{16} (62209 as `u16`).
pub const QINV: i16 = -3327;

/// 2^{16} mod q (Montgomery radix residue).
pub const MONT: i16 = ((1i32 << 16) % Q as i32) as i16;

/// 2^{32} mod q; `fqmul(a, R2) = a * R mod q` leaves the Montgomery domain.
pub const R2: i16 = ((1u64 << 32) % Q as u64) as i16;

/// Barrett multiplier `round(2^26 / q)`.
const BARRETT_V: i32 = ((1i32 << 26) + Q as i32 / 2) / Q as i32;

/// Montgomery reduction: computes `a * R^{-1} mod q` where R = 2^{16}.
///
/// Input: `a in {-q*2^{15}, ..., q*2^{15} - 1}`. Output: `r in {-q+1, ...,
/// q-1}` with `r \equiv a*R^{-1} (mod q)`. Callers that need `[0, q)` follow
/// with [`caddq`].
#[inline]
#[must_use]
pub const fn montgomery_reduce(a: i32) -> i16 {
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (Q as i32)) >> 16) as i16
}

/// Barrett reduction into the canonical range.
///
/// Accepts every `i16`. Output: `r in {0, ..., q-1}` with `r \equiv a (mod q)`.
#[inline]
#[must_use]
pub const fn barrett_reduce(a: i16) -> i16 {
    let t = ((BARRETT_V * (a as i32) + (1 << 25)) >> 26) as i16;
    caddq(a.wrapping_sub(t.wrapping_mul(Q)))
}

/// Add q when `a` is negative: `(-q, q) -> [0, q)`.
#[inline]
#[must_use]
pub const fn caddq(a: i16) -> i16 {
    a.wrapping_add((a >> 15) & Q)
}

/// Subtract q when `a >= q`: `[0, 2q) -> [0, q)`.
#[inline]
#[must_use]
pub const fn csubq(a: i16) -> i16 {
    caddq(a.wrapping_sub(Q))
}

/// Field multiplication followed by Montgomery reduction: `a*b*R^{-1} mod q`.
#[inline]
#[must_use]
pub const fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce((a as i32) * (b as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q32: i32 = Q as i32;

    fn canonical(a: i64) -> i16 {
        a.rem_euclid(Q as i64) as i16
    }

    #[test]
    fn constants_match_parameter_set() {
        assert_eq!(QINV as u16, 62209);
        assert_eq!((Q as i32 * QINV as i32) & 0xffff, 1);
        assert_eq!(MONT, 2285);
        assert_eq!(R2, 1353);
        assert_eq!(BARRETT_V, 20159);
    }

    #[test]
    fn montgomery_reduce_of_zero() {
        assert_eq!(montgomery_reduce(0), 0);
    }

    #[test]
    fn montgomery_reduce_congruence_and_bound() {
        // R^{-1} mod q, recovered from MONT * R^{-1} = 1.
        let rinv = (1..Q as i64)
            .find(|x| (x * MONT as i64).rem_euclid(Q as i64) == 1)
            .unwrap();
        let lo = -Q32 * (1 << 15);
        let hi = Q32 * (1 << 15) - 1;
        let mut a = lo;
        while a < hi {
            let r = montgomery_reduce(a);
            assert!(r > -Q && r < Q, "out of bound for {a}: {r}");
            assert_eq!(canonical(r as i64), canonical(a as i64 * rinv), "a = {a}");
            a += 7919;
        }
        for a in [lo, hi, Q32 * Q32, -Q32 * Q32, 1, -1] {
            let r = montgomery_reduce(a);
            assert!(r > -Q && r < Q);
            assert_eq!(canonical(r as i64), canonical(a as i64 * rinv));
        }
    }

    #[test]
    fn barrett_reduce_exhaustive() {
        for a in i16::MIN..=i16::MAX {
            let r = barrett_reduce(a);
            assert!((0..Q).contains(&r), "barrett({a}) = {r}");
            assert_eq!(r, canonical(a as i64), "barrett({a})");
        }
    }

    #[test]
    fn barrett_reduce_wraps() {
        assert_eq!(barrett_reduce(Q), 0);
        assert_eq!(barrett_reduce(-Q), 0);
        assert_eq!(barrett_reduce(2 * Q - 1), Q - 1);
    }

    #[test]
    fn caddq_and_csubq_canonicalise() {
        for a in (-Q + 1)..Q {
            assert_eq!(caddq(a), canonical(a as i64));
        }
        for a in 0..2 * Q {
            assert_eq!(csubq(a), canonical(a as i64));
        }
    }

    #[test]
    fn fqmul_mont_identity() {
        // fqmul(a, MONT) = a * MONT * R^-1 = a mod q
        for a in [0, 1, 17, Q - 1] {
            assert_eq!(caddq(fqmul(a, MONT)), a);
        }
    }

    #[test]
    fn fqmul_r2_leaves_montgomery_domain() {
        // (a * R^-1) * R2 * R^-1 = a
        for a in [1i16, 2, 1000, Q - 1] {
            let m = caddq(fqmul(a, 1));
            assert_eq!(caddq(fqmul(m, R2)), a);
        }
    }
}
