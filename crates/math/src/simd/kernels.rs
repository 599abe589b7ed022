use core::simd::{Simd, prelude::*};

use crate::{Q, reduce::QINV};

/// Montgomery reduction: `a * R^{-1} mod q`, `R = 2^{16}`.
///
/// Lane-for-lane identical to [`crate::reduce::montgomery_reduce`] over the
/// same input range.
#[inline]
#[must_use]
pub fn montgomery_reduce_vec<const L: usize>(a: Simd<i32, L>) -> Simd<i16, L> {
    let qinv = Simd::<i32, L>::splat(QINV as i32);
    let q = Simd::<i32, L>::splat(Q as i32);
    let s16 = Simd::splat(16);
    // Sign-extend the low halves: the i16 wrapping product of the scalar path.
    let a_lo = (a << s16) >> s16;
    let t = ((a_lo * qinv) << s16) >> s16;
    ((a - t * q) >> s16).cast::<i16>()
}

/// Field multiply: `a * b * R^{-1} mod q`.
#[inline]
#[must_use]
pub fn fqmul_vec<const L: usize>(a: Simd<i16, L>, b: Simd<i16, L>) -> Simd<i16, L> {
    montgomery_reduce_vec(a.cast::<i32>() * b.cast::<i32>())
}

/// `(-q, q) -> [0, q)` by masked add.
#[inline]
#[must_use]
pub fn caddq_vec<const L: usize>(a: Simd<i16, L>) -> Simd<i16, L> {
    a + ((a >> Simd::splat(15)) & Simd::splat(Q))
}

/// `[0, 2q) -> [0, q)` by masked subtract.
#[inline]
#[must_use]
pub fn csubq_vec<const L: usize>(a: Simd<i16, L>) -> Simd<i16, L> {
    caddq_vec(a - Simd::splat(Q))
}

/// Barrett reduction into `[0, q)` for any `i16` lane.
#[inline]
#[must_use]
pub fn barrett_reduce_vec<const L: usize>(a: Simd<i16, L>) -> Simd<i16, L> {
    const V: i32 = 20159;
    let aw: Simd<i32, L> = a.cast();
    let t =
        ((Simd::<i32, L>::splat(V) * aw + Simd::splat(1 << 25)) >> Simd::splat(26)).cast::<i16>();
    caddq_vec(a - t * Simd::splat(Q))
}
