use core::simd::Simd;

use super::{
    LANES,
    kernels::{barrett_reduce_vec, caddq_vec, csubq_vec, fqmul_vec},
};
use crate::reduce::{barrett_reduce, caddq, csubq, fqmul};

/// Cooley–Tukey butterfly on one coefficient pair.
///
/// `(lo, hi) <- (lo + t, lo - t)` with `t = zeta * hi * R^{-1}`, all three in
/// `[0, q)`.
#[inline]
#[must_use]
pub const fn forward_pair(lo: i16, hi: i16, zeta: i16) -> (i16, i16) {
    let t = caddq(fqmul(zeta, hi));
    (csubq(lo + t), caddq(lo - t))
}

/// Gentleman–Sande butterfly on one coefficient pair.
///
/// `(lo, hi) <- (lo + hi, zeta * (lo - hi) * R^{-1})`, both in `[0, q)`.
#[inline]
#[must_use]
pub const fn inverse_pair(lo: i16, hi: i16, zeta: i16) -> (i16, i16) {
    (barrett_reduce(lo + hi), caddq(fqmul(zeta, lo - hi)))
}

/// Vector form of [`forward_pair`] with a twiddle per lane.
#[inline]
#[must_use]
pub fn forward_vec<const L: usize>(
    lo: Simd<i16, L>,
    hi: Simd<i16, L>,
    zeta: Simd<i16, L>,
) -> (Simd<i16, L>, Simd<i16, L>) {
    let t = caddq_vec(fqmul_vec(zeta, hi));
    (csubq_vec(lo + t), caddq_vec(lo - t))
}

/// Vector form of [`inverse_pair`] with a twiddle per lane.
#[inline]
#[must_use]
pub fn inverse_vec<const L: usize>(
    lo: Simd<i16, L>,
    hi: Simd<i16, L>,
    zeta: Simd<i16, L>,
) -> (Simd<i16, L>, Simd<i16, L>) {
    (barrett_reduce_vec(lo + hi), caddq_vec(fqmul_vec(zeta, lo - hi)))
}

pub(super) fn forward_scalar(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
    debug_assert_eq!(lo.len(), hi.len());
    for (l, h) in lo.iter_mut().zip(hi.iter_mut()) {
        (*l, *h) = forward_pair(*l, *h, zeta);
    }
}

pub(super) fn inverse_scalar(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
    debug_assert_eq!(lo.len(), hi.len());
    for (l, h) in lo.iter_mut().zip(hi.iter_mut()) {
        (*l, *h) = inverse_pair(*l, *h, zeta);
    }
}

/// One forward layer block: `LANES` pairs per step, scalar tail for the
/// narrow layers (len 4 and 2).
pub(super) fn forward_batched(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
    debug_assert_eq!(lo.len(), hi.len());
    let z = Simd::<i16, LANES>::splat(zeta);
    let (lo_chunks, lo_tail) = lo.as_chunks_mut::<LANES>();
    let (hi_chunks, hi_tail) = hi.as_chunks_mut::<LANES>();
    for (l, h) in lo_chunks.iter_mut().zip(hi_chunks.iter_mut()) {
        let (a, b) = forward_vec(Simd::from_array(*l), Simd::from_array(*h), z);
        *l = a.into();
        *h = b.into();
    }
    forward_scalar(lo_tail, hi_tail, zeta);
}

/// One inverse layer block: `LANES` pairs per step, scalar tail.
pub(super) fn inverse_batched(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
    debug_assert_eq!(lo.len(), hi.len());
    let z = Simd::<i16, LANES>::splat(zeta);
    let (lo_chunks, lo_tail) = lo.as_chunks_mut::<LANES>();
    let (hi_chunks, hi_tail) = hi.as_chunks_mut::<LANES>();
    for (l, h) in lo_chunks.iter_mut().zip(hi_chunks.iter_mut()) {
        let (a, b) = inverse_vec(Simd::from_array(*l), Simd::from_array(*h), z);
        *l = a.into();
        *h = b.into();
    }
    inverse_scalar(lo_tail, hi_tail, zeta);
}
