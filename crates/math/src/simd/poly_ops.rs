use core::simd::{Simd, prelude::*};

use super::{
    LANES,
    kernels::{caddq_vec, fqmul_vec, montgomery_reduce_vec},
};
use crate::{
    N,
    ntt::GAMMAS,
    reduce::{R2, caddq, fqmul, montgomery_reduce},
};

/// Multiply by `R` to cancel one Montgomery factor, canonical output.
#[inline]
const fn from_montgomery(a: i16) -> i16 {
    caddq(fqmul(a, R2))
}

/// Product of `a0 + a1·X` and `b0 + b1·X` in `Z_q[X]/(X^2 - γ)`.
///
/// `gamma` is `γ·R mod q`. Inputs in `[0, q)`; both accumulators stay below
/// `2q²`, well inside the Montgomery input range. Output in `[0, q)`.
#[inline]
#[must_use]
pub const fn basemul_pair(a0: i16, a1: i16, b0: i16, b1: i16, gamma: i16) -> (i16, i16) {
    // a1·b1·R^{-1}, times γ·R below gives a plain a1·b1·γ.
    let t = caddq(fqmul(a1, b1));
    let r0 = montgomery_reduce((a0 as i32) * (b0 as i32) + (t as i32) * (gamma as i32));
    let r1 = montgomery_reduce((a0 as i32) * (b1 as i32) + (a1 as i32) * (b0 as i32));
    (from_montgomery(caddq(r0)), from_montgomery(caddq(r1)))
}

pub(super) fn basemul_scalar(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
    let mut r = [0i16; N];
    for (i, ((rp, ap), bp)) in (r.as_chunks_mut::<2>().0)
        .iter_mut()
        .zip(a.as_chunks::<2>().0)
        .zip(b.as_chunks::<2>().0)
        .enumerate()
    {
        let (r0, r1) = basemul_pair(ap[0], ap[1], bp[0], bp[1], GAMMAS[i]);
        *rp = [r0, r1];
    }
    r
}

/// `LANES` sub-ring products per step: de-interleave the pairs into
/// `(c0, c1)` role vectors, multiply, re-interleave.
pub(super) fn basemul_batched(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
    const { assert!(N.is_multiple_of(2 * LANES)) }
    let mut r = [0i16; N];
    for pair in (0..N / 2).step_by(LANES) {
        let base = 2 * pair;

        let (a0, a1) = Simd::<i16, LANES>::from_slice(&a[base..])
            .deinterleave(Simd::from_slice(&a[base + LANES..]));
        let (b0, b1) = Simd::<i16, LANES>::from_slice(&b[base..])
            .deinterleave(Simd::from_slice(&b[base + LANES..]));
        let gamma = Simd::<i16, LANES>::from_slice(&GAMMAS[pair..]);

        let t = caddq_vec(fqmul_vec(a1, b1));
        let acc0 = a0.cast::<i32>() * b0.cast::<i32>() + t.cast::<i32>() * gamma.cast::<i32>();
        let acc1 = a0.cast::<i32>() * b1.cast::<i32>() + a1.cast::<i32>() * b0.cast::<i32>();

        let r2 = Simd::splat(R2);
        let r0 = caddq_vec(fqmul_vec(caddq_vec(montgomery_reduce_vec(acc0)), r2));
        let r1 = caddq_vec(fqmul_vec(caddq_vec(montgomery_reduce_vec(acc1)), r2));

        let (lo, hi) = r0.interleave(r1);
        lo.copy_to_slice(&mut r[base..]);
        hi.copy_to_slice(&mut r[base + LANES..]);
    }
    r
}

/// `c_i <- c_i * factor * R^{-1} mod q`, canonical output.
pub(super) fn scale_scalar(c: &mut [i16; N], factor: i16) {
    for x in c.iter_mut() {
        *x = caddq(fqmul(*x, factor));
    }
}

pub(super) fn scale_batched(c: &mut [i16; N], factor: i16) {
    let f = Simd::<i16, LANES>::splat(factor);
    for chunk in c.as_chunks_mut::<LANES>().0 {
        *chunk = caddq_vec(fqmul_vec(Simd::from_array(*chunk), f)).into();
    }
}
