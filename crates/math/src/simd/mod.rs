//! Scalar and 8-lane batched reduction strategies.
//!
//! Both strategies implement [`ReductionStrategy`] and must agree bit for
//! bit. [`Batched`] runs Montgomery/Barrett reduction and the transform
//! butterflies on `core::simd` vectors of [`LANES`] coefficients, falling back
//! to the scalar routines for blocks narrower than a vector. The transforms in
//! [`crate::ntt`] pick a strategy through the process-wide switch
//! ([`set_strategy`]) or take one as a type parameter.

mod butterfly;
mod kernels;
mod poly_ops;

use core::{
    fmt::Display,
    simd::Simd,
    sync::atomic::{AtomicU8, Ordering},
};

pub use butterfly::{forward_pair, forward_vec, inverse_pair, inverse_vec};
pub use kernels::{
    barrett_reduce_vec, caddq_vec, csubq_vec, fqmul_vec, montgomery_reduce_vec,
};
pub use poly_ops::basemul_pair;

use crate::{N, reduce};

/// Coefficients per batched operation (8 x i16 = 128-bit).
pub const LANES: usize = 8;

/// Arithmetic back end for the transforms and base multiplication.
///
/// Every method is a pure function of its arguments. Implementations must
/// return identical results for identical inputs.
pub trait ReductionStrategy {
    /// Human-readable name, used in benchmark labels.
    const NAME: &'static str;

    /// Montgomery-reduce `LANES` accumulators independently.
    fn montgomery_reduce_lanes(a: [i32; LANES]) -> [i16; LANES];

    /// One forward butterfly per lane: lane `i` combines `lo[i]`, `hi[i]` with
    /// twiddle `zetas[i]`.
    fn butterfly_lanes(
        lo: [i16; LANES],
        hi: [i16; LANES],
        zetas: [i16; LANES],
    ) -> ([i16; LANES], [i16; LANES]);

    /// Forward butterflies over one block: `lo[j]` pairs with `hi[j]`.
    fn butterfly_forward(lo: &mut [i16], hi: &mut [i16], zeta: i16);

    /// Inverse butterflies over one block.
    fn butterfly_inverse(lo: &mut [i16], hi: &mut [i16], zeta: i16);

    /// Multiply every coefficient by `factor * R^{-1}`.
    fn scale(c: &mut [i16; N], factor: i16);

    /// NTT-domain product (128 sub-ring multiplications).
    fn basemul(a: &[i16; N], b: &[i16; N]) -> [i16; N];
}

/// One coefficient at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scalar;

/// [`LANES`] coefficients at a time on `core::simd` vectors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Batched;

impl ReductionStrategy for Scalar {
    const NAME: &'static str = "scalar";

    #[inline]
    fn montgomery_reduce_lanes(a: [i32; LANES]) -> [i16; LANES] {
        a.map(reduce::montgomery_reduce)
    }

    #[inline]
    fn butterfly_lanes(
        lo: [i16; LANES],
        hi: [i16; LANES],
        zetas: [i16; LANES],
    ) -> ([i16; LANES], [i16; LANES]) {
        let mut out_lo = [0i16; LANES];
        let mut out_hi = [0i16; LANES];
        for i in 0..LANES {
            (out_lo[i], out_hi[i]) = forward_pair(lo[i], hi[i], zetas[i]);
        }
        (out_lo, out_hi)
    }

    #[inline]
    fn butterfly_forward(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
        butterfly::forward_scalar(lo, hi, zeta);
    }

    #[inline]
    fn butterfly_inverse(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
        butterfly::inverse_scalar(lo, hi, zeta);
    }

    #[inline]
    fn scale(c: &mut [i16; N], factor: i16) {
        poly_ops::scale_scalar(c, factor);
    }

    #[inline]
    fn basemul(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
        poly_ops::basemul_scalar(a, b)
    }
}

impl ReductionStrategy for Batched {
    const NAME: &'static str = "batched";

    #[inline]
    fn montgomery_reduce_lanes(a: [i32; LANES]) -> [i16; LANES] {
        montgomery_reduce_vec(Simd::from_array(a)).into()
    }

    #[inline]
    fn butterfly_lanes(
        lo: [i16; LANES],
        hi: [i16; LANES],
        zetas: [i16; LANES],
    ) -> ([i16; LANES], [i16; LANES]) {
        let (l, h) = forward_vec(
            Simd::from_array(lo),
            Simd::from_array(hi),
            Simd::from_array(zetas),
        );
        (l.into(), h.into())
    }

    #[inline]
    fn butterfly_forward(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
        butterfly::forward_batched(lo, hi, zeta);
    }

    #[inline]
    fn butterfly_inverse(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
        butterfly::inverse_batched(lo, hi, zeta);
    }

    #[inline]
    fn scale(c: &mut [i16; N], factor: i16) {
        poly_ops::scale_batched(c, factor);
    }

    #[inline]
    fn basemul(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
        poly_ops::basemul_batched(a, b)
    }
}

/// Runtime-selectable strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Strategy {
    Scalar  = 0,
    Batched = 1,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Scalar => write!(f, "{}", Scalar::NAME),
            Self::Batched => write!(f, "{}", Batched::NAME),
        }
    }
}

impl From<u8> for Strategy {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Scalar,
            1 => Self::Batched,
            _ => unreachable!(),
        }
    }
}

static STRATEGY: AtomicU8 = AtomicU8::new(Strategy::Batched as u8);

/// Set the global strategy used by [`crate::ntt::forward_ntt`],
/// [`crate::ntt::inverse_ntt`] and [`crate::ntt::basemul`].
pub fn set_strategy(s: Strategy) {
    STRATEGY.store(s as u8, Ordering::Relaxed);
}

#[must_use]
pub fn strategy() -> Strategy {
    STRATEGY.load(Ordering::Relaxed).into()
}

/// Dispatch a generic `fn<S: ReductionStrategy>(...)` over the runtime
/// strategy.
macro_rules! dispatch_strategy {
    ($fn:ident ( $($arg:expr),* $(,)? )) => {
        match $crate::simd::strategy() {
            $crate::simd::Strategy::Scalar => $fn::<$crate::simd::Scalar>($($arg),*),
            $crate::simd::Strategy::Batched => $fn::<$crate::simd::Batched>($($arg),*),
        }
    };
}
pub(crate) use dispatch_strategy;
