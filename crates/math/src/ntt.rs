//! Number-Theoretic Transform and base multiplication in `Z_q[X]/(X^2 - γ)`.
//!
//! q - 1 = 2^8 * 13, so `Z_q` has a primitive 256th root of unity (ζ = 17)
//! but no 512th root. `X^256 + 1` splits into 128 quadratics `X^2 - γ_i` with
//! `γ_i = ζ^{2·BitRev₇(i)+1}`; the transform therefore runs 7 layers and
//! pointwise multiplication works on coefficient pairs.
//!
//! - [`forward_ntt`]: standard order -> bit-reversed pairs, canonical output.
//! - [`inverse_ntt`]: bit-reversed pairs -> standard order, scaled by 128⁻¹.
//! - [`basemul`]: 128 degree-1 products in the NTT domain.
//!
//! All three read and write coefficients in `[0, q)`. Inputs outside that
//! range are a caller error: nothing is validated and the output is
//! unspecified.

use crate::{
    N, Q,
    simd::{self, ReductionStrategy},
};

const Q64: i64 = Q as i64;

/// Montgomery radix 2^{16}.
const MONT: i64 = 1 << 16;

const fn pow_mod(mut base: i64, mut exp: i64, modulus: i64) -> i64 {
    let mut result: i64 = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        exp >>= 1;
        base = base * base % modulus;
    }
    result
}

pub(crate) const fn bitrev7(x: usize) -> usize {
    ((x >> 6) & 1)
        | (((x >> 5) & 1) << 1)
        | (((x >> 4) & 1) << 2)
        | (((x >> 3) & 1) << 3)
        | (((x >> 2) & 1) << 4)
        | (((x >> 1) & 1) << 5)
        | ((x & 1) << 6)
}

/// Primitive 256th root of unity modulo q.
pub const ZETA: i64 = 17;

/// Forward twiddles in Montgomery form, bit-reversed indexing.
///
/// `ZETAS[i] = ζ^{BitRev₇(i)} · 2¹⁶ (mod q)`, in `[0, q)`. Entry 0 is never
/// read; the forward pass walks indices 1..=127.
pub const ZETAS: [i16; 128] = {
    let mut zetas = [0i16; 128];
    let mut i = 0;
    while i < 128 {
        zetas[i] = (pow_mod(ZETA, bitrev7(i) as i64, Q64) * MONT % Q64) as i16;
        i += 1;
    }
    zetas
};

/// Inverse twiddles, in the order the inverse pass consumes them.
///
/// `ZETAS_INV[i] = -ZETAS[127 - i] = ζ^{-(BitRev₇(i)+1)} · 2¹⁶ (mod q)`, the
/// inverse of the forward twiddle `ZETAS[BitRev₇(BitRev₇(i) + 1)]` whose
/// block the i-th Gentleman–Sande step undoes. Entry 127 is never read.
pub const ZETAS_INV: [i16; 128] = {
    let mut zetas = [0i16; 128];
    let mut i = 0;
    while i < 128 {
        zetas[i] = (Q - ZETAS[127 - i]) % Q;
        i += 1;
    }
    zetas
};

/// Sub-ring moduli `γ_i = ζ^{2·BitRev₇(i)+1}` in Montgomery form.
///
/// Pair `(c[2i], c[2i+1])` of an NTT-domain polynomial lives in
/// `Z_q[X]/(X^2 - γ_i)`.
pub const GAMMAS: [i16; 128] = {
    let mut gammas = [0i16; 128];
    let mut i = 0;
    while i < 128 {
        let exp = 2 * bitrev7(i) as i64 + 1;
        gammas[i] = (pow_mod(ZETA, exp, Q64) * MONT % Q64) as i16;
        i += 1;
    }
    gammas
};

/// `128⁻¹ · 2¹⁶ (mod q)`: one Montgomery multiply removes the factor 128 the
/// seven inverse layers accumulate.
pub const INV_SCALE: i16 = (pow_mod(128, Q64 - 2, Q64) * MONT % Q64) as i16;

/// Forward NTT (in-place) using the globally selected strategy.
pub fn forward_ntt(r: &mut [i16; N]) {
    simd::dispatch_strategy!(forward_ntt_with(r));
}

/// Inverse NTT (in-place) using the globally selected strategy.
pub fn inverse_ntt(r: &mut [i16; N]) {
    simd::dispatch_strategy!(inverse_ntt_with(r));
}

/// NTT-domain product of `a` and `b` using the globally selected strategy.
#[must_use]
pub fn basemul(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
    simd::dispatch_strategy!(basemul_with(a, b))
}

/// Forward NTT with a fixed strategy. Standard order in, bit-reversed out.
pub fn forward_ntt_with<S: ReductionStrategy>(r: &mut [i16; N]) {
    let mut k: usize = 1;
    let mut len = 128;
    while len >= 2 {
        let mut start = 0;
        while start < N {
            let zeta = ZETAS[k];
            k += 1;
            let (lo, hi) = r[start..start + 2 * len].split_at_mut(len);
            S::butterfly_forward(lo, hi, zeta);
            start += 2 * len;
        }
        len >>= 1;
    }
}

/// Inverse NTT with a fixed strategy. Bit-reversed in, standard order out.
pub fn inverse_ntt_with<S: ReductionStrategy>(r: &mut [i16; N]) {
    let mut k: usize = 0;
    let mut len = 2;
    while len <= 128 {
        let mut start = 0;
        while start < N {
            let zeta = ZETAS_INV[k];
            k += 1;
            let (lo, hi) = r[start..start + 2 * len].split_at_mut(len);
            S::butterfly_inverse(lo, hi, zeta);
            start += 2 * len;
        }
        len <<= 1;
    }
    S::scale(r, INV_SCALE);
}

/// Base multiplication with a fixed strategy.
#[must_use]
pub fn basemul_with<S: ReductionStrategy>(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
    S::basemul(a, b)
}
