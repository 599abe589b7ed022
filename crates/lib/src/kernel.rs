//! Buffer-level kernel operations.
//!
//! Every operation runs to completion on fixed-size data, never allocates
//! beyond [`allocate_polynomial_buffer`], and never validates coefficient
//! ranges: inputs outside `[0, q)` give unspecified (but memory-safe)
//! results. Domain discipline is the caller's: multiply only NTT-domain
//! buffers and invert only NTT-domain buffers.

use kyber_math::ntt;

use crate::PolyBuffer;

/// Reserve a zeroed buffer of [`crate::N`] coefficients.
#[must_use]
pub fn allocate_polynomial_buffer() -> PolyBuffer {
    PolyBuffer::new()
}

/// Wipe and free a buffer. The handle is consumed, so it cannot be reused.
pub fn release_polynomial_buffer(buffer: PolyBuffer) {
    drop(buffer);
}

/// Coefficient domain -> NTT domain, in place. Output in `[0, q)`.
pub fn forward_ntt(buffer: &mut PolyBuffer) {
    ntt::forward_ntt(&mut buffer.coeffs);
}

/// NTT domain -> coefficient domain, in place, including the `128⁻¹`
/// scaling. Output in `[0, q)`.
pub fn inverse_ntt(buffer: &mut PolyBuffer) {
    ntt::inverse_ntt(&mut buffer.coeffs);
}

/// `dst <- a ∘ b` in the NTT domain.
pub fn pointwise_multiply(dst: &mut PolyBuffer, a: &PolyBuffer, b: &PolyBuffer) {
    *dst.coeffs = ntt::basemul(&a.coeffs, &b.coeffs);
}

/// `a <- a ∘ b` in the NTT domain (result overwrites the first operand).
pub fn pointwise_multiply_assign(a: &mut PolyBuffer, b: &PolyBuffer) {
    *a.coeffs = ntt::basemul(&a.coeffs, &b.coeffs);
}
