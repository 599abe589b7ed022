use super::Polynomial;
use crate::{N, ntt};

/// Polynomial in NTT domain: 128 bit-reversed sub-ring residues
/// `(c[2i], c[2i+1])` of `Z_q[X]/(X^2 - γ_i)`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct NttPolynomial(pub(crate) [i16; N]);

impl NttPolynomial {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i16; N])
    }

    /// Consuming inverse NTT; coefficients come back in `[0, q)`.
    #[must_use]
    pub fn ntt_inverse(mut self) -> Polynomial {
        ntt::inverse_ntt(&mut self.0);
        Polynomial(self.0)
    }

    /// Pointwise basemul: 128 degree-1 multiplications in NTT domain.
    #[must_use]
    pub fn basemul(&self, other: &Self) -> Self {
        Self(ntt::basemul(&self.0, &other.0))
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i16; N] {
        &self.0
    }

    #[must_use]
    pub const fn coeffs_mut(&mut self) -> &mut [i16; N] {
        &mut self.0
    }
}

impl From<[i16; N]> for NttPolynomial {
    #[inline]
    fn from(coeffs: [i16; N]) -> Self {
        Self(coeffs)
    }
}

impl Default for NttPolynomial {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl core::fmt::Debug for NttPolynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttPolynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}
