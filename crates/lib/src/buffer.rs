//! Owned polynomial coefficient buffers.
//!
//! A [`PolyBuffer`] holds exactly [`N`] coefficients on the heap, starts out
//! zeroed and is wiped when dropped. The kernel operations borrow it:
//! `&mut` for in-place transforms, `&` for multiplication operands.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, N, Q};

/// Heap-allocated buffer of 256 coefficients.
///
/// Whether the contents are in coefficient or NTT domain is tracked by the
/// caller. Coefficients should lie in `[0, q)` before any transform; use
/// [`PolyBuffer::from_canonical`] when importing untrusted data.
#[derive(Clone, PartialEq, Eq)]
pub struct PolyBuffer {
    pub(crate) coeffs: Box<[i16; N]>,
}

impl PolyBuffer {
    /// Zero-initialised buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            coeffs: Box::new([0i16; N]),
        }
    }

    /// Import coefficients, rejecting wrong lengths and values outside
    /// `[0, q)`.
    ///
    /// The range scan visits every coefficient regardless of where the first
    /// bad one sits, so the time taken depends only on the length.
    pub fn from_canonical(coeffs: &[i16]) -> Result<Self, Error> {
        let buf = Self::try_from(coeffs)?;
        match first_out_of_range(&buf.coeffs) {
            Some(index) => Err(Error::CoefficientOutOfRange { index }),
            None => Ok(buf),
        }
    }

    #[inline]
    #[must_use]
    pub fn as_coeffs(&self) -> &[i16; N] {
        &self.coeffs
    }

    #[inline]
    #[must_use]
    pub fn as_coeffs_mut(&mut self) -> &mut [i16; N] {
        &mut self.coeffs
    }
}

/// Index of the first coefficient outside `[0, q)`, found without
/// data-dependent branches.
fn first_out_of_range(coeffs: &[i16; N]) -> Option<usize> {
    let mut found: u32 = 0;
    let mut first: u32 = 0;
    for (i, &c) in coeffs.iter().enumerate() {
        let c = c as i32;
        // Sign bit set iff c < 0 or c > q - 1.
        let bad = (((c | (Q as i32 - 1 - c)) >> 31) & 1) as u32;
        let take = bad & !found;
        first |= (i as u32) & take.wrapping_neg();
        found |= bad;
    }
    (core::hint::black_box(found) == 1).then_some(first as usize)
}

impl Zeroize for PolyBuffer {
    fn zeroize(&mut self) {
        self.coeffs.as_mut_slice().zeroize();
    }
}

impl Drop for PolyBuffer {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for PolyBuffer {}

impl Default for PolyBuffer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&[i16]> for PolyBuffer {
    type Error = Error;

    /// Copy from a slice of exactly [`N`] coefficients. Values are not
    /// range-checked.
    fn try_from(coeffs: &[i16]) -> Result<Self, Error> {
        let arr: &[i16; N] = coeffs.try_into().map_err(|_| Error::InvalidLength {
            expected: N,
            actual: coeffs.len(),
        })?;
        Ok(Self::from(*arr))
    }
}

impl From<[i16; N]> for PolyBuffer {
    #[inline]
    fn from(coeffs: [i16; N]) -> Self {
        Self {
            coeffs: Box::new(coeffs),
        }
    }
}

impl AsRef<[i16]> for PolyBuffer {
    #[inline]
    fn as_ref(&self) -> &[i16] {
        self.coeffs.as_slice()
    }
}

impl AsMut<[i16]> for PolyBuffer {
    #[inline]
    fn as_mut(&mut self) -> &mut [i16] {
        self.coeffs.as_mut_slice()
    }
}

impl core::fmt::Debug for PolyBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PolyBuffer")
            .field("len", &self.coeffs.len())
            .finish_non_exhaustive()
    }
}
