//! `kyber-kernel` -- Polynomial buffers and NTT-domain multiplication for
//! Kyber-class KEMs.
//!
//! The caller owns [`PolyBuffer`]s and moves them through the kernel:
//! [`forward_ntt`] on each operand, [`pointwise_multiply`] into a result, then
//! [`inverse_ntt`] on the result. The arithmetic lives in [`math`]
//! (`kyber-math`); this crate adds ownership, import validation and wiping.

#![deny(unsafe_code)]

pub mod buffer;
pub mod kernel;

pub use buffer::PolyBuffer;
pub use kernel::{
    allocate_polynomial_buffer, forward_ntt, inverse_ntt, pointwise_multiply,
    pointwise_multiply_assign, release_polynomial_buffer,
};
pub use kyber_math as math;
pub use kyber_math::{
    N, Q, Strategy,
    reduce::{barrett_reduce, montgomery_reduce},
    set_strategy, strategy,
};

/// Errors returned when importing coefficients into a [`PolyBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Input slice has the wrong number of coefficients.
    InvalidLength {
        /// Expected coefficient count ([`N`]).
        expected: usize,
        /// Actual coefficient count received.
        actual: usize,
    },
    /// A coefficient lies outside `[0, q)`.
    CoefficientOutOfRange {
        /// Position of the first offending coefficient.
        index: usize,
    },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => {
                write!(f, "expected {expected} coefficients, got {actual}")
            }
            Self::CoefficientOutOfRange { index } => {
                write!(f, "coefficient {index} is outside [0, {Q})")
            }
        }
    }
}

impl core::error::Error for Error {}
