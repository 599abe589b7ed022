//! `kyber-math` -- Polynomial arithmetic kernel for Kyber-class KEMs.
//!
//! `no_std`, zero-allocation arithmetic over `Z_q[X]/(X^{256}+1)`, q = 3329:
//! modular reduction, the Number-Theoretic Transform, NTT-domain base
//! multiplication, and portable-SIMD batched variants of the same routines.

#![no_std]
#![feature(portable_simd)]
#![deny(unsafe_code)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]

#[cfg(test)]
extern crate std;

pub mod ntt;
pub mod poly;
pub mod reduce;
pub mod simd;

pub use poly::{NttPolynomial, Polynomial};
pub use simd::{Batched, ReductionStrategy, Scalar, Strategy, set_strategy, strategy};

/// Polynomial ring degree.
pub const N: usize = 256;

/// Field modulus.
pub const Q: i16 = 3329;
