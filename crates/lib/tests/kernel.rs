//! Randomized algebraic checks of the buffer-level kernel and of the two
//! reduction strategies against each other.

use kyber_kernel::{
    N, PolyBuffer, Q, allocate_polynomial_buffer, barrett_reduce, forward_ntt, inverse_ntt,
    math::{
        Batched, ReductionStrategy, Scalar,
        ntt::{basemul_with, forward_ntt_with, inverse_ntt_with},
        reduce::MONT,
        simd::LANES,
    },
    montgomery_reduce, pointwise_multiply, pointwise_multiply_assign, release_polynomial_buffer,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const TRIALS: usize = 64;

fn rng(tag: u64) -> StdRng {
    StdRng::seed_from_u64(0x6b79_6265_7200 ^ tag)
}

fn random_coeffs(rng: &mut StdRng) -> [i16; N] {
    core::array::from_fn(|_| rng.random_range(0..Q))
}

fn random_buffer(rng: &mut StdRng) -> PolyBuffer {
    PolyBuffer::from(random_coeffs(rng))
}

/// Negacyclic convolution modulo `X^256 + 1`, reduced into `[0, q)`.
fn schoolbook_mul(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
    let mut c = [0i64; N];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            let prod = ai as i64 * bj as i64;
            if i + j < N {
                c[i + j] += prod;
            } else {
                c[i + j - N] -= prod;
            }
        }
    }
    c.map(|x| x.rem_euclid(Q as i64) as i16)
}

fn multiply(a: &PolyBuffer, b: &PolyBuffer) -> PolyBuffer {
    let (mut fa, mut fb) = (a.clone(), b.clone());
    forward_ntt(&mut fa);
    forward_ntt(&mut fb);
    let mut out = allocate_polynomial_buffer();
    pointwise_multiply(&mut out, &fa, &fb);
    inverse_ntt(&mut out);
    out
}

#[test]
fn inverse_undoes_forward() {
    let mut rng = rng(1);
    for _ in 0..TRIALS {
        let original = random_buffer(&mut rng);
        let mut p = original.clone();
        forward_ntt(&mut p);
        assert!(p.as_coeffs().iter().all(|c| (0..Q).contains(c)));
        inverse_ntt(&mut p);
        assert_eq!(p, original);
    }
}

#[test]
fn multiplication_matches_schoolbook() {
    let mut rng = rng(2);
    for _ in 0..16 {
        let a = random_buffer(&mut rng);
        let b = random_buffer(&mut rng);
        let got = multiply(&a, &b);
        assert_eq!(got.as_coeffs(), &schoolbook_mul(a.as_coeffs(), b.as_coeffs()));
    }
}

#[test]
fn in_place_product_matches_out_of_place() {
    let mut rng = rng(3);
    let mut a = random_buffer(&mut rng);
    let mut b = random_buffer(&mut rng);
    forward_ntt(&mut a);
    forward_ntt(&mut b);
    let mut out = PolyBuffer::new();
    pointwise_multiply(&mut out, &a, &b);
    pointwise_multiply_assign(&mut a, &b);
    assert_eq!(a, out);
}

#[test]
fn identity_and_zero() {
    let mut rng = rng(4);
    let mut one = PolyBuffer::new();
    one.as_coeffs_mut()[0] = 1;
    let zero = PolyBuffer::new();

    let mut z = zero.clone();
    forward_ntt(&mut z);
    assert_eq!(z, zero);

    for _ in 0..8 {
        let p = random_buffer(&mut rng);
        assert_eq!(multiply(&p, &one), p);
        assert_eq!(multiply(&p, &zero), zero);
    }
}

#[test]
fn transform_is_linear() {
    let mut rng = rng(5);
    for _ in 0..16 {
        let a = random_coeffs(&mut rng);
        let b = random_coeffs(&mut rng);
        let sum: [i16; N] = core::array::from_fn(|i| (a[i] + b[i]) % Q);
        let (mut fa, mut fb, mut fs) = (a, b, sum);
        forward_ntt_with::<Scalar>(&mut fa);
        forward_ntt_with::<Scalar>(&mut fb);
        forward_ntt_with::<Scalar>(&mut fs);
        for i in 0..N {
            assert_eq!(fs[i], (fa[i] + fb[i]) % Q, "slot {i}");
        }
    }
}

#[test]
fn all_max_coefficients_survive_both_strategies() {
    let max = [Q - 1; N];
    let mut s = max;
    let mut v = max;
    forward_ntt_with::<Scalar>(&mut s);
    forward_ntt_with::<Batched>(&mut v);
    assert_eq!(s, v);
    let sq_s = basemul_with::<Scalar>(&s, &s);
    let sq_v = basemul_with::<Batched>(&v, &v);
    assert_eq!(sq_s, sq_v);
    inverse_ntt_with::<Scalar>(&mut s);
    inverse_ntt_with::<Batched>(&mut v);
    assert_eq!(s, max);
    assert_eq!(v, max);

    let mut sq = sq_s;
    inverse_ntt_with::<Batched>(&mut sq);
    assert_eq!(sq, schoolbook_mul(&max, &max));
}

#[test]
fn strategies_agree_on_random_polynomials() {
    let mut rng = rng(6);
    for _ in 0..TRIALS {
        let a = random_coeffs(&mut rng);
        let b = random_coeffs(&mut rng);
        let (mut sa, mut va) = (a, a);
        forward_ntt_with::<Scalar>(&mut sa);
        forward_ntt_with::<Batched>(&mut va);
        assert_eq!(sa, va);
        let (mut sb, mut vb) = (b, b);
        inverse_ntt_with::<Scalar>(&mut sb);
        inverse_ntt_with::<Batched>(&mut vb);
        assert_eq!(sb, vb);
        assert_eq!(basemul_with::<Scalar>(&a, &b), basemul_with::<Batched>(&a, &b));
    }
}

#[test]
fn batched_lanes_equal_scalar_lanes() {
    let mut rng = rng(7);
    let bound = Q as i32 * (1 << 15);
    for _ in 0..4096 {
        let acc: [i32; LANES] = core::array::from_fn(|_| rng.random_range(-bound..bound));
        assert_eq!(
            Scalar::montgomery_reduce_lanes(acc),
            Batched::montgomery_reduce_lanes(acc)
        );

        let lo: [i16; LANES] = core::array::from_fn(|_| rng.random_range(0..Q));
        let hi: [i16; LANES] = core::array::from_fn(|_| rng.random_range(0..Q));
        let zetas: [i16; LANES] = core::array::from_fn(|_| rng.random_range(0..Q));
        assert_eq!(
            Scalar::butterfly_lanes(lo, hi, zetas),
            Batched::butterfly_lanes(lo, hi, zetas)
        );
    }
}

#[test]
fn reductions_are_congruent() {
    let mut rng = rng(8);
    let q = Q as i64;
    // MONT = R mod q, so montgomery_reduce(a) * MONT == a (mod q).
    let bound = Q as i32 * (1 << 15);
    for _ in 0..100_000 {
        let a = rng.random_range(-bound..bound);
        let r = montgomery_reduce(a);
        assert!(r > -Q && r < Q);
        assert_eq!((r as i64 * MONT as i64 - a as i64).rem_euclid(q), 0, "a = {a}");

        let b: i16 = rng.random();
        let s = barrett_reduce(b);
        assert!((0..Q).contains(&s));
        assert_eq!((s as i64 - b as i64).rem_euclid(q), 0, "b = {b}");
    }
}

#[test]
fn released_buffers_are_moved() {
    let mut rng = rng(9);
    let buffers: Vec<PolyBuffer> = (0..8).map(|_| random_buffer(&mut rng)).collect();
    for b in buffers {
        release_polynomial_buffer(b);
    }
}
