mod ntt_poly;
mod polynomial;

pub use ntt_poly::NttPolynomial;
pub use polynomial::Polynomial;
