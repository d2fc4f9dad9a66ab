// src/processing/polynomial.rs
//! Polynomial expansion from roots (Vieta's formulas)

use num_traits::Num;

/// Coefficients of the monic polynomial whose roots are `roots`.
///
/// Coefficients are returned in decreasing degree order:
/// `c[0]·X^n + c[1]·X^(n-1) + ... + c[n]`, with `c[0] = 1`.
/// Works for any numeric type, including integers and `Complex<_>`; integer
/// inputs give exact results.
pub fn poly_coeffs_from_roots<T: Clone + Num>(roots: &[T]) -> Vec<T> {
    let mut coeffs = vec![T::zero(); roots.len() + 1];
    coeffs[0] = T::one();
    for (i, root) in roots.iter().enumerate() {
        for k in (1..=i + 1).rev() {
            let shifted = root.clone() * coeffs[k - 1].clone();
            coeffs[k] = coeffs[k].clone() - shifted;
        }
    }
    coeffs
}
