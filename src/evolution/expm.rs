// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Matrix exponentials for the two numeric paths.
//!
//! - [`PadeExponential`]: scaling-and-squaring with Padé(13,13), used by the
//!   exact path. Implements the algorithm from
//!   Higham (2005), "The Scaling and Squaring Method for the Matrix
//!   Exponential Revisited", SIAM J. Matrix Anal. Appl. 26(4), 1179.
//! - [`TruncatedSeries`]: fixed-order Taylor series Σ_{k<order} Xᵏ/k!, used by
//!   the differentiable path. Built only from products, sums and scalar
//!   division, with no branching on matrix values, so every step stays
//!   differentiable in the entries of `X`. There is no convergence check:
//!   accuracy is set by `order` and by keeping ‖X‖ small (many time slots).

use ndarray::{s, Array2};
use num_complex::Complex64;

use crate::error::{Error, Result};

/// Matrix exponential capability shared by both numeric paths.
pub trait MatrixExponential: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Compute (an approximation of) exp(A) for a square matrix `a`.
    fn exp(&self, a: &Array2<Complex64>) -> Result<Array2<Complex64>>;
}

/// Truncated power series exponential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncatedSeries {
    order: usize,
}

impl TruncatedSeries {
    /// Series with `order` terms (k = 0 … order−1).
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    /// Number of series terms.
    pub fn order(&self) -> usize {
        self.order
    }
}

impl MatrixExponential for TruncatedSeries {
    fn name(&self) -> &'static str {
        "truncated-series"
    }

    fn exp(&self, a: &Array2<Complex64>) -> Result<Array2<Complex64>> {
        Ok(exp_approx(a, self.order))
    }
}

/// Σ_{k=0}^{order−1} Xᵏ/k! by iterative refinement of the running power.
///
/// `order == 0` yields the zero matrix (empty sum); callers going through
/// [`NumericMode`](super::NumericMode) never see that case.
///
/// # Panics
/// Panics if `x` is not square.
pub fn exp_approx(x: &Array2<Complex64>, order: usize) -> Array2<Complex64> {
    let n = x.nrows();
    assert_eq!(n, x.ncols(), "exp_approx requires a square matrix");

    if order == 0 {
        return Array2::zeros((n, n));
    }

    let eye = Array2::from_diag_elem(n, Complex64::new(1.0, 0.0));
    let (_, result) = (1..order).fold((eye.clone(), eye), |(power, result), k| {
        let power = power.dot(x) / Complex64::new(k as f64, 0.0);
        let result = result + &power;
        (power, result)
    });
    result
}

/// Exact-path exponential: scaling and squaring with Padé(13,13).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PadeExponential;

impl MatrixExponential for PadeExponential {
    fn name(&self) -> &'static str {
        "pade13"
    }

    fn exp(&self, a: &Array2<Complex64>) -> Result<Array2<Complex64>> {
        matrix_exp(a)
    }
}

/// Compute the matrix exponential exp(A) using scaling-and-squaring
/// with Padé(13) approximation.
///
/// # Errors
/// Returns [`Error::Numerical`] if `a` has a non-finite entry, if the Padé
/// denominator is singular, or if squaring overflows.
///
/// # Panics
/// Panics if `a` is not square.
pub fn matrix_exp(a: &Array2<Complex64>) -> Result<Array2<Complex64>> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "matrix_exp requires a square matrix");

    if !a.iter().all(|z| z.is_finite()) {
        return Err(Error::Numerical(
            "matrix exponential of a matrix with non-finite entries".into(),
        ));
    }
    if n == 0 {
        return Ok(Array2::zeros((0, 0)));
    }
    if n == 1 {
        return Ok(Array2::from_elem((1, 1), a[[0, 0]].exp()));
    }

    // ‖A/2^s‖₁ < θ₁₃ = 5.37 (Higham Table 10.2)
    let theta_13: f64 = 5.37;
    let norm = matrix_1_norm(a);
    if !norm.is_finite() {
        return Err(Error::Numerical(format!("1-norm overflow ({}) in matrix exponential", norm)));
    }
    let s = if norm > theta_13 {
        (norm / theta_13).log2().ceil() as i32
    } else {
        0
    };

    let a_scaled = a * c(0.5f64.powi(s));
    let result = pade13(&a_scaled)?;

    // exp(A) = (exp(A/2^s))^(2^s)
    let result = square_repeatedly(result, s);
    if !result.iter().all(|z| z.is_finite()) {
        return Err(Error::Numerical(format!(
            "matrix exponential overflowed after {} squarings (‖A‖₁ = {:.3e})",
            s, norm
        )));
    }
    Ok(result)
}

/// Padé(13,13) coefficients, Higham (2005) eq. (10.33).
const PADE_COEFFS: [f64; 14] = [
    1.0,
    0.5,
    0.12,
    1.833_333_333_333_333_4e-2,
    1.992_753_623_188_405_8e-3,
    1.630_434_782_608_696e-4,
    1.035_196_687_401_6e-5,
    5.175_983_437_008_01e-7,
    2.043_151_356_652_5e-8,
    6.306_022_705_717_593e-10,
    1.483_770_048_404_14e-11,
    2.529_153_491_597_966e-13,
    2.810_170_546_219_962_4e-15,
    1.544_049_750_670_309e-17,
];

fn pade13(a: &Array2<Complex64>) -> Result<Array2<Complex64>> {
    let n = a.nrows();
    let eye = Array2::from_diag_elem(n, c(1.0));
    let b = |k: usize| c(PADE_COEFFS[k]);

    let a2 = a.dot(a);
    let a4 = a2.dot(&a2);
    let a6 = a2.dot(&a4);

    // U = A·[A6·(b13·A6 + b11·A4 + b9·A2) + b7·A6 + b5·A4 + b3·A2 + b1·I]
    let w1 = &a6 * b(13) + &a4 * b(11) + &a2 * b(9);
    let w2 = w1.dot(&a6) + &a6 * b(7) + &a4 * b(5) + &a2 * b(3) + &eye * b(1);
    let u = a.dot(&w2);

    // V = A6·(b12·A6 + b10·A4 + b8·A2) + b6·A6 + b4·A4 + b2·A2 + b0·I
    let v1 = &a6 * b(12) + &a4 * b(10) + &a2 * b(8);
    let v = v1.dot(&a6) + &a6 * b(6) + &a4 * b(4) + &a2 * b(2) + &eye * b(0);

    // exp(A) ≈ (V − U)⁻¹ (V + U)
    solve_linear(&v - &u, &v + &u)
}

#[inline]
fn c(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// Solve A·X = B by Gaussian elimination with partial pivoting.
fn solve_linear(a: Array2<Complex64>, b: Array2<Complex64>) -> Result<Array2<Complex64>> {
    let n = a.nrows();
    let m = b.ncols();

    let mut aug = Array2::zeros((n, n + m));
    aug.slice_mut(s![.., ..n]).assign(&a);
    aug.slice_mut(s![.., n..]).assign(&b);

    for col in 0..n {
        let max_row = (col..n)
            .max_by(|&r1, &r2| aug[[r1, col]].norm().total_cmp(&aug[[r2, col]].norm()))
            .unwrap_or(col);

        if max_row != col {
            for j in 0..(n + m) {
                aug.swap([col, j], [max_row, j]);
            }
        }

        let pivot = aug[[col, col]];
        if pivot.norm() < 1e-15 {
            return Err(Error::Numerical(format!(
                "singular Padé denominator (pivot {:.3e} in column {})",
                pivot.norm(),
                col
            )));
        }

        for row in (col + 1)..n {
            let factor = aug[[row, col]] / pivot;
            for j in col..(n + m) {
                let val = aug[[col, j]];
                aug[[row, j]] -= factor * val;
            }
        }
    }

    let mut x = Array2::<Complex64>::zeros((n, m));
    for col in (0..n).rev() {
        let pivot = aug[[col, col]];
        for j in 0..m {
            let mut sum = aug[[col, n + j]];
            for k in (col + 1)..n {
                sum -= aug[[col, k]] * x[[k, j]];
            }
            x[[col, j]] = sum / pivot;
        }
    }
    Ok(x)
}

fn square_repeatedly(m: Array2<Complex64>, s: i32) -> Array2<Complex64> {
    (0..s).fold(m, |acc, _| acc.dot(&acc))
}

/// Max column sum of absolute values.
fn matrix_1_norm(a: &Array2<Complex64>) -> f64 {
    a.columns()
        .into_iter()
        .map(|col| col.iter().map(|z| z.norm()).sum::<f64>())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_matrix_close, max_abs_diff, random_complex_matrix};
    use std::f64::consts::PI;

    fn eye(n: usize) -> Array2<Complex64> {
        Array2::from_diag_elem(n, c(1.0))
    }

    #[test]
    fn test_expm_zero_is_identity() {
        let zero = Array2::<Complex64>::zeros((4, 4));
        assert_matrix_close(&matrix_exp(&zero).unwrap(), &eye(4), 1e-14);
        assert_matrix_close(&exp_approx(&zero, 20), &eye(4), 0.0);
    }

    #[test]
    fn test_expm_diagonal() {
        let mut a = Array2::zeros((2, 2));
        a[[0, 0]] = c(1.0);
        a[[1, 1]] = c(2.0);
        let result = matrix_exp(&a).unwrap();
        assert!((result[[0, 0]] - c(1.0_f64.exp())).norm() < 1e-12);
        assert!((result[[1, 1]] - c(2.0_f64.exp())).norm() < 1e-12);
        assert!(result[[0, 1]].norm() < 1e-14);
    }

    #[test]
    fn test_expm_pauli_x_rotation() {
        // exp(−iθ/2 σx) = cos(θ/2) I − i sin(θ/2) σx
        let theta = PI / 2.0;
        let mut a = Array2::zeros((2, 2));
        a[[0, 1]] = Complex64::new(0.0, -theta / 2.0);
        a[[1, 0]] = Complex64::new(0.0, -theta / 2.0);

        let (cs, sn) = ((theta / 2.0).cos(), (theta / 2.0).sin());
        let mut expected = Array2::zeros((2, 2));
        expected[[0, 0]] = c(cs);
        expected[[1, 1]] = c(cs);
        expected[[0, 1]] = Complex64::new(0.0, -sn);
        expected[[1, 0]] = Complex64::new(0.0, -sn);

        assert_matrix_close(&matrix_exp(&a).unwrap(), &expected, 1e-12);
        assert_matrix_close(&exp_approx(&a, 20), &expected, 1e-12);
    }

    #[test]
    fn test_expm_scalar() {
        let a = Array2::from_elem((1, 1), Complex64::new(3.0, 1.0));
        let result = matrix_exp(&a).unwrap();
        assert!((result[[0, 0]] - Complex64::new(3.0, 1.0).exp()).norm() < 1e-12);
    }

    #[test]
    fn test_expm_large_norm_needs_scaling() {
        let mut a = Array2::zeros((2, 2));
        a[[0, 0]] = c(100.0);
        a[[1, 1]] = c(-100.0);
        let result = matrix_exp(&a).unwrap();
        let e100 = 100.0_f64.exp();
        assert!((result[[0, 0]].re - e100).abs() / e100 < 1e-10);
        assert!((result[[1, 1]].re - (-100.0_f64).exp()).abs() < 1e-30);
    }

    #[test]
    fn test_expm_inverse() {
        // exp(A)·exp(−A) = I
        let a = random_complex_matrix(6, 3);
        let p = matrix_exp(&a).unwrap();
        let q = matrix_exp(&(-&a)).unwrap();
        assert_matrix_close(&p.dot(&q), &eye(6), 1e-9);
    }

    #[test]
    fn test_exp_approx_order_one_is_identity() {
        let a = random_complex_matrix(3, 4);
        assert_matrix_close(&exp_approx(&a, 1), &eye(3), 0.0);
    }

    #[test]
    fn test_exp_approx_order_two_is_linear() {
        let a = random_complex_matrix(3, 5);
        assert_matrix_close(&exp_approx(&a, 2), &(eye(3) + &a), 1e-15);
    }

    #[test]
    fn test_exp_approx_converges_with_order() {
        // ‖X‖₁ ≤ 1 after rescaling
        let raw = random_complex_matrix(4, 9);
        let x = &raw * c(1.0 / matrix_1_norm(&raw));
        let exact = matrix_exp(&x).unwrap();

        let err_5 = max_abs_diff(&exp_approx(&x, 5), &exact);
        let err_10 = max_abs_diff(&exp_approx(&x, 10), &exact);
        let err_20 = max_abs_diff(&exp_approx(&x, 20), &exact);
        assert!(err_20 < err_10);
        assert!(err_10 < err_5);
        assert!(err_20 < 1e-12);
    }

    #[test]
    fn test_trait_objects_agree_on_small_generators() {
        let raw = random_complex_matrix(16, 17);
        let x = &raw * c(0.5 / matrix_1_norm(&raw));
        let pade: Box<dyn MatrixExponential> = Box::new(PadeExponential);
        let series: Box<dyn MatrixExponential> = Box::new(TruncatedSeries::new(20));
        let diff = max_abs_diff(&pade.exp(&x).unwrap(), &series.exp(&x).unwrap());
        assert!(diff < 1e-12, "diff = {diff}");
    }

    #[test]
    fn test_expm_scales_past_64_halvings() {
        // s ≈ 81; exp(−1e25) underflows to zero on the diagonal
        let mut a = Array2::zeros((2, 2));
        a[[0, 0]] = c(-1e25);
        a[[1, 1]] = c(-1e25);
        let result = matrix_exp(&a).unwrap();
        assert_matrix_close(&result, &Array2::zeros((2, 2)), 0.0);
    }

    #[test]
    fn test_expm_overflow_reported() {
        let mut a = Array2::zeros((2, 2));
        a[[0, 0]] = c(1e25);
        a[[1, 1]] = c(1.0);
        assert!(matches!(matrix_exp(&a), Err(Error::Numerical(_))));
    }

    #[test]
    fn test_expm_non_finite_input_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut a = eye(3);
            a[[1, 2]] = c(bad);
            assert!(matches!(matrix_exp(&a), Err(Error::Numerical(_))));
        }
    }

    #[test]
    fn test_singular_system_reported() {
        let zero = Array2::<Complex64>::zeros((2, 2));
        let result = solve_linear(zero, eye(2));
        assert!(matches!(result, Err(Error::Numerical(_))));
    }
}
