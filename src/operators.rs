// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Operator algebra for the two-qubit system.
//!
//! Builds the Pauli generators, places single-qubit operators on the left or
//! right qubit, and lifts Hilbert-space operators to the superoperator space:
//!
//!   lift(M) = (I ⊗ M*) − (M ⊗ I)
//!
//! where `M*` is the element-wise complex conjugate of `M`. The `-i` factor of
//! the Liouville–von Neumann generator is applied by the caller.

use ndarray::{linalg, Array2};
use num_complex::Complex64;

/// Pauli X = [[0, 1], [1, 0]].
pub fn sigma_x() -> Array2<Complex64> {
    let mut m = Array2::zeros((2, 2));
    m[[0, 1]] = Complex64::new(1.0, 0.0);
    m[[1, 0]] = Complex64::new(1.0, 0.0);
    m
}

/// Pauli Y = [[0, -i], [i, 0]].
pub fn sigma_y() -> Array2<Complex64> {
    let mut m = Array2::zeros((2, 2));
    m[[0, 1]] = Complex64::new(0.0, -1.0);
    m[[1, 0]] = Complex64::new(0.0, 1.0);
    m
}

/// Pauli Z = [[1, 0], [0, -1]].
pub fn sigma_z() -> Array2<Complex64> {
    let mut m = Array2::zeros((2, 2));
    m[[0, 0]] = Complex64::new(1.0, 0.0);
    m[[1, 1]] = Complex64::new(-1.0, 0.0);
    m
}

/// n × n complex identity.
pub fn identity(n: usize) -> Array2<Complex64> {
    Array2::eye(n)
}

/// Kronecker product of two square matrices: (p×p) ⊗ (q×q) → (pq×pq).
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    linalg::kron(a, b)
}

/// Place a single-qubit operator on the left qubit: `op ⊗ I₂`.
pub fn on_left(op: &Array2<Complex64>) -> Array2<Complex64> {
    kron(op, &identity(2))
}

/// Place a single-qubit operator on the right qubit: `I₂ ⊗ op`.
pub fn on_right(op: &Array2<Complex64>) -> Array2<Complex64> {
    kron(&identity(2), op)
}

/// Isotropic two-qubit exchange coupling `X⊗X + Y⊗Y + Z⊗Z`.
pub fn exchange_coupling() -> Array2<Complex64> {
    kron(&sigma_x(), &sigma_x()) + kron(&sigma_y(), &sigma_y()) + kron(&sigma_z(), &sigma_z())
}

/// Lift an operator on the Hilbert space to the superoperator space.
///
/// Returns `(I ⊗ M*) − (M ⊗ I)` with `M*` the complex conjugate (not the
/// conjugate transpose) of `m`.
///
/// # Panics
/// Panics if `m` is not square.
pub fn lift(m: &Array2<Complex64>) -> Array2<Complex64> {
    let n = m.nrows();
    assert_eq!(n, m.ncols(), "lift requires a square matrix");

    let eye = identity(n);
    let m_conj = m.mapv(|z| z.conj());
    kron(&eye, &m_conj) - kron(m, &eye)
}
