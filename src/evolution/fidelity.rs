// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Superoperator distance.
//!
//! E(T, G) = Re tr[(T − G)† (T − G)] / (2 d²)
//!
//! i.e. the squared Hilbert–Schmidt norm of the difference, normalised by
//! twice the superoperator size. E depends on T − G only through its norm, so
//! it is symmetric, non-negative, and zero iff T = G.

use ndarray::Array2;
use num_complex::Complex64;
use tracing::trace;

use super::types::NumericMode;
use crate::error::{Result, ValidationError};
use crate::validation::validate_superoperator;

/// Normalised squared Hilbert–Schmidt distance between two superoperators.
///
/// `dim` is the Hilbert-space dimension; both matrices must be `dim² × dim²`.
/// Both numeric modes share this implementation, so the result does not depend
/// on `mode`.
pub fn fidelity_error(
    target: &Array2<Complex64>,
    generated: &Array2<Complex64>,
    dim: usize,
    mode: NumericMode,
) -> Result<f64> {
    if dim == 0 {
        return Err(ValidationError::Field {
            field: "dim".into(),
            message: "must be greater than 0".into(),
        }
        .into());
    }
    let size = dim * dim;
    validate_superoperator("target", target, size)?;
    validate_superoperator("generated", generated, size)?;

    let diff = target - generated;
    let gram = conjugate_transpose(&diff).dot(&diff);
    let trace: Complex64 = gram.diag().sum();
    let err = trace.re / (2 * size) as f64;

    trace!(mode = mode.name(), err, "Scored superoperator");
    Ok(err)
}

fn conjugate_transpose(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|z| z.conj())
}
